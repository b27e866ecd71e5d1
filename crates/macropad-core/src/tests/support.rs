//! In-memory stand-ins for the OS hook, the injector and the scheduler.

use crate::{
    CoreResult, Direction, GlobalInputHook, HookCode, HookEvent, HookInterest, HookListener,
    InjectorCode, InjectorSession, InputInjector, KeySymbol, KeySymbolCatalog, MacroError,
    PlaybackRequest, PlaybackScheduler, SubscriptionId,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use error_location::ErrorLocation;

type Subscriber = (SubscriptionId, HookInterest, Arc<dyn HookListener>);

pub(crate) fn catalog() -> Arc<KeySymbolCatalog> {
    Arc::new(KeySymbolCatalog::standard())
}

#[allow(clippy::unwrap_used)]
pub(crate) fn hook_code(name: &str) -> HookCode {
    KeySymbolCatalog::standard()
        .hook_code(&KeySymbol::new(name))
        .unwrap()
}

#[allow(clippy::unwrap_used)]
pub(crate) fn injector_code(name: &str) -> InjectorCode {
    KeySymbolCatalog::standard()
        .injector_code(&KeySymbol::new(name))
        .unwrap()
}

/// Hook that delivers events only when a test calls `emit`.
pub(crate) struct FakeHook {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
    failing: bool,
}

#[allow(clippy::unwrap_used)]
impl FakeHook {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
            failing: false,
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
            failing: true,
        })
    }

    pub(crate) fn emit(&self, event: HookEvent) {
        // Snapshot first so listeners may unsubscribe while handling.
        let listeners: Vec<Arc<dyn HookListener>> = self
            .subscribers
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, interest, _)| interest.wants(&event))
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener.on_event(&event);
        }
    }

    pub(crate) fn press(&self, name: &str) {
        self.emit(HookEvent::KeyPressed(hook_code(name)));
    }

    pub(crate) fn release(&self, name: &str) {
        self.emit(HookEvent::KeyReleased(hook_code(name)));
    }

    pub(crate) fn tap(&self, name: &str) {
        self.press(name);
        self.release(name);
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

#[allow(clippy::unwrap_used)]
impl GlobalInputHook for FakeHook {
    fn subscribe(
        &self,
        interest: HookInterest,
        listener: Arc<dyn HookListener>,
    ) -> CoreResult<SubscriptionId> {
        if self.failing {
            return Err(MacroError::HookFailure {
                reason: "hook unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap()
            .push((id, interest, listener));
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> CoreResult<()> {
        self.subscribers
            .lock()
            .unwrap()
            .retain(|(sub_id, _, _)| *sub_id != id);
        Ok(())
    }
}

/// One command received by the fake injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Injected {
    Key(InjectorCode, Direction),
    Button(Direction),
    Move(i32, i32),
}

/// Injector recording every command with the auto-delay in force.
pub(crate) struct FakeInjector {
    log: Arc<Mutex<Vec<(Injected, Duration)>>>,
    start_pointer: (i32, i32),
    available: bool,
}

#[allow(clippy::unwrap_used)]
impl FakeInjector {
    pub(crate) fn new() -> Arc<Self> {
        Self::with_pointer(0, 0)
    }

    pub(crate) fn with_pointer(x: i32, y: i32) -> Arc<Self> {
        Arc::new(Self {
            log: Arc::new(Mutex::new(Vec::new())),
            start_pointer: (x, y),
            available: true,
        })
    }

    pub(crate) fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            log: Arc::new(Mutex::new(Vec::new())),
            start_pointer: (0, 0),
            available: false,
        })
    }

    pub(crate) fn commands(&self) -> Vec<Injected> {
        self.log.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }

    pub(crate) fn entries(&self) -> Vec<(Injected, Duration)> {
        self.log.lock().unwrap().clone()
    }
}

impl InputInjector for FakeInjector {
    fn open_session(&self) -> CoreResult<Box<dyn InjectorSession>> {
        if !self.available {
            return Err(MacroError::PlaybackFault {
                reason: "injector unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Box::new(FakeSession {
            log: Arc::clone(&self.log),
            pointer: self.start_pointer,
            delay: Duration::ZERO,
        }))
    }
}

struct FakeSession {
    log: Arc<Mutex<Vec<(Injected, Duration)>>>,
    pointer: (i32, i32),
    delay: Duration,
}

#[allow(clippy::unwrap_used)]
impl FakeSession {
    fn push(&self, command: Injected) {
        self.log.lock().unwrap().push((command, self.delay));
    }
}

impl InjectorSession for FakeSession {
    fn key(&mut self, code: InjectorCode, direction: Direction) -> CoreResult<()> {
        self.push(Injected::Key(code, direction));
        Ok(())
    }

    fn mouse_button(&mut self, direction: Direction) -> CoreResult<()> {
        self.push(Injected::Button(direction));
        Ok(())
    }

    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()> {
        self.pointer = (x, y);
        self.push(Injected::Move(x, y));
        Ok(())
    }

    fn pointer_position(&mut self) -> CoreResult<(i32, i32)> {
        Ok(self.pointer)
    }

    fn set_auto_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    fn pause(&mut self, _delay: Duration) {}
}

/// Scheduler that only remembers what it was asked to play.
#[derive(Default)]
pub(crate) struct RecordingScheduler {
    requests: Mutex<Vec<PlaybackRequest>>,
}

#[allow(clippy::unwrap_used)]
impl RecordingScheduler {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn requests(&self) -> Vec<PlaybackRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[allow(clippy::unwrap_used)]
impl PlaybackScheduler for RecordingScheduler {
    fn schedule(&self, request: PlaybackRequest) {
        self.requests.lock().unwrap().push(request);
    }
}
