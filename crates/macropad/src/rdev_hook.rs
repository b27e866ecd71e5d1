//! Process-wide global input hook backed by `rdev`.
//!
//! One listener thread is started on the first subscription and runs until
//! the process exits. A listener that fails to start fails that subscription
//! with `HookFailure`, and the next subscription tries again. Every OS event
//! is translated once and fanned out to the subscribers whose interest
//! covers it.

use macropad_core::{
    CoreResult, GlobalInputHook, HookCode, HookEvent, HookInterest, HookListener, KeySymbol,
    KeySymbolCatalog, MacroError, MouseButton, SubscriptionId,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, AtomicU64, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use error_location::ErrorLocation;
use rdev::{Button, Event, EventType, Key};
use tracing::{debug, error, info, instrument, trace};

/// How long a fresh listener gets to fail before it counts as running.
/// `rdev::listen` reports a missing display or missing permissions almost
/// immediately.
const LISTENER_STARTUP_GRACE: Duration = Duration::from_millis(150);

type Subscriber = (SubscriptionId, HookInterest, Arc<dyn HookListener>);

/// OS event source: blocks delivering events to the callback, or returns
/// why it could not start.
pub(crate) type ListenFn = fn(Box<dyn FnMut(Event) + Send>) -> Result<(), String>;

/// Global keyboard and mouse hook shared by the recorder and the registry.
pub struct RdevHook {
    shared: Arc<HookShared>,
    listen: ListenFn,
    startup: Mutex<()>,
}

struct HookShared {
    catalog: Arc<KeySymbolCatalog>,
    next_id: AtomicU64,
    listening: AtomicBool,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl RdevHook {
    /// Hook translating keys through `catalog`. Nothing is captured until
    /// the first subscription.
    pub fn new(catalog: Arc<KeySymbolCatalog>) -> Self {
        Self::with_listener(catalog, rdev_listen)
    }

    pub(crate) fn with_listener(catalog: Arc<KeySymbolCatalog>, listen: ListenFn) -> Self {
        Self {
            shared: Arc::new(HookShared {
                catalog,
                next_id: AtomicU64::new(1),
                listening: AtomicBool::new(false),
                subscribers: Mutex::new(Vec::new()),
            }),
            listen,
            startup: Mutex::new(()),
        }
    }

    /// Start the listener thread unless one is running, and wait out the
    /// startup grace period so an immediate failure reaches the caller.
    #[track_caller]
    fn ensure_listening(&self) -> CoreResult<()> {
        let _startup = self.startup.lock().unwrap_or_else(|e| {
            error!("Hook startup lock poisoned, recovering: {}", e);
            e.into_inner()
        });

        if self.shared.listening.load(Ordering::SeqCst) {
            return Ok(());
        }

        let (failed_tx, failed_rx) = mpsc::channel::<String>();
        let shared = Arc::clone(&self.shared);
        let listen = self.listen;

        shared.listening.store(true, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name("macropad-hook".to_string())
            .spawn(move || {
                info!("Global input listener started");

                let dispatcher = Arc::clone(&shared);
                let result = listen(Box::new(move |event: Event| dispatcher.dispatch(&event)));

                shared.listening.store(false, Ordering::SeqCst);

                if let Err(reason) = result {
                    error!(reason = %reason, "Global input listener stopped");
                    let _ = failed_tx.send(reason);
                }
            });

        if let Err(e) = spawned {
            self.shared.listening.store(false, Ordering::SeqCst);
            return Err(MacroError::HookFailure {
                reason: format!("Failed to spawn listener thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match failed_rx.recv_timeout(LISTENER_STARTUP_GRACE) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Ok(reason) => Err(MacroError::HookFailure {
                reason: format!("Global input listener failed to start: {}", reason),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(RecvTimeoutError::Disconnected) => {
                self.shared.listening.store(false, Ordering::SeqCst);
                Err(MacroError::HookFailure {
                    reason: "Global input listener exited during startup".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}

fn rdev_listen(callback: Box<dyn FnMut(Event) + Send>) -> Result<(), String> {
    rdev::listen(callback).map_err(|e| format!("{:?}", e))
}

impl GlobalInputHook for RdevHook {
    #[instrument(skip(self, listener))]
    fn subscribe(
        &self,
        interest: HookInterest,
        listener: Arc<dyn HookListener>,
    ) -> CoreResult<SubscriptionId> {
        self.ensure_listening()?;

        let id = SubscriptionId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        self.shared.lock_subscribers().push((id, interest, listener));

        debug!(subscription = id.0, "Hook subscriber added");

        Ok(id)
    }

    #[instrument(skip(self))]
    fn unsubscribe(&self, id: SubscriptionId) -> CoreResult<()> {
        let mut subscribers = self.shared.lock_subscribers();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _, _)| *sub_id != id);

        if subscribers.len() == before {
            debug!(subscription = id.0, "Unsubscribe for unknown subscription ignored");
        } else {
            debug!(subscription = id.0, "Hook subscriber removed");
        }

        Ok(())
    }
}

impl HookShared {
    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers.lock().unwrap_or_else(|e| {
            error!("Hook subscriber lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn dispatch(&self, event: &Event) {
        let Some(hook_event) = translate(&event.event_type, &self.catalog) else {
            return;
        };

        // Listeners may unsubscribe themselves, so call them outside the lock.
        let listeners: Vec<Arc<dyn HookListener>> = self
            .lock_subscribers()
            .iter()
            .filter(|(_, interest, _)| interest.wants(&hook_event))
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener.on_event(&hook_event);
        }
    }
}

/// Hook event for an `rdev` event, or `None` for wheel input and keys the
/// catalog has no name for.
pub(crate) fn translate(event_type: &EventType, catalog: &KeySymbolCatalog) -> Option<HookEvent> {
    match *event_type {
        EventType::KeyPress(key) => hook_code(key, catalog).map(HookEvent::KeyPressed),
        EventType::KeyRelease(key) => hook_code(key, catalog).map(HookEvent::KeyReleased),
        EventType::ButtonPress(button) => Some(HookEvent::MousePressed(mouse_button(button))),
        EventType::ButtonRelease(button) => Some(HookEvent::MouseReleased(mouse_button(button))),
        EventType::MouseMove { x, y } => Some(HookEvent::MouseMoved {
            x: x.round() as i32,
            y: y.round() as i32,
        }),
        EventType::Wheel { .. } => None,
    }
}

fn hook_code(key: Key, catalog: &KeySymbolCatalog) -> Option<HookCode> {
    let Some(name) = key_name(key) else {
        trace!(key = ?key, "Key has no catalog name");
        return None;
    };

    catalog.hook_code(&KeySymbol::new(name)).ok()
}

fn mouse_button(button: Button) -> MouseButton {
    match button {
        Button::Left => MouseButton::Left,
        Button::Right => MouseButton::Right,
        Button::Middle => MouseButton::Middle,
        Button::Unknown(code) => MouseButton::Other(code),
    }
}

/// Catalog name of a physical key.
pub(crate) fn key_name(key: Key) -> Option<&'static str> {
    let name = match key {
        Key::KeyA => "A",
        Key::KeyB => "B",
        Key::KeyC => "C",
        Key::KeyD => "D",
        Key::KeyE => "E",
        Key::KeyF => "F",
        Key::KeyG => "G",
        Key::KeyH => "H",
        Key::KeyI => "I",
        Key::KeyJ => "J",
        Key::KeyK => "K",
        Key::KeyL => "L",
        Key::KeyM => "M",
        Key::KeyN => "N",
        Key::KeyO => "O",
        Key::KeyP => "P",
        Key::KeyQ => "Q",
        Key::KeyR => "R",
        Key::KeyS => "S",
        Key::KeyT => "T",
        Key::KeyU => "U",
        Key::KeyV => "V",
        Key::KeyW => "W",
        Key::KeyX => "X",
        Key::KeyY => "Y",
        Key::KeyZ => "Z",
        Key::Num0 => "0",
        Key::Num1 => "1",
        Key::Num2 => "2",
        Key::Num3 => "3",
        Key::Num4 => "4",
        Key::Num5 => "5",
        Key::Num6 => "6",
        Key::Num7 => "7",
        Key::Num8 => "8",
        Key::Num9 => "9",
        Key::F1 => "F1",
        Key::F2 => "F2",
        Key::F3 => "F3",
        Key::F4 => "F4",
        Key::F5 => "F5",
        Key::F6 => "F6",
        Key::F7 => "F7",
        Key::F8 => "F8",
        Key::F9 => "F9",
        Key::F10 => "F10",
        Key::F11 => "F11",
        Key::F12 => "F12",
        Key::ControlLeft => "CTRL",
        Key::ControlRight => "RIGHT_CTRL",
        Key::ShiftLeft => "SHIFT",
        Key::ShiftRight => "RIGHT_SHIFT",
        Key::Alt => "ALT",
        Key::AltGr => "RIGHT_ALT",
        Key::MetaLeft => "META",
        Key::MetaRight => "RIGHT_META",
        Key::Space => "SPACE",
        Key::Return | Key::KpReturn => "ENTER",
        Key::Escape => "ESCAPE",
        Key::Backspace => "BACK_SPACE",
        Key::Tab => "TAB",
        Key::CapsLock => "CAPS_LOCK",
        Key::NumLock => "NUM_LOCK",
        Key::ScrollLock => "SCROLL_LOCK",
        Key::Insert => "INSERT",
        Key::Delete => "DELETE",
        Key::Home => "HOME",
        Key::End => "END",
        Key::PageUp => "PAGE_UP",
        Key::PageDown => "PAGE_DOWN",
        Key::UpArrow => "UP",
        Key::DownArrow => "DOWN",
        Key::LeftArrow => "LEFT",
        Key::RightArrow => "RIGHT",
        Key::PrintScreen => "PRINTSCREEN",
        Key::Pause => "PAUSE",
        Key::Comma => "COMMA",
        Key::Dot => "PERIOD",
        Key::Slash => "SLASH",
        Key::SemiColon => "SEMICOLON",
        Key::Equal => "EQUALS",
        Key::Minus => "MINUS",
        Key::LeftBracket => "OPEN_BRACKET",
        Key::BackSlash => "BACK_SLASH",
        Key::RightBracket => "CLOSE_BRACKET",
        Key::Quote => "QUOTE",
        Key::BackQuote => "BACK_QUOTE",
        _ => return None,
    };

    Some(name)
}
