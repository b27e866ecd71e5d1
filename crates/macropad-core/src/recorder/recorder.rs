use crate::{
    CoreResult, MacroError,
    catalog::KeySymbolCatalog,
    hook::{GlobalInputHook, HookEvent, HookListener},
    recorder::{RecordingComplete, RecordingSettings, session::RecordingSession},
};

use std::{
    panic::Location,
    sync::{Arc, Mutex, MutexGuard, Weak},
};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Turns live hook events into a macro event list.
///
/// One recording at a time per instance. Several recorders (and the trigger
/// registry) may be subscribed to the same hook concurrently.
pub struct Recorder {
    shared: Arc<RecorderShared>,
}

struct RecorderShared {
    hook: Arc<dyn GlobalInputHook>,
    catalog: Arc<KeySymbolCatalog>,
    session: Mutex<Option<RecordingSession>>,
}

/// Hook subscriber bound to one session. Holds the recorder weakly so the
/// hook's subscriber list never keeps a dropped recorder alive.
struct SessionListener {
    shared: Weak<RecorderShared>,
    session_id: Uuid,
}

impl Recorder {
    /// Create an idle recorder.
    pub fn new(hook: Arc<dyn GlobalInputHook>, catalog: Arc<KeySymbolCatalog>) -> Self {
        Self {
            shared: Arc::new(RecorderShared {
                hook,
                catalog,
                session: Mutex::new(None),
            }),
        }
    }

    /// Begin recording.
    ///
    /// Keys are always captured; mouse buttons and motion depend on
    /// `settings.level`. `on_complete` receives the events when the session
    /// stops, either through [`Recorder::stop`] or the stop-key combination.
    ///
    /// # Errors
    ///
    /// `AlreadyRecording` if a session is active, `HookFailure` if the hook
    /// subscription fails. The recorder stays idle in both cases.
    #[track_caller]
    #[instrument(skip(self, on_complete))]
    pub fn start(
        &self,
        settings: RecordingSettings,
        on_complete: RecordingComplete,
    ) -> CoreResult<()> {
        let mut slot = self.shared.lock_session();

        if slot.is_some() {
            return Err(MacroError::AlreadyRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let interest = settings.level.interest();
        let mut session = RecordingSession::new(settings, &self.shared.catalog, on_complete);

        let listener = Arc::new(SessionListener {
            shared: Arc::downgrade(&self.shared),
            session_id: session.id,
        });

        session.subscription = Some(self.shared.hook.subscribe(interest, listener)?);

        info!(session_id = %session.id, ?interest, "Recording started");
        *slot = Some(session);

        Ok(())
    }

    /// End the active recording and deliver its events to the completion
    /// callback. A no-op when idle.
    ///
    /// With `stopped_by_key`, the trailing stop-key presses and releases are
    /// removed when they match the configured stop keys.
    pub fn stop(&self, stopped_by_key: bool) {
        self.shared.stop(stopped_by_key);
    }

    /// Whether a session is active.
    pub fn is_recording(&self) -> bool {
        self.shared.lock_session().is_some()
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.shared.stop(false);
    }
}

impl RecorderShared {
    fn lock_session(&self) -> MutexGuard<'_, Option<RecordingSession>> {
        self.session.lock().unwrap_or_else(|e| {
            error!("Recording session lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn handle(&self, session_id: Uuid, event: &HookEvent) {
        let stop_requested = {
            let mut slot = self.lock_session();
            match slot.as_mut() {
                Some(session) if session.id == session_id => session.record(event, &self.catalog),
                _ => return,
            }
        };

        if stop_requested {
            debug!(session_id = %session_id, "Stop keys released");
            self.stop(true);
        }
    }

    fn stop(&self, stopped_by_key: bool) {
        let Some(session) = self.lock_session().take() else {
            return;
        };

        let session_id = session.id;

        if let Some(subscription) = session.subscription
            && let Err(e) = self.hook.unsubscribe(subscription)
        {
            warn!(session_id = %session_id, error = ?e, "Failed to unsubscribe recorder");
        }

        let (events, on_complete) = session.finish(stopped_by_key, &self.catalog);

        info!(
            session_id = %session_id,
            stopped_by_key,
            event_count = events.len(),
            "Recording stopped"
        );

        on_complete(events);
    }
}

impl HookListener for SessionListener {
    fn on_event(&self, event: &HookEvent) {
        if let Some(shared) = self.shared.upgrade() {
            shared.handle(self.session_id, event);
        }
    }
}
