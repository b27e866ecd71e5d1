use crate::{
    catalog::{HookCode, KeySymbolCatalog},
    hook::{HookEvent, SubscriptionId},
    model::{KeyCommand, MacroEvent, MouseAction},
    recorder::{RecordingLevel, RecordingSettings},
};

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

/// Callback receiving the captured events when a recording stops.
///
/// May run on the hook delivery thread when the stop keys end the session.
pub type RecordingComplete = Box<dyn FnOnce(Vec<MacroEvent>) + Send + 'static>;

/// State of one active recording. Exists only between `start` and `stop`.
pub(crate) struct RecordingSession {
    pub(crate) id: Uuid,
    pub(crate) subscription: Option<SubscriptionId>,
    settings: RecordingSettings,
    /// `None` when stop keys are disabled or any of them failed to resolve.
    stop_codes: Option<HashSet<HookCode>>,
    captured: Vec<MacroEvent>,
    pressed: HashSet<HookCode>,
    on_complete: RecordingComplete,
}

impl RecordingSession {
    pub(crate) fn new(
        settings: RecordingSettings,
        catalog: &KeySymbolCatalog,
        on_complete: RecordingComplete,
    ) -> Self {
        let stop_codes = resolve_stop_codes(&settings, catalog);

        Self {
            id: Uuid::new_v4(),
            subscription: None,
            settings,
            stop_codes,
            captured: Vec::new(),
            pressed: HashSet::new(),
            on_complete,
        }
    }

    /// Append the event if this session's level captures it.
    ///
    /// Returns `true` when the release completes the stop-key combination.
    pub(crate) fn record(&mut self, event: &HookEvent, catalog: &KeySymbolCatalog) -> bool {
        match *event {
            HookEvent::KeyPressed(code) => {
                self.push_key(code, KeyCommand::Press, catalog);
                self.pressed.insert(code);
            }
            HookEvent::KeyReleased(code) => {
                self.push_key(code, KeyCommand::Release, catalog);

                // Compare against the held set as it stood before this release.
                if let Some(stop_codes) = &self.stop_codes
                    && stop_codes.contains(&code)
                    && self.pressed == *stop_codes
                {
                    return true;
                }

                self.pressed.remove(&code);
            }
            HookEvent::MousePressed(_) if self.settings.level != RecordingLevel::KeysOnly => {
                self.captured.push(MacroEvent::Mouse(MouseAction::Press));
            }
            HookEvent::MouseReleased(_) if self.settings.level != RecordingLevel::KeysOnly => {
                self.captured.push(MacroEvent::Mouse(MouseAction::Release));
            }
            HookEvent::MouseMoved { x, y }
                if self.settings.level == RecordingLevel::KeysMouseAndMoves =>
            {
                let action = if self.settings.animate_mouse_moves {
                    MouseAction::AnimateTo { x, y }
                } else {
                    MouseAction::SnapTo { x, y }
                };
                self.captured.push(MacroEvent::Mouse(action));
            }
            HookEvent::MousePressed(_)
            | HookEvent::MouseReleased(_)
            | HookEvent::MouseMoved { .. } => {}
        }

        false
    }

    /// Consume the session, returning the final event list and the callback
    /// that should receive it.
    pub(crate) fn finish(
        self,
        stopped_by_key: bool,
        catalog: &KeySymbolCatalog,
    ) -> (Vec<MacroEvent>, RecordingComplete) {
        let events = match (&self.stop_codes, stopped_by_key) {
            (Some(stop_codes), true) => trim_stop_sequence(self.captured, stop_codes, catalog),
            _ => self.captured,
        };

        (events, self.on_complete)
    }

    fn push_key(&mut self, code: HookCode, command: KeyCommand, catalog: &KeySymbolCatalog) {
        match catalog.name_for_hook(code) {
            Some(key) => self.captured.push(MacroEvent::Key { command, key }),
            None => debug!(session_id = %self.id, code = %code, "Unmapped key not recorded"),
        }
    }
}

fn resolve_stop_codes(
    settings: &RecordingSettings,
    catalog: &KeySymbolCatalog,
) -> Option<HashSet<HookCode>> {
    if settings.stop_keys.is_empty() {
        return None;
    }

    match catalog.hook_codes(&settings.stop_keys) {
        Ok(codes) => Some(codes),
        Err(e) => {
            warn!(error = %e, "Stop keys cannot be resolved, recording will only stop manually");
            None
        }
    }
}

/// Drop the trailing stop-key presses and releases.
///
/// Looks at the last `2 * |stop_codes|` events. When the presses among them
/// resolve to exactly `stop_codes`, those events are removed; otherwise the
/// sequence is returned untouched.
pub(crate) fn trim_stop_sequence(
    mut events: Vec<MacroEvent>,
    stop_codes: &HashSet<HookCode>,
    catalog: &KeySymbolCatalog,
) -> Vec<MacroEvent> {
    let tail_len = 2 * stop_codes.len();
    if stop_codes.is_empty() || events.len() < tail_len {
        return events;
    }

    let tail_start = events.len() - tail_len;
    let pressed_in_tail: Option<HashSet<HookCode>> = events[tail_start..]
        .iter()
        .filter_map(|event| match event {
            MacroEvent::Key {
                command: KeyCommand::Press,
                key,
            } => Some(catalog.hook_code(key).ok()),
            _ => None,
        })
        .collect();

    if pressed_in_tail.as_ref() == Some(stop_codes) {
        events.truncate(tail_start);
    }

    events
}
