//! Boundary to the process-wide global input hook.
//!
//! The OS hook delivers events on a thread this crate does not own. Listeners
//! must return quickly: no playback and no file I/O inside `on_event`.

use crate::{CoreResult, catalog::HookCode};

use std::sync::Arc;

/// Which event families a subscriber wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HookInterest {
    /// Key press and release.
    pub keys: bool,
    /// Mouse button press and release.
    pub mouse_buttons: bool,
    /// Pointer motion.
    pub mouse_motion: bool,
}

impl HookInterest {
    /// Every event family.
    pub const ALL: HookInterest = HookInterest {
        keys: true,
        mouse_buttons: true,
        mouse_motion: true,
    };

    /// Whether `event` belongs to a family this interest covers.
    pub fn wants(&self, event: &HookEvent) -> bool {
        match event {
            HookEvent::KeyPressed(_) | HookEvent::KeyReleased(_) => self.keys,
            HookEvent::MousePressed(_) | HookEvent::MouseReleased(_) => self.mouse_buttons,
            HookEvent::MouseMoved { .. } => self.mouse_motion,
        }
    }
}

/// Physical mouse button reported by the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Any other button, by platform number.
    Other(u8),
}

/// Event delivered by the global hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// A key went down.
    KeyPressed(HookCode),
    /// A key came up.
    KeyReleased(HookCode),
    /// A mouse button went down.
    MousePressed(MouseButton),
    /// A mouse button came up.
    MouseReleased(MouseButton),
    /// The pointer moved to an absolute screen position.
    MouseMoved {
        /// Screen x coordinate.
        x: i32,
        /// Screen y coordinate.
        y: i32,
    },
}

/// Receiver of hook events. Called on the hook's delivery thread.
pub trait HookListener: Send + Sync {
    /// Handle one event. Must not block.
    fn on_event(&self, event: &HookEvent);
}

/// Handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Process-wide source of global input events supporting many subscribers.
///
/// Implementations must dispatch from a copy of the subscriber list, so a
/// listener can unsubscribe itself from inside `on_event`.
pub trait GlobalInputHook: Send + Sync {
    /// Start delivering events matching `interest` to `listener`.
    fn subscribe(
        &self,
        interest: HookInterest,
        listener: Arc<dyn HookListener>,
    ) -> CoreResult<SubscriptionId>;

    /// Stop delivering events to a subscription.
    fn unsubscribe(&self, id: SubscriptionId) -> CoreResult<()>;
}
