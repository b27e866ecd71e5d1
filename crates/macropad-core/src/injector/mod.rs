//! Boundary to the synthetic input service.

use crate::{CoreResult, catalog::InjectorCode};

use std::time::Duration;

/// Direction of an injected key or button command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Press down.
    Press,
    /// Release.
    Release,
}

/// Factory for injector sessions. Shared across playback threads.
pub trait InputInjector: Send + Sync {
    /// Open a session that serializes commands: each command settles before
    /// the next is issued, followed by the session's auto-delay.
    ///
    /// Failure here is a [`crate::MacroError::PlaybackFault`].
    fn open_session(&self) -> CoreResult<Box<dyn InjectorSession>>;
}

/// One playback's handle on the synthetic input service.
///
/// Sessions live on a single playback thread and need not be `Send`.
pub trait InjectorSession {
    /// Press or release a key.
    fn key(&mut self, code: InjectorCode, direction: Direction) -> CoreResult<()>;

    /// Press or release the left mouse button.
    fn mouse_button(&mut self, direction: Direction) -> CoreResult<()>;

    /// Move the pointer to an absolute screen position.
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()>;

    /// Current pointer position.
    fn pointer_position(&mut self) -> CoreResult<(i32, i32)>;

    /// Delay applied after every subsequent command.
    fn set_auto_delay(&mut self, delay: Duration);

    /// Sleep once, outside the auto-delay.
    fn pause(&mut self, delay: Duration);
}
