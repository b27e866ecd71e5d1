//! Synthetic input through `enigo`.

use macropad_core::{
    CoreResult, Direction, InjectorCode, InjectorSession, InputInjector, MacroError,
};

use std::{panic::Location, thread, time::Duration};

use enigo::{Button, Coordinate, Enigo, Key, Keyboard, Mouse, Settings};
use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

/// Injector opening one `Enigo` connection per playback.
#[derive(Debug, Default)]
pub struct EnigoInjector;

impl EnigoInjector {
    /// Create the injector. The OS connection is opened per session.
    pub fn new() -> Self {
        Self
    }
}

impl InputInjector for EnigoInjector {
    #[track_caller]
    #[instrument(skip(self))]
    fn open_session(&self) -> CoreResult<Box<dyn InjectorSession>> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| MacroError::PlaybackFault {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!("Injector session opened");

        Ok(Box::new(EnigoSession {
            enigo,
            auto_delay: Duration::ZERO,
        }))
    }
}

/// One playback's injector connection. Sleeps the auto-delay after every
/// command so the target application settles before the next one.
struct EnigoSession {
    enigo: Enigo,
    auto_delay: Duration,
}

impl EnigoSession {
    fn settle(&self) {
        if !self.auto_delay.is_zero() {
            thread::sleep(self.auto_delay);
        }
    }
}

impl InjectorSession for EnigoSession {
    #[track_caller]
    fn key(&mut self, code: InjectorCode, direction: Direction) -> CoreResult<()> {
        let Some(key) = enigo_key(code) else {
            warn!(code = %code, "No injectable key for code, skipping");
            return Ok(());
        };

        self.enigo
            .key(key, enigo_direction(direction))
            .map_err(|e| MacroError::PlaybackFault {
                reason: format!("Failed to inject key {}: {}", code, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.settle();
        Ok(())
    }

    #[track_caller]
    fn mouse_button(&mut self, direction: Direction) -> CoreResult<()> {
        self.enigo
            .button(Button::Left, enigo_direction(direction))
            .map_err(|e| MacroError::PlaybackFault {
                reason: format!("Failed to inject mouse button: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.settle();
        Ok(())
    }

    #[track_caller]
    fn move_to(&mut self, x: i32, y: i32) -> CoreResult<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| MacroError::PlaybackFault {
                reason: format!("Failed to move pointer to ({}, {}): {}", x, y, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.settle();
        Ok(())
    }

    #[track_caller]
    fn pointer_position(&mut self) -> CoreResult<(i32, i32)> {
        self.enigo.location().map_err(|e| MacroError::PlaybackFault {
            reason: format!("Failed to read pointer position: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn set_auto_delay(&mut self, delay: Duration) {
        self.auto_delay = delay;
    }

    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

fn enigo_direction(direction: Direction) -> enigo::Direction {
    match direction {
        Direction::Press => enigo::Direction::Press,
        Direction::Release => enigo::Direction::Release,
    }
}

/// `enigo` key for a virtual-key code.
///
/// Letters, digits and punctuation are sent as characters so the active
/// layout decides the physical key. Right-hand modifiers keep their side
/// only where raw virtual-key codes are accepted.
pub(crate) fn enigo_key(code: InjectorCode) -> Option<Key> {
    let vk = code.raw();

    let key = match vk {
        0x30..=0x39 => return char::from_u32(u32::from(vk)).map(Key::Unicode),
        0x41..=0x5A => return char::from_u32(u32::from(vk) + 0x20).map(Key::Unicode),
        0x08 => Key::Backspace,
        0x09 => Key::Tab,
        0x0D => Key::Return,
        0x10 => Key::Shift,
        0x11 => Key::Control,
        0x12 => Key::Alt,
        0x14 => Key::CapsLock,
        0x1B => Key::Escape,
        0x20 => Key::Space,
        0x21 => Key::PageUp,
        0x22 => Key::PageDown,
        0x23 => Key::End,
        0x24 => Key::Home,
        0x25 => Key::LeftArrow,
        0x26 => Key::UpArrow,
        0x27 => Key::RightArrow,
        0x28 => Key::DownArrow,
        0x2E => Key::Delete,
        0x5B => Key::Meta,
        0x70 => Key::F1,
        0x71 => Key::F2,
        0x72 => Key::F3,
        0x73 => Key::F4,
        0x74 => Key::F5,
        0x75 => Key::F6,
        0x76 => Key::F7,
        0x77 => Key::F8,
        0x78 => Key::F9,
        0x79 => Key::F10,
        0x7A => Key::F11,
        0x7B => Key::F12,
        0xA1 => sided(vk, Key::Shift),
        0xA3 => sided(vk, Key::Control),
        0xA5 => sided(vk, Key::Alt),
        0x5C => sided(vk, Key::Meta),
        0xBA => Key::Unicode(';'),
        0xBB => Key::Unicode('='),
        0xBC => Key::Unicode(','),
        0xBD => Key::Unicode('-'),
        0xBE => Key::Unicode('.'),
        0xBF => Key::Unicode('/'),
        0xC0 => Key::Unicode('`'),
        0xDB => Key::Unicode('['),
        0xDC => Key::Unicode('\\'),
        0xDD => Key::Unicode(']'),
        0xDE => Key::Unicode('\''),
        other => return raw_key(other),
    };

    Some(key)
}

#[cfg(target_os = "windows")]
fn sided(vk: u16, _generic: Key) -> Key {
    Key::Other(u32::from(vk))
}

#[cfg(not(target_os = "windows"))]
fn sided(_vk: u16, generic: Key) -> Key {
    generic
}

#[cfg(target_os = "windows")]
fn raw_key(vk: u16) -> Option<Key> {
    Some(Key::Other(u32::from(vk)))
}

#[cfg(not(target_os = "windows"))]
fn raw_key(_vk: u16) -> Option<Key> {
    None
}
