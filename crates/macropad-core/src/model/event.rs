use crate::model::KeySymbol;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// One step of a macro document.
///
/// Serialized with an internal `"type"` tag so documents stay hand-editable:
///
/// ```json
/// {"type": "key", "command": "PRESS", "key": "A"}
/// {"type": "mouse", "command": "SNAP_TO", "x": 10, "y": 20}
/// {"type": "run_macro", "macro_name": "login"}
/// {"type": "set_auto_wait", "value": 25}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MacroEvent {
    /// Press or release a named key.
    Key {
        /// Press or release.
        command: KeyCommand,
        /// Name of the key, resolved through the catalog at playback time.
        key: KeySymbol,
    },
    /// Mouse button or pointer movement.
    Mouse(MouseAction),
    /// Play another macro from the macro directory to completion.
    RunMacro {
        /// File name (with or without `.json`) inside the macro directory.
        macro_name: String,
    },
    /// Change the delay applied after every subsequent injected command.
    SetAutoWait {
        /// Delay in milliseconds. Negative values in a document read as 0.
        #[serde(rename = "value", deserialize_with = "clamped_millis")]
        value_ms: u64,
    },
}

impl MacroEvent {
    /// Key press event for `key`.
    pub fn key_press(key: impl Into<KeySymbol>) -> Self {
        MacroEvent::Key {
            command: KeyCommand::Press,
            key: key.into(),
        }
    }

    /// Key release event for `key`.
    pub fn key_release(key: impl Into<KeySymbol>) -> Self {
        MacroEvent::Key {
            command: KeyCommand::Release,
            key: key.into(),
        }
    }
}

fn clamped_millis<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 0 {
        warn!(value, "Negative auto-wait clamped to 0");
    }

    Ok(u64::try_from(value).unwrap_or_default())
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyCommand {
    /// Key goes down.
    Press,
    /// Key comes up.
    Release,
}

/// Mouse command with its coordinates, when the command needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MouseRecord", into = "MouseRecord")]
pub enum MouseAction {
    /// Left button down.
    Press,
    /// Left button up.
    Release,
    /// Left button down then up.
    Click,
    /// Jump the pointer to a position.
    SnapTo {
        /// Absolute x coordinate.
        x: i32,
        /// Absolute y coordinate.
        y: i32,
    },
    /// Move the pointer while a button is held.
    Drag {
        /// Absolute x coordinate.
        x: i32,
        /// Absolute y coordinate.
        y: i32,
    },
    /// Glide the pointer to a position in visible steps.
    AnimateTo {
        /// Absolute x coordinate.
        x: i32,
        /// Absolute y coordinate.
        y: i32,
    },
}

/// Wire shape of a mouse event: the command plus optional coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct MouseRecord {
    command: MouseCommand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<i32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum MouseCommand {
    Press,
    Release,
    Click,
    SnapTo,
    Drag,
    AnimateTo,
}

impl TryFrom<MouseRecord> for MouseAction {
    type Error = String;

    fn try_from(record: MouseRecord) -> Result<Self, Self::Error> {
        let position = || match (record.x, record.y) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(format!(
                "mouse command {:?} requires both x and y",
                record.command
            )),
        };

        Ok(match record.command {
            MouseCommand::Press => MouseAction::Press,
            MouseCommand::Release => MouseAction::Release,
            MouseCommand::Click => MouseAction::Click,
            MouseCommand::SnapTo => {
                let (x, y) = position()?;
                MouseAction::SnapTo { x, y }
            }
            MouseCommand::Drag => {
                let (x, y) = position()?;
                MouseAction::Drag { x, y }
            }
            MouseCommand::AnimateTo => {
                let (x, y) = position()?;
                MouseAction::AnimateTo { x, y }
            }
        })
    }
}

impl From<MouseAction> for MouseRecord {
    fn from(action: MouseAction) -> Self {
        let (command, position) = match action {
            MouseAction::Press => (MouseCommand::Press, None),
            MouseAction::Release => (MouseCommand::Release, None),
            MouseAction::Click => (MouseCommand::Click, None),
            MouseAction::SnapTo { x, y } => (MouseCommand::SnapTo, Some((x, y))),
            MouseAction::Drag { x, y } => (MouseCommand::Drag, Some((x, y))),
            MouseAction::AnimateTo { x, y } => (MouseCommand::AnimateTo, Some((x, y))),
        };

        MouseRecord {
            command,
            x: position.map(|(x, _)| x),
            y: position.map(|(_, y)| y),
        }
    }
}
