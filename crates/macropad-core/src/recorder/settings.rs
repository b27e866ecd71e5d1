use crate::{hook::HookInterest, model::KeySymbol};

use serde::{Deserialize, Serialize};

/// How much input a recording captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordingLevel {
    /// Key presses and releases only.
    #[default]
    KeysOnly,
    /// Keys plus mouse button presses and releases.
    KeysAndMouseButtons,
    /// Keys, mouse buttons and pointer motion.
    KeysMouseAndMoves,
}

impl RecordingLevel {
    /// Hook event families this level subscribes to.
    pub fn interest(self) -> HookInterest {
        HookInterest {
            keys: true,
            mouse_buttons: self != RecordingLevel::KeysOnly,
            mouse_motion: self == RecordingLevel::KeysMouseAndMoves,
        }
    }
}

/// Options for one recording session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordingSettings {
    /// Granularity of captured input.
    #[serde(default)]
    pub level: RecordingLevel,
    /// Record pointer motion as `ANIMATE_TO` instead of `SNAP_TO`.
    #[serde(default)]
    pub animate_mouse_moves: bool,
    /// Key combination that ends the recording. Empty disables stop keys.
    #[serde(default)]
    pub stop_keys: Vec<KeySymbol>,
}
