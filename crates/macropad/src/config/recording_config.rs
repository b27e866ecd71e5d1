use crate::config::{default_recording_level, default_stop_keys};

use macropad_core::{KeySymbol, RecordingLevel, RecordingSettings};
use serde::{Deserialize, Serialize};

/// Recording granularity and stop keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// `keys_only`, `keys_and_mouse_buttons` or `keys_mouse_and_moves`.
    #[serde(default = "default_recording_level")]
    pub level: RecordingLevel,
    /// Record pointer motion as `ANIMATE_TO` instead of `SNAP_TO`.
    #[serde(default)]
    pub animate_mouse_moves: bool,
    /// Key combination that ends a recording.
    #[serde(default = "default_stop_keys")]
    pub stop_keys: Vec<String>,
}

impl RecordingConfig {
    /// Recorder settings for these options.
    pub fn settings(&self) -> RecordingSettings {
        RecordingSettings {
            level: self.level,
            animate_mouse_moves: self.animate_mouse_moves,
            stop_keys: self.stop_keys.iter().map(KeySymbol::new).collect(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            level: default_recording_level(),
            animate_mouse_moves: false,
            stop_keys: default_stop_keys(),
        }
    }
}
