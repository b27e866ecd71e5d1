use crate::config::{
    default_animation_step_delay_ms, default_animation_steps, default_baseline_delay_ms,
};

use std::time::Duration;

use macropad_core::PlaybackOptions;
use serde::{Deserialize, Serialize};

/// Playback timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Auto-delay every playback starts with, in milliseconds.
    #[serde(default = "default_baseline_delay_ms")]
    pub baseline_delay_ms: u64,
    /// Number of pointer steps for `ANIMATE_TO`.
    #[serde(default = "default_animation_steps")]
    pub animation_steps: u32,
    /// Pause between pointer steps, in milliseconds.
    #[serde(default = "default_animation_step_delay_ms")]
    pub animation_step_delay_ms: u64,
}

impl PlaybackConfig {
    /// Engine options for these settings.
    pub fn options(&self) -> PlaybackOptions {
        PlaybackOptions {
            baseline_delay: Duration::from_millis(self.baseline_delay_ms),
            animation_steps: self.animation_steps,
            animation_step_delay: Duration::from_millis(self.animation_step_delay_ms),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            baseline_delay_ms: default_baseline_delay_ms(),
            animation_steps: default_animation_steps(),
            animation_step_delay_ms: default_animation_step_delay_ms(),
        }
    }
}
