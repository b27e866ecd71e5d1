#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod macros_config;
mod playback_config;
mod recording_config;

pub(crate) use {
    config::Config, logging_config::LoggingConfig, macros_config::MacrosConfig,
    playback_config::PlaybackConfig, recording_config::RecordingConfig,
};

use macropad_core::{DEFAULT_ANIMATION_STEP_DELAY, DEFAULT_ANIMATION_STEPS, RecordingLevel};

pub(crate) const DEFAULT_BASELINE_DELAY_MS: u64 = 0;
pub(crate) const DEFAULT_LOG_FILTER: &str = "macropad=info,macropad_core=info";
pub(crate) const DEFAULT_STOP_KEY: &str = "ESCAPE";

pub(crate) const QUALIFIER: &str = "com";
pub(crate) const ORGANIZATION: &str = "macropad";
pub(crate) const APPLICATION: &str = "Macropad";

pub(crate) fn default_baseline_delay_ms() -> u64 {
    DEFAULT_BASELINE_DELAY_MS
}

pub(crate) fn default_animation_steps() -> u32 {
    DEFAULT_ANIMATION_STEPS
}

pub(crate) fn default_animation_step_delay_ms() -> u64 {
    u64::try_from(DEFAULT_ANIMATION_STEP_DELAY.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn default_recording_level() -> RecordingLevel {
    RecordingLevel::default()
}

pub(crate) fn default_stop_keys() -> Vec<String> {
    vec![DEFAULT_STOP_KEY.to_string()]
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
