use std::time::Duration;

/// Default number of intermediate pointer positions for `ANIMATE_TO`.
pub const DEFAULT_ANIMATION_STEPS: u32 = 50;

/// Default pause between animation steps.
pub const DEFAULT_ANIMATION_STEP_DELAY: Duration = Duration::from_millis(10);

/// Timing knobs for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Auto-delay every playback session starts with.
    pub baseline_delay: Duration,
    /// Steps used to glide the pointer for `ANIMATE_TO`.
    pub animation_steps: u32,
    /// Pause between glide steps.
    pub animation_step_delay: Duration,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            baseline_delay: Duration::ZERO,
            animation_steps: DEFAULT_ANIMATION_STEPS,
            animation_step_delay: DEFAULT_ANIMATION_STEP_DELAY,
        }
    }
}
