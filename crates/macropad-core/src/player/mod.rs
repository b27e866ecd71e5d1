mod options;
#[allow(clippy::module_inception)]
mod player;
pub(crate) mod typing;

pub use {
    options::{DEFAULT_ANIMATION_STEP_DELAY, DEFAULT_ANIMATION_STEPS, PlaybackOptions},
    player::MacroPlayer,
};
