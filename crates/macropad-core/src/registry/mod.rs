mod armed_store;
#[allow(clippy::module_inception)]
mod registry;
mod scheduler;

pub use {
    armed_store::ArmedMacroStore,
    registry::{PressedKeySnapshot, TriggerRegistry},
    scheduler::{PlaybackRequest, PlaybackScheduler, TaskScheduler},
};

#[cfg(test)]
pub(crate) use registry::trigger_fires;
