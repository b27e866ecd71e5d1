#[allow(clippy::module_inception)]
mod recorder;
pub(crate) mod session;
mod settings;

pub use {
    recorder::Recorder,
    session::RecordingComplete,
    settings::{RecordingLevel, RecordingSettings},
};
