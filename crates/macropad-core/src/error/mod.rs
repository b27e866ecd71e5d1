use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use thiserror::Error;

/// Macro engine errors with source location tracking.
///
/// Only [`MacroError::PlaybackFault`] is allowed to abort a running playback.
/// Every other variant is absorbed and logged by the component that raised it.
#[derive(Error, Debug)]
pub enum MacroError {
    /// Subscribing to or unsubscribing from the global input hook failed.
    #[error("Input hook failure: {reason} {location}")]
    HookFailure {
        /// Description of the hook failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A macro document is malformed or missing required fields.
    #[error("Failed to parse macro document {path:?}: {reason} {location}")]
    DocumentParse {
        /// File the document was read from, if any.
        path: Option<PathBuf>,
        /// Parser message.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A key name has no mapping in the key symbol catalog.
    #[error("Unknown key symbol '{symbol}' {location}")]
    SymbolResolution {
        /// The key name that failed to resolve.
        symbol: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A `run_macro` chain revisited a macro already on the call stack.
    #[error("Macro '{macro_name}' is already on the call stack {location}")]
    CycleDetected {
        /// Name of the macro that would have recursed.
        macro_name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Reading or writing the armed-macro list failed.
    #[error("Armed macro persistence failed: {reason} {location}")]
    Persistence {
        /// Description of the persistence failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The synthetic input service is unavailable.
    #[error("Playback fault: {reason} {location}")]
    PlaybackFault {
        /// Description of the injector failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A recording session is already active on this recorder.
    #[error("A recording session is already active {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for MacroError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        MacroError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`MacroError`].
pub type Result<T> = std::result::Result<T, MacroError>;
