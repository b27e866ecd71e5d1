use crate::{CoreResult, MacroError, atomic_write::write_atomic};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::debug;

/// Durable list of armed macro files: a JSON array of absolute paths,
/// rewritten in full on every change.
#[derive(Debug, Clone)]
pub struct ArmedMacroStore {
    path: PathBuf,
}

impl ArmedMacroStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted path list. A missing file is an empty list.
    #[track_caller]
    pub fn load(&self) -> CoreResult<Vec<PathBuf>> {
        if !self.path.exists() {
            debug!(path = ?self.path, "No armed macro list yet");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| MacroError::Persistence {
            reason: format!("Failed to read {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        serde_json::from_str(&contents).map_err(|e| MacroError::Persistence {
            reason: format!("Failed to parse {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Replace the persisted list with `paths`.
    #[track_caller]
    pub fn save(&self, paths: &[PathBuf]) -> CoreResult<()> {
        let contents = serde_json::to_string_pretty(paths).map_err(|e| MacroError::Persistence {
            reason: format!("Failed to serialize armed macro list: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        write_atomic(&self.path, &contents).map_err(|e| MacroError::Persistence {
            reason: format!("Failed to write {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(path = ?self.path, count = paths.len(), "Armed macro list saved");

        Ok(())
    }
}
