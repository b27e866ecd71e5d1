use crate::{
    CoreResult, MacroError,
    model::{MacroEvent, TriggerSpec},
};

use std::{fs, panic::Location, path::Path};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A recorded or hand-written macro: an ordered event list plus an optional
/// hotkey trigger.
///
/// Documents are snapshots. Playback works on a shared, immutable copy and
/// edits replace the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDocument {
    /// Hotkey that arms this macro, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerSpec>,
    /// Events in playback order.
    pub events: Vec<MacroEvent>,
}

impl MacroDocument {
    /// Document with the given events and no trigger.
    pub fn new(events: Vec<MacroEvent>) -> Self {
        Self {
            trigger: None,
            events,
        }
    }

    /// Parse a document from JSON text.
    #[track_caller]
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| MacroError::DocumentParse {
            path: None,
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Read and parse a document file.
    #[track_caller]
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;

        serde_json::from_str(&contents).map_err(|e| MacroError::DocumentParse {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Compact JSON form, as handed to remote clients.
    #[track_caller]
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| MacroError::DocumentParse {
            path: None,
            reason: format!("Failed to serialize document: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Indented JSON form, as written to the macro directory.
    #[track_caller]
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MacroError::DocumentParse {
            path: None,
            reason: format!("Failed to serialize document: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
