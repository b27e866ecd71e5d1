use crate::config::{APPLICATION, ORGANIZATION, QUALIFIER};

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const MACRO_DIRECTORY: &str = "Macros";
const ARMED_LIST_FILE: &str = "active_macros.json";

/// Where macro documents and the armed list live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacrosConfig {
    /// Directory holding `<name>.json` macro documents.
    pub directory: PathBuf,
    /// File persisting the paths of armed macros.
    pub armed_list: PathBuf,
}

impl MacrosConfig {
    /// Default layout under the given config and data directories.
    pub fn under(config_dir: &Path, data_dir: &Path) -> Self {
        Self {
            directory: data_dir.join(MACRO_DIRECTORY),
            armed_list: config_dir.join(ARMED_LIST_FILE),
        }
    }
}

impl Default for MacrosConfig {
    fn default() -> Self {
        match ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
            Some(dirs) => Self::under(dirs.config_dir(), dirs.data_dir()),
            None => Self::under(Path::new("."), Path::new(".")),
        }
    }
}
