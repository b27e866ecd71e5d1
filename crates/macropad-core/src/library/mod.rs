//! Macro directory access: name resolution, loading, saving and listing.

use crate::{CoreResult, atomic_write::write_atomic, model::MacroDocument};

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

const EXTENSION: &str = "json";

/// The directory holding macro document files.
#[derive(Debug, Clone)]
pub struct MacroLibrary {
    directory: PathBuf,
}

impl MacroLibrary {
    /// Library rooted at `directory`. The directory is created lazily on save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Root directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File backing the macro called `name`.
    ///
    /// `"login"` and `"login.json"` name the same file.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let has_extension = Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));

        if has_extension {
            self.directory.join(name)
        } else {
            self.directory.join(format!("{name}.{EXTENSION}"))
        }
    }

    /// `name` without a trailing `.json`, so both spellings compare equal.
    pub fn canonical_name(name: &str) -> &str {
        let path = Path::new(name);
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));

        if has_extension {
            &name[..name.len() - EXTENSION.len() - 1]
        } else {
            name
        }
    }

    /// Macro name for a file path (its stem).
    pub fn name_of(path: &Path) -> Option<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    /// Whether a file exists for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Read and parse the macro called `name`.
    #[track_caller]
    pub fn load(&self, name: &str) -> CoreResult<MacroDocument> {
        MacroDocument::from_path(&self.path_for(name))
    }

    /// Write `document` as pretty JSON and return the file path.
    #[track_caller]
    #[instrument(skip(self, document))]
    pub fn save(&self, name: &str, document: &MacroDocument) -> CoreResult<PathBuf> {
        let path = self.path_for(name);
        let contents = document.to_json_pretty()?;

        write_atomic(&path, &contents)?;

        info!(path = ?path, events = document.events.len(), "Macro saved");

        Ok(path)
    }

    /// Names of every `.json` file in the directory, sorted.
    ///
    /// A missing directory is an empty library.
    #[track_caller]
    pub fn list(&self) -> CoreResult<Vec<String>> {
        if !self.directory.exists() {
            debug!(directory = ?self.directory, "Macro directory does not exist yet");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            let is_macro = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));

            if is_macro && let Some(name) = Self::name_of(&path) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
