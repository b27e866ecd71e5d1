use std::fmt;

use serde::{Deserialize, Serialize};

/// Human-readable key name such as `"CTRL"`, `"K"` or `"ESCAPE"`.
///
/// The spelling is kept exactly as written in the document. Lookups through
/// the key symbol catalog are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySymbol(String);

impl KeySymbol {
    /// Create a symbol from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form used for catalog lookups and set comparisons.
    pub fn normalized(&self) -> String {
        self.0.trim().to_ascii_uppercase()
    }
}

impl fmt::Display for KeySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeySymbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
