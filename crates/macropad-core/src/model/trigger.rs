use crate::model::KeySymbol;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The only trigger command the registry understands.
pub const ON_RELEASE: &str = "ON-RELEASE";

/// Hotkey combination that arms a macro for global activation.
///
/// Fires when one of `keys` is released while every other key of the set is
/// still held. `allowed_clients` restricts which remote callers may fetch the
/// macro; an empty list permits everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TriggerRecord", into = "TriggerRecord")]
pub struct TriggerSpec {
    keys: Vec<KeySymbol>,
    allowed_clients: Vec<String>,
}

impl TriggerSpec {
    /// Build an `ON-RELEASE` trigger.
    ///
    /// Duplicate key names (compared case-insensitively) are collapsed, first
    /// spelling wins. Fails when no keys remain.
    pub fn new<K, C>(keys: K, allowed_clients: C) -> Result<Self, String>
    where
        K: IntoIterator,
        K::Item: Into<KeySymbol>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let keys: Vec<KeySymbol> = keys
            .into_iter()
            .map(Into::into)
            .filter(|key: &KeySymbol| seen.insert(key.normalized()))
            .collect();

        if keys.is_empty() {
            return Err("trigger must name at least one key".to_string());
        }

        Ok(Self {
            keys,
            allowed_clients: allowed_clients.into_iter().map(Into::into).collect(),
        })
    }

    /// Keys of the combination, in document order.
    pub fn keys(&self) -> &[KeySymbol] {
        &self.keys
    }

    /// Remote clients allowed to fetch the macro. Empty means any.
    pub fn allowed_clients(&self) -> &[String] {
        &self.allowed_clients
    }

    /// Whether `client_id` may fetch the macro this trigger belongs to.
    pub fn permits(&self, client_id: &str) -> bool {
        self.allowed_clients.is_empty() || self.allowed_clients.iter().any(|c| c == client_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(KeySymbol),
    Many(Vec<KeySymbol>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<KeySymbol> {
        match self {
            OneOrMany::One(key) => vec![key],
            OneOrMany::Many(keys) => keys,
        }
    }
}

/// Wire shape: `{"command": "ON-RELEASE", "key"|"keys": ..., "allowed_clients"?: [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TriggerRecord {
    command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keys: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed_clients: Option<Vec<String>>,
}

impl TryFrom<TriggerRecord> for TriggerSpec {
    type Error = String;

    fn try_from(record: TriggerRecord) -> Result<Self, Self::Error> {
        if record.command != ON_RELEASE {
            return Err(format!(
                "unsupported trigger command '{}', expected '{ON_RELEASE}'",
                record.command
            ));
        }

        let keys = record
            .keys
            .or(record.key)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();

        TriggerSpec::new(keys, record.allowed_clients.unwrap_or_default())
    }
}

impl From<TriggerSpec> for TriggerRecord {
    fn from(spec: TriggerSpec) -> Self {
        TriggerRecord {
            command: ON_RELEASE.to_string(),
            key: None,
            keys: Some(OneOrMany::Many(spec.keys)),
            allowed_clients: (!spec.allowed_clients.is_empty()).then_some(spec.allowed_clients),
        }
    }
}
