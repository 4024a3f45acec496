//! Content entries and structured identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier prefix for compendium-addressed content.
const COMPENDIUM_PREFIX: &str = "Compendium.";

/// One entry in a content library.
///
/// Entries are opaque beyond the fields needed for lookup and import: the
/// `system` payload is carried over verbatim when an entry is copied into
/// an output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Entry key within its library.
    #[serde(rename = "_id")]
    pub key: String,

    /// Display name, matched exactly during named lookup.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub system: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl ContentEntry {
    /// Sub-item grant descriptors nested under `system.items`.
    ///
    /// Descriptors missing a usable `uuid` or `level` are dropped, which
    /// matches the lookup-miss behavior downstream. Order follows the
    /// map's storage order.
    pub fn grants(&self) -> Vec<Grant> {
        let Some(items) = self.system.get("items").and_then(Value::as_object) else {
            return Vec::new();
        };

        items
            .values()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect()
    }
}

/// A granted sub-item reference: where to find it and the character level
/// at which it is granted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Grant {
    /// Structured identifier, e.g. `Compendium.pf2e.classfeatures.a3pSIKkDVTvvNSRO`.
    pub uuid: String,

    /// Only grants at level 1 or lower are auto-included on import.
    pub level: i64,
}

/// Parsed structured identifier: library namespace plus entry key.
///
/// The namespace is dotted (`pf2e.classfeatures`); the final segment is the
/// entry key within that library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub library: String,
    pub key: String,
}

impl EntryRef {
    /// Parse a structured identifier, returning `None` for anything that
    /// does not follow the compendium convention.
    pub fn parse(uuid: &str) -> Option<Self> {
        let rest = uuid.strip_prefix(COMPENDIUM_PREFIX)?;
        let (library, key) = rest.rsplit_once('.')?;
        if library.is_empty() || key.is_empty() {
            return None;
        }

        Some(Self {
            library: library.to_string(),
            key: key.to_string(),
        })
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{}", COMPENDIUM_PREFIX, self.library, self.key)
    }
}
