//! Output documents assembled for the host record store.
//!
//! The document mirrors the host's character schema: plain profile fields,
//! nested ability/skill sub-structures, and an ordered item list. Item ids
//! are minted by the builder side and never copied from source entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::library::ContentEntry;

/// Default icon for lore skill items.
const LORE_ICON: &str = "systems/pf2e/icons/default-icons/lore.svg";

/// Builder-assigned item identifier.
///
/// A 16-character zero-padded decimal string, unique within one document
/// construction pass (not globally unique across passes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Get the raw string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id sequence for one construction pass.
#[derive(Debug, Default)]
pub struct ItemIdSeq {
    next: u64,
}

impl ItemIdSeq {
    /// Create a sequence starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next id.
    pub fn mint(&mut self) -> ItemId {
        let id = ItemId(format!("{:016}", self.next));
        self.next += 1;
        id
    }
}

/// One item in the output document's item list.
///
/// Explicit field set: items are constructed through [`OutputItem::from_entry`]
/// or [`OutputItem::lore`], never by structural copy of a source record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "_id")]
    pub id: ItemId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    /// Opaque system payload, carried over verbatim.
    pub system: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl OutputItem {
    /// Copy a content entry into an output item under a freshly minted id.
    pub fn from_entry(entry: &ContentEntry, id: ItemId) -> Self {
        Self {
            id,
            name: entry.name.clone(),
            kind: entry.kind.clone(),
            system: entry.system.clone(),
            img: entry.img.clone(),
        }
    }

    /// Lore skill item with the given proficient value.
    pub fn lore(name: &str, proficient: f64, id: ItemId) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: "lore".to_string(),
            system: serde_json::json!({ "proficient": { "value": proficient } }),
            img: Some(LORE_ICON.to_string()),
        }
    }
}

/// `{ "value": ... }` wrapper used throughout the record schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueOf<T> {
    pub value: T,
}

impl<T> ValueOf<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Skill entry in the record schema.
///
/// Rank is real-valued: odd proficiency inputs map to half ranks and must
/// not be truncated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRank {
    pub rank: f64,
}

/// Profile details sub-structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Details {
    pub age: ValueOf<Value>,
    pub gender: ValueOf<String>,
    pub alignment: ValueOf<String>,
}

/// Nested record data: details, abilities, skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemData {
    pub details: Details,
    pub abilities: BTreeMap<String, ValueOf<i64>>,
    pub skills: BTreeMap<String, SkillRank>,
}

/// Token placeholder carrying the character name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrototypeToken {
    pub name: String,
}

/// The character document handed to the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "prototypeToken")]
    pub prototype_token: PrototypeToken,

    pub system: SystemData,

    /// Resolved content items plus lore entries, in append order.
    pub items: Vec<OutputItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let mut ids = ItemIdSeq::new();
        assert_eq!(ids.mint().as_str(), "0000000000000000");
        assert_eq!(ids.mint().as_str(), "0000000000000001");
        assert_eq!(ids.mint().as_str(), "0000000000000002");
    }

    #[test]
    fn test_ids_unique_within_pass() {
        let mut ids = ItemIdSeq::new();
        let minted: Vec<ItemId> = (0..100).map(|_| ids.mint()).collect();
        for (i, a) in minted.iter().enumerate() {
            for b in &minted[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_from_entry_copies_fields_but_not_key() {
        let entry = ContentEntry {
            key: "a3pSIKkDVTvvNSRO".to_string(),
            name: "Fighter".to_string(),
            kind: "class".to_string(),
            system: serde_json::json!({"hp": 10}),
            img: Some("icons/classes/fighter.webp".to_string()),
        };

        let mut ids = ItemIdSeq::new();
        let item = OutputItem::from_entry(&entry, ids.mint());

        assert_eq!(item.name, "Fighter");
        assert_eq!(item.kind, "class");
        assert_eq!(item.system, serde_json::json!({"hp": 10}));
        assert_eq!(item.img.as_deref(), Some("icons/classes/fighter.webp"));
        // The id comes from the sequence, never from the entry key
        assert_eq!(item.id.as_str(), "0000000000000000");
    }

    #[test]
    fn test_lore_item_shape() {
        let mut ids = ItemIdSeq::new();
        let item = OutputItem::lore("Herbalism Lore", 1.0, ids.mint());

        assert_eq!(item.kind, "lore");
        assert_eq!(
            item.system,
            serde_json::json!({"proficient": {"value": 1.0}})
        );
        assert!(item.img.as_deref().unwrap().ends_with("lore.svg"));
    }

    #[test]
    fn test_item_serializes_with_underscore_id() {
        let mut ids = ItemIdSeq::new();
        let item = OutputItem::lore("Test Lore", 0.5, ids.mint());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["_id"], "0000000000000000");
        assert_eq!(json["type"], "lore");
        assert_eq!(json["system"]["proficient"]["value"], 0.5);
    }
}
