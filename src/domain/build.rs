//! Build records fetched from the Pathbuilder export service.
//!
//! A `Build` is the external JSON character record. It is immutable once
//! fetched; a single import operation owns the build it fetched.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The six ability score keys, in canonical order.
pub const ABILITY_SCORES: [&str; 6] = ["str", "dex", "con", "int", "wis", "cha"];

/// The seventeen skills, as (service name, record abbreviation) pairs.
pub const SKILLS: [(&str, &str); 17] = [
    ("acrobatics", "acr"),
    ("arcana", "arc"),
    ("athletics", "ath"),
    ("crafting", "cra"),
    ("deception", "dec"),
    ("diplomacy", "dip"),
    ("intimidation", "itm"),
    ("medicine", "med"),
    ("nature", "nat"),
    ("occultism", "occ"),
    ("perception", "per"),
    ("performance", "prf"),
    ("religion", "rel"),
    ("society", "soc"),
    ("stealth", "ste"),
    ("survival", "sur"),
    ("thievery", "thi"),
];

/// Six-digit build identifier issued by the export service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildId(String);

impl BuildId {
    /// Get the raw digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected build identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("build id must be exactly six digits, got {0:?}")]
pub struct InvalidBuildId(pub String);

impl FromStr for BuildId {
    type Err = InvalidBuildId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_build_id(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidBuildId(s.to_string()))
        }
    }
}

/// True iff `s` is exactly six ASCII decimal digits.
///
/// No trimming: leading or trailing whitespace fails validation.
pub fn is_valid_build_id(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Ability scores keyed by the six canonical abilities.
///
/// All six keys are required; a build document missing one fails to
/// deserialize, which surfaces as a fetch error before mapping starts.
#[derive(Debug, Clone, Deserialize)]
pub struct Abilities {
    #[serde(rename = "str")]
    pub strength: i64,
    #[serde(rename = "dex")]
    pub dexterity: i64,
    #[serde(rename = "con")]
    pub constitution: i64,
    #[serde(rename = "int")]
    pub intelligence: i64,
    #[serde(rename = "wis")]
    pub wisdom: i64,
    #[serde(rename = "cha")]
    pub charisma: i64,
}

impl Abilities {
    /// Scores in canonical key order.
    pub fn scores(&self) -> [(&'static str, i64); 6] {
        [
            ("str", self.strength),
            ("dex", self.dexterity),
            ("con", self.constitution),
            ("int", self.intelligence),
            ("wis", self.wisdom),
            ("cha", self.charisma),
        ]
    }
}

/// Skill proficiency values, stored at twice the display rank.
///
/// All seventeen keys are required, same policy as [`Abilities`]. Values
/// are normally even, but odd values are accepted and map to half ranks.
#[derive(Debug, Clone, Deserialize)]
pub struct Proficiencies {
    pub acrobatics: i64,
    pub arcana: i64,
    pub athletics: i64,
    pub crafting: i64,
    pub deception: i64,
    pub diplomacy: i64,
    pub intimidation: i64,
    pub medicine: i64,
    pub nature: i64,
    pub occultism: i64,
    pub perception: i64,
    pub performance: i64,
    pub religion: i64,
    pub society: i64,
    pub stealth: i64,
    pub survival: i64,
    pub thievery: i64,
}

impl Proficiencies {
    /// Proficiency values keyed by record abbreviation, in table order.
    pub fn by_abbreviation(&self) -> [(&'static str, i64); 17] {
        [
            ("acr", self.acrobatics),
            ("arc", self.arcana),
            ("ath", self.athletics),
            ("cra", self.crafting),
            ("dec", self.deception),
            ("dip", self.diplomacy),
            ("itm", self.intimidation),
            ("med", self.medicine),
            ("nat", self.nature),
            ("occ", self.occultism),
            ("per", self.perception),
            ("prf", self.performance),
            ("rel", self.religion),
            ("soc", self.society),
            ("ste", self.stealth),
            ("sur", self.survival),
            ("thi", self.thievery),
        ]
    }
}

/// A character build as exported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    pub name: String,

    /// Passed through opaquely; the service emits both strings and numbers.
    #[serde(default)]
    pub age: Value,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub alignment: String,

    pub abilities: Abilities,

    pub proficiencies: Proficiencies,

    /// Lore skills as (name, proficiency) pairs, in export order.
    #[serde(default)]
    pub lores: Vec<(String, i64)>,

    /// Named content references. An unresolvable name contributes nothing
    /// to the import, so these default to empty rather than failing.
    #[serde(default)]
    pub ancestry: String,

    #[serde(default)]
    pub background: String,

    #[serde(rename = "class", default)]
    pub class_name: String,

    #[serde(default)]
    pub heritage: String,

    #[serde(default)]
    pub deity: Option<String>,
}

impl Build {
    /// Deity reference, treating the service's empty string as absent.
    pub fn deity(&self) -> Option<&str> {
        self.deity.as_deref().filter(|d| !d.is_empty())
    }
}
