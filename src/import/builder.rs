//! Build-to-document mapping.
//!
//! `map_build` is the pure part: profile fields, ability scores, skill
//! ranks. `DocumentBuilder` layers the content resolution on top: the
//! ancestry/background/class/heritage/deity references and lore items.

use std::collections::BTreeMap;

use crate::domain::build::Build;
use crate::domain::document::{
    Details, ItemIdSeq, OutputDocument, OutputItem, PrototypeToken, SkillRank, SystemData, ValueOf,
};
use crate::library::ContentSource;

use super::resolver::ContentResolver;

/// Library namespaces holding the top-level build references.
const ANCESTRIES: &str = "pf2e.ancestries";
const BACKGROUNDS: &str = "pf2e.backgrounds";
const CLASSES: &str = "pf2e.classes";
const HERITAGES: &str = "pf2e.heritages";
const DEITIES: &str = "pf2e.deities";

/// Map the flat build fields into a document skeleton with no items.
///
/// Skill rank is half the stored proficiency, as a real value: valid
/// inputs are even, but odd values map to halves rather than silently
/// truncating.
pub fn map_build(build: &Build) -> OutputDocument {
    let abilities: BTreeMap<String, ValueOf<i64>> = build
        .abilities
        .scores()
        .into_iter()
        .map(|(key, score)| (key.to_string(), ValueOf::new(score)))
        .collect();

    let skills: BTreeMap<String, SkillRank> = build
        .proficiencies
        .by_abbreviation()
        .into_iter()
        .map(|(abbr, proficiency)| {
            (
                abbr.to_string(),
                SkillRank {
                    rank: proficiency as f64 / 2.0,
                },
            )
        })
        .collect();

    OutputDocument {
        name: build.name.clone(),
        kind: "character".to_string(),
        prototype_token: PrototypeToken {
            name: build.name.clone(),
        },
        system: SystemData {
            details: Details {
                age: ValueOf::new(build.age.clone()),
                gender: ValueOf::new(build.gender.clone()),
                alignment: ValueOf::new(build.alignment.clone()),
            },
            abilities,
            skills,
        },
        items: Vec::new(),
    }
}

/// Assembles one output document from one build.
///
/// Holds the per-pass id sequence and a fresh resolver; consumed by
/// `build_document`, so ids can never leak between passes.
pub struct DocumentBuilder<'a, S: ContentSource> {
    resolver: ContentResolver<'a, S>,
    ids: ItemIdSeq,
}

impl<'a, S: ContentSource> DocumentBuilder<'a, S> {
    /// Create a builder with a fresh resolver cache and id sequence.
    pub fn new(source: &'a S) -> Self {
        Self {
            resolver: ContentResolver::new(source),
            ids: ItemIdSeq::new(),
        }
    }

    /// Map the build and resolve its content references.
    pub async fn build_document(mut self, build: &Build) -> OutputDocument {
        let mut doc = map_build(build);

        for (library, name) in [
            (ANCESTRIES, build.ancestry.as_str()),
            (BACKGROUNDS, build.background.as_str()),
            (CLASSES, build.class_name.as_str()),
            (HERITAGES, build.heritage.as_str()),
        ] {
            self.append_reference(&mut doc, library, name).await;
        }

        if let Some(deity) = build.deity() {
            self.append_reference(&mut doc, DEITIES, deity).await;
        }

        for (name, proficiency) in &build.lores {
            let proficient = *proficiency as f64 / 2.0;
            doc.items
                .push(OutputItem::lore(name, proficient, self.ids.mint()));
        }

        doc
    }

    /// Resolve one named reference and append its expansion. A miss
    /// contributes nothing.
    async fn append_reference(&mut self, doc: &mut OutputDocument, library: &str, name: &str) {
        if let Some(entry) = self.resolver.resolve_named(library, name).await {
            let items = self.resolver.expand(&entry, &mut self.ids).await;
            doc.items.extend(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build::{Abilities, Proficiencies};

    fn flat_proficiencies(value: i64) -> Proficiencies {
        Proficiencies {
            acrobatics: value,
            arcana: value,
            athletics: value,
            crafting: value,
            deception: value,
            diplomacy: value,
            intimidation: value,
            medicine: value,
            nature: value,
            occultism: value,
            perception: value,
            performance: value,
            religion: value,
            society: value,
            stealth: value,
            survival: value,
            thievery: value,
        }
    }

    fn sample_build() -> Build {
        Build {
            name: "Test".to_string(),
            age: serde_json::json!("25"),
            gender: "Female".to_string(),
            alignment: "CG".to_string(),
            abilities: Abilities {
                strength: 10,
                dexterity: 12,
                constitution: 14,
                intelligence: 10,
                wisdom: 12,
                charisma: 8,
            },
            proficiencies: flat_proficiencies(0),
            lores: vec![("Herbalism Lore".to_string(), 2)],
            ancestry: "Human".to_string(),
            background: "Farmhand".to_string(),
            class_name: "Fighter".to_string(),
            heritage: "Versatile Human".to_string(),
            deity: None,
        }
    }

    #[test]
    fn test_map_build_profile_fields() {
        let doc = map_build(&sample_build());

        assert_eq!(doc.name, "Test");
        assert_eq!(doc.kind, "character");
        assert_eq!(doc.prototype_token.name, "Test");
        assert_eq!(doc.system.details.age.value, serde_json::json!("25"));
        assert_eq!(doc.system.details.gender.value, "Female");
        assert_eq!(doc.system.details.alignment.value, "CG");
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_map_build_exact_key_sets() {
        let doc = map_build(&sample_build());

        let ability_keys: Vec<&str> = doc.system.abilities.keys().map(String::as_str).collect();
        let mut expected_abilities = vec!["str", "dex", "con", "int", "wis", "cha"];
        expected_abilities.sort_unstable();
        assert_eq!(ability_keys, expected_abilities);

        assert_eq!(doc.system.skills.len(), 17);
        let mut expected_skills = vec![
            "acr", "arc", "ath", "cra", "dec", "dip", "itm", "med", "nat", "occ", "per", "prf",
            "rel", "soc", "ste", "sur", "thi",
        ];
        expected_skills.sort_unstable();
        let skill_keys: Vec<&str> = doc.system.skills.keys().map(String::as_str).collect();
        assert_eq!(skill_keys, expected_skills);
    }

    #[test]
    fn test_rank_is_half_the_proficiency() {
        let mut build = sample_build();
        build.proficiencies.acrobatics = 2;
        build.proficiencies.arcana = 0;
        build.proficiencies.athletics = 6;

        let doc = map_build(&build);
        assert_eq!(doc.system.skills["acr"].rank, 1.0);
        assert_eq!(doc.system.skills["arc"].rank, 0.0);
        assert_eq!(doc.system.skills["ath"].rank, 3.0);
    }

    #[test]
    fn test_odd_proficiency_is_not_truncated() {
        let mut build = sample_build();
        build.proficiencies.stealth = 7;

        let doc = map_build(&build);
        assert_eq!(doc.system.skills["ste"].rank, 3.5);
    }

    #[test]
    fn test_ability_scores_mapped_by_key() {
        let doc = map_build(&sample_build());
        assert_eq!(doc.system.abilities["con"].value, 14);
        assert_eq!(doc.system.abilities["cha"].value, 8);
    }
}
