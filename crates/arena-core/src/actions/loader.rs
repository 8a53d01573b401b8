//! Definition Loading
//!
//! Reads item and action definitions from a JSON file and validates them into
//! [`ActionPools`] and an [`ItemCatalog`]. Any malformed record fails the whole
//! load, so a round never starts with an invalid pool.
//!
//! File layout:
//!
//! ```json
//! {
//!   "items": [{"name": "Knife", "category": "weapon", "stats": {"combat_power": 10}}],
//!   "day": [{"name": "...", "description": "{0} ...", "usually_lethal": false, "num_affected": 1}],
//!   "night": [],
//!   "the_feast": []
//! }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use arena_events::Phase;

use crate::components::{Item, ItemCatalog, Stat};

use super::definition::{Action, ActionPools, RelationChange, SlotRequirement};
use super::slot::Slot;

/// Errors raised while loading definition files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed definitions: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate item definition '{0}'")]
    DuplicateItem(String),
    #[error("invalid action '{action}' in pool '{pool}': {source}")]
    InvalidAction {
        pool: Phase,
        action: String,
        #[source]
        source: ActionError,
    },
}

/// Reasons a single action record is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("num_affected must be at least 1")]
    NoSlots,
    #[error("{field} refers to slot {slot} but the action only affects {num_affected}")]
    SlotOutOfRange {
        field: &'static str,
        slot: Slot,
        num_affected: usize,
    },
    #[error("bonus item '{0}' is not defined in the item list")]
    UnknownItem(String),
    #[error("requirement on {stat} for slot {slot} can never be met")]
    UnsatisfiableBound { slot: Slot, stat: Stat },
    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(f32),
}

fn default_weight() -> f32 {
    1.0
}

/// One action as written in the definition file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionRecord {
    pub name: String,
    pub description: String,
    pub usually_lethal: bool,
    pub num_affected: usize,
    #[serde(default)]
    pub num_killers: usize,
    #[serde(default)]
    pub num_killed: usize,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub requirements: BTreeMap<Slot, SlotRequirement>,
    #[serde(default)]
    pub stats_changes: BTreeMap<Slot, BTreeMap<Stat, i32>>,
    #[serde(default)]
    pub bonus_items: BTreeMap<Slot, Vec<String>>,
    #[serde(default)]
    pub removed_items: BTreeMap<Slot, Vec<String>>,
    #[serde(default)]
    pub relation_changes: BTreeMap<Slot, Vec<RelationChange>>,
    #[serde(default)]
    pub killers: BTreeSet<Slot>,
}

/// Top-level structure of a definition file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionFile {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub day: Vec<ActionRecord>,
    #[serde(default)]
    pub night: Vec<ActionRecord>,
    #[serde(default)]
    pub the_feast: Vec<ActionRecord>,
}

/// Validated definitions, ready to be inserted as resources
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    pub items: ItemCatalog,
    pub pools: ActionPools,
}

impl ActionRecord {
    /// Validate the record and resolve its bonus items against the catalog
    pub fn into_action(self, catalog: &ItemCatalog) -> Result<Action, ActionError> {
        if self.num_affected == 0 {
            return Err(ActionError::NoSlots);
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ActionError::InvalidWeight(self.weight));
        }

        let mut bonus_items = BTreeMap::new();
        for (slot, names) in self.bonus_items {
            let items = names
                .into_iter()
                .map(|name| catalog.get(&name).cloned().ok_or(ActionError::UnknownItem(name)))
                .collect::<Result<Vec<_>, _>>()?;
            bonus_items.insert(slot, items);
        }

        let action = Action {
            name: self.name,
            description: self.description,
            usually_lethal: self.usually_lethal,
            num_affected: self.num_affected,
            num_killers: self.num_killers,
            num_killed: self.num_killed,
            weight: self.weight,
            requirements: self.requirements,
            stats_changes: self.stats_changes,
            bonus_items,
            removed_items: self.removed_items,
            relation_changes: self.relation_changes,
            killers: self.killers,
        };
        validate_action(&action)?;
        Ok(action)
    }
}

/// Check slot keys and requirement bounds of an action
pub fn validate_action(action: &Action) -> Result<(), ActionError> {
    if action.num_affected == 0 {
        return Err(ActionError::NoSlots);
    }

    for (field, slot) in action.referenced_slots() {
        if !slot.fits(action.num_affected) {
            return Err(ActionError::SlotOutOfRange {
                field,
                slot,
                num_affected: action.num_affected,
            });
        }
    }

    for (slot, requirement) in &action.requirements {
        for (stat, bound) in &requirement.stats {
            if !bound.is_satisfiable() {
                return Err(ActionError::UnsatisfiableBound {
                    slot: *slot,
                    stat: *stat,
                });
            }
        }
        for target in requirement.relations.keys() {
            if !target.fits(action.num_affected) {
                tracing::warn!(
                    "Action '{}' slot {} requires a relation to slot {}, which does not exist; the check will be skipped",
                    action.name, slot, target
                );
            }
        }
    }

    for (slot, changes) in &action.relation_changes {
        for change in changes {
            if !change.target.fits(action.num_affected) {
                tracing::warn!(
                    "Action '{}' slot {} changes its relation to slot {}, which does not exist; the change will be skipped",
                    action.name, slot, change.target
                );
            }
        }
    }

    if action.usually_lethal && action.killers.is_empty() && action.num_killers > 0 {
        tracing::warn!(
            "Action '{}' expects {} killers but names no killer slots; loot from its victims will be discarded",
            action.name, action.num_killers
        );
    }

    Ok(())
}

impl DefinitionFile {
    /// Validate every record, failing on the first bad one
    pub fn into_definitions(self) -> Result<Definitions, LoadError> {
        let mut items = ItemCatalog::new();
        let mut seen = HashSet::new();
        for item in self.items {
            if !seen.insert(item.name.clone()) {
                return Err(LoadError::DuplicateItem(item.name));
            }
            items.register(item);
        }

        let mut pools = ActionPools::new();
        for (phase, records) in [
            (Phase::Day, self.day),
            (Phase::Night, self.night),
            (Phase::TheFeast, self.the_feast),
        ] {
            let pool = pools.pool_mut(phase);
            for record in records {
                let name = record.name.clone();
                let action = record
                    .into_action(&items)
                    .map_err(|source| LoadError::InvalidAction {
                        pool: phase,
                        action: name,
                        source,
                    })?;
                pool.push(action);
            }
        }

        Ok(Definitions { items, pools })
    }
}

/// Parse and validate definitions from a JSON string
pub fn parse_definitions(content: &str) -> Result<Definitions, LoadError> {
    let file: DefinitionFile = serde_json::from_str(content)?;
    file.into_definitions()
}

/// Load and validate definitions from a JSON file
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Definitions, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let definitions = parse_definitions(&content)?;
    tracing::info!(
        "Loaded {} items and {} actions from {}",
        definitions.items.len(),
        definitions.pools.total(),
        path.display()
    );
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::definition::StatBound;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "items": [
            {"name": "Knife", "category": "weapon", "stats": {"combat_power": 10}},
            {"name": "Rope"}
        ],
        "day": [
            {
                "name": "find_knife",
                "description": "{0} finds a knife.",
                "usually_lethal": false,
                "num_affected": 1,
                "bonus_items": {"0": ["Knife"]}
            },
            {
                "name": "stab",
                "description": "{0} stabs {1}.",
                "usually_lethal": true,
                "num_affected": 2,
                "num_killers": 1,
                "num_killed": 1,
                "requirements": {"0": {"items": ["Knife"], "stats": {"combat_power": {"min": 60}}}},
                "stats_changes": {"1": {"health": -100}},
                "relation_changes": {"1": [{"target": 0, "relation": "enemy"}]},
                "killers": [0]
            }
        ],
        "night": [
            {"name": "sleep", "description": "{0} sleeps.", "usually_lethal": false, "num_affected": 1}
        ]
    }"#;

    #[test]
    fn test_parse_sample_definitions() {
        let defs = parse_definitions(SAMPLE).unwrap();
        assert_eq!(defs.items.len(), 2);
        assert_eq!(defs.pools.pool(Phase::Day).len(), 2);
        assert_eq!(defs.pools.pool(Phase::Night).len(), 1);
        assert!(defs.pools.pool(Phase::TheFeast).is_empty());

        let stab = &defs.pools.pool(Phase::Day)[1];
        assert!(stab.usually_lethal);
        assert_eq!(stab.killers.iter().copied().collect::<Vec<_>>(), vec![Slot(0)]);
        assert_eq!(
            stab.requirements[&Slot(0)].stats[&Stat::CombatPower],
            StatBound::min(60)
        );
        assert_eq!(stab.weight, 1.0);

        let find = &defs.pools.pool(Phase::Day)[0];
        assert_eq!(find.bonus_items[&Slot(0)][0].stats[&Stat::CombatPower], 10);
    }

    #[test]
    fn test_missing_required_field_fails() {
        for missing in ["name", "description", "usually_lethal", "num_affected"] {
            let mut record = serde_json::json!({
                "name": "hide",
                "description": "{0} hides.",
                "usually_lethal": false,
                "num_affected": 1
            });
            record.as_object_mut().unwrap().remove(missing);
            let file = serde_json::json!({ "day": [record] }).to_string();
            let err = parse_definitions(&file).unwrap_err();
            assert!(matches!(err, LoadError::Parse(_)), "missing {} should fail", missing);
        }
    }

    #[test]
    fn test_unknown_stat_fails() {
        let file = r#"{"day": [{"name": "pray", "description": "{0} prays.", "usually_lethal": false,
            "num_affected": 1, "stats_changes": {"0": {"luck": 5}}}]}"#;
        assert!(matches!(parse_definitions(file), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_slot_out_of_range_fails() {
        let file = r#"{"night": [{"name": "hurt", "description": "{0} is hurt.", "usually_lethal": false,
            "num_affected": 1, "stats_changes": {"1": {"health": -5}}}]}"#;
        let err = parse_definitions(file).unwrap_err();
        match err {
            LoadError::InvalidAction { pool, action, source } => {
                assert_eq!(pool, Phase::Night);
                assert_eq!(action, "hurt");
                assert_eq!(
                    source,
                    ActionError::SlotOutOfRange {
                        field: "stats_changes",
                        slot: Slot(1),
                        num_affected: 1
                    }
                );
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_killer_slot_out_of_range_fails() {
        let file = r#"{"day": [{"name": "duel", "description": "{0} duels {1}.", "usually_lethal": true,
            "num_affected": 2, "killers": [2]}]}"#;
        assert!(matches!(
            parse_definitions(file),
            Err(LoadError::InvalidAction { source: ActionError::SlotOutOfRange { field: "killers", .. }, .. })
        ));
    }

    #[test]
    fn test_zero_slot_action_fails() {
        let file = r#"{"day": [{"name": "nothing", "description": "", "usually_lethal": false, "num_affected": 0}]}"#;
        assert!(matches!(
            parse_definitions(file),
            Err(LoadError::InvalidAction { source: ActionError::NoSlots, .. })
        ));
    }

    #[test]
    fn test_unknown_bonus_item_fails() {
        let file = r#"{"day": [{"name": "gift", "description": "{0} gets a gift.", "usually_lethal": false,
            "num_affected": 1, "bonus_items": {"0": ["Parachute"]}}]}"#;
        assert!(matches!(
            parse_definitions(file),
            Err(LoadError::InvalidAction { source: ActionError::UnknownItem(_), .. })
        ));
    }

    #[test]
    fn test_bad_weight_fails() {
        let file = r#"{"day": [{"name": "rest", "description": "{0} rests.", "usually_lethal": false,
            "num_affected": 1, "weight": 0}]}"#;
        assert!(matches!(
            parse_definitions(file),
            Err(LoadError::InvalidAction { source: ActionError::InvalidWeight(_), .. })
        ));
    }

    #[test]
    fn test_duplicate_item_fails() {
        let file = r#"{"items": [{"name": "Rope"}, {"name": "Rope"}]}"#;
        assert!(matches!(parse_definitions(file), Err(LoadError::DuplicateItem(_))));
    }

    #[test]
    fn test_unknown_field_fails() {
        let file = r#"{"day": [{"name": "rest", "description": "{0} rests.", "usually_lethal": false,
            "num_affected": 1, "stat_changes": {"0": {"health": 5}}}]}"#;
        assert!(matches!(parse_definitions(file), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_out_of_range_relation_target_is_accepted() {
        let file = r#"{"day": [{"name": "wave", "description": "{0} waves.", "usually_lethal": false,
            "num_affected": 1, "relation_changes": {"0": [{"target": 3, "relation": "friend"}]}}]}"#;
        let defs = parse_definitions(file).unwrap();
        assert_eq!(defs.pools.pool(Phase::Day).len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let defs = load_definitions(file.path()).unwrap();
        assert_eq!(defs.pools.total(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_definitions("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
