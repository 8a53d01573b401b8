//! Action Definitions
//!
//! Validated, strongly typed action templates. Records read from a definition
//! file are converted into these by [`crate::actions::loader`]; tests build
//! them directly with the builder methods.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use arena_events::Phase;

use crate::components::{Item, Stat};

use super::slot::Slot;

/// Inclusive bounds on a stat; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

/// A stat requirement: a bare threshold or a `{min, max}` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatBound {
    AtLeast(i32),
    Range(StatRange),
}

impl StatBound {
    pub fn between(min: i32, max: i32) -> Self {
        StatBound::Range(StatRange {
            min: Some(min),
            max: Some(max),
        })
    }

    pub fn min(min: i32) -> Self {
        StatBound::Range(StatRange {
            min: Some(min),
            max: None,
        })
    }

    pub fn max(max: i32) -> Self {
        StatBound::Range(StatRange {
            min: None,
            max: Some(max),
        })
    }

    pub fn admits(&self, value: i32) -> bool {
        match self {
            StatBound::AtLeast(threshold) => value >= *threshold,
            StatBound::Range(range) => {
                range.min.map_or(true, |min| value >= min) && range.max.map_or(true, |max| value <= max)
            }
        }
    }

    /// A range whose min exceeds its max can never be satisfied
    pub fn is_satisfiable(&self) -> bool {
        match self {
            StatBound::AtLeast(_) => true,
            StatBound::Range(StatRange {
                min: Some(min),
                max: Some(max),
            }) => min <= max,
            StatBound::Range(_) => true,
        }
    }
}

/// Everything the tribute in one slot must satisfy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotRequirement {
    pub stats: BTreeMap<Stat, StatBound>,
    /// Item names that must all be in the inventory
    pub items: Vec<String>,
    /// Target slot -> label the relation must have, if one exists
    pub relations: BTreeMap<Slot, String>,
}

impl SlotRequirement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stat(mut self, stat: Stat, bound: StatBound) -> Self {
        self.stats.insert(stat, bound);
        self
    }

    pub fn item(mut self, name: impl Into<String>) -> Self {
        self.items.push(name.into());
        self
    }

    pub fn relation(mut self, target: impl Into<Slot>, label: impl Into<String>) -> Self {
        self.relations.insert(target.into(), label.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.items.is_empty() && self.relations.is_empty()
    }
}

/// Relation written onto a slot's tribute about another slot's tribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationChange {
    pub target: Slot,
    pub relation: String,
}

/// A reusable event template
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    /// Narrative text; `{0}`, `{1}`, ... stand for the slot tributes
    pub description: String,
    pub usually_lethal: bool,
    pub num_affected: usize,
    /// Expected killer count, bookkeeping only
    pub num_killers: usize,
    /// Expected death count, bookkeeping only
    pub num_killed: usize,
    /// Relative draw weight within its pool
    pub weight: f32,
    pub requirements: BTreeMap<Slot, SlotRequirement>,
    pub stats_changes: BTreeMap<Slot, BTreeMap<Stat, i32>>,
    pub bonus_items: BTreeMap<Slot, Vec<Item>>,
    pub removed_items: BTreeMap<Slot, Vec<String>>,
    pub relation_changes: BTreeMap<Slot, Vec<RelationChange>>,
    /// Slots credited with the kill when the action is lethal
    pub killers: BTreeSet<Slot>,
}

impl Action {
    pub fn new(name: impl Into<String>, description: impl Into<String>, num_affected: usize) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usually_lethal: false,
            num_affected,
            num_killers: 0,
            num_killed: 0,
            weight: 1.0,
            requirements: BTreeMap::new(),
            stats_changes: BTreeMap::new(),
            bonus_items: BTreeMap::new(),
            removed_items: BTreeMap::new(),
            relation_changes: BTreeMap::new(),
            killers: BTreeSet::new(),
        }
    }

    pub fn lethal(mut self) -> Self {
        self.usually_lethal = true;
        self
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn require(mut self, slot: impl Into<Slot>, requirement: SlotRequirement) -> Self {
        self.requirements.insert(slot.into(), requirement);
        self
    }

    pub fn change_stat(mut self, slot: impl Into<Slot>, stat: Stat, delta: i32) -> Self {
        self.stats_changes
            .entry(slot.into())
            .or_default()
            .insert(stat, delta);
        self
    }

    pub fn grant(mut self, slot: impl Into<Slot>, item: Item) -> Self {
        self.bonus_items.entry(slot.into()).or_default().push(item);
        self
    }

    pub fn take(mut self, slot: impl Into<Slot>, item_name: impl Into<String>) -> Self {
        self.removed_items
            .entry(slot.into())
            .or_default()
            .push(item_name.into());
        self
    }

    pub fn relate(mut self, slot: impl Into<Slot>, target: impl Into<Slot>, label: impl Into<String>) -> Self {
        self.relation_changes
            .entry(slot.into())
            .or_default()
            .push(RelationChange {
                target: target.into(),
                relation: label.into(),
            });
        self
    }

    pub fn killer(mut self, slot: impl Into<Slot>) -> Self {
        self.killers.insert(slot.into());
        self.num_killers = self.killers.len();
        self
    }

    /// Every slot index this action refers to as a map key or killer
    pub fn referenced_slots(&self) -> Vec<(&'static str, Slot)> {
        let mut slots = Vec::new();
        slots.extend(self.requirements.keys().map(|s| ("requirements", *s)));
        slots.extend(self.stats_changes.keys().map(|s| ("stats_changes", *s)));
        slots.extend(self.bonus_items.keys().map(|s| ("bonus_items", *s)));
        slots.extend(self.removed_items.keys().map(|s| ("removed_items", *s)));
        slots.extend(self.relation_changes.keys().map(|s| ("relation_changes", *s)));
        slots.extend(self.killers.iter().map(|s| ("killers", *s)));
        slots
    }

    /// Replace `{N}` placeholders with the names of the matched tributes
    pub fn render(&self, names: &[&str]) -> String {
        let mut text = self.description.clone();
        for (i, name) in names.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", i), name);
        }
        text
    }
}

/// Resource holding the three named action pools
#[derive(Resource, Debug, Clone, Default)]
pub struct ActionPools {
    pub day: Vec<Action>,
    pub night: Vec<Action>,
    pub the_feast: Vec<Action>,
}

impl ActionPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(&self, phase: Phase) -> &[Action] {
        match phase {
            Phase::Day => &self.day,
            Phase::Night => &self.night,
            Phase::TheFeast => &self.the_feast,
        }
    }

    pub fn pool_mut(&mut self, phase: Phase) -> &mut Vec<Action> {
        match phase {
            Phase::Day => &mut self.day,
            Phase::Night => &mut self.night,
            Phase::TheFeast => &mut self.the_feast,
        }
    }

    pub fn total(&self) -> usize {
        self.day.len() + self.night.len() + self.the_feast.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_bound_threshold() {
        let bound = StatBound::AtLeast(60);
        assert!(!bound.admits(59));
        assert!(bound.admits(60));
        assert!(bound.admits(1000));
    }

    #[test]
    fn test_stat_bound_range_inclusive() {
        let bound = StatBound::between(10, 20);
        assert!(!bound.admits(9));
        assert!(bound.admits(10));
        assert!(bound.admits(20));
        assert!(!bound.admits(21));
    }

    #[test]
    fn test_stat_bound_parses_both_forms() {
        let reqs: BTreeMap<Stat, StatBound> =
            serde_json::from_str(r#"{"combat_power": {"min": 60}, "stealth": 30, "health": {"max": 40}}"#)
                .unwrap();
        assert_eq!(reqs[&Stat::CombatPower], StatBound::min(60));
        assert_eq!(reqs[&Stat::Stealth], StatBound::AtLeast(30));
        assert_eq!(reqs[&Stat::Health], StatBound::max(40));
    }

    #[test]
    fn test_stat_bound_rejects_unknown_keys() {
        let result: Result<StatBound, _> = serde_json::from_str(r#"{"minimum": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unsatisfiable_range() {
        assert!(!StatBound::between(50, 10).is_satisfiable());
        assert!(StatBound::between(10, 10).is_satisfiable());
    }

    #[test]
    fn test_render_description() {
        let action = Action::new("ambush", "{0} ambushes {1}, and {1} flees.", 2);
        assert_eq!(action.render(&["Cato", "Rue"]), "Cato ambushes Rue, and Rue flees.");
    }

    #[test]
    fn test_referenced_slots() {
        let action = Action::new("trade", "{0} trades with {1}", 2)
            .take(0, "Rope")
            .relate(1, 0, "friend")
            .killer(1);
        let slots = action.referenced_slots();
        assert!(slots.contains(&("removed_items", Slot(0))));
        assert!(slots.contains(&("relation_changes", Slot(1))));
        assert!(slots.contains(&("killers", Slot(1))));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_pools_by_phase() {
        let mut pools = ActionPools::new();
        pools.pool_mut(Phase::TheFeast).push(Action::new("feast", "{0} grabs a pack", 1));
        assert_eq!(pools.pool(Phase::TheFeast).len(), 1);
        assert!(pools.pool(Phase::Day).is_empty());
        assert_eq!(pools.total(), 1);
    }
}
