//! Tribute Components
//!
//! The tribute entity: identity, vitals, combat attributes, inventory and
//! relations, plus the stat lookup table used by actions.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::item::Item;

/// Lower bound for health, hunger and thirst
pub const VITAL_MIN: i32 = 0;
/// Upper bound for health, hunger and thirst
pub const VITAL_MAX: i32 = 100;
/// Starting value for combat attributes when the roster does not override it
pub const DEFAULT_ATTRIBUTE: i32 = 50;

/// Every stat an action can read or change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Health,
    Hunger,
    Thirst,
    CombatPower,
    Stealth,
    Vision,
    Charisma,
}

/// Signature shared by every stat mutator on [`Tribute`]
pub type StatMutator = fn(&mut Tribute, i32);

impl Stat {
    /// Returns all stat variants.
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Health,
            Stat::Hunger,
            Stat::Thirst,
            Stat::CombatPower,
            Stat::Stealth,
            Stat::Vision,
            Stat::Charisma,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::Hunger => "hunger",
            Stat::Thirst => "thirst",
            Stat::CombatPower => "combat_power",
            Stat::Stealth => "stealth",
            Stat::Vision => "vision",
            Stat::Charisma => "charisma",
        }
    }

    /// Vitals are clamped to [0, 100]; combat attributes are not.
    pub fn is_vital(&self) -> bool {
        matches!(self, Stat::Health | Stat::Hunger | Stat::Thirst)
    }

    /// Mutator applied when an action changes this stat
    pub fn mutator(&self) -> StatMutator {
        match self {
            Stat::Health => Tribute::change_health,
            Stat::Hunger => Tribute::change_hunger,
            Stat::Thirst => Tribute::change_thirst,
            Stat::CombatPower => Tribute::change_combat_power,
            Stat::Stealth => Tribute::change_stealth,
            Stat::Vision => Tribute::change_vision,
            Stat::Charisma => Tribute::change_charisma,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A participant in the games
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Tribute {
    pub name: String,
    pub district: u8,
    pub gender: String,
    pub portrait: Option<String>,
    pub health: i32,
    pub hunger: i32,
    pub thirst: i32,
    pub combat_power: i32,
    pub stealth: i32,
    pub vision: i32,
    pub charisma: i32,
    /// Items in acquisition order, duplicates allowed
    pub inventory: Vec<Item>,
    /// Other tribute name -> relationship label
    pub relations: BTreeMap<String, String>,
    pub kill_count: u32,
    pub alive: bool,
}

impl Tribute {
    pub fn new(name: impl Into<String>, district: u8, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            district,
            gender: gender.into(),
            portrait: None,
            health: VITAL_MAX,
            hunger: VITAL_MAX,
            thirst: VITAL_MAX,
            combat_power: DEFAULT_ATTRIBUTE,
            stealth: DEFAULT_ATTRIBUTE,
            vision: DEFAULT_ATTRIBUTE,
            charisma: DEFAULT_ATTRIBUTE,
            inventory: Vec::new(),
            relations: BTreeMap::new(),
            kill_count: 0,
            alive: true,
        }
    }

    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }

    /// Set a stat to an absolute value (vitals are still clamped)
    pub fn with_stat(mut self, stat: Stat, value: i32) -> Self {
        self.set_stat(stat, value);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.add_item(item);
        self
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::Hunger => self.hunger,
            Stat::Thirst => self.thirst,
            Stat::CombatPower => self.combat_power,
            Stat::Stealth => self.stealth,
            Stat::Vision => self.vision,
            Stat::Charisma => self.charisma,
        }
    }

    /// Overwrite a stat. Setting health to 0 kills the tribute.
    pub fn set_stat(&mut self, stat: Stat, value: i32) {
        let vital = value.clamp(VITAL_MIN, VITAL_MAX);
        match stat {
            Stat::Health => {
                self.health = vital;
                if vital == VITAL_MIN {
                    self.alive = false;
                }
            }
            Stat::Hunger => self.hunger = vital,
            Stat::Thirst => self.thirst = vital,
            Stat::CombatPower => self.combat_power = value,
            Stat::Stealth => self.stealth = value,
            Stat::Vision => self.vision = value,
            Stat::Charisma => self.charisma = value,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn change_health(&mut self, amount: i32) {
        self.health = clamp_vital(self.health, amount);
        if self.health == VITAL_MIN {
            self.alive = false;
        }
    }

    pub fn change_hunger(&mut self, amount: i32) {
        self.hunger = clamp_vital(self.hunger, amount);
    }

    pub fn change_thirst(&mut self, amount: i32) {
        self.thirst = clamp_vital(self.thirst, amount);
    }

    pub fn change_combat_power(&mut self, amount: i32) {
        self.combat_power = self.combat_power.saturating_add(amount);
    }

    pub fn change_stealth(&mut self, amount: i32) {
        self.stealth = self.stealth.saturating_add(amount);
    }

    pub fn change_vision(&mut self, amount: i32) {
        self.vision = self.vision.saturating_add(amount);
    }

    pub fn change_charisma(&mut self, amount: i32) {
        self.charisma = self.charisma.saturating_add(amount);
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Remove the first item with this name. Returns the removed item, if any.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.inventory.iter().position(|i| i.name == name)?;
        Some(self.inventory.remove(index))
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.iter().any(|i| i.name == name)
    }

    /// Take the whole inventory, leaving it empty
    pub fn take_inventory(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.inventory)
    }

    pub fn change_relation(&mut self, other: impl Into<String>, label: impl Into<String>) {
        self.relations.insert(other.into(), label.into());
    }

    pub fn relation_to(&self, other: &str) -> Option<&str> {
        self.relations.get(other).map(String::as_str)
    }

    /// Mark the tribute dead regardless of health
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

fn clamp_vital(current: i32, amount: i32) -> i32 {
    current.saturating_add(amount).clamp(VITAL_MIN, VITAL_MAX)
}
