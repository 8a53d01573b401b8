//! Item Components
//!
//! Items carried by tributes and the catalog they are defined in.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::tribute::{Stat, Tribute};

fn default_category() -> String {
    "misc".to_string()
}

/// An item definition. Inventories hold clones of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub stackable: bool,
    /// Stat deltas applied when the item is granted by an action
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stats: BTreeMap<Stat, i32>,
}

impl Item {
    /// An item with no payload; it only matters for inventory checks
    pub fn inert(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: default_category(),
            stackable: false,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stat(mut self, stat: Stat, delta: i32) -> Self {
        self.stats.insert(stat, delta);
        self
    }

    pub fn is_inert(&self) -> bool {
        self.stats.is_empty()
    }

    /// Apply this item's payload to a tribute
    pub fn apply_payload(&self, tribute: &mut Tribute) {
        for (stat, delta) in &self.stats {
            (stat.mutator())(tribute, *delta);
        }
    }
}

/// Resource holding every item definition by name
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<String, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item, replacing any previous definition with the same name
    pub fn register(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

impl FromIterator<Item> for ItemCatalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.register(item);
        }
        catalog
    }
}
