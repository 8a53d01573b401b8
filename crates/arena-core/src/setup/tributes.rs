//! Tribute Roster Loading
//!
//! Reads the starting roster from a JSON file:
//!
//! ```json
//! [
//!   {"name": "Katniss", "district": 12, "gender": "female",
//!    "portrait": "katniss.png", "stats": {"stealth": 70}, "items": ["Bow"]}
//! ]
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::components::{Item, ItemCatalog, Stat, Tribute};

/// Errors raised while loading a roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed roster: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("the roster is empty")]
    Empty,
    #[error("tribute name '{0}' appears more than once")]
    DuplicateName(String),
    #[error("tribute '{tribute}' starts with undefined item '{item}'")]
    UnknownItem { tribute: String, item: String },
}

fn default_gender() -> String {
    "unknown".to_string()
}

/// One tribute as written in the roster file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TributeRecord {
    pub name: String,
    pub district: u8,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub portrait: Option<String>,
    /// Absolute starting values overriding the defaults
    #[serde(default)]
    pub stats: BTreeMap<Stat, i32>,
    /// Starting items by name; each must be in the item catalog
    #[serde(default)]
    pub items: Vec<String>,
}

impl TributeRecord {
    pub fn into_tribute(self, catalog: &ItemCatalog) -> Result<Tribute, RosterError> {
        let mut tribute = Tribute::new(self.name, self.district, self.gender);
        tribute.portrait = self.portrait;
        for (stat, value) in self.stats {
            tribute.set_stat(stat, value);
        }
        for name in self.items {
            let item: &Item = catalog.get(&name).ok_or_else(|| RosterError::UnknownItem {
                tribute: tribute.name.clone(),
                item: name.clone(),
            })?;
            tribute.add_item(item.clone());
        }
        Ok(tribute)
    }
}

/// Parse and validate a roster from a JSON string
pub fn parse_roster(content: &str, catalog: &ItemCatalog) -> Result<Vec<Tribute>, RosterError> {
    let records: Vec<TributeRecord> = serde_json::from_str(content)?;
    if records.is_empty() {
        return Err(RosterError::Empty);
    }

    let mut names = HashSet::new();
    let mut tributes = Vec::with_capacity(records.len());
    for record in records {
        if !names.insert(record.name.clone()) {
            return Err(RosterError::DuplicateName(record.name));
        }
        tributes.push(record.into_tribute(catalog)?);
    }
    Ok(tributes)
}

/// Load and validate a roster from a JSON file
pub fn load_roster(path: impl AsRef<Path>, catalog: &ItemCatalog) -> Result<Vec<Tribute>, RosterError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tributes = parse_roster(&content, catalog)?;
    tracing::info!("Loaded {} tributes from {}", tributes.len(), path.display());
    Ok(tributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::DEFAULT_ATTRIBUTE;

    fn catalog() -> ItemCatalog {
        [Item::inert("Bow").with_category("weapon")].into_iter().collect()
    }

    #[test]
    fn test_parse_roster() {
        let roster = parse_roster(
            r#"[
                {"name": "Katniss", "district": 12, "gender": "female",
                 "portrait": "katniss.png", "stats": {"stealth": 70, "health": 90}, "items": ["Bow"]},
                {"name": "Peeta", "district": 12}
            ]"#,
            &catalog(),
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        let katniss = &roster[0];
        assert_eq!(katniss.stealth, 70);
        assert_eq!(katniss.health, 90);
        assert_eq!(katniss.vision, DEFAULT_ATTRIBUTE);
        assert!(katniss.has_item("Bow"));
        assert_eq!(katniss.portrait.as_deref(), Some("katniss.png"));
        assert_eq!(roster[1].gender, "unknown");
    }

    #[test]
    fn test_extreme_stat_overrides_load() {
        let roster = parse_roster(
            r#"[{"name": "Brutus", "district": 2,
                 "stats": {"combat_power": -2147483648, "stealth": 2147483647}}]"#,
            &catalog(),
        )
        .unwrap();
        assert_eq!(roster[0].combat_power, i32::MIN);
        assert_eq!(roster[0].stealth, i32::MAX);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = parse_roster(
            r#"[{"name": "Rue", "district": 11}, {"name": "Rue", "district": 11}]"#,
            &catalog(),
        );
        assert!(matches!(result, Err(RosterError::DuplicateName(name)) if name == "Rue"));
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(matches!(parse_roster("[]", &catalog()), Err(RosterError::Empty)));
    }

    #[test]
    fn test_unknown_starting_item_rejected() {
        let result = parse_roster(r#"[{"name": "Cato", "district": 2, "items": ["Sword"]}]"#, &catalog());
        assert!(matches!(result, Err(RosterError::UnknownItem { .. })));
    }

    #[test]
    fn test_missing_district_rejected() {
        let result = parse_roster(r#"[{"name": "Cato"}]"#, &catalog());
        assert!(matches!(result, Err(RosterError::Parse(_))));
    }
}
