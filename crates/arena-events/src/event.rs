//! Round Event Types
//!
//! One `RoundEvent` is produced for every successfully matched action and for
//! every tribute left idle when a round ends early.

use serde::{Deserialize, Serialize};

use crate::Phase;

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}

/// What produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A drawn action matched and was applied
    Action,
    /// The round ended before this tribute was drawn
    Idle,
}

/// Items handed to one killer during loot resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTransfer {
    pub to: String,
    pub items: Vec<String>,
}

/// A single narrative event within a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEvent {
    pub event_id: String,
    pub day: u32,
    pub phase: Phase,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Description with slot placeholders replaced by tribute names
    pub description: String,
    /// Tribute names in slot order
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub killers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub killed: Vec<String>,
    /// Tributes who reached zero health during a non-lethal action
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mishaps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loot: Vec<LootTransfer>,
    /// Items that vanished because nobody was credited with the kill
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<String>,
}

impl RoundEvent {
    pub fn idle(event_id: impl Into<String>, day: u32, phase: Phase, tribute: &str) -> Self {
        Self {
            event_id: event_id.into(),
            day,
            phase,
            kind: EventKind::Idle,
            action: None,
            description: format!("{} keeps to themselves.", tribute),
            participants: vec![tribute.to_string()],
            killers: Vec::new(),
            killed: Vec::new(),
            mishaps: Vec::new(),
            loot: Vec::new(),
            discarded: Vec::new(),
        }
    }

    /// All tributes that died in this event, lethal or not
    pub fn deaths(&self) -> impl Iterator<Item = &String> {
        self.killed.iter().chain(self.mishaps.iter())
    }

    pub fn is_lethal(&self) -> bool {
        !self.killed.is_empty() || !self.mishaps.is_empty()
    }
}

/// Everything that happened in one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub day: u32,
    pub phase: Phase,
    pub events: Vec<RoundEvent>,
    /// Total action draws, successful or not
    pub draws: u32,
    /// Draws discarded for size or requirement mismatch
    pub failed_draws: u32,
    /// True when the round stopped before every tribute was used
    pub exhausted: bool,
    pub alive_after: usize,
}

impl RoundSummary {
    pub fn new(day: u32, phase: Phase) -> Self {
        Self {
            day,
            phase,
            events: Vec::new(),
            draws: 0,
            failed_draws: 0,
            exhausted: false,
            alive_after: 0,
        }
    }

    pub fn deaths(&self) -> Vec<&String> {
        self.events.iter().flat_map(|e| e.deaths()).collect()
    }

    pub fn idle_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Idle)
            .count()
    }
}
