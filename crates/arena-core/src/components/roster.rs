//! Roster Resources
//!
//! Spawn order of the tributes and the order in which they fell.

use bevy_ecs::prelude::*;

/// Tribute entities in the order they were spawned
#[derive(Resource, Debug, Clone, Default)]
pub struct Roster {
    pub entities: Vec<Entity>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Fallen tributes in elimination order, most recent last. Append-only.
#[derive(Resource, Debug, Clone, Default)]
pub struct Rankings {
    fallen: Vec<Entity>,
}

impl Rankings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a death. Recording the same tribute twice is ignored.
    pub fn record(&mut self, entity: Entity) -> bool {
        if self.fallen.contains(&entity) {
            return false;
        }
        self.fallen.push(entity);
        true
    }

    pub fn fallen(&self) -> &[Entity] {
        &self.fallen
    }

    pub fn len(&self) -> usize {
        self.fallen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fallen.is_empty()
    }
}
