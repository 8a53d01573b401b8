//! Action Definitions
//!
//! Typed action templates, the pools they live in, and the loader that builds
//! them from definition files.

pub mod definition;
pub mod loader;
pub mod slot;

pub use definition::{Action, ActionPools, RelationChange, SlotRequirement, StatBound, StatRange};
pub use loader::{
    load_definitions, parse_definitions, validate_action, ActionError, ActionRecord,
    DefinitionFile, Definitions, LoadError,
};
pub use slot::Slot;
