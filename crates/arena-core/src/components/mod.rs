//! ECS Components
//!
//! Tribute and item data plus the roster-level resources.

pub mod item;
pub mod roster;
pub mod tribute;

pub use item::*;
pub use roster::*;
pub use tribute::*;
