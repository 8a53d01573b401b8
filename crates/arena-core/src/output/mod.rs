//! Output Generation
//!
//! Game snapshots and final standings.

pub mod snapshot;

pub use snapshot::*;
