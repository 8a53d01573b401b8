//! Event Output
//!
//! Append-only JSONL logging of round events.

pub mod logger;

pub use logger::*;
