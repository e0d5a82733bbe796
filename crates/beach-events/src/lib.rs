//! Shared snapshot and report types for the octopus beach.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers and other read-only consumers depend on it instead of the engine.

pub mod report;
pub mod snapshot;

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, BeachSnapshot, OctopusSnapshot};

// Re-export report types
pub use report::{RunSummary, TickReport};
