//! Beach components
//!
//! Grid addressing, octopuses and their tentacles.

pub mod grid;
pub mod octopus;
pub mod tentacle;

pub use grid::*;
pub use octopus::*;
pub use tentacle::*;
