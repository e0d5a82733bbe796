//! Octopus beach simulation engine.
//!
//! Octopuses on a grid wake each other through their tentacles. Optional
//! layers throttle the spread (smell), toughen tentacles (soreness), tire and
//! recover octopuses (tiredness) and notify observers (listeners).
//!
//! # Modules
//!
//! - [`components`]: grid addressing, octopus and tentacle rules
//! - [`beach`]: the environment and its tick
//! - [`listeners`]: observer trait and registry
//! - [`driver`]: bounded runs and multi-day schedules
//! - [`config`]: TOML configuration

pub mod beach;
pub mod capabilities;
pub mod components;
pub mod config;
pub mod driver;
pub mod error;
pub mod listeners;

pub use beach::{Beach, BeachParams, TickOutcome, DEFAULT_SEED};
pub use capabilities::{Capabilities, Thresholds, Tier};
pub use components::{Coord, Grid, Octopus, Shock, Tentacle};
pub use config::{parse_coord, BeachConfig, ConfigError, DEFAULT_CONFIG_PATH};
pub use driver::{DayPlan, Driver};
pub use error::BeachError;
pub use listeners::{FireLog, Listener, ListenerId, ListenerRegistry};

pub use beach_events::{BeachSnapshot, OctopusSnapshot, RunSummary, TickReport};
