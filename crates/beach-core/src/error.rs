//! Error types for beach construction and control.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building or driving a beach.
#[derive(Debug, Error)]
pub enum BeachError {
    /// Width or height was zero
    #[error("invalid beach dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    /// A threshold that must be positive was zero
    #[error("{name} threshold must be positive")]
    InvalidThreshold { name: &'static str },

    /// A coordinate fell outside the grid
    #[error("coordinate ({row}, {col}) is outside the {height}x{width} beach")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// An operation needs a capability this beach was built without
    #[error("operation requires the {0} capability")]
    CapabilityDisabled(&'static str),

    /// A listener handle that was never registered on this beach
    #[error("unknown listener {0}")]
    UnknownListener(usize),

    /// Error loading configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
