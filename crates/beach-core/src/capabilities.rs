//! Capability flags and tier presets.
//!
//! Every behavioural layer is a flag on [`Capabilities`]. The notebook's
//! layering order is kept as [`Tier`] presets, each enabling everything the
//! previous one did plus one more layer.

use serde::{Deserialize, Serialize};

use crate::error::BeachError;

/// Behavioural layers enabled on a beach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Global smell caps how many octopuses can be awake; shocks are ignored while awake
    pub smell: bool,
    /// Tentacles toughen against awake targets instead of shocking them
    pub soreness: bool,
    /// Awake octopuses tire, sleep and then recover
    pub tiredness: bool,
    /// Listeners are fired when an octopus falls asleep
    pub listeners: bool,
}

impl Capabilities {
    /// Plain spreading with no modifiers.
    pub const fn spreading() -> Self {
        Self {
            smell: false,
            soreness: false,
            tiredness: false,
            listeners: false,
        }
    }
}

/// Preset capability stacks, strictly additive
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Spreading,
    Smell,
    Soreness,
    Tiredness,
    #[default]
    Listeners,
}

impl Tier {
    pub fn capabilities(self) -> Capabilities {
        let rank = self as u8;
        Capabilities {
            smell: rank >= Tier::Smell as u8,
            soreness: rank >= Tier::Soreness as u8,
            tiredness: rank >= Tier::Tiredness as u8,
            listeners: rank >= Tier::Listeners as u8,
        }
    }

    /// Thresholds used when the caller does not override them.
    pub fn default_thresholds(self) -> Thresholds {
        match self {
            Tier::Spreading => Thresholds {
                excitement: 3,
                ..Thresholds::default()
            },
            Tier::Smell => Thresholds {
                excitement: 5,
                smell: 20,
                ..Thresholds::default()
            },
            Tier::Soreness => Thresholds {
                excitement: 50,
                smell: 50,
                ..Thresholds::default()
            },
            Tier::Tiredness | Tier::Listeners => Thresholds {
                excitement: 80,
                smell: 50,
                tiredness: 5,
                recovery: 5,
            },
        }
    }
}

/// Per-beach thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Excitement needed to wake up
    pub excitement: u32,
    /// Smell level at which nobody else can wake
    pub smell: u32,
    /// Tiredness an octopus can exceed before it is forced to sleep
    pub tiredness: u32,
    /// Ticks spent recovering before shocks are accepted again
    pub recovery: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            excitement: 2,
            smell: 20,
            tiredness: 10,
            recovery: 10,
        }
    }
}

impl Thresholds {
    /// Rejects zero thresholds for every layer that reads them.
    pub fn validate(&self, capabilities: Capabilities) -> Result<(), BeachError> {
        if self.excitement == 0 {
            return Err(BeachError::InvalidThreshold { name: "excitement" });
        }
        if capabilities.smell && self.smell == 0 {
            return Err(BeachError::InvalidThreshold { name: "smell" });
        }
        if capabilities.tiredness {
            if self.tiredness == 0 {
                return Err(BeachError::InvalidThreshold { name: "tiredness" });
            }
            if self.recovery == 0 {
                return Err(BeachError::InvalidThreshold { name: "recovery" });
            }
        }
        Ok(())
    }
}
