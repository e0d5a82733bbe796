//! Tentacle
//!
//! Directed link from an owner octopus to one neighbour.

use std::fmt;

use crate::capabilities::Capabilities;

/// A directed tentacle between two octopuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tentacle {
    /// Sequential per owner, starting at 0
    id: usize,
    owner: usize,
    connected: usize,
    soreness: u32,
}

impl Tentacle {
    pub fn new(id: usize, owner: usize, connected: usize) -> Self {
        Self {
            id,
            owner,
            connected,
            soreness: 1,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn owner(&self) -> usize {
        self.owner
    }

    pub fn connected(&self) -> usize {
        self.connected
    }

    pub fn soreness(&self) -> u32 {
        self.soreness
    }

    /// Power to deliver to the connected octopus this tick, if any.
    ///
    /// With soreness an awake target is not shocked; the tentacle toughens
    /// instead and the next delivery carries the accumulated soreness.
    pub fn shock(&mut self, target_awake: bool, capabilities: Capabilities) -> Option<u32> {
        if !capabilities.soreness {
            return Some(1);
        }
        if target_awake {
            self.soreness = self.soreness.saturating_add(1);
            None
        } else {
            Some(self.soreness)
        }
    }
}

impl fmt::Display for Tentacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tentacle {}: Octopus {} -> Octopus {}: Soreness {}",
            self.id, self.owner, self.connected, self.soreness
        )
    }
}
