//! Octopus
//!
//! Per-cell agent state and the activation, tiredness and recovery rules.
//! Rules read the beach's thresholds and smell through a [`RuleContext`]
//! borrowed for the duration of a single call.

use std::fmt;
use std::ops::Range;

use crate::capabilities::{Capabilities, Thresholds};
use crate::listeners::ListenerId;

/// Shared smell counter owned by the beach
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Smell {
    level: u32,
}

impl Smell {
    pub fn level(&self) -> u32 {
        self.level
    }

    fn inhale(&mut self) {
        self.level += 1;
    }

    fn exhale(&mut self) {
        debug_assert!(self.level > 0, "smell released below zero");
        self.level = self.level.saturating_sub(1);
    }
}

/// What the beach lends an octopus while a rule runs
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub capabilities: Capabilities,
    pub thresholds: &'a Thresholds,
    pub smell: &'a mut Smell,
}

/// Result of a single shock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shock {
    /// Nothing changed (recovering, or already awake under smell)
    Ignored,
    /// Excitement grew but the octopus did not wake
    Absorbed,
    /// The wake condition held and `awake` was set
    Woke,
}

/// Tiredness sub-state, only present on tiredness-enabled beaches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fatigue {
    pub tiredness: u32,
    pub recovering: bool,
    pub recover_status: u32,
}

/// A single octopus on the beach
#[derive(Debug, Clone)]
pub struct Octopus {
    id: usize,
    awake: bool,
    excitement: u32,
    /// Indices of outgoing tentacles in the beach's tentacle store
    tentacles: Range<usize>,
    fatigue: Option<Fatigue>,
    listeners: Vec<ListenerId>,
}

impl Octopus {
    pub fn new(id: usize, capabilities: Capabilities) -> Self {
        Self {
            id,
            awake: false,
            excitement: 0,
            tentacles: 0..0,
            fatigue: capabilities.tiredness.then(Fatigue::default),
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }

    pub fn excitement(&self) -> u32 {
        self.excitement
    }

    pub fn fatigue(&self) -> Option<&Fatigue> {
        self.fatigue.as_ref()
    }

    pub fn is_recovering(&self) -> bool {
        self.fatigue.as_ref().is_some_and(|f| f.recovering)
    }

    pub fn tentacle_range(&self) -> Range<usize> {
        self.tentacles.clone()
    }

    pub(crate) fn set_tentacle_range(&mut self, range: Range<usize>) {
        self.tentacles = range;
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub(crate) fn attach_listener(&mut self, listener: ListenerId) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Adds `power` to excitement and wakes the octopus if the layer rules allow.
    ///
    /// Without smell the wake check runs on every call, so an awake octopus
    /// keeps accumulating excitement and reports [`Shock::Woke`] again. With
    /// smell an awake octopus ignores shocks entirely.
    pub fn shocked(&mut self, power: u32, ctx: &mut RuleContext<'_>) -> Shock {
        if self.is_recovering() {
            return Shock::Ignored;
        }

        if !ctx.capabilities.smell {
            self.excitement = self.excitement.saturating_add(power);
            if self.excitement >= ctx.thresholds.excitement {
                self.awake = true;
                return Shock::Woke;
            }
            return Shock::Absorbed;
        }

        if self.awake {
            return Shock::Ignored;
        }
        self.excitement = self.excitement.saturating_add(power);
        if self.excitement >= ctx.thresholds.excitement && ctx.smell.level() < ctx.thresholds.smell
        {
            self.awake = true;
            ctx.smell.inhale();
            return Shock::Woke;
        }
        Shock::Absorbed
    }

    /// Adds one tiredness; past the threshold the octopus sleeps and starts
    /// recovering. Returns true when that happened.
    pub fn tired(&mut self, ctx: &mut RuleContext<'_>) -> bool {
        let Some(fatigue) = self.fatigue.as_mut() else {
            return false;
        };
        fatigue.tiredness += 1;
        if fatigue.tiredness > ctx.thresholds.tiredness {
            self.sleep(false, ctx);
            return true;
        }
        false
    }

    /// Advances recovery. Returns true when the octopus accepts shocks again.
    pub fn recover(&mut self, ctx: &RuleContext<'_>) -> bool {
        let Some(fatigue) = self.fatigue.as_mut() else {
            return false;
        };
        if !fatigue.recovering {
            return false;
        }
        fatigue.recover_status += 1;
        if fatigue.recover_status >= ctx.thresholds.recovery {
            fatigue.recovering = false;
            fatigue.recover_status = 0;
            return true;
        }
        false
    }

    /// Puts the octopus to sleep, releasing its smell if it was awake.
    ///
    /// A night sleep also clears recovery; an exhaustion sleep starts it.
    /// Returns whether the octopus was awake.
    pub fn sleep(&mut self, night: bool, ctx: &mut RuleContext<'_>) -> bool {
        let was_awake = self.awake;
        if was_awake && ctx.capabilities.smell {
            ctx.smell.exhale();
        }
        self.awake = false;
        self.excitement = 0;
        if let Some(fatigue) = self.fatigue.as_mut() {
            fatigue.tiredness = 0;
            if night {
                fatigue.recovering = false;
                fatigue.recover_status = 0;
            } else {
                fatigue.recovering = true;
            }
        }
        was_awake
    }
}

impl fmt::Display for Octopus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Octopus {} [awake: {}, excitement: {}",
            self.id, self.awake, self.excitement
        )?;
        if let Some(fatigue) = &self.fatigue {
            write!(
                f,
                ", tiredness: {}, recovering: {}",
                fatigue.tiredness, fatigue.recovering
            )?;
        }
        write!(f, "]")
    }
}
