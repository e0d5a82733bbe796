//! Beach
//!
//! The environment owning every octopus and tentacle, the smell counter, the
//! thresholds, the listener registry and the shuffle RNG.
//!
//! One tick (`iterate`) runs in fixed phases over the octopuses that were
//! awake when it started:
//!
//! ```text
//! snapshot awake ─▶ shuffle + tire ─▶ shock tentacles ─▶ recover
//!                   (tiredness)                          (tiredness)
//! ```
//!
//! Octopuses exhausted in the tiring phase still shock their neighbours in
//! the same tick, because propagation walks the snapshot, not the live state.

use std::fmt::Write as _;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use beach_events::{generate_snapshot_id, BeachSnapshot, OctopusSnapshot, TickReport};

use crate::capabilities::{Capabilities, Thresholds, Tier};
use crate::components::{
    Coord, Grid, Octopus, RuleContext, Shock, Smell, Tentacle, MAX_TENTACLES,
};
use crate::error::BeachError;
use crate::listeners::{Listener, ListenerId, ListenerRegistry};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Everything needed to build a beach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeachParams {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub capabilities: Capabilities,
    pub thresholds: Thresholds,
}

impl BeachParams {
    /// Parameters for a tier preset with its default thresholds.
    pub fn new(width: usize, height: usize, tier: Tier) -> Self {
        Self {
            width,
            height,
            seed: DEFAULT_SEED,
            capabilities: tier.capabilities(),
            thresholds: tier.default_thresholds(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_excitement_threshold(mut self, excitement: u32) -> Self {
        self.thresholds.excitement = excitement;
        self
    }
}

/// Result of one call to [`Beach::iterate`]
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick ran
    Progressed(TickReport),
    /// Nobody was awake; nothing changed
    AllDormant,
}

impl TickOutcome {
    pub fn is_dormant(&self) -> bool {
        matches!(self, TickOutcome::AllDormant)
    }

    pub fn report(&self) -> Option<&TickReport> {
        match self {
            TickOutcome::Progressed(report) => Some(report),
            TickOutcome::AllDormant => None,
        }
    }
}

/// The octopus beach
#[derive(Debug)]
pub struct Beach {
    grid: Grid,
    capabilities: Capabilities,
    thresholds: Thresholds,
    octopuses: Vec<Octopus>,
    /// Grouped by owner; each octopus keeps the range of its own
    tentacles: Vec<Tentacle>,
    smell: Smell,
    listeners: ListenerRegistry,
    rng: SmallRng,
    tick: u64,
    day: u64,
}

impl Beach {
    /// Builds the lattice and connects every octopus to its in-bounds neighbours.
    pub fn new(params: BeachParams) -> Result<Self, BeachError> {
        let grid = Grid::new(params.width, params.height)?;
        params.thresholds.validate(params.capabilities)?;

        let mut octopuses: Vec<Octopus> = (0..grid.len())
            .map(|id| Octopus::new(id, params.capabilities))
            .collect();

        let mut tentacles = Vec::with_capacity(grid.len() * MAX_TENTACLES);
        for (index, octopus) in octopuses.iter_mut().enumerate() {
            let (row, col) = grid.coord(index);
            let start = tentacles.len();
            for (id, neighbour) in grid.neighbours(row, col).enumerate() {
                tentacles.push(Tentacle::new(id, index, neighbour));
            }
            octopus.set_tentacle_range(start..tentacles.len());
        }

        debug!(
            width = params.width,
            height = params.height,
            tentacles = tentacles.len(),
            seed = params.seed,
            "beach built"
        );

        Ok(Self {
            grid,
            capabilities: params.capabilities,
            thresholds: params.thresholds,
            octopuses,
            tentacles,
            smell: Smell::default(),
            listeners: ListenerRegistry::new(),
            rng: SmallRng::seed_from_u64(params.seed),
            tick: 0,
            day: 0,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn smell(&self) -> u32 {
        self.smell.level()
    }

    /// Successful ticks since construction
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Nights since construction
    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn octopuses(&self) -> &[Octopus] {
        &self.octopuses
    }

    pub fn octopus(&self, row: usize, col: usize) -> Option<&Octopus> {
        self.grid.index(row, col).map(|i| &self.octopuses[i])
    }

    pub fn tentacles(&self) -> &[Tentacle] {
        &self.tentacles
    }

    /// Outgoing tentacles of the octopus at a cell.
    pub fn tentacles_of(&self, row: usize, col: usize) -> Option<&[Tentacle]> {
        self.octopus(row, col)
            .map(|o| &self.tentacles[o.tentacle_range()])
    }

    /// The tentacle from one cell to a neighbouring cell.
    pub fn tentacle_between(&self, from: Coord, to: Coord) -> Option<&Tentacle> {
        let target = self.grid.index(to.0, to.1)?;
        self.tentacles_of(from.0, from.1)?
            .iter()
            .find(|t| t.connected() == target)
    }

    pub fn awake_count(&self) -> usize {
        self.octopuses.iter().filter(|o| o.is_awake()).count()
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Restarts the shuffle sequence.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    fn resolve(&self, coords: &[Coord]) -> Result<Vec<usize>, BeachError> {
        coords.iter().map(|&c| self.grid.checked_index(c)).collect()
    }

    fn shock_octopus(&mut self, index: usize, power: u32) -> Shock {
        let mut ctx = RuleContext {
            capabilities: self.capabilities,
            thresholds: &self.thresholds,
            smell: &mut self.smell,
        };
        self.octopuses[index].shocked(power, &mut ctx)
    }

    /// Forces the octopuses at `coords` awake, in shuffled order.
    ///
    /// Every coordinate is checked before anything changes. Returns how many
    /// octopuses went from asleep to awake.
    pub fn trigger(&mut self, coords: &[Coord]) -> Result<usize, BeachError> {
        let mut targets = self.resolve(coords)?;
        targets.shuffle(&mut self.rng);

        let power = self.thresholds.excitement;
        let mut woken = 0;
        for index in targets {
            let was_awake = self.octopuses[index].is_awake();
            if self.shock_octopus(index, power) == Shock::Woke && !was_awake {
                woken += 1;
            }
        }

        debug!(
            requested = coords.len(),
            woken,
            smell = self.smell.level(),
            "trigger"
        );
        Ok(woken)
    }

    /// Runs one tick. Does nothing and reports [`TickOutcome::AllDormant`]
    /// when no octopus is awake.
    pub fn iterate(&mut self) -> TickOutcome {
        let mut awake: Vec<usize> = self
            .octopuses
            .iter()
            .filter(|o| o.is_awake())
            .map(Octopus::id)
            .collect();
        if awake.is_empty() {
            debug!(tick = self.tick, "all octopuses dormant");
            return TickOutcome::AllDormant;
        }

        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            awake_at_start: awake.len(),
            ..TickReport::default()
        };

        if self.capabilities.tiredness {
            awake.shuffle(&mut self.rng);
            for &index in &awake {
                let exhausted = {
                    let mut ctx = RuleContext {
                        capabilities: self.capabilities,
                        thresholds: &self.thresholds,
                        smell: &mut self.smell,
                    };
                    self.octopuses[index].tired(&mut ctx)
                };
                if exhausted {
                    trace!(octopus = index, tick = self.tick, "exhausted");
                    report.exhausted += 1;
                    report.listener_fires += self.notify_fell_asleep(index);
                }
            }
        }

        for &index in &awake {
            for t in self.octopuses[index].tentacle_range() {
                let target = self.tentacles[t].connected();
                let target_awake = self.octopuses[target].is_awake();
                let Some(power) = self.tentacles[t].shock(target_awake, self.capabilities) else {
                    continue;
                };
                if self.shock_octopus(target, power) == Shock::Woke && !target_awake {
                    trace!(octopus = target, from = index, power, "woke");
                    report.woken += 1;
                }
            }
        }

        if self.capabilities.tiredness {
            let ctx = RuleContext {
                capabilities: self.capabilities,
                thresholds: &self.thresholds,
                smell: &mut self.smell,
            };
            for octopus in self.octopuses.iter_mut().filter(|o| o.is_recovering()) {
                if octopus.recover(&ctx) {
                    report.recovered += 1;
                }
            }
        }

        report.smell = self.smell.level();
        report.awake_at_end = self.awake_count();
        debug!(
            tick = report.tick,
            awake = report.awake_at_end,
            woken = report.woken,
            exhausted = report.exhausted,
            recovered = report.recovered,
            smell = report.smell,
            "tick"
        );
        TickOutcome::Progressed(report)
    }

    /// Fires the listeners of an octopus that just went from awake to asleep.
    ///
    /// Only tiredness can put an octopus to sleep mid-run, so shocks never
    /// reach this path.
    fn notify_fell_asleep(&mut self, index: usize) -> usize {
        if !self.capabilities.listeners {
            return 0;
        }
        let octopus = &self.octopuses[index];
        self.listeners.fire(octopus.listeners(), octopus)
    }

    /// Puts every octopus to sleep and resets every listener.
    ///
    /// Topology and tentacle soreness are kept.
    pub fn night(&mut self) {
        let mut ctx = RuleContext {
            capabilities: self.capabilities,
            thresholds: &self.thresholds,
            smell: &mut self.smell,
        };
        let mut slept = 0;
        for octopus in &mut self.octopuses {
            if octopus.sleep(true, &mut ctx) {
                slept += 1;
            }
        }
        self.listeners.reset_all();
        self.day += 1;
        info!(day = self.day, slept, smell = self.smell.level(), "night");
    }

    /// Registers `listener` and attaches it to the octopuses at `coords`.
    pub fn attach_listener<L>(&mut self, coords: &[Coord], listener: L) -> Result<ListenerId, BeachError>
    where
        L: Listener + 'static,
    {
        if !self.capabilities.listeners {
            return Err(BeachError::CapabilityDisabled("listeners"));
        }
        let targets = self.resolve(coords)?;
        let id = self.listeners.register(Box::new(listener));
        for index in targets {
            self.octopuses[index].attach_listener(id);
        }
        Ok(id)
    }

    /// Attaches an already registered listener to more octopuses.
    pub fn attach_existing_listener(&mut self, coords: &[Coord], id: ListenerId) -> Result<(), BeachError> {
        if !self.capabilities.listeners {
            return Err(BeachError::CapabilityDisabled("listeners"));
        }
        if !self.listeners.contains(id) {
            return Err(BeachError::UnknownListener(id.index()));
        }
        for index in self.resolve(coords)? {
            self.octopuses[index].attach_listener(id);
        }
        Ok(())
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self, triggered_by: &str) -> BeachSnapshot {
        let mut snapshot = BeachSnapshot::new(
            generate_snapshot_id(self.tick),
            self.tick,
            triggered_by,
            self.grid.width(),
            self.grid.height(),
        );
        snapshot.smell = self.smell.level();
        snapshot.octopuses = self
            .octopuses
            .iter()
            .map(|o| {
                let (row, col) = self.grid.coord(o.id());
                OctopusSnapshot {
                    id: o.id(),
                    row,
                    col,
                    awake: o.is_awake(),
                    excitement: o.excitement(),
                    recovering: o.is_recovering(),
                }
            })
            .collect();
        snapshot
    }

    /// Every octopus followed by its tentacles, one per line.
    pub fn detail(&self) -> String {
        let mut out = String::new();
        for octopus in &self.octopuses {
            let _ = writeln!(out, "{}", octopus);
            for tentacle in &self.tentacles[octopus.tentacle_range()] {
                let _ = writeln!(out, "\t{}", tentacle);
            }
        }
        out
    }
}
