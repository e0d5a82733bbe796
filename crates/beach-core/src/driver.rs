//! Driver Loop
//!
//! Runs a beach for a bounded number of ticks, stopping early once everyone
//! is asleep, and hands snapshots to an optional observer.

use tracing::{info, warn};

use beach_events::{BeachSnapshot, RunSummary};

use crate::beach::{Beach, TickOutcome};
use crate::components::Coord;
use crate::error::BeachError;

/// A multi-day schedule: trigger each morning, run, then night
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub trigger: Vec<Coord>,
    pub iterations: u64,
    pub days: u32,
}

/// Drives a borrowed beach
pub struct Driver<'a> {
    beach: &'a mut Beach,
    observer: Option<Box<dyn FnMut(&BeachSnapshot) + 'a>>,
}

impl<'a> Driver<'a> {
    pub fn new(beach: &'a mut Beach) -> Self {
        Self {
            beach,
            observer: None,
        }
    }

    /// Receives a snapshot after the trigger and after every tick.
    pub fn with_observer(mut self, observer: impl FnMut(&BeachSnapshot) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn beach(&self) -> &Beach {
        self.beach
    }

    fn emit(&mut self, triggered_by: &str) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.beach.snapshot(triggered_by));
        }
    }

    /// Runs up to `max_iterations` ticks.
    ///
    /// Emits the current state first, then one snapshot per successful tick.
    pub fn run(&mut self, max_iterations: u64) -> RunSummary {
        if max_iterations == 0 {
            warn!("run requested with zero iterations");
        }
        self.emit("start");

        let mut summary = RunSummary::default();
        for _ in 0..max_iterations {
            match self.beach.iterate() {
                TickOutcome::Progressed(report) => {
                    summary.ticks_run += 1;
                    summary.reports.push(report);
                    self.emit("tick");
                }
                TickOutcome::AllDormant => {
                    info!(tick = self.beach.tick(), "everyone is sleeping");
                    summary.stopped_early = true;
                    break;
                }
            }
        }

        summary.final_smell = self.beach.smell();
        summary.final_awake = self.beach.awake_count();
        info!(
            ticks = summary.ticks_run,
            stopped_early = summary.stopped_early,
            awake = summary.final_awake,
            smell = summary.final_smell,
            "run finished"
        );
        summary
    }

    /// Triggers `trigger` if given, then runs.
    pub fn animate(
        &mut self,
        trigger: Option<&[Coord]>,
        max_iterations: u64,
    ) -> Result<RunSummary, BeachError> {
        if let Some(coords) = trigger {
            self.beach.trigger(coords)?;
        }
        Ok(self.run(max_iterations))
    }

    /// Runs `plan.days` days with a night between consecutive days.
    pub fn run_days(&mut self, plan: &DayPlan) -> Result<Vec<RunSummary>, BeachError> {
        let mut days = Vec::with_capacity(plan.days as usize);
        for day in 0..plan.days {
            if day > 0 {
                self.beach.night();
            }
            info!(day = day + 1, "morning");
            days.push(self.animate(Some(&plan.trigger), plan.iterations)?);
        }
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beach::BeachParams;
    use crate::capabilities::Tier;

    #[test]
    fn test_run_stops_early_when_dormant() {
        let mut beach = Beach::new(BeachParams::new(3, 3, Tier::Spreading)).unwrap();
        let summary = Driver::new(&mut beach).run(10);

        assert!(summary.stopped_early);
        assert_eq!(summary.ticks_run, 0);
        assert!(summary.reports.is_empty());
    }

    #[test]
    fn test_observer_sees_start_and_every_tick() {
        let mut beach = Beach::new(BeachParams::new(3, 3, Tier::Spreading).with_excitement_threshold(2)).unwrap();
        let mut seen = Vec::new();

        let summary = {
            let mut driver = Driver::new(&mut beach).with_observer(|s| seen.push((s.tick, s.awake_count())));
            driver.animate(Some(&[(1, 1)]), 3).unwrap()
        };

        assert_eq!(summary.ticks_run, 3);
        assert!(!summary.stopped_early);
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], (0, 1));
        assert_eq!(seen[1], (1, 1));
        assert_eq!(seen[2], (2, 9));
    }

    #[test]
    fn test_zero_iterations_only_emits_start() {
        let mut beach = Beach::new(BeachParams::new(2, 2, Tier::Smell)).unwrap();
        let mut count = 0;
        let summary = Driver::new(&mut beach)
            .with_observer(|_| count += 1)
            .animate(Some(&[(0, 0)]), 0)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(summary.ticks_run, 0);
        assert!(!summary.stopped_early);
        assert_eq!(summary.final_awake, 1);
    }

    #[test]
    fn test_run_days_resets_between_days() {
        let mut beach = Beach::new(BeachParams::new(3, 3, Tier::Soreness).with_excitement_threshold(1)).unwrap();
        let plan = DayPlan {
            trigger: vec![(0, 0)],
            iterations: 2,
            days: 3,
        };

        let days = Driver::new(&mut beach).run_days(&plan).unwrap();

        assert_eq!(days.len(), 3);
        assert_eq!(beach.day(), 2);
        assert_eq!(days[0].ticks_run, 2);
    }

    #[test]
    fn test_animate_propagates_trigger_errors() {
        let mut beach = Beach::new(BeachParams::new(2, 2, Tier::Smell)).unwrap();
        let result = Driver::new(&mut beach).animate(Some(&[(5, 5)]), 3);
        assert!(matches!(result, Err(BeachError::OutOfBounds { .. })));
    }
}
