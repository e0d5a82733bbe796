//! Tick and run reports.

use serde::{Deserialize, Serialize};

/// What happened during one successful tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Octopuses that were awake when the tick started
    pub awake_at_start: usize,
    /// Wake-ups caused by tentacle shocks this tick
    pub woken: usize,
    /// Octopuses put to sleep by tiredness
    pub exhausted: usize,
    /// Octopuses that finished recovering
    pub recovered: usize,
    /// Total listener `fire` calls
    pub listener_fires: usize,
    pub smell: u32,
    pub awake_at_end: usize,
}

/// Outcome of a driver run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks_run: u64,
    /// True when the run ended because nobody was awake
    pub stopped_early: bool,
    pub final_smell: u32,
    pub final_awake: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<TickReport>,
}

impl RunSummary {
    /// Total wake-ups across all ticks of the run.
    pub fn total_woken(&self) -> usize {
        self.reports.iter().map(|r| r.woken).sum()
    }

    /// Total exhaustions across all ticks of the run.
    pub fn total_exhausted(&self) -> usize {
        self.reports.iter().map(|r| r.exhausted).sum()
    }

    /// Largest number of simultaneously awake octopuses seen at a tick end.
    pub fn peak_awake(&self) -> usize {
        self.reports.iter().map(|r| r.awake_at_end).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_totals() {
        let summary = RunSummary {
            ticks_run: 2,
            stopped_early: false,
            final_smell: 1,
            final_awake: 1,
            reports: vec![
                TickReport {
                    tick: 1,
                    woken: 3,
                    exhausted: 0,
                    awake_at_end: 4,
                    ..TickReport::default()
                },
                TickReport {
                    tick: 2,
                    woken: 1,
                    exhausted: 4,
                    awake_at_end: 1,
                    ..TickReport::default()
                },
            ],
        };

        assert_eq!(summary.total_woken(), 4);
        assert_eq!(summary.total_exhausted(), 4);
        assert_eq!(summary.peak_awake(), 4);
    }

    #[test]
    fn test_empty_summary_skips_reports_in_json() {
        let summary = RunSummary::default();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("reports"));
        assert_eq!(summary.peak_awake(), 0);
    }
}
