//! Headless runs: drive the search to the end without a terminal.

use std::fmt;

use summit_paths::{HeightMap, SearchState, UNREACHABLE, distance_map};

use crate::config::{HikeConfig, SearchMode};

/// Outcome of a headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub columns: i32,
    pub rows: i32,
    pub mode: SearchMode,
    pub budget: usize,
    pub state: SearchState,
    pub goal_distance: Option<u32>,
    pub visited: usize,
    /// Calls to `step` until the search finished.
    pub ticks: u64,
}

/// Run the configured search to completion, one budgeted step per tick.
pub fn run_headless(map: &HeightMap, config: &HikeConfig) -> Report {
    let budget = config.budget();
    let mut stepper = config.mode.stepper(map);
    let mut ticks = 0;
    while !stepper.step(map, budget).is_terminal() {
        ticks += 1;
    }
    ticks += 1;

    // Cross-check against a one-shot flood from the same sources.
    let expected = distance_map(map, stepper.sources()).at(map.end());
    if stepper.goal_distance().unwrap_or(UNREACHABLE) != expected {
        log::warn!(
            "stepped search found {:?}, full flood found {}",
            stepper.goal_distance(),
            expected
        );
    }

    Report {
        columns: map.columns(),
        rows: map.rows(),
        mode: config.mode,
        budget,
        state: stepper.state(),
        goal_distance: stepper.goal_distance(),
        visited: stepper.visited().len(),
        ticks,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} map, {}: ", self.columns, self.rows, self.mode)?;
        match self.goal_distance {
            Some(d) => write!(f, "summit in {d} steps")?,
            None => f.write_str("no route found")?,
        }
        write!(
            f,
            " ({} cells visited over {} ticks of {})",
            self.visited, self.ticks, self.budget
        )
    }
}
