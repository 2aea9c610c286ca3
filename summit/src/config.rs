//! Run configuration shared by the terminal view and the headless report.

use std::fmt;
use std::time::Duration;

use summit_paths::{HeightMap, Stepper};

/// Largest per-tick budget reachable with the `+` key.
pub const MAX_BUDGET: usize = 1 << 16;

/// Which cells the search starts from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// From the `S` marker only.
    #[default]
    FromStart,
    /// From every cell at the lowest elevation at once.
    AnyLowest,
}

impl SearchMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::FromStart => Self::AnyLowest,
            Self::AnyLowest => Self::FromStart,
        }
    }

    /// A fresh search over `map` in this mode.
    pub fn stepper(self, map: &HeightMap) -> Stepper {
        match self {
            Self::FromStart => Stepper::new(map.start(), map.end()),
            Self::AnyLowest => Stepper::from_sources(map.lowest_cells(), map.end()),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromStart => f.write_str("from S"),
            Self::AnyLowest => f.write_str("from any a"),
        }
    }
}

/// Settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HikeConfig {
    /// Cells visited per tick. Clamped to `1..=MAX_BUDGET` on use.
    pub budget: usize,
    /// Interval between ticks in the terminal view.
    pub tick: Duration,
    pub mode: SearchMode,
    /// Start the terminal view paused.
    pub paused: bool,
}

impl HikeConfig {
    /// The budget, clamped to `1..=MAX_BUDGET`.
    pub fn budget(&self) -> usize {
        self.budget.clamp(1, MAX_BUDGET)
    }
}

impl Default for HikeConfig {
    fn default() -> Self {
        Self {
            budget: 1,
            tick: Duration::from_millis(16),
            mode: SearchMode::FromStart,
            paused: false,
        }
    }
}
