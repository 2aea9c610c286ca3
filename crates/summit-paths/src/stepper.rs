//! Resumable breadth-first search with a per-call work budget.

use summit_core::Point;

use crate::entry::SearchEntry;
use crate::frontier::Frontier;
use crate::terrain::{Terrain, can_climb};
use crate::visited::VisitedSet;

/// Where a [`Stepper`] is in its search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Seeded, no step taken yet.
    Initialized,
    /// At least one step taken, frontier not yet settled.
    Running,
    /// The goal was dequeued. Terminal.
    GoalReached,
    /// The frontier ran dry without reaching the goal. Terminal.
    Exhausted,
}

impl SearchState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GoalReached | Self::Exhausted)
    }

    /// Short lowercase label for status lines and logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initialized => "ready",
            Self::Running => "searching",
            Self::GoalReached => "goal reached",
            Self::Exhausted => "no route",
        }
    }
}

/// A breadth-first search from one or more sources towards a goal, advanced
/// a bounded number of cells at a time.
///
/// Each call to [`step`](Self::step) expands at most `budget` new cells and
/// then returns, keeping the frontier and visited set for the next call.
/// The outcome does not depend on the budgets used: only the number of
/// calls needed to get there does.
#[derive(Clone, Debug)]
pub struct Stepper {
    sources: Vec<Point>,
    goal: Point,
    frontier: Frontier,
    visited: VisitedSet,
    state: SearchState,
    goal_distance: Option<u32>,
}

impl Stepper {
    /// A search from `start` to `goal`.
    pub fn new(start: Point, goal: Point) -> Self {
        Self::from_sources([start], goal)
    }

    /// A search from every point of `sources` at once, all at distance 0.
    /// The goal distance is then the fewest steps from any source.
    pub fn from_sources(sources: impl IntoIterator<Item = Point>, goal: Point) -> Self {
        let mut stepper = Self {
            sources: sources.into_iter().collect(),
            goal,
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            state: SearchState::Initialized,
            goal_distance: None,
        };
        stepper.seed();
        stepper
    }

    /// Discard all progress and start over from the same sources.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.visited = VisitedSet::new();
        self.state = SearchState::Initialized;
        self.goal_distance = None;
        self.seed();
    }

    fn seed(&mut self) {
        for &p in &self.sources {
            self.frontier.push(SearchEntry::source(p));
        }
        log::debug!(
            "search seeded from {} source(s) towards {}",
            self.sources.len(),
            self.goal
        );
    }

    /// Expand up to `budget` not-yet-visited cells.
    ///
    /// Dropping a stale frontier entry for an already visited cell, or a
    /// source outside the terrain, costs nothing. The goal is checked before a cell is marked visited, so the
    /// goal never enters the visited set. A zero budget, or a search that
    /// has already finished, returns the current state untouched.
    pub fn step<T: Terrain + ?Sized>(&mut self, terrain: &T, budget: usize) -> SearchState {
        if self.state.is_terminal() || budget == 0 {
            return self.state;
        }
        self.state = SearchState::Running;

        let mark = self.visited.mark();
        let mut expanded = 0;
        while expanded < budget {
            let Some(entry) = self.frontier.pop() else {
                self.state = SearchState::Exhausted;
                log::info!(
                    "no route to {} after visiting {} cells",
                    self.goal,
                    self.visited.len()
                );
                return self.state;
            };
            if self.visited.contains(entry.pos) || !terrain.contains(entry.pos) {
                continue;
            }
            if entry.pos == self.goal {
                self.state = SearchState::GoalReached;
                self.goal_distance = Some(entry.distance);
                self.frontier.clear();
                log::info!(
                    "reached {} in {} steps after visiting {} cells",
                    self.goal,
                    entry.distance,
                    self.visited.len()
                );
                return self.state;
            }

            let here = terrain.height(entry.pos);
            for next in terrain.neighbors(entry.pos) {
                if can_climb(terrain, here, next) {
                    self.frontier.push(entry.step_to(next));
                }
            }
            self.visited.insert(entry);
            expanded += 1;
        }

        log::trace!(
            "step visited {} cells ({} total, {} queued)",
            self.visited.since(mark).len(),
            self.visited.len(),
            self.frontier.len()
        );
        self.state
    }

    /// Step with an unlimited budget until the search finishes.
    pub fn run_to_end<T: Terrain + ?Sized>(&mut self, terrain: &T) -> SearchState {
        self.step(terrain, usize::MAX)
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Steps from the nearest source to the goal, once reached.
    #[inline]
    pub fn goal_distance(&self) -> Option<u32> {
        self.goal_distance
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn sources(&self) -> &[Point] {
        &self.sources
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[inline]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }
}
