//! Elevation maps and a resumable breadth-first search over them.
//!
//! The search answers the hill-climbing question: how few steps lead from
//! the start to the summit when each step may climb at most one level but
//! descend any number?
//!
//! - [`HeightMap`] parses puzzle text into an immutable elevation grid.
//! - [`Stepper`] runs the search a bounded number of cells per call, so a
//!   front-end can reveal it frame by frame.
//! - [`distance_map`] runs the same search to completion in one go.
//!
//! Searches go through the [`Terrain`] trait, which [`HeightMap`]
//! implements.

mod entry;
mod error;
mod flood;
mod frontier;
mod heightmap;
mod stepper;
mod terrain;
mod visited;

pub use entry::SearchEntry;
pub use error::{MapError, Marker};
pub use flood::{DistanceMap, UNREACHABLE, distance_map};
pub use frontier::Frontier;
pub use heightmap::{HIGHEST, HeightMap, LOWEST};
pub use stepper::{SearchState, Stepper};
pub use terrain::{MAX_CLIMB, Terrain};
pub use visited::VisitedSet;
