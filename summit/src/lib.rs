//! **summit**: watch a budgeted breadth-first search climb an elevation
//! map, one tick at a time.
//!
//! The library holds the viewer model and the headless runner so both can
//! be tested without a terminal; `main.rs` wires them to the CLI.

pub mod colors;
pub mod config;
pub mod model;
pub mod report;

pub use config::{HikeConfig, MAX_BUDGET, SearchMode};
pub use model::HikeModel;
pub use report::{Report, run_headless};
