//! **summit-core**: grid geometry, styled glyphs and the tick-driven
//! application loop shared by the summit crates.
//!
//! This crate provides the foundational types: geometry primitives, styled
//! glyphs, a diffable screen grid, input messages, and the Elm-architecture
//! application loop that drivers and models plug into.

pub mod app;
pub mod geom;
pub mod glyph;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use geom::{Point, Range};
pub use glyph::Glyph;
pub use grid::{Frame, FrameCell, Grid};
pub use messages::{Key, ModMask, Msg};
pub use style::{AttrMask, Color, Style};
