//! Errors raised while loading a height map.

use std::fmt;
use std::path::PathBuf;

use summit_core::Point;
use thiserror::Error;

/// One of the two special map markers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    /// `S`, the starting position (elevation `a`).
    Start,
    /// `E`, the best-signal summit (elevation `z`).
    End,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start ('S')"),
            Self::End => write!(f, "end ('E')"),
        }
    }
}

/// Errors that make a map unusable. All of them are fatal at start-up.
#[derive(Debug, Error)]
pub enum MapError {
    /// The map file could not be read.
    #[error("cannot read map {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input contained no rows.
    #[error("map is empty")]
    Empty,

    /// A row's width differs from the first row's.
    #[error("map is not rectangular: line {line} has {found} cells, expected {expected}")]
    Ragged {
        /// 1-based line number.
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A character that is neither `a..=z` nor a marker.
    #[error("invalid elevation code {ch:?} at {pos}")]
    InvalidCode { ch: char, pos: Point },

    /// No cell carries the given marker.
    #[error("map has no {0} marker")]
    MissingMarker(Marker),

    /// An endpoint given by coordinate lies outside the map.
    #[error("{marker} position {pos} is off the map")]
    MarkerOffMap { marker: Marker, pos: Point },

    /// The text carries a marker although the endpoints were given by
    /// coordinate.
    #[error("{marker} marker at {pos} is not allowed when endpoints are given")]
    MarkerInText { marker: Marker, pos: Point },

    /// A marker appears more than once.
    #[error("map has a second {marker} marker at {pos} (first at {first})")]
    DuplicateMarker {
        marker: Marker,
        first: Point,
        pos: Point,
    },
}
