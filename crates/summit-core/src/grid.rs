//! The screen [`Grid`] of [`Glyph`]s and frame diffing.
//!
//! Models draw into a `Grid` every update; the app loop diffs it against
//! the previous grid with [`compute_frame`] and hands only the changed
//! positions to the driver.

use crate::geom::{Point, Range};
use crate::glyph::Glyph;
use crate::style::Style;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 2D screen buffer of [`Glyph`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    glyphs: Vec<Glyph>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with blank glyphs.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            glyphs: vec![Glyph::default(); bounds.len()],
            bounds,
        }
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Read the glyph at `p`. Returns `Glyph::default()` outside bounds.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op if `p` is outside bounds.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every position with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` starting at `p`, one glyph per `char`, clipped to the
    /// current line. Returns the number of glyphs written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.contains(q) {
                break;
            }
            self.set(q, Glyph::new(ch).with_style(style));
            written += 1;
        }
        written
    }

    /// Row-major iterator over `(Point, Glyph)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Glyph)> + '_ {
        self.bounds.iter().zip(self.glyphs.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single position that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Point,
}

/// A set of glyph changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two grids.
///
/// Positions of `curr` outside `prev` always count as changed.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    let cells = curr
        .iter()
        .filter(|&(p, g)| !prev.contains(p) || prev.at(p) != g)
        .map(|(pos, glyph)| FrameCell { glyph, pos })
        .collect();
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(4, 3);
        assert_eq!((g.width(), g.height()), (4, 3));
        assert_eq!(g.at(Point::new(0, 0)), Glyph::default());
    }

    #[test]
    fn grid_set_and_get() {
        let mut g = Grid::new(4, 3);
        g.set(Point::new(2, 1), Glyph::new('X'));
        assert_eq!(g.at(Point::new(2, 1)).ch, 'X');
        // out of bounds is ignored on write and blank on read
        g.set(Point::new(10, 10), Glyph::new('Y'));
        assert_eq!(g.at(Point::new(10, 10)), Glyph::default());
    }

    #[test]
    fn grid_fill() {
        let mut g = Grid::new(3, 2);
        g.fill(Glyph::new('.'));
        assert!(g.iter().all(|(_, glyph)| glyph.ch == '.'));
        assert_eq!(g.iter().count(), 6);
    }

    #[test]
    fn print_clips_to_line() {
        let mut g = Grid::new(5, 2);
        let n = g.print(Point::new(2, 1), "abcdef", Style::DEFAULT);
        assert_eq!(n, 3);
        assert_eq!(g.at(Point::new(4, 1)).ch, 'c');
        assert_eq!(g.at(Point::new(0, 1)).ch, ' ');
    }

    #[test]
    fn compute_frame_diff() {
        let a = Grid::new(3, 2);
        let mut b = Grid::new(3, 2);
        b.set(Point::new(1, 0), Glyph::new('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));
        assert_eq!(frame.cells[0].glyph.ch, 'A');
    }

    #[test]
    fn compute_frame_against_smaller_grid() {
        let a = Grid::new(1, 1);
        let b = Grid::new(2, 1);
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.cells.len(), 1);
        assert_eq!(frame.cells[0].pos, Point::new(1, 0));
    }
}
