//! Elevation maps parsed from puzzle text.
//!
//! Each line of the input is a row and each character a cell: `a` is the
//! lowest elevation and `z` the highest. `S` marks the start (elevation of
//! `a`) and `E` the destination (elevation of `z`).

use std::fs;
use std::path::Path;

use summit_core::{Point, Range};

use crate::error::{MapError, Marker};
use crate::terrain::Terrain;

/// Elevation of `a` and of the start marker.
pub const LOWEST: i32 = 0;
/// Elevation of `z` and of the end marker.
pub const HIGHEST: i32 = 25;

/// Elevation encoded by a validated map byte.
#[inline]
const fn elevation(code: u8) -> i32 {
    match code {
        b'S' => LOWEST,
        b'E' => HIGHEST,
        c => (c - b'a') as i32,
    }
}

/// An immutable elevation grid with designated start and end cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    bounds: Range,
    codes: Vec<u8>,
    start: Point,
    end: Point,
}

impl HeightMap {
    /// Parse a map from text.
    ///
    /// Trailing `\r` on each line and trailing blank lines are ignored. All
    /// rows must have the same width, and `S` and `E` must each appear
    /// exactly once.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let rows = read_rows(s)?;
        let start = rows.start.ok_or(MapError::MissingMarker(Marker::Start))?;
        let end = rows.end.ok_or(MapError::MissingMarker(Marker::End))?;
        Ok(Self::assemble(rows, start, end))
    }

    /// Build a map from rows of plain elevation codes, placing the endpoints
    /// by coordinate instead of by marker. `start` and `end` may coincide.
    ///
    /// The start cell takes the lowest elevation and the end cell the
    /// highest, as if they carried `S` and `E`.
    pub fn from_rows(s: &str, start: Point, end: Point) -> Result<Self, MapError> {
        let mut rows = read_rows(s)?;
        for (marker, found) in [(Marker::Start, rows.start), (Marker::End, rows.end)] {
            if let Some(pos) = found {
                return Err(MapError::MarkerInText { marker, pos });
            }
        }
        let bounds = rows.bounds();
        for (marker, pos) in [(Marker::Start, start), (Marker::End, end)] {
            if !bounds.contains(pos) {
                return Err(MapError::MarkerOffMap { marker, pos });
            }
        }
        let width = bounds.width();
        rows.codes[(end.y * width + end.x) as usize] = b'E';
        // A shared cell keeps `S` so that it reads as the lowest point.
        rows.codes[(start.y * width + start.x) as usize] = b'S';
        Ok(Self::assemble(rows, start, end))
    }

    fn assemble(rows: Rows, start: Point, end: Point) -> Self {
        let map = Self {
            bounds: rows.bounds(),
            codes: rows.codes,
            start,
            end,
        };
        log::debug!(
            "loaded {}x{} height map, start {} end {}",
            map.columns(),
            map.rows(),
            start,
            end
        );
        map
    }

    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows. [`Terrain::height`] is the per-cell elevation.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// The cell marked `S`.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The cell marked `E`.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        debug_assert!(self.bounds.contains(p), "{p} is off the map");
        (p.y * self.bounds.width() + p.x) as usize
    }

    /// The character the map file has at `p`. In-bounds points only.
    #[inline]
    pub fn marker(&self, p: Point) -> char {
        self.codes[self.index(p)] as char
    }

    /// Every cell at the lowest elevation, in row-major order. Includes the
    /// start cell.
    pub fn lowest_cells(&self) -> Vec<Point> {
        self.bounds
            .iter()
            .filter(|&p| self.height(p) == LOWEST)
            .collect()
    }

    /// Elevation as a fraction of the full range, 0.0 at `a` and 1.0 at `z`.
    #[inline]
    pub fn relative_height(&self, p: Point) -> f32 {
        (self.height(p) - LOWEST) as f32 / (HIGHEST - LOWEST) as f32
    }
}

impl Terrain for HeightMap {
    #[inline]
    fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    fn height(&self, p: Point) -> i32 {
        elevation(self.codes[self.index(p)])
    }
}

/// Validated map text before the endpoints are settled.
struct Rows {
    codes: Vec<u8>,
    width: usize,
    height: usize,
    start: Option<Point>,
    end: Option<Point>,
}

impl Rows {
    fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }
}

fn read_rows(s: &str) -> Result<Rows, MapError> {
    let mut lines: Vec<&str> = s.lines().collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(MapError::Empty);
    }

    let mut rows = Rows {
        codes: Vec::with_capacity(lines.iter().map(|l| l.len()).sum()),
        width: 0,
        height: lines.len(),
        start: None,
        end: None,
    };

    for (y, line) in lines.iter().enumerate() {
        let mut x = 0;
        for ch in line.chars() {
            let pos = Point::new(x as i32, y as i32);
            match ch {
                'a'..='z' => {}
                'S' => note_marker(&mut rows.start, Marker::Start, pos)?,
                'E' => note_marker(&mut rows.end, Marker::End, pos)?,
                _ => return Err(MapError::InvalidCode { ch, pos }),
            }
            rows.codes.push(ch as u8);
            x += 1;
        }
        if y == 0 {
            rows.width = x;
        } else if x != rows.width {
            return Err(MapError::Ragged {
                line: y + 1,
                expected: rows.width,
                found: x,
            });
        }
    }
    if rows.width == 0 {
        return Err(MapError::Empty);
    }
    Ok(rows)
}

fn note_marker(slot: &mut Option<Point>, marker: Marker, pos: Point) -> Result<(), MapError> {
    match *slot {
        Some(first) => Err(MapError::DuplicateMarker { marker, first, pos }),
        None => {
            *slot = Some(pos);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi
";

    #[test]
    fn parses_dimensions_and_markers() {
        let map = HeightMap::parse(SAMPLE).unwrap();
        assert_eq!(map.columns(), 8);
        assert_eq!(map.rows(), 5);
        assert_eq!(map.start(), Point::new(0, 0));
        assert_eq!(map.end(), Point::new(5, 2));
        assert_eq!(map.bounds(), Range::new(0, 0, 8, 5));
    }

    #[test]
    fn markers_map_to_extreme_elevations() {
        let map = HeightMap::parse(SAMPLE).unwrap();
        assert_eq!(map.height(map.start()), 0);
        assert_eq!(map.height(map.end()), 25);
        assert_eq!(map.height(Point::new(1, 0)), 0); // 'a'
        assert_eq!(map.height(Point::new(2, 0)), 1); // 'b'
        assert_eq!(map.height(Point::new(3, 1)), 17); // 'r'
        assert_eq!(map.marker(map.end()), 'E');
        assert_eq!(map.relative_height(map.end()), 1.0);
        assert_eq!(map.relative_height(map.start()), 0.0);
    }

    #[test]
    fn single_cell_can_hold_both_markers_only_once() {
        let err = HeightMap::parse("S").unwrap_err();
        assert!(matches!(err, MapError::MissingMarker(Marker::End)));
        let map = HeightMap::parse("SE").unwrap();
        assert_eq!(map.start(), Point::new(0, 0));
        assert_eq!(map.end(), Point::new(1, 0));
    }

    #[test]
    fn crlf_and_trailing_blank_lines_are_accepted() {
        let map = HeightMap::parse("Sb\r\naE\r\n\r\n\n").unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.columns(), 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(HeightMap::parse(""), Err(MapError::Empty)));
        assert!(matches!(HeightMap::parse("\n\n"), Err(MapError::Empty)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = HeightMap::parse("Sab\nab\nabE").unwrap_err();
        assert!(matches!(
            err,
            MapError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
        // An interior blank line is a ragged row too.
        assert!(matches!(
            HeightMap::parse("Sa\n\naE"),
            Err(MapError::Ragged { line: 2, .. })
        ));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let err = HeightMap::parse("Sa\na#\naE").unwrap_err();
        match err {
            MapError::InvalidCode { ch, pos } => {
                assert_eq!(ch, '#');
                assert_eq!(pos, Point::new(1, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            HeightMap::parse("SA\naE"),
            Err(MapError::InvalidCode { ch: 'A', .. })
        ));
    }

    #[test]
    fn missing_and_duplicate_markers_are_rejected() {
        assert!(matches!(
            HeightMap::parse("ab\naE"),
            Err(MapError::MissingMarker(Marker::Start))
        ));
        assert!(matches!(
            HeightMap::parse("Sb\naS\nEa"),
            Err(MapError::DuplicateMarker {
                marker: Marker::Start,
                first: Point { x: 0, y: 0 },
                pos: Point { x: 1, y: 1 },
            })
        ));
        assert!(matches!(
            HeightMap::parse("SEE"),
            Err(MapError::DuplicateMarker {
                marker: Marker::End,
                ..
            })
        ));
    }

    #[test]
    fn from_rows_places_endpoints_by_coordinate() {
        let map = HeightMap::from_rows("m", Point::ZERO, Point::ZERO).unwrap();
        assert_eq!(map.start(), map.end());
        assert_eq!(map.height(Point::ZERO), LOWEST);
        assert_eq!(map.marker(Point::ZERO), 'S');

        let map = HeightMap::from_rows("ab\ncd", Point::new(1, 0), Point::new(0, 1)).unwrap();
        assert_eq!(map.height(Point::new(1, 0)), LOWEST);
        assert_eq!(map.height(Point::new(0, 1)), HIGHEST);
        assert_eq!(map.height(Point::new(1, 1)), 3);
    }

    #[test]
    fn from_rows_rejects_text_markers_and_off_map_endpoints() {
        assert!(matches!(
            HeightMap::from_rows("aS", Point::ZERO, Point::ZERO),
            Err(MapError::MarkerInText {
                marker: Marker::Start,
                pos: Point { x: 1, y: 0 },
            })
        ));
        assert!(matches!(
            HeightMap::from_rows("ab\nEc", Point::ZERO, Point::new(1, 1)),
            Err(MapError::MarkerInText {
                marker: Marker::End,
                pos: Point { x: 0, y: 1 },
            })
        ));
        assert!(matches!(
            HeightMap::from_rows("ab", Point::ZERO, Point::new(2, 0)),
            Err(MapError::MarkerOffMap {
                marker: Marker::End,
                ..
            })
        ));
    }

    #[test]
    fn lowest_cells_include_start() {
        let map = HeightMap::parse(SAMPLE).unwrap();
        let low = map.lowest_cells();
        assert_eq!(low.len(), 6);
        assert_eq!(low[0], map.start());
        assert!(low.contains(&Point::new(0, 4)));
        assert!(low.iter().all(|&p| map.height(p) == LOWEST));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = HeightMap::load("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }
}
