use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use summit_core::Point;

/// A cell reached by the search, together with the number of steps taken
/// to reach it.
///
/// Identity is the cell alone: two entries for the same point compare
/// equal and hash alike whatever their distances, so an entry can stand in
/// for its [`Point`] in sets and maps.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchEntry {
    pub pos: Point,
    pub distance: u32,
}

impl SearchEntry {
    #[inline]
    pub const fn new(pos: Point, distance: u32) -> Self {
        Self { pos, distance }
    }

    /// An entry for a search source.
    #[inline]
    pub const fn source(pos: Point) -> Self {
        Self::new(pos, 0)
    }

    /// The entry one step further on, at `pos`.
    #[inline]
    pub const fn step_to(self, pos: Point) -> Self {
        Self::new(pos, self.distance + 1)
    }
}

impl PartialEq for SearchEntry {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for SearchEntry {}

impl Hash for SearchEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl Borrow<Point> for SearchEntry {
    #[inline]
    fn borrow(&self) -> &Point {
        &self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn distance_does_not_affect_identity() {
        let near = SearchEntry::new(Point::new(3, 4), 2);
        let far = SearchEntry::new(Point::new(3, 4), 31);
        assert_eq!(near, far);

        let mut set = HashSet::new();
        assert!(set.insert(near));
        assert!(!set.insert(far));
        assert_eq!(set.len(), 1);
        // The first recorded distance is the one kept.
        assert_eq!(set.get(&Point::new(3, 4)).map(|e| e.distance), Some(2));
    }

    #[test]
    fn lookup_by_point() {
        let set: HashSet<SearchEntry> = [SearchEntry::source(Point::new(1, 1))].into();
        assert!(set.contains(&Point::new(1, 1)));
        assert!(!set.contains(&Point::new(1, 2)));
    }

    #[test]
    fn different_cells_differ() {
        let a = SearchEntry::new(Point::new(0, 0), 5);
        let b = SearchEntry::new(Point::new(0, 1), 5);
        assert_ne!(a, b);
    }

    #[test]
    fn step_to_adds_one() {
        let e = SearchEntry::source(Point::ZERO).step_to(Point::new(0, 1));
        assert_eq!(e.pos, Point::new(0, 1));
        assert_eq!(e.distance, 1);
    }
}
