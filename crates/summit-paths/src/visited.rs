use std::collections::HashMap;

use summit_core::Point;

use crate::entry::SearchEntry;

/// The cells a search has expanded, with the distance each was reached at.
///
/// The set only grows. Insertion order is kept, so callers can take a
/// [`mark`](Self::mark) and later ask for everything added
/// [`since`](Self::since) then.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    index: HashMap<Point, u32>,
    order: Vec<SearchEntry>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entry`'s cell. Returns `false`, leaving the set unchanged, if
    /// the cell was already present.
    pub fn insert(&mut self, entry: SearchEntry) -> bool {
        if self.index.contains_key(&entry.pos) {
            return false;
        }
        self.index.insert(entry.pos, entry.distance);
        self.order.push(entry);
        true
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index.contains_key(&p)
    }

    /// Distance at which `p` was visited.
    #[inline]
    pub fn distance(&self, p: Point) -> Option<u32> {
        self.index.get(&p).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// A position in the visit history to pass to [`since`](Self::since).
    #[inline]
    pub fn mark(&self) -> usize {
        self.order.len()
    }

    /// Entries added after `mark`, oldest first. An out-of-date mark past
    /// the end yields an empty slice.
    pub fn since(&self, mark: usize) -> &[SearchEntry] {
        self.order.get(mark..).unwrap_or_default()
    }

    /// All entries in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, SearchEntry> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a VisitedSet {
    type Item = &'a SearchEntry;
    type IntoIter = std::slice::Iter<'a, SearchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
