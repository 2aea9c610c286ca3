use std::collections::VecDeque;

use crate::entry::SearchEntry;

/// FIFO queue of entries waiting to be expanded.
///
/// Insertion order is visiting order. The same cell may be queued more than
/// once; stale copies are dropped when dequeued.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    queue: VecDeque<SearchEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `entry` at the back.
    #[inline]
    pub fn push(&mut self, entry: SearchEntry) {
        self.queue.push_back(entry);
    }

    /// Take the entry at the front.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchEntry> {
        self.queue.pop_front()
    }

    /// The entry [`pop`](Self::pop) would return next.
    #[inline]
    pub fn peek(&self) -> Option<&SearchEntry> {
        self.queue.front()
    }

    /// Number of queued entries, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Queued entries, front first.
    pub fn iter(&self) -> impl Iterator<Item = &SearchEntry> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summit_core::Point;

    #[test]
    fn first_in_first_out() {
        let mut f = Frontier::new();
        f.push(SearchEntry::new(Point::new(0, 0), 0));
        f.push(SearchEntry::new(Point::new(1, 0), 1));
        f.push(SearchEntry::new(Point::new(2, 0), 1));
        assert_eq!(f.peek().map(|e| e.pos), Some(Point::new(0, 0)));
        let order: Vec<_> = std::iter::from_fn(|| f.pop()).map(|e| e.pos.x).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert!(f.is_empty());
        assert!(f.pop().is_none());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut f = Frontier::new();
        f.push(SearchEntry::new(Point::new(4, 4), 3));
        f.push(SearchEntry::new(Point::new(4, 4), 5));
        assert_eq!(f.len(), 2);
        let distances: Vec<_> = f.iter().map(|e| e.distance).collect();
        assert_eq!(distances, vec![3, 5]);
        f.clear();
        assert!(f.is_empty());
    }
}
