use std::collections::VecDeque;

use summit_core::{Point, Range};

use crate::terrain::{Terrain, can_climb};

/// Sentinel distance for cells a [`DistanceMap`] never reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// Step counts from a set of sources to every reachable cell, under the
/// same climbing rule as [`Stepper`](crate::Stepper).
#[derive(Clone, Debug)]
pub struct DistanceMap {
    bounds: Range,
    dist: Vec<u32>,
    reached: usize,
}

impl DistanceMap {
    /// Distance to `p`, or [`UNREACHABLE`] if `p` was not reached or lies
    /// outside the map.
    pub fn at(&self, p: Point) -> u32 {
        match self.idx(p) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    /// Number of cells reached, sources included.
    #[inline]
    pub fn reached(&self) -> usize {
        self.reached
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.bounds.width() as usize + x)
    }
}

/// Compute a multi-source breadth-first distance map in one go.
///
/// Sources outside the terrain are ignored. Unlike the [`Stepper`], cells
/// are marked when queued, so every cell is queued at most once.
///
/// [`Stepper`]: crate::Stepper
pub fn distance_map<T: Terrain + ?Sized>(terrain: &T, sources: &[Point]) -> DistanceMap {
    let bounds = terrain.bounds();
    let mut map = DistanceMap {
        bounds,
        dist: vec![UNREACHABLE; bounds.len()],
        reached: 0,
    };
    let mut queue: VecDeque<Point> = VecDeque::new();

    for &src in sources {
        if let Some(si) = map.idx(src) {
            if map.dist[si] != UNREACHABLE {
                continue;
            }
            map.dist[si] = 0;
            map.reached += 1;
            queue.push_back(src);
        }
    }

    while let Some(cp) = queue.pop_front() {
        let Some(ci) = map.idx(cp) else {
            continue;
        };
        let current = map.dist[ci];
        let here = terrain.height(cp);
        for np in terrain.neighbors(cp) {
            if !can_climb(terrain, here, np) {
                continue;
            }
            let Some(ni) = map.idx(np) else {
                continue;
            };
            if map.dist[ni] != UNREACHABLE {
                continue;
            }
            map.dist[ni] = current + 1;
            map.reached += 1;
            queue.push_back(np);
        }
    }

    map
}
