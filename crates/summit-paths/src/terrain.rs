use summit_core::{Point, Range};

/// Largest permitted ascent between two adjacent cells. Descents are
/// unconstrained.
pub const MAX_CLIMB: i32 = 1;

/// Elevation lookup over a rectangular area.
///
/// This is the seam the searches in this crate run against; [`HeightMap`]
/// is the implementation loaded from puzzle input.
///
/// [`HeightMap`]: crate::HeightMap
pub trait Terrain {
    /// The rectangle of valid coordinates.
    fn bounds(&self) -> Range;

    /// Elevation at `p`. Only defined for points inside [`bounds`](Self::bounds);
    /// callers check bounds first.
    fn height(&self, p: Point) -> i32;

    /// Whether `p` lies on the map.
    #[inline]
    fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Candidate moves from `p`: north, south, east, west, without bounds
    /// filtering.
    #[inline]
    fn neighbors(&self, p: Point) -> [Point; 4] {
        p.cardinal()
    }
}

/// Whether a walker standing at elevation `from_height` may step onto `to`.
#[inline]
pub(crate) fn can_climb<T: Terrain + ?Sized>(terrain: &T, from_height: i32, to: Point) -> bool {
    terrain.contains(to) && terrain.height(to) - from_height <= MAX_CLIMB
}
