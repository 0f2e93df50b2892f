//! Strongly-typed identifiers and the [`Coord`] type alias.

use smallvec::{smallvec, SmallVec};
use std::fmt;

/// A coordinate on a lattice.
///
/// `[x, y]` for 2D grids, `[x, y, z]` for 3D grids. Uses
/// `SmallVec<[i32; 4]>` so coordinates never touch the heap. Equality,
/// ordering and hashing are by value.
pub type Coord = SmallVec<[i32; 4]>;

/// Build a 2D coordinate.
pub fn coord2(x: i32, y: i32) -> Coord {
    smallvec![x, y]
}

/// Build a 3D coordinate.
pub fn coord3(x: i32, y: i32, z: i32) -> Coord {
    smallvec![x, y, z]
}

/// L1 distance between two coordinates of the same dimensionality.
///
/// Extra axes on the longer coordinate are ignored.
pub fn manhattan(a: &Coord, b: &Coord) -> u64 {
    a.iter()
        .zip(b.iter())
        .map(|(&p, &q)| u64::from(p.abs_diff(q)))
        .sum()
}

/// Monotonically increasing tick counter.
///
/// Incremented each time a simulation state is derived from its
/// predecessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a mover within a simulation state.
///
/// Movers never reference each other directly; lookups by position go
/// through an index owned by the driver, keyed back to this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoverId(pub u32);

impl fmt::Display for MoverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MoverId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
