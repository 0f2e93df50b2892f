//! Grid contract test helpers.
//!
//! Shared by the unit tests of every connectivity / edge combination.

use crate::connectivity::Connectivity;
use crate::grid::Grid;
use indexmap::IndexSet;
use rime_core::{Coord, GridError};

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric<T>(grid: &Grid<T>, conn: Connectivity) {
    for coord in grid.extent().canonical_ordering() {
        for nb in grid.neighbours(&coord, conn).unwrap() {
            let back = grid.neighbours(&nb, conn).unwrap();
            assert!(
                back.contains(&coord),
                "neighbour symmetry violated: {nb:?} in N({coord:?}) but {coord:?} not in N({nb:?})"
            );
        }
    }
}

/// Assert that every neighbour is addressable and the degree is bounded.
pub fn assert_neighbours_in_bounds<T>(grid: &Grid<T>, conn: Connectivity) {
    for coord in grid.extent().canonical_ordering() {
        let nbs = grid.neighbours(&coord, conn).unwrap();
        assert!(nbs.len() <= conn.degree(), "{coord:?} has {} neighbours", nbs.len());
        for nb in &nbs {
            assert!(grid.in_bounds(nb), "{nb:?} (neighbour of {coord:?}) out of bounds");
        }
    }
}

/// Assert that the canonical ordering lists each cell exactly once, in
/// rank order.
pub fn assert_canonical_ordering_complete<T>(grid: &Grid<T>) {
    let ordering = grid.extent().canonical_ordering();
    assert_eq!(ordering.len(), grid.cell_count());
    let unique: IndexSet<&Coord> = ordering.iter().collect();
    assert_eq!(unique.len(), ordering.len(), "canonical ordering has duplicates");
    for (rank, coord) in ordering.iter().enumerate() {
        assert_eq!(grid.index_of(coord), Ok(rank), "rank mismatch at {coord:?}");
    }
}

/// Assert the out-of-bounds contract: absorbing grids reject every
/// coordinate one step past each face; wrapping grids resolve it to the
/// cell on the opposite face.
pub fn assert_edge_contract<T: PartialEq + std::fmt::Debug>(grid: &Grid<T>) {
    let extent = grid.extent();
    for axis in 0..grid.ndim() {
        let len = extent.axis_len(axis) as i32;
        let mut below: Coord = extent.coord_at(0);
        below[axis] = -1;
        let mut above = below.clone();
        above[axis] = len;
        for probe in [&below, &above] {
            match grid.get(probe) {
                Ok(v) => {
                    assert!(grid.is_toroidal(), "{probe:?} accepted on a bounded grid");
                    let folded = grid.normalize(probe).unwrap();
                    assert_eq!(grid.get(&folded), Ok(v));
                }
                Err(GridError::OutOfBounds { .. }) => {
                    assert!(!grid.is_toroidal(), "{probe:?} rejected on a toroidal grid");
                }
                Err(other) => panic!("unexpected error for {probe:?}: {other}"),
            }
        }
    }
}

/// Run every check.
pub fn run_full_compliance<T: PartialEq + std::fmt::Debug>(grid: &Grid<T>, conn: Connectivity) {
    assert_neighbours_symmetric(grid, conn);
    assert_neighbours_in_bounds(grid, conn);
    assert_canonical_ordering_complete(grid);
    assert_edge_contract(grid);
}
