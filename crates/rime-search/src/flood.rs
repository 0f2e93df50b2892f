//! Static breadth-first analyses: step counts, flood fill, surface area.

use rime_core::{CellState, ConfigError, Coord, SearchError};
use rime_space::{Connectivity, Grid};
use std::collections::VecDeque;

/// Fewest moves from any of `starts` to `goal`.
///
/// A move from `a` to neighbour `b` is allowed when `can_step(a, b)`.
/// Fails with [`ConfigError::InvalidSearch`] if `starts` is empty and
/// with [`SearchError::Unreachable`] if no start reaches the goal.
pub fn shortest_steps<F>(
    grid: &Grid<CellState>,
    starts: &[Coord],
    goal: &Coord,
    connectivity: Connectivity,
    mut can_step: F,
) -> Result<u64, SearchError>
where
    F: FnMut(&CellState, &CellState) -> bool,
{
    let Some(first) = starts.first() else {
        return Err(ConfigError::InvalidSearch {
            reason: "no start cells".into(),
        }
        .into());
    };
    let target = grid.index_of(goal)?;
    let mut dist: Vec<Option<u64>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();
    for s in starts {
        let r = grid.index_of(s)?;
        if dist[r].is_none() {
            dist[r] = Some(0);
            queue.push_back(r);
        }
    }
    while let Some(r) = queue.pop_front() {
        let d = dist[r].unwrap_or_default();
        if r == target {
            return Ok(d);
        }
        let here = grid.coord_at(r);
        let from = grid.cells()[r];
        for nb in grid.neighbours(&here, connectivity)? {
            let n = grid.index_of(&nb)?;
            if dist[n].is_some() || !can_step(&from, &grid.cells()[n]) {
                continue;
            }
            dist[n] = Some(d + 1);
            queue.push_back(n);
        }
    }
    Err(SearchError::Unreachable {
        start: first.clone(),
        goal: goal.clone(),
        bound: grid.cell_count() as u64,
    })
}

/// Cells reachable from `seeds` through cells where `passable` holds.
/// Seeds that are not passable are ignored.
pub fn flood_fill<T>(
    grid: &Grid<T>,
    seeds: &[Coord],
    connectivity: Connectivity,
    mut passable: impl FnMut(&T) -> bool,
) -> Result<Grid<bool>, SearchError> {
    let mut reached = grid.map(|_| false);
    let mut queue = VecDeque::new();
    for s in seeds {
        let r = grid.index_of(s)?;
        if !reached.cells()[r] && passable(&grid.cells()[r]) {
            reached.cells_mut()[r] = true;
            queue.push_back(r);
        }
    }
    while let Some(r) = queue.pop_front() {
        for nb in grid.neighbours(&grid.coord_at(r), connectivity)? {
            let n = grid.index_of(&nb)?;
            if !reached.cells()[n] && passable(&grid.cells()[n]) {
                reached.cells_mut()[n] = true;
                queue.push_back(n);
            }
        }
    }
    Ok(reached)
}

/// Count faces of solid cells (walls or occupied) that are exposed.
///
/// A face is exposed when the cell across it is outside the grid or not
/// solid; with `exterior_only`, a non-solid cell only counts if it can be
/// reached from the grid boundary without crossing a solid cell. Works on
/// 3-D grids (6 faces per cell) and 2-D grids (4 edges per cell).
pub fn surface_area(grid: &Grid<CellState>, exterior_only: bool) -> Result<u64, SearchError> {
    let connectivity = match grid.ndim() {
        3 => Connectivity::Orthogonal6,
        _ => Connectivity::Orthogonal4,
    };
    let outside = if exterior_only {
        let boundary: Vec<Coord> = grid
            .extent()
            .canonical_ordering()
            .into_iter()
            .filter(|c| on_boundary(grid, c))
            .collect();
        Some(flood_fill(grid, &boundary, connectivity, |c| !c.is_solid())?)
    } else {
        None
    };

    let mut faces = 0u64;
    for (coord, cell) in grid.iter() {
        if !cell.is_solid() {
            continue;
        }
        for off in connectivity.offsets() {
            let exposed = match grid.step(&coord, off)? {
                None => true,
                Some(nb) => match &outside {
                    Some(mask) => *mask.get(&nb)?,
                    None => !grid.get(&nb)?.is_solid(),
                },
            };
            faces += exposed as u64;
        }
    }
    Ok(faces)
}

fn on_boundary<T>(grid: &Grid<T>, c: &Coord) -> bool {
    let extent = grid.extent();
    c.iter()
        .enumerate()
        .any(|(axis, &v)| v == 0 || v == extent.axis_len(axis) as i32 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rime_core::{coord2, coord3};
    use rime_space::EdgeBehavior;

    #[test]
    fn single_cube_has_six_faces() {
        let mut g = Grid::create_3d(3, 3, 3, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        g.set(&coord3(1, 1, 1), CellState::Occupied).unwrap();
        assert_eq!(surface_area(&g, false), Ok(6));
        assert_eq!(surface_area(&g, true), Ok(6));
    }

    #[test]
    fn two_adjacent_cubes_share_a_face() {
        let mut g = Grid::create_3d(4, 3, 3, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        g.set(&coord3(1, 1, 1), CellState::Occupied).unwrap();
        g.set(&coord3(2, 1, 1), CellState::Occupied).unwrap();
        assert_eq!(surface_area(&g, false), Ok(10));
    }

    #[test]
    fn cube_touching_boundary_counts_outer_face() {
        let g = Grid::create_3d(1, 1, 1, EdgeBehavior::Absorb, CellState::Occupied).unwrap();
        assert_eq!(surface_area(&g, true), Ok(6));
    }

    #[test]
    fn enclosed_hole_is_interior() {
        // 2-D ring of walls around one empty cell.
        let mut g = Grid::create_2d(5, 5, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            g.set(&coord2(x, y), CellState::Wall).unwrap();
        }
        let total = surface_area(&g, false).unwrap();
        let exterior = surface_area(&g, true).unwrap();
        assert_eq!(total - exterior, 4);
        assert_eq!(exterior, 12);
    }

    #[test]
    fn flood_fill_stops_at_walls() {
        let mut g = Grid::create_2d(3, 1, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        g.set(&coord2(1, 0), CellState::Wall).unwrap();
        let reached =
            flood_fill(&g, &[coord2(0, 0)], Connectivity::Orthogonal4, |c| c.is_open()).unwrap();
        assert_eq!(reached.cells(), &[true, false, false]);
    }

    #[test]
    fn shortest_steps_respects_predicate() {
        let g = Grid::from_cells(
            rime_space::Extent::new_2d(4, 1).unwrap(),
            EdgeBehavior::Absorb,
            [0, 1, 3, 4].map(CellState::Value).to_vec(),
        )
        .unwrap();
        let climb = |a: &CellState, b: &CellState| {
            b.value().unwrap_or(u32::MAX) <= a.value().unwrap_or(0) + 1
        };
        assert!(matches!(
            shortest_steps(&g, &[coord2(0, 0)], &coord2(3, 0), Connectivity::Orthogonal4, climb),
            Err(SearchError::Unreachable { .. })
        ));
        assert_eq!(
            shortest_steps(
                &g,
                &[coord2(0, 0), coord2(2, 0)],
                &coord2(3, 0),
                Connectivity::Orthogonal4,
                climb,
            ),
            Ok(1)
        );
        assert!(matches!(
            shortest_steps(&g, &[], &coord2(3, 0), Connectivity::Orthogonal4, climb),
            Err(SearchError::Config(_))
        ));
    }
}
