//! Lowest-cost paths over weighted cells.

use rime_core::{CellState, ConfigError, Coord, SearchError};
use rime_space::{Connectivity, Grid};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Minimum total cost from `start` to `goal`, where entering a
/// [`CellState::Value`] cell costs its value. Other cells are impassable.
/// The start cell's own value is not counted.
pub fn lowest_total_risk(
    grid: &Grid<CellState>,
    start: &Coord,
    goal: &Coord,
    connectivity: Connectivity,
) -> Result<u64, SearchError> {
    if connectivity.ndim() != grid.ndim() {
        return Err(ConfigError::InvalidSearch {
            reason: format!(
                "{} connectivity cannot search a {}D grid",
                connectivity.name(),
                grid.ndim()
            ),
        }
        .into());
    }
    let from = grid.index_of(start)?;
    let to = grid.index_of(goal)?;
    if from == to {
        return Ok(0);
    }

    let mut dist = vec![u64::MAX; grid.cell_count()];
    dist[from] = 0;

    // Min-heap on (cost, rank); rank breaks ties deterministically.
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, rank))) = heap.pop() {
        if rank == to {
            return Ok(cost);
        }
        // Skip stale heap entries.
        if cost > dist[rank] {
            continue;
        }
        for nb in grid.neighbours(&grid.coord_at(rank), connectivity)? {
            let Some(weight) = grid.get(&nb)?.value() else {
                continue;
            };
            let next = grid.index_of(&nb)?;
            let new_cost = cost.saturating_add(weight as u64);
            if new_cost < dist[next] {
                dist[next] = new_cost;
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    Err(SearchError::Unreachable {
        start: start.clone(),
        goal: goal.clone(),
        bound: grid.cell_count() as u64,
    })
}
