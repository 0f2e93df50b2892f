//! Benchmark profiles for the Rime grid engine.
//!
//! Deterministic, larger-than-example inputs:
//!
//! - [`cascade_profile`]: a field of energy levels with a fixed pattern
//! - [`cave_profile`]: staggered rock shelves under a sand spawn
//! - [`valley_profile`]: a walled valley with drifting obstacles

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rime_core::{coord2, CellState, ConfigError, SimError};
use rime_rules::{DriftRule, FloorMode, Heading, Mover, SettleRule, SimulationState};
use rime_space::{EdgeBehavior, Extent, Grid};

/// Pseudo-random but reproducible value for cell `i`.
fn mix(i: u64) -> u64 {
    i.wrapping_mul(6364136223846793007)
        .wrapping_add(1442695040888963407)
        >> 33
}

/// `width × height` energy levels in `0..=9`.
pub fn cascade_profile(width: u32, height: u32) -> Result<Grid<CellState>, ConfigError> {
    let extent = Extent::new_2d(width, height)?;
    Ok(Grid::from_fn(extent, EdgeBehavior::Absorb, |c| {
        let i = c[1] as u64 * width as u64 + c[0] as u64;
        CellState::Value((mix(i) % 10) as u32)
    }))
}

/// A cave with a shelf every fourth row, each shelf offset from the last,
/// and a sand rule spawning at the top centre.
///
/// With [`FloorMode::Solid`] the pile spreads one column per row, so
/// `width` must be at least `2 * height` or sand leaves through a side.
pub fn cave_profile(
    width: u32,
    height: u32,
    floor: FloorMode,
) -> Result<(Grid<CellState>, SettleRule), ConfigError> {
    let mut grid = Grid::create_2d(width, height, EdgeBehavior::Absorb, CellState::Empty)?;
    for y in (4..height as i32).step_by(4) {
        let start = (mix(y as u64) % (width as u64 / 2).max(1)) as i32;
        let len = (width as i32 / 4).max(1);
        for x in start..(start + len).min(width as i32) {
            grid.cells_mut()[(y as usize) * width as usize + x as usize] = CellState::Wall;
        }
    }
    let rule = SettleRule::sand(coord2(width as i32 / 2, 0), floor)?;
    Ok((grid, rule))
}

/// A `width × height` interior valley (walls around it, gaps top-left and
/// bottom-right) with an obstacle on roughly every third interior cell.
pub fn valley_profile(width: u32, height: u32) -> Result<(SimulationState, DriftRule), SimError> {
    let mut grid = Grid::create_2d(width + 2, height + 2, EdgeBehavior::Absorb, CellState::Wall)?;
    let mut movers = Vec::new();
    for y in 1..=height as i32 {
        for x in 1..=width as i32 {
            grid.set(&coord2(x, y), CellState::Empty)?;
            let i = ((y as u64) << 32) | x as u64;
            let heading = match mix(i) % 12 {
                0 => Heading::North,
                1 => Heading::South,
                2 => Heading::West,
                3 => Heading::East,
                _ => continue,
            };
            movers.push(Mover::heading(movers.len() as u32, coord2(x, y), heading));
        }
    }
    grid.set(&coord2(1, 0), CellState::Empty)?;
    grid.set(&coord2(width as i32, height as i32 + 1), CellState::Empty)?;
    let rule = DriftRule::new(coord2(1, 1), Extent::new_2d(width, height)?)?;
    Ok((SimulationState::with_movers(grid, movers), rule))
}
