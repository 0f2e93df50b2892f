//! Entity-driven settling: one entity enters per tick, falls through a
//! fixed priority of moves, and comes to rest.

use crate::result::SimulationResult;
use crate::rule::Termination;
use rime_core::{CellState, ConfigError, Coord, GridError, SimError};
use rime_space::Grid;
use smallvec::{smallvec, SmallVec};

/// What lies below the last row of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FloorMode {
    /// Nothing: an entity that leaves the grid escapes and ends the run.
    #[default]
    Open,
    /// Solid rock one row below the grid. Entities pile up until one
    /// settles on the spawn cell; the run then ends on the following tick.
    /// Leaving through a side is an out-of-bounds error.
    Solid,
}

/// Result of a single settling tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The entity came to rest at this cell, now [`CellState::Occupied`].
    Settled(Coord),
    /// The run is over; the grid was not modified.
    Terminated(Termination),
}

/// Parameters of a settling simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettleRule {
    spawn: Coord,
    moves: SmallVec<[[i32; 2]; 4]>,
    floor: FloorMode,
}

impl SettleRule {
    /// A rule spawning at `spawn` and trying `moves` (`[dx, dy]`) in order.
    ///
    /// Every move must have `dy > 0` so that each fall terminates.
    /// Offsets saturate at the `i32` range; a saturated target always lies
    /// outside the grid.
    pub fn new(
        spawn: Coord,
        moves: impl IntoIterator<Item = [i32; 2]>,
        floor: FloorMode,
    ) -> Result<Self, ConfigError> {
        if spawn.len() != 2 {
            return Err(ConfigError::InvalidRule {
                reason: format!("spawn must be a 2D coordinate, got {}D", spawn.len()),
            });
        }
        let moves: SmallVec<[[i32; 2]; 4]> = moves.into_iter().collect();
        if moves.is_empty() {
            return Err(ConfigError::InvalidRule {
                reason: "settling rule needs at least one move".into(),
            });
        }
        if let Some(bad) = moves.iter().find(|m| m[1] <= 0) {
            return Err(ConfigError::InvalidRule {
                reason: format!("move {bad:?} does not make downward progress"),
            });
        }
        Ok(Self {
            spawn,
            moves,
            floor,
        })
    }

    /// Falling sand: straight down, then down-left, then down-right.
    pub fn sand(spawn: Coord, floor: FloorMode) -> Result<Self, ConfigError> {
        Self::new(spawn, [[0, 1], [-1, 1], [1, 1]], floor)
    }

    /// Where entities enter.
    pub fn spawn(&self) -> &Coord {
        &self.spawn
    }

    /// Candidate moves in priority order.
    pub fn moves(&self) -> &[[i32; 2]] {
        &self.moves
    }

    /// Floor behaviour.
    pub fn floor(&self) -> FloorMode {
        self.floor
    }

    /// Drop one entity from the spawn cell.
    ///
    /// Deterministic: calling this again on a grid it already terminated
    /// on yields the same [`Termination`].
    pub fn tick(&self, grid: &mut Grid<CellState>) -> Result<SettleOutcome, SimError> {
        if grid.is_toroidal() {
            return Err(ConfigError::InvalidRule {
                reason: "settling needs a bounded grid".into(),
            }
            .into());
        }
        if !grid.get(&self.spawn)?.is_open() {
            return Ok(SettleOutcome::Terminated(Termination::SpawnBlocked));
        }
        let mut pos = self.spawn.clone();
        'fall: loop {
            for m in &self.moves {
                let target: Coord = smallvec![
                    pos[0].saturating_add(m[0]),
                    pos[1].saturating_add(m[1])
                ];
                match self.probe(grid, &target)? {
                    Probe::Open => {
                        pos = target;
                        continue 'fall;
                    }
                    Probe::Blocked => {}
                    Probe::Outside => {
                        return Ok(SettleOutcome::Terminated(Termination::Escaped { at: target }))
                    }
                }
            }
            break;
        }
        grid.set(&pos, CellState::Occupied)?;
        Ok(SettleOutcome::Settled(pos))
    }

    fn probe(&self, grid: &Grid<CellState>, target: &Coord) -> Result<Probe, GridError> {
        if grid.in_bounds(target) {
            return Ok(if grid.get(target)?.is_open() {
                Probe::Open
            } else {
                Probe::Blocked
            });
        }
        match self.floor {
            FloorMode::Open => Ok(Probe::Outside),
            FloorMode::Solid if target[1] >= grid.height() as i32 => Ok(Probe::Blocked),
            FloorMode::Solid => Err(GridError::OutOfBounds {
                coord: target.clone(),
                bounds: grid.extent().describe(),
            }),
        }
    }
}

enum Probe {
    Open,
    Blocked,
    Outside,
}

/// Drop entities until the spawn is blocked or one escapes.
///
/// `ticks_completed` is the number of entities that came to rest. The
/// tick that detects termination is not counted, in either floor mode.
///
/// Fails with [`SimError::MalformedState`] if the spawn cell is already
/// filled before the first entity enters.
pub fn run_settling_simulation(
    initial_grid: Grid<CellState>,
    rule: &SettleRule,
) -> Result<SimulationResult, SimError> {
    let mut grid = initial_grid;
    let spawn_state = *grid.get(rule.spawn())?;
    if !spawn_state.is_open() {
        return Err(SimError::MalformedState {
            reason: format!(
                "spawn cell {:?} is {spawn_state:?} before the first tick",
                rule.spawn()
            ),
        });
    }
    let mut settled = 0u64;
    let termination = loop {
        match rule.tick(&mut grid)? {
            SettleOutcome::Settled(_) => settled += 1,
            SettleOutcome::Terminated(end) => break end,
        }
    };
    Ok(SimulationResult {
        ticks_completed: settled,
        termination,
        total_triggers: 0,
        first_all_triggered_tick: None,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rime_core::coord2;
    use rime_space::EdgeBehavior;

    fn bowl() -> Grid<CellState> {
        // 5 wide, 3 tall, rock along the bottom row and both sides of row 1.
        let mut g = Grid::create_2d(5, 3, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        for x in 0..5 {
            g.set(&coord2(x, 2), CellState::Wall).unwrap();
        }
        g.set(&coord2(0, 1), CellState::Wall).unwrap();
        g.set(&coord2(4, 1), CellState::Wall).unwrap();
        g
    }

    #[test]
    fn rejects_moves_without_downward_progress() {
        let err = SettleRule::new(coord2(0, 0), [[0, 1], [1, 0]], FloorMode::Open).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { .. }));
        assert!(SettleRule::new(coord2(0, 0), [], FloorMode::Open).is_err());
    }

    #[test]
    fn sand_prefers_down_then_left_then_right() {
        let rule = SettleRule::sand(coord2(2, 0), FloorMode::Open).unwrap();
        let mut g = bowl();
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(2, 1))));
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(1, 1))));
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(3, 1))));
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(2, 0))));
        assert_eq!(
            rule.tick(&mut g),
            Ok(SettleOutcome::Terminated(Termination::SpawnBlocked))
        );
    }

    #[test]
    fn open_floor_escape() {
        let rule = SettleRule::sand(coord2(1, 0), FloorMode::Open).unwrap();
        let mut g = Grid::create_2d(3, 2, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        let out = rule.tick(&mut g).unwrap();
        assert_eq!(
            out,
            SettleOutcome::Terminated(Termination::Escaped { at: coord2(1, 2) })
        );
        assert_eq!(g.count(|c| *c == CellState::Occupied), 0);
    }

    #[test]
    fn solid_floor_holds() {
        let rule = SettleRule::sand(coord2(1, 0), FloorMode::Solid).unwrap();
        let mut g = Grid::create_2d(3, 2, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(1, 1))));
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(0, 1))));
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(2, 1))));
        assert_eq!(rule.tick(&mut g), Ok(SettleOutcome::Settled(coord2(1, 0))));
    }

    #[test]
    fn solid_floor_side_exit_is_an_error() {
        let rule = SettleRule::sand(coord2(0, 0), FloorMode::Solid).unwrap();
        let mut g = Grid::create_2d(2, 2, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        g.set(&coord2(0, 1), CellState::Wall).unwrap();
        let err = rule.tick(&mut g).unwrap_err();
        assert!(matches!(err, SimError::Grid(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn huge_offsets_leave_the_grid() {
        let rule = SettleRule::new(coord2(1, 0), [[i32::MAX, 1]], FloorMode::Open).unwrap();
        let mut g = Grid::create_2d(3, 3, EdgeBehavior::Absorb, CellState::Empty).unwrap();
        assert_eq!(
            rule.tick(&mut g),
            Ok(SettleOutcome::Terminated(Termination::Escaped {
                at: coord2(i32::MAX, 1)
            }))
        );

        let rule = SettleRule::new(coord2(1, 0), [[i32::MIN, 1]], FloorMode::Solid).unwrap();
        assert!(matches!(
            rule.tick(&mut g),
            Err(SimError::Grid(GridError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn toroidal_grid_rejected() {
        let rule = SettleRule::sand(coord2(0, 0), FloorMode::Open).unwrap();
        let mut g = Grid::create_2d(2, 2, EdgeBehavior::Wrap, CellState::Empty).unwrap();
        assert!(matches!(rule.tick(&mut g), Err(SimError::Config(_))));
    }

    #[test]
    fn run_counts_settled_entities() {
        let rule = SettleRule::sand(coord2(2, 0), FloorMode::Open).unwrap();
        let result = run_settling_simulation(bowl(), &rule).unwrap();
        assert_eq!(result.ticks_completed, 4);
        assert_eq!(result.termination, Termination::SpawnBlocked);
        assert_eq!(result.grid.count(|c| *c == CellState::Occupied), 4);
    }

    #[test]
    fn filled_spawn_is_malformed() {
        let rule = SettleRule::sand(coord2(2, 2), FloorMode::Open).unwrap();
        let err = run_settling_simulation(bowl(), &rule).unwrap_err();
        assert!(matches!(err, SimError::MalformedState { .. }));
    }

    #[test]
    fn spawn_outside_grid_is_out_of_bounds() {
        let rule = SettleRule::sand(coord2(9, 0), FloorMode::Open).unwrap();
        let err = run_settling_simulation(bowl(), &rule).unwrap_err();
        assert!(matches!(err, SimError::Grid(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn terminal_tick_is_repeatable() {
        let rule = SettleRule::sand(coord2(2, 0), FloorMode::Open).unwrap();
        let result = run_settling_simulation(bowl(), &rule).unwrap();
        let mut again = result.grid.clone();
        let first = rule.tick(&mut again).unwrap();
        let second = rule.tick(&mut again).unwrap();
        assert_eq!(first, SettleOutcome::Terminated(result.termination.clone()));
        assert_eq!(first, second);
        assert_eq!(again, result.grid);
    }
}
