//! Movers walking straight ahead and turning in place at obstacles.

use crate::rule::Termination;
use crate::state::{Heading, Mover};
use rime_core::{CellState, ConfigError, Coord, SimError};
use rime_space::Grid;
use smallvec::{smallvec, SmallVec};

/// Which way a patrolling mover turns when its way is blocked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Turn {
    /// North, east, south, west.
    #[default]
    Clockwise,
    /// North, west, south, east.
    CounterClockwise,
}

impl Turn {
    /// The heading after one turn from `heading`.
    pub fn apply(self, heading: Heading) -> Heading {
        match (self, heading) {
            (Turn::Clockwise, Heading::North) => Heading::East,
            (Turn::Clockwise, Heading::East) => Heading::South,
            (Turn::Clockwise, Heading::South) => Heading::West,
            (Turn::Clockwise, Heading::West) => Heading::North,
            (Turn::CounterClockwise, Heading::North) => Heading::West,
            (Turn::CounterClockwise, Heading::West) => Heading::South,
            (Turn::CounterClockwise, Heading::South) => Heading::East,
            (Turn::CounterClockwise, Heading::East) => Heading::North,
        }
    }
}

/// What a patrol tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatrolOutcome {
    /// Every patrolling mover either stepped or turned.
    Advanced {
        /// Movers that changed cell.
        moved: usize,
        /// Movers that turned in place.
        turned: usize,
    },
    /// A mover's next step leaves the grid; nothing was changed.
    Terminated(Termination),
}

/// Guard patrol: each mover with a heading steps forward one cell, or
/// turns in place when the cell ahead is solid.
///
/// Only the grid blocks; movers pass through each other. Stepping off an
/// absorbing grid ends the run. On a wrapping grid the walk never ends and
/// only cycle detection stops it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PatrolRule {
    turn: Turn,
}

impl PatrolRule {
    /// A patrol turning in the given direction.
    pub fn new(turn: Turn) -> Self {
        Self { turn }
    }

    /// Turn direction.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Advance every patrolling mover by one action.
    ///
    /// All actions are planned before any is applied, so a tick that ends
    /// the run leaves the movers untouched and repeating it reports the
    /// same exit.
    pub fn tick(
        &self,
        grid: &Grid<CellState>,
        movers: &mut [Mover],
    ) -> Result<PatrolOutcome, SimError> {
        if grid.ndim() != 2 {
            return Err(ConfigError::InvalidRule {
                reason: "patrol needs a 2D grid".into(),
            }
            .into());
        }
        let mut plan: SmallVec<[(usize, Action); 4]> = SmallVec::new();
        for (i, mover) in movers.iter().enumerate() {
            let Some(heading) = mover.heading else {
                continue;
            };
            let [dx, dy] = heading.delta();
            let action = match grid.step(&mover.position, &[dx, dy])? {
                None => {
                    let at: Coord = smallvec![
                        mover.position[0].saturating_add(dx),
                        mover.position[1].saturating_add(dy)
                    ];
                    return Ok(PatrolOutcome::Terminated(Termination::Escaped { at }));
                }
                Some(ahead) if grid.get(&ahead)?.is_solid() => {
                    Action::Turn(self.turn.apply(heading))
                }
                Some(ahead) => Action::Step(ahead),
            };
            plan.push((i, action));
        }
        let (mut moved, mut turned) = (0, 0);
        for (i, action) in plan {
            match action {
                Action::Step(to) => {
                    movers[i].position = to;
                    moved += 1;
                }
                Action::Turn(heading) => {
                    movers[i].heading = Some(heading);
                    turned += 1;
                }
            }
        }
        Ok(PatrolOutcome::Advanced { moved, turned })
    }
}

enum Action {
    Step(Coord),
    Turn(Heading),
}
