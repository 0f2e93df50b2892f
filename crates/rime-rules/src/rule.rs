//! The closed set of transition rules and their single dispatch point.

use crate::cascade::CascadeRule;
use crate::disperse::DisperseRule;
use crate::drift::DriftRule;
use crate::patrol::{PatrolOutcome, PatrolRule};
use crate::settle::{SettleOutcome, SettleRule};
use crate::state::SimulationState;
use rime_core::{Coord, SimError};

/// How a simulation run ended. None of these are errors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// A new entity could not enter because its spawn cell is filled.
    SpawnBlocked,
    /// An entity left the grid through an open floor or side.
    Escaped {
        /// First coordinate outside the grid the entity reached.
        at: Coord,
    },
    /// Every participating cell triggered in the same tick.
    Synchronized,
    /// A tick completed without any mover changing position.
    Stable,
    /// The state after a tick equals an earlier one, so the run would
    /// repeat forever.
    Cycle {
        /// Tick after which the repeated state was first seen (0 is the
        /// initial state).
        first_seen: u64,
        /// Ticks between the two sightings.
        period: u64,
    },
    /// The caller's tick limit was reached.
    TickLimit,
}

/// What a single tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickReport {
    /// A settling entity came to rest.
    Settled {
        /// Where it settled.
        at: Coord,
    },
    /// The tick ended the simulation; the grid and movers are unchanged.
    Terminated(Termination),
    /// A cascade tick completed.
    Cascaded {
        /// Cells that triggered this tick.
        triggers: usize,
        /// Whether every participating cell triggered.
        synchronized: bool,
    },
    /// Drifting movers advanced.
    Drifted {
        /// Movers that changed position.
        movers: usize,
    },
    /// A dispersal round completed.
    Dispersed {
        /// Movers that changed position.
        moved: usize,
    },
    /// Patrolling movers stepped or turned.
    Patrolled {
        /// Movers that changed cell.
        moved: usize,
        /// Movers that turned in place.
        turned: usize,
    },
}

/// A transition rule: a tagged configuration interpreted by
/// [`apply`](Self::apply).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionRule {
    /// Entity-driven settling (falling sand).
    Settle(SettleRule),
    /// Cascading threshold updates (flashing octopuses).
    Cascade(CascadeRule),
    /// Movers drifting along fixed headings inside a wrapping interior.
    Drift(DriftRule),
    /// Movers spreading out by rotating proposals.
    Disperse(DisperseRule),
    /// Movers walking ahead and turning at obstacles.
    Patrol(PatrolRule),
}

impl TransitionRule {
    /// Apply one tick to `state`. Does not advance `state.tick`; use
    /// [`SimulationState::step`] for that.
    pub fn apply(&self, state: &mut SimulationState) -> Result<TickReport, SimError> {
        match self {
            Self::Settle(rule) => Ok(match rule.tick(&mut state.grid)? {
                SettleOutcome::Settled(at) => TickReport::Settled { at },
                SettleOutcome::Terminated(end) => TickReport::Terminated(end),
            }),
            Self::Cascade(rule) => {
                let outcome = rule.tick(&mut state.grid)?;
                Ok(TickReport::Cascaded {
                    triggers: outcome.triggers,
                    synchronized: outcome.is_synchronized(),
                })
            }
            Self::Drift(rule) => Ok(TickReport::Drifted {
                movers: rule.tick(&mut state.movers)?,
            }),
            Self::Disperse(rule) => {
                let round = state.tick.0;
                Ok(TickReport::Dispersed {
                    moved: rule.tick(state, round)?,
                })
            }
            Self::Patrol(rule) => Ok(match rule.tick(&state.grid, &mut state.movers)? {
                PatrolOutcome::Advanced { moved, turned } => {
                    TickReport::Patrolled { moved, turned }
                }
                PatrolOutcome::Terminated(end) => TickReport::Terminated(end),
            }),
        }
    }
}

impl From<SettleRule> for TransitionRule {
    fn from(rule: SettleRule) -> Self {
        Self::Settle(rule)
    }
}

impl From<CascadeRule> for TransitionRule {
    fn from(rule: CascadeRule) -> Self {
        Self::Cascade(rule)
    }
}

impl From<DriftRule> for TransitionRule {
    fn from(rule: DriftRule) -> Self {
        Self::Drift(rule)
    }
}

impl From<DisperseRule> for TransitionRule {
    fn from(rule: DisperseRule) -> Self {
        Self::Disperse(rule)
    }
}

impl From<PatrolRule> for TransitionRule {
    fn from(rule: PatrolRule) -> Self {
        Self::Patrol(rule)
    }
}
