//! Crowded movers spreading out by rotating proposals.

use crate::rule::{Termination, TickReport, TransitionRule};
use crate::state::{Heading, SimulationState};
use indexmap::IndexMap;
use rime_core::{CellState, ConfigError, Coord, MoverId, SimError};
use rime_space::{Connectivity, Grid};
use smallvec::{smallvec, SmallVec};

/// Proposal order for dispersal rounds.
///
/// Each round every mover with at least one occupied 8-neighbour proposes
/// the first heading (starting at `order[round % 4]`) whose three cells on
/// that side are all open. Proposals claimed by more than one mover are
/// dropped; the rest move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DisperseRule {
    order: [Heading; 4],
}

impl Default for DisperseRule {
    /// North, south, west, east.
    fn default() -> Self {
        Self {
            order: [Heading::North, Heading::South, Heading::West, Heading::East],
        }
    }
}

impl DisperseRule {
    /// A rule with a custom first-round order. Each heading must appear once.
    pub fn new(order: [Heading; 4]) -> Result<Self, ConfigError> {
        for (i, h) in order.iter().enumerate() {
            if order[..i].contains(h) {
                return Err(ConfigError::InvalidRule {
                    reason: format!("heading {h:?} listed twice in dispersal order"),
                });
            }
        }
        Ok(Self { order })
    }

    /// Headings tried in round `round`, in priority order.
    pub fn preference(&self, round: u64) -> [Heading; 4] {
        let start = (round % 4) as usize;
        std::array::from_fn(|i| self.order[(start + i) % 4])
    }

    /// Run round `round` on `state`, returning how many movers moved.
    ///
    /// Every cell a mover inspects must be addressable; a mover whose
    /// neighbourhood reaches past a bounded grid fails with
    /// `GridError::OutOfBounds`.
    pub fn tick(&self, state: &mut SimulationState, round: u64) -> Result<usize, SimError> {
        if state.grid.ndim() != 2 {
            return Err(ConfigError::InvalidRule {
                reason: "dispersal needs a 2D grid".into(),
            }
            .into());
        }
        let preference = self.preference(round);
        let mut proposals: IndexMap<Coord, SmallVec<[usize; 2]>> = IndexMap::new();
        for (i, mover) in state.movers.iter().enumerate() {
            if let Some(target) = propose(&state.grid, &mover.position, &preference)? {
                proposals.entry(target).or_default().push(i);
            }
        }
        let mut moved = 0;
        for (target, claimants) in proposals {
            let [only] = claimants[..] else {
                continue;
            };
            let from = std::mem::replace(&mut state.movers[only].position, target.clone());
            state.grid.set(&from, CellState::Empty)?;
            state.grid.set(&target, CellState::Occupied)?;
            moved += 1;
        }
        Ok(moved)
    }
}

fn shifted(pos: &Coord, dx: i32, dy: i32) -> Coord {
    smallvec![pos[0].saturating_add(dx), pos[1].saturating_add(dy)]
}

fn open(grid: &Grid<CellState>, c: &Coord) -> Result<bool, SimError> {
    Ok(grid.get(c)?.is_open())
}

fn propose(
    grid: &Grid<CellState>,
    pos: &Coord,
    preference: &[Heading; 4],
) -> Result<Option<Coord>, SimError> {
    let mut crowded = false;
    for off in Connectivity::Diagonal8.offsets() {
        if !open(grid, &shifted(pos, off[0], off[1]))? {
            crowded = true;
        }
    }
    if !crowded {
        return Ok(None);
    }
    for heading in preference {
        let [dx, dy] = heading.delta();
        let side: [Coord; 3] = if dx == 0 {
            [-1, 0, 1].map(|s| shifted(pos, s, dy))
        } else {
            [-1, 0, 1].map(|s| shifted(pos, dx, s))
        };
        let mut clear = true;
        for c in &side {
            clear &= open(grid, c)?;
        }
        if clear {
            return Ok(Some(shifted(pos, dx, dy)));
        }
    }
    Ok(None)
}

/// Summary of a dispersal run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispersalReport {
    /// Rounds executed.
    pub rounds: u64,
    /// Why the run stopped: [`Termination::Stable`] or
    /// [`Termination::TickLimit`].
    pub termination: Termination,
    /// First round (1-based) in which no mover moved.
    pub first_still_round: Option<u64>,
    /// Open cells inside the smallest rectangle holding every mover.
    pub empty_ground: usize,
    /// State after the last round.
    pub state: SimulationState,
}

/// Run dispersal rounds until no mover moves or `max_rounds` is reached.
///
/// Every mover must stand on its own [`CellState::Occupied`] cell;
/// anything else is [`SimError::MalformedState`].
pub fn run_dispersal(
    state: SimulationState,
    rule: &DisperseRule,
    max_rounds: u64,
) -> Result<DispersalReport, SimError> {
    let mut state = state;
    let mut index = index_movers(&state)?;
    let transition = TransitionRule::Disperse(*rule);
    let mut first_still = None;
    let mut termination = Termination::TickLimit;
    while state.tick.0 < max_rounds {
        let report = state.step(&transition)?;
        index = index_movers(&state)?;
        if let TickReport::Dispersed { moved: 0 } = report {
            first_still = Some(state.tick.0);
            termination = Termination::Stable;
            break;
        }
    }
    Ok(DispersalReport {
        rounds: state.tick.0,
        termination,
        first_still_round: first_still,
        empty_ground: empty_ground(&index),
        state,
    })
}

fn index_movers(state: &SimulationState) -> Result<IndexMap<Coord, MoverId>, SimError> {
    let mut index = IndexMap::with_capacity(state.movers.len());
    for mover in &state.movers {
        if *state.grid.get(&mover.position)? != CellState::Occupied {
            return Err(SimError::MalformedState {
                reason: format!(
                    "mover {} at {:?} is not on an occupied cell",
                    mover.id, mover.position
                ),
            });
        }
        if let Some(other) = index.insert(mover.position.clone(), mover.id) {
            return Err(SimError::MalformedState {
                reason: format!("movers {other} and {} share {:?}", mover.id, mover.position),
            });
        }
    }
    Ok(index)
}

fn empty_ground(index: &IndexMap<Coord, MoverId>) -> usize {
    let mut keys = index.keys();
    let Some(first) = keys.next() else {
        return 0;
    };
    let (mut lo, mut hi) = ((first[0], first[1]), (first[0], first[1]));
    for c in keys {
        lo = (lo.0.min(c[0]), lo.1.min(c[1]));
        hi = (hi.0.max(c[0]), hi.1.max(c[1]));
    }
    let area = (hi.0 - lo.0 + 1) as usize * (hi.1 - lo.1 + 1) as usize;
    area - index.len()
}
