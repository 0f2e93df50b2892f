//! Running a rule until its state repeats.

use crate::rule::{Termination, TickReport, TransitionRule};
use crate::state::{Mover, SimulationState};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use rime_core::{CellState, Coord, SimError, TickId};
use rime_space::Grid;

/// Everything that decides a state's future under a fixed rule.
type Snapshot = (Grid<CellState>, Vec<Mover>, u64);

/// Summary of a [`run_until_cycle`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Ticks that changed the state. A tick that terminated the run is
    /// not counted.
    pub ticks_completed: u64,
    /// [`Termination::Cycle`], the rule's own ending, or
    /// [`Termination::TickLimit`].
    pub termination: Termination,
    /// Distinct mover positions seen, the initial ones included, in
    /// first-visit order.
    pub visited: IndexSet<Coord>,
    /// State after the last tick.
    pub state: SimulationState,
}

impl CycleReport {
    /// Whether the run stopped because a state repeated.
    pub fn is_cycle(&self) -> bool {
        matches!(self.termination, Termination::Cycle { .. })
    }
}

/// Step `rule` until the state repeats, the rule ends the run, or
/// `max_ticks` ticks have run.
///
/// Every distinct state is kept (grid, movers, and the rule's round
/// phase), so memory grows with grid size times ticks run.
pub fn run_until_cycle(
    state: SimulationState,
    rule: &TransitionRule,
    max_ticks: u64,
) -> Result<CycleReport, SimError> {
    let mut state = state;
    let mut seen: IndexMap<Snapshot, u64> = IndexMap::new();
    let mut visited: IndexSet<Coord> = state.movers.iter().map(|m| m.position.clone()).collect();
    seen.insert(snapshot(&state, rule), 0);

    let mut ticks = 0u64;
    let termination = loop {
        if ticks >= max_ticks {
            break Termination::TickLimit;
        }
        if let TickReport::Terminated(end) = state.step(rule)? {
            break end;
        }
        ticks += 1;
        visited.extend(state.movers.iter().map(|m| m.position.clone()));
        match seen.entry(snapshot(&state, rule)) {
            Entry::Occupied(e) => {
                let first_seen = *e.get();
                break Termination::Cycle {
                    first_seen,
                    period: ticks - first_seen,
                };
            }
            Entry::Vacant(e) => {
                e.insert(ticks);
            }
        }
    };
    Ok(CycleReport {
        ticks_completed: ticks,
        termination,
        visited,
        state,
    })
}

fn snapshot(state: &SimulationState, rule: &TransitionRule) -> Snapshot {
    (
        state.grid.clone(),
        state.movers.clone(),
        round_phase(rule, state.tick),
    )
}

/// Dispersal preference rotates with the round, so equal grids four
/// rounds apart behave alike but one round apart do not.
fn round_phase(rule: &TransitionRule, tick: TickId) -> u64 {
    match rule {
        TransitionRule::Disperse(_) => tick.0 % 4,
        _ => 0,
    }
}
