//! Cascading threshold updates.
//!
//! Each tick runs a small state machine:
//! `IncrementAll → TriggerPass (until stable) → ResetFlashed → Done`.
//! Only [`CellState::Value`] cells take part; walls and empty cells
//! neither receive increments nor trigger.

use crate::result::SimulationResult;
use crate::rule::{Termination, TickReport, TransitionRule};
use crate::state::SimulationState;
use rime_core::{CellState, ConfigError, SimError};
use rime_space::{Connectivity, Grid};

/// Phase of a single cascade tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CascadePhase {
    /// Every participating cell gains one unit.
    IncrementAll,
    /// Cells above threshold that have not yet triggered this tick fire,
    /// bumping their neighbours. Repeats until a pass fires nothing.
    TriggerPass,
    /// Every cell that fired is reset to zero.
    ResetFlashed,
    /// Terminal for this tick.
    Done,
}

/// Parameters of the cascade rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CascadeRule {
    threshold: u32,
    connectivity: Connectivity,
}

impl Default for CascadeRule {
    /// Threshold 9, 8-connected.
    fn default() -> Self {
        Self {
            threshold: 9,
            connectivity: Connectivity::Diagonal8,
        }
    }
}

/// Per-tick cascade counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeTick {
    /// Cells that fired.
    pub triggers: usize,
    /// Cells taking part (`Value` cells).
    pub participants: usize,
    /// Trigger passes run, including the final empty one.
    pub passes: usize,
}

impl CascadeTick {
    /// Whether every participating cell fired.
    pub fn is_synchronized(&self) -> bool {
        self.participants > 0 && self.triggers == self.participants
    }
}

impl CascadeRule {
    /// A cell fires once its value exceeds `threshold`.
    ///
    /// Returns `Err(ConfigError::InvalidThreshold)` for a zero threshold.
    pub fn new(threshold: u32, connectivity: Connectivity) -> Result<Self, ConfigError> {
        if threshold == 0 {
            return Err(ConfigError::InvalidThreshold { value: threshold });
        }
        Ok(Self {
            threshold,
            connectivity,
        })
    }

    /// Firing threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Which neighbours a firing cell bumps.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Run one full tick.
    ///
    /// Each cell fires at most once, so the trigger loop reaches its fixed
    /// point within `cell_count + 1` passes.
    pub fn tick(&self, grid: &mut Grid<CellState>) -> Result<CascadeTick, SimError> {
        let mut flashed = vec![false; grid.cell_count()];
        let mut out = CascadeTick::default();
        let mut phase = CascadePhase::IncrementAll;
        while phase != CascadePhase::Done {
            phase = match phase {
                CascadePhase::IncrementAll => {
                    for cell in grid.cells_mut() {
                        if let CellState::Value(v) = cell {
                            *v = v.saturating_add(1);
                            out.participants += 1;
                        }
                    }
                    CascadePhase::TriggerPass
                }
                CascadePhase::TriggerPass => {
                    out.passes += 1;
                    let fired = self.trigger_pass(grid, &mut flashed)?;
                    out.triggers += fired;
                    if fired == 0 {
                        CascadePhase::ResetFlashed
                    } else {
                        CascadePhase::TriggerPass
                    }
                }
                CascadePhase::ResetFlashed => {
                    for (cell, _) in grid
                        .cells_mut()
                        .iter_mut()
                        .zip(&flashed)
                        .filter(|(_, f)| **f)
                    {
                        *cell = CellState::Value(0);
                    }
                    CascadePhase::Done
                }
                CascadePhase::Done => CascadePhase::Done,
            };
        }
        Ok(out)
    }

    fn trigger_pass(
        &self,
        grid: &mut Grid<CellState>,
        flashed: &mut [bool],
    ) -> Result<usize, SimError> {
        let mut fired = 0;
        for rank in 0..grid.cell_count() {
            if flashed[rank] {
                continue;
            }
            let over = matches!(grid.cells()[rank], CellState::Value(v) if v > self.threshold);
            if !over {
                continue;
            }
            flashed[rank] = true;
            fired += 1;
            let here = grid.coord_at(rank);
            for nb in grid.neighbours(&here, self.connectivity)? {
                if let CellState::Value(v) = grid.get_mut(&nb)? {
                    *v = v.saturating_add(1);
                }
            }
        }
        Ok(fired)
    }
}

/// Options for [`run_cascade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeOptions {
    /// Upper bound on ticks executed.
    pub max_ticks: u64,
    /// End the run at the first tick in which every cell fires.
    pub stop_on_synchronized: bool,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            max_ticks: 100,
            stop_on_synchronized: false,
        }
    }
}

/// Run `threshold`-triggered cascades on an 8-connected grid for
/// `max_ticks` ticks.
pub fn run_cascade_simulation(
    initial_grid: Grid<CellState>,
    threshold: u32,
    max_ticks: u64,
) -> Result<SimulationResult, SimError> {
    let rule = CascadeRule::new(threshold, Connectivity::Diagonal8)?;
    run_cascade(
        initial_grid,
        &rule,
        CascadeOptions {
            max_ticks,
            stop_on_synchronized: false,
        },
    )
}

/// Run a cascade with explicit rule and options.
///
/// `first_all_triggered_tick` is recorded whenever a synchronised tick
/// occurs within the run, whether or not the run stops there.
pub fn run_cascade(
    initial_grid: Grid<CellState>,
    rule: &CascadeRule,
    options: CascadeOptions,
) -> Result<SimulationResult, SimError> {
    let rule = TransitionRule::Cascade(*rule);
    let mut state = SimulationState::new(initial_grid);
    let mut total_triggers = 0u64;
    let mut first_all = None;
    let mut termination = Termination::TickLimit;
    while state.tick.0 < options.max_ticks {
        let TickReport::Cascaded {
            triggers,
            synchronized,
        } = state.step(&rule)?
        else {
            continue;
        };
        total_triggers += triggers as u64;
        if synchronized && first_all.is_none() {
            first_all = Some(state.tick.0);
            if options.stop_on_synchronized {
                termination = Termination::Synchronized;
                break;
            }
        }
    }
    Ok(SimulationResult {
        ticks_completed: state.tick.0,
        termination,
        total_triggers,
        first_all_triggered_tick: first_all,
        grid: state.grid,
    })
}
