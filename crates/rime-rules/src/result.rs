//! Outcome of a complete simulation run.

use crate::rule::Termination;
use rime_core::CellState;
use rime_space::Grid;

/// Summary returned by the settling and cascade drivers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationResult {
    /// Ticks that did useful work: entities settled for a settling run,
    /// ticks executed for a cascade run.
    pub ticks_completed: u64,
    /// Why the run stopped.
    pub termination: Termination,
    /// Cascade triggers summed over every tick (0 for settling runs).
    pub total_triggers: u64,
    /// First tick (1-based) in which every participating cell triggered.
    pub first_all_triggered_tick: Option<u64>,
    /// Grid after the last tick.
    pub grid: Grid<CellState>,
}
