//! Time-indexed views of which cells are open.

use rime_core::{CellState, Coord, GridError, SimError};
use rime_rules::{DriftRule, SimulationState, TransitionRule};
use rime_space::Grid;

/// A grid whose open cells are a deterministic function of time.
///
/// Snapshots are boolean masks (`true` = open). Implementations must be
/// periodic: `snapshot_at(t)` and `snapshot_at(t + period())` describe the
/// same mask, and every snapshot has the same extent.
pub trait TimeIndexedGridProvider {
    /// Ticks after which the pattern repeats. At least 1.
    fn period(&self) -> u64;

    /// The open-cell mask at absolute time `time`.
    fn snapshot_at(&self, time: u64) -> &Grid<bool>;

    /// Whether `coord` is open at `time`.
    fn is_open(&self, coord: &Coord, time: u64) -> Result<bool, GridError> {
        self.snapshot_at(time).get(coord).copied()
    }
}

/// A provider whose mask never changes (period 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticProvider {
    mask: Grid<bool>,
}

impl StaticProvider {
    /// Open wherever `grid` is [`CellState::Empty`].
    pub fn new(grid: &Grid<CellState>) -> Self {
        Self {
            mask: grid.map(|c| c.is_open()),
        }
    }

    /// Wrap a precomputed mask.
    pub fn from_mask(mask: Grid<bool>) -> Self {
        Self { mask }
    }
}

impl TimeIndexedGridProvider for StaticProvider {
    fn period(&self) -> u64 {
        1
    }

    fn snapshot_at(&self, _time: u64) -> &Grid<bool> {
        &self.mask
    }
}

/// Precomputed masks for one full period of a drift simulation.
///
/// Built once per search context. Each snapshot is an immutable mask
/// derived from a fresh simulation state; nothing is mutated in place
/// while a search reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodicSchedule {
    snapshots: Vec<Grid<bool>>,
}

impl PeriodicSchedule {
    /// Run `rule` from `initial` for one period, recording the mask at
    /// each tick `0 .. period`.
    ///
    /// A cell is open when the grid holds [`CellState::Empty`] there and no
    /// mover stands on it.
    pub fn build(initial: &SimulationState, rule: &DriftRule) -> Result<Self, SimError> {
        let period = rule.period();
        let transition = TransitionRule::Drift(rule.clone());
        let mut state = initial.clone();
        let mut snapshots = Vec::with_capacity(period as usize);
        for t in 0..period {
            snapshots.push(open_mask(&state)?);
            if t + 1 < period {
                state.step(&transition)?;
            }
        }
        Ok(Self { snapshots })
    }

    /// All cached masks, indexed by `t mod period`.
    pub fn snapshots(&self) -> &[Grid<bool>] {
        &self.snapshots
    }
}

impl TimeIndexedGridProvider for PeriodicSchedule {
    fn period(&self) -> u64 {
        self.snapshots.len() as u64
    }

    fn snapshot_at(&self, time: u64) -> &Grid<bool> {
        &self.snapshots[(time % self.period()) as usize]
    }
}

/// The open-cell mask of a single state.
pub fn open_mask(state: &SimulationState) -> Result<Grid<bool>, GridError> {
    let mut mask = state.grid.map(|c| c.is_open());
    for mover in &state.movers {
        mask.set(&mover.position, false)?;
    }
    Ok(mask)
}
