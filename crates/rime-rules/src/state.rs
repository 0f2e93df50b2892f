//! Simulation snapshots and the entities that move through them.

use crate::rule::{TickReport, TransitionRule};
use rime_core::{CellState, Coord, MoverId, SimError, TickId};
use rime_space::Grid;

/// Cardinal direction of travel.
///
/// `y` grows downward, so north is `y - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// `y - 1`.
    North,
    /// `y + 1`.
    South,
    /// `x - 1`.
    West,
    /// `x + 1`.
    East,
}

impl Heading {
    /// Returns the `[dx, dy]` offset for one step in this direction.
    pub fn delta(self) -> [i32; 2] {
        match self {
            Heading::North => [0, -1],
            Heading::South => [0, 1],
            Heading::West => [-1, 0],
            Heading::East => [1, 0],
        }
    }
}

/// A mobile entity with its own position, optionally travelling along a
/// fixed heading.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mover {
    /// Stable identifier, assigned by the caller.
    pub id: MoverId,
    /// Current cell.
    pub position: Coord,
    /// Direction of travel, if the mover drifts.
    pub heading: Option<Heading>,
}

impl Mover {
    /// A mover without a heading.
    pub fn stationary(id: impl Into<MoverId>, position: Coord) -> Self {
        Self {
            id: id.into(),
            position,
            heading: None,
        }
    }

    /// A mover travelling along `heading`.
    pub fn heading(id: impl Into<MoverId>, position: Coord, heading: Heading) -> Self {
        Self {
            id: id.into(),
            position,
            heading: Some(heading),
        }
    }
}

/// The complete state of a simulation between ticks.
///
/// A state is a value: [`next`](Self::next) derives a successor without
/// touching `self`, so earlier snapshots can be kept for history or cycle
/// detection. In-place [`step`](Self::step) is for drivers that discard
/// history as they go; callers that keep snapshots must use `next`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    /// Ticks applied so far.
    pub tick: TickId,
    /// Cell contents.
    pub grid: Grid<CellState>,
    /// Entities tracked outside the grid.
    pub movers: Vec<Mover>,
}

impl SimulationState {
    /// A state at tick 0 with no movers.
    pub fn new(grid: Grid<CellState>) -> Self {
        Self::with_movers(grid, Vec::new())
    }

    /// A state at tick 0 with the given movers.
    pub fn with_movers(grid: Grid<CellState>, movers: Vec<Mover>) -> Self {
        Self {
            tick: TickId(0),
            grid,
            movers,
        }
    }

    /// Apply one tick of `rule` in place and advance the tick counter.
    ///
    /// On error the state may be partially updated; callers that need the
    /// previous snapshot should use [`next`](Self::next).
    pub fn step(&mut self, rule: &TransitionRule) -> Result<TickReport, SimError> {
        let report = rule.apply(self)?;
        self.tick = self.tick.next();
        Ok(report)
    }

    /// Consume the state and return its successor.
    pub fn advance(mut self, rule: &TransitionRule) -> Result<(Self, TickReport), SimError> {
        let report = self.step(rule)?;
        Ok((self, report))
    }

    /// Derive the successor from a deep copy, leaving `self` untouched.
    pub fn next(&self, rule: &TransitionRule) -> Result<(Self, TickReport), SimError> {
        self.clone().advance(rule)
    }
}
