//! Error types for the Rime grid engine.
//!
//! Organised by subsystem: configuration, grid access, simulation, and
//! search. All errors are returned synchronously; nothing in the engine
//! logs, retries, or swallows them.

use crate::id::Coord;
use std::error::Error;
use std::fmt;

/// Invalid construction parameters for a grid, rule, or search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A grid dimension is zero.
    EmptyDimension {
        /// Axis name (`"width"`, `"height"`, `"depth"`).
        axis: &'static str,
    },
    /// A grid dimension does not fit the `i32` coordinate range.
    DimensionTooLarge {
        /// Axis name.
        axis: &'static str,
        /// The rejected value.
        value: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// The product of all dimensions overflows `usize`.
    CellCountOverflow,
    /// A cell buffer does not match the extent it is meant to fill.
    CellCountMismatch {
        /// Cells the extent requires.
        expected: usize,
        /// Cells supplied.
        got: usize,
    },
    /// A cascade threshold must be at least 1.
    InvalidThreshold {
        /// The rejected threshold.
        value: u32,
    },
    /// A transition rule's parameters are inconsistent.
    InvalidRule {
        /// What went wrong.
        reason: String,
    },
    /// A search configuration is inconsistent.
    InvalidSearch {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimension { axis } => write!(f, "{axis} must be at least 1"),
            Self::DimensionTooLarge { axis, value, max } => {
                write!(f, "{axis} {value} exceeds maximum {max}")
            }
            Self::CellCountOverflow => write!(f, "cell count overflows usize"),
            Self::CellCountMismatch { expected, got } => {
                write!(f, "expected {expected} cells, got {got}")
            }
            Self::InvalidThreshold { value } => {
                write!(f, "threshold must be positive, got {value}")
            }
            Self::InvalidRule { reason } => write!(f, "invalid rule: {reason}"),
            Self::InvalidSearch { reason } => write!(f, "invalid search: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Misuse of a grid: out-of-bounds access or a shape mismatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate lies outside a bounded (non-toroidal) grid.
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A coordinate has the wrong number of axes for the grid.
    DimensionMismatch {
        /// Axes the grid expects.
        expected: usize,
        /// Axes the coordinate carries.
        got: usize,
    },
    /// A connectivity policy was used on a grid of the wrong dimensionality.
    ConnectivityMismatch {
        /// Name of the connectivity policy.
        connectivity: &'static str,
        /// Dimensionality of the grid.
        ndim: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord:?} out of bounds: {bounds}")
            }
            Self::DimensionMismatch { expected, got } => {
                write!(f, "expected {expected}D coordinate, got {got}D")
            }
            Self::ConnectivityMismatch { connectivity, ndim } => {
                write!(f, "{connectivity} connectivity is not defined on a {ndim}D grid")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from applying a transition rule or running a simulation.
///
/// Normal simulation endings (spawn blocked, entity escaped) are not
/// errors; they are reported through the simulation result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// The rule or simulation parameters are invalid.
    Config(ConfigError),
    /// A grid access failed.
    Grid(GridError),
    /// The input state violates a precondition of the rule, such as a
    /// spawn cell that is already filled before the first tick.
    MalformedState {
        /// Description of the violated precondition.
        reason: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::MalformedState { reason } => write!(f, "malformed state: {reason}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::MalformedState { .. } => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for SimError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Errors from shortest-path and temporal search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The search parameters are invalid.
    Config(ConfigError),
    /// A grid access failed (e.g. start or goal out of bounds).
    Grid(GridError),
    /// Precomputing a time-indexed schedule failed.
    Rule(SimError),
    /// The goal was not reached within the step bound.
    Unreachable {
        /// Where the search started.
        start: Coord,
        /// Where it was trying to go.
        goal: Coord,
        /// Number of steps explored before giving up.
        bound: u64,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Rule(e) => write!(f, "schedule: {e}"),
            Self::Unreachable { start, goal, bound } => {
                write!(f, "goal {goal:?} unreachable from {start:?} within {bound} steps")
            }
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Rule(e) => Some(e),
            Self::Unreachable { .. } => None,
        }
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SimError> for SearchError {
    fn from(e: SimError) -> Self {
        Self::Rule(e)
    }
}
