//! Worked-example fixtures for Rime development.
//!
//! Text parsing lives here and only here: the engine crates take fully
//! built grids. Each canonical puzzle text has a parser returning
//! `Result<_, FixtureError>` and a zero-argument constructor for the
//! canonical example.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rime_core::{ConfigError, GridError};
use std::error::Error;
use std::fmt;

pub use fixtures::{
    chiton_risk, elf_grove, guard_lab, heightmap, lava_droplet, octopus_grid, parse_digit_grid,
    parse_droplet, parse_elves, parse_heightmap, parse_patrol, parse_rock_paths, parse_valley,
    rock_cave, windy_valley, Heightmap, Valley,
};

/// Failure to turn fixture text into a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureError {
    /// The text itself is malformed.
    Parse { line: usize, reason: String },
    /// The parsed shape is not a valid grid or rule.
    Config(ConfigError),
    /// A parsed coordinate does not fit the grid.
    Grid(GridError),
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse { .. } => None,
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<ConfigError> for FixtureError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for FixtureError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
