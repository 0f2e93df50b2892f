//! Rime: grid simulation and time-indexed pathfinding.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Rime sub-crates. For most users, adding `rime` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rime::prelude::*;
//!
//! // A 3×3 field of energy levels, all one below the threshold.
//! let grid = Grid::create_2d(3, 3, EdgeBehavior::Absorb, CellState::Value(9)).unwrap();
//! let result = run_cascade_simulation(grid, 9, 1).unwrap();
//! assert_eq!(result.total_triggers, 9);
//!
//! // Shortest time across an open 4×4 field.
//! let open = Grid::create_2d(4, 4, EdgeBehavior::Absorb, CellState::Empty).unwrap();
//! let provider = StaticProvider::new(&open);
//! let t = find_shortest_time(&provider, &coord2(0, 0), &coord2(3, 3), 0).unwrap();
//! assert_eq!(t, 6);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rime-core` | Coordinates, tick IDs, cell states, errors |
//! | [`space`] | `rime-space` | `Grid`, `Extent`, edge behavior, connectivity |
//! | [`rules`] | `rime-rules` | Transition rules and simulation drivers |
//! | [`search`] | `rime-search` | Temporal BFS, schedules, static path analyses |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`rime-core`).
pub use rime_core as types;

/// Lattices and neighbour queries (`rime-space`).
pub use rime_space as space;

/// Transition rules and drivers (`rime-rules`).
///
/// The [`rules::TransitionRule`] enum is the single dispatch point for
/// every rule kind.
pub use rime_rules as rules;

/// Shortest-path search (`rime-search`).
///
/// [`search::TemporalSearch`] over a [`search::TimeIndexedGridProvider`],
/// plus static analyses on a single grid.
pub use rime_search as search;

/// Common imports for typical Rime usage.
///
/// ```rust
/// use rime::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use rime_core::{coord2, coord3, manhattan, CellState, Coord, MoverId, TickId};

    // Errors
    pub use rime_core::{ConfigError, GridError, SearchError, SimError};

    // Space
    pub use rime_space::{Connectivity, EdgeBehavior, Extent, Grid};

    // Rules
    pub use rime_rules::{
        run_cascade, run_cascade_simulation, run_dispersal, run_settling_simulation,
        run_until_cycle, CascadeOptions, CascadeRule, CycleReport, DisperseRule, DriftRule,
        FloorMode, Heading, Mover, PatrolRule, SettleRule, SimulationResult, SimulationState,
        Termination, TickReport, TransitionRule, Turn,
    };

    // Search
    pub use rime_search::{
        find_shortest_time, lowest_total_risk, PeriodicSchedule, SearchConfig, SearchMetrics,
        StaticProvider, TemporalSearch, TimeIndexedGridProvider, TimedPath,
    };
}
