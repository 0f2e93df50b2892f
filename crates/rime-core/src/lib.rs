//! Core types for the Rime grid engine.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! value types every other layer shares: coordinates, tick counters,
//! cell states, and the error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;

pub use cell::CellState;
pub use error::{ConfigError, GridError, SearchError, SimError};
pub use id::{coord2, coord3, manhattan, Coord, MoverId, TickId};
