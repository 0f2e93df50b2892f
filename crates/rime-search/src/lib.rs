//! Shortest-path search for the Rime grid engine.
//!
//! The centrepiece is [`TemporalSearch`]: level-order BFS over
//! `(position, time)` against a [`TimeIndexedGridProvider`]. For grids
//! whose obstacles drift, [`PeriodicSchedule`] precomputes one open-cell
//! mask per tick of the period and serves lookups by `t mod period`; the
//! cache belongs to the caller's search context and is dropped with it.
//!
//! Static analyses over a single grid live alongside:
//! [`lowest_total_risk`] (Dijkstra), [`shortest_steps`] (multi-source BFS),
//! [`flood_fill`] and [`surface_area`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod flood;
pub mod metrics;
pub mod provider;
pub mod temporal;
pub mod weighted;

pub use config::SearchConfig;
pub use flood::{flood_fill, shortest_steps, surface_area};
pub use metrics::SearchMetrics;
pub use provider::{open_mask, PeriodicSchedule, StaticProvider, TimeIndexedGridProvider};
pub use temporal::{find_shortest_time, total_traversal_time, TemporalSearch, TimedPath};
pub use weighted::lowest_total_risk;
