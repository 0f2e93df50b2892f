//! Transition rules for the Rime grid engine.
//!
//! A [`TransitionRule`] is a closed set of rule kinds, each a plain
//! configuration value, interpreted by one dispatch function
//! ([`TransitionRule::apply`]). Rules advance a [`SimulationState`] by one
//! tick; the drivers in this crate run them to completion.
//!
//! # Rule kinds
//!
//! - [`SettleRule`]: one entity per tick falls until it rests
//!   ([`run_settling_simulation`]).
//! - [`CascadeRule`]: increment, fire above threshold, propagate within
//!   the tick ([`run_cascade_simulation`], [`run_cascade`]).
//! - [`DriftRule`]: movers travel along fixed headings and wrap inside a
//!   rectangle; periodic with [`DriftRule::period`].
//! - [`DisperseRule`]: crowded movers spread out by rotating proposals
//!   ([`run_dispersal`]).
//! - [`PatrolRule`]: movers walk ahead and turn at obstacles until they
//!   leave the grid or loop.
//!
//! Any rule can be run with [`run_until_cycle`], which stops at the first
//! repeated state and reports it as [`Termination::Cycle`].
//!
//! Normal endings (spawn blocked, escape, synchronisation, cycles) are
//! reported as [`Termination`] values, never as errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cascade;
pub mod cycle;
pub mod disperse;
pub mod drift;
pub mod patrol;
pub mod result;
pub mod rule;
pub mod settle;
pub mod state;

pub use cascade::{
    run_cascade, run_cascade_simulation, CascadeOptions, CascadePhase, CascadeRule, CascadeTick,
};
pub use cycle::{run_until_cycle, CycleReport};
pub use disperse::{run_dispersal, DispersalReport, DisperseRule};
pub use drift::DriftRule;
pub use patrol::{PatrolOutcome, PatrolRule, Turn};
pub use result::SimulationResult;
pub use rule::{Termination, TickReport, TransitionRule};
pub use settle::{run_settling_simulation, FloorMode, SettleOutcome, SettleRule};
pub use state::{Heading, Mover, SimulationState};
