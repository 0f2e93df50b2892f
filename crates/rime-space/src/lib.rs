//! Bounded and toroidal lattices for the Rime grid engine.
//!
//! A [`Grid`] owns one value per cell of an [`Extent`] and answers
//! bounds-checked reads, writes, and neighbour queries under a
//! [`Connectivity`] policy. Boundary handling is fixed at construction by
//! [`EdgeBehavior`]: bounded grids fail loudly on out-of-range access,
//! toroidal grids normalise with modulo arithmetic.
//!
//! Cells never hold references to each other; adjacency is always a
//! query against the owning grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod edge;
pub mod extent;
pub mod grid;

#[cfg(test)]
pub(crate) mod compliance;

pub use connectivity::Connectivity;
pub use edge::EdgeBehavior;
pub use extent::Extent;
pub use grid::Grid;
