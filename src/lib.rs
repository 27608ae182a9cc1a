//! Lookup-table interpolation.
//!
//! Given a set of known `(coordinate, payload)` anchors, compute a plausible
//! payload at an arbitrary coordinate by locating the anchors that bracket it
//! and blending them with a caller-supplied interpolator:
//!
//! - [`interpolation`]: one-dimensional bracket-and-blend, extrapolating
//!   beyond the table range, over sorted or unsorted anchor lists.
//! - [`adjacency`]: the clamping sibling; returns the surrounding anchors
//!   without blending and never extrapolates.
//! - [`weighted`]: the n-dimensional engine. Descends a nested [`table::Level`]
//!   one probe coordinate per level and reconstructs the contribution weight
//!   of every participating leaf, as in multilinear interpolation over a
//!   hypercube.
//! - [`serialization`]: JSON persistence with structural validation.
//!
//! Everything is a pure function over caller-owned tables; no call leaves
//! state behind, so shared tables can be interpolated from many threads at
//! once.

pub mod adjacency;
pub mod bracket;
pub mod errors;
pub mod interpolation;
pub mod serialization;
pub mod table;
pub mod utilities;
pub mod weighted;
