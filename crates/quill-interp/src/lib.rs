//! # quill-interp
//!
//! Piecewise polynomial approximation of sampled 1-D functions.
//!
//! An [`Interpolant`] is built from sample arrays `x`/`y` describing
//! `y = f(x)` and evaluates the fitted approximation at arbitrary query
//! points inside `[min(x), max(x)]`. The samples are split into segments of
//! `k + 1` points (`k` = polynomial degree selected by [`Kind`]) and each
//! segment gets its own polynomial, solved from the segment's Vandermonde
//! system.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod interpolant;
mod segment;

pub use interpolant::{Interpolant, Kind, Method};
