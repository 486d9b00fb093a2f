//! # quill-core
//!
//! Shared error taxonomy for the quill workspace.
//!
//! Every fallible operation in quill returns [`Result`]. The [`Error`] enum
//! separates the three failure classes that can actually be surfaced:
//! construction-time validation ([`Error::Config`]), evaluation-time domain
//! violations ([`Error::Domain`]) and broken engine invariants
//! ([`Error::Internal`]). Arithmetic failures (division by zero, log of a
//! negative number) are not errors: they follow IEEE 754 and propagate as
//! NaN/±inf through the computed values.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{Error, Result};
