//! # quill-expr
//!
//! Deferred elementwise algebra over piecewise polynomial approximations.
//!
//! A [`Quill`] wraps a fitted [`Interpolant`] and records every operation
//! applied to it — arithmetic, transcendental functions, comparisons —
//! as instructions on a flat, append-only tape instead of computing
//! anything. Calling [`Quill::eval`] with concrete query points walks the
//! tape recursively and produces the numeric result. Combining two values
//! merges their tapes by re-indexed append, so independently built
//! programs stay jointly addressable and the originals stay intact.
//!
//! Power is special-cased: a negative base with a deferred (or merely
//! float-typed) integer exponent would lose its sign under a plain `powf`,
//! so both power entry points expand into a short instruction subsequence
//! that tests the base's sign and the exponent's parity at evaluation time
//! and computes `sign * |base|^exponent`.
//!
//! # Example
//! ```
//! use quill_expr::Quill;
//! use quill_interp::{Kind, Method};
//!
//! let x = [-1.0, 0.0, 1.0];
//! let f = Quill::new(&x, &x, Kind::Linear, Method::Poly)?; // f(x) = x
//!
//! let g = f.pow(3.0); // deferred x^3, sign-correct for x < 0
//! let y = g.eval(&[-1.0, 0.0, 1.0])?;
//! assert!((y[0] + 1.0).abs() < 1e-9);
//! # Ok::<(), quill_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ops;
pub mod quill;

mod expand;
mod tape;

pub use ops::{BinaryOp, UnaryOp};
pub use quill::{Operand, Quill};

pub use quill_interp::{Interpolant, Kind, Method};
