//! Multi-instruction expansions for special-cased operations.
//!
//! A plain `powf` loses the sign of a negative base whenever the exponent is
//! not syntactically an integer — and an exponent that is itself a deferred
//! expression never is. The expansion defers the decision to evaluation
//! time: it tests the base's sign and the exponent's parity, builds
//! `sign = 1 - 2 * (base < 0 AND exponent odd)` out of ordinary
//! instructions, and computes `sign * |base|^exponent`. Whichever of the two
//! operands is a construction-time scalar has its half of the test folded
//! into constants immediately.

use crate::ops::{BinaryOp, UnaryOp};
use crate::tape::{Node, Tape};

/// Operand of a special-cased binary operation, after any tape merge:
/// either a root index in the destination tape or a construction-time
/// scalar.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Side {
    Root(usize),
    Scalar(f64),
}

/// Registry of special-cased operations. `None` means the operation appends
/// as a single plain instruction.
pub(crate) fn expansion(op: BinaryOp) -> Option<fn(&mut Tape, BinaryOp, Side, Side) -> usize> {
    match op {
        BinaryOp::Pow | BinaryOp::FloatPow => Some(expand_pow),
        _ => None,
    }
}

/// Append the sign-correcting power subsequence; returns the result's index.
fn expand_pow(tape: &mut Tape, op: BinaryOp, base: Side, exp: Side) -> usize {
    match (base, exp) {
        // Both deferred: sign and parity are both evaluation-time tests.
        (Side::Root(b), Side::Root(e)) => {
            let neg = tape.push(Node::ScalarRhs { op: BinaryOp::Lt, a: b, rhs: 0.0 });
            let rem = tape.push(Node::ScalarRhs { op: BinaryOp::Rem, a: e, rhs: 2.0 });
            let odd = tape.push(Node::ScalarRhs { op: BinaryOp::Ne, a: rem, rhs: 0.0 });
            let flip = tape.push(Node::Binary { op: BinaryOp::And, a: neg, b: odd });
            let sign = push_sign(tape, flip);
            let mag = tape.push(Node::Unary { op: UnaryOp::Abs, a: b });
            let pow = tape.push(Node::Binary { op, a: mag, b: e });
            tape.push(Node::Binary { op: BinaryOp::Mul, a: sign, b: pow })
        }
        // Known exponent: its parity folds to a constant now.
        (Side::Root(b), Side::Scalar(c)) => {
            let odd = if c % 2.0 != 0.0 { 1.0 } else { 0.0 };
            let neg = tape.push(Node::ScalarRhs { op: BinaryOp::Lt, a: b, rhs: 0.0 });
            let flip = tape.push(Node::ScalarRhs { op: BinaryOp::And, a: neg, rhs: odd });
            let sign = push_sign(tape, flip);
            let mag = tape.push(Node::Unary { op: UnaryOp::Abs, a: b });
            let pow = tape.push(Node::ScalarRhs { op, a: mag, rhs: c });
            tape.push(Node::Binary { op: BinaryOp::Mul, a: sign, b: pow })
        }
        // Known base: its sign folds to a constant now.
        (Side::Scalar(c), Side::Root(e)) => {
            let neg = if c < 0.0 { 1.0 } else { 0.0 };
            let rem = tape.push(Node::ScalarRhs { op: BinaryOp::Rem, a: e, rhs: 2.0 });
            let odd = tape.push(Node::ScalarRhs { op: BinaryOp::Ne, a: rem, rhs: 0.0 });
            let flip = tape.push(Node::ScalarRhs { op: BinaryOp::And, a: odd, rhs: neg });
            let sign = push_sign(tape, flip);
            let pow = tape.push(Node::ScalarLhs { op, lhs: c.abs(), b: e });
            tape.push(Node::Binary { op: BinaryOp::Mul, a: sign, b: pow })
        }
        // Dispatch only routes here when at least one operand is deferred.
        (Side::Scalar(_), Side::Scalar(_)) => {
            unreachable!("special-case expansion requires a deferred operand")
        }
    }
}

/// `flip` (1/0) -> `1 - 2*flip` (-1 if flipping the sign, else +1).
fn push_sign(tape: &mut Tape, flip: usize) -> usize {
    let keep = tape.push(Node::Unary { op: UnaryOp::Not, a: flip });
    let twice = tape.push(Node::ScalarRhs { op: BinaryOp::Mul, a: keep, rhs: 2.0 });
    tape.push(Node::ScalarRhs { op: BinaryOp::Sub, a: twice, rhs: 1.0 })
}
