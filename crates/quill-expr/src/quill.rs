//! The user-facing deferred expression value.

use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::sync::Arc;

use quill_core::Result;
use quill_interp::{Interpolant, Kind, Method};

use crate::expand::{expansion, Side};
use crate::ops::{BinaryOp, UnaryOp};
use crate::tape::{Node, Tape};

/// A not-yet-evaluated function built from a fitted approximation.
///
/// A `Quill` behaves like a numeric value that happens to represent a
/// deferred computation: arithmetic operators, elementwise transcendental
/// functions and comparisons all return a new `Quill` recording one more
/// instruction, and nothing touches data until [`eval`](Quill::eval) walks
/// the recorded program over a batch of query points. Combining two values
/// never mutates either operand, so both stay usable afterwards.
///
/// # Example
/// ```
/// use quill_expr::Quill;
/// use quill_interp::{Kind, Method};
///
/// let x = [-1.0, 0.0, 1.0];
/// let f = Quill::new(&x, &x, Kind::Linear, Method::Poly)?; // f(x) = x
///
/// let g = (&f * 4.0 + 2.0).sin(); // still unevaluated
/// let y = g.eval(&[0.5])?;
/// assert!((y[0] - (4.0_f64 * 0.5 + 2.0).sin()).abs() < 1e-9);
/// # Ok::<(), quill_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Quill {
    tape: Tape,
}

/// Right-hand operand of a binary composition: another deferred expression
/// or a construction-time scalar.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Another deferred expression.
    Expr(&'a Quill),
    /// A scalar constant.
    Scalar(f64),
}

impl<'a> From<&'a Quill> for Operand<'a> {
    fn from(q: &'a Quill) -> Self {
        Operand::Expr(q)
    }
}

impl From<f64> for Operand<'_> {
    fn from(c: f64) -> Self {
        Operand::Scalar(c)
    }
}

impl Quill {
    /// Fit the samples and wrap the result as a deferred value.
    ///
    /// Fails with a configuration error exactly when
    /// [`Interpolant::new`] does.
    pub fn new(x: &[f64], y: &[f64], kind: Kind, method: Method) -> Result<Self> {
        Ok(Self::from_interpolant(Interpolant::new(x, y, kind, method)?))
    }

    /// Wrap an already fitted interpolant.
    pub fn from_interpolant(f: Interpolant) -> Self {
        Self { tape: Tape::leaf(Arc::new(f)) }
    }

    /// Evaluate the deferred computation over a batch of query points.
    ///
    /// Results line up with the input order. Every leaf guards its own
    /// fitted interval: when expressions built over different sample domains
    /// have been combined, a batch fails as soon as any constituent leaf
    /// finds a point outside its own `[min(x), max(x)]`.
    pub fn eval(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.tape.eval(self.tape.root(), x, false)
    }

    /// [`eval`](Quill::eval) for callers asserting the batch is already in
    /// increasing order, skipping the sort. An optimization flag only — on
    /// an unsorted batch the output order is unspecified, never wrong
    /// values.
    pub fn eval_ordered(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.tape.eval(self.tape.root(), x, true)
    }

    /// Evaluate at a single query point.
    pub fn eval_scalar(&self, x: f64) -> Result<f64> {
        Ok(self.tape.eval(self.tape.root(), std::slice::from_ref(&x), true)?[0])
    }

    /// Number of recorded instructions.
    pub fn program_len(&self) -> usize {
        self.tape.len()
    }

    /// Generic unary hook: record `op` applied to this expression.
    ///
    /// Every named unary method is a shorthand for this.
    pub fn apply(&self, op: UnaryOp) -> Quill {
        let mut tape = self.tape.clone();
        let a = tape.root();
        tape.push(Node::Unary { op, a });
        Quill { tape }
    }

    /// Generic binary hook: record `op` between this expression and
    /// `other`, with `reflected` swapping the operand order (so scalar-led
    /// forms of non-commutative operations keep their meaning).
    ///
    /// Special-cased operations (both power variants) expand to their
    /// multi-instruction subsequence here; everything else appends a single
    /// instruction. Every operator overload and named binary method funnels
    /// through this.
    pub fn apply_binary(&self, op: BinaryOp, other: Operand<'_>, reflected: bool) -> Quill {
        let mut tape = self.tape.clone();
        let self_root = tape.root();

        if let Some(expand) = expansion(op) {
            let other_side = match other {
                Operand::Expr(g) => {
                    let offset = tape.absorb(&g.tape);
                    Side::Root(offset + g.tape.root())
                }
                Operand::Scalar(c) => Side::Scalar(c),
            };
            let (base, exp) = if reflected {
                (other_side, Side::Root(self_root))
            } else {
                (Side::Root(self_root), other_side)
            };
            expand(&mut tape, op, base, exp);
            return Quill { tape };
        }

        let node = match other {
            Operand::Expr(g) => {
                let offset = tape.absorb(&g.tape);
                let other_root = offset + g.tape.root();
                let (a, b) = if reflected {
                    (other_root, self_root)
                } else {
                    (self_root, other_root)
                };
                Node::Binary { op, a, b }
            }
            Operand::Scalar(c) => {
                if reflected {
                    Node::ScalarLhs { op, lhs: c, b: self_root }
                } else {
                    Node::ScalarRhs { op, a: self_root, rhs: c }
                }
            }
        };
        tape.push(node);
        Quill { tape }
    }
}

macro_rules! unary_fns {
    ($($name:ident($op:ident) => $doc:expr;)+) => {
        impl Quill {
            $(
                #[doc = $doc]
                #[inline]
                pub fn $name(&self) -> Quill {
                    self.apply(UnaryOp::$op)
                }
            )+
        }
    };
}

unary_fns! {
    pos(Pos) => "Deferred identity (the unary `+` of the surface).";
    abs(Abs) => "Deferred absolute value.";
    sqrt(Sqrt) => "Deferred square root.";
    cbrt(Cbrt) => "Deferred cube root.";
    square(Square) => "Deferred `x * x`.";
    recip(Recip) => "Deferred reciprocal.";
    exp(Exp) => "Deferred `e^x`.";
    exp2(Exp2) => "Deferred `2^x`.";
    exp_m1(Expm1) => "Deferred `e^x - 1`.";
    ln(Ln) => "Deferred natural logarithm.";
    log2(Log2) => "Deferred base-2 logarithm.";
    log10(Log10) => "Deferred base-10 logarithm.";
    ln_1p(Ln1p) => "Deferred `ln(1 + x)`.";
    sin(Sin) => "Deferred sine.";
    cos(Cos) => "Deferred cosine.";
    tan(Tan) => "Deferred tangent.";
    asin(Asin) => "Deferred inverse sine.";
    acos(Acos) => "Deferred inverse cosine.";
    atan(Atan) => "Deferred inverse tangent.";
    sinh(Sinh) => "Deferred hyperbolic sine.";
    cosh(Cosh) => "Deferred hyperbolic cosine.";
    tanh(Tanh) => "Deferred hyperbolic tangent.";
    asinh(Asinh) => "Deferred inverse hyperbolic sine.";
    acosh(Acosh) => "Deferred inverse hyperbolic cosine.";
    atanh(Atanh) => "Deferred inverse hyperbolic tangent.";
    to_degrees(Degrees) => "Deferred radians-to-degrees conversion.";
    to_radians(Radians) => "Deferred degrees-to-radians conversion.";
    floor(Floor) => "Deferred floor.";
    ceil(Ceil) => "Deferred ceiling.";
    rint(Round) => "Deferred round half to even.";
    trunc(Trunc) => "Deferred truncation toward zero.";
    sign(Sign) => "Deferred sign (`-1`, `0` or `1`; NaN stays NaN).";
    logical_not(Not) => "Deferred logical not (`1.0` for zero, else `0.0`).";
}

macro_rules! binary_fns {
    ($($name:ident($op:ident) => $doc:expr;)+) => {
        impl Quill {
            $(
                #[doc = $doc]
                #[inline]
                pub fn $name<'a>(&self, other: impl Into<Operand<'a>>) -> Quill {
                    self.apply_binary(BinaryOp::$op, other.into(), false)
                }
            )+
        }
    };
}

binary_fns! {
    pow(Pow) => "Deferred power with sign-correct negative bases (see the \
                 crate docs on the power expansion).";
    float_pow(FloatPow) => "Deferred floating-point power, same negative-base \
                            handling as [`pow`](Quill::pow).";
    atan2(Atan2) => "Deferred four-quadrant inverse tangent of `self / other`.";
    hypot(Hypot) => "Deferred `sqrt(self^2 + other^2)`.";
    logaddexp(LogAddExp) => "Deferred stable `ln(e^self + e^other)`.";
    logaddexp2(LogAddExp2) => "Deferred stable `log2(2^self + 2^other)`.";
    maximum(Maximum) => "Deferred elementwise maximum (NaN propagates).";
    minimum(Minimum) => "Deferred elementwise minimum (NaN propagates).";
    copysign(CopySign) => "Deferred magnitude of `self` with the sign of `other`.";
    heaviside(Heaviside) => "Deferred step function with `other` as the value at zero.";
    floor_div(FloorDiv) => "Deferred floored division.";
    remainder(Rem) => "Deferred floored modulo (NumPy `mod`: divisor's sign).";
    fmod(Fmod) => "Deferred truncated modulo (dividend's sign, like `%` on floats).";
    greater(Gt) => "Deferred `self > other` as `1.0`/`0.0`.";
    greater_equal(Ge) => "Deferred `self >= other` as `1.0`/`0.0`.";
    less(Lt) => "Deferred `self < other` as `1.0`/`0.0`.";
    less_equal(Le) => "Deferred `self <= other` as `1.0`/`0.0`.";
    equal(Eq) => "Deferred `self == other` as `1.0`/`0.0`.";
    not_equal(Ne) => "Deferred `self != other` as `1.0`/`0.0`.";
    logical_and(And) => "Deferred logical and (nonzero is true).";
    logical_or(Or) => "Deferred logical or (nonzero is true).";
    logical_xor(Xor) => "Deferred logical exclusive or (nonzero is true).";
}

impl Quill {
    /// Deferred power with `self` as the exponent: `base ^ self`.
    ///
    /// The reflected form of [`pow`](Quill::pow), for scalar bases:
    /// `f.pow_base(2.0)` defers `2^f(x)`.
    #[inline]
    pub fn pow_base<'a>(&self, base: impl Into<Operand<'a>>) -> Quill {
        self.apply_binary(BinaryOp::Pow, base.into(), true)
    }

    /// Reflected form of [`float_pow`](Quill::float_pow).
    #[inline]
    pub fn float_pow_base<'a>(&self, base: impl Into<Operand<'a>>) -> Quill {
        self.apply_binary(BinaryOp::FloatPow, base.into(), true)
    }
}

// --- Operator overloads ---
//
// Each arithmetic operator is implemented for every combination of
// {Quill, &Quill} against {Quill, &Quill, f64} plus the reflected
// f64-on-the-left forms, all funneling into `apply_binary`.

macro_rules! impl_binary_operator {
    ($Trait:ident, $method:ident, $op:ident) => {
        impl $Trait<&Quill> for &Quill {
            type Output = Quill;
            fn $method(self, rhs: &Quill) -> Quill {
                self.apply_binary(BinaryOp::$op, Operand::Expr(rhs), false)
            }
        }

        impl $Trait<Quill> for &Quill {
            type Output = Quill;
            fn $method(self, rhs: Quill) -> Quill {
                self.$method(&rhs)
            }
        }

        impl $Trait<&Quill> for Quill {
            type Output = Quill;
            fn $method(self, rhs: &Quill) -> Quill {
                (&self).$method(rhs)
            }
        }

        impl $Trait<Quill> for Quill {
            type Output = Quill;
            fn $method(self, rhs: Quill) -> Quill {
                (&self).$method(&rhs)
            }
        }

        impl $Trait<f64> for &Quill {
            type Output = Quill;
            fn $method(self, rhs: f64) -> Quill {
                self.apply_binary(BinaryOp::$op, Operand::Scalar(rhs), false)
            }
        }

        impl $Trait<f64> for Quill {
            type Output = Quill;
            fn $method(self, rhs: f64) -> Quill {
                (&self).$method(rhs)
            }
        }

        impl $Trait<&Quill> for f64 {
            type Output = Quill;
            fn $method(self, rhs: &Quill) -> Quill {
                rhs.apply_binary(BinaryOp::$op, Operand::Scalar(self), true)
            }
        }

        impl $Trait<Quill> for f64 {
            type Output = Quill;
            fn $method(self, rhs: Quill) -> Quill {
                self.$method(&rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add, Add);
impl_binary_operator!(Sub, sub, Sub);
impl_binary_operator!(Mul, mul, Mul);
impl_binary_operator!(Div, div, Div);
impl_binary_operator!(Rem, rem, Fmod);

impl Neg for &Quill {
    type Output = Quill;
    fn neg(self) -> Quill {
        self.apply(UnaryOp::Neg)
    }
}

impl Neg for Quill {
    type Output = Quill;
    fn neg(self) -> Quill {
        (&self).neg()
    }
}
