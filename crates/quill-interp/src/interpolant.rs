//! Piecewise Vandermonde polynomial interpolation.

use std::str::FromStr;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use quill_core::{Error, Result};

use crate::segment::{effective_degree, segment_spans};

/// Order of the piecewise polynomial fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Degree-1 segments.
    Linear,
    /// Degree-2 segments.
    Quadratic,
    /// Degree-3 segments.
    Cubic,
}

impl Kind {
    /// Requested polynomial degree.
    pub fn degree(self) -> usize {
        match self {
            Kind::Linear => 1,
            Kind::Quadratic => 2,
            Kind::Cubic => 3,
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Kind::Linear),
            "quadratic" => Ok(Kind::Quadratic),
            "cubic" => Ok(Kind::Cubic),
            other => Err(Error::Config(format!(
                "unsupported interpolation kind {other:?}, must be one of \
                 \"linear\", \"quadratic\", \"cubic\""
            ))),
        }
    }
}

/// Interpolation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Per-segment polynomial via the segment's Vandermonde system.
    Poly,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "poly" => Ok(Method::Poly),
            other => Err(Error::Config(format!(
                "unsupported interpolation method {other:?}, must be \"poly\""
            ))),
        }
    }
}

/// One fitted segment: value bounds and polynomial coefficients in
/// ascending-power order.
#[derive(Debug, Clone)]
struct Segment {
    lo: f64,
    hi: f64,
    coeffs: Vec<f64>,
}

/// Piecewise polynomial approximation of `y = f(x)` from sample arrays.
///
/// Construction fits every segment once; evaluation locates each query
/// point's segment and evaluates that segment's polynomial. Query points
/// must lie in `[min(x), max(x)]`.
///
/// # Example
/// ```
/// use quill_interp::{Interpolant, Kind, Method};
///
/// let x = [0.0f64, 2.0, 4.0, 6.0, 8.0, 10.0];
/// let y: Vec<f64> = x.iter().map(|v| v.powi(5)).collect();
/// let f = Interpolant::new(&x, &y, Kind::Quadratic, Method::Poly).unwrap();
///
/// // Exact at the sample points, approximate in between.
/// let v = f.eval(&[4.0], false).unwrap();
/// assert!((v[0] - 1024.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Interpolant {
    x: Vec<f64>,
    y: Vec<f64>,
    kind: Kind,
    method: Method,
    degree: usize,
    x_min: f64,
    x_max: f64,
    segments: Vec<Segment>,
}

impl Interpolant {
    /// Fit a piecewise polynomial to the samples.
    ///
    /// Fails with [`Error::Config`] when the sample arrays differ in length,
    /// hold fewer than two points, are not strictly increasing in `x`, or
    /// contain non-finite values.
    pub fn new(x: &[f64], y: &[f64], kind: Kind, method: Method) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::Config("x and y must have equal lengths".into()));
        }
        if x.len() < 2 {
            return Err(Error::Config(
                "at least two sample points are required".into(),
            ));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(Error::Config("sample values must be finite".into()));
        }
        if x.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Config(
                "sample x values must be strictly increasing".into(),
            ));
        }

        let n = x.len();
        let degree = effective_degree(n, kind.degree());

        let segments = segment_spans(n, kind.degree())
            .into_iter()
            .map(|(first, last)| {
                let coeffs = fit_segment(&x[first..=last], &y[first..=last])?;
                Ok(Segment { lo: x[first], hi: x[last], coeffs })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            kind,
            method,
            degree,
            x_min: x[0],
            x_max: x[n - 1],
            segments,
        })
    }

    /// Evaluate the fit at `xi`.
    ///
    /// Unless `assume_ordered` is set the points are sorted for the segment
    /// sweep and the results scattered back to the caller's order, so the
    /// output always lines up with the input. Fails with [`Error::Domain`]
    /// if any point lies strictly outside `[min(x), max(x)]`; the interval
    /// bounds themselves are valid query points.
    pub fn eval(&self, xi: &[f64], assume_ordered: bool) -> Result<Vec<f64>> {
        let order: Option<Vec<usize>> = if assume_ordered {
            None
        } else {
            let mut idx: Vec<usize> = (0..xi.len()).collect();
            idx.sort_by(|&i, &j| xi[i].total_cmp(&xi[j]));
            Some(idx)
        };
        let pts: Vec<f64> = match &order {
            Some(idx) => idx.iter().map(|&i| xi[i]).collect(),
            None => xi.to_vec(),
        };

        if let Some(&p) = pts.iter().find(|&&p| p < self.x_min || self.x_max < p) {
            return Err(Error::Domain { point: p, lo: self.x_min, hi: self.x_max });
        }

        // Later segments win at shared boundaries. NaN query points match no
        // segment and stay NaN.
        let mut yi = vec![f64::NAN; pts.len()];
        for seg in &self.segments {
            for (i, &p) in pts.iter().enumerate() {
                if seg.lo <= p && p <= seg.hi {
                    yi[i] = poly_eval(&seg.coeffs, p);
                }
            }
        }

        Ok(match order {
            Some(idx) => {
                let mut out = vec![0.0; yi.len()];
                for (s, &dst) in idx.iter().enumerate() {
                    out[dst] = yi[s];
                }
                out
            }
            None => yi,
        })
    }

    /// Evaluate the fit at a single point.
    pub fn eval_scalar(&self, xi: f64) -> Result<f64> {
        Ok(self.eval(std::slice::from_ref(&xi), true)?[0])
    }

    /// Sample `x` values the fit was built from.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Sample `y` values the fit was built from.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Requested fit order.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Fit method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Effective per-segment degree after capping at `n - 1`.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Lower bound of the fitted interval.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Upper bound of the fitted interval.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }
}

/// Solve the segment's Vandermonde system for ascending-power coefficients.
fn fit_segment(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
    let k = xs.len();
    let vander = DMatrix::from_fn(k, k, |r, c| xs[r].powi(c as i32));
    let rhs = DVector::from_column_slice(ys);

    let coeffs = vander
        .lu()
        .solve(&rhs)
        .ok_or_else(|| Error::Config("segment produced a singular Vandermonde system".into()))?;

    Ok(coeffs.iter().copied().collect())
}

/// Evaluate ascending-power coefficients at `x` (Horner).
fn poly_eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
