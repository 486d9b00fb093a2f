//! Algebraic laws of deferred composition.
//!
//! Deferred results are compared against the same operations applied to the
//! operands' own evaluations, so the laws hold to float precision — the
//! approximation error cancels out of both sides.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use quill_core::Error;
use quill_expr::Quill;
use quill_interp::{Kind, Method};

fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| a + (b - a) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Fit of `exp(x) + cos(pi x) - 1` on `[-1, 1]`.
fn f_of(kind: Kind) -> Quill {
    let x = linspace(-1.0, 1.0, 10);
    let y: Vec<f64> = x
        .iter()
        .map(|v| v.exp() + (std::f64::consts::PI * v).cos() - 1.0)
        .collect();
    Quill::new(&x, &y, kind, Method::Poly).unwrap()
}

/// Fit of `sin(2x)` on `[-1, 1]`.
fn g_of(kind: Kind) -> Quill {
    let x = linspace(-1.0, 1.0, 10);
    let y: Vec<f64> = x.iter().map(|v| (2.0 * v).sin()).collect();
    Quill::new(&x, &y, kind, Method::Poly).unwrap()
}

#[test]
fn addition_is_pointwise() {
    let f = f_of(Kind::Quadratic);
    let g = g_of(Kind::Linear);
    let xi = linspace(-1.0, 1.0, 57);

    let fx = f.eval(&xi).unwrap();
    let gx = g.eval(&xi).unwrap();

    let sum = (&f + &g).eval(&xi).unwrap();
    for i in 0..xi.len() {
        assert_relative_eq!(sum[i], fx[i] + gx[i], epsilon = 1e-12);
    }

    let shifted = (&f + 5.0).eval(&xi).unwrap();
    for i in 0..xi.len() {
        assert_relative_eq!(shifted[i], fx[i] + 5.0, epsilon = 1e-12);
    }
}

#[test]
fn subtraction_and_division_keep_operand_order() {
    let f = f_of(Kind::Cubic);
    let g = g_of(Kind::Quadratic);
    let xi = linspace(-0.9, 0.9, 31);

    let fx = f.eval(&xi).unwrap();
    let gx = g.eval(&xi).unwrap();

    let diff = (&f - &g).eval(&xi).unwrap();
    let ratio = (&f / &g).eval(&xi).unwrap();
    for i in 0..xi.len() {
        assert_relative_eq!(diff[i], fx[i] - gx[i], epsilon = 1e-12);
        assert_relative_eq!(ratio[i], fx[i] / gx[i], epsilon = 1e-12, max_relative = 1e-12);
    }

    // Reflected scalar forms.
    let rsub = (5.0 - &f).eval(&xi).unwrap();
    let rdiv = (5.0 / &f).eval(&xi).unwrap();
    for i in 0..xi.len() {
        assert_relative_eq!(rsub[i], 5.0 - fx[i], epsilon = 1e-12);
        assert_relative_eq!(rdiv[i], 5.0 / fx[i], epsilon = 1e-12, max_relative = 1e-12);
    }
}

#[test]
fn merge_is_associative_up_to_rounding() {
    let f = f_of(Kind::Linear);
    let g = g_of(Kind::Quadratic);
    let h = f_of(Kind::Cubic);
    let xi = linspace(-1.0, 1.0, 41);

    let left = ((&f + &g) + &h).eval(&xi).unwrap();
    let right = (&f + (&g + &h)).eval(&xi).unwrap();
    for i in 0..xi.len() {
        assert_relative_eq!(left[i], right[i], epsilon = 1e-12, max_relative = 1e-12);
    }
}

#[test]
fn identity_laws() {
    let f = f_of(Kind::Quadratic);
    let xi = linspace(-1.0, 1.0, 29);
    let fx = f.eval(&xi).unwrap();

    let one = f.pow(0.0).eval(&xi).unwrap();
    for &v in &one {
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
    }

    let same = (0.0 + &f).eval(&xi).unwrap();
    for i in 0..xi.len() {
        assert_relative_eq!(same[i], fx[i], epsilon = 1e-12);
    }
}

#[test]
fn combining_does_not_corrupt_the_originals() {
    let f = f_of(Kind::Quadratic);
    let g = g_of(Kind::Linear);
    let xi = linspace(-1.0, 1.0, 33);

    let before_f = f.eval(&xi).unwrap();
    let before_g = g.eval(&xi).unwrap();

    let h = &f + &g;
    let _ = h.eval(&xi).unwrap();
    let deeper = (&h * 3.0 - &f).pow(2.0);
    let _ = deeper.eval(&xi).unwrap();

    let after_f = f.eval(&xi).unwrap();
    let after_g = g.eval(&xi).unwrap();
    assert_eq!(before_f, after_f);
    assert_eq!(before_g, after_g);
}

#[test]
fn matches_the_true_function_within_fit_tolerance() {
    let xi = linspace(-1.0, 1.0, 100);
    for kind in [Kind::Linear, Kind::Quadratic, Kind::Cubic] {
        let f = f_of(kind);
        let composed = 4.0 * (&f + 2.0);
        let got = composed.eval(&xi).unwrap();
        for (v, p) in got.iter().zip(&xi) {
            let truth = 4.0 * (p.exp() + (std::f64::consts::PI * p).cos() - 1.0 + 2.0);
            assert_abs_diff_eq!(*v, truth, epsilon = 0.4);
        }
    }
}

#[test]
fn each_leaf_guards_its_own_domain() {
    // f fitted on [-1, 1], g fitted on [0, 2].
    let f = f_of(Kind::Linear);
    let xg = linspace(0.0, 2.0, 10);
    let yg: Vec<f64> = xg.iter().map(|v| v * v).collect();
    let g = Quill::new(&xg, &yg, Kind::Quadratic, Method::Poly).unwrap();

    let h = &f + &g;

    // Inside both domains: fine.
    let v = h.eval(&[0.5]).unwrap();
    let expected = f.eval_scalar(0.5).unwrap() + g.eval_scalar(0.5).unwrap();
    assert_relative_eq!(v[0], expected, epsilon = 1e-12);

    // Outside f's domain.
    assert!(matches!(h.eval(&[1.5]), Err(Error::Domain { .. })));
    // Outside g's domain.
    assert!(matches!(h.eval(&[-0.5]), Err(Error::Domain { .. })));
}

#[test]
fn unsorted_batches_evaluate_in_caller_order() {
    let f = f_of(Kind::Cubic);
    let g = g_of(Kind::Cubic);
    let composed = (&f * &g) - 1.0;

    let query = [0.7, -0.3, 0.0, 0.9, -1.0];
    let got = composed.eval(&query).unwrap();
    for (i, &p) in query.iter().enumerate() {
        let expected = composed.eval_scalar(p).unwrap();
        assert_relative_eq!(got[i], expected, epsilon = 1e-12);
    }
}

#[test]
fn construction_failure_does_not_build_a_value() {
    let err = Quill::new(&[0.0, 1.0], &[0.0], Kind::Linear, Method::Poly);
    assert!(matches!(err, Err(Error::Config(_))));
}
