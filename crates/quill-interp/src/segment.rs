//! Segment layout for the piecewise fit.
//!
//! For `n` samples and requested degree `d`, the samples are covered by
//! `ceil((n-1)/d)` segments of `k + 1` consecutive points each, where
//! `k = min(d, n-1)` is the effective degree. The final segment is
//! re-anchored to end at the last sample so it always holds `k + 1` points,
//! which makes it overlap its predecessor when `d` does not divide `n - 1`.

/// Effective polynomial degree: the requested degree capped at `n - 1`.
pub(crate) fn effective_degree(n: usize, d: usize) -> usize {
    if d < n { d } else { n - 1 }
}

/// Number of segments covering `n` samples at requested degree `d`.
pub(crate) fn segment_count(n: usize, d: usize) -> usize {
    (n - 1) / d + usize::from((n - 1) % d > 0)
}

/// Inclusive sample-index spans `(first, last)` for each segment.
pub(crate) fn segment_spans(n: usize, d: usize) -> Vec<(usize, usize)> {
    let k = effective_degree(n, d);
    let m = segment_count(n, d);

    let mut spans: Vec<(usize, usize)> = (0..m).map(|i| (k * i, k * (i + 1))).collect();
    spans[m - 1] = (n - k - 1, n - 1);
    spans
}
