use crate::TccError;

/// Floating point type used throughout system
pub type Real = f64;

/// Pass `v` through if finite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TccError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TccError::NonFinite { what, value: v })
    }
}

/// True when `v` is finite and strictly positive. NaN is never positive.
#[inline]
pub fn is_positive(v: Real) -> bool {
    v.is_finite() && v > 0.0
}

/// Logarithmically spaced points from `start` to `end` (both > 0), endpoints exact.
///
/// Returns an empty vector when `points` is zero and `[start]` when it is one.
pub fn log_space(start: Real, end: Real, points: usize) -> Vec<Real> {
    match points {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }

    let log_start = start.ln();
    let log_delta = (end.ln() - log_start) / (points - 1) as Real;

    let mut out: Vec<Real> = (0..points)
        .map(|i| (log_start + i as Real * log_delta).exp())
        .collect();

    // Ensure exact endpoints
    out[0] = start;
    out[points - 1] = end;
    out
}
