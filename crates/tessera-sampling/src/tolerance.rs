//! Approximate comparison for real-valued membership tests.

/// Absolute and relative tolerance used by real-valued `contains`.
pub(crate) const TOLERANCE: f64 = 1e-9;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * (1.0 + a.abs().max(b.abs()))
}

/// Nearest integer step `k` with `k * step ~= value`, if any.
pub(crate) fn snap_to_step(value: f64, step: f64) -> Option<i64> {
    let k = (value / step).round();
    if approx_eq(k * step, value) {
        Some(k as i64)
    } else {
        None
    }
}
