pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Fractional part in `[0, 1)`, also for negative inputs.
pub(crate) fn wrap01(x: f64) -> f64 {
    let r = x.rem_euclid(1.0);
    if r >= 1.0 { 0.0 } else { r }
}

/// Grid band `[start, end)` covered by the percent span `[lo, hi)` on an axis of `cells`.
pub(crate) fn pct_span_to_cells(lo: f64, hi: f64, cells: u32) -> (u32, u32) {
    const EPS: f64 = 1e-9;
    let n = f64::from(cells);
    let start = (lo * n / 100.0 + EPS).floor().clamp(0.0, n) as u32;
    let end = (hi * n / 100.0 - EPS).ceil().clamp(0.0, n) as u32;
    (start, end.max(start))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
