/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draw a uniform `f64` in `[0, 1)`, used for probability checks.
#[inline]
pub(crate) fn coin(rng: &mut fastrand::Rng) -> f64 {
    rng.f64()
}
