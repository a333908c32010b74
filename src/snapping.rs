///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Angle snapping
///
///////////////////////////////////////////////////////////////////////////////////////////////////

/// Rounds `value` to the nearest multiple of `step`, halves away from zero.
pub fn quantize(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Constrains `value` into `[min, max]`.
///
/// The upper bound is applied first, so an inverted range (`min > max`)
/// always resolves to `min`. Unlike [`f64::clamp`] this never panics.
pub fn clamp_rotation(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Snaps then clamps, the order every rotation update uses.
pub fn settle(value: f64, step: f64, min: f64, max: f64) -> f64 {
    clamp_rotation(quantize(value, step), min, max)
}
