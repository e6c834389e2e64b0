use sweep_core::errors::{ErrorInfo, SweepError};
use sweep_core::RngHandle;

/// Relative half-width of the perturbation window.
pub const VARIANCE_FRACTION: f64 = 0.1;

/// Largest window bound whose integers are all exact in `f64` (2^53).
pub const MAX_VARIANCE_BOUND: f64 = 9_007_199_254_740_992.0;

/// Draws an integer strictly between `floor(0.9 * v)` and `floor(1.1 * v)`.
///
/// Fails when that open interval holds no integer, which happens for
/// values near zero and for negative values, and when the window reaches
/// past [`MAX_VARIANCE_BOUND`].
pub fn perturb(value: f64, rng: &mut RngHandle) -> Result<f64, SweepError> {
    let low = (value * (1.0 - VARIANCE_FRACTION)).floor();
    let high = (value * (1.0 + VARIANCE_FRACTION)).floor();
    if !(low.is_finite() && high.is_finite()) || high - low < 2.0 {
        return Err(SweepError::Variance(
            ErrorInfo::new(
                "degenerate-variance-range",
                "no integer lies strictly inside the perturbation window",
            )
            .with_context("value", value.to_string())
            .with_context("low", low.to_string())
            .with_context("high", high.to_string())
            .with_hint("variance sampling needs nominal values well above zero"),
        ));
    }
    if high > MAX_VARIANCE_BOUND {
        return Err(SweepError::Variance(
            ErrorInfo::new(
                "variance-out-of-range",
                "perturbation window exceeds the exact integer range",
            )
            .with_context("value", value.to_string())
            .with_context("high", high.to_string())
            .with_context("limit", MAX_VARIANCE_BOUND.to_string()),
        ));
    }
    Ok(rng.int_in(low as i64 + 1, high as i64) as f64)
}

/// Perturbs every nominal value of a scalar axis.
pub fn perturb_axis(axis: &[f64], rng: &mut RngHandle) -> Result<Vec<f64>, SweepError> {
    axis.iter().map(|value| perturb(*value, rng)).collect()
}

/// Perturbs per-component axes of a multi-component parameter.
///
/// The first sample of every component axis is pinned to zero instead of
/// being perturbed.
pub fn perturb_components(
    axes: Vec<Vec<f64>>,
    rng: &mut RngHandle,
) -> Result<Vec<Vec<f64>>, SweepError> {
    axes.into_iter()
        .map(|axis| {
            axis.into_iter()
                .enumerate()
                .map(|(index, value)| match index {
                    0 => Ok(0.0),
                    _ => perturb(value, rng),
                })
                .collect::<Result<Vec<f64>, SweepError>>()
        })
        .collect()
}
