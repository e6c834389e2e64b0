use std::cmp::Ordering;
use std::fmt::Display;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sweep_core::errors::{ErrorInfo, SweepError};

/// Spacing policy for grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AxisPolicy {
    /// Endpoints plus `n` evenly spaced interior points (`n + 2` values).
    #[default]
    Linear,
    /// Exactly `n` base-10 geometrically spaced values.
    Logarithmic,
}

/// Longest axis a single parameter may request.
pub const MAX_AXIS_LEN: usize = 1 << 24;

/// Point type that can be placed on a linear axis.
pub trait AxisPoint: Copy + PartialOrd + Display {
    /// Returns the point `index / steps` of the way from `min` to `max`.
    fn interpolate(min: Self, max: Self, index: u64, steps: u64) -> Result<Self, SweepError>;
}

impl AxisPoint for f64 {
    fn interpolate(min: Self, max: Self, index: u64, steps: u64) -> Result<Self, SweepError> {
        let t = index as f64 / steps as f64;
        let span = max - min;
        // Ranges wider than f64::MAX blend the endpoints instead.
        Ok(if span.is_finite() {
            min + span * t
        } else {
            min * (1.0 - t) + max * t
        })
    }
}

impl AxisPoint for NaiveDateTime {
    fn interpolate(min: Self, max: Self, index: u64, steps: u64) -> Result<Self, SweepError> {
        let divisor = i32::try_from(steps).map_err(|_| too_many_steps(steps))?;
        let factor = i32::try_from(index).map_err(|_| too_many_steps(index))?;
        let step = max.signed_duration_since(min) / divisor;
        min.checked_add_signed(step * factor).ok_or_else(|| {
            SweepError::Range(
                ErrorInfo::new("timestamp-overflow", "timestamp axis left the calendar range")
                    .with_context("min", min.to_string()),
            )
        })
    }
}

fn too_many_steps(steps: u64) -> SweepError {
    SweepError::Range(
        ErrorInfo::new("axis-too-long", "timestamp axis has too many samples")
            .with_context("steps", steps.to_string()),
    )
}

fn axis_len(requested: i64, extra: u64) -> Result<usize, SweepError> {
    let len = u64::try_from(requested)
        .ok()
        .and_then(|n| n.checked_add(extra))
        .and_then(|n| usize::try_from(n).ok())
        .filter(|len| *len <= MAX_AXIS_LEN);
    len.ok_or_else(|| {
        SweepError::Capacity(
            ErrorInfo::new("space-too-large", "axis requests too many samples")
                .with_context("n_samples", requested.to_string())
                .with_context("limit", MAX_AXIS_LEN.to_string())
                .with_hint("reduce n_samples"),
        )
    })
}

fn ensure_ordered<T: AxisPoint>(min: T, max: T) -> Result<(), SweepError> {
    match min.partial_cmp(&max) {
        Some(Ordering::Less) | Some(Ordering::Equal) => Ok(()),
        _ => Err(SweepError::invalid_range(min, max)),
    }
}

/// Samples `[min, max]` under the linear policy.
///
/// With `n > 0` and `min != max` the axis holds `n + 2` values: both
/// endpoints plus `n` evenly spaced interior points. Otherwise it collapses
/// to `[min]` when the endpoints coincide, or to `[min, max]`.
pub fn linear_axis<T: AxisPoint>(min: T, max: T, n: Option<i64>) -> Result<Vec<T>, SweepError> {
    ensure_ordered(min, max)?;
    let len = match n {
        Some(n) if n > 0 && min != max => axis_len(n, 2)?,
        _ => {
            return Ok(if min == max { vec![min] } else { vec![min, max] });
        }
    };
    let steps = len as u64 - 1;
    let mut axis = Vec::with_capacity(len);
    axis.push(min);
    for index in 1..steps {
        axis.push(T::interpolate(min, max, index, steps)?);
    }
    // Rounding can land short of the endpoint; pin it.
    axis.push(max);
    Ok(axis)
}

/// Samples `[min, max]` with `n` base-10 geometrically spaced values.
///
/// Both endpoints must be positive and at least one sample is required.
pub fn log_axis(min: f64, max: f64, n: Option<i64>) -> Result<Vec<f64>, SweepError> {
    ensure_ordered(min, max)?;
    if min <= 0.0 {
        return Err(SweepError::Range(
            ErrorInfo::new(
                "non-positive-log-endpoint",
                "logarithmic axes require positive endpoints",
            )
            .with_context("min", min.to_string())
            .with_context("max", max.to_string()),
        ));
    }
    let count = match n {
        Some(n) if n >= 1 => axis_len(n, 0)?,
        other => {
            return Err(SweepError::Spec(
                ErrorInfo::new(
                    "log-sample-count",
                    "logarithmic axes require at least one sample",
                )
                .with_context(
                    "n_samples",
                    other.map(|n| n.to_string()).unwrap_or_else(|| "absent".into()),
                )
                .with_hint("set n_samples to the number of values wanted"),
            ));
        }
    };
    if count == 1 {
        return Ok(vec![min]);
    }
    let start = min.log10();
    let stop = max.log10();
    let delta = (stop - start) / (count - 1) as f64;
    let mut axis: Vec<f64> = (0..count)
        .map(|index| 10f64.powf(start + index as f64 * delta))
        .collect();
    axis[0] = min;
    axis[count - 1] = max;
    Ok(axis)
}

/// Samples a numeric axis under the requested policy.
pub fn numeric_axis(
    policy: AxisPolicy,
    min: f64,
    max: f64,
    n: Option<i64>,
) -> Result<Vec<f64>, SweepError> {
    match policy {
        AxisPolicy::Linear => linear_axis(min, max, n),
        AxisPolicy::Logarithmic => log_axis(min, max, n),
    }
}
