use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sweep_core::errors::{ErrorInfo, SweepError};
use sweep_core::{ParameterSpec, RngHandle, SweepValue, TypeTag};
use tracing::{debug, warn};

use crate::axis::{linear_axis, numeric_axis, AxisPolicy};
use crate::combos::{product, unique_combinations};
use crate::config::{Sampling, SamplingMode};
use crate::shape;
use crate::variance::{perturb_axis, perturb_components};

/// Accepted timestamp layout, e.g. `2024-01-01 12:00:00.000000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Generated value lists keyed by parameter path, in first-seen path order.
pub type ValueMap = IndexMap<String, Vec<SweepValue>>;

/// Builds the value list of one parameter kind.
pub trait ValueShape: Sync {
    /// Samples the parameter and wraps every sample as a typed value.
    fn sample(
        &self,
        spec: &ParameterSpec,
        sampling: Sampling,
        rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError>;
}

struct ScalarShape;
struct FlagShape;
struct ComponentShape;
struct ArrayShape;
struct TimestampShape;

/// Returns the shape handling a parameter kind.
pub fn shape_for(kind: TypeTag) -> &'static dyn ValueShape {
    match kind {
        TypeTag::Int | TypeTag::Float | TypeTag::Probability | TypeTag::Duration => &ScalarShape,
        TypeTag::Bool => &FlagShape,
        TypeTag::StateVector | TypeTag::CovarianceMatrix | TypeTag::Tuple | TypeTag::List => {
            &ComponentShape
        }
        TypeTag::RawArray => &ArrayShape,
        TypeTag::Timestamp => &TimestampShape,
    }
}

impl ValueShape for ScalarShape {
    fn sample(
        &self,
        spec: &ParameterSpec,
        sampling: Sampling,
        rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError> {
        let (min, max) = spec.scalar_bounds()?;
        let n = spec.scalar_count()?;
        let axis = match sampling {
            Sampling::Grid(policy) => {
                cast_axis(spec.kind, policy, numeric_axis(policy, min, max, n)?)
            }
            Sampling::Variance => perturb_axis(&linear_axis(min, max, n)?, rng)?,
        };
        Ok(shape::scalar_values(spec.kind, axis))
    }
}

impl ValueShape for FlagShape {
    fn sample(
        &self,
        _spec: &ParameterSpec,
        _sampling: Sampling,
        _rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError> {
        Ok(shape::flag_values())
    }
}

impl ValueShape for ComponentShape {
    fn sample(
        &self,
        spec: &ParameterSpec,
        sampling: Sampling,
        rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError> {
        let axes = component_axes(spec, sampling, rng)?;
        Ok(shape::component_values(spec.kind, unique_combinations(&axes)))
    }
}

impl ValueShape for ArrayShape {
    fn sample(
        &self,
        spec: &ParameterSpec,
        sampling: Sampling,
        rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError> {
        let axes = component_axes(spec, sampling, rng)?;
        let stacked = shape::stack_rows(&product(&axes), axes.len());
        Ok(shape::array_values(&stacked))
    }
}

impl ValueShape for TimestampShape {
    fn sample(
        &self,
        spec: &ParameterSpec,
        sampling: Sampling,
        _rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError> {
        match sampling {
            Sampling::Grid(AxisPolicy::Linear) => {}
            Sampling::Grid(AxisPolicy::Logarithmic) => {
                return Err(unsupported("unsupported-axis", "logarithmic", spec.kind));
            }
            Sampling::Variance => {
                return Err(unsupported("unsupported-mode", "variance", spec.kind));
            }
        }
        let (min, max) = spec.text_bounds()?;
        let min = parse_timestamp(spec, "value_min", min)?;
        let max = parse_timestamp(spec, "value_max", max)?;
        let axis = linear_axis(min, max, spec.scalar_count()?)?;
        Ok(shape::timestamp_values(axis))
    }
}

fn component_axes(
    spec: &ParameterSpec,
    sampling: Sampling,
    rng: &mut RngHandle,
) -> Result<Vec<Vec<f64>>, SweepError> {
    let (mins, maxs) = spec.component_bounds()?;
    let counts = spec.component_counts(mins.len())?;
    let policy = match sampling {
        Sampling::Grid(policy) => policy,
        Sampling::Variance => AxisPolicy::Linear,
    };
    let axes = mins
        .iter()
        .zip(maxs)
        .zip(counts)
        .map(|((min, max), n)| {
            numeric_axis(policy, *min, *max, n).map(|axis| cast_axis(spec.kind, policy, axis))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match sampling {
        Sampling::Grid(_) => Ok(axes),
        Sampling::Variance => perturb_components(axes, rng),
    }
}

fn cast_axis(kind: TypeTag, policy: AxisPolicy, axis: Vec<f64>) -> Vec<f64> {
    match policy {
        AxisPolicy::Linear => axis,
        AxisPolicy::Logarithmic => axis
            .into_iter()
            .map(|value| shape::log_element(kind, value))
            .collect(),
    }
}

fn parse_timestamp(
    spec: &ParameterSpec,
    field: &str,
    text: &str,
) -> Result<NaiveDateTime, SweepError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|err| {
        SweepError::Spec(
            ErrorInfo::new("invalid-timestamp", "timestamp endpoint does not parse")
                .with_context("path", spec.path.clone())
                .with_context("field", field)
                .with_context("value", text)
                .with_hint(format!("expected YYYY-MM-DD HH:MM:SS.ffffff ({err})")),
        )
    })
}

fn unsupported(code: &str, what: &str, kind: TypeTag) -> SweepError {
    SweepError::Mode(
        ErrorInfo::new(code, "sampling is not supported for this type")
            .with_context("sampling", what)
            .with_context("type", kind.label()),
    )
}

/// A parameter rejected during generation, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterFailure {
    pub path: String,
    pub error: SweepError,
}

/// Per-path value lists plus every parameter that could not be generated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub values: ValueMap,
    #[serde(default)]
    pub failures: Vec<ParameterFailure>,
}

impl SweepOutcome {
    /// Returns true when every parameter produced values.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Routes each parameter to the shape for its kind and collects the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParameterDispatcher {
    pub mode: SamplingMode,
    pub axis: AxisPolicy,
}

impl ParameterDispatcher {
    /// Creates a dispatcher for the given mode and axis policy.
    pub fn new(mode: SamplingMode, axis: AxisPolicy) -> Self {
        Self { mode, axis }
    }

    /// Generates the value list of a single parameter.
    pub fn dispatch(
        &self,
        spec: &ParameterSpec,
        rng: &mut RngHandle,
    ) -> Result<Vec<SweepValue>, SweepError> {
        // Flags ignore the sampling mode entirely.
        let sampling = match spec.kind {
            TypeTag::Bool => Sampling::Grid(self.axis),
            _ => self.mode.resolve(self.axis)?,
        };
        shape_for(spec.kind).sample(spec, sampling, rng)
    }

    /// Generates every parameter. Failures are collected per parameter and
    /// never stop the remaining parameters from being processed.
    pub fn generate(&self, specs: &[ParameterSpec], rng: &mut RngHandle) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();
        for spec in specs {
            match self.dispatch(spec, rng) {
                Ok(values) => {
                    debug!(
                        path = %spec.path,
                        kind = spec.kind.label(),
                        values = values.len(),
                        "generated parameter values"
                    );
                    if outcome.values.insert(spec.path.clone(), values).is_some() {
                        warn!(path = %spec.path, "duplicate parameter path replaced earlier values");
                    }
                }
                Err(err) => {
                    let error = err.at_path(&spec.path);
                    warn!(path = %spec.path, code = error.code(), "parameter rejected: {error}");
                    outcome.failures.push(ParameterFailure {
                        path: spec.path.clone(),
                        error,
                    });
                }
            }
        }
        outcome
    }
}
