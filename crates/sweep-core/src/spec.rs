//! Declarative description of a single swept parameter.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SweepError};

/// Declared kind of a swept parameter.
///
/// The serialized labels match the type names used by existing parameter
/// files (`int`, `StateVector`, `DateTime`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// Whole number, truncated toward zero from the sampled value.
    #[serde(rename = "int")]
    Int,
    /// Floating point scalar.
    #[serde(rename = "float")]
    Float,
    /// Scalar assumed to lie in `[0, 1]`.
    #[serde(rename = "Probability")]
    Probability,
    /// Flag swept over both truth values.
    #[serde(rename = "bool")]
    Bool,
    /// Column vector with one sampled axis per component.
    #[serde(rename = "StateVector")]
    StateVector,
    /// Square matrix carrying one sampled axis per diagonal entry.
    #[serde(rename = "CovarianceMatrix")]
    CovarianceMatrix,
    /// Fixed arity tuple with one sampled axis per element.
    #[serde(rename = "Tuple")]
    Tuple,
    /// Growable list with one sampled axis per element.
    #[serde(rename = "list")]
    List,
    /// Calendar timestamp sampled between two parsed endpoints.
    #[serde(rename = "DateTime")]
    Timestamp,
    /// Elapsed time expressed as a number of days.
    #[serde(rename = "timedelta")]
    Duration,
    /// Plain numeric array rows, joined without deduplication.
    #[serde(rename = "ndarray")]
    RawArray,
}

impl TypeTag {
    /// Returns the label used in parameter files.
    pub fn label(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Probability => "Probability",
            TypeTag::Bool => "bool",
            TypeTag::StateVector => "StateVector",
            TypeTag::CovarianceMatrix => "CovarianceMatrix",
            TypeTag::Tuple => "Tuple",
            TypeTag::List => "list",
            TypeTag::Timestamp => "DateTime",
            TypeTag::Duration => "timedelta",
            TypeTag::RawArray => "ndarray",
        }
    }

    /// Returns true when the kind carries one sampled axis per component.
    pub fn is_multi_component(&self) -> bool {
        matches!(
            self,
            TypeTag::StateVector
                | TypeTag::CovarianceMatrix
                | TypeTag::Tuple
                | TypeTag::List
                | TypeTag::RawArray
        )
    }
}

/// Endpoint of a sampled range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    /// Single numeric endpoint for scalar kinds.
    Scalar(f64),
    /// One numeric endpoint per component.
    Components(Vec<f64>),
    /// Textual endpoint, used for timestamps.
    Text(String),
}

/// Number of interior samples requested for an axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleCount {
    /// One count shared by every component.
    Scalar(i64),
    /// One count per component.
    Components(Vec<i64>),
}

/// Declarative description of one swept parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Target field in the downstream configuration schema.
    pub path: String,
    /// Declared kind selecting how values are built.
    #[serde(rename = "type")]
    pub kind: TypeTag,
    /// Lower endpoint of the sampled range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_min: Option<Bound>,
    /// Upper endpoint of the sampled range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_max: Option<Bound>,
    /// Interior sample count; absent means endpoints only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_samples: Option<SampleCount>,
}

impl ParameterSpec {
    /// Describes a scalar parameter (`int`, `float`, `Probability`, `timedelta`).
    pub fn scalar(
        path: impl Into<String>,
        kind: TypeTag,
        min: f64,
        max: f64,
        n_samples: i64,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            value_min: Some(Bound::Scalar(min)),
            value_max: Some(Bound::Scalar(max)),
            n_samples: Some(SampleCount::Scalar(n_samples)),
        }
    }

    /// Describes a multi-component parameter with per-component counts.
    pub fn components(
        path: impl Into<String>,
        kind: TypeTag,
        min: Vec<f64>,
        max: Vec<f64>,
        n_samples: Vec<i64>,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            value_min: Some(Bound::Components(min)),
            value_max: Some(Bound::Components(max)),
            n_samples: Some(SampleCount::Components(n_samples)),
        }
    }

    /// Describes a timestamp parameter from two `YYYY-MM-DD HH:MM:SS.ffffff` strings.
    pub fn timestamp(
        path: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
        n_samples: i64,
    ) -> Self {
        Self {
            path: path.into(),
            kind: TypeTag::Timestamp,
            value_min: Some(Bound::Text(min.into())),
            value_max: Some(Bound::Text(max.into())),
            n_samples: Some(SampleCount::Scalar(n_samples)),
        }
    }

    /// Describes a boolean parameter; ranges are irrelevant for flags.
    pub fn flag(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TypeTag::Bool,
            value_min: None,
            value_max: None,
            n_samples: None,
        }
    }

    /// Returns both endpoints, reporting whichever is absent.
    pub fn bounds(&self) -> Result<(&Bound, &Bound), SweepError> {
        let min = self
            .value_min
            .as_ref()
            .ok_or_else(|| SweepError::missing_field(&self.path, "value_min"))?;
        let max = self
            .value_max
            .as_ref()
            .ok_or_else(|| SweepError::missing_field(&self.path, "value_max"))?;
        Ok((min, max))
    }

    /// Returns the numeric endpoints of a scalar parameter.
    pub fn scalar_bounds(&self) -> Result<(f64, f64), SweepError> {
        let (min, max) = self.bounds()?;
        Ok((
            self.expect_scalar(min, "value_min")?,
            self.expect_scalar(max, "value_max")?,
        ))
    }

    /// Returns the textual endpoints of a timestamp parameter.
    pub fn text_bounds(&self) -> Result<(&str, &str), SweepError> {
        let (min, max) = self.bounds()?;
        match (min, max) {
            (Bound::Text(min), Bound::Text(max)) => Ok((min.as_str(), max.as_str())),
            _ => Err(self.shape_mismatch("value_min/value_max", "text endpoints")),
        }
    }

    /// Returns the per-component endpoints of a multi-component parameter.
    pub fn component_bounds(&self) -> Result<(&[f64], &[f64]), SweepError> {
        let (min, max) = self.bounds()?;
        let min = match min {
            Bound::Components(values) => values.as_slice(),
            _ => return Err(self.shape_mismatch("value_min", "a list of numbers")),
        };
        let max = match max {
            Bound::Components(values) => values.as_slice(),
            _ => return Err(self.shape_mismatch("value_max", "a list of numbers")),
        };
        if min.len() != max.len() {
            return Err(SweepError::Spec(
                ErrorInfo::new("shape-mismatch", "value_min and value_max differ in length")
                    .with_context("path", self.path.clone())
                    .with_context("min_len", min.len().to_string())
                    .with_context("max_len", max.len().to_string()),
            ));
        }
        if min.is_empty() {
            return Err(self.shape_mismatch("value_min", "at least one component"));
        }
        Ok((min, max))
    }

    /// Returns the interior sample count of a scalar parameter.
    pub fn scalar_count(&self) -> Result<Option<i64>, SweepError> {
        match &self.n_samples {
            None => Ok(None),
            Some(SampleCount::Scalar(n)) => Ok(Some(*n)),
            Some(SampleCount::Components(_)) => {
                Err(self.shape_mismatch("n_samples", "a single integer"))
            }
        }
    }

    /// Returns one interior sample count per component, broadcasting a
    /// single count across all of them.
    pub fn component_counts(&self, components: usize) -> Result<Vec<Option<i64>>, SweepError> {
        match &self.n_samples {
            None => Ok(vec![None; components]),
            Some(SampleCount::Scalar(n)) => Ok(vec![Some(*n); components]),
            Some(SampleCount::Components(counts)) if counts.len() == components => {
                Ok(counts.iter().copied().map(Some).collect())
            }
            Some(SampleCount::Components(counts)) => Err(SweepError::Spec(
                ErrorInfo::new(
                    "shape-mismatch",
                    "n_samples does not match the number of components",
                )
                .with_context("path", self.path.clone())
                .with_context("components", components.to_string())
                .with_context("counts", counts.len().to_string()),
            )),
        }
    }

    fn expect_scalar(&self, bound: &Bound, field: &str) -> Result<f64, SweepError> {
        match bound {
            Bound::Scalar(value) => Ok(*value),
            _ => Err(self.shape_mismatch(field, "a single number")),
        }
    }

    fn shape_mismatch(&self, field: &str, expected: &str) -> SweepError {
        SweepError::Spec(
            ErrorInfo::new("shape-mismatch", "field has the wrong shape for its type")
                .with_context("path", self.path.clone())
                .with_context("field", field)
                .with_context("type", self.kind.label())
                .with_hint(format!("expected {expected}")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_counts_cover_every_component() {
        let mut spec = ParameterSpec::components(
            "platform.velocity",
            TypeTag::StateVector,
            vec![0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![],
        );
        spec.n_samples = Some(SampleCount::Scalar(2));
        assert_eq!(spec.component_counts(3).unwrap(), vec![Some(2); 3]);
    }

    #[test]
    fn mismatched_counts_are_rejected() {
        let spec = ParameterSpec::components(
            "platform.velocity",
            TypeTag::StateVector,
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![1],
        );
        let err = spec.component_counts(2).unwrap_err();
        assert_eq!(err.code(), "shape-mismatch");
    }

    #[test]
    fn absent_endpoint_reports_field() {
        let mut spec = ParameterSpec::scalar("tracker.hits", TypeTag::Int, 1.0, 5.0, 1);
        spec.value_max = None;
        let err = spec.scalar_bounds().unwrap_err();
        assert_eq!(err.code(), "missing-field");
        assert_eq!(err.info().context["field"], "value_max");
        assert_eq!(err.info().context["path"], "tracker.hits");
    }
}
