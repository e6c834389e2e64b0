//! Typed values handed to downstream runs, one per sampled point.

use chrono::{Duration, NaiveDateTime};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Scalar probability wrapper.
///
/// The raw value is taken as given; callers are expected to keep it in
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Wraps a raw scalar as a probability.
    pub fn new(raw: f64) -> Self {
        Self(raw)
    }

    /// Returns the raw scalar.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Ordered column vector of state components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector(DVector<f64>);

impl StateVector {
    /// Builds a state vector from components in order.
    pub fn from_components(components: Vec<f64>) -> Self {
        Self(DVector::from_vec(components))
    }

    /// Returns the components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the vector has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Square covariance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CovarianceMatrix(DMatrix<f64>);

impl CovarianceMatrix {
    /// Builds a square matrix with `diagonal` on the diagonal and zeros elsewhere.
    pub fn from_diagonal(diagonal: &[f64]) -> Self {
        Self(DMatrix::from_diagonal(&DVector::from_column_slice(diagonal)))
    }

    /// Returns the side length of the matrix.
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// Returns the diagonal entries in order.
    pub fn diagonal(&self) -> Vec<f64> {
        self.0.diagonal().iter().copied().collect()
    }

    /// Returns the entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.0.get((row, col)).copied()
    }
}

/// Concrete value assigned to one parameter path in one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum SweepValue {
    /// Whole number.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// Probability scalar.
    Probability(Probability),
    /// Boolean flag.
    Bool(bool),
    /// State vector.
    StateVector(StateVector),
    /// Diagonal covariance matrix.
    Covariance(CovarianceMatrix),
    /// Fixed arity tuple.
    Tuple(Vec<f64>),
    /// Growable list.
    List(Vec<f64>),
    /// Calendar timestamp without time zone.
    Timestamp(NaiveDateTime),
    /// Elapsed time, serialized as whole microseconds.
    Duration(#[serde(with = "duration_micros")] Duration),
    /// One row of a stacked numeric array.
    Array(Vec<f64>),
}

impl SweepValue {
    /// Returns the scalar numeric content, if the value is scalar numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SweepValue::Int(value) => Some(*value as f64),
            SweepValue::Float(value) => Some(*value),
            SweepValue::Probability(value) => Some(value.value()),
            _ => None,
        }
    }

    /// Returns the component values of a multi-component value.
    pub fn components(&self) -> Option<Vec<f64>> {
        match self {
            SweepValue::StateVector(vector) => Some(vector.as_slice().to_vec()),
            SweepValue::Covariance(matrix) => Some(matrix.diagonal()),
            SweepValue::Tuple(values) | SweepValue::List(values) | SweepValue::Array(values) => {
                Some(values.clone())
            }
            _ => None,
        }
    }
}

mod duration_micros {
    use chrono::Duration;
    use serde::{ser::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let micros = value
            .num_microseconds()
            .ok_or_else(|| S::Error::custom("duration overflows microsecond precision"))?;
        serializer.serialize_i64(micros)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let micros = i64::deserialize(deserializer)?;
        Ok(Duration::microseconds(micros))
    }
}
