use chrono::{Duration, NaiveDateTime};
use nalgebra::DMatrix;
use sweep_core::{CovarianceMatrix, Probability, StateVector, SweepValue, TypeTag};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Wraps sampled scalars as values of a scalar kind.
///
/// `int` truncates toward zero and `timedelta` reads each sample as a
/// number of days. Kinds without a scalar shape yield plain floats.
pub fn scalar_values(kind: TypeTag, axis: Vec<f64>) -> Vec<SweepValue> {
    axis.into_iter()
        .map(|value| match kind {
            TypeTag::Int => SweepValue::Int(value.trunc() as i64),
            TypeTag::Probability => SweepValue::Probability(Probability::new(value)),
            TypeTag::Duration => SweepValue::Duration(days(value)),
            TypeTag::Float
            | TypeTag::Bool
            | TypeTag::StateVector
            | TypeTag::CovarianceMatrix
            | TypeTag::Tuple
            | TypeTag::List
            | TypeTag::Timestamp
            | TypeTag::RawArray => SweepValue::Float(value),
        })
        .collect()
}

/// Wraps component tuples as values of a multi-component kind.
///
/// Kinds without a component shape yield plain tuples.
pub fn component_values(kind: TypeTag, combos: Vec<Vec<f64>>) -> Vec<SweepValue> {
    combos
        .into_iter()
        .map(|tuple| match kind {
            TypeTag::StateVector => SweepValue::StateVector(StateVector::from_components(tuple)),
            TypeTag::CovarianceMatrix => {
                SweepValue::Covariance(CovarianceMatrix::from_diagonal(&tuple))
            }
            TypeTag::List => SweepValue::List(tuple),
            TypeTag::Tuple
            | TypeTag::Int
            | TypeTag::Float
            | TypeTag::Probability
            | TypeTag::Bool
            | TypeTag::Timestamp
            | TypeTag::Duration
            | TypeTag::RawArray => SweepValue::Tuple(tuple),
        })
        .collect()
}

/// Stacks product rows into a `rows x width` array.
pub fn stack_rows(rows: &[Vec<f64>], width: usize) -> DMatrix<f64> {
    DMatrix::from_row_iterator(rows.len(), width, rows.iter().flatten().copied())
}

/// Splits a stacked array back into one value per row.
pub fn array_values(stacked: &DMatrix<f64>) -> Vec<SweepValue> {
    stacked
        .row_iter()
        .map(|row| SweepValue::Array(row.iter().copied().collect()))
        .collect()
}

/// Wraps sampled instants as timestamp values.
pub fn timestamp_values(axis: Vec<NaiveDateTime>) -> Vec<SweepValue> {
    axis.into_iter().map(SweepValue::Timestamp).collect()
}

/// Both truth values, whatever range the parameter declares.
pub fn flag_values() -> Vec<SweepValue> {
    vec![SweepValue::Bool(true), SweepValue::Bool(false)]
}

/// Applies the element cast used for logarithmic axes.
///
/// Integer-like kinds truncate toward zero; float-like kinds are untouched.
pub fn log_element(kind: TypeTag, value: f64) -> f64 {
    match kind {
        TypeTag::Int | TypeTag::StateVector | TypeTag::CovarianceMatrix => value.trunc(),
        TypeTag::Float
        | TypeTag::Probability
        | TypeTag::Bool
        | TypeTag::Tuple
        | TypeTag::List
        | TypeTag::Timestamp
        | TypeTag::Duration
        | TypeTag::RawArray => value,
    }
}

fn days(value: f64) -> Duration {
    Duration::microseconds((value * MICROS_PER_DAY).round() as i64)
}
