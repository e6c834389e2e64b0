//! Parameter sweep generation: sampled axes, typed value shapes, per-parameter
//! deduplication and the cross-parameter join into experiment configurations.

mod axis;
mod combos;
mod config;
mod dispatch;
mod engine;
mod hash;
mod join;
mod serde;
mod shape;
mod variance;

pub use axis::{linear_axis, log_axis, numeric_axis, AxisPoint, AxisPolicy, MAX_AXIS_LEN};
pub use combos::{product, unique_combinations};
pub use config::{EngineConfig, Sampling, SamplingMode};
pub use dispatch::{
    shape_for, ParameterDispatcher, ParameterFailure, SweepOutcome, ValueMap, ValueShape,
    TIMESTAMP_FORMAT,
};
pub use engine::{SweepEngine, SweepReport};
pub use hash::stable_hash_string;
pub use join::{ConfigurationSpace, Configurations, ExperimentConfiguration, ExperimentJoiner};
pub use shape::{
    array_values, component_values, flag_values, log_element, scalar_values, stack_rows,
    timestamp_values,
};
pub use variance::{
    perturb, perturb_axis, perturb_components, MAX_VARIANCE_BOUND, VARIANCE_FRACTION,
};

pub use crate::serde::{from_json_slice, from_yaml_str, to_canonical_json_bytes};
