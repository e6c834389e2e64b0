#![deny(missing_docs)]
#![doc = "Shared vocabulary for the parameter sweep engine: parameter specifications, typed sweep values, the seeded RNG handle and structured errors."]

pub mod errors;
pub mod rng;
pub mod spec;
pub mod value;

pub use errors::{ErrorInfo, SweepError};
pub use rng::RngHandle;
pub use spec::{Bound, ParameterSpec, SampleCount, TypeTag};
pub use value::{CovarianceMatrix, Probability, StateVector, SweepValue};
