use serde::{Deserialize, Serialize};
use sweep_core::errors::SweepError;
use sweep_core::{ParameterSpec, RngHandle};
use tracing::info;

use crate::config::EngineConfig;
use crate::dispatch::{ParameterDispatcher, ParameterFailure, SweepOutcome};
use crate::hash::stable_hash_string;
use crate::join::{ExperimentConfiguration, ExperimentJoiner};

/// Joined sweep together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub plan_hash: String,
    pub seed: u64,
    pub configurations: Vec<ExperimentConfiguration>,
    #[serde(default)]
    pub failures: Vec<ParameterFailure>,
}

/// Sweep generator owning its configuration and random generator.
///
/// The generator is seeded once from [`EngineConfig::seed`] and advances
/// with every call, so two engines built from the same configuration
/// produce identical output for identical inputs.
#[derive(Debug, Clone)]
pub struct SweepEngine {
    config: EngineConfig,
    rng: RngHandle,
}

impl SweepEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = RngHandle::from_seed(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn dispatcher(&self) -> ParameterDispatcher {
        ParameterDispatcher::new(self.config.mode, self.config.axis)
    }

    fn joiner(&self) -> ExperimentJoiner {
        ExperimentJoiner::new(self.config.max_configurations)
    }

    /// Generates the per-path value lists, collecting rejected parameters.
    pub fn generate(&mut self, specs: &[ParameterSpec]) -> SweepOutcome {
        let dispatcher = self.dispatcher();
        dispatcher.generate(specs, &mut self.rng)
    }

    /// Generates, joins and fingerprints a full sweep.
    pub fn run(&mut self, specs: &[ParameterSpec]) -> Result<SweepReport, SweepError> {
        let plan_hash = stable_hash_string(&(&self.config, specs))?;
        let outcome = self.generate(specs);
        let configurations = self.joiner().join(&outcome.values)?;
        info!(
            parameters = outcome.values.len(),
            failures = outcome.failures.len(),
            configurations = configurations.len(),
            "sweep generated"
        );
        Ok(SweepReport {
            plan_hash,
            seed: self.config.seed,
            configurations,
            failures: outcome.failures,
        })
    }
}
