use serde::{Deserialize, Serialize};
use sweep_core::errors::{ErrorInfo, SweepError};

use crate::axis::AxisPolicy;
use crate::serde::{from_json_slice, from_yaml_str};

/// How nominal values are turned into swept values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMode {
    /// Systematic grid over each axis.
    #[default]
    Grid,
    /// Monte Carlo draws from an exponential distribution (not available).
    Exponential,
    /// Monte Carlo draws from a log-normal distribution (not available).
    LogNormal,
    /// Integer jitter of up to 10% around each linear grid value.
    Variance,
}

/// Sampling plan resolved from an implemented [`SamplingMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Grid sampling under the given axis policy.
    Grid(AxisPolicy),
    /// Variance perturbation around linear grid values.
    Variance,
}

impl SamplingMode {
    /// Returns the kebab-case label of the mode.
    pub fn label(&self) -> &'static str {
        match self {
            SamplingMode::Grid => "grid",
            SamplingMode::Exponential => "exponential",
            SamplingMode::LogNormal => "log-normal",
            SamplingMode::Variance => "variance",
        }
    }

    /// Resolves the mode into a sampling plan, failing for modes that are
    /// declared but not implemented.
    pub fn resolve(self, axis: AxisPolicy) -> Result<Sampling, SweepError> {
        match self {
            SamplingMode::Grid => Ok(Sampling::Grid(axis)),
            SamplingMode::Variance => Ok(Sampling::Variance),
            SamplingMode::Exponential | SamplingMode::LogNormal => Err(SweepError::Mode(
                ErrorInfo::new("unimplemented-mode", "sampling mode is not implemented")
                    .with_context("mode", self.label())
                    .with_hint("use `grid` or `variance`"),
            )),
        }
    }
}

/// Engine settings, loadable from YAML or JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Seed for the engine's random generator.
    #[serde(default)]
    pub seed: u64,
    /// Sampling mode applied to every non-boolean parameter.
    #[serde(default)]
    pub mode: SamplingMode,
    /// Axis policy used by grid sampling.
    #[serde(default)]
    pub axis: AxisPolicy,
    /// Upper bound on the number of joined configurations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_configurations: Option<usize>,
}

impl EngineConfig {
    /// Creates a grid configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, SweepError> {
        from_yaml_str(text)
    }

    /// Parses a configuration from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, SweepError> {
        from_json_slice(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_defaults_fill_missing_fields() {
        let config = EngineConfig::from_yaml_str("seed: 42\nmode: variance\n").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.mode, SamplingMode::Variance);
        assert_eq!(config.axis, AxisPolicy::Linear);
        assert_eq!(config.max_configurations, None);
    }

    #[test]
    fn json_config_parses_axis_and_cap() {
        let config = EngineConfig::from_json_slice(
            br#"{"axis": "logarithmic", "mode": "log-normal", "max_configurations": 10}"#,
        )
        .unwrap();
        assert_eq!(config.axis, AxisPolicy::Logarithmic);
        assert_eq!(config.mode, SamplingMode::LogNormal);
        assert_eq!(config.max_configurations, Some(10));
    }

    #[test]
    fn unimplemented_modes_fail_to_resolve() {
        for mode in [SamplingMode::Exponential, SamplingMode::LogNormal] {
            let err = mode.resolve(AxisPolicy::Linear).unwrap_err();
            assert_eq!(err.code(), "unimplemented-mode");
            assert_eq!(err.info().context["mode"], mode.label());
        }
        assert_eq!(
            SamplingMode::Grid.resolve(AxisPolicy::Logarithmic).unwrap(),
            Sampling::Grid(AxisPolicy::Logarithmic)
        );
    }

    #[test]
    fn malformed_yaml_is_a_serde_error() {
        let err = EngineConfig::from_yaml_str("mode: [grid").unwrap_err();
        assert!(matches!(err, SweepError::Serde(_)));
    }
}
