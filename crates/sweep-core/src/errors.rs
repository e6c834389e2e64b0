//! Structured error types shared across the sweep crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SweepError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, field names, bounds, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the sweep engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SweepError {
    /// Malformed parameter specifications (missing fields, wrong shapes).
    #[error("spec error: {0}")]
    Spec(ErrorInfo),
    /// Numeric ranges that cannot be sampled.
    #[error("range error: {0}")]
    Range(ErrorInfo),
    /// Sampling modes that are declared but not available.
    #[error("mode error: {0}")]
    Mode(ErrorInfo),
    /// Variance perturbation bounds that admit no integer draw.
    #[error("variance error: {0}")]
    Variance(ErrorInfo),
    /// Sweep spaces that exceed the configured or addressable size.
    #[error("capacity error: {0}")]
    Capacity(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SweepError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SweepError::Spec(info)
            | SweepError::Range(info)
            | SweepError::Mode(info)
            | SweepError::Variance(info)
            | SweepError::Capacity(info)
            | SweepError::Serde(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Builds the error reported when a parameter lacks a required field.
    pub fn missing_field(path: &str, field: &str) -> Self {
        SweepError::Spec(
            ErrorInfo::new("missing-field", "parameter is missing a required field")
                .with_context("path", path)
                .with_context("field", field),
        )
    }

    /// Builds the error reported when `min > max` on a sampled axis.
    pub fn invalid_range(min: impl Display, max: impl Display) -> Self {
        SweepError::Range(
            ErrorInfo::new("invalid-range", "axis minimum exceeds its maximum")
                .with_context("min", min.to_string())
                .with_context("max", max.to_string()),
        )
    }

    /// Attaches the parameter path to the error context, keeping any
    /// path already recorded.
    pub fn at_path(self, path: &str) -> Self {
        let attach = |mut info: ErrorInfo| {
            info.context
                .entry("path".to_string())
                .or_insert_with(|| path.to_string());
            info
        };
        match self {
            SweepError::Spec(info) => SweepError::Spec(attach(info)),
            SweepError::Range(info) => SweepError::Range(attach(info)),
            SweepError::Mode(info) => SweepError::Mode(attach(info)),
            SweepError::Variance(info) => SweepError::Variance(attach(info)),
            SweepError::Capacity(info) => SweepError::Capacity(attach(info)),
            SweepError::Serde(info) => SweepError::Serde(attach(info)),
        }
    }
}
