use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sweep_core::errors::{ErrorInfo, SweepError};
use sweep_core::SweepValue;

use crate::dispatch::ValueMap;

/// One complete assignment of values to every swept path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperimentConfiguration(IndexMap<String, SweepValue>);

impl ExperimentConfiguration {
    /// Returns the value assigned to `path`.
    pub fn get(&self, path: &str) -> Option<&SweepValue> {
        self.0.get(path)
    }

    /// Iterates the paths in input order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates `(path, value)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SweepValue)> {
        self.0.iter().map(|(path, value)| (path.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the configuration, returning the underlying map.
    pub fn into_inner(self) -> IndexMap<String, SweepValue> {
        self.0
    }
}

/// Cartesian product of per-path value lists, enumerated lazily.
///
/// The size is known up front. Every call to [`ConfigurationSpace::iter`]
/// starts a fresh pass over the same sequence.
#[derive(Debug, Clone)]
pub struct ConfigurationSpace<'a> {
    columns: Vec<(&'a str, &'a [SweepValue])>,
    len: usize,
}

impl<'a> ConfigurationSpace<'a> {
    /// Builds the space over `values`, failing if its size overflows `usize`.
    pub fn new(values: &'a ValueMap) -> Result<Self, SweepError> {
        let columns: Vec<(&str, &[SweepValue])> = values
            .iter()
            .map(|(path, list)| (path.as_str(), list.as_slice()))
            .collect();
        let mut len = 1usize;
        for (path, list) in &columns {
            len = len.checked_mul(list.len()).ok_or_else(|| {
                SweepError::Capacity(
                    ErrorInfo::new("space-too-large", "configuration count overflows")
                        .with_context("path", *path),
                )
            })?;
        }
        Ok(Self { columns, len })
    }

    /// Rejects the space when it holds more than `limit` configurations.
    pub fn limited(self, limit: Option<usize>) -> Result<Self, SweepError> {
        match limit {
            Some(limit) if self.len > limit => Err(SweepError::Capacity(
                ErrorInfo::new("space-too-large", "sweep exceeds the configuration limit")
                    .with_context("configurations", self.len.to_string())
                    .with_context("limit", limit.to_string())
                    .with_hint("reduce n_samples or raise max_configurations"),
            )),
            _ => Ok(self),
        }
    }

    /// Number of configurations in the space.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Starts a pass over the configurations; the last path varies fastest.
    pub fn iter(&self) -> Configurations<'_> {
        Configurations {
            columns: &self.columns,
            cursor: vec![0; self.columns.len()],
            remaining: self.len,
        }
    }
}

/// Iterator over a [`ConfigurationSpace`].
#[derive(Debug, Clone)]
pub struct Configurations<'s> {
    columns: &'s [(&'s str, &'s [SweepValue])],
    cursor: Vec<usize>,
    remaining: usize,
}

impl Iterator for Configurations<'_> {
    type Item = ExperimentConfiguration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self
            .columns
            .iter()
            .zip(&self.cursor)
            .map(|((path, list), idx)| (path.to_string(), list[*idx].clone()))
            .collect();
        self.remaining -= 1;
        for (slot, (_, list)) in self.cursor.iter_mut().zip(self.columns).rev() {
            *slot += 1;
            if *slot < list.len() {
                break;
            }
            *slot = 0;
        }
        Some(ExperimentConfiguration(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Configurations<'_> {}

/// Joins per-path value lists into complete configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperimentJoiner {
    pub max_configurations: Option<usize>,
}

impl ExperimentJoiner {
    pub fn new(max_configurations: Option<usize>) -> Self {
        Self { max_configurations }
    }

    /// Checks the size of the join without enumerating it.
    pub fn space<'a>(&self, values: &'a ValueMap) -> Result<ConfigurationSpace<'a>, SweepError> {
        ConfigurationSpace::new(values)?.limited(self.max_configurations)
    }

    /// Materializes every configuration of the join.
    pub fn join(&self, values: &ValueMap) -> Result<Vec<ExperimentConfiguration>, SweepError> {
        Ok(self.space(values)?.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<SweepValue> {
        values.iter().copied().map(SweepValue::Int).collect()
    }

    #[test]
    fn odometer_order_matches_product() {
        let mut values = ValueMap::new();
        values.insert("a".into(), ints(&[1, 2]));
        values.insert("b".into(), ints(&[10, 20, 30]));
        let configs = ExperimentJoiner::default().join(&values).unwrap();
        let pairs: Vec<(i64, i64)> = configs
            .iter()
            .map(|config| {
                let a = config.get("a").and_then(SweepValue::as_f64).unwrap() as i64;
                let b = config.get("b").and_then(SweepValue::as_f64).unwrap() as i64;
                (a, b)
            })
            .collect();
        assert_eq!(
            pairs,
            vec![(1, 10), (1, 20), (1, 30), (2, 10), (2, 20), (2, 30)]
        );
        assert_eq!(configs[0].paths().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn empty_map_yields_one_empty_configuration() {
        let values = ValueMap::new();
        let configs = ExperimentJoiner::default().join(&values).unwrap();
        assert_eq!(configs, vec![ExperimentConfiguration::default()]);
    }

    #[test]
    fn empty_list_yields_nothing() {
        let mut values = ValueMap::new();
        values.insert("a".into(), ints(&[1, 2]));
        values.insert("b".into(), Vec::new());
        let space = ExperimentJoiner::default().space(&values).unwrap();
        assert!(space.is_empty());
        assert_eq!(space.iter().count(), 0);
    }

    #[test]
    fn passes_restart_from_the_beginning() {
        let mut values = ValueMap::new();
        values.insert("a".into(), ints(&[1, 2, 3]));
        let space = ConfigurationSpace::new(&values).unwrap();
        let mut first = space.iter();
        assert_eq!(first.len(), 3);
        first.next();
        assert_eq!(first.len(), 2);
        let again: Vec<_> = space.iter().collect();
        assert_eq!(again.len(), 3);
        assert_eq!(again[0].get("a"), Some(&SweepValue::Int(1)));
    }

    #[test]
    fn limit_rejects_large_spaces() {
        let mut values = ValueMap::new();
        values.insert("a".into(), ints(&[1, 2, 3]));
        values.insert("b".into(), ints(&[1, 2, 3]));
        let err = ExperimentJoiner::new(Some(8)).join(&values).unwrap_err();
        assert_eq!(err.code(), "space-too-large");
        assert_eq!(err.info().context["configurations"], "9");
        assert_eq!(ExperimentJoiner::new(Some(9)).join(&values).unwrap().len(), 9);
    }
}
