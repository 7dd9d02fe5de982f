//! Batch operations over every link.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

use super::engine::LinkEngine;
use super::remove::RemoveResult;
use super::repair::RepairOutcome;

/// Per-link outcomes of a batch operation, keyed by link name.
#[derive(Debug)]
pub struct BatchReport<T> {
    results: BTreeMap<String, Result<T>>,
}

impl<T> BatchReport<T> {
    /// Links that succeeded, in name order.
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &T)> {
        self.results
            .iter()
            .filter_map(|(name, result)| result.as_ref().ok().map(|value| (name.as_str(), value)))
    }

    /// Links that failed, in name order.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.results
            .iter()
            .filter_map(|(name, result)| result.as_ref().err().map(|err| (name.as_str(), err)))
    }

    /// Whether every link succeeded. An empty batch is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.results.values().all(Result::is_ok)
    }

    /// The outcome for `name`, if it was part of the batch.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Result<T>> {
        self.results.get(name)
    }

    /// Number of links processed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no links were processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> FromIterator<(String, Result<T>)> for BatchReport<T> {
    fn from_iter<I: IntoIterator<Item = (String, Result<T>)>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl LinkEngine<'_> {
    /// Repair every link. A failure never stops the batch.
    #[must_use]
    pub fn repair_all(&self) -> BatchReport<RepairOutcome> {
        self.run_batch("repair", |name| self.repair(name))
    }

    /// Remove every link. A failure never stops the batch.
    #[must_use]
    pub fn remove_all(&self) -> BatchReport<RemoveResult> {
        self.run_batch("remove", |name| self.remove(name))
    }

    fn run_batch<T>(&self, verb: &str, op: impl Fn(&str) -> Result<T>) -> BatchReport<T> {
        let names: Vec<String> = self
            .store
            .get_all()
            .into_iter()
            .map(|record| record.name().to_string())
            .collect();
        log::debug!("{verb} batch over {} link(s)", names.len());

        let report: BatchReport<T> = names
            .into_iter()
            .map(|name| {
                let result = op(&name);
                if let Err(e) = &result {
                    log::warn!("{verb} '{name}' failed: {e}");
                }
                (name, result)
            })
            .collect();

        log::info!(
            "{verb} batch finished: {} succeeded, {} failed",
            report.succeeded().count(),
            report.failed().count()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BatchReport<u8> {
        vec![
            ("b".to_string(), Ok(2)),
            (
                "a".to_string(),
                Err(Error::NotFound {
                    resource: "a".to_string(),
                }),
            ),
            ("c".to_string(), Ok(3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_report_partitions_results() {
        let report = sample();
        let ok: Vec<_> = report.succeeded().map(|(name, v)| (name, *v)).collect();
        let failed: Vec<_> = report.failed().map(|(name, _)| name).collect();

        assert_eq!(ok, [("b", 2), ("c", 3)]);
        assert_eq!(failed, ["a"]);
        assert!(!report.is_success());
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_empty_report_is_success() {
        let report: BatchReport<()> = std::iter::empty().collect();
        assert!(report.is_success());
        assert!(report.is_empty());
    }
}
