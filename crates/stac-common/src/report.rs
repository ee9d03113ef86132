//! Per-unit outcome tracking for batch runs.
//!
//! A batch never aborts on a single bad unit; failures are recorded with
//! the identifier of the unit that produced them and listed at the end.

use crate::error::StacError;

/// A unit of work that could not be completed.
#[derive(Debug)]
pub struct UnitFailure {
    /// Key, prefix or object id of the failed unit.
    pub id: String,
    pub error: StacError,
}

impl UnitFailure {
    pub fn new(id: impl Into<String>, error: StacError) -> Self {
        Self {
            id: id.into(),
            error,
        }
    }
}

/// Successful outputs plus recorded failures of one batch.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<UnitFailure>,
}

impl<T> BatchReport<T> {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Record the outcome of one unit.
    pub fn record(&mut self, id: impl Into<String>, outcome: Result<T, StacError>) {
        match outcome {
            Ok(value) => self.succeeded.push(value),
            Err(error) => self.failed.push(UnitFailure::new(id, error)),
        }
    }

    /// Identifiers of every failed unit, in the order they were recorded.
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.id.as_str()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

impl<T> Default for BatchReport<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, Result<T, StacError>)> for BatchReport<T> {
    fn from_iter<I: IntoIterator<Item = (String, Result<T, StacError>)>>(iter: I) -> Self {
        let mut report = Self::new();
        for (id, outcome) in iter {
            report.record(id, outcome);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_failures_separate() {
        let report: BatchReport<u32> = vec![
            ("a".to_string(), Ok(1)),
            ("b".to_string(), Err(StacError::Format("bad".into()))),
            ("c".to_string(), Ok(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.succeeded, vec![1, 3]);
        assert_eq!(report.failed_ids(), vec!["b"]);
        assert_eq!(report.total(), 3);
        assert!(!report.is_clean());
    }
}
