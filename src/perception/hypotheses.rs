//! Owned collection of localization hypotheses

use crate::common::Hypothesis;
use crate::error::{LocalizationError, Result};

/// Default upper bound on the number of hypotheses a set may hold
pub const DEFAULT_MAX_HYPOTHESES: usize = 10_000;

/// An insertion-ordered set of hypotheses.
///
/// The set owns its elements outright: `clone` produces an independent copy and
/// `clear` drops every element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypothesisSet {
    hypotheses: Vec<Hypothesis>,
    limit: usize,
}

impl HypothesisSet {
    /// Create an empty set with the default capacity limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_HYPOTHESES)
    }

    /// Create an empty set holding at most `limit` hypotheses
    pub fn with_limit(limit: usize) -> Self {
        HypothesisSet {
            hypotheses: Vec::new(),
            limit,
        }
    }

    /// Append a hypothesis at the end
    pub fn append(&mut self, hypothesis: Hypothesis) -> Result<()> {
        if self.hypotheses.len() >= self.limit {
            return Err(LocalizationError::CapacityExceeded { limit: self.limit });
        }
        self.hypotheses.push(hypothesis);
        Ok(())
    }

    /// Hypothesis at `index`.
    ///
    /// Panics if `index` is not below `count()`.
    pub fn get(&self, index: usize) -> &Hypothesis {
        assert!(
            index < self.hypotheses.len(),
            "hypothesis index {} out of range for set of {}",
            index,
            self.hypotheses.len()
        );
        &self.hypotheses[index]
    }

    /// Number of hypotheses held
    pub fn count(&self) -> usize {
        self.hypotheses.len()
    }

    /// Whether every hypothesis has been ruled out
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Maximum number of hypotheses this set accepts
    pub fn capacity_limit(&self) -> usize {
        self.limit
    }

    /// Drop every hypothesis
    pub fn clear(&mut self) {
        self.hypotheses.clear();
    }

    /// Whether an equal hypothesis is held
    pub fn contains(&self, hypothesis: &Hypothesis) -> bool {
        self.hypotheses.contains(hypothesis)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Hypothesis> {
        self.hypotheses.iter()
    }
}

impl Default for HypothesisSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a HypothesisSet {
    type Item = &'a Hypothesis;
    type IntoIter = std::slice::Iter<'a, Hypothesis>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
