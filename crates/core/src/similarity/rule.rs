// crates/core/src/similarity/rule.rs
//! Identity-based similarity: two messages are duplicates when they
//! share fact kind, variable and period.

use std::collections::BTreeSet;

use eunlg_types::{FactKind, ScoredMessage, TimePeriod};

use crate::error::FilterError;
use crate::similarity::SimilarityFilter;

/// Cheap default filter with no model dependency.
///
/// Similarity is binary: 1.0 against an already-kept message with the
/// same (kind, variable, period), 0.0 otherwise. With the usual
/// threshold in (0, 1] that drops exact repeats and nothing else.
pub struct RuleBasedFilter;

impl SimilarityFilter for RuleBasedFilter {
    fn name(&self) -> &'static str {
        "rule"
    }

    fn filter(
        &self,
        messages: &[ScoredMessage],
        threshold: f64,
    ) -> Result<Vec<ScoredMessage>, FilterError> {
        let mut kept_keys: BTreeSet<(FactKind, String, TimePeriod)> = BTreeSet::new();
        let mut kept = Vec::new();
        for scored in messages {
            let key = (
                scored.message.kind(),
                scored.message.variable.clone(),
                scored.message.period,
            );
            let similarity = if kept_keys.contains(&key) { 1.0 } else { 0.0 };
            if kept.is_empty() || similarity < threshold {
                kept_keys.insert(key);
                kept.push(scored.clone());
            }
        }
        Ok(kept)
    }
}
