// crates/core/src/similarity/mod.rs
//! Pluggable redundancy filtering over scored messages.
//!
//! The planner should not say the same thing twice. Both filter
//! variants walk the batch in descending score order and keep a
//! message only while its similarity to everything already kept stays
//! below the threshold; the top message is always kept, so a non-empty
//! batch never filters to nothing.

pub mod embed;
pub mod encoder;
pub mod rule;

pub use embed::{cosine_similarity, EmbeddingFilter};
pub use encoder::{SentenceEncoder, WordVecEncoder};
pub use rule::RuleBasedFilter;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use eunlg_types::ScoredMessage;

use crate::error::FilterError;

/// Trait for redundancy filters over a score-ordered message batch.
pub trait SimilarityFilter: Send + Sync {
    /// Filter name for logging/display (e.g. "rule", "embedding").
    fn name(&self) -> &'static str;

    /// Keep the subset of `messages` that stays under `threshold`
    /// similarity to the messages already kept. Input order is
    /// preserved.
    fn filter(
        &self,
        messages: &[ScoredMessage],
        threshold: f64,
    ) -> Result<Vec<ScoredMessage>, FilterError>;
}

impl fmt::Debug for dyn SimilarityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimilarityFilter({})", self.name())
    }
}

/// Which filter implementation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterVariant {
    #[default]
    RuleBased,
    Embedding,
}

impl fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterVariant::RuleBased => "rule",
            FilterVariant::Embedding => "embedding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for FilterVariant {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rule" => Ok(FilterVariant::RuleBased),
            "embedding" => Ok(FilterVariant::Embedding),
            other => Err(FilterError::UnknownVariant {
                name: other.to_string(),
            }),
        }
    }
}

/// Configuration for building a similarity filter.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub variant: FilterVariant,
    /// Word vector file; required for the embedding variant.
    pub vectors_path: Option<PathBuf>,
}

/// Build the configured filter.
///
/// The embedding variant loads its word vectors here, at startup, so a
/// missing or malformed vector file fails fast instead of surfacing on
/// the first request.
pub fn create_filter(config: &FilterConfig) -> Result<Arc<dyn SimilarityFilter>, FilterError> {
    match config.variant {
        FilterVariant::RuleBased => Ok(Arc::new(RuleBasedFilter)),
        FilterVariant::Embedding => {
            let path = config
                .vectors_path
                .as_ref()
                .ok_or(FilterError::MissingVectors)?;
            let encoder = WordVecEncoder::load(path)?;
            tracing::info!(
                path = %path.display(),
                dim = encoder.dimension(),
                "loaded word vectors for embedding filter"
            );
            Ok(Arc::new(EmbeddingFilter::new(Arc::new(encoder))))
        }
    }
}
