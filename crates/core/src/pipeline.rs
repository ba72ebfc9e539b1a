// crates/core/src/pipeline.rs
//! End-to-end content selection: extract, score, filter, plan.
//!
//! The whole pass is pure over the data source, so one query always
//! produces one plan, byte for byte.

use std::sync::Arc;

use eunlg_types::{DocumentPlan, ScoreWeights, TimeRange};

use crate::error::PipelineError;
use crate::extract::extract_messages;
use crate::plan::build_plan;
use crate::score::score_and_rank;
use crate::similarity::SimilarityFilter;
use crate::source::ObservationSource;

/// Default similarity threshold when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Everything the selection pass needs besides the data itself.
#[derive(Clone)]
pub struct PipelineContext {
    pub weights: ScoreWeights,
    pub threshold: f64,
    pub filter: Arc<dyn SimilarityFilter>,
}

impl PipelineContext {
    /// Context with default weights and threshold.
    pub fn new(filter: Arc<dyn SimilarityFilter>) -> Self {
        Self {
            weights: ScoreWeights::default(),
            threshold: DEFAULT_THRESHOLD,
            filter,
        }
    }
}

/// What to report on.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub dataset: String,
    pub location: String,
    pub range: TimeRange,
}

/// Run the full selection pass and return the document plan.
pub fn run(
    ctx: &PipelineContext,
    source: &dyn ObservationSource,
    query: &ReportQuery,
) -> Result<DocumentPlan, PipelineError> {
    let messages = extract_messages(source, &query.dataset, &query.location, &query.range)?;
    let extracted = messages.len();
    let scored = score_and_rank(messages, &ctx.weights);
    let kept = ctx.filter.filter(&scored, ctx.threshold)?;
    tracing::debug!(
        dataset = %query.dataset,
        location = %query.location,
        filter = ctx.filter.name(),
        extracted,
        kept = kept.len(),
        "content selection complete"
    );
    build_plan(kept).map_err(|_| PipelineError::EmptyPlan {
        dataset: query.dataset.clone(),
        location: query.location.clone(),
    })
}
