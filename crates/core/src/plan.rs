// crates/core/src/plan.rs
//! Document planning: order surviving messages into a headline and a
//! body.

use eunlg_types::{DocumentPlan, ScoredMessage};

use crate::error::PlanError;

/// Assemble a plan from the filtered batch.
///
/// The single best message becomes the headline; everything else forms
/// the body in descending score order, ties broken by extraction
/// sequence. An empty batch is an error, not an empty document.
pub fn build_plan(mut messages: Vec<ScoredMessage>) -> Result<DocumentPlan, PlanError> {
    messages.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.seq.cmp(&b.seq))
    });
    let mut rest = messages.into_iter();
    match rest.next() {
        Some(headline) => Ok(DocumentPlan::new(headline, rest.collect())),
        None => Err(PlanError::EmptyPlan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eunlg_types::{Message, Metrics, SectionRole, TimePeriod};

    fn scored(score: f64, seq: usize) -> ScoredMessage {
        ScoredMessage {
            message: Message {
                dataset: "cphi".to_string(),
                location: "FI".to_string(),
                variable: "hicp2015".to_string(),
                period: TimePeriod::Year(2020),
                metrics: Metrics::Value {
                    value: 1.0,
                    outlierness: 0.5,
                },
                text_key: "value".to_string(),
                provenance: vec![],
            },
            score,
            seq,
        }
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        assert!(matches!(build_plan(Vec::new()), Err(PlanError::EmptyPlan)));
    }

    #[test]
    fn test_top_score_becomes_headline() {
        let plan = build_plan(vec![scored(0.2, 0), scored(0.9, 1), scored(0.5, 2)]).unwrap();
        assert_eq!(plan.headline.role, SectionRole::Headline);
        assert_eq!(plan.headline_message().map(|m| m.seq), Some(1));
        let body: Vec<usize> = plan.body_messages().iter().map(|m| m.seq).collect();
        assert_eq!(body, vec![2, 0]);
    }

    #[test]
    fn test_single_message_plan_has_empty_body() {
        let plan = build_plan(vec![scored(0.4, 0)]).unwrap();
        assert_eq!(plan.headline_message().map(|m| m.seq), Some(0));
        assert!(plan.body_messages().is_empty());
        assert_eq!(plan.body.role, SectionRole::Body);
    }

    #[test]
    fn test_ties_break_on_sequence() {
        let plan = build_plan(vec![scored(0.5, 3), scored(0.5, 1), scored(0.5, 2)]).unwrap();
        assert_eq!(plan.headline_message().map(|m| m.seq), Some(1));
        let body: Vec<usize> = plan.body_messages().iter().map(|m| m.seq).collect();
        assert_eq!(body, vec![2, 3]);
    }
}
