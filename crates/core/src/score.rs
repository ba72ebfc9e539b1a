// crates/core/src/score.rs
//! Interestingness scoring for extracted messages.
//!
//! A message scores `kind_weight * kind_term * recency`:
//! - value facts use their peer-group outlierness
//! - rank facts decay geometrically with distance from either end of
//!   the table (1st and last are equally newsworthy)
//! - trend and comparison facts use a saturating effect size of the
//!   relative change
//!
//! Recency decays quadratically with age measured against the newest
//! period in the batch, so a stale front-runner never outranks fresh
//! news. No wall clock is involved.

use eunlg_types::{Message, Metrics, ScoredMessage, ScoreWeights, TimePeriod};

/// Multiplier applied per step away from the nearest end of a ranking.
const RANK_DECAY: f64 = 0.7;

/// Map a relative difference to a 0.0-1.0 effect size.
///
/// Piecewise-linear with a long tail:
/// - < 10%  -> small effect (maps to 0.0-0.2)
/// - 10-25% -> medium effect (maps to 0.2-0.5)
/// - 25-50% -> large effect (maps to 0.5-0.8)
/// - > 50%  -> saturates towards 1.0
pub fn effect_size(relative_diff: f64) -> f64 {
    let d = relative_diff.abs();
    let raw = if d < 0.10 {
        d * 2.0 // 0.0 - 0.2
    } else if d < 0.25 {
        0.2 + (d - 0.10) * 2.0 // 0.2 - 0.5
    } else if d < 0.50 {
        0.5 + (d - 0.25) * 1.2 // 0.5 - 0.8
    } else {
        0.8 + (d - 0.50).min(0.2) // 0.8 - 1.0
    };
    raw.clamp(0.0, 1.0)
}

/// Kind-specific base term before weighting and recency.
fn kind_term(metrics: &Metrics) -> f64 {
    match metrics {
        Metrics::Value { outlierness, .. } => *outlierness,
        Metrics::Rank { position, of } => {
            let from_bottom = (of + 1).saturating_sub(*position);
            let extremity = (*position).min(from_bottom).max(1);
            RANK_DECAY.powi(extremity as i32 - 1)
        }
        Metrics::Trend { change_pct, .. } => effect_size(change_pct / 100.0),
        Metrics::Comparison {
            reference, delta, ..
        } => {
            if *reference == 0.0 || !reference.is_finite() {
                return 0.0;
            }
            effect_size(delta / reference.abs())
        }
    }
}

/// Recency factor for a period, against the newest period in the batch.
fn recency(period: &TimePeriod, latest: &TimePeriod) -> f64 {
    let age = period.age_in_years(latest);
    1.0 / ((1.0 + age) * (1.0 + age))
}

/// Score a single message. `latest` anchors the recency decay.
pub fn score_message(message: &Message, weights: &ScoreWeights, latest: &TimePeriod) -> f64 {
    weights.for_kind(message.kind()) * kind_term(&message.metrics) * recency(&message.period, latest)
}

/// Score a batch and order it by descending interestingness.
///
/// Sequence numbers record the extraction order and break score ties
/// (the sort is stable), so equal batches always come out in the same
/// order. Non-finite scores collapse to 0.0.
pub fn score_and_rank(messages: Vec<Message>, weights: &ScoreWeights) -> Vec<ScoredMessage> {
    let Some(latest) = messages.iter().map(|m| m.period).max() else {
        return Vec::new();
    };
    let mut scored: Vec<ScoredMessage> = messages
        .into_iter()
        .enumerate()
        .map(|(seq, message)| {
            let mut score = score_message(&message, weights, &latest);
            if !score.is_finite() {
                score = 0.0;
            }
            ScoredMessage {
                message,
                score,
                seq,
            }
        })
        .collect();
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_messages;
    use crate::source::test_helpers::{cphi_panel, FixtureSource};
    use eunlg_types::{FactKind, Observation, TimeRange};

    fn message_with(metrics: Metrics, period: TimePeriod) -> Message {
        Message {
            dataset: "cphi".to_string(),
            location: "FI".to_string(),
            variable: "hicp2015".to_string(),
            period,
            metrics,
            text_key: "value".to_string(),
            provenance: vec![],
        }
    }

    #[test]
    fn test_effect_size_small() {
        let score = effect_size(0.05);
        assert!((score - 0.1).abs() < 1e-12, "5% diff should be 0.1, got {score}");
    }

    #[test]
    fn test_effect_size_medium() {
        let score = effect_size(0.15);
        assert!(score > 0.2 && score < 0.5, "15% diff should be medium, got {score}");
    }

    #[test]
    fn test_effect_size_saturates() {
        assert_eq!(effect_size(0.70), 1.0);
        assert_eq!(effect_size(5.0), 1.0);
    }

    #[test]
    fn test_effect_size_symmetric() {
        assert_eq!(effect_size(-0.15), effect_size(0.15));
    }

    #[test]
    fn test_rank_decay_from_both_ends() {
        let latest = TimePeriod::Year(2020);
        let weights = ScoreWeights::default();
        let score_at = |position| {
            score_message(
                &message_with(Metrics::Rank { position, of: 5 }, latest),
                &weights,
                &latest,
            )
        };
        // 1st and 5th of 5 are both extremity 1.
        assert_eq!(score_at(1), score_at(5));
        assert_eq!(score_at(2), score_at(4));
        assert!(score_at(1) > score_at(2));
        assert!(score_at(2) > score_at(3));
        assert!((score_at(3) - 1.5 * 0.49).abs() < 1e-12);
    }

    #[test]
    fn test_recency_decays_quadratically() {
        let latest = TimePeriod::Year(2020);
        let weights = ScoreWeights::default();
        let metrics = Metrics::Value {
            value: 1.0,
            outlierness: 1.0,
        };
        let fresh = score_message(&message_with(metrics.clone(), latest), &weights, &latest);
        let aged = score_message(
            &message_with(metrics, TimePeriod::Year(2018)),
            &weights,
            &latest,
        );
        assert!((fresh - 1.0).abs() < 1e-12);
        assert!((aged - 1.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_reference_comparison_scores_zero() {
        let latest = TimePeriod::Year(2020);
        let score = score_message(
            &message_with(
                Metrics::Comparison {
                    value: 3.0,
                    reference: 0.0,
                    delta: 3.0,
                },
                latest,
            ),
            &ScoreWeights::default(),
            &latest,
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_empty_batch_scores_empty() {
        assert!(score_and_rank(Vec::new(), &ScoreWeights::default()).is_empty());
    }

    #[test]
    fn test_scores_descend_and_ties_keep_sequence() {
        let source = FixtureSource::new(cphi_panel());
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let scored = score_and_rank(messages, &ScoreWeights::default());
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].seq < pair[1].seq);
            }
        }
    }

    #[test]
    fn test_fresh_trend_headline_on_panel() {
        // FI rises 5% into 2020 but sits mid-table; the trend wins.
        let source = FixtureSource::new(cphi_panel());
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let scored = score_and_rank(messages, &ScoreWeights::default());
        assert_eq!(scored[0].message.kind(), FactKind::Trend);
        assert_eq!(scored[0].message.text_key, "trend-rise");
    }

    #[test]
    fn test_latest_anchor_is_data_relative() {
        // An all-2015 batch is as fresh as an all-2020 one.
        let obs = Observation {
            dataset: "cphi".to_string(),
            location: "FI".to_string(),
            variable: "hicp2015".to_string(),
            period: TimePeriod::Year(2015),
            value: 100.0,
            unit: "index".to_string(),
        };
        let source = FixtureSource::new(vec![obs]);
        let messages = extract_messages(&source, "cphi", "FI", &TimeRange::all()).unwrap();
        let scored = score_and_rank(messages, &ScoreWeights::default());
        let expected = match scored[0].message.metrics {
            Metrics::Value { outlierness, .. } => outlierness,
            _ => panic!("expected a value message"),
        };
        assert!((scored[0].score - expected).abs() < 1e-12);
    }
}
