// crates/core/src/similarity/embed.rs
//! Embedding-based similarity: greedy selection over cosine distance
//! between encoded message descriptions.

use std::sync::Arc;

use eunlg_types::{Message, ScoredMessage};

use crate::error::FilterError;
use crate::similarity::encoder::SentenceEncoder;
use crate::similarity::SimilarityFilter;

/// Filter that keeps a message only while it stays sufficiently far
/// from everything already kept.
///
/// Messages arrive in descending score order, so the greedy pass keeps
/// the most interesting representative of each near-duplicate cluster.
pub struct EmbeddingFilter {
    encoder: Arc<dyn SentenceEncoder>,
}

impl EmbeddingFilter {
    pub fn new(encoder: Arc<dyn SentenceEncoder>) -> Self {
        Self { encoder }
    }
}

/// Lowercased token string fed to the encoder.
///
/// Token order is fixed, so the same message always encodes to the
/// same vector.
fn describe(message: &Message) -> String {
    let mut tokens: Vec<String> = Vec::new();
    tokens.push(message.location.to_lowercase());
    tokens.extend(
        message
            .variable
            .split(['_', '-'])
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase),
    );
    tokens.push(message.period.to_string().to_lowercase());
    tokens.push(message.kind().to_string());
    tokens.extend(
        message
            .text_key
            .split('-')
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase),
    );
    tokens.join(" ")
}

/// Cosine similarity of two equal-length vectors.
///
/// Zero-norm vectors compare as 0.0 to everything, so messages with no
/// usable tokens never blockade the selection.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

impl SimilarityFilter for EmbeddingFilter {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn filter(
        &self,
        messages: &[ScoredMessage],
        threshold: f64,
    ) -> Result<Vec<ScoredMessage>, FilterError> {
        let mut kept: Vec<ScoredMessage> = Vec::new();
        let mut kept_vectors: Vec<Vec<f32>> = Vec::new();
        for scored in messages {
            let vector = self.encoder.encode(&describe(&scored.message))?;
            let closest = kept_vectors
                .iter()
                .map(|v| cosine_similarity(v, &vector))
                .fold(f64::NEG_INFINITY, f64::max);
            if kept.is_empty() || closest < threshold {
                kept.push(scored.clone());
                kept_vectors.push(vector);
            }
        }
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::encoder::WordVecEncoder;
    use eunlg_types::{Metrics, TimePeriod};
    use std::collections::HashMap;

    fn scored(variable: &str, text_key: &str, score: f64, seq: usize) -> ScoredMessage {
        ScoredMessage {
            message: Message {
                dataset: "cphi".to_string(),
                location: "FI".to_string(),
                variable: variable.to_string(),
                period: TimePeriod::Year(2020),
                metrics: Metrics::Value {
                    value: 1.0,
                    outlierness: 0.5,
                },
                text_key: text_key.to_string(),
                provenance: vec![],
            },
            score,
            seq,
        }
    }

    /// Vocabulary covering every describe() token, with `rank` and
    /// `comparison` nearly parallel and `trend` orthogonal to both.
    fn test_encoder() -> Arc<WordVecEncoder> {
        let mut vocab: HashMap<String, Vec<f32>> = HashMap::new();
        for token in ["fi", "hicp2015", "2020", "value"] {
            vocab.insert(token.to_string(), vec![0.0, 0.0, 1.0]);
        }
        vocab.insert("rank".to_string(), vec![1.0, 0.0, 0.0]);
        vocab.insert("comparison".to_string(), vec![0.98, 0.2, 0.0]);
        vocab.insert("comp".to_string(), vec![0.98, 0.2, 0.0]);
        vocab.insert("above".to_string(), vec![0.98, 0.2, 0.0]);
        vocab.insert("trend".to_string(), vec![0.0, 1.0, 0.0]);
        vocab.insert("rise".to_string(), vec![0.0, 1.0, 0.0]);
        Arc::new(WordVecEncoder::from_vocab(3, vocab).unwrap())
    }

    #[test]
    fn test_cosine_identical() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_describe_is_stable() {
        let a = scored("hicp2015", "trend-rise", 1.0, 0);
        assert_eq!(describe(&a.message), describe(&a.message));
        assert!(describe(&a.message).contains("trend"));
        assert!(describe(&a.message).contains("rise"));
        assert!(describe(&a.message).contains("fi"));
    }

    #[test]
    fn test_near_parallel_descriptions_collapse() {
        let filter = EmbeddingFilter::new(test_encoder());
        let mut rank = scored("hicp2015", "rank", 0.9, 0);
        rank.message.metrics = Metrics::Rank { position: 1, of: 5 };
        let mut comp = scored("hicp2015", "comp-above", 0.7, 1);
        comp.message.metrics = Metrics::Comparison {
            value: 1.0,
            reference: 0.9,
            delta: 0.1,
        };
        let trend = {
            let mut m = scored("hicp2015", "trend-rise", 0.8, 2);
            m.message.metrics = Metrics::Trend {
                from: 1.0,
                to: 1.1,
                change_pct: 10.0,
            };
            m
        };

        let kept = filter
            .filter(&[rank.clone(), trend.clone(), comp], 0.9)
            .unwrap();
        let seqs: Vec<usize> = kept.iter().map(|k| k.seq).collect();
        // The comparison rides the same axis as the rank and is culled;
        // the trend is orthogonal and survives.
        assert_eq!(seqs, vec![0, 2]);
    }

    #[test]
    fn test_keeps_first_even_at_zero_threshold() {
        let filter = EmbeddingFilter::new(test_encoder());
        let batch = vec![
            scored("hicp2015", "value", 0.9, 0),
            scored("hicp2015", "value", 0.5, 1),
        ];
        let kept = filter.filter(&batch, 0.0).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].seq, 0);
    }

    #[test]
    fn test_no_kept_pair_reaches_threshold() {
        let filter = EmbeddingFilter::new(test_encoder());
        let batch = vec![
            scored("hicp2015", "value", 0.9, 0),
            scored("hicp2015", "rank", 0.8, 1),
            scored("hicp2015", "value", 0.7, 2),
            scored("hicp2015", "trend-rise", 0.6, 3),
        ];
        let threshold = 0.8;
        let kept = filter.filter(&batch, threshold).unwrap();
        let encoder = test_encoder();
        for i in 0..kept.len() {
            for j in (i + 1)..kept.len() {
                let a = encoder.encode(&describe(&kept[i].message)).unwrap();
                let b = encoder.encode(&describe(&kept[j].message)).unwrap();
                assert!(
                    cosine_similarity(&a, &b) < threshold,
                    "kept pair ({i}, {j}) too similar"
                );
            }
        }
    }
}
