// crates/core/src/similarity/encoder.rs
//! SentenceEncoder trait and the word-vector implementation behind the
//! embedding similarity filter.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::EncoderError;

/// Trait for turning a message description into a fixed-size vector.
///
/// Implementations include:
/// - `WordVecEncoder`: mean-pooled word vectors loaded from JSON
pub trait SentenceEncoder: Send + Sync {
    /// Encoder name for logging/display (e.g. "word-vec").
    fn name(&self) -> &'static str;

    /// Dimensionality of the vectors this encoder produces.
    fn dimension(&self) -> usize;

    /// Encode a whitespace-tokenized text into one vector.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError>;
}

/// On-disk layout of a word vector file.
#[derive(Debug, Deserialize)]
struct VectorFile {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

/// Mean-pooling encoder over a fixed word-vector vocabulary.
///
/// Out-of-vocabulary tokens get a deterministic pseudo-vector derived
/// from their SHA-256 digest, so unknown words still separate texts
/// and every run encodes identically.
#[derive(Debug)]
pub struct WordVecEncoder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordVecEncoder {
    /// Load a vocabulary from a JSON file of the form
    /// `{"dim": N, "vectors": {"token": [f32; N], ...}}`.
    pub fn load(path: &Path) -> Result<Self, EncoderError> {
        let raw = std::fs::read_to_string(path).map_err(|e| EncoderError::io(path, e))?;
        let file: VectorFile =
            serde_json::from_str(&raw).map_err(|e| EncoderError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_vocab(file.dim, file.vectors)
    }

    /// Build an encoder from an in-memory vocabulary.
    pub fn from_vocab(
        dim: usize,
        vectors: HashMap<String, Vec<f32>>,
    ) -> Result<Self, EncoderError> {
        for (token, vector) in &vectors {
            if vector.len() != dim {
                return Err(EncoderError::DimensionMismatch {
                    token: token.clone(),
                    expected: dim,
                    actual: vector.len(),
                });
            }
        }
        Ok(Self { dim, vectors })
    }

    /// Deterministic unit-length vector for a token outside the
    /// vocabulary.
    fn hashed_vector(&self, token: &str) -> Vec<f32> {
        let digest = Sha256::digest(token.as_bytes());
        let mut vector: Vec<f32> = (0..self.dim)
            .map(|i| f32::from(digest[i % digest.len()]) / 127.5 - 1.0)
            .collect();
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl SentenceEncoder for WordVecEncoder {
    fn name(&self) -> &'static str {
        "word-vec"
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        fn accumulate(pooled: &mut [f32], vector: &[f32]) {
            for (sum, v) in pooled.iter_mut().zip(vector) {
                *sum += v;
            }
        }

        let mut pooled = vec![0.0f32; self.dim];
        let mut count = 0usize;
        for token in text.split_whitespace() {
            match self.vectors.get(token) {
                Some(vector) => accumulate(&mut pooled, vector),
                None => accumulate(&mut pooled, &self.hashed_vector(token)),
            }
            count += 1;
        }
        if count > 0 {
            for v in &mut pooled {
                *v /= count as f32;
            }
        }
        Ok(pooled)
    }
}
