//! Offline embedding provider using FNV-1a token hashing.
//!
//! Produces deterministic, L2-normalized vectors without any network call.
//! Texts sharing vocabulary land close together; it has no notion of meaning
//! beyond shared tokens, so it suits local runs and tests, not production ranking.

use super::{ensure_non_empty, l2_normalize, Embedding, EmbeddingProvider};
use crate::error::Result;

pub struct HashingEmbeddingProvider {
    dimensions: usize,
    model: String,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        let dimensions = dimensions.max(1);
        Self {
            dimensions,
            model: format!("fnv1a-hashing-{dimensions}"),
        }
    }
}

impl EmbeddingProvider for HashingEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Embedding> {
        ensure_non_empty(text)?;
        let mut vector = vec![0.0f32; self.dimensions];
        for raw_token in text.split(|c: char| !c.is_alphanumeric()) {
            if raw_token.is_empty() {
                continue;
            }
            let token = raw_token.to_lowercase();
            let hash = fnv1a_hash(token.as_bytes());
            let index = (hash % self.dimensions as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }
        l2_normalize(&mut vector);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn fnv1a_hash(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(PRIME))
}
