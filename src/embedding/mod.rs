//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait, a remote OpenAI-compatible
//! implementation, an offline hashing implementation, and an explicit
//! [`EmbeddingCache`] owned by the caller. The provider is created via
//! [`create_provider`] from configuration.

pub mod cache;
pub mod hashing;
pub mod remote;

pub use cache::EmbeddingCache;

use crate::error::{MemoryError, Result};

/// A fixed-length vector produced by one pinned encoder model.
pub type Embedding = Vec<f32>;

/// Trait for embedding text into vectors.
///
/// Every vector a provider returns has exactly [`dimensions`](Self::dimensions)
/// components. All methods are blocking; callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Embedding>;

    /// Embed a batch of text strings, preserving input order.
    /// Implementations may override for batched requests.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Number of dimensions this provider produces.
    fn dimensions(&self) -> usize;

    /// Identity of the pinned model. Embeddings from different models must never be mixed.
    fn model(&self) -> &str;
}

/// Create an embedding provider from config.
///
/// Supported providers: `"openai"` (any OpenAI-compatible `/embeddings` endpoint)
/// and `"hashing"` (deterministic, offline).
pub fn create_provider(
    config: &crate::config::EmbeddingConfig,
) -> anyhow::Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "openai" => {
            let provider = remote::RemoteEmbeddingProvider::new(config)?;
            Ok(Box::new(provider))
        }
        "hashing" => Ok(Box::new(hashing::HashingEmbeddingProvider::new(
            config.dimensions,
        ))),
        other => anyhow::bail!("unknown embedding provider: {other}. Supported: openai, hashing"),
    }
}

/// Reject empty input before it reaches the service.
pub(crate) fn ensure_non_empty(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(MemoryError::encoding("refusing to embed empty text"));
    }
    Ok(())
}

/// Check a returned vector against the pinned dimensionality.
pub(crate) fn ensure_dimensions(embedding: &[f32], expected: usize) -> Result<()> {
    if embedding.len() != expected {
        return Err(MemoryError::DimensionMismatch {
            left: embedding.len(),
            right: expected,
        });
    }
    Ok(())
}

/// L2-normalize a vector in place. A zero vector is left untouched.
pub(crate) fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
