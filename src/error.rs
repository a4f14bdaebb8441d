//! Error kinds surfaced by the memory engine.
//!
//! Only two things can go wrong inside the engine: the embedding service is
//! unreachable (or refuses the request), or two embeddings from different
//! models meet in a comparison. Everything else is pure arithmetic or string
//! matching and cannot fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    /// The embedding service could not be reached or rejected the request.
    /// Never retried here; the caller owns the retry policy.
    #[error("embedding service unavailable: {0}")]
    EncodingUnavailable(String),

    /// Two embeddings of different length were compared. This is a
    /// configuration bug (mixed models), not a runtime condition.
    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

impl MemoryError {
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::EncodingUnavailable(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MemoryError>;
