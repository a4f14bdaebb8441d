//! Caller-owned embedding cache.
//!
//! One cache per encoder model. The caller decides its lifetime (one admission
//! pass, one session, ...) and passes it in; nothing here is process-global.

use std::collections::HashMap;

use super::{Embedding, EmbeddingProvider};
use crate::error::{MemoryError, Result};

#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: HashMap<String, Embedding>,
    model: Option<String>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embed one text, reusing a cached vector when present.
    pub fn get_or_embed(
        &mut self,
        provider: &dyn EmbeddingProvider,
        text: &str,
    ) -> Result<Embedding> {
        let mut out = self.get_or_embed_all(provider, &[text])?;
        out.pop()
            .ok_or_else(|| MemoryError::encoding("embedding response was empty"))
    }

    /// Embed every text, in input order. Misses are sent to the provider as one
    /// batch and each distinct text is encoded at most once.
    pub fn get_or_embed_all(
        &mut self,
        provider: &dyn EmbeddingProvider,
        texts: &[&str],
    ) -> Result<Vec<Embedding>> {
        self.bind_model(provider.model());

        let mut misses: Vec<&str> = Vec::new();
        for text in texts {
            if !self.entries.contains_key(*text) && !misses.contains(text) {
                misses.push(*text);
            }
        }

        if !misses.is_empty() {
            let embeddings = provider.embed_batch(&misses)?;
            if embeddings.len() != misses.len() {
                return Err(MemoryError::encoding(format!(
                    "provider returned {} embeddings for {} texts",
                    embeddings.len(),
                    misses.len()
                )));
            }
            for (text, embedding) in misses.iter().zip(embeddings) {
                self.entries.insert((*text).to_string(), embedding);
            }
        }

        tracing::trace!(
            requested = texts.len(),
            encoded = misses.len(),
            "embedding cache lookup"
        );

        Ok(texts
            .iter()
            .filter_map(|text| self.entries.get(*text).cloned())
            .collect())
    }

    /// Drop all entries if the provider's model differs from the one that filled the cache.
    fn bind_model(&mut self, model: &str) {
        if self.model.as_deref() == Some(model) {
            return;
        }
        if let Some(old) = self.model.replace(model.to_string()) {
            tracing::debug!(%old, new = %model, "embedding model changed, clearing cache");
            self.entries.clear();
        }
    }
}
