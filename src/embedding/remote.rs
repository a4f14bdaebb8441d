//! Remote embedding provider for OpenAI-compatible `/embeddings` endpoints.
//!
//! Sends `{model, input, dimensions}` and reads `{data: [{index, embedding}]}`.
//! Every failure (transport, status, payload shape, wrong vector length from a
//! misconfigured model) is reported and never retried here.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::{ensure_dimensions, ensure_non_empty, Embedding, EmbeddingProvider};
use crate::config::EmbeddingConfig;
use crate::error::{MemoryError, Result};

/// Longest slice of an error body kept in the error message.
const MAX_ERROR_BODY_CHARS: usize = 240;

pub struct RemoteEmbeddingProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
    batch_size: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl RemoteEmbeddingProvider {
    pub fn new(config: &EmbeddingConfig) -> anyhow::Result<Self> {
        let api_base = config.api_base.trim_end_matches('/');
        anyhow::ensure!(!api_base.is_empty(), "embedding api_base must not be empty");

        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        if api_key.is_none() {
            tracing::debug!("no embedding API key configured; requests will be unauthenticated");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms.max(1)))
            .build()
            .context("failed to build embedding HTTP client")?;

        tracing::debug!(
            endpoint = %api_base,
            model = %config.model,
            dimensions = config.dimensions,
            "remote embedding provider configured"
        );

        Ok(Self {
            client,
            endpoint: format!("{api_base}/embeddings"),
            api_key,
            model: config.model.clone(),
            dimensions: config.dimensions,
            batch_size: config.batch_size.max(1),
        })
    }

    fn request(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .map_err(|e| MemoryError::encoding(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(MemoryError::encoding(format!(
                "embedding request failed with HTTP {}: {}",
                status.as_u16(),
                body.chars().take(MAX_ERROR_BODY_CHARS).collect::<String>()
            )));
        }

        let payload: EmbeddingResponse = response
            .json()
            .map_err(|e| MemoryError::encoding(format!("malformed embedding response: {e}")))?;

        if payload.data.len() != texts.len() {
            return Err(MemoryError::encoding(format!(
                "embedding response size mismatch: expected {}, got {}",
                texts.len(),
                payload.data.len()
            )));
        }

        let mut items = payload.data;
        if items.iter().all(|item| item.index.is_some()) {
            items.sort_by_key(|item| item.index);
        }

        items
            .into_iter()
            .map(|item| {
                ensure_dimensions(&item.embedding, self.dimensions)?;
                Ok(item.embedding)
            })
            .collect()
    }
}

impl EmbeddingProvider for RemoteEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut results = self.embed_batch(&[text])?;
        results
            .pop()
            .ok_or_else(|| MemoryError::encoding("embedding response was empty"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        for text in texts {
            ensure_non_empty(text)?;
        }

        let mut results = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            let started = std::time::Instant::now();
            results.extend(self.request(chunk)?);
            tracing::debug!(
                count = chunk.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "embedded batch"
            );
        }
        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model(&self) -> &str {
        &self.model
    }
}
