#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use coach_recall::embedding::{Embedding, EmbeddingProvider};
use coach_recall::error::{MemoryError, Result};
use coach_recall::memory::{Fact, FactKind};

pub const DIM: usize = 8;

/// Deterministic encoder: texts registered with [`FakeProvider::with`] map to
/// fixed vectors, anything else maps to a spike at a position derived from its length.
pub struct FakeProvider {
    vectors: HashMap<String, Embedding>,
    failing: AtomicBool,
    pub calls: AtomicUsize,
    pub texts_encoded: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            vectors: HashMap::new(),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            texts_encoded: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, text: &str, vector: Embedding) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts_encoded(&self) -> usize {
        self.texts_encoded.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for FakeProvider {
    fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.embed_batch(&[text])?.remove(0))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(MemoryError::encoding("fake encoder is down"));
        }
        self.texts_encoded.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|t| {
                self.vectors
                    .get(*t)
                    .cloned()
                    .unwrap_or_else(|| spike(t.len() % DIM))
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        DIM
    }

    fn model(&self) -> &str {
        "fake-encoder"
    }
}

/// Unit vector along axis `i`.
pub fn spike(i: usize) -> Embedding {
    let mut v = vec![0.0f32; DIM];
    v[i % DIM] = 1.0;
    v
}

/// Unit vector whose cosine similarity with `spike(0)` is exactly-ish `sim`,
/// leaning towards axis `axis` for the remainder.
pub fn toward_axis0(sim: f32, axis: usize) -> Embedding {
    let mut v = vec![0.0f32; DIM];
    v[0] = sim;
    v[axis] = (1.0 - sim * sim).sqrt();
    v
}

pub fn fact_at(id: &str, content: &str, embedding: Embedding, created_at: DateTime<Utc>) -> Fact {
    Fact {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        content: content.to_string(),
        kind: FactKind::Insight,
        embedding,
        created_at,
    }
}

pub fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}
