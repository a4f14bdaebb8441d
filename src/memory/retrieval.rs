//! Read path: query embedding, recency-blended ranking, MMR selection.
//!
//! [`retrieve`] is the entry point used by the coaching layer. It encodes the
//! utterance once, scores every stored fact, orders the pool by blended score,
//! then lets MMR pick a diverse top-k driven by topical similarity alone.

use chrono::{DateTime, Utc};

use super::diversity::select_diverse;
use super::recency::{recency_boost, RecencyWeights};
use super::similarity::cosine_similarity;
use super::types::{Fact, RetrievalCandidate, RetrievedFact};
use crate::config::RetrievalConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;

/// Score every fact against the query and sort by blended score, highest first.
/// The sort is stable, so equal scores keep fact order.
pub fn rank_candidates(
    query_embedding: &[f32],
    facts: &[Fact],
    weights: &RecencyWeights,
    now: DateTime<Utc>,
) -> Result<Vec<RetrievalCandidate>> {
    let mut candidates = facts
        .iter()
        .map(|fact| {
            let similarity = cosine_similarity(query_embedding, &fact.embedding)?;
            Ok(RetrievalCandidate {
                id: fact.id.clone(),
                content: fact.content.clone(),
                embedding: fact.embedding.clone(),
                created_at: fact.created_at,
                similarity,
                score: recency_boost(similarity, fact.created_at, now, weights),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(candidates)
}

/// Retrieve the most useful facts for `query` as of `now`.
pub fn retrieve_at(
    provider: &dyn EmbeddingProvider,
    query: &str,
    facts: &[Fact],
    config: &RetrievalConfig,
    now: DateTime<Utc>,
) -> Result<Vec<RetrievedFact>> {
    if facts.is_empty() || config.top_k == 0 {
        return Ok(vec![]);
    }

    let query_embedding = provider.embed(query)?;
    let weights = RecencyWeights::from(config);
    let ranked = rank_candidates(&query_embedding, facts, &weights, now)?;
    let selected = select_diverse(&ranked, config.mmr_lambda, config.top_k)?;

    tracing::debug!(
        facts = facts.len(),
        returned = selected.len(),
        top_k = config.top_k,
        "retrieval complete"
    );

    Ok(selected
        .into_iter()
        .map(|c| RetrievedFact {
            id: c.id,
            content: c.content,
            similarity: c.similarity,
        })
        .collect())
}

/// Retrieve the most useful facts for `query` as of now.
pub fn retrieve(
    provider: &dyn EmbeddingProvider,
    query: &str,
    facts: &[Fact],
    config: &RetrievalConfig,
) -> Result<Vec<RetrievedFact>> {
    retrieve_at(provider, query, facts, config, Utc::now())
}
