//! Write-back gate: decides which statements from a session become facts.
//!
//! A statement is admitted only when it is stable (a durable claim about the
//! user), actionable (something the coach can use), and not a near-duplicate of
//! a stored fact or of a statement admitted earlier in the same pass. The first
//! two are cheap lexical checks run before any encoding; the duplicate check
//! embeds only the survivors, in one batch.
//! Missing a real fact is preferred over polluting memory with chatter.

use super::similarity::cosine_similarity;
use super::types::{AdmittedStatement, Fact, FactKind};
use crate::embedding::{EmbeddingCache, EmbeddingProvider};
use crate::error::Result;

/// First-person ownership phrasing and frequency adverbs.
const STABILITY_MARKERS: &[&str] = &[
    "i am",
    "i'm",
    "i have",
    "i've",
    "my goal",
    "my goals",
    "my habit",
    "my habits",
    "my preference",
    "my routine",
    "always",
    "never",
    "usually",
    "typically",
    "consistently",
    "every day",
    "every morning",
    "every night",
    "every week",
];

/// Preferences, goals, and behavioral patterns. Frequency adverbs count too:
/// "I always skip breakfast" describes a pattern the coach can work with.
const ACTIONABILITY_MARKERS: &[&str] = &[
    "should",
    "need to",
    "needs to",
    "want to",
    "prefer",
    "prefers",
    "struggle with",
    "struggle to",
    "good at",
    "bad at",
    "goal",
    "habit",
    "trying to",
    "tend to",
    "always",
    "never",
    "usually",
    "typically",
    "consistently",
];

const PREFERENCE_MARKERS: &[&str] = &[
    "prefer", "prefers", "like", "love", "enjoy", "hate", "dislike",
];
const CONSTRAINT_MARKERS: &[&str] = &[
    "can't",
    "cannot",
    "unable to",
    "need to",
    "have to",
    "struggle with",
    "struggle to",
    "allergic",
    "no time",
];
const VALUE_MARKERS: &[&str] = &[
    "value",
    "believe",
    "important to me",
    "matters to me",
    "care about",
];
const BIOGRAPHY_MARKERS: &[&str] = &[
    "i am",
    "i'm",
    "i work",
    "i live",
    "i was born",
    "my job",
    "my family",
];

/// Lowercase words with typographic apostrophes folded to ASCII. Apostrophes
/// used as quote marks are stripped from the ends of each word.
fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(['\u{2019}', '\u{2018}'], "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when any phrase appears in `words` on word boundaries.
fn contains_any(words: &[String], phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| {
        let needle: Vec<&str> = phrase.split(' ').collect();
        words
            .windows(needle.len())
            .any(|window| window.iter().zip(&needle).all(|(w, n)| w == n))
    })
}

/// Does the text read as a durable claim about the user?
pub fn is_stable(text: &str) -> bool {
    contains_any(&words(text), STABILITY_MARKERS)
}

/// Does the text describe something the coach could act on?
pub fn is_actionable(text: &str) -> bool {
    contains_any(&words(text), ACTIONABILITY_MARKERS)
}

impl FactKind {
    /// Lexical best guess at the tag for an admitted statement.
    pub fn infer(text: &str) -> FactKind {
        let w = words(text);
        if contains_any(&w, PREFERENCE_MARKERS) {
            FactKind::Preference
        } else if contains_any(&w, CONSTRAINT_MARKERS) {
            FactKind::Constraint
        } else if contains_any(&w, VALUE_MARKERS) {
            FactKind::Value
        } else if contains_any(&w, BIOGRAPHY_MARKERS) {
            FactKind::Biography
        } else {
            FactKind::Insight
        }
    }
}

/// Return the candidates worth persisting, in input order.
///
/// Each survivor carries the embedding computed for its duplicate check so the
/// caller can store it without encoding again. Encoder failures propagate.
pub fn filter_for_admission(
    candidates: &[&str],
    existing: &[Fact],
    provider: &dyn EmbeddingProvider,
    cache: &mut EmbeddingCache,
    duplicate_threshold: f64,
) -> Result<Vec<AdmittedStatement>> {
    let lexical: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|text| is_stable(text) && is_actionable(text))
        .collect();

    if lexical.is_empty() {
        tracing::debug!(candidates = candidates.len(), "no candidate passed lexical checks");
        return Ok(vec![]);
    }

    let embeddings = cache.get_or_embed_all(provider, &lexical)?;

    let mut admitted: Vec<AdmittedStatement> = Vec::with_capacity(lexical.len());
    'candidates: for (text, embedding) in lexical.into_iter().zip(embeddings) {
        for fact in existing {
            let sim = cosine_similarity(&embedding, &fact.embedding)?;
            if sim >= duplicate_threshold {
                tracing::debug!(
                    existing_id = %fact.id,
                    similarity = sim,
                    "rejecting near-duplicate statement"
                );
                continue 'candidates;
            }
        }
        // Earlier survivors of this pass count as stored.
        for earlier in &admitted {
            let sim = cosine_similarity(&embedding, &earlier.embedding)?;
            if sim >= duplicate_threshold {
                tracing::debug!(similarity = sim, "rejecting statement repeated within the pass");
                continue 'candidates;
            }
        }
        admitted.push(AdmittedStatement {
            content: text.to_string(),
            kind: FactKind::infer(text),
            embedding,
        });
    }

    tracing::debug!(
        candidates = candidates.len(),
        admitted = admitted.len(),
        "admission pass complete"
    );
    Ok(admitted)
}
