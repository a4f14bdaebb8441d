//! Core memory type definitions.
//!
//! Defines [`FactKind`] (the classification vocabulary), [`Fact`] (a stored
//! statement about a user), and the transient values that flow through one
//! retrieval or admission call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;

/// Classification tag for a stored fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKind {
    /// Who the user is: background, circumstances, roles.
    Biography,
    /// What the user cares about or believes in.
    Value,
    /// Limits the coach must respect: time, health, obligations.
    Constraint,
    /// Likes, dislikes, preferred ways of working.
    Preference,
    /// Patterns and realizations surfaced during coaching.
    Insight,
}

impl FactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Biography => "biography",
            Self::Value => "value",
            Self::Constraint => "constraint",
            Self::Preference => "preference",
            Self::Insight => "insight",
        }
    }
}

impl std::fmt::Display for FactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biography" => Ok(Self::Biography),
            "value" => Ok(Self::Value),
            "constraint" => Ok(Self::Constraint),
            "preference" => Ok(Self::Preference),
            "insight" => Ok(Self::Insight),
            _ => Err(format!("unknown fact kind: {s}")),
        }
    }
}

/// A persisted statement about a user. Immutable once created; a newer fact
/// supersedes an older one only through retrieval ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    /// UUID v7 (time-sortable).
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub kind: FactKind,
    pub embedding: Embedding,
    pub created_at: DateTime<Utc>,
}

impl Fact {
    /// Build a new fact stamped with a fresh id and the current time.
    pub fn new(
        user_id: impl Into<String>,
        content: impl Into<String>,
        kind: FactKind,
        embedding: Embedding,
    ) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            user_id: user_id.into(),
            content: content.into(),
            kind,
            embedding,
            created_at: Utc::now(),
        }
    }

    /// Check the record invariants: non-empty content, embedding of the pinned size.
    pub fn validate(&self, dimensions: usize) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err(format!("fact {} has empty content", self.id));
        }
        if self.embedding.len() != dimensions {
            return Err(format!(
                "fact {} has {} dimensions, expected {dimensions}",
                self.id,
                self.embedding.len()
            ));
        }
        Ok(())
    }
}

/// A fact scored against one query. Lives only for the duration of a retrieval call.
#[derive(Debug, Clone)]
pub struct RetrievalCandidate {
    pub id: String,
    pub content: String,
    pub embedding: Embedding,
    pub created_at: DateTime<Utc>,
    /// Cosine similarity to the query.
    pub similarity: f64,
    /// Similarity blended with freshness.
    pub score: f64,
}

/// One entry of a retrieval result, for prompt building and debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievedFact {
    pub id: String,
    pub content: String,
    pub similarity: f64,
}

/// One completed coaching turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub utterance: String,
    pub reply: String,
}

impl Exchange {
    pub fn new(utterance: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
            reply: reply.into(),
        }
    }
}

/// A statement that passed admission, ready to be persisted as a new [`Fact`].
/// The embedding is the one computed during the duplicate check.
#[derive(Debug, Clone, Serialize)]
pub struct AdmittedStatement {
    pub content: String,
    pub kind: FactKind,
    pub embedding: Embedding,
}

impl AdmittedStatement {
    pub fn into_fact(self, user_id: impl Into<String>) -> Fact {
        Fact::new(user_id, self.content, self.kind, self.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_kind_round_trips_through_str() {
        for kind in [
            FactKind::Biography,
            FactKind::Value,
            FactKind::Constraint,
            FactKind::Preference,
            FactKind::Insight,
        ] {
            assert_eq!(kind.as_str().parse::<FactKind>().unwrap(), kind);
        }
        assert!("mood".parse::<FactKind>().is_err());
    }

    #[test]
    fn fact_serializes_kind_as_snake_case() {
        let fact = Fact::new("u1", "I prefer tea", FactKind::Preference, vec![1.0, 0.0]);
        let json = serde_json::to_value(&fact).unwrap();
        assert_eq!(json["kind"], "preference");
        assert_eq!(json["user_id"], "u1");
    }

    #[test]
    fn fact_validate_checks_invariants() {
        let fact = Fact::new("u1", "I am a nurse", FactKind::Biography, vec![0.0; 4]);
        assert!(fact.validate(4).is_ok());
        assert!(fact.validate(8).is_err());

        let empty = Fact::new("u1", "  ", FactKind::Insight, vec![0.0; 4]);
        assert!(empty.validate(4).is_err());
    }

    #[test]
    fn admitted_statement_becomes_fact() {
        let admitted = AdmittedStatement {
            content: "I never work on Sundays".into(),
            kind: FactKind::Constraint,
            embedding: vec![0.5, 0.5],
        };
        let fact = admitted.into_fact("u42");
        assert_eq!(fact.user_id, "u42");
        assert_eq!(fact.kind, FactKind::Constraint);
        assert_eq!(fact.embedding, vec![0.5, 0.5]);
        assert!(uuid::Uuid::parse_str(&fact.id).is_ok());
    }
}
