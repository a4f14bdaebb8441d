//! Recency weighting: blends topical similarity with exponential-decay freshness.

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Blend weights and decay rate for the recency boost.
#[derive(Debug, Clone, Copy)]
pub struct RecencyWeights {
    /// Share of the score taken by similarity; freshness gets `1 - similarity_weight`.
    pub similarity_weight: f64,
    /// Age at which freshness falls to one half.
    pub half_life_days: f64,
}

impl Default for RecencyWeights {
    fn default() -> Self {
        Self {
            similarity_weight: 0.7,
            half_life_days: 30.0,
        }
    }
}

impl From<&crate::config::RetrievalConfig> for RecencyWeights {
    fn from(config: &crate::config::RetrievalConfig) -> Self {
        Self {
            similarity_weight: config.similarity_weight,
            half_life_days: config.half_life_days,
        }
    }
}

/// `1.0` at age zero, `0.5` at one half-life. Future timestamps count as age zero.
pub fn freshness(created_at: DateTime<Utc>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    let age_seconds = (now - created_at).num_milliseconds() as f64 / 1000.0;
    let age_days = (age_seconds / SECONDS_PER_DAY).max(0.0);
    (-std::f64::consts::LN_2 * age_days / half_life_days).exp()
}

/// Blend `similarity` with the freshness of a fact created at `created_at`.
pub fn recency_boost(
    similarity: f64,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    weights: &RecencyWeights,
) -> f64 {
    let fresh = freshness(created_at, now, weights.half_life_days);
    weights.similarity_weight * similarity + (1.0 - weights.similarity_weight) * fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_age_zero_gets_full_freshness() {
        let w = RecencyWeights::default();
        let score = recency_boost(0.6, now(), now(), &w);
        assert!((score - (0.7 * 0.6 + 0.3 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_one_half_life_halves_freshness() {
        let w = RecencyWeights::default();
        let created = now() - Duration::days(30);
        let score = recency_boost(0.6, created, now(), &w);
        assert!((score - (0.7 * 0.6 + 0.3 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_future_timestamp_is_clamped() {
        let created = now() + Duration::days(5);
        assert_eq!(freshness(created, now(), 30.0), 1.0);
    }

    #[test]
    fn test_freshness_decays_monotonically() {
        let a = freshness(now() - Duration::days(1), now(), 30.0);
        let b = freshness(now() - Duration::days(10), now(), 30.0);
        let c = freshness(now() - Duration::days(90), now(), 30.0);
        assert!(a > b && b > c);
        assert!((c - 0.125).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights() {
        let w = RecencyWeights {
            similarity_weight: 1.0,
            half_life_days: 7.0,
        };
        let score = recency_boost(0.42, now() - Duration::days(400), now(), &w);
        assert!((score - 0.42).abs() < 1e-12);
    }
}
