//! Maximal Marginal Relevance selection.
//!
//! Greedily picks up to `top_k` candidates, trading relevance (each candidate's
//! `similarity` to the query) against redundancy with what is already picked.
//! O(top_k × candidates) cosine comparisons; fine for one user's fact set.

use super::similarity::cosine_similarity;
use super::types::RetrievalCandidate;
use crate::error::Result;

/// Select up to `top_k` candidates in selection order, most representative first.
///
/// `lambda = 1.0` ignores redundancy and degenerates to top-k by similarity;
/// `lambda = 0.0` only rewards novelty after the first pick. Ties are broken by
/// input order so the result is deterministic.
pub fn select_diverse(
    candidates: &[RetrievalCandidate],
    lambda: f64,
    top_k: usize,
) -> Result<Vec<RetrievalCandidate>> {
    if candidates.is_empty() || top_k == 0 {
        return Ok(vec![]);
    }

    // Seed with the most similar candidate; first occurrence wins ties.
    let mut seed = 0;
    for (i, c) in candidates.iter().enumerate().skip(1) {
        if c.similarity > candidates[seed].similarity {
            seed = i;
        }
    }

    let mut selected: Vec<usize> = vec![seed];
    let mut remaining: Vec<usize> = (0..candidates.len()).filter(|&i| i != seed).collect();
    // Running max similarity of each candidate to the selected set.
    let mut max_sim_to_selected = vec![f64::NEG_INFINITY; candidates.len()];

    while selected.len() < top_k && !remaining.is_empty() {
        let last = &candidates[selected[selected.len() - 1]];

        let mut best: Option<(usize, f64)> = None;
        for (pos, &i) in remaining.iter().enumerate() {
            let candidate = &candidates[i];
            let sim = cosine_similarity(&candidate.embedding, &last.embedding)?;
            if sim > max_sim_to_selected[i] {
                max_sim_to_selected[i] = sim;
            }

            let mmr = lambda * candidate.similarity - (1.0 - lambda) * max_sim_to_selected[i];
            match best {
                Some((_, best_score)) if mmr <= best_score => {}
                _ => best = Some((pos, mmr)),
            }
        }

        let Some((pos, _)) = best else { break };
        selected.push(remaining.remove(pos));
    }

    tracing::trace!(
        candidates = candidates.len(),
        selected = selected.len(),
        lambda,
        "mmr selection complete"
    );

    Ok(selected.into_iter().map(|i| candidates[i].clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn candidate(id: &str, similarity: f64, embedding: Vec<f32>) -> RetrievalCandidate {
        RetrievalCandidate {
            id: id.into(),
            content: format!("fact {id}"),
            embedding,
            created_at: Utc::now(),
            similarity,
            score: similarity,
        }
    }

    fn ids(selected: &[RetrievalCandidate]) -> Vec<&str> {
        selected.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(select_diverse(&[], 0.5, 8).unwrap().is_empty());
    }

    #[test]
    fn test_seed_is_most_similar() {
        let cands = vec![
            candidate("a", 0.4, vec![1.0, 0.0]),
            candidate("b", 0.9, vec![0.0, 1.0]),
        ];
        let out = select_diverse(&cands, 0.5, 1).unwrap();
        assert_eq!(ids(&out), vec!["b"]);
    }

    #[test]
    fn test_seed_tie_keeps_first() {
        let cands = vec![
            candidate("a", 0.8, vec![1.0, 0.0]),
            candidate("b", 0.8, vec![0.0, 1.0]),
        ];
        let out = select_diverse(&cands, 0.5, 1).unwrap();
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn test_near_duplicate_is_suppressed() {
        let cands = vec![
            candidate("mornings", 0.95, vec![1.0, 0.0, 0.0]),
            candidate("mornings-again", 0.94, vec![0.99, 0.14, 0.0]),
            candidate("sleep", 0.6, vec![0.0, 0.0, 1.0]),
        ];
        let out = select_diverse(&cands, 0.5, 2).unwrap();
        assert_eq!(ids(&out), vec!["mornings", "sleep"]);
    }

    #[test]
    fn test_lambda_one_is_top_k_by_similarity() {
        let cands = vec![
            candidate("a", 0.5, vec![1.0, 0.0]),
            candidate("b", 0.9, vec![1.0, 0.01]),
            candidate("c", 0.7, vec![1.0, 0.02]),
            candidate("d", 0.1, vec![0.0, 1.0]),
        ];
        let out = select_diverse(&cands, 1.0, 3).unwrap();
        assert_eq!(ids(&out), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_never_exceeds_top_k_or_invents_items() {
        let cands: Vec<_> = (0..10)
            .map(|i| {
                let mut e = vec![0.0f32; 10];
                e[i] = 1.0;
                candidate(&format!("f{i}"), i as f64 / 10.0, e)
            })
            .collect();
        let out = select_diverse(&cands, 0.5, 4).unwrap();
        assert_eq!(out.len(), 4);
        for c in &out {
            assert!(cands.iter().any(|x| x.id == c.id));
        }

        let all = select_diverse(&cands, 0.5, 50).unwrap();
        assert_eq!(all.len(), 10);
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let cands = vec![
            candidate("a", 0.9, vec![1.0, 0.0]),
            candidate("b", 0.5, vec![1.0, 0.0, 0.0]),
        ];
        assert!(select_diverse(&cands, 0.5, 2).is_err());
    }
}
