use anyhow::Result;
use std::path::Path;

use coach_recall::config::CoachRecallConfig;
use coach_recall::error::MemoryError;
use coach_recall::memory::RetrievedFact;

/// Retrieve facts for a query and print them as JSON.
pub async fn recall(
    config: &CoachRecallConfig,
    facts_path: &Path,
    query: &str,
    top_k: Option<usize>,
) -> Result<()> {
    let facts = super::load_facts(facts_path, config.embedding.dimensions)?;

    let mut retrieval = config.retrieval.clone();
    if let Some(k) = top_k {
        retrieval.top_k = k;
    }

    // The blocking HTTP client must be built and dropped off the async runtime.
    let embedding_config = config.embedding.clone();
    let query_text = query.to_string();
    let outcome = tokio::task::spawn_blocking(move || -> Result<_> {
        let provider = coach_recall::embedding::create_provider(&embedding_config)?;
        Ok(coach_recall::memory::retrieve(
            provider.as_ref(),
            &query_text,
            &facts,
            &retrieval,
        ))
    })
    .await??;

    let results = degrade(outcome)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// An unreachable encoder degrades to an empty result instead of failing the
/// turn; a dimension mismatch is a configuration bug and still aborts.
fn degrade(
    outcome: coach_recall::error::Result<Vec<RetrievedFact>>,
) -> Result<Vec<RetrievedFact>> {
    match outcome {
        Ok(results) => Ok(results),
        Err(MemoryError::EncodingUnavailable(reason)) => {
            tracing::warn!(%reason, "retrieval failed, continuing with no facts");
            Ok(vec![])
        }
        Err(e) => Err(e.into()),
    }
}
