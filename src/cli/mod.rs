pub mod admit;
pub mod doctor;
pub mod recall;
pub mod summarize;

use anyhow::{Context, Result};
use std::path::Path;

use coach_recall::memory::Fact;

/// Load a user's facts from a JSON array, checking every record against the pinned dimensionality.
pub fn load_facts(path: &Path, dimensions: usize) -> Result<Vec<Fact>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read facts file: {}", path.display()))?;

    let facts: Vec<Fact> =
        serde_json::from_str(&json).context("failed to parse facts JSON")?;

    for fact in &facts {
        fact.validate(dimensions)
            .map_err(|e| anyhow::anyhow!("invalid fact in {}: {e}", path.display()))?;
    }

    tracing::debug!(count = facts.len(), path = %path.display(), "facts loaded");
    Ok(facts)
}
