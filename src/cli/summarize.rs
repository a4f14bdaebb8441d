use anyhow::{Context, Result};
use std::path::Path;

use coach_recall::memory::{update_summary, Exchange};

/// Fold one exchange into the rolling summary and print (or write) the result.
pub fn summarize(
    current: Option<&Path>,
    output: Option<&Path>,
    exchange: &Exchange,
    max_chars: usize,
) -> Result<()> {
    let current_text = current
        .filter(|p| p.exists())
        .map(|p| {
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read summary file: {}", p.display()))
        })
        .transpose()?;

    let updated = update_summary(current_text.as_deref(), exchange, max_chars);

    match output {
        Some(path) => {
            std::fs::write(path, &updated)
                .with_context(|| format!("failed to write summary file: {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                chars = updated.chars().count(),
                "summary updated"
            );
        }
        None => println!("{updated}"),
    }
    Ok(())
}
