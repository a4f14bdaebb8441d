use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use coach_recall::config::CoachRecallConfig;
use coach_recall::embedding::EmbeddingCache;
use coach_recall::memory::{AdmittedStatement, FactKind};

#[derive(Serialize)]
struct AdmittedView<'a> {
    content: &'a str,
    kind: FactKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    embedding: Option<&'a [f32]>,
}

/// Run the admission filter over candidate statements and print the survivors.
pub async fn admit(
    config: &CoachRecallConfig,
    facts_path: &Path,
    statements: Vec<String>,
    with_embeddings: bool,
) -> Result<()> {
    let facts = super::load_facts(facts_path, config.embedding.dimensions)?;
    let embedding_config = config.embedding.clone();
    let threshold = config.admission.duplicate_threshold;

    let admitted: Vec<AdmittedStatement> = tokio::task::spawn_blocking(move || -> Result<_> {
        let provider = coach_recall::embedding::create_provider(&embedding_config)?;
        let mut cache = EmbeddingCache::new();
        let candidates: Vec<&str> = statements.iter().map(String::as_str).collect();
        let admitted = coach_recall::memory::filter_for_admission(
            &candidates,
            &facts,
            provider.as_ref(),
            &mut cache,
            threshold,
        )?;
        Ok(admitted)
    })
    .await??;

    let view: Vec<AdmittedView> = admitted
        .iter()
        .map(|a| AdmittedView {
            content: &a.content,
            kind: a.kind,
            embedding: with_embeddings.then_some(a.embedding.as_slice()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
