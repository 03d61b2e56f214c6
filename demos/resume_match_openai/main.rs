//! # Resume Match with OpenAI Embeddings
//!
//! Same flow as `resume_match`, embedding with the OpenAI API. Settings come
//! from the environment: `OPENAI_API_KEY` (required), `EMBEDDING_MODEL`,
//! `OPENAI_BASE_URL`, `CHUNK_SIZE`, `CHUNK_OVERLAP`, `RETRIEVAL_TOP_K`.
//!
//! Without a key the provider cannot be built; with a bad key ingestion
//! still stores the text and only the search step fails.
//!
//! Run: `cargo run -p resume-rag-demos --example resume_match_openai --features openai`

use std::sync::Arc;

use resume_rag::openai::OpenAIEmbeddingProvider;
use resume_rag::{InMemorySegmentStore, RagConfig, ResumeIndex};
use resume_rag_demos::{SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME, print_hits};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    resume_telemetry::init_json_telemetry("resume-match-openai")?;

    let config = RagConfig::from_env()?;
    let index = ResumeIndex::builder()
        .config(config)
        .embedding_provider(Arc::new(OpenAIEmbeddingProvider::from_env()?))
        .segment_store(Arc::new(InMemorySegmentStore::new()))
        .build()?;

    let document_id = "resume-jane-doe";
    let segments = index.ingest(document_id, "jane_doe.pdf", SAMPLE_RESUME).await?;
    let embedded = segments.iter().filter(|s| s.has_vector()).count();
    info!(segment_count = segments.len(), embedded, "resume ingested");

    match index.query(SAMPLE_JOB_DESCRIPTION, Some(document_id)).await {
        Ok(hits) => print_hits(&hits),
        Err(e) if e.is_config_error() => {
            error!(error = %e, "embedding backend unusable, falling back to full text");
            println!("{}", index.document_text(document_id).await?);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
