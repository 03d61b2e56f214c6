//! # Resume Match Example
//!
//! Ingests a resume, then pulls the sections most relevant to a job
//! description, the way an ATS check or cover-letter generator would.
//!
//! Uses `InMemorySegmentStore` and the deterministic
//! `KeywordEmbeddingProvider`, so it runs with **zero API keys**.
//!
//! Run: `cargo run -p resume-rag-demos --example resume_match`

use std::sync::Arc;

use resume_rag::{InMemorySegmentStore, RagConfig, ResumeIndex};
use resume_rag_demos::{KeywordEmbeddingProvider, SAMPLE_JOB_DESCRIPTION, SAMPLE_RESUME, print_hits};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    resume_telemetry::init_telemetry("resume-match")?;

    // -- 1. Build the index ------------------------------------------------
    // Section segmentation with 1000-char fallback windows (200 overlap);
    // default queries return the top three segments.
    let index = ResumeIndex::builder()
        .config(RagConfig::builder().default_top_k(3).build()?)
        .embedding_provider(Arc::new(KeywordEmbeddingProvider::new(256)))
        .segment_store(Arc::new(InMemorySegmentStore::new()))
        .build()?;

    // -- 2. Ingest the resume ---------------------------------------------
    let document_id = "resume-jane-doe";
    let segments = index.ingest(document_id, "jane_doe.pdf", SAMPLE_RESUME).await?;
    println!("Ingested {} segment(s):", segments.len());
    for segment in &segments {
        let first_line = segment.text.lines().next().unwrap_or_default();
        println!("  [{}] {first_line}", segment.metadata["chunk_index"]);
    }

    // -- 3. Match against a job description -------------------------------
    let context = index.match_context(document_id, SAMPLE_JOB_DESCRIPTION, 3).await?;
    println!("\nResume text: {} characters", context.full_text.chars().count());
    println!("Most relevant sections:");
    print_hits(&context.relevant);

    // -- 4. Unknown documents surface as not-found ------------------------
    if let Err(e) = index.document_text("missing").await {
        println!("\nLookup of unknown id: {e}");
    }

    index.delete(document_id).await?;
    println!("Deleted; remaining documents: {}", index.store().document_count().await?);
    Ok(())
}
