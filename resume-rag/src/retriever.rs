//! Exact cosine-similarity retrieval over stored segments.
//!
//! Search is brute force: every candidate segment is scored against the
//! query vector, O(N·D) per query. Rankings are exact, which makes this the
//! reference for any indexed backend.

use std::sync::Arc;

use tracing::{error, info};

use crate::document::SearchResult;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::SegmentStore;

/// Compute cosine similarity between two vectors.
///
/// Sums are accumulated in `f64`. Returns `0.0` if the vectors differ in
/// length, either has zero magnitude (which covers segments stored without
/// an embedding), or a component is not finite.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| *x as f64 * *x as f64).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| *x as f64 * *x as f64).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let similarity = dot / (norm_a * norm_b);
    if !similarity.is_finite() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0) as f32
}

/// Ranks stored segments against a query.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use resume_rag::Retriever;
///
/// let retriever = Retriever::new(embedder, backend);
/// let hits = retriever.search("senior Rust engineer", Some("r1"), 5).await?;
/// ```
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    backend: Arc<dyn SegmentStore>,
}

impl Retriever {
    /// Create a retriever over `backend`, embedding queries with `embedder`.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, backend: Arc<dyn SegmentStore>) -> Self {
        Self { embedder, backend }
    }

    /// Return the `top_k` segments most similar to `query`.
    ///
    /// With `scope` set, only that document is searched; an unknown scope
    /// id yields no results rather than a search of every document. Results
    /// are ordered by descending similarity; equal scores keep scan order
    /// (documents by first insertion, segments as stored). `top_k == 0`
    /// returns an empty list without calling the embedding provider.
    ///
    /// # Errors
    ///
    /// Embedding failures are returned unchanged, so an unusable provider
    /// surfaces as [`RagError::ConfigError`](crate::RagError::ConfigError).
    pub async fn search(
        &self,
        query: &str,
        scope: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        self.search_by_vector(&query_vector, scope, top_k).await
    }

    /// Rank stored segments against an already computed query vector.
    pub async fn search_by_vector(
        &self,
        query_vector: &[f32],
        scope: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let documents = self.backend.scan(scope).await?;

        let mut scored: Vec<SearchResult> = documents
            .iter()
            .flat_map(|(document_id, segments)| {
                segments.iter().map(move |segment| SearchResult {
                    document_id: document_id.clone(),
                    text: segment.text.clone(),
                    similarity: cosine_similarity(query_vector, &segment.vector),
                    metadata: segment.metadata.clone(),
                })
            })
            .collect();

        let candidate_count = scored.len();
        // `sort_by` is stable, so ties keep scan order.
        scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        scored.truncate(top_k);

        info!(
            scope = scope.unwrap_or("*"),
            candidate_count,
            result_count = scored.len(),
            "search completed"
        );
        Ok(scored)
    }
}
