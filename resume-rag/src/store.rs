//! Embedding-aware document store.
//!
//! [`DocumentStore`] embeds segment text through an [`EmbeddingProvider`]
//! and keeps the result in a [`SegmentStore`] backend, one ordered segment
//! list per document id.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::document::{Metadata, Segment};
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::vectorstore::SegmentStore;

/// Stores segments with their embeddings, keyed by document id.
///
/// Embedding failures never fail an insert: the text is stored with empty
/// vectors so whole-document reads keep working and those segments simply
/// score `0.0` in similarity search.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use resume_rag::{DocumentStore, InMemorySegmentStore};
///
/// let store = DocumentStore::new(Arc::new(embedder), Arc::new(InMemorySegmentStore::new()));
/// store.insert("r1", vec!["SKILLS\nRust".into()], vec![]).await?;
/// let segments = store.get("r1").await?;
/// ```
#[derive(Clone)]
pub struct DocumentStore {
    embedder: Arc<dyn EmbeddingProvider>,
    backend: Arc<dyn SegmentStore>,
}

impl DocumentStore {
    /// Create a store that embeds through `embedder` and keeps data in `backend`.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, backend: Arc<dyn SegmentStore>) -> Self {
        Self { embedder, backend }
    }

    /// Return a reference to the storage backend.
    pub fn backend(&self) -> &Arc<dyn SegmentStore> {
        &self.backend
    }

    /// Embed and store `texts` under `document_id`, replacing any previous list.
    ///
    /// `metadata[i]` belongs to `texts[i]`; missing entries default to an
    /// empty map. Texts that are empty after trimming are skipped together
    /// with their metadata. Returns the segments that were stored.
    ///
    /// The embedding call happens before the backend is touched, so no lock
    /// is held while waiting on the provider.
    ///
    /// # Errors
    ///
    /// Only backend failures are returned; embedding failures are logged and
    /// absorbed.
    pub async fn insert(
        &self,
        document_id: &str,
        texts: Vec<String>,
        metadata: Vec<Metadata>,
    ) -> Result<Vec<Segment>> {
        let mut metadata = metadata.into_iter();
        let pairs: Vec<(String, Metadata)> = texts
            .into_iter()
            .map(|text| (text, metadata.next().unwrap_or_default()))
            .filter(|(text, _)| !text.trim().is_empty())
            .collect();

        if pairs.is_empty() {
            warn!(document.id = %document_id, "no segment text provided, nothing stored");
            return Ok(Vec::new());
        }

        let vectors = self.embed_or_empty(document_id, &pairs).await;

        let segments: Vec<Segment> = pairs
            .into_iter()
            .zip(vectors)
            .map(|((text, metadata), vector)| Segment { text, vector, metadata })
            .collect();

        self.backend.replace(document_id, segments.clone()).await?;

        let embedded = segments.iter().filter(|s| s.has_vector()).count();
        info!(
            document.id = %document_id,
            segment_count = segments.len(),
            embedded_count = embedded,
            "stored document segments"
        );
        Ok(segments)
    }

    /// Produce one vector per pair, substituting empty vectors on failure.
    async fn embed_or_empty(&self, document_id: &str, pairs: &[(String, Metadata)]) -> Vec<Vec<f32>> {
        let texts: Vec<&str> = pairs.iter().map(|(text, _)| text.as_str()).collect();

        let mut vectors = match self.embedder.embed_batch(&texts).await {
            Ok(vectors) => {
                debug!(document.id = %document_id, vector_count = vectors.len(), "generated embeddings");
                vectors
            }
            Err(e) => {
                warn!(
                    document.id = %document_id,
                    error = %e,
                    "failed to generate embeddings, storing segments without vectors"
                );
                Vec::new()
            }
        };

        if !vectors.is_empty() && vectors.len() != texts.len() {
            warn!(
                document.id = %document_id,
                expected = texts.len(),
                received = vectors.len(),
                "embedding count mismatch, missing vectors left empty"
            );
        }
        vectors.resize_with(texts.len(), Vec::new);
        vectors
    }

    /// Return the segments stored for `document_id` in insertion order.
    ///
    /// An unknown id yields an empty `Vec`.
    pub async fn get(&self, document_id: &str) -> Result<Vec<Segment>> {
        Ok(self.backend.get(document_id).await?.map(|segments| segments.to_vec()).unwrap_or_default())
    }

    /// Remove everything stored for `document_id`. Unknown ids are ignored.
    pub async fn delete(&self, document_id: &str) -> Result<()> {
        if self.backend.remove(document_id).await? {
            info!(document.id = %document_id, "deleted document segments");
        }
        Ok(())
    }

    /// Whether any segments are stored for `document_id`.
    pub async fn contains(&self, document_id: &str) -> Result<bool> {
        Ok(self.backend.get(document_id).await?.is_some())
    }

    /// Number of stored documents.
    pub async fn document_count(&self) -> Result<usize> {
        self.backend.len().await
    }
}
