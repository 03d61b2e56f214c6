//! Resume ingestion and retrieval orchestrator.
//!
//! The [`ResumeIndex`] coordinates the full workflow by composing a
//! [`Segmenter`], an [`EmbeddingProvider`] and a [`SegmentStore`]:
//! raw text → segments → embeddings → storage on ingest, and
//! query → embedding → ranked segments on search.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resume_rag::{InMemorySegmentStore, RagConfig, ResumeIndex};
//!
//! let index = ResumeIndex::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .segment_store(Arc::new(InMemorySegmentStore::new()))
//!     .build()?;
//!
//! index.ingest(&file_id, "resume.pdf", &extracted_text).await?;
//! let context = index.match_context(&file_id, &job_description, 5).await?;
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::config::{RagConfig, SegmentationStrategy};
use crate::document::{Metadata, SearchResult, Segment};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::retriever::Retriever;
use crate::segmenter::{FixedWindowSegmenter, SectionSegmenter, Segmenter};
use crate::store::DocumentStore;
use crate::vectorstore::SegmentStore;

/// Separator placed between segments when rebuilding a document's text.
pub const SEGMENT_JOINER: &str = "\n\n";

/// A document's full text plus the segments most relevant to a query.
///
/// This is what job-description matching and content generation consume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchContext {
    /// Every stored segment of the document, joined with [`SEGMENT_JOINER`].
    pub full_text: String,
    /// The top-ranked segments of the document for the query.
    pub relevant: Vec<SearchResult>,
}

/// The resume retrieval orchestrator.
///
/// Construct one via [`ResumeIndex::builder()`]. Cloning is cheap and clones
/// share the same underlying store.
#[derive(Clone)]
pub struct ResumeIndex {
    config: RagConfig,
    segmenter: Arc<dyn Segmenter>,
    store: DocumentStore,
    retriever: Retriever,
}

impl ResumeIndex {
    /// Create a new [`ResumeIndexBuilder`].
    pub fn builder() -> ResumeIndexBuilder {
        ResumeIndexBuilder::default()
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Return a reference to the retriever.
    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Segment `text` with the configured segmenter.
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    /// Ingest a document: segment → embed → store.
    ///
    /// Each segment gets `chunk_index` and `filename` metadata. Any previous
    /// segments for `document_id` are replaced. Empty or whitespace-only
    /// text stores nothing and leaves an existing list in place. Returns
    /// the stored segments.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails; embedding
    /// failures leave the segments stored without vectors.
    pub async fn ingest(
        &self,
        document_id: &str,
        source_name: &str,
        text: &str,
    ) -> Result<Vec<Segment>> {
        let texts = self.segmenter.segment(text);
        let metadata: Vec<Metadata> = (0..texts.len())
            .map(|i| {
                Metadata::from([
                    ("chunk_index".to_string(), json!(i)),
                    ("filename".to_string(), json!(source_name)),
                ])
            })
            .collect();

        let segments = self.store.insert(document_id, texts, metadata).await.map_err(|e| {
            error!(document.id = %document_id, error = %e, "storing segments failed during ingestion");
            e
        })?;

        info!(document.id = %document_id, segment_count = segments.len(), "ingested document");
        Ok(segments)
    }

    /// Return the stored segments for `document_id` in insertion order.
    pub async fn get(&self, document_id: &str) -> Result<Vec<Segment>> {
        self.store.get(document_id).await
    }

    /// Remove a document. Unknown ids are ignored.
    pub async fn delete(&self, document_id: &str) -> Result<()> {
        self.store.delete(document_id).await
    }

    /// Search for the `top_k` segments most similar to `query`.
    ///
    /// See [`Retriever::search`].
    pub async fn search(
        &self,
        query: &str,
        scope: Option<&str>,
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        self.retriever.search(query, scope, top_k).await
    }

    /// Search using the configured `default_top_k`.
    pub async fn query(&self, query: &str, scope: Option<&str>) -> Result<Vec<SearchResult>> {
        self.retriever.search(query, scope, self.config.default_top_k).await
    }

    /// Rebuild a document's text from its stored segments.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DocumentNotFound`] if nothing is stored under
    /// `document_id`.
    pub async fn document_text(&self, document_id: &str) -> Result<String> {
        let segments = self.store.get(document_id).await?;
        if segments.is_empty() {
            return Err(RagError::DocumentNotFound(document_id.to_string()));
        }
        Ok(join_segments(&segments))
    }

    /// Collect a document's full text and its segments most relevant to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DocumentNotFound`] for an unknown id, and
    /// propagates search failures unchanged.
    pub async fn match_context(
        &self,
        document_id: &str,
        query: &str,
        top_k: usize,
    ) -> Result<MatchContext> {
        let full_text = self.document_text(document_id).await?;
        let relevant = self.retriever.search(query, Some(document_id), top_k).await?;
        Ok(MatchContext { full_text, relevant })
    }
}

fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(SEGMENT_JOINER)
}

/// Build the segmenter described by `config`.
///
/// # Errors
///
/// Returns [`RagError::ConfigError`] if the window parameters are invalid.
pub fn segmenter_for(config: &RagConfig) -> Result<Arc<dyn Segmenter>> {
    let windows = FixedWindowSegmenter::new(config.window_size, config.window_overlap)?;
    Ok(match config.strategy {
        SegmentationStrategy::Sections => Arc::new(SectionSegmenter::new(windows)),
        SegmentationStrategy::FixedWindow => Arc::new(windows),
    })
}

/// Builder for constructing a [`ResumeIndex`].
///
/// The embedding provider and segment store are required. The config
/// defaults to [`RagConfig::default()`] and the segmenter to the one the
/// config describes.
///
/// # Example
///
/// ```rust,ignore
/// let index = ResumeIndex::builder()
///     .config(RagConfig::from_env()?)
///     .embedding_provider(Arc::new(embedder))
///     .segment_store(Arc::new(store))
///     .segmenter(Arc::new(custom))  // optional
///     .build()?;
/// ```
#[derive(Default)]
pub struct ResumeIndexBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    segment_store: Option<Arc<dyn SegmentStore>>,
    segmenter: Option<Arc<dyn Segmenter>>,
}

impl ResumeIndexBuilder {
    /// Set the configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the segment storage backend.
    pub fn segment_store(mut self, store: Arc<dyn SegmentStore>) -> Self {
        self.segment_store = Some(store);
        self
    }

    /// Override the segmenter derived from the config.
    pub fn segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Build the [`ResumeIndex`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing or
    /// the config describes an invalid segmenter.
    pub fn build(self) -> Result<ResumeIndex> {
        let config = self.config.unwrap_or_default();
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let segment_store = self
            .segment_store
            .ok_or_else(|| RagError::ConfigError("segment_store is required".to_string()))?;
        let segmenter = match self.segmenter {
            Some(segmenter) => segmenter,
            None => segmenter_for(&config)?,
        };

        Ok(ResumeIndex {
            store: DocumentStore::new(Arc::clone(&embedding_provider), Arc::clone(&segment_store)),
            retriever: Retriever::new(embedding_provider, segment_store),
            config,
            segmenter,
        })
    }
}
