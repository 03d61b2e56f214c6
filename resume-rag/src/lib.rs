//! # resume-rag
//!
//! Segmentation, embedding storage and similarity retrieval for resumes.
//!
//! ## Overview
//!
//! Raw extracted text goes in, ranked segments come out:
//!
//! - [`SectionSegmenter`] / [`FixedWindowSegmenter`] split text into segments
//! - [`EmbeddingProvider`] turns segment text into vectors
//! - [`DocumentStore`] keeps one ordered segment list per document id
//! - [`Retriever`] ranks stored segments by cosine similarity to a query
//! - [`ResumeIndex`] wires all of the above together
//!
//! Everything is constructed explicitly; there is no global store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resume_rag::{InMemorySegmentStore, RagConfig, ResumeIndex};
//!
//! let index = ResumeIndex::builder()
//!     .config(RagConfig::from_env()?)
//!     .embedding_provider(Arc::new(embedder))
//!     .segment_store(Arc::new(InMemorySegmentStore::new()))
//!     .build()?;
//!
//! index.ingest("r1", "jane.pdf", &text).await?;
//! let hits = index.search("distributed systems in Rust", Some("r1"), 5).await?;
//! ```
//!
//! ## Features
//!
//! - `openai` — [`openai::OpenAIEmbeddingProvider`], backed by `reqwest`

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
pub mod pipeline;
pub mod retriever;
pub mod segmenter;
pub mod store;
pub mod vectorstore;

#[cfg(feature = "openai")]
pub mod openai;

pub use config::{RagConfig, RagConfigBuilder, SegmentationStrategy};
pub use document::{Metadata, SearchResult, Segment};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemorySegmentStore;
pub use pipeline::{MatchContext, ResumeIndex, ResumeIndexBuilder, segmenter_for};
pub use retriever::{Retriever, cosine_similarity};
pub use segmenter::{FixedWindowSegmenter, SectionSegmenter, Segmenter};
pub use store::DocumentStore;
pub use vectorstore::SegmentStore;
