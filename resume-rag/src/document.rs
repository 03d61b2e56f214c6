//! Data types for stored segments and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form per-segment metadata (source file name, position index, ...).
///
/// The core never inspects it; it is stored and returned unchanged.
pub type Metadata = HashMap<String, Value>;

/// A retrievable span of a document's text together with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    /// The verbatim segment text.
    pub text: String,
    /// The embedding for `text`. Empty when embedding generation failed.
    pub vector: Vec<f32>,
    /// Caller-supplied metadata.
    pub metadata: Metadata,
}

impl Segment {
    /// Create a segment from its parts.
    pub fn new(text: impl Into<String>, vector: Vec<f32>, metadata: Metadata) -> Self {
        Self { text: text.into(), vector, metadata }
    }

    /// Whether this segment carries an embedding.
    pub fn has_vector(&self) -> bool {
        !self.vector.is_empty()
    }
}

/// A ranked [`Segment`] returned by similarity search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The document the segment belongs to.
    pub document_id: String,
    /// The segment text.
    pub text: String,
    /// Cosine similarity between the query and the segment, in `[-1, 1]`.
    pub similarity: f32,
    /// The segment's metadata.
    pub metadata: Metadata,
}
