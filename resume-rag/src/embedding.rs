//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// This is the boundary to the embedding backend: the rest of the crate only
/// sees vectors. Implementations should return exactly one vector per input,
/// in input order. Backends that are unusable (no credentials, no endpoint)
/// report [`RagError::ConfigError`](crate::RagError::ConfigError).
///
/// The default [`embed`](EmbeddingProvider::embed) implementation sends a
/// single-item batch through [`embed_batch`](EmbeddingProvider::embed_batch).
///
/// # Example
///
/// ```rust,ignore
/// use resume_rag::EmbeddingProvider;
///
/// let provider = MyEmbeddingProvider::new();
/// let vectors = provider.embed_batch(&["Rust engineer", "Team lead"]).await?;
/// assert_eq!(vectors.len(), 2);
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding vectors for a batch of text inputs.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = self.embed_batch(&[text]).await?;
        vectors.into_iter().next().ok_or_else(|| crate::RagError::EmbeddingError {
            provider: self.name().to_string(),
            message: "provider returned no vector".to_string(),
        })
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// A short provider name used in logs and errors.
    fn name(&self) -> &str {
        "embedding"
    }
}
