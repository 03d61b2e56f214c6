//! Storage trait for per-document segment lists.

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::Segment;
use crate::error::Result;

/// A storage backend holding one ordered segment list per document id.
///
/// Backends only store and hand out segment lists; embedding and ranking
/// happen in [`DocumentStore`](crate::DocumentStore) and
/// [`Retriever`](crate::Retriever). Lists are shared as `Arc<[Segment]>` so
/// a reader holds a consistent snapshot after the backend's lock is gone.
///
/// # Example
///
/// ```rust,ignore
/// use resume_rag::{InMemorySegmentStore, SegmentStore};
///
/// let store = InMemorySegmentStore::new();
/// store.replace("r1", segments).await?;
/// let stored = store.get("r1").await?;
/// ```
#[async_trait]
pub trait SegmentStore: Send + Sync {
    /// Store `segments` under `document_id`, replacing any previous list.
    ///
    /// Readers observe either the previous list or the new one, never a mix.
    async fn replace(&self, document_id: &str, segments: Vec<Segment>) -> Result<()>;

    /// Return the segment list for `document_id`, if any.
    async fn get(&self, document_id: &str) -> Result<Option<Arc<[Segment]>>>;

    /// Remove the list for `document_id`. Returns whether anything was removed.
    async fn remove(&self, document_id: &str) -> Result<bool>;

    /// Return the lists to search, in document insertion order.
    ///
    /// With `Some(id)` only that document is returned (nothing if unknown);
    /// with `None` every stored document is returned.
    async fn scan(&self, scope: Option<&str>) -> Result<Vec<(String, Arc<[Segment]>)>>;

    /// Number of stored documents.
    async fn len(&self) -> Result<usize>;

    /// Whether the store holds no documents.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
