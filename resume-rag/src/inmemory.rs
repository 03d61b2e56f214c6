//! In-memory segment store.
//!
//! This module provides [`InMemorySegmentStore`], a segment store backed by a
//! `HashMap` protected by a `tokio::sync::RwLock`. Nothing is persisted; the
//! contents live as long as the store value.
//!
//! The lock guards only map operations: a replacement swaps one `Arc` in and
//! a scan clones `Arc` handles out, so no embedding call or similarity
//! computation ever runs under it. All documents share this one lock, which
//! bounds write throughput when many documents are ingested at once.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::Segment;
use crate::error::Result;
use crate::vectorstore::SegmentStore;

#[derive(Debug)]
struct StoredDocument {
    /// Position of the document id in first-insert order.
    seq: u64,
    segments: Arc<[Segment]>,
}

#[derive(Debug, Default)]
struct Documents {
    next_seq: u64,
    by_id: HashMap<String, StoredDocument>,
}

/// An in-memory [`SegmentStore`].
///
/// Re-inserting an existing id keeps its position in scan order; deleting
/// and inserting again moves it to the end.
///
/// # Example
///
/// ```rust,ignore
/// use resume_rag::{InMemorySegmentStore, SegmentStore};
///
/// let store = InMemorySegmentStore::new();
/// store.replace("r1", segments).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemorySegmentStore {
    documents: RwLock<Documents>,
}

impl InMemorySegmentStore {
    /// Create a new empty in-memory segment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SegmentStore for InMemorySegmentStore {
    async fn replace(&self, document_id: &str, segments: Vec<Segment>) -> Result<()> {
        let segments: Arc<[Segment]> = segments.into();
        let mut documents = self.documents.write().await;
        if let Some(existing) = documents.by_id.get_mut(document_id) {
            existing.segments = segments;
        } else {
            let seq = documents.next_seq;
            documents.next_seq += 1;
            documents.by_id.insert(document_id.to_string(), StoredDocument { seq, segments });
        }
        Ok(())
    }

    async fn get(&self, document_id: &str) -> Result<Option<Arc<[Segment]>>> {
        let documents = self.documents.read().await;
        Ok(documents.by_id.get(document_id).map(|doc| Arc::clone(&doc.segments)))
    }

    async fn remove(&self, document_id: &str) -> Result<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents.by_id.remove(document_id).is_some())
    }

    async fn scan(&self, scope: Option<&str>) -> Result<Vec<(String, Arc<[Segment]>)>> {
        let documents = self.documents.read().await;
        if let Some(id) = scope {
            return Ok(documents
                .by_id
                .get(id)
                .map(|doc| vec![(id.to_string(), Arc::clone(&doc.segments))])
                .unwrap_or_default());
        }

        let mut all: Vec<(u64, String, Arc<[Segment]>)> = documents
            .by_id
            .iter()
            .map(|(id, doc)| (doc.seq, id.clone(), Arc::clone(&doc.segments)))
            .collect();
        drop(documents);

        all.sort_unstable_by_key(|(seq, _, _)| *seq);
        Ok(all.into_iter().map(|(_, id, segments)| (id, segments)).collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.documents.read().await.by_id.len())
    }
}
