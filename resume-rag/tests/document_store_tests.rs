//! Tests for the embedding-aware document store.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    GatedEmbeddingProvider, ShortBatchEmbeddingProvider, TableEmbeddingProvider,
    UnconfiguredEmbeddingProvider, texts,
};
use resume_rag::{DocumentStore, EmbeddingProvider, InMemorySegmentStore, Metadata};
use resume_telemetry::{EventCaptureLayer, SharedEventStorage};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn store_with(provider: impl EmbeddingProvider + 'static) -> DocumentStore {
    DocumentStore::new(Arc::new(provider), Arc::new(InMemorySegmentStore::new()))
}

fn table() -> TableEmbeddingProvider {
    TableEmbeddingProvider::new(&[]).with_default(vec![1.0, 0.0])
}

#[tokio::test]
async fn insert_then_get_preserves_order_and_text() {
    let store = store_with(table());
    let input = texts(&["SUMMARY\nRust dev", "EXPERIENCE\nAcme", "SKILLS\nTokio"]);
    store.insert("r1", input.clone(), vec![]).await.unwrap();

    let stored = store.get("r1").await.unwrap();
    let stored_texts: Vec<String> = stored.iter().map(|s| s.text.clone()).collect();
    assert_eq!(stored_texts, input);
    assert!(stored.iter().all(|s| s.vector == vec![1.0, 0.0]));
}

#[tokio::test]
async fn second_insert_replaces_first() {
    let store = store_with(table());
    store.insert("r1", texts(&["a", "b", "c"]), vec![]).await.unwrap();
    store.insert("r1", texts(&["d"]), vec![]).await.unwrap();

    let stored = store.get("r1").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].text, "d");
    assert_eq!(store.document_count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_then_get_is_empty() {
    let store = store_with(table());
    store.insert("r1", texts(&["a"]), vec![]).await.unwrap();
    store.insert("r2", texts(&["b"]), vec![]).await.unwrap();

    store.delete("r1").await.unwrap();
    assert!(store.get("r1").await.unwrap().is_empty());
    assert!(!store.contains("r1").await.unwrap());
    assert_eq!(store.get("r2").await.unwrap().len(), 1);

    // Unknown ids are not an error.
    store.delete("r1").await.unwrap();
    store.delete("never-seen").await.unwrap();
}

#[tokio::test]
async fn unknown_id_reads_as_empty() {
    let store = store_with(table());
    assert!(store.get("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn metadata_passes_through_and_pads() {
    let store = store_with(table());
    let metadata = vec![Metadata::from([("filename".to_string(), json!("cv.pdf"))])];
    let stored = store.insert("r1", texts(&["first", "second"]), metadata).await.unwrap();

    assert_eq!(stored[0].metadata["filename"], json!("cv.pdf"));
    assert!(stored[1].metadata.is_empty());
    assert_eq!(store.get("r1").await.unwrap(), stored);
}

#[tokio::test]
async fn blank_texts_are_skipped_with_their_metadata() {
    let store = store_with(table());
    let metadata: Vec<Metadata> =
        (0..3).map(|i| Metadata::from([("chunk_index".to_string(), json!(i))])).collect();
    let stored = store.insert("r1", texts(&["kept", "   ", "also kept"]), metadata).await.unwrap();

    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].text, "also kept");
    assert_eq!(stored[1].metadata["chunk_index"], json!(2));
}

#[tokio::test]
async fn empty_insert_stores_nothing() {
    let store = store_with(table());
    store.insert("r1", texts(&["old"]), vec![]).await.unwrap();
    let stored = store.insert("r1", vec![], vec![]).await.unwrap();
    assert!(stored.is_empty());
    assert_eq!(store.get("r1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn embedding_failure_stores_text_without_vectors() {
    let events = Arc::new(SharedEventStorage::new());
    let subscriber = tracing_subscriber::registry()
        .with(EventCaptureLayer::new(events.clone()).with_min_level(Level::WARN));
    let _guard = tracing::subscriber::set_default(subscriber);

    let store = store_with(UnconfiguredEmbeddingProvider);
    let stored = store.insert("r1", texts(&["SKILLS\nRust", "EDUCATION\nBSc"]), vec![]).await.unwrap();

    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|s| s.vector.is_empty()));
    assert_eq!(store.get("r1").await.unwrap().len(), 2);

    let warnings = events.events_at(Level::WARN);
    assert!(warnings.iter().any(|e| e.message.contains("storing segments without vectors")
        && e.field_str("document.id") == Some("r1")));
}

#[tokio::test]
async fn short_batch_leaves_trailing_vectors_empty() {
    let store = store_with(ShortBatchEmbeddingProvider { returned: 1 });
    let stored = store.insert("r1", texts(&["a", "b", "c"]), vec![]).await.unwrap();

    assert!(stored[0].has_vector());
    assert!(!stored[1].has_vector());
    assert!(!stored[2].has_vector());
}

#[tokio::test]
async fn slow_embedding_does_not_block_other_documents() {
    let provider = GatedEmbeddingProvider::new();
    let started = provider.started.clone();
    let release = provider.release.clone();
    let store = store_with(provider);

    store.insert("fast", texts(&["quick"]), vec![]).await.unwrap();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move { store.insert("slow-doc", texts(&["slow text"]), vec![]).await })
    };
    started.notified().await;

    // The slow insert is parked inside the embedding call; the store stays usable.
    let read = tokio::time::timeout(Duration::from_secs(5), store.get("fast")).await;
    assert_eq!(read.unwrap().unwrap().len(), 1);
    let write =
        tokio::time::timeout(Duration::from_secs(5), store.insert("other", texts(&["x"]), vec![]))
            .await;
    assert!(write.unwrap().is_ok());
    assert!(store.get("slow-doc").await.unwrap().is_empty());

    release.notify_one();
    writer.await.unwrap().unwrap();
    assert_eq!(store.get("slow-doc").await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_observe_partial_replacement() {
    let store = store_with(table());
    let old = texts(&["old"; 3]);
    let new = texts(&["new"; 5]);
    store.insert("r1", old.clone(), vec![]).await.unwrap();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for i in 0..200 {
                let next = if i % 2 == 0 { new.clone() } else { old.clone() };
                store.insert("r1", next, vec![]).await.unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let segments = store.get("r1").await.unwrap();
                    let first = segments[0].text.clone();
                    assert!(segments.iter().all(|s| s.text == first));
                    let expected = if first == "old" { 3 } else { 5 };
                    assert_eq!(segments.len(), expected);
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}
