//! Embedding providers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use resume_rag::{EmbeddingProvider, RagError, Result};
use tokio::sync::Notify;

/// Returns a fixed vector per known text and `default` for anything else.
pub struct TableEmbeddingProvider {
    table: HashMap<String, Vec<f32>>,
    default: Vec<f32>,
    calls: AtomicUsize,
}

impl TableEmbeddingProvider {
    pub fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        let table = entries.iter().map(|(t, v)| (t.to_string(), v.clone())).collect();
        Self { table, default: vec![0.0, 0.0], calls: AtomicUsize::new(0) }
    }

    pub fn with_default(mut self, default: Vec<f32>) -> Self {
        self.default = default;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for TableEmbeddingProvider {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.table.get(*t).cloned().unwrap_or_else(|| self.default.clone())).collect())
    }

    fn dimensions(&self) -> usize {
        self.default.len()
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Always fails as an unconfigured backend would.
pub struct UnconfiguredEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for UnconfiguredEmbeddingProvider {
    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Err(RagError::ConfigError("EMBEDDING_API_KEY not set".to_string()))
    }

    fn dimensions(&self) -> usize {
        2
    }
}

/// Returns fewer vectors than requested.
pub struct ShortBatchEmbeddingProvider {
    pub returned: usize,
}

#[async_trait]
impl EmbeddingProvider for ShortBatchEmbeddingProvider {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().take(self.returned).map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }
}

/// Blocks batches containing `"slow"` until released.
pub struct GatedEmbeddingProvider {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl GatedEmbeddingProvider {
    pub fn new() -> Self {
        Self { started: Arc::new(Notify::new()), release: Arc::new(Notify::new()) }
    }
}

#[async_trait]
impl EmbeddingProvider for GatedEmbeddingProvider {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.contains("slow")) {
            self.started.notify_one();
            self.release.notified().await;
        }
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }
}

pub fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
