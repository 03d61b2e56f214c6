//! Configuration for segmentation and retrieval.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Environment variable holding the fixed-window length in characters.
pub const ENV_CHUNK_SIZE: &str = "CHUNK_SIZE";
/// Environment variable holding the fixed-window overlap in characters.
pub const ENV_CHUNK_OVERLAP: &str = "CHUNK_OVERLAP";
/// Environment variable holding the default number of search results.
pub const ENV_TOP_K: &str = "RETRIEVAL_TOP_K";

/// Which [`Segmenter`](crate::Segmenter) ingestion uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationStrategy {
    /// Split at resume section headers, falling back to fixed windows.
    #[default]
    Sections,
    /// Always split into overlapping fixed windows.
    FixedWindow,
}

/// Configuration parameters for ingestion and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum segment length in characters for fixed-window segmentation.
    pub window_size: usize,
    /// Number of characters shared by consecutive fixed windows.
    pub window_overlap: usize,
    /// Number of results returned by [`ResumeIndex::query`](crate::ResumeIndex::query).
    pub default_top_k: usize,
    /// Segmentation strategy used on ingestion.
    pub strategy: SegmentationStrategy,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            window_size: 1000,
            window_overlap: 200,
            default_top_k: 5,
            strategy: SegmentationStrategy::Sections,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }

    /// Build a configuration from the process environment.
    ///
    /// Reads [`ENV_CHUNK_SIZE`], [`ENV_CHUNK_OVERLAP`] and [`ENV_TOP_K`];
    /// unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a variable is not a valid
    /// non-negative integer or the resulting values are inconsistent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(size) = parse_var(&lookup, ENV_CHUNK_SIZE)? {
            builder = builder.window_size(size);
        }
        if let Some(overlap) = parse_var(&lookup, ENV_CHUNK_OVERLAP)? {
            builder = builder.window_overlap(overlap);
        }
        if let Some(top_k) = parse_var(&lookup, ENV_TOP_K)? {
            builder = builder.default_top_k(top_k);
        }
        builder.build()
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| RagError::ConfigError(format!("invalid {key} value '{raw}': {e}")))
        })
        .transpose()
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum segment length in characters.
    pub fn window_size(mut self, size: usize) -> Self {
        self.config.window_size = size;
        self
    }

    /// Set the overlap between consecutive windows in characters.
    pub fn window_overlap(mut self, overlap: usize) -> Self {
        self.config.window_overlap = overlap;
        self
    }

    /// Set the number of results returned by default queries.
    pub fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Set the segmentation strategy.
    pub fn strategy(mut self, strategy: SegmentationStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `window_size == 0`
    /// - `window_overlap >= window_size`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.window_size == 0 {
            return Err(RagError::ConfigError("window_size must be greater than zero".to_string()));
        }
        if self.config.window_overlap >= self.config.window_size {
            return Err(RagError::ConfigError(format!(
                "window_overlap ({}) must be less than window_size ({})",
                self.config.window_overlap, self.config.window_size
            )));
        }
        Ok(self.config)
    }
}
