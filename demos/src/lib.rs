//! Shared fixtures for the `resume-rag` demos.

use resume_rag::EmbeddingProvider;

/// Hashed bag-of-words embeddings, deterministic and offline.
///
/// Each word longer than two characters bumps one of `dimensions` buckets,
/// so texts sharing vocabulary point in similar directions.
pub struct KeywordEmbeddingProvider {
    dimensions: usize,
}

impl KeywordEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions: dimensions.max(1) }
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dimensions];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| w.len() > 2) {
            let hash = word
                .to_lowercase()
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            v[(hash % self.dimensions as u64) as usize] += 1.0;
        }
        v
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for KeywordEmbeddingProvider {
    async fn embed_batch(&self, texts: &[&str]) -> resume_rag::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

pub const SAMPLE_RESUME: &str = "\
Jane Doe
jane.doe@example.com

SUMMARY
Backend engineer with eight years building distributed systems.

EXPERIENCE
Acme Corp, Senior Engineer (2019 - present)
Built an event ingestion pipeline in Rust with Tokio and Kafka.
Cut p99 latency of the search API by 40 percent.

Globex, Software Engineer (2015 - 2019)
Maintained Python data tooling and PostgreSQL reporting jobs.

Skills
Rust, Tokio, Kafka, PostgreSQL, Python, Kubernetes

Education
BSc Computer Science, State University

Awards
Hackathon winner 2018
";

pub const SAMPLE_JOB_DESCRIPTION: &str = "We are hiring a Rust engineer to own our Kafka \
ingestion pipeline and latency-sensitive search services. Tokio experience required.";

/// Print ranked hits with a one-line preview.
pub fn print_hits(hits: &[resume_rag::SearchResult]) {
    for (i, hit) in hits.iter().enumerate() {
        let preview: String = hit.text.chars().take(70).collect();
        println!(
            "  {}. [similarity={:.4}] {} | {}",
            i + 1,
            hit.similarity,
            hit.document_id,
            preview.replace('\n', " / ")
        );
    }
}
