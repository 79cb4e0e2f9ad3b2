use super::Embedder;
use crate::constants::{CONNECTION_PROBE_TEXT, EMBEDDING_SAMPLE_CHARS, TIME_TO_FILL_RANGE};
use crate::errors::EmbeddingError;
use crate::pipeline::SimilarityPayload;
use crate::text::prepare_embedding_text;
use crate::utils::truncate_with_ellipsis;
use rand::Rng;
use tracing::{error, info};

/// Descriptive fields stored next to an embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMetadata {
    pub job_id: String,
    pub requisition_number: String,
    pub job_title: String,
    /// Randomly drawn placeholder, in days. Not an estimate of anything.
    pub time_to_fill: u32,
    pub salary: String,
    pub client: String,
    pub remote: bool,
    pub experience_required: String,
    pub status: String,
    /// Leading part of the embedded text, `...` appended when cut
    pub embedding_text: String,
}

impl EmbeddingMetadata {
    /// Field/value pairs for tabular display, without the text sample.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("job_id", self.job_id.clone()),
            ("requisition_number", self.requisition_number.clone()),
            ("job_title", self.job_title.clone()),
            ("time_to_fill (placeholder)", self.time_to_fill.to_string()),
            ("salary", self.salary.clone()),
            ("client", self.client.clone()),
            ("remote", self.remote.to_string()),
            ("experience_required", self.experience_required.clone()),
            ("status", self.status.clone()),
        ]
    }
}

/// A job opening's vector plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingResult {
    pub vector: Vec<f32>,
    pub metadata: EmbeddingMetadata,
}

/// Embedding calls that never fail loudly: provider errors are logged and
/// reported as `None` / `false`.
#[derive(Debug)]
pub struct EmbeddingService<E> {
    embedder: E,
    dimensions: usize,
}

impl<E: Embedder> EmbeddingService<E> {
    /// `dimensions` is the vector length the model is expected to produce.
    pub fn new(embedder: E, dimensions: usize) -> Self {
        Self {
            embedder,
            dimensions,
        }
    }

    pub fn model(&self) -> &str {
        self.embedder.model()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn checked_embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let vector = self.embedder.embed_text(text).await?;
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::Dimension {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        Ok(vector)
    }

    /// Embeds `text`, returning `None` on any provider error.
    pub async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        match self.checked_embed(text).await {
            Ok(vector) => Some(vector),
            Err(e) => {
                error!("OpenAI API Error: {}", e);
                None
            }
        }
    }

    /// Prepares the embedding text for a payload, embeds it and packages the
    /// vector with the payload's metadata.
    pub async fn embed_with_metadata(&self, payload: &SimilarityPayload) -> Option<EmbeddingResult> {
        let embedding_text = prepare_embedding_text(payload);
        let vector = self.embed(&embedding_text).await?;

        let time_to_fill = rand::thread_rng().gen_range(TIME_TO_FILL_RANGE);
        info!(
            "Embedded job {} into {} dimensions",
            payload.job_id,
            vector.len()
        );

        let meta = &payload.metadata;
        Some(EmbeddingResult {
            vector,
            metadata: EmbeddingMetadata {
                job_id: payload.job_id.clone(),
                requisition_number: payload.requisition_number.clone(),
                job_title: payload.title.clone(),
                time_to_fill,
                salary: meta.salary.clone(),
                client: meta.client.clone(),
                remote: meta.remote,
                experience_required: meta.experience_required.clone(),
                status: meta.status.clone(),
                embedding_text: truncate_with_ellipsis(&embedding_text, EMBEDDING_SAMPLE_CHARS),
            },
        })
    }

    /// Sends a fixed probe and checks that a vector of the expected length comes back.
    pub async fn test_connection(&self) -> bool {
        match self.checked_embed(CONNECTION_PROBE_TEXT).await {
            Ok(_) => true,
            Err(e) => {
                error!("OpenAI connection test failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SimilarityMetadata;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a vector of fixed length, or a provider error, and records inputs.
    struct FakeEmbedder {
        len: Option<usize>,
        inputs: Mutex<Vec<String>>,
    }

    impl FakeEmbedder {
        fn returning(len: usize) -> Self {
            Self {
                len: Some(len),
                inputs: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                len: None,
                inputs: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.inputs.lock().unwrap().push(text.to_string());
            match self.len {
                Some(len) => Ok(vec![0.125; len]),
                None => Err(EmbeddingError::Api {
                    status: 401,
                    body: "{\"error\":{\"message\":\"Incorrect API key provided\"}}".into(),
                }),
            }
        }

        fn model(&self) -> &str {
            "fake-embedding"
        }
    }

    fn payload(description: &str) -> SimilarityPayload {
        SimilarityPayload {
            job_id: "821313000000528968".into(),
            requisition_number: "ZR_3_JOB".into(),
            title: "Backend Engineer".into(),
            clean_description: description.into(),
            raw_description: format!("<p>{}</p>", description),
            metadata: SimilarityMetadata {
                salary: "100000".into(),
                status: "Open".into(),
                remote: true,
                experience_required: "2 years".into(),
                client: "Initech".into(),
            },
        }
    }

    #[tokio::test]
    async fn packages_vector_with_metadata() {
        let service = EmbeddingService::new(FakeEmbedder::returning(8), 8);
        let result = service.embed_with_metadata(&payload("Write Rust")).await.unwrap();

        assert_eq!(result.vector.len(), 8);
        let meta = &result.metadata;
        assert_eq!(meta.job_id, "821313000000528968");
        assert_eq!(meta.requisition_number, "ZR_3_JOB");
        assert_eq!(meta.job_title, "Backend Engineer");
        assert_eq!(meta.client, "Initech");
        assert!(meta.remote);
        assert!(TIME_TO_FILL_RANGE.contains(&meta.time_to_fill));
        assert_eq!(meta.embedding_text, prepare_embedding_text(&payload("Write Rust")));
    }

    #[tokio::test]
    async fn embeds_the_prepared_text() {
        let service = EmbeddingService::new(FakeEmbedder::returning(4), 4);
        service.embed_with_metadata(&payload("Ship features")).await.unwrap();
        let inputs = service.embedder.inputs.lock().unwrap().clone();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].starts_with("Job Title: Backend Engineer\n\nJob Description: Ship features"));
    }

    #[tokio::test]
    async fn provider_error_yields_none() {
        let service = EmbeddingService::new(FakeEmbedder::failing(), 1536);
        assert!(service.embed("anything").await.is_none());
        assert!(service.embed_with_metadata(&payload("x")).await.is_none());
    }

    #[tokio::test]
    async fn long_text_sample_is_cut_at_500_chars() {
        let service = EmbeddingService::new(FakeEmbedder::returning(2), 2);
        let long = "word ".repeat(300);
        let payload = payload(long.trim());
        let full = prepare_embedding_text(&payload);
        assert!(full.chars().count() > EMBEDDING_SAMPLE_CHARS);

        let result = service.embed_with_metadata(&payload).await.unwrap();
        let sample = &result.metadata.embedding_text;
        assert_eq!(sample.chars().count(), EMBEDDING_SAMPLE_CHARS + 3);
        assert!(sample.ends_with("..."));
        assert_eq!(
            sample.trim_end_matches("..."),
            full.chars().take(EMBEDDING_SAMPLE_CHARS).collect::<String>()
        );
    }

    #[tokio::test]
    async fn wrong_dimensionality_is_rejected() {
        let service = EmbeddingService::new(FakeEmbedder::returning(3), 1536);
        assert!(service.embed("short vector").await.is_none());
        assert!(!service.test_connection().await);
    }

    #[tokio::test]
    async fn connection_probe_checks_dimensions() {
        let service = EmbeddingService::new(FakeEmbedder::returning(1536), 1536);
        assert!(service.test_connection().await);
        let inputs = service.embedder.inputs.lock().unwrap().clone();
        assert_eq!(inputs, vec![CONNECTION_PROBE_TEXT.to_string()]);
    }

    #[tokio::test]
    async fn connection_probe_fails_on_provider_error() {
        let service = EmbeddingService::new(FakeEmbedder::failing(), 1536);
        assert!(!service.test_connection().await);
    }

    #[test]
    fn display_rows_skip_the_text_sample() {
        let meta = EmbeddingMetadata {
            job_id: "1".into(),
            requisition_number: "R".into(),
            job_title: "T".into(),
            time_to_fill: 30,
            salary: String::new(),
            client: String::new(),
            remote: false,
            experience_required: String::new(),
            status: String::new(),
            embedding_text: "secret sauce".into(),
        };
        let rows = meta.display_rows();
        assert_eq!(rows.len(), 9);
        assert!(rows.iter().all(|(_, v)| v != "secret sauce"));
    }
}
