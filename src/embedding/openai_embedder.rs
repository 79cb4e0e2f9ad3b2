use super::Embedder;
use crate::config::EmbeddingSettings;
use crate::errors::EmbeddingError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// OpenAI embedder implementation that uses OpenAI's API to generate text embeddings
pub struct OpenAIEmbedder {
    client: Client,
    /// OpenAI API key used for authentication
    api_key: String,
    /// Full URL of the embeddings endpoint
    endpoint: String,
    /// Name of the OpenAI model to use for embeddings
    model: String,
}

impl fmt::Debug for OpenAIEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIEmbedder")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAIEmbedder {
    /// Creates a new OpenAIEmbedder instance
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key, read from `OPENAI_API_KEY` at startup
    /// * `settings` - Endpoint base URL and model name
    pub fn new(api_key: &str, settings: &EmbeddingSettings) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.trim().to_string(),
            endpoint: format!("{}/embeddings", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    encoding_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Takes the first vector out of a provider response.
fn first_embedding(response: EmbeddingResponse) -> Result<Vec<f32>, EmbeddingError> {
    response
        .data
        .into_iter()
        .next()
        .map(|entry| entry.embedding)
        .ok_or(EmbeddingError::EmptyResponse)
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    /// Embeds the given text using OpenAI's API
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
            encoding_format: "float",
        };
        debug!("Embedding {} characters with {}", text.chars().count(), self.model);

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        info!("POST {} -> status: {}", self.endpoint, status);
        if !status.is_success() {
            let txt = res.text().await?;
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                body: txt,
            });
        }

        let json_resp: EmbeddingResponse = res.json().await?;
        first_embedding(json_resp)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_float_encoding() {
        let body = EmbeddingRequest {
            model: "text-embedding-3-small",
            input: "hello",
            encoding_format: "float",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["encoding_format"], "float");
        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"], "hello");
    }

    #[test]
    fn first_result_is_taken() {
        let response: EmbeddingResponse = serde_json::from_str(
            r#"{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.5,-0.25]}],"model":"text-embedding-3-small"}"#,
        )
        .unwrap();
        assert_eq!(first_embedding(response).unwrap(), vec![0.5, -0.25]);
    }

    #[test]
    fn empty_data_is_an_error() {
        let response: EmbeddingResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(matches!(
            first_embedding(response),
            Err(EmbeddingError::EmptyResponse)
        ));
    }

    #[test]
    fn endpoint_is_built_from_base_url() {
        let settings = EmbeddingSettings {
            base_url: "http://localhost:8080/v1/".into(),
            ..EmbeddingSettings::default()
        };
        let embedder = OpenAIEmbedder::new(" sk-test ", &settings);
        assert_eq!(embedder.endpoint, "http://localhost:8080/v1/embeddings");
        assert_eq!(embedder.model(), "text-embedding-3-small");
        assert!(!format!("{:?}", embedder).contains("sk-test"));
    }
}
