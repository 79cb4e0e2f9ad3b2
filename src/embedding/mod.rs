/// Module for OpenAI embedder implementation
pub mod openai_embedder;
/// Embedding calls with error swallowing and result packaging
mod service;

use crate::errors::EmbeddingError;
use async_trait::async_trait;

pub use openai_embedder::*;
pub use service::*;

/// Trait defining interface for text embedding functionality
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds the given text into a vector of floating point numbers
    ///
    /// # Arguments
    ///
    /// * `text` - The text to embed
    ///
    /// # Returns
    ///
    /// A Result containing either:
    /// * The vector of the first result returned by the provider
    /// * An `EmbeddingError` if the call fails or the response holds no result
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Model identifier sent with every request
    fn model(&self) -> &str;
}
