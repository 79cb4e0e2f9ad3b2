mod parser;
use crate::constants::*;
use serde::Deserialize;

pub use parser::{load_settings, Credentials};

/// Non-secret settings, optionally read from a YAML file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Recruiting platform endpoints
    #[serde(default)]
    pub recruit: RecruitSettings,
    /// Embedding provider endpoint and model
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    /// Job opening pre-filled in the interactive prompt
    #[serde(default)]
    pub default_job_id: Option<String>,
}

impl Settings {
    pub fn default_job_id(&self) -> &str {
        self.default_job_id.as_deref().unwrap_or(DEFAULT_JOB_ID)
    }
}

/// Recruiting platform configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RecruitSettings {
    /// REST API base, e.g. `https://recruit.zoho.eu/recruit/v2` for the EU data center
    #[serde(default = "default_recruit_base_url")]
    pub base_url: String,
    /// Accounts server hosting `/oauth/v2/token`
    #[serde(default = "default_accounts_base_url")]
    pub accounts_url: String,
    /// Scheme placed before the token in the `Authorization` header
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    /// Redirect URI registered with the OAuth client
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

impl Default for RecruitSettings {
    fn default() -> Self {
        Self {
            base_url: default_recruit_base_url(),
            accounts_url: default_accounts_base_url(),
            auth_scheme: default_auth_scheme(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

impl RecruitSettings {
    /// Full URL of the OAuth token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth/v2/token", self.accounts_url.trim_end_matches('/'))
    }
}

/// Embedding provider configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingSettings {
    #[serde(default = "default_embedding_base_url")]
    pub base_url: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Vector length the model is expected to return
    #[serde(default = "default_embedding_dimensions")]
    pub dimensions: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: default_embedding_base_url(),
            model: default_embedding_model(),
            dimensions: default_embedding_dimensions(),
        }
    }
}

fn default_recruit_base_url() -> String {
    DEFAULT_RECRUIT_BASE_URL.to_string()
}

fn default_accounts_base_url() -> String {
    DEFAULT_ACCOUNTS_BASE_URL.to_string()
}

fn default_auth_scheme() -> String {
    DEFAULT_AUTH_SCHEME.to_string()
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

fn default_embedding_base_url() -> String {
    DEFAULT_EMBEDDING_BASE_URL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_embedding_dimensions() -> usize {
    DEFAULT_EMBEDDING_DIMENSIONS
}
