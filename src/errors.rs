/// Failures while assembling configuration at startup. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    MissingEnv(String),
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors surfaced by the recruiting platform client.
///
/// Every variant is recoverable from the caller's point of view: the UI prints
/// the message and keeps accepting input.
#[derive(Debug, thiserror::Error)]
pub enum RecruitError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Token endpoint returned {status}: {body}")]
    TokenEndpoint { status: u16, body: String },
    #[error("No access token available and no refresh token configured")]
    NoCredentials,
    #[error("Base URL cannot carry a path: {0}")]
    InvalidUrl(String),
}

impl RecruitError {
    /// Builds the error reported for a non-success status code.
    pub fn api(status: u16) -> Self {
        RecruitError::Api {
            status,
            message: format!("API Error: {}", status),
        }
    }

    /// Status code carried by the error, if the upstream answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RecruitError::Api { status, .. } | RecruitError::TokenEndpoint { status, .. } => {
                Some(*status)
            }
            RecruitError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors from the embedding provider. `EmbeddingService` logs and swallows them.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error from OpenAI ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("No embedding in response")]
    EmptyResponse,
    #[error("Expected a {expected}-dimensional vector, got {actual}")]
    Dimension { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_status_and_message() {
        let err = RecruitError::api(404);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API Error: 404");
    }

    #[test]
    fn missing_env_names_the_variable() {
        let err = ConfigError::MissingEnv("OPENAI_API_KEY".into());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
