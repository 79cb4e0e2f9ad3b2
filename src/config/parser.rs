use super::Settings;
use crate::errors::ConfigError;
use std::fmt;
use std::fs;

use tracing::info;

/// Loads settings from a YAML file, or returns the built-in defaults when no path is given
///
/// # Arguments
///
/// * `file_path` - Optional path to the YAML settings file
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into `Settings`
pub fn load_settings(file_path: Option<&str>) -> Result<Settings, ConfigError> {
    let Some(file_path) = file_path else {
        return Ok(Settings::default());
    };
    let yaml_str = fs::read_to_string(file_path).map_err(|source| ConfigError::Io {
        path: file_path.to_string(),
        source,
    })?;
    let settings: Settings = serde_yaml::from_str(&yaml_str)?;
    info!("Loaded settings from {}", file_path);
    Ok(settings)
}

/// Secrets sourced from the environment (after `.env` has been loaded)
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// Long-lived token enabling automatic recovery from expired access tokens
    pub refresh_token: Option<String>,
    /// Initial access token; when absent the first request triggers a refresh
    pub access_token: Option<String>,
    pub openai_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("openai_api_key", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required =
            |key: &str| optional(key).ok_or_else(|| ConfigError::MissingEnv(key.to_string()));

        Ok(Self {
            client_id: required("ZOHO_CLIENT_ID")?,
            client_secret: required("ZOHO_CLIENT_SECRET")?,
            refresh_token: optional("ZOHO_REFRESH_TOKEN"),
            access_token: optional("ZOHO_ACCESS_TOKEN"),
            openai_api_key: required("OPENAI_API_KEY")?,
        })
    }
}
