use super::{send_with_reauth, OAuthClient, RawResponse, TokenGrant, TokenRefresher, TokenStore};
use crate::config::{Credentials, RecruitSettings};
use crate::constants::JOB_OPENINGS_MODULE;
use crate::errors::{ConfigError, RecruitError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Client for the recruiting platform's job openings endpoint.
#[derive(Debug)]
pub struct RecruitClient {
    http: Client,
    base_url: Url,
    auth_scheme: String,
    tokens: TokenStore,
    oauth: OAuthClient,
    /// Present only when a long-lived refresh token is configured
    refresher: Option<Box<dyn TokenRefresher>>,
}

impl RecruitClient {
    /// Creates a client from settings and environment credentials.
    ///
    /// Without `ZOHO_REFRESH_TOKEN` the client works in static-token mode and
    /// reports expired tokens instead of renewing them.
    pub fn new(settings: &RecruitSettings, credentials: &Credentials) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&settings.base_url).map_err(|source| ConfigError::Url {
            url: settings.base_url.clone(),
            source,
        })?;
        let http = Client::new();
        let oauth = OAuthClient::new(
            http.clone(),
            settings.token_url(),
            credentials.client_id.clone(),
            credentials.client_secret.clone(),
            settings.redirect_uri.clone(),
            credentials.refresh_token.clone(),
        );
        let refresher: Option<Box<dyn TokenRefresher>> = if oauth.can_refresh() {
            Some(Box::new(oauth.clone()))
        } else {
            None
        };

        Ok(Self {
            http,
            base_url,
            auth_scheme: settings.auth_scheme.clone(),
            tokens: TokenStore::new(credentials.access_token.clone()),
            oauth,
            refresher,
        })
    }

    /// Whether an expired token will be renewed automatically.
    pub fn recovers_from_expiry(&self) -> bool {
        self.refresher.is_some()
    }

    /// URL of a single job opening; the identifier is encoded as one path segment.
    pub fn job_url(&self, job_id: &str) -> Result<Url, RecruitError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RecruitError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(JOB_OPENINGS_MODULE)
            .push(job_id.trim());
        Ok(url)
    }

    /// Fetches one job opening and returns the raw JSON response.
    ///
    /// A non-success status becomes `RecruitError::Api`, a transport failure
    /// `RecruitError::Transport`. A success response with an empty or non-JSON
    /// body is returned as `Value::Null`, which extraction treats as "no data".
    pub async fn fetch_job(&self, job_id: &str) -> Result<Value, RecruitError> {
        let url = self.job_url(job_id)?;
        info!("GET {}", url);

        let response = send_with_reauth(&self.tokens, self.refresher.as_deref(), |token| {
            self.get(url.clone(), token)
        })
        .await?;

        info!("GET {} -> status: {}", url, response.status);
        job_body(job_id, response)
    }

    async fn get(&self, url: Url, token: String) -> Result<RawResponse, RecruitError> {
        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("{} {}", self.auth_scheme, token))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }

    /// Exchanges a one-time authorization code and adopts the new access token
    /// for the rest of the session.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, RecruitError> {
        let grant = self.oauth.exchange_code(code).await?;
        self.tokens.replace(grant.access_token.clone());
        info!("Adopted access token from authorization code exchange");
        Ok(grant)
    }
}

/// Maps a completed job request to its JSON body.
fn job_body(job_id: &str, response: RawResponse) -> Result<Value, RecruitError> {
    if !response.is_success() {
        return Err(RecruitError::api(response.status));
    }
    debug!("Job response body: {} bytes", response.body.len());

    if response.body.trim().is_empty() {
        warn!("Job {} returned an empty body", job_id);
        return Ok(Value::Null);
    }
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Job {} returned a body that is not JSON: {}", job_id, e);
            Ok(Value::Null)
        }
    }
}
