//! Access token handling for the recruiting platform.
//!
//! The current token lives in a [`TokenStore`] owned by the client. Refreshing
//! is always reactive: it happens when no token is set yet or when a request
//! comes back `401`, and at most once per request.

use crate::errors::RecruitError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use std::future::Future;
use std::sync::RwLock;
use tracing::{info, warn};

/// Holder of the current access token.
#[derive(Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("is_set", &self.current().is_some())
            .finish()
    }
}

impl TokenStore {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            token: RwLock::new(initial),
        }
    }

    /// Returns a copy of the current access token, if any.
    pub fn current(&self) -> Option<String> {
        let read_guard = match self.token.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Token lock poisoned, recovering...");
                poisoned.into_inner()
            }
        };
        read_guard.clone()
    }

    /// Replaces the access token wholesale.
    pub fn replace(&self, token: String) {
        let mut write_guard = match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Token lock poisoned, recovering...");
                poisoned.into_inner()
            }
        };
        *write_guard = Some(token);
    }
}

/// Outcome of a successful grant exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Issued only by the authorization-code grant
    pub refresh_token: Option<String>,
    /// Declared lifetime in seconds
    pub expires_in: Option<u64>,
}

/// Source of fresh access tokens.
#[async_trait]
pub trait TokenRefresher: Debug + Send + Sync {
    async fn refresh(&self) -> Result<TokenGrant, RecruitError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

/// Client for the OAuth token endpoint of the accounts server.
#[derive(Clone)]
pub struct OAuthClient {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    refresh_token: Option<String>,
}

impl Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("can_refresh", &self.can_refresh())
            .finish()
    }
}

impl OAuthClient {
    pub fn new(
        http: Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            redirect_uri,
            refresh_token,
        }
    }

    /// Whether a long-lived refresh token is configured.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Exchanges a one-time authorization code for a new access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenGrant, RecruitError> {
        self.request_grant(&[("grant_type", "authorization_code"), ("code", code.trim())])
            .await
    }

    /// Trades the configured refresh token for a new access token.
    pub async fn refresh_access_token(&self) -> Result<TokenGrant, RecruitError> {
        let refresh_token = self
            .refresh_token
            .as_deref()
            .ok_or(RecruitError::NoCredentials)?;
        self.request_grant(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request_grant(&self, grant: &[(&str, &str)]) -> Result<TokenGrant, RecruitError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        form.extend_from_slice(grant);

        let grant_type = grant.first().map(|(_, v)| *v).unwrap_or_default();
        info!("POST {} (grant_type={})", self.token_url, grant_type);

        let resp = self.http.post(&self.token_url).form(&form).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        info!("Token endpoint -> status: {}", status);

        if !(200..300).contains(&status) {
            return Err(RecruitError::TokenEndpoint { status, body });
        }
        parse_grant(status, body)
    }
}

/// Interprets a success-status body. The accounts server answers `200` with an
/// `error` member for rejected codes, so a missing `access_token` is a failure.
fn parse_grant(status: u16, body: String) -> Result<TokenGrant, RecruitError> {
    let parsed: TokenResponse = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(_) => return Err(RecruitError::TokenEndpoint { status, body }),
    };
    match parsed.access_token {
        Some(access_token) if parsed.error.is_none() => Ok(TokenGrant {
            access_token,
            refresh_token: parsed.refresh_token,
            expires_in: parsed.expires_in,
        }),
        _ => Err(RecruitError::TokenEndpoint { status, body }),
    }
}

#[async_trait]
impl TokenRefresher for OAuthClient {
    async fn refresh(&self) -> Result<TokenGrant, RecruitError> {
        self.refresh_access_token().await
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

async fn refresh_into(
    tokens: &TokenStore,
    refresher: &dyn TokenRefresher,
) -> Result<String, RecruitError> {
    let grant = refresher.refresh().await?;
    info!(
        "Access token refreshed (expires in {}s)",
        grant.expires_in.unwrap_or_default()
    );
    tokens.replace(grant.access_token.clone());
    Ok(grant.access_token)
}

/// Runs an authenticated request, recovering once from an expired token.
///
/// `send` performs the request with the given access token. Without a
/// refresher the stored token is used as-is and a `401` is returned to the
/// caller untouched. With a refresher, a missing token or a `401` response
/// triggers exactly one refresh and, for the `401` case, one retry. A refresh
/// failure ends the request with that error.
pub async fn send_with_reauth<F, Fut>(
    tokens: &TokenStore,
    refresher: Option<&dyn TokenRefresher>,
    send: F,
) -> Result<RawResponse, RecruitError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<RawResponse, RecruitError>>,
{
    let mut refreshed = false;
    let token = match (tokens.current(), refresher) {
        (Some(token), _) => token,
        (None, Some(refresher)) => {
            info!("No access token set, refreshing before the first request");
            refreshed = true;
            refresh_into(tokens, refresher).await?
        }
        (None, None) => return Err(RecruitError::NoCredentials),
    };

    let response = send(token).await?;
    if !response.is_unauthorized() || refreshed {
        return Ok(response);
    }
    let Some(refresher) = refresher else {
        return Ok(response);
    };

    warn!("Access token rejected (401), refreshing and retrying once");
    let token = refresh_into(tokens, refresher).await?;
    send(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FakeRefresher {
        calls: AtomicUsize,
        outcome: Result<&'static str, u16>,
    }

    impl FakeRefresher {
        fn issuing(token: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Ok(token),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: Err(status),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenRefresher for FakeRefresher {
        async fn refresh(&self) -> Result<TokenGrant, RecruitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Ok(token) => Ok(TokenGrant {
                    access_token: token.to_string(),
                    refresh_token: None,
                    expires_in: Some(3600),
                }),
                Err(status) => Err(RecruitError::TokenEndpoint {
                    status,
                    body: "{\"error\":\"invalid_client\"}".into(),
                }),
            }
        }
    }

    /// Replays canned responses and records the token used for each attempt.
    struct Script {
        responses: Mutex<VecDeque<RawResponse>>,
        seen_tokens: Mutex<Vec<String>>,
    }

    impl Script {
        fn new(responses: &[(u16, &str)]) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .iter()
                        .map(|(status, body)| RawResponse {
                            status: *status,
                            body: body.to_string(),
                        })
                        .collect(),
                ),
                seen_tokens: Mutex::new(Vec::new()),
            }
        }

        async fn send(&self, token: String) -> Result<RawResponse, RecruitError> {
            self.seen_tokens.lock().unwrap().push(token);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted"))
        }

        fn seen(&self) -> Vec<String> {
            self.seen_tokens.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn unauthorized_then_success_refreshes_once() {
        let tokens = TokenStore::new(Some("stale".into()));
        let refresher = FakeRefresher::issuing("fresh");
        let script = Script::new(&[(401, "{\"code\":\"INVALID_TOKEN\"}"), (200, "{\"data\":[]}")]);

        let response = send_with_reauth(&tokens, Some(&refresher), |t| script.send(t))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, "{\"data\":[]}");
        assert_eq!(refresher.calls(), 1);
        assert_eq!(script.seen(), vec!["stale", "fresh"]);
        assert_eq!(tokens.current().as_deref(), Some("fresh"));
        assert!(!format!("{:?}", tokens).contains("fresh"));
    }

    #[tokio::test]
    async fn second_unauthorized_is_returned_without_looping() {
        let tokens = TokenStore::new(Some("stale".into()));
        let refresher = FakeRefresher::issuing("still-bad");
        let script = Script::new(&[(401, ""), (401, "")]);

        let response = send_with_reauth(&tokens, Some(&refresher), |t| script.send(t))
            .await
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(refresher.calls(), 1);
        assert_eq!(script.seen().len(), 2);
    }

    #[tokio::test]
    async fn success_does_not_touch_the_refresher() {
        let tokens = TokenStore::new(Some("valid".into()));
        let refresher = FakeRefresher::issuing("unused");
        let script = Script::new(&[(200, "{}")]);

        send_with_reauth(&tokens, Some(&refresher), |t| script.send(t))
            .await
            .unwrap();

        assert_eq!(refresher.calls(), 0);
        assert_eq!(tokens.current().as_deref(), Some("valid"));
    }

    #[tokio::test]
    async fn unset_token_is_refreshed_before_first_attempt() {
        let tokens = TokenStore::default();
        let refresher = FakeRefresher::issuing("first");
        let script = Script::new(&[(401, "")]);

        let response = send_with_reauth(&tokens, Some(&refresher), |t| script.send(t))
            .await
            .unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(refresher.calls(), 1);
        assert_eq!(script.seen(), vec!["first"]);
    }

    #[tokio::test]
    async fn refresh_failure_ends_the_request() {
        let tokens = TokenStore::new(Some("stale".into()));
        let refresher = FakeRefresher::failing(400);
        let script = Script::new(&[(401, "")]);

        let err = send_with_reauth(&tokens, Some(&refresher), |t| script.send(t))
            .await
            .unwrap_err();

        assert!(matches!(err, RecruitError::TokenEndpoint { status: 400, .. }));
        assert_eq!(script.seen().len(), 1);
        assert_eq!(tokens.current().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn failed_refresh_is_retried_on_the_next_request() {
        let tokens = TokenStore::new(Some("stale".into()));
        let broken = FakeRefresher::failing(500);
        let first = Script::new(&[(401, "")]);
        assert!(send_with_reauth(&tokens, Some(&broken), |t| first.send(t))
            .await
            .is_err());

        let working = FakeRefresher::issuing("fresh");
        let second = Script::new(&[(401, ""), (200, "ok")]);
        let response = send_with_reauth(&tokens, Some(&working), |t| second.send(t))
            .await
            .unwrap();
        assert_eq!(response.body, "ok");
        assert_eq!(working.calls(), 1);
    }

    #[tokio::test]
    async fn static_token_mode_surfaces_unauthorized() {
        let tokens = TokenStore::new(Some("static".into()));
        let script = Script::new(&[(401, "")]);

        let response = send_with_reauth(&tokens, None, |t| script.send(t))
            .await
            .unwrap();

        assert!(response.is_unauthorized());
        assert_eq!(script.seen(), vec!["static"]);
    }

    #[tokio::test]
    async fn no_token_and_no_refresher_is_an_error() {
        let tokens = TokenStore::default();
        let script = Script::new(&[]);

        let err = send_with_reauth(&tokens, None, |t| script.send(t))
            .await
            .unwrap_err();

        assert!(matches!(err, RecruitError::NoCredentials));
        assert!(script.seen().is_empty());
    }

    #[test]
    fn grant_body_with_error_member_is_a_failure() {
        let err = parse_grant(200, "{\"error\":\"invalid_code\"}".into()).unwrap_err();
        assert!(matches!(err, RecruitError::TokenEndpoint { status: 200, ref body } if body.contains("invalid_code")));
    }

    #[test]
    fn grant_body_is_parsed() {
        let grant = parse_grant(
            200,
            r#"{"access_token":"1000.a","refresh_token":"1000.r","expires_in":3600,"api_domain":"https://www.zohoapis.com","token_type":"Bearer"}"#.into(),
        )
        .unwrap();
        assert_eq!(grant.access_token, "1000.a");
        assert_eq!(grant.refresh_token.as_deref(), Some("1000.r"));
        assert_eq!(grant.expires_in, Some(3600));
    }

    #[test]
    fn non_json_grant_body_is_a_failure() {
        assert!(parse_grant(200, "<html>".into()).is_err());
    }
}
