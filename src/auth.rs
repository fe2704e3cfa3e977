//! OAuth2 client-credentials authentication for the CrowdStrike Falcon API.
//!
//! Acquires bearer tokens from the Falcon `/oauth2/token` endpoint using an
//! API client ID and secret. The token is cached in `TokenProvider` and can
//! be refreshed on demand. Consumers (e.g. `FalconClient`) read the cached
//! token via `token()` and call `refresh_token()` when it is absent or stale.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{FalconError, Result};

/// Default Falcon cloud API base. Other clouds (us-2, eu-1, us-gov-1) are
/// selected by constructing the provider with `with_base_url`.
const DEFAULT_BASE_URL: &str = "https://api.crowdstrike.com";

/// Form body sent to the token endpoint.
/// Fields are serialized as `application/x-www-form-urlencoded` by reqwest's `.form()`.
#[derive(Serialize)]
#[allow(missing_docs)]
pub struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    /// Child CID for Flight Control (parent/child) scenarios. Omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    member_cid: Option<&'a str>,
}

/// Subset of the Falcon token response that we need.
/// The endpoint returns additional fields (e.g. `id_token`) which are
/// silently ignored by serde because we don't mark the struct `deny_unknown_fields`.
#[derive(Deserialize)]
#[allow(missing_docs)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Safety buffer subtracted from `expires_in` to trigger refresh before
/// the token actually expires. Prevents requests from racing the expiry boundary.
const EXPIRY_BUFFER_SECS: u64 = 60;

/// Manages OAuth2 token acquisition and caching.
///
/// Invariants:
/// - `response` is `None` until the first successful `refresh_token()` call.
/// - After a successful refresh, `token()` returns `Some` until the token
///   expires (with a 60-second safety buffer), the provider is dropped,
///   or the token is replaced by a subsequent refresh.
/// - `acquired_at` is always `Some` when `response` is `Some`.
pub struct TokenProvider {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    member_cid: Option<String>,
    response: Option<TokenResponse>,
    acquired_at: Option<Instant>,
}

impl TokenProvider {
    /// Creates a provider for the default Falcon cloud.
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self::with_base_url(client_id, client_secret, DEFAULT_BASE_URL)
    }

    /// Creates a provider that authenticates against a non-default cloud,
    /// or a mock server in tests.
    pub fn with_base_url(client_id: &str, client_secret: &str, base_url: &str) -> Self {
        TokenProvider {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            member_cid: None,
            response: None,
            acquired_at: None,
        }
    }

    /// Sets the member CID used for Flight Control (parent/child) auth.
    pub fn member_cid(mut self, cid: &str) -> Self {
        self.member_cid = Some(cid.to_string());
        self
    }

    /// Creates a `TokenProvider` with a pre-set token, bypassing the token
    /// endpoint. Used by tests to avoid real HTTP calls during token
    /// acquisition. The token is treated as freshly acquired (expires_in = 1800s).
    pub fn with_token(token: &str) -> Self {
        TokenProvider {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            member_cid: None,
            response: Some(TokenResponse {
                access_token: token.to_string(),
                token_type: "bearer".to_string(),
                expires_in: 1800,
            }),
            acquired_at: Some(Instant::now()),
        }
    }

    /// Fetches a new token from the Falcon token endpoint and caches it.
    ///
    /// The response body is read as text first so that on failure the raw
    /// error payload is preserved in the error — the API's diagnostic
    /// messages would otherwise be discarded along with the response.
    pub async fn refresh_token(&mut self) -> Result<()> {
        let body = TokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            member_cid: self.member_cid.as_deref(),
        };

        let url = format!("{}/oauth2/token", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&body)
            .send()
            .await
            .map_err(|err| FalconError::Auth {
                message: "token request could not be sent".to_string(),
                source: Some(Box::new(err)),
            })?;

        // Read body before checking status so we can surface the API's
        // detailed error message on failure.
        let status = response.status();
        let body = response.text().await.map_err(|err| FalconError::Auth {
            message: "token response body could not be read".to_string(),
            source: Some(Box::new(err)),
        })?;

        if !status.is_success() {
            return Err(FalconError::Auth {
                message: format!("token request failed ({status}): {body}"),
                source: None,
            });
        }

        let resp: TokenResponse = serde_json::from_str(&body)?;
        self.acquired_at = Some(Instant::now());
        self.response = Some(resp);

        Ok(())
    }

    /// Discards the cached token so the next `token()` call reports `None`
    /// and forces a refresh. Called by the client when the API rejects a
    /// token server-side before our local expiry tracking noticed.
    pub fn invalidate(&mut self) {
        self.response = None;
        self.acquired_at = None;
    }

    /// Returns `true` if a token exists but has exceeded its lifetime
    /// (minus the safety buffer). Returns `false` if no token is cached.
    fn is_expired(&self) -> bool {
        match (&self.response, self.acquired_at) {
            (Some(resp), Some(acquired)) => {
                let lifetime = resp.expires_in.saturating_sub(EXPIRY_BUFFER_SECS);
                acquired.elapsed().as_secs() >= lifetime
            }
            _ => false,
        }
    }

    /// Returns the cached access token, or `None` if no token exists
    /// or the token has expired (with a 60-second safety buffer).
    pub fn token(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.response.as_ref().map(|ret| ret.access_token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_none_before_refresh() {
        let tp = TokenProvider::new("client-id", "client-secret");
        assert!(tp.token().is_none(), "token must be None before any refresh");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let tp = TokenProvider::with_base_url("id", "secret", "https://api.us-2.crowdstrike.com/");
        assert_eq!(tp.base_url, "https://api.us-2.crowdstrike.com");
    }

    #[test]
    fn token_request_serializes_as_form() {
        let req = TokenRequest {
            client_id: "cid",
            client_secret: "secret-value",
            member_cid: None,
        };
        let encoded = serde_urlencoded::to_string(&req).unwrap();
        assert!(encoded.contains("client_id=cid"));
        assert!(encoded.contains("client_secret=secret-value"));
        assert!(
            !encoded.contains("member_cid"),
            "absent member_cid must be omitted from the form body"
        );
    }

    #[test]
    fn token_request_includes_member_cid_when_set() {
        let req = TokenRequest {
            client_id: "cid",
            client_secret: "secret",
            member_cid: Some("child-cid-1234"),
        };
        let encoded = serde_urlencoded::to_string(&req).unwrap();
        assert!(encoded.contains("member_cid=child-cid-1234"));
    }

    #[test]
    fn token_response_deserializes_from_falcon_format() {
        let json = r#"{
            "access_token": "eyJhbGci.test.token",
            "token_type": "bearer",
            "expires_in": 1799
        }"#;
        let resp: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "eyJhbGci.test.token");
        assert_eq!(resp.token_type, "bearer");
        assert_eq!(resp.expires_in, 1799);
    }

    #[test]
    fn token_response_ignores_unknown_fields() {
        // The token endpoint may return extra fields we don't model.
        let json = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 1799,
            "id_token": "opaque"
        }"#;
        let resp: std::result::Result<TokenResponse, _> = serde_json::from_str(json);
        assert!(resp.is_ok(), "should ignore unknown fields by default");
    }

    #[test]
    fn fresh_token_is_not_expired() {
        let tp = TokenProvider::with_token("test-token");
        assert!(tp.token().is_some(), "freshly created token must be available");
    }

    #[test]
    fn invalidate_clears_cached_token() {
        let mut tp = TokenProvider::with_token("test-token");
        tp.invalidate();
        assert!(tp.token().is_none(), "token must be None after invalidation");
    }

    #[test]
    fn expired_token_returns_none() {
        // Simulate a token that expired in the past by setting acquired_at
        // far enough back that expires_in - buffer has elapsed.
        let mut tp = TokenProvider::with_token("test-token");
        tp.acquired_at = Some(Instant::now() - std::time::Duration::from_secs(3600));
        assert!(tp.token().is_none(), "token must be None after expiry");
    }

    #[test]
    fn token_within_buffer_returns_none() {
        // A token with expires_in=90 and a 60s buffer has an effective
        // lifetime of 30s. After 31s it should appear expired.
        let mut tp = TokenProvider::with_token("test-token");
        tp.response.as_mut().unwrap().expires_in = 90;
        tp.acquired_at = Some(Instant::now() - std::time::Duration::from_secs(31));
        assert!(
            tp.token().is_none(),
            "token must be None when within the safety buffer"
        );
    }

    #[test]
    fn token_before_buffer_returns_some() {
        // Same setup as above but only 10s elapsed — well within the 30s
        // effective lifetime.
        let mut tp = TokenProvider::with_token("test-token");
        tp.response.as_mut().unwrap().expires_in = 90;
        tp.acquired_at = Some(Instant::now() - std::time::Duration::from_secs(10));
        assert!(
            tp.token().is_some(),
            "token must still be valid before buffer boundary"
        );
    }
}
