//! Authenticated HTTP transport for the CrowdStrike Falcon API.
//!
//! `FalconClient` wraps a `reqwest::Client` and a `TokenProvider` behind a
//! `Mutex` and executes one request per call, returning the raw
//! `(status, headers, bytes)` triple. Unlike a typical JSON helper it does
//! **not** turn non-2xx statuses into errors: the dispatcher normalizes
//! every response — success or failure — into a result envelope, so the
//! transport's only error cases are auth failures and network-level faults.
//!
//! Token lifecycle:
//! - Lazy acquisition: the first request that finds no cached token triggers
//!   `refresh_token()` automatically via `bearer_token()`.
//! - Expiry-aware: `TokenProvider::token()` returns `None` when the cached
//!   token has expired, which triggers a fresh refresh on the next request.
//! - One-shot 401 retry: if the API returns `401 Unauthorized` (e.g. because
//!   the token was revoked server-side before our local expiry check caught
//!   it), the client invalidates the cached token, refreshes once, and
//!   replays the request exactly once. A second 401 flows back to the
//!   dispatcher as an ordinary response — no infinite retry loop.

use bytes::Bytes;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::auth::TokenProvider;
use crate::error::{FalconError, Result};

const BASE_URL: &str = "https://api.crowdstrike.com";

/// Connect timeout for Falcon API calls.
/// Covers TCP + TLS handshake only.
const API_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for Falcon API calls.
/// Covers the full round-trip including response body download. Export-job
/// file downloads can be multi-MB, so this is set well above the typical
/// query round-trip.
const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds a `reqwest::Client` with explicit timeouts for Falcon API calls.
///
/// Separate from the `TokenProvider`'s client so the two can carry
/// different timeout policies: token requests are small and fast, while
/// API requests may involve file downloads.
fn build_api_client() -> Client {
    Client::builder()
        .connect_timeout(API_CONNECT_TIMEOUT)
        .timeout(API_REQUEST_TIMEOUT)
        .build()
        .expect("failed to build HTTP client for the Falcon API")
}

/// A raw HTTP response as the dispatcher consumes it.
///
/// Headers are flattened to a string map (non-UTF-8 header values are
/// dropped; the Falcon API does not emit any). The body stays as bytes so
/// binary download operations never round-trip through a string.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Response headers, lowercased names.
    pub headers: BTreeMap<String, String>,
    /// Raw response body.
    pub body: Bytes,
}

/// Authenticated HTTP transport for the Falcon REST API.
///
/// Design decisions:
/// - `auth` is behind a `Mutex` because `refresh_token()` requires `&mut self`
///   while API methods only need `&self`. The lock is held only for the brief
///   token check/refresh, never across an HTTP round-trip.
/// - `base_url` is stored as a `String` rather than a `&'static str` so it
///   can be overridden in tests (e.g. pointing at a wiremock server) and for
///   non-default Falcon clouds.
pub struct FalconClient {
    client: Client,
    base_url: String,
    auth: Mutex<TokenProvider>,
}

impl FalconClient {
    pub fn new(auth: TokenProvider) -> Self {
        FalconClient {
            client: build_api_client(),
            base_url: BASE_URL.to_string(),
            auth: Mutex::new(auth),
        }
    }

    /// Constructor that accepts a custom base URL, used by tests to point
    /// at a local mock server and by callers on non-default Falcon clouds.
    pub fn with_base_url(auth: TokenProvider, base_url: &str) -> Self {
        FalconClient {
            client: build_api_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: Mutex::new(auth),
        }
    }

    /// Returns a valid bearer token, refreshing if none is cached or if the
    /// current token has expired.
    ///
    /// The mutex is held only for the token check and optional refresh.
    /// If refresh itself fails, the error propagates to the caller.
    async fn bearer_token(&self) -> Result<String> {
        let mut auth = self.auth.lock().await;
        if auth.token().is_none() {
            auth.refresh_token().await?;
        }

        auth.token()
            .map(str::to_owned)
            .ok_or_else(|| FalconError::Auth {
                message: "token missing after refresh".to_string(),
                source: None,
            })
    }

    /// Invalidates the current token and acquires a fresh one.
    ///
    /// Called when the API returns 401, indicating the token was rejected
    /// server-side (revocation, clock skew, etc.) before our local expiry
    /// tracking detected it.
    async fn force_refresh(&self) -> Result<String> {
        let mut auth = self.auth.lock().await;
        auth.invalidate();
        auth.refresh_token().await?;

        auth.token()
            .map(str::to_owned)
            .ok_or_else(|| FalconError::Auth {
                message: "token missing after forced refresh".to_string(),
                source: None,
            })
    }

    /// Executes one authenticated request and returns the raw response.
    ///
    /// `path` is the operation path with path parameters already
    /// substituted (leading slash expected). `query` carries pre-serialized
    /// pairs; a repeated key emits a repeated query parameter, which is how
    /// multi-format array parameters reach the wire. `body` is serialized
    /// as JSON when present.
    ///
    /// 401 retry behavior:
    /// - If the response is `401 Unauthorized`, the client assumes the
    ///   token was rejected server-side. It invalidates the cached token,
    ///   acquires a fresh one, and replays the request exactly once.
    /// - The replay's response is returned as-is, 401 or not.
    /// - Every other status (success or error) is returned without retry;
    ///   normalizing it is the dispatcher's job.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);

        // First attempt with current (possibly cached) token.
        let token = self.bearer_token().await?;
        let resp = self
            .build_request(method.clone(), &url, &token, query, body)
            .send()
            .await?;

        // On 401, force a token refresh and replay exactly once.
        let resp = if resp.status() == StatusCode::UNAUTHORIZED {
            let fresh_token = self.force_refresh().await?;
            self.build_request(method, &url, &fresh_token, query, body)
                .send()
                .await?
        } else {
            resp
        };

        Self::into_raw(resp).await
    }

    /// Constructs an authenticated request builder with optional JSON body.
    ///
    /// Factored out of `send` so the first attempt and the 401 replay can
    /// both build requests without duplicating header/body attachment.
    fn build_request(
        &self,
        method: Method,
        url: &str,
        token: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, url).bearer_auth(token);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(payload) = body {
            req = req.json(payload);
        }
        req
    }

    /// Flattens a `reqwest::Response` into the owned raw form the
    /// dispatcher consumes.
    async fn into_raw(resp: reqwest::Response) -> Result<RawResponse> {
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = resp.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
