//! Typed error hierarchy for the falcon-api plumbing boundary.
//!
//! `FalconError` covers the layers *below* the dispatcher: token
//! acquisition, transport-level request execution, and JSON parsing. The
//! caller-facing surface never sees these directly — the dispatcher folds
//! every failure into a [`crate::envelope::Envelope`] so callers inspect
//! status codes and error lists rather than catching fault types.
//!
//! Design rationale:
//! - Variants map to real system boundaries, not to internal implementation
//!   details. `Auth` covers the Falcon token endpoint; `Network` covers
//!   transport failures that never produced an HTTP status; `Parse` covers
//!   malformed JSON from either.
//! - `Auth` carries a human-readable message (including the token
//!   endpoint's diagnostic body when available) and an optional chained
//!   source for `Error::source()` traversal.
//! - `Network` wraps `reqwest::Error` for transport-level failures (DNS,
//!   TCP, TLS, timeout) that don't produce an HTTP status code.

/// Unified error type for the auth/transport layers.
///
/// The `#[source]` attribute on inner errors enables `Error::source()`
/// chaining so callers (and logging frameworks) can traverse the full
/// cause chain.
#[derive(Debug, thiserror::Error)]
pub enum FalconError {
    /// Authentication failure at the Falcon token endpoint.
    ///
    /// This covers:
    /// - Non-2xx responses from `/oauth2/token` (invalid credentials,
    ///   revoked API clients, wrong cloud). The message includes the
    ///   endpoint's error body when available.
    /// - Network failures reaching the token endpoint.
    /// - Missing token after a refresh attempt (internal invariant violation).
    #[error("authentication failed: {message}")]
    Auth {
        /// Human-readable description of the authentication failure,
        /// including HTTP status and token-endpoint error body when available.
        message: String,
        /// The underlying transport or parse error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A network-level failure occurred (DNS resolution, TCP connection,
    /// TLS handshake, request timeout, etc.).
    ///
    /// No HTTP status code is available because the request did not
    /// complete. Non-2xx *responses* are not errors at this layer — they
    /// flow back as raw responses for the dispatcher to normalize.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON deserialization failed when parsing a token response body.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias used throughout the plumbing layers.
pub type Result<T> = std::result::Result<T, FalconError>;
