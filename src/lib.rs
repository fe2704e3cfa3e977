//! Async Rust client library for the CrowdStrike Falcon device control
//! policy and Falcon Intelligence Recon APIs.
//!
//! Provides OAuth2 authentication, an authenticated HTTP transport with
//! one-shot 401 retry, a descriptor-driven request dispatcher, and typed
//! wrapper functions for every operation in the two API areas. Every
//! wrapper returns the same [`envelope::Envelope`] shape regardless of
//! outcome — remote success, remote error, local validation failure, or
//! transport fault — so callers branch on status and error entries rather
//! than catching fault types.
//!
//! # Modules
//!
//! - [`auth`] — OAuth2 client-credentials token provider with expiry tracking.
//! - [`client`] — Authenticated HTTP transport with 401 refresh-replay.
//! - [`device_control`] — Device control policy operations.
//! - [`dispatch`] — Descriptor-driven dispatcher producing envelopes.
//! - [`endpoint`] — Static endpoint descriptor tables and the registry.
//! - [`envelope`] — The uniform result envelope.
//! - [`error`] — Typed errors for the auth/transport plumbing.
//! - [`params`] — Query-parameter normalization.
//! - [`payload`] — Shared request-body builders.
//! - [`recon`] — Falcon Intelligence Recon operations.
//!
//! # Quick Start
//!
//! ```ignore
//! use falcon_api::auth::TokenProvider;
//! use falcon_api::client::FalconClient;
//! use falcon_api::device_control::{self, PolicyQuery};
//! use falcon_api::dispatch::Dispatcher;
//!
//! let auth = TokenProvider::new("client-id", "client-secret");
//! let dispatcher = Dispatcher::new(FalconClient::new(auth));
//!
//! let query = PolicyQuery {
//!     filter: Some("platform_name:'Windows'".to_string()),
//!     ..Default::default()
//! };
//! let result = device_control::query_policies(&dispatcher, &query).await;
//! if result.is_success() {
//!     println!("{:?}", result.resources());
//! }
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod device_control;
pub mod dispatch;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod params;
pub mod payload;
pub mod recon;
