//! The uniform result envelope returned by every operation.
//!
//! Every dispatch path — remote success, remote error, local validation
//! failure, or transport fault — produces an [`Envelope`] of the same
//! shape. Callers inspect `status_code` and `errors()` instead of catching
//! fault types; nothing below the wrapper surface raises.
//!
//! The body takes one of three forms:
//! - [`ResponseBody::Api`] — the vendor's JSON payload shape
//!   (`meta` / `resources` / `errors`, plus any extra top-level fields).
//! - [`ResponseBody::Binary`] — raw bytes from download operations, with
//!   content-type metadata preserved in the envelope headers.
//! - [`ResponseBody::Empty`] — successful responses with no body.
//!
//! Failure invariant: whenever `status_code` is outside 2xx, the body is
//! `Api` and `errors()` is non-empty — remote error payloads pass through
//! verbatim, and empty or unparseable failure bodies get one synthesized
//! entry carrying the HTTP status.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::client::RawResponse;
use crate::error::FalconError;

/// One error entry from the API (or synthesized locally).
///
/// The API emits `{"code": <int>, "message": "..."}` entries; `code` is
/// optional because some gateway-level errors omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric error code, typically mirroring an HTTP status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Human-readable error description.
    pub message: String,
}

/// The vendor's JSON response payload shape.
///
/// `meta` carries query metadata (pagination, trace id), `resources` the
/// result data, `errors` the error entries. Unmodeled top-level fields are
/// collected into `extra` so forward-compatible responses never fail to
/// parse.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiPayload {
    /// Query metadata: pagination counts, query time, trace id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// The result data; shape varies per operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Value>,
    /// Error entries; empty on success.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiError>,
    /// Top-level fields this crate does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The envelope body.
#[derive(Debug)]
pub enum ResponseBody {
    /// Parsed JSON payload in the vendor's shape.
    Api(ApiPayload),
    /// Raw bytes from a binary download operation.
    Binary(Bytes),
    /// Successful response with no body.
    Empty,
}

/// Uniform return value for every operation.
#[derive(Debug)]
pub struct Envelope {
    /// HTTP status code; 0 for transport-level faults that never produced
    /// a response.
    pub status_code: u16,
    /// Response headers (empty for locally synthesized envelopes).
    pub headers: BTreeMap<String, String>,
    /// The response body in one of its three forms.
    pub body: ResponseBody,
}

const NO_ERRORS: &[ApiError] = &[];

impl Envelope {
    /// True when the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The error entries, or an empty slice for success/binary bodies.
    pub fn errors(&self) -> &[ApiError] {
        match &self.body {
            ResponseBody::Api(payload) => &payload.errors,
            _ => NO_ERRORS,
        }
    }

    /// The `resources` value of a JSON body, if present.
    pub fn resources(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Api(payload) => payload.resources.as_ref(),
            _ => None,
        }
    }

    /// The raw bytes of a binary body, if present.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.body {
            ResponseBody::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Synthesizes a 400-class envelope for a failure detected before any
    /// network call (validation failure, invalid argument). Deterministic:
    /// no transport state is involved.
    pub fn local_error(message: impl Into<String>) -> Self {
        Envelope {
            status_code: 400,
            headers: BTreeMap::new(),
            body: ResponseBody::Api(ApiPayload {
                errors: vec![ApiError {
                    code: Some(400),
                    message: message.into(),
                }],
                ..ApiPayload::default()
            }),
        }
    }

    /// Maps a transport-level fault (connection, DNS, TLS, timeout, token
    /// acquisition) to a status-0 envelope. No fault type escapes to the
    /// caller.
    pub fn transport_error(err: &FalconError) -> Self {
        Envelope {
            status_code: 0,
            headers: BTreeMap::new(),
            body: ResponseBody::Api(ApiPayload {
                errors: vec![ApiError {
                    code: None,
                    message: err.to_string(),
                }],
                ..ApiPayload::default()
            }),
        }
    }

    /// Normalizes a raw transport response into an envelope.
    ///
    /// Body interpretation:
    /// - empty body → `Empty` on success, synthesized error entry on
    ///   failure statuses;
    /// - JSON content type → parsed [`ApiPayload`] (a parse failure on a
    ///   JSON-declared body becomes an error entry rather than a fault);
    /// - anything else → `Binary` on success, synthesized error entry on
    ///   failure (error pages are not downloads).
    pub fn from_raw(raw: RawResponse) -> Self {
        let RawResponse {
            status,
            headers,
            body,
        } = raw;

        let success = (200..300).contains(&status);
        let is_json = headers
            .get("content-type")
            .map(|ct| ct.contains("json"))
            .unwrap_or(false);

        let body = if body.is_empty() {
            if success {
                ResponseBody::Empty
            } else {
                ResponseBody::Api(synthesized_failure(status, None))
            }
        } else if is_json {
            match serde_json::from_slice::<ApiPayload>(&body) {
                Ok(mut payload) => {
                    if !success && payload.errors.is_empty() {
                        payload.errors.push(status_error(status, None));
                    }
                    ResponseBody::Api(payload)
                }
                Err(err) => ResponseBody::Api(synthesized_failure(
                    status,
                    Some(format!("response body is not valid JSON: {err}")),
                )),
            }
        } else if success {
            ResponseBody::Binary(body)
        } else {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            ResponseBody::Api(synthesized_failure(status, Some(text)))
        };

        Envelope {
            status_code: status,
            headers,
            body,
        }
    }
}

fn status_error(status: u16, detail: Option<String>) -> ApiError {
    let message = match detail {
        Some(detail) if !detail.is_empty() => format!("HTTP {status}: {detail}"),
        _ => format!("HTTP {status}"),
    };
    ApiError {
        code: Some(i64::from(status)),
        message,
    }
}

fn synthesized_failure(status: u16, detail: Option<String>) -> ApiPayload {
    ApiPayload {
        errors: vec![status_error(status, detail)],
        ..ApiPayload::default()
    }
}
