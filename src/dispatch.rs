//! Descriptor-driven request dispatch.
//!
//! [`Dispatcher`] is the single funnel every wrapper calls through. Given
//! an [`OperationRequest`] it resolves the endpoint descriptor, runs
//! pre-flight body validation, substitutes path parameters, serializes the
//! canonical parameter mapping into query pairs, executes the call through
//! the authenticated transport, and normalizes whatever comes back into an
//! [`Envelope`].
//!
//! `execute` never returns a `Result`: local validation failures become
//! synthetic 400-class envelopes (with zero transport invocations),
//! transport faults become status-0 envelopes, and remote errors pass
//! through with their status and error payload. The only non-envelope
//! outcome is a panic on an operation id missing from the descriptor
//! tables — that is a bug in this crate, not a runtime condition.
//!
//! The dispatcher adds no retry of its own. The transport's one-shot 401
//! token-refresh replay is the only replay a request ever gets, so
//! non-idempotent operations are never duplicated at this layer.

use serde_json::Value;

use crate::client::FalconClient;
use crate::endpoint::{self, EndpointDescriptor, ParamType};
use crate::envelope::Envelope;
use crate::params::{query_pairs, Params};

/// One resolved operation call: the operation id plus everything the
/// wrapper derived from its arguments. Created fresh per call and consumed
/// by [`Dispatcher::execute`].
#[derive(Debug)]
pub struct OperationRequest {
    operation_id: &'static str,
    params: Params,
    body: Option<Value>,
    path_params: Vec<(&'static str, String)>,
    required_body_fields: &'static [&'static str],
    body_field_types: &'static [(&'static str, ParamType)],
}

impl OperationRequest {
    /// Starts a request for the named operation.
    pub fn new(operation_id: &'static str) -> Self {
        OperationRequest {
            operation_id,
            params: Params::new(),
            body: None,
            path_params: Vec::new(),
            required_body_fields: &[],
            body_field_types: &[],
        }
    }

    /// Attaches the canonical query-parameter mapping.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Attaches the request body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Substitutes `{name}` in the descriptor's path template.
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Declares body fields that pre-flight validation checks for
    /// presence when validation is enabled on the dispatcher.
    pub fn require_body_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.required_body_fields = fields;
        self
    }

    /// Declares type expectations for body fields. Checked pre-flight when
    /// validation is enabled; a field is only type-checked when present.
    pub fn body_field_types(mut self, fields: &'static [(&'static str, ParamType)]) -> Self {
        self.body_field_types = fields;
        self
    }
}

/// Executes operations against the Falcon API through an authenticated
/// transport, returning a uniform [`Envelope`] for every outcome.
pub struct Dispatcher {
    client: FalconClient,
    validate_payloads: bool,
}

impl Dispatcher {
    /// Creates a dispatcher with pre-flight payload validation enabled.
    pub fn new(client: FalconClient) -> Self {
        Dispatcher {
            client,
            validate_payloads: true,
        }
    }

    /// Disables pre-flight body validation; requests go to the wire as
    /// built and the API performs all validation server-side.
    pub fn without_payload_validation(mut self) -> Self {
        self.validate_payloads = false;
        self
    }

    /// Executes one operation call. See the module docs for the outcome
    /// taxonomy; the return value is always an envelope.
    pub async fn execute(&self, request: OperationRequest) -> Envelope {
        let descriptor = endpoint::descriptor(request.operation_id);

        if self.validate_payloads {
            if let Some(message) = validate_body(&request, descriptor) {
                return Envelope::local_error(message);
            }
        }

        let path = resolve_path(descriptor, &request.path_params);
        let pairs = query_pairs(&request.params);

        match self
            .client
            .send(
                descriptor.method.clone(),
                &path,
                &pairs,
                request.body.as_ref(),
            )
            .await
        {
            Ok(raw) => Envelope::from_raw(raw),
            Err(err) => Envelope::transport_error(&err),
        }
    }
}

/// Checks declared required body fields and type expectations before any
/// network call. Returns a description of the failure, or `None` when the
/// body passes.
fn validate_body(request: &OperationRequest, descriptor: &EndpointDescriptor) -> Option<String> {
    if request.required_body_fields.is_empty() && request.body_field_types.is_empty() {
        return None;
    }

    let body = match &request.body {
        Some(body) => body,
        None => {
            return Some(format!(
                "{} requires a request body",
                descriptor.operation_id
            ))
        }
    };

    let map = match body.as_object() {
        Some(map) => map,
        None => {
            return Some(format!(
                "{} requires an object-shaped request body",
                descriptor.operation_id
            ))
        }
    };

    let missing: Vec<&str> = request
        .required_body_fields
        .iter()
        .copied()
        .filter(|field| !map.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        return Some(format!(
            "{} is missing required body field(s): {}",
            descriptor.operation_id,
            missing.join(", ")
        ));
    }

    // Type expectations apply only to fields that are present.
    for (field, kind) in request.body_field_types {
        if let Some(value) = map.get(*field) {
            if !value_matches(value, *kind) {
                return Some(format!(
                    "{} body field {field:?} has the wrong type (expected {kind:?})",
                    descriptor.operation_id
                ));
            }
        }
    }

    None
}

fn value_matches(value: &Value, kind: ParamType) -> bool {
    match kind {
        ParamType::String => value.is_string(),
        ParamType::Integer => value.is_i64() || value.is_u64(),
        ParamType::Boolean => value.is_boolean(),
        ParamType::Array => value.is_array(),
    }
}

/// Substitutes path parameters into the descriptor's template.
///
/// # Panics
///
/// Panics when a placeholder is left unsubstituted — the wrapper and the
/// descriptor table have drifted apart, which is a bug in this crate.
fn resolve_path(descriptor: &EndpointDescriptor, path_params: &[(&str, String)]) -> String {
    let mut path = descriptor.path.to_string();
    for (name, value) in path_params {
        path = path.replace(&format!("{{{name}}}"), value);
    }
    assert!(
        !path.contains('{'),
        "unsubstituted path parameter in {} template: {path}",
        descriptor.operation_id
    );
    path
}
