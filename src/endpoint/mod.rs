//! Endpoint descriptor tables and the operation registry.
//!
//! Every REST operation the crate can perform is described by one
//! [`EndpointDescriptor`]: operation id, HTTP method, path template, a
//! short description, its tag (API area), and an ordered list of parameter
//! specifications. The tables are static data regenerated from the vendor's
//! API schema — nothing in them is computed at runtime.
//!
//! The registry is built once, lazily, into a process-wide `OnceLock` and
//! is read-only afterwards, so concurrent lookups need no locking. Lookup
//! is by operation id; asking for an id that is not in the tables means the
//! tables and the wrapper surface have drifted apart, which is a bug in
//! this crate rather than a runtime condition — it panics.

use reqwest::Method;
use std::collections::HashMap;
use std::sync::OnceLock;

mod device_control;
mod recon;

/// Where a parameter is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ParamLocation {
    Query,
    Path,
    Body,
    Header,
}

/// Declared type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
    Array,
}

/// One parameter specification within an endpoint descriptor.
///
/// `allowed` is the enum constraint from the schema (empty slice means
/// unconstrained). `multi` records the schema's `collectionFormat:
/// "multi"` — array values serialize as repeated query keys rather than a
/// joined string.
#[derive(Debug)]
#[allow(missing_docs)]
pub struct ParamSpec {
    pub name: &'static str,
    pub location: ParamLocation,
    pub kind: ParamType,
    pub required: bool,
    pub allowed: &'static [&'static str],
    pub multi: bool,
}

impl ParamSpec {
    /// A scalar query parameter.
    pub const fn query(name: &'static str, kind: ParamType, required: bool) -> Self {
        ParamSpec {
            name,
            location: ParamLocation::Query,
            kind,
            required,
            allowed: &[],
            multi: false,
        }
    }

    /// An array query parameter with collection format "multi".
    pub const fn multi(name: &'static str, required: bool) -> Self {
        ParamSpec {
            name,
            location: ParamLocation::Query,
            kind: ParamType::Array,
            required,
            allowed: &[],
            multi: true,
        }
    }

    /// An enum-constrained scalar query parameter.
    pub const fn enumerated(
        name: &'static str,
        allowed: &'static [&'static str],
        required: bool,
    ) -> Self {
        ParamSpec {
            name,
            location: ParamLocation::Query,
            kind: ParamType::String,
            required,
            allowed,
            multi: false,
        }
    }

    /// The request body parameter.
    pub const fn body(required: bool) -> Self {
        ParamSpec {
            name: "body",
            location: ParamLocation::Body,
            kind: ParamType::String,
            required,
            allowed: &[],
            multi: false,
        }
    }
}

/// An immutable record describing one REST operation.
#[derive(Debug)]
pub struct EndpointDescriptor {
    /// Unique operation id across the whole API surface.
    pub operation_id: &'static str,
    /// HTTP method of the operation.
    pub method: Method,
    /// URL path template; may contain `{placeholder}` path parameters.
    pub path: &'static str,
    /// Human-readable summary from the schema.
    pub description: &'static str,
    /// API area the operation belongs to.
    pub tag: &'static str,
    /// Ordered parameter specifications.
    pub parameters: &'static [ParamSpec],
}

impl EndpointDescriptor {
    /// Returns the declared query parameter with the given name, if any.
    pub fn query_param(&self, name: &str) -> Option<&ParamSpec> {
        self.parameters
            .iter()
            .find(|p| p.location == ParamLocation::Query && p.name == name)
    }
}

static REGISTRY: OnceLock<HashMap<&'static str, &'static EndpointDescriptor>> = OnceLock::new();

/// The process-wide operation registry, built on first use.
fn registry() -> &'static HashMap<&'static str, &'static EndpointDescriptor> {
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for descriptor in device_control::ENDPOINTS.iter().chain(recon::ENDPOINTS) {
            let previous = map.insert(descriptor.operation_id, descriptor);
            assert!(
                previous.is_none(),
                "duplicate operation id in descriptor tables: {}",
                descriptor.operation_id
            );
        }
        map
    })
}

/// Resolves an operation id to its descriptor.
///
/// # Panics
///
/// Panics when the id is not present in the tables. Wrappers pass string
/// constants defined next to the tables, so a miss can only mean the crate
/// itself is inconsistent — not a caller or runtime error.
pub fn descriptor(operation_id: &str) -> &'static EndpointDescriptor {
    registry()
        .get(operation_id)
        .copied()
        .unwrap_or_else(|| panic!("unknown operation id: {operation_id}"))
}

pub use device_control::ops as device_control_ops;
pub use recon::ops as recon_ops;
