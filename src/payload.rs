//! Shared request-body builders.
//!
//! Each operation family has a fixed body shape (`{"resources": [...]}`,
//! `{"ids": [...]}` with extras, `{"policies": [...]}`, or a bare list of
//! records). The builders here produce those shapes from typed argument
//! structs; the per-field expansion rules for convenience keywords live
//! with the structs in the family modules.
//!
//! Two rules hold everywhere:
//! - An explicit caller-supplied body skips building entirely — it is
//!   never merged with keyword-derived fields ([`body_or`]).
//! - Building is deterministic: identical input yields identical values
//!   and nesting (serde_json maps are ordered, and every builder emits the
//!   same fields for the same input).

use serde::Serialize;
use serde_json::{json, Value};

use crate::params::IdList;

/// Returns the explicit body when the caller supplied one, otherwise
/// builds the keyword-derived body. The two sources are never merged.
pub fn body_or(explicit: Option<Value>, build: impl FnOnce() -> Value) -> Value {
    match explicit {
        Some(body) => body,
        None => build(),
    }
}

/// Builds the `{"ids": [...]}` shape shared by action and precedence
/// operations. A single id has already been normalized into a one-element
/// list by [`IdList`].
pub fn generic_id_list(ids: IdList) -> Value {
    json!({ "ids": ids.into_value() })
}

/// Serializes a slice of records into the bare-list body shape used by
/// the recon rule, notification-update, export-job, and aggregate
/// operations.
///
/// Records are typed `Serialize` structs whose absent fields are skipped,
/// so the output carries exactly the fields the caller set.
pub fn record_list<T: Serialize>(records: &[T]) -> Value {
    serde_json::to_value(records).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// One end-user notification override: a custom message plus the flag
/// that turns it on. Expanding a flat `*_custom_message` keyword into this
/// structure is lossless — the message round-trips unchanged.
pub fn custom_message_notification(message: &str) -> Value {
    json!({
        "custom_message": message,
        "use_custom": true,
    })
}

/// Builds the `{"custom_notifications": {...}}` body for default-policy
/// notification updates.
///
/// Per-field rules:
/// - `blocked_notification` / `restricted_notification` are the full
///   nested values and win over their convenience counterparts.
/// - `blocked_custom_message` / `restricted_custom_message` expand via
///   [`custom_message_notification`].
pub fn custom_notifications(
    blocked_custom_message: Option<&str>,
    blocked_notification: Option<&Value>,
    restricted_custom_message: Option<&str>,
    restricted_notification: Option<&Value>,
) -> Value {
    let mut notifications = serde_json::Map::new();

    match (blocked_notification, blocked_custom_message) {
        (Some(full), _) => {
            notifications.insert("blocked_notification".to_string(), full.clone());
        }
        (None, Some(message)) => {
            notifications.insert(
                "blocked_notification".to_string(),
                custom_message_notification(message),
            );
        }
        (None, None) => {}
    }

    match (restricted_notification, restricted_custom_message) {
        (Some(full), _) => {
            notifications.insert("restricted_notification".to_string(), full.clone());
        }
        (None, Some(message)) => {
            notifications.insert(
                "restricted_notification".to_string(),
                custom_message_notification(message),
            );
        }
        (None, None) => {}
    }

    json!({ "custom_notifications": notifications })
}
