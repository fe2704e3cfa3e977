//! Query-parameter normalization.
//!
//! Every operation funnels its inputs through [`args_to_params`], which
//! merges up to three sources into one canonical mapping:
//!
//! 1. an explicit `parameters` map supplied by the caller (trusted
//!    verbatim, wins per-key),
//! 2. an optional positional value for the operation's primary key
//!    (e.g. `ids` for get-by-ids operations),
//! 3. the typed keyword struct for the operation family.
//!
//! Precedence per key is explicit > positional > keyword. Keyword fields
//! are filtered against the descriptor's declared query parameters, which
//! lets one struct serve a whole operation family: a field a sibling
//! operation does not declare is silently dropped rather than rejected.
//! Absent (`None`) fields are omitted entirely — never sent as null or
//! empty strings.
//!
//! Array-typed parameters with collection format "multi" stay sequences
//! all the way to [`query_pairs`], which emits one `key=value` pair per
//! element so the wire carries repeated query keys. A scalar supplied for
//! such a parameter is wrapped into a one-element sequence; wrapping an
//! already-normalized sequence is a no-op.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::endpoint::{EndpointDescriptor, ParamType};

/// Canonical query-parameter mapping. BTreeMap keeps iteration (and thus
/// the serialized query string) deterministic for identical input.
pub type Params = BTreeMap<String, Value>;

/// An id selector accepted by get/delete-by-ids operations.
///
/// Mirrors the API convention that a single id and a list of ids are the
/// same argument: a `&str` converts to a one-element list.
#[derive(Debug, Clone, Default)]
pub struct IdList(pub Vec<String>);

impl From<&str> for IdList {
    fn from(id: &str) -> Self {
        IdList(vec![id.to_string()])
    }
}

impl From<String> for IdList {
    fn from(id: String) -> Self {
        IdList(vec![id])
    }
}

impl From<Vec<String>> for IdList {
    fn from(ids: Vec<String>) -> Self {
        IdList(ids)
    }
}

impl From<&[&str]> for IdList {
    fn from(ids: &[&str]) -> Self {
        IdList(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<&str>> for IdList {
    fn from(ids: Vec<&str>) -> Self {
        IdList(ids.into_iter().map(|s| s.to_string()).collect())
    }
}

impl IdList {
    /// Converts the selector into a JSON array of id strings.
    pub fn into_value(self) -> Value {
        Value::Array(self.0.into_iter().map(Value::String).collect())
    }
}

/// Builds the canonical query-parameter mapping for one operation call.
///
/// See the module docs for the merge and precedence rules. `keywords` is
/// serialized through serde; only object-shaped output contributes keys
/// (the unit type `()` is a valid "no keywords" input).
pub fn args_to_params<K: Serialize>(
    explicit: Option<&Params>,
    keywords: &K,
    positional: Option<(&str, Value)>,
    descriptor: &EndpointDescriptor,
) -> Params {
    let mut out = Params::new();

    if let Some(explicit) = explicit {
        for (key, value) in explicit {
            if !value.is_null() {
                out.insert(key.clone(), normalize_value(descriptor, key, value.clone()));
            }
        }
    }

    if let Some((key, value)) = positional {
        if !out.contains_key(key) && !value.is_null() {
            out.insert(key.to_string(), normalize_value(descriptor, key, value));
        }
    }

    let keywords = serde_json::to_value(keywords).unwrap_or(Value::Null);
    if let Value::Object(map) = keywords {
        for (key, value) in map {
            if value.is_null() || out.contains_key(&key) {
                continue;
            }
            // Filter against the declared query parameters so one keyword
            // struct can serve sibling operations with different schemas.
            if descriptor.query_param(&key).is_none() {
                continue;
            }
            let value = normalize_value(descriptor, &key, value);
            out.insert(key, value);
        }
    }

    out
}

/// Wraps scalars into one-element sequences for array-typed multi-format
/// parameters. Normalizing an already-normalized sequence is a no-op.
fn normalize_value(descriptor: &EndpointDescriptor, key: &str, value: Value) -> Value {
    let wants_sequence = descriptor
        .query_param(key)
        .map(|spec| spec.kind == ParamType::Array && spec.multi)
        .unwrap_or(false);

    if wants_sequence && !value.is_array() {
        Value::Array(vec![value])
    } else {
        value
    }
}

/// Serializes a canonical mapping into query pairs for the transport.
///
/// Sequence values emit one pair per element (repeated query keys);
/// scalars emit one pair. Strings are passed through without quoting.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_string(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_string(other))),
        }
    }
    pairs
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{device_control_ops, descriptor};
    use serde_json::json;

    #[derive(Serialize, Default)]
    struct QueryKeywords {
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sort: Option<String>,
    }

    #[test]
    fn keywords_merge_into_empty_params() {
        let d = descriptor(device_control_ops::QUERY_DEVICE_CONTROL_POLICIES);
        let kw = QueryKeywords {
            filter: Some("platform_name:'Windows'".to_string()),
            limit: Some(100),
            ..Default::default()
        };
        let params = args_to_params(None, &kw, None, d);
        assert_eq!(params["filter"], json!("platform_name:'Windows'"));
        assert_eq!(params["limit"], json!(100));
        assert!(
            !params.contains_key("sort"),
            "absent optional keywords must be omitted"
        );
    }

    #[test]
    fn explicit_params_win_over_keywords() {
        let d = descriptor(device_control_ops::QUERY_DEVICE_CONTROL_POLICIES);
        let mut explicit = Params::new();
        explicit.insert("limit".to_string(), json!(5));
        let kw = QueryKeywords {
            limit: Some(100),
            ..Default::default()
        };
        let params = args_to_params(Some(&explicit), &kw, None, d);
        assert_eq!(
            params["limit"],
            json!(5),
            "explicit input wins over convenience keywords"
        );
    }

    #[test]
    fn positional_inserted_under_primary_key() {
        let d = descriptor(device_control_ops::GET_DEVICE_CONTROL_POLICIES);
        let params = args_to_params(None, &(), Some(("ids", json!("id-123"))), d);
        assert_eq!(
            params["ids"],
            json!(["id-123"]),
            "positional scalar must normalize to a one-element sequence"
        );
    }

    #[test]
    fn positional_does_not_override_explicit_primary_key() {
        let d = descriptor(device_control_ops::GET_DEVICE_CONTROL_POLICIES);
        let mut explicit = Params::new();
        explicit.insert("ids".to_string(), json!(["explicit-id"]));
        let params = args_to_params(Some(&explicit), &(), Some(("ids", json!("positional"))), d);
        assert_eq!(params["ids"], json!(["explicit-id"]));
    }

    #[test]
    fn scalar_wrapping_is_idempotent() {
        let d = descriptor(device_control_ops::GET_DEVICE_CONTROL_POLICIES);
        let once = args_to_params(None, &(), Some(("ids", json!("a"))), d);
        let twice = args_to_params(None, &(), Some(("ids", once["ids"].clone())), d);
        assert_eq!(once, twice, "normalizing a normalized sequence is a no-op");
    }

    #[test]
    fn undeclared_keyword_keys_are_dropped() {
        #[derive(Serialize)]
        struct Stray {
            filter: &'static str,
            unknown_key: &'static str,
        }
        let d = descriptor(device_control_ops::QUERY_DEVICE_CONTROL_POLICIES);
        let params = args_to_params(
            None,
            &Stray {
                filter: "enabled:true",
                unknown_key: "ignored",
            },
            None,
            d,
        );
        assert!(params.contains_key("filter"));
        assert!(
            !params.contains_key("unknown_key"),
            "keys the descriptor does not declare are dropped"
        );
    }

    #[test]
    fn explicit_params_pass_through_undeclared_keys() {
        // The explicit map is the caller's full payload and is trusted
        // verbatim, unlike keyword structs.
        let d = descriptor(device_control_ops::QUERY_DEVICE_CONTROL_POLICIES);
        let mut explicit = Params::new();
        explicit.insert("vendor_extension".to_string(), json!("kept"));
        let params = args_to_params(Some(&explicit), &(), None, d);
        assert_eq!(params["vendor_extension"], json!("kept"));
    }

    #[test]
    fn null_values_are_omitted() {
        let d = descriptor(device_control_ops::QUERY_DEVICE_CONTROL_POLICIES);
        let mut explicit = Params::new();
        explicit.insert("filter".to_string(), Value::Null);
        let params = args_to_params(Some(&explicit), &(), None, d);
        assert!(params.is_empty(), "null values must never reach the wire");
    }

    #[test]
    fn query_pairs_repeat_multi_keys() {
        let mut params = Params::new();
        params.insert("ids".to_string(), json!(["a", "b", "c"]));
        params.insert("limit".to_string(), json!(10));
        let pairs = query_pairs(&params);
        assert_eq!(
            pairs,
            vec![
                ("ids".to_string(), "a".to_string()),
                ("ids".to_string(), "b".to_string()),
                ("ids".to_string(), "c".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_do_not_quote_strings() {
        let mut params = Params::new();
        params.insert("filter".to_string(), json!("name:'demo'"));
        let pairs = query_pairs(&params);
        assert_eq!(pairs[0].1, "name:'demo'");
    }

    #[test]
    fn id_list_from_single_str() {
        let ids: IdList = "id-123".into();
        assert_eq!(ids.into_value(), json!(["id-123"]));
    }

    #[test]
    fn id_list_from_vec() {
        let ids: IdList = vec!["a".to_string(), "b".to_string()].into();
        assert_eq!(ids.into_value(), json!(["a", "b"]));
    }
}
