//! Device control policy endpoints.
//!
//! This module covers the device control policy API area: querying,
//! creating, updating, and deleting policies that govern USB (and, via the
//! v2 surface, Bluetooth) device access on hosts, plus default-policy
//! notification settings and policy precedence.
//!
//! Every function resolves its operation through the descriptor registry
//! and returns an [`Envelope`] — there is no error type to catch; inspect
//! `status_code` and `errors()`.
//!
//! Argument conventions, shared across the module:
//!
//! - Query operations take a [`PolicyQuery`] with FQL `filter`, paging,
//!   and `sort` fields. The optional `parameters` map is the caller's full
//!   query payload; its entries win over the typed fields per key.
//! - Get/delete-by-ids operations accept anything convertible to
//!   [`IdList`] — a single `&str` is treated as a one-element list.
//! - Body operations take an args struct with typed convenience fields
//!   plus an optional raw `body`. A supplied `body` is sent verbatim and
//!   all convenience-field expansion is skipped.
//!
//! ## Endpoints
//!
//! | Function | Method | API Path |
//! |----------|--------|----------|
//! | [`query_combined_policy_members`] | GET | `/policy/combined/device-control-members/v1` |
//! | [`query_combined_policies`] | GET | `/policy/combined/device-control/v1` |
//! | [`get_default_policies`] | GET | `/policy/entities/default-device-control/v1` |
//! | [`update_default_policies`] | PATCH | `/policy/entities/default-device-control/v1` |
//! | [`perform_action`] | POST | `/policy/entities/device-control-actions/v1` |
//! | [`update_policy_classes`] | PATCH | `/device-control/entities/policies/classes/v1` |
//! | [`get_default_settings`] | GET | `/device-control/entities/default-device-control-settings/v1` |
//! | [`update_default_settings`] | PATCH | `/device-control/entities/default-device-control-settings/v1` |
//! | [`set_precedence`] | POST | `/policy/entities/device-control-precedence/v1` |
//! | [`get_policies`] | GET | `/policy/entities/device-control/v1` |
//! | [`create_policies`] | POST | `/policy/entities/device-control/v1` |
//! | [`delete_policies`] | DELETE | `/policy/entities/device-control/v1` |
//! | [`get_policies_v2`] | GET | `/device-control/entities/policies/v2` |
//! | [`create_policies_v2`] | POST | `/device-control/entities/policies/v2` |
//! | [`update_policies_v2`] | PATCH | `/device-control/entities/policies/v2` |
//! | [`update_policies`] | PATCH | `/policy/entities/device-control/v1` |
//! | [`query_policy_members`] | GET | `/policy/queries/device-control-members/v1` |
//! | [`query_policies`] | GET | `/policy/queries/device-control/v1` |

use serde::Serialize;
use serde_json::{json, Value};

use crate::dispatch::{Dispatcher, OperationRequest};
use crate::endpoint::device_control_ops as ops;
use crate::endpoint::descriptor;
use crate::envelope::Envelope;
use crate::params::{args_to_params, IdList, Params};
use crate::payload::{body_or, custom_notifications, generic_id_list, record_list};

// ── Argument types ─────────────────────────────────────────────────────

/// Query arguments shared by the policy query/member-query operations.
///
/// `id` is only declared by the member-query operations (the policy whose
/// members to search); on the other operations it is dropped by the
/// normalizer's descriptor filter.
#[derive(Debug, Default, Serialize)]
pub struct PolicyQuery {
    /// Policy ID whose members to search (member queries only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// FQL filter expression limiting the results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Maximum records to return (1-5000), for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Offset to start retrieving records from, for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Property to sort by, FQL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Full query-parameter payload; entries win over the typed fields.
    #[serde(skip)]
    pub parameters: Option<Params>,
}

/// One policy record for [`create_policies`] / [`update_policies`].
///
/// `clone_id` and `platform_name` matter on create; `id` on update.
/// `settings` is the policy settings document (classes, exceptions,
/// enforcement mode, custom notifications) passed through as-is.
#[derive(Debug, Default, Serialize)]
pub struct PolicyResource {
    /// ID of an existing policy to clone settings from (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_id: Option<String>,
    /// ID of the policy to update (update only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Policy description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Policy name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Operating system platform the policy applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    /// Policy settings document, passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

/// Arguments for the v1 create/update policy operations.
#[derive(Debug, Default)]
pub struct PolicyResources {
    /// Policy records to create or update.
    pub resources: Vec<PolicyResource>,
    /// Full body payload; when set, `resources` is ignored entirely.
    pub body: Option<Value>,
}

/// One policy record for the v2 (USB + Bluetooth) create/update operations.
#[derive(Debug, Default, Serialize)]
pub struct PolicyV2 {
    /// Bluetooth settings document (enforcement mode, end-user notifications).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluetooth_settings: Option<Value>,
    /// ID of an existing policy to clone settings from (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_id: Option<String>,
    /// Policy description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ID of the policy to update (update only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Policy name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Operating system platform the policy applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    /// USB settings document (enforcement mode, whitelist mode, notifications).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usb_settings: Option<Value>,
}

/// Arguments for the v2 create/update policy operations.
#[derive(Debug, Default)]
pub struct PoliciesV2 {
    /// Policy records to create or update.
    pub policies: Vec<PolicyV2>,
    /// Full body payload; when set, `policies` is ignored entirely.
    pub body: Option<Value>,
}

/// Arguments for [`update_policy_classes`] (USB and Bluetooth class rules).
#[derive(Debug, Default, Serialize)]
pub struct PolicyClassesUpdate {
    /// Device control policy ID to update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// USB class policy document (classes, delete/upsert exceptions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usb_classes: Option<Value>,
    /// Bluetooth class policy document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluetooth_classes: Option<Value>,
    /// Full body payload; when set, the typed fields are ignored entirely.
    #[serde(skip)]
    pub body: Option<Value>,
}

/// Arguments for [`update_default_policies`].
///
/// The `*_custom_message` fields are conveniences: each expands into the
/// nested notification structure the API expects
/// (`{"custom_message": ..., "use_custom": true}`). Supplying the full
/// `*_notification` value instead wins over the message convenience.
#[derive(Debug, Default)]
pub struct DefaultPolicyUpdate {
    /// Message for blocked-device notifications; expands into the nested
    /// notification structure with `use_custom: true`.
    pub blocked_custom_message: Option<String>,
    /// Full blocked-notification value; wins over the message convenience.
    pub blocked_notification: Option<Value>,
    /// Message for restricted-device notifications; expands like the
    /// blocked counterpart.
    pub restricted_custom_message: Option<String>,
    /// Full restricted-notification value; wins over the message convenience.
    pub restricted_notification: Option<Value>,
    /// Full body payload; when set, all expansion is skipped.
    pub body: Option<Value>,
}

/// Arguments for [`update_default_settings`] (USB and Bluetooth defaults).
#[derive(Debug, Default, Serialize)]
pub struct DefaultSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluetooth_custom_notifications: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usb_custom_notifications: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usb_exceptions: Option<Value>,
    /// Full body payload; when set, the typed fields are ignored entirely.
    #[serde(skip)]
    pub body: Option<Value>,
}

/// Arguments for [`set_precedence`].
///
/// Precedence follows the order of `ids`: first is highest. All
/// non-default policies for the platform must be listed.
#[derive(Debug, Default)]
pub struct PrecedenceUpdate {
    /// Policy IDs in precedence order, highest first.
    pub ids: Vec<String>,
    /// Operating system platform the precedence list applies to.
    pub platform_name: Option<String>,
    /// Full body payload; when set, `ids`/`platform_name` are ignored.
    pub body: Option<Value>,
}

/// Actions accepted by [`perform_action`].
///
/// Intentionally narrower than the enum the descriptor declares: the
/// rule-group actions are accepted by the schema but not supported by
/// this surface, matching the API's documented behavior for device
/// control policies.
pub const ALLOWED_POLICY_ACTIONS: &[&str] =
    &["add-host-group", "disable", "enable", "remove-host-group"];

/// Arguments for [`perform_action`].
#[derive(Debug, Default)]
pub struct PolicyAction {
    /// Action to perform; must be one of [`ALLOWED_POLICY_ACTIONS`].
    pub action_name: String,
    /// Policy IDs to act on.
    pub ids: Vec<String>,
    /// Host group ID convenience for the host-group actions. Expands to
    /// one `{"name": "group_id", "value": ...}` action parameter.
    pub group_id: Option<String>,
    /// Full action parameter list; overrides the `group_id` convenience.
    pub action_parameters: Option<Value>,
    /// Full query-parameter payload; entries win over `action_name`.
    pub parameters: Option<Params>,
    /// Full body payload; when set, body construction is skipped.
    pub body: Option<Value>,
}

// ── Query operations ───────────────────────────────────────────────────

/// Searches for members of a device control policy, returning full host
/// detail for each match.
pub async fn query_combined_policy_members(
    dispatcher: &Dispatcher,
    query: &PolicyQuery,
) -> Envelope {
    query_op(dispatcher, ops::QUERY_COMBINED_DEVICE_CONTROL_POLICY_MEMBERS, query).await
}

/// Searches for device control policies, returning full policy detail.
pub async fn query_combined_policies(dispatcher: &Dispatcher, query: &PolicyQuery) -> Envelope {
    query_op(dispatcher, ops::QUERY_COMBINED_DEVICE_CONTROL_POLICIES, query).await
}

/// Searches for members of a device control policy, returning agent IDs.
pub async fn query_policy_members(dispatcher: &Dispatcher, query: &PolicyQuery) -> Envelope {
    query_op(dispatcher, ops::QUERY_DEVICE_CONTROL_POLICY_MEMBERS, query).await
}

/// Searches for device control policies, returning policy IDs.
pub async fn query_policies(dispatcher: &Dispatcher, query: &PolicyQuery) -> Envelope {
    query_op(dispatcher, ops::QUERY_DEVICE_CONTROL_POLICIES, query).await
}

/// Shared path for the four query operations: normalize the query struct
/// against the operation's descriptor and dispatch.
async fn query_op(
    dispatcher: &Dispatcher,
    operation_id: &'static str,
    query: &PolicyQuery,
) -> Envelope {
    let params = args_to_params(
        query.parameters.as_ref(),
        query,
        None,
        descriptor(operation_id),
    );
    dispatcher
        .execute(OperationRequest::new(operation_id).params(params))
        .await
}

// ── Entity operations ──────────────────────────────────────────────────

/// Retrieves a set of device control policies by their IDs.
pub async fn get_policies(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::GET_DEVICE_CONTROL_POLICIES, ids.into()).await
}

/// Deletes a set of device control policies by their IDs.
pub async fn delete_policies(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::DELETE_DEVICE_CONTROL_POLICIES, ids.into()).await
}

/// Retrieves v2 (USB + Bluetooth) device control policies by their IDs.
pub async fn get_policies_v2(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::GET_DEVICE_CONTROL_POLICIES_V2, ids.into()).await
}

async fn ids_op(dispatcher: &Dispatcher, operation_id: &'static str, ids: IdList) -> Envelope {
    let params = args_to_params(
        None,
        &(),
        Some(("ids", ids.into_value())),
        descriptor(operation_id),
    );
    dispatcher
        .execute(OperationRequest::new(operation_id).params(params))
        .await
}

/// Creates device control policies from the supplied policy records.
pub async fn create_policies(dispatcher: &Dispatcher, args: &PolicyResources) -> Envelope {
    let body = body_or(args.body.clone(), || {
        json!({ "resources": record_list(&args.resources) })
    });
    dispatcher
        .execute(OperationRequest::new(ops::CREATE_DEVICE_CONTROL_POLICIES).body(body))
        .await
}

/// Updates device control policies; each record names the policy `id` to
/// update and the details to change.
pub async fn update_policies(dispatcher: &Dispatcher, args: &PolicyResources) -> Envelope {
    let body = body_or(args.body.clone(), || {
        json!({ "resources": record_list(&args.resources) })
    });
    dispatcher
        .execute(OperationRequest::new(ops::UPDATE_DEVICE_CONTROL_POLICIES).body(body))
        .await
}

/// Creates v2 policies carrying USB and Bluetooth settings.
pub async fn create_policies_v2(dispatcher: &Dispatcher, args: &PoliciesV2) -> Envelope {
    let body = body_or(args.body.clone(), || {
        json!({ "policies": record_list(&args.policies) })
    });
    dispatcher
        .execute(OperationRequest::new(ops::POST_DEVICE_CONTROL_POLICIES_V2).body(body))
        .await
}

/// Updates v2 policies carrying USB and Bluetooth settings.
pub async fn update_policies_v2(dispatcher: &Dispatcher, args: &PoliciesV2) -> Envelope {
    let body = body_or(args.body.clone(), || {
        json!({ "policies": record_list(&args.policies) })
    });
    dispatcher
        .execute(OperationRequest::new(ops::PATCH_DEVICE_CONTROL_POLICIES_V2).body(body))
        .await
}

/// Updates a policy's USB and Bluetooth class rules.
pub async fn update_policy_classes(dispatcher: &Dispatcher, args: &PolicyClassesUpdate) -> Envelope {
    let body = body_or(args.body.clone(), || {
        let record = serde_json::to_value(args).unwrap_or_else(|_| json!({}));
        json!({ "policies": [record] })
    });
    dispatcher
        .execute(OperationRequest::new(ops::PATCH_DEVICE_CONTROL_POLICIES_CLASSES_V1).body(body))
        .await
}

// ── Default policy and settings operations ─────────────────────────────

/// Retrieves the configuration of the default device control policy.
pub async fn get_default_policies(dispatcher: &Dispatcher) -> Envelope {
    dispatcher
        .execute(OperationRequest::new(ops::GET_DEFAULT_DEVICE_CONTROL_POLICIES))
        .await
}

/// Updates the default policy's end-user notification configuration.
///
/// See [`DefaultPolicyUpdate`] for the custom-message expansion rules.
pub async fn update_default_policies(
    dispatcher: &Dispatcher,
    args: &DefaultPolicyUpdate,
) -> Envelope {
    let body = body_or(args.body.clone(), || {
        custom_notifications(
            args.blocked_custom_message.as_deref(),
            args.blocked_notification.as_ref(),
            args.restricted_custom_message.as_deref(),
            args.restricted_notification.as_ref(),
        )
    });
    dispatcher
        .execute(OperationRequest::new(ops::UPDATE_DEFAULT_DEVICE_CONTROL_POLICIES).body(body))
        .await
}

/// Retrieves the default device control settings (USB and Bluetooth).
pub async fn get_default_settings(dispatcher: &Dispatcher) -> Envelope {
    dispatcher
        .execute(OperationRequest::new(ops::GET_DEFAULT_DEVICE_CONTROL_SETTINGS))
        .await
}

/// Updates the default device control settings (USB and Bluetooth).
pub async fn update_default_settings(
    dispatcher: &Dispatcher,
    args: &DefaultSettingsUpdate,
) -> Envelope {
    let body = body_or(args.body.clone(), || {
        serde_json::to_value(args).unwrap_or_else(|_| json!({}))
    });
    dispatcher
        .execute(OperationRequest::new(ops::UPDATE_DEFAULT_DEVICE_CONTROL_SETTINGS).body(body))
        .await
}

// ── Action and precedence operations ───────────────────────────────────

/// Sets device control policy precedence from the ordered `ids` list.
pub async fn set_precedence(dispatcher: &Dispatcher, args: &PrecedenceUpdate) -> Envelope {
    let body = body_or(args.body.clone(), || {
        let mut body = generic_id_list(args.ids.clone().into());
        if let Some(platform_name) = &args.platform_name {
            body["platform_name"] = json!(platform_name);
        }
        body
    });
    dispatcher
        .execute(OperationRequest::new(ops::SET_DEVICE_CONTROL_POLICIES_PRECEDENCE).body(body))
        .await
}

/// Performs an action (enable, disable, host-group assignment) on the
/// specified device control policies.
///
/// An `action_name` outside [`ALLOWED_POLICY_ACTIONS`] produces a local
/// 400-class envelope without touching the transport.
pub async fn perform_action(dispatcher: &Dispatcher, args: &PolicyAction) -> Envelope {
    #[derive(Serialize)]
    struct ActionKeywords<'a> {
        action_name: &'a str,
    }

    let operation_id = ops::PERFORM_DEVICE_CONTROL_POLICIES_ACTION;
    let params = args_to_params(
        args.parameters.as_ref(),
        &ActionKeywords {
            action_name: &args.action_name,
        },
        None,
        descriptor(operation_id),
    );

    // Guard on the effective action name (an explicit parameters map may
    // have overridden the typed field).
    let action_name = params
        .get("action_name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_ascii_lowercase();
    if !ALLOWED_POLICY_ACTIONS.contains(&action_name.as_str()) {
        return Envelope::local_error(format!(
            "invalid value for action_name: {action_name:?} (allowed: {})",
            ALLOWED_POLICY_ACTIONS.join(", ")
        ));
    }

    let body = body_or(args.body.clone(), || {
        let mut body = generic_id_list(args.ids.clone().into());
        if let Some(group_id) = &args.group_id {
            body["action_parameters"] = json!([{ "name": "group_id", "value": group_id }]);
        }
        // An explicit action parameter list overrides the group_id keyword.
        if let Some(action_parameters) = &args.action_parameters {
            body["action_parameters"] = action_parameters.clone();
        }
        body
    });

    dispatcher
        .execute(OperationRequest::new(operation_id).params(params).body(body))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Body construction ────────────────────────────────────────────

    #[test]
    fn policy_resource_serializes_only_set_fields() {
        let resource = PolicyResource {
            name: Some("USB lockdown".to_string()),
            platform_name: Some("Windows".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(
            value,
            json!({"name": "USB lockdown", "platform_name": "Windows"})
        );
    }

    #[test]
    fn policy_v2_record_carries_settings_documents() {
        let policy = PolicyV2 {
            name: Some("BT policy".to_string()),
            usb_settings: Some(json!({"enforcement_mode": "MONITOR_ONLY"})),
            bluetooth_settings: Some(json!({"enforcement_mode": "MONITOR_ENFORCE"})),
            ..Default::default()
        };
        let value = serde_json::to_value(&policy).unwrap();
        assert_eq!(value["usb_settings"]["enforcement_mode"], "MONITOR_ONLY");
        assert_eq!(
            value["bluetooth_settings"]["enforcement_mode"],
            "MONITOR_ENFORCE"
        );
        assert!(value.get("clone_id").is_none());
    }

    #[test]
    fn classes_update_nests_record_under_policies() {
        let args = PolicyClassesUpdate {
            id: Some("pol-1".to_string()),
            usb_classes: Some(json!({"classes": [{"action": "BLOCK_ALL", "class": "AUDIO"}]})),
            ..Default::default()
        };
        // Mirror the wrapper's construction without a dispatcher.
        let record = serde_json::to_value(&args).unwrap();
        let body = json!({ "policies": [record] });
        assert_eq!(body["policies"][0]["id"], "pol-1");
        assert_eq!(
            body["policies"][0]["usb_classes"]["classes"][0]["action"],
            "BLOCK_ALL"
        );
        assert!(
            body["policies"][0].get("body").is_none(),
            "the body override must never serialize into the record"
        );
    }

    #[test]
    fn default_settings_update_serializes_typed_fields() {
        let args = DefaultSettingsUpdate {
            usb_custom_notifications: Some(json!({
                "blocked_notification": {"custom_message": "no", "use_custom": true}
            })),
            ..Default::default()
        };
        let value = serde_json::to_value(&args).unwrap();
        assert!(value.get("usb_custom_notifications").is_some());
        assert!(value.get("bluetooth_custom_notifications").is_none());
    }

    // ── Allowed action set ───────────────────────────────────────────

    #[test]
    fn allowed_actions_exclude_rule_group_variants() {
        assert!(ALLOWED_POLICY_ACTIONS.contains(&"enable"));
        assert!(ALLOWED_POLICY_ACTIONS.contains(&"add-host-group"));
        assert!(
            !ALLOWED_POLICY_ACTIONS.contains(&"add-rule-group"),
            "rule-group actions are schema-declared but not supported here"
        );
    }
}
