//! Falcon Intelligence Recon endpoints.
//!
//! This module covers the recon API area: monitoring rules over
//! threat-intel topics, the notifications those rules raise, actions that
//! deliver notifications (email digests etc.), exposed-data-record
//! aggregations, and asynchronous export jobs.
//!
//! The argument conventions match [`crate::device_control`]: query
//! operations take [`ReconQuery`], get/delete-by-ids operations take an
//! [`IdList`] conversion, and body operations take an args struct whose
//! optional raw `body` overrides all typed-field construction.
//!
//! Two shapes are specific to this area:
//!
//! - The aggregate and preview operations POST to `GET`-suffixed paths
//!   (the vendor's convention for read queries with bodies), and the
//!   aggregate body is a **bare list** of aggregation descriptors.
//! - Rule creation/update, notification updates, and export-job creation
//!   also use bare-list bodies, one record per entity.
//!
//! ## Endpoints
//!
//! | Function | Method | API Path |
//! |----------|--------|----------|
//! | [`aggregate_notifications_exposed_data_records`] | POST | `/recon/aggregates/notifications-exposed-data-records/GET/v1` |
//! | [`aggregate_notifications`] | POST | `/recon/aggregates/notifications/GET/v1` |
//! | [`preview_rule`] | POST | `/recon/aggregates/rules-preview/GET/v1` |
//! | [`get_actions`] | GET | `/recon/entities/actions/v1` |
//! | [`create_actions`] | POST | `/recon/entities/actions/v1` |
//! | [`delete_action`] | DELETE | `/recon/entities/actions/v1` |
//! | [`update_action`] | PATCH | `/recon/entities/actions/v1` |
//! | [`get_export_job_file_contents`] | GET | `/recon/entities/export-files/v1` |
//! | [`get_export_jobs`] | GET | `/recon/entities/exports/v1` |
//! | [`create_export_jobs`] | POST | `/recon/entities/exports/v1` |
//! | [`delete_export_jobs`] | DELETE | `/recon/entities/exports/v1` |
//! | [`get_notifications_detailed_translated`] | GET | `/recon/entities/notifications-detailed-translated/v1` |
//! | [`get_notifications_detailed`] | GET | `/recon/entities/notifications-detailed/v1` |
//! | [`get_notifications_exposed_data_records`] | GET | `/recon/entities/notifications-exposed-data-records/v1` |
//! | [`get_notifications_translated`] | GET | `/recon/entities/notifications-translated/v1` |
//! | [`get_notifications`] | GET | `/recon/entities/notifications/v1` |
//! | [`delete_notifications`] | DELETE | `/recon/entities/notifications/v1` |
//! | [`update_notifications`] | PATCH | `/recon/entities/notifications/v1` |
//! | [`get_rules`] | GET | `/recon/entities/rules/v1` |
//! | [`create_rules`] | POST | `/recon/entities/rules/v1` |
//! | [`delete_rules`] | DELETE | `/recon/entities/rules/v1` |
//! | [`update_rules`] | PATCH | `/recon/entities/rules/v1` |
//! | [`query_actions`] | GET | `/recon/queries/actions/v1` |
//! | [`query_notifications_exposed_data_records`] | GET | `/recon/queries/notifications-exposed-data-records/v1` |
//! | [`query_notifications`] | GET | `/recon/queries/notifications/v1` |
//! | [`query_rules`] | GET | `/recon/queries/rules/v1` |

use serde::Serialize;
use serde_json::{json, Value};

use crate::dispatch::{Dispatcher, OperationRequest};
use crate::endpoint::recon_ops as ops;
use crate::endpoint::{descriptor, ParamType};
use crate::envelope::Envelope;
use crate::params::{args_to_params, IdList, Params};
use crate::payload::{body_or, record_list};

// ── Argument types ─────────────────────────────────────────────────────

/// Query arguments shared by the recon query operations.
#[derive(Debug, Default, Serialize)]
pub struct ReconQuery {
    /// FQL filter expression limiting the results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Maximum records to return, for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Offset to start retrieving records from, for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Property to sort by, FQL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Free-text match across searchable fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Full query-parameter payload; entries win over the typed fields.
    #[serde(skip)]
    pub parameters: Option<Params>,
}

/// One aggregation descriptor for the aggregate operations.
///
/// Field names follow the API contract; `kind` serializes as `type`.
/// All fields are optional — set what the aggregation needs.
#[derive(Debug, Default, Serialize)]
pub struct AggregateQuery {
    /// Date ranges to bucket by, each `{"from": ..., "to": ...}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_ranges: Option<Value>,
    /// Fields to exclude from the aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Term to aggregate on (the date field for date-range queries).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// FQL filter applied before aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Starting offset within the aggregated results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// Fields to include in the aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    /// Bucket interval for interval aggregations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Maximum document count per bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_doc_count: Option<i64>,
    /// Minimum document count per bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_doc_count: Option<i64>,
    /// Value to substitute for documents missing the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
    /// Name for this aggregation in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text query, FQL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Numeric ranges to bucket by, each `{"From": ..., "To": ...}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Value>,
    /// Maximum number of buckets to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// Sort order within the aggregation, FQL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Nested sub-aggregation descriptors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_aggregates: Option<Value>,
    /// Time zone applied to date bucketing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Aggregation type; serialized as `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Full body payload; when set, the typed fields are ignored entirely.
    #[serde(skip)]
    pub body: Option<Value>,
}

/// Arguments for [`preview_rule`].
#[derive(Debug, Default, Serialize)]
pub struct RulePreview {
    /// Rule filter, FQL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Rule topic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Full body payload; when set, the typed fields are ignored entirely.
    #[serde(skip)]
    pub body: Option<Value>,
}

/// One monitoring rule record for [`create_rules`] / [`update_rules`].
///
/// `id` matters only on update. `topic`, `name`, `filter`, `priority`,
/// and `permissions` are required by the API on create; the crate does
/// not second-guess the server here.
#[derive(Debug, Default, Serialize)]
pub struct MonitorRule {
    /// ID of the rule to update (update only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Rule name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Intel topic the rule monitors (e.g. `SA_BRAND_PRODUCT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// FQL filter matching intel content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Rule priority: `low`, `medium`, or `high`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Visibility of raised notifications: `private` or `public`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// Monitor breach data for the rule's criteria.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breach_monitoring_enabled: Option<bool>,
    /// Match on substrings rather than whole phrases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substring_matching_enabled: Option<bool>,
}

/// Arguments for [`create_rules`] / [`update_rules`].
#[derive(Debug, Default)]
pub struct RuleRecords {
    /// Rule records to create or update.
    pub rules: Vec<MonitorRule>,
    /// Full body payload; when set, `rules` is ignored entirely.
    pub body: Option<Value>,
}

/// One notification update for [`update_notifications`].
#[derive(Debug, Default, Serialize)]
pub struct NotificationUpdate {
    /// ID of the notification to update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Notification status (e.g. `new`, `in-progress`, `closed-true-positive`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// UUID of the user the notification is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_uuid: Option<String>,
    /// Identity-protection delivery status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_send_status: Option<String>,
}

/// Arguments for [`update_notifications`].
#[derive(Debug, Default)]
pub struct NotificationUpdates {
    /// Update records, one per notification.
    pub notifications: Vec<NotificationUpdate>,
    /// Full body payload; when set, `notifications` is ignored entirely.
    pub body: Option<Value>,
}

/// One delivery action attached to a monitoring rule.
#[derive(Debug, Default, Serialize)]
pub struct ActionSpec {
    /// Delivery content format (e.g. `standard`, `enhanced`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_format: Option<String>,
    /// Delivery frequency (e.g. `asap`, `daily`, `weekly`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Recipient UUIDs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
    /// Also deliver when a period has no matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_matchless: Option<bool>,
    /// Action type (e.g. `email`); serialized as `type`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Arguments for [`create_actions`].
#[derive(Debug, Default)]
pub struct CreateActions {
    /// Rule to attach the actions to. Always required by the API.
    pub rule_id: Option<String>,
    /// Delivery actions to attach.
    pub actions: Vec<ActionSpec>,
    /// Full body payload; when set, the typed fields are ignored entirely.
    pub body: Option<Value>,
}

/// Arguments for [`update_action`]. `id` is a required body field and is
/// checked pre-flight when payload validation is enabled.
#[derive(Debug, Default, Serialize)]
pub struct ActionUpdate {
    /// ID of the action to update. Required body field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Delivery content format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_format: Option<String>,
    /// Delivery frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Recipient UUIDs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
    /// Action status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Also deliver when a period has no matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_matchless: Option<bool>,
    /// Full body payload; when set, the typed fields are ignored entirely.
    #[serde(skip)]
    pub body: Option<Value>,
}

/// One export job description for [`create_export_jobs`].
#[derive(Debug, Default, Serialize)]
pub struct ExportJob {
    /// Entity to export (e.g. `notification-exposed-data-record`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Export format (e.g. `csv`, `json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_type: Option<String>,
    /// FQL filter selecting the records to export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Render the exported content in human-readable form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_readable: Option<bool>,
    /// Sort order for the exported records, FQL syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Arguments for [`create_export_jobs`].
#[derive(Debug, Default)]
pub struct ExportJobs {
    /// Export job descriptions, one per job to launch.
    pub jobs: Vec<ExportJob>,
    /// Full body payload; when set, `jobs` is ignored entirely.
    pub body: Option<Value>,
}

// ── Aggregate and preview operations ───────────────────────────────────

/// Aggregates notification exposed data records as described by the
/// aggregation descriptor. The wire body is a bare one-element list.
pub async fn aggregate_notifications_exposed_data_records(
    dispatcher: &Dispatcher,
    args: &AggregateQuery,
) -> Envelope {
    aggregate_op(
        dispatcher,
        ops::AGGREGATE_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1,
        args,
    )
    .await
}

/// Aggregates notifications as described by the aggregation descriptor.
/// The wire body is a bare one-element list.
pub async fn aggregate_notifications(dispatcher: &Dispatcher, args: &AggregateQuery) -> Envelope {
    aggregate_op(dispatcher, ops::AGGREGATE_NOTIFICATIONS_V1, args).await
}

async fn aggregate_op(
    dispatcher: &Dispatcher,
    operation_id: &'static str,
    args: &AggregateQuery,
) -> Envelope {
    let body = body_or(args.body.clone(), || {
        let aggregate = serde_json::to_value(args).unwrap_or_else(|_| json!({}));
        json!([aggregate])
    });
    dispatcher
        .execute(OperationRequest::new(operation_id).body(body))
        .await
}

/// Previews the notification count and distribution a rule would produce.
pub async fn preview_rule(dispatcher: &Dispatcher, args: &RulePreview) -> Envelope {
    let body = body_or(args.body.clone(), || {
        serde_json::to_value(args).unwrap_or_else(|_| json!({}))
    });
    dispatcher
        .execute(OperationRequest::new(ops::PREVIEW_RULE_V1).body(body))
        .await
}

// ── Action operations ──────────────────────────────────────────────────

/// Gets actions by their IDs. IDs can be found with [`query_actions`].
pub async fn get_actions(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::GET_ACTIONS_V1, ids.into()).await
}

/// Attaches delivery actions to a monitoring rule.
pub async fn create_actions(dispatcher: &Dispatcher, args: &CreateActions) -> Envelope {
    let body = body_or(args.body.clone(), || {
        json!({
            "actions": record_list(&args.actions),
            "rule_id": args.rule_id,
        })
    });
    dispatcher
        .execute(OperationRequest::new(ops::CREATE_ACTIONS_V1).body(body))
        .await
}

/// Deletes an action from a monitoring rule by the action ID.
pub async fn delete_action(dispatcher: &Dispatcher, id: &str) -> Envelope {
    let operation_id = ops::DELETE_ACTION_V1;
    let params = args_to_params(
        None,
        &(),
        Some(("id", json!(id))),
        descriptor(operation_id),
    );
    dispatcher
        .execute(OperationRequest::new(operation_id).params(params))
        .await
}

/// Updates a delivery action. `id` names the action and is checked
/// pre-flight when payload validation is enabled.
pub async fn update_action(dispatcher: &Dispatcher, args: &ActionUpdate) -> Envelope {
    let body = body_or(args.body.clone(), || {
        serde_json::to_value(args).unwrap_or_else(|_| json!({}))
    });
    dispatcher
        .execute(
            OperationRequest::new(ops::UPDATE_ACTION_V1)
                .body(body)
                .require_body_fields(&["id"])
                .body_field_types(&[
                    ("frequency", ParamType::String),
                    ("id", ParamType::String),
                    ("recipients", ParamType::Array),
                    ("status", ParamType::String),
                ]),
        )
        .await
}

// ── Export job operations ──────────────────────────────────────────────

/// Downloads the file produced by a completed export job.
///
/// The envelope body is the raw file bytes; the content type is preserved
/// in the envelope headers.
pub async fn get_export_job_file_contents(dispatcher: &Dispatcher, id: &str) -> Envelope {
    let operation_id = ops::GET_FILE_CONTENT_FOR_EXPORT_JOBS_V1;
    let params = args_to_params(
        None,
        &(),
        Some(("id", json!(id))),
        descriptor(operation_id),
    );
    dispatcher
        .execute(OperationRequest::new(operation_id).params(params))
        .await
}

/// Gets the status of export jobs by their IDs.
pub async fn get_export_jobs(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::GET_EXPORT_JOBS_V1, ids.into()).await
}

/// Launches asynchronous export jobs; poll their status with
/// [`get_export_jobs`] and download results with
/// [`get_export_job_file_contents`]. The wire body is a bare list.
pub async fn create_export_jobs(dispatcher: &Dispatcher, args: &ExportJobs) -> Envelope {
    let body = body_or(args.body.clone(), || record_list(&args.jobs));
    dispatcher
        .execute(OperationRequest::new(ops::CREATE_EXPORT_JOBS_V1).body(body))
        .await
}

/// Deletes export jobs by their IDs.
pub async fn delete_export_jobs(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::DELETE_EXPORT_JOBS_V1, ids.into()).await
}

// ── Notification operations ────────────────────────────────────────────

/// Gets detailed notifications including translated raw intel content.
pub async fn get_notifications_detailed_translated(
    dispatcher: &Dispatcher,
    ids: impl Into<IdList>,
) -> Envelope {
    ids_op(
        dispatcher,
        ops::GET_NOTIFICATIONS_DETAILED_TRANSLATED_V1,
        ids.into(),
    )
    .await
}

/// Gets detailed notifications including raw intel content.
pub async fn get_notifications_detailed(
    dispatcher: &Dispatcher,
    ids: impl Into<IdList>,
) -> Envelope {
    ids_op(dispatcher, ops::GET_NOTIFICATIONS_DETAILED_V1, ids.into()).await
}

/// Gets exposed data records for notifications by their IDs.
pub async fn get_notifications_exposed_data_records(
    dispatcher: &Dispatcher,
    ids: impl Into<IdList>,
) -> Envelope {
    ids_op(
        dispatcher,
        ops::GET_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1,
        ids.into(),
    )
    .await
}

/// Gets translated notification content (English only).
pub async fn get_notifications_translated(
    dispatcher: &Dispatcher,
    ids: impl Into<IdList>,
) -> Envelope {
    ids_op(dispatcher, ops::GET_NOTIFICATIONS_TRANSLATED_V1, ids.into()).await
}

/// Gets notifications by their IDs.
pub async fn get_notifications(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::GET_NOTIFICATIONS_V1, ids.into()).await
}

/// Deletes notifications by their IDs. Deleted notifications cannot be
/// recovered.
pub async fn delete_notifications(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::DELETE_NOTIFICATIONS_V1, ids.into()).await
}

/// Updates notification status or assignee in bulk. The wire body is a
/// bare list of update records.
pub async fn update_notifications(dispatcher: &Dispatcher, args: &NotificationUpdates) -> Envelope {
    let body = body_or(args.body.clone(), || record_list(&args.notifications));
    dispatcher
        .execute(OperationRequest::new(ops::UPDATE_NOTIFICATIONS_V1).body(body))
        .await
}

// ── Rule operations ────────────────────────────────────────────────────

/// Gets monitoring rules by their IDs.
pub async fn get_rules(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::GET_RULES_V1, ids.into()).await
}

/// Creates monitoring rules. The wire body is a bare list of rule records.
pub async fn create_rules(dispatcher: &Dispatcher, args: &RuleRecords) -> Envelope {
    let body = body_or(args.body.clone(), || record_list(&args.rules));
    dispatcher
        .execute(OperationRequest::new(ops::CREATE_RULES_V1).body(body))
        .await
}

/// Deletes monitoring rules by their IDs.
pub async fn delete_rules(dispatcher: &Dispatcher, ids: impl Into<IdList>) -> Envelope {
    ids_op(dispatcher, ops::DELETE_RULES_V1, ids.into()).await
}

/// Updates monitoring rules; each record names the rule `id` to update.
pub async fn update_rules(dispatcher: &Dispatcher, args: &RuleRecords) -> Envelope {
    let body = body_or(args.body.clone(), || record_list(&args.rules));
    dispatcher
        .execute(OperationRequest::new(ops::UPDATE_RULES_V1).body(body))
        .await
}

// ── Query operations ───────────────────────────────────────────────────

/// Queries action IDs by the provided criteria.
pub async fn query_actions(dispatcher: &Dispatcher, query: &ReconQuery) -> Envelope {
    query_op(dispatcher, ops::QUERY_ACTIONS_V1, query).await
}

/// Queries notification exposed data record IDs by the provided criteria.
pub async fn query_notifications_exposed_data_records(
    dispatcher: &Dispatcher,
    query: &ReconQuery,
) -> Envelope {
    query_op(
        dispatcher,
        ops::QUERY_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1,
        query,
    )
    .await
}

/// Queries notification IDs by the provided criteria.
pub async fn query_notifications(dispatcher: &Dispatcher, query: &ReconQuery) -> Envelope {
    query_op(dispatcher, ops::QUERY_NOTIFICATIONS_V1, query).await
}

/// Queries monitoring rule IDs by the provided criteria.
pub async fn query_rules(dispatcher: &Dispatcher, query: &ReconQuery) -> Envelope {
    query_op(dispatcher, ops::QUERY_RULES_V1, query).await
}

// ── Shared helpers ─────────────────────────────────────────────────────

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

async fn query_op(
    dispatcher: &Dispatcher,
    operation_id: &'static str,
    query: &ReconQuery,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aggregate_query_renames_type_and_skips_absent_fields() {
        let agg = AggregateQuery {
            field: Some("created_date".to_string()),
            kind: Some("date_range".to_string()),
            date_ranges: Some(json!([{"from": "2026-01-01", "to": "now"}])),
            ..Default::default()
        };
        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(value["type"], "date_range");
        assert_eq!(value["field"], "created_date");
        assert!(value.get("kind").is_none(), "kind must serialize as type");
        assert!(value.get("filter").is_none());
        assert!(value.get("body").is_none(), "body override never serializes");
    }

    #[test]
    fn monitor_rule_serializes_set_fields_only() {
        let rule = MonitorRule {
            name: Some("brand watch".to_string()),
            topic: Some("SA_BRAND_PRODUCT".to_string()),
            filter: Some("phrase:'acme'".to_string()),
            priority: Some("high".to_string()),
            permissions: Some("private".to_string()),
            breach_monitoring_enabled: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["topic"], "SA_BRAND_PRODUCT");
        assert_eq!(value["breach_monitoring_enabled"], json!(true));
        assert!(value.get("id").is_none(), "unset id must be omitted");
        assert!(value.get("substring_matching_enabled").is_none());
    }

    #[test]
    fn action_spec_renames_type_and_skips_empty_recipients() {
        let spec = ActionSpec {
            frequency: Some("daily".to_string()),
            kind: Some("email".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "email");
        assert!(
            value.get("recipients").is_none(),
            "empty recipient list must be omitted"
        );
    }

    #[test]
    fn notification_update_serializes_assignment() {
        let update = NotificationUpdate {
            id: Some("notif-1".to_string()),
            status: Some("in-progress".to_string()),
            assigned_to_uuid: Some("user-uuid".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "notif-1",
                "status": "in-progress",
                "assigned_to_uuid": "user-uuid"
            })
        );
    }

    #[test]
    fn export_job_record_shape() {
        let job = ExportJob {
            entity: Some("notification-exposed-data-record".to_string()),
            export_type: Some("csv".to_string()),
            filter: Some("status:'new'".to_string()),
            human_readable: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["export_type"], "csv");
        assert_eq!(value["human_readable"], json!(true));
        assert!(value.get("sort").is_none());
    }
}
