//! Descriptor table for the Falcon Intelligence Recon API area.
//!
//! Regenerated from the vendor schema; one entry per operation. Paths and
//! parameter lists mirror the published API contract verbatim.

use super::{EndpointDescriptor, ParamSpec, ParamType};
use reqwest::Method;

/// Operation id constants for the recon area.
#[allow(missing_docs)]
pub mod ops {
    pub const AGGREGATE_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1: &str =
        "AggregateNotificationsExposedDataRecordsV1";
    pub const AGGREGATE_NOTIFICATIONS_V1: &str = "AggregateNotificationsV1";
    pub const PREVIEW_RULE_V1: &str = "PreviewRuleV1";
    pub const GET_ACTIONS_V1: &str = "GetActionsV1";
    pub const CREATE_ACTIONS_V1: &str = "CreateActionsV1";
    pub const DELETE_ACTION_V1: &str = "DeleteActionV1";
    pub const UPDATE_ACTION_V1: &str = "UpdateActionV1";
    pub const GET_FILE_CONTENT_FOR_EXPORT_JOBS_V1: &str = "GetFileContentForExportJobsV1";
    pub const GET_EXPORT_JOBS_V1: &str = "GetExportJobsV1";
    pub const CREATE_EXPORT_JOBS_V1: &str = "CreateExportJobsV1";
    pub const DELETE_EXPORT_JOBS_V1: &str = "DeleteExportJobsV1";
    pub const GET_NOTIFICATIONS_DETAILED_TRANSLATED_V1: &str =
        "GetNotificationsDetailedTranslatedV1";
    pub const GET_NOTIFICATIONS_DETAILED_V1: &str = "GetNotificationsDetailedV1";
    pub const GET_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1: &str =
        "GetNotificationsExposedDataRecordsV1";
    pub const GET_NOTIFICATIONS_TRANSLATED_V1: &str = "GetNotificationsTranslatedV1";
    pub const GET_NOTIFICATIONS_V1: &str = "GetNotificationsV1";
    pub const DELETE_NOTIFICATIONS_V1: &str = "DeleteNotificationsV1";
    pub const UPDATE_NOTIFICATIONS_V1: &str = "UpdateNotificationsV1";
    pub const GET_RULES_V1: &str = "GetRulesV1";
    pub const CREATE_RULES_V1: &str = "CreateRulesV1";
    pub const DELETE_RULES_V1: &str = "DeleteRulesV1";
    pub const UPDATE_RULES_V1: &str = "UpdateRulesV1";
    pub const QUERY_ACTIONS_V1: &str = "QueryActionsV1";
    pub const QUERY_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1: &str =
        "QueryNotificationsExposedDataRecordsV1";
    pub const QUERY_NOTIFICATIONS_V1: &str = "QueryNotificationsV1";
    pub const QUERY_RULES_V1: &str = "QueryRulesV1";
}

const IDS_MULTI: &[ParamSpec] = &[ParamSpec::multi("ids", true)];

const RECON_QUERY_PARAMS: &[ParamSpec] = &[
    ParamSpec::query("offset", ParamType::Integer, false),
    ParamSpec::query("limit", ParamType::Integer, false),
    ParamSpec::query("sort", ParamType::String, false),
    ParamSpec::query("filter", ParamType::String, false),
    ParamSpec::query("q", ParamType::String, false),
];

pub(super) static ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor {
        operation_id: ops::AGGREGATE_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1,
        method: Method::POST,
        path: "/recon/aggregates/notifications-exposed-data-records/GET/v1",
        description: "Get notification exposed data record aggregates as specified via JSON in the request body",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::AGGREGATE_NOTIFICATIONS_V1,
        method: Method::POST,
        path: "/recon/aggregates/notifications/GET/v1",
        description: "Get notification aggregates as specified via JSON in the request body",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::PREVIEW_RULE_V1,
        method: Method::POST,
        path: "/recon/aggregates/rules-preview/GET/v1",
        description: "Preview rule notification count and distribution",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_ACTIONS_V1,
        method: Method::GET,
        path: "/recon/entities/actions/v1",
        description: "Get actions based on their IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::CREATE_ACTIONS_V1,
        method: Method::POST,
        path: "/recon/entities/actions/v1",
        description: "Create actions for a monitoring rule",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::DELETE_ACTION_V1,
        method: Method::DELETE,
        path: "/recon/entities/actions/v1",
        description: "Delete an action from a monitoring rule based on the action ID",
        tag: "recon",
        parameters: &[ParamSpec::query("id", ParamType::String, true)],
    },
    EndpointDescriptor {
        operation_id: ops::UPDATE_ACTION_V1,
        method: Method::PATCH,
        path: "/recon/entities/actions/v1",
        description: "Update an action for a monitoring rule",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_FILE_CONTENT_FOR_EXPORT_JOBS_V1,
        method: Method::GET,
        path: "/recon/entities/export-files/v1",
        description: "Download the file associated with a job ID",
        tag: "recon",
        parameters: &[ParamSpec::query("id", ParamType::String, true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_EXPORT_JOBS_V1,
        method: Method::GET,
        path: "/recon/entities/exports/v1",
        description: "Get the status of export jobs based on their IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::CREATE_EXPORT_JOBS_V1,
        method: Method::POST,
        path: "/recon/entities/exports/v1",
        description: "Launch an asynchronous export job",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::DELETE_EXPORT_JOBS_V1,
        method: Method::DELETE,
        path: "/recon/entities/exports/v1",
        description: "Delete export jobs based on their IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::GET_NOTIFICATIONS_DETAILED_TRANSLATED_V1,
        method: Method::GET,
        path: "/recon/entities/notifications-detailed-translated/v1",
        description: "Get detailed notifications, including translated raw intelligence content",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::GET_NOTIFICATIONS_DETAILED_V1,
        method: Method::GET,
        path: "/recon/entities/notifications-detailed/v1",
        description: "Get detailed notifications, including raw intelligence content",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::GET_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1,
        method: Method::GET,
        path: "/recon/entities/notifications-exposed-data-records/v1",
        description: "Get exposed data records for notifications based on their IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::GET_NOTIFICATIONS_TRANSLATED_V1,
        method: Method::GET,
        path: "/recon/entities/notifications-translated/v1",
        description: "Get translated notification content based on notification IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::GET_NOTIFICATIONS_V1,
        method: Method::GET,
        path: "/recon/entities/notifications/v1",
        description: "Get notifications based on their IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::DELETE_NOTIFICATIONS_V1,
        method: Method::DELETE,
        path: "/recon/entities/notifications/v1",
        description: "Delete notifications based on their IDs; deleted notifications cannot be recovered",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::UPDATE_NOTIFICATIONS_V1,
        method: Method::PATCH,
        path: "/recon/entities/notifications/v1",
        description: "Update notification status or assignee; accepts bulk requests",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_RULES_V1,
        method: Method::GET,
        path: "/recon/entities/rules/v1",
        description: "Get monitoring rules by provided IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::CREATE_RULES_V1,
        method: Method::POST,
        path: "/recon/entities/rules/v1",
        description: "Create monitoring rules",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::DELETE_RULES_V1,
        method: Method::DELETE,
        path: "/recon/entities/rules/v1",
        description: "Delete monitoring rules by provided IDs",
        tag: "recon",
        parameters: IDS_MULTI,
    },
    EndpointDescriptor {
        operation_id: ops::UPDATE_RULES_V1,
        method: Method::PATCH,
        path: "/recon/entities/rules/v1",
        description: "Update monitoring rules",
        tag: "recon",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_ACTIONS_V1,
        method: Method::GET,
        path: "/recon/queries/actions/v1",
        description: "Query actions based on provided criteria",
        tag: "recon",
        parameters: RECON_QUERY_PARAMS,
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_NOTIFICATIONS_EXPOSED_DATA_RECORDS_V1,
        method: Method::GET,
        path: "/recon/queries/notifications-exposed-data-records/v1",
        description: "Query notification exposed data records based on provided criteria",
        tag: "recon",
        parameters: RECON_QUERY_PARAMS,
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_NOTIFICATIONS_V1,
        method: Method::GET,
        path: "/recon/queries/notifications/v1",
        description: "Query notifications based on provided criteria",
        tag: "recon",
        parameters: RECON_QUERY_PARAMS,
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_RULES_V1,
        method: Method::GET,
        path: "/recon/queries/rules/v1",
        description: "Query monitoring rules based on provided criteria",
        tag: "recon",
        parameters: RECON_QUERY_PARAMS,
    },
];
