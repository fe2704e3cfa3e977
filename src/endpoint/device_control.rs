//! Descriptor table for the device control policy API area.
//!
//! Regenerated from the vendor schema; one entry per operation. Paths and
//! parameter lists mirror the published API contract verbatim.

use super::{EndpointDescriptor, ParamSpec, ParamType};
use reqwest::Method;

/// Operation id constants for the device control policy area.
///
/// Wrappers reference these instead of string literals so a typo is a
/// compile error rather than a registry panic.
#[allow(missing_docs)]
pub mod ops {
    pub const QUERY_COMBINED_DEVICE_CONTROL_POLICY_MEMBERS: &str =
        "queryCombinedDeviceControlPolicyMembers";
    pub const QUERY_COMBINED_DEVICE_CONTROL_POLICIES: &str = "queryCombinedDeviceControlPolicies";
    pub const GET_DEFAULT_DEVICE_CONTROL_POLICIES: &str = "getDefaultDeviceControlPolicies";
    pub const UPDATE_DEFAULT_DEVICE_CONTROL_POLICIES: &str = "updateDefaultDeviceControlPolicies";
    pub const PERFORM_DEVICE_CONTROL_POLICIES_ACTION: &str = "performDeviceControlPoliciesAction";
    pub const PATCH_DEVICE_CONTROL_POLICIES_CLASSES_V1: &str = "patchDeviceControlPoliciesClassesV1";
    pub const GET_DEFAULT_DEVICE_CONTROL_SETTINGS: &str = "getDefaultDeviceControlSettings";
    pub const UPDATE_DEFAULT_DEVICE_CONTROL_SETTINGS: &str = "updateDefaultDeviceControlSettings";
    pub const SET_DEVICE_CONTROL_POLICIES_PRECEDENCE: &str = "setDeviceControlPoliciesPrecedence";
    pub const GET_DEVICE_CONTROL_POLICIES: &str = "getDeviceControlPolicies";
    pub const CREATE_DEVICE_CONTROL_POLICIES: &str = "createDeviceControlPolicies";
    pub const DELETE_DEVICE_CONTROL_POLICIES: &str = "deleteDeviceControlPolicies";
    pub const GET_DEVICE_CONTROL_POLICIES_V2: &str = "getDeviceControlPoliciesV2";
    pub const POST_DEVICE_CONTROL_POLICIES_V2: &str = "postDeviceControlPoliciesV2";
    pub const PATCH_DEVICE_CONTROL_POLICIES_V2: &str = "patchDeviceControlPoliciesV2";
    pub const UPDATE_DEVICE_CONTROL_POLICIES: &str = "updateDeviceControlPolicies";
    pub const QUERY_DEVICE_CONTROL_POLICY_MEMBERS: &str = "queryDeviceControlPolicyMembers";
    pub const QUERY_DEVICE_CONTROL_POLICIES: &str = "queryDeviceControlPolicies";
}

/// Full enum declared by the schema for policy actions. The wrapper guards
/// against a narrower allowed set; see `device_control::perform_action`.
const POLICY_ACTIONS: &[&str] = &[
    "add-host-group",
    "add-rule-group",
    "disable",
    "enable",
    "remove-host-group",
    "remove-rule-group",
];

const MEMBER_QUERY_PARAMS: &[ParamSpec] = &[
    ParamSpec::query("id", ParamType::String, false),
    ParamSpec::query("filter", ParamType::String, false),
    ParamSpec::query("offset", ParamType::Integer, false),
    ParamSpec::query("limit", ParamType::Integer, false),
    ParamSpec::query("sort", ParamType::String, false),
];

const POLICY_QUERY_PARAMS: &[ParamSpec] = &[
    ParamSpec::query("filter", ParamType::String, false),
    ParamSpec::query("offset", ParamType::Integer, false),
    ParamSpec::query("limit", ParamType::Integer, false),
    ParamSpec::query("sort", ParamType::String, false),
];

pub(super) static ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor {
        operation_id: ops::QUERY_COMBINED_DEVICE_CONTROL_POLICY_MEMBERS,
        method: Method::GET,
        path: "/policy/combined/device-control-members/v1",
        description: "Search for members of a Device Control Policy and return full detail",
        tag: "device_control",
        parameters: MEMBER_QUERY_PARAMS,
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_COMBINED_DEVICE_CONTROL_POLICIES,
        method: Method::GET,
        path: "/policy/combined/device-control/v1",
        description: "Search for Device Control Policies and return full detail",
        tag: "device_control",
        parameters: POLICY_QUERY_PARAMS,
    },
    EndpointDescriptor {
        operation_id: ops::GET_DEFAULT_DEVICE_CONTROL_POLICIES,
        method: Method::GET,
        path: "/policy/entities/default-device-control/v1",
        description: "Retrieve the configuration for a Default Device Control Policy",
        tag: "device_control",
        parameters: &[],
    },
    EndpointDescriptor {
        operation_id: ops::UPDATE_DEFAULT_DEVICE_CONTROL_POLICIES,
        method: Method::PATCH,
        path: "/policy/entities/default-device-control/v1",
        description: "Update the configuration for a Default Device Control Policy",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::PERFORM_DEVICE_CONTROL_POLICIES_ACTION,
        method: Method::POST,
        path: "/policy/entities/device-control-actions/v1",
        description: "Perform the specified action on the Device Control Policies specified in the request",
        tag: "device_control",
        parameters: &[
            ParamSpec::enumerated("action_name", POLICY_ACTIONS, true),
            ParamSpec::body(true),
        ],
    },
    EndpointDescriptor {
        operation_id: ops::PATCH_DEVICE_CONTROL_POLICIES_CLASSES_V1,
        method: Method::PATCH,
        path: "/device-control/entities/policies/classes/v1",
        description: "Update device control policy's classes (USB and Bluetooth)",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_DEFAULT_DEVICE_CONTROL_SETTINGS,
        method: Method::GET,
        path: "/device-control/entities/default-device-control-settings/v1",
        description: "Get default device control settings (USB and Bluetooth)",
        tag: "device_control",
        parameters: &[],
    },
    EndpointDescriptor {
        operation_id: ops::UPDATE_DEFAULT_DEVICE_CONTROL_SETTINGS,
        method: Method::PATCH,
        path: "/device-control/entities/default-device-control-settings/v1",
        description: "Update the configuration for Default Device Control Settings",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::SET_DEVICE_CONTROL_POLICIES_PRECEDENCE,
        method: Method::POST,
        path: "/policy/entities/device-control-precedence/v1",
        description: "Set the precedence of Device Control Policies from highest to lowest",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_DEVICE_CONTROL_POLICIES,
        method: Method::GET,
        path: "/policy/entities/device-control/v1",
        description: "Retrieve a set of Device Control Policies by specifying their IDs",
        tag: "device_control",
        parameters: &[ParamSpec::multi("ids", true)],
    },
    EndpointDescriptor {
        operation_id: ops::CREATE_DEVICE_CONTROL_POLICIES,
        method: Method::POST,
        path: "/policy/entities/device-control/v1",
        description: "Create Device Control Policies by specifying details about the policy to create",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::DELETE_DEVICE_CONTROL_POLICIES,
        method: Method::DELETE,
        path: "/policy/entities/device-control/v1",
        description: "Delete a set of Device Control Policies by specifying their IDs",
        tag: "device_control",
        parameters: &[ParamSpec::multi("ids", true)],
    },
    EndpointDescriptor {
        operation_id: ops::GET_DEVICE_CONTROL_POLICIES_V2,
        method: Method::GET,
        path: "/device-control/entities/policies/v2",
        description: "Get device control policies for the given filter criteria (USB and Bluetooth)",
        tag: "device_control",
        parameters: &[ParamSpec::multi("ids", true)],
    },
    EndpointDescriptor {
        operation_id: ops::POST_DEVICE_CONTROL_POLICIES_V2,
        method: Method::POST,
        path: "/device-control/entities/policies/v2",
        description: "Create device control policies (USB and Bluetooth)",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::PATCH_DEVICE_CONTROL_POLICIES_V2,
        method: Method::PATCH,
        path: "/device-control/entities/policies/v2",
        description: "Update device control policies (USB and Bluetooth)",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::UPDATE_DEVICE_CONTROL_POLICIES,
        method: Method::PATCH,
        path: "/policy/entities/device-control/v1",
        description: "Update Device Control Policies by specifying the ID of the policy and details to update",
        tag: "device_control",
        parameters: &[ParamSpec::body(true)],
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_DEVICE_CONTROL_POLICY_MEMBERS,
        method: Method::GET,
        path: "/policy/queries/device-control-members/v1",
        description: "Search for members of a Device Control Policy and return their IDs",
        tag: "device_control",
        parameters: MEMBER_QUERY_PARAMS,
    },
    EndpointDescriptor {
        operation_id: ops::QUERY_DEVICE_CONTROL_POLICIES,
        method: Method::GET,
        path: "/policy/queries/device-control/v1",
        description: "Search for Device Control Policies and return their IDs",
        tag: "device_control",
        parameters: POLICY_QUERY_PARAMS,
    },
];
