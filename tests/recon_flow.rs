//! Integration tests for the recon family using wiremock.
//!
//! These tests mock the Falcon API to verify the recon-specific shapes:
//! bare-list bodies for rules, notification updates, export jobs, and
//! aggregates; the `{"actions": [...], "rule_id": ...}` action-creation
//! shape; and the id-based lookups.

use falcon_api::auth::TokenProvider;
use falcon_api::client::FalconClient;
use falcon_api::dispatch::Dispatcher;
use falcon_api::recon::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: creates a dispatcher pointed at the given wiremock server.
async fn mock_dispatcher(server: &MockServer) -> Dispatcher {
    let auth = TokenProvider::with_token("mock-token");
    Dispatcher::new(FalconClient::with_base_url(auth, &server.uri()))
}

/// Helper: the JSON body of the only request the server received.
async fn only_request_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    serde_json::from_slice(&requests[0].body).expect("request body should be JSON")
}

// ── Queries and lookups ────────────────────────────────────────────────

#[tokio::test]
async fn query_notifications_passes_criteria() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("GET"))
        .and(path("/recon/queries/notifications/v1"))
        .and(query_param("filter", "status:'new'"))
        .and(query_param("q", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": ["n-1", "n-2"],
            "errors": []
        })))
        .mount(&server)
        .await;

    let query = ReconQuery {
        filter: Some("status:'new'".to_string()),
        q: Some("acme".to_string()),
        ..Default::default()
    };
    let envelope = query_notifications(&dispatcher, &query).await;

    assert!(envelope.is_success());
    assert_eq!(envelope.resources(), Some(&json!(["n-1", "n-2"])));
}

#[tokio::test]
async fn get_notifications_single_id() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("GET"))
        .and(path("/recon/entities/notifications/v1"))
        .and(query_param("ids", "n-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"id": "n-1", "status": "new"}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let envelope = get_notifications(&dispatcher, "n-1").await;

    assert!(envelope.is_success());
    assert_eq!(envelope.resources().unwrap()[0]["status"], "new");
}

#[tokio::test]
async fn get_rules_multiple_ids_repeat_query_key() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("GET"))
        .and(path("/recon/entities/rules/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [],
            "errors": []
        })))
        .mount(&server)
        .await;

    get_rules(&dispatcher, vec!["r-1", "r-2"]).await;

    let requests = server.received_requests().await.unwrap();
    let ids: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(key, _)| key == "ids")
        .map(|(_, value)| value.to_string())
        .collect();
    assert_eq!(ids, vec!["r-1", "r-2"]);
}

#[tokio::test]
async fn delete_action_uses_singular_id_param() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/recon/entities/actions/v1"))
        .and(query_param("id", "act-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [],
            "errors": []
        })))
        .mount(&server)
        .await;

    let envelope = delete_action(&dispatcher, "act-1").await;
    assert!(envelope.is_success());
}

// ── Bare-list bodies ───────────────────────────────────────────────────

#[tokio::test]
async fn create_rules_sends_bare_list() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("POST"))
        .and(path("/recon/entities/rules/v1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resources": [{"id": "r-new"}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = RuleRecords {
        rules: vec![MonitorRule {
            name: Some("brand watch".to_string()),
            topic: Some("SA_BRAND_PRODUCT".to_string()),
            filter: Some("phrase:'acme'".to_string()),
            priority: Some("high".to_string()),
            permissions: Some("private".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let envelope = create_rules(&dispatcher, &args).await;
    assert!(envelope.is_success());

    let body = only_request_body(&server).await;
    assert!(body.is_array(), "rule creation takes a bare list body");
    assert_eq!(body[0]["topic"], "SA_BRAND_PRODUCT");
    assert!(body[0].get("id").is_none(), "unset fields are omitted");
}

#[tokio::test]
async fn update_notifications_sends_bare_list() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/recon/entities/notifications/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = NotificationUpdates {
        notifications: vec![
            NotificationUpdate {
                id: Some("n-1".to_string()),
                status: Some("closed-false-positive".to_string()),
                ..Default::default()
            },
            NotificationUpdate {
                id: Some("n-2".to_string()),
                assigned_to_uuid: Some("analyst-uuid".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    update_notifications(&dispatcher, &args).await;

    let body = only_request_body(&server).await;
    assert_eq!(
        body,
        json!([
            {"id": "n-1", "status": "closed-false-positive"},
            {"id": "n-2", "assigned_to_uuid": "analyst-uuid"}
        ])
    );
}

#[tokio::test]
async fn create_export_jobs_sends_bare_list() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("POST"))
        .and(path("/recon/entities/exports/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": ["job-1"],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = ExportJobs {
        jobs: vec![ExportJob {
            entity: Some("notification-exposed-data-record".to_string()),
            export_type: Some("csv".to_string()),
            filter: Some("status:'new'".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let envelope = create_export_jobs(&dispatcher, &args).await;
    assert!(envelope.is_success());

    let body = only_request_body(&server).await;
    assert_eq!(body, json!([{
        "entity": "notification-exposed-data-record",
        "export_type": "csv",
        "filter": "status:'new'"
    }]));
}

#[tokio::test]
async fn aggregate_notifications_wraps_descriptor_in_list() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("POST"))
        .and(path("/recon/aggregates/notifications/GET/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"name": "by_day", "buckets": []}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = AggregateQuery {
        name: Some("by_day".to_string()),
        field: Some("created_date".to_string()),
        kind: Some("date_range".to_string()),
        date_ranges: Some(json!([{"from": "2026-01-01", "to": "now"}])),
        ..Default::default()
    };
    let envelope = aggregate_notifications(&dispatcher, &args).await;
    assert!(envelope.is_success());

    let body = only_request_body(&server).await;
    assert!(body.is_array(), "aggregate body is a bare one-element list");
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["type"], "date_range", "kind serializes as type");
    assert_eq!(body[0]["field"], "created_date");
}

// ── Structured bodies ──────────────────────────────────────────────────

#[tokio::test]
async fn create_actions_builds_rule_id_and_actions() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("POST"))
        .and(path("/recon/entities/actions/v1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resources": [{"id": "act-new"}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = CreateActions {
        rule_id: Some("r-1".to_string()),
        actions: vec![ActionSpec {
            frequency: Some("daily".to_string()),
            recipients: vec!["analyst-uuid".to_string()],
            kind: Some("email".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let envelope = create_actions(&dispatcher, &args).await;
    assert!(envelope.is_success());

    let body = only_request_body(&server).await;
    assert_eq!(body["rule_id"], "r-1");
    assert_eq!(body["actions"][0]["type"], "email");
    assert_eq!(body["actions"][0]["recipients"], json!(["analyst-uuid"]));
}

#[tokio::test]
async fn update_action_with_id_passes_validation() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/recon/entities/actions/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"id": "act-1"}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = ActionUpdate {
        id: Some("act-1".to_string()),
        frequency: Some("weekly".to_string()),
        status: Some("enabled".to_string()),
        ..Default::default()
    };
    let envelope = update_action(&dispatcher, &args).await;
    assert!(envelope.is_success());

    let body = only_request_body(&server).await;
    assert_eq!(body["id"], "act-1");
    assert_eq!(body["frequency"], "weekly");
}

#[tokio::test]
async fn preview_rule_sends_filter_and_topic() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("POST"))
        .and(path("/recon/aggregates/rules-preview/GET/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"count": 12}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let args = RulePreview {
        filter: Some("phrase:'acme'".to_string()),
        topic: Some("SA_BRAND_PRODUCT".to_string()),
        ..Default::default()
    };
    let envelope = preview_rule(&dispatcher, &args).await;
    assert!(envelope.is_success());

    let body = only_request_body(&server).await;
    assert_eq!(
        body,
        json!({"filter": "phrase:'acme'", "topic": "SA_BRAND_PRODUCT"})
    );
}

#[tokio::test]
async fn explicit_body_wins_for_rule_updates() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/recon/entities/rules/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [],
            "errors": []
        })))
        .mount(&server)
        .await;

    let explicit = json!([{"id": "r-9", "priority": "low"}]);
    let args = RuleRecords {
        rules: vec![MonitorRule {
            id: Some("r-ignored".to_string()),
            ..Default::default()
        }],
        body: Some(explicit.clone()),
    };
    update_rules(&dispatcher, &args).await;

    let body = only_request_body(&server).await;
    assert_eq!(body, explicit);
}

#[tokio::test]
async fn get_export_jobs_by_ids() {
    let server = MockServer::start().await;
    let dispatcher = mock_dispatcher(&server).await;

    Mock::given(method("GET"))
        .and(path("/recon/entities/exports/v1"))
        .and(query_param("ids", "job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"id": "job-1", "status": "completed"}],
            "errors": []
        })))
        .mount(&server)
        .await;

    let envelope = get_export_jobs(&dispatcher, "job-1").await;

    assert!(envelope.is_success());
    assert_eq!(envelope.resources().unwrap()[0]["status"], "completed");
}
