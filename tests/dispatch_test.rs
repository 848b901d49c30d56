//! End-to-end dispatch tests against a mock upstream.
//!
//! Each test drives the full pipeline: validate -> shape -> issue ->
//! normalize, asserting on the wire-level request the upstream saw and on
//! the envelope handed back to the caller.

use restgate::bindings;
use restgate::config::BindingConfig;
use restgate::descriptor::{Method, ParamType, ParameterSpec, ToolDescriptor};
use restgate::registry::{Invocation, ToolRegistry};
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn registry_for(server: &MockServer, descriptors: Vec<ToolDescriptor>) -> ToolRegistry {
    let config = BindingConfig::builder("TEST")
        .base_url(server.uri())
        .resolve_with(|_| None)
        .unwrap();
    let mut registry = ToolRegistry::new("test", config).unwrap();
    registry.register_all(descriptors).unwrap();
    registry
}

fn pet_descriptor() -> ToolDescriptor {
    ToolDescriptor::new("get_pet_by_id", Method::Get, "/pet/{petId}")
        .param(ParameterSpec::path("petId", ParamType::Integer))
        .param(ParameterSpec::query("status", ParamType::String))
}

#[tokio::test]
async fn test_path_and_query_request_shape() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/42"))
        .and(query_param("status", "sold"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42, "name": "rex"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = registry_for(&mock_server, vec![pet_descriptor()]);
    let envelope = registry
        .dispatch(Invocation::new(
            "get_pet_by_id",
            args(&[("petId", json!(42)), ("status", json!("sold"))]),
        ))
        .await;

    assert!(envelope.ok);
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.body, json!({"id": 42, "name": "rex"}));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    // GET requests carry no body.
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_omitted_optional_query_sends_no_question_mark() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .mount(&mock_server)
        .await;

    let registry = registry_for(&mock_server, vec![pet_descriptor()]);
    let envelope = registry
        .dispatch(Invocation::new("get_pet_by_id", args(&[("petId", json!(42))])))
        .await;

    assert!(envelope.ok);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_raw_json_body_sent_unmodified() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/account/password"))
        .and(header("content-type", "application/json"))
        .and(body_string("{\"new_password\":\"x\"}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let descriptor = ToolDescriptor::new("update_password", Method::Put, "/account/password")
        .param(ParameterSpec::body_raw("body", ParamType::Object).required());
    let registry = registry_for(&mock_server, vec![descriptor]);
    let envelope = registry
        .dispatch(Invocation::new(
            "update_password",
            args(&[("body", json!("{\"new_password\":\"x\"}"))]),
        ))
        .await;

    assert!(envelope.ok);
}

#[tokio::test]
async fn test_nested_body_assembled_from_flat_arguments() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/alertmuting"))
        .and(body_json(json!({
            "filters": [
                {"name": "env", "value": "prod"},
                {"name": "tier", "value": "gold"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let descriptor = ToolDescriptor::new("create_muting", Method::Post, "/v2/alertmuting")
        .param(ParameterSpec::body_field("f0_name", ParamType::String, "filters[0].name"))
        .param(ParameterSpec::body_field("f0_value", ParamType::String, "filters[0].value"))
        .param(ParameterSpec::body_field("f1_name", ParamType::String, "filters[1].name"))
        .param(ParameterSpec::body_field("f1_value", ParamType::String, "filters[1].value"));
    let registry = registry_for(&mock_server, vec![descriptor]);
    let envelope = registry
        .dispatch(Invocation::new(
            "create_muting",
            args(&[
                ("f0_name", json!("env")),
                ("f0_value", json!("prod")),
                ("f1_name", json!("tier")),
                ("f1_value", json!("gold")),
            ]),
        ))
        .await;

    assert!(envelope.ok);
}

#[tokio::test]
async fn test_upstream_error_is_wrapped_with_details() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&mock_server)
        .await;

    let registry = registry_for(&mock_server, vec![pet_descriptor()]);
    let envelope = registry
        .dispatch(Invocation::new("get_pet_by_id", args(&[("petId", json!(999))])))
        .await;

    assert!(!envelope.ok);
    assert_eq!(envelope.status, 404);
    assert_eq!(
        envelope.body,
        json!({
            "error": "not found",
            "status": 404,
            "details": {"error": "not found"}
        })
    );
}

#[tokio::test]
async fn test_timeout_surfaces_as_network_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1}))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let config = BindingConfig::builder("TEST")
        .base_url(mock_server.uri())
        .timeout_seconds(1)
        .resolve_with(|_| None)
        .unwrap();
    let mut registry = ToolRegistry::new("test", config).unwrap();
    registry.register(pet_descriptor()).unwrap();

    let envelope = registry
        .dispatch(Invocation::new("get_pet_by_id", args(&[("petId", json!(1))])))
        .await;

    assert!(!envelope.ok);
    assert_eq!(envelope.status, 0);
    let message = envelope.error_message().unwrap();
    assert!(message.starts_with("timeout:"), "got: {message}");
}

#[tokio::test]
async fn test_list_query_repeats_key_on_the_wire() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/findByStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let descriptor = ToolDescriptor::new("find_pets_by_status", Method::Get, "/pet/findByStatus")
        .param(ParameterSpec::query("status", ParamType::StringList));
    let registry = registry_for(&mock_server, vec![descriptor]);
    let envelope = registry
        .dispatch(Invocation::new(
            "find_pets_by_status",
            args(&[("status", json!(["available", "sold"]))]),
        ))
        .await;

    assert!(envelope.ok);
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=available&status=sold"));
}

#[tokio::test]
async fn test_auth_header_reaches_the_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/detector"))
        .and(header("X-SF-Token", "sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let binding = bindings::by_name("splunk").unwrap();
    let config = binding
        .config_builder()
        .base_url(mock_server.uri())
        .auth_token("sekrit")
        .resolve_with(|_| None)
        .unwrap();
    let registry = binding.registry(config).unwrap();
    let envelope = registry
        .dispatch(Invocation::new("list_detectors", Map::new()))
        .await;

    assert!(envelope.ok);
}

#[tokio::test]
async fn test_malformed_success_body_is_a_decoding_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pet/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hello</html>"))
        .mount(&mock_server)
        .await;

    let registry = registry_for(&mock_server, vec![pet_descriptor()]);
    let envelope = registry
        .dispatch(Invocation::new("get_pet_by_id", args(&[("petId", json!(1))])))
        .await;

    assert!(!envelope.ok);
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.body["error"], "invalid JSON from upstream");
    assert_eq!(envelope.body["raw_excerpt"], "<html>hello</html>");
}

#[tokio::test]
async fn test_validation_error_never_reaches_the_upstream() {
    let mock_server = MockServer::start().await;
    // No mocks mounted: any request would 404 and trip the assertions.
    let registry = registry_for(&mock_server, vec![pet_descriptor()]);
    let envelope = registry
        .dispatch(Invocation::new(
            "get_pet_by_id",
            args(&[("petId", json!("not-a-number"))]),
        ))
        .await;

    assert!(!envelope.ok);
    assert_eq!(envelope.status, 0);
    assert_eq!(
        envelope.error_message(),
        Some("invalid argument petId: expected integer")
    );
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_default_query_value_is_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/incidents"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"incidents": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let binding = bindings::by_name("pagerduty").unwrap();
    let config = binding
        .config_builder()
        .base_url(mock_server.uri())
        .auth_token("pd-token")
        .resolve_with(|_| None)
        .unwrap();
    let registry = binding.registry(config).unwrap();
    let envelope = registry
        .dispatch(Invocation::new("list_incidents", Map::new()))
        .await;

    assert!(envelope.ok);
}
