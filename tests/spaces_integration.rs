//! Integration tests for the kubernetes-shaped spaces endpoint using wiremock

use serde_json::json;
use up_sdk::endpoints::spaces;
use up_sdk::kube::{CreateOptions, DeleteOptions, ListOptions};
use up_sdk::{Config, Error};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPACES_PATH: &str = "/apis/upbound.io/v1alpha1/namespaces/acme/spaces";

fn client(server: &MockServer) -> spaces::Client {
    let cfg = Config::with_endpoint(&server.uri(), []).expect("mock server uri is a valid base url");
    spaces::Client::new(&cfg)
}

/// List options are encoded as query parameters
#[tokio::test]
async fn test_list_with_field_selector() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SPACES_PATH))
        .and(query_param("fieldSelector", "metadata.name=space-aaaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiVersion": "upbound.io/v1alpha1",
            "kind": "SpaceList",
            "items": [{"apiVersion": "upbound.io/v1alpha1", "kind": "Space", "metadata": {"name": "space-aaaa"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client(&server)
        .list("acme", &ListOptions::default().fields("metadata.name=space-aaaa"))
        .await
        .unwrap();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].name(), Some("space-aaaa"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("fieldSelector=metadata.name%3Dspace-aaaa")
    );
}

/// A failure status on a 500 becomes a typed status error
#[tokio::test]
async fn test_internal_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SPACES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "code": 500,
            "reason": "InternalError",
            "message": "etcd unavailable"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .list("acme", &ListOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code().map(|s| s.as_u16()), Some(500));
    let Error::Status(status) = err else {
        panic!("expected a status error");
    };
    assert_eq!(status.reason, "InternalError");
    assert_eq!(status.code, 500);
    assert_eq!(status.message, "etcd unavailable");
}

/// Delete answered by a Success status is a successful empty response
#[tokio::test]
async fn test_delete_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{SPACES_PATH}/space-aaaa")))
        .and(query_param("propagationPolicy", "Foreground"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Status", "apiVersion": "v1", "status": "Success", "code": 200
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete("acme", "space-aaaa", &DeleteOptions::foreground())
        .await
        .expect("Success status is not an error");
}

/// Delete answered by the deleted object without type fields succeeds
#[tokio::test]
async fn test_delete_returns_untyped_object() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{SPACES_PATH}/space-aaaa")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": {"name": "space-aaaa", "namespace": "acme"},
            "spec": {"region": "eu-west-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .delete("acme", "space-aaaa", &DeleteOptions::background())
        .await
        .expect("the deleted object is a success");
}

/// Delete answered by a Failure status on 2xx is still an error
#[tokio::test]
async fn test_delete_failure_status_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{SPACES_PATH}/space-aaaa")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Status", "apiVersion": "v1", "status": "Failure", "code": 409, "reason": "Conflict"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .delete("acme", "space-aaaa", &DeleteOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.reason(), Some("Conflict"));
}

/// Create posts the object and decodes the stored copy
#[tokio::test]
async fn test_create_dry_run() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SPACES_PATH))
        .and(query_param("dryRun", "All"))
        .and(body_json(json!({
            "apiVersion": "upbound.io/v1alpha1",
            "kind": "Space",
            "metadata": {"name": "space-bbbb"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "apiVersion": "upbound.io/v1alpha1",
            "kind": "Space",
            "metadata": {"name": "space-bbbb", "namespace": "acme", "uid": "u-1"},
            "spec": {"region": "us-east-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = CreateOptions {
        dry_run: true,
        ..CreateOptions::default()
    };
    let created = client(&server)
        .create("acme", &spaces::Space::new("space-bbbb"), &options)
        .await
        .unwrap();
    assert_eq!(created.metadata.uid.as_deref(), Some("u-1"));
    assert_eq!(created.spec["region"], "us-east-1");
}

/// A not-found without a status body still yields a status error
#[tokio::test]
async fn test_get_not_found_plain_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{SPACES_PATH}/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .mount(&server)
        .await;

    let err = client(&server).get("acme", "missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.reason(), Some("NotFound"));
}
