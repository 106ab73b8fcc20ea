//! REST Client Tests
//!
//! Drives RestWorkItemClient against a local stub of the work item service
//! to check request shape and how response statuses are classified.

use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use workitem_batch::constants::fields;
use workitem_batch::orchestration::fetch_parent_context;
use workitem_batch::{
    BatchError, ClientError, PatchDocument, RestClientConfig, RestWorkItemClient, WorkItemClient,
};

fn client_for(server: &MockServer) -> RestWorkItemClient {
    RestWorkItemClient::new(RestClientConfig {
        org_url: server.uri(),
        credential: "test-pat".to_string(),
        ..Default::default()
    })
    .unwrap()
}

fn task_document() -> PatchDocument {
    PatchDocument::new().add_field(fields::TITLE, "UI: Unit test")
}

#[tokio::test]
async fn fetch_returns_parsed_work_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_apis/wit/workitems/12"))
        .and(query_param("api-version", "7.0"))
        .and(basic_auth("", "test-pat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "rev": 3,
            "fields": { "System.TeamProject": "Proj" },
            "_links": { "self": { "href": "https://dev.azure.com/contoso/_apis/wit/workItems/12" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = client_for(&server).fetch_work_item(12).await.unwrap();

    assert_eq!(item.id, Some(12));
    assert_eq!(item.field_str(fields::TEAM_PROJECT), Ok("Proj"));
}

#[tokio::test]
async fn sign_in_page_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_apis/wit/workitems/12"))
        .respond_with(ResponseTemplate::new(203).set_body_string("<html>Sign in</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_work_item(12).await;

    assert!(matches!(result, Err(ClientError::AuthError(_))));
}

#[tokio::test]
async fn unauthorized_keeps_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_apis/wit/workitems/12"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "TF400813: The user is not authorized to access this resource."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_work_item(12).await.unwrap_err();

    assert!(matches!(err, ClientError::AuthError(_)));
    assert_eq!(
        err.service_message(),
        "TF400813: The user is not authorized to access this resource."
    );
}

#[tokio::test]
async fn missing_work_item_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_apis/wit/workitems/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "$id": "1",
            "message": "TF401232: Work item 99 does not exist, or you do not have permissions to read it.",
            "typeKey": "WorkItemUnauthorizedAccessException"
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let err = client.fetch_work_item(99).await.unwrap_err();
    assert!(matches!(err, ClientError::WorkItemNotFound { id: 99, .. }));

    match fetch_parent_context(&client, 99).await {
        Err(BatchError::ContextResolution { parent_id, message }) => {
            assert_eq!(parent_id, 99);
            assert!(message.starts_with("TF401232: Work item 99 does not exist"));
        }
        other => panic!("expected ContextResolution, got {other:?}"),
    }
}

#[tokio::test]
async fn create_posts_json_patch_document() {
    let server = MockServer::start().await;
    let document = task_document();
    Mock::given(method("POST"))
        .and(path("/Proj/_apis/wit/workitems/$Task"))
        .and(query_param("api-version", "7.0"))
        .and(header("content-type", "application/json-patch+json"))
        .and(basic_auth("", "test-pat"))
        .and(body_json(&document))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1001,
            "fields": { "System.Title": "UI: Unit test" },
            "_links": { "html": { "href": "https://dev.azure.com/contoso/Proj/_workitems/edit/1001" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_work_item(&document, "Proj", "Task")
        .await
        .unwrap();

    assert_eq!(created.id, Some(1001));
    assert_eq!(
        created.link_href("html"),
        Ok("https://dev.azure.com/contoso/Proj/_workitems/edit/1001")
    );
}

#[tokio::test]
async fn rejected_create_is_an_api_error_with_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Proj/_apis/wit/workitems/$Task"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "TF401320: Rule Error for field Title. Error code: Required, InvalidEmpty."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_work_item(&task_document(), "Proj", "Task")
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(
                message,
                "TF401320: Rule Error for field Title. Error code: Required, InvalidEmpty."
            );
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_success_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Proj/_apis/wit/workitems/$Task"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_work_item(&task_document(), "Proj", "Task")
        .await;

    assert!(matches!(result, Err(ClientError::InvalidResponse { .. })));
}
