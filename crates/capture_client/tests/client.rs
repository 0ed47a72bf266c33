use capture_client::{
    AssetTotals, ClientError, ClientSettings, JobClient, RemoteStatus, ReqwestJobClient,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestJobClient {
    let settings = ClientSettings {
        server_url: server.uri(),
        ..ClientSettings::default()
    };
    ReqwestJobClient::new(&settings).expect("client")
}

#[tokio::test]
async fn submit_posts_url_and_returns_thread_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/capture"))
        .and(body_json(json!({ "url": "https://example.com/" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "thread_id": "t1" })))
        .expect(1)
        .mount(&server)
        .await;

    let job_id = client_for(&server)
        .submit("https://example.com/")
        .await
        .expect("submit ok");
    assert_eq!(job_id, "t1");
}

#[tokio::test]
async fn submit_reports_error_payload_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/capture"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "URL is required" })))
        .mount(&server)
        .await;

    let err = client_for(&server).submit("").await.unwrap_err();
    assert_eq!(err, ClientError::Remote("URL is required".to_string()));
    assert!(err.is_remote());
    assert_eq!(err.to_string(), "URL is required");
}

#[tokio::test]
async fn submit_without_json_body_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/capture"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .submit("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::HttpStatus(503));
    assert!(err.is_network());
}

#[tokio::test]
async fn poll_decodes_status_and_aliases() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/progress/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "in_progress",
            "message": "Loading page...",
            "timestamp": 1714557600.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/progress/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "not_found",
            "message": "Capture not found"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/progress/t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "completed" })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let snapshot = client.poll("t1").await.expect("poll ok");
    assert_eq!(snapshot.status, RemoteStatus::Running);
    assert_eq!(snapshot.message, "Loading page...");
    assert!(!snapshot.status.is_terminal());

    let snapshot = client.poll("gone").await.expect("poll ok");
    assert_eq!(snapshot.status, RemoteStatus::NotFound);
    assert!(snapshot.status.is_terminal());

    let snapshot = client.poll("t2").await.expect("poll ok");
    assert_eq!(snapshot.status, RemoteStatus::Completed);
    assert_eq!(snapshot.message, "");
}

#[tokio::test]
async fn poll_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/progress/t1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).poll("t1").await.unwrap_err();
    assert_eq!(err, ClientError::HttpStatus(500));
}

#[tokio::test]
async fn poll_fails_when_server_is_unreachable() {
    let settings = ClientSettings {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        server_url: "http://127.0.0.1:9".to_string(),
        ..ClientSettings::default()
    };
    let client = ReqwestJobClient::new(&settings).expect("client");

    let err = client.poll("t1").await.unwrap_err();
    assert!(err.is_network(), "unexpected error {err:?}");
}

#[tokio::test]
async fn list_decodes_capture_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/captures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "folder_name": "example_com_20240501_100000",
                "original_url": "https://example.com",
                "final_url": "https://www.example.com/",
                "capture_time": "2024-05-01T10:00:00.123456",
                "assets": { "css": 2, "js": 4, "images": 9, "fonts": 1, "videos": 0 }
            }
        ])))
        .mount(&server)
        .await;

    let captures = client_for(&server).try_list().await.expect("list ok");
    assert_eq!(captures.len(), 1);
    let capture = &captures[0];
    assert_eq!(capture.folder_name, "example_com_20240501_100000");
    assert_eq!(capture.final_url.as_deref(), Some("https://www.example.com/"));
    assert_eq!(
        capture.assets,
        AssetTotals {
            css: 2,
            js: 4,
            images: 9
        }
    );
}

#[tokio::test]
async fn list_falls_back_to_empty_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/captures"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.list().await.is_empty());
    assert_eq!(client.try_list().await.unwrap_err(), ClientError::HttpStatus(500));
}

#[tokio::test]
async fn remove_succeeds_and_reports_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete/a_com_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Capture deleted successfully" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Capture not found" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.remove("a_com_1").await.expect("delete ok");
    let err = client.remove("missing").await.unwrap_err();
    assert_eq!(err, ClientError::Remote("Capture not found".to_string()));
}

#[test]
fn addresses_are_built_without_network_calls() {
    let settings = ClientSettings {
        server_url: "http://localhost:5001/".to_string(),
        ..ClientSettings::default()
    };
    let client = ReqwestJobClient::new(&settings).expect("client");

    assert_eq!(
        client.download_url("a_com_1"),
        "http://localhost:5001/download/a_com_1"
    );
    assert_eq!(client.view_url("a_com_1"), "http://localhost:5001/view/a_com_1");
    assert_eq!(
        client.captured_url("a_com_1"),
        "http://localhost:5001/captured/a_com_1/index.html"
    );
    assert_eq!(
        client.screenshot_url("a b"),
        "http://localhost:5001/screenshot/a%20b"
    );
}

#[test]
fn rejects_non_http_server_address() {
    let settings = ClientSettings {
        server_url: "ftp://localhost".to_string(),
        ..ClientSettings::default()
    };
    let err = ReqwestJobClient::new(&settings).unwrap_err();
    assert!(matches!(err, ClientError::InvalidServerUrl(_)));
}
