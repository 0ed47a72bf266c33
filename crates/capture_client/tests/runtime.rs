use std::sync::{mpsc, Arc};
use std::time::Duration;

use capture_client::{
    ChannelEventSink, ClientError, ClientEvent, ClientHandle, ClientSettings, RemoteStatus,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn handle_for(server: &MockServer) -> (ClientHandle, mpsc::Receiver<ClientEvent>) {
    handle_polling_every(server, Duration::from_millis(20))
}

fn handle_polling_every(
    server: &MockServer,
    poll_interval: Duration,
) -> (ClientHandle, mpsc::Receiver<ClientEvent>) {
    let (tx, rx) = mpsc::channel();
    let settings = ClientSettings {
        server_url: server.uri(),
        poll_interval,
        ..ClientSettings::default()
    };
    let handle = ClientHandle::new(settings, Arc::new(ChannelEventSink::new(tx))).expect("handle");
    (handle, rx)
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_then_poll_to_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/capture"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "thread_id": "t1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/progress/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "completed" })))
        .expect(1)
        .mount(&server)
        .await;

    let (handle, rx) = handle_for(&server);
    handle.submit(7, "https://example.com/");
    assert_eq!(
        rx.recv_timeout(WAIT).expect("submit event"),
        ClientEvent::Submitted {
            ticket: 7,
            result: Ok("t1".to_string())
        }
    );

    handle.start_polling("t1");
    match rx.recv_timeout(WAIT).expect("status event") {
        ClientEvent::Status { job_id, result } => {
            assert_eq!(job_id, "t1");
            assert_eq!(result.expect("snapshot").status, RemoteStatus::Completed);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(rx.recv_timeout(Duration::from_millis(150)).is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_polling_silences_the_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/progress/t1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "running", "message": "Loading page" })),
        )
        .mount(&server)
        .await;

    let (handle, rx) = handle_for(&server);
    handle.start_polling("t1");
    assert!(matches!(
        rx.recv_timeout(WAIT).expect("status event"),
        ClientEvent::Status { .. }
    ));

    handle.stop_polling();
    // Drain anything emitted before the stop command was processed.
    std::thread::sleep(Duration::from_millis(60));
    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(Duration::from_millis(150)).is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn starting_a_new_poll_replaces_the_previous_job() {
    let server = MockServer::start().await;
    for job in ["a", "b"] {
        Mock::given(method("GET"))
            .and(path(format!("/api/progress/{job}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "running", "message": "Loading page" })),
            )
            .mount(&server)
            .await;
    }

    let (handle, rx) = handle_for(&server);
    handle.start_polling("a");
    match rx.recv_timeout(WAIT).expect("status event") {
        ClientEvent::Status { job_id, .. } => assert_eq!(job_id, "a"),
        other => panic!("unexpected event {other:?}"),
    }

    handle.start_polling("b");
    std::thread::sleep(Duration::from_millis(60));
    while rx.try_recv().is_ok() {}

    let mut polled = Vec::new();
    while let Ok(event) = rx.recv_timeout(Duration::from_millis(200)) {
        match event {
            ClientEvent::Status { job_id, .. } => polled.push(job_id),
            other => panic!("unexpected event {other:?}"),
        }
        if polled.len() >= 5 {
            break;
        }
    }
    assert!(!polled.is_empty());
    assert!(polled.iter().all(|job_id| job_id == "b"), "got {polled:?}");
    handle.stop_polling();
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_poll_interval_still_polls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/progress/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "completed" })))
        .expect(1)
        .mount(&server)
        .await;

    let (handle, rx) = handle_polling_every(&server, Duration::ZERO);
    handle.start_polling("t1");
    match rx.recv_timeout(WAIT).expect("status event") {
        ClientEvent::Status { job_id, result } => {
            assert_eq!(job_id, "t1");
            assert_eq!(result.expect("snapshot").status, RemoteStatus::Completed);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn comparison_listing_carries_captured_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/captures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (handle, rx) = handle_for(&server);
    handle.load_comparison("a_com_1");
    match rx.recv_timeout(WAIT).expect("comparison event") {
        ClientEvent::ComparisonListed {
            folder,
            result,
            captured_url,
        } => {
            assert_eq!(folder, "a_com_1");
            assert_eq!(result, Ok(Vec::new()));
            assert_eq!(captured_url, handle.captured_url("a_com_1"));
            assert!(captured_url.ends_with("/captured/a_com_1/index.html"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_failure_and_timer_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Capture not found" })))
        .mount(&server)
        .await;

    let (handle, rx) = handle_for(&server);
    handle.delete("missing");
    assert_eq!(
        rx.recv_timeout(WAIT).expect("delete event"),
        ClientEvent::Deleted {
            folder: "missing".to_string(),
            result: Err(ClientError::Remote("Capture not found".to_string())),
        }
    );

    handle.start_timer(3, Duration::from_millis(10));
    assert_eq!(
        rx.recv_timeout(WAIT).expect("timer event"),
        ClientEvent::TimerElapsed { timer_id: 3 }
    );
}
