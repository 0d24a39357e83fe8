// crates/formwise-client/tests/http_transport.rs
// ============================================================================
// Module: HTTP Transport Unit Tests
// Description: Form fetches, multipart submissions, and task actions over HTTP.
// Purpose: Validate transport behavior against a local scripted server.
// ============================================================================

//! HTTP transport tests for the form and task clients against a local
//! tiny_http server: status handling, rejection decoding, size caps, and
//! redirect refusal.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::field_reassign_with_default,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::thread;

use formwise_client::HttpFormClient;
use formwise_client::HttpTaskClient;
use formwise_config::FormwiseConfig;
use formwise_core::ContainerId;
use formwise_core::FetchError;
use formwise_core::FormClient;
use formwise_core::FormError;
use formwise_core::PartBody;
use formwise_core::SubmitOutcome;
use formwise_core::SubmitPart;
use formwise_core::TaskAction;
use formwise_core::TaskActionRequest;
use formwise_core::TaskClient;
use formwise_core::TaskId;
use formwise_core::TransportError;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Captured request seen by the scripted server.
struct SeenRequest {
    method: String,
    url: String,
    content_type: Option<String>,
    body: String,
}

/// Serves exactly one request with the given status and body, returning the
/// config pointing at the server and a handle yielding the captured request.
fn one_shot_server(
    status: u16,
    body: &str,
) -> (FormwiseConfig, thread::JoinHandle<Option<SeenRequest>>) {
    let server = Server::http("127.0.0.1:0").expect("bind local server");
    let addr = server.server_addr().to_ip().expect("local server address");

    let mut config = FormwiseConfig::default();
    config.server.base_url = format!("http://{addr}");

    let body = body.to_string();
    let handle = thread::spawn(move || {
        server.recv().ok().map(|mut request| {
            let method = request.method().to_string();
            let url = request.url().to_string();
            let content_type = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("content-type"))
                .map(|header| header.value.to_string());
            let mut raw = String::new();
            let _ = request.as_reader().read_to_string(&mut raw);
            let response = Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
            SeenRequest {
                method,
                url,
                content_type,
                body: raw,
            }
        })
    });
    (config, handle)
}

fn form_json() -> String {
    serde_json::json!({
        "container": {
            "containerId": "root",
            "children": [
                {
                    "containerId": "step-one",
                    "children": [],
                    "fields": [{"name": "alpha", "type": "text"}]
                }
            ],
            "fields": []
        },
        "action": "submit",
        "layout": "multistep"
    })
    .to_string()
}

// ============================================================================
// SECTION: Form Fetching
// ============================================================================

#[test]
fn fetch_form_decodes_a_successful_payload() {
    let (config, handle) = one_shot_server(200, &form_json());
    let client = HttpFormClient::new(&config).expect("client must build");

    let payload = client.fetch_form("forms/42").expect("fetch must succeed");
    assert_eq!(payload.container.children.len(), 1);

    let seen = handle.join().expect("server thread").expect("request served");
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.url, "/forms/42");
}

#[test]
fn fetch_form_surfaces_unexpected_status() {
    let (config, handle) = one_shot_server(500, "boom");
    let client = HttpFormClient::new(&config).expect("client must build");

    let result = client.fetch_form("forms/42");
    assert!(matches!(result, Err(FetchError::Transport(TransportError::Status(500)))));
    drop(handle.join());
}

#[test]
fn fetch_form_reports_an_unparseable_body_as_malformed() {
    let (config, handle) = one_shot_server(200, "not json");
    let client = HttpFormClient::new(&config).expect("client must build");

    let result = client.fetch_form("forms/42");
    assert!(matches!(result, Err(FetchError::Malformed(FormError::MalformedPayload(_)))));
    drop(handle.join());
}

#[test]
fn fetch_form_reports_a_wrong_shape_body_as_malformed() {
    let (config, handle) = one_shot_server(200, r#"{"unexpected": true}"#);
    let client = HttpFormClient::new(&config).expect("client must build");

    let result = client.fetch_form("forms/42");
    assert!(matches!(result, Err(FetchError::Malformed(FormError::MalformedPayload(_)))));
    drop(handle.join());
}

#[test]
fn fetch_form_enforces_the_body_cap() {
    let (mut config, handle) = one_shot_server(200, &form_json());
    config.server.max_body_bytes = 8;
    let client = HttpFormClient::new(&config).expect("client must build");

    let result = client.fetch_form("forms/42");
    assert!(matches!(result, Err(FetchError::Transport(TransportError::Decode(_)))));
    drop(handle.join());
}

#[test]
fn fetch_form_does_not_follow_redirects() {
    let (config, handle) = one_shot_server(302, "");
    let client = HttpFormClient::new(&config).expect("client must build");

    let result = client.fetch_form("forms/42");
    assert!(matches!(result, Err(FetchError::Transport(TransportError::Status(302)))));
    drop(handle.join());
}

// ============================================================================
// SECTION: Step Submission
// ============================================================================

#[test]
fn submit_step_posts_multipart_to_the_step_container() {
    let (config, handle) = one_shot_server(200, "");
    let client = HttpFormClient::new(&config).expect("client must build");

    let parts = vec![
        SubmitPart {
            name: "alpha".to_string(),
            body: PartBody::Text("hello".to_string()),
        },
        SubmitPart {
            name: "upload".to_string(),
            body: PartBody::File {
                filename: "doc.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: vec![1, 2, 3],
            },
        },
    ];
    let outcome = client
        .submit_step("submit", &ContainerId::new("step-one"), &parts)
        .expect("submission must run");
    assert_eq!(outcome, SubmitOutcome::Accepted);

    let seen = handle.join().expect("server thread").expect("request served");
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/submit/step-one");
    assert!(
        seen.content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data")),
        "submission must be multipart"
    );
    assert!(seen.body.contains("name=\"alpha\""));
    assert!(seen.body.contains("filename=\"doc.pdf\""));
}

#[test]
fn submit_step_decodes_a_rejection_body() {
    let (config, handle) = one_shot_server(
        422,
        r#"{"items":[{"propertyName":"alpha","message":"alpha is required"}]}"#,
    );
    let client = HttpFormClient::new(&config).expect("client must build");

    let outcome = client
        .submit_step("submit", &ContainerId::new("step-one"), &[])
        .expect("submission must run");
    match outcome {
        SubmitOutcome::Rejected(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].property_name, "alpha");
            assert_eq!(items[0].message, "alpha is required");
        }
        SubmitOutcome::Accepted => panic!("expected a rejection"),
    }
    drop(handle.join());
}

#[test]
fn submit_step_degrades_an_unparseable_rejection_to_an_empty_list() {
    let (config, handle) = one_shot_server(400, "<html>bad request</html>");
    let client = HttpFormClient::new(&config).expect("client must build");

    let outcome = client
        .submit_step("submit", &ContainerId::new("step-one"), &[])
        .expect("submission must run");
    assert_eq!(outcome, SubmitOutcome::Rejected(Vec::new()));
    drop(handle.join());
}

#[test]
fn submit_step_surfaces_server_errors() {
    let (config, handle) = one_shot_server(503, "");
    let client = HttpFormClient::new(&config).expect("client must build");

    let result = client.submit_step("submit", &ContainerId::new("step-one"), &[]);
    assert!(matches!(result, Err(TransportError::Status(503))));
    drop(handle.join());
}

#[test]
fn submit_step_refuses_oversized_staged_files_before_sending() {
    let mut config = FormwiseConfig::default();
    config.server.base_url = "http://127.0.0.1:9".to_string();
    config.upload.max_file_bytes = 2;
    let client = HttpFormClient::new(&config).expect("client must build");

    let parts = vec![SubmitPart {
        name: "upload".to_string(),
        body: PartBody::File {
            filename: "big.bin".to_string(),
            content_type: None,
            bytes: vec![0; 16],
        },
    }];
    let result = client.submit_step("submit", &ContainerId::new("step-one"), &parts);
    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[test]
fn submit_step_refuses_too_many_file_parts_before_sending() {
    let mut config = FormwiseConfig::default();
    config.server.base_url = "http://127.0.0.1:9".to_string();
    config.upload.max_files = 1;
    let client = HttpFormClient::new(&config).expect("client must build");

    let file = |name: &str| SubmitPart {
        name: name.to_string(),
        body: PartBody::File {
            filename: format!("{name}.bin"),
            content_type: None,
            bytes: vec![0; 4],
        },
    };
    let parts = vec![file("first"), file("second")];
    let result = client.submit_step("submit", &ContainerId::new("step-one"), &parts);
    assert!(matches!(result, Err(TransportError::Network(_))));
}

// ============================================================================
// SECTION: Task Actions
// ============================================================================

#[test]
fn task_action_posts_json_to_the_action_segment() {
    let (config, handle) = one_shot_server(204, "");
    let client = HttpTaskClient::new(&config).expect("client must build");

    let request = TaskActionRequest {
        reason: Some("duplicate submission".to_string()),
        assignee: None,
    };
    client
        .perform(&TaskId::new("task-9"), TaskAction::Cancellation, &request)
        .expect("action must succeed");

    let seen = handle.join().expect("server thread").expect("request served");
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.url, "/tasks/task-9/cancellation");
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));
    assert!(seen.body.contains("duplicate submission"));
}

#[test]
fn task_action_surfaces_unexpected_status() {
    let (config, handle) = one_shot_server(409, "");
    let client = HttpTaskClient::new(&config).expect("client must build");

    let result =
        client.perform(&TaskId::new("task-9"), TaskAction::Activation, &TaskActionRequest::default());
    assert!(matches!(result, Err(TransportError::Status(409))));
    drop(handle.join());
}
