use std::time::Duration;

use composer_client::{
    AuthContext, ClientConfig, Generator, NullProgressSink, ReqwestTransport,
};
use composer_core::{FailureKind, GenerationRequest, Platform};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest {
        source_url: "https://acme.example".to_string(),
        theme: "launch".to_string(),
        extra_details: String::new(),
        platforms: vec![Platform::Linkedin],
        want_image: false,
    }
}

#[tokio::test]
async fn deadline_wins_over_a_backend_that_never_terminates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/async/generate-async"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "job_id": "stuck" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/async/status/stuck"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "processing" })),
        )
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: server.uri(),
        poll_interval: Duration::from_millis(20),
        poll_deadline: Duration::from_millis(150),
        ..ClientConfig::default()
    };
    let transport =
        ReqwestTransport::new(&config, AuthContext::anonymous()).expect("transport");
    let generator = Generator::new(transport, config);

    let started = std::time::Instant::now();
    let err = generator
        .generate(request(), &NullProgressSink)
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(err, FailureKind::Timeout);
    // At (and not before) the ceiling.
    assert!(elapsed >= Duration::from_millis(150), "{elapsed:?}");

    // No further status queries after the deadline fired.
    let polls_at_timeout = status_query_count(&server).await;
    assert!(polls_at_timeout >= 2, "expected several polls, saw {polls_at_timeout}");
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(status_query_count(&server).await, polls_at_timeout);
}

#[tokio::test]
async fn transient_poll_failures_do_not_end_the_job() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/async/generate-async"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "job_id": "flaky" })))
        .mount(&server)
        .await;
    // Two failing status queries, then success.
    Mock::given(method("GET"))
        .and(path("/api/async/status/flaky"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/async/status/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "result": { "post": { "id": 5, "platform": "linkedin", "content": "ok" } },
        })))
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: server.uri(),
        poll_interval: Duration::from_millis(20),
        poll_deadline: Duration::from_secs(5),
        ..ClientConfig::default()
    };
    let transport =
        ReqwestTransport::new(&config, AuthContext::anonymous()).expect("transport");
    let generator = Generator::new(transport, config);

    let projection = generator
        .generate(request(), &NullProgressSink)
        .await
        .expect("survives transient poll failures");
    assert_eq!(projection.posts.len(), 1);
    assert_eq!(projection.posts[0].content, "ok");
}

async fn status_query_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("recording enabled")
        .iter()
        .filter(|r| r.url.path().starts_with("/api/async/status/"))
        .count()
}
