use composer_client::{
    resolve, AuthContext, CandidateList, ClientConfig, Method, NullDebugSink, ReqwestTransport,
    ResolveError, RingDebugSink,
};
use composer_core::AttemptOutcome;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> ReqwestTransport {
    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    ReqwestTransport::new(&config, AuthContext::anonymous()).expect("transport")
}

fn candidates(server: &MockServer, paths: &[&str]) -> CandidateList {
    CandidateList::new(
        paths
            .iter()
            .map(|p| format!("{}{}", server.uri(), p))
            .collect(),
    )
    .expect("non-empty")
}

#[tokio::test]
async fn first_successful_candidate_wins_regardless_of_position() {
    client_logging::initialize_for_tests();

    // The winning candidate is exercised at every position of a
    // three-candidate list.
    for winner in 0..3 {
        let server = MockServer::start().await;
        let paths = ["/a", "/b", "/c"];
        for (index, p) in paths.iter().enumerate() {
            let template = if index == winner {
                ResponseTemplate::new(200).set_body_json(json!({ "from": p }))
            } else {
                ResponseTemplate::new(404)
            };
            Mock::given(method("GET"))
                .and(path(*p))
                .respond_with(template)
                .mount(&server)
                .await;
        }

        let body = resolve(
            &transport(&server),
            Method::Get,
            &candidates(&server, &paths),
            None,
            &NullDebugSink,
        )
        .await
        .expect("one candidate succeeds");
        assert_eq!(body["from"], paths[winner]);
    }
}

#[tokio::test]
async fn unreachable_candidates_are_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    // Port 1 refuses connections; the resolver must move on.
    let list = CandidateList::new(vec![
        "http://127.0.0.1:1/dead".to_string(),
        format!("{}/alive", server.uri()),
    ])
    .expect("non-empty");

    let body = resolve(
        &transport(&server),
        Method::Get,
        &list,
        None,
        &NullDebugSink,
    )
    .await
    .expect("live candidate resolves");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn exhaustion_keeps_the_last_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "first down" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "second down" })))
        .mount(&server)
        .await;

    let err = resolve(
        &transport(&server),
        Method::Get,
        &candidates(&server, &["/one", "/two"]),
        None,
        &NullDebugSink,
    )
    .await
    .unwrap_err();

    match &err {
        ResolveError::Exhausted { last_status, .. } => assert_eq!(*last_status, Some(503)),
        other => panic!("expected Exhausted, got {other:?}"),
    }
    assert_eq!(err.last_message().as_deref(), Some("second down"));
}

#[tokio::test]
async fn every_attempt_lands_in_the_debug_ring() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let sink = RingDebugSink::new();
    resolve(
        &transport(&server),
        Method::Get,
        &candidates(&server, &["/bad", "/good"]),
        None,
        &sink,
    )
    .await
    .expect("second candidate succeeds");

    let entries = sink.snapshot();
    assert_eq!(entries.len(), 2);
    // Newest first: the success comes before the 404.
    assert_eq!(entries[0].outcome, AttemptOutcome::Success);
    assert_eq!(entries[1].outcome, AttemptOutcome::Failure);
    assert!(entries[1].detail.contains("404"), "{}", entries[1].detail);
}

#[tokio::test]
async fn empty_candidate_list_is_rejected_up_front() {
    assert_eq!(
        CandidateList::new(Vec::new()).unwrap_err(),
        ResolveError::NoCandidates
    );
}

#[tokio::test]
async fn bearer_token_is_attached_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("Authorization", "Bearer sesame"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    let auth = AuthContext::with_token("sesame");
    let transport = ReqwestTransport::new(&config, auth).expect("transport");

    let body = resolve(
        &transport,
        Method::Get,
        &candidates(&server, &["/secure"]),
        None,
        &NullDebugSink,
    )
    .await
    .expect("authorized candidate resolves");
    assert_eq!(body["ok"], true);
}
