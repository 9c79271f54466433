use composer_core::{
    update, Effect, FlowState, GeneratedPost, GenerationRequest, JobId, Msg, Phase, Platform,
    PollOutcome,
};

fn polling_state() -> FlowState {
    let request = GenerationRequest {
        source_url: "https://acme.example".to_string(),
        theme: "launch".to_string(),
        extra_details: String::new(),
        platforms: vec![Platform::Linkedin],
        want_image: false,
    };
    let state = FlowState::new();
    let (state, _effects) = update(state, Msg::Submit(request));
    let (state, _effects) = update(
        state,
        Msg::AsyncAccepted {
            job_id: JobId("job-1".to_string()),
        },
    );
    state
}

fn completed_post() -> GeneratedPost {
    GeneratedPost {
        id: "p1".to_string(),
        platform: "linkedin".to_string(),
        content: "done".to_string(),
        image_url: None,
        created_at: None,
    }
}

#[test]
fn deadline_elapsed_is_terminal_and_stops_polling() {
    let state = polling_state();

    let (state, effects) = update(state, Msg::DeadlineElapsed);
    assert_eq!(state.phase(), &Phase::TimedOut);
    assert_eq!(effects, vec![Effect::StopPolling]);

    // Timeout wording tells the user to retry, not that they were rejected.
    let error = state.view().error.expect("timeout surfaces a message");
    assert!(error.contains("try again"), "unexpected wording: {error}");
}

#[test]
fn stale_poll_after_timeout_mutates_nothing() {
    let state = polling_state();
    let (state, _effects) = update(state, Msg::DeadlineElapsed);
    let frozen = state.clone();

    let (state, effects) = update(
        state,
        Msg::PollUpdate(PollOutcome::Completed {
            posts: vec![completed_post()],
            single: None,
        }),
    );
    assert_eq!(state, frozen);
    assert!(effects.is_empty());
}

#[test]
fn stale_poll_after_completion_mutates_nothing() {
    let state = polling_state();
    let (state, _effects) = update(
        state,
        Msg::PollUpdate(PollOutcome::Completed {
            posts: vec![completed_post()],
            single: None,
        }),
    );
    let frozen = state.clone();

    let (state, effects) = update(
        state,
        Msg::PollUpdate(PollOutcome::Error {
            message: "late failure".to_string(),
        }),
    );
    assert_eq!(state, frozen);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::DeadlineElapsed);
    assert_eq!(state, frozen);
    assert!(effects.is_empty());
}

#[test]
fn transient_query_failures_keep_polling() {
    let state = polling_state();
    let before = state.clone();

    let (state, effects) = update(state, Msg::PollUpdate(PollOutcome::QueryFailed));
    assert_eq!(state, before);
    assert!(effects.is_empty());

    // Still accepts a later terminal poll.
    let (state, effects) = update(
        state,
        Msg::PollUpdate(PollOutcome::Completed {
            posts: vec![completed_post()],
            single: None,
        }),
    );
    assert_eq!(effects, vec![Effect::StopPolling]);
    assert!(matches!(state.phase(), Phase::Completed(_)));
}
