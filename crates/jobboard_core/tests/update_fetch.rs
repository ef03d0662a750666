use std::sync::Once;

use jobboard_core::{
    update, AppState, Effect, Field, Job, JobsOrigin, JobsOutcome, Msg, QueryParams, RequestId,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn jobs(count: u64) -> Vec<Job> {
    (1..=count)
        .map(|id| Job::new(id, format!("Role {id}"), "Tech Corp", "Kochi, Kerala"))
        .collect()
}

fn remote(jobs: Vec<Job>) -> JobsOutcome {
    JobsOutcome {
        jobs,
        origin: JobsOrigin::Remote,
        warning: None,
    }
}

fn fetch_of(effects: &[Effect]) -> (RequestId, QueryParams) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchJobs { request_id, query } => Some((*request_id, query.clone())),
            _ => None,
        })
        .expect("fetch effect")
}

fn mounted(query: &str) -> (AppState, RequestId) {
    let (state, effects) = update(AppState::new(), Msg::Mounted(QueryParams::parse(query)));
    let (request_id, _) = fetch_of(&effects);
    (state, request_id)
}

#[test]
fn mount_decodes_query_and_fetches() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::Mounted(QueryParams::parse("remote=Remote&tracking=abc&easyApply=false")),
    );

    assert_eq!(effects.len(), 1);
    let (request_id, query) = fetch_of(&effects);
    assert_eq!(request_id, 1);
    assert_eq!(query.to_query_string(), "remote=Remote");
    assert_eq!(state.query(), &query);

    let view = state.view();
    assert!(view.loading);
    assert_eq!(view.query_string, "remote=Remote");
}

#[test]
fn loaded_jobs_end_loading_and_fill_first_page() {
    init_logging();
    let (state, request_id) = mounted("");
    let (mut state, effects) = update(
        state,
        Msg::JobsLoaded {
            request_id,
            outcome: remote(jobs(13)),
        },
    );
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let view = state.view();
    assert!(!view.loading);
    assert!(!view.offline);
    assert_eq!(view.result_count, 13);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.page, 1);
    let ids: Vec<_> = view.jobs.iter().map(|row| row.job_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn superseded_response_is_discarded() {
    init_logging();
    let (state, first) = mounted("");
    let (state, effects) = update(
        state,
        Msg::FilterChanged {
            field: Field::Remote,
            value: "Remote".to_string(),
        },
    );
    let (second, query) = fetch_of(&effects);
    assert!(second > first);
    assert_eq!(state.latest_request(), second);
    assert_eq!(query.get("remote"), Some("Remote"));

    // Slow answer to the first request arrives after the second was issued.
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: first,
            outcome: remote(jobs(7)),
        },
    );
    assert!(state.is_loading());
    assert!(state.jobs().is_empty());

    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: second,
            outcome: remote(jobs(2)),
        },
    );
    assert!(!state.is_loading());
    assert_eq!(state.jobs().len(), 2);

    // And a late duplicate of the first never overwrites the newer result.
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id: first,
            outcome: remote(jobs(7)),
        },
    );
    assert_eq!(state.jobs().len(), 2);
}

#[test]
fn fallback_outcome_shows_warning_without_error_state() {
    init_logging();
    let (state, request_id) = mounted("");
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id,
            outcome: JobsOutcome {
                jobs: jobs(3),
                origin: JobsOrigin::Fallback,
                warning: Some("Job service unavailable; showing offline listings".into()),
            },
        },
    );

    let view = state.view();
    assert!(view.offline);
    assert_eq!(view.result_count, 3);
    assert_eq!(
        view.warning.as_deref(),
        Some("Job service unavailable; showing offline listings")
    );

    // The next successful load clears the warning.
    let (state, effects) = update(state, Msg::SearchSubmitted("role".into()));
    let (request_id, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id,
            outcome: remote(jobs(1)),
        },
    );
    assert_eq!(state.view().warning, None);
    assert!(!state.view().offline);
}

#[test]
fn paging_is_bounded_and_resets_on_new_criteria() {
    init_logging();
    let (state, request_id) = mounted("");
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id,
            outcome: remote(jobs(13)),
        },
    );

    let (state, _) = update(state, Msg::PageRequested(3));
    assert_eq!(state.view().page, 3);
    assert_eq!(state.view().jobs.len(), 3);

    let (state, _) = update(state, Msg::PageRequested(4));
    assert_eq!(state.view().page, 3);
    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.view().page, 3);

    let (state, _) = update(state, Msg::PrevPage);
    assert_eq!(state.view().page, 2);

    let (state, _) = update(
        state,
        Msg::FilterChanged {
            field: Field::SortBy,
            value: "Most recent".into(),
        },
    );
    assert_eq!(state.view().page, 1);
}

#[test]
fn custom_page_size_is_respected() {
    init_logging();
    let (state, effects) = update(
        AppState::with_page_size(4),
        Msg::Mounted(QueryParams::new()),
    );
    let (request_id, _) = fetch_of(&effects);
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            request_id,
            outcome: remote(jobs(9)),
        },
    );
    assert_eq!(state.view().total_pages, 3);
    assert_eq!(state.view().jobs.len(), 4);
}
