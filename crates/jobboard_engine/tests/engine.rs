use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Once};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use jobboard_core::{Criteria, Job, JobId, JobsOrigin, QueryParams};
use jobboard_engine::{
    ApiError, ChannelEventSink, Clock, EngineEvent, EngineHandle, FailureKind, JobsApi,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn clock() -> Clock {
    Arc::new(|| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

/// Fetches block long enough for faster commands to overtake them.
struct SlowFetchApi;

#[async_trait::async_trait]
impl JobsApi for SlowFetchApi {
    async fn fetch_jobs(&self, query: &QueryParams) -> Result<Vec<Job>, ApiError> {
        tokio::time::sleep(Duration::from_millis(300)).await;
        if query.contains_key("search") {
            return Err(ApiError {
                kind: FailureKind::Network,
                message: "connection reset".into(),
            });
        }
        Ok(vec![Job::new(11, "Data Analyst", "Numbers Inc", "Kochi")])
    }

    async fn dismiss_job(&self, job_id: JobId) -> Result<(), ApiError> {
        if job_id == 404 {
            return Err(ApiError {
                kind: FailureKind::HttpStatus(404),
                message: "Not Found".into(),
            });
        }
        Ok(())
    }

    async fn load_preferences(&self) -> Result<QueryParams, ApiError> {
        Ok(QueryParams::parse("easyApply=true"))
    }

    async fn save_preferences(&self, _criteria: &Criteria) -> Result<(), ApiError> {
        Ok(())
    }
}

fn engine() -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let handle =
        EngineHandle::with_api(Arc::new(SlowFetchApi), clock(), Arc::new(ChannelEventSink::new(tx)))
            .unwrap();
    (handle, rx)
}

fn next(rx: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    rx.recv_timeout(Duration::from_secs(5)).expect("engine event")
}

#[test]
fn dismiss_is_not_blocked_by_a_pending_fetch() {
    init_logging();
    let (engine, rx) = engine();

    engine.fetch_jobs(1, QueryParams::new());
    engine.dismiss_job(5);

    assert_eq!(
        next(&rx),
        EngineEvent::DismissFinished {
            job_id: 5,
            result: Ok(())
        }
    );
    match next(&rx) {
        EngineEvent::JobsLoaded {
            request_id,
            outcome,
        } => {
            assert_eq!(request_id, 1);
            assert_eq!(outcome.origin, JobsOrigin::Remote);
            assert_eq!(outcome.jobs.len(), 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn failures_come_back_as_events() {
    init_logging();
    let (engine, rx) = engine();

    engine.dismiss_job(404);
    match next(&rx) {
        EngineEvent::DismissFinished { job_id, result } => {
            assert_eq!(job_id, 404);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(404));
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.fetch_jobs(2, QueryParams::parse("search=designer"));
    match next(&rx) {
        EngineEvent::JobsLoaded {
            request_id,
            outcome,
        } => {
            assert_eq!(request_id, 2);
            assert_eq!(outcome.origin, JobsOrigin::Fallback);
            let titles: Vec<_> = outcome.jobs.iter().map(|job| job.title.as_str()).collect();
            assert_eq!(titles, vec!["UI/UX Designer"]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn preference_round_trip_events() {
    init_logging();
    let (engine, rx) = engine();

    engine.load_preferences();
    assert_eq!(
        next(&rx),
        EngineEvent::PreferencesLoaded(Ok(QueryParams::parse("easyApply=true")))
    );

    engine.save_preferences(Criteria::default());
    assert_eq!(next(&rx), EngineEvent::PreferencesSaved(Ok(())));
}

/// Dismiss and save reach the service only after a delay.
#[derive(Default)]
struct DelayedNotifyApi {
    dismissed: AtomicBool,
    saved: AtomicBool,
}

#[async_trait::async_trait]
impl JobsApi for DelayedNotifyApi {
    async fn fetch_jobs(&self, _query: &QueryParams) -> Result<Vec<Job>, ApiError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(Vec::new())
    }

    async fn dismiss_job(&self, _job_id: JobId) -> Result<(), ApiError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.dismissed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn load_preferences(&self) -> Result<QueryParams, ApiError> {
        Ok(QueryParams::new())
    }

    async fn save_preferences(&self, _criteria: &Criteria) -> Result<(), ApiError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.saved.store(true, Ordering::SeqCst);
        Ok(())
    }
}

fn delayed_engine(api: Arc<DelayedNotifyApi>) -> EngineHandle {
    let (tx, _rx) = mpsc::channel();
    EngineHandle::with_api(api, clock(), Arc::new(ChannelEventSink::new(tx))).unwrap()
}

#[test]
fn dropping_the_handle_still_delivers_a_pending_dismiss() {
    init_logging();
    let api = Arc::new(DelayedNotifyApi::default());
    let engine = delayed_engine(api.clone());

    engine.dismiss_job(7);
    std::thread::sleep(Duration::from_millis(20));
    drop(engine);

    assert!(
        api.dismissed.load(Ordering::SeqCst),
        "dismiss was cut off by shutdown"
    );
}

#[test]
fn shutdown_waits_for_saves_but_not_fetches() {
    init_logging();
    let api = Arc::new(DelayedNotifyApi::default());
    let engine = delayed_engine(api.clone());

    engine.fetch_jobs(1, QueryParams::new());
    engine.save_preferences(Criteria::default());
    let started = std::time::Instant::now();
    engine.shutdown();

    assert!(api.saved.load(Ordering::SeqCst));
    assert!(started.elapsed() < Duration::from_secs(10));
}
