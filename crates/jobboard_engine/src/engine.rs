use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::future::join_all;
use jobboard_core::{Criteria, JobId, QueryParams, RequestId};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::client::{ApiSettings, JobsApi, ReqwestJobsApi};
use crate::source::{system_clock, Clock, JobSource};
use crate::{ApiError, EngineEvent};

#[derive(Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub clock: Clock,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            clock: system_clock(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("api client: {0}")]
    Api(#[from] ApiError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
}

/// Receives every event the engine produces, from any of its tasks.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug)]
enum EngineCommand {
    FetchJobs {
        request_id: RequestId,
        query: QueryParams,
    },
    Dismiss {
        job_id: JobId,
    },
    LoadPreferences,
    SavePreferences {
        criteria: Criteria,
    },
}

impl EngineCommand {
    /// Calls that change state on the service and must not be cut off by
    /// shutdown.
    fn notifies_service(&self) -> bool {
        matches!(
            self,
            EngineCommand::Dismiss { .. } | EngineCommand::SavePreferences { .. }
        )
    }
}

/// How long shutdown waits for dismiss and save calls still in flight.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Runs collaborator calls on a background thread.
///
/// Each command becomes its own task, so a slow fetch never holds up a
/// dismiss or a preference save. Shutting down (or dropping the handle)
/// waits up to [`SHUTDOWN_GRACE`] for pending dismiss and save calls; pending
/// fetches are abandoned.
pub struct EngineHandle {
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let api = ReqwestJobsApi::new(config.api)?;
        Self::with_api(Arc::new(api), config.clock, sink)
    }

    /// Runs against any `JobsApi`, e.g. an in-memory double.
    pub fn with_api(
        api: Arc<dyn JobsApi>,
        clock: Clock,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let source = JobSource::new(api, clock);

        let thread = thread::spawn(move || {
            let mut outgoing: Vec<JoinHandle<()>> = Vec::new();
            while let Ok(command) = cmd_rx.recv() {
                let notifies_service = command.notifies_service();
                let source = source.clone();
                let sink = sink.clone();
                let task = runtime.spawn(async move {
                    handle_command(&source, command, sink.as_ref()).await;
                });
                if notifies_service {
                    outgoing.retain(|task| !task.is_finished());
                    outgoing.push(task);
                }
            }
            engine_debug!("Engine command channel closed");
            drain_outgoing(&runtime, outgoing);
            runtime.shutdown_timeout(Duration::from_millis(100));
        });

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            thread: Some(thread),
        })
    }

    /// Stops accepting commands and waits for pending dismiss and save calls.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        // Closing the channel ends the command loop.
        self.cmd_tx.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                engine_warn!("Engine thread panicked during shutdown");
            }
        }
    }

    pub fn fetch_jobs(&self, request_id: RequestId, query: QueryParams) {
        self.send(EngineCommand::FetchJobs { request_id, query });
    }

    pub fn dismiss_job(&self, job_id: JobId) {
        self.send(EngineCommand::Dismiss { job_id });
    }

    pub fn load_preferences(&self) {
        self.send(EngineCommand::LoadPreferences);
    }

    pub fn save_preferences(&self, criteria: Criteria) {
        self.send(EngineCommand::SavePreferences { criteria });
    }

    fn send(&self, command: EngineCommand) {
        let Some(cmd_tx) = &self.cmd_tx else {
            return;
        };
        if let Err(err) = cmd_tx.send(command) {
            engine_warn!("Engine thread gone, dropping {:?}", err.0);
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.close();
    }
}

fn drain_outgoing(runtime: &Runtime, mut outgoing: Vec<JoinHandle<()>>) {
    outgoing.retain(|task| !task.is_finished());
    if outgoing.is_empty() {
        return;
    }
    engine_info!("Waiting for {} outgoing call(s) before exit", outgoing.len());
    let drained = runtime.block_on(tokio::time::timeout(SHUTDOWN_GRACE, join_all(outgoing)));
    if drained.is_err() {
        engine_warn!("Outgoing calls still pending after {:?}", SHUTDOWN_GRACE);
    }
}

async fn handle_command(source: &JobSource, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::FetchJobs { request_id, query } => {
            engine_debug!("Fetch #{} for '{}'", request_id, query.to_query_string());
            let outcome = source.load(&query).await;
            sink.emit(EngineEvent::JobsLoaded {
                request_id,
                outcome,
            });
        }
        EngineCommand::Dismiss { job_id } => {
            let result = source.api().dismiss_job(job_id).await;
            match &result {
                Ok(()) => engine_info!("Dismissed job {}", job_id),
                Err(err) => engine_warn!("Dismiss of job {} not recorded: {}", job_id, err),
            }
            sink.emit(EngineEvent::DismissFinished { job_id, result });
        }
        EngineCommand::LoadPreferences => {
            let result = source.api().load_preferences().await;
            if let Err(err) = &result {
                engine_warn!("Could not load saved filters: {}", err);
            }
            sink.emit(EngineEvent::PreferencesLoaded(result));
        }
        EngineCommand::SavePreferences { criteria } => {
            let result = source.api().save_preferences(&criteria).await;
            match &result {
                Ok(()) => engine_info!("Saved filter preferences"),
                Err(err) => engine_warn!("Could not save filters: {}", err),
            }
            sink.emit(EngineEvent::PreferencesSaved(result));
        }
    }
}
