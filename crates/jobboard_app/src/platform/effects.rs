use std::sync::{mpsc, Arc};

use engine_logging::{engine_debug, engine_info};
use jobboard_core::{Effect, Msg};
use jobboard_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, EventSink, SessionStore};

use super::app::LoopEvent;
use super::persistence;

/// Executes core effects: collaborator calls go to the engine, session writes
/// happen inline.
pub struct EffectRunner {
    engine: EngineHandle,
    store: SessionStore,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        store: SessionStore,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { tx: loop_tx });
        let engine = EngineHandle::new(config, sink)?;
        Ok(Self { engine, store })
    }

    /// Waits for dismiss and save calls still in flight.
    pub fn shutdown(self) {
        self.engine.shutdown();
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchJobs { request_id, query } => {
                    engine_debug!(
                        "FetchJobs request_id={} query={}",
                        request_id,
                        query.to_query_string()
                    );
                    self.engine.fetch_jobs(request_id, query);
                }
                Effect::DismissJob { job_id } => {
                    engine_info!("DismissJob job_id={}", job_id);
                    self.engine.dismiss_job(job_id);
                }
                Effect::LoadPreferences => self.engine.load_preferences(),
                Effect::SavePreferences { criteria } => self.engine.save_preferences(criteria),
                Effect::PersistSession(snapshot) => {
                    persistence::save_session(&self.store, &snapshot);
                }
            }
        }
    }
}

/// Feeds engine events back into the event loop as messages.
struct MsgSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Msg(engine_event_to_msg(event)));
    }
}

pub(crate) fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobsLoaded {
            request_id,
            outcome,
        } => Msg::JobsLoaded {
            request_id,
            outcome,
        },
        // Removal already happened locally and a failure is only logged.
        EngineEvent::DismissFinished { .. } => Msg::NoOp,
        EngineEvent::PreferencesLoaded(Ok(patch)) => Msg::PreferencesLoaded(patch),
        EngineEvent::PreferencesLoaded(Err(_)) => Msg::NoOp,
        EngineEvent::PreferencesSaved(result) => {
            Msg::PreferencesSaved(result.map_err(|err| err.to_string()))
        }
    }
}
