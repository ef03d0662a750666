//! Job board engine: collaborator client, job source, and effect execution.
mod client;
mod engine;
mod fallback;
mod persist;
mod source;
mod types;

pub use client::{ApiSettings, JobsApi, ReqwestJobsApi};
pub use engine::{
    ChannelEventSink, EngineConfig, EngineError, EngineHandle, EventSink, SHUTDOWN_GRACE,
};
pub use fallback::fallback_jobs;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError, SessionStore, SESSION_FILE};
pub use source::{system_clock, Clock, JobSource, FALLBACK_WARNING};
pub use types::{ApiError, EngineEvent, FailureKind};
