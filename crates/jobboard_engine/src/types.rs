use std::fmt;

use jobboard_core::{JobId, JobsOutcome, QueryParams, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobsLoaded {
        request_id: RequestId,
        outcome: JobsOutcome,
    },
    DismissFinished {
        job_id: JobId,
        result: Result<(), ApiError>,
    },
    PreferencesLoaded(Result<QueryParams, ApiError>),
    PreferencesSaved(Result<(), ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// The service answered `success: false`.
    Rejected,
    Decode,
    Encode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Rejected => write!(f, "rejected by service"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Encode => write!(f, "request encoding failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
