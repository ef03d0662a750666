use crate::{Criteria, JobId, QueryParams, RequestId, SessionSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load jobs for `query`; the answer must echo `request_id`.
    FetchJobs {
        request_id: RequestId,
        query: QueryParams,
    },
    /// Tell the jobs service about a dismissal. Fire and forget.
    DismissJob { job_id: JobId },
    LoadPreferences,
    SavePreferences { criteria: Criteria },
    /// The shareable query or recent searches changed.
    PersistSession(SessionSnapshot),
}
