use std::sync::Arc;

use chrono::{DateTime, Utc};
use engine_logging::{engine_debug, engine_warn};
use jobboard_core::{decode, evaluate, JobsOrigin, JobsOutcome, QueryParams};

use crate::client::JobsApi;
use crate::fallback::fallback_jobs;

/// Source of "now" for relative date windows and the fallback dataset.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

pub const FALLBACK_WARNING: &str = "Job service unavailable; showing offline listings";

/// Fetches jobs for a query and filters them locally, whatever the service did.
#[derive(Clone)]
pub struct JobSource {
    api: Arc<dyn JobsApi>,
    clock: Clock,
}

impl JobSource {
    pub fn new(api: Arc<dyn JobsApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    pub fn api(&self) -> &Arc<dyn JobsApi> {
        &self.api
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Never fails: any service error is replaced by the bundled listings and a
    /// warning.
    pub async fn load(&self, query: &QueryParams) -> JobsOutcome {
        let criteria = decode(query);
        let now = self.now();
        match self.api.fetch_jobs(query).await {
            Ok(jobs) => {
                let fetched = jobs.len();
                let jobs = evaluate(&jobs, &criteria, now);
                engine_debug!(
                    "Fetched {} jobs, {} match '{}'",
                    fetched,
                    jobs.len(),
                    query.to_query_string()
                );
                JobsOutcome {
                    jobs,
                    origin: JobsOrigin::Remote,
                    warning: None,
                }
            }
            Err(err) => {
                engine_warn!("Job fetch failed, using fallback listings: {}", err);
                JobsOutcome {
                    jobs: evaluate(&fallback_jobs(now), &criteria, now),
                    origin: JobsOrigin::Fallback,
                    warning: Some(FALLBACK_WARNING.to_string()),
                }
            }
        }
    }
}
