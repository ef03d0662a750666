use chrono::{DateTime, Utc};

use crate::{Criteria, Job, JobId, ToggleView};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Shareable form of the current criteria.
    pub query_string: String,
    pub criteria: Criteria,
    pub toggles: ToggleView,
    /// Rows on the current page only.
    pub jobs: Vec<JobRowView>,
    pub result_count: usize,
    pub page: usize,
    pub total_pages: usize,
    pub loading: bool,
    /// Results came from the bundled dataset.
    pub offline: bool,
    pub warning: Option<String>,
    pub sheet_open: bool,
    pub saving: bool,
    pub save_error: Option<String>,
    pub recent_searches: Vec<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_time: Option<DateTime<Utc>>,
    pub easy_apply: bool,
    pub promoted: bool,
    pub actively_reviewing: bool,
    pub early_applicant: bool,
    pub viewed: bool,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            job_id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            posted_time: job.posted_time,
            easy_apply: job.easy_apply,
            promoted: job.promoted,
            actively_reviewing: job.actively_reviewing,
            early_applicant: job.early_applicant,
            viewed: job.viewed,
        }
    }
}
