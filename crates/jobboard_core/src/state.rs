use std::collections::BTreeSet;

use crate::codec::{decode, encode};
use crate::view_model::{AppViewModel, JobRowView};
use crate::{Criteria, Effect, Job, JobId, Pager, QueryParams, ToggleView};

pub type RequestId = u64;

pub const RECENT_SEARCH_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobsOrigin {
    Remote,
    Fallback,
}

/// What the job source produced for one fetch, already filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsOutcome {
    pub jobs: Vec<Job>,
    pub origin: JobsOrigin,
    /// Non-fatal note for the user, e.g. that offline listings are shown.
    pub warning: Option<String>,
}

/// The part of a session worth keeping across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub query: QueryParams,
    pub recent_searches: Vec<String>,
}

/// Session state. The addressable query is the single source of truth for
/// the criteria; [`AppState::criteria`] decodes it on demand and every edit
/// re-encodes the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query: QueryParams,
    jobs: Vec<Job>,
    dismissed: BTreeSet<JobId>,
    pager: Pager,
    latest_request: RequestId,
    loading: bool,
    origin: Option<JobsOrigin>,
    warning: Option<String>,
    sheet_open: bool,
    saving: bool,
    save_error: Option<String>,
    recent_searches: Vec<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pager: Pager::new(page_size),
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> Criteria {
        decode(&self.query)
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    pub fn view(&self) -> AppViewModel {
        let criteria = self.criteria();
        let count = self.jobs.len();
        AppViewModel {
            query_string: self.query.to_query_string(),
            toggles: ToggleView::from_criteria(&criteria),
            criteria,
            jobs: self
                .pager
                .slice(&self.jobs)
                .iter()
                .map(JobRowView::from_job)
                .collect(),
            result_count: count,
            page: self.pager.current(),
            total_pages: self.pager.total_pages(count),
            loading: self.loading,
            offline: self.origin == Some(JobsOrigin::Fallback),
            warning: self.warning.clone(),
            sheet_open: self.sheet_open,
            saving: self.saving,
            save_error: self.save_error.clone(),
            recent_searches: self.recent_searches.clone(),
            dirty: self.dirty,
        }
    }

    /// Replaces the query wholesale (e.g. on mount). Unknown keys and
    /// malformed values are dropped by the decode/encode pass.
    pub(crate) fn replace_query(&mut self, query: &QueryParams) -> bool {
        let next = encode(&decode(query));
        self.write_query(next)
    }

    /// Decodes, edits, and writes the whole representation back.
    pub(crate) fn edit_criteria(&mut self, edit: impl FnOnce(&mut Criteria)) -> bool {
        let mut criteria = self.criteria();
        edit(&mut criteria);
        self.write_query(encode(&criteria))
    }

    fn write_query(&mut self, next: QueryParams) -> bool {
        if next == self.query {
            return false;
        }
        self.query = next;
        self.pager.reset();
        self.dirty = true;
        true
    }

    /// Starts a fetch that supersedes every earlier one.
    pub(crate) fn begin_fetch(&mut self) -> Effect {
        self.latest_request += 1;
        self.loading = true;
        self.dirty = true;
        Effect::FetchJobs {
            request_id: self.latest_request,
            query: self.query.clone(),
        }
    }

    /// Accepts the outcome only if it answers the latest fetch.
    pub(crate) fn apply_loaded(&mut self, request_id: RequestId, outcome: JobsOutcome) -> bool {
        if request_id != self.latest_request {
            return false;
        }
        let dismissed = &self.dismissed;
        self.jobs = outcome
            .jobs
            .into_iter()
            .filter(|job| !dismissed.contains(&job.id))
            .collect();
        self.loading = false;
        self.origin = Some(outcome.origin);
        self.warning = outcome.warning;
        self.pager.clamp(self.jobs.len());
        self.dirty = true;
        true
    }

    /// Removes the job locally; the removal is never rolled back.
    pub(crate) fn dismiss(&mut self, job_id: JobId) -> bool {
        let Some(index) = self.jobs.iter().position(|job| job.id == job_id) else {
            return false;
        };
        self.jobs.remove(index);
        self.dismissed.insert(job_id);
        self.pager.clamp(self.jobs.len());
        self.dirty = true;
        true
    }

    pub(crate) fn mark_viewed(&mut self, job_id: JobId) -> bool {
        match self.jobs.iter_mut().find(|job| job.id == job_id) {
            Some(job) if !job.viewed => {
                job.viewed = true;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Moves `term` to the front of the recent list; returns whether the list
    /// changed.
    pub(crate) fn record_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        if self
            .recent_searches
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case(term))
        {
            return false;
        }
        self.recent_searches
            .retain(|existing| !existing.eq_ignore_ascii_case(term));
        self.recent_searches.insert(0, term.to_string());
        self.recent_searches.truncate(RECENT_SEARCH_LIMIT);
        self.dirty = true;
        true
    }

    pub(crate) fn restore_recent_searches(&mut self, searches: Vec<String>) {
        self.recent_searches.clear();
        for term in searches.iter().rev() {
            self.record_search(term);
        }
        self.dirty = true;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query.clone(),
            recent_searches: self.recent_searches.clone(),
        }
    }

    pub(crate) fn set_sheet_open(&mut self, open: bool) -> bool {
        if self.sheet_open == open {
            return false;
        }
        self.sheet_open = open;
        if !open {
            self.save_error = None;
        }
        self.dirty = true;
        true
    }

    pub(crate) fn is_sheet_open(&self) -> bool {
        self.sheet_open
    }

    pub(crate) fn begin_save(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        self.save_error = None;
        self.dirty = true;
        true
    }

    pub(crate) fn finish_save(&mut self, result: Result<(), String>) {
        self.saving = false;
        match result {
            Ok(()) => {
                self.sheet_open = false;
                self.save_error = None;
            }
            Err(message) => self.save_error = Some(message),
        }
        self.dirty = true;
    }

    pub(crate) fn dismiss_save_error(&mut self) -> bool {
        if self.save_error.take().is_some() {
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn turn_page(&mut self, turn: impl FnOnce(&mut Pager, usize) -> bool) -> bool {
        let changed = turn(&mut self.pager, self.jobs.len());
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
