use chrono::{DateTime, Utc};

use crate::{Criteria, Job, SortBy};

/// Filters `jobs` against `criteria` as of `now`.
///
/// The search narrows first; every other non-default field then acts as an
/// independent predicate and a job must pass all of them. `sortBy` only
/// reorders the survivors.
pub fn evaluate(jobs: &[Job], criteria: &Criteria, now: DateTime<Utc>) -> Vec<Job> {
    let needle = criteria.search.trim().to_lowercase();
    let mut kept: Vec<Job> = jobs
        .iter()
        .filter(|job| needle.is_empty() || matches_search(job, &needle))
        .filter(|job| matches_filters(job, criteria, now))
        .cloned()
        .collect();

    if criteria.sort_by == SortBy::MostRecent {
        // Stable: equal (or unknown) timestamps keep the service's order.
        kept.sort_by(|a, b| b.posted_time.cmp(&a.posted_time));
    }
    kept
}

fn matches_search(job: &Job, needle: &str) -> bool {
    [&job.title, &job.company, &job.location]
        .into_iter()
        .any(|text| text.to_lowercase().contains(needle))
}

fn matches_filters(job: &Job, criteria: &Criteria, now: DateTime<Utc>) -> bool {
    if criteria.easy_apply && !job.easy_apply {
        return false;
    }
    if criteria.has_verifications && !job.verified {
        return false;
    }
    if criteria.in_your_network && !job.in_your_network {
        return false;
    }
    if criteria.under_10_applicants && !job.applicants.is_some_and(|count| count < 10) {
        return false;
    }

    if let Some(window) = criteria.date_posted.window_ms() {
        let within = job
            .posted_time
            .is_some_and(|posted| (now - posted).num_milliseconds() <= window);
        if !within {
            return false;
        }
    }

    if !matches_optional(criteria.remote, job.remote)
        || !matches_optional(criteria.employment_type, job.employment_type)
        || !matches_optional(criteria.experience_level, job.experience_level)
    {
        return false;
    }

    if let Some(company) = &criteria.company {
        if company.trim().to_lowercase() != job.company.trim().to_lowercase() {
            return false;
        }
    }
    if let Some(location) = &criteria.location {
        if !contains_ignore_case(&job.location, location) {
            return false;
        }
    }
    if let Some(title) = &criteria.title {
        if !contains_ignore_case(&job.title, title) {
            return false;
        }
    }

    // industry and jobFunction are forwarded to the service only: jobs carry
    // neither attribute, so they place no local constraint.
    true
}

fn matches_optional<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.trim().to_lowercase().as_str())
}
