use chrono::{DateTime, Duration, Utc};
use jobboard_core::{EmploymentType, ExperienceLevel, Job, WorkMode};

/// Bundled listings served when the job service cannot be reached.
///
/// Posting times are relative to `now` so the date windows keep behaving the
/// same whenever the dataset is used.
pub fn fallback_jobs(now: DateTime<Utc>) -> Vec<Job> {
    let frontend = Job {
        posted_time: Some(now - Duration::days(2)),
        actively_reviewing: true,
        early_applicant: true,
        easy_apply: true,
        promoted: true,
        verified: true,
        applicants: Some(8),
        remote: Some(WorkMode::Hybrid),
        employment_type: Some(EmploymentType::FullTime),
        experience_level: Some(ExperienceLevel::Mid),
        ..Job::new(1, "Frontend Developer", "Tech Corp", "Kochi, Kerala")
    };

    let backend = Job {
        posted_time: Some(now - Duration::days(5)),
        actively_reviewing: true,
        applicants: Some(42),
        remote: Some(WorkMode::Onsite),
        employment_type: Some(EmploymentType::FullTime),
        experience_level: Some(ExperienceLevel::Senior),
        ..Job::new(
            2,
            "Backend Engineer",
            "Innovate Solutions",
            "Thiruvananthapuram, Kerala",
        )
    };

    // Listed without a posting time.
    let designer = Job {
        actively_reviewing: true,
        viewed: true,
        easy_apply: true,
        early_applicant: true,
        in_your_network: true,
        applicants: Some(3),
        remote: Some(WorkMode::Remote),
        employment_type: Some(EmploymentType::Contract),
        experience_level: Some(ExperienceLevel::Entry),
        ..Job::new(3, "UI/UX Designer", "Creative Minds", "Kozhikode, Kerala")
    };

    vec![frontend, backend, designer]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_times_relative() {
        let now = Utc::now();
        let jobs = fallback_jobs(now);
        let mut ids: Vec<_> = jobs.iter().map(|job| job.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(jobs.iter().flat_map(|job| job.posted_time).all(|t| t < now));
    }
}
