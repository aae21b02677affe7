//! Pure roll-ups behind the dashboards.

use serde::Serialize;

use crate::matching::{rank_jobs, RankedJob};
use crate::models::job::JobListingRow;

/// Views → applications totals across an employer's jobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Funnel {
    pub views: i64,
    pub applications: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerMetrics {
    pub active_jobs: usize,
    pub funnel: Funnel,
    /// Rounded to one decimal; 0.0 with no jobs.
    pub avg_applicants_per_job: f64,
}

pub fn employer_metrics(jobs: &[JobListingRow]) -> EmployerMetrics {
    let funnel = Funnel {
        views: jobs.iter().map(|j| i64::from(j.views)).sum(),
        applications: jobs.iter().map(|j| i64::from(j.applications)).sum(),
    };

    let avg_applicants_per_job = if jobs.is_empty() {
        0.0
    } else {
        let avg = funnel.applications as f64 / jobs.len() as f64;
        (avg * 10.0).round() / 10.0
    };

    EmployerMetrics {
        active_jobs: jobs.len(),
        funnel,
        avg_applicants_per_job,
    }
}

/// Best `limit` jobs for a resume; empty when there is no resume.
pub fn top_matches(
    jobs: Vec<JobListingRow>,
    resume_skills: Option<&[String]>,
    limit: usize,
) -> Vec<RankedJob<JobListingRow>> {
    let Some(skills) = resume_skills else {
        return vec![];
    };
    let mut ranked = rank_jobs(jobs, skills);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobRow;
    use chrono::Utc;
    use uuid::Uuid;

    fn listing(title: &str, skills: &[&str], views: i32, applications: i32) -> JobListingRow {
        JobListingRow {
            job: JobRow {
                id: Uuid::new_v4(),
                company_id: Uuid::new_v4(),
                title: title.to_string(),
                description: String::new(),
                location: "Remote".to_string(),
                salary_min: None,
                salary_max: None,
                job_type: "FULL_TIME".to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                created_at: Utc::now(),
            },
            company_name: Some("RoleRocket Labs".to_string()),
            views,
            applications,
        }
    }

    #[test]
    fn test_employer_metrics_sum_and_average() {
        let jobs = vec![listing("a", &[], 40, 3), listing("b", &[], 10, 1), listing("c", &[], 0, 0)];
        let metrics = employer_metrics(&jobs);
        assert_eq!(metrics.active_jobs, 3);
        assert_eq!(
            metrics.funnel,
            Funnel {
                views: 50,
                applications: 4
            }
        );
        assert!((metrics.avg_applicants_per_job - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_employer_metrics_without_jobs() {
        let metrics = employer_metrics(&[]);
        assert_eq!(metrics.active_jobs, 0);
        assert_eq!(metrics.avg_applicants_per_job, 0.0);
    }

    #[test]
    fn test_top_matches_needs_resume() {
        let jobs = vec![listing("a", &["sql"], 0, 0)];
        assert!(top_matches(jobs, None, 5).is_empty());
    }

    #[test]
    fn test_top_matches_truncates_best_first() {
        let jobs = vec![
            listing("none", &["go"], 0, 0),
            listing("half", &["sql", "aws"], 0, 0),
            listing("full", &["sql"], 0, 0),
        ];
        let skills = vec!["sql".to_string()];
        let top = top_matches(jobs, Some(&skills), 2);
        let titles: Vec<_> = top.iter().map(|m| m.job.job.title.as_str()).collect();
        assert_eq!(titles, vec!["full", "half"]);
    }
}
