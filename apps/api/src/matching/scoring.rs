//! Rocket Score: percentage of a job's skills covered by a resume.

use std::collections::HashSet;

/// Score returned when a job lists no skills at all.
pub const EMPTY_JOB_SKILLS_SCORE: u32 = 50;

/// Lowercases and de-duplicates skills, keeping first-seen order.
pub(crate) fn normalize_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

pub(crate) fn skill_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// `round(100 * |resume ∩ job| / |job|)`, case-insensitive.
///
/// Returns `EMPTY_JOB_SKILLS_SCORE` when `job_skills` is empty.
pub fn rocket_score(resume_skills: &[String], job_skills: &[String]) -> u32 {
    let job = normalize_skills(job_skills);
    if job.is_empty() {
        return EMPTY_JOB_SKILLS_SCORE;
    }

    let resume = skill_set(resume_skills);
    let matched = job.iter().filter(|s| resume.contains(*s)).count();

    ((matched as f64 / job.len() as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_job_skills_returns_default() {
        assert_eq!(rocket_score(&skills(&["rust"]), &[]), 50);
        assert_eq!(rocket_score(&[], &[]), 50);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(rocket_score(&skills(&["React"]), &skills(&["react"])), 100);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        assert_eq!(rocket_score(&[], &skills(&["a", "b"])), 0);
    }

    #[test]
    fn test_full_overlap_scores_hundred() {
        assert_eq!(rocket_score(&skills(&["a", "b"]), &skills(&["a", "b"])), 100);
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let resume = skills(&["typescript", "sql"]);
        let job = skills(&["TypeScript", "SQL", "Docker"]);
        assert_eq!(rocket_score(&resume, &job), 67);
    }

    #[test]
    fn test_duplicate_job_skills_count_once() {
        let job = skills(&["Docker", "docker", "AWS"]);
        assert_eq!(rocket_score(&skills(&["docker"]), &job), 50);
    }

    #[test]
    fn test_normalize_keeps_first_seen_order() {
        let normalized = normalize_skills(&skills(&["SQL", "Go", "sql", "GO", "Rust"]));
        assert_eq!(normalized, vec!["sql", "go", "rust"]);
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(
            resume in proptest::collection::vec("[a-zA-Z]{1,6}", 0..12),
            job in proptest::collection::vec("[a-zA-Z]{1,6}", 0..12),
        ) {
            let score = rocket_score(&resume, &job);
            prop_assert!(score <= 100);
            if job.is_empty() {
                prop_assert_eq!(score, EMPTY_JOB_SKILLS_SCORE);
            }
        }

        #[test]
        fn prop_score_ignores_order(
            resume in proptest::collection::vec("[a-z]{1,4}", 0..10),
            job in proptest::collection::vec("[a-z]{1,4}", 0..10),
        ) {
            let mut reversed_resume = resume.clone();
            reversed_resume.reverse();
            let mut reversed_job = job.clone();
            reversed_job.reverse();
            prop_assert_eq!(
                rocket_score(&resume, &job),
                rocket_score(&reversed_resume, &reversed_job)
            );
        }

        #[test]
        fn prop_self_match_is_perfect(job in proptest::collection::vec("[a-zA-Z]{1,6}", 1..10)) {
            prop_assert_eq!(rocket_score(&job, &job), 100);
        }
    }
}
