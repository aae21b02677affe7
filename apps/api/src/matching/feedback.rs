//! Resume feedback: which of a job's skills the resume covers, and coaching for the rest.

use serde::{Deserialize, Serialize};

use crate::matching::scoring::{normalize_skills, skill_set};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeFeedback {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    /// One entry per `missing` skill, same order.
    pub suggestions: Vec<String>,
}

fn suggestion_for(skill: &str) -> String {
    format!(
        "Strengthen your resume with a concrete example that demonstrates {skill} (project, metric, or impact)."
    )
}

/// Partitions the job's skills (lowercased, job order) into matched and missing.
pub fn resume_feedback(resume_skills: &[String], job_skills: &[String]) -> ResumeFeedback {
    let resume = skill_set(resume_skills);

    let (matched, missing): (Vec<String>, Vec<String>) = normalize_skills(job_skills)
        .into_iter()
        .partition(|skill| resume.contains(skill));

    let suggestions = missing.iter().map(|skill| suggestion_for(skill)).collect();

    ResumeFeedback {
        matched,
        missing,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partitions_in_job_order() {
        let fb = resume_feedback(
            &skills(&["typescript", "sql"]),
            &skills(&["TypeScript", "SQL", "Docker"]),
        );
        assert_eq!(fb.matched, vec!["typescript", "sql"]);
        assert_eq!(fb.missing, vec!["docker"]);
        assert_eq!(fb.suggestions.len(), 1);
        assert!(fb.suggestions[0].contains("docker"));
    }

    #[test]
    fn test_suggestion_template() {
        let fb = resume_feedback(&[], &skills(&["Kafka"]));
        assert_eq!(
            fb.suggestions[0],
            "Strengthen your resume with a concrete example that demonstrates kafka (project, metric, or impact)."
        );
    }

    #[test]
    fn test_empty_job_skills_yields_empty_feedback() {
        let fb = resume_feedback(&skills(&["rust"]), &[]);
        assert!(fb.matched.is_empty());
        assert!(fb.missing.is_empty());
        assert!(fb.suggestions.is_empty());
    }

    #[test]
    fn test_duplicate_job_skills_reported_once() {
        let fb = resume_feedback(&[], &skills(&["AWS", "aws"]));
        assert_eq!(fb.missing, vec!["aws"]);
    }

    proptest! {
        #[test]
        fn prop_partitions_are_disjoint_and_complete(
            resume in proptest::collection::vec("[a-cA-C]{1,2}", 0..8),
            job in proptest::collection::vec("[a-cA-C]{1,2}", 0..8),
        ) {
            let fb = resume_feedback(&resume, &job);

            let matched: HashSet<_> = fb.matched.iter().cloned().collect();
            let missing: HashSet<_> = fb.missing.iter().cloned().collect();
            prop_assert!(matched.is_disjoint(&missing));

            let union: HashSet<_> = matched.union(&missing).cloned().collect();
            let expected: HashSet<_> = job.iter().map(|s| s.to_lowercase()).collect();
            prop_assert_eq!(union, expected);
            prop_assert_eq!(fb.suggestions.len(), fb.missing.len());
        }
    }
}
