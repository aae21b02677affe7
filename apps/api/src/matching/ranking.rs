//! Job ranking: score every job against one resume, best first.

use serde::Serialize;

use crate::matching::scoring::rocket_score;

/// Anything that carries a skill list the resume can be scored against.
pub trait Skilled {
    fn skills(&self) -> &[String];
}

/// A job paired with its Rocket Score for a given resume.
#[derive(Debug, Clone, Serialize)]
pub struct RankedJob<T> {
    pub job: T,
    #[serde(rename = "match")]
    pub score: u32,
}

/// Scores each job and sorts by descending score.
///
/// The sort is stable: jobs with equal scores keep their input order, so
/// callers that pass newest-first lists get newest-first ties.
pub fn rank_jobs<T, I>(jobs: I, resume_skills: &[String]) -> Vec<RankedJob<T>>
where
    T: Skilled,
    I: IntoIterator<Item = T>,
{
    let mut ranked: Vec<RankedJob<T>> = jobs
        .into_iter()
        .map(|job| {
            let score = rocket_score(resume_skills, job.skills());
            RankedJob { job, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
