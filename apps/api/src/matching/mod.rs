// Resume ↔ job matching: skill extraction, Rocket Score, ranking and feedback.
// Pure functions only. Handlers own all I/O and pass skill lists in.

pub mod extraction;
pub mod feedback;
pub mod ranking;
pub mod scoring;
pub mod vocabulary;

pub use extraction::extract_skills;
pub use feedback::{resume_feedback, ResumeFeedback};
pub use ranking::{rank_jobs, RankedJob, Skilled};
pub use scoring::{rocket_score, EMPTY_JOB_SKILLS_SCORE};
pub use vocabulary::SkillVocabulary;
