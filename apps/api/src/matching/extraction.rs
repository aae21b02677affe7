//! Skill extraction: case-insensitive substring scan of raw resume text.
//!
//! There is no tokenization or word-boundary check: "api" matches inside
//! "rapid". Scores elsewhere depend on exactly this behaviour.

use crate::matching::vocabulary::SkillVocabulary;

/// Returns every vocabulary term that appears anywhere in `text`, in vocabulary order.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    let lower = text.to_lowercase();
    vocabulary
        .terms()
        .iter()
        .filter(|term| lower.contains(term.as_str()))
        .cloned()
        .collect()
}
