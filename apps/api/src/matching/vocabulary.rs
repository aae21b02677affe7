//! Skill vocabulary: the fixed list of terms resumes are scanned for.

use serde::Serialize;

/// Baseline terms used when no other vocabulary is configured.
pub const BASELINE_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "next.js",
    "node.js",
    "sql",
    "postgresql",
    "rest",
    "api",
    "testing",
    "jest",
    "cicd",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "product management",
    "agile",
    "scrum",
];

/// Immutable, ordered list of lowercase skill terms.
///
/// Held in `AppState` behind an `Arc` and passed into extraction explicitly,
/// so tests can swap in their own terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, lowercasing each term and dropping blanks and repeats.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().to_lowercase();
            if term.is_empty() || out.contains(&term) {
                continue;
            }
            out.push(term);
        }
        Self { terms: out }
    }

    pub fn baseline() -> Self {
        Self::new(BASELINE_SKILLS.iter().copied())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::baseline()
    }
}
