pub mod lexicon;
pub mod logging;
pub mod scoring;
pub mod tokenize;
pub mod vector;

pub use lexicon::{Lexicon, LexiconError};
pub use scoring::{
    calculate_match_score, BlendWeights, MatchScorer, ScoringConfig, DEFAULT_BLEND,
};
pub use tokenize::tokenize;
pub use vector::{cosine_similarity, vectorize, TermVector};

use serde::{Deserialize, Serialize};

/// Result of scoring one resume against one job description.
///
/// Serializes with camelCase field names (`skillsScore`, `strongMatches`, ...)
/// because the existing front end renders these fields verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Blended final score (0-100).
    pub score: u8,
    /// Keyword coverage over the job's recognized skills (0-100).
    pub skills_score: u8,
    /// Amplified textual-similarity score (0-100).
    ///
    /// The name is historical: this is NOT a years-of-experience metric, it is
    /// the cosine-similarity component after amplification. Kept as-is for
    /// wire compatibility with existing consumers.
    pub experience_score: u8,
    /// Up to `max_listed` job skills also found in the resume, capitalized.
    pub strong_matches: Vec<String>,
    /// Up to `max_listed` job skills absent from the resume, capitalized.
    pub missing_keywords: Vec<String>,
    /// Human-readable one-line verdict.
    pub summary: String,
}

impl MatchResult {
    /// A zero-valued result carrying only an explanatory summary. Used for
    /// degenerate inputs, which are reportable conditions rather than errors.
    pub(crate) fn zero(summary: impl Into<String>) -> Self {
        Self {
            score: 0,
            skills_score: 0,
            experience_score: 0,
            strong_matches: vec![],
            missing_keywords: vec![],
            summary: summary.into(),
        }
    }
}
