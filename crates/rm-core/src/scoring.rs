use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::tokenize::tokenize;
use crate::vector::{cosine_similarity, vectorize};
use crate::MatchResult;

/// Either input missing entirely. Upstream text extraction failed or the job
/// has no description; reportable, not an error.
const SUMMARY_UNAVAILABLE: &str = "Resume content not accessible or empty.";
/// Resume text was present but produced no usable tokens.
const SUMMARY_EMPTY_RESUME: &str = "Resume is empty.";

const SUMMARY_EXCELLENT: &str =
    "Excellent match. The resume closely covers what this role asks for.";
const SUMMARY_GOOD: &str =
    "Good match. The resume overlaps well with the job description.";
const SUMMARY_LOW: &str =
    "Low match. The resume shares little content with the job description.";

/// How the amplified similarity score and the keyword-coverage score are
/// blended into the final score. Favors holistic textual relevance while
/// still rewarding exact skill presence.
#[derive(Debug, Clone, Copy)]
pub struct BlendWeights {
    pub similarity: f64,
    pub coverage: f64,
}

pub const DEFAULT_BLEND: BlendWeights = BlendWeights {
    similarity: 0.6,
    coverage: 0.4,
};

impl BlendWeights {
    pub fn sum(&self) -> f64 {
        self.similarity + self.coverage
    }
}

/// All tuning knobs of the scorer as named fields. Every one of these encodes
/// a calibration decision, not a derived quantity.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Multiplier applied to the raw 0-100 similarity score. Bag-of-words
    /// cosine over long prose rarely exceeds ~0.4, so 2.5 maps a strong
    /// textual match to the top of the scale.
    pub amplification: f64,
    pub blend: BlendWeights,
    /// Extra weight per occurrence of a recognized skill token.
    pub skill_boost: u32,
    /// Cap on `strong_matches` / `missing_keywords` list length.
    pub max_listed: usize,
    /// Minimum score for the "Good match" summary.
    pub good_threshold: u8,
    /// Minimum score for the "Excellent match" summary.
    pub excellent_threshold: u8,
    /// Upper bound of the uniform random jitter added to the final score
    /// before rounding. Zero disables jitter and makes scoring a pure
    /// function; production ranking may enable it so near-duplicate resumes
    /// do not display identical scores.
    pub jitter_max: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            amplification: 2.5,
            blend: DEFAULT_BLEND,
            skill_boost: 2,
            max_listed: 10,
            good_threshold: 50,
            excellent_threshold: 80,
            jitter_max: 0.0,
        }
    }
}

impl ScoringConfig {
    /// Defaults with per-deployment overrides from the environment.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            amplification: env_f64("RM_SCORE_AMPLIFICATION", default.amplification),
            blend: BlendWeights {
                similarity: env_f64("RM_SIMILARITY_WEIGHT", default.blend.similarity),
                coverage: env_f64("RM_COVERAGE_WEIGHT", default.blend.coverage),
            },
            jitter_max: env_f64("RM_JITTER_MAX", default.jitter_max),
            ..default
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// The Similarity & Coverage Engine: tokenizes both texts, builds weighted
/// term vectors, blends cosine similarity with keyword coverage, and emits a
/// `MatchResult` with matched/missing skill evidence.
///
/// Holds only a config and a shared lexicon reference, so one scorer can be
/// used from any number of threads.
pub struct MatchScorer<'a> {
    config: ScoringConfig,
    lexicon: &'a Lexicon,
}

/// Score a resume against a job description with the builtin lexicon and
/// default configuration (jitter disabled). The single operation the rest of
/// the platform calls.
pub fn calculate_match_score(jd_text: &str, resume_text: &str) -> MatchResult {
    MatchScorer::new(Lexicon::builtin()).calculate_match_score(jd_text, resume_text)
}

impl<'a> MatchScorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self::with_config(lexicon, ScoringConfig::default())
    }

    pub fn with_config(lexicon: &'a Lexicon, config: ScoringConfig) -> Self {
        Self { config, lexicon }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score with the config's jitter setting, drawing randomness from the
    /// thread RNG. With `jitter_max == 0` this is fully deterministic.
    pub fn calculate_match_score(&self, jd_text: &str, resume_text: &str) -> MatchResult {
        if self.config.jitter_max > 0.0 {
            self.calculate_match_score_with_rng(jd_text, resume_text, &mut rand::rng())
        } else {
            self.score(jd_text, resume_text, 0.0)
        }
    }

    /// Score with jitter drawn from a caller-supplied RNG, so ranking behavior
    /// stays reproducible under a seeded generator.
    pub fn calculate_match_score_with_rng<R: Rng + ?Sized>(
        &self,
        jd_text: &str,
        resume_text: &str,
        rng: &mut R,
    ) -> MatchResult {
        let jitter = if self.config.jitter_max > 0.0 {
            rng.random_range(0.0..self.config.jitter_max)
        } else {
            0.0
        };
        self.score(jd_text, resume_text, jitter)
    }

    fn score(&self, jd_text: &str, resume_text: &str, jitter: f64) -> MatchResult {
        if jd_text.is_empty() || resume_text.is_empty() {
            return MatchResult::zero(SUMMARY_UNAVAILABLE);
        }

        let jd_tokens = tokenize(jd_text, self.lexicon);
        let resume_tokens = tokenize(resume_text, self.lexicon);
        if resume_tokens.is_empty() {
            return MatchResult::zero(SUMMARY_EMPTY_RESUME);
        }

        let jd_vector = vectorize(&jd_tokens, self.lexicon, self.config.skill_boost);
        let resume_vector = vectorize(&resume_tokens, self.lexicon, self.config.skill_boost);

        let similarity = cosine_similarity(&jd_vector, &resume_vector);
        let adjusted = (similarity * 100.0 * self.config.amplification).min(100.0);

        // Deduplicate the job's skill tokens in first-occurrence order, which
        // keeps the evidence lists deterministic across calls.
        let mut seen = HashSet::new();
        let jd_skills: Vec<&str> = jd_tokens
            .iter()
            .map(String::as_str)
            .filter(|token| self.lexicon.is_skill(token))
            .filter(|token| seen.insert(*token))
            .collect();
        let jd_skill_count = jd_skills.len();

        let resume_skills: HashSet<&str> = resume_tokens
            .iter()
            .map(String::as_str)
            .filter(|token| self.lexicon.is_skill(token))
            .collect();

        let (matched, missing): (Vec<&str>, Vec<&str>) = jd_skills
            .into_iter()
            .partition(|token| resume_skills.contains(token));

        let coverage = if jd_skill_count == 0 {
            0.0
        } else {
            matched.len() as f64 / jd_skill_count as f64
        };

        let blend = self.config.blend;
        let blended = adjusted * blend.similarity + coverage * 100.0 * blend.coverage;
        let score = (blended + jitter).round().clamp(0.0, 100.0) as u8;

        debug!(
            similarity,
            adjusted,
            coverage,
            jitter,
            score,
            jd_skills = jd_skill_count,
            matched = matched.len(),
            "match scored"
        );

        MatchResult {
            score,
            skills_score: (coverage * 100.0).round() as u8,
            experience_score: adjusted.round() as u8,
            strong_matches: matched
                .into_iter()
                .take(self.config.max_listed)
                .map(capitalize)
                .collect(),
            missing_keywords: missing
                .into_iter()
                .take(self.config.max_listed)
                .map(capitalize)
                .collect(),
            summary: self.summary_for(score).to_string(),
        }
    }

    fn summary_for(&self, score: u8) -> &'static str {
        if score >= self.config.excellent_threshold {
            SUMMARY_EXCELLENT
        } else if score >= self.config.good_threshold {
            SUMMARY_GOOD
        } else {
            SUMMARY_LOW
        }
    }
}

/// Display form of a skill token: first character uppercased.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const JD_FULLSTACK: &str =
        "We are looking for a Software Engineer with experience in React, Node.js, and MongoDB.";
    const RESUME_FULLSTACK: &str =
        "I am a Software Engineer. I use React, Node.js, and MongoDB daily.";

    fn scorer() -> MatchScorer<'static> {
        MatchScorer::new(Lexicon::builtin())
    }

    #[test]
    fn blend_weights_sum_to_one() {
        assert!((DEFAULT_BLEND.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn full_coverage_resume_scores_excellent() {
        let result = calculate_match_score(JD_FULLSTACK, RESUME_FULLSTACK);

        assert_eq!(result.skills_score, 100);
        assert!(result.score > 80, "score was {}", result.score);
        assert!(result.summary.starts_with("Excellent match"));
        assert_eq!(result.missing_keywords, Vec::<String>::new());

        let mut strong = result.strong_matches.clone();
        strong.sort();
        assert_eq!(strong, vec!["Mongodb", "Node", "React"]);
    }

    #[test]
    fn unrelated_resume_scores_low_with_missing_keywords() {
        let result = calculate_match_score(
            "Senior role requiring Kubernetes and GraphQL",
            "Unrelated marketing copywriter with no technical background",
        );

        assert_eq!(result.skills_score, 0);
        assert!(result.score < 30, "score was {}", result.score);
        assert!(result.strong_matches.is_empty());
        assert!(result.missing_keywords.contains(&"Kubernetes".to_string()));
        assert!(result.missing_keywords.contains(&"Graphql".to_string()));
        assert!(result.summary.starts_with("Low match"));
    }

    #[test]
    fn empty_inputs_yield_zero_with_unavailable_summary() {
        for (jd, resume) in [("", RESUME_FULLSTACK), (JD_FULLSTACK, ""), ("", "")] {
            let result = calculate_match_score(jd, resume);
            assert_eq!(result.score, 0);
            assert_eq!(result.skills_score, 0);
            assert_eq!(result.experience_score, 0);
            assert_eq!(result.summary, "Resume content not accessible or empty.");
            assert!(result.strong_matches.is_empty());
            assert!(result.missing_keywords.is_empty());
        }
    }

    #[test]
    fn resume_with_no_usable_tokens_is_reported_distinctly() {
        let result = calculate_match_score(JD_FULLSTACK, "a ! the ??");
        assert_eq!(result.score, 0);
        assert_eq!(result.summary, "Resume is empty.");
    }

    #[test]
    fn job_description_without_signal_does_not_panic() {
        // Non-empty jd that tokenizes to nothing: zero similarity, zero
        // coverage, empty evidence lists.
        let result = calculate_match_score("the team with experience", RESUME_FULLSTACK);
        assert_eq!(result.score, 0);
        assert!(result.strong_matches.is_empty());
        assert!(result.missing_keywords.is_empty());
        assert!(result.summary.starts_with("Low match"));
    }

    #[test]
    fn scoring_is_idempotent_without_jitter() {
        let first = calculate_match_score(JD_FULLSTACK, RESUME_FULLSTACK);
        let second = calculate_match_score(JD_FULLSTACK, RESUME_FULLSTACK);
        assert_eq!(first, second);
    }

    #[test]
    fn scores_stay_within_bounds() {
        let pairs = [
            (JD_FULLSTACK, RESUME_FULLSTACK),
            (JD_FULLSTACK, "React developer"),
            ("Kubernetes GraphQL Rust", "Python Django"),
            ("plain prose with no recognized stack", "other plain prose"),
        ];
        for (jd, resume) in pairs {
            let result = calculate_match_score(jd, resume);
            assert!(result.score <= 100);
            assert!(result.skills_score <= 100);
            assert!(result.experience_score <= 100);
        }
    }

    #[test]
    fn strong_and_missing_partition_the_jd_skills() {
        let result = calculate_match_score(
            "Needs React, Node.js, Kubernetes and GraphQL expertise",
            "Shipped React and Node.js products",
        );

        let strong: Vec<String> = result
            .strong_matches
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        let missing: Vec<String> = result
            .missing_keywords
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        for skill in &strong {
            assert!(!missing.contains(skill), "{skill} in both lists");
        }

        let mut union: Vec<String> = strong.into_iter().chain(missing).collect();
        union.sort();
        assert_eq!(union, vec!["graphql", "kubernetes", "node", "react"]);
    }

    #[test]
    fn fuller_skill_coverage_never_scores_lower() {
        let jd = "Building services with React, Node.js and MongoDB.";
        let all_three =
            calculate_match_score(jd, "Engineer building services with React, Node.js and MongoDB.");
        let only_one = calculate_match_score(jd, "Engineer building services with React.");

        assert!(all_three.skills_score >= only_one.skills_score);
        assert_eq!(all_three.skills_score, 100);
        assert_eq!(only_one.skills_score, 33);
    }

    #[test]
    fn evidence_lists_are_capped() {
        let jd = "javascript typescript python java rust ruby php swift kotlin scala sql kafka";
        let result = calculate_match_score(jd, "Marketing copywriter portfolio");

        assert_eq!(result.missing_keywords.len(), 10);
        assert!(result.strong_matches.is_empty());
        assert_eq!(result.skills_score, 0);
    }

    #[test]
    fn seeded_jitter_is_reproducible_and_bounded() {
        let base = calculate_match_score(JD_FULLSTACK, "React developer shipping products");

        let config = ScoringConfig {
            jitter_max: 3.0,
            ..ScoringConfig::default()
        };
        let scorer = MatchScorer::with_config(Lexicon::builtin(), config);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let jittered_a = scorer.calculate_match_score_with_rng(
            JD_FULLSTACK,
            "React developer shipping products",
            &mut rng_a,
        );
        let jittered_b = scorer.calculate_match_score_with_rng(
            JD_FULLSTACK,
            "React developer shipping products",
            &mut rng_b,
        );

        assert_eq!(jittered_a, jittered_b);
        assert!(jittered_a.score >= base.score);
        assert!(jittered_a.score <= base.score.saturating_add(3));
    }

    #[test]
    fn zero_jitter_config_never_draws_randomness() {
        let scorer = scorer();
        let mut rng = StdRng::seed_from_u64(7);
        let with_rng =
            scorer.calculate_match_score_with_rng(JD_FULLSTACK, RESUME_FULLSTACK, &mut rng);
        let without = scorer.calculate_match_score(JD_FULLSTACK, RESUME_FULLSTACK);
        assert_eq!(with_rng, without);
    }

    #[test]
    fn summary_thresholds_are_fixed_constants() {
        let scorer = scorer();
        assert!(scorer.summary_for(0).starts_with("Low match"));
        assert!(scorer.summary_for(49).starts_with("Low match"));
        assert!(scorer.summary_for(50).starts_with("Good match"));
        assert!(scorer.summary_for(79).starts_with("Good match"));
        assert!(scorer.summary_for(80).starts_with("Excellent match"));
        assert!(scorer.summary_for(100).starts_with("Excellent match"));
    }

    #[test]
    fn final_score_blends_similarity_and_coverage() {
        let result = calculate_match_score(
            "Platform role using Kubernetes, Terraform and AWS",
            "Operated AWS infrastructure and Terraform modules in production",
        );

        let expected =
            0.6 * f64::from(result.experience_score) + 0.4 * f64::from(result.skills_score);
        assert!(
            (f64::from(result.score) - expected).abs() <= 1.0,
            "score {} vs blended components {expected}",
            result.score
        );
    }

    #[test]
    fn custom_lexicon_drives_skill_detection() {
        let lexicon = Lexicon::from_json_str(
            r#"{
                "skills": ["cobol"],
                "synonyms": {"cbl": "cobol"},
                "stopWords": ["mainframe"]
            }"#,
        )
        .unwrap();
        let scorer = MatchScorer::new(&lexicon);

        let result = scorer.calculate_match_score(
            "Maintaining cobol batch jobs",
            "Twenty mainframe seasons writing cbl programs",
        );

        assert_eq!(result.skills_score, 100);
        assert_eq!(result.strong_matches, vec!["Cobol"]);
    }

    #[test]
    fn result_serializes_with_camel_case_fields() {
        let result = calculate_match_score(JD_FULLSTACK, RESUME_FULLSTACK);
        let json = serde_json::to_string(&result).unwrap();

        for field in [
            "\"score\"",
            "\"skillsScore\"",
            "\"experienceScore\"",
            "\"strongMatches\"",
            "\"missingKeywords\"",
            "\"summary\"",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }

        let parsed: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
