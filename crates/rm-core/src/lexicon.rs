use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

/// Curated skill vocabulary in canonical form. Tokens listed here receive the
/// vectorizer's skill boost and participate in keyword coverage.
///
/// Every entry must be reachable by the tokenizer: lowercase, no leading or
/// trailing characters outside `[a-z0-9+#]` (internal punctuation is fine,
/// which is how `c++`, `c#` and `ci/cd` stay addressable).
const SKILLS: &[&str] = &[
    // Languages
    "javascript",
    "typescript",
    "python",
    "java",
    "c#",
    "c++",
    "go",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "scala",
    "sql",
    // Frontend
    "react",
    "angular",
    "vue",
    "svelte",
    "next",
    "redux",
    "html",
    "css",
    "sass",
    "tailwind",
    // Backend frameworks
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "rails",
    "laravel",
    "fastapi",
    // API styles
    "graphql",
    "rest",
    "grpc",
    // Datastores and messaging
    "mongodb",
    "postgresql",
    "mysql",
    "redis",
    "elasticsearch",
    "sqlite",
    "kafka",
    "rabbitmq",
    // Cloud and ops
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "git",
    "linux",
    "ci/cd",
    // Data / ML
    "tensorflow",
    "pytorch",
    "pandas",
    "numpy",
    "spark",
    "hadoop",
    // Testing
    "jest",
    "cypress",
    "selenium",
    "pytest",
    "junit",
];

/// Surface form -> canonical token. Looked up on the whole trimmed fragment,
/// so compound names like `node.js` normalize as a unit rather than being
/// split into sub-tokens.
const SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("es6", "javascript"),
    ("ecmascript", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("python3", "python"),
    ("golang", "go"),
    ("csharp", "c#"),
    ("cpp", "c++"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("angularjs", "angular"),
    ("angular.js", "angular"),
    ("vuejs", "vue"),
    ("vue.js", "vue"),
    ("sveltejs", "svelte"),
    ("nextjs", "next"),
    ("next.js", "next"),
    ("node.js", "node"),
    ("nodejs", "node"),
    ("expressjs", "express"),
    ("express.js", "express"),
    ("ror", "rails"),
    ("scss", "sass"),
    ("tailwindcss", "tailwind"),
    ("mongo", "mongodb"),
    ("postgres", "postgresql"),
    ("mariadb", "mysql"),
    ("k8s", "kubernetes"),
    ("kube", "kubernetes"),
    ("github", "git"),
    ("gitlab", "git"),
    ("cicd", "ci/cd"),
    ("tf", "tensorflow"),
    ("torch", "pytorch"),
];

/// Tokens excluded from scoring: English function words plus recruiting
/// boilerplate that appears in nearly every job description and resume.
const STOP_WORDS: &[&str] = &[
    // Function words
    "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "been", "being", "below", "between", "both", "but", "by", "can", "could", "did",
    "do", "does", "down", "during", "each", "else", "few", "for", "from", "further", "had",
    "has", "have", "he", "her", "here", "hers", "him", "his", "how", "if", "in", "into", "is",
    "it", "its", "itself", "just", "may", "me", "might", "more", "most", "must", "my", "no",
    "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "us", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours",
    // Recruiting boilerplate
    "ability", "apply", "background", "benefits", "candidate", "candidates", "company", "daily",
    "development", "environment", "excellent", "experience", "experienced", "familiar",
    "familiarity", "good", "great", "ideal", "join", "junior", "knowledge", "looking",
    "opportunity", "plus", "position", "preferred", "proficiency", "proficient", "required",
    "requirements", "requiring", "responsibilities", "role", "seeking", "senior", "skill",
    "skills", "strong", "team", "understanding", "use", "using", "work", "working", "year",
    "years",
];

static BUILTIN: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(
        SKILLS.iter().map(|s| s.to_string()),
        SYNONYMS.iter().map(|(a, c)| (a.to_string(), c.to_string())),
        STOP_WORDS.iter().map(|s| s.to_string()),
    )
});

/// The static lookup tables the tokenizer and scorer depend on: skill
/// vocabulary, synonym table, and stop word set. Immutable after construction
/// and shared by reference, so concurrent scoring needs no locking.
#[derive(Debug, Clone)]
pub struct Lexicon {
    skills: HashSet<String>,
    synonyms: HashMap<String, String>,
    stop_words: HashSet<String>,
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lexicon JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lexicon defines no skills")]
    EmptySkills,
}

/// On-disk shape of a custom lexicon. Field names match the JSON surface used
/// by the rest of the platform.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LexiconFile {
    skills: Vec<String>,
    #[serde(default)]
    synonyms: HashMap<String, String>,
    #[serde(default)]
    stop_words: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from raw entries. All entries are lowercased so lookups
    /// against tokenizer output always compare canonical forms.
    pub fn new(
        skills: impl IntoIterator<Item = String>,
        synonyms: impl IntoIterator<Item = (String, String)>,
        stop_words: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            skills: skills.into_iter().map(|s| s.to_lowercase()).collect(),
            synonyms: synonyms
                .into_iter()
                .map(|(alias, canonical)| (alias.to_lowercase(), canonical.to_lowercase()))
                .collect(),
            stop_words: stop_words.into_iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// The curated default tables, built once per process.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Parse a custom lexicon from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(json)?;
        if file.skills.iter().all(|s| s.trim().is_empty()) {
            return Err(LexiconError::EmptySkills);
        }

        Ok(Self::new(
            file.skills.into_iter().filter(|s| !s.trim().is_empty()),
            file.synonyms,
            file.stop_words,
        ))
    }

    /// Load a custom lexicon from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Canonical form for a fragment, if the synonym table knows it.
    pub fn canonical(&self, fragment: &str) -> Option<&str> {
        self.synonyms.get(fragment).map(String::as_str)
    }

    pub fn is_skill(&self, token: &str) -> bool {
        self.skills.contains(token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}
