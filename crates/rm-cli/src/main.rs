use std::path::{Path, PathBuf};

use clap::Parser;
use dotenvy::dotenv;
use thiserror::Error;
use tracing::info;

use rm_core::{Lexicon, LexiconError, MatchScorer, ScoringConfig};

#[derive(Debug, Parser)]
#[command(
    name = "rm-score",
    about = "Score an extracted resume text against a job description"
)]
struct Cli {
    /// Job description text file (description and requirements concatenated)
    #[arg(long, value_name = "FILE")]
    job_description: PathBuf,

    /// Extracted plain-text resume file. An empty file is scored as an
    /// inaccessible resume, not treated as an error.
    #[arg(long, value_name = "FILE")]
    resume: PathBuf,

    /// Custom lexicon JSON (skills / synonyms / stopWords)
    #[arg(long, value_name = "FILE", env = "RM_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Upper bound of random jitter added to the final score. Zero keeps
    /// scoring deterministic.
    #[arg(long, env = "RM_JITTER_MAX", default_value_t = 0.0)]
    jitter: f64,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run() -> Result<(), CliError> {
    dotenv().ok();
    rm_core::logging::init("rm-score");

    let cli = Cli::parse();
    let jd_text = read_text(&cli.job_description)?;
    let resume_text = read_text(&cli.resume)?;

    let custom_lexicon;
    let lexicon = match &cli.lexicon {
        Some(path) => {
            custom_lexicon = Lexicon::from_json_file(path)?;
            &custom_lexicon
        }
        None => Lexicon::builtin(),
    };

    let mut config = ScoringConfig::from_env();
    config.jitter_max = cli.jitter;

    let scorer = MatchScorer::with_config(lexicon, config);
    let result = scorer.calculate_match_score(&jd_text, &resume_text);

    info!(
        score = result.score,
        skills_score = result.skills_score,
        experience_score = result.experience_score,
        "resume scored"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        tracing::error!(error = %err, "rm-score failed");
        eprintln!("rm-score: {err}");
        std::process::exit(1);
    }
}
