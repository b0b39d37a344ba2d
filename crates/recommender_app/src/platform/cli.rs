use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Ask the assessment recommendation service for tests matching a hiring prompt.
///
/// Without PROMPT an interactive session starts: every line is submitted,
/// `:k N` changes the number of recommendations and `:q` quits.
#[derive(Parser, Debug)]
#[command(name = "recommender", version)]
pub struct Cli {
    /// Hiring requirement, e.g. "sales executive with good reasoning".
    pub prompt: Option<String>,

    /// Number of recommendations to request (clamped to 1..=20).
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    pub top_k: Option<i64>,

    /// Recommendation endpoint; overrides the config file.
    #[arg(long, env = "RECOMMENDER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// RON config file. Defaults to ./recommender.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overall request timeout in seconds; overrides the config file.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the result set as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}
