//! Command line argument parsing for the Sentira CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sentira - sentiment insight engine for video comments
#[derive(Parser, Debug, Clone)]
#[command(name = "sentira")]
#[command(about = "Train, score, and collect video-comment sentiment")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentiraArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentiraArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the sentiment model from a labeled corpus
    Train(TrainArgs),

    /// Score one or more texts with a trained model
    Predict(PredictArgs),

    /// Fetch, classify, and persist the comments of a video
    Collect(CollectArgs),

    /// Show statistics over the aggregated dataset
    Stats(StatsArgs),

    /// Show the collection-history log
    History(HistoryArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the labeled corpus CSV
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Directory the artifact pair is written to
    #[arg(short, long, value_name = "DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Vocabulary size cap
    #[arg(long, default_value_t = 5000)]
    pub max_features: usize,

    /// Fraction of the corpus held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Training epochs
    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    /// SGD learning rate
    #[arg(long, default_value_t = 0.5)]
    pub learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, default_value_t = 1e-4)]
    pub l2: f64,
}

/// Arguments for scoring text
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Directory holding the artifact pair
    #[arg(short, long, value_name = "DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Texts to score
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

/// Arguments for collecting a video's comments
#[derive(Parser, Debug, Clone)]
pub struct CollectArgs {
    /// Video id or URL (watch, short, embed, and shorts URLs accepted)
    #[arg(value_name = "VIDEO")]
    pub video: String,

    /// Directory holding the artifact pair
    #[arg(short, long, value_name = "DIR", default_value = "model")]
    pub model_dir: PathBuf,

    /// Directory the CSV datasets are written to
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// SQLite database file; skipped when absent
    #[arg(long, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Cap on comments fetched per video
    #[arg(long, default_value_t = 500)]
    pub max_results: usize,
}

/// Arguments for dataset statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Directory holding the CSV datasets
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

/// Arguments for the collection-history log
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Directory holding the CSV datasets
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,
}
