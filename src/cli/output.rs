//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SentiraArgs};
use crate::collect::CollectionSummary;
use crate::error::Result;
use crate::sentiment::{SentimentLabel, TrainingReport};
use crate::stats::CommentStats;
use crate::store::HistoryEntry;

/// One scored text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Input text.
    pub text: String,
    /// Predicted label.
    pub label: SentimentLabel,
    /// Positive-class probability.
    pub probability: f64,
}

/// Result structure for the predict command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResults {
    /// Scored inputs, in argument order.
    pub predictions: Vec<Prediction>,
}

/// Result structure for the history command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryList {
    pub entries: Vec<HistoryEntry>,
}

/// Human rendering for a command result.
pub trait HumanRender {
    /// Print the result for a terminal reader.
    fn render_human(&self, verbosity: u8);
}

/// Output a result in the format selected on the command line.
pub fn output_result<T: Serialize + HumanRender>(
    message: &str,
    result: &T,
    args: &SentiraArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => {
            let rendered = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{rendered}");
        }
        OutputFormat::Human => {
            if args.verbosity() > 0 && !message.is_empty() {
                println!("{message}");
                println!();
            }
            result.render_human(args.verbosity());
        }
    }
    Ok(())
}

impl HumanRender for TrainingReport {
    fn render_human(&self, _verbosity: u8) {
        println!("Examples:        {}", self.examples);
        if self.skipped_rows > 0 {
            println!("Skipped rows:    {}", self.skipped_rows);
        }
        println!("Vocabulary:      {}", self.vocabulary_size);
        println!(
            "Split:           {} train / {} eval",
            self.train_examples, self.eval_examples
        );
        match self.accuracy {
            Some(accuracy) => println!("Accuracy:        {accuracy:.4}"),
            None => println!("Accuracy:        n/a (empty eval partition)"),
        }
        println!("Artifacts:       {}", self.vectorizer_path.display());
        println!("                 {}", self.classifier_path.display());
    }
}

impl HumanRender for PredictionResults {
    fn render_human(&self, verbosity: u8) {
        for prediction in &self.predictions {
            if verbosity > 1 {
                println!(
                    "{}  ({:.3})  {}",
                    prediction.label, prediction.probability, prediction.text
                );
            } else {
                println!("{}  {}", prediction.label, prediction.text);
            }
        }
    }
}

impl HumanRender for CollectionSummary {
    fn render_human(&self, _verbosity: u8) {
        println!("Video:           {}", self.video_id);
        println!("Total comments:  {}", self.total);
        println!("Positive:        {}", self.positive);
        println!("Negative:        {}", self.negative);
        if self.skipped > 0 {
            println!("Skipped:         {}", self.skipped);
        }
        match &self.dataset_path {
            Some(path) => println!("Dataset:         {}", path.display()),
            None => println!("Dataset:         none (no comments)"),
        }
        println!(
            "Database:        {}",
            if self.db_persisted { "persisted" } else { "skipped" }
        );
    }
}

impl HumanRender for CommentStats {
    fn render_human(&self, _verbosity: u8) {
        println!("Total comments:  {}", self.total);
        println!("Positive:        {}", self.positive);
        println!("Negative:        {}", self.negative);
        println!("Average length:  {:.1}", self.average_length);
        println!("Median length:   {:.1}", self.median_length);
        println!("Max length:      {}", self.max_length);
        println!("Min length:      {}", self.min_length);
    }
}

impl HumanRender for HistoryList {
    fn render_human(&self, _verbosity: u8) {
        if self.entries.is_empty() {
            println!("No collection runs recorded yet.");
            return;
        }
        for entry in &self.entries {
            println!(
                "{}  {}  total={} positive={} negative={}",
                entry.date.format("%Y-%m-%d %H:%M:%S"),
                entry.video_id,
                entry.total,
                entry.positive,
                entry.negative
            );
        }
    }
}
