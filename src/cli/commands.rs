//! Command implementations for the Sentira CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::collect::CommentCollector;
use crate::error::{Result, SentiraError};
use crate::sentiment::{SentimentService, TrainerConfig, TrainingPipeline};
use crate::source::{self, YouTubeCommentSource};
use crate::stats::CommentStats;
use crate::store::{CommentStore, DatasetStore, SqliteCommentStore};

/// Execute a CLI command.
pub fn execute_command(args: SentiraArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Collect(collect_args) => collect(collect_args.clone(), &args),
        Command::Stats(stats_args) => stats(stats_args.clone(), &args),
        Command::History(history_args) => history(history_args.clone(), &args),
    }
}

/// Train the sentiment model.
fn train(args: TrainArgs, cli_args: &SentiraArgs) -> Result<()> {
    let config = TrainerConfig {
        max_features: args.max_features,
        test_fraction: args.test_fraction,
        epochs: args.epochs,
        learning_rate: args.learning_rate,
        l2: args.l2,
    };

    let report = TrainingPipeline::new(config).run(&args.corpus, &args.model_dir)?;
    output_result("Training complete", &report, cli_args)
}

/// Score texts with a trained model.
fn predict(args: PredictArgs, cli_args: &SentiraArgs) -> Result<()> {
    let service = SentimentService::load(&args.model_dir)?;

    let predictions = args
        .text
        .iter()
        .map(|text| Prediction {
            label: service.predict(text),
            probability: service.score(text),
            text: text.clone(),
        })
        .collect();

    output_result("", &PredictionResults { predictions }, cli_args)
}

/// Fetch, classify, and persist a video's comments.
fn collect(args: CollectArgs, cli_args: &SentiraArgs) -> Result<()> {
    let video_id = source::extract_video_id(&args.video).ok_or_else(|| {
        SentiraError::invalid_operation(format!("{:?} is not a video id or URL", args.video))
    })?;

    let service = SentimentService::load(&args.model_dir)?;
    let youtube = YouTubeCommentSource::new(&args.api_key)?.with_max_results(args.max_results);
    let datasets = DatasetStore::new(&args.data_dir)?;

    let database = match &args.database {
        Some(path) => Some(SqliteCommentStore::open(path)?),
        None => None,
    };
    let database_ref = database.as_ref().map(|store| store as &dyn CommentStore);

    let collector = CommentCollector::new(&youtube, &service, &datasets, database_ref);
    let summary = collector.collect(&video_id)?;
    output_result("Collection complete", &summary, cli_args)
}

/// Show statistics over the aggregated dataset.
fn stats(args: StatsArgs, cli_args: &SentiraArgs) -> Result<()> {
    let datasets = DatasetStore::new(&args.data_dir)?;
    let records = datasets.read_master()?;
    let stats = CommentStats::compute(&records);
    output_result("Master dataset statistics", &stats, cli_args)
}

/// Show the collection-history log.
fn history(args: HistoryArgs, cli_args: &SentiraArgs) -> Result<()> {
    let datasets = DatasetStore::new(&args.data_dir)?;
    let entries = datasets.read_history()?;
    output_result("Collection history", &HistoryList { entries }, cli_args)
}
