//! End-to-end training and inference scenarios.

use std::io::Write;

use sentira::sentiment::{
    SentimentLabel, SentimentService, TrainerConfig, TrainingPipeline,
};

fn write_separable_corpus(repeats: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..repeats {
        writeln!(file, "4,{i}a,Mon Apr 06,NO_QUERY,alice,I love this!").unwrap();
        writeln!(file, "0,{i}b,Mon Apr 06,NO_QUERY,bob,I hate this!").unwrap();
        writeln!(file, "4,{i}c,Mon Apr 06,NO_QUERY,carol,This is great").unwrap();
        writeln!(file, "0,{i}d,Mon Apr 06,NO_QUERY,dave,This is terrible").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_train_then_predict_separable_corpus() {
    let corpus = write_separable_corpus(15);
    let model_dir = tempfile::tempdir().unwrap();

    let report = TrainingPipeline::default()
        .run(corpus.path(), model_dir.path())
        .unwrap();
    assert_eq!(report.examples, 60);

    // A separate "process": load the persisted pair from scratch.
    let service = SentimentService::load(model_dir.path()).unwrap();
    assert_eq!(service.predict("I love this"), SentimentLabel::Positive);
    assert_eq!(service.predict("I hate this"), SentimentLabel::Negative);
}

#[test]
fn test_predictions_are_deterministic_across_calls() {
    let corpus = write_separable_corpus(10);
    let model_dir = tempfile::tempdir().unwrap();

    TrainingPipeline::default()
        .run(corpus.path(), model_dir.path())
        .unwrap();
    let service = SentimentService::load(model_dir.path()).unwrap();

    for text in ["I love this", "I hate this", "meh whatever", ""] {
        let first = service.predict(text);
        for _ in 0..5 {
            assert_eq!(service.predict(text), first, "unstable label for {text:?}");
        }
    }
}

#[test]
fn test_label_closure_over_arbitrary_inputs() {
    let corpus = write_separable_corpus(10);
    let model_dir = tempfile::tempdir().unwrap();

    TrainingPipeline::default()
        .run(corpus.path(), model_dir.path())
        .unwrap();
    let service = SentimentService::load(model_dir.path()).unwrap();

    for text in [
        "",
        "1234567890",
        "!!!???",
        "émojis 🎉 only",
        "words the model never saw during training at all",
    ] {
        let label = service.predict(text);
        assert!(
            matches!(label, SentimentLabel::Positive | SentimentLabel::Negative),
            "unexpected label for {text:?}"
        );
    }
}

#[test]
fn test_retraining_overwrites_previous_artifacts() {
    let corpus = write_separable_corpus(10);
    let model_dir = tempfile::tempdir().unwrap();

    let first = TrainingPipeline::default()
        .run(corpus.path(), model_dir.path())
        .unwrap();
    let second = TrainingPipeline::default()
        .run(corpus.path(), model_dir.path())
        .unwrap();
    assert_ne!(first.pair_id, second.pair_id);

    // The directory still holds exactly one loadable pair.
    SentimentService::load(model_dir.path()).unwrap();
}

#[test]
fn test_custom_config_flows_through() {
    let corpus = write_separable_corpus(10);
    let model_dir = tempfile::tempdir().unwrap();

    let config = TrainerConfig {
        max_features: 8,
        test_fraction: 0.1,
        ..TrainerConfig::default()
    };
    let report = TrainingPipeline::new(config)
        .run(corpus.path(), model_dir.path())
        .unwrap();
    assert!(report.vocabulary_size <= 8);

    let service = SentimentService::load(model_dir.path()).unwrap();
    assert_eq!(service.dimension(), report.vocabulary_size);
}
