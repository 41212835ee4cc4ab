use std::path::{Path, PathBuf};

use icetoke::args::{Args, Command, Globals, StatsOptions, TokenizeOptions};
use icetoke::cost::{estimate_costs, ScenarioCosts};
use icetoke::output::Output;
use icetoke::prelude::*;
use icetoke::stats::aggregate;
use icetoke::summary::summarize;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

fn globals(dir: &Path, corpus: Option<&Path>) -> Globals {
    Globals {
        corpus: corpus.map(|p| p.display().to_string()),
        config_file: dir.join("missing.toml").display().to_string(),
        model: None,
        output: Output::Json,
        silent: true,
    }
}

#[test]
fn statistics_over_fixture_corpus() {
    let corpus = Corpus::from_path(fixture("tokenized.csv")).unwrap();
    assert_eq!(corpus.len(), 8);
    assert_eq!(corpus.inversions(), 0);

    let stats = aggregate(corpus.samples()).unwrap();
    assert_eq!(stats.sample_count, 8);
    assert_close(stats.mean_increase, 4.0, 1e-12);
    assert_close(stats.variance, 10.0 / 7.0, 1e-12);
    assert_close(stats.ci_low, 3.171_749, 1e-5);
    assert_close(stats.ci_high, 4.828_251, 1e-5);
    assert!(stats.ci_low <= stats.mean_increase && stats.mean_increase <= stats.ci_high);

    let labels: Vec<&str> = stats.bucket_ratios.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["Short", "Medium", "Long", "Very Long"]);
    assert!(stats.bucket_ratios.iter().all(|b| b.sample_count == 2));
    assert_close(stats.bucket_ratios[0].ratio.unwrap(), 11.0 / 4.0, 1e-12);
    assert_close(stats.bucket_ratios[3].ratio.unwrap(), 22.0 / 12.0, 1e-12);
}

#[test]
fn summary_and_costs_over_fixture_corpus() {
    let corpus = Corpus::from_path(fixture("tokenized.csv")).unwrap();
    let summary = summarize(&corpus, &PricingTier::defaults()).unwrap();

    assert_eq!(summary.english.tokens, 36);
    assert_eq!(summary.icelandic.tokens, 68);
    assert_eq!(summary.difference.median, 4.0);
    assert_eq!(summary.largest_difference.english_text, "Where is the train station?");
    assert_eq!(summary.smallest_difference.english_text, "Yes, please.");
    assert_eq!(summary.distribution[0].difference, 2);
    assert!(summary
        .distribution
        .iter()
        .any(|d| d.difference == 4 && d.count == 4));

    let pricing = PricingConfig::new(2.50, 10.00);
    let estimates = estimate_costs(14, 40, &pricing, &UsageScenario::defaults(), 30).unwrap();
    let rows = ScenarioCosts::from_estimates(&estimates);
    assert_eq!(rows.len(), 3);
    assert_close(rows[0].english, 0.1785, 1e-12);
    assert_close(rows[0].icelandic, 0.51, 1e-12);
    assert_close(rows[2].icelandic, 51.0, 1e-9);
}

#[test]
fn malformed_corpus_names_the_row() {
    match Corpus::from_path(fixture("bad_row.csv")) {
        Err(Error::CorpusLoad { row, .. }) => assert_eq!(row, 2),
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(matches!(
        Corpus::from_path(fixture("does_not_exist.csv")),
        Err(Error::Io(_))
    ));
}

#[test]
fn tokenize_writes_a_loadable_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("tokenized.csv");

    icetoke::commands::run(Args {
        globals: globals(dir.path(), None),
        command: Command::Tokenize(TokenizeOptions {
            input: fixture("raw_pairs.csv"),
            destination: destination.clone(),
        }),
    })
    .unwrap();

    let corpus = Corpus::from_path(&destination).unwrap();
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.samples()[0].english_text, "Good morning.");
    assert!(corpus
        .samples()
        .iter()
        .all(|s| s.english_tokens > 0 && s.icelandic_tokens > 0));

    // The written corpus feeds straight into the statistics command.
    icetoke::commands::run(Args {
        globals: globals(dir.path(), Some(&destination)),
        command: Command::Stats(StatsOptions {
            thresholds: Some(vec![3, 5]),
        }),
    })
    .unwrap();
}

#[test]
fn empty_corpus_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "english,icelandic,english_tokens,icelandic_tokens\n").unwrap();

    let result = icetoke::commands::run(Args {
        globals: globals(dir.path(), Some(&path)),
        command: Command::Stats(StatsOptions { thresholds: None }),
    });
    assert!(matches!(result, Err(Error::EmptyInput)));
}
