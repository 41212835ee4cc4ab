use std::io::Write;

use serde::Serialize;

use super::Context;
use crate::args::StatsOptions;
use crate::output::CommandResult;
use crate::prelude::*;
use crate::stats::{aggregate_with, BucketBound};

#[derive(Serialize)]
pub struct StatsReport {
    pub corpus: String,
    pub statistics: TokenStatistics,
}

impl CommandResult for StatsReport {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        let s = &self.statistics;
        writeln!(w, "Corpus: {} ({} samples)", self.corpus, s.sample_count)?;
        writeln!(
            w,
            "Mean increase: {:.2} tokens (95% CI: {:.2} - {:.2}, normal approximation)",
            s.mean_increase, s.ci_low, s.ci_high
        )?;
        writeln!(w, "Standard deviation: {:.2}", s.std_dev)?;
        writeln!(w, "Variance: {:.2}", s.variance)?;
        writeln!(w)?;
        writeln!(w, "Token ratio by length:")?;
        for bucket in &s.bucket_ratios {
            match bucket.ratio {
                Some(ratio) => writeln!(
                    w,
                    "  {:<12} {:.3}x ({:+.0}%)  {} samples",
                    bucket.label,
                    ratio,
                    (ratio - 1.0) * 100.0,
                    bucket.sample_count
                )?,
                None => writeln!(
                    w,
                    "  {:<12} n/a  {} samples",
                    bucket.label, bucket.sample_count
                )?,
            }
        }
        Ok(())
    }
}

/// Labels fixed thresholds as `≤N`, with everything above the last one as `>N`.
fn threshold_scheme(thresholds: &[u32]) -> BucketScheme {
    let bounds = thresholds
        .iter()
        .map(|&max| BucketBound {
            label: format!("≤{max}"),
            max_english_tokens: max,
        })
        .collect();
    let overflow_label = match thresholds.last() {
        Some(max) => format!(">{max}"),
        None => "all".to_string(),
    };
    BucketScheme::Thresholds {
        bounds,
        overflow_label,
    }
}

pub fn run(context: &Context, options: StatsOptions) -> Result<()> {
    let scheme = match options.thresholds {
        Some(thresholds) => threshold_scheme(&thresholds),
        None => context.config.buckets(),
    };

    let corpus = context.load_corpus()?;
    let statistics = aggregate_with(corpus.samples(), &scheme)?;

    context.print(&StatsReport {
        corpus: context.corpus_path().to_string(),
        statistics,
    })
}
