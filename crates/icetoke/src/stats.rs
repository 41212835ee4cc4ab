//! Corpus-wide statistics on how many extra tokens Icelandic needs.
//!
//! The 95% confidence interval uses the normal approximation `mean ± 1.96·s/√n`. There is no
//! Student-t correction, so for small corpora the interval is narrower than a t-interval would be.

use serde::{Deserialize, Serialize};

use crate::corpus::TextSample;
use crate::prelude::*;

/// z-score of a two-sided 95% normal interval.
pub const Z_95: f64 = 1.96;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketBound {
    pub label: String,
    /// Inclusive upper limit on the sample's English token count.
    pub max_english_tokens: u32,
}

/// How samples are split into length buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BucketScheme {
    /// Equal-sized groups by English token rank, one per label.
    Quantile { labels: Vec<String> },
    /// Fixed upper bounds in increasing order; everything larger lands in `overflow_label`.
    Thresholds {
        bounds: Vec<BucketBound>,
        overflow_label: String,
    },
}

impl Default for BucketScheme {
    fn default() -> Self {
        Self::quartiles()
    }
}

impl BucketScheme {
    pub fn quartiles() -> Self {
        BucketScheme::Quantile {
            labels: ["Short", "Medium", "Long", "Very Long"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            BucketScheme::Quantile { labels } => {
                if labels.is_empty() {
                    return Err(Error::InvalidArgument(
                        "quantile buckets need at least one label".into(),
                    ));
                }
            }
            BucketScheme::Thresholds { bounds, .. } => {
                for pair in bounds.windows(2) {
                    if pair[0].max_english_tokens >= pair[1].max_english_tokens {
                        return Err(Error::InvalidArgument(format!(
                            "bucket bounds must increase: `{}` ({}) is not below `{}` ({})",
                            pair[0].label,
                            pair[0].max_english_tokens,
                            pair[1].label,
                            pair[1].max_english_tokens
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn labels(&self) -> Vec<String> {
        match self {
            BucketScheme::Quantile { labels } => labels.clone(),
            BucketScheme::Thresholds {
                bounds,
                overflow_label,
            } => bounds
                .iter()
                .map(|b| b.label.clone())
                .chain(std::iter::once(overflow_label.clone()))
                .collect(),
        }
    }

    /// Bucket index for every sample, in sample order.
    fn assign(&self, samples: &[TextSample]) -> Vec<usize> {
        match self {
            BucketScheme::Quantile { labels } => {
                let n = samples.len();
                let k = labels.len();
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by_key(|&i| samples[i].english_tokens);

                let mut buckets = vec![0; n];
                for (rank, &i) in order.iter().enumerate() {
                    buckets[i] = rank * k / n;
                }
                buckets
            }
            BucketScheme::Thresholds { bounds, .. } => samples
                .iter()
                .map(|s| {
                    bounds
                        .iter()
                        .position(|b| s.english_tokens <= b.max_english_tokens)
                        .unwrap_or(bounds.len())
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRatio {
    pub label: String,
    pub sample_count: usize,
    /// `mean(icelandic) / mean(english)`; `None` when the bucket is empty or has no English tokens.
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenStatistics {
    pub sample_count: usize,
    pub mean_increase: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub bucket_ratios: Vec<BucketRatio>,
}

/// [`aggregate_with`] using quartile buckets.
pub fn aggregate(samples: &[TextSample]) -> Result<TokenStatistics> {
    aggregate_with(samples, &BucketScheme::quartiles())
}

pub fn aggregate_with(samples: &[TextSample], scheme: &BucketScheme) -> Result<TokenStatistics> {
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }
    scheme.validate()?;

    let n = samples.len() as f64;
    let increases: Vec<f64> = samples.iter().map(|s| s.increase() as f64).collect();
    let mean_increase = increases.iter().sum::<f64>() / n;

    // n = 1 has no spread to estimate; report zero so the interval collapses onto the mean.
    let variance = if samples.len() > 1 {
        increases
            .iter()
            .map(|x| (x - mean_increase).powi(2))
            .sum::<f64>()
            / (n - 1.0)
    } else {
        0.0
    };
    let std_dev = variance.sqrt();
    let margin = Z_95 * std_dev / n.sqrt();

    let bucket_ratios = bucket_ratios(samples, scheme);

    log::debug!(
        "aggregated {} samples: mean increase {:.2} ± {:.2}",
        samples.len(),
        mean_increase,
        margin
    );

    Ok(TokenStatistics {
        sample_count: samples.len(),
        mean_increase,
        variance,
        std_dev,
        ci_low: mean_increase - margin,
        ci_high: mean_increase + margin,
        bucket_ratios,
    })
}

fn bucket_ratios(samples: &[TextSample], scheme: &BucketScheme) -> Vec<BucketRatio> {
    let labels = scheme.labels();
    let mut counts = vec![0usize; labels.len()];
    let mut english = vec![0u64; labels.len()];
    let mut icelandic = vec![0u64; labels.len()];

    for (sample, bucket) in samples.iter().zip(scheme.assign(samples)) {
        counts[bucket] += 1;
        english[bucket] += u64::from(sample.english_tokens);
        icelandic[bucket] += u64::from(sample.icelandic_tokens);
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let ratio = if counts[i] == 0 {
                None
            } else {
                let count = counts[i] as f64;
                let mean_english = english[i] as f64 / count;
                let mean_icelandic = icelandic[i] as f64 / count;
                (mean_english > 0.0).then(|| mean_icelandic / mean_english)
            };
            BucketRatio {
                label,
                sample_count: counts[i],
                ratio,
            }
        })
        .collect()
}
