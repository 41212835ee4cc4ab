//! Corpus totals, difference distribution and per-tier totals.

use serde::{Deserialize, Serialize};

use crate::corpus::TextSample;
use crate::cost::token_cost;
use crate::prelude::*;

/// How many of the most common differences to report.
const DISTRIBUTION_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageTotals {
    pub tokens: u64,
    pub words: u64,
    pub average_tokens: f64,
    /// `None` when the language has no words at all.
    pub tokens_per_word: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceStats {
    pub mean: f64,
    /// Sample standard deviation (n−1); 0 for a single sample.
    pub std_dev: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputOutputCost {
    pub input: f64,
    pub output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTotals {
    pub tier: String,
    pub english_total: InputOutputCost,
    pub icelandic_total: InputOutputCost,
    pub english_per_sentence: InputOutputCost,
    pub icelandic_per_sentence: InputOutputCost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceCount {
    pub difference: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub sample_count: usize,
    pub english: LanguageTotals,
    pub icelandic: LanguageTotals,
    pub difference: DifferenceStats,
    pub percentage_increase: Option<f64>,
    pub inversions: usize,
    pub largest_difference: TextSample,
    pub smallest_difference: TextSample,
    pub distribution: Vec<DifferenceCount>,
    pub tiers: Vec<TierTotals>,
}

pub fn summarize(corpus: &Corpus, tiers: &[PricingTier]) -> Result<CorpusSummary> {
    let samples = corpus.samples();
    if samples.is_empty() {
        return Err(Error::EmptyInput);
    }

    let english = totals(samples, |s| (s.english_tokens, s.english_words()));
    let icelandic = totals(samples, |s| (s.icelandic_tokens, s.icelandic_words()));

    let percentage_increase = (english.tokens > 0).then(|| {
        (icelandic.tokens as f64 - english.tokens as f64) / english.tokens as f64 * 100.0
    });

    // First occurrence wins ties in both directions.
    let mut largest = &samples[0];
    let mut smallest = &samples[0];
    for sample in &samples[1..] {
        if sample.increase() > largest.increase() {
            largest = sample;
        }
        if sample.increase() < smallest.increase() {
            smallest = sample;
        }
    }

    let tiers = tiers
        .iter()
        .map(|tier| tier_totals(tier, &english, &icelandic))
        .collect();

    Ok(CorpusSummary {
        sample_count: samples.len(),
        difference: difference_stats(samples),
        percentage_increase,
        inversions: corpus.inversions(),
        largest_difference: largest.clone(),
        smallest_difference: smallest.clone(),
        distribution: distribution(samples),
        english,
        icelandic,
        tiers,
    })
}

fn totals<F>(samples: &[TextSample], pick: F) -> LanguageTotals
where
    F: Fn(&TextSample) -> (u32, usize),
{
    let (tokens, words) = samples.iter().map(pick).fold((0u64, 0u64), |(t, w), (tokens, words)| {
        (t + u64::from(tokens), w + words as u64)
    });

    LanguageTotals {
        tokens,
        words,
        average_tokens: tokens as f64 / samples.len() as f64,
        tokens_per_word: (words > 0).then(|| tokens as f64 / words as f64),
    }
}

fn difference_stats(samples: &[TextSample]) -> DifferenceStats {
    let mut increases: Vec<i64> = samples.iter().map(|s| s.increase()).collect();
    let n = increases.len() as f64;
    let mean = increases.iter().map(|&d| d as f64).sum::<f64>() / n;
    let std_dev = if increases.len() > 1 {
        let squares: f64 = increases.iter().map(|&d| (d as f64 - mean).powi(2)).sum();
        (squares / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    increases.sort_unstable();
    let mid = increases.len() / 2;
    let median = if increases.len() % 2 == 0 {
        (increases[mid - 1] as f64 + increases[mid] as f64) / 2.0
    } else {
        increases[mid] as f64
    };

    DifferenceStats {
        mean,
        std_dev,
        median,
        min: increases[0],
        max: increases[increases.len() - 1],
    }
}

fn distribution(samples: &[TextSample]) -> Vec<DifferenceCount> {
    // Kept in first-seen order so equal counts rank by first occurrence.
    let mut ranked: Vec<DifferenceCount> = Vec::new();
    for sample in samples {
        let difference = sample.increase();
        match ranked.iter_mut().find(|d| d.difference == difference) {
            Some(entry) => entry.count += 1,
            None => ranked.push(DifferenceCount {
                difference,
                count: 1,
            }),
        }
    }

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(DISTRIBUTION_SIZE);
    ranked.sort_by_key(|d| d.difference);
    ranked
}

fn tier_totals(
    tier: &PricingTier,
    english: &LanguageTotals,
    icelandic: &LanguageTotals,
) -> TierTotals {
    let pricing = &tier.pricing;
    let cost = |tokens: f64| InputOutputCost {
        input: token_cost(tokens, pricing.input_price_per_million),
        output: token_cost(tokens, pricing.output_price_per_million),
    };

    TierTotals {
        tier: tier.name.clone(),
        english_total: cost(english.tokens as f64),
        icelandic_total: cost(icelandic.tokens as f64),
        english_per_sentence: cost(english.average_tokens),
        icelandic_per_sentence: cost(icelandic.average_tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            TextSample::new("The house is big.", "Húsið er stórt.", 5, 9),
            TextSample::new("I read the book.", "Ég las bókina.", 5, 11),
            TextSample::new("Good morning.", "Góðan daginn.", 3, 7),
            TextSample::new("Thank you very much.", "Takk kærlega fyrir.", 5, 9),
        ])
    }

    #[test]
    fn summarizes_totals_and_differences() {
        let summary = summarize(&corpus(), &PricingTier::defaults()).unwrap();

        assert_eq!(summary.sample_count, 4);
        assert_eq!(summary.english.tokens, 18);
        assert_eq!(summary.icelandic.tokens, 36);
        assert_eq!(summary.english.words, 14);
        assert_eq!(summary.icelandic.words, 11);
        assert_eq!(summary.english.average_tokens, 4.5);
        assert_eq!(summary.percentage_increase, Some(100.0));

        assert_eq!(summary.difference.mean, 4.5);
        assert!((summary.difference.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(summary.difference.median, 4.0);
        assert_eq!(summary.difference.min, 4);
        assert_eq!(summary.difference.max, 6);
        assert_eq!(summary.inversions, 0);

        assert_eq!(summary.largest_difference.english_text, "I read the book.");
        assert_eq!(summary.smallest_difference.english_text, "The house is big.");
    }

    #[test]
    fn distribution_lists_most_common_first_then_sorts() {
        let summary = summarize(&corpus(), &[]).unwrap();
        assert_eq!(
            summary.distribution,
            vec![
                DifferenceCount {
                    difference: 4,
                    count: 3
                },
                DifferenceCount {
                    difference: 6,
                    count: 1
                },
            ]
        );

        let spread: Vec<_> = (0..8).map(|d| TextSample::new("e", "i", 1, 1 + d)).collect();
        let summary = summarize(&Corpus::new(spread), &[]).unwrap();
        let kept: Vec<_> = summary.distribution.iter().map(|d| d.difference).collect();
        assert_eq!(kept, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn distribution_ties_keep_first_seen_differences() {
        let descending: Vec<_> = [9, 8, 7, 6, 5, 4]
            .iter()
            .map(|&d| TextSample::new("e", "i", 1, 1 + d))
            .collect();
        let summary = summarize(&Corpus::new(descending), &[]).unwrap();
        let kept: Vec<_> = summary.distribution.iter().map(|d| d.difference).collect();
        assert_eq!(kept, [5, 6, 7, 8, 9]);
    }

    #[test]
    fn single_sample_has_no_spread() {
        let corpus = Corpus::new(vec![TextSample::new("a", "b", 17, 46)]);
        let summary = summarize(&corpus, &[]).unwrap();
        assert_eq!(summary.difference.std_dev, 0.0);
        assert_eq!(summary.difference.mean, 29.0);
    }

    #[test]
    fn tier_totals_use_per_million_prices() {
        let summary = summarize(&corpus(), &[PricingTier::standard()]).unwrap();
        let tier = &summary.tiers[0];

        assert_eq!(tier.tier, "standard");
        assert!((tier.english_total.input - 18.0 * 2.5 / 1e6).abs() < 1e-15);
        assert!((tier.icelandic_total.output - 36.0 * 10.0 / 1e6).abs() < 1e-15);
        assert!((tier.english_per_sentence.input - 4.5 * 2.5 / 1e6).abs() < 1e-15);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        assert!(matches!(
            summarize(&Corpus::default(), &[]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn no_english_tokens_means_no_percentage() {
        let corpus = Corpus::new(vec![TextSample::new("", "Halló", 0, 2)]);
        let summary = summarize(&corpus, &[]).unwrap();
        assert_eq!(summary.percentage_increase, None);
        assert_eq!(summary.english.tokens_per_word, None);
        assert_eq!(summary.icelandic.tokens_per_word, Some(2.0));
    }
}
