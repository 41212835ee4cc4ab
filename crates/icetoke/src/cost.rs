//! Cost model: token counts in, currency out.
//!
//! Every function here is plain IEEE double arithmetic evaluated in a fixed order, so the
//! reference figures (14 tokens at $2.50/$10.00 per million with a 4x output multiplier cost
//! $0.000035 + $0.00056 per message) are reproduced exactly.

use serde::{Deserialize, Serialize};

use crate::corpus::Language;
use crate::prelude::*;

pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;
pub const DEFAULT_DAYS_PER_MONTH: u32 = 30;
pub const DEFAULT_OUTPUT_MULTIPLIER: f64 = 4.0;

fn default_output_multiplier() -> f64 {
    DEFAULT_OUTPUT_MULTIPLIER
}

/// Per-million-token prices plus the expected output/input length ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub input_price_per_million: f64,
    pub output_price_per_million: f64,
    #[serde(default = "default_output_multiplier")]
    pub output_multiplier: f64,
}

impl PricingConfig {
    pub fn new(input_price_per_million: f64, output_price_per_million: f64) -> Self {
        Self {
            input_price_per_million,
            output_price_per_million,
            output_multiplier: DEFAULT_OUTPUT_MULTIPLIER,
        }
    }

    pub fn with_output_multiplier(mut self, output_multiplier: f64) -> Self {
        self.output_multiplier = output_multiplier;
        self
    }

    /// Prices must be finite and positive, the multiplier finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let prices = [
            ("input price", self.input_price_per_million),
            ("output price", self.output_price_per_million),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "{name} per million must be a positive number, got {value}"
                )));
            }
        }

        if !self.output_multiplier.is_finite() || self.output_multiplier < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "output multiplier must be zero or positive, got {}",
                self.output_multiplier
            )));
        }

        Ok(())
    }
}

/// A named point-in-time price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    #[serde(flatten)]
    pub pricing: PricingConfig,
}

impl PricingTier {
    pub fn new(name: &str, pricing: PricingConfig) -> Self {
        Self {
            name: name.into(),
            pricing,
        }
    }

    /// GPT-4o standard API pricing.
    pub fn standard() -> Self {
        Self::new("standard", PricingConfig::new(2.50, 10.00))
    }

    /// GPT-4o Batch API pricing.
    pub fn batch() -> Self {
        Self::new("batch", PricingConfig::new(1.25, 5.00))
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::standard(), Self::batch()]
    }

    pub fn find<'a>(tiers: &'a [PricingTier], name: &str) -> Result<&'a PricingTier> {
        tiers
            .iter()
            .find(|tier| tier.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownTier(name.to_string()))
    }
}

/// A usage tier: how many messages of typical length are sent each day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageScenario {
    pub label: String,
    pub messages_per_day: u32,
}

impl UsageScenario {
    pub fn new(label: &str, messages_per_day: u32) -> Self {
        Self {
            label: label.into(),
            messages_per_day,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.messages_per_day == 0 {
            return Err(Error::InvalidArgument(format!(
                "scenario `{}` must send at least one message per day",
                self.label
            )));
        }
        Ok(())
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Personal", 10),
            Self::new("Small business", 100),
            Self::new("Enterprise", 1000),
        ]
    }
}

/// Cost of a single message and its generated reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageCost {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub scenario: UsageScenario,
    pub language: Language,
    pub monthly_cost: f64,
}

/// English and Icelandic monthly costs for one scenario, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCosts {
    pub scenario: UsageScenario,
    pub english: f64,
    pub icelandic: f64,
    pub difference: f64,
    pub percentage_increase: Option<f64>,
}

/// Plain per-million conversion, no output share.
pub fn token_cost(tokens: f64, price_per_million: f64) -> f64 {
    tokens * price_per_million / TOKENS_PER_MILLION
}

pub fn message_cost(tokens: f64, pricing: &PricingConfig) -> Result<MessageCost> {
    if !tokens.is_finite() || tokens < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "token count must be zero or positive, got {tokens}"
        )));
    }
    pricing.validate()?;

    let input_cost = token_cost(tokens, pricing.input_price_per_million);
    let output_cost = tokens * pricing.output_multiplier * pricing.output_price_per_million
        / TOKENS_PER_MILLION;

    Ok(MessageCost {
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    })
}

pub fn monthly_cost(
    tokens: u64,
    pricing: &PricingConfig,
    messages_per_day: u32,
    days_per_month: u32,
) -> Result<f64> {
    if days_per_month == 0 {
        return Err(Error::InvalidArgument(
            "days per month must be greater than zero".into(),
        ));
    }

    let per_message = message_cost(tokens as f64, pricing)?;

    Ok(per_message.total_cost * messages_per_day as f64 * days_per_month as f64)
}

/// One English and one Icelandic estimate per scenario, in scenario order.
pub fn estimate_costs(
    english_tokens: u64,
    icelandic_tokens: u64,
    pricing: &PricingConfig,
    scenarios: &[UsageScenario],
    days_per_month: u32,
) -> Result<Vec<CostEstimate>> {
    let mut estimates = Vec::with_capacity(scenarios.len() * 2);

    for scenario in scenarios {
        scenario.validate()?;
        for (language, tokens) in [
            (Language::English, english_tokens),
            (Language::Icelandic, icelandic_tokens),
        ] {
            let monthly_cost = monthly_cost(
                tokens,
                pricing,
                scenario.messages_per_day,
                days_per_month,
            )?;
            estimates.push(CostEstimate {
                scenario: scenario.clone(),
                language,
                monthly_cost,
            });
        }
    }

    log::debug!("computed {} cost estimates", estimates.len());

    Ok(estimates)
}

impl ScenarioCosts {
    /// Pairs up the output of [`estimate_costs`] by scenario label.
    pub fn from_estimates(estimates: &[CostEstimate]) -> Vec<Self> {
        let mut rows: Vec<Self> = Vec::new();

        for estimate in estimates {
            let index = match rows
                .iter()
                .position(|row| row.scenario.label == estimate.scenario.label)
            {
                Some(index) => index,
                None => {
                    rows.push(Self {
                        scenario: estimate.scenario.clone(),
                        english: 0.0,
                        icelandic: 0.0,
                        difference: 0.0,
                        percentage_increase: None,
                    });
                    rows.len() - 1
                }
            };

            match estimate.language {
                Language::English => rows[index].english = estimate.monthly_cost,
                Language::Icelandic => rows[index].icelandic = estimate.monthly_cost,
            }
        }

        for row in rows.iter_mut() {
            row.difference = row.icelandic - row.english;
            row.percentage_increase = if row.english > 0.0 {
                Some(row.difference / row.english * 100.0)
            } else {
                None
            };
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    fn reference() -> PricingConfig {
        PricingConfig::new(2.50, 10.00).with_output_multiplier(4.0)
    }

    #[test]
    fn message_cost_matches_reference_figures() {
        let cost = message_cost(14.0, &reference()).unwrap();
        assert_close(cost.input_cost, 0.000035);
        assert_close(cost.output_cost, 0.00056);
        assert_close(cost.total_cost, 0.000595);
    }

    #[test]
    fn monthly_cost_matches_reference_figures() {
        assert_close(monthly_cost(14, &reference(), 10, 30).unwrap(), 0.1785);
        assert_close(monthly_cost(40, &reference(), 10, 30).unwrap(), 0.51);
    }

    #[test]
    fn zero_tokens_cost_nothing() {
        for (messages, days) in [(0, 1), (10, 30), (1000, 31)] {
            assert_eq!(monthly_cost(0, &reference(), messages, days).unwrap(), 0.0);
        }
    }

    #[test]
    fn monthly_cost_is_monotonic() {
        let pricing = reference();
        let mut previous = 0.0;
        for tokens in 0..200 {
            let cost = monthly_cost(tokens, &pricing, 10, 30).unwrap();
            assert!(cost >= previous);
            previous = cost;
        }

        let mut previous = 0.0;
        for messages in 0..200 {
            let cost = monthly_cost(40, &pricing, messages, 30).unwrap();
            assert!(cost >= previous);
            previous = cost;
        }

        let mut previous = 0.0;
        for days in 1..=31 {
            let cost = monthly_cost(40, &pricing, 10, days).unwrap();
            assert!(cost >= previous);
            previous = cost;
        }
    }

    #[test]
    fn rejects_zero_days() {
        let err = monthly_cost(14, &reference(), 10, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn rejects_negative_or_nan_tokens() {
        assert!(matches!(
            message_cost(-1.0, &reference()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            message_cost(f64::NAN, &reference()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_invalid_pricing() {
        let bad = [
            PricingConfig::new(0.0, 10.0),
            PricingConfig::new(2.5, -1.0),
            PricingConfig::new(f64::INFINITY, 10.0),
            PricingConfig::new(2.5, 10.0).with_output_multiplier(-0.5),
        ];
        for pricing in bad {
            assert!(matches!(
                monthly_cost(14, &pricing, 10, 30),
                Err(Error::InvalidArgument(_))
            ));
        }

        // A zero multiplier means input-only pricing.
        let input_only = PricingConfig::new(2.5, 10.0).with_output_multiplier(0.0);
        assert_close(monthly_cost(14, &input_only, 10, 30).unwrap(), 0.0105);
    }

    #[test]
    fn estimates_pair_languages_per_scenario() {
        let scenarios = vec![UsageScenario::new("Personal", 10), UsageScenario::new("Team", 100)];
        let estimates = estimate_costs(14, 40, &reference(), &scenarios, 30).unwrap();

        assert_eq!(estimates.len(), 4);
        assert_eq!(estimates[0].language, Language::English);
        assert_eq!(estimates[1].language, Language::Icelandic);
        assert_eq!(estimates[2].scenario.label, "Team");
        assert_close(estimates[0].monthly_cost, 0.1785);
        assert_close(estimates[1].monthly_cost, 0.51);

        let rows = ScenarioCosts::from_estimates(&estimates);
        assert_eq!(rows.len(), 2);
        assert_close(rows[0].difference, 0.51 - 0.1785);
        let pct = rows[0].percentage_increase.unwrap();
        assert!((pct - 185.714_285_714).abs() < 1e-6);
    }

    #[test]
    fn estimates_reject_idle_scenarios() {
        let scenarios = vec![UsageScenario::new("Idle", 0)];
        assert!(matches!(
            estimate_costs(14, 40, &reference(), &scenarios, 30),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn finds_tiers_case_insensitively() {
        let tiers = PricingTier::defaults();
        let batch = PricingTier::find(&tiers, "Batch").unwrap();
        assert_eq!(batch.pricing.input_price_per_million, 1.25);
        assert!(matches!(
            PricingTier::find(&tiers, "flex"),
            Err(Error::UnknownTier(_))
        ));
    }
}
