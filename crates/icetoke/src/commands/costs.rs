use std::io::Write;

use serde::Serialize;

use super::Context;
use crate::args::CostsOptions;
use crate::cost::{estimate_costs, message_cost, MessageCost, ScenarioCosts};
use crate::output::{percentage, usd, CommandResult};
use crate::prelude::*;

#[derive(Serialize)]
pub struct CostsReport {
    pub tier: String,
    pub pricing: PricingConfig,
    pub days_per_month: u32,
    pub english_tokens: u64,
    pub icelandic_tokens: u64,
    pub english_message: MessageCost,
    pub icelandic_message: MessageCost,
    pub scenarios: Vec<ScenarioCosts>,
}

impl CommandResult for CostsReport {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(
            w,
            "Tier: {} (${:.2} input / ${:.2} output per million tokens, output {}x input)",
            self.tier,
            self.pricing.input_price_per_million,
            self.pricing.output_price_per_million,
            self.pricing.output_multiplier
        )?;
        writeln!(
            w,
            "Typical message: {} English tokens, {} Icelandic tokens",
            self.english_tokens, self.icelandic_tokens
        )?;
        writeln!(
            w,
            "Per message: English {}, Icelandic {}",
            usd(self.english_message.total_cost),
            usd(self.icelandic_message.total_cost)
        )?;
        writeln!(w)?;
        writeln!(w, "Monthly cost ({} days):", self.days_per_month)?;
        writeln!(
            w,
            "  {:<16} {:>10} {:>12} {:>12} {:>12} {:>10}",
            "Scenario", "Msgs/day", "English", "Icelandic", "Difference", "Increase"
        )?;
        for row in &self.scenarios {
            writeln!(
                w,
                "  {:<16} {:>10} {:>12} {:>12} {:>12} {:>10}",
                row.scenario.label,
                row.scenario.messages_per_day,
                usd(row.english),
                usd(row.icelandic),
                usd(row.difference),
                percentage(row.percentage_increase)
            )?;
        }
        Ok(())
    }
}

/// Mean token count of a typical message, rounded to whole tokens.
fn mean_tokens(corpus: &Corpus, language: Language) -> u64 {
    let total: u64 = corpus
        .samples()
        .iter()
        .map(|s| match language {
            Language::English => u64::from(s.english_tokens),
            Language::Icelandic => u64::from(s.icelandic_tokens),
        })
        .sum();
    (total as f64 / corpus.len() as f64).round() as u64
}

pub fn run(context: &Context, options: CostsOptions) -> Result<()> {
    let tier = context.tier(&options.tier)?;
    let pricing = match options.multiplier {
        Some(multiplier) => tier.pricing.with_output_multiplier(multiplier),
        None => tier.pricing,
    };
    let days_per_month = options
        .days
        .unwrap_or_else(|| context.config.days_per_month());

    let (english_tokens, icelandic_tokens) =
        match (options.english_tokens, options.icelandic_tokens) {
            (Some(english), Some(icelandic)) => (english, icelandic),
            (english, icelandic) => {
                let corpus = context.load_corpus()?;
                if corpus.is_empty() {
                    return Err(Error::EmptyInput);
                }
                (
                    english.unwrap_or_else(|| mean_tokens(&corpus, Language::English)),
                    icelandic.unwrap_or_else(|| mean_tokens(&corpus, Language::Icelandic)),
                )
            }
        };

    let estimates = estimate_costs(
        english_tokens,
        icelandic_tokens,
        &pricing,
        &context.config.scenarios(),
        days_per_month,
    )?;

    context.print(&CostsReport {
        tier: tier.name,
        english_message: message_cost(english_tokens as f64, &pricing)?,
        icelandic_message: message_cost(icelandic_tokens as f64, &pricing)?,
        pricing,
        days_per_month,
        english_tokens,
        icelandic_tokens,
        scenarios: ScenarioCosts::from_estimates(&estimates),
    })
}
