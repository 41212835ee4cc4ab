use std::io::Write;

use serde::Serialize;

use super::Context;
use crate::args::EstimateOptions;
use crate::estimate::{estimate_document, DocumentEstimate, DocumentPreset};
use crate::output::{percentage, usd, CommandResult};
use crate::prelude::*;
use crate::summary::summarize;

#[derive(Serialize)]
pub struct EstimateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<DocumentPreset>,
    pub tier: String,
    #[serde(flatten)]
    pub estimate: DocumentEstimate,
}

impl CommandResult for EstimateReport {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        let e = &self.estimate;
        match self.preset {
            Some(preset) => writeln!(w, "Document: {preset:?} ({} words)", e.words)?,
            None => writeln!(w, "Document: {} words", e.words)?,
        }
        writeln!(w, "Tier: {} (input pricing)", self.tier)?;
        writeln!(
            w,
            "  English:   {:>10.0} tokens  {}",
            e.english.tokens,
            usd(e.english.input_cost)
        )?;
        writeln!(
            w,
            "  Icelandic: {:>10.0} tokens  {}",
            e.icelandic.tokens,
            usd(e.icelandic.input_cost)
        )?;
        writeln!(
            w,
            "Icelandic needs {:.0} more tokens of context and costs {} more ({})",
            e.additional_tokens,
            usd(e.additional_cost),
            percentage(e.percentage_increase)
        )?;
        Ok(())
    }
}

pub fn run(context: &Context, options: EstimateOptions) -> Result<()> {
    let words = match (options.words, options.preset) {
        (Some(words), _) => words,
        (None, Some(preset)) => preset.words(),
        (None, None) => {
            return Err(Error::InvalidArgument(
                "either a word count or a preset is required".into(),
            ))
        }
    };

    let tier = context.tier(&options.tier)?;
    let corpus = context.load_corpus()?;
    let summary = summarize(&corpus, &[])?;
    let estimate = estimate_document(words, &summary, tier.pricing.input_price_per_million)?;

    context.print(&EstimateReport {
        preset: options.words.is_none().then_some(options.preset).flatten(),
        tier: tier.name,
        estimate,
    })
}
