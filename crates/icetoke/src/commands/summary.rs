use std::io::Write;

use serde::Serialize;

use super::Context;
use crate::output::{percentage, usd, CommandResult};
use crate::prelude::*;
use crate::summary::{summarize, CorpusSummary, LanguageTotals};

#[derive(Serialize)]
pub struct SummaryReport {
    pub corpus: String,
    #[serde(flatten)]
    pub summary: CorpusSummary,
}

fn write_totals<W: Write>(w: &mut W, language: Language, totals: &LanguageTotals) -> Result<()> {
    let per_word = match totals.tokens_per_word {
        Some(ratio) => format!("{ratio:.2}"),
        None => "n/a".to_string(),
    };
    writeln!(
        w,
        "  {:<10} {:>8} tokens {:>8} words  {:>7.2} tokens/sentence  {} tokens/word",
        language.to_string(),
        totals.tokens,
        totals.words,
        totals.average_tokens,
        per_word
    )?;
    Ok(())
}

fn write_sample<W: Write>(w: &mut W, title: &str, sample: &TextSample) -> Result<()> {
    writeln!(w, "{title} ({:+} tokens):", sample.increase())?;
    writeln!(w, "  EN [{}]: {}", sample.english_tokens, sample.english_text)?;
    writeln!(w, "  IS [{}]: {}", sample.icelandic_tokens, sample.icelandic_text)?;
    Ok(())
}

impl CommandResult for SummaryReport {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        let s = &self.summary;
        writeln!(w, "Corpus: {} ({} sentence pairs)", self.corpus, s.sample_count)?;
        writeln!(w)?;
        writeln!(w, "Totals:")?;
        write_totals(&mut w, Language::English, &s.english)?;
        write_totals(&mut w, Language::Icelandic, &s.icelandic)?;
        writeln!(w, "  Icelandic uses {} more tokens", percentage(s.percentage_increase))?;
        writeln!(w)?;
        writeln!(
            w,
            "Difference per sentence: mean {:.2}, std dev {:.2}, median {:.1}, min {}, max {}",
            s.difference.mean,
            s.difference.std_dev,
            s.difference.median,
            s.difference.min,
            s.difference.max
        )?;
        if s.inversions > 0 {
            writeln!(w, "Sentences where Icelandic is shorter: {}", s.inversions)?;
        }
        writeln!(w)?;
        write_sample(&mut w, "Largest difference", &s.largest_difference)?;
        write_sample(&mut w, "Smallest difference", &s.smallest_difference)?;
        writeln!(w)?;
        writeln!(w, "Most common differences:")?;
        for entry in &s.distribution {
            writeln!(w, "  {:+4} tokens: {} sentences", entry.difference, entry.count)?;
        }

        for tier in &s.tiers {
            writeln!(w)?;
            writeln!(w, "Cost ({}):", tier.tier)?;
            writeln!(
                w,
                "  Corpus as input:  English {}, Icelandic {}",
                usd(tier.english_total.input),
                usd(tier.icelandic_total.input)
            )?;
            writeln!(
                w,
                "  Corpus as output: English {}, Icelandic {}",
                usd(tier.english_total.output),
                usd(tier.icelandic_total.output)
            )?;
            writeln!(
                w,
                "  Per sentence:     English {} / {}, Icelandic {} / {}",
                usd(tier.english_per_sentence.input),
                usd(tier.english_per_sentence.output),
                usd(tier.icelandic_per_sentence.input),
                usd(tier.icelandic_per_sentence.output)
            )?;
        }
        Ok(())
    }
}

pub fn run(context: &Context) -> Result<()> {
    let corpus = context.load_corpus()?;
    let summary = summarize(&corpus, &context.config.tiers())?;

    context.print(&SummaryReport {
        corpus: context.corpus_path().to_string(),
        summary,
    })
}
