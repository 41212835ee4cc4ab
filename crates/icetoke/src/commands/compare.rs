use std::io::Write;

use super::Context;
use crate::args::CompareOptions;
use crate::compare::{compare_texts, TextComparison};
use crate::output::{usd, CommandResult};
use crate::prelude::*;

impl CommandResult for TextComparison {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(w, "Encoding: {}", self.encoding)?;
        writeln!(w, "  Icelandic: {:>6} tokens  {}", self.icelandic_tokens, self.icelandic_text)?;
        writeln!(w, "  English:   {:>6} tokens  {}", self.english_tokens, self.english_text)?;
        writeln!(
            w,
            "Difference: {:+} tokens ({:+.1}%)",
            self.difference, self.percentage
        )?;
        for cost in &self.costs {
            writeln!(
                w,
                "  {:<10} input cost: English {}, Icelandic {}",
                cost.tier,
                usd(cost.english_input),
                usd(cost.icelandic_input)
            )?;
        }
        Ok(())
    }
}

pub fn run(context: &Context, options: CompareOptions) -> Result<()> {
    let tokenizer = context.tokenizer()?;
    let comparison = compare_texts(
        &options.icelandic,
        &options.english,
        &tokenizer,
        &context.config.tiers(),
    );

    context.print(&comparison)
}
