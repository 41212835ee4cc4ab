use std::io::Write;

use serde::Serialize;
use tokenizer::TokenCounter;

use super::Context;
use crate::args::TokenizeOptions;
use crate::corpus::read_pairs_from_path;
use crate::output::CommandResult;
use crate::prelude::*;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
pub struct TokenizeReport {
    pub input: String,
    pub destination: String,
    pub encoding: String,
    pub samples: usize,
    pub english_tokens: u64,
    pub icelandic_tokens: u64,
    pub inversions: usize,
}

impl CommandResult for TokenizeReport {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(
            w,
            "Tokenized {} sentence pairs from {} with {}",
            self.samples, self.input, self.encoding
        )?;
        writeln!(
            w,
            "  English: {} tokens, Icelandic: {} tokens",
            self.english_tokens, self.icelandic_tokens
        )?;
        if self.inversions > 0 {
            writeln!(w, "  {} pairs where Icelandic is shorter", self.inversions)?;
        }
        writeln!(w, "Saved to {}", self.destination)?;
        Ok(())
    }
}

pub fn run(context: &Context, options: TokenizeOptions) -> Result<()> {
    let tokenizer = context.tokenizer()?;
    let pairs = read_pairs_from_path(&options.input)?;

    let mut progress = Progress::new(pairs.len() as u64, context.globals.silent)?;
    progress.message("counting tokens");

    let mut samples = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        samples.push(pair.tokenize(&tokenizer));
        progress.inc();
    }

    let corpus = Corpus::new(samples);
    if let Err(e) = corpus.save(&options.destination) {
        progress.err("unable to save corpus");
        return Err(e);
    }
    progress.ok();

    let (english_tokens, icelandic_tokens) =
        corpus.samples().iter().fold((0u64, 0u64), |(en, is), s| {
            (en + u64::from(s.english_tokens), is + u64::from(s.icelandic_tokens))
        });

    context.print(&TokenizeReport {
        input: options.input.display().to_string(),
        destination: options.destination.display().to_string(),
        encoding: tokenizer.encoding_name().to_string(),
        samples: corpus.len(),
        english_tokens,
        icelandic_tokens,
        inversions: corpus.inversions(),
    })
}
