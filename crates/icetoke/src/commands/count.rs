use std::io::{Read, Write};

use serde::Serialize;
use tokenizer::TokenCounter;

use super::Context;
use crate::args::CountOptions;
use crate::output::CommandResult;
use crate::prelude::*;

#[derive(Debug, Serialize)]
pub struct TokenCount {
    pub encoding: String,
    pub tokens: usize,
    pub words: usize,
    pub characters: usize,
}

impl TokenCount {
    pub fn new<C: TokenCounter + ?Sized>(text: &str, counter: &C) -> Self {
        Self {
            encoding: counter.encoding_name().to_string(),
            tokens: counter.count_tokens(text),
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

impl CommandResult for TokenCount {
    fn print_raw<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(
            w,
            "{} tokens ({}), {} words, {} characters",
            self.tokens, self.encoding, self.words, self.characters
        )?;
        Ok(())
    }
}

pub fn run(context: &Context, options: CountOptions) -> Result<()> {
    let text = match options.text {
        Some(text) => text,
        None => {
            log::debug!("reading text from stdin");
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let tokenizer = context.tokenizer()?;
    context.print(&TokenCount::new(&text, &tokenizer))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count_tokens(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }

        fn encoding_name(&self) -> &str {
            "words"
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        let count = TokenCount::new("Góðan daginn", &WordCounter);
        assert_eq!(count.tokens, 2);
        assert_eq!(count.words, 2);
        assert_eq!(count.characters, 12);

        let mut buffer = Vec::new();
        count.print_raw(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "2 tokens (words), 2 words, 12 characters\n"
        );
    }
}
