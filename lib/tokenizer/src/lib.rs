//! Token counting against a pinned BPE encoding.
//!
//! The counts produced here are only reproducible for a fixed encoding, so every
//! [`DefaultTokenizer`] carries the [`Encoding`] it was built from and callers are
//! expected to report it next to any number derived from it.
//!
//! ```no_run
//! use tokenizer::{DefaultTokenizer, TokenCounter};
//!
//! let tokenizer = DefaultTokenizer::for_model("gpt-4o").unwrap();
//! let tokens = tokenizer.count_tokens("Góðan daginn");
//! println!("{} tokens ({})", tokens, tokenizer.encoding());
//! ```

use std::fmt;
use std::str::FromStr;

use tiktoken_rs::CoreBPE;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no pinned encoding for model `{0}`")]
    UnknownModel(String),
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
    #[error("unable to load the {encoding} encoding: {message}")]
    Load { encoding: Encoding, message: String },
}

/// BPE encodings this crate knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// GPT-4o family.
    O200kBase,
    /// GPT-4 and GPT-3.5.
    Cl100kBase,
}

impl Encoding {
    /// Maps a model identifier to its encoding, the way `tiktoken.encoding_for_model` does for
    /// the models this tool cares about.
    pub fn for_model(model: &str) -> Result<Self, Error> {
        let m = model.trim().to_lowercase();
        if m.starts_with("gpt-4o") || m.starts_with("o1") || m.starts_with("chatgpt-4o") {
            Ok(Encoding::O200kBase)
        } else if m.starts_with("gpt-4") || m.starts_with("gpt-3.5") {
            Ok(Encoding::Cl100kBase)
        } else {
            Err(Error::UnknownModel(model.to_string()))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::O200kBase => "o200k_base",
            Encoding::Cl100kBase => "cl100k_base",
        }
    }

    fn load(&self) -> Result<CoreBPE, Error> {
        let bpe = match self {
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
        };

        bpe.map_err(|e| Error::Load {
            encoding: *self,
            message: e.to_string(),
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o200k_base" | "o200k" => Ok(Encoding::O200kBase),
            "cl100k_base" | "cl100k" => Ok(Encoding::Cl100kBase),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

/// Anything that can turn text into a token count.
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> usize;

    /// Identifier of the encoding behind the counts.
    fn encoding_name(&self) -> &str;
}

/// Tokenizer backed by one of the embedded tiktoken encodings.
pub struct DefaultTokenizer {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl DefaultTokenizer {
    /// Creates a new DefaultTokenizer for the given encoding.
    pub fn new(encoding: Encoding) -> Result<Self, Error> {
        log::debug!("loading {} encoding", encoding);
        Ok(Self {
            encoding,
            bpe: encoding.load()?,
        })
    }

    /// Creates a new DefaultTokenizer using the encoding pinned for `model`.
    pub fn for_model(model: &str) -> Result<Self, Error> {
        Self::new(Encoding::for_model(model)?)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Encodes `text` treating special-token markers as plain text.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_ordinary(text)
    }
}

impl TokenCounter for DefaultTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }

    fn encoding_name(&self) -> &str {
        self.encoding.name()
    }
}

impl fmt::Debug for DefaultTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultTokenizer")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_gpt_4o_to_o200k() {
        assert_eq!(Encoding::for_model("gpt-4o").unwrap(), Encoding::O200kBase);
        assert_eq!(Encoding::for_model("GPT-4o-mini").unwrap(), Encoding::O200kBase);
        assert_eq!(Encoding::for_model("gpt-4").unwrap(), Encoding::Cl100kBase);
        assert_eq!(Encoding::for_model("gpt-3.5-turbo").unwrap(), Encoding::Cl100kBase);
    }

    #[test]
    fn rejects_unknown_models() {
        let err = Encoding::for_model("llama-3").unwrap_err();
        assert!(matches!(err, Error::UnknownModel(ref m) if m == "llama-3"));
    }

    #[test]
    fn parses_encoding_names() {
        assert_eq!("o200k_base".parse::<Encoding>().unwrap(), Encoding::O200kBase);
        assert_eq!("cl100k".parse::<Encoding>().unwrap(), Encoding::Cl100kBase);
        assert!("p50k_base".parse::<Encoding>().is_err());
        assert_eq!(Encoding::O200kBase.to_string(), "o200k_base");
    }

    #[test]
    fn empty_text_has_no_tokens() {
        let tokenizer = DefaultTokenizer::new(Encoding::O200kBase).unwrap();
        assert_eq!(tokenizer.count_tokens(""), 0);
    }

    #[test]
    fn counts_match_encode_length() {
        let tokenizer = DefaultTokenizer::for_model("gpt-4o").unwrap();
        let text = "Hello, world!";
        let count = tokenizer.count_tokens(text);
        assert_eq!(count, tokenizer.encode(text).len());
        assert!(count > 0 && count < 10);
        assert_eq!(tokenizer.encoding_name(), "o200k_base");
    }
}
