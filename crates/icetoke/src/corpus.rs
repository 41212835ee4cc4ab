//! Parallel English/Icelandic samples and their CSV representation.

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokenizer::TokenCounter;

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Icelandic,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("English"),
            Language::Icelandic => f.write_str("Icelandic"),
        }
    }
}

/// One sentence pair with precomputed token counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSample {
    #[serde(alias = "english")]
    pub english_text: String,
    #[serde(alias = "icelandic")]
    pub icelandic_text: String,
    pub english_tokens: u32,
    pub icelandic_tokens: u32,
}

impl TextSample {
    pub fn new(
        english_text: &str,
        icelandic_text: &str,
        english_tokens: u32,
        icelandic_tokens: u32,
    ) -> Self {
        Self {
            english_text: english_text.into(),
            icelandic_text: icelandic_text.into(),
            english_tokens,
            icelandic_tokens,
        }
    }

    /// Icelandic tokens minus English tokens.
    pub fn increase(&self) -> i64 {
        i64::from(self.icelandic_tokens) - i64::from(self.english_tokens)
    }

    pub fn is_inversion(&self) -> bool {
        self.icelandic_tokens < self.english_tokens
    }

    pub fn english_words(&self) -> usize {
        self.english_text.split_whitespace().count()
    }

    pub fn icelandic_words(&self) -> usize {
        self.icelandic_text.split_whitespace().count()
    }
}

/// An untokenized sentence pair, as found in the raw corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPair {
    #[serde(alias = "english_text")]
    pub english: String,
    #[serde(alias = "icelandic_text")]
    pub icelandic: String,
}

impl RawPair {
    pub fn tokenize<C: TokenCounter + ?Sized>(&self, counter: &C) -> TextSample {
        TextSample {
            english_text: self.english.clone(),
            icelandic_text: self.icelandic.clone(),
            english_tokens: saturating_u32(counter.count_tokens(&self.english)),
            icelandic_tokens: saturating_u32(counter.count_tokens(&self.icelandic)),
        }
    }
}

fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

pub fn tokenize_pairs<C: TokenCounter + ?Sized>(pairs: &[RawPair], counter: &C) -> Vec<TextSample> {
    pairs.iter().map(|pair| pair.tokenize(counter)).collect()
}

/// Row layout written by [`Corpus::write_csv`].
#[derive(Serialize)]
struct TokenizedRecord<'a> {
    english: &'a str,
    icelandic: &'a str,
    english_tokens: u32,
    icelandic_tokens: u32,
    token_difference: i64,
}

/// Immutable set of samples every computation reads from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    samples: Vec<TextSample>,
}

impl Corpus {
    pub fn new(samples: Vec<TextSample>) -> Self {
        for (index, sample) in samples.iter().enumerate() {
            if sample.is_inversion() {
                log::warn!(
                    "row {}: Icelandic uses fewer tokens than English ({} < {})",
                    index + 1,
                    sample.icelandic_tokens,
                    sample.english_tokens
                );
            }
        }
        Self { samples }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading corpus from {}", path.display());
        let file = std::fs::File::open(path)?;
        let corpus = Self::from_reader(file)?;
        log::info!("loaded {} samples from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv_reader(reader);
        require_columns(
            &mut reader,
            &[
                &["english_text", "english"],
                &["icelandic_text", "icelandic"],
                &["english_tokens"],
                &["icelandic_tokens"],
            ],
        )?;

        let mut samples = Vec::new();
        for (index, record) in reader.deserialize::<TextSample>().enumerate() {
            let sample = record.map_err(|e| Error::CorpusLoad {
                row: index + 1,
                reason: e.to_string(),
            })?;
            samples.push(sample);
        }

        Ok(Self::new(samples))
    }

    pub fn samples(&self) -> &[TextSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn inversions(&self) -> usize {
        self.samples.iter().filter(|s| s.is_inversion()).count()
    }

    /// Writes the corpus with an extra `token_difference` column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for sample in &self.samples {
            writer.serialize(TokenizedRecord {
                english: &sample.english_text,
                icelandic: &sample.icelandic_text,
                english_tokens: sample.english_tokens,
                icelandic_tokens: sample.icelandic_tokens,
                token_difference: sample.increase(),
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_csv(std::io::BufWriter::new(file))?;
        log::info!("saved {} samples to {}", self.len(), path.as_ref().display());
        Ok(())
    }
}

pub fn read_pairs<R: Read>(reader: R) -> Result<Vec<RawPair>> {
    let mut reader = csv_reader(reader);
    require_columns(
        &mut reader,
        &[&["english", "english_text"], &["icelandic", "icelandic_text"]],
    )?;

    reader
        .deserialize::<RawPair>()
        .enumerate()
        .map(|(index, record)| {
            record.map_err(|e| Error::CorpusLoad {
                row: index + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

pub fn read_pairs_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawPair>> {
    let file = std::fs::File::open(path.as_ref())?;
    let pairs = read_pairs(file)?;
    log::info!("read {} sentence pairs from {}", pairs.len(), path.as_ref().display());
    Ok(pairs)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

/// Each entry lists the accepted names for one required column.
fn require_columns<R: Read>(reader: &mut csv::Reader<R>, columns: &[&[&str]]) -> Result<()> {
    let headers = reader.headers().map_err(|e| Error::CorpusLoad {
        row: 0,
        reason: e.to_string(),
    })?;

    for names in columns {
        if !names.iter().any(|name| headers.iter().any(|h| h == *name)) {
            return Err(Error::CorpusLoad {
                row: 0,
                reason: format!("missing column `{}`", names[0]),
            });
        }
    }

    Ok(())
}
