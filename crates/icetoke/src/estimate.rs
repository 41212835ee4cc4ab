//! Word-count based estimates for whole documents, using the tokens-per-word ratios of the corpus.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cost::token_cost;
use crate::prelude::*;
use crate::summary::CorpusSummary;

pub const PAGES_PER_RESEARCH_PAPER: u64 = 20;
pub const WORDS_PER_PAGE: u64 = 500;

/// Common document lengths.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DocumentPreset {
    ShortEmail,
    BlogPost,
    AcademicPaper,
    ResearchPaper,
    PhdThesis,
    Novel,
}

impl DocumentPreset {
    pub fn words(&self) -> u64 {
        match self {
            DocumentPreset::ShortEmail => 100,
            DocumentPreset::BlogPost => 800,
            DocumentPreset::AcademicPaper => 5_000,
            DocumentPreset::ResearchPaper => PAGES_PER_RESEARCH_PAPER * WORDS_PER_PAGE,
            DocumentPreset::PhdThesis => 80_000,
            DocumentPreset::Novel => 90_000,
        }
    }
}

impl FromStr for DocumentPreset {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| Error::UnknownPreset(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanguageEstimate {
    pub tokens: f64,
    pub input_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEstimate {
    pub words: u64,
    pub english: LanguageEstimate,
    pub icelandic: LanguageEstimate,
    /// Extra Icelandic tokens, i.e. context window lost to the language.
    pub additional_tokens: f64,
    pub additional_cost: f64,
    pub percentage_increase: Option<f64>,
}

pub fn estimate_document(
    words: u64,
    summary: &CorpusSummary,
    price_per_million: f64,
) -> Result<DocumentEstimate> {
    if words == 0 {
        return Err(Error::InvalidArgument(
            "word count must be greater than zero".into(),
        ));
    }
    if !price_per_million.is_finite() || price_per_million <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "price per million must be a positive number, got {price_per_million}"
        )));
    }

    let (Some(english_ratio), Some(icelandic_ratio)) = (
        summary.english.tokens_per_word,
        summary.icelandic.tokens_per_word,
    ) else {
        return Err(Error::EmptyInput);
    };

    let estimate = |ratio: f64| {
        let tokens = words as f64 * ratio;
        LanguageEstimate {
            tokens,
            input_cost: token_cost(tokens, price_per_million),
        }
    };
    let english = estimate(english_ratio);
    let icelandic = estimate(icelandic_ratio);
    let additional_cost = icelandic.input_cost - english.input_cost;

    Ok(DocumentEstimate {
        words,
        additional_tokens: icelandic.tokens - english.tokens,
        additional_cost,
        percentage_increase: (english.input_cost > 0.0)
            .then(|| additional_cost / english.input_cost * 100.0),
        english,
        icelandic,
    })
}
