//! Side-by-side token counts for one Icelandic text and its English translation.

use serde::{Deserialize, Serialize};
use tokenizer::TokenCounter;

use crate::cost::token_cost;
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCost {
    pub tier: String,
    pub english_input: f64,
    pub icelandic_input: f64,
}

/// Token counts for one user-supplied Icelandic text and its English translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextComparison {
    pub encoding: String,
    pub icelandic_text: String,
    pub english_text: String,
    pub icelandic_tokens: usize,
    pub english_tokens: usize,
    pub difference: i64,
    /// Zero when the English text has no tokens.
    pub percentage: f64,
    pub costs: Vec<TextCost>,
}

pub fn compare_texts<C: TokenCounter + ?Sized>(
    icelandic: &str,
    english: &str,
    counter: &C,
    tiers: &[PricingTier],
) -> TextComparison {
    let icelandic_tokens = counter.count_tokens(icelandic);
    let english_tokens = counter.count_tokens(english);
    let difference = icelandic_tokens as i64 - english_tokens as i64;
    let percentage = if english_tokens > 0 {
        difference as f64 / english_tokens as f64 * 100.0
    } else {
        0.0
    };

    let costs = tiers
        .iter()
        .map(|tier| TextCost {
            tier: tier.name.clone(),
            english_input: token_cost(english_tokens as f64, tier.pricing.input_price_per_million),
            icelandic_input: token_cost(
                icelandic_tokens as f64,
                tier.pricing.input_price_per_million,
            ),
        })
        .collect();

    TextComparison {
        encoding: counter.encoding_name().to_string(),
        icelandic_text: icelandic.to_string(),
        english_text: english.to_string(),
        icelandic_tokens,
        english_tokens,
        difference,
        percentage,
        costs,
    }
}
