use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

use crate::estimate::DocumentPreset;
use crate::output::Output;

#[derive(Debug, clap::Args)]
pub struct Globals {
    /// Tokenized corpus CSV (english, icelandic, english_tokens, icelandic_tokens).
    #[clap(long, env = "ICETOKE_CORPUS", global = true)]
    pub corpus: Option<String>,

    /// Config file
    #[clap(
        long = "config",
        env = "ICETOKE_CONFIG_FILE",
        default_value = "~/.config/icetoke.toml",
        global = true
    )]
    pub config_file: String,

    /// Model whose tokenizer encoding is used for counting.
    #[clap(short, long, env = "ICETOKE_MODEL", global = true)]
    pub model: Option<String>,

    /// Output format.
    #[clap(
        short,
        long,
        env = "ICETOKE_OUTPUT",
        value_enum,
        default_value_t = Output::Raw,
        global = true
    )]
    pub output: Output,

    /// Don't show progress bars.
    #[clap(
        short,
        long,
        env = "ICETOKE_SILENT",
        action,
        default_value_t = false,
        global = true
    )]
    pub silent: bool,
}

#[derive(Debug, Parser)]
#[command(name = "icetoke")]
#[command(about = "Compare Icelandic and English token usage and what it costs")]
pub struct Args {
    #[clap(flatten)]
    pub globals: Globals,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mean token increase, 95% confidence interval and per-length ratios
    Stats(StatsOptions),
    /// Monthly cost per usage scenario for typical English and Icelandic messages
    Costs(CostsOptions),
    /// Corpus totals, extremes and difference distribution
    Summary,
    /// Estimate tokens and cost of a document from its word count
    Estimate(EstimateOptions),
    /// Compare an Icelandic text with its English translation
    Compare(CompareOptions),
    /// Count the tokens of a text
    Count(CountOptions),
    /// Count tokens for a raw sentence-pair CSV and write a tokenized corpus
    Tokenize(TokenizeOptions),
}

#[derive(Debug, clap::Args)]
pub struct StatsOptions {
    /// Fixed inclusive upper bounds on English tokens instead of quartiles (e.g. 10,20,40).
    #[clap(long, value_delimiter = ',')]
    pub thresholds: Option<Vec<u32>>,
}

#[derive(Debug, clap::Args)]
pub struct CostsOptions {
    /// Pricing tier to use.
    #[clap(short, long, env = "ICETOKE_TIER", default_value = "standard")]
    pub tier: String,

    /// Days per month.
    #[clap(long, env = "ICETOKE_DAYS_PER_MONTH")]
    pub days: Option<u32>,

    /// Output length as a multiple of the input length.
    #[clap(long)]
    pub multiplier: Option<f64>,

    /// Tokens of a typical English message (defaults to the corpus mean).
    #[clap(long)]
    pub english_tokens: Option<u64>,

    /// Tokens of a typical Icelandic message (defaults to the corpus mean).
    #[clap(long)]
    pub icelandic_tokens: Option<u64>,
}

#[derive(Debug, clap::Args)]
#[clap(group(ArgGroup::new("size").required(true).args(["words", "preset"])))]
pub struct EstimateOptions {
    /// Number of words in the document.
    #[clap(short, long)]
    pub words: Option<u64>,

    /// A common document length.
    #[clap(short, long, value_enum)]
    pub preset: Option<DocumentPreset>,

    /// Pricing tier to use.
    #[clap(short, long, env = "ICETOKE_TIER", default_value = "standard")]
    pub tier: String,
}

#[derive(Debug, clap::Args)]
pub struct CompareOptions {
    /// Icelandic text.
    #[clap(long)]
    pub icelandic: String,

    /// English translation of the Icelandic text.
    #[clap(long)]
    pub english: String,
}

#[derive(Debug, clap::Args)]
pub struct CountOptions {
    /// Text to count; read from stdin when omitted.
    pub text: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct TokenizeOptions {
    /// CSV with `english` and `icelandic` columns.
    pub input: PathBuf,

    /// Where to write the tokenized corpus.
    pub destination: PathBuf,
}
