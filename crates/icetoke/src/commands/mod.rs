use tokenizer::DefaultTokenizer;

use crate::args::{Args, Command, Globals};
use crate::config::Config;
use crate::output::CommandResult;
use crate::prelude::*;

pub mod compare;
pub mod costs;
pub mod count;
pub mod estimate;
pub mod stats;
pub mod summary;
pub mod tokenize;

/// Everything a command needs besides its own options.
pub struct Context {
    pub globals: Globals,
    pub config: Config,
}

impl Context {
    pub fn new(globals: Globals) -> Result<Self> {
        let config = Config::load(&globals.config_file)?;
        Ok(Self { globals, config })
    }

    pub fn corpus_path(&self) -> &str {
        self.globals
            .corpus
            .as_deref()
            .unwrap_or_else(|| self.config.corpus())
    }

    pub fn load_corpus(&self) -> Result<Corpus> {
        Corpus::from_path(crate::config::expand_home(self.corpus_path()))
    }

    pub fn model(&self) -> &str {
        self.globals
            .model
            .as_deref()
            .unwrap_or_else(|| self.config.model())
    }

    pub fn tokenizer(&self) -> Result<DefaultTokenizer> {
        let tokenizer = DefaultTokenizer::for_model(self.model())?;
        log::info!("using {} for {}", tokenizer.encoding(), self.model());
        Ok(tokenizer)
    }

    pub fn tier(&self, name: &str) -> Result<PricingTier> {
        PricingTier::find(&self.config.tiers(), name).cloned()
    }

    pub fn print<R: CommandResult>(&self, result: &R) -> Result<()> {
        let stdout = std::io::stdout();
        result.print(self.globals.output, stdout.lock())
    }
}

pub fn run(args: Args) -> Result<()> {
    let context = Context::new(args.globals)?;

    match args.command {
        Command::Stats(options) => stats::run(&context, options),
        Command::Costs(options) => costs::run(&context, options),
        Command::Summary => summary::run(&context),
        Command::Estimate(options) => estimate::run(&context, options),
        Command::Compare(options) => compare::run(&context, options),
        Command::Count(options) => count::run(&context, options),
        Command::Tokenize(options) => tokenize::run(&context, options),
    }
}
