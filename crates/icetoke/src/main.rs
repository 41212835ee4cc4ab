use clap::Parser;

use icetoke::args::Args;
use icetoke::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    icetoke::commands::run(args)
}
