use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Default, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[clap(rename_all = "kebab-case")]
pub enum Output {
    #[default]
    /// Plain text
    Raw,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

/// A command result that can be printed in every [`Output`] format.
pub trait CommandResult: Serialize {
    fn print_yaml<W: Write>(&self, writer: W) -> Result<()> {
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    fn print_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Human readable rendering of the result.
    fn print_raw<W: Write>(&self, writer: W) -> Result<()>;

    fn print<W: Write>(&self, output: Output, writer: W) -> Result<()> {
        match output {
            Output::Raw => self.print_raw(writer),
            Output::Json => self.print_json(writer),
            Output::Yaml => self.print_yaml(writer),
        }
    }
}

/// Formats a currency amount with enough precision for per-message figures.
pub fn usd(amount: f64) -> String {
    if amount != 0.0 && amount.abs() < 0.01 {
        format!("${amount:.6}")
    } else {
        format!("${amount:.4}")
    }
}

pub fn percentage(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:+.1}%"),
        None => "n/a".to_string(),
    }
}
