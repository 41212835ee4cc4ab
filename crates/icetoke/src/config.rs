use std::path::{Path, PathBuf};

use config_file::FromConfigFile;
use serde::Deserialize;

use crate::cost::DEFAULT_DAYS_PER_MONTH;
use crate::prelude::*;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_CORPUS: &str = "data/sentance_pairs_tokenized.csv";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    // Tokenizer
    pub model: Option<String>,

    // Data
    pub corpus: Option<String>,

    // Cost model
    pub days_per_month: Option<u32>,
    pub tiers: Option<Vec<PricingTier>>,
    pub scenarios: Option<Vec<UsageScenario>>,

    // Statistics
    pub buckets: Option<BucketScheme>,
}

impl Config {
    /// Loads the config file at `path`, or the defaults when there is no such file.
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_home(path);
        if !path.is_file() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        log::debug!("reading config file {}", path.display());
        let config = Self::from_config_file(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.days_per_month == Some(0) {
            return Err(Error::InvalidArgument(
                "days_per_month must be greater than zero".into(),
            ));
        }
        for tier in self.tiers.iter().flatten() {
            tier.pricing.validate()?;
        }
        for scenario in self.scenarios.iter().flatten() {
            scenario.validate()?;
        }
        if let Some(buckets) = &self.buckets {
            buckets.validate()?;
        }
        Ok(())
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn corpus(&self) -> &str {
        self.corpus.as_deref().unwrap_or(DEFAULT_CORPUS)
    }

    pub fn days_per_month(&self) -> u32 {
        self.days_per_month.unwrap_or(DEFAULT_DAYS_PER_MONTH)
    }

    pub fn tiers(&self) -> Vec<PricingTier> {
        self.tiers.clone().unwrap_or_else(PricingTier::defaults)
    }

    pub fn scenarios(&self) -> Vec<UsageScenario> {
        self.scenarios.clone().unwrap_or_else(UsageScenario::defaults)
    }

    pub fn buckets(&self) -> BucketScheme {
        self.buckets.clone().unwrap_or_default()
    }
}

/// Expands a leading `~` to `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => Path::new(&home).join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let config = Config::load("/nonexistent/icetoke.toml").unwrap();
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.corpus(), "data/sentance_pairs_tokenized.csv");
        assert_eq!(config.days_per_month(), 30);
        assert_eq!(config.tiers(), PricingTier::defaults());
        assert_eq!(config.scenarios(), UsageScenario::defaults());
        assert_eq!(config.buckets(), BucketScheme::quartiles());
    }

    #[test]
    fn reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icetoke.toml");
        std::fs::write(
            &path,
            r#"
model = "gpt-4"
corpus = "pairs.csv"
days_per_month = 22

[[tiers]]
name = "flex"
input_price_per_million = 1.0
output_price_per_million = 4.0

[[scenarios]]
label = "Support desk"
messages_per_day = 250

[buckets]
strategy = "thresholds"
overflow_label = "long"

[[buckets.bounds]]
label = "short"
max_english_tokens = 10
"#,
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.model(), "gpt-4");
        assert_eq!(config.corpus(), "pairs.csv");
        assert_eq!(config.days_per_month(), 22);

        let tiers = config.tiers();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].name, "flex");
        assert_eq!(tiers[0].pricing.output_multiplier, 4.0);

        assert_eq!(config.scenarios(), vec![UsageScenario::new("Support desk", 250)]);
        assert!(matches!(
            config.buckets(),
            BucketScheme::Thresholds { ref bounds, .. } if bounds.len() == 1
        ));
    }

    #[test]
    fn reads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let files = [
            (
                "icetoke.yaml",
                "model: gpt-4
days_per_month: 22
scenarios:
  - label: Support desk
    messages_per_day: 250
",
            ),
            (
                "icetoke.json",
                r#"{
  "model": "gpt-4",
  "days_per_month": 22,
  "scenarios": [{ "label": "Support desk", "messages_per_day": 250 }]
}"#,
            ),
        ];

        for (name, contents) in files {
            let path = dir.path().join(name);
            std::fs::write(&path, contents).unwrap();

            let config = Config::load(path.to_str().unwrap()).unwrap();
            assert_eq!(config.model(), "gpt-4", "{name}");
            assert_eq!(config.days_per_month(), 22, "{name}");
            assert_eq!(
                config.scenarios(),
                vec![UsageScenario::new("Support desk", 250)],
                "{name}"
            );
        }
    }

    #[test]
    fn rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icetoke.toml");
        std::fs::write(
            &path,
            "[[scenarios]]\nlabel = \"Idle\"\nmessages_per_day = 0\n",
        )
        .unwrap();

        assert!(matches!(
            Config::load(path.to_str().unwrap()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn expands_home() {
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(
                expand_home("~/.config/icetoke.toml"),
                Path::new(&home).join(".config/icetoke.toml")
            );
        }
        assert_eq!(expand_home("/etc/icetoke.toml"), PathBuf::from("/etc/icetoke.toml"));
    }
}
