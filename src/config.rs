//! Configuration management

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconConfig {
    /// CSV file of `token,valence,subjectivity` rows merged over the default lexicon
    pub overrides_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Analyze rows on a worker pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Maximum number of rows to analyze (0 = all)
    #[serde(default)]
    pub max_rows: usize,
}

fn default_parallel() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            max_rows: 0,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let name = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("config path is not valid UTF-8: {:?}", path))?;

        let settings = config::Config::builder()
            .add_source(config::File::with_name(name))
            .add_source(config::Environment::with_prefix("SENTIMENT").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from the first default location that exists.
    /// `Ok(None)` when there is no config file; a file that fails to parse is an error.
    pub fn load_default() -> anyhow::Result<Option<Self>> {
        Self::load_first_existing(&[
            "sentiment.toml",
            "sentiment.yaml",
            "~/.config/sentiment-engine/config.toml",
        ])
    }

    fn load_first_existing(paths: &[&str]) -> anyhow::Result<Option<Self>> {
        for path in paths {
            let expanded = shellexpand::tilde(path).into_owned();
            if Path::new(&expanded).exists() {
                let config = Self::load(&expanded)
                    .with_context(|| format!("Failed to load config {}", expanded))?;
                return Ok(Some(config));
            }
        }
        Ok(None)
    }
}
