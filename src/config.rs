use crate::analyzer::AnalyzerOptions;
use crate::analyzer::synthetic::{
    DisabledSynthetic, FixedSynthetic, RandomSynthetic, SyntheticMetricsProvider,
};
use crate::model::ConfigError;
use crate::roster::RosterQuery;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetConfig {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub sample_row: usize,
    #[serde(default)]
    pub roster: Option<RosterQuery>,
}

impl DatasetConfig {
    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            sample_row: self.sample_row,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntheticMode {
    Random,
    #[default]
    Fixed,
    Disabled,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default)]
    pub mode: SyntheticMode,
    /// Only used by `random`; unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SyntheticConfig {
    pub fn provider(&self) -> Box<dyn SyntheticMetricsProvider + Send> {
        match (self.mode, self.seed) {
            (SyntheticMode::Random, Some(seed)) => Box::new(RandomSynthetic::seeded(seed)),
            (SyntheticMode::Random, None) => Box::new(RandomSynthetic::new()),
            (SyntheticMode::Fixed, _) => Box::new(FixedSynthetic),
            (SyntheticMode::Disabled, _) => Box::new(DisabledSynthetic),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub datasets: Vec<DatasetConfig>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    /// Keep running and re-analyse changed datasets at this interval.
    #[serde(default)]
    pub watch_interval_seconds: Option<u64>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.datasets.is_empty() {
            return Err(ConfigError::Invalid("no datasets configured".into()));
        }
        let mut names = HashSet::new();
        for dataset in &self.datasets {
            if dataset.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "dataset at {} has an empty name",
                    dataset.path.display()
                )));
            }
            if !names.insert(dataset.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate dataset name '{}'",
                    dataset.name
                )));
            }
        }
        if self.watch_interval_seconds == Some(0) {
            return Err(ConfigError::Invalid("watchIntervalSeconds must be positive".into()));
        }
        Ok(())
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
