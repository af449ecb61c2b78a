#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::search::DEFAULT_BRANCH_PREVIEW;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_LOCATION: &str = "college_data.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DATA_ENV_VAR: &str = "COLLEGE_FINDER_DATA";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<String>,
    pub format: Option<OutputFormat>,
    pub verbose: bool,
}

/// Effective settings: command line, then environment, then config file, then defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_location: String,
    pub timeout_seconds: u64,
    pub format: OutputFormat,
    pub branch_preview: usize,
    pub default_category: Option<String>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_location: DEFAULT_DATA_LOCATION.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            format: OutputFormat::default(),
            branch_preview: DEFAULT_BRANCH_PREVIEW,
            default_category: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn resolve(overrides: &Overrides, file: Option<&TomlConfig>) -> Self {
        Self::resolve_with_env(overrides, file, std::env::var(DATA_ENV_VAR).ok())
    }

    pub fn resolve_with_env(
        overrides: &Overrides,
        file: Option<&TomlConfig>,
        env_data: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        let data_location = overrides
            .data
            .clone()
            .or(env_data.filter(|v| !v.trim().is_empty()))
            .or(file.source.location)
            .unwrap_or(defaults.data_location);

        Self {
            data_location,
            timeout_seconds: file.source.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            format: overrides
                .format
                .or(file.display.format)
                .unwrap_or(defaults.format),
            branch_preview: file.display.branch_preview.unwrap_or(defaults.branch_preview),
            default_category: file.display.default_category,
            json_logs: file.logging.json.unwrap_or(false),
            verbose: overrides.verbose || file.logging.verbose.unwrap_or(false),
        }
    }
}

impl ConfigProvider for Settings {
    fn data_location(&self) -> &str {
        &self.data_location
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_location("data", &self.data_location)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_positive_number("branch_preview", self.branch_preview as u64, 1)?;
        Ok(())
    }
}
