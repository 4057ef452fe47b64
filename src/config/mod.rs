#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, SiteMetricsError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Effective settings after command line flags are applied over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String,
    pub export_dir: String,
    pub share_base_url: String,
    pub log_format: LogFormat,
    pub log_level: Option<String>,
    pub step_delay: Duration,
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<String>,
    pub export_dir: Option<String>,
    pub log_format: Option<LogFormat>,
    pub date: Option<String>,
}

impl Settings {
    pub fn resolve(file: TomlConfig, overrides: Overrides) -> Result<Self> {
        file.validate()?;

        let reference_date = overrides.date.as_deref().map(parse_date).transpose()?;
        let data_dir = overrides.data_dir.unwrap_or(file.storage.data_dir);
        let export_dir = overrides
            .export_dir
            .or(file.storage.export_dir)
            .unwrap_or_else(|| ".".to_string());

        let settings = Self {
            data_dir,
            export_dir,
            share_base_url: file.share.base_url,
            log_format: overrides.log_format.or(file.logging.format).unwrap_or_default(),
            log_level: file.logging.level,
            step_delay: Duration::from_millis(file.loading.step_delay_ms.unwrap_or(0)),
            reference_date,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// The configured reference day, or the current UTC date.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_path("data_dir", &self.data_dir)?;
        crate::utils::validation::validate_path("export_dir", &self.export_dir)?;
        Ok(())
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SiteMetricsError::DateError {
        value: value.to_string(),
    })
}
