use crate::utils::error::{Result, SiteMetricsError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_DIR: &str = "./.sitemetrics";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://sitemetrics.app";
pub const MAX_STEP_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub export_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            export_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadingConfig {
    pub step_delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SiteMetricsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteMetricsError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn step_delay_ms(&self) -> u64 {
        self.loading.step_delay_ms.unwrap_or(0)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        if let Some(export_dir) = &self.storage.export_dir {
            validate_path("storage.export_dir", export_dir)?;
        }
        validate_url("share.base_url", &self.share.base_url)?;
        validate_range("loading.step_delay_ms", self.step_delay_ms(), 0, MAX_STEP_DELAY_MS)?;

        if let Some(level) = &self.logging.level {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.as_str()) {
                return Err(SiteMetricsError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }
}
