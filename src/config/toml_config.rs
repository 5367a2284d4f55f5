use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_JOBS: usize = 1;
const MAX_JOBS: usize = 256;
const MAX_TIMEOUT_MS: u64 = 3_600_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub seed: Option<u64>,
    pub jobs: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub fixtures: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct RunnerOverrides {
    pub seed: Option<u64>,
    pub jobs: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub fixtures: Option<String>,
    pub format: Option<OutputFormat>,
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FIXTURES_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_overrides(&mut self, overrides: &RunnerOverrides) {
        if let Some(seed) = overrides.seed {
            self.runner.seed = Some(seed);
        }
        if let Some(jobs) = overrides.jobs {
            self.runner.jobs = Some(jobs);
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.runner.timeout_ms = Some(timeout_ms);
        }
        if let Some(fixtures) = &overrides.fixtures {
            self.runner.fixtures = Some(fixtures.clone());
        }
        if let Some(format) = overrides.format {
            self.output.format = Some(format);
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(jobs) = self.runner.jobs {
            crate::utils::validation::validate_range("runner.jobs", jobs, 1, MAX_JOBS)?;
        }

        if let Some(timeout_ms) = self.runner.timeout_ms {
            crate::utils::validation::validate_range("runner.timeout_ms", timeout_ms, 1, MAX_TIMEOUT_MS)?;
        }

        if let Some(fixtures) = &self.runner.fixtures {
            crate::utils::validation::validate_path("runner.fixtures", fixtures)?;
            if fixtures.contains("${") {
                return Err(CatalogError::InvalidConfigValueError {
                    field: "runner.fixtures".to_string(),
                    value: fixtures.clone(),
                    reason: "Unresolved environment variable".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }
}

impl ConfigProvider for CatalogConfig {
    fn seed(&self) -> u64 {
        self.runner.seed.unwrap_or(DEFAULT_SEED)
    }

    fn jobs(&self) -> usize {
        self.runner.jobs.unwrap_or(DEFAULT_JOBS)
    }

    fn timeout(&self) -> Option<Duration> {
        self.runner.timeout_ms.map(Duration::from_millis)
    }

    fn fixtures_path(&self) -> Option<&str> {
        self.runner.fixtures.as_deref()
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
