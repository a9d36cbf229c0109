use super::{
    CliConfig, EnrichCliConfig, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_SCRAPE_OUTPUT,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::config::enrich::{DEFAULT_ENRICH_INPUT, DEFAULT_ENRICH_OUTPUT};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 一個檔案描述整個流程：先爬 body count，再查電影資料庫
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: Option<SourceConfig>,
    pub lookup: Option<LookupConfig>,
    pub load: LoadConfig,
    pub performance: Option<PerformanceConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub lists: Option<Vec<String>>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub endpoint: String,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub write_reports: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub concurrent_requests: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MOVIE_DB_ENDPOINT})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn concurrent_requests(&self) -> usize {
        self.performance
            .as_ref()
            .and_then(|p| p.concurrent_requests)
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.performance
            .as_ref()
            .and_then(|p| p.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    fn report_file(&self, stage: &str) -> Option<String> {
        if self.load.write_reports.unwrap_or(false) {
            Some(format!("{}-report.json", stage))
        } else {
            None
        }
    }

    /// Settings for the scrape stage, `None` when `[source]` is absent.
    pub fn scrape_config(&self) -> Option<CliConfig> {
        let source = self.source.as_ref()?;
        Some(CliConfig {
            base_url: source.base_url.clone(),
            output_path: self.load.output_path.clone(),
            output_file: source
                .output_file
                .clone()
                .unwrap_or_else(|| DEFAULT_SCRAPE_OUTPUT.to_string()),
            lists: source.lists.clone().unwrap_or_default(),
            concurrent_requests: self.concurrent_requests(),
            timeout_seconds: self.timeout_seconds(),
            report_file: self.report_file("scrape"),
            verbose: false,
            monitor: self.monitoring_enabled(),
        })
    }

    /// Settings for the enrichment stage, `None` when `[lookup]` is absent.
    /// Without an explicit input file it reads what the scrape stage wrote.
    pub fn enrich_config(&self) -> Option<EnrichCliConfig> {
        let lookup = self.lookup.as_ref()?;
        let input_file = lookup.input_file.clone().unwrap_or_else(|| {
            match self.scrape_config() {
                Some(scrape) => scrape.output_file,
                None => DEFAULT_ENRICH_INPUT.to_string(),
            }
        });

        Some(EnrichCliConfig {
            input_file,
            lookup_endpoint: lookup.endpoint.clone(),
            output_path: self.load.output_path.clone(),
            output_file: lookup
                .output_file
                .clone()
                .unwrap_or_else(|| DEFAULT_ENRICH_OUTPUT.to_string()),
            concurrent_requests: self.concurrent_requests(),
            timeout_seconds: self.timeout_seconds(),
            report_file: self.report_file("enrich"),
            verbose: false,
            monitor: self.monitoring_enabled(),
        })
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let scrape = self.scrape_config();
        let enrich = self.enrich_config();

        if scrape.is_none() && enrich.is_none() {
            return Err(EtlError::MissingConfigError {
                field: "[source] or [lookup]".to_string(),
            });
        }

        if let Some(scrape) = &scrape {
            scrape.validate()?;
        }
        if let Some(enrich) = &enrich {
            enrich.validate()?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
