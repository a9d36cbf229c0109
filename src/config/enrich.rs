use super::{DEFAULT_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, LookupConfigProvider};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};

pub const DEFAULT_ENRICH_INPUT: &str = "movies.csv";
pub const DEFAULT_ENRICH_OUTPUT: &str = "film-death-counts-Python.csv";

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "enrich_etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Enrich a body-count CSV with movie database metadata")
)]
pub struct EnrichCliConfig {
    /// Base CSV with IMDB_URL and Body_Count columns, relative to --output-path
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_ENRICH_INPUT))]
    pub input_file: String,

    /// Movie database endpoint; movies are fetched from {endpoint}/{id}
    #[cfg_attr(feature = "cli", arg(long))]
    pub lookup_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_ENRICH_OUTPUT))]
    pub output_file: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS))]
    pub concurrent_requests: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS))]
    pub timeout_seconds: u64,

    #[cfg_attr(feature = "cli", arg(long))]
    pub report_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log memory and elapsed time after each phase"))]
    pub monitor: bool,
}

impl EnrichCliConfig {
    pub fn new(lookup_endpoint: impl Into<String>) -> Self {
        Self {
            input_file: DEFAULT_ENRICH_INPUT.to_string(),
            lookup_endpoint: lookup_endpoint.into(),
            output_path: ".".to_string(),
            output_file: DEFAULT_ENRICH_OUTPUT.to_string(),
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            report_file: None,
            verbose: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for EnrichCliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn report_file(&self) -> Option<&str> {
        self.report_file.as_deref()
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl LookupConfigProvider for EnrichCliConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn lookup_endpoint(&self) -> &str {
        &self.lookup_endpoint
    }
}

impl Validate for EnrichCliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("lookup_endpoint", &self.lookup_endpoint)?;
        validation::validate_path("input_file", &self.input_file)?;
        validation::validate_file_extension("input_file", &self.input_file, &["csv"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_extension("output_file", &self.output_file, &["csv"])?;
        // 輸入與輸出在同一個目錄下解析
        if self.output_file == self.input_file {
            return Err(EtlError::InvalidConfigValueError {
                field: "output_file".to_string(),
                value: self.output_file.clone(),
                reason: "Output would overwrite the input file".to_string(),
            });
        }
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        if let Some(report) = &self.report_file {
            validation::validate_file_extension("report_file", report, &["json"])?;
        }
        Ok(())
    }
}
