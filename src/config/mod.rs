pub mod enrich;
pub mod toml_config;

pub use enrich::EnrichCliConfig;

use crate::core::{ConfigProvider, SiteConfigProvider};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_BASE_URL: &str = "http://www.moviebodycounts.com";
pub const DEFAULT_SCRAPE_OUTPUT: &str = "film-death-counts.csv";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "bodycount-etl"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Scrape on-screen body counts into Film,Year,Kill_Count,IMDB_url")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_BASE_URL))]
    pub base_url: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "."))]
    pub output_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_SCRAPE_OUTPUT))]
    pub output_file: String,

    /// List pages to crawl (e.g. "numbers,A,v"); all of them when omitted
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub lists: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS))]
    pub concurrent_requests: usize,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS))]
    pub timeout_seconds: u64,

    /// Write a JSON report of skipped pages next to the CSV
    #[cfg_attr(feature = "cli", arg(long))]
    pub report_file: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log memory and elapsed time after each phase"))]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: ".".to_string(),
            output_file: DEFAULT_SCRAPE_OUTPUT.to_string(),
            lists: Vec::new(),
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            report_file: None,
            verbose: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CliConfig {
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

impl SiteConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lists(&self) -> &[String] {
        &self.lists
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_extension("output_file", &self.output_file, &["csv"])?;
        validation::validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        if let Some(report) = &self.report_file {
            validation::validate_file_extension("report_file", report, &["json"])?;
        }
        Ok(())
    }
}
