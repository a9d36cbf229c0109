pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::{HttpFetcher, HttpMovieLookup};
pub use adapters::storage::LocalStorage;
pub use app::pipelines::{EnrichPipeline, ScrapePipeline};
pub use app::sequence::run_sequence;
pub use config::{toml_config::TomlConfig, CliConfig, EnrichCliConfig};
pub use crate::core::etl::EtlEngine;
pub use utils::error::{EtlError, Result};
