use crate::adapters::storage::LocalStorage;
use crate::app::pipelines::{EnrichPipeline, ScrapePipeline};
use crate::config::toml_config::TomlConfig;
use crate::core::etl::EtlEngine;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs the configured stages in order: scrape first, then enrichment.
/// Returns the output path of every stage that ran.
pub async fn run_sequence(config: &TomlConfig, monitor_enabled: bool) -> Result<Vec<String>> {
    config.validate()?;
    let mut outputs = Vec::new();

    if let Some(scrape) = config.scrape_config() {
        tracing::info!("▶️ Stage 1: body-count scrape");
        let storage = LocalStorage::new(scrape.output_path.clone());
        let pipeline = ScrapePipeline::new(storage, scrape)?;
        let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
        outputs.push(engine.run().await?);
    }

    if let Some(enrich) = config.enrich_config() {
        tracing::info!("▶️ Stage {}: movie database enrichment", outputs.len() + 1);
        let storage = LocalStorage::new(enrich.output_path.clone());
        let pipeline = EnrichPipeline::new(storage, enrich)?;
        let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
        outputs.push(engine.run().await?);
    }

    Ok(outputs)
}
