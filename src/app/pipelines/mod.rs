pub mod enrich_pipeline;
pub mod scrape_pipeline;

pub use enrich_pipeline::EnrichPipeline;
pub use scrape_pipeline::ScrapePipeline;
