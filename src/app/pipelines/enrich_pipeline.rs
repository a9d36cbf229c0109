use crate::adapters::http::HttpMovieLookup;
use crate::core::emitter::CsvEmitter;
use crate::core::enrich::{enrich_row, movie_id_from_url, read_base_rows};
use crate::core::report::write_outputs;
use crate::core::{Extracted, LookupConfigProvider, MovieLookup, Pipeline, Storage, TransformResult};
use crate::domain::model::{BaseRow, EnrichedRecord, SkipStage, SkippedItem};
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};

/// 讀取既有 CSV，逐筆查詢電影資料庫後輸出擴充欄位
pub struct EnrichPipeline<S: Storage, C: LookupConfigProvider, L: MovieLookup = HttpMovieLookup> {
    storage: S,
    config: C,
    lookup: L,
}

impl<S: Storage, C: LookupConfigProvider> EnrichPipeline<S, C, HttpMovieLookup> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let lookup = HttpMovieLookup::new(config.lookup_endpoint(), config.timeout_seconds())?;
        Ok(Self::with_lookup(storage, config, lookup))
    }
}

impl<S: Storage, C: LookupConfigProvider, L: MovieLookup> EnrichPipeline<S, C, L> {
    pub fn with_lookup(storage: S, config: C, lookup: L) -> Self {
        Self {
            storage,
            config,
            lookup,
        }
    }

    async fn enrich(&self, row: &BaseRow) -> Result<EnrichedRecord> {
        let id = movie_id_from_url(&row.imdb_url);
        let movie = self.lookup.lookup(&id).await?;
        enrich_row(row, &movie)
    }
}

fn row_label(row: &BaseRow) -> String {
    match &row.film {
        Some(film) if !film.is_empty() => format!("{} ({})", film, row.imdb_url),
        _ => row.imdb_url.clone(),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: LookupConfigProvider, L: MovieLookup> Pipeline for EnrichPipeline<S, C, L> {
    type Record = BaseRow;

    fn name(&self) -> &str {
        "movie database enrichment"
    }

    async fn extract(&self) -> Result<Extracted<BaseRow>> {
        let input_file = self.config.input_file();
        tracing::info!("📂 Reading base rows from: {}", input_file);

        let data = self.storage.read_file(input_file).await?;
        let records = read_base_rows(&data)?;

        Ok(Extracted {
            records,
            skipped: Vec::new(),
        })
    }

    /// A failed lookup drops the whole row; the remaining rows keep their order.
    async fn transform(&self, data: Extracted<BaseRow>) -> Result<TransformResult> {
        let concurrency = self.config.concurrent_requests().max(1);
        tracing::info!(
            "🎬 Looking up {} movies at {}",
            data.records.len(),
            self.config.lookup_endpoint()
        );

        let pending: Vec<_> = data.records.iter().map(|row| self.enrich(row)).collect();
        let outcomes: Vec<Result<EnrichedRecord>> =
            stream::iter(pending).buffered(concurrency).collect().await;

        let mut enriched = Vec::new();
        let mut skipped = data.skipped;

        for (row, outcome) in data.records.iter().zip(outcomes) {
            match outcome {
                Ok(record) => enriched.push(record),
                Err(e) => {
                    let label = row_label(row);
                    tracing::warn!("⚠️ Error with {}: {}", label, e);
                    skipped.push(SkippedItem::new(SkipStage::Lookup, label, e));
                }
            }
        }

        let csv_output = CsvEmitter::enriched().render(&enriched)?;

        Ok(TransformResult {
            csv_output,
            emitted: enriched.len(),
            skipped,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        write_outputs(&self.storage, &self.config, self.name(), &result).await
    }
}
