use crate::adapters::http::HttpFetcher;
use crate::core::detail::DetailExtractor;
use crate::core::emitter::CsvEmitter;
use crate::core::listing::ListingCrawler;
use crate::core::markup::normalize_base_url;
use crate::core::report::write_outputs;
use crate::core::{Extracted, PageFetcher, Pipeline, SiteConfigProvider, Storage, TransformResult};
use crate::domain::model::{FilmRecord, ListIdentifier, SkipStage, SkippedItem};
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use url::Url;

/// 爬片單頁 -> 逐一抓詳細頁 -> 輸出 Film,Year,Kill_Count,IMDB_url
pub struct ScrapePipeline<S: Storage, C: SiteConfigProvider, F: PageFetcher = HttpFetcher> {
    storage: S,
    config: C,
    fetcher: F,
    base_url: Url,
}

impl<S: Storage, C: SiteConfigProvider> ScrapePipeline<S, C, HttpFetcher> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout_seconds())?;
        Self::with_fetcher(storage, config, fetcher)
    }
}

impl<S: Storage, C: SiteConfigProvider, F: PageFetcher> ScrapePipeline<S, C, F> {
    pub fn with_fetcher(storage: S, config: C, fetcher: F) -> Result<Self> {
        let base_url = normalize_base_url(config.base_url())?;
        Ok(Self {
            storage,
            config,
            fetcher,
            base_url,
        })
    }

    fn list_identifiers(&self) -> Vec<ListIdentifier> {
        let lists = self.config.lists();
        if lists.is_empty() {
            ListIdentifier::all()
        } else {
            lists.iter().map(|id| ListIdentifier::new(id.as_str())).collect()
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: SiteConfigProvider, F: PageFetcher> Pipeline for ScrapePipeline<S, C, F> {
    type Record = FilmRecord;

    fn name(&self) -> &str {
        "body-count scrape"
    }

    async fn extract(&self) -> Result<Extracted<FilmRecord>> {
        let concurrency = self.config.concurrent_requests().max(1);
        let identifiers = self.list_identifiers();
        tracing::info!(
            "🔎 Crawling {} list pages under {}",
            identifiers.len(),
            self.base_url
        );

        let crawler = ListingCrawler::new(&self.fetcher, &self.base_url, concurrency);
        let listing = crawler.crawl(&identifiers).await;
        tracing::info!("📋 Found {} detail pages", listing.records.len());

        let extractor = DetailExtractor::new(&self.fetcher, &self.base_url);
        let pending: Vec<_> = listing
            .records
            .iter()
            .map(|reference| extractor.extract(reference))
            .collect();
        let outcomes: Vec<Result<FilmRecord>> =
            stream::iter(pending).buffered(concurrency).collect().await;

        let mut records = Vec::new();
        let mut skipped = listing.skipped;

        for (reference, outcome) in listing.records.iter().zip(outcomes) {
            match outcome {
                Ok(record) => {
                    if record.title.is_empty() {
                        tracing::debug!("No title found on {}", reference);
                    }
                    records.push(record);
                }
                Err(e) => {
                    tracing::warn!("⚠️ {}: {}", reference, e);
                    skipped.push(SkippedItem::new(
                        SkipStage::DetailPage,
                        reference.as_str(),
                        e,
                    ));
                }
            }
        }

        Ok(Extracted { records, skipped })
    }

    async fn transform(&self, data: Extracted<FilmRecord>) -> Result<TransformResult> {
        let csv_output = CsvEmitter::scrape().render(&data.records)?;

        Ok(TransformResult {
            csv_output,
            emitted: data.records.len(),
            skipped: data.skipped,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        write_outputs(&self.storage, &self.config, self.name(), &result).await
    }
}
