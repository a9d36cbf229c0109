use crate::core::markup::{html_to_lines, page_url};
use crate::domain::model::{DetailReference, Extracted, ListIdentifier, SkipStage, SkippedItem};
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use url::Url;

/// 片單頁上指向詳細頁的行一定含有 ".htm"
const DETAIL_LINK_MARKER: &str = ".htm";

/// Image lines, the contact page, the movie index and the other list pages.
const EXCLUDED_MARKERS: [&str; 4] = [".jpg", "contact.htm", "movies.htm", "movies-"];

pub fn list_page_name(id: &ListIdentifier) -> String {
    format!("movies-{}.htm", id)
}

pub fn is_detail_link(line: &str) -> bool {
    line.contains(DETAIL_LINK_MARKER) && !EXCLUDED_MARKERS.iter().any(|m| line.contains(m))
}

/// Page name inside the trailing `(...)` of a Markdown link. Absolute links
/// keep only their last path segment.
pub fn reference_from_line(line: &str) -> DetailReference {
    let target = line.rsplit('(').next().unwrap_or(line).trim_matches(')');
    let page = target.rsplit('/').next().unwrap_or(target);
    DetailReference::new(page)
}

/// References in page order. Duplicates are kept.
pub fn extract_references<S: AsRef<str>>(lines: &[S]) -> Vec<DetailReference> {
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| is_detail_link(line))
        .map(reference_from_line)
        .collect()
}

pub struct ListingCrawler<'a, F: PageFetcher> {
    fetcher: &'a F,
    base_url: &'a Url,
    concurrency: usize,
}

impl<'a, F: PageFetcher> ListingCrawler<'a, F> {
    pub fn new(fetcher: &'a F, base_url: &'a Url, concurrency: usize) -> Self {
        Self {
            fetcher,
            base_url,
            concurrency: concurrency.max(1),
        }
    }

    async fn crawl_page(&self, id: &ListIdentifier) -> Result<Vec<DetailReference>> {
        let url = page_url(self.base_url, &list_page_name(id))?;
        let html = self.fetcher.fetch(url.as_str()).await?;
        let lines = html_to_lines(&html)?;
        Ok(extract_references(&lines[..]))
    }

    /// A failed list page is reported and the crawl moves on.
    pub async fn crawl(&self, ids: &[ListIdentifier]) -> Extracted<DetailReference> {
        let pending: Vec<_> = ids.iter().map(|id| self.crawl_page(id)).collect();
        let outcomes: Vec<Result<Vec<DetailReference>>> =
            stream::iter(pending).buffered(self.concurrency).collect().await;

        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for (id, outcome) in ids.iter().zip(outcomes) {
            match outcome {
                Ok(references) => {
                    tracing::debug!("List page {}: {} references", id, references.len());
                    records.extend(references);
                }
                Err(e) => {
                    tracing::warn!("⚠️ error with list page {}: {}", id, e);
                    skipped.push(SkippedItem::new(SkipStage::ListPage, id.as_str(), e));
                }
            }
        }

        Extracted { records, skipped }
    }
}
