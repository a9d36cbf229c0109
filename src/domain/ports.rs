use crate::domain::model::{Extracted, MovieInfo, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings shared by every pipeline.
pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn report_file(&self) -> Option<&str>;
    fn concurrent_requests(&self) -> usize;
    fn timeout_seconds(&self) -> u64;
}

pub trait SiteConfigProvider: ConfigProvider {
    fn base_url(&self) -> &str;
    /// List pages to crawl; empty means every bucket.
    fn lists(&self) -> &[String];
}

pub trait LookupConfigProvider: ConfigProvider {
    fn input_file(&self) -> &str;
    fn lookup_endpoint(&self) -> &str;
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// 外部電影資料庫，以數字 id 查詢
#[async_trait]
pub trait MovieLookup: Send + Sync {
    async fn lookup(&self, id: &str) -> Result<MovieInfo>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Record: Send + Sync;

    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Extracted<Self::Record>>;
    async fn transform(&self, data: Extracted<Self::Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
