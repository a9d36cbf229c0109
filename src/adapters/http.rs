use crate::domain::model::MovieInfo;
use crate::domain::ports::{MovieLookup, PageFetcher};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("bodycount-etl/", env!("CARGO_PKG_VERSION"));

fn build_client(timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Plain GET of an HTML page. No retries: a failed page is reported by the caller and skipped.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// JSON movie database client: `GET {endpoint}/{id}` answers a [`MovieInfo`] document.
#[derive(Debug, Clone)]
pub struct HttpMovieLookup {
    client: Client,
    endpoint: String,
}

impl HttpMovieLookup {
    pub fn new(endpoint: &str, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn movie_url(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

#[async_trait]
impl MovieLookup for HttpMovieLookup {
    async fn lookup(&self, id: &str) -> Result<MovieInfo> {
        if id.is_empty() {
            return Err(EtlError::LookupError {
                id: id.to_string(),
                message: "empty movie id".to_string(),
            });
        }

        let url = self.movie_url(id);
        tracing::debug!("Looking up movie {} at {}", id, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::LookupError {
                id: id.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .json::<MovieInfo>()
            .await
            .map_err(|e| EtlError::LookupError {
                id: id.to_string(),
                message: format!("invalid movie document: {}", e),
            })
    }
}
