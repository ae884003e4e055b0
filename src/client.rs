use crate::record::{FishRecord, SpeciesPage};
use futures::future::BoxFuture;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://fishbase.ropensci.org";

/// Records per page the API returns when no limit is given.
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can hand back a page of species starting at `offset`.
pub trait SpeciesSource: Send + Sync + 'static {
    fn fetch_page(&self, offset: u64) -> BoxFuture<'static, Result<Vec<FishRecord>, FetchError>>;
}

#[derive(Clone)]
pub struct SpeciesClient {
    client: Client,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
}

impl SpeciesClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(DEFAULT_API_URL, Duration::from_secs(10))
    }

    fn with_settings(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn with_base_url(self, base_url: &str) -> Result<Self, FetchError> {
        Self::with_settings(base_url, self.timeout)
    }

    pub fn with_timeout(self, timeout_secs: u64) -> Result<Self, FetchError> {
        Self::with_settings(&self.base_url, Duration::from_secs(timeout_secs))
    }

    pub fn species_url(&self, offset: u64) -> String {
        format!("{}/species?offset={}", self.base_url, offset)
    }

    /// Fetch one page of species starting at `offset`.
    pub async fn get_species(&self, offset: u64) -> Result<Vec<FishRecord>, FetchError> {
        let url = self.species_url(offset);
        debug!("GET {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let page: SpeciesPage = serde_json::from_slice(&body)?;

        info!("Fetched {} species at offset {}", page.data.len(), offset);
        Ok(page.data)
    }
}

impl SpeciesSource for SpeciesClient {
    fn fetch_page(&self, offset: u64) -> BoxFuture<'static, Result<Vec<FishRecord>, FetchError>> {
        let client = self.clone();
        Box::pin(async move { client.get_species(offset).await })
    }
}
