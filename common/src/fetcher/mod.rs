//! Fetching remote resources

mod data;
use backon::{ExponentialBuilder, Retryable};
pub use data::*;

use reqwest::{Client, ClientBuilder, IntoUrl, Method, header};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("sitemap-notify/", env!("CARGO_PKG_VERSION"));

/// Fetch documents using HTTP GET, with an optional number of retries.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    retries: usize,
}

/// Error when retrieving
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Options for the [`Fetcher`]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct FetcherOptions {
    pub timeout: Duration,
    /// Number of retries, zero performs exactly one request.
    pub retries: usize,
}

impl FetcherOptions {
    /// Create a new instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: impl Into<Duration>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Set the number of retries.
    pub fn retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 0,
        }
    }
}

impl Fetcher {
    /// Create a new fetcher from options
    pub async fn new(options: FetcherOptions) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            client,
            retries: options.retries,
        })
    }

    /// Fetch data, using a GET request.
    ///
    /// Without retries, this performs exactly one request. Any non-success status is an error.
    pub async fn fetch<D: Data>(&self, url: impl IntoUrl) -> Result<D, Error> {
        // an invalid URL won't get any better by retrying
        let url = url.into_url()?;
        log::debug!("Fetching: {url}");

        if self.retries == 0 {
            return self.fetch_once(url).await;
        }

        (|| self.fetch_once::<D>(url.clone()))
            .retry(ExponentialBuilder::default().with_max_times(self.retries))
            .notify(|err, after| log::info!("Failed to retrieve, retrying after {after:?}: {err}"))
            .await
    }

    async fn fetch_once<D: Data>(&self, url: Url) -> Result<D, Error> {
        let response = self.client.request(Method::GET, url).send().await?;
        Ok(D::from_response(response).await?)
    }
}
