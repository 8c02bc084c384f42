//! Sources

mod dispatch;
mod file;
mod http;

pub use dispatch::*;
pub use file::*;
pub use http::*;

use crate::model::SitemapDocument;
use async_trait::async_trait;
use notify_common::fetcher::{self, FetcherOptions};
use std::path::PathBuf;
use url::Url;

/// Failure to retrieve a sitemap document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] fetcher::Error),
    #[error("failed to read '{path}': {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

/// A source of a sitemap document
#[async_trait(?Send)]
pub trait Source: Clone {
    /// Retrieve the document. This performs exactly one retrieval attempt.
    async fn load_document(&self) -> Result<SitemapDocument, FetchError>;
}

/// A common way to create a new sitemap source.
///
/// An `http` or `https` URL is fetched remotely, a `file` URL or anything which is not a URL is
/// considered a local path.
pub async fn new_source(
    locator: &str,
    options: impl Into<FetcherOptions>,
) -> anyhow::Result<DispatchSource> {
    if locator.trim().is_empty() {
        anyhow::bail!("Missing sitemap locator");
    }

    match Url::parse(locator) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            log::info!("Fetching sitemap from: {url}");
            let fetcher = fetcher::Fetcher::new(options.into()).await?;
            Ok(HttpSource::new(url, fetcher).into())
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow::anyhow!("Invalid file URL: {url}"))?;
            log::info!("Reading sitemap from: {}", path.display());
            Ok(FileSource::new(path).into())
        }
        _ => {
            // use as path
            log::info!("Reading sitemap from: {locator}");
            Ok(FileSource::new(locator).into())
        }
    }
}
