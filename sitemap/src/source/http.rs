use super::{FetchError, Source};
use crate::model::{Encoding, SitemapDocument};
use async_trait::async_trait;
use notify_common::fetcher::{Fetcher, Payload};
use url::Url;

/// A sitemap retrieved via HTTP.
#[derive(Clone, Debug)]
pub struct HttpSource {
    pub fetcher: Fetcher,
    pub url: Url,
}

impl HttpSource {
    pub fn new(url: Url, fetcher: Fetcher) -> Self {
        Self { fetcher, url }
    }
}

#[async_trait(?Send)]
impl Source for HttpSource {
    async fn load_document(&self) -> Result<SitemapDocument, FetchError> {
        let Payload {
            url: _,
            content_type,
            data,
        } = self.fetcher.fetch::<Payload>(self.url.clone()).await?;

        log::debug!(
            "Retrieved sitemap: {} bytes, content type: {}",
            data.len(),
            content_type.as_deref().unwrap_or("<none>")
        );

        // the query part would hide a `.gz` suffix
        let encoding = Encoding::detect(self.url.path(), content_type.as_deref());

        Ok(SitemapDocument {
            locator: self.url.to_string(),
            content_type,
            encoding,
            data,
        })
    }
}
