//! The actual walker

use crate::{Error, parse::parse, source::Source};
use notify_common::compression::DecompressionOptions;

/// Retrieves a sitemap from a source, decodes and parses it.
pub struct SitemapWalker<S: Source> {
    source: S,
    decompression: DecompressionOptions,
}

impl<S: Source> SitemapWalker<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            decompression: Default::default(),
        }
    }

    /// Set the options for decompressing the sitemap, like the maximum decompressed size.
    pub fn with_decompression(mut self, decompression: DecompressionOptions) -> Self {
        self.decompression = decompression;
        self
    }

    /// Walk the sitemap, returning its URLs in document order.
    pub async fn walk(&self) -> Result<Vec<String>, Error> {
        let document = self.source.load_document().await?;
        log::debug!(
            "Loaded sitemap: {} ({:?}, {} bytes)",
            document.locator,
            document.encoding,
            document.data.len()
        );

        let data = document.decode_with(&self.decompression)?;
        Ok(parse(&data)?)
    }
}
