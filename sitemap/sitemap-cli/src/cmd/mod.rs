use notify_common::{cli::client::ClientArguments, compression::DecompressionOptions};
use sitemap_walker::{
    source::{DispatchSource, new_source},
    walker::SitemapWalker,
};

pub mod discover;
pub mod notify;

#[derive(Debug, clap::Parser)]
#[command(next_help_heading = "Discovery")]
pub struct DiscoverArguments {
    /// The sitemap to read.
    ///
    /// An `http` or `https` URL, a `file:` URL, or a local path. Gzip compressed sitemaps are
    /// detected by a `.gz` suffix or the content type.
    #[arg(env = "SITEMAP_URL")]
    pub locator: String,

    /// Maximum size of the decompressed sitemap, in bytes. Zero means unlimited.
    #[arg(long, env = "SITEMAP_MAX_SIZE", default_value = "52428800")]
    pub max_size: usize,
}

impl DiscoverArguments {
    /// Create the walker for the sitemap. Fails only for an invalid setup, not for an unavailable
    /// sitemap.
    pub async fn into_walker(
        self,
        client: ClientArguments,
    ) -> anyhow::Result<SitemapWalker<DispatchSource>> {
        let source = new_source(&self.locator, client).await?;

        Ok(SitemapWalker::new(source)
            .with_decompression(DecompressionOptions::new().limit(self.max_size)))
    }
}
