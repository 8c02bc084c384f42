//! Retrieving sitemaps
//!
//! ## Idea
//!
//! A sitemap is retrieved from a [`source::Source`] (either via HTTP, or from the local file
//! system) as a [`model::SitemapDocument`]. The document is then decoded (if it was gzip
//! compressed) and parsed, resulting in the list of page URLs it contains.
//!
//! The [`walker::SitemapWalker`] combines those steps.
//!
//! ## Example
//!
//! ```rust
//! use anyhow::Result;
//! use notify_common::fetcher::FetcherOptions;
//! use sitemap_walker::{source::new_source, walker::SitemapWalker};
//!
//! async fn walk() -> Result<()> {
//!   let source = new_source("https://example.com/sitemap.xml.gz", FetcherOptions::default()).await?;
//!
//!   for url in SitemapWalker::new(source).walk().await? {
//!     println!("{url}");
//!   }
//!
//!   Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used)]

pub mod decode;
pub mod model;
pub mod parse;
pub mod source;
pub mod walker;

/// Failure to acquire the URLs of a sitemap.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch sitemap: {0}")]
    Fetch(#[from] source::FetchError),
    #[error("failed to decode sitemap: {0}")]
    Decode(#[from] decode::DecodeError),
    #[error("failed to parse sitemap: {0}")]
    Parse(#[from] parse::ParseError),
}
