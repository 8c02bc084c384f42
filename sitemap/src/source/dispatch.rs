use super::{FetchError, FileSource, HttpSource, Source};
use crate::model::SitemapDocument;
use async_trait::async_trait;

/// A common source type, dispatching to the known implementations.
///
/// The [`Source`] trait requires [`Clone`], so it cannot be used as a trait object.
#[derive(Clone, Debug)]
pub enum DispatchSource {
    File(FileSource),
    Http(HttpSource),
}

impl From<FileSource> for DispatchSource {
    fn from(value: FileSource) -> Self {
        Self::File(value)
    }
}

impl From<HttpSource> for DispatchSource {
    fn from(value: HttpSource) -> Self {
        Self::Http(value)
    }
}

#[async_trait(?Send)]
impl Source for DispatchSource {
    async fn load_document(&self) -> Result<SitemapDocument, FetchError> {
        match self {
            Self::File(source) => source.load_document().await,
            Self::Http(source) => source.load_document().await,
        }
    }
}
