use super::{FetchError, Source};
use crate::model::SitemapDocument;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// A sitemap stored in the local file system.
///
/// There is no content type for a file, so the encoding is detected by the file name only.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl Source for FileSource {
    async fn load_document(&self) -> Result<SitemapDocument, FetchError> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|err| FetchError::Io {
                path: self.path.clone(),
                err,
            })?;

        Ok(SitemapDocument::new(
            self.path.to_string_lossy(),
            None,
            Bytes::from(data),
        ))
    }
}
