use bytes::Bytes;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Compression {
    None,
    Gzip,
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DecompressionOptions {
    /// The maximum decompressed payload size.
    ///
    /// If the size of the uncompressed payload exceeds this limit, an error is returned
    /// instead. Zero means unlimited.
    pub limit: usize,
}

impl DecompressionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limit of the maximum uncompressed payload size.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Compression {
    /// Perform decompression.
    ///
    /// Returns the original data for [`Compression::None`]. Without the `flate2` feature, gzip
    /// fails as unsupported.
    pub fn decompress_with(
        &self,
        data: Bytes,
        opts: &DecompressionOptions,
    ) -> Result<Bytes, std::io::Error> {
        match self {
            Compression::None => Ok(data),
            Compression::Gzip => super::decompress_gzip(&data, opts),
        }
    }
}

/// Detect the compression of a payload from its metadata.
///
/// A payload is considered gzip compressed if either the file name ends with `.gz`, or the
/// content type contains `gzip`. Either signal alone is sufficient.
#[derive(Clone, Debug, Default)]
pub struct Detector<'a> {
    /// File name, or the path of a URL
    pub file_name: Option<&'a str>,

    /// Content type, as reported by the transport
    pub content_type: Option<&'a str>,
}

impl Detector<'_> {
    pub fn detect(&self) -> Compression {
        let by_name = self
            .file_name
            .is_some_and(|file_name| file_name.ends_with(".gz"));
        let by_content_type = self
            .content_type
            .is_some_and(|content_type| content_type.to_ascii_lowercase().contains("gzip"));

        match by_name || by_content_type {
            true => Compression::Gzip,
            false => Compression::None,
        }
    }
}
