//! Data model

use crate::decode::{self, DecodeError};
use bytes::Bytes;
use notify_common::compression::{Compression, DecompressionOptions, Detector};

/// The encoding of a sitemap payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Gzip,
}

impl Encoding {
    /// Detect the encoding.
    ///
    /// The payload is gzip compressed if the locator ends with `.gz`, or the content type contains
    /// `gzip`. Either one is sufficient.
    pub fn detect(locator: &str, content_type: Option<&str>) -> Self {
        let detector = Detector {
            file_name: Some(locator),
            content_type,
        };

        match detector.detect() {
            Compression::None => Self::Plain,
            Compression::Gzip => Self::Gzip,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::Gzip)
    }
}

/// A sitemap, as it got retrieved.
#[derive(Clone, Debug)]
pub struct SitemapDocument {
    /// The locator the document was retrieved from.
    pub locator: String,
    /// The content type, if reported by the transport.
    pub content_type: Option<String>,
    pub encoding: Encoding,
    /// The raw, possibly still compressed, payload.
    pub data: Bytes,
}

impl SitemapDocument {
    /// Create a new document, detecting the encoding from the locator and content type.
    pub fn new(locator: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        let locator = locator.into();
        let encoding = Encoding::detect(&locator, content_type.as_deref());
        Self {
            locator,
            content_type,
            encoding,
            data,
        }
    }

    /// Decode the payload, ready for parsing.
    pub fn decode(self) -> Result<Bytes, DecodeError> {
        self.decode_with(&Default::default())
    }

    /// Decode the payload, ready for parsing, applying the provided options.
    pub fn decode_with(self, opts: &DecompressionOptions) -> Result<Bytes, DecodeError> {
        decode::decode_with(self.data, self.encoding.is_compressed(), opts)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detect_encoding() {
        assert_eq!(
            Encoding::detect("https://a.example/sitemap.xml", None),
            Encoding::Plain
        );
        assert_eq!(
            Encoding::detect("https://a.example/sitemap.xml.gz", None),
            Encoding::Gzip
        );
        assert_eq!(
            Encoding::detect("https://a.example/sitemap", Some("application/x-gzip")),
            Encoding::Gzip
        );
        assert_eq!(
            Encoding::detect("sitemap.xml", Some("text/xml; charset=utf-8")),
            Encoding::Plain
        );
    }

    #[test]
    fn plain_document() {
        let doc = SitemapDocument::new("sitemap.xml", None, Bytes::from_static(b"<urlset/>"));
        assert_eq!(doc.encoding, Encoding::Plain);
        assert_eq!(doc.decode().unwrap().as_ref(), b"<urlset/>");
    }

    #[test]
    fn corrupt_document() {
        let doc = SitemapDocument::new("sitemap.xml.gz", None, Bytes::from_static(b"<urlset/>"));
        assert_eq!(doc.encoding, Encoding::Gzip);
        assert!(doc.decode().is_err());
    }
}
