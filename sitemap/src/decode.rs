//! Decoding the payload of a sitemap

use bytes::Bytes;
use notify_common::compression::{Compression, DecompressionOptions};

/// The payload was declared as compressed, but could not be decompressed.
#[derive(Debug, thiserror::Error)]
#[error("corrupt gzip payload: {0}")]
pub struct DecodeError(#[from] pub std::io::Error);

/// Decode a payload.
///
/// If the payload is declared as compressed, it must be a single gzip member. Otherwise, it is
/// returned unchanged.
pub fn decode(data: Bytes, compressed: bool) -> Result<Bytes, DecodeError> {
    decode_with(data, compressed, &Default::default())
}

/// Decode a payload, applying the provided options.
pub fn decode_with(
    data: Bytes,
    compressed: bool,
    opts: &DecompressionOptions,
) -> Result<Bytes, DecodeError> {
    if !compressed {
        return Ok(data);
    }

    let len = data.len();
    let result = Compression::Gzip.decompress_with(data, opts)?;
    log::debug!("Decompressed sitemap: {len} -> {} bytes", result.len());

    Ok(result)
}
