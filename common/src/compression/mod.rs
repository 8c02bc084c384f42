//! Helpers for using compression/decompression.

mod detecting;
mod limit;

pub use detecting::*;
pub use limit::*;

use bytes::Bytes;
use std::io::Read;

/// Decompress a single gzip member using `flate2`, applying the provided options.
#[cfg(feature = "flate2")]
fn decompress_gzip(data: &[u8], opts: &DecompressionOptions) -> Result<Bytes, std::io::Error> {
    let decoder = flate2::read::GzDecoder::new(data);
    read_limited(decoder, opts.limit)
}

#[cfg(not(feature = "flate2"))]
fn decompress_gzip(_data: &[u8], _opts: &DecompressionOptions) -> Result<Bytes, std::io::Error> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "gzip support is not enabled",
    ))
}

/// Drain a decoder, failing if it produces more than `limit` bytes. Zero means unlimited.
fn read_limited(mut decoder: impl Read, limit: usize) -> Result<Bytes, std::io::Error> {
    let data = if limit == 0 {
        let mut data = vec![];
        decoder.read_to_end(&mut data)?;
        data
    } else {
        let mut writer = LimitWriter::new(vec![], limit);
        std::io::copy(&mut decoder, &mut writer)?;
        writer.close()
    };

    Ok(Bytes::from(data))
}
