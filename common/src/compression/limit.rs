use std::io::{Error, ErrorKind, Write};

/// A writer, failing once more than `limit` bytes were written to it.
pub struct LimitWriter<W>
where
    W: Write,
{
    writer: W,
    limit: usize,
    written: usize,
}

impl<W> LimitWriter<W>
where
    W: Write,
{
    pub fn new(writer: W, limit: usize) -> Self {
        Self {
            writer,
            limit,
            written: 0,
        }
    }

    /// Close writer, return the inner writer.
    ///
    /// Note: Closing the writer will not flush it before.
    pub fn close(self) -> W {
        self.writer
    }
}

impl<W> Write for LimitWriter<W>
where
    W: Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let remaining = self.limit.saturating_sub(self.written);
        if remaining == 0 {
            return Err(Error::new(
                ErrorKind::WriteZero,
                format!("decompressed payload exceeds limit of {} bytes", self.limit),
            ));
        }

        let len = remaining.min(buf.len());
        let written = self.writer.write(&buf[..len])?;
        self.written += written;

        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
