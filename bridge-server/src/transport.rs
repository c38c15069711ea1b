// Line-delimited JSON framing
//
// Both parties exchange one JSON document per line. Reads accumulate in a
// BytesMut owned by the reader, so a read interrupted by select! loses
// nothing. Invalid UTF-8 is replaced rather than failing the stream; the
// runtime's strings are raw bytes.

use bytes::{Buf, BytesMut};
use serde::Serialize;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

/// Maximum accepted line length (16MB)
/// Guards against a peer that never sends a newline
const MAX_LINE_SIZE: usize = 16 * 1024 * 1024;

const READ_CHUNK: usize = 8 * 1024;

pub struct LineReader<R> {
    reader: R,
    buf: BytesMut,
    max_line: usize,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_line(reader, MAX_LINE_SIZE)
    }

    pub fn with_max_line(reader: R, max_line: usize) -> Self {
        Self {
            reader,
            buf: BytesMut::with_capacity(READ_CHUNK),
            max_line,
        }
    }

    /// Next non-empty line without its terminator; `None` at end of stream
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(line) = self.take_line()? {
                if line.trim().is_empty() {
                    continue;
                }
                return Ok(Some(line));
            }

            self.buf.reserve(READ_CHUNK);
            if self.reader.read_buf(&mut self.buf).await? == 0 {
                return Ok(None);
            }
        }
    }

    fn take_line(&mut self) -> io::Result<Option<String>> {
        match self.buf.iter().position(|b| *b == b'\n') {
            Some(pos) => {
                let line = self.buf.split_to(pos);
                self.buf.advance(1);
                let text = match String::from_utf8(line.to_vec()) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Replacing invalid UTF-8 in incoming line: {}", e.utf8_error());
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                };
                Ok(Some(text.trim_end_matches('\r').to_string()))
            }
            None if self.buf.len() > self.max_line => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Line too large: {} bytes (max: {} bytes)",
                    self.buf.len(),
                    self.max_line
                ),
            )),
            None => Ok(None),
        }
    }
}

/// Serialize one message and terminate it with a newline
pub async fn write_line<W, T>(writer: &mut W, message: &T) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut encoded = serde_json::to_vec(message)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await
}
