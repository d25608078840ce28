use crate::{ConnectionError, LineBuffer};

use std::collections::VecDeque;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

/// How long a single poll waits for data before yielding the no-data marker
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How many bytes to request from the socket per read
const READ_CHUNK: usize = 1024;

/// Reads decoded lines off a connection without ever blocking the caller for
/// longer than the poll interval.
///
/// Each call to [`poll_line`](Self::poll_line) yields at most one line, so
/// the owning loop can interleave periodic work between lines even when the
/// server floods. A zero-length read is reported as
/// [`ConnectionError::Closed`]; recovering from that is the caller's job.
pub struct LineReader<R> {
    reader: R,
    buffer: LineBuffer,
    pending: VecDeque<String>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: LineBuffer::new(),
            pending: VecDeque::new(),
        }
    }

    /// Return the next complete line, or `None` if no line became available
    /// within the poll interval.
    pub async fn poll_line(&mut self) -> Result<Option<String>, ConnectionError> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(Some(line));
        }

        let mut chunk = [0u8; READ_CHUNK];
        match timeout(POLL_INTERVAL, self.reader.read(&mut chunk)).await {
            Err(_) => Ok(None),
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(0)) => {
                tracing::error!("Received zero-length payload from server");
                Err(ConnectionError::Closed)
            }
            Ok(Ok(n)) => {
                self.pending.extend(self.buffer.push(&chunk[..n]));
                Ok(self.pending.pop_front())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn yields_one_line_per_poll() {
        let (mut tx, rx) = tokio::io::duplex(256);
        let mut reader = LineReader::new(rx);

        tx.write_all(b"one\r\ntwo\r\n").await.unwrap();

        assert_eq!(reader.poll_line().await.unwrap(), Some("one".to_string()));
        assert_eq!(reader.poll_line().await.unwrap(), Some("two".to_string()));
    }

    #[tokio::test]
    async fn poll_times_out_with_no_data() {
        let (_tx, rx) = tokio::io::duplex(256);
        let mut reader = LineReader::new(rx);

        assert_eq!(reader.poll_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn fragment_waits_for_terminator() {
        let (mut tx, rx) = tokio::io::duplex(256);
        let mut reader = LineReader::new(rx);

        tx.write_all(b"par").await.unwrap();
        assert_eq!(reader.poll_line().await.unwrap(), None);

        tx.write_all(b"tial\r\n").await.unwrap();
        assert_eq!(
            reader.poll_line().await.unwrap(),
            Some("partial".to_string())
        );
    }

    #[tokio::test]
    async fn closed_connection_is_an_error() {
        let (tx, rx) = tokio::io::duplex(256);
        let mut reader = LineReader::new(rx);

        drop(tx);

        assert!(matches!(
            reader.poll_line().await,
            Err(ConnectionError::Closed)
        ));
    }
}
