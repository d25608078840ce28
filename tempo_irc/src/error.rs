use thiserror::Error;

/// An error that might occur on a single connection.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Connection closed")]
    Closed,
    #[error("I/O Error: {0}")]
    IoError(String),
    #[error("TLS Error: {0}")]
    Tls(String),
}

impl From<std::io::Error> for ConnectionError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}
