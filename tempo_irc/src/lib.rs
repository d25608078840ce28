//! IRC protocol plumbing for the Tempo bot.
//!
//! This crate owns the byte-level view of the connection: framing an
//! unbounded stream into CRLF-terminated lines, decomposing each line into
//! its protocol parts, and chunking outbound text into protocol-legal
//! message payloads. It knows nothing about timeboxes; higher layers decide
//! what the lines mean.

mod error;
pub use error::*;

mod message;
pub use message::*;

mod line_buffer;
pub use line_buffer::*;

mod line_reader;
pub use line_reader::*;

mod chunker;
pub use chunker::*;
