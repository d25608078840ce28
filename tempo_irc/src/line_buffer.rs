/// Accumulates raw bytes from the socket and splits out complete
/// CRLF-terminated lines.
///
/// Bytes are decoded as UTF-8 with replacement of undecodable sequences, so
/// feeding this buffer never fails. The trailing incomplete fragment is
/// retained until the terminator arrives in a later chunk.
#[derive(Debug, Default)]
pub struct LineBuffer {
    partial: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of received bytes, returning every line completed by
    /// it, in order and without terminators.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.partial.push_str(&String::from_utf8_lossy(bytes));

        let mut lines = Vec::new();
        while let Some(offset) = self.partial.find("\r\n") {
            let rest = self.partial.split_off(offset + 2);
            self.partial.truncate(offset);
            lines.push(std::mem::replace(&mut self.partial, rest));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.push(b"PING :token\r\n"), vec!["PING :token"]);
    }

    #[test]
    fn fragment_retained_across_pushes() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"PING :to").is_empty());
        assert_eq!(buffer.push(b"ken\r\n"), vec!["PING :token"]);
    }

    #[test]
    fn multiple_lines_in_one_chunk() {
        let mut buffer = LineBuffer::new();
        assert_eq!(
            buffer.push(b"one\r\ntwo\r\nthr"),
            vec!["one", "two"]
        );
        assert_eq!(buffer.push(b"ee\r\n"), vec!["three"]);
    }

    #[test]
    fn terminator_split_across_chunks() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"one\r").is_empty());
        assert_eq!(buffer.push(b"\ntwo\r\n"), vec!["one", "two"]);
    }

    #[test]
    fn invalid_utf8_replaced() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"bad \xff\xfe byte\r\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("bad "));
        assert!(lines[0].ends_with(" byte"));
    }

    #[test]
    fn bare_lf_is_not_a_terminator() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"one\ntwo").is_empty());
        assert_eq!(buffer.push(b"\r\n"), vec!["one\ntwo"]);
    }
}
