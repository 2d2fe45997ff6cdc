//! CRLF line framing over a streaming socket.
//!
//! Socket reads arrive in arbitrary chunks. [`LineFramer`] keeps the bytes
//! that have not yet formed a complete line and hands back every complete
//! line, terminator stripped, as soon as its `\r\n` has been seen. A
//! terminator split across two reads is handled because the buffer persists
//! between calls.

/// Protocol line terminator.
pub const TERMINATOR: &[u8] = b"\r\n";

#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `bytes` and drain every complete line now in the buffer.
    ///
    /// Lines are decoded as UTF-8 with invalid sequences replaced, so a bad
    /// byte never aborts the receive loop. Decoding happens per line, after
    /// framing, so multi-byte characters split across reads stay intact.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(pos) = find_terminator(&self.buf[start..]) {
            let end = start + pos;
            lines.push(String::from_utf8_lossy(&self.buf[start..end]).into_owned());
            start = end + TERMINATOR.len();
        }
        self.buf.drain(..start);
        lines
    }

    /// Bytes still waiting for a terminator.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }
}

fn find_terminator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(TERMINATOR.len())
        .position(|window| window == TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_multiple_lines() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b"PING :abc\r\n"), vec!["PING :abc"]);
        assert!(framer.pending().is_empty());

        let lines = framer.feed(b"one\r\ntwo\r\nthr");
        assert_eq!(lines, vec!["one", "two"]);
        assert_eq!(framer.pending(), b"thr");
        assert_eq!(framer.feed(b"ee\r\n"), vec!["three"]);
    }

    #[test]
    fn test_terminator_split_across_reads() {
        let mut framer = LineFramer::new();
        assert!(framer.feed(b"hello\r").is_empty());
        assert_eq!(framer.feed(b"\nworld\r\n"), vec!["hello", "world"]);
    }

    #[test]
    fn test_empty_line_and_bare_newline() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b"\r\n"), vec![""]);
        // A lone LF is not a terminator.
        assert!(framer.feed(b"a\nb").is_empty());
        assert_eq!(framer.pending(), b"a\nb");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut framer = LineFramer::new();
        let lines = framer.feed(b"bad \xff byte\r\n");
        assert_eq!(lines, vec!["bad \u{fffd} byte"]);
    }

    #[test]
    fn test_multibyte_char_split_across_reads() {
        let mut framer = LineFramer::new();
        let bytes = "caf\u{e9}\r\n".as_bytes();
        assert!(framer.feed(&bytes[..4]).is_empty());
        assert_eq!(framer.feed(&bytes[4..]), vec!["caf\u{e9}"]);
    }

    #[test]
    fn test_framing_is_lossless_for_any_chunking() {
        let input = b":srv 001 me :Welcome\r\nPING :x\r\n\r\n:a!b@c PRIVMSG #r :hi there\r\ntail";
        for chunk in 1..=input.len() {
            let mut framer = LineFramer::new();
            let mut rebuilt = Vec::new();
            for piece in input.chunks(chunk) {
                for line in framer.feed(piece) {
                    rebuilt.extend_from_slice(line.as_bytes());
                    rebuilt.extend_from_slice(TERMINATOR);
                }
            }
            rebuilt.extend_from_slice(framer.pending());
            assert_eq!(rebuilt, input, "chunk size {}", chunk);
        }
    }
}
