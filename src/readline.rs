use std::io::{self, Read};

use bytes::{BufMut, BytesMut};

/// Initial capacity of the line buffer, and the step it grows by.
pub const LINE_BLOCK: usize = 1024;

/// Pulls one line at a time out of the interactive input.
///
/// Bytes are pulled one by one from `input`; if that is itself buffered
/// (as a locked stdin is) the bytes after the line break have already left
/// the file descriptor and a child reading stdin will not see them.
///
/// The buffer is reused across lines: it is cleared between reads and
/// grows by [`LINE_BLOCK`] whenever the next byte would not fit, never
/// shrinking.
pub struct Reader<R> {
    input: R,
    buf: BytesMut,
}

impl<R: Read> Reader<R> {
    pub fn new(input: R) -> Self {
        Self { input, buf: BytesMut::with_capacity(LINE_BLOCK) }
    }

    /// Returns the next line without its break, or `None` once the input
    /// is exhausted and nothing is buffered.
    ///
    /// A trailing line with no break before end of input is returned as a
    /// regular line rather than being discarded; the following call yields
    /// `None`.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let mut byte = [0u8; 1];

        loop {
            let n = match self.input.read(&mut byte) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                break;
            }

            if byte[0] == b'\n' {
                break;
            }

            if self.buf.len() == self.buf.capacity() {
                self.buf.reserve(LINE_BLOCK);
            }
            self.buf.put_u8(byte[0]);
        }

        let line = String::from_utf8_lossy(&self.buf).into_owned();
        tracing::trace!(len = line.len(), "read line");
        Ok(Some(line))
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

#[cfg(test)]
mod reader_tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_lines_without_break () {
        let mut reader = Reader::new(Cursor::new("ls -a\npwd\n"));

        assert_eq!(reader.read_line().unwrap().as_deref(), Some("ls -a"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("pwd"));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn empty_input_is_end () {
        let mut reader = Reader::new(Cursor::new(""));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn blank_line_is_not_end () {
        let mut reader = Reader::new(Cursor::new("\n"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn unterminated_last_line () {
        let mut reader = Reader::new(Cursor::new("exit"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("exit"));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn keeps_carriage_return () {
        let mut reader = Reader::new(Cursor::new("pwd\r\n"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("pwd\r"));
    }

    #[test]
    fn grows_past_initial_block () {
        let long = "x".repeat(LINE_BLOCK * 2 + 10);
        let mut reader = Reader::new(Cursor::new(format!("{long}\nshort\n")));

        assert_eq!(reader.read_line().unwrap().unwrap(), long);
        let grown = reader.capacity();
        assert!(grown > LINE_BLOCK * 2);

        assert_eq!(reader.read_line().unwrap().as_deref(), Some("short"));
        assert!(reader.capacity() >= grown);
    }

    #[test]
    fn invalid_utf8_is_replaced () {
        let mut reader = Reader::new(Cursor::new(vec![b'a', 0xff, b'b', b'\n']));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("a\u{fffd}b"));
    }
}
