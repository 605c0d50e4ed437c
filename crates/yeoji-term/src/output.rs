// SPDX-License-Identifier: MIT
//
// Output buffering.
//
// OutputBuffer accumulates every byte of a frame in memory so the whole
// frame reaches the terminal in a single write() call. Writing row by row
// lets the terminal paint half a frame between syscalls, which shows up
// as tearing and a cursor that visibly jumps around during redraw.

use std::io::{self, Write};

/// An append-only byte accumulator for one frame of terminal output.
///
/// Everything the renderer produces goes in here first. A single
/// [`flush_to`](Self::flush_to) at frame end writes it all at once.
///
/// Default capacity is 16 KB: a full screen of text plus escape sequences
/// fits without reallocation.
#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 16_384;

impl OutputBuffer {
    /// Create an empty buffer with default capacity (16 KB).
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append raw bytes.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append at most `max` bytes from the front of `bytes`.
    #[inline]
    pub fn append_truncated(&mut self, bytes: &[u8], max: usize) {
        self.append(&bytes[..bytes.len().min(max)]);
    }

    /// Append `n` copies of `byte`.
    pub fn append_repeated(&mut self, byte: u8, n: usize) {
        self.buf.resize(self.buf.len() + n, byte);
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to `w` in one call and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing happens in flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Counts `write` calls so tests can check a flush is one syscall's worth.
    struct CountingWriter {
        data: Vec<u8>,
        writes: usize,
    }

    impl Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn new_is_empty() {
        let buf = OutputBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn write_trait() {
        let mut buf = OutputBuffer::new();
        write!(buf, "row {}", 42).unwrap();
        assert_eq!(buf.as_bytes(), b"row 42");
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn append_accumulates_in_order() {
        let mut buf = OutputBuffer::new();
        buf.append(b"~");
        buf.append(b"\x1b[K");
        buf.append(b"\r\n");
        assert_eq!(buf.as_bytes(), b"~\x1b[K\r\n");
    }

    #[test]
    fn append_truncated_cuts_long_input() {
        let mut buf = OutputBuffer::new();
        buf.append_truncated(b"abcdefgh", 3);
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn append_truncated_keeps_short_input() {
        let mut buf = OutputBuffer::new();
        buf.append_truncated(b"ab", 10);
        assert_eq!(buf.as_bytes(), b"ab");
    }

    #[test]
    fn append_truncated_zero_width() {
        let mut buf = OutputBuffer::new();
        buf.append_truncated(b"abc", 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn append_repeated_spaces() {
        let mut buf = OutputBuffer::new();
        buf.append(b"~");
        buf.append_repeated(b' ', 4);
        assert_eq!(buf.as_bytes(), b"~    ");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = OutputBuffer::new();
        buf.append(b"some data");
        let cap = buf.buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.buf.capacity(), cap);
    }

    #[test]
    fn flush_to_writes_once_and_clears() {
        let mut buf = OutputBuffer::new();
        buf.append(b"\x1b[?25l");
        buf.append(b"frame data");
        buf.append(b"\x1b[?25h");

        let mut dest = CountingWriter {
            data: Vec::new(),
            writes: 0,
        };
        buf.flush_to(&mut dest).unwrap();

        assert_eq!(dest.data, b"\x1b[?25lframe data\x1b[?25h");
        assert_eq!(dest.writes, 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn flush_to_empty_is_noop() {
        let mut buf = OutputBuffer::new();
        let mut dest = Vec::new();
        buf.flush_to(&mut dest).unwrap();
        assert!(dest.is_empty());
    }
}
