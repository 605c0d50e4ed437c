//! Lines — the rows the viewer displays.
//!
//! A [`Line`] is an owned byte string with no line terminator. The viewer
//! never interprets encodings: a line is shown byte for byte, and widths,
//! columns and truncation are all counted in bytes.
//!
//! Ingestion splits on `\n` and strips every trailing `\n`/`\r` from each
//! line, so LF and CRLF files load the same way. A final line without a
//! newline is kept; an empty file has no lines at all.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// One line of text, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    /// Wrap `bytes` as a line. The caller guarantees there is no `\n`/`\r`.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the line has no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The line's bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// A file that couldn't be loaded.
#[derive(Debug, Error)]
#[error("cannot open {}: {source}", .path.display())]
pub struct LoadError {
    /// The path that was being opened.
    pub path: PathBuf,
    /// What the OS said.
    #[source]
    pub source: io::Error,
}

/// Split `reader` into lines.
///
/// # Errors
///
/// Returns an error if reading fails part-way.
pub fn read_lines(mut reader: impl BufRead) -> io::Result<Vec<Line>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        lines.push(Line::new(buf.as_slice()));
    }

    Ok(lines)
}

/// Load the file at `path` as lines.
///
/// # Errors
///
/// Returns [`LoadError`] if the file can't be opened or read.
pub fn load(path: &Path) -> Result<Vec<Line>, LoadError> {
    let wrap = |source| LoadError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(wrap)?;
    let lines = read_lines(BufReader::new(file)).map_err(wrap)?;
    log::debug!("loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
