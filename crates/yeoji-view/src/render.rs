//! Rendering — one full frame of VT100 output per call.
//!
//! A frame is built entirely in an [`OutputBuffer`] and handed to the
//! terminal in a single write. Layout, top to bottom:
//!
//! ```text
//! ESC[?25l ESC[H                 hide cursor, home
//! <row 0> ESC[K \r\n             `height` text rows, each erased to EOL
//! ...
//! <col:row> ESC[K                status readout on the last terminal row
//! ESC[<row>;<col>H ESC[?25h      park the cursor, show it
//! ```
//!
//! Text rows are the visible slice of the buffer, cut at `width` bytes.
//! Rows past the end of the buffer show `~`; on an empty buffer the middle
//! row carries the centered welcome banner instead.

use std::io::{self, Write};

use yeoji_term::ansi;
use yeoji_term::output::OutputBuffer;

use crate::viewport::Viewport;

/// The banner shown on an empty buffer.
#[must_use]
pub fn default_banner() -> String {
    format!("Yeoji viewer -- version {}", env!("CARGO_PKG_VERSION"))
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws frames, reusing one output buffer across them.
#[derive(Debug)]
pub struct Renderer {
    out: OutputBuffer,
    banner: String,
}

impl Renderer {
    /// A renderer with the default welcome banner.
    #[must_use]
    pub fn new() -> Self {
        Self::with_banner(default_banner())
    }

    /// A renderer with a custom welcome banner.
    #[must_use]
    pub fn with_banner(banner: impl Into<String>) -> Self {
        Self {
            out: OutputBuffer::new(),
            banner: banner.into(),
        }
    }

    /// Build the frame for `view` and return its bytes.
    pub fn draw(&mut self, view: &Viewport) -> &[u8] {
        self.out.clear();
        draw_frame(view, &self.banner, &mut self.out);
        self.out.as_bytes()
    }

    /// Build the frame for `view` and write it to `w` in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn present(&mut self, view: &Viewport, w: &mut impl Write) -> io::Result<()> {
        self.draw(view);
        self.out.flush_to(w)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Frame composition
// ---------------------------------------------------------------------------

/// Append one complete frame for `view` to `out`.
///
/// Writes into an in-memory buffer can't fail, so the emitter results are
/// discarded.
pub fn draw_frame(view: &Viewport, banner: &str, out: &mut OutputBuffer) {
    ansi::cursor_hide(out).ok();
    ansi::cursor_home(out).ok();

    let width = view.width();
    let welcome_row = view.line_count() == 0;

    for y in 0..view.height() {
        match view.lines().get(y + view.scroll_top()) {
            Some(line) => out.append_truncated(line.as_bytes(), width),
            None if welcome_row && y == view.height() / 2 => {
                draw_banner(banner.as_bytes(), width, out);
            }
            None => out.append(b"~"),
        }
        ansi::erase_line(out).ok();
        out.append(b"\r\n");
    }

    draw_status(view, out);

    ansi::cursor_to(out, view.cursor_col(), view.screen_row()).ok();
    ansi::cursor_show(out).ok();
}

/// `~`, then padding, then the banner, centered within `width`.
fn draw_banner(banner: &[u8], width: usize, out: &mut OutputBuffer) {
    let len = banner.len().min(width);
    let mut padding = (width - len) / 2;
    if padding > 0 {
        out.append(b"~");
        padding -= 1;
    }
    out.append_repeated(b' ', padding);
    out.append(&banner[..len]);
}

/// `col:row` readout, each right-aligned in three columns.
fn draw_status(view: &Viewport, out: &mut OutputBuffer) {
    let status = format!("{:3}:{:3}", view.cursor_col(), view.cursor_row());
    out.append_truncated(status.as_bytes(), view.width());
    ansi::erase_line(out).ok();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
