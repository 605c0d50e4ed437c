//! Viewport — the loaded lines plus cursor and scroll state.
//!
//! The cursor is a `(row, col)` position in the *buffer*: `row` indexes
//! `lines`, `col` is a byte offset within that line. `scroll_top` is the
//! first buffer row shown on screen. The model keeps two invariants:
//!
//! - `row <= max(lines.len() - 1, 0)` and `col <= lines[row].len()`
//!   (enforced by every movement plus [`Viewport::clamp_cursor_col`])
//! - `scroll_top <= row < scroll_top + height`, restored by
//!   [`Viewport::scroll_to_cursor`], which the main loop runs once per
//!   frame before drawing
//!
//! Movement never scrolls on its own, except for page moves which shift
//! the view together with the cursor.

use yeoji_term::terminal::Size;

use crate::line::Line;

/// Terminal rows kept for the status line.
pub const STATUS_ROWS: usize = 1;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Everything the renderer needs to draw a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    lines: Vec<Line>,
    cursor_col: usize,
    cursor_row: usize,
    scroll_top: usize,
    height: usize,
    width: usize,
}

impl Viewport {
    /// Create a viewport of `height` text rows and `width` columns.
    ///
    /// A zero height is bumped to one so the cursor always has a row.
    #[must_use]
    pub fn new(lines: Vec<Line>, height: usize, width: usize) -> Self {
        Self {
            lines,
            cursor_col: 0,
            cursor_row: 0,
            scroll_top: 0,
            height: height.max(1),
            width,
        }
    }

    /// Create a viewport filling a terminal of `size`, minus the status row.
    #[must_use]
    pub fn from_size(lines: Vec<Line>, size: Size) -> Self {
        let height = usize::from(size.rows).saturating_sub(STATUS_ROWS);
        Self::new(lines, height, usize::from(size.cols))
    }

    // -- Accessors ----------------------------------------------------------

    /// All loaded lines.
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of loaded lines.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub const fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    #[inline]
    #[must_use]
    pub const fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    #[inline]
    #[must_use]
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Visible text rows (the status row excluded).
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Visible columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The line under the cursor, if the buffer has one.
    #[must_use]
    pub fn current_line(&self) -> Option<&Line> {
        self.lines.get(self.cursor_row)
    }

    /// Length of the line under the cursor, 0 past the end of the buffer.
    #[must_use]
    pub fn current_line_len(&self) -> usize {
        self.current_line().map_or(0, Line::len)
    }

    /// Cursor row relative to the top of the screen.
    #[must_use]
    pub const fn screen_row(&self) -> usize {
        self.cursor_row.saturating_sub(self.scroll_top)
    }

    /// Highest valid cursor row.
    fn last_row(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    // -- Cursor movement ----------------------------------------------------

    /// One byte left, stopping at column 0.
    pub const fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    /// One byte right, stopping just past the last byte of the line.
    pub fn move_right(&mut self) {
        if self.cursor_col < self.current_line_len() {
            self.cursor_col += 1;
        }
    }

    /// One row up, stopping at the first row.
    pub const fn move_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
    }

    /// One row down, stopping at the last line.
    pub fn move_down(&mut self) {
        if self.cursor_row < self.last_row() {
            self.cursor_row += 1;
        }
    }

    /// Start of the current line.
    pub const fn line_start(&mut self) {
        self.cursor_col = 0;
    }

    /// Just past the end of the current line.
    pub fn line_end(&mut self) {
        self.cursor_col = self.current_line_len();
    }

    /// One screen up: cursor and view move together, clamped at the top.
    pub const fn page_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(self.height);
        if self.scroll_top < self.height {
            self.scroll_top = 0;
            self.cursor_row = 0;
        } else {
            self.scroll_top -= self.height;
        }
    }

    /// One screen down: cursor and view move together.
    ///
    /// The cursor stops at the last line. When the next screen would reach
    /// past the end of the buffer, the view settles so the last line sits
    /// on the bottom row and the cursor lands on it.
    pub fn page_down(&mut self) {
        let n = self.lines.len();
        self.cursor_row = (self.cursor_row + self.height).min(self.last_row());

        let top = self.scroll_top + self.height;
        if top + self.height >= n {
            self.scroll_top = n.saturating_sub(self.height + 1);
            self.cursor_row = self.last_row();
        } else {
            self.scroll_top = top;
        }
    }

    // -- Invariant maintenance ----------------------------------------------

    /// Pull the column back inside the (possibly new) current line.
    pub fn clamp_cursor_col(&mut self) {
        self.cursor_col = self.cursor_col.min(self.current_line_len());
    }

    /// Scroll just enough to keep the cursor row on screen.
    pub const fn scroll_to_cursor(&mut self) {
        if self.cursor_row < self.scroll_top {
            self.scroll_top = self.cursor_row;
        } else if self.cursor_row >= self.scroll_top + self.height {
            self.scroll_top = self.cursor_row + 1 - self.height;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
