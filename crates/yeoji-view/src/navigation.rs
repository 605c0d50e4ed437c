//! Navigation — decoded keys to viewport changes.
//!
//! Dispatch happens in two steps. [`Command::from_key`] names what a key
//! means (arrows, `h`/`j`/`k`/`l`, paging, line start/end, Ctrl+Q), then
//! [`apply`] carries the command out on a [`Viewport`] and clamps the
//! cursor column against whatever line the cursor ended up on.
//!
//! Scrolling is not done here: the main loop calls
//! [`Viewport::scroll_to_cursor`] once per frame before drawing.

use yeoji_term::input::{Key, ctrl};

use crate::viewport::Viewport;

/// Key that ends the session.
pub const QUIT_KEY: u8 = ctrl(b'q');

/// ASCII backspace as sent by some terminals.
const BACKSPACE: u8 = 0x08;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// What a key asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    LineStart,
    LineEnd,
    /// Recognized but has no effect: the viewer is read-only.
    DeleteBackward,
    /// Recognized but has no effect: the viewer is read-only.
    DeleteForward,
    /// Any key without a binding.
    None,
}

impl Command {
    /// Map a decoded key to its command.
    #[must_use]
    pub const fn from_key(key: Key) -> Self {
        match key {
            Key::Char(QUIT_KEY) => Self::Quit,
            Key::Left | Key::Char(b'h') => Self::MoveLeft,
            Key::Down | Key::Char(b'j') => Self::MoveDown,
            Key::Up | Key::Char(b'k') => Self::MoveUp,
            Key::Right | Key::Char(b'l') => Self::MoveRight,
            Key::PageUp => Self::PageUp,
            Key::PageDown => Self::PageDown,
            Key::Home => Self::LineStart,
            Key::End => Self::LineEnd,
            Key::Char(BACKSPACE) => Self::DeleteBackward,
            Key::Delete => Self::DeleteForward,
            Key::Char(_) | Key::Escape => Self::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Whether the main loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Apply `key` to `view`.
pub fn apply(key: Key, view: &mut Viewport) -> Action {
    let command = Command::from_key(key);
    log::trace!("{key:?} -> {command:?}");

    match command {
        Command::Quit => return Action::Quit,
        Command::MoveLeft => view.move_left(),
        Command::MoveRight => view.move_right(),
        Command::MoveUp => view.move_up(),
        Command::MoveDown => view.move_down(),
        Command::PageUp => view.page_up(),
        Command::PageDown => view.page_down(),
        Command::LineStart => view.line_start(),
        Command::LineEnd => view.line_end(),
        Command::DeleteBackward | Command::DeleteForward | Command::None => {}
    }

    view.clamp_cursor_col();
    Action::Continue
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
