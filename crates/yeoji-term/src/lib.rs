// SPDX-License-Identifier: MIT
//
// yeoji-term — Terminal plumbing for the yeoji viewer.
//
// Everything that touches the terminal directly lives here: raw mode via
// termios, the window-size query (with a cursor-report fallback for
// terminals that don't answer TIOCGWINSZ), the escape-sequence key
// decoder, and the single-write output buffer.
//
// Like the rest of the project, this crate talks to the terminal with
// plain ANSI/VT100 bytes and libc. No TUI framework sits in between, so
// every byte we emit is one we chose.

pub mod ansi;
pub mod error;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;

pub use error::TerminalError;
