// SPDX-License-Identifier: MIT
//
// Terminal errors.
//
// Every failure here is a terminal-capability problem: stdin isn't a TTY,
// an attribute call failed, or neither size probe produced an answer.
// None of them are retried; the caller tears down and exits.

use std::io;

use thiserror::Error;

/// A terminal-capability failure.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// `tcgetattr` failed (stdin is not a terminal, or the ioctl errored).
    #[error("failed to read terminal attributes: {0}")]
    GetAttributes(#[source] io::Error),

    /// `tcsetattr` failed while entering or leaving raw mode.
    #[error("failed to set terminal attributes: {0}")]
    SetAttributes(#[source] io::Error),

    /// Both the `TIOCGWINSZ` query and the cursor-report fallback failed.
    #[error("failed to determine terminal size")]
    WindowSize,

    /// Writing a probe sequence or reading its reply failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}
