// SPDX-License-Identifier: MIT
//
// Key decoder.
//
// Turns the raw byte stream from a raw-mode terminal into one logical key
// per call. Plain bytes come through untouched; ESC-prefixed sequences for
// the arrow and navigation keys are recognized in the three shapes that
// common emulators send:
//
// - `ESC [ <letter>`       arrows, Home (`H`), End (`F`)
// - `ESC [ <digit> ~`      Home/End/Delete/PageUp/PageDown (vt220 style)
// - `ESC O <letter>`       Home/End in application cursor mode
//
// # Escape vs escape-sequence ambiguity
//
// A bare ESC byte could be the Escape key or the start of a sequence. The
// decoder resolves it with the terminal's read timeout: after ESC it makes
// two best-effort reads, and if either comes back empty the press was a
// lone Escape. Terminals deliver a whole sequence in one burst, so a real
// arrow key never trips the timeout.
//
// # Design
//
// The decoder is an explicit state machine (`State` + `step`). `step` is
// pure: it looks at one byte and either emits a key or moves to the next
// state. [`KeyDecoder::read_key`] drives it against a [`ByteSource`], which
// is how tests feed scripted byte streams without a terminal.

use std::collections::VecDeque;
use std::io;

// ─── Key ────────────────────────────────────────────────────────────────────

/// The escape byte (0x1B).
pub const ESC: u8 = 0x1B;

/// Byte produced by Ctrl+`c` for an ASCII letter `c`.
#[inline]
#[must_use]
pub const fn ctrl(c: u8) -> u8 {
    c & 0x1f
}

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Any byte that didn't start an escape sequence, including control
    /// bytes such as Ctrl+Q (`0x11`) and backspace (`0x08`).
    Char(u8),
    /// A lone ESC, or an ESC sequence we don't recognize.
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

// ─── ByteSource ─────────────────────────────────────────────────────────────

/// Something that yields input bytes one at a time.
///
/// `Ok(None)` means the read timed out with no data. That's the normal
/// idle state of a raw-mode terminal (VMIN=0, VTIME=1), not an error.
pub trait ByteSource {
    /// Read a single byte.
    ///
    /// # Errors
    ///
    /// Returns an error only for hard failures. A timeout is `Ok(None)`.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

/// An in-memory source. An empty queue behaves like a read timeout.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

// ─── State machine ──────────────────────────────────────────────────────────

/// Decoder state between bytes of one keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the first byte of a key.
    Normal,
    /// Saw ESC, waiting for the introducer byte.
    SawEscape,
    /// Saw ESC plus one more byte. Only `[` and `O` can still lead to a
    /// key, but any byte lands here because the second follow byte is
    /// always consumed.
    SawBracketOrO(u8),
    /// Saw `ESC [ <digit>`, waiting for the closing `~`.
    SawDigit(u8),
}

/// Outcome of feeding one byte to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Emit(Key),
    Next(State),
}

/// Advance the decoder by one byte.
const fn step(state: State, byte: u8) -> Step {
    match state {
        State::Normal => {
            if byte == ESC {
                Step::Next(State::SawEscape)
            } else {
                Step::Emit(Key::Char(byte))
            }
        }
        State::SawEscape => Step::Next(State::SawBracketOrO(byte)),
        State::SawBracketOrO(b'[') => match byte {
            b'0'..=b'9' => Step::Next(State::SawDigit(byte)),
            b'A' => Step::Emit(Key::Up),
            b'B' => Step::Emit(Key::Down),
            b'C' => Step::Emit(Key::Right),
            b'D' => Step::Emit(Key::Left),
            b'H' => Step::Emit(Key::Home),
            b'F' => Step::Emit(Key::End),
            _ => Step::Emit(Key::Escape),
        },
        State::SawBracketOrO(b'O') => match byte {
            b'H' => Step::Emit(Key::Home),
            b'F' => Step::Emit(Key::End),
            _ => Step::Emit(Key::Escape),
        },
        State::SawBracketOrO(_) => Step::Emit(Key::Escape),
        State::SawDigit(digit) => {
            if byte != b'~' {
                return Step::Emit(Key::Escape);
            }
            Step::Emit(match digit {
                b'1' | b'7' => Key::Home,
                b'4' | b'8' => Key::End,
                b'3' => Key::Delete,
                b'5' => Key::PageUp,
                b'6' => Key::PageDown,
                _ => Key::Escape,
            })
        }
    }
}

// ─── KeyDecoder ─────────────────────────────────────────────────────────────

/// Reads one logical key per call from a [`ByteSource`].
///
/// # Example
///
/// ```
/// use std::collections::VecDeque;
/// use yeoji_term::input::{Key, KeyDecoder};
///
/// let mut input: VecDeque<u8> = b"\x1b[A".iter().copied().collect();
/// let key = KeyDecoder::new().read_key(&mut input)?;
/// assert_eq!(key, Key::Up);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyDecoder;

impl KeyDecoder {
    /// Create a decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Block until a key arrives and return it.
    ///
    /// The first byte is awaited indefinitely: timeouts are retried. Bytes
    /// after an ESC are best-effort, so a timeout or failed read there ends
    /// the key as [`Key::Escape`].
    ///
    /// # Errors
    ///
    /// Returns the source's error if the first read fails hard.
    pub fn read_key<S: ByteSource + ?Sized>(&mut self, src: &mut S) -> io::Result<Key> {
        let first = loop {
            if let Some(byte) = src.read_byte()? {
                break byte;
            }
        };

        let mut state = match step(State::Normal, first) {
            Step::Emit(key) => {
                log::trace!("key {key:?}");
                return Ok(key);
            }
            Step::Next(next) => next,
        };

        loop {
            let Ok(Some(byte)) = src.read_byte() else {
                log::trace!("key Escape (sequence timed out in {state:?})");
                return Ok(Key::Escape);
            };
            match step(state, byte) {
                Step::Emit(key) => {
                    log::trace!("key {key:?}");
                    return Ok(key);
                }
                Step::Next(next) => state = next,
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
