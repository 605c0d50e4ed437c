// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Stdin byte source — single-byte reads bounded by the terminal timeout.
//
// In raw mode the viewer sets VMIN=0 / VTIME=1, so `read()` on stdin
// returns after at most ~100ms with zero or one byte. That timeout is the
// only suspension point in the program: the key decoder simply calls
// `read_byte` again when nothing arrived. No reader thread, no channel.
//
// # Termination signals
//
// Raw mode disables ISIG, so Ctrl+C never raises SIGINT from the keyboard,
// but `kill` still can, and so can a closing terminal (SIGHUP). Dying on
// those with the default action would leave the terminal in raw mode. We
// install handlers that only record the signal number in an atomic, then
// report it from the next `read_byte` as an `Interrupted` error. That
// error travels the normal error path: teardown, restore, exit 1.

use std::io;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::input::ByteSource;

// ─── Termination signals ────────────────────────────────────────────────────

/// Last termination signal received, or 0 if none.
static TERMINATION_SIGNAL: AtomicI32 = AtomicI32::new(0);

/// Install handlers for SIGTERM, SIGHUP and SIGINT.
///
/// The handler only stores the signal number, which is async-signal-safe.
/// No `SA_RESTART`: a blocked `read()` must return early with `EINTR`.
#[cfg(unix)]
pub fn install_termination_handlers() {
    for sig in [libc::SIGTERM, libc::SIGHUP, libc::SIGINT] {
        unsafe {
            let mut sa: libc::sigaction = std::mem::zeroed();
            sa.sa_sigaction = termination_handler as *const () as usize;
            sa.sa_flags = 0;
            libc::sigemptyset(&raw mut sa.sa_mask);
            libc::sigaction(sig, &raw const sa, std::ptr::null_mut());
        }
    }
}

#[cfg(not(unix))]
pub fn install_termination_handlers() {
    // No-op on non-unix platforms.
}

#[cfg(unix)]
extern "C" fn termination_handler(sig: libc::c_int) {
    TERMINATION_SIGNAL.store(sig, Ordering::Relaxed);
}

/// The termination signal received so far, if any.
#[must_use]
pub fn pending_signal() -> Option<i32> {
    match TERMINATION_SIGNAL.load(Ordering::Relaxed) {
        0 => None,
        sig => Some(sig),
    }
}

// ─── StdinSource ────────────────────────────────────────────────────────────

/// Reads the raw-mode terminal one byte at a time.
///
/// A read that times out yields `Ok(None)`; so do `EAGAIN` (some platforms
/// report the VTIME timeout that way) and `EINTR` without a pending
/// termination signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

impl StdinSource {
    /// Create a source reading from fd 0.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ByteSource for StdinSource {
    #[cfg(unix)]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        check_termination()?;

        let mut byte = 0u8;
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };

        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => {
                        check_termination()?;
                        Ok(None)
                    }
                    _ => Err(err),
                }
            }
        }
    }

    /// Non-unix fallback: plain blocking reads, no timeout.
    #[cfg(not(unix))]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

/// Fail with `Interrupted` once a termination signal has arrived.
fn check_termination() -> io::Result<()> {
    pending_signal().map_or(Ok(()), |sig| {
        Err(io::Error::new(
            io::ErrorKind::Interrupted,
            format!("terminated by signal {sig}"),
        ))
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
