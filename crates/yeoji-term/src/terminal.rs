// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, size query, and RAII cleanup.
//
// Unsafe is confined to tcgetattr/tcsetattr, the TIOCGWINSZ ioctl and the
// raw fd write in the panic hook.
//
// [`Terminal`] owns the terminal's raw state. It snapshots the original
// attributes once, switches to raw mode, and guarantees the snapshot is
// reapplied when the handle is dropped: on a clean quit, on an early `?`
// return from anywhere up the stack, and (via a process-wide panic hook)
// on panic.
//
// Attribute access goes through the [`ModeBackend`] trait. Production uses
// [`Termios`] on stdin; tests plug in a recording fake so restoration can be
// checked for exact equality without a real TTY.
//
// The panic hook bypasses Rust's stdout lock entirely, writing a pre-built
// restore sequence directly to fd 1, so a panic raised while the stdout
// lock is held (mid-frame flush) can't deadlock.
#![allow(unsafe_code)]

use std::io::{self, Write};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;

use crate::ansi;
use crate::error::TerminalError;
use crate::input::{ByteSource, ESC};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

// ─── ModeBackend ────────────────────────────────────────────────────────────

/// Access to the terminal's line-discipline attributes.
pub trait ModeBackend {
    /// An opaque attribute snapshot.
    type Attrs: Clone;

    /// Read the current attributes.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a terminal or the query errors.
    fn capture(&mut self) -> io::Result<Self::Attrs>;

    /// Apply `attrs`, discarding pending input.
    ///
    /// # Errors
    ///
    /// Fails if the terminal rejects the attributes.
    fn apply(&mut self, attrs: &Self::Attrs) -> io::Result<()>;

    /// Derive the raw-mode attribute set from `original`.
    fn make_raw(&self, original: &Self::Attrs) -> Self::Attrs;

    /// Ask the OS for the window size. `None` if it can't say.
    fn window_size(&self) -> Option<Size>;

    /// Called once the original attributes are back in place.
    fn release(&mut self) {}
}

// ─── Termios ────────────────────────────────────────────────────────────────

/// The real backend: termios on stdin, `TIOCGWINSZ` on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Termios;

/// Global backup of the original termios for panic recovery.
///
/// The [`Terminal`] owns its own copy, but the panic hook can't reach it.
/// The hook restores cooked mode from this copy. `None` outside raw mode.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Derive raw-mode attributes from `original`.
///
/// - no echo, no canonical line buffering, no signal keys, no `IEXTEN`
/// - no XON/XOFF flow control, no CR→NL, no break→SIGINT, no parity
///   check, no 8th-bit stripping
/// - no output post-processing (`\n` is not turned into `\r\n`)
/// - 8-bit characters
/// - `read()` returns after 100ms even with no input (VMIN=0, VTIME=1)
#[cfg(unix)]
#[must_use]
pub fn raw_termios(original: &libc::termios) -> libc::termios {
    let mut raw = *original;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
    raw.c_iflag &= !(libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = 1;
    raw
}

#[cfg(unix)]
impl ModeBackend for Termios {
    type Attrs = libc::termios;

    fn capture(&mut self) -> io::Result<libc::termios> {
        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }

        // Also save to the global backup for the panic hook.
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = Some(termios);
        }
        install_panic_hook();

        Ok(termios)
    }

    fn apply(&mut self, attrs: &libc::termios) -> io::Result<()> {
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, attrs) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn make_raw(&self, original: &libc::termios) -> libc::termios {
        raw_termios(original)
    }

    fn window_size(&self) -> Option<Size> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

        if result == 0 && ws.ws_col > 0 {
            Some(Size {
                cols: ws.ws_col,
                rows: ws.ws_row,
            })
        } else {
            None
        }
    }

    fn release(&mut self) {
        // Cooked mode is back; nothing left for the panic hook to undo.
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }
    }
}

#[cfg(not(unix))]
impl ModeBackend for Termios {
    type Attrs = ();

    fn capture(&mut self) -> io::Result<()> {
        install_panic_hook();
        Ok(())
    }

    fn apply(&mut self, _attrs: &()) -> io::Result<()> {
        Ok(())
    }

    fn make_raw(&self, _original: &()) {}

    fn window_size(&self) -> Option<Size> {
        None
    }
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Clear the screen and restore termios from the global backup.
///
/// Does nothing outside raw mode. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            emergency_restore();
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Emergency restore sequence: clear screen, cursor home, show cursor.
///
/// The panic message is printed right after this, so it lands on a clean
/// screen at the top-left with a visible cursor.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[2J\x1b[H\x1b[?25h";

/// Installs the panic hook at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without this, a panic in raw mode leaves the user's terminal broken:
/// no echo, no line editing, no way to read the error message.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            #[cfg(unix)]
            restore_from_backup();

            #[cfg(not(unix))]
            emergency_restore();

            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Cursor Position Report ─────────────────────────────────────────────────

/// Longest DSR reply we are willing to read.
const CURSOR_REPORT_MAX: usize = 32;

/// Read a cursor position report (`ESC [ rows ; cols R`) from `input`.
///
/// Stops at the terminating `R` (not included), at a read that yields no
/// byte, or after [`CURSOR_REPORT_MAX`] bytes.
fn read_cursor_report(input: &mut (impl ByteSource + ?Sized)) -> io::Result<Vec<u8>> {
    let mut reply = Vec::with_capacity(CURSOR_REPORT_MAX);
    while reply.len() < CURSOR_REPORT_MAX {
        match input.read_byte()? {
            Some(b'R') | None => break,
            Some(byte) => reply.push(byte),
        }
    }
    Ok(reply)
}

/// Parse the body of a cursor position report into a [`Size`].
///
/// `reply` is everything before the terminating `R`: `ESC [ rows ; cols`.
#[must_use]
pub fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let body = reply.strip_prefix(&[ESC, b'['])?;
    let sep = body.iter().position(|&b| b == b';')?;
    let rows = parse_decimal(&body[..sep])?;
    let cols = parse_decimal(&body[sep + 1..])?;
    Some(Size { cols, rows })
}

/// Parse a non-empty run of ASCII digits.
fn parse_decimal(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// Call [`enter`](Self::enter) to switch to raw mode. The original mode is
/// reapplied by [`leave`](Self::leave), or automatically when the handle is
/// dropped, including on an early error return or a panic.
///
/// # Example
///
/// ```no_run
/// use yeoji_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... draw frames, read keys ...
/// // Terminal is restored automatically on drop.
/// # Ok::<(), yeoji_term::TerminalError>(())
/// ```
pub struct Terminal<B: ModeBackend = Termios, W: Write = io::Stdout> {
    backend: B,
    out: W,
    /// Attributes captured by `enter`. `Some` exactly while in raw mode.
    original: Option<B::Attrs>,
}

impl Terminal {
    /// A handle on the process's controlling terminal (stdin/stdout).
    ///
    /// Does **not** enter raw mode; call [`enter`](Self::enter) for that.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(Termios, io::stdout())
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ModeBackend, W: Write> Terminal<B, W> {
    /// Build a handle from an explicit backend and output writer.
    pub const fn with_backend(backend: B, out: W) -> Self {
        Self {
            backend,
            out,
            original: None,
        }
    }

    /// Whether raw mode is currently active.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.original.is_some()
    }

    /// The output stream frames are written to.
    #[inline]
    pub const fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Enter raw mode.
    ///
    /// Idempotent: calling `enter()` while already raw is a no-op.
    ///
    /// # Errors
    ///
    /// [`TerminalError::GetAttributes`] if the current mode can't be read
    /// (typically: stdin is not a terminal), [`TerminalError::SetAttributes`]
    /// if the raw mode is rejected. The terminal is untouched in both cases.
    pub fn enter(&mut self) -> Result<(), TerminalError> {
        if self.is_raw() {
            return Ok(());
        }

        let original = self
            .backend
            .capture()
            .map_err(TerminalError::GetAttributes)?;
        let raw = self.backend.make_raw(&original);

        if let Err(e) = self.backend.apply(&raw) {
            self.backend.release();
            return Err(TerminalError::SetAttributes(e));
        }

        self.original = Some(original);
        log::debug!("raw mode entered");
        Ok(())
    }

    /// Leave raw mode: clear the screen, home the cursor, and reapply the
    /// attributes captured by [`enter`](Self::enter).
    ///
    /// Idempotent: calling `leave()` outside raw mode is a no-op. The
    /// attributes are restored even if the screen can't be cleared.
    ///
    /// # Errors
    ///
    /// [`TerminalError::SetAttributes`] if the original mode is rejected,
    /// otherwise [`TerminalError::Io`] if the clear sequence can't be written.
    pub fn leave(&mut self) -> Result<(), TerminalError> {
        let Some(original) = self.original.take() else {
            return Ok(());
        };

        let cleared = ansi::clear_screen(&mut self.out)
            .and_then(|()| ansi::cursor_home(&mut self.out))
            .and_then(|()| self.out.flush());

        let restored = self.backend.apply(&original);
        if restored.is_ok() {
            self.backend.release();
            log::debug!("raw mode left, original attributes restored");
        }

        restored.map_err(TerminalError::SetAttributes)?;
        cleared?;
        Ok(())
    }

    /// Determine the window size.
    ///
    /// Asks the OS first. If that fails or reports zero columns, pushes the
    /// cursor to the bottom-right corner and asks the terminal where it
    /// ended up, reading the reply from `input`.
    ///
    /// # Errors
    ///
    /// [`TerminalError::WindowSize`] if neither probe produces a size,
    /// [`TerminalError::Io`] if the probe sequences can't be written.
    pub fn size(&mut self, input: &mut (impl ByteSource + ?Sized)) -> Result<Size, TerminalError> {
        if let Some(size) = self.backend.window_size().filter(|s| s.cols > 0) {
            log::debug!("window size {}x{} from ioctl", size.cols, size.rows);
            return Ok(size);
        }

        ansi::cursor_to_bottom_right(&mut self.out)?;
        ansi::request_cursor_position(&mut self.out)?;
        self.out.flush()?;

        let reply = read_cursor_report(input)?;
        let size = parse_cursor_report(&reply).ok_or(TerminalError::WindowSize)?;
        log::debug!("window size {}x{} from cursor report", size.cols, size.rows);
        Ok(size)
    }
}

impl<B: ModeBackend, W: Write> Drop for Terminal<B, W> {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            log::warn!("failed to restore terminal: {e}");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    // ── Fake backend ────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct FakeAttrs {
        echo: bool,
        canonical: bool,
        vmin: u8,
        vtime: u8,
        /// Something raw mode must not touch.
        speed: u32,
    }

    const COOKED: FakeAttrs = FakeAttrs {
        echo: true,
        canonical: true,
        vmin: 1,
        vtime: 0,
        speed: 38_400,
    };

    #[derive(Debug, Default)]
    struct FakeState {
        current: Option<FakeAttrs>,
        applied: Vec<FakeAttrs>,
        released: usize,
        fail_capture: bool,
        fail_apply: bool,
    }

    #[derive(Clone)]
    struct FakeBackend {
        state: Rc<RefCell<FakeState>>,
        size: Option<Size>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                state: Rc::new(RefCell::new(FakeState {
                    current: Some(COOKED),
                    ..FakeState::default()
                })),
                size: Some(Size { cols: 80, rows: 24 }),
            }
        }

        fn current(&self) -> Option<FakeAttrs> {
            self.state.borrow().current.clone()
        }
    }

    impl ModeBackend for FakeBackend {
        type Attrs = FakeAttrs;

        fn capture(&mut self) -> io::Result<FakeAttrs> {
            let state = self.state.borrow();
            if state.fail_capture {
                return Err(io::Error::other("not a tty"));
            }
            Ok(state.current.clone().unwrap())
        }

        fn apply(&mut self, attrs: &FakeAttrs) -> io::Result<()> {
            let mut state = self.state.borrow_mut();
            if state.fail_apply {
                return Err(io::Error::other("tcsetattr failed"));
            }
            state.current = Some(attrs.clone());
            state.applied.push(attrs.clone());
            Ok(())
        }

        fn make_raw(&self, original: &FakeAttrs) -> FakeAttrs {
            FakeAttrs {
                echo: false,
                canonical: false,
                vmin: 0,
                vtime: 1,
                ..original.clone()
            }
        }

        fn window_size(&self) -> Option<Size> {
            self.size
        }

        fn release(&mut self) {
            self.state.borrow_mut().released += 1;
        }
    }

    fn fake_terminal() -> (Terminal<FakeBackend, Vec<u8>>, FakeBackend) {
        let backend = FakeBackend::new();
        (Terminal::with_backend(backend.clone(), Vec::new()), backend)
    }

    // ── Raw mode lifecycle ──────────────────────────────────────────

    #[test]
    fn enter_applies_raw_attributes() {
        let (mut term, backend) = fake_terminal();
        term.enter().unwrap();

        assert!(term.is_raw());
        let raw = backend.current().unwrap();
        assert!(!raw.echo);
        assert!(!raw.canonical);
        assert_eq!((raw.vmin, raw.vtime), (0, 1));
        assert_eq!(raw.speed, COOKED.speed);
    }

    #[test]
    fn leave_restores_exact_original() {
        let (mut term, backend) = fake_terminal();
        term.enter().unwrap();
        term.leave().unwrap();

        assert!(!term.is_raw());
        assert_eq!(backend.current(), Some(COOKED));
        assert_eq!(backend.state.borrow().released, 1);
    }

    #[test]
    fn drop_restores_exact_original() {
        let (mut term, backend) = fake_terminal();
        term.enter().unwrap();
        drop(term);
        assert_eq!(backend.current(), Some(COOKED));
    }

    #[test]
    fn early_error_return_restores_original() {
        fn run(term: &mut Terminal<FakeBackend, Vec<u8>>) -> Result<(), TerminalError> {
            term.enter()?;
            Err(TerminalError::WindowSize)
        }

        let backend = FakeBackend::new();
        {
            let mut term = Terminal::with_backend(backend.clone(), Vec::new());
            assert!(run(&mut term).is_err());
        }
        assert_eq!(backend.current(), Some(COOKED));
    }

    #[test]
    fn leave_clears_screen_and_homes_cursor() {
        let (mut term, _backend) = fake_terminal();
        term.enter().unwrap();
        term.leave().unwrap();
        assert_eq!(term.writer().as_slice(), b"\x1b[2J\x1b[H");
    }

    #[test]
    fn enter_is_idempotent() {
        let (mut term, backend) = fake_terminal();
        term.enter().unwrap();
        term.enter().unwrap();
        assert_eq!(backend.state.borrow().applied.len(), 1);
        term.leave().unwrap();
        assert_eq!(backend.current(), Some(COOKED));
    }

    #[test]
    fn leave_is_idempotent() {
        let (mut term, backend) = fake_terminal();
        term.enter().unwrap();
        term.leave().unwrap();
        term.leave().unwrap();
        assert_eq!(backend.state.borrow().applied.len(), 2);
        assert_eq!(term.writer().as_slice(), b"\x1b[2J\x1b[H");
    }

    #[test]
    fn leave_without_enter_is_noop() {
        let (mut term, backend) = fake_terminal();
        term.leave().unwrap();
        assert!(backend.state.borrow().applied.is_empty());
        assert!(term.writer().is_empty());
    }

    #[test]
    fn multiple_cycles_restore_each_time() {
        let (mut term, backend) = fake_terminal();
        for _ in 0..3 {
            term.enter().unwrap();
            assert!(term.is_raw());
            term.leave().unwrap();
            assert_eq!(backend.current(), Some(COOKED));
        }
    }

    // ── Failures ────────────────────────────────────────────────────

    #[test]
    fn capture_failure_is_get_attributes() {
        let (mut term, backend) = fake_terminal();
        backend.state.borrow_mut().fail_capture = true;

        let err = term.enter().unwrap_err();
        assert!(matches!(err, TerminalError::GetAttributes(_)));
        assert!(!term.is_raw());
        assert!(backend.state.borrow().applied.is_empty());
    }

    #[test]
    fn apply_failure_is_set_attributes() {
        let (mut term, backend) = fake_terminal();
        backend.state.borrow_mut().fail_apply = true;

        let err = term.enter().unwrap_err();
        assert!(matches!(err, TerminalError::SetAttributes(_)));
        assert!(!term.is_raw());
        assert_eq!(backend.current(), Some(COOKED));
    }

    #[test]
    fn restore_failure_is_reported() {
        let (mut term, backend) = fake_terminal();
        term.enter().unwrap();
        backend.state.borrow_mut().fail_apply = true;

        let err = term.leave().unwrap_err();
        assert!(matches!(err, TerminalError::SetAttributes(_)));
        assert_eq!(backend.state.borrow().released, 0);
    }

    // ── Window size ─────────────────────────────────────────────────

    #[test]
    fn size_from_backend() {
        let (mut term, _backend) = fake_terminal();
        let mut input = VecDeque::<u8>::new();
        assert_eq!(term.size(&mut input).unwrap(), Size { cols: 80, rows: 24 });
        assert!(term.writer().is_empty(), "no probe when the OS answers");
    }

    #[test]
    fn size_falls_back_to_cursor_report() {
        let mut backend = FakeBackend::new();
        backend.size = None;
        let mut term = Terminal::with_backend(backend, Vec::new());
        let mut input: VecDeque<u8> = b"\x1b[50;132R".iter().copied().collect();

        assert_eq!(
            term.size(&mut input).unwrap(),
            Size {
                cols: 132,
                rows: 50
            }
        );
        assert_eq!(term.writer().as_slice(), b"\x1b[999C\x1b[999B\x1b[6n");
    }

    #[test]
    fn zero_columns_triggers_fallback() {
        let mut backend = FakeBackend::new();
        backend.size = Some(Size { cols: 0, rows: 24 });
        let mut term = Terminal::with_backend(backend, Vec::new());
        let mut input: VecDeque<u8> = b"\x1b[24;80R".iter().copied().collect();

        assert_eq!(term.size(&mut input).unwrap(), Size { cols: 80, rows: 24 });
    }

    #[test]
    fn both_probes_failing_is_window_size_error() {
        let mut backend = FakeBackend::new();
        backend.size = None;
        let mut term = Terminal::with_backend(backend, Vec::new());
        let mut input = VecDeque::<u8>::new();

        assert!(matches!(
            term.size(&mut input),
            Err(TerminalError::WindowSize)
        ));
    }

    #[test]
    fn cursor_report_read_stops_at_r() {
        let mut input: VecDeque<u8> = b"\x1b[3;4Rxyz".iter().copied().collect();
        assert_eq!(read_cursor_report(&mut input).unwrap(), b"\x1b[3;4");
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn cursor_report_read_is_bounded() {
        let mut input: VecDeque<u8> = std::iter::repeat_n(b'9', 100).collect();
        assert_eq!(read_cursor_report(&mut input).unwrap().len(), CURSOR_REPORT_MAX);
    }

    // ── Cursor report parsing ───────────────────────────────────────

    #[test]
    fn parse_report_basic() {
        assert_eq!(
            parse_cursor_report(b"\x1b[24;80"),
            Some(Size { cols: 80, rows: 24 })
        );
    }

    #[test]
    fn parse_report_requires_csi_prefix() {
        assert_eq!(parse_cursor_report(b"24;80"), None);
        assert_eq!(parse_cursor_report(b"\x1bO24;80"), None);
    }

    #[test]
    fn parse_report_requires_two_fields() {
        assert_eq!(parse_cursor_report(b"\x1b[24"), None);
        assert_eq!(parse_cursor_report(b"\x1b[;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24;"), None);
        assert_eq!(parse_cursor_report(b"\x1b[2a;80"), None);
    }

    #[test]
    fn parse_report_rejects_overflow() {
        assert_eq!(parse_cursor_report(b"\x1b[99999;80"), None);
    }

    // ── termios ─────────────────────────────────────────────────────

    #[cfg(unix)]
    #[test]
    fn raw_termios_flags() {
        let mut cooked: libc::termios = unsafe { std::mem::zeroed() };
        cooked.c_lflag = libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN | libc::ECHOE;
        cooked.c_iflag = libc::IXON | libc::ICRNL | libc::BRKINT | libc::INPCK | libc::ISTRIP;
        cooked.c_oflag = libc::OPOST;
        cooked.c_cc[libc::VMIN] = 1;
        cooked.c_cc[libc::VTIME] = 0;

        let raw = raw_termios(&cooked);

        assert_eq!(raw.c_lflag, libc::ECHOE, "unrelated lflag bits survive");
        assert_eq!(raw.c_iflag, 0);
        assert_eq!(raw.c_oflag & libc::OPOST, 0);
        assert_eq!(raw.c_cflag & libc::CS8, libc::CS8);
        assert_eq!(raw.c_cc[libc::VMIN], 0);
        assert_eq!(raw.c_cc[libc::VTIME], 1);
    }

    #[test]
    fn emergency_restore_shows_cursor_last() {
        assert!(EMERGENCY_RESTORE.starts_with(b"\x1b[2J"));
        assert!(EMERGENCY_RESTORE.ends_with(b"\x1b[?25h"));
    }
}
