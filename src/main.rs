// SPDX-License-Identifier: MIT
//
// yeoji — a raw-mode terminal text viewer.
//
// This is the binary that wires the two crates together:
//
//   yeoji-term → raw mode, window size, key decoding, output buffering
//   yeoji-view → lines, viewport, navigation, frame rendering
//
// Each iteration of the main loop:
//
//   scroll_to_cursor → render frame → one write → read key → apply
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text rows / `~` filler       │  ← rows - 1
//   ├──────────────────────────────┤
//   │ col:row status readout       │  ← 1 row
//   └──────────────────────────────┘
//
// Every failure returns up to `main` as a ViewerError. The Terminal guard
// lives inside `run`, so by the time `main` prints the error the screen is
// cleared and the original terminal mode is back.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use yeoji_term::TerminalError;
use yeoji_term::input::{ByteSource, KeyDecoder};
use yeoji_term::reader::{self, StdinSource};
use yeoji_term::terminal::Terminal;
use yeoji_view::navigation::{self, Action};
use yeoji_view::{LoadError, Renderer, Viewport, line};

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "yeoji", version)]
#[command(about = "A raw-mode terminal text viewer", long_about = None)]
struct Cli {
    /// File to view (an empty buffer is shown when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum ViewerError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    File(#[from] LoadError),
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Send log output to `--log-file`, if given. Stderr is never used: it
/// shares the screen with the viewer.
fn init_logging(cli: &Cli) -> io::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ─── Main loop ──────────────────────────────────────────────────────────────

/// Draw, read a key, apply it; until the quit key.
fn event_loop(
    view: &mut Viewport,
    out: &mut impl Write,
    input: &mut impl ByteSource,
) -> Result<(), ViewerError> {
    let mut renderer = Renderer::new();
    let mut decoder = KeyDecoder::new();

    loop {
        view.scroll_to_cursor();
        renderer.present(view, out)?;

        let key = decoder.read_key(input)?;
        if navigation::apply(key, view) == Action::Quit {
            return Ok(());
        }
    }
}

fn run(cli: &Cli) -> Result<(), ViewerError> {
    init_logging(cli)?;
    reader::install_termination_handlers();

    let mut term = Terminal::new();
    term.enter()?;

    let mut input = StdinSource::new();
    let size = term.size(&mut input)?;

    let lines = match &cli.file {
        Some(path) => line::load(path)?,
        None => Vec::new(),
    };
    let mut view = Viewport::from_size(lines, size);

    event_loop(&mut view, term.writer(), &mut input)?;
    term.leave()?;
    log::debug!("clean exit");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        eprintln!("yeoji: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
