//! # yeoji-view — Viewer core for yeoji
//!
//! This crate holds the viewer's state and the logic that moves it:
//!
//! - **[`line`]** — `Line` byte rows and file ingestion
//! - **[`viewport`]** — `Viewport`: lines, cursor, scroll offset, clamping
//! - **[`navigation`]** — key → command → viewport mutation
//! - **[`render`]** — one frame of VT100 output per call, written in one go
//!
//! Terminal access (raw mode, key decoding, output buffering) lives in
//! `yeoji-term`; this crate only consumes its types.

pub mod line;
pub mod navigation;
pub mod render;
pub mod viewport;

pub use line::{LoadError, Line};
pub use navigation::{Action, Command};
pub use render::Renderer;
pub use viewport::Viewport;
