//! GCE Core - Backend logic for GoPro Clip Extractor
//!
//! This crate contains all business logic with zero UI dependencies:
//! reading highlight markers out of game footage, anchoring them to the
//! camera's wall clock, grouping nearby highlights, and driving ffmpeg
//! to cut the clips. It can be used by a GUI application or a CLI tool.

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod extraction;
pub mod grouping;
pub mod logging;
pub mod markers;
pub mod models;
pub mod orchestrator;
pub mod timecode;
pub mod timeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
