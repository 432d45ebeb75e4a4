//! Device timecode parsing.
//!
//! Source cameras stamp each recording with a time-of-day timecode
//! (`HH:MM:SS:FF`, or `HH:MM:SS;FF` in drop-frame notation) at a nominal
//! 60 fps. The timecode anchors a segment's chapter offsets to real
//! clock time so that chapters from different cameras can be ordered on
//! one timeline.
//!
//! # Usage
//!
//! ```
//! use gce_core::timecode::Timecode;
//!
//! let tc = Timecode::parse("11:49:22:30")?;
//! let anchor = tc.to_clock_time(); // 11:49:22.500
//! # Ok::<(), gce_core::timecode::TimecodeError>(())
//! ```

mod parser;
mod types;

pub use types::{Timecode, TimecodeError, TimecodeResult, NOMINAL_FPS};
