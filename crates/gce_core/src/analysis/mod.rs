//! Segment analysis and result persistence.
//!
//! This module turns a list of raw segments into the chapter timeline
//! everything downstream consumes:
//!
//! - **Analysis**: parses highlight markers for every segment, anchors
//!   them to the device timecode, and ranks all chapters globally
//! - **Probing seam**: [`SegmentProber`] abstracts the media probes so
//!   the analysis flow is testable without ffmpeg installed
//! - **Persistence**: saves results as pretty-printed JSON and loads
//!   them back for later runs
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//!
//! use gce_core::analysis::{analyze_segments, FfmpegProber};
//! use gce_core::extraction::Toolchain;
//! use gce_core::models::Segment;
//!
//! let tools = Toolchain::locate()?;
//! let prober = FfmpegProber::new(tools, "/tmp/scratch");
//! let segments = vec![Segment::new("1st Period", "/footage/p1.mp4")];
//!
//! let result = analyze_segments(&segments, &prober)?;
//! result.save_json(Path::new("/footage/analysis_results.json"))?;
//! ```

mod analyzer;
mod persist;
mod types;

// Re-export public types
pub use analyzer::{FfmpegProber, SegmentProber};
pub use types::{AnalysisError, AnalysisResult};

// Re-export public functions
pub use analyzer::analyze_segments;
