//! Data models for GoPro Clip Extractor.
//!
//! This module contains the core data structures shared across the crate:
//! - Chapter (highlight marker) records and time formatting
//! - Segment ("period") records and segment-owned chapter collections
//! - Job specifications handed to the orchestrator

mod chapter;
mod job;
mod segment;

// Re-export all public types
pub use chapter::{
    format_clock_time, format_clock_time_readable, format_video_time, parse_clock_time_readable,
    Chapter,
};
pub use job::JobSpec;
pub use segment::{MetadataSource, Segment, SegmentChapters};
