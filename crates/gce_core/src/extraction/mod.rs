//! Extraction driver - everything that shells out to ffmpeg/ffprobe.
//!
//! This module wraps the two external binaries behind typed operations:
//!
//! - **Toolchain**: locate the binaries (bundled `bin/` folder or PATH)
//! - **Probes**: timecode, duration, resolution, embedded chapters
//! - **Encoding**: cut clips (NVENC with x264 fallback) or stream-copy
//! - **Combining**: concat extracted clips, join split recording chains
//! - **Metadata**: FFMETADATA rendering for embedded chapter markers
//! - **Naming**: chronologically sortable clip filenames
//!
//! # Usage
//!
//! ```ignore
//! use gce_core::extraction::{self, ClipRequest, Toolchain};
//!
//! let tools = Toolchain::locate()?;
//! let timecode = extraction::read_timecode(&tools, Path::new("/v/p1.mov"))?;
//!
//! let req = ClipRequest::new("/v/p1.mov", "/out/clip.mp4", 62.0, 15.0);
//! extraction::extract_clip(&tools, &req, true, Path::new("/tmp/job"))?;
//! ```

mod encoder;
mod metadata;
mod naming;
mod probe;
mod tools;
mod types;

// Re-export public types
pub use tools::Toolchain;
pub use types::{
    ChapterSpan,
    ClipRequest,
    ExtractionError,
    ExtractionResult,
    MediaReport,
    VideoResolution,
};

// Re-export public functions
pub use encoder::{combine_clips, combine_split_parts, extract_clip, extract_clip_copy};
pub use metadata::{clip_marker_spans, export_ffmetadata, render_ffmetadata, write_ffmetadata};
pub use naming::{clip_filename, group_filename, sanitize_filename};
pub use probe::{
    media_report, read_chapter_count, read_chapters, read_duration, read_resolution,
    read_timecode,
};
