//! Types for the ffmpeg/ffprobe extraction driver.

use std::path::PathBuf;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// Tool binary could not be located.
    #[error("{tool} not found; place the binary in a bin folder next to the executable or on PATH")]
    ToolNotFound { tool: String },

    /// Tool could not be started at all.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Tool ran but exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// Input file missing.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Probe succeeded but carried no timecode tag anywhere.
    #[error("no timecode found in {}", .0.display())]
    TimecodeNotFound(PathBuf),

    /// Probe output did not parse.
    #[error("failed to parse {field} from ffprobe output: {message}")]
    ProbeParse { field: String, message: String },

    /// Split-chain combine needs two or more parts.
    #[error("need at least 2 files to combine, got {count}")]
    TooFewParts { count: usize },

    /// Scratch-file I/O failed.
    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractionError {
    /// Create a Spawn error.
    pub fn spawn(tool: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            tool: tool.into(),
            source,
        }
    }

    /// Create a CommandFailed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a ProbeParse error.
    pub fn probe_parse(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProbeParse {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an Io error.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Video frame dimensions reported by ffprobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoResolution {
    pub width: u32,
    pub height: u32,
}

impl VideoResolution {
    /// Total pixel count, used to pick the largest resolution in a set.
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for VideoResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One chapter row from a probed file, in container milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSpan {
    pub start_ms: u64,
    pub end_ms: u64,
    pub title: String,
}

impl ChapterSpan {
    /// Create a chapter span.
    pub fn new(start_ms: u64, end_ms: u64, title: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            title: title.into(),
        }
    }

    /// Copy of this span shifted later by `offset_ms`.
    pub fn offset_by(&self, offset_ms: u64) -> Self {
        Self {
            start_ms: self.start_ms + offset_ms,
            end_ms: self.end_ms + offset_ms,
            title: self.title.clone(),
        }
    }
}

/// Metadata summary of one media file, gathered by soft-failing probes.
///
/// Fields stay empty when the corresponding probe fails; discovery uses
/// that to classify files rather than treating it as an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaReport {
    /// Raw timecode tag, if any probe location carried one.
    pub timecode: Option<String>,
    /// Number of embedded chapters.
    pub chapter_count: usize,
    /// Container duration in seconds.
    pub duration_secs: Option<f64>,
}

impl MediaReport {
    /// True when the file carries at least one embedded chapter.
    pub fn has_chapters(&self) -> bool {
        self.chapter_count > 0
    }

    /// True when a timecode tag was found.
    pub fn has_timecode(&self) -> bool {
        self.timecode.is_some()
    }
}

/// One clip to cut out of a source file.
#[derive(Debug, Clone)]
pub struct ClipRequest {
    /// Source media.
    pub input: PathBuf,
    /// Destination clip file.
    pub output: PathBuf,
    /// Window start in source seconds.
    pub start_secs: f64,
    /// Window length in seconds.
    pub duration_secs: f64,
    /// Markers embedded as chapters; empty means no metadata input.
    pub markers: Vec<crate::grouping::ClipMarker>,
}

impl ClipRequest {
    /// Create a request with no embedded markers.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        start_secs: f64,
        duration_secs: f64,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            start_secs,
            duration_secs,
            markers: Vec::new(),
        }
    }

    /// Attach markers to embed as chapters.
    pub fn with_markers(mut self, markers: Vec<crate::grouping::ClipMarker>) -> Self {
        self.markers = markers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_pixel_ordering() {
        let hd = VideoResolution {
            width: 1920,
            height: 1080,
        };
        let uhd = VideoResolution {
            width: 3840,
            height: 2160,
        };
        assert!(uhd.pixels() > hd.pixels());
        assert_eq!(hd.to_string(), "1920x1080");
    }

    #[test]
    fn span_offset_shifts_both_ends() {
        let span = ChapterSpan::new(1_000, 3_000, "Ch01");
        let shifted = span.offset_by(60_000);
        assert_eq!(shifted.start_ms, 61_000);
        assert_eq!(shifted.end_ms, 63_000);
        assert_eq!(shifted.title, "Ch01");
    }

    #[test]
    fn report_flags() {
        let report = MediaReport {
            timecode: Some("10:00:00:00".to_string()),
            chapter_count: 0,
            duration_secs: Some(1200.0),
        };
        assert!(report.has_timecode());
        assert!(!report.has_chapters());
    }
}
