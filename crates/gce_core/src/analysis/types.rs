//! Analysis error and result types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::markers::MarkerError;
use crate::models::{Chapter, SegmentChapters};
use crate::timecode::TimecodeError;
use crate::timeline;

/// Errors from segment analysis and result persistence.
///
/// Every per-segment variant carries the segment name, so a failure deep
/// in a multi-segment job still tells the user which recording broke.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A sidecar marker file could not be read.
    #[error("failed to read markers for {segment}: {source}")]
    Markers {
        segment: String,
        #[source]
        source: MarkerError,
    },

    /// The ffmetadata export for embedded markers failed.
    #[error("failed to export metadata for {segment}: {source}")]
    MetadataExport {
        segment: String,
        #[source]
        source: ExtractionError,
    },

    /// No usable device timecode could be probed for a segment.
    #[error("failed to get timecode for {segment}: {source}")]
    Timecode {
        segment: String,
        #[source]
        source: ExtractionError,
    },

    /// The probed timecode did not parse, so the segment's chapters
    /// cannot be anchored to clock time.
    #[error("failed to map chapters to clock time for {segment}: {source}")]
    ClockMapping {
        segment: String,
        #[source]
        source: TimecodeError,
    },

    /// Reading or writing a results file failed.
    #[error("failed to access analysis file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A results file held malformed JSON.
    #[error("failed to decode analysis file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    pub fn markers(segment: impl Into<String>, source: MarkerError) -> Self {
        Self::Markers {
            segment: segment.into(),
            source,
        }
    }

    pub fn metadata_export(segment: impl Into<String>, source: ExtractionError) -> Self {
        Self::MetadataExport {
            segment: segment.into(),
            source,
        }
    }

    pub fn timecode(segment: impl Into<String>, source: ExtractionError) -> Self {
        Self::Timecode {
            segment: segment.into(),
            source,
        }
    }

    pub fn clock_mapping(segment: impl Into<String>, source: TimecodeError) -> Self {
        Self::ClockMapping {
            segment: segment.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// The outcome of analysing a set of segments.
///
/// Holds every segment that produced at least one chapter, with chapters
/// anchored to clock time and ranked globally. This is what the grouping
/// pass consumes and what gets persisted between runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    /// Segments with their anchored chapters.
    pub segments: Vec<SegmentChapters>,
}

impl AnalysisResult {
    /// Wrap already-analysed segments.
    pub fn new(segments: Vec<SegmentChapters>) -> Self {
        Self { segments }
    }

    /// Whether the analysis produced no chapters at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total chapter count across all segments.
    pub fn total_chapters(&self) -> usize {
        self.segments.iter().map(SegmentChapters::len).sum()
    }

    /// All chapters flattened into one list sorted by global order.
    pub fn merged_chapters(&self) -> Vec<Chapter> {
        timeline::merged_chapters(&self.segments)
    }

    /// Look up a segment by name.
    pub fn segment(&self, name: &str) -> Option<&SegmentChapters> {
        self.segments.iter().find(|s| s.name() == name)
    }

    /// The video file backing the named segment, if it was analysed.
    pub fn video_path(&self, segment_name: &str) -> Option<&Path> {
        self.segment(segment_name)
            .map(|s| s.segment.video_path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    #[test]
    fn video_path_resolves_by_segment_name() {
        let seg = Segment::new("2nd Period", "/footage/p2.mp4");
        let result = AnalysisResult::new(vec![SegmentChapters::new(seg)]);

        assert_eq!(
            result.video_path("2nd Period"),
            Some(Path::new("/footage/p2.mp4"))
        );
        assert_eq!(result.video_path("3rd Period"), None);
    }

    #[test]
    fn error_messages_name_the_segment() {
        let err = AnalysisError::clock_mapping(
            "1st Period",
            TimecodeError::invalid_format("11:49:22"),
        );
        let msg = err.to_string();
        assert!(msg.contains("1st Period"), "missing segment name: {msg}");
        assert!(msg.contains("11:49:22"), "missing offending value: {msg}");
    }
}
