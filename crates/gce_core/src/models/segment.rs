//! Segment ("period") types.
//!
//! A segment is one contiguous source recording with its own chapter
//! metadata and its own device timecode. Segments are constructed by
//! discovery (or directly by the caller) before any analysis runs and
//! are immutable inputs from then on.

use std::path::{Path, PathBuf};

use super::chapter::Chapter;

/// Where a segment's chapter markers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// Markers are embedded in a media file; ffmetadata must be exported
    /// from it before parsing.
    Embedded(PathBuf),
    /// Markers live in a sidecar text file, read directly.
    Sidecar(PathBuf),
}

impl MetadataSource {
    /// The file this source reads from.
    pub fn path(&self) -> &Path {
        match self {
            MetadataSource::Embedded(p) => p,
            MetadataSource::Sidecar(p) => p,
        }
    }

    /// Whether the markers require an ffmetadata export first.
    pub fn is_embedded(&self) -> bool {
        matches!(self, MetadataSource::Embedded(_))
    }
}

/// One source video unit ("period").
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Unique display identifier (e.g. "1st Period").
    pub name: String,
    /// Playable media the clips are cut from.
    pub video_path: PathBuf,
    /// Where chapter markers are read from.
    pub metadata_source: MetadataSource,
    /// File probed for the device timecode. May differ from `video_path`:
    /// re-encoding can strip the timecode track, so the unconverted
    /// original is kept around purely as the timecode reference.
    pub timecode_source: PathBuf,
}

impl Segment {
    /// Create a segment whose metadata and timecode both come from the
    /// video file itself.
    pub fn new(name: impl Into<String>, video_path: impl Into<PathBuf>) -> Self {
        let video_path = video_path.into();
        Self {
            name: name.into(),
            metadata_source: MetadataSource::Embedded(video_path.clone()),
            timecode_source: video_path.clone(),
            video_path,
        }
    }

    /// Read chapter markers from a sidecar text file instead.
    pub fn with_sidecar_metadata(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata_source = MetadataSource::Sidecar(path.into());
        self
    }

    /// Read chapter markers from a different media file.
    pub fn with_embedded_metadata(mut self, path: impl Into<PathBuf>) -> Self {
        self.metadata_source = MetadataSource::Embedded(path.into());
        self
    }

    /// Probe a different file for the device timecode.
    pub fn with_timecode_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.timecode_source = path.into();
        self
    }
}

/// A segment together with its owned chapter list.
///
/// This is the unit the timeline merge and the overlap grouping operate
/// on: each segment owns its chapters outright, so per-segment work never
/// goes through a name lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChapters {
    /// The owning segment.
    pub segment: Segment,
    /// Chapters parsed from this segment, in parse order.
    pub chapters: Vec<Chapter>,
}

impl SegmentChapters {
    /// Create an empty collection for a segment.
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            chapters: Vec::new(),
        }
    }

    /// Create a collection with chapters already parsed.
    pub fn with_chapters(segment: Segment, chapters: Vec<Chapter>) -> Self {
        Self { segment, chapters }
    }

    /// The segment name.
    pub fn name(&self) -> &str {
        &self.segment.name
    }

    /// Number of chapters in this segment.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether this segment has no chapters.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
