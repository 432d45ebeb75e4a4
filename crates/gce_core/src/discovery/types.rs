//! Folder scan result types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::extraction::MediaReport;
use crate::models::Segment;

/// Errors from scanning a working folder.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The folder could not be listed.
    #[error("failed to read folder {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// A media file found during the scan, with its probed properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without extension, used for pairing.
    pub base_name: String,
    /// Probed timecode/chapter/duration information.
    pub report: MediaReport,
}

/// Where a candidate's markers will come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataPlan {
    /// The converted video itself carries chapters and a timecode.
    Embedded,
    /// Markers live in a sidecar text file; a timecode is available on
    /// one of the paired videos.
    Sidecar,
    /// No sidecar yet, but the paired original has embedded chapters an
    /// ffmetadata export can recover.
    NeedsExtraction,
    /// Markers or timecode are missing and nothing on disk can supply
    /// them.
    Missing,
}

/// One would-be segment: a converted video with whatever companions the
/// scan could pair to it.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentCandidate {
    /// Assigned segment name ("1st Period", "OT", ...).
    pub name: String,
    /// The converted video clips are cut from.
    pub video: MediaFile,
    /// The unconverted original with the same base name, if present.
    pub original: Option<MediaFile>,
    /// Sidecar marker file with the same base name, if present.
    pub sidecar: Option<PathBuf>,
    /// How markers will be obtained for this candidate.
    pub plan: MetadataPlan,
}

impl SegmentCandidate {
    /// Whether analysis can run on this candidate as-is.
    pub fn is_ready(&self) -> bool {
        matches!(self.plan, MetadataPlan::Embedded | MetadataPlan::Sidecar)
    }

    /// Build the segment to analyse, or `None` when not ready.
    ///
    /// The timecode is read from whichever paired file actually carries
    /// one, preferring the unconverted original (its device timecode is
    /// authoritative; a conversion may or may not have copied it).
    pub fn to_segment(&self) -> Option<Segment> {
        match self.plan {
            MetadataPlan::Embedded => Some(Segment::new(&self.name, &self.video.path)),
            MetadataPlan::Sidecar => {
                let sidecar = self.sidecar.clone()?;
                let timecode_source = match &self.original {
                    Some(orig) if orig.report.has_timecode() => orig.path.clone(),
                    _ => self.video.path.clone(),
                };
                Some(
                    Segment::new(&self.name, &self.video.path)
                        .with_sidecar_metadata(sidecar)
                        .with_timecode_source(timecode_source),
                )
            }
            MetadataPlan::NeedsExtraction | MetadataPlan::Missing => None,
        }
    }
}

/// A chain of split recordings of one video, e.g. `GX010092.MP4` +
/// `GX020092.MP4`, that should be combined before analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitChain {
    /// Shared video id, e.g. "0092".
    pub video_id: String,
    /// Camera prefix, "GX" or "GH".
    pub prefix: String,
    /// Upper-cased extension the parts share, "MP4" or "MOV".
    pub extension: String,
    /// Part paths sorted by sequence number.
    pub parts: Vec<PathBuf>,
}

impl SplitChain {
    /// Number of parts in the chain.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the chain has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// File name for the combined output, e.g. `GX_combined_0092.MP4`.
    pub fn combined_file_name(&self) -> String {
        format!("{}_combined_{}.{}", self.prefix, self.video_id, self.extension)
    }

    /// Full output path for the combined file inside `dir`.
    pub fn combined_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.combined_file_name())
    }
}

/// Everything a folder scan found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderScan {
    /// The scanned folder.
    pub folder: PathBuf,
    /// One candidate per converted video, sorted by base name.
    pub candidates: Vec<SegmentCandidate>,
    /// Split recordings that want combining first.
    pub split_chains: Vec<SplitChain>,
    /// Count of converted videos seen.
    pub converted_count: usize,
    /// Count of unconverted originals seen.
    pub original_count: usize,
    /// Count of sidecar marker files seen.
    pub sidecar_count: usize,
}

impl FolderScan {
    /// Whether every candidate is ready for analysis.
    pub fn is_ready(&self) -> bool {
        !self.candidates.is_empty() && self.candidates.iter().all(SegmentCandidate::is_ready)
    }

    /// The segments for every ready candidate.
    pub fn ready_segments(&self) -> Vec<Segment> {
        self.candidates
            .iter()
            .filter_map(SegmentCandidate::to_segment)
            .collect()
    }

    /// Candidates whose sidecar must be produced by an ffmetadata export.
    pub fn needing_extraction(&self) -> Vec<&SegmentCandidate> {
        self.candidates
            .iter()
            .filter(|c| c.plan == MetadataPlan::NeedsExtraction)
            .collect()
    }

    /// One-line scan summary for logs and status displays.
    pub fn summary(&self) -> String {
        format!(
            "Found: {} converted videos, {} originals, {} metadata files",
            self.converted_count, self.original_count, self.sidecar_count
        )
    }
}
