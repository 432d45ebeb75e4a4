//! Turns raw segments into anchored, globally ordered chapters.

use std::fs;
use std::path::{Path, PathBuf};

use crate::extraction::{self, ExtractionError, ExtractionResult, Toolchain};
use crate::markers;
use crate::models::{MetadataSource, Segment, SegmentChapters};
use crate::timecode::Timecode;
use crate::timeline;

use super::{AnalysisError, AnalysisResult};

/// Probing seam for [`analyze_segments`].
///
/// Production code uses [`FfmpegProber`]; tests substitute an in-memory
/// implementation so the analysis flow runs without media files.
pub trait SegmentProber {
    /// The ffmetadata text of a media file with embedded markers.
    fn export_metadata_text(&self, media: &Path) -> ExtractionResult<String>;

    /// The raw device timecode string of a media file.
    fn read_timecode(&self, media: &Path) -> ExtractionResult<String>;
}

/// [`SegmentProber`] backed by the ffmpeg/ffprobe toolchain.
///
/// Metadata exports go through a scratch file (ffmpeg writes ffmetadata
/// to disk, not stdout) which is removed after reading.
pub struct FfmpegProber {
    tools: Toolchain,
    scratch_dir: PathBuf,
}

impl FfmpegProber {
    /// Create a prober writing its temporary exports under `scratch_dir`.
    pub fn new(tools: Toolchain, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools,
            scratch_dir: scratch_dir.into(),
        }
    }
}

impl SegmentProber for FfmpegProber {
    fn export_metadata_text(&self, media: &Path) -> ExtractionResult<String> {
        let stem = media
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("segment");
        let export = self.scratch_dir.join(format!("{stem}.ffmeta.txt"));

        extraction::export_ffmetadata(&self.tools, media, &export)?;
        let text = fs::read_to_string(&export).map_err(|e| {
            ExtractionError::io(format!("read exported metadata {}", export.display()), e)
        });
        let _ = fs::remove_file(&export);
        text
    }

    fn read_timecode(&self, media: &Path) -> ExtractionResult<String> {
        extraction::read_timecode(&self.tools, media)
    }
}

/// Analyse every segment: parse its highlight markers, anchor them to
/// the device timecode, then rank all chapters chronologically across
/// segments.
///
/// Segments without markers are skipped (a camera that recorded but
/// was never flagged is normal, not an error). Any other per-segment
/// failure aborts the whole analysis with an error naming the segment.
pub fn analyze_segments(
    segments: &[Segment],
    prober: &dyn SegmentProber,
) -> Result<AnalysisResult, AnalysisError> {
    let mut analyzed: Vec<SegmentChapters> = Vec::with_capacity(segments.len());

    for segment in segments {
        let chapters = match &segment.metadata_source {
            MetadataSource::Sidecar(path) => markers::parse_marker_file(path, &segment.name)
                .map_err(|e| AnalysisError::markers(&segment.name, e))?,
            MetadataSource::Embedded(path) => {
                let text = prober
                    .export_metadata_text(path)
                    .map_err(|e| AnalysisError::metadata_export(&segment.name, e))?;
                markers::parse_marker_text(&text, &segment.name)
            }
        };

        if chapters.is_empty() {
            tracing::debug!("No chapters found in {}, skipping", segment.name);
            continue;
        }

        let raw = prober
            .read_timecode(&segment.timecode_source)
            .map_err(|e| AnalysisError::timecode(&segment.name, e))?;
        let timecode = Timecode::parse(&raw)
            .map_err(|e| AnalysisError::clock_mapping(&segment.name, e))?;

        let mut with_chapters = SegmentChapters::with_chapters(segment.clone(), chapters);
        timeline::anchor_chapters_to_timecode(&mut with_chapters.chapters, &timecode);
        tracing::debug!(
            "{}: {} chapters anchored to timecode {}",
            with_chapters.name(),
            with_chapters.len(),
            raw.trim()
        );
        analyzed.push(with_chapters);
    }

    let total = timeline::assign_global_order(&mut analyzed);
    tracing::info!(
        "Analyzed {} segments, {} chapters in global order",
        analyzed.len(),
        total
    );

    Ok(AnalysisResult::new(analyzed))
}
