//! Saving and loading analysis results as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{
    format_clock_time_readable, parse_clock_time_readable, Chapter, MetadataSource, Segment,
    SegmentChapters,
};

use super::{AnalysisError, AnalysisResult};

/// Serialized form of one chapter.
///
/// `video_time` and `clock_time` are human-readable duplicates kept for
/// anyone inspecting the file by hand; `start_ms` stays the
/// authoritative offset, so a round trip loses nothing.
#[derive(Debug, Serialize, Deserialize)]
struct ChapterRecord {
    number: u32,
    start_ms: u64,
    video_time: String,
    clock_time: String,
    global_order: u32,
    period: String,
}

impl ChapterRecord {
    fn from_chapter(chapter: &Chapter) -> Self {
        Self {
            number: chapter.number,
            start_ms: chapter.start_offset_ms,
            video_time: chapter.format_video_time(),
            clock_time: format_clock_time_readable(chapter.clock_time.unwrap_or(NaiveTime::MIN)),
            global_order: chapter.global_order,
            period: chapter.segment_name.clone(),
        }
    }

    fn into_chapter(self) -> Chapter {
        Chapter {
            number: self.number,
            start_offset_ms: self.start_ms,
            clock_time: parse_clock_time_readable(&self.clock_time),
            global_order: self.global_order,
            segment_name: self.period,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetadataKind {
    Embedded,
    Sidecar,
}

#[derive(Debug, Serialize, Deserialize)]
struct SegmentRecord {
    name: String,
    video_path: PathBuf,
    metadata_kind: MetadataKind,
    metadata_path: PathBuf,
    timecode_source: PathBuf,
}

impl SegmentRecord {
    fn from_segment(segment: &Segment) -> Self {
        let (metadata_kind, metadata_path) = match &segment.metadata_source {
            MetadataSource::Embedded(p) => (MetadataKind::Embedded, p.clone()),
            MetadataSource::Sidecar(p) => (MetadataKind::Sidecar, p.clone()),
        };
        Self {
            name: segment.name.clone(),
            video_path: segment.video_path.clone(),
            metadata_kind,
            metadata_path,
            timecode_source: segment.timecode_source.clone(),
        }
    }

    fn into_segment(self) -> Segment {
        let metadata_source = match self.metadata_kind {
            MetadataKind::Embedded => MetadataSource::Embedded(self.metadata_path),
            MetadataKind::Sidecar => MetadataSource::Sidecar(self.metadata_path),
        };
        Segment {
            name: self.name,
            video_path: self.video_path,
            metadata_source,
            timecode_source: self.timecode_source,
        }
    }
}

/// On-disk layout: the segment list plus every chapter flattened into
/// global order.
#[derive(Debug, Serialize, Deserialize)]
struct AnalysisFile {
    segments: Vec<SegmentRecord>,
    chapters: Vec<ChapterRecord>,
}

impl AnalysisResult {
    /// Write the result as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save_json(&self, path: &Path) -> Result<(), AnalysisError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AnalysisError::io(parent, e))?;
        }

        let file = AnalysisFile {
            segments: self
                .segments
                .iter()
                .map(|s| SegmentRecord::from_segment(&s.segment))
                .collect(),
            chapters: self
                .merged_chapters()
                .iter()
                .map(ChapterRecord::from_chapter)
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| AnalysisError::json(path, e))?;
        fs::write(path, json).map_err(|e| AnalysisError::io(path, e))?;

        tracing::info!("Saved analysis results to {}", path.display());
        Ok(())
    }

    /// Load a result previously written by [`Self::save_json`].
    ///
    /// Chapters come back grouped under their segments in global order,
    /// which may differ from the original parse order.
    pub fn load_json(path: &Path) -> Result<Self, AnalysisError> {
        let contents = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        let file: AnalysisFile =
            serde_json::from_str(&contents).map_err(|e| AnalysisError::json(path, e))?;

        let mut segments: Vec<SegmentChapters> = file
            .segments
            .into_iter()
            .map(|r| SegmentChapters::new(r.into_segment()))
            .collect();
        for record in file.chapters {
            let chapter = record.into_chapter();
            match segments
                .iter_mut()
                .find(|s| s.name() == chapter.segment_name)
            {
                Some(seg) => seg.chapters.push(chapter),
                None => tracing::warn!(
                    "Dropping chapter {} for unknown segment {:?}",
                    chapter.number,
                    chapter.segment_name
                ),
            }
        }

        Ok(Self::new(segments))
    }
}
