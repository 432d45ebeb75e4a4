//! FFMETADATA text generation and export.
//!
//! ffmpeg consumes chapter metadata as an FFMETADATA1 text file mapped in
//! as a secondary input. This module renders that format for clip markers
//! and merged chapter lists, and dumps it back out of media files that
//! carry their markers embedded.

use std::path::Path;

use crate::grouping::ClipMarker;

use super::tools::Toolchain;
use super::types::{ChapterSpan, ExtractionError, ExtractionResult};

/// Render an FFMETADATA1 document with the given chapters.
///
/// Each chapter uses a 1/1000 timebase so START/END are plain
/// milliseconds. A chapter's `title` line is omitted when empty.
pub fn render_ffmetadata(title: Option<&str>, chapters: &[ChapterSpan]) -> String {
    let mut out = String::from(";FFMETADATA1\n");
    if let Some(title) = title {
        out.push_str(&format!("title={title}\n"));
    }
    out.push('\n');

    for ch in chapters {
        out.push_str("[CHAPTER]\n");
        out.push_str("TIMEBASE=1/1000\n");
        out.push_str(&format!("START={}\n", ch.start_ms));
        out.push_str(&format!("END={}\n", ch.end_ms));
        if !ch.title.is_empty() {
            out.push_str(&format!("title={}\n", ch.title));
        }
        out.push('\n');
    }

    out
}

/// Convert clip markers into chapter spans within a clip.
///
/// A marker's span runs to the next marker's offset; the last one runs to
/// the end of the clip.
pub fn clip_marker_spans(markers: &[ClipMarker], clip_duration_ms: u64) -> Vec<ChapterSpan> {
    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end_ms = markers
                .get(i + 1)
                .map(|next| next.offset_ms)
                .unwrap_or(clip_duration_ms);
            ChapterSpan::new(marker.offset_ms, end_ms, marker.label.clone())
        })
        .collect()
}

/// Write an FFMETADATA1 document to disk.
pub fn write_ffmetadata(
    path: &Path,
    title: Option<&str>,
    chapters: &[ChapterSpan],
) -> ExtractionResult<()> {
    std::fs::write(path, render_ffmetadata(title, chapters)).map_err(|e| {
        ExtractionError::io(format!("write metadata file {}", path.display()), e)
    })
}

/// Dump a media file's metadata (chapters included) to FFMETADATA text.
pub fn export_ffmetadata(tools: &Toolchain, input: &Path, output: &Path) -> ExtractionResult<()> {
    if !input.exists() {
        return Err(ExtractionError::FileNotFound(input.to_path_buf()));
    }

    let args: Vec<String> = vec![
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-f".to_string(),
        "ffmetadata".to_string(),
        "-y".to_string(),
        output.to_string_lossy().to_string(),
    ];
    tools.run_ffmpeg(&args)?;

    tracing::debug!(
        "exported metadata from {} to {}",
        input.display(),
        output.display()
    );
    Ok(())
}
