//! Media probing via ffprobe.
//!
//! Each probe shells out to ffprobe with CSV output and parses the text;
//! the parsers are separate functions so they can be tested against
//! captured output without a binary present.

use std::path::Path;

use super::tools::Toolchain;
use super::types::{
    ChapterSpan, ExtractionError, ExtractionResult, MediaReport, VideoResolution,
};

/// Read the device timecode tag from a media file.
///
/// GoPro originals carry it on the data stream, converted MOV files on
/// the video stream or the container, so three locations are tried in
/// turn: video-stream tags, format tags, then data-stream tags. The
/// first two fail softly; only after the last one comes up empty is
/// `TimecodeNotFound` returned.
pub fn read_timecode(tools: &Toolchain, path: &Path) -> ExtractionResult<String> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let video_tags = [
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream_tags=timecode",
        "-of",
        "csv=p=0",
    ];
    if let Ok(tc) = tools.ffprobe_stdout(&video_tags, path) {
        if !tc.is_empty() {
            return Ok(tc);
        }
    }

    let format_tags = [
        "-v",
        "error",
        "-show_entries",
        "format_tags=timecode",
        "-of",
        "csv=p=0",
    ];
    if let Ok(tc) = tools.ffprobe_stdout(&format_tags, path) {
        if !tc.is_empty() {
            return Ok(tc);
        }
    }

    let data_tags = [
        "-v",
        "error",
        "-select_streams",
        "d:0",
        "-show_entries",
        "stream_tags=timecode",
        "-of",
        "csv=p=0",
    ];
    let tc = tools.ffprobe_stdout(&data_tags, path)?;
    if tc.is_empty() {
        return Err(ExtractionError::TimecodeNotFound(path.to_path_buf()));
    }
    Ok(tc)
}

/// Read the container duration in seconds.
pub fn read_duration(tools: &Toolchain, path: &Path) -> ExtractionResult<f64> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let args = [
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "csv=p=0",
    ];
    let stdout = tools.ffprobe_stdout(&args, path)?;
    parse_duration(&stdout)
}

/// Read the first video stream's dimensions.
pub fn read_resolution(tools: &Toolchain, path: &Path) -> ExtractionResult<VideoResolution> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let args = [
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream=width,height",
        "-of",
        "csv=p=0",
    ];
    let stdout = tools.ffprobe_stdout(&args, path)?;
    parse_resolution(&stdout)
}

/// Read embedded chapters with their spans and titles.
pub fn read_chapters(tools: &Toolchain, path: &Path) -> ExtractionResult<Vec<ChapterSpan>> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let args = ["-v", "error", "-show_chapters", "-print_format", "csv"];
    let stdout = tools.ffprobe_stdout(&args, path)?;
    Ok(parse_chapter_rows(&stdout))
}

/// Count embedded chapters without parsing their fields.
pub fn read_chapter_count(tools: &Toolchain, path: &Path) -> ExtractionResult<usize> {
    if !path.exists() {
        return Err(ExtractionError::FileNotFound(path.to_path_buf()));
    }

    let args = ["-v", "error", "-show_chapters", "-of", "csv=p=0"];
    let stdout = tools.ffprobe_stdout(&args, path)?;
    Ok(count_chapter_lines(&stdout))
}

/// Gather a soft-failing metadata summary for one file.
///
/// Probe failures leave the corresponding field empty instead of
/// propagating; discovery classifies files from whatever was readable.
pub fn media_report(tools: &Toolchain, path: &Path) -> MediaReport {
    let mut report = MediaReport::default();

    if let Ok(timecode) = read_timecode(tools, path) {
        report.timecode = Some(timecode);
    }
    if let Ok(count) = read_chapter_count(tools, path) {
        report.chapter_count = count;
    }
    if let Ok(duration) = read_duration(tools, path) {
        report.duration_secs = Some(duration);
    }

    report
}

fn parse_duration(stdout: &str) -> ExtractionResult<f64> {
    stdout
        .trim()
        .parse::<f64>()
        .map_err(|_| ExtractionError::probe_parse("duration", stdout.trim()))
}

fn parse_resolution(stdout: &str) -> ExtractionResult<VideoResolution> {
    let trimmed = stdout.trim();
    let parts: Vec<&str> = trimmed.split(',').collect();
    if parts.len() != 2 {
        return Err(ExtractionError::probe_parse("resolution", trimmed));
    }
    let width = parts[0]
        .parse::<u32>()
        .map_err(|_| ExtractionError::probe_parse("width", parts[0]))?;
    let height = parts[1]
        .parse::<u32>()
        .map_err(|_| ExtractionError::probe_parse("height", parts[1]))?;
    Ok(VideoResolution { width, height })
}

/// Parse `-show_chapters -print_format csv` rows.
///
/// Row shape: `chapter,id,time_base,start,start_time,end,end_time,title`.
/// The float second fields are used rather than the timebase-relative
/// ones; malformed rows are skipped, malformed floats read as zero.
fn parse_chapter_rows(stdout: &str) -> Vec<ChapterSpan> {
    let mut chapters = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with("chapter,") {
            continue;
        }
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 7 {
            continue;
        }
        let start_secs = parts[4].parse::<f64>().unwrap_or(0.0);
        let end_secs = parts[6].parse::<f64>().unwrap_or(0.0);
        let title = parts.get(7).copied().unwrap_or("");
        chapters.push(ChapterSpan::new(
            (start_secs * 1000.0) as u64,
            (end_secs * 1000.0) as u64,
            title,
        ));
    }
    chapters
}

fn count_chapter_lines(stdout: &str) -> usize {
    stdout.lines().filter(|l| !l.trim().is_empty()).count()
}
