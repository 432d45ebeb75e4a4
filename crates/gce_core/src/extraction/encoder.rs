//! Clip encoding, stream copy, and concat via ffmpeg.
//!
//! Argument lists are assembled by pure builder functions and executed
//! through the shared toolchain runner, so the exact command shapes are
//! covered by tests without invoking a binary.
//!
//! Encoded clips use a two-pass seek: a rough `-ss` before `-i` lands on
//! a keyframe well ahead of the window (GoPro sources have long GOP
//! intervals), then a fine `-ss` after `-i` decodes forward to the exact
//! start.

use std::path::{Path, PathBuf};

use super::metadata;
use super::probe;
use super::tools::Toolchain;
use super::types::{
    ChapterSpan, ClipRequest, ExtractionError, ExtractionResult, VideoResolution,
};

/// Seconds of rough-seek headroom before the clip window.
const ROUGH_SEEK_HEADROOM_SECS: f64 = 60.0;

/// Constant-quality level for encoded clips (QP for NVENC, CRF for x264).
const CLIP_QUALITY: u32 = 18;

/// Fallback scale target when no part's resolution could be probed.
const DEFAULT_RESOLUTION: VideoResolution = VideoResolution {
    width: 1920,
    height: 1080,
};

/// Extract one clip, re-encoding to H.264/AAC.
///
/// Markers in the request are embedded as chapters via a scratch
/// FFMETADATA file. When `use_hardware` is set, NVENC is tried first and
/// any failure falls back to software x264.
pub fn extract_clip(
    tools: &Toolchain,
    req: &ClipRequest,
    use_hardware: bool,
    scratch_dir: &Path,
) -> ExtractionResult<()> {
    if !req.input.exists() {
        return Err(ExtractionError::FileNotFound(req.input.clone()));
    }

    let meta_path = write_marker_metadata(req, scratch_dir)?;
    let (rough, fine) = split_seek(req.start_secs);

    let result = run_encode(tools, req, meta_path.as_deref(), rough, fine, use_hardware);
    if let Some(meta) = &meta_path {
        let _ = std::fs::remove_file(meta);
    }
    result?;

    tracing::info!("extracted clip {}", req.output.display());
    Ok(())
}

/// Extract one clip without re-encoding (`-c copy`).
///
/// Keeps the source codec, so the output container should match the
/// source's. Seeks land on keyframes, trading frame accuracy for speed.
pub fn extract_clip_copy(
    tools: &Toolchain,
    req: &ClipRequest,
    scratch_dir: &Path,
) -> ExtractionResult<()> {
    if !req.input.exists() {
        return Err(ExtractionError::FileNotFound(req.input.clone()));
    }

    let meta_path = write_marker_metadata(req, scratch_dir)?;
    let args = copy_clip_args(
        &req.input,
        meta_path.as_deref(),
        &req.output,
        req.start_secs,
        req.duration_secs,
    );

    let result = tools.run_ffmpeg(&args);
    if let Some(meta) = &meta_path {
        let _ = std::fs::remove_file(meta);
    }
    result?;

    tracing::info!("stream-copied clip {}", req.output.display());
    Ok(())
}

/// Concatenate extracted clips into one MP4, merging their chapters.
///
/// Chapters from each input carry over shifted by the cumulative
/// duration of the clips before it; a chapterless clip contributes one
/// whole-clip chapter titled by its file stem. If any duration probe
/// fails the combine still happens, just without chapter metadata.
/// Returns the final output path (an `.mp4` suffix is appended when
/// missing).
pub fn combine_clips(
    tools: &Toolchain,
    inputs: &[PathBuf],
    output: &Path,
    title: &str,
    scratch_dir: &Path,
) -> ExtractionResult<PathBuf> {
    let output = ensure_mp4_extension(output);
    for input in inputs {
        if !input.exists() {
            return Err(ExtractionError::FileNotFound(input.clone()));
        }
    }

    let mut merged: Vec<ChapterSpan> = Vec::new();
    let mut offset_ms: u64 = 0;
    let mut with_chapters = true;
    for input in inputs {
        let duration = match probe::read_duration(tools, input) {
            Ok(d) => d,
            Err(err) => {
                tracing::warn!(
                    "duration probe failed for {}, combining without chapters: {}",
                    input.display(),
                    err
                );
                with_chapters = false;
                break;
            }
        };
        let duration_ms = (duration * 1000.0) as u64;
        let chapters = probe::read_chapters(tools, input).unwrap_or_default();
        if chapters.is_empty() {
            merged.push(ChapterSpan::new(
                offset_ms,
                offset_ms + duration_ms,
                file_stem(input),
            ));
        } else {
            merged.extend(chapters.iter().map(|ch| ch.offset_by(offset_ms)));
        }
        offset_ms += duration_ms;
    }

    let list_path = scratch_dir.join("concat_list.txt");
    write_scratch(&list_path, &concat_list_body(inputs))?;

    let meta_path = if with_chapters {
        let path = scratch_dir.join("combined.ffmeta.txt");
        metadata::write_ffmetadata(&path, Some(title), &merged)?;
        Some(path)
    } else {
        None
    };

    let args = concat_copy_args(&list_path, meta_path.as_deref(), &output);
    let result = tools.run_ffmpeg(&args);
    let _ = std::fs::remove_file(&list_path);
    if let Some(meta) = &meta_path {
        let _ = std::fs::remove_file(meta);
    }
    result?;

    tracing::info!("combined {} clips into {}", inputs.len(), output.display());
    Ok(output)
}

/// Join the parts of a split recording chain into one file.
///
/// Stream-copies when every part shares one resolution; otherwise
/// re-encodes through a scale/pad filter graph targeting the largest
/// resolution seen. Chapters (camera highlights) from every part carry
/// over, shifted by cumulative duration.
pub fn combine_split_parts(
    tools: &Toolchain,
    parts: &[PathBuf],
    output: &Path,
    scratch_dir: &Path,
) -> ExtractionResult<()> {
    if parts.len() < 2 {
        return Err(ExtractionError::TooFewParts { count: parts.len() });
    }
    for part in parts {
        if !part.exists() {
            return Err(ExtractionError::FileNotFound(part.clone()));
        }
    }

    let mut resolutions: Vec<VideoResolution> = Vec::new();
    let mut needs_reencode = false;
    for part in parts {
        match probe::read_resolution(tools, part) {
            Ok(res) => resolutions.push(res),
            Err(err) => {
                tracing::warn!(
                    "resolution probe failed for {}, re-encoding: {}",
                    part.display(),
                    err
                );
                needs_reencode = true;
                break;
            }
        }
    }
    let mut target = resolutions.first().copied().unwrap_or(DEFAULT_RESOLUTION);
    if !needs_reencode {
        for res in &resolutions[1..] {
            if *res != target {
                needs_reencode = true;
                if res.pixels() > target.pixels() {
                    target = *res;
                }
                break;
            }
        }
    }

    let mut merged: Vec<ChapterSpan> = Vec::new();
    let mut offset_ms: u64 = 0;
    for part in parts {
        let duration = probe::read_duration(tools, part)?;
        let chapters = probe::read_chapters(tools, part).unwrap_or_default();
        merged.extend(chapters.iter().map(|ch| ch.offset_by(offset_ms)));
        offset_ms += (duration * 1000.0) as u64;
    }

    let stem = file_stem(output);
    let meta_path = scratch_dir.join(format!("{stem}.ffmeta.txt"));
    metadata::write_ffmetadata(&meta_path, None, &merged)?;

    let result = if needs_reencode {
        tracing::info!("split parts differ in resolution, re-encoding to {target}");
        run_reencode_concat(tools, parts, &meta_path, output, target)
    } else {
        let list_path = scratch_dir.join(format!("{stem}.concat.txt"));
        match write_scratch(&list_path, &concat_list_body(parts)) {
            Ok(()) => {
                let args = split_concat_copy_args(&list_path, &meta_path, output);
                let run = tools.run_ffmpeg(&args);
                let _ = std::fs::remove_file(&list_path);
                run
            }
            Err(err) => Err(err),
        }
    };
    let _ = std::fs::remove_file(&meta_path);
    result?;

    tracing::info!(
        "combined {} split parts into {}",
        parts.len(),
        output.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------
// Argument builders
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VideoCodec {
    Nvenc,
    X264,
}

impl VideoCodec {
    /// Video codec tokens including the quality setting.
    fn encode_args(self, quality: u32) -> Vec<String> {
        match self {
            VideoCodec::Nvenc => to_args(&[
                "-c:v",
                "h264_nvenc",
                "-preset",
                "p4",
                "-profile:v",
                "high",
                "-rc",
                "constqp",
                "-qp",
                &quality.to_string(),
            ]),
            VideoCodec::X264 => to_args(&[
                "-c:v",
                "libx264",
                "-preset",
                "medium",
                "-profile:v",
                "high",
                "-crf",
                &quality.to_string(),
            ]),
        }
    }
}

/// Codec block plus the shared pixel-format and audio tokens.
fn encode_tail(codec: VideoCodec) -> Vec<String> {
    let mut args = codec.encode_args(CLIP_QUALITY);
    args.extend(to_args(&[
        "-pix_fmt", "yuv420p", "-c:a", "aac", "-ar", "48000", "-b:a", "192k",
    ]));
    args
}

/// Split a start position into (rough, fine) seek offsets.
fn split_seek(start_secs: f64) -> (f64, f64) {
    let rough = (start_secs - ROUGH_SEEK_HEADROOM_SECS).max(0.0);
    (rough, start_secs - rough)
}

fn format_secs(secs: f64) -> String {
    format!("{secs:.3}")
}

fn encode_clip_args(
    input: &Path,
    meta: Option<&Path>,
    output: &Path,
    rough: f64,
    fine: f64,
    duration_secs: f64,
    codec: VideoCodec,
) -> Vec<String> {
    let mut args = vec![
        "-ss".to_string(),
        format_secs(rough),
        "-i".to_string(),
        path_arg(input),
    ];
    if let Some(meta) = meta {
        args.push("-i".to_string());
        args.push(path_arg(meta));
    }
    args.push("-ss".to_string());
    args.push(format_secs(fine));
    args.push("-t".to_string());
    args.push(format_secs(duration_secs));
    if meta.is_some() {
        args.extend(to_args(&[
            "-map",
            "0:v",
            "-map",
            "0:a",
            "-map_metadata",
            "1",
            "-map_chapters",
            "1",
        ]));
    }
    args.extend(encode_tail(codec));
    args.push("-y".to_string());
    args.push(path_arg(output));
    args
}

fn copy_clip_args(
    input: &Path,
    meta: Option<&Path>,
    output: &Path,
    start_secs: f64,
    duration_secs: f64,
) -> Vec<String> {
    let mut args = vec![
        "-ss".to_string(),
        format_secs(start_secs),
        "-i".to_string(),
        path_arg(input),
    ];
    match meta {
        Some(meta) => {
            args.push("-i".to_string());
            args.push(path_arg(meta));
            args.push("-t".to_string());
            args.push(format_secs(duration_secs));
            args.extend(to_args(&[
                "-map",
                "0:v",
                "-map",
                "0:a",
                "-map_metadata",
                "1",
                "-map_chapters",
                "1",
                "-c",
                "copy",
            ]));
        }
        None => {
            args.push("-t".to_string());
            args.push(format_secs(duration_secs));
            args.extend(to_args(&["-c", "copy", "-map", "0:v", "-map", "0:a"]));
        }
    }
    args.push("-y".to_string());
    args.push(path_arg(output));
    args
}

/// Concat demuxer list body. Backslashes flip to forward slashes and
/// single quotes get the shell-style `'\''` escape the demuxer expects.
fn concat_list_body(inputs: &[PathBuf]) -> String {
    let mut body = String::new();
    for path in inputs {
        let escaped = path
            .to_string_lossy()
            .replace('\\', "/")
            .replace('\'', "'\\''");
        body.push_str(&format!("file '{escaped}'\n"));
    }
    body
}

fn concat_copy_args(list: &Path, meta: Option<&Path>, output: &Path) -> Vec<String> {
    let mut args = to_args(&["-err_detect", "ignore_err", "-f", "concat", "-safe", "0"]);
    args.push("-i".to_string());
    args.push(path_arg(list));
    if let Some(meta) = meta {
        args.push("-i".to_string());
        args.push(path_arg(meta));
    }
    args.extend(to_args(&["-map", "0:v:0", "-map", "0:a:0"]));
    if meta.is_some() {
        args.extend(to_args(&["-map_metadata", "1", "-map_chapters", "1"]));
    }
    args.extend(to_args(&["-c", "copy", "-y"]));
    args.push(path_arg(output));
    args
}

fn split_concat_copy_args(list: &Path, meta: &Path, output: &Path) -> Vec<String> {
    let mut args = to_args(&["-f", "concat", "-safe", "0"]);
    args.push("-i".to_string());
    args.push(path_arg(list));
    args.push("-i".to_string());
    args.push(path_arg(meta));
    args.extend(to_args(&[
        "-map",
        "0:v",
        "-map",
        "0:a",
        "-map_metadata",
        "1",
        "-map_chapters",
        "1",
        "-c",
        "copy",
        "-y",
    ]));
    args.push(path_arg(output));
    args
}

/// Filter graph scaling every input to the target box (aspect preserved,
/// padded, square pixels) and concatenating video+audio pairs.
fn scale_concat_filter(count: usize, target: VideoResolution) -> String {
    let mut filter = String::new();
    for i in 0..count {
        filter.push_str(&format!(
            "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
             pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1[v{i}];",
            w = target.width,
            h = target.height,
        ));
    }
    for i in 0..count {
        filter.push_str(&format!("[v{i}][{i}:a]"));
    }
    filter.push_str(&format!("concat=n={count}:v=1:a=1[outv][outa]"));
    filter
}

fn reencode_concat_args(
    parts: &[PathBuf],
    meta: &Path,
    output: &Path,
    filter: &str,
    codec: VideoCodec,
) -> Vec<String> {
    let mut args = Vec::new();
    for part in parts {
        args.push("-i".to_string());
        args.push(path_arg(part));
    }
    args.push("-i".to_string());
    args.push(path_arg(meta));

    // The metadata file is the last input.
    let meta_index = parts.len().to_string();
    args.push("-filter_complex".to_string());
    args.push(filter.to_string());
    args.extend(to_args(&[
        "-map",
        "[outv]",
        "-map",
        "[outa]",
        "-map_metadata",
        &meta_index,
        "-map_chapters",
        &meta_index,
    ]));
    args.extend(encode_tail(codec));
    args.push("-y".to_string());
    args.push(path_arg(output));
    args
}

fn ensure_mp4_extension(output: &Path) -> PathBuf {
    if output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
    {
        return output.to_path_buf();
    }
    let mut os = output.as_os_str().to_os_string();
    os.push(".mp4");
    PathBuf::from(os)
}

// ---------------------------------------------------------------------
// Execution helpers
// ---------------------------------------------------------------------

fn run_encode(
    tools: &Toolchain,
    req: &ClipRequest,
    meta: Option<&Path>,
    rough: f64,
    fine: f64,
    use_hardware: bool,
) -> ExtractionResult<()> {
    if use_hardware {
        let args = encode_clip_args(
            &req.input,
            meta,
            &req.output,
            rough,
            fine,
            req.duration_secs,
            VideoCodec::Nvenc,
        );
        match tools.run_ffmpeg(&args) {
            Ok(()) => return Ok(()),
            Err(err) => {
                tracing::warn!("hardware encode failed, falling back to software: {}", err);
            }
        }
    }

    let args = encode_clip_args(
        &req.input,
        meta,
        &req.output,
        rough,
        fine,
        req.duration_secs,
        VideoCodec::X264,
    );
    tools.run_ffmpeg(&args)
}

fn run_reencode_concat(
    tools: &Toolchain,
    parts: &[PathBuf],
    meta: &Path,
    output: &Path,
    target: VideoResolution,
) -> ExtractionResult<()> {
    let filter = scale_concat_filter(parts.len(), target);

    let nvenc = reencode_concat_args(parts, meta, output, &filter, VideoCodec::Nvenc);
    match tools.run_ffmpeg(&nvenc) {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::warn!("hardware encode failed, falling back to software: {}", err);
            let cpu = reencode_concat_args(parts, meta, output, &filter, VideoCodec::X264);
            tools.run_ffmpeg(&cpu)
        }
    }
}

/// Write the request's markers to a scratch FFMETADATA file, if any.
fn write_marker_metadata(req: &ClipRequest, scratch_dir: &Path) -> ExtractionResult<Option<PathBuf>> {
    if req.markers.is_empty() {
        return Ok(None);
    }
    let path = scratch_dir.join(format!("{}.ffmeta.txt", file_stem(&req.output)));
    let duration_ms = (req.duration_secs * 1000.0) as u64;
    let spans = metadata::clip_marker_spans(&req.markers, duration_ms);
    metadata::write_ffmetadata(&path, None, &spans)?;
    Ok(Some(path))
}

fn write_scratch(path: &Path, content: &str) -> ExtractionResult<()> {
    std::fs::write(path, content)
        .map_err(|e| ExtractionError::io(format!("write scratch file {}", path.display()), e))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "clip".to_string())
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn to_args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::ClipMarker;

    #[test]
    fn seek_splits_with_headroom() {
        assert_eq!(split_seek(100.0), (40.0, 60.0));
        assert_eq!(split_seek(30.0), (0.0, 30.0));
        assert_eq!(split_seek(0.0), (0.0, 0.0));
    }

    #[test]
    fn hardware_encode_args_with_markers() {
        let args = encode_clip_args(
            Path::new("/v/p1.mov"),
            Some(Path::new("/tmp/clip.ffmeta.txt")),
            Path::new("/out/clip.mp4"),
            40.0,
            60.0,
            15.0,
            VideoCodec::Nvenc,
        );
        assert_eq!(
            args,
            to_args(&[
                "-ss", "40.000", "-i", "/v/p1.mov", "-i", "/tmp/clip.ffmeta.txt", "-ss",
                "60.000", "-t", "15.000", "-map", "0:v", "-map", "0:a", "-map_metadata", "1",
                "-map_chapters", "1", "-c:v", "h264_nvenc", "-preset", "p4", "-profile:v",
                "high", "-rc", "constqp", "-qp", "18", "-pix_fmt", "yuv420p", "-c:a", "aac",
                "-ar", "48000", "-b:a", "192k", "-y", "/out/clip.mp4",
            ])
        );
    }

    #[test]
    fn software_encode_args_without_markers() {
        let args = encode_clip_args(
            Path::new("/v/p1.mov"),
            None,
            Path::new("/out/clip.mp4"),
            0.0,
            2.0,
            10.0,
            VideoCodec::X264,
        );
        assert!(!args.contains(&"-map".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"18".to_string()));
        assert_eq!(args.iter().filter(|a| *a == "-ss").count(), 2);
    }

    #[test]
    fn copy_args_order_with_markers() {
        let args = copy_clip_args(
            Path::new("/v/p1.mov"),
            Some(Path::new("/tmp/m.txt")),
            Path::new("/out/clip.mov"),
            62.0,
            15.0,
        );
        assert_eq!(
            args,
            to_args(&[
                "-ss", "62.000", "-i", "/v/p1.mov", "-i", "/tmp/m.txt", "-t", "15.000",
                "-map", "0:v", "-map", "0:a", "-map_metadata", "1", "-map_chapters", "1",
                "-c", "copy", "-y", "/out/clip.mov",
            ])
        );
    }

    #[test]
    fn copy_args_order_without_markers() {
        let args = copy_clip_args(
            Path::new("/v/p1.mov"),
            None,
            Path::new("/out/clip.mov"),
            62.0,
            15.0,
        );
        assert_eq!(
            args,
            to_args(&[
                "-ss", "62.000", "-i", "/v/p1.mov", "-t", "15.000", "-c", "copy", "-map",
                "0:v", "-map", "0:a", "-y", "/out/clip.mov",
            ])
        );
    }

    #[test]
    fn concat_list_escapes_paths() {
        let body = concat_list_body(&[
            PathBuf::from("C:\\clips\\first.mp4"),
            PathBuf::from("/clips/o'brien.mp4"),
        ]);
        assert_eq!(
            body,
            "file 'C:/clips/first.mp4'\nfile '/clips/o'\\''brien.mp4'\n"
        );
    }

    #[test]
    fn concat_args_include_error_tolerance() {
        let args = concat_copy_args(
            Path::new("/tmp/list.txt"),
            Some(Path::new("/tmp/meta.txt")),
            Path::new("/out/combined.mp4"),
        );
        assert_eq!(
            args,
            to_args(&[
                "-err_detect", "ignore_err", "-f", "concat", "-safe", "0", "-i",
                "/tmp/list.txt", "-i", "/tmp/meta.txt", "-map", "0:v:0", "-map", "0:a:0",
                "-map_metadata", "1", "-map_chapters", "1", "-c", "copy", "-y",
                "/out/combined.mp4",
            ])
        );

        let simple = concat_copy_args(
            Path::new("/tmp/list.txt"),
            None,
            Path::new("/out/combined.mp4"),
        );
        assert!(!simple.contains(&"-map_chapters".to_string()));
        assert!(simple.contains(&"-err_detect".to_string()));
    }

    #[test]
    fn split_concat_maps_whole_streams() {
        let args = split_concat_copy_args(
            Path::new("/tmp/list.txt"),
            Path::new("/tmp/meta.txt"),
            Path::new("/out/GX010123.mp4"),
        );
        assert!(args.contains(&"0:v".to_string()));
        assert!(!args.contains(&"0:v:0".to_string()));
        assert!(!args.contains(&"-err_detect".to_string()));
    }

    #[test]
    fn filter_scales_and_concats_every_input() {
        let filter = scale_concat_filter(
            2,
            VideoResolution {
                width: 1920,
                height: 1080,
            },
        );
        assert_eq!(
            filter,
            "[0:v]scale=1920:1080:force_original_aspect_ratio=decrease,\
             pad=1920:1080:(ow-iw)/2:(oh-ih)/2,setsar=1[v0];\
             [1:v]scale=1920:1080:force_original_aspect_ratio=decrease,\
             pad=1920:1080:(ow-iw)/2:(oh-ih)/2,setsar=1[v1];\
             [v0][0:a][v1][1:a]concat=n=2:v=1:a=1[outv][outa]"
        );
    }

    #[test]
    fn reencode_args_map_metadata_from_last_input() {
        let parts = vec![PathBuf::from("/v/a.mp4"), PathBuf::from("/v/b.mp4")];
        let args = reencode_concat_args(
            &parts,
            Path::new("/tmp/meta.txt"),
            Path::new("/out/joined.mp4"),
            "FILTER",
            VideoCodec::Nvenc,
        );
        let meta_pos = args.iter().position(|a| a == "-map_metadata").unwrap();
        assert_eq!(args[meta_pos + 1], "2");
        assert!(args.contains(&"FILTER".to_string()));
        assert!(args.contains(&"h264_nvenc".to_string()));
    }

    #[test]
    fn mp4_extension_is_enforced() {
        assert_eq!(
            ensure_mp4_extension(Path::new("/out/reel")),
            PathBuf::from("/out/reel.mp4")
        );
        assert_eq!(
            ensure_mp4_extension(Path::new("/out/reel.MP4")),
            PathBuf::from("/out/reel.MP4")
        );
        assert_eq!(
            ensure_mp4_extension(Path::new("/out/reel.mov")),
            PathBuf::from("/out/reel.mov.mp4")
        );
    }

    #[test]
    fn missing_input_fails_before_running() {
        let tools = Toolchain::with_paths("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
        let req = ClipRequest::new("/nonexistent/video.mov", "/tmp/out.mp4", 10.0, 5.0);
        let scratch = tempfile::tempdir().unwrap();
        let err = extract_clip(&tools, &req, true, scratch.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::FileNotFound(_)));
    }

    #[test]
    fn marker_metadata_is_written_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("source.mov");
        std::fs::write(&input, b"stub").unwrap();

        let tools = Toolchain::with_paths("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
        let req = ClipRequest::new(&input, dir.path().join("clip.mp4"), 10.0, 5.0)
            .with_markers(vec![ClipMarker {
                offset_ms: 1_000,
                label: "Ch01".to_string(),
            }]);

        let err = extract_clip(&tools, &req, false, dir.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::Spawn { .. }));
        // Scratch metadata must not linger after a failed run.
        assert!(!dir.path().join("clip.ffmeta.txt").exists());
    }

    #[test]
    fn split_combine_requires_two_parts() {
        let tools = Toolchain::with_paths("/nonexistent/ffmpeg", "/nonexistent/ffprobe");
        let scratch = tempfile::tempdir().unwrap();
        let err = combine_split_parts(
            &tools,
            &[PathBuf::from("/v/GX010123.MP4")],
            Path::new("/out/joined.mp4"),
            scratch.path(),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractionError::TooFewParts { count: 1 }));
    }
}
