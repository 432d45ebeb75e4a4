//! Working-folder scan: classify files, pair them into candidates,
//! detect split recordings.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::extraction::{self, ExtractionResult, MediaReport, Toolchain};

use super::types::{
    DiscoveryError, DiscoveryResult, FolderScan, MediaFile, MetadataPlan, SegmentCandidate,
    SplitChain,
};

/// Probing seam for [`scan_folder`].
///
/// Production code uses [`FfprobeInspector`]; tests substitute an
/// in-memory implementation so scans run on bare touched files.
pub trait MediaInspector {
    /// Probe the timecode, chapters and duration of one media file.
    fn inspect(&self, media: &Path) -> ExtractionResult<MediaReport>;
}

/// [`MediaInspector`] backed by ffprobe.
pub struct FfprobeInspector {
    tools: Toolchain,
}

impl FfprobeInspector {
    pub fn new(tools: Toolchain) -> Self {
        Self { tools }
    }
}

impl MediaInspector for FfprobeInspector {
    fn inspect(&self, media: &Path) -> ExtractionResult<MediaReport> {
        Ok(extraction::media_report(&self.tools, media))
    }
}

/// Display name for the segment at `index` (0-based).
///
/// Three periods, then overtime; anything later falls back to a plain
/// numbered name.
pub fn period_name(index: usize) -> String {
    match index {
        0 => "1st Period".to_string(),
        1 => "2nd Period".to_string(),
        2 => "3rd Period".to_string(),
        3 => "OT".to_string(),
        n => format!("Period {}", n + 1),
    }
}

/// Sidecar marker path for a media file: `<dir>/<base>_metadata.txt`.
pub fn sidecar_path(media: &Path) -> PathBuf {
    let base = media
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("media");
    media.with_file_name(format!("{base}_metadata.txt"))
}

/// Scan a working folder: probe every video, pair originals and
/// sidecars to converted videos by base name, and detect split
/// recordings.
///
/// Probe failures are tolerated; a file that cannot be probed simply
/// scans as having no timecode and no chapters.
pub fn scan_folder(dir: &Path, inspector: &dyn MediaInspector) -> DiscoveryResult<FolderScan> {
    let mut video_paths: Vec<(PathBuf, String, String)> = Vec::new();
    let mut sidecars: Vec<(String, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        let Some(ext) = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
        else {
            continue;
        };

        match ext.as_str() {
            "mov" | "mp4" => {
                // A stray export named like a sidecar is not a video.
                if stem.ends_with("_metadata") {
                    continue;
                }
                video_paths.push((path, stem, ext));
            }
            "txt" => {
                if let Some(base) = stem.strip_suffix("_metadata") {
                    sidecars.push((base.to_string(), path));
                }
            }
            _ => {}
        }
    }

    let split_chains = detect_split_chains(dir)?;

    let mut converted: Vec<MediaFile> = Vec::new();
    let mut originals: Vec<MediaFile> = Vec::new();
    for (path, base_name, ext) in video_paths {
        tracing::debug!("Scanning {}", path.display());
        let report = match inspector.inspect(&path) {
            Ok(report) => report,
            Err(err) => {
                tracing::debug!("Probe failed for {}: {}", path.display(), err);
                MediaReport::default()
            }
        };
        let file = MediaFile {
            path,
            base_name,
            report,
        };
        if ext == "mov" {
            converted.push(file);
        } else {
            originals.push(file);
        }
    }
    converted.sort_by(|a, b| a.base_name.cmp(&b.base_name));
    originals.sort_by(|a, b| a.base_name.cmp(&b.base_name));

    let (converted_count, original_count, sidecar_count) =
        (converted.len(), originals.len(), sidecars.len());

    let mut candidates = Vec::with_capacity(converted.len());
    for (i, video) in converted.into_iter().enumerate() {
        let original = originals
            .iter()
            .find(|o| o.base_name == video.base_name)
            .cloned();
        let sidecar = sidecars
            .iter()
            .find(|(base, _)| *base == video.base_name)
            .map(|(_, path)| path.clone());
        let plan = classify(&video, original.as_ref(), sidecar.is_some());
        candidates.push(SegmentCandidate {
            name: period_name(i),
            video,
            original,
            sidecar,
            plan,
        });
    }

    let scan = FolderScan {
        folder: dir.to_path_buf(),
        candidates,
        split_chains,
        converted_count,
        original_count,
        sidecar_count,
    };
    tracing::info!("{}", scan.summary());
    Ok(scan)
}

/// Find split GoPro recordings: chains of `GX######` / `GH######` parts
/// sharing a video id and extension, with two or more parts.
///
/// The name encodes prefix, two-digit sequence and four-digit video id
/// (`GX010092.MP4` is sequence 01 of video 0092). Parts come back
/// sorted by sequence; chains come back sorted by video id.
pub fn detect_split_chains(dir: &Path) -> DiscoveryResult<Vec<SplitChain>> {
    let pattern = Regex::new(r"^(GX|GH)(\d{2})(\d{4})\.(MP4|mp4|MOV|mov)$").unwrap();

    let mut groups: HashMap<(String, String, String), Vec<(String, PathBuf)>> = HashMap::new();
    for entry in fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = pattern.captures(name) else {
            continue;
        };

        let key = (
            caps[1].to_string(),
            caps[3].to_string(),
            caps[4].to_ascii_uppercase(),
        );
        groups
            .entry(key)
            .or_default()
            .push((caps[2].to_string(), entry.path()));
    }

    let mut chains: Vec<SplitChain> = groups
        .into_iter()
        .filter(|(_, parts)| parts.len() >= 2)
        .map(|((prefix, video_id, extension), mut parts)| {
            parts.sort_by(|a, b| a.0.cmp(&b.0));
            SplitChain {
                video_id,
                prefix,
                extension,
                parts: parts.into_iter().map(|(_, path)| path).collect(),
            }
        })
        .collect();
    chains.sort_by(|a, b| a.video_id.cmp(&b.video_id));

    Ok(chains)
}

/// Decide how a candidate's markers will be obtained.
fn classify(video: &MediaFile, original: Option<&MediaFile>, has_sidecar: bool) -> MetadataPlan {
    if video.report.has_chapters() && video.report.has_timecode() {
        return MetadataPlan::Embedded;
    }
    if has_sidecar {
        // A sidecar is only usable when something still carries the
        // timecode to anchor it with.
        let timecode_available = video.report.has_timecode()
            || original.is_some_and(|o| o.report.has_timecode());
        return if timecode_available {
            MetadataPlan::Sidecar
        } else {
            MetadataPlan::Missing
        };
    }
    if original.is_some_and(|o| o.report.has_chapters()) {
        return MetadataPlan::NeedsExtraction;
    }
    MetadataPlan::Missing
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::extraction::ExtractionError;
    use crate::models::MetadataSource;

    #[derive(Default)]
    struct StubInspector {
        reports: HashMap<PathBuf, MediaReport>,
    }

    impl StubInspector {
        fn with_report(mut self, path: impl Into<PathBuf>, report: MediaReport) -> Self {
            self.reports.insert(path.into(), report);
            self
        }
    }

    impl MediaInspector for StubInspector {
        fn inspect(&self, media: &Path) -> ExtractionResult<MediaReport> {
            self.reports
                .get(media)
                .cloned()
                .ok_or_else(|| ExtractionError::FileNotFound(media.to_path_buf()))
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"").unwrap();
        path
    }

    fn report(timecode: Option<&str>, chapters: usize) -> MediaReport {
        MediaReport {
            timecode: timecode.map(str::to_string),
            chapter_count: chapters,
            duration_secs: None,
        }
    }

    #[test]
    fn detects_split_chains_with_two_or_more_parts() {
        let dir = tempdir().unwrap();
        let p2 = touch(dir.path(), "GX020092.MP4");
        let p1 = touch(dir.path(), "GX010092.MP4");
        touch(dir.path(), "GX010093.MP4"); // single part, no chain
        let m1 = touch(dir.path(), "GH010100.mov");
        let m2 = touch(dir.path(), "GH020100.mov");
        touch(dir.path(), "notes.txt");

        let chains = detect_split_chains(dir.path()).unwrap();
        assert_eq!(chains.len(), 2);

        assert_eq!(chains[0].video_id, "0092");
        assert_eq!(chains[0].prefix, "GX");
        assert_eq!(chains[0].extension, "MP4");
        assert_eq!(chains[0].parts, vec![p1, p2]);

        assert_eq!(chains[1].video_id, "0100");
        assert_eq!(chains[1].prefix, "GH");
        assert_eq!(chains[1].extension, "MOV");
        assert_eq!(chains[1].parts, vec![m1, m2]);
    }

    #[test]
    fn split_chains_do_not_mix_extensions() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "GX010092.MP4");
        touch(dir.path(), "GX020092.mov");
        assert!(detect_split_chains(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn pairs_originals_and_sidecars_by_base_name() {
        let dir = tempdir().unwrap();
        let mov = touch(dir.path(), "p1.mov");
        let mp4 = touch(dir.path(), "p1.mp4");
        let sidecar = touch(dir.path(), "p1_metadata.txt");

        let inspector = StubInspector::default()
            .with_report(&mov, report(None, 0))
            .with_report(&mp4, report(Some("13:00:00:00"), 18));

        let scan = scan_folder(dir.path(), &inspector).unwrap();
        assert_eq!(scan.converted_count, 1);
        assert_eq!(scan.original_count, 1);
        assert_eq!(scan.sidecar_count, 1);

        let candidate = &scan.candidates[0];
        assert_eq!(candidate.name, "1st Period");
        assert_eq!(candidate.plan, MetadataPlan::Sidecar);
        assert_eq!(candidate.sidecar.as_deref(), Some(sidecar.as_path()));

        let segment = candidate.to_segment().unwrap();
        assert_eq!(segment.video_path, mov);
        assert_eq!(segment.timecode_source, mp4);
        assert!(matches!(segment.metadata_source, MetadataSource::Sidecar(_)));
    }

    #[test]
    fn videos_with_embedded_markers_are_ready_alone() {
        let dir = tempdir().unwrap();
        let mov = touch(dir.path(), "p2.mov");
        let inspector = StubInspector::default().with_report(&mov, report(Some("14:00:00:00"), 9));

        let scan = scan_folder(dir.path(), &inspector).unwrap();
        assert_eq!(scan.candidates[0].plan, MetadataPlan::Embedded);
        assert!(scan.is_ready());

        let segments = scan.ready_segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].timecode_source, mov);
    }

    #[test]
    fn chaptered_original_without_sidecar_needs_extraction() {
        let dir = tempdir().unwrap();
        let mov = touch(dir.path(), "p3.mov");
        let mp4 = touch(dir.path(), "p3.mp4");
        let inspector = StubInspector::default()
            .with_report(&mov, report(None, 0))
            .with_report(&mp4, report(Some("15:00:00:00"), 12));

        let scan = scan_folder(dir.path(), &inspector).unwrap();
        assert_eq!(scan.candidates[0].plan, MetadataPlan::NeedsExtraction);
        assert!(!scan.is_ready());
        assert_eq!(scan.needing_extraction().len(), 1);
        assert!(scan.ready_segments().is_empty());
    }

    #[test]
    fn sidecar_without_any_timecode_is_not_usable() {
        let dir = tempdir().unwrap();
        let mov = touch(dir.path(), "p4.mov");
        touch(dir.path(), "p4_metadata.txt");
        let inspector = StubInspector::default().with_report(&mov, report(None, 0));

        let scan = scan_folder(dir.path(), &inspector).unwrap();
        assert_eq!(scan.candidates[0].plan, MetadataPlan::Missing);
    }

    #[test]
    fn probe_failures_scan_as_markerless() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "p5.mov");
        let scan = scan_folder(dir.path(), &StubInspector::default()).unwrap();
        assert_eq!(scan.candidates.len(), 1);
        assert_eq!(scan.candidates[0].plan, MetadataPlan::Missing);
    }

    #[test]
    fn stray_files_are_not_videos() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "p1_metadata.mp4");
        touch(dir.path(), "notes.txt");
        let scan = scan_folder(dir.path(), &StubInspector::default()).unwrap();
        assert!(scan.candidates.is_empty());
        assert_eq!(scan.sidecar_count, 0);
    }

    #[test]
    fn candidates_sort_by_base_name_and_take_period_names() {
        let dir = tempdir().unwrap();
        for name in ["d.mov", "b.mov", "a.mov", "c.mov", "e.mov"] {
            touch(dir.path(), name);
        }
        let scan = scan_folder(dir.path(), &StubInspector::default()).unwrap();
        let names: Vec<_> = scan.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["1st Period", "2nd Period", "3rd Period", "OT", "Period 5"]
        );
        assert_eq!(scan.candidates[0].video.base_name, "a");
    }

    #[test]
    fn sidecar_path_sits_next_to_the_media() {
        assert_eq!(
            sidecar_path(Path::new("/f/GX010092.MP4")),
            PathBuf::from("/f/GX010092_metadata.txt")
        );
    }

    #[test]
    fn missing_folder_is_an_io_error() {
        let err =
            scan_folder(Path::new("/nonexistent/folder"), &StubInspector::default()).unwrap_err();
        assert!(matches!(err, DiscoveryError::Io { .. }));
    }
}
