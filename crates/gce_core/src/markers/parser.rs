//! FFMETADATA chapter marker parsing.

use std::path::Path;

use crate::models::Chapter;

use super::types::{MarkerError, MarkerResult};

/// Parse chapter markers out of FFMETADATA-style text.
///
/// Each line beginning with `START=` followed by a millisecond offset
/// contributes one chapter; every other line is ignored. Chapter numbers
/// are assigned 1-based in textual encounter order, and that order is
/// preserved exactly — a file with out-of-order `START=` lines yields
/// chapters whose numbers do not correlate with ascending offsets. The
/// chronological sort happens later, on the clock-time axis, and must not
/// happen here.
pub fn parse_marker_text(text: &str, segment_name: &str) -> Vec<Chapter> {
    let mut chapters = Vec::new();
    for line in text.lines() {
        if let Some(offset_ms) = marker_offset(line) {
            let number = chapters.len() as u32 + 1;
            chapters.push(Chapter::new(number, offset_ms, segment_name));
        }
    }
    chapters
}

/// Parse chapter markers from a metadata file on disk.
///
/// Fails with [`MarkerError::Io`] when the file cannot be read.
pub fn parse_marker_file(path: &Path, segment_name: &str) -> MarkerResult<Vec<Chapter>> {
    let text =
        std::fs::read_to_string(path).map_err(|source| MarkerError::io(path, source))?;
    let chapters = parse_marker_text(&text, segment_name);
    tracing::debug!(
        "parsed {} chapter markers from {}",
        chapters.len(),
        path.display()
    );
    Ok(chapters)
}

/// Read the millisecond offset from a `START=` line.
///
/// Digits are taken greedily from the front of the value; trailing text
/// after the digit run does not invalidate the line. The prefix match is
/// anchored at the start of the line, so `TIMEBASE=`, `END=`, `title=`
/// and `[CHAPTER]` lines from full FFMETADATA files are all skipped.
fn marker_offset(line: &str) -> Option<u64> {
    let rest = line.strip_prefix("START=")?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_METADATA: &str = "\
;FFMETADATA1
title=GX010092

[CHAPTER]
TIMEBASE=1/1000
START=10000
END=10001
title=HiLight 1

[CHAPTER]
TIMEBASE=1/1000
START=70000
END=70001
title=HiLight 2
";

    #[test]
    fn parses_start_lines_in_order() {
        let chapters = parse_marker_text(SAMPLE_METADATA, "1st Period");
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].number, 1);
        assert_eq!(chapters[0].start_offset_ms, 10_000);
        assert_eq!(chapters[1].number, 2);
        assert_eq!(chapters[1].start_offset_ms, 70_000);
        assert!(chapters.iter().all(|c| c.segment_name == "1st Period"));
    }

    #[test]
    fn ignores_other_ffmetadata_lines() {
        // END= carries digits too but must not produce a marker.
        let chapters = parse_marker_text("END=500\nTIMEBASE=1/1000\ntitle=x\n", "p");
        assert!(chapters.is_empty());
    }

    #[test]
    fn textual_order_is_preserved_not_sorted() {
        let chapters = parse_marker_text("START=70000\nSTART=10000\n", "p");
        assert_eq!(chapters[0].number, 1);
        assert_eq!(chapters[0].start_offset_ms, 70_000);
        assert_eq!(chapters[1].number, 2);
        assert_eq!(chapters[1].start_offset_ms, 10_000);
    }

    #[test]
    fn trailing_junk_after_digits_is_tolerated() {
        let chapters = parse_marker_text("START=123abc\n", "p");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].start_offset_ms, 123);
    }

    #[test]
    fn start_without_digits_is_skipped() {
        assert!(parse_marker_text("START=\nSTART=x9\n", "p").is_empty());
    }

    #[test]
    fn prefix_must_be_at_line_start() {
        assert!(parse_marker_text("  START=100\nxSTART=100\n", "p").is_empty());
    }

    #[test]
    fn empty_text_yields_no_chapters() {
        assert!(parse_marker_text("", "p").is_empty());
    }

    #[test]
    fn file_parse_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "START=42\n").unwrap();
        let chapters = parse_marker_file(file.path(), "OT").unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].start_offset_ms, 42);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = parse_marker_file(Path::new("/nonexistent/meta.txt"), "p").unwrap_err();
        assert!(matches!(err, MarkerError::Io { .. }));
    }
}
