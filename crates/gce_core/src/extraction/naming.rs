//! Output filenames for extracted clips.
//!
//! Names sort chronologically in a file browser: the global order prefix
//! first, then the wall-clock time, then the segment and chapter number.

use chrono::NaiveTime;

use crate::grouping::ClipGroup;
use crate::models::{format_clock_time, Chapter};

/// Filename for a single-chapter clip:
/// `{order:03}_{HH-MM-SS-mmm}_{segment}_Ch{number:02}.mp4`.
pub fn clip_filename(chapter: &Chapter) -> String {
    format!(
        "{:03}_{}_{}_Ch{:02}.mp4",
        chapter.global_order,
        format_clock_time(chapter.clock_time.unwrap_or(NaiveTime::MIN)),
        sanitize_filename(&chapter.segment_name),
        chapter.number,
    )
}

/// Filename for a clip group. Merged groups carry the chapter range
/// (`Ch02-04`) so the span is visible; the prefix fields come from the
/// first chapter, keeping the sort order consistent with single clips.
pub fn group_filename(group: &ClipGroup) -> String {
    if !group.is_merged {
        return clip_filename(group.primary_chapter());
    }

    let first = group.primary_chapter();
    let last = group.last_chapter();
    format!(
        "{:03}_{}_{}_Ch{:02}-{:02}.mp4",
        first.global_order,
        format_clock_time(first.clock_time.unwrap_or(NaiveTime::MIN)),
        sanitize_filename(&first.segment_name),
        first.number,
        last.number,
    )
}

/// Make a name safe for filenames: spaces become underscores and the
/// characters `<>:"/\|?*` are dropped.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(' ', "_")
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect()
}
