//! Clip group types and validation errors.

use crate::models::Chapter;

/// Extraction window padding around a highlight instant, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPadding {
    /// Seconds of lead-in before the marker.
    pub before_secs: f64,
    /// Seconds of follow-through after the marker.
    pub after_secs: f64,
}

impl ClipPadding {
    /// Create a padding pair.
    pub fn new(before_secs: f64, after_secs: f64) -> Self {
        Self {
            before_secs,
            after_secs,
        }
    }
}

impl Default for ClipPadding {
    fn default() -> Self {
        Self {
            before_secs: 8.0,
            after_secs: 2.0,
        }
    }
}

/// A chapter marker positioned inside an extracted clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipMarker {
    /// Milliseconds from the start of the clip.
    pub offset_ms: u64,
    /// Marker title embedded in the output file.
    pub label: String,
}

/// One or more chapters merged into a single extraction job.
///
/// Produced fresh per extraction request by the grouping sweep and read
/// only from then on. Each input chapter belongs to exactly one group.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipGroup {
    /// Member chapters, ascending by video time, all from one segment.
    pub chapters: Vec<Chapter>,
    /// Extraction window start, segment-relative seconds (clamped ≥ 0).
    pub start_secs: f64,
    /// Extraction window end, segment-relative seconds.
    pub end_secs: f64,
    /// `end_secs - start_secs`.
    pub duration_secs: f64,
    /// Segment shared by all members.
    pub segment_name: String,
    /// True iff more than one chapter was merged in.
    pub is_merged: bool,
    /// Human-readable merge description, present only when merged.
    pub summary: Option<String>,
}

impl ClipGroup {
    /// The first member, used for naming and ordering.
    pub fn primary_chapter(&self) -> &Chapter {
        // Groups are never constructed empty.
        &self.chapters[0]
    }

    /// The last member by video time.
    pub fn last_chapter(&self) -> &Chapter {
        &self.chapters[self.chapters.len() - 1]
    }

    /// Markers for embedding into the extracted clip.
    ///
    /// Each member's position within the clip is its video time minus
    /// the window start (clamped to zero), in milliseconds. Merged
    /// groups label members "Highlight {i} (Ch{number})"; a lone chapter
    /// is just "Ch{number}".
    pub fn clip_markers(&self) -> Vec<ClipMarker> {
        self.chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| {
                let offset_secs = (chapter.video_time_secs() - self.start_secs).max(0.0);
                let label = if self.is_merged {
                    format!("Highlight {} (Ch{:02})", i + 1, chapter.number)
                } else {
                    format!("Ch{:02}", chapter.number)
                };
                ClipMarker {
                    offset_ms: (offset_secs * 1000.0) as u64,
                    label,
                }
            })
            .collect()
    }
}

/// Validation errors from clip grouping.
#[derive(Debug, thiserror::Error)]
pub enum GroupingError {
    /// A padding value was negative.
    #[error("negative {name} padding: {value}")]
    NegativePadding {
        /// Which padding ("before" or "after").
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A chapter carried an empty segment name.
    #[error("chapter {chapter_number} has an empty segment name")]
    EmptySegmentName {
        /// Segment-local number of the offending chapter.
        chapter_number: u32,
    },
}

/// Result type for grouping operations.
pub type GroupingResult<T> = Result<T, GroupingError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn group(chapters: Vec<Chapter>, start: f64, end: f64) -> ClipGroup {
        let is_merged = chapters.len() > 1;
        ClipGroup {
            segment_name: chapters[0].segment_name.clone(),
            chapters,
            start_secs: start,
            end_secs: end,
            duration_secs: end - start,
            is_merged,
            summary: None,
        }
    }

    #[test]
    fn default_padding_matches_config_defaults() {
        let padding = ClipPadding::default();
        assert_eq!(padding.before_secs, 8.0);
        assert_eq!(padding.after_secs, 2.0);
    }

    #[test]
    fn single_chapter_marker_uses_short_label() {
        let g = group(vec![Chapter::new(3, 10_000, "1st Period")], 2.0, 12.0);
        let markers = g.clip_markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].offset_ms, 8_000);
        assert_eq!(markers[0].label, "Ch03");
    }

    #[test]
    fn merged_markers_are_numbered_within_the_clip() {
        let g = group(
            vec![Chapter::new(4, 70_000, "p"), Chapter::new(5, 75_000, "p")],
            62.0,
            77.0,
        );
        let markers = g.clip_markers();
        assert_eq!(markers[0].label, "Highlight 1 (Ch04)");
        assert_eq!(markers[0].offset_ms, 8_000);
        assert_eq!(markers[1].label, "Highlight 2 (Ch05)");
        assert_eq!(markers[1].offset_ms, 13_000);
    }

    #[test]
    fn marker_offset_clamps_to_clip_start() {
        // Window clamped at zero: the marker sits 3s in, not -5s.
        let g = group(vec![Chapter::new(1, 3_000, "p")], 0.0, 5.0);
        assert_eq!(g.clip_markers()[0].offset_ms, 3_000);

        // A start inside the chapter would clamp the offset too.
        let g = group(vec![Chapter::new(1, 3_000, "p")], 4.0, 5.0);
        assert_eq!(g.clip_markers()[0].offset_ms, 0);
    }
}
