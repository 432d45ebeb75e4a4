//! Highlight marker types shared across the crate.

use chrono::{NaiveTime, Timelike};

/// A single highlight marker parsed from segment metadata.
///
/// Carries two distinct orderings that must never be conflated:
/// `number` is the 1-based position within the owning segment (parse
/// order), while `global_order` is the 1-based rank across all segments
/// after the chronological merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// 1-based index within the owning segment, in parse order.
    pub number: u32,
    /// Offset from the segment start in milliseconds.
    pub start_offset_ms: u64,
    /// Absolute time of day this marker corresponds to. `None` until the
    /// owning segment has been anchored to its device timecode.
    pub clock_time: Option<NaiveTime>,
    /// 1-based rank across all segments, assigned by the cross-segment
    /// merge. Zero until the merge has run.
    pub global_order: u32,
    /// Name of the owning segment ("period").
    pub segment_name: String,
}

impl Chapter {
    /// Create a new chapter at the given segment-relative offset.
    pub fn new(number: u32, start_offset_ms: u64, segment_name: impl Into<String>) -> Self {
        Self {
            number,
            start_offset_ms,
            clock_time: None,
            global_order: 0,
            segment_name: segment_name.into(),
        }
    }

    /// Set the absolute clock time.
    pub fn with_clock_time(mut self, clock_time: NaiveTime) -> Self {
        self.clock_time = Some(clock_time);
        self
    }

    /// Set the global order.
    pub fn with_global_order(mut self, global_order: u32) -> Self {
        self.global_order = global_order;
        self
    }

    /// Get the segment-relative position in seconds.
    ///
    /// All extraction-window arithmetic operates on this value.
    pub fn video_time_secs(&self) -> f64 {
        self.start_offset_ms as f64 / 1000.0
    }

    /// Format the segment-relative position as MM:SS.
    pub fn format_video_time(&self) -> String {
        format_video_time(self.start_offset_ms)
    }

    /// Format the clock time for use in filenames (HH-MM-SS-mmm).
    pub fn format_clock_time(&self) -> Option<String> {
        self.clock_time.map(format_clock_time)
    }
}

/// Format a segment-relative offset as MM:SS.
///
/// Minutes are total minutes, not wrapped at 60, so a marker late in a
/// long recording reads e.g. "73:20".
pub fn format_video_time(offset_ms: u64) -> String {
    let total_secs = offset_ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Format a clock time as HH-MM-SS-mmm (filename-safe, sorts lexically).
pub fn format_clock_time(t: NaiveTime) -> String {
    format!(
        "{:02}-{:02}-{:02}-{:03}",
        t.hour(),
        t.minute(),
        t.second(),
        t.nanosecond() / 1_000_000
    )
}

/// Format a clock time as HH:MM:SS.mmm for display and persistence.
pub fn format_clock_time_readable(t: NaiveTime) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        t.hour(),
        t.minute(),
        t.second(),
        t.nanosecond() / 1_000_000
    )
}

/// Parse a clock time previously written by [`format_clock_time_readable`].
pub fn parse_clock_time_readable(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.3f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_chapter_is_unanchored() {
        let ch = Chapter::new(1, 10_000, "1st Period");
        assert_eq!(ch.number, 1);
        assert_eq!(ch.start_offset_ms, 10_000);
        assert!(ch.clock_time.is_none());
        assert_eq!(ch.global_order, 0);
        assert_eq!(ch.segment_name, "1st Period");
    }

    #[test]
    fn video_time_converts_to_seconds() {
        let ch = Chapter::new(1, 12_500, "p");
        assert_eq!(ch.video_time_secs(), 12.5);
    }

    #[test]
    fn video_time_formats_total_minutes() {
        assert_eq!(format_video_time(0), "00:00");
        assert_eq!(format_video_time(65_000), "01:05");
        // Total minutes, not wrapped at the hour.
        assert_eq!(format_video_time(4_400_000), "73:20");
    }

    #[test]
    fn clock_time_formats() {
        let t = NaiveTime::from_hms_milli_opt(11, 49, 22, 500).unwrap();
        assert_eq!(format_clock_time(t), "11-49-22-500");
        assert_eq!(format_clock_time_readable(t), "11:49:22.500");
    }

    #[test]
    fn clock_time_round_trips_through_readable_format() {
        let t = NaiveTime::from_hms_milli_opt(9, 5, 1, 42).unwrap();
        let s = format_clock_time_readable(t);
        assert_eq!(parse_clock_time_readable(&s), Some(t));
    }
}
