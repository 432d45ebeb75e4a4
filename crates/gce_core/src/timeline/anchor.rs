//! Anchoring chapter offsets to clock time.

use chrono::{Duration, NaiveTime};

use crate::models::Chapter;
use crate::timecode::Timecode;

/// Stamp every chapter with its absolute clock time.
///
/// `clock_time = anchor + start_offset_ms`. Pure arithmetic, no I/O;
/// a malformed timecode fails upstream, before an anchor exists. The
/// addition wraps around midnight — a game never spans it, so ordering
/// across the wrap is unsupported.
pub fn anchor_chapters(chapters: &mut [Chapter], anchor: NaiveTime) {
    for chapter in chapters.iter_mut() {
        let offset = Duration::milliseconds(chapter.start_offset_ms as i64);
        let (clock_time, _) = anchor.overflowing_add_signed(offset);
        chapter.clock_time = Some(clock_time);
    }
}

/// Anchor chapters using a parsed device timecode.
pub fn anchor_chapters_to_timecode(chapters: &mut [Chapter], timecode: &Timecode) {
    anchor_chapters(chapters, timecode.to_clock_time());
}
