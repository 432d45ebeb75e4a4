//! Overlap detection and clip group construction.
//!
//! The sweep walks each segment's chapters in video order, folding them
//! into an accumulator that either absorbs the next chapter (its padded
//! start falls inside the window built so far) or is finalized so a new
//! window can open. The comparison is strict: a padded start exactly on
//! the running end begins a new group. That boundary is a compatibility
//! contract, not an approximation.

use crate::models::{Chapter, SegmentChapters};

use super::types::{ClipGroup, ClipPadding, GroupingError, GroupingResult};

/// Group temporally adjacent chapters into extraction jobs.
///
/// Each segment is its own partition — windows never merge across
/// segments, whatever their clock times, because different segments are
/// different underlying media. Within a partition chapters are swept in
/// ascending video order; the returned groups are sorted by the primary
/// chapter's global order for presentation.
///
/// Empty input produces an empty output. Negative padding and chapters
/// with an empty segment name are rejected up front.
pub fn build_clip_groups(
    segments: &[SegmentChapters],
    padding: ClipPadding,
) -> GroupingResult<Vec<ClipGroup>> {
    validate(segments, padding)?;

    let mut groups: Vec<ClipGroup> = Vec::new();
    for seg in segments {
        let mut chapters = seg.chapters.clone();
        // Video time, not clock time: overlap is a property of the
        // segment's own timeline.
        chapters.sort_by_key(|c| c.start_offset_ms);
        groups.extend(sweep(chapters, padding));
    }

    groups.sort_by_key(|g| g.primary_chapter().global_order);

    tracing::debug!(
        "built {} clip groups ({} merged)",
        groups.len(),
        groups.iter().filter(|g| g.is_merged).count()
    );
    Ok(groups)
}

/// One-line overlap report for the whole grouping, if any merges happened.
pub fn overlap_summary(groups: &[ClipGroup]) -> Option<String> {
    let merged_groups = groups.iter().filter(|g| g.is_merged).count();
    if merged_groups == 0 {
        return None;
    }
    let merged_chapters: usize = groups
        .iter()
        .filter(|g| g.is_merged)
        .map(|g| g.chapters.len())
        .sum();
    Some(format!(
        "{merged_groups} overlapping highlight groups detected \
         ({merged_chapters} highlights merged into {merged_groups} clips)"
    ))
}

/// After-padding that would stretch a window from one highlight through
/// the next: the gap between them plus the configured follow-through.
pub fn recommended_after_pad(
    first_video_secs: f64,
    second_video_secs: f64,
    after_secs: f64,
) -> f64 {
    (second_video_secs - first_video_secs) + after_secs
}

fn validate(segments: &[SegmentChapters], padding: ClipPadding) -> GroupingResult<()> {
    if padding.before_secs < 0.0 {
        return Err(GroupingError::NegativePadding {
            name: "before",
            value: padding.before_secs,
        });
    }
    if padding.after_secs < 0.0 {
        return Err(GroupingError::NegativePadding {
            name: "after",
            value: padding.after_secs,
        });
    }
    for seg in segments {
        if let Some(chapter) = seg.chapters.iter().find(|c| c.segment_name.is_empty()) {
            return Err(GroupingError::EmptySegmentName {
                chapter_number: chapter.number,
            });
        }
    }
    Ok(())
}

/// In-progress group state threaded through the fold.
struct GroupAccum {
    chapters: Vec<Chapter>,
    start_secs: f64,
    end_secs: f64,
}

impl GroupAccum {
    /// Open a window around its first chapter.
    fn seed(chapter: Chapter, padding: ClipPadding) -> Self {
        let video = chapter.video_time_secs();
        Self {
            start_secs: (video - padding.before_secs).max(0.0),
            end_secs: video + padding.after_secs,
            chapters: vec![chapter],
        }
    }

    /// Extend the window to cover another chapter. The start never moves
    /// after seeding; only the end advances.
    fn absorb(mut self, chapter: Chapter, padding: ClipPadding) -> Self {
        self.end_secs = chapter.video_time_secs() + padding.after_secs;
        self.chapters.push(chapter);
        self
    }

    /// Close the window into a finished group.
    fn finish(self) -> ClipGroup {
        let duration_secs = self.end_secs - self.start_secs;
        let is_merged = self.chapters.len() > 1;
        let summary = is_merged.then(|| {
            let gap = self.chapters[self.chapters.len() - 1].video_time_secs()
                - self.chapters[0].video_time_secs();
            format!(
                "Merged {} highlights ({:.1}s apart) into {:.1}s clip",
                self.chapters.len(),
                gap,
                duration_secs
            )
        });
        ClipGroup {
            segment_name: self.chapters[0].segment_name.clone(),
            chapters: self.chapters,
            start_secs: self.start_secs,
            end_secs: self.end_secs,
            duration_secs,
            is_merged,
            summary,
        }
    }
}

/// Sweep one segment's video-sorted chapters into finished groups.
fn sweep(chapters: Vec<Chapter>, padding: ClipPadding) -> Vec<ClipGroup> {
    let mut iter = chapters.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let (mut groups, trailing) = iter.fold(
        (Vec::new(), GroupAccum::seed(first, padding)),
        |(mut done, accum), chapter| {
            let padded_start = (chapter.video_time_secs() - padding.before_secs).max(0.0);
            if padded_start < accum.end_secs {
                (done, accum.absorb(chapter, padding))
            } else {
                done.push(accum.finish());
                (done, GroupAccum::seed(chapter, padding))
            }
        },
    );
    groups.push(trailing.finish());
    groups
}
