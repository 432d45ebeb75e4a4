//! Cross-segment chronological merge.

use chrono::NaiveTime;

use crate::models::{Chapter, SegmentChapters};

/// Assign the global order across all segments.
///
/// Collects every chapter, stable-sorts by clock time, and writes the
/// 1-based rank back into the owning segments, leaving each segment's
/// own `number` untouched. Ties keep encounter order (segment insertion
/// order, then within-segment chapter order). Unanchored chapters sort
/// before anchored ones and among themselves by encounter order; the
/// analysis flow always anchors first, so that only arises in hand-built
/// inputs. Returns the total number of chapters ranked.
///
/// This is pure aggregation and ordering — extraction windows are never
/// merged here. Window overlap is a per-segment video-time property and
/// belongs to the grouping pass.
pub fn assign_global_order(segments: &mut [SegmentChapters]) -> usize {
    let mut index: Vec<(usize, usize, Option<NaiveTime>)> = Vec::new();
    for (si, seg) in segments.iter().enumerate() {
        for (ci, chapter) in seg.chapters.iter().enumerate() {
            index.push((si, ci, chapter.clock_time));
        }
    }

    // Stable sort: equal clock times keep their (si, ci) encounter order.
    index.sort_by_key(|&(_, _, clock_time)| clock_time);

    for (rank, &(si, ci, _)) in index.iter().enumerate() {
        segments[si].chapters[ci].global_order = rank as u32 + 1;
    }

    tracing::debug!(
        "merged {} chapters across {} segments",
        index.len(),
        segments.len()
    );
    index.len()
}

/// Flat snapshot of all chapters in global order.
///
/// Intended for display and persistence after [`assign_global_order`]
/// has run; before that, all ranks are zero and input order is kept.
pub fn merged_chapters(segments: &[SegmentChapters]) -> Vec<Chapter> {
    let mut all: Vec<Chapter> = segments
        .iter()
        .flat_map(|s| s.chapters.iter().cloned())
        .collect();
    all.sort_by_key(|c| c.global_order);
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    fn segment(name: &str, entries: &[(u32, u64, (u32, u32, u32))]) -> SegmentChapters {
        let chapters = entries
            .iter()
            .map(|&(number, offset_ms, (h, m, s))| {
                Chapter::new(number, offset_ms, name)
                    .with_clock_time(NaiveTime::from_hms_opt(h, m, s).unwrap())
            })
            .collect();
        SegmentChapters::with_chapters(Segment::new(name, format!("/f/{name}.mov")), chapters)
    }

    #[test]
    fn global_order_follows_clock_time_across_segments() {
        // Second period starts later in clock time but is listed first.
        let mut segments = vec![
            segment(
                "2nd Period",
                &[(1, 0, (13, 0, 0)), (2, 60_000, (13, 1, 0))],
            ),
            segment(
                "1st Period",
                &[(1, 0, (12, 0, 0)), (2, 30_000, (12, 0, 30))],
            ),
        ];

        let total = assign_global_order(&mut segments);
        assert_eq!(total, 4);

        let flat = merged_chapters(&segments);
        let orders: Vec<u32> = flat.iter().map(|c| c.global_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);

        // Ascending global order tracks ascending clock time.
        for pair in flat.windows(2) {
            assert!(pair[0].clock_time <= pair[1].clock_time);
        }
        assert_eq!(flat[0].segment_name, "1st Period");
        assert_eq!(flat[3].segment_name, "2nd Period");
    }

    #[test]
    fn segment_local_numbers_survive_the_merge() {
        let mut segments = vec![
            segment("1st Period", &[(1, 0, (12, 0, 0))]),
            segment("2nd Period", &[(1, 0, (11, 0, 0))]),
        ];
        assign_global_order(&mut segments);

        // The 2nd Period chapter ranks first globally but keeps number 1.
        assert_eq!(segments[1].chapters[0].global_order, 1);
        assert_eq!(segments[1].chapters[0].number, 1);
        assert_eq!(segments[0].chapters[0].global_order, 2);
        assert_eq!(segments[0].chapters[0].number, 1);
    }

    #[test]
    fn clock_time_ties_keep_encounter_order() {
        let mut segments = vec![
            segment("A", &[(1, 0, (12, 0, 0))]),
            segment("B", &[(1, 0, (12, 0, 0))]),
        ];
        assign_global_order(&mut segments);
        assert_eq!(segments[0].chapters[0].global_order, 1);
        assert_eq!(segments[1].chapters[0].global_order, 2);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        let mut segments: Vec<SegmentChapters> = Vec::new();
        assert_eq!(assign_global_order(&mut segments), 0);
        assert!(merged_chapters(&segments).is_empty());
    }
}
