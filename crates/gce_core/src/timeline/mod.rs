//! Chapter timeline construction.
//!
//! Two passes turn per-segment marker offsets into one global timeline:
//!
//! 1. **Anchoring**: each segment's chapters get an absolute clock time,
//!    `anchor + offset`, where the anchor comes from the segment's device
//!    timecode.
//! 2. **Merging**: chapters from all segments are ranked 1..N by clock
//!    time, writing `global_order` back into the segment-owned lists.
//!
//! Both passes are pure; neither touches extraction windows. Overlap
//! handling lives in the `grouping` module and works on video time.

mod anchor;
mod merge;

pub use anchor::{anchor_chapters, anchor_chapters_to_timecode};
pub use merge::{assign_global_order, merged_chapters};
