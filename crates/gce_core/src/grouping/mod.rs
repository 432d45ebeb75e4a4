//! Clip grouping - turning ordered chapters into extraction windows.
//!
//! Each chapter gets a padded window around its video position; windows
//! that run into each other within a segment collapse into one merged
//! group so the encoder cuts a single clip covering all of them.

mod builder;
mod types;

pub use builder::{build_clip_groups, overlap_summary, recommended_after_pad};
pub use types::{ClipGroup, ClipMarker, ClipPadding, GroupingError, GroupingResult};
