//! Chapter marker parsing.
//!
//! Highlight markers arrive as FFMETADATA-style text: one `START=<ms>`
//! line per marker, offsets relative to the segment start. The text comes
//! either from a sidecar `_metadata.txt` file or from an ffmetadata
//! export of the media itself (see the `extraction` module).
//!
//! Parsing is purely textual: markers keep file order and 1-based
//! encounter numbering. Anchoring to clock time and chronological
//! ordering are separate passes in the `timeline` module.

mod parser;
mod types;

pub use parser::{parse_marker_file, parse_marker_text};
pub use types::{MarkerError, MarkerResult};
