//! Working-folder discovery.
//!
//! Given a folder of camera exports, this module figures out what can
//! be analysed and what needs preparing first:
//!
//! - **Classification**: converted videos (`.mov`), unconverted
//!   originals (`.mp4`) and `_metadata.txt` sidecars, paired by base
//!   name into one [`SegmentCandidate`] per converted video
//! - **Readiness**: each candidate gets a [`MetadataPlan`] saying where
//!   its markers will come from, or what is missing
//! - **Split recordings**: `GX######`/`GH######` part chains that should
//!   be combined into one file before analysis
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//!
//! use gce_core::discovery::{scan_folder, FfprobeInspector};
//! use gce_core::extraction::Toolchain;
//!
//! let inspector = FfprobeInspector::new(Toolchain::locate()?);
//! let scan = scan_folder(Path::new("/footage/game1"), &inspector)?;
//! if scan.is_ready() {
//!     let segments = scan.ready_segments();
//!     // hand off to analysis
//! }
//! ```

mod scan;
mod types;

// Re-export public types
pub use scan::{FfprobeInspector, MediaInspector};
pub use types::{
    DiscoveryError, DiscoveryResult, FolderScan, MediaFile, MetadataPlan, SegmentCandidate,
    SplitChain,
};

// Re-export public functions
pub use scan::{detect_split_chains, period_name, scan_folder, sidecar_path};
