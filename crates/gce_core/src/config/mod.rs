//! Configuration management for GoPro Clip Extractor.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use gce_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/config.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Lead-in: {}s", config.settings().extraction.seconds_before);
//!
//! // Modify a setting
//! config.settings_mut().extraction.stream_copy = true;
//!
//! // Save just the extraction section atomically
//! config.update_section(ConfigSection::Extraction).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    AnalysisSettings, ConfigSection, ExtractionSettings, LoggingSettings, PathSettings, Settings,
};
