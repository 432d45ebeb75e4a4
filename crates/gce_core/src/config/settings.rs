//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML
//! tables. Each section can be updated independently for atomic
//! section-level updates.

use serde::{Deserialize, Serialize};

use crate::grouping::ClipPadding;
use crate::logging::{LogConfig, LogLevel};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Remembered directories.
    #[serde(default)]
    pub paths: PathSettings,

    /// Clip extraction windows and encoder choices.
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Analysis result persistence.
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Job logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Directories remembered between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Last folder scanned for footage.
    #[serde(default)]
    pub last_working_dir: String,

    /// Last folder clips were written to.
    #[serde(default)]
    pub last_output_dir: String,
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Seconds of lead-in before each highlight marker.
    #[serde(default = "default_seconds_before")]
    pub seconds_before: f64,

    /// Seconds of follow-through after each highlight marker.
    #[serde(default = "default_seconds_after")]
    pub seconds_after: f64,

    /// Try the hardware encoder first, falling back to software.
    #[serde(default = "default_true")]
    pub use_hardware_encoder: bool,

    /// Stream-copy clips instead of re-encoding (fast, less precise
    /// cut points).
    #[serde(default)]
    pub stream_copy: bool,

    /// Also produce one combined reel of all clips.
    #[serde(default)]
    pub combined_output: bool,
}

fn default_seconds_before() -> f64 {
    8.0
}

fn default_seconds_after() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            seconds_before: default_seconds_before(),
            seconds_after: default_seconds_after(),
            use_hardware_encoder: true,
            stream_copy: false,
            combined_output: false,
        }
    }
}

impl ExtractionSettings {
    /// The configured window padding for grouping and extraction.
    pub fn padding(&self) -> ClipPadding {
        ClipPadding::new(self.seconds_before, self.seconds_after)
    }
}

/// Analysis result persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Save analysis results as JSON next to the footage.
    #[serde(default = "default_true")]
    pub save_results: bool,

    /// File name for saved analysis results.
    #[serde(default = "default_results_filename")]
    pub results_filename: String,
}

fn default_results_filename() -> String {
    "analysis_results.json".to_string()
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            save_results: true,
            results_filename: default_results_filename(),
        }
    }
}

/// Job logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for job log output.
    #[serde(default)]
    pub level: LogLevel,

    /// Compact mode (filter progress lines, tail-buffer tool output).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Progress update step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,

    /// Number of tool output lines replayed after an error.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Show timestamps in job logs.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_progress_step() -> u32 {
    20
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            progress_step: default_progress_step(),
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

impl LoggingSettings {
    /// Build the per-job [`LogConfig`] these settings describe.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            compact: self.compact,
            progress_step: self.progress_step,
            error_tail: self.error_tail as usize,
            show_timestamps: self.show_timestamps,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Extraction,
    Analysis,
    Logging,
}

impl ConfigSection {
    /// The TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Extraction => "extraction",
            ConfigSection::Analysis => "analysis",
            ConfigSection::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[extraction]"));
        assert!(toml.contains("seconds_before"));
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.extraction.seconds_before, 8.0);
        assert_eq!(parsed.extraction.seconds_after, 2.0);
        assert_eq!(parsed.logging.compact, settings.logging.compact);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[extraction]\nseconds_before = 5.0";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        // Custom value preserved
        assert_eq!(parsed.extraction.seconds_before, 5.0);
        // Defaults applied for missing
        assert_eq!(parsed.extraction.seconds_after, 2.0);
        assert!(parsed.extraction.use_hardware_encoder);
        assert!(parsed.analysis.save_results);
        assert_eq!(parsed.logging.progress_step, 20);
    }

    #[test]
    fn padding_mirrors_window_settings() {
        let extraction = ExtractionSettings {
            seconds_before: 6.0,
            seconds_after: 3.0,
            ..ExtractionSettings::default()
        };
        let padding = extraction.padding();
        assert_eq!(padding.before_secs, 6.0);
        assert_eq!(padding.after_secs, 3.0);
    }

    #[test]
    fn log_config_mirrors_logging_settings() {
        let logging = LoggingSettings {
            level: LogLevel::Debug,
            error_tail: 50,
            ..LoggingSettings::default()
        };
        let config = logging.log_config();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.error_tail, 50);
    }
}
