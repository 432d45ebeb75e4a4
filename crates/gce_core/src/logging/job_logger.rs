//! Per-job logger with file and callback output.
//!
//! Each extraction job gets its own logger that:
//! - Writes to a dedicated log file in the job's work directory
//! - Sends messages to a UI callback (if provided)
//! - Supports compact mode with progress filtering
//! - Maintains a tail buffer of tool output for error diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, MessagePrefix, UiLogCallback};

/// Per-job logger with dual output (file + UI callback).
pub struct JobLogger {
    /// Job name for identification.
    job_name: String,
    /// Path to the log file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Arc<Mutex<Option<BufWriter<File>>>>,
    /// UI callback for live display.
    ui_callback: Arc<Mutex<Option<UiLogCallback>>>,
    /// Logging configuration.
    config: LogConfig,
    /// Tail buffer of recent tool output lines.
    tail_buffer: Arc<Mutex<VecDeque<String>>>,
    /// Last progress value logged (for compact mode filtering).
    last_progress: Arc<Mutex<u32>>,
}

impl JobLogger {
    /// Create a new job logger writing to `<log_dir>/<job_name>.log`.
    pub fn new(
        job_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        ui_callback: Option<UiLogCallback>,
    ) -> std::io::Result<Self> {
        let job_name = job_name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;
        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&job_name)));
        let file_writer = BufWriter::new(File::create(&log_path)?);

        Ok(Self {
            job_name,
            log_path,
            file_writer: Arc::new(Mutex::new(Some(file_writer))),
            ui_callback: Arc::new(Mutex::new(ui_callback)),
            config,
            tail_buffer: Arc::new(Mutex::new(VecDeque::with_capacity(100))),
            last_progress: Arc::new(Mutex::new(0)),
        })
    }

    /// The job name.
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// The log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        let formatted = self.format_message(message);
        self.output(&formatted);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a debug message.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Log a warning message.
    pub fn warn(&self, message: &str) {
        let msg = MessagePrefix::Warning.format(message);
        self.log(LogLevel::Warn, &msg);
    }

    /// Log an error message.
    pub fn error(&self, message: &str) {
        let msg = MessagePrefix::Error.format(message);
        self.log(LogLevel::Error, &msg);
    }

    /// Log a command being executed.
    pub fn command(&self, command: &str) {
        let msg = MessagePrefix::Command.format(command);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a tool invocation from its argument vector.
    pub fn command_tokens(&self, tool: &str, args: &[String]) {
        self.command(&format!("{} {}", tool, args.join(" ")));
    }

    /// Log a pipeline phase marker.
    pub fn phase(&self, phase_name: &str) {
        let msg = MessagePrefix::Phase.format(phase_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a section marker within a phase.
    pub fn section(&self, section_name: &str) {
        let msg = MessagePrefix::Section.format(section_name);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a success message.
    pub fn success(&self, message: &str) {
        let msg = MessagePrefix::Success.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a validation message.
    pub fn validation(&self, message: &str) {
        let msg = MessagePrefix::Validation.format(message);
        self.log(LogLevel::Info, &msg);
    }

    /// Log a progress update (filtered in compact mode).
    ///
    /// Returns true if the progress was logged, false if filtered.
    pub fn progress(&self, percent: u32) -> bool {
        if self.config.compact {
            let mut last = self.last_progress.lock();
            let step = self.config.progress_step.max(1);

            // Only log at step intervals (0%, 20%, 40%, ...).
            let current_step = (percent / step) * step;
            let last_step = (*last / step) * step;

            if current_step <= last_step && percent < 100 {
                return false;
            }
            *last = percent;
        }

        let msg = format!("Progress: {}%", percent);
        self.log(LogLevel::Info, &msg);
        true
    }

    /// Record a line of tool output (ffmpeg stderr and the like).
    ///
    /// In compact mode the line only lands in the tail buffer; otherwise
    /// it is logged too.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        if self.config.compact {
            return;
        }

        let prefix = if is_stderr { "[stderr] " } else { "" };
        let msg = format!("{}{}", prefix, line);
        self.output(&self.format_message(&msg));
    }

    /// Replay the tail buffer, typically after a tool failure.
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in buffer.iter() {
            self.output(&self.format_message(line));
        }
    }

    /// Clear the tail buffer.
    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    /// Current tail buffer contents.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Flush the log file.
    pub fn flush(&self) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writer.flush();
        }
    }

    /// Close the logger and release the file handle.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    /// Format a message with a timestamp (if enabled).
    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    /// Output a formatted message to file and UI.
    fn output(&self, formatted: &str) {
        if let Some(ref mut writer) = *self.file_writer.lock() {
            let _ = writeln!(writer, "{}", formatted);
        }

        if let Some(ref callback) = *self.ui_callback.lock() {
            callback(formatted);
        }
    }
}

impl Drop for JobLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Sanitize a string to be safe for use as a log filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Builder for creating a [`JobLogger`] with a fluent API.
pub struct JobLoggerBuilder {
    job_name: String,
    log_dir: PathBuf,
    config: LogConfig,
    ui_callback: Option<UiLogCallback>,
}

impl JobLoggerBuilder {
    /// Create a new builder.
    pub fn new(job_name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_name: job_name.into(),
            log_dir: log_dir.into(),
            config: LogConfig::default(),
            ui_callback: None,
        }
    }

    /// Set the logging configuration.
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the log level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Enable or disable compact mode.
    pub fn compact(mut self, compact: bool) -> Self {
        self.config.compact = compact;
        self
    }

    /// Set the progress step percentage.
    pub fn progress_step(mut self, step: u32) -> Self {
        self.config.progress_step = step;
        self
    }

    /// Set the UI callback.
    pub fn ui_callback(mut self, callback: UiLogCallback) -> Self {
        self.ui_callback = Some(callback);
        self
    }

    /// Build the [`JobLogger`].
    pub fn build(self) -> std::io::Result<JobLogger> {
        JobLogger::new(self.job_name, self.log_dir, self.config, self.ui_callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[test]
    fn creates_log_file() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new("game1", dir.path(), LogConfig::default(), None).unwrap();

        assert!(logger.log_path().exists());
        assert!(logger.log_path().to_string_lossy().contains("game1.log"));
    }

    #[test]
    fn writes_to_file() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new("game1", dir.path(), LogConfig::default(), None).unwrap();

        logger.phase("Analyze");
        logger.info("Found 18 chapters");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("=== Analyze ==="));
        assert!(content.contains("Found 18 chapters"));
    }

    #[test]
    fn calls_ui_callback() {
        let dir = tempdir().unwrap();
        let call_count = Arc::new(AtomicUsize::new(0));
        let count_clone = call_count.clone();

        let callback: UiLogCallback = Box::new(move |_msg| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let logger =
            JobLogger::new("game1", dir.path(), LogConfig::default(), Some(callback)).unwrap();

        logger.info("Message 1");
        logger.info("Message 2");

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn level_filter_drops_quiet_messages() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new("game1", dir.path(), LogConfig::default(), None).unwrap();

        logger.debug("hidden");
        logger.info("visible");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(!content.contains("hidden"));
        assert!(content.contains("visible"));
    }

    #[test]
    fn compact_mode_filters_progress() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            compact: true,
            progress_step: 20,
            ..LogConfig::default()
        };
        let logger = JobLogger::new("game1", dir.path(), config, None).unwrap();

        assert!(!logger.progress(5));
        assert!(!logger.progress(10));
        assert!(!logger.progress(15));
        assert!(logger.progress(20));
        assert!(!logger.progress(25));
        assert!(logger.progress(40));
        assert!(logger.progress(100));
    }

    #[test]
    fn tail_buffer_maintains_limit() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            compact: true,
            error_tail: 5,
            ..LogConfig::default()
        };
        let logger = JobLogger::new("game1", dir.path(), config, None).unwrap();

        for i in 0..10 {
            logger.output_line(&format!("frame={}", i), true);
        }

        let tail = logger.get_tail();
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0], "frame=5");
        assert_eq!(tail[4], "frame=9");
    }

    #[test]
    fn show_tail_replays_buffered_output() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new("game1", dir.path(), LogConfig::default(), None).unwrap();

        logger.output_line("Invalid data found", true);
        logger.show_tail("ffmpeg");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("[ffmpeg/tail]"));
        assert!(content.contains("Invalid data found"));
    }

    #[test]
    fn command_tokens_join_arguments() {
        let dir = tempdir().unwrap();
        let config = LogConfig {
            show_timestamps: false,
            ..LogConfig::default()
        };
        let logger = JobLogger::new("game1", dir.path(), config, None).unwrap();

        logger.command_tokens("ffmpeg", &["-i".to_string(), "in.mov".to_string()]);
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("$ ffmpeg -i in.mov"));
    }

    #[test]
    fn builder_overrides_config() {
        let dir = tempdir().unwrap();
        let logger = JobLoggerBuilder::new("game1", dir.path())
            .level(LogLevel::Debug)
            .compact(false)
            .progress_step(10)
            .build()
            .unwrap();

        logger.debug("now visible");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("now visible"));
    }

    #[test]
    fn sanitizes_filename() {
        assert_eq!(sanitize_filename("game vs rivals"), "game vs rivals");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("has:colon"), "has_colon");
        assert_eq!(sanitize_filename("a<b>c"), "a_b_c");
    }
}
