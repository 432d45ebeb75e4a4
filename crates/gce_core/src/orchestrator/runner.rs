//! Job runner that takes a job spec through the standard pipeline.
//!
//! This module provides the `JobRunner` which wires up the per-job
//! resources (work directory, logger, toolchain) and runs the standard
//! pipeline, collecting the outcome into a `JobResult`.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::extraction::{sanitize_filename, Toolchain};
use crate::logging::{JobLoggerBuilder, UiLogCallback};
use crate::models::JobSpec;

use super::pipeline::CancelHandle;
use super::types::{Context, JobState, ProgressCallback};
use super::{create_standard_pipeline, PipelineRunResult};

/// Result of running a single job.
#[derive(Debug, Clone)]
pub struct JobResult {
    /// Name of the job that ran.
    pub job_name: String,
    /// Whether the job completed successfully.
    pub success: bool,
    /// Files the job produced: clips first, combined reel last.
    pub output_paths: Vec<PathBuf>,
    /// Error message (if failed).
    pub error: Option<String>,
    /// Steps that completed.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}

impl JobResult {
    /// Create a successful result.
    pub fn success(
        job_name: impl Into<String>,
        output_paths: Vec<PathBuf>,
        run_result: PipelineRunResult,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            success: true,
            output_paths,
            error: None,
            steps_completed: run_result.steps_completed,
            steps_skipped: run_result.steps_skipped,
        }
    }

    /// Create a failed result.
    pub fn failure(job_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            success: false,
            output_paths: Vec::new(),
            error: Some(error.into()),
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        }
    }
}

/// Runner for taking one job through the standard pipeline.
///
/// The JobRunner is responsible for:
/// - Locating the ffmpeg/ffprobe toolchain
/// - Creating the per-job work directory and `JobLogger`
/// - Running the pipeline and collecting results
///
/// # Example
///
/// ```ignore
/// let runner = JobRunner::new(settings, log_dir, work_root, output_dir);
/// let result = runner.run_job(spec, "game_vs_rivals", None, None, None);
/// ```
pub struct JobRunner {
    /// Application settings.
    settings: Settings,
    /// Directory for log files.
    log_dir: PathBuf,
    /// Root directory for per-job scratch files.
    work_root: PathBuf,
    /// Output directory for clips and reels.
    output_dir: PathBuf,
}

impl JobRunner {
    /// Create a new job runner.
    pub fn new(
        settings: Settings,
        log_dir: PathBuf,
        work_root: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            settings,
            log_dir,
            work_root,
            output_dir,
        }
    }

    /// Run a job with an auto-located toolchain.
    ///
    /// # Arguments
    /// * `spec` - The job to run
    /// * `job_name` - Name used for the work directory and log file
    /// * `ui_callback` - Optional callback for UI log output
    /// * `progress_callback` - Optional callback for progress updates
    /// * `cancel` - Optional handle to cancel the running job
    pub fn run_job(
        &self,
        spec: JobSpec,
        job_name: &str,
        ui_callback: Option<UiLogCallback>,
        progress_callback: Option<ProgressCallback>,
        cancel: Option<CancelHandle>,
    ) -> JobResult {
        let tools = match Toolchain::locate() {
            Ok(t) => t,
            Err(e) => return JobResult::failure(job_name, e.to_string()),
        };
        self.run_job_with_tools(spec, job_name, tools, ui_callback, progress_callback, cancel)
    }

    /// Run a job with an explicit toolchain.
    pub fn run_job_with_tools(
        &self,
        spec: JobSpec,
        job_name: &str,
        tools: Toolchain,
        ui_callback: Option<UiLogCallback>,
        progress_callback: Option<ProgressCallback>,
        cancel: Option<CancelHandle>,
    ) -> JobResult {
        // Create job-specific work directory
        let job_work_dir = self.work_root.join(sanitize_filename(job_name));
        if let Err(e) = std::fs::create_dir_all(&job_work_dir) {
            return JobResult::failure(
                job_name,
                format!("Failed to create work directory: {}", e),
            );
        }

        // Create logger
        let mut builder = JobLoggerBuilder::new(job_name, &self.log_dir)
            .config(self.settings.logging.log_config());
        if let Some(callback) = ui_callback {
            builder = builder.ui_callback(callback);
        }
        let logger = match builder.build() {
            Ok(l) => Arc::new(l),
            Err(e) => {
                return JobResult::failure(job_name, format!("Failed to create logger: {}", e));
            }
        };

        // Create context
        let mut ctx = Context::new(
            spec,
            self.settings.clone(),
            job_name,
            job_work_dir,
            self.output_dir.clone(),
            tools,
            logger,
        );
        if let Some(callback) = progress_callback {
            ctx = ctx.with_progress_callback(callback);
        }
        if let Some(handle) = cancel {
            ctx = ctx.with_cancel_handle(handle);
        }

        // Create job state
        let mut state = JobState::new(job_name);

        // Create and run pipeline
        let pipeline = create_standard_pipeline();

        ctx.logger.info(&format!("Starting job: {}", job_name));
        ctx.logger
            .info(&format!("Segments: {} configured", ctx.segments().len()));

        match pipeline.run(&ctx, &mut state) {
            Ok(run_result) => {
                let output_paths = state.output_paths();
                ctx.logger.info(&format!(
                    "Job completed: {} files produced",
                    output_paths.len()
                ));
                JobResult::success(job_name, output_paths, run_result)
            }
            Err(e) => {
                let error_msg = e.to_string();
                ctx.logger.error(&error_msg);
                JobResult::failure(job_name, error_msg)
            }
        }
    }
}
