//! Core types for the orchestrator pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::AnalysisResult;
use crate::config::Settings;
use crate::extraction::Toolchain;
use crate::grouping::ClipGroup;
use crate::logging::JobLogger;
use crate::models::{JobSpec, Segment};

use super::pipeline::CancelHandle;

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Contains job configuration and shared resources that steps can read
/// but not modify. Mutable state goes in `JobState`.
pub struct Context {
    /// Job specification (segments, combined title).
    pub job_spec: JobSpec,
    /// Application settings.
    pub settings: Settings,
    /// Job name/identifier.
    pub job_name: String,
    /// Job-specific working directory for scratch files.
    pub work_dir: PathBuf,
    /// Output directory for extracted clips.
    pub output_dir: PathBuf,
    /// Located ffmpeg/ffprobe binaries.
    pub tools: Toolchain,
    /// Per-job logger.
    pub logger: Arc<JobLogger>,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
    /// Cancellation flag, checked between steps and between clips.
    cancel: CancelHandle,
}

impl Context {
    /// Create a new context for a job.
    pub fn new(
        job_spec: JobSpec,
        settings: Settings,
        job_name: impl Into<String>,
        work_dir: PathBuf,
        output_dir: PathBuf,
        tools: Toolchain,
        logger: Arc<JobLogger>,
    ) -> Self {
        Self {
            job_spec,
            settings,
            job_name: job_name.into(),
            work_dir,
            output_dir,
            tools,
            logger,
            progress_callback: None,
            cancel: CancelHandle::new(),
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Share a cancellation handle with this context.
    pub fn with_cancel_handle(mut self, handle: CancelHandle) -> Self {
        self.cancel = handle;
        self
    }

    /// Report progress to callback (if set).
    pub fn report_progress(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, percent, message);
        }
    }

    /// Get a clone of the cancellation handle.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Check if cancellation has been requested.
    pub fn cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Segments configured for this job.
    pub fn segments(&self) -> &[Segment] {
        &self.job_spec.segments
    }
}

/// Mutable job state that accumulates results from pipeline steps.
///
/// This is the "write-once manifest" - steps can add new data but
/// should not overwrite existing values. Each step's output is stored
/// in its own section.
#[derive(Debug, Clone, Default)]
pub struct JobState {
    /// Unique job identifier.
    pub job_id: String,
    /// When the job started.
    pub started_at: Option<String>,
    /// Prepared segment list (from Prepare step).
    pub prepare: Option<PrepareOutput>,
    /// Analysis results (from Analyze step).
    pub analysis: Option<AnalysisOutput>,
    /// Clip groups (from Group step).
    pub groups: Option<GroupOutput>,
    /// Extraction results (from Extract step).
    pub extract: Option<ExtractOutput>,
    /// Combined reel (from Combine step).
    pub combine: Option<CombineOutput>,
}

impl JobState {
    /// Create a new job state with the given ID.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if analysis has been completed.
    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }

    /// Check if clip groups have been built.
    pub fn has_groups(&self) -> bool {
        self.groups.is_some()
    }

    /// The segments the pipeline should operate on.
    ///
    /// The Prepare step may rewrite the configured segments (split
    /// chains get combined into single files); later steps read the
    /// prepared list when present.
    pub fn effective_segments<'a>(&'a self, spec: &'a JobSpec) -> &'a [Segment] {
        match &self.prepare {
            Some(p) => &p.segments,
            None => &spec.segments,
        }
    }

    /// All files the job produced, clips first, combined reel last.
    pub fn output_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .extract
            .as_ref()
            .map(|e| e.clips.clone())
            .unwrap_or_default();
        if let Some(combine) = &self.combine {
            paths.push(combine.output_path.clone());
        }
        paths
    }
}

/// Output from the Prepare step.
#[derive(Debug, Clone)]
pub struct PrepareOutput {
    /// Segments after split-chain combining, in presentation order.
    pub segments: Vec<Segment>,
    /// Combined files produced from split recording chains.
    pub combined_chains: Vec<PathBuf>,
}

/// Output from the Analyze step.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// Anchored, globally-ordered chapters per segment.
    pub result: AnalysisResult,
    /// Where the results JSON was written, when saving is enabled.
    pub saved_to: Option<PathBuf>,
}

/// Output from the Group step.
#[derive(Debug, Clone)]
pub struct GroupOutput {
    /// Extraction windows in global presentation order.
    pub groups: Vec<ClipGroup>,
    /// One-line overlap report, if any windows merged.
    pub summary: Option<String>,
}

/// Output from the Extract step.
#[derive(Debug, Clone, Default)]
pub struct ExtractOutput {
    /// Successfully extracted clip files, in presentation order.
    pub clips: Vec<PathBuf>,
    /// Per-clip failure descriptions for clips that could not be cut.
    pub failures: Vec<String>,
}

/// Output from the Combine step.
#[derive(Debug, Clone)]
pub struct CombineOutput {
    /// Path to the combined reel.
    pub output_path: PathBuf,
}

/// Result of executing a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed successfully.
    Success,
    /// Step was skipped (preconditions not met, but not an error).
    Skipped(String),
}
