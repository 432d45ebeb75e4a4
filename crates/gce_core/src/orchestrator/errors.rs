//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Job → Step → Operation → Detail

use std::io;

use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::extraction::ExtractionError;
use crate::grouping::GroupingError;

/// Top-level pipeline error with job context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Job '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Pipeline was cancelled.
    #[error("Job '{job_name}' was cancelled")]
    Cancelled { job_name: String },

    /// Failed to set up job (create directories, etc.).
    #[error("Job '{job_name}' setup failed: {message}")]
    SetupFailed { job_name: String, message: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Create a cancelled error.
    pub fn cancelled(job_name: impl Into<String>) -> Self {
        Self::Cancelled {
            job_name: job_name.into(),
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// A required earlier step has not recorded its output.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),

    /// The step was interrupted by a cancellation request.
    #[error("Operation was cancelled")]
    Cancelled,

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// An ffmpeg/ffprobe operation failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Chapter analysis failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Clip grouping failed.
    #[error(transparent)]
    Grouping(#[from] GroupingError),
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_displays_tool_context() {
        let err: StepError = ExtractionError::command_failed("ffmpeg", 1, "unknown encoder").into();
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("unknown encoder"));
    }

    #[test]
    fn pipeline_error_chains_context() {
        let step_err = StepError::invalid_input("no segments configured");
        let pipeline_err = PipelineError::step_failed("game_vs_rivals", "Prepare", step_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("game_vs_rivals"));
        assert!(msg.contains("Prepare"));
        assert!(msg.contains("no segments"));
    }
}
