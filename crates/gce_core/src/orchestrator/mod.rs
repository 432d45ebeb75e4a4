//! Pipeline orchestrator for coordinating job execution.
//!
//! This module provides the infrastructure for running multi-step
//! processing pipelines. Each job consists of a sequence of steps
//! that validate, execute, and record their results.
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Prepare
//!     ├── Step: Analyze
//!     ├── Step: Group
//!     ├── Step: Extract
//!     └── Step: Combine
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gce_core::orchestrator::{create_standard_pipeline, Context, JobState};
//!
//! // Create context and state
//! let ctx = Context::new(spec, settings, "game_vs_rivals", work_dir, output_dir, tools, logger);
//! let mut state = JobState::new("game-2026-03-01");
//!
//! // Run the standard pipeline
//! let pipeline = create_standard_pipeline();
//! let result = pipeline.run(&ctx, &mut state)?;
//! println!("Completed: {:?}", result.steps_completed);
//! ```

mod errors;
mod pipeline;
mod runner;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{CancelHandle, Pipeline, PipelineRunResult};
pub use runner::{JobResult, JobRunner};
pub use step::PipelineStep;
pub use steps::{AnalyzeStep, CombineStep, ExtractStep, GroupStep, PrepareStep};
pub use types::{
    AnalysisOutput, CombineOutput, Context, ExtractOutput, GroupOutput, JobState, PrepareOutput,
    ProgressCallback, StepOutcome,
};

/// Create a standard pipeline with all steps in the correct order.
///
/// The standard pipeline executes these steps:
/// 1. Prepare - validate inputs and join split recording chains
/// 2. Analyze - read markers and anchor chapters to clock time
/// 3. Group - collapse overlapping padded windows into clip groups
/// 4. Extract - cut one clip per group with embedded markers
/// 5. Combine - optionally concatenate clips into one reel
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(PrepareStep::new())
        .with_step(AnalyzeStep::new())
        .with_step(GroupStep::new())
        .with_step(ExtractStep::new())
        .with_step(CombineStep::new())
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared context builders for step tests.

    use std::path::Path;
    use std::sync::Arc;

    use crate::config::Settings;
    use crate::extraction::Toolchain;
    use crate::logging::{JobLogger, LogConfig};
    use crate::models::JobSpec;

    use super::types::Context;

    /// Context with default settings rooted in a scratch directory.
    pub(crate) fn context_for(dir: &Path, spec: JobSpec) -> Context {
        context_with_settings(dir, spec, Settings::default())
    }

    /// Context with explicit settings. The toolchain points at paths
    /// that do not exist, so any attempt to shell out fails fast.
    pub(crate) fn context_with_settings(dir: &Path, spec: JobSpec, settings: Settings) -> Context {
        let logger =
            JobLogger::new("step-test", dir.join("logs"), LogConfig::default(), None).unwrap();
        Context::new(
            spec,
            settings,
            "step-test",
            dir.join("work"),
            dir.join("out"),
            Toolchain::with_paths("/nonexistent/ffmpeg", "/nonexistent/ffprobe"),
            Arc::new(logger),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_has_five_steps_in_order() {
        let pipeline = create_standard_pipeline();
        assert_eq!(
            pipeline.step_names(),
            vec!["Prepare", "Analyze", "Group", "Extract", "Combine"]
        );
    }
}
