//! Combine step - concatenates extracted clips into one reel.
//!
//! Optional: runs only when combined output is enabled in settings.
//! Clip chapters carry over into the reel, shifted to their position
//! in the concatenation.

use std::path::{Path, PathBuf};

use crate::extraction;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{CombineOutput, Context, JobState, StepOutcome};

/// Combine step for producing one reel out of all extracted clips.
pub struct CombineStep;

impl CombineStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CombineStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for CombineStep {
    fn name(&self) -> &str {
        "Combine"
    }

    fn description(&self) -> &str {
        "Concatenate clips into a combined reel"
    }

    fn is_optional(&self) -> bool {
        true
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        if !ctx.settings.extraction.combined_output {
            return Ok(StepOutcome::Skipped(
                "combined output disabled".to_string(),
            ));
        }

        let mut inputs = state
            .extract
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("Extract must run before Combine"))?
            .clips
            .clone();
        if inputs.is_empty() {
            return Ok(StepOutcome::Skipped("no clips to combine".to_string()));
        }

        // Clip filenames sort chronologically
        inputs.sort();

        let title = ctx
            .job_spec
            .combined_title
            .clone()
            .unwrap_or_else(|| ctx.job_name.clone());
        let output = reel_output_path(&ctx.output_dir);

        ctx.logger.info(&format!(
            "Combining {} clips into {}",
            inputs.len(),
            output.display()
        ));

        let final_path =
            extraction::combine_clips(&ctx.tools, &inputs, &output, &title, &ctx.work_dir)?;
        ctx.logger
            .info(&format!("Combined reel written to {}", final_path.display()));

        state.combine = Some(CombineOutput {
            output_path: final_path,
        });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.combine {
            Some(_) => Ok(()),
            None => Err(StepError::invalid_output("Combined reel not recorded")),
        }
    }
}

/// Default reel path: `combined_{YYYY-MM-DD_HH-MM}.mp4` in the output
/// directory.
fn reel_output_path(output_dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M");
    output_dir.join(format!("combined_{}.mp4", timestamp))
}
