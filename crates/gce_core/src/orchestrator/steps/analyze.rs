//! Analyze step - reads highlight markers and anchors them to clock time.
//!
//! Runs the analysis pass over the prepared segments: marker text is
//! read (sidecar file or embedded chapter export), the device timecode
//! anchors each segment to the wall clock, and chapters get their
//! global presentation order across segments.

use crate::analysis::{analyze_segments, FfmpegProber};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{AnalysisOutput, Context, JobState, StepOutcome};

/// Analyze step for building the globally-ordered chapter list.
pub struct AnalyzeStep;

impl AnalyzeStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnalyzeStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for AnalyzeStep {
    fn name(&self) -> &str {
        "Analyze"
    }

    fn description(&self) -> &str {
        "Read highlight markers and anchor them to clock time"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.segments().is_empty() {
            return Err(StepError::invalid_input("No segments configured"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let segments = state.effective_segments(&ctx.job_spec).to_vec();
        ctx.logger
            .info(&format!("Analyzing {} segments", segments.len()));

        let prober = FfmpegProber::new(ctx.tools.clone(), ctx.work_dir.clone());
        let result = analyze_segments(&segments, &prober)?;

        for seg in &result.segments {
            ctx.logger
                .info(&format!("{}: {} highlight markers", seg.name(), seg.len()));
        }
        ctx.logger.info(&format!(
            "{} highlight markers across {} segments",
            result.total_chapters(),
            result.segments.len()
        ));

        let mut saved_to = None;
        if ctx.settings.analysis.save_results {
            let path = ctx
                .output_dir
                .join(&ctx.settings.analysis.results_filename);
            match result.save_json(&path) {
                Ok(()) => {
                    ctx.logger
                        .info(&format!("Saved analysis results to {}", path.display()));
                    saved_to = Some(path);
                }
                Err(e) => {
                    // Saving is a convenience; the job carries on without it
                    ctx.logger
                        .warn(&format!("Could not save analysis results: {}", e));
                }
            }
        }

        state.analysis = Some(AnalysisOutput { result, saved_to });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.analysis {
            Some(output) if !output.result.is_empty() => Ok(()),
            Some(_) => Err(StepError::invalid_output(
                "No highlight markers found in any segment",
            )),
            None => Err(StepError::invalid_output("Analysis not recorded")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;
    use crate::models::{Chapter, JobSpec, Segment, SegmentChapters};
    use crate::orchestrator::testutil::context_for;
    use tempfile::tempdir;

    #[test]
    fn analyze_step_has_correct_name() {
        let step = AnalyzeStep::new();
        assert_eq!(step.name(), "Analyze");
    }

    #[test]
    fn empty_spec_fails_validation() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()));

        let err = AnalyzeStep::new().validate_input(&ctx).unwrap_err();
        assert!(matches!(err, StepError::InvalidInput(_)));
    }

    #[test]
    fn markerless_analysis_fails_output_validation() {
        let dir = tempdir().unwrap();
        let spec = JobSpec::new(vec![Segment::new("1st Period", "/f/p1.mov")]);
        let ctx = context_for(dir.path(), spec);

        let mut state = JobState::new("test");
        state.analysis = Some(AnalysisOutput {
            result: AnalysisResult::default(),
            saved_to: None,
        });

        let err = AnalyzeStep::new().validate_output(&ctx, &state).unwrap_err();
        assert!(err.to_string().contains("No highlight markers"));
    }

    #[test]
    fn anchored_analysis_passes_output_validation() {
        let dir = tempdir().unwrap();
        let spec = JobSpec::new(vec![Segment::new("1st Period", "/f/p1.mov")]);
        let ctx = context_for(dir.path(), spec);

        let segment = SegmentChapters::with_chapters(
            Segment::new("1st Period", "/f/p1.mov"),
            vec![Chapter::new(1, 10_000, "1st Period").with_global_order(1)],
        );
        let mut state = JobState::new("test");
        state.analysis = Some(AnalysisOutput {
            result: AnalysisResult::new(vec![segment]),
            saved_to: None,
        });

        AnalyzeStep::new().validate_output(&ctx, &state).unwrap();
    }
}
