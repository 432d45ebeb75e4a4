//! Group step - collapses overlapping padded windows into clip groups.

use crate::grouping::{build_clip_groups, overlap_summary};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, GroupOutput, JobState, StepOutcome};

/// Group step for turning analyzed chapters into extraction windows.
pub struct GroupStep;

impl GroupStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GroupStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for GroupStep {
    fn name(&self) -> &str {
        "Group"
    }

    fn description(&self) -> &str {
        "Group adjacent highlights into extraction windows"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        let padding = ctx.settings.extraction.padding();
        if padding.before_secs < 0.0 || padding.after_secs < 0.0 {
            return Err(StepError::invalid_input(format!(
                "Padding must not be negative (before: {}s, after: {}s)",
                padding.before_secs, padding.after_secs
            )));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let analysis = state
            .analysis
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("Analyze must run before Group"))?;

        let padding = ctx.settings.extraction.padding();
        ctx.logger.info(&format!(
            "Grouping with {}s lead-in, {}s follow-through",
            padding.before_secs, padding.after_secs
        ));

        let groups = build_clip_groups(&analysis.result.segments, padding)?;
        let summary = overlap_summary(&groups);

        if let Some(line) = &summary {
            ctx.logger.info(line);
        }
        ctx.logger.info(&format!(
            "Built {} clip groups ({} merged)",
            groups.len(),
            groups.iter().filter(|g| g.is_merged).count()
        ));

        state.groups = Some(GroupOutput { groups, summary });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.groups {
            Some(output) if !output.groups.is_empty() => Ok(()),
            Some(_) => Err(StepError::invalid_output("No clip groups were built")),
            None => Err(StepError::invalid_output("Groups not recorded")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;
    use crate::config::Settings;
    use crate::models::{Chapter, JobSpec, Segment, SegmentChapters};
    use crate::orchestrator::testutil::{context_for, context_with_settings};
    use crate::orchestrator::types::AnalysisOutput;
    use tempfile::tempdir;

    fn analyzed_state(offsets_ms: &[u64]) -> JobState {
        let chapters = offsets_ms
            .iter()
            .enumerate()
            .map(|(i, &ms)| {
                Chapter::new(i as u32 + 1, ms, "1st Period").with_global_order(i as u32 + 1)
            })
            .collect();
        let segment = SegmentChapters::with_chapters(
            Segment::new("1st Period", "/f/p1.mov"),
            chapters,
        );

        let mut state = JobState::new("test");
        state.analysis = Some(AnalysisOutput {
            result: AnalysisResult::new(vec![segment]),
            saved_to: None,
        });
        state
    }

    #[test]
    fn group_step_has_correct_name() {
        let step = GroupStep::new();
        assert_eq!(step.name(), "Group");
    }

    #[test]
    fn requires_analysis_results() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()));
        let mut state = JobState::new("test");

        let err = GroupStep::new().execute(&ctx, &mut state).unwrap_err();
        assert!(matches!(err, StepError::PreconditionFailed(_)));
    }

    #[test]
    fn distant_chapters_get_separate_groups() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()));
        // Defaults pad 8s before and 2s after; 10s apart means the next
        // padded start lands exactly on the running end, which starts a
        // new group.
        let mut state = analyzed_state(&[10_000, 20_000]);

        GroupStep::new().execute(&ctx, &mut state).unwrap();

        let output = state.groups.unwrap();
        assert_eq!(output.groups.len(), 2);
        assert!(output.groups.iter().all(|g| !g.is_merged));
        assert!(output.summary.is_none());
    }

    #[test]
    fn close_chapters_merge_into_one_group() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()));
        let mut state = analyzed_state(&[10_000, 15_000]);

        GroupStep::new().execute(&ctx, &mut state).unwrap();

        let output = state.groups.unwrap();
        assert_eq!(output.groups.len(), 1);
        assert!(output.groups[0].is_merged);
        assert_eq!(output.groups[0].chapters.len(), 2);
        assert!(output.summary.is_some());
    }

    #[test]
    fn negative_padding_fails_validation() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.extraction.seconds_before = -1.0;
        let ctx = context_with_settings(dir.path(), JobSpec::new(Vec::new()), settings);

        let err = GroupStep::new().validate_input(&ctx).unwrap_err();
        assert!(matches!(err, StepError::InvalidInput(_)));
    }
}
