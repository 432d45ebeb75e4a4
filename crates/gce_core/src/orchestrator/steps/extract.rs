//! Extract step - cuts one clip per group, embedding highlight markers.
//!
//! Clips are cut sequentially in global presentation order. A clip that
//! fails to extract is logged and recorded, and the run moves on to the
//! next one; the step only fails outright when nothing could be cut.
//! Cancellation is honored between clips.

use std::fs;
use std::path::{Path, PathBuf};

use crate::extraction::{self, ClipRequest};
use crate::grouping::ClipGroup;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, ExtractOutput, JobState, StepOutcome};

/// Extract step for cutting clips out of the source segments.
pub struct ExtractStep;

impl ExtractStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExtractStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ExtractStep {
    fn name(&self) -> &str {
        "Extract"
    }

    fn description(&self) -> &str {
        "Cut one clip per highlight group"
    }

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        let analysis = state
            .analysis
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("Analyze must run before Extract"))?
            .result
            .clone();
        let groups: Vec<ClipGroup> = state
            .groups
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("Group must run before Extract"))?
            .groups
            .clone();

        fs::create_dir_all(&ctx.output_dir).map_err(|e| {
            StepError::io_error(
                format!("creating output directory {}", ctx.output_dir.display()),
                e,
            )
        })?;

        let stream_copy = ctx.settings.extraction.stream_copy;
        let use_hardware = ctx.settings.extraction.use_hardware_encoder;
        let total = groups.len();

        let mut clips: Vec<PathBuf> = Vec::new();
        let mut failures: Vec<String> = Vec::new();

        for (i, group) in groups.iter().enumerate() {
            if ctx.cancel_requested() {
                ctx.logger.warn(&format!(
                    "Extraction cancelled after {} of {} clips",
                    i, total
                ));
                state.extract = Some(ExtractOutput { clips, failures });
                return Err(StepError::Cancelled);
            }

            let Some(video) = analysis.video_path(&group.segment_name) else {
                let msg = format!("{}: no video path in analysis results", group.segment_name);
                ctx.logger.error(&msg);
                failures.push(msg);
                continue;
            };

            let output = clip_output_path(&ctx.output_dir, group, video, stream_copy);
            let label = output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| output.display().to_string());

            ctx.logger
                .info(&format!("Extracting clip {}/{}: {}", i + 1, total, label));
            ctx.report_progress("Extract", (i * 100 / total) as u32, &label);

            let request = ClipRequest::new(video, &output, group.start_secs, group.duration_secs)
                .with_markers(group.clip_markers());

            let result = if stream_copy {
                extraction::extract_clip_copy(&ctx.tools, &request, &ctx.work_dir)
            } else {
                extraction::extract_clip(&ctx.tools, &request, use_hardware, &ctx.work_dir)
            };

            match result {
                Ok(()) => clips.push(output),
                Err(e) => {
                    ctx.logger
                        .error(&format!("Failed to extract {}: {}", label, e));
                    failures.push(format!("{}: {}", label, e));
                }
            }
        }

        ctx.logger
            .info(&format!("Extracted {} of {} clips", clips.len(), total));

        state.extract = Some(ExtractOutput { clips, failures });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.extract {
            Some(output) if !output.clips.is_empty() => Ok(()),
            Some(output) => Err(StepError::invalid_output(format!(
                "No clips were extracted ({} failures)",
                output.failures.len()
            ))),
            None => Err(StepError::invalid_output("Extraction not recorded")),
        }
    }
}

/// Where the clip for `group` is written.
///
/// Stream copy keeps the source codec and container, so the filename
/// adopts the source extension; encoded clips are always `.mp4`.
fn clip_output_path(
    output_dir: &Path,
    group: &ClipGroup,
    video: &Path,
    stream_copy: bool,
) -> PathBuf {
    let mut path = output_dir.join(extraction::group_filename(group));
    if stream_copy {
        if let Some(ext) = video.extension() {
            path.set_extension(ext);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;
    use crate::grouping::{build_clip_groups, ClipPadding};
    use crate::models::{Chapter, JobSpec, Segment, SegmentChapters};
    use crate::orchestrator::testutil::context_for;
    use crate::orchestrator::CancelHandle;
    use crate::orchestrator::types::{AnalysisOutput, GroupOutput};
    use tempfile::tempdir;

    fn analyzed_chapters(video: &str) -> Vec<SegmentChapters> {
        vec![SegmentChapters::with_chapters(
            Segment::new("1st Period", video),
            vec![
                Chapter::new(1, 10_000, "1st Period").with_global_order(1),
                Chapter::new(2, 60_000, "1st Period").with_global_order(2),
            ],
        )]
    }

    fn state_with_groups(video: &str) -> JobState {
        let segments = analyzed_chapters(video);
        let groups = build_clip_groups(&segments, ClipPadding::default()).unwrap();

        let mut state = JobState::new("test");
        state.analysis = Some(AnalysisOutput {
            result: AnalysisResult::new(segments),
            saved_to: None,
        });
        state.groups = Some(GroupOutput {
            groups,
            summary: None,
        });
        state
    }

    #[test]
    fn extract_step_has_correct_name() {
        let step = ExtractStep::new();
        assert_eq!(step.name(), "Extract");
    }

    #[test]
    fn requires_analysis_and_groups() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()));

        let mut empty = JobState::new("test");
        let err = ExtractStep::new().execute(&ctx, &mut empty).unwrap_err();
        assert!(err.to_string().contains("Analyze"));

        let mut half = JobState::new("test");
        half.analysis = Some(AnalysisOutput {
            result: AnalysisResult::new(analyzed_chapters("/f/p1.mov")),
            saved_to: None,
        });
        let err = ExtractStep::new().execute(&ctx, &mut half).unwrap_err();
        assert!(err.to_string().contains("Group"));
    }

    #[test]
    fn failed_clips_are_recorded_not_fatal() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()));
        // Source video does not exist, so every clip fails to cut
        let mut state = state_with_groups("/nope/p1.mov");

        let outcome = ExtractStep::new().execute(&ctx, &mut state).unwrap();
        assert_eq!(outcome, StepOutcome::Success);

        let output = state.extract.as_ref().unwrap();
        assert!(output.clips.is_empty());
        assert_eq!(output.failures.len(), 2);
        assert!(output.failures[0].contains("Ch01"));

        let err = ExtractStep::new().validate_output(&ctx, &state).unwrap_err();
        assert!(err.to_string().contains("No clips were extracted"));
    }

    #[test]
    fn cancellation_stops_between_clips() {
        let dir = tempdir().unwrap();
        let handle = CancelHandle::new();
        let ctx = context_for(dir.path(), JobSpec::new(Vec::new()))
            .with_cancel_handle(handle.clone());
        let mut state = state_with_groups("/nope/p1.mov");

        handle.cancel();
        let err = ExtractStep::new().execute(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, StepError::Cancelled));
        // Partial results are still recorded
        assert!(state.extract.is_some());
        assert!(state.extract.unwrap().clips.is_empty());
    }

    #[test]
    fn stream_copy_keeps_source_container() {
        let segments = analyzed_chapters("/f/p1.mov");
        let groups = build_clip_groups(&segments, ClipPadding::default()).unwrap();
        let video = Path::new("/f/p1.mov");
        let out_dir = Path::new("/out");

        let encoded = clip_output_path(out_dir, &groups[0], video, false);
        assert_eq!(encoded.extension().unwrap(), "mp4");

        let copied = clip_output_path(out_dir, &groups[0], video, true);
        assert_eq!(copied.extension().unwrap(), "mov");
        assert_eq!(encoded.file_stem(), copied.file_stem());
    }
}
