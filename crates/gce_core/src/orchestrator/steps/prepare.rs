//! Prepare step - validates segment inputs and joins split recording chains.
//!
//! GoPro recordings over the 4 GB container limit arrive as chains
//! (`GX01xxxx.MP4`, `GX02xxxx.MP4`, ...). A segment pointing at any part
//! of a chain is rewritten to use one combined file, keeping the first
//! part as the timecode source since that is where the device clock of
//! the recording start lives.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::{detect_split_chains, DiscoveryError, SplitChain};
use crate::extraction;
use crate::models::{MetadataSource, Segment};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, PrepareOutput, StepOutcome};

/// Prepare step for input validation and split-chain combining.
pub struct PrepareStep;

impl PrepareStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PrepareStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for PrepareStep {
    fn name(&self) -> &str {
        "Prepare"
    }

    fn description(&self) -> &str {
        "Validate inputs and join split recordings"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.segments().is_empty() {
            return Err(StepError::invalid_input("No segments configured"));
        }

        for segment in ctx.segments() {
            if !segment.video_path.exists() {
                return Err(StepError::invalid_input(format!(
                    "{}: video not found: {}",
                    segment.name,
                    segment.video_path.display()
                )));
            }
            let metadata = segment.metadata_source.path();
            if !metadata.exists() {
                return Err(StepError::invalid_input(format!(
                    "{}: metadata source not found: {}",
                    segment.name,
                    metadata.display()
                )));
            }
            if !segment.timecode_source.exists() {
                return Err(StepError::invalid_input(format!(
                    "{}: timecode source not found: {}",
                    segment.name,
                    segment.timecode_source.display()
                )));
            }
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome> {
        ctx.logger.info(&format!(
            "Preparing {} segments",
            ctx.segments().len()
        ));

        fs::create_dir_all(&ctx.work_dir).map_err(|e| {
            StepError::io_error(
                format!("creating work directory {}", ctx.work_dir.display()),
                e,
            )
        })?;

        let chains = chains_for_segments(ctx.segments())?;

        let mut segments = Vec::with_capacity(ctx.segments().len());
        let mut combined_chains = Vec::new();

        for segment in ctx.segments() {
            let chain = chains
                .iter()
                .find(|(_, c)| c.parts.iter().any(|p| *p == segment.video_path));

            let prepared = match chain {
                Some((dir, chain)) => {
                    let combined = chain.combined_path(dir);
                    if combined.exists() {
                        ctx.logger.info(&format!(
                            "{}: reusing combined file {}",
                            segment.name,
                            combined.display()
                        ));
                    } else {
                        ctx.logger.info(&format!(
                            "{}: combining {} split parts into {}",
                            segment.name,
                            chain.len(),
                            combined.display()
                        ));
                        extraction::combine_split_parts(
                            &ctx.tools,
                            &chain.parts,
                            &combined,
                            &ctx.work_dir,
                        )?;
                    }
                    combined_chains.push(combined.clone());
                    rewrite_for_combined(segment, combined, &chain.parts[0])
                }
                None => segment.clone(),
            };
            segments.push(prepared);
        }

        if !combined_chains.is_empty() {
            ctx.logger.info(&format!(
                "Joined {} split recording chains",
                combined_chains.len()
            ));
        }

        state.prepare = Some(PrepareOutput {
            segments,
            combined_chains,
        });
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.prepare {
            Some(p) if p.segments.len() == ctx.segments().len() => Ok(()),
            Some(_) => Err(StepError::invalid_output(
                "Prepared segment count does not match the job spec",
            )),
            None => Err(StepError::invalid_output("Prepared segments not recorded")),
        }
    }
}

/// Detect split chains in every distinct folder the segments live in.
fn chains_for_segments(segments: &[Segment]) -> StepResult<Vec<(PathBuf, SplitChain)>> {
    let mut chains = Vec::new();
    let mut scanned: Vec<PathBuf> = Vec::new();

    for segment in segments {
        let Some(dir) = segment.video_path.parent() else {
            continue;
        };
        if scanned.iter().any(|d| d == dir) {
            continue;
        }
        scanned.push(dir.to_path_buf());

        let found = detect_split_chains(dir).map_err(|e| {
            let DiscoveryError::Io { path, source } = e;
            StepError::io_error(format!("scanning {}", path.display()), source)
        })?;
        chains.extend(found.into_iter().map(|c| (dir.to_path_buf(), c)));
    }

    Ok(chains)
}

/// Rewrite a segment whose video is part of a split chain.
///
/// The combined file becomes the video (and the embedded marker source,
/// since chapters carry over when parts are joined); the chain's first
/// part stays the timecode source.
fn rewrite_for_combined(segment: &Segment, combined: PathBuf, first_part: &Path) -> Segment {
    let rewritten = Segment::new(&segment.name, combined).with_timecode_source(first_part);
    match &segment.metadata_source {
        MetadataSource::Sidecar(path) => rewritten.with_sidecar_metadata(path),
        MetadataSource::Embedded(_) => rewritten,
    }
}
