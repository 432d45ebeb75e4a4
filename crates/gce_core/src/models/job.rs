//! Job specification handed to the orchestrator.

use super::segment::Segment;

/// Everything the pipeline needs to process one game's footage.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    /// Segments to analyze and extract from, in presentation order.
    pub segments: Vec<Segment>,
    /// Title embedded in the combined output, when one is produced.
    pub combined_title: Option<String>,
}

impl JobSpec {
    /// Create a spec for the given segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            combined_title: None,
        }
    }

    /// Set the title for the combined output.
    pub fn with_combined_title(mut self, title: impl Into<String>) -> Self {
        self.combined_title = Some(title.into());
        self
    }
}
