//! Pipeline step implementations.
//!
//! Each step handles a specific phase of the analyze/extract pipeline.

mod analyze;
mod combine;
mod extract;
mod group;
mod prepare;

pub use analyze::AnalyzeStep;
pub use combine::CombineStep;
pub use extract::ExtractStep;
pub use group::GroupStep;
pub use prepare::PrepareStep;
