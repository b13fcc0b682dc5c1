//! Request orchestration: fit, wrap, lay out, and report.

/// Request, result and the `compose` pipeline.
pub mod compose;
/// Non-fatal composition diagnostics.
pub mod warnings;

pub use compose::{CompositionResult, HeadlineRequest, compose, render_to_file};
pub use warnings::CompositionWarning;
