//! examdeck-report — result presentation.
//!
//! Consumes the grading outcome, the flattened question list, and the
//! answer sheet; renders the per-question review with the same correctness
//! predicate the scorer used, so the displayed markers and the numeric
//! score can never disagree.

pub mod review;
pub mod summary;

pub use review::{build_review, ReviewRow};
pub use summary::{feedback, format_clock, GradeReport};
