//! examdeck-core — exam model, session state machine, timer, and grading.
//!
//! This crate defines the data model for the eight question kinds, the
//! answer-capture sheet, the sitting lifecycle with navigation and
//! idempotent submission, the cancellable countdown, and the scoring
//! engine the rest of examdeck builds on.

pub mod answers;
pub mod grading;
pub mod model;
pub mod session;
pub mod timer;
pub mod validate;
