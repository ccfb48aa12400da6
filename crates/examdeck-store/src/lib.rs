//! examdeck-store — the Exam Content Store collaborator.
//!
//! Holds the full exam definition as one namespaced JSON blob, falling back
//! to the built-in default dataset when the blob is absent or malformed.
//! The exam-taking core reads it once per sitting and never writes it;
//! writes come from the authoring surface, which sits behind the
//! session-ephemeral [`access::AdminGate`].

pub mod access;
pub mod builtin;
pub mod store;

pub use store::{ExamStore, JsonFileStore, MemoryStore, StoreError, EXAM_BLOB_NAME};
