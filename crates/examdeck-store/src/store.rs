//! The `ExamStore` port and its two implementations.
//!
//! `load` is infallible by contract: a missing or unparsable blob yields
//! the built-in default dataset so a sitting can never fail to start.
//! `save` is only reached from the authoring surface and does report
//! errors.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use examdeck_core::model::ExamData;

use crate::builtin;

/// File name of the single namespaced exam blob.
pub const EXAM_BLOB_NAME: &str = "examdeck-exam.json";

/// Errors from writing the exam blob.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize exam definition: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write exam definition to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistence port for the exam definition.
///
/// Injected into the session constructor path instead of being reached as
/// ambient global state, so tests swap in [`MemoryStore`].
pub trait ExamStore {
    /// Read the exam definition; substitutes the built-in default dataset
    /// when nothing usable is stored.
    fn load(&self) -> ExamData;

    /// Persist the exam definition. Used by the authoring surface only.
    fn save(&self, exam: &ExamData) -> Result<(), StoreError>;
}

/// Exam blob stored as one JSON file inside a data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the blob under `data_dir/examdeck-exam.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(EXAM_BLOB_NAME),
        }
    }

    /// Use an explicit file path instead of the namespaced default.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExamStore for JsonFileStore {
    fn load(&self) -> ExamData {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no stored exam, using built-in dataset");
                return builtin::default_exam();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable exam blob, using built-in dataset");
                return builtin::default_exam();
            }
        };

        match serde_json::from_str(&content) {
            Ok(exam) => exam,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "malformed exam blob, using built-in dataset");
                builtin::default_exam()
            }
        }
    }

    fn save(&self, exam: &ExamData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(exam)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store for tests and ad-hoc sittings.
#[derive(Default)]
pub struct MemoryStore {
    exam: Mutex<Option<ExamData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exam(exam: ExamData) -> Self {
        Self {
            exam: Mutex::new(Some(exam)),
        }
    }
}

impl ExamStore for MemoryStore {
    fn load(&self) -> ExamData {
        self.exam
            .lock()
            .expect("exam store lock poisoned")
            .clone()
            .unwrap_or_else(builtin::default_exam)
    }

    fn save(&self, exam: &ExamData) -> Result<(), StoreError> {
        *self.exam.lock().expect("exam store lock poisoned") = Some(exam.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let exam = store.load();
        assert_eq!(exam.title, builtin::default_exam().title);
    }

    #[test]
    fn malformed_blob_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.path(), "not { json ]").unwrap();

        let exam = store.load();
        assert_eq!(exam.title, builtin::default_exam().title);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let mut exam = builtin::default_exam();
        exam.title = "Edited Exam".into();
        store.save(&exam).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.title, "Edited Exam");
        assert_eq!(loaded.question_count(), exam.question_count());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/data"));
        store.save(&builtin::default_exam()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn memory_store_roundtrip_and_default() {
        let store = MemoryStore::new();
        assert_eq!(store.load().title, builtin::default_exam().title);

        let mut exam = builtin::default_exam();
        exam.title = "In Memory".into();
        store.save(&exam).unwrap();
        assert_eq!(store.load().title, "In Memory");
    }
}
