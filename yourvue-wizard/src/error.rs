use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the core wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("stage {0} is outside the 1..=8 range")]
    InvalidStage(u8),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures reported by a [`crate::storage::WizardStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is unavailable: {0}")]
    Unavailable(String),
    #[error("stored value could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Reasons a resume file is refused by the intake step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("Please upload a PDF, DOC, or DOCX file.")]
    UnsupportedType,
    #[error("File must be under 5 MB.")]
    TooLarge,
}

/// A command that could not be applied in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{reason}")]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result of a controller action.
pub type StepResult = Result<(), Rejection>;
