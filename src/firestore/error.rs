use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::component::ComponentError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FirestoreErrorCode {
    MissingProjectId,
    Internal,
}

impl FirestoreErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FirestoreErrorCode::MissingProjectId => "firestore/missing-project-id",
            FirestoreErrorCode::Internal => "firestore/internal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirestoreError {
    pub code: FirestoreErrorCode,
    message: String,
}

impl FirestoreError {
    pub fn new(code: FirestoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FirestoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl Error for FirestoreError {}

impl From<ComponentError> for FirestoreError {
    fn from(err: ComponentError) -> Self {
        internal_error(err.to_string())
    }
}

pub type FirestoreResult<T> = Result<T, FirestoreError>;

pub fn missing_project_id() -> FirestoreError {
    FirestoreError::new(
        FirestoreErrorCode::MissingProjectId,
        "Firebase options must include a project_id to use Firestore",
    )
}

pub fn internal_error(message: impl Into<String>) -> FirestoreError {
    FirestoreError::new(FirestoreErrorCode::Internal, message)
}
