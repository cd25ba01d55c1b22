//! Terminal outcomes of a generation run

use phpaccess_core::EditError;
use thiserror::Error;

use crate::options::Visibility;

/// How a host should surface an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
    Silent,
}

/// Reasons a run ends without edits
///
/// Every variant leaves the document untouched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("There is no active editor!")]
    NoActiveDocument,

    #[error("Error on file parsing!")]
    ParseFailure { message: String },

    #[error("No classes found in this file!")]
    NoClassesFound,

    #[error("No {visibility} properties found in class!")]
    NoQualifyingProperties { visibility: Visibility },

    #[error("All classes already have getters/setters!")]
    AllAlreadyCovered,

    #[error("Selection cancelled")]
    SelectionCancelled,

    #[error("Failed to apply edits: {0}")]
    Apply(#[from] EditError),
}

impl GenerateError {
    pub fn severity(&self) -> Severity {
        match self {
            GenerateError::NoActiveDocument
            | GenerateError::ParseFailure { .. }
            | GenerateError::NoClassesFound
            | GenerateError::Apply(_) => Severity::Error,
            GenerateError::NoQualifyingProperties { .. } | GenerateError::AllAlreadyCovered => {
                Severity::Info
            }
            GenerateError::SelectionCancelled => Severity::Silent,
        }
    }
}
