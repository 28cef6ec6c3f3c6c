//! Shared error types for the services crate.

use thiserror::Error;

use backend::BackendError;
use career_core::QuizError;

/// Question or roadmap lists could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("no questions available for quiz")]
    Empty,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted while submitting a finished quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `QuizService` while driving a session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    /// The user has to act first (pick an option, already at the start).
    #[error(transparent)]
    Precondition(#[from] QuizError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl QuizFlowError {
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, QuizFlowError::Precondition(err) if err.is_precondition())
    }
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("points to add must be positive, got {0}")]
    InvalidPoints(i64),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserError {
    #[error("user name cannot be empty")]
    EmptyName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    User(#[from] UserError),
}
