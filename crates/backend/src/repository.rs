use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use career_core::model::{Answer, PointsAward, Question, QuizResult, Roadmap, User, UserId};

use crate::config::BackendConfig;
use crate::http::HttpBackend;
use crate::memory::InMemoryBackend;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("not found")]
    NotFound,

    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl BackendError {
    /// True when retrying the same request might succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Transport(_) | BackendError::Connection(_) => true,
            BackendError::Status { status, .. } => *status >= 500,
            BackendError::NotFound | BackendError::Decode(_) => false,
        }
    }
}

/// Quiz content and scoring.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Fetch the ordered question list.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the list cannot be fetched or decoded.
    async fn load_questions(&self) -> Result<Vec<Question>, BackendError>;

    /// Score a complete answer set for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on any non-success response.
    async fn submit_answers(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<QuizResult, BackendError>;
}

/// Users and their points.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError` if the user cannot be created.
    async fn create_user(&self, name: &str, email: &str) -> Result<User, BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError::NotFound` for unknown users, or other backend errors.
    async fn get_user(&self, user_id: &UserId) -> Result<User, BackendError>;

    /// Credit exploration points.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the award.
    async fn add_points(&self, user_id: &UserId, points: i64) -> Result<PointsAward, BackendError>;
}

/// Career roadmaps.
#[async_trait]
pub trait RoadmapBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError` if the list cannot be fetched or decoded.
    async fn list_roadmaps(&self) -> Result<Vec<Roadmap>, BackendError>;

    /// Roadmap for a single career, `None` if the backend has none.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` for transport or decode failures.
    async fn get_roadmap(&self, career: &str) -> Result<Option<Roadmap>, BackendError>;
}

/// Aggregates backend contracts behind trait objects for easy adapter swapping.
#[derive(Clone)]
pub struct Backend {
    pub quiz: Arc<dyn QuizBackend>,
    pub progress: Arc<dyn ProgressBackend>,
    pub roadmaps: Arc<dyn RoadmapBackend>,
}

impl Backend {
    /// Seeded in-process fake.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryBackend::seeded())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryBackend) -> Self {
        let quiz: Arc<dyn QuizBackend> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressBackend> = Arc::new(repo.clone());
        let roadmaps: Arc<dyn RoadmapBackend> = Arc::new(repo);
        Self {
            quiz,
            progress,
            roadmaps,
        }
    }

    /// Remote REST backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Connection` if the HTTP client cannot be built.
    pub fn http(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = HttpBackend::new(config)?;
        let quiz: Arc<dyn QuizBackend> = Arc::new(client.clone());
        let progress: Arc<dyn ProgressBackend> = Arc::new(client.clone());
        let roadmaps: Arc<dyn RoadmapBackend> = Arc::new(client);
        Ok(Self {
            quiz,
            progress,
            roadmaps,
        })
    }
}
