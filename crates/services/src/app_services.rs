use std::sync::Arc;

use tracing::{info, warn};

use backend::{Backend, BackendConfig, BackendError};
use career_core::model::UserId;

use crate::error::{AppServicesError, UserError};
use crate::progress_service::ProgressService;
use crate::quiz_service::QuizService;
use crate::roadmap_service::RoadmapService;
use crate::user_service::{NewUser, UserService};

/// Assembles app-facing services and resolves a usable user id.
#[derive(Clone)]
pub struct AppServices {
    user_id: UserId,
    quiz: Arc<QuizService>,
    progress: Arc<ProgressService>,
    roadmaps: Arc<RoadmapService>,
    users: Arc<UserService>,
}

impl AppServices {
    /// Build services backed by the REST backend at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be built or no
    /// user can be resolved.
    pub async fn http(
        config: &BackendConfig,
        preferred_user: Option<UserId>,
        profile: &NewUser,
    ) -> Result<Self, AppServicesError> {
        let backend = Backend::http(config)?;
        Self::from_backend(backend, preferred_user, profile).await
    }

    /// Build services over the seeded in-process backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the demo user cannot be created.
    pub async fn in_memory(profile: &NewUser) -> Result<Self, AppServicesError> {
        Self::from_backend(Backend::in_memory(), None, profile).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if no user can be resolved.
    pub async fn from_backend(
        backend: Backend,
        preferred_user: Option<UserId>,
        profile: &NewUser,
    ) -> Result<Self, AppServicesError> {
        let users = Arc::new(UserService::new(Arc::clone(&backend.progress)));
        let user_id = ensure_user(&users, preferred_user, profile).await?;

        Ok(Self {
            user_id,
            quiz: Arc::new(QuizService::new(Arc::clone(&backend.quiz))),
            progress: Arc::new(ProgressService::new(Arc::clone(&backend.progress))),
            roadmaps: Arc::new(RoadmapService::new(Arc::clone(&backend.roadmaps))),
            users,
        })
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.quiz = Arc::new(self.quiz.as_ref().clone().with_shuffle(shuffle));
        self
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }
}

async fn ensure_user(
    users: &UserService,
    preferred: Option<UserId>,
    profile: &NewUser,
) -> Result<UserId, AppServicesError> {
    if let Some(user_id) = preferred {
        match users.get_user(&user_id).await {
            Ok(user) => return Ok(user.id),
            Err(UserError::Backend(BackendError::NotFound)) => {
                warn!(user = %user_id, "configured user not found, registering a new one");
            }
            Err(UserError::Backend(err)) if err.is_transient() => {
                warn!(user = %user_id, error = %err, "backend unreachable, keeping configured user");
                return Ok(user_id);
            }
            Err(err) => return Err(err.into()),
        }
    }

    let user = users.create_user(profile).await?;
    info!(user = %user.id, name = %user.name, "using new user");
    Ok(user.id)
}
