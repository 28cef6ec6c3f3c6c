use std::sync::Arc;

use tracing::{info, warn};

use backend::ProgressBackend;
use career_core::model::{PointsAward, User, UserId, UserProgress};
use career_core::{LevelStatus, LevelTable};

use crate::error::ProgressError;

/// Points credited for opening a career roadmap.
pub const EXPLORATION_POINTS: i64 = 50;

/// Everything the dashboard shows for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub user: User,
    pub status: LevelStatus,
}

impl Dashboard {
    #[must_use]
    pub fn badges(&self) -> impl Iterator<Item = &str> {
        self.user.progress.badges.iter().map(String::as_str)
    }
}

/// Reads user progress and credits points.
#[derive(Clone)]
pub struct ProgressService {
    progress: Arc<dyn ProgressBackend>,
    levels: Arc<LevelTable>,
}

impl ProgressService {
    #[must_use]
    pub fn new(progress: Arc<dyn ProgressBackend>) -> Self {
        Self {
            progress,
            levels: Arc::new(LevelTable::standard()),
        }
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelTable) -> Self {
        self.levels = Arc::new(levels);
        self
    }

    #[must_use]
    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    #[must_use]
    pub fn status_for(&self, progress: &UserProgress) -> LevelStatus {
        if !self.levels.has_level(progress.level) {
            warn!(
                level = progress.level,
                points = progress.total_points,
                "backend reported a level outside the level table"
            );
        }
        LevelStatus::from_progress(&self.levels, progress)
    }

    /// Fetch the user and derive their level status.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Backend` if the user cannot be loaded.
    pub async fn dashboard(&self, user_id: &UserId) -> Result<Dashboard, ProgressError> {
        let user = self.progress.get_user(user_id).await?;
        let status = self.status_for(&user.progress);
        Ok(Dashboard { user, status })
    }

    /// Credit `points` to the user.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidPoints` for non-positive amounts, or
    /// `ProgressError::Backend` if the backend rejects the award.
    pub async fn add_points(
        &self,
        user_id: &UserId,
        points: i64,
    ) -> Result<PointsAward, ProgressError> {
        if points <= 0 {
            return Err(ProgressError::InvalidPoints(points));
        }
        let award = self.progress.add_points(user_id, points).await?;
        info!(
            user = %user_id,
            points_added = award.points_added,
            total_points = award.progress.total_points,
            level = award.progress.level,
            "points credited"
        );
        Ok(award)
    }

    /// Best-effort award: failures are logged and never retried.
    pub async fn award_exploration(&self, user_id: &UserId) -> Option<PointsAward> {
        match self.add_points(user_id, EXPLORATION_POINTS).await {
            Ok(award) => Some(award),
            Err(err) => {
                warn!(user = %user_id, error = %err, "exploration points not credited");
                None
            }
        }
    }
}
