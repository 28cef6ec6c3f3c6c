use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::ids::UserId;

/// Points, level and badges as last reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_points: i64,
    pub level: u32,
    pub badges: BTreeSet<String>,
}

impl UserProgress {
    #[must_use]
    pub fn new(total_points: i64, level: u32) -> Self {
        Self {
            total_points,
            level,
            badges: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_badges<I, S>(mut self, badges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.badges = badges.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.contains(badge)
    }
}

/// A user account with its gamification state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub progress: UserProgress,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }
}

/// Outcome of an `add_points` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsAward {
    pub points_added: i64,
    pub progress: UserProgress,
}
