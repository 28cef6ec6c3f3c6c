use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::model::progress::UserProgress;
use crate::model::question::Category;

/// Backend verdict for a submitted quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub points_earned: i64,
    /// Progress after the points were credited.
    pub progress: UserProgress,
    pub recommended_career: String,
    pub roadmap_url: Url,
    pub category_scores: BTreeMap<Category, f64>,
    /// Recommendation confidence in `[0, 1]`.
    pub confidence: f64,
}

impl QuizResult {
    #[must_use]
    pub fn total_points(&self) -> i64 {
        self.progress.total_points
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.progress.level
    }

    /// Category with the highest score, ties broken by category order.
    #[must_use]
    pub fn strongest_category(&self) -> Option<Category> {
        self.category_scores
            .iter()
            .fold(None::<(Category, f64)>, |best, (category, score)| match best {
                Some((_, best_score)) if best_score >= *score => best,
                _ => Some((*category, *score)),
            })
            .map(|(category, _)| category)
    }
}
