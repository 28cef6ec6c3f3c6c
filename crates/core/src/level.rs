//! Level tiers and progress toward the next level.
//!
//! The backend owns the authoritative level number; this module only maps a
//! level and point total onto display data (title, color, progress bar).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::UserProgress;

/// One contiguous band of points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTier {
    pub level: u32,
    /// Inclusive lower bound.
    pub min_points: i64,
    /// Inclusive upper bound. Advisory for the last tier.
    pub max_points: i64,
    pub title: String,
    /// CSS hex color, e.g. `#4CAF50`.
    pub color: String,
}

impl LevelTier {
    #[must_use]
    pub fn new(
        level: u32,
        min_points: i64,
        max_points: i64,
        title: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            level,
            min_points,
            max_points,
            title: title.into(),
            color: color.into(),
        }
    }

    #[must_use]
    pub fn contains(&self, points: i64) -> bool {
        (self.min_points..=self.max_points).contains(&points)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelTableError {
    #[error("level table must contain at least one tier")]
    Empty,

    #[error("tier {level} has min {min} greater than max {max}")]
    InvertedRange { level: u32, min: i64, max: i64 },

    #[error("tier {level} must start at {expected} (previous max + 1), found {found}")]
    NotContiguous { level: u32, expected: i64, found: i64 },

    #[error("tier levels must ascend by one: {previous} followed by {found}")]
    LevelGap { previous: u32, found: u32 },
}

/// Ordered, validated list of tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    tiers: Vec<LevelTier>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelTable {
    /// Build a table from tiers sorted by level.
    ///
    /// # Errors
    ///
    /// Returns `LevelTableError` if the table is empty, a tier range is
    /// inverted, levels skip a number, or ranges overlap or leave gaps.
    pub fn new(tiers: Vec<LevelTier>) -> Result<Self, LevelTableError> {
        if tiers.is_empty() {
            return Err(LevelTableError::Empty);
        }
        for tier in &tiers {
            if tier.min_points > tier.max_points {
                return Err(LevelTableError::InvertedRange {
                    level: tier.level,
                    min: tier.min_points,
                    max: tier.max_points,
                });
            }
        }
        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.level != prev.level + 1 {
                return Err(LevelTableError::LevelGap {
                    previous: prev.level,
                    found: next.level,
                });
            }
            let expected = prev.max_points + 1;
            if next.min_points != expected {
                return Err(LevelTableError::NotContiguous {
                    level: next.level,
                    expected,
                    found: next.min_points,
                });
            }
        }
        Ok(Self { tiers })
    }

    /// The tiers shipped with the app.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                LevelTier::new(1, 0, 99, "Explorer", "#9E9E9E"),
                LevelTier::new(2, 100, 249, "Seeker", "#4CAF50"),
                LevelTier::new(3, 250, 499, "Pathfinder", "#2196F3"),
                LevelTier::new(4, 500, 999, "Navigator", "#9C27B0"),
                LevelTier::new(5, 1000, 1999, "Trailblazer", "#FF9800"),
                LevelTier::new(6, 2000, 4999, "Visionary", "#F44336"),
            ],
        }
    }

    #[must_use]
    pub fn tiers(&self) -> &[LevelTier] {
        &self.tiers
    }

    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.highest().level
    }

    fn lowest(&self) -> &LevelTier {
        &self.tiers[0]
    }

    fn highest(&self) -> &LevelTier {
        &self.tiers[self.tiers.len() - 1]
    }

    #[must_use]
    pub fn has_level(&self, level: u32) -> bool {
        self.tiers.iter().any(|tier| tier.level == level)
    }

    /// Tier for a level number, falling back to the first tier for unknown levels.
    #[must_use]
    pub fn tier_for(&self, level: u32) -> &LevelTier {
        self.tiers
            .iter()
            .find(|tier| tier.level == level)
            .unwrap_or_else(|| self.lowest())
    }

    /// Tier after `level`, or `None` at max level.
    #[must_use]
    pub fn next_tier_for(&self, level: u32) -> Option<&LevelTier> {
        let next = level.checked_add(1)?;
        self.tiers.iter().find(|tier| tier.level == next)
    }

    /// Tier containing `points`, clamped to the table's ends.
    #[must_use]
    pub fn tier_for_points(&self, points: i64) -> &LevelTier {
        if points < self.lowest().min_points {
            return self.lowest();
        }
        self.tiers
            .iter()
            .find(|tier| tier.contains(points))
            .unwrap_or_else(|| self.highest())
    }

    /// Fraction of the way from the current tier's minimum to the next tier's
    /// minimum, in `[0, 1]`. Exactly `1.0` at max level.
    #[must_use]
    pub fn progress_fraction(&self, points: i64, level: u32) -> f64 {
        let Some(next) = self.next_tier_for(level) else {
            return 1.0;
        };
        let current = self.tier_for(level);
        let span = next.min_points - current.min_points;
        if span <= 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = (points - current.min_points) as f64 / span as f64;
        fraction.clamp(0.0, 1.0)
    }

    /// Points still needed to reach the next tier, or `None` at max level.
    #[must_use]
    pub fn points_to_next(&self, points: i64, level: u32) -> Option<i64> {
        self.next_tier_for(level)
            .map(|next| (next.min_points - points).max(0))
    }
}

/// Dashboard snapshot for a user's level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStatus {
    pub total_points: i64,
    pub tier: LevelTier,
    pub next_tier: Option<LevelTier>,
    pub progress_fraction: f64,
    pub points_to_next: Option<i64>,
}

impl LevelStatus {
    /// Snapshot for the reported level. A level missing from the table is
    /// replaced by the tier that contains the point total.
    #[must_use]
    pub fn from_progress(table: &LevelTable, progress: &UserProgress) -> Self {
        let points = progress.total_points;
        let level = if table.has_level(progress.level) {
            progress.level
        } else {
            table.tier_for_points(points).level
        };
        Self {
            total_points: points,
            tier: table.tier_for(level).clone(),
            next_tier: table.next_tier_for(level).cloned(),
            progress_fraction: table.progress_fraction(points, level),
            points_to_next: table.points_to_next(points, level),
        }
    }

    #[must_use]
    pub fn is_max_level(&self) -> bool {
        self.next_tier.is_none()
    }

    /// Progress as a whole percentage for display.
    #[must_use]
    pub fn percent(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.progress_fraction * 100.0).round() as u8;
        percent.min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_reported_level_resolves_from_points() {
        let table = LevelTable::standard();

        let below = LevelStatus::from_progress(&table, &UserProgress::new(50, 0));
        assert_eq!(below.tier.level, 1);
        assert_eq!(below.next_tier.as_ref().map(|t| t.level), Some(2));
        assert_eq!(below.points_to_next, Some(50));
        assert_eq!(below.percent(), 50);

        let beyond = LevelStatus::from_progress(&table, &UserProgress::new(6000, 7));
        assert_eq!(beyond.tier.title, "Visionary");
        assert!(beyond.is_max_level());
        assert_eq!(beyond.points_to_next, None);

        assert!(table.has_level(6));
        assert!(!table.has_level(0));
    }

    fn two_tier_table() -> LevelTable {
        LevelTable::new(vec![
            LevelTier::new(1, 0, 99, "Explorer", "#9E9E9E"),
            LevelTier::new(2, 100, 299, "Seeker", "#4CAF50"),
        ])
        .unwrap()
    }

    #[test]
    fn standard_table_is_valid() {
        let standard = LevelTable::standard();
        assert_eq!(LevelTable::new(standard.tiers().to_vec()), Ok(standard));
    }

    #[test]
    fn max_level_has_full_progress() {
        let table = two_tier_table();
        assert_eq!(table.tier_for(2).level, 2);
        assert!(table.next_tier_for(2).is_none());
        assert!((table.progress_fraction(150, 2) - 1.0).abs() < f64::EPSILON);
        assert_eq!(table.points_to_next(150, 2), None);
    }

    #[test]
    fn unknown_level_falls_back_to_first_tier() {
        let table = two_tier_table();
        assert_eq!(table.tier_for(0).level, 1);
        assert_eq!(table.tier_for(42).level, 1);
    }

    #[test]
    fn tier_for_points_covers_every_point_in_range() {
        let table = LevelTable::standard();
        for tier in table.tiers() {
            for points in [tier.min_points, (tier.min_points + tier.max_points) / 2, tier.max_points] {
                assert_eq!(table.tier_for_points(points).level, tier.level, "points {points}");
            }
        }
    }

    #[test]
    fn tier_for_points_clamps_outside_table() {
        let table = LevelTable::standard();
        assert_eq!(table.tier_for_points(-20).level, 1);
        assert_eq!(table.tier_for_points(1_000_000).level, table.max_level());
    }

    #[test]
    fn progress_fraction_is_monotonic_and_saturates() {
        let table = LevelTable::standard();
        let mut previous = 0.0;
        for points in -50..=400 {
            let fraction = table.progress_fraction(points, 2);
            assert!(fraction >= previous, "dropped at {points}");
            assert!((0.0..=1.0).contains(&fraction));
            previous = fraction;
        }
        assert!((table.progress_fraction(250, 2) - 1.0).abs() < f64::EPSILON);
        assert!((table.progress_fraction(175, 2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn points_to_next_counts_down() {
        let table = LevelTable::standard();
        assert_eq!(table.points_to_next(0, 1), Some(100));
        assert_eq!(table.points_to_next(60, 1), Some(40));
        assert_eq!(table.points_to_next(130, 1), Some(0));
    }

    #[test]
    fn rejects_gaps_and_overlaps() {
        let gap = LevelTable::new(vec![
            LevelTier::new(1, 0, 99, "a", "#000"),
            LevelTier::new(2, 120, 200, "b", "#000"),
        ]);
        assert_eq!(
            gap,
            Err(LevelTableError::NotContiguous {
                level: 2,
                expected: 100,
                found: 120
            })
        );

        let overlap = LevelTable::new(vec![
            LevelTier::new(1, 0, 99, "a", "#000"),
            LevelTier::new(2, 50, 200, "b", "#000"),
        ]);
        assert!(matches!(overlap, Err(LevelTableError::NotContiguous { .. })));
        assert_eq!(LevelTable::new(Vec::new()), Err(LevelTableError::Empty));
    }

    #[test]
    fn level_status_for_mid_tier_user() {
        let table = LevelTable::standard();
        let progress = UserProgress::new(175, 2);
        let status = LevelStatus::from_progress(&table, &progress);
        assert_eq!(status.tier.title, "Seeker");
        assert_eq!(status.next_tier.as_ref().map(|t| t.level), Some(3));
        assert_eq!(status.points_to_next, Some(75));
        assert_eq!(status.percent(), 50);
        assert!(!status.is_max_level());
    }
}
