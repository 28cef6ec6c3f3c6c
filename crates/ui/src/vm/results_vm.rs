use career_core::LevelTable;
use career_core::model::QuizResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryScoreVm {
    pub label: &'static str,
    pub score: String,
    /// Bar width relative to the strongest category, 0..=100.
    pub width: u8,
    pub strongest: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub points_earned: i64,
    pub total_points: i64,
    pub level_label: String,
    pub level_title: String,
    pub level_color: String,
    pub badges: Vec<String>,
    pub career: String,
    pub confidence_label: Option<String>,
    pub categories: Vec<CategoryScoreVm>,
}

#[must_use]
pub fn map_results(result: &QuizResult, levels: &LevelTable) -> ResultsVm {
    let tier = levels.tier_for(result.level());
    let strongest = result.strongest_category();
    let top = result
        .category_scores
        .values()
        .copied()
        .fold(0.0_f64, f64::max);

    let categories = result
        .category_scores
        .iter()
        .map(|(category, score)| {
            let width = if top > 0.0 { score / top * 100.0 } else { 0.0 };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let width = width.round().clamp(0.0, 100.0) as u8;
            CategoryScoreVm {
                label: category.label(),
                score: format!("{score:.1}"),
                width,
                strongest: strongest == Some(*category),
            }
        })
        .collect();

    let confidence_label = (result.confidence > 0.0)
        .then(|| format!("{:.0}% match", result.confidence * 100.0));

    ResultsVm {
        points_earned: result.points_earned,
        total_points: result.total_points(),
        level_label: format!("Level {}", result.level()),
        level_title: tier.title.clone(),
        level_color: tier.color.clone(),
        badges: result.progress.badges.iter().cloned().collect(),
        career: result.recommended_career.clone(),
        confidence_label,
        categories,
    }
}
