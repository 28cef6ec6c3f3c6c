use career_core::LevelTable;
use services::Dashboard;

use super::time_fmt::format_member_since;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierRowVm {
    pub level: u32,
    pub title: String,
    pub range: String,
    pub color: String,
    pub reached: bool,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub name: String,
    pub member_since: String,
    pub total_points: i64,
    pub level_label: String,
    pub title: String,
    pub color: String,
    pub percent: u8,
    pub next_label: String,
    pub badges: Vec<String>,
    pub ladder: Vec<TierRowVm>,
}

#[must_use]
pub fn map_dashboard(dashboard: &Dashboard, levels: &LevelTable) -> DashboardVm {
    let status = &dashboard.status;
    let next_label = match (&status.next_tier, status.points_to_next) {
        (Some(next), Some(0)) => format!("Ready for {}", next.title),
        (Some(next), Some(points)) => format!("{points} points to {}", next.title),
        _ => "Max level reached".to_string(),
    };

    let ladder = levels
        .tiers()
        .iter()
        .map(|tier| TierRowVm {
            level: tier.level,
            title: tier.title.clone(),
            range: format!("{}–{} pts", tier.min_points, tier.max_points),
            color: tier.color.clone(),
            reached: tier.level <= status.tier.level,
            current: tier.level == status.tier.level,
        })
        .collect();

    DashboardVm {
        name: dashboard.user.name.clone(),
        member_since: format_member_since(dashboard.user.created_at),
        total_points: status.total_points,
        level_label: format!("Level {}", status.tier.level),
        title: status.tier.title.clone(),
        color: status.tier.color.clone(),
        percent: status.percent(),
        next_label,
        badges: dashboard.badges().map(str::to_string).collect(),
        ladder,
    }
}
