mod dashboard_vm;
mod quiz_vm;
mod results_vm;
mod roadmap_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardVm, TierRowVm, map_dashboard};
pub use quiz_vm::{OptionVm, QuizIntent, QuizStep, QuizVm, start_quiz};
pub use results_vm::{CategoryScoreVm, ResultsVm, map_results};
pub use roadmap_vm::{RoadmapCardVm, RoadmapPane, map_roadmap_cards, result_roadmap_for};
pub use time_fmt::format_member_since;
