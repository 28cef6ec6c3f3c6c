mod dashboard;
mod home;
mod quiz;
mod results;
mod roadmaps;
mod state;

#[cfg(test)]
mod intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use home::HomeView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use roadmaps::{RoadmapDetailView, RoadmapsView};
pub use state::{ViewError, ViewState, view_state_from_resource};
