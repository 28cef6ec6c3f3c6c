#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod quiz_service;
pub mod roadmap_service;
pub mod user_service;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, LoadError, ProgressError, QuizFlowError, SubmitError, UserError,
};
pub use progress_service::{Dashboard, EXPLORATION_POINTS, ProgressService};
pub use quiz_service::{AdvanceOutcome, QuizService, SubmissionOutcome};
pub use roadmap_service::RoadmapService;
pub use user_service::{NewUser, UserService};
