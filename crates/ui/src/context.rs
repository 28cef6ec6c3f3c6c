use std::sync::{Arc, Mutex};

use career_core::model::{QuizResult, UserId};
use services::{ProgressService, QuizService, RoadmapService};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn user_id(&self) -> UserId;

    fn quiz(&self) -> Arc<QuizService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn roadmaps(&self) -> Arc<RoadmapService>;
    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    user_id: UserId,
    last_result: Arc<Mutex<Option<QuizResult>>>,

    quiz: Arc<QuizService>,
    progress: Arc<ProgressService>,
    roadmaps: Arc<RoadmapService>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            user_id: app.user_id(),
            last_result: Arc::new(Mutex::new(None)),
            quiz: app.quiz(),
            progress: app.progress(),
            roadmaps: app.roadmaps(),
            link_opener: app.link_opener(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    /// Result of the most recently completed quiz, shown on the results screen.
    #[must_use]
    pub fn last_result(&self) -> Option<QuizResult> {
        self.last_result
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    pub fn set_last_result(&self, result: QuizResult) {
        if let Ok(mut guard) = self.last_result.lock() {
            *guard = Some(result);
        }
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
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
