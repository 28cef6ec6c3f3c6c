use career_core::model::{Category, ChoiceKey, QuizResult};
use career_core::{Advance, QuizError, QuizPhase, QuizSession, Submission, SubmissionTicket};
use services::{QuizService, SubmissionOutcome, SubmitError};
use tracing::debug;

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(ChoiceKey),
    Next,
    Back,
    Retry,
}

/// What the screen should do after a navigation intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Stay,
    Submit(Submission),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub key: ChoiceKey,
    pub label: String,
    pub text: String,
    pub selected: bool,
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        self.session.current_question().text()
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.session.current_question().category()
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let selected = self.session.selected_option();
        self.session
            .current_question()
            .options()
            .map(|(key, text)| OptionVm {
                key,
                label: key.as_str().to_uppercase(),
                text: text.to_string(),
                selected: selected == Some(key),
            })
            .collect()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.position() + 1,
            self.session.len()
        )
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.session.progress_percent()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.session.is_active() && self.session.position() > 0
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.session.is_last() {
            "Submit"
        } else {
            "Next"
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.session.is_submitting()
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        matches!(self.session.phase(), QuizPhase::Failed { .. })
    }

    pub fn select(&mut self, key: ChoiceKey) {
        if let Err(err) = self.session.select_option(key) {
            debug!(error = %err, "selection ignored");
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::NoSelection` when no answer is picked yet.
    pub fn advance(&mut self) -> Result<QuizStep, ViewError> {
        match self.session.advance() {
            Ok(Advance::Moved { position, .. }) => {
                debug!(position, "quiz advanced");
                Ok(QuizStep::Stay)
            }
            Ok(Advance::ReadyToSubmit(submission)) => Ok(QuizStep::Submit(submission)),
            Err(QuizError::NoOptionSelected) => Err(ViewError::NoSelection),
            Err(err) => {
                debug!(error = %err, "advance ignored");
                Ok(QuizStep::Stay)
            }
        }
    }

    pub fn retreat(&mut self) {
        if let Err(err) = self.session.retreat() {
            debug!(error = %err, "retreat ignored");
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when there is no failed submission to retry.
    pub fn retry(&mut self) -> Result<Submission, ViewError> {
        self.session
            .retry_submission()
            .map_err(|_| ViewError::Unknown)
    }

    pub fn apply_outcome(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<QuizResult, SubmitError>,
    ) -> SubmissionOutcome {
        QuizService::apply_outcome(&mut self.session, ticket, outcome)
    }

    pub fn abandon(&mut self) {
        self.session.abandon();
    }
}

/// # Errors
///
/// Returns `ViewError::NoQuestions` when the backend has no questions.
/// Returns `ViewError::Load` for other failures.
pub async fn start_quiz(quiz: &QuizService) -> Result<QuizVm, ViewError> {
    let session = quiz.start_quiz().await?;
    Ok(QuizVm::new(session))
}
