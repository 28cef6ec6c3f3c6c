use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use backend::QuizBackend;
use career_core::model::{ChoiceKey, QuizResult, UserId};
use career_core::{Advance, QuizPhase, QuizSession, Submission, SubmissionTicket};

use crate::error::{LoadError, QuizFlowError, SubmitError};

/// Result of a successful `QuizService::advance`.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved to the next question; `restored` is the pick from an earlier visit.
    Moved {
        position: usize,
        restored: Option<ChoiceKey>,
    },
    /// The last answer was submitted and scored.
    Completed(QuizResult),
}

/// What happened when a submission outcome reached the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Completed(QuizResult),
    Failed(String),
    /// The session moved on (abandoned or retried) before the outcome arrived.
    Stale,
}

/// Loads questions and submits finished quizzes.
#[derive(Clone)]
pub struct QuizService {
    quiz: Arc<dyn QuizBackend>,
    shuffle: bool,
}

impl QuizService {
    #[must_use]
    pub fn new(quiz: Arc<dyn QuizBackend>) -> Self {
        Self {
            quiz,
            shuffle: false,
        }
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Load the question list and start a fresh session at the first question.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Empty` when the backend has no questions, or
    /// `LoadError::Backend` when the list cannot be fetched.
    pub async fn start_quiz(&self) -> Result<QuizSession, LoadError> {
        let mut questions = self.quiz.load_questions().await.map_err(|err| {
            warn!(error = %err, "failed to load quiz questions");
            LoadError::from(err)
        })?;
        if self.shuffle {
            questions.shuffle(&mut rng());
        }
        debug!(count = questions.len(), shuffled = self.shuffle, "starting quiz");
        QuizSession::new(questions).map_err(|_| LoadError::Empty)
    }

    /// Send a submission to the backend. Does not touch any session.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Backend` if the backend rejects the answers.
    pub async fn submit(
        &self,
        user_id: &UserId,
        submission: &Submission,
    ) -> Result<QuizResult, SubmitError> {
        info!(
            user = %user_id,
            answers = submission.answers.len(),
            attempt = submission.ticket.attempt(),
            "submitting quiz"
        );
        let result = self
            .quiz
            .submit_answers(user_id, &submission.answers)
            .await
            .map_err(|err| {
                warn!(error = %err, "quiz submission failed");
                SubmitError::from(err)
            })?;
        info!(
            points_earned = result.points_earned,
            total_points = result.total_points(),
            career = %result.recommended_career,
            "quiz scored"
        );
        Ok(result)
    }

    /// Advance `session`, submitting and applying the outcome when the last
    /// question is answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Precondition` when the session refuses to move,
    /// or `QuizFlowError::Submit` when submission fails (the session is then
    /// in `Failed` and can be retried).
    pub async fn advance(
        &self,
        user_id: &UserId,
        session: &mut QuizSession,
    ) -> Result<AdvanceOutcome, QuizFlowError> {
        match session.advance()? {
            Advance::Moved { position, restored } => {
                debug!(position, "quiz advanced");
                Ok(AdvanceOutcome::Moved { position, restored })
            }
            Advance::ReadyToSubmit(submission) => {
                let result = self.finish(user_id, session, submission).await?;
                Ok(AdvanceOutcome::Completed(result))
            }
        }
    }

    /// Resubmit the answers of a failed session.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Precondition` unless the session failed, or
    /// `QuizFlowError::Submit` when the retry fails too.
    pub async fn retry(
        &self,
        user_id: &UserId,
        session: &mut QuizSession,
    ) -> Result<QuizResult, QuizFlowError> {
        let submission = session.retry_submission()?;
        Ok(self.finish(user_id, session, submission).await?)
    }

    async fn finish(
        &self,
        user_id: &UserId,
        session: &mut QuizSession,
        submission: Submission,
    ) -> Result<QuizResult, SubmitError> {
        let ticket = submission.ticket;
        let outcome = self.submit(user_id, &submission).await;
        match outcome {
            Ok(result) => {
                session.complete_submission(ticket, Ok(result.clone()))?;
                Ok(result)
            }
            Err(err) => {
                session.complete_submission(ticket, Err(err.to_string()))?;
                Err(err)
            }
        }
    }

    /// Apply an outcome produced by a detached `submit` call.
    ///
    /// Outcomes for abandoned sessions or superseded tickets are dropped.
    pub fn apply_outcome(
        session: &mut QuizSession,
        ticket: SubmissionTicket,
        outcome: Result<QuizResult, SubmitError>,
    ) -> SubmissionOutcome {
        let outcome = outcome.map_err(|err| err.to_string());
        if session.complete_submission(ticket, outcome).is_err() {
            debug!(
                attempt = ticket.attempt(),
                phase = session.phase().name(),
                "discarding stale submission outcome"
            );
            return SubmissionOutcome::Stale;
        }
        match session.phase() {
            QuizPhase::Completed(result) => SubmissionOutcome::Completed(result.clone()),
            QuizPhase::Failed { reason } => SubmissionOutcome::Failed(reason.clone()),
            _ => SubmissionOutcome::Stale,
        }
    }
}
