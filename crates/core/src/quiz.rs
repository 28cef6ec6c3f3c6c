//! Quiz traversal state machine.
//!
//! `QuizSession` owns the loaded questions and the answers picked so far. It
//! never talks to the backend: when the last question is answered it hands out
//! a [`Submission`] and waits for the caller to report the outcome through
//! [`QuizSession::complete_submission`].

use std::fmt;
use thiserror::Error;

use crate::model::{Answer, ChoiceKey, Question, QuestionId, QuizResult};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    NoQuestions,

    #[error("select an option before continuing")]
    NoOptionSelected,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("quiz is not accepting input ({phase})")]
    NotActive { phase: &'static str },

    #[error("submission outcome no longer applies to this quiz")]
    StaleSubmission,

    #[error("unknown choice key: {0}")]
    InvalidChoice(String),
}

impl QuizError {
    /// True for errors the UI turns into an inline prompt rather than a notice.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            QuizError::NoOptionSelected | QuizError::AtFirstQuestion | QuizError::InvalidChoice(_)
        )
    }
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    #[must_use]
    pub fn attempt(self) -> u64 {
        self.0
    }
}

/// Answers handed to the backend, one per question in quiz order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizPhase {
    Active,
    Submitting { ticket: SubmissionTicket },
    Completed(QuizResult),
    Failed { reason: String },
    Abandoned,
}

impl QuizPhase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuizPhase::Active => "active",
            QuizPhase::Submitting { .. } => "submitting",
            QuizPhase::Completed(_) => "completed",
            QuizPhase::Failed { .. } => "failed",
            QuizPhase::Abandoned => "abandoned",
        }
    }
}

/// What `advance` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to `position`; `restored` is the answer recorded on an earlier visit.
    Moved {
        position: usize,
        restored: Option<ChoiceKey>,
    },
    /// Last question answered; the session is now submitting.
    ReadyToSubmit(Submission),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

pub struct QuizSession {
    questions: Vec<Question>,
    position: usize,
    selections: Vec<Option<ChoiceKey>>,
    phase: QuizPhase,
    attempts: u64,
}

impl QuizSession {
    /// Start a session at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let selections = vec![None; questions.len()];
        Ok(Self {
            questions,
            position: 0,
            selections,
            phase: QuizPhase::Active,
            attempts: 0,
        })
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, QuizPhase::Active)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, QuizPhase::Submitting { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        match &self.phase {
            QuizPhase::Completed(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    /// Option recorded for the current question, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<ChoiceKey> {
        self.selections[self.position]
    }

    #[must_use]
    pub fn answer_for(&self, question_id: &QuestionId) -> Option<ChoiceKey> {
        self.questions
            .iter()
            .position(|question| question.id() == question_id)
            .and_then(|index| self.selections[index])
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    /// Recorded answers in question order.
    #[must_use]
    pub fn answers(&self) -> Vec<Answer> {
        self.questions
            .iter()
            .zip(&self.selections)
            .filter_map(|(question, selection)| {
                selection.map(|key| Answer::new(question.id().clone(), key))
            })
            .collect()
    }

    /// `(position + 1) / len * 100`, for display only.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let percent = (self.position + 1) as f64 / self.questions.len() as f64 * 100.0;
        percent
    }

    fn ensure_active(&self) -> Result<(), QuizError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(QuizError::NotActive {
                phase: self.phase.name(),
            })
        }
    }

    /// Record `key` for the current question, replacing any earlier pick.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotActive` outside the active phase.
    pub fn select_option(&mut self, key: ChoiceKey) -> Result<(), QuizError> {
        self.ensure_active()?;
        self.selections[self.position] = Some(key);
        Ok(())
    }

    /// Parse a raw key (`"a"`..`"d"`) and record it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidChoice` for unknown keys, or
    /// `QuizError::NotActive` outside the active phase.
    pub fn select_option_str(&mut self, raw: &str) -> Result<(), QuizError> {
        let key = raw
            .parse::<ChoiceKey>()
            .map_err(|_| QuizError::InvalidChoice(raw.to_string()))?;
        self.select_option(key)
    }

    /// Move forward, or start submission when on the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoOptionSelected` if the current question has no
    /// answer, or `QuizError::NotActive` while submitting or finished. State is
    /// unchanged on error.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.ensure_active()?;
        if self.selected_option().is_none() {
            return Err(QuizError::NoOptionSelected);
        }

        if !self.is_last() {
            self.position += 1;
            return Ok(Advance::Moved {
                position: self.position,
                restored: self.selected_option(),
            });
        }

        Ok(Advance::ReadyToSubmit(self.begin_submission()))
    }

    fn begin_submission(&mut self) -> Submission {
        self.attempts += 1;
        let ticket = SubmissionTicket(self.attempts);
        self.phase = QuizPhase::Submitting { ticket };
        Submission {
            ticket,
            answers: self.answers(),
        }
    }

    /// Step back one question. Answers are kept.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AtFirstQuestion` at position 0, or
    /// `QuizError::NotActive` outside the active phase.
    pub fn retreat(&mut self) -> Result<usize, QuizError> {
        self.ensure_active()?;
        if self.position == 0 {
            return Err(QuizError::AtFirstQuestion);
        }
        self.position -= 1;
        Ok(self.position)
    }

    /// Apply the backend's answer to the submission identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleSubmission` when the session is not waiting on
    /// that ticket (abandoned, already resolved, or superseded by a retry).
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<QuizResult, String>,
    ) -> Result<&QuizPhase, QuizError> {
        match self.phase {
            QuizPhase::Submitting { ticket: pending } if pending == ticket => {}
            _ => return Err(QuizError::StaleSubmission),
        }
        self.phase = match outcome {
            Ok(result) => QuizPhase::Completed(result),
            Err(reason) => QuizPhase::Failed { reason },
        };
        Ok(&self.phase)
    }

    /// Resubmit the same answers after a failed attempt.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotActive` unless the last attempt failed.
    pub fn retry_submission(&mut self) -> Result<Submission, QuizError> {
        if !matches!(self.phase, QuizPhase::Failed { .. }) {
            return Err(QuizError::NotActive {
                phase: self.phase.name(),
            });
        }
        Ok(self.begin_submission())
    }

    /// Mark the session as disposed; pending outcomes become stale.
    pub fn abandon(&mut self) {
        if !matches!(self.phase, QuizPhase::Completed(_)) {
            self.phase = QuizPhase::Abandoned;
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("answered", &self.answered_count())
            .field("phase", &self.phase.name())
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, UserProgress};
    use std::collections::BTreeMap;

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Question {id}"),
            ["A".into(), "B".into(), "C".into(), "D".into()],
            Category::ProblemSolving,
        )
        .unwrap()
    }

    fn session(n: usize) -> QuizSession {
        let questions = (1..=n).map(|i| question(&format!("q{i}"))).collect();
        QuizSession::new(questions).unwrap()
    }

    fn result() -> QuizResult {
        QuizResult {
            points_earned: 30,
            progress: UserProgress::new(30, 1),
            recommended_career: "Web Developer".into(),
            roadmap_url: url::Url::parse("https://roadmap.sh/frontend").unwrap(),
            category_scores: BTreeMap::new(),
            confidence: 0.5,
        }
    }

    fn submit_all(quiz: &mut QuizSession) -> Submission {
        loop {
            quiz.select_option(ChoiceKey::A).unwrap();
            if let Advance::ReadyToSubmit(submission) = quiz.advance().unwrap() {
                return submission;
            }
        }
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = QuizSession::new(Vec::new()).unwrap_err();
        assert_eq!(err, QuizError::NoQuestions);
    }

    #[test]
    fn submits_on_nth_advance_and_never_before() {
        let n = 5;
        let mut quiz = session(n);
        for call in 1..=n {
            quiz.select_option(ChoiceKey::B).unwrap();
            let step = quiz.advance().unwrap();
            if call < n {
                assert!(matches!(step, Advance::Moved { position, .. } if position == call));
                assert!(quiz.is_active());
            } else {
                assert!(matches!(step, Advance::ReadyToSubmit(_)));
                assert!(quiz.is_submitting());
            }
        }
    }

    #[test]
    fn advance_without_selection_changes_nothing() {
        let mut quiz = session(3);
        quiz.select_option(ChoiceKey::D).unwrap();
        quiz.advance().unwrap();

        let err = quiz.advance().unwrap_err();
        assert_eq!(err, QuizError::NoOptionSelected);
        assert!(err.is_precondition());
        assert_eq!(quiz.position(), 1);
        assert_eq!(quiz.answers().len(), 1);
        assert!(quiz.is_active());
    }

    #[test]
    fn retreat_then_advance_restores_selection() {
        let mut quiz = session(3);
        quiz.select_option(ChoiceKey::B).unwrap();
        quiz.advance().unwrap();
        quiz.retreat().unwrap();
        assert_eq!(quiz.selected_option(), Some(ChoiceKey::B));

        quiz.select_option(ChoiceKey::B).unwrap();
        let step = quiz.advance().unwrap();
        assert_eq!(
            step,
            Advance::Moved {
                position: 1,
                restored: None
            }
        );

        quiz.select_option(ChoiceKey::C).unwrap();
        quiz.retreat().unwrap();
        let step = quiz.advance().unwrap();
        assert_eq!(
            step,
            Advance::Moved {
                position: 1,
                restored: Some(ChoiceKey::C)
            }
        );
    }

    #[test]
    fn retreat_at_first_question_is_refused() {
        let mut quiz = session(2);
        assert_eq!(quiz.retreat(), Err(QuizError::AtFirstQuestion));
        assert_eq!(quiz.position(), 0);
    }

    #[test]
    fn reselecting_overwrites_in_place() {
        let mut quiz = session(2);
        quiz.select_option(ChoiceKey::A).unwrap();
        quiz.select_option(ChoiceKey::A).unwrap();
        quiz.select_option(ChoiceKey::C).unwrap();
        assert_eq!(quiz.answers(), vec![Answer::new(QuestionId::new("q1"), ChoiceKey::C)]);
    }

    #[test]
    fn answers_never_shrink_while_navigating() {
        let mut quiz = session(4);
        let mut seen = 0;
        for key in [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C] {
            quiz.select_option(key).unwrap();
            quiz.advance().unwrap();
            assert!(quiz.answered_count() >= seen);
            seen = quiz.answered_count();
        }
        while quiz.retreat().is_ok() {
            assert_eq!(quiz.answered_count(), seen);
        }
        assert_eq!(quiz.answer_for(&QuestionId::new("q2")), Some(ChoiceKey::B));
    }

    #[test]
    fn three_question_scenario_submits_full_answer_set() {
        let mut quiz = session(3);
        let mut last = None;
        for key in [ChoiceKey::A, ChoiceKey::C, ChoiceKey::B] {
            quiz.select_option(key).unwrap();
            last = Some(quiz.advance().unwrap());
        }
        let Some(Advance::ReadyToSubmit(submission)) = last else {
            panic!("expected submission");
        };
        assert_eq!(
            submission.answers,
            vec![
                Answer::new(QuestionId::new("q1"), ChoiceKey::A),
                Answer::new(QuestionId::new("q2"), ChoiceKey::C),
                Answer::new(QuestionId::new("q3"), ChoiceKey::B),
            ]
        );
    }

    #[test]
    fn second_advance_while_submitting_is_rejected() {
        let mut quiz = session(1);
        submit_all(&mut quiz);
        let err = quiz.advance().unwrap_err();
        assert_eq!(err, QuizError::NotActive { phase: "submitting" });
        assert!(quiz.select_option(ChoiceKey::D).is_err());
        assert!(quiz.retreat().is_err());
    }

    #[test]
    fn failed_submission_can_be_retried_with_same_answers() {
        let mut quiz = session(2);
        let first = submit_all(&mut quiz);
        quiz.complete_submission(first.ticket, Err("503".into()))
            .unwrap();
        assert!(matches!(quiz.phase(), QuizPhase::Failed { reason } if reason == "503"));

        let retry = quiz.retry_submission().unwrap();
        assert_ne!(retry.ticket, first.ticket);
        assert_eq!(retry.answers, first.answers);

        // The superseded attempt can no longer land.
        assert_eq!(
            quiz.complete_submission(first.ticket, Ok(result())),
            Err(QuizError::StaleSubmission)
        );
        quiz.complete_submission(retry.ticket, Ok(result())).unwrap();
        assert_eq!(quiz.result().map(|r| r.points_earned), Some(30));
    }

    #[test]
    fn completed_session_is_terminal() {
        let mut quiz = session(1);
        let submission = submit_all(&mut quiz);
        quiz.complete_submission(submission.ticket, Ok(result()))
            .unwrap();
        assert!(quiz.retry_submission().is_err());
        assert!(quiz.advance().is_err());
        assert_eq!(
            quiz.complete_submission(submission.ticket, Ok(result())),
            Err(QuizError::StaleSubmission)
        );
    }

    #[test]
    fn abandoned_session_ignores_late_completion() {
        let mut quiz = session(1);
        let submission = submit_all(&mut quiz);
        quiz.abandon();
        assert_eq!(
            quiz.complete_submission(submission.ticket, Ok(result())),
            Err(QuizError::StaleSubmission)
        );
        assert_eq!(quiz.phase(), &QuizPhase::Abandoned);
    }

    #[test]
    fn progress_percent_tracks_position() {
        let mut quiz = session(4);
        assert!((quiz.progress_percent() - 25.0).abs() < f64::EPSILON);
        quiz.select_option(ChoiceKey::A).unwrap();
        quiz.advance().unwrap();
        assert!((quiz.progress_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn raw_choice_keys_are_validated() {
        let mut quiz = session(1);
        assert_eq!(
            quiz.select_option_str("z"),
            Err(QuizError::InvalidChoice("z".into()))
        );
        quiz.select_option_str("C").unwrap();
        assert_eq!(quiz.selected_option(), Some(ChoiceKey::C));
    }
}
