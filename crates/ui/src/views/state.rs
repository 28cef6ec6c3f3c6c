use dioxus::prelude::*;

use services::{LoadError, ProgressError, SubmitError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// Backend unreachable or returned an unusable list.
    Load,
    NoQuestions,
    /// Advance attempted without an answer; shown inline, not as a notice.
    NoSelection,
    Submit,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::Load => "Couldn't reach the career service. Check your connection and retry.",
            ViewError::NoQuestions => "No quiz questions are available yet.",
            ViewError::NoSelection => "Pick an answer to continue.",
            ViewError::Submit => {
                "We couldn't submit your answers. Your choices are kept, so you can retry."
            }
        }
    }

    /// Errors rendered as a dismissable notice with a Retry action.
    #[must_use]
    pub fn is_notice(self) -> bool {
        matches!(self, ViewError::Load | ViewError::Submit | ViewError::Unknown)
    }
}

impl From<LoadError> for ViewError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Empty => ViewError::NoQuestions,
            _ => ViewError::Load,
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::Backend(_) => ViewError::Load,
            _ => ViewError::Unknown,
        }
    }
}

impl From<SubmitError> for ViewError {
    fn from(_: SubmitError) -> Self {
        ViewError::Submit
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
