use dioxus::prelude::*;
use dioxus_router::{Link, Navigator, use_navigator};
use tracing::{debug, warn};

use career_core::Submission;
use career_core::model::ChoiceKey;
use services::SubmissionOutcome;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionVm, QuizIntent, QuizStep, QuizVm, start_quiz};

#[derive(Clone, Debug, PartialEq)]
struct QuizFrame {
    question: String,
    category: &'static str,
    options: Vec<OptionVm>,
    progress_label: String,
    progress_percent: f64,
    can_go_back: bool,
    next_label: &'static str,
    submitting: bool,
    failed: bool,
}

impl QuizFrame {
    fn from_vm(vm: &QuizVm) -> Self {
        Self {
            question: vm.question_text().to_string(),
            category: vm.category().label(),
            options: vm.options(),
            progress_label: vm.progress_label(),
            progress_percent: vm.progress_percent(),
            can_go_back: vm.can_go_back(),
            next_label: vm.next_label(),
            submitting: vm.is_submitting(),
            failed: vm.has_failed(),
        }
    }
}

fn intent_for_key(key: &Key) -> Option<QuizIntent> {
    match key {
        Key::Enter => Some(QuizIntent::Next),
        Key::ArrowLeft | Key::Backspace => Some(QuizIntent::Back),
        Key::Character(value) => {
            let choice = match value.as_str() {
                "1" => ChoiceKey::A,
                "2" => ChoiceKey::B,
                "3" => ChoiceKey::C,
                "4" => ChoiceKey::D,
                other => other.parse::<ChoiceKey>().ok()?,
            };
            Some(QuizIntent::Select(choice))
        }
        _ => None,
    }
}

/// Signals and handlers behind the quiz screen.
#[derive(Clone, Copy)]
pub(crate) struct QuizController {
    pub(crate) vm: Signal<Option<QuizVm>>,
    pub(crate) notice: Signal<Option<ViewError>>,
    pub(crate) dispatch: Callback<QuizIntent>,
    prompt: Signal<Option<ViewError>>,
    resource: Resource<Result<(), ViewError>>,
    navigator: Navigator,
}

pub(crate) fn use_quiz_controller() -> QuizController {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz = ctx.quiz();

    let mut vm = use_signal(|| None::<QuizVm>);
    let prompt = use_signal(|| None::<ViewError>);
    let notice = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let quiz = quiz.clone();
        let mut vm = vm;
        let mut prompt = prompt;
        let mut notice = notice;

        async move {
            let started = start_quiz(&quiz).await?;
            vm.set(Some(started));
            prompt.set(None);
            notice.set(None);
            Ok::<_, ViewError>(())
        }
    });

    // Navigating away disposes the session; an in-flight outcome is then stale.
    use_drop(move || {
        if let Ok(mut guard) = vm.try_write() {
            if let Some(current) = guard.as_mut() {
                current.abandon();
            }
        }
    });

    let submit = use_callback(move |submission: Submission| {
        let quiz = ctx.quiz();
        let user_id = ctx.user_id();
        let ctx = ctx.clone();
        let mut vm = vm;
        let mut notice = notice;

        spawn(async move {
            let ticket = submission.ticket;
            let outcome = quiz.submit(&user_id, &submission).await;
            let applied = {
                let mut guard = vm.write();
                match guard.as_mut() {
                    Some(current) => current.apply_outcome(ticket, outcome),
                    None => SubmissionOutcome::Stale,
                }
            };
            match applied {
                SubmissionOutcome::Completed(result) => {
                    notice.set(None);
                    ctx.set_last_result(result);
                    let _ = navigator.push(Route::Results {});
                }
                SubmissionOutcome::Failed(reason) => {
                    warn!(%reason, "quiz submission failed");
                    notice.set(Some(ViewError::Submit));
                }
                SubmissionOutcome::Stale => {
                    debug!(attempt = ticket.attempt(), "ignoring stale quiz outcome");
                }
            }
        });
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut prompt = prompt;
        let mut notice = notice;

        match intent {
            QuizIntent::Select(key) => {
                if let Some(current) = vm.write().as_mut() {
                    current.select(key);
                }
                prompt.set(None);
            }
            QuizIntent::Back => {
                if let Some(current) = vm.write().as_mut() {
                    current.retreat();
                }
                prompt.set(None);
            }
            QuizIntent::Next => {
                let step = vm.write().as_mut().map(QuizVm::advance);
                match step {
                    Some(Ok(QuizStep::Submit(submission))) => {
                        prompt.set(None);
                        submit.call(submission);
                    }
                    Some(Ok(QuizStep::Stay)) => prompt.set(None),
                    Some(Err(err)) => prompt.set(Some(err)),
                    None => {}
                }
            }
            QuizIntent::Retry => {
                let retried = vm.write().as_mut().map(QuizVm::retry);
                if let Some(Ok(submission)) = retried {
                    notice.set(None);
                    submit.call(submission);
                }
            }
        }
    });

    QuizController {
        vm,
        notice,
        dispatch,
        prompt,
        resource,
        navigator,
    }
}

#[component]
pub fn QuizView() -> Element {
    quiz_screen(use_quiz_controller())
}

pub(crate) fn quiz_screen(controller: QuizController) -> Element {
    let QuizController {
        vm,
        notice,
        dispatch,
        prompt,
        resource,
        navigator,
    } = controller;
    let state = view_state_from_resource(&resource);

    let frame = vm.read().as_ref().map(QuizFrame::from_vm);
    let prompt_message = (*prompt.read()).map(ViewError::message);
    let notice_error = *notice.read();

    rsx! {
        div {
            class: "page quiz-page",
            id: "quiz-root",
            tabindex: "0",
            onkeydown: move |evt: KeyboardEvent| {
                if evt.data.key() == Key::Escape {
                    evt.prevent_default();
                    let _ = navigator.push(Route::Home {});
                    return;
                }
                if let Some(intent) = intent_for_key(&evt.data.key()) {
                    evt.prevent_default();
                    dispatch.call(intent);
                }
            },
            header { class: "quiz-header",
                h2 { "Career Aptitude Quiz" }
                button {
                    class: "btn btn-ghost",
                    id: "quiz-quit",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Quit"
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading questions..." }
                },
                ViewState::Error(ViewError::NoQuestions) => rsx! {
                    p { "{ViewError::NoQuestions.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Back to Home" }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = notice_error {
                        div { class: "notice", role: "alert",
                            p { "{err.message()}" }
                            button {
                                class: "btn btn-secondary",
                                id: "quiz-retry",
                                r#type: "button",
                                onclick: move |_| dispatch.call(QuizIntent::Retry),
                                "Retry"
                            }
                            button {
                                class: "btn btn-ghost",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut notice = notice;
                                    notice.set(None);
                                },
                                "Dismiss"
                            }
                        }
                    }
                    if let Some(frame) = frame {
                        QuestionCard { frame, prompt: prompt_message, on_intent: dispatch }
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionCard(
    frame: QuizFrame,
    prompt: Option<&'static str>,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let locked = frame.submitting || frame.failed;
    let percent = format!("{:.0}", frame.progress_percent);

    rsx! {
        div { class: "quiz-progress",
            span { class: "quiz-progress__label", "{frame.progress_label}" }
            div { class: "progress",
                div { class: "progress__fill", style: "width: {percent}%" }
            }
        }
        section { class: "quiz-card",
            span { class: "quiz-card__category", "{frame.category}" }
            h3 { class: "quiz-card__question", "{frame.question}" }
            ul { class: "quiz-options",
                for option in frame.options.iter().cloned() {
                    li { key: "{option.label}",
                        button {
                            class: if option.selected { "quiz-option quiz-option--selected" } else { "quiz-option" },
                            r#type: "button",
                            disabled: locked,
                            aria_pressed: "{option.selected}",
                            onclick: move |_| on_intent.call(QuizIntent::Select(option.key)),
                            span { class: "quiz-option__key", "{option.label}" }
                            span { class: "quiz-option__text", "{option.text}" }
                        }
                    }
                }
            }
            if let Some(message) = prompt {
                p { class: "quiz-prompt", role: "status", "{message}" }
            }
        }
        footer { class: "quiz-footer",
            button {
                class: "btn btn-secondary",
                id: "quiz-back",
                r#type: "button",
                disabled: !frame.can_go_back,
                onclick: move |_| on_intent.call(QuizIntent::Back),
                "Previous"
            }
            if frame.submitting {
                span { class: "quiz-footer__status", "Submitting your answers..." }
            }
            button {
                class: "btn btn-primary",
                id: "quiz-next",
                r#type: "button",
                disabled: locked,
                onclick: move |_| on_intent.call(QuizIntent::Next),
                "{frame.next_label}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_and_letter_keys_select_options() {
        assert_eq!(
            intent_for_key(&Key::Character("2".into())),
            Some(QuizIntent::Select(ChoiceKey::B))
        );
        assert_eq!(
            intent_for_key(&Key::Character("D".into())),
            Some(QuizIntent::Select(ChoiceKey::D))
        );
        assert_eq!(intent_for_key(&Key::Character("x".into())), None);
        assert_eq!(intent_for_key(&Key::Enter), Some(QuizIntent::Next));
        assert_eq!(intent_for_key(&Key::ArrowLeft), Some(QuizIntent::Back));
    }
}
