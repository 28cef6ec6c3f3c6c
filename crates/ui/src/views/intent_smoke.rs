use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use backend::memory::{sample_questions, sample_roadmaps};
use backend::{Backend, BackendError, InMemoryBackend, QuizBackend};
use career_core::model::{Answer, ChoiceKey, Question, QuizResult, UserId};
use dioxus::prelude::*;
use services::EXPLORATION_POINTS;
use tokio::sync::Notify;

use crate::vm::{QuizIntent, QuizVm, RoadmapCardVm, RoadmapPane};

use super::ViewError;
use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_backend};

/// Rejects the first submission with a 503, then scores normally.
struct FlakyQuiz {
    inner: InMemoryBackend,
    rejected: AtomicBool,
}

#[async_trait]
impl QuizBackend for FlakyQuiz {
    async fn load_questions(&self) -> Result<Vec<Question>, BackendError> {
        self.inner.load_questions().await
    }

    async fn submit_answers(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<QuizResult, BackendError> {
        if !self.rejected.swap(true, Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 503,
                body: "overloaded".to_string(),
            });
        }
        self.inner.submit_answers(user_id, answers).await
    }
}

/// Holds every submission until the gate opens.
struct GatedQuiz {
    inner: InMemoryBackend,
    gate: Arc<Notify>,
}

#[async_trait]
impl QuizBackend for GatedQuiz {
    async fn load_questions(&self) -> Result<Vec<Question>, BackendError> {
        self.inner.load_questions().await
    }

    async fn submit_answers(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<QuizResult, BackendError> {
        self.gate.notified().await;
        self.inner.submit_answers(user_id, answers).await
    }
}

fn two_question_repo() -> InMemoryBackend {
    let repo = InMemoryBackend::new();
    for (question, correct) in sample_questions().into_iter().take(2) {
        repo.insert_question(question, correct);
    }
    for roadmap in sample_roadmaps() {
        repo.insert_roadmap(roadmap);
    }
    repo
}

fn backend_with_quiz(repo: &InMemoryBackend, quiz: Arc<dyn QuizBackend>) -> Backend {
    let mut backend = Backend::from_in_memory(repo.clone());
    backend.quiz = quiz;
    backend
}

async fn answer_every_question(harness: &mut ViewHarness, count: usize) {
    let quiz = harness.handles.quiz();
    for _ in 0..count {
        harness
            .act(|| {
                quiz.dispatch.call(QuizIntent::Select(ChoiceKey::A));
                quiz.dispatch.call(QuizIntent::Next);
            })
            .await;
    }
}

async fn total_points(harness: &ViewHarness) -> i64 {
    harness
        .backend
        .progress
        .get_user(&harness.user_id)
        .await
        .expect("user exists")
        .progress
        .total_points
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_smoke_failed_submit_then_retry() {
    let repo = two_question_repo();
    let flaky = Arc::new(FlakyQuiz {
        inner: repo.clone(),
        rejected: AtomicBool::new(false),
    });
    let mut harness =
        setup_view_harness_with_backend(ViewKind::Quiz, backend_with_quiz(&repo, flaky)).await;
    harness.settle().await;
    assert!(harness.render().contains("Question 1 of 2"));

    answer_every_question(&mut harness, 2).await;

    let quiz = harness.handles.quiz();
    let html = harness.render();
    assert!(html.contains("We couldn"), "missing submit notice in {html}");
    assert!(html.contains("quiz-retry"), "missing retry action in {html}");
    assert!(harness.context.last_result().is_none());
    let failed = harness
        .dom
        .in_runtime(|| quiz.vm.peek().as_ref().map(QuizVm::has_failed));
    assert_eq!(failed, Some(true));
    assert_eq!(
        harness.dom.in_runtime(|| *quiz.notice.peek()),
        Some(ViewError::Submit)
    );
    assert_eq!(total_points(&harness).await, 0);

    harness.act(|| quiz.dispatch.call(QuizIntent::Retry)).await;

    let result = harness.context.last_result().expect("result stored after retry");
    assert_eq!(result.points_earned, 20);
    let html = harness.render();
    assert!(html.contains("navigated to /results"), "no navigation in {html}");
    assert_eq!(total_points(&harness).await, 20);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_intents_smoke_drop_outcome_after_abandon() {
    let repo = two_question_repo();
    let gate = Arc::new(Notify::new());
    let gated = Arc::new(GatedQuiz {
        inner: repo.clone(),
        gate: Arc::clone(&gate),
    });
    let mut harness =
        setup_view_harness_with_backend(ViewKind::Quiz, backend_with_quiz(&repo, gated)).await;
    harness.settle().await;

    answer_every_question(&mut harness, 2).await;
    let quiz = harness.handles.quiz();
    assert!(harness.render().contains("Submitting your answers"));

    harness
        .act(|| {
            let mut vm = quiz.vm;
            if let Some(current) = vm.write().as_mut() {
                current.abandon();
            }
        })
        .await;
    gate.notify_one();
    harness.drive_async().await;
    harness.drive_async().await;

    assert!(harness.context.last_result().is_none());
    assert_eq!(harness.dom.in_runtime(|| *quiz.notice.peek()), None);
    let html = harness.render();
    assert!(!html.contains("navigated"), "stale outcome navigated: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_intents_smoke_embed_credit_and_browse() {
    let mut harness = setup_view_harness(ViewKind::Roadmaps).await;
    harness.settle().await;

    let roadmap = harness
        .backend
        .roadmaps
        .get_roadmap("Web Developer")
        .await
        .expect("lookup")
        .expect("seeded roadmap");
    let card = RoadmapCardVm::from(&roadmap);
    let browser = harness.handles.roadmaps();

    harness.act(|| browser.open.call(card.clone())).await;

    let html = harness.render();
    assert!(html.contains("<iframe"), "missing embed in {html}");
    assert!(html.contains("Web Developer Roadmap"), "missing title in {html}");
    assert!(html.contains(&card.url), "missing url in {html}");
    let pane = harness.dom.in_runtime(|| browser.pane.peek().clone());
    assert_eq!(pane, RoadmapPane::Embedded(card.clone()));
    assert_eq!(total_points(&harness).await, EXPLORATION_POINTS);

    harness.act(|| browser.browse.call(card.url.clone())).await;
    assert_eq!(harness.opener.opened(), vec![card.url.clone()]);

    harness.act(|| browser.close.call(())).await;
    let html = harness.render();
    assert!(!html.contains("<iframe"), "embed still shown in {html}");
    assert!(html.contains("Career Roadmaps"), "missing list in {html}");
}
