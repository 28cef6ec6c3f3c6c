use std::collections::BTreeMap;

use backend::{Backend, BackendError, InMemoryBackend, ProgressBackend};
use career_core::model::{Category, PointsAward, QuizResult, User, UserId, UserProgress, parse_roadmap_url};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_backend};

struct OfflineProgress;

#[async_trait::async_trait]
impl ProgressBackend for OfflineProgress {
    async fn create_user(&self, _name: &str, _email: &str) -> Result<User, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }

    async fn get_user(&self, _user_id: &UserId) -> Result<User, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }

    async fn add_points(&self, _user_id: &UserId, _points: i64) -> Result<PointsAward, BackendError> {
        Err(BackendError::Transport("offline".to_string()))
    }
}

fn offline_progress_backend() -> Backend {
    let mut backend = Backend::from_in_memory(InMemoryBackend::seeded());
    backend.progress = std::sync::Arc::new(OfflineProgress);
    backend
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_greets_user_with_level() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Sarah Johnson!"), "missing greeting in {html}");
    assert!(html.contains("Level 1 · Explorer"), "missing level in {html}");
    assert!(html.contains("Start Career Quiz"), "missing quiz button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_backend(ViewKind::Home, offline_progress_backend()).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Couldn"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 10"), "missing progress in {html}");
    assert!(html.contains("quiz-option"), "missing options in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_missing_questions() {
    let backend = Backend::from_in_memory(InMemoryBackend::new());
    let mut harness = setup_view_harness_with_backend(ViewKind::Quiz, backend).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("No quiz questions are available yet."),
        "missing empty message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_level_progress() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    harness
        .backend
        .progress
        .add_points(&harness.user_id, 120)
        .await
        .expect("add points");
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("120 points"), "missing points in {html}");
    assert!(html.contains("Seeker"), "missing title in {html}");
    assert!(html.contains("130 points to Pathfinder"), "missing next label in {html}");
    assert!(html.contains("Quiz Master"), "missing badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_result_points_to_quiz() {
    let mut harness = setup_view_harness(ViewKind::Results).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No results yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_recommendation() {
    let mut harness = setup_view_harness(ViewKind::Results).await;
    let mut scores = BTreeMap::new();
    scores.insert(Category::Analytics, 2.0);
    harness.context.set_last_result(QuizResult {
        points_earned: 100,
        progress: UserProgress::new(100, 2).with_badges(["Quiz Master"]),
        recommended_career: "Data Scientist".to_string(),
        roadmap_url: parse_roadmap_url("https://roadmap.sh/ai-data-scientist").unwrap(),
        category_scores: scores,
        confidence: 1.0,
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Data Scientist"), "missing career in {html}");
    assert!(html.contains("+100"), "missing points in {html}");
    assert!(html.contains("Level 2 · Seeker"), "missing level in {html}");
    assert!(html.contains("View Learning Roadmap"), "missing roadmap action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn roadmaps_view_smoke_lists_careers() {
    let mut harness = setup_view_harness(ViewKind::Roadmaps).await;
    harness.settle().await;
    let html = harness.render();
    for career in ["Web Developer", "Data Scientist", "Entrepreneur"] {
        assert!(html.contains(career), "missing {career} in {html}");
    }
    assert!(html.contains("Open in Browser"), "missing browser action in {html}");
    assert!(harness.opener.opened().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_detail_smoke_embeds_roadmap() {
    let mut harness =
        setup_view_harness(ViewKind::RoadmapDetail("Data Scientist".to_string())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("<iframe"), "missing embed in {html}");
    assert!(html.contains("Data Scientist Roadmap"), "missing title in {html}");
    assert!(html.contains("roadmap.sh"), "missing url in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_detail_smoke_handles_unknown_career() {
    let mut harness = setup_view_harness(ViewKind::RoadmapDetail("Astronaut".to_string())).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("There is no roadmap for this career yet."),
        "missing empty state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn roadmap_detail_smoke_falls_back_to_result_link() {
    let mut harness = setup_view_harness(ViewKind::RoadmapDetail("Game Designer".to_string())).await;
    harness.context.set_last_result(QuizResult {
        points_earned: 20,
        progress: UserProgress::new(20, 1),
        recommended_career: "Game Designer".to_string(),
        roadmap_url: parse_roadmap_url("https://roadmap.sh/game-developer").unwrap(),
        category_scores: BTreeMap::new(),
        confidence: 0.5,
    });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("<iframe"), "missing embed in {html}");
    assert!(html.contains("Game Designer Roadmap"), "missing title in {html}");
    assert!(
        html.contains("https://roadmap.sh/game-developer"),
        "missing result url in {html}"
    );
}
