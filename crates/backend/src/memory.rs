//! In-process backend used by tests and offline demo runs.
//!
//! Scoring here is a stand-in: it mirrors the response shape of the real
//! service, not its recommendation algorithm.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use career_core::LevelTable;
use career_core::model::{
    Answer, Category, ChoiceKey, PointsAward, Question, QuestionId, QuizResult, Roadmap,
    RoadmapId, User, UserId, UserProgress, parse_roadmap_url,
};

use crate::repository::{BackendError, ProgressBackend, QuizBackend, RoadmapBackend};

pub const POINTS_PER_ANSWER: i64 = 10;
pub const QUIZ_MASTER_BADGE: &str = "Quiz Master";
pub const QUIZ_MASTER_THRESHOLD: i64 = 50;

#[derive(Default)]
struct State {
    questions: Vec<(Question, ChoiceKey)>,
    roadmaps: Vec<Roadmap>,
    users: HashMap<UserId, User>,
}

/// Simple in-memory backend implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
    levels: Arc<LevelTable>,
}

impl InMemoryBackend {
    /// Empty backend: no questions, roadmaps or users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend preloaded with the sample quiz and the five career roadmaps.
    #[must_use]
    pub fn seeded() -> Self {
        let backend = Self::new();
        for (question, correct) in sample_questions() {
            backend.insert_question(question, correct);
        }
        for roadmap in sample_roadmaps() {
            backend.insert_roadmap(roadmap);
        }
        backend
    }

    // Writers never panic mid-update, so a poisoned guard still holds usable state.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a question together with the option the scorer treats as strongest.
    pub fn insert_question(&self, question: Question, correct: ChoiceKey) {
        self.lock().questions.push((question, correct));
    }

    pub fn insert_roadmap(&self, roadmap: Roadmap) {
        self.lock().roadmaps.push(roadmap);
    }

    fn credit(&self, user: &mut User, points: i64) {
        let progress = &mut user.progress;
        progress.total_points = progress.total_points.saturating_add(points);
        progress.level = self.levels.tier_for_points(progress.total_points).level;
        if progress.total_points >= QUIZ_MASTER_THRESHOLD {
            progress.badges.insert(QUIZ_MASTER_BADGE.to_string());
        }
    }
}

fn career_for(category: Category) -> &'static str {
    match category {
        Category::ProblemSolving => "Web Developer",
        Category::Creativity => "Flutter Developer",
        Category::Analytics => "Data Scientist",
        Category::Leadership | Category::Communication => "Entrepreneur",
        Category::Other => "Cybersecurity Specialist",
    }
}

#[async_trait]
impl QuizBackend for InMemoryBackend {
    async fn load_questions(&self) -> Result<Vec<Question>, BackendError> {
        let guard = self.lock();
        Ok(guard.questions.iter().map(|(q, _)| q.clone()).collect())
    }

    async fn submit_answers(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<QuizResult, BackendError> {
        let mut guard = self.lock();

        let mut category_scores: BTreeMap<Category, f64> = BTreeMap::new();
        for (question, correct) in &guard.questions {
            let entry = category_scores.entry(question.category()).or_insert(0.0);
            let picked = answers
                .iter()
                .find(|answer| &answer.question_id == question.id())
                .map(|answer| answer.selected);
            if picked == Some(*correct) {
                *entry += 1.0;
            }
        }

        let total_score: f64 = category_scores.values().sum();
        let (top_category, top_score) = category_scores
            .iter()
            .fold((Category::Other, 0.0_f64), |best, (category, score)| {
                if *score > best.1 {
                    (*category, *score)
                } else {
                    best
                }
            });
        let career = career_for(top_category);
        let roadmap_url = guard
            .roadmaps
            .iter()
            .find(|roadmap| roadmap.is_for(career))
            .map(|roadmap| roadmap.url().clone())
            .map_or_else(|| parse_roadmap_url("https://roadmap.sh"), Ok)
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let points_earned = POINTS_PER_ANSWER * i64::try_from(answers.len()).unwrap_or(0);
        let user = guard.users.get_mut(user_id).ok_or(BackendError::NotFound)?;
        self.credit(user, points_earned);

        Ok(QuizResult {
            points_earned,
            progress: user.progress.clone(),
            recommended_career: career.to_string(),
            roadmap_url,
            category_scores,
            confidence: if total_score > 0.0 {
                top_score / total_score
            } else {
                0.0
            },
        })
    }
}

#[async_trait]
impl ProgressBackend for InMemoryBackend {
    async fn create_user(&self, name: &str, email: &str) -> Result<User, BackendError> {
        let user = User {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            name: name.to_string(),
            email: email.to_string(),
            progress: UserProgress::new(0, 1),
            created_at: Utc::now(),
        };
        let mut guard = self.lock();
        guard.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, BackendError> {
        let guard = self.lock();
        guard.users.get(user_id).cloned().ok_or(BackendError::NotFound)
    }

    async fn add_points(&self, user_id: &UserId, points: i64) -> Result<PointsAward, BackendError> {
        let mut guard = self.lock();
        let user = guard.users.get_mut(user_id).ok_or(BackendError::NotFound)?;
        self.credit(user, points);
        Ok(PointsAward {
            points_added: points,
            progress: user.progress.clone(),
        })
    }
}

#[async_trait]
impl RoadmapBackend for InMemoryBackend {
    async fn list_roadmaps(&self) -> Result<Vec<Roadmap>, BackendError> {
        let guard = self.lock();
        Ok(guard.roadmaps.clone())
    }

    async fn get_roadmap(&self, career: &str) -> Result<Option<Roadmap>, BackendError> {
        let guard = self.lock();
        Ok(guard.roadmaps.iter().find(|r| r.is_for(career)).cloned())
    }
}

//
// ─── FIXTURES ──────────────────────────────────────────────────────────────────
//

fn fixture_question(
    id: &str,
    text: &str,
    options: [&str; 4],
    category: Category,
) -> Option<Question> {
    Question::new(
        QuestionId::new(id),
        text,
        options.map(str::to_string),
        category,
    )
    .ok()
}

/// Ten questions, two per aptitude category.
#[must_use]
pub fn sample_questions() -> Vec<(Question, ChoiceKey)> {
    use Category::{Analytics, Communication, Creativity, Leadership, ProblemSolving};
    use ChoiceKey::{A, B, C, D};

    let specs: [(&str, &str, [&str; 4], Category, ChoiceKey); 10] = [
        (
            "q1",
            "A program you wrote crashes on launch. What do you do first?",
            ["Rewrite it", "Read the error and reproduce it", "Ask a friend", "Give up"],
            ProblemSolving,
            B,
        ),
        (
            "q2",
            "Which puzzle sounds most fun?",
            ["Sudoku", "Crossword", "Logic grid", "Jigsaw"],
            ProblemSolving,
            C,
        ),
        (
            "q3",
            "You get a blank canvas and a free afternoon. You...",
            ["Sketch an app idea", "Leave it blank", "Look up tutorials", "Paint a copy"],
            Creativity,
            A,
        ),
        (
            "q4",
            "Which school project did you enjoy most?",
            ["Essay", "Poster design", "Exam prep", "Lab report"],
            Creativity,
            B,
        ),
        (
            "q5",
            "Your group project has no plan. You...",
            ["Wait", "Do it alone", "Split tasks and set deadlines", "Complain"],
            Leadership,
            C,
        ),
        (
            "q6",
            "A teammate keeps missing deadlines. You...",
            ["Ignore it", "Report them", "Do their part", "Talk and offer help"],
            Leadership,
            D,
        ),
        (
            "q7",
            "Which would you rather explore?",
            ["A spreadsheet of sales", "A novel", "A painting", "A speech"],
            Analytics,
            A,
        ),
        (
            "q8",
            "A chart looks wrong. You...",
            ["Trust it", "Check the source data", "Delete it", "Change colours"],
            Analytics,
            B,
        ),
        (
            "q9",
            "How do you explain a hard idea to a friend?",
            ["Use jargon", "Send a link", "Use an everyday example", "Skip it"],
            Communication,
            C,
        ),
        (
            "q10",
            "In a debate you usually...",
            ["Stay quiet", "Interrupt", "Agree with everyone", "Listen, then respond"],
            Communication,
            D,
        ),
    ];

    specs
        .into_iter()
        .filter_map(|(id, text, options, category, correct)| {
            fixture_question(id, text, options, category).map(|q| (q, correct))
        })
        .collect()
}

/// Roadmaps for the five careers the backend recommends.
#[must_use]
pub fn sample_roadmaps() -> Vec<Roadmap> {
    [
        (
            "rm-web",
            "Web Developer",
            "https://roadmap.sh/full-stack",
            "HTML, CSS, JavaScript, a backend language and deployment.",
        ),
        (
            "rm-flutter",
            "Flutter Developer",
            "https://roadmap.sh/flutter",
            "Dart, widgets, state management and publishing mobile apps.",
        ),
        (
            "rm-data",
            "Data Scientist",
            "https://roadmap.sh/ai-data-scientist",
            "Statistics, Python, machine learning and data storytelling.",
        ),
        (
            "rm-security",
            "Cybersecurity Specialist",
            "https://roadmap.sh/cyber-security",
            "Networking, operating systems, threat analysis and defence.",
        ),
        (
            "rm-founder",
            "Entrepreneur",
            "https://roadmap.sh/product-manager",
            "Product thinking, customer research and leading a team.",
        ),
    ]
    .into_iter()
    .filter_map(|(id, role, url, description)| {
        Roadmap::new(RoadmapId::new(id), role, url, description).ok()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_cover_every_category() {
        let questions = sample_questions();
        assert_eq!(questions.len(), 10);
        for category in [
            Category::ProblemSolving,
            Category::Creativity,
            Category::Leadership,
            Category::Analytics,
            Category::Communication,
        ] {
            assert!(questions.iter().any(|(q, _)| q.category() == category));
        }
        assert_eq!(sample_roadmaps().len(), 5);
    }

    #[tokio::test]
    async fn inserts_survive_a_poisoned_lock() {
        let backend = InMemoryBackend::new();
        let shared = backend.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.state.lock().unwrap();
            panic!("writer died");
        })
        .join();
        assert!(backend.state.is_poisoned());

        for roadmap in sample_roadmaps() {
            backend.insert_roadmap(roadmap);
        }
        let (question, correct) = sample_questions().remove(0);
        backend.insert_question(question, correct);

        assert_eq!(backend.list_roadmaps().await.unwrap().len(), 5);
        assert_eq!(backend.load_questions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn analytics_answers_recommend_data_scientist() {
        let backend = InMemoryBackend::seeded();
        let user = backend.create_user("Ada", "ada@example.com").await.unwrap();
        let questions = sample_questions();
        let answers: Vec<Answer> = questions
            .iter()
            .map(|(q, correct)| {
                let pick = if q.category() == Category::Analytics {
                    *correct
                } else {
                    ChoiceKey::ALL
                        .into_iter()
                        .find(|key| key != correct)
                        .unwrap()
                };
                Answer::new(q.id().clone(), pick)
            })
            .collect();

        let result = backend.submit_answers(&user.id, &answers).await.unwrap();
        assert_eq!(result.recommended_career, "Data Scientist");
        assert_eq!(result.points_earned, 100);
        assert_eq!(result.level(), 2);
        assert!(result.progress.has_badge(QUIZ_MASTER_BADGE));
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn add_points_awards_badge_at_threshold() {
        let backend = InMemoryBackend::seeded();
        let user = backend.create_user("Sam", "sam@example.com").await.unwrap();

        let award = backend.add_points(&user.id, 40).await.unwrap();
        assert!(!award.progress.has_badge(QUIZ_MASTER_BADGE));

        let award = backend.add_points(&user.id, 10).await.unwrap();
        assert_eq!(award.points_added, 10);
        assert_eq!(award.progress.total_points, 50);
        assert!(award.progress.has_badge(QUIZ_MASTER_BADGE));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let backend = InMemoryBackend::seeded();
        let err = backend
            .add_points(&UserId::new("ghost"), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }
}
