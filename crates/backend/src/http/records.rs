//! JSON shapes exchanged with the REST backend and their domain mappings.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use career_core::model::{
    Answer, Category, PointsAward, Question, QuestionId, QuizResult, Roadmap, RoadmapId, User,
    UserId, UserProgress, parse_roadmap_url,
};

use crate::repository::BackendError;

fn decode<E: core::fmt::Display>(e: E) -> BackendError {
    BackendError::Decode(e.to_string())
}

/// Accepts RFC 3339 and the offset-less ISO form some backends emit (read as UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, BackendError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| BackendError::Decode(format!("invalid timestamp: {raw}")))
}

fn progress_from(total_points: i64, level: u32, badges: Vec<String>) -> UserProgress {
    UserProgress::new(total_points, level).with_badges(badges)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageRecord {
    #[serde(default)]
    pub message: String,
}

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRecord {
    pub id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub category: Category,
}

impl QuestionRecord {
    pub(crate) fn into_question(self) -> Result<Question, BackendError> {
        Question::new(
            QuestionId::new(self.id),
            self.question,
            [self.option_a, self.option_b, self.option_c, self.option_d],
            self.category,
        )
        .map_err(decode)
    }
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub user_id: &'a str,
    pub answers: Vec<AnswerRecord<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerRecord<'a> {
    pub quiz_id: &'a str,
    pub selected_option: &'static str,
}

impl<'a> SubmitRequest<'a> {
    pub(crate) fn new(user_id: &'a UserId, answers: &'a [Answer]) -> Self {
        Self {
            user_id: user_id.as_str(),
            answers: answers
                .iter()
                .map(|answer| AnswerRecord {
                    quiz_id: answer.question_id.as_str(),
                    selected_option: answer.selected.as_str(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub points_earned: i64,
    pub total_points: i64,
    pub level: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub category_scores: BTreeMap<String, f64>,
    pub recommendation: RecommendationRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRecord {
    pub recommended_career: String,
    pub roadmap_url: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Unknown tags share the `Other` bucket, so their scores are summed.
fn fold_category_scores(raw: BTreeMap<String, f64>) -> BTreeMap<Category, f64> {
    let mut folded = BTreeMap::new();
    for (tag, score) in raw {
        *folded.entry(Category::from_tag(&tag)).or_insert(0.0) += score;
    }
    folded
}

impl SubmitResponse {
    pub(crate) fn into_result(self) -> Result<QuizResult, BackendError> {
        let roadmap_url = parse_roadmap_url(&self.recommendation.roadmap_url)
            .map_err(decode)?;
        Ok(QuizResult {
            points_earned: self.points_earned,
            progress: progress_from(self.total_points, self.level, self.badges),
            recommended_career: self.recommendation.recommended_career,
            roadmap_url,
            category_scores: fold_category_scores(self.category_scores),
            confidence: self.recommendation.confidence.clamp(0.0, 1.0),
        })
    }
}

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct NewUserRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    pub created_at: String,
}

fn first_level() -> u32 {
    1
}

impl UserRecord {
    pub(crate) fn into_user(self) -> Result<User, BackendError> {
        Ok(User {
            created_at: parse_timestamp(&self.created_at)?,
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            progress: progress_from(self.points, self.level, self.badges),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddPointsResponse {
    pub points_added: i64,
    pub total_points: i64,
    pub level: u32,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl From<AddPointsResponse> for PointsAward {
    fn from(record: AddPointsResponse) -> Self {
        Self {
            points_added: record.points_added,
            progress: progress_from(record.total_points, record.level, record.badges),
        }
    }
}

//
// ─── ROADMAPS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct RoadmapRecord {
    pub id: String,
    pub skill_role: String,
    pub roadmap_url: String,
    #[serde(default)]
    pub description: String,
}

impl RoadmapRecord {
    pub(crate) fn into_roadmap(self) -> Result<Roadmap, BackendError> {
        Roadmap::new(
            RoadmapId::new(self.id),
            self.skill_role,
            &self.roadmap_url,
            self.description,
        )
        .map_err(decode)
    }
}
