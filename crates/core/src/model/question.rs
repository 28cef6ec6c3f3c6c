use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── CHOICE KEYS ───────────────────────────────────────────────────────────────
//

/// One of the four fixed answer labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub const ALL: [ChoiceKey; 4] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C, ChoiceKey::D];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChoiceKey::A => "a",
            ChoiceKey::B => "b",
            ChoiceKey::C => "c",
            ChoiceKey::D => "d",
        }
    }

    const fn index(self) -> usize {
        match self {
            ChoiceKey::A => 0,
            ChoiceKey::B => 1,
            ChoiceKey::C => 2,
            ChoiceKey::D => 3,
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown choice key: {0:?} (expected a, b, c or d)")]
pub struct ParseChoiceKeyError(pub String);

impl FromStr for ChoiceKey {
    type Err = ParseChoiceKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(ChoiceKey::A),
            "b" => Ok(ChoiceKey::B),
            "c" => Ok(ChoiceKey::C),
            "d" => Ok(ChoiceKey::D),
            _ => Err(ParseChoiceKeyError(s.to_string())),
        }
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Aptitude area a question measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ProblemSolving,
    Creativity,
    Leadership,
    Analytics,
    Communication,
    #[serde(other)]
    Other,
}

impl Category {
    /// Map a backend tag to a category; unrecognized tags become `Other`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "problem_solving" => Category::ProblemSolving,
            "creativity" => Category::Creativity,
            "leadership" => Category::Leadership,
            "analytics" => Category::Analytics,
            "communication" => Category::Communication,
            _ => Category::Other,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::ProblemSolving => "Problem solving",
            Category::Creativity => "Creativity",
            Category::Leadership => "Leadership",
            Category::Analytics => "Analytics",
            Category::Communication => "Communication",
            Category::Other => "General",
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("option {0} cannot be empty")]
    EmptyOption(ChoiceKey),
}

/// A multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [String; 4],
    category: Category,
}

impl Question {
    /// Build a validated question.
    ///
    /// `options` are given in `a, b, c, d` order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::EmptyOption` when
    /// the question or one of its options is blank.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: [String; 4],
        category: Category,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        for key in ChoiceKey::ALL {
            if options[key.index()].trim().is_empty() {
                return Err(QuestionError::EmptyOption(key));
            }
        }
        Ok(Self {
            id,
            text,
            options,
            category,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn option(&self, key: ChoiceKey) -> &str {
        &self.options[key.index()]
    }

    /// Options paired with their keys, in display order.
    pub fn options(&self) -> impl Iterator<Item = (ChoiceKey, &str)> {
        ChoiceKey::ALL
            .into_iter()
            .map(move |key| (key, self.option(key)))
    }
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// The option picked for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub selected: ChoiceKey,
}

impl Answer {
    #[must_use]
    pub fn new(question_id: QuestionId, selected: ChoiceKey) -> Self {
        Self {
            question_id,
            selected,
        }
    }
}
