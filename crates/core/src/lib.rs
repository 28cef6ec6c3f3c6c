#![forbid(unsafe_code)]

pub mod level;
pub mod model;
pub mod quiz;

pub use level::{LevelStatus, LevelTable, LevelTableError, LevelTier};
pub use quiz::{Advance, QuizError, QuizPhase, QuizSession, Submission, SubmissionTicket};
