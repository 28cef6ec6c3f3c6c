mod ids;
mod progress;
mod question;
mod result;
mod roadmap;

pub use ids::{ParseIdError, QuestionId, RoadmapId, UserId};
pub use progress::{PointsAward, User, UserProgress};
pub use question::{Answer, Category, ChoiceKey, ParseChoiceKeyError, Question, QuestionError};
pub use result::QuizResult;
pub use roadmap::{Roadmap, RoadmapError, parse_roadmap_url};
