use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::RoadmapId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoadmapError {
    #[error("skill role cannot be empty")]
    EmptySkillRole,

    #[error("invalid roadmap url: {0}")]
    InvalidUrl(String),

    #[error("roadmap url must use http or https: {0}")]
    UnsupportedScheme(String),
}

/// Parse a roadmap link, accepting only absolute http(s) URLs.
///
/// # Errors
///
/// Returns `RoadmapError::InvalidUrl` or `RoadmapError::UnsupportedScheme`.
pub fn parse_roadmap_url(raw: &str) -> Result<Url, RoadmapError> {
    let url = Url::parse(raw.trim()).map_err(|_| RoadmapError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(RoadmapError::UnsupportedScheme(raw.to_string())),
    }
}

/// External learning path for a career.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    id: RoadmapId,
    skill_role: String,
    url: Url,
    description: String,
}

impl Roadmap {
    /// # Errors
    ///
    /// Returns `RoadmapError` when the role is blank or the url is not http(s).
    pub fn new(
        id: RoadmapId,
        skill_role: impl Into<String>,
        url: &str,
        description: impl Into<String>,
    ) -> Result<Self, RoadmapError> {
        let skill_role = skill_role.into();
        if skill_role.trim().is_empty() {
            return Err(RoadmapError::EmptySkillRole);
        }
        Ok(Self {
            id,
            skill_role,
            url: parse_roadmap_url(url)?,
            description: description.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &RoadmapId {
        &self.id
    }

    #[must_use]
    pub fn skill_role(&self) -> &str {
        &self.skill_role
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Case-insensitive match against a career name.
    #[must_use]
    pub fn is_for(&self, career: &str) -> bool {
        self.skill_role.eq_ignore_ascii_case(career.trim())
    }
}
