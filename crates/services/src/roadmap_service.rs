use std::sync::Arc;

use tracing::{debug, warn};

use backend::RoadmapBackend;
use career_core::model::Roadmap;

use crate::error::LoadError;

/// Read access to career roadmaps.
#[derive(Clone)]
pub struct RoadmapService {
    roadmaps: Arc<dyn RoadmapBackend>,
}

impl RoadmapService {
    #[must_use]
    pub fn new(roadmaps: Arc<dyn RoadmapBackend>) -> Self {
        Self { roadmaps }
    }

    /// All roadmaps, sorted by career name.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Backend` if the list cannot be fetched.
    pub async fn list_roadmaps(&self) -> Result<Vec<Roadmap>, LoadError> {
        let mut roadmaps = self.roadmaps.list_roadmaps().await.map_err(|err| {
            warn!(error = %err, "failed to load roadmaps");
            LoadError::from(err)
        })?;
        roadmaps.sort_by(|a, b| a.skill_role().cmp(b.skill_role()));
        debug!(count = roadmaps.len(), "loaded roadmaps");
        Ok(roadmaps)
    }

    /// Roadmap for a recommended career, if the backend knows one.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Backend` for transport or decode failures.
    pub async fn roadmap_for_career(&self, career: &str) -> Result<Option<Roadmap>, LoadError> {
        let career = career.trim();
        if career.is_empty() {
            return Ok(None);
        }
        Ok(self.roadmaps.get_roadmap(career).await?)
    }
}
