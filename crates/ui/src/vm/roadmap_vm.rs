use career_core::model::{QuizResult, Roadmap};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadmapCardVm {
    pub career: String,
    pub description: String,
    pub url: String,
    pub host: String,
}

impl From<&Roadmap> for RoadmapCardVm {
    fn from(roadmap: &Roadmap) -> Self {
        Self {
            career: roadmap.skill_role().to_string(),
            description: roadmap.description().to_string(),
            url: roadmap.url().to_string(),
            host: roadmap.url().host_str().unwrap_or_default().to_string(),
        }
    }
}

impl RoadmapCardVm {
    /// Card for the roadmap link returned with a quiz result.
    #[must_use]
    pub fn for_result(result: &QuizResult) -> Self {
        Self {
            career: result.recommended_career.trim().to_string(),
            description: String::new(),
            url: result.roadmap_url.to_string(),
            host: result.roadmap_url.host_str().unwrap_or_default().to_string(),
        }
    }
}

/// The last result's roadmap, when it was recommended for `career`.
#[must_use]
pub fn result_roadmap_for(career: &str, result: Option<&QuizResult>) -> Option<RoadmapCardVm> {
    result
        .filter(|result| {
            result
                .recommended_career
                .trim()
                .eq_ignore_ascii_case(career.trim())
        })
        .map(RoadmapCardVm::for_result)
}

/// Which roadmap pane is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RoadmapPane {
    #[default]
    Browse,
    Embedded(RoadmapCardVm),
}

#[must_use]
pub fn map_roadmap_cards(roadmaps: &[Roadmap]) -> Vec<RoadmapCardVm> {
    roadmaps.iter().map(RoadmapCardVm::from).collect()
}
