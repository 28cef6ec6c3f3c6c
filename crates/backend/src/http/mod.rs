use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use career_core::model::{Answer, PointsAward, Question, QuizResult, Roadmap, User, UserId};

use crate::config::BackendConfig;
use crate::repository::{BackendError, ProgressBackend, QuizBackend, RoadmapBackend};

mod records;

use records::{
    AddPointsResponse, MessageRecord, NewUserRequest, QuestionRecord, RoadmapRecord,
    SubmitRequest, SubmitResponse, UserRecord,
};

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// REST client for the career backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `BackendError::Connection` if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Ping the API root.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<String, BackendError> {
        let response = self.client.get(self.config.endpoint("/")).send().await?;
        let record: MessageRecord = read_json(response).await?;
        Ok(record.message)
    }

    /// Ask the backend to (re)seed its sample questions and roadmaps.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on any non-success response.
    pub async fn init_data(&self) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.config.endpoint("/init-data"))
            .send()
            .await?;
        let record: MessageRecord = read_json(response).await?;
        Ok(record.message)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "backend request failed");
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl QuizBackend for HttpBackend {
    async fn load_questions(&self) -> Result<Vec<Question>, BackendError> {
        let response = self
            .client
            .get(self.config.endpoint("/quizzes"))
            .send()
            .await?;
        let records: Vec<QuestionRecord> = read_json(response).await?;
        debug!(count = records.len(), "loaded quiz questions");
        records
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect()
    }

    async fn submit_answers(
        &self,
        user_id: &UserId,
        answers: &[Answer],
    ) -> Result<QuizResult, BackendError> {
        let response = self
            .client
            .post(self.config.endpoint("/submit-quiz"))
            .json(&SubmitRequest::new(user_id, answers))
            .send()
            .await?;
        let record: SubmitResponse = read_json(response).await?;
        record.into_result()
    }
}

#[async_trait]
impl ProgressBackend for HttpBackend {
    async fn create_user(&self, name: &str, email: &str) -> Result<User, BackendError> {
        let response = self
            .client
            .post(self.config.endpoint("/users"))
            .json(&NewUserRequest { name, email })
            .send()
            .await?;
        let record: UserRecord = read_json(response).await?;
        record.into_user()
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, BackendError> {
        let response = self
            .client
            .get(self.config.endpoint(&format!("/users/{user_id}")))
            .send()
            .await?;
        let record: UserRecord = read_json(response).await?;
        record.into_user()
    }

    async fn add_points(&self, user_id: &UserId, points: i64) -> Result<PointsAward, BackendError> {
        let response = self
            .client
            .post(self.config.endpoint(&format!("/users/{user_id}/add-points")))
            .query(&[("points", points)])
            .send()
            .await?;
        let record: AddPointsResponse = read_json(response).await?;
        Ok(record.into())
    }
}

#[async_trait]
impl RoadmapBackend for HttpBackend {
    async fn list_roadmaps(&self) -> Result<Vec<Roadmap>, BackendError> {
        let response = self
            .client
            .get(self.config.endpoint("/roadmaps"))
            .send()
            .await?;
        let records: Vec<RoadmapRecord> = read_json(response).await?;
        records
            .into_iter()
            .map(RoadmapRecord::into_roadmap)
            .collect()
    }

    async fn get_roadmap(&self, career: &str) -> Result<Option<Roadmap>, BackendError> {
        let mut url = reqwest::Url::parse(&self.config.endpoint("/roadmaps"))
            .map_err(|e| BackendError::Connection(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| BackendError::Connection("base url cannot hold a path".into()))?
            .push(career.trim());
        let response = self.client.get(url).send().await?;
        match read_json::<RoadmapRecord>(response).await {
            Ok(record) => record.into_roadmap().map(Some),
            Err(BackendError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
