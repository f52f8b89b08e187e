use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::{DayOfWeek, ExerciseDraft, ExerciseRecord, MuscleGroup};

const EXERCISES_PATH: &str = "/api/exercises";
const HEALTH_PATH: &str = "/health";

/// The remote call an [`ApiError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ApiOperation {
    #[strum(serialize = "list exercises")]
    List,
    #[strum(serialize = "create exercise")]
    Create,
    #[strum(serialize = "update exercise")]
    Update,
    #[strum(serialize = "delete exercise")]
    Delete,
    #[strum(serialize = "health check")]
    HealthCheck,
}

/// Every way a remote operation can fail. Non-2xx statuses and transport
/// failures are both reported here; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{operation} failed: server returned status {status}")]
    Status {
        operation: ApiOperation,
        status: u16,
        body: String,
    },
    #[error("{operation} failed: could not reach server: {message}")]
    Transport {
        operation: ApiOperation,
        message: String,
    },
    #[error("{operation} failed: unreadable response: {message}")]
    Decode {
        operation: ApiOperation,
        message: String,
    },
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ApiError {
    pub fn operation(&self) -> Option<ApiOperation> {
        match self {
            ApiError::Status { operation, .. }
            | ApiError::Transport { operation, .. }
            | ApiError::Decode { operation, .. } => Some(*operation),
            ApiError::ClientBuild(_) => None,
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Operations against the remote "exercises" collection.
///
/// [`ApiClient`] talks HTTP; tests plug in their own implementation.
#[allow(async_fn_in_trait)]
pub trait ExerciseApi {
    /// Server-side filters are sent as `day` / `muscleGroup` query parameters.
    async fn list(
        &self,
        day: Option<DayOfWeek>,
        muscle_group: Option<MuscleGroup>,
    ) -> Result<Vec<ExerciseRecord>, ApiError>;

    async fn create(&self, draft: &ExerciseDraft) -> Result<ExerciseRecord, ApiError>;

    /// Replaces every field of record `id`.
    async fn update(&self, id: i64, draft: &ExerciseDraft) -> Result<ExerciseRecord, ApiError>;

    /// Returns the server's plain-text confirmation.
    async fn delete(&self, id: i64) -> Result<String, ApiError>;

    async fn health_check(&self) -> Result<String, ApiError>;
}

pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for the backend at `base_url` (e.g. `http://localhost:8080`).
    ///
    /// # Errors
    /// Returns `ApiError::ClientBuild` if the underlying HTTP client cannot be set up.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn exercises_url(&self) -> String {
        format!("{}{}", self.base_url, EXERCISES_PATH)
    }

    fn exercise_url(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, EXERCISES_PATH, id)
    }

    async fn send(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            error!("{} request could not be sent: {}", operation, e);
            ApiError::Transport {
                operation,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            error!(
                "{} request failed with status: {}. Body: {}",
                operation, status, body
            );
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        operation: ApiOperation,
        response: Response,
    ) -> Result<T, ApiError> {
        response.json().await.map_err(|e| {
            error!("Failed to deserialize {} response: {}", operation, e);
            ApiError::Decode {
                operation,
                message: e.to_string(),
            }
        })
    }

    async fn read_text(operation: ApiOperation, response: Response) -> Result<String, ApiError> {
        response.text().await.map_err(|e| ApiError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

impl ExerciseApi for ApiClient {
    async fn list(
        &self,
        day: Option<DayOfWeek>,
        muscle_group: Option<MuscleGroup>,
    ) -> Result<Vec<ExerciseRecord>, ApiError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(day) = day {
            params.push(("day", day.to_string()));
        }
        if let Some(group) = muscle_group {
            params.push(("muscleGroup", group.to_string()));
        }

        let url = self.exercises_url();
        debug!("GET {} with query {:?}", url, params);
        let mut request = self.http_client.get(&url);
        if !params.is_empty() {
            request = request.query(&params);
        }

        let response = self.send(ApiOperation::List, request).await?;
        let records: Vec<ExerciseRecord> = Self::read_json(ApiOperation::List, response).await?;
        info!("Fetched {} exercises", records.len());
        Ok(records)
    }

    async fn create(&self, draft: &ExerciseDraft) -> Result<ExerciseRecord, ApiError> {
        let url = self.exercises_url();
        debug!("POST {} with {:?}", url, draft);
        let request = self.http_client.post(&url).json(draft);
        let response = self.send(ApiOperation::Create, request).await?;
        let record: ExerciseRecord = Self::read_json(ApiOperation::Create, response).await?;
        info!("Created exercise '{}' with id {}", record.name, record.id);
        Ok(record)
    }

    async fn update(&self, id: i64, draft: &ExerciseDraft) -> Result<ExerciseRecord, ApiError> {
        let url = self.exercise_url(id);
        debug!("PUT {} with {:?}", url, draft);
        let request = self.http_client.put(&url).json(draft);
        let response = self.send(ApiOperation::Update, request).await?;
        let record: ExerciseRecord = Self::read_json(ApiOperation::Update, response).await?;
        info!("Updated exercise {}", record.id);
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let url = self.exercise_url(id);
        debug!("DELETE {}", url);
        let request = self.http_client.delete(&url);
        let response = self.send(ApiOperation::Delete, request).await?;
        let confirmation = Self::read_text(ApiOperation::Delete, response).await?;
        info!("Deleted exercise {}", id);
        Ok(confirmation)
    }

    async fn health_check(&self) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        debug!("GET {}", url);
        let request = self.http_client.get(&url);
        let response = self.send(ApiOperation::HealthCheck, request).await?;
        Self::read_text(ApiOperation::HealthCheck, response).await
    }
}
