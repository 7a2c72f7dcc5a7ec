pub mod http;
pub mod keyring;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::core::task::{Task, TaskFilter, TaskId};

/// Bearer token the backend hands out at sign-in.
pub type AuthToken = String;

/// One failed remote action. Never fatal; the screen layer turns these
/// into user-visible notices.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no auth token available")]
    MissingToken,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {detail}")]
    Api { status: u16, detail: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Partial update body for `PUT /tasks/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// The toggle-completion patch: flips exactly one field.
    pub fn completion(done: bool) -> Self {
        Self {
            is_completed: Some(done),
            ..Self::default()
        }
    }
}

/// Creation body for `POST /tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Minutes, when the user estimated one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            category: None,
            tags: Vec::new(),
            estimated_duration: None,
        }
    }
}

/// The remote task store. One attempt per call, no retries; failures come
/// back as a `ServiceError` for the caller to surface.
#[async_trait]
pub trait TaskService {
    async fn fetch_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, ServiceError>;
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, ServiceError>;
    async fn delete_task(&self, id: TaskId) -> Result<(), ServiceError>;
    async fn create_task(&self, draft: TaskDraft) -> Result<Task, ServiceError>;
}

/// Where the stored sign-in token comes from. Consulted once at startup;
/// lookup problems resolve to absent, not to an error.
#[async_trait]
pub trait AuthService {
    async fn token(&self) -> Option<AuthToken>;
}
