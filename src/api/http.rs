use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, Method};
use serde::Deserialize;

use super::{AuthToken, ServiceError, TaskDraft, TaskPatch, TaskService};
use crate::core::task::{Task, TaskFilter, TaskId};
use crate::core::temporal;

/// Payload of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

/// REST/JSON client for the Taskdeck backend. Bearer-authenticated except
/// for the health probe; one request per call, no retries.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<AuthToken>,
    http: Client,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        token: Option<AuthToken>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    /// Liveness probe; the one route served without credentials.
    pub async fn health(&self) -> Result<Health, ServiceError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("GET /health failed: {}", e)))?;
        let resp = error_for_status(resp, "GET /health").await?;
        resp.json::<Health>()
            .await
            .map_err(|e| ServiceError::Decode(format!("health payload: {}", e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ServiceError> {
        let token = self.token.as_ref().ok_or(ServiceError::MissingToken)?;
        let url = format!("{}{}", self.base_url, path);
        Ok(self.http.request(method, url).bearer_auth(token))
    }
}

#[async_trait]
impl TaskService for ApiClient {
    async fn fetch_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, ServiceError> {
        let params = filter_params(filter, chrono::Local::now().naive_local());
        let resp = self
            .request(Method::GET, "/tasks")?
            .query(&params)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("GET /tasks failed: {}", e)))?;
        let resp = error_for_status(resp, "GET /tasks").await?;
        resp.json::<Vec<Task>>()
            .await
            .map_err(|e| ServiceError::Decode(format!("task list: {}", e)))
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, ServiceError> {
        let path = format!("/tasks/{}", id);
        let resp = self
            .request(Method::PUT, &path)?
            .json(&patch)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("PUT {} failed: {}", path, e)))?;
        let resp = error_for_status(resp, &format!("PUT {}", path)).await?;
        resp.json::<Task>()
            .await
            .map_err(|e| ServiceError::Decode(format!("updated task: {}", e)))
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ServiceError> {
        let path = format!("/tasks/{}", id);
        let resp = self
            .request(Method::DELETE, &path)?
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("DELETE {} failed: {}", path, e)))?;

        // A row already gone on the server is as deleted as we wanted;
        // the follow-up reload drops it locally either way.
        let status = resp.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            let detail = resp.text().await.unwrap_or_default();
            log::warn!("DELETE {} returned {}: {}", path, status, detail);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, ServiceError> {
        let resp = self
            .request(Method::POST, "/tasks")?
            .json(&draft)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("POST /tasks failed: {}", e)))?;
        let resp = error_for_status(resp, "POST /tasks").await?;
        resp.json::<Task>()
            .await
            .map_err(|e| ServiceError::Decode(format!("created task: {}", e)))
    }
}

async fn error_for_status(
    resp: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = resp.text().await.unwrap_or_default();
    log::warn!("{} returned {}: {}", what, status, detail);
    Err(ServiceError::Api {
        status: status.as_u16(),
        detail,
    })
}

/// Query parameters the list route expects for each filter. `Today` asks
/// for the local day's window, `Upcoming` for everything from now on, and
/// `Completed` filters on the status column.
fn filter_params(filter: TaskFilter, now: NaiveDateTime) -> Vec<(&'static str, String)> {
    match filter {
        TaskFilter::All => Vec::new(),
        TaskFilter::Today => {
            let (start, end) = temporal::day_bounds(now.date());
            vec![
                ("start_date", query_datetime(start)),
                ("end_date", query_datetime(end)),
            ]
        }
        TaskFilter::Upcoming => vec![("start_date", query_datetime(now))],
        TaskFilter::Completed => vec![("status", "completed".to_string())],
    }
}

fn query_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(12, 15, 30)
            .unwrap()
    }

    #[test]
    fn all_filter_sends_no_params() {
        assert!(filter_params(TaskFilter::All, noon()).is_empty());
    }

    #[test]
    fn today_filter_sends_day_bounds() {
        let params = filter_params(TaskFilter::Today, noon());
        assert_eq!(
            params,
            vec![
                ("start_date", "2026-03-14T00:00:00".to_string()),
                ("end_date", "2026-03-14T23:59:59".to_string()),
            ]
        );
    }

    #[test]
    fn upcoming_filter_starts_at_now() {
        let params = filter_params(TaskFilter::Upcoming, noon());
        assert_eq!(params, vec![("start_date", "2026-03-14T12:15:30".to_string())]);
    }

    #[test]
    fn completed_filter_uses_status_column() {
        let params = filter_params(TaskFilter::Completed, noon());
        assert_eq!(params, vec![("status", "completed".to_string())]);
    }

    #[test]
    fn decodes_health_payload() {
        let payload = r#"{"status": "healthy", "timestamp": "2026-03-14T12:15:30.123456"}"#;
        let health: Health = serde_json::from_str(payload).unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn client_without_token_refuses_authed_routes() {
        let client = ApiClient::new("http://localhost:8000/", None, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.request(Method::GET, "/tasks"),
            Err(ServiceError::MissingToken)
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            ApiClient::new("http://localhost:8000/", Some("tok".into()), Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
