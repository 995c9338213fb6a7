use crate::api::auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::api::{error_detail, TaskBackend};
use crate::data::{Label, NewLabel, NewTask, Task, TaskUpdate};
use crate::error::{ApiError, ApiResult};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking HTTP client for the task backend.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct CreatedTask {
    #[serde(default)]
    task_id: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("perspectives/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpBackend {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header(AUTHORIZATION, bearer(token))
    }

    /// Sends the request and maps non-2xx responses to [`ApiError::Http`].
    fn send(&self, builder: RequestBuilder, fallback: &str) -> ApiResult<Response> {
        let response = builder.send().map_err(|err| {
            warn!(error = %err, "request failed");
            ApiError::Transport(err)
        })?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let detail = error_detail(&body, fallback);
        warn!(status = status.as_u16(), %detail, "backend rejected request");
        Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        })
    }

    fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

impl TaskBackend for HttpBackend {
    fn signup(&self, request: &SignupRequest) -> ApiResult<SignupResponse> {
        info!(email = %request.email, "signing up");
        let builder = self.client.post(self.url("/signup")).json(request);
        Self::decode(self.send(builder, "Signup failed")?)
    }

    fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        info!(email = %request.email, "logging in");
        let builder = self.client.post(self.url("/login")).json(request);
        Self::decode(self.send(builder, "Login failed")?)
    }

    fn list_tasks(&self, token: &str) -> ApiResult<Vec<Task>> {
        let builder = self.authed(self.client.get(self.url("/api/tasks")), token);
        Self::decode(self.send(builder, "Failed to fetch tasks")?)
    }

    fn create_task(&self, token: &str, task: &NewTask) -> ApiResult<Option<String>> {
        info!(title = %task.title, "creating task");
        let builder = self.authed(self.client.post(self.url("/api/tasks")), token).json(task);
        let response = self.send(builder, "Failed to create task")?;
        let created: CreatedTask = Self::decode(response).unwrap_or(CreatedTask { task_id: None });
        Ok(created.task_id)
    }

    fn update_task(&self, token: &str, task_id: &str, update: &TaskUpdate) -> ApiResult<()> {
        info!(task_id, "updating task");
        let path = format!("/api/tasks/{task_id}");
        let builder = self.authed(self.client.put(self.url(&path)), token).json(update);
        self.send(builder, "Failed to update task")?;
        Ok(())
    }

    fn delete_task(&self, token: &str, task_id: &str) -> ApiResult<()> {
        info!(task_id, "deleting task");
        let path = format!("/api/tasks/{task_id}");
        let builder = self.authed(self.client.delete(self.url(&path)), token);
        self.send(builder, "Failed to delete task")?;
        Ok(())
    }

    fn list_labels(&self, token: &str) -> ApiResult<Vec<Label>> {
        let builder = self.authed(self.client.get(self.url("/api/labels")), token);
        Self::decode(self.send(builder, "Failed to fetch labels")?)
    }

    fn create_label(&self, token: &str, label: &NewLabel) -> ApiResult<()> {
        info!(name = %label.name, "creating label");
        let builder = self.authed(self.client.post(self.url("/api/labels")), token).json(label);
        self.send(builder, "Failed to create label")?;
        Ok(())
    }

    fn assign_labels(&self, token: &str, task_id: &str, labels: &[String]) -> ApiResult<()> {
        info!(task_id, count = labels.len(), "assigning labels");
        let path = format!("/api/tasks/{task_id}/labels");
        let builder = self.authed(self.client.patch(self.url(&path)), token).json(labels);
        self.send(builder, "Failed to assign labels")?;
        Ok(())
    }
}
