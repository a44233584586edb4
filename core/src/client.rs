//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TasksApi` holds only the API base URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip in between.
//!
//! The collection lives at `{origin}/api/v1/tasks/tasks/`: the backend mounts
//! its `/tasks` router under an `/api/v1/tasks` prefix, so the segment really
//! does appear twice.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, ErrorBody, Task, TaskStatus, UpdateTaskStatus};

const API_PREFIX: &str = "/api/v1/tasks";

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TasksApi {
    api_url: String,
}

impl TasksApi {
    /// `origin` is scheme + host (+ port), e.g. `http://127.0.0.1:8000`.
    pub fn new(origin: &str) -> Self {
        Self {
            api_url: format!("{}{API_PREFIX}", origin.trim_end_matches('/')),
        }
    }

    /// The API base shown to the user, `{origin}/api/v1/tasks`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks/", self.api_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/tasks/{id}", self.api_url)
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_status(&self, id: i64, status: &TaskStatus) -> Result<HttpRequest, ApiError> {
        let input = UpdateTaskStatus {
            status: status.clone(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_task(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Accepts either a bare JSON array of tasks or a page object with an
    /// `items` array. A page object without `items` is an empty collection.
    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response)?;
        let value: serde_json::Value = decode(&response.body)?;
        match value {
            serde_json::Value::Array(_) => from_value(value),
            serde_json::Value::Object(mut page) => match page.remove("items") {
                None | Some(serde_json::Value::Null) => Ok(Vec::new()),
                Some(items) => from_value(items),
            },
            other => Err(ApiError::Deserialization(format!(
                "expected a task list or a page object, got {other}"
            ))),
        }
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Any 2xx is success; the body is not inspected.
    pub fn parse_update_status(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Any 2xx is success; the body is not inspected.
    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx responses to `ApiError::Http`, lifting `detail` out of the
/// body when it is JSON.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let detail = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message());
    Err(ApiError::Http {
        status: response.status,
        detail,
    })
}
