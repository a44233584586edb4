//! In-memory stand-in for the task REST API.
//!
//! Serves the same routes, payloads and error shapes as the real backend:
//! a paginated, newest-first collection under `/api/v1/tasks/tasks/`, soft
//! deletes, `404` with a textual `detail`, and `422` with a list of
//! validation entries.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Active,
    Completed,
    Pending,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub is_deleted: bool,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Partial update. `description` is tri-state: absent leaves it alone,
/// `null` clears it.
#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub total: usize,
    pub page: u32,
    pub pages: usize,
    pub page_size: u32,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

impl Store {
    pub fn insert(&mut self, input: CreateTask, created_at: DateTime<Utc>) -> Task {
        self.next_id += 1;
        let task = Task {
            id: self.next_id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            created_at,
            updated_at: None,
            is_deleted: false,
        };
        self.tasks.insert(task.id, task.clone());
        task
    }

    fn live(&self, id: i64) -> Option<&Task> {
        self.tasks.get(&id).filter(|t| !t.is_deleted)
    }

    fn live_mut(&mut self, id: i64) -> Option<&mut Task> {
        self.tasks.get_mut(&id).filter(|t| !t.is_deleted)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Errors rendered the way the backend renders them: `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound(i64),
    Validation { field: &'static str, msg: String },
    Malformed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": format!("Задача с ID {id} не найдена") })),
            )
                .into_response(),
            ApiError::Validation { field, msg } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "detail": [{ "loc": ["body", field], "msg": msg, "type": "value_error" }]
                })),
            )
                .into_response(),
            ApiError::Malformed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": [{ "loc": ["request"], "msg": msg, "type": "parse_error" }] })),
            )
                .into_response(),
        }
    }
}

pub fn app() -> Router {
    router(Db::default())
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/tasks/", get(api_root))
        .route("/api/v1/tasks/tasks/", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "Task Manager API" }))
}

async fn api_root() -> Json<serde_json::Value> {
    Json(json!({ "message": "API работает!" }))
}

fn validate_title(title: &str) -> Result<String, ApiError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation {
            field: "title",
            msg: "Название не может быть пустым".to_string(),
        });
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        return Err(ApiError::Validation {
            field: "title",
            msg: format!("String should have at most {TITLE_MAX_LEN} characters"),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &Option<String>) -> Result<(), ApiError> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX_LEN => Err(ApiError::Validation {
            field: "description",
            msg: format!("String should have at most {DESCRIPTION_MAX_LEN} characters"),
        }),
        _ => Ok(()),
    }
}

async fn list_tasks(
    State(db): State<Db>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<TaskPage>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page < 1 {
        return Err(ApiError::Malformed("page must be >= 1".to_string()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::Malformed(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    let needle = query.search.as_deref().map(str::to_lowercase);

    let store = db.read().await;
    let mut matching: Vec<&Task> = store
        .tasks
        .values()
        .filter(|t| !t.is_deleted)
        .filter(|t| query.status.is_none_or(|s| t.status == s))
        .filter(|t| query.priority.is_none_or(|p| t.priority == p))
        .filter(|t| match &needle {
            None => true,
            Some(needle) => {
                t.title.to_lowercase().contains(needle)
                    || t.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            }
        })
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let total = matching.len();
    let size = page_size as usize;
    let items = matching
        .into_iter()
        .skip((page as usize - 1) * size)
        .take(size)
        .cloned()
        .collect();
    tracing::debug!(total, page, page_size, "listed tasks");

    Ok(Json(TaskPage {
        items,
        total,
        page,
        pages: total.div_ceil(size),
        page_size,
    }))
}

async fn create_task(
    State(db): State<Db>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(mut input) = payload.map_err(|e| ApiError::Malformed(e.body_text()))?;
    input.title = validate_title(&input.title)?;
    validate_description(&input.description)?;

    let task = db.write().await.insert(input, Utc::now());
    tracing::info!(id = task.id, "created task");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Task>, ApiError> {
    let store = db.read().await;
    store.live(id).cloned().map(Json).ok_or(ApiError::NotFound(id))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::Malformed(e.body_text()))?;
    let title = input.title.as_deref().map(validate_title).transpose()?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let mut store = db.write().await;
    let task = store.live_mut(id).ok_or(ApiError::NotFound(id))?;
    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    task.updated_at = Some(Utc::now());
    tracing::info!(id, "updated task");
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Task>, ApiError> {
    let mut store = db.write().await;
    let task = store.live_mut(id).ok_or(ApiError::NotFound(id))?;
    task.is_deleted = true;
    tracing::info!(id, "soft-deleted task");
    Ok(Json(task.clone()))
}
