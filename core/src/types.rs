//! Domain DTOs for the task API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift. Fields the client never reads
//! (`priority`, `updated_at`, pagination counters) are ignored on input.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle label of a task.
///
/// Values the client does not know are kept verbatim in `Other` so they can
/// be displayed as-is instead of failing the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Active,
    Completed,
    Pending,
    Other(String),
}

impl TaskStatus {
    /// Stand-in for a record that carries no status at all.
    pub fn unset() -> Self {
        TaskStatus::Other(String::new())
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Pending => "pending",
            TaskStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => TaskStatus::Active,
            "completed" => TaskStatus::Completed,
            "pending" => TaskStatus::Pending,
            _ => TaskStatus::Other(raw),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(raw: &str) -> Self {
        TaskStatus::from(raw.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "TaskStatus::unset", deserialize_with = "nullable_status")]
    pub status: TaskStatus,
    pub created_at: String,
}

/// A missing or `null` status is shown as-is, never guessed.
fn nullable_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskStatus, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(TaskStatus::from)
        .unwrap_or_else(TaskStatus::unset))
}

impl Task {
    /// The description, treating an empty string the same as a missing one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// `created_at` as an instant, or `None` when the server sent something
    /// that is not a recognizable ISO-8601 timestamp.
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Request payload for changing the status of an existing task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// Body of a non-2xx response. FastAPI-style servers send either a plain
/// string or a list of `{"msg": ...}` validation entries.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Flatten `detail` into a single message, if it carries any text.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(entries) => {
                let msgs: Vec<String> = entries
                    .iter()
                    .map(|entry| match entry.get("msg").and_then(|m| m.as_str()) {
                        Some(msg) => msg.to_string(),
                        None => entry.to_string(),
                    })
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}

/// Parse an ISO-8601 timestamp the way a browser `Date` would: offsets are
/// honoured, naive date-times are local time, bare dates are UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_status_roundtrips_through_json() {
        let status: TaskStatus = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(status, TaskStatus::Completed);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""completed""#);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: TaskStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, TaskStatus::Other("archived".to_string()));
        assert_eq!(status.as_str(), "archived");
    }

    #[test]
    fn task_tolerates_extra_and_missing_optional_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":7,"title":"Milk","status":"pending","priority":"high",
                "created_at":"2024-01-01T10:00:00","updated_at":null}"#,
        )
        .unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.description, None);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn missing_or_null_status_is_not_defaulted() {
        for raw in [
            r#"{"id":1,"title":"a","created_at":"2024-01-01"}"#,
            r#"{"id":1,"title":"a","status":null,"created_at":"2024-01-01"}"#,
        ] {
            let task: Task = serde_json::from_str(raw).unwrap();
            assert_eq!(task.status, TaskStatus::Other(String::new()), "{raw}");
            assert!(!task.is_completed());
        }
    }

    #[test]
    fn create_payload_status_still_defaults_to_active() {
        let input: CreateTask = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(input.status, TaskStatus::Active);
    }

    #[test]
    fn empty_description_counts_as_absent() {
        let task = Task {
            id: 1,
            title: "t".to_string(),
            description: Some(String::new()),
            status: TaskStatus::Active,
            created_at: "2024-01-01".to_string(),
        };
        assert_eq!(task.description(), None);
    }

    #[test]
    fn create_payload_has_exactly_three_fields() {
        let body = serde_json::to_value(CreateTask {
            title: "Buy milk".to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Buy milk", "description": "", "status": "pending"})
        );
    }

    #[test]
    fn error_body_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"not found"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("not found"));
    }

    #[test]
    fn error_body_validation_list_is_joined() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","title"],"msg":"too short"},{"msg":"bad status"}]}"#,
        )
        .unwrap();
        assert_eq!(body.message().as_deref(), Some("too short; bad status"));
    }

    #[test]
    fn error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn timestamps_with_offset_and_bare_dates() {
        let with_offset = parse_timestamp("2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(with_offset.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        let bare = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(bare.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(parse_timestamp("2024-01-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
