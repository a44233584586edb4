//! User-facing text and timestamp formatting.
//!
//! `Ru` reproduces the page the client was written for; `En` exists for
//! hosts that serve an English page.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::TaskStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" | "ru-ru" => Ok(Locale::Ru),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(ConfigError::UnknownLocale(other.to_string())),
        }
    }
}

impl Locale {
    /// Label for a status; unknown statuses are shown verbatim.
    pub fn status_label<'a>(&self, status: &'a TaskStatus) -> Cow<'a, str> {
        let label = match (self, status) {
            (_, TaskStatus::Other(raw)) => return Cow::Borrowed(raw.as_str()),
            (Locale::Ru, TaskStatus::Active) => "Активная",
            (Locale::Ru, TaskStatus::Completed) => "Завершена",
            (Locale::Ru, TaskStatus::Pending) => "В ожидании",
            (Locale::En, TaskStatus::Active) => "Active",
            (Locale::En, TaskStatus::Completed) => "Completed",
            (Locale::En, TaskStatus::Pending) => "Pending",
        };
        Cow::Borrowed(label)
    }

    /// Format an instant in the host's local time zone.
    pub fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&Local);
        match self {
            Locale::Ru => local.format("%d.%m.%Y, %H:%M:%S").to_string(),
            Locale::En => local.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        }
    }

    pub fn loading(&self) -> &'static str {
        match self {
            Locale::Ru => "Загрузка задач...",
            Locale::En => "Loading tasks...",
        }
    }

    pub fn empty(&self) -> &'static str {
        match self {
            Locale::Ru => "Задач пока нет. Добавьте первую!",
            Locale::En => "No tasks yet. Add the first one!",
        }
    }

    pub fn load_failed(&self, reason: &str) -> String {
        match self {
            Locale::Ru => format!("Ошибка загрузки задач: {reason}"),
            Locale::En => format!("Failed to load tasks: {reason}"),
        }
    }

    pub fn created(&self, title: &str) -> String {
        match self {
            Locale::Ru => format!("Задача \"{title}\" создана!"),
            Locale::En => format!("Task \"{title}\" created!"),
        }
    }

    pub fn create_failed(&self, reason: &str) -> String {
        match self {
            Locale::Ru => format!("Ошибка создания задачи: {reason}"),
            Locale::En => format!("Failed to create task: {reason}"),
        }
    }

    pub fn status_updated(&self) -> &'static str {
        match self {
            Locale::Ru => "Статус задачи обновлен!",
            Locale::En => "Task status updated!",
        }
    }

    pub fn update_failed(&self, reason: &str) -> String {
        match self {
            Locale::Ru => format!("Ошибка обновления задачи: {reason}"),
            Locale::En => format!("Failed to update task: {reason}"),
        }
    }

    pub fn deleted(&self) -> &'static str {
        match self {
            Locale::Ru => "Задача удалена!",
            Locale::En => "Task deleted!",
        }
    }

    pub fn delete_failed(&self, reason: &str) -> String {
        match self {
            Locale::Ru => format!("Ошибка удаления задачи: {reason}"),
            Locale::En => format!("Failed to delete task: {reason}"),
        }
    }

    pub fn confirm_delete(&self) -> &'static str {
        match self {
            Locale::Ru => "Вы уверены, что хотите удалить эту задачу?",
            Locale::En => "Are you sure you want to delete this task?",
        }
    }

    pub fn title_required(&self) -> &'static str {
        match self {
            Locale::Ru => "Название задачи обязательно!",
            Locale::En => "Task title is required!",
        }
    }

    pub fn complete_button(&self) -> &'static str {
        match self {
            Locale::Ru => "✅ Завершить",
            Locale::En => "✅ Complete",
        }
    }

    pub fn delete_button(&self) -> &'static str {
        match self {
            Locale::Ru => "🗑️ Удалить",
            Locale::En => "🗑️ Delete",
        }
    }
}
