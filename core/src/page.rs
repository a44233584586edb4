//! The document surface the client writes to.
//!
//! A `Page` stands for the pre-existing elements of the hosting document:
//! the task form, the tasks container, the two message slots, the API-URL
//! and task-count slots, plus the browser's confirmation prompt. The
//! controller only ever talks to the page through this trait.

use crate::notify::MessageKind;
use crate::types::TaskStatus;
use crate::view::ViewNode;

/// Raw values of the task form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

pub trait Page {
    /// Replace the whole content of the tasks container.
    fn render_tasks(&mut self, content: ViewNode);
    fn set_task_count(&mut self, text: &str);
    fn set_api_url(&mut self, text: &str);
    fn show_message(&mut self, kind: MessageKind, text: &str);
    fn hide_message(&mut self, kind: MessageKind);
    fn read_form(&self) -> TaskForm;
    fn reset_form(&mut self);
    /// Ask the user a yes/no question; `false` means declined.
    fn confirm(&mut self, question: &str) -> bool;
}

/// A `Page` kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    pub container: Option<ViewNode>,
    pub task_count: String,
    pub api_url: String,
    pub success: Option<String>,
    pub error: Option<String>,
    pub form: TaskForm,
    /// Answer given to every confirmation prompt.
    pub confirm_answer: bool,
    /// Questions asked so far, oldest first.
    pub prompts: Vec<String>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible text of the given message slot.
    pub fn message(&self, kind: MessageKind) -> Option<&str> {
        match kind {
            MessageKind::Success => self.success.as_deref(),
            MessageKind::Error => self.error.as_deref(),
        }
    }

    pub fn container_html(&self) -> String {
        self.container.as_ref().map(ViewNode::to_html).unwrap_or_default()
    }
}

impl Page for MemoryPage {
    fn render_tasks(&mut self, content: ViewNode) {
        self.container = Some(content);
    }

    fn set_task_count(&mut self, text: &str) {
        self.task_count = text.to_string();
    }

    fn set_api_url(&mut self, text: &str) {
        self.api_url = text.to_string();
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::Success => self.success = Some(text.to_string()),
            MessageKind::Error => self.error = Some(text.to_string()),
        }
    }

    fn hide_message(&mut self, kind: MessageKind) {
        match kind {
            MessageKind::Success => self.success = None,
            MessageKind::Error => self.error = None,
        }
    }

    fn read_form(&self) -> TaskForm {
        self.form.clone()
    }

    fn reset_form(&mut self) {
        self.form = TaskForm::default();
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.prompts.push(question.to_string());
        self.confirm_answer
    }
}
