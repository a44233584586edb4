//! Pure rendering of tasks into a small view-node tree.
//!
//! # Design
//! Rendering never touches a live document. `render_*` functions map data to
//! `ViewNode` values; the host paints them (or calls `to_html`) and wires the
//! `Action` attached to each interactive element to `TaskListClient::dispatch`.
//! Task ids travel inside the `Action`, never inside generated markup.

use std::fmt::Write as _;

use crate::locale::Locale;
use crate::types::{Task, TaskStatus};

/// A user intent raised by an interactive element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reload,
    Submit,
    Complete(i64),
    Delete(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub disabled: bool,
    pub on_click: Option<Action>,
    pub children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            disabled: false,
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(ViewNode::text_content).collect()
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

impl ViewNode {
    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for every element carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
        found
    }

    /// Every click listener in document order, for the host to register.
    pub fn listeners(&self) -> Vec<&Action> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if let Some(action) = &element.on_click {
                found.push(action);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        if let ViewNode::Element(element) = self {
            visit(element);
            for child in &element.children {
                child.walk(visit);
            }
        }
    }

    /// Serialize to HTML with text and attribute values escaped. Listeners
    /// are not part of the markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(&escape(text)),
            ViewNode::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                if !element.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
                }
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                if element.disabled {
                    out.push_str(" disabled");
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// CSS classes for the status badge.
pub fn status_classes(status: &TaskStatus) -> Vec<String> {
    let mut classes = vec!["status".to_string()];
    match status {
        TaskStatus::Other(_) => {}
        known => classes.push(format!("status-{}", known.as_str())),
    }
    classes
}

/// Creation time as shown on a card; the raw string when it does not parse.
pub fn display_created_at(task: &Task, locale: Locale) -> String {
    task.created_instant()
        .map(|at| locale.format_timestamp(at))
        .unwrap_or_else(|| task.created_at.clone())
}

pub fn render_task_card(task: &Task, locale: Locale) -> ViewNode {
    let mut card = Element::new("div")
        .class("task-card")
        .attr("data-id", task.id.to_string())
        .child(Element::new("div").class("task-title").text(&task.title));

    if let Some(description) = task.description() {
        card = card.child(Element::new("div").class("task-description").text(description));
    }

    let mut badge = Element::new("span").text(locale.status_label(&task.status));
    for class in status_classes(&task.status) {
        badge = badge.class(class);
    }

    let meta = Element::new("div")
        .class("task-meta")
        .child(Element::new("div").child(badge))
        .child(Element::new("div").text(display_created_at(task, locale)));

    let controls = Element::new("div")
        .class("controls")
        .child(
            Element::new("button")
                .class("btn")
                .class("btn-small")
                .disabled(task.is_completed())
                .on_click(Action::Complete(task.id))
                .text(locale.complete_button()),
        )
        .child(
            Element::new("button")
                .class("btn")
                .class("btn-small")
                .class("btn-delete")
                .on_click(Action::Delete(task.id))
                .text(locale.delete_button()),
        );

    card.child(meta).child(controls).into()
}

/// The grid of cards, in the order given.
pub fn render_task_grid(tasks: &[Task], locale: Locale) -> ViewNode {
    tasks
        .iter()
        .fold(Element::new("div").class("tasks-grid"), |grid, task| {
            grid.child(render_task_card(task, locale))
        })
        .into()
}

pub fn render_placeholder(text: &str) -> ViewNode {
    Element::new("div").class("loading").text(text).into()
}

pub fn render_load_error(message: String) -> ViewNode {
    Element::new("div").class("error").text(message).into()
}
