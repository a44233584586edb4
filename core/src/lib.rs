//! Task list client core.
//!
//! # Overview
//! Fetches task records from the task REST API, renders them as cards and
//! submits create / complete / delete requests, surfacing the outcome as
//! transient notifications. The core never performs I/O directly: a host
//! supplies a `Transport` for HTTP and a `Page` for the document, and feeds
//! user actions back through `TaskListClient::dispatch`.
//!
//! # Design
//! - `TasksApi` is stateless and split into `build_*` / `parse_*` halves so
//!   the HTTP boundary is explicit and testable without a network.
//! - Rendering is a pure `Task -> ViewNode` mapping; listeners are `Action`
//!   values attached to nodes, not markup.
//! - `TaskListClient` owns no task data between renders. Every successful
//!   mutation is followed by a full reload.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod locale;
pub mod notify;
pub mod page;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TasksApi;
pub use config::ClientConfig;
pub use controller::{sort_newest_first, LoadState, TaskListClient};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use locale::Locale;
pub use notify::{Clock, ManualClock, MessageKind, SystemClock};
pub use page::{MemoryPage, Page, TaskForm};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{CreateTask, Task, TaskStatus, UpdateTaskStatus};
pub use view::{Action, Element, ViewNode};
