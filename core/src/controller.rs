//! The event-driven task list controller.
//!
//! # Design
//! `TaskListClient` is built once at startup with its page, transport and
//! clock injected. Every user action goes through one of its methods (or
//! `dispatch`), and every successful mutation ends in a full `load_tasks`, so
//! what the page shows is always exactly the last successful fetch. Failures
//! are turned into a message on the page and a `tracing` error; nothing is
//! retried and the displayed list is left alone.

use tracing::{debug, error};

use crate::client::TasksApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::locale::Locale;
use crate::notify::{Clock, MessageKind, Notifier, SystemClock};
use crate::page::Page;
use crate::transport::Transport;
use crate::types::{CreateTask, Task, TaskStatus};
use crate::view::{self, Action};

/// Where the last `load_tasks` call ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded(usize),
    Empty,
    Failed(String),
}

/// Newest first by `created_at`. Stable, so equal timestamps keep the
/// server's order; timestamps that do not parse go last.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by_cached_key(|task| std::cmp::Reverse(task.created_instant()));
}

pub struct TaskListClient<T, P, C = SystemClock> {
    api: TasksApi,
    transport: T,
    page: P,
    notifier: Notifier<C>,
    locale: Locale,
    state: LoadState,
}

impl<T: Transport, P: Page> TaskListClient<T, P, SystemClock> {
    pub fn new(config: &ClientConfig, transport: T, page: P) -> Self {
        Self::with_clock(config, transport, page, SystemClock)
    }
}

impl<T: Transport, P: Page, C: Clock> TaskListClient<T, P, C> {
    pub fn with_clock(config: &ClientConfig, transport: T, page: P, clock: C) -> Self {
        Self {
            api: TasksApi::new(&config.origin),
            transport,
            page,
            notifier: Notifier::new(clock, config.success_duration, config.error_duration),
            locale: config.locale,
            state: LoadState::Unloaded,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Page-load entry point: show the API URL and do the first load.
    pub fn start(&mut self) -> &LoadState {
        let api_url = self.api.api_url().to_string();
        self.page.set_api_url(&api_url);
        self.load_tasks()
    }

    /// Route a user action raised by a rendered element or the form.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatching");
        match action {
            Action::Reload => {
                self.load_tasks();
            }
            // Failures are already on the page by the time these return.
            Action::Submit => {
                if let Err(err) = self.submit_form() {
                    debug!(error = %err, "submit not applied");
                }
            }
            Action::Complete(id) => {
                if let Err(err) = self.update_task_status(id, TaskStatus::Completed) {
                    debug!(error = %err, task_id = id, "complete not applied");
                }
            }
            Action::Delete(id) => {
                if let Err(err) = self.delete_task(id) {
                    debug!(error = %err, task_id = id, "delete not applied");
                }
            }
        }
    }

    /// Hide any notification whose time is up. Hosts call this periodically.
    pub fn tick(&mut self) {
        for kind in self.notifier.expire() {
            self.page.hide_message(kind);
        }
    }

    pub fn load_tasks(&mut self) -> &LoadState {
        self.state = LoadState::Loading;
        self.page
            .render_tasks(view::render_placeholder(self.locale.loading()));

        self.state = match self.fetch_tasks() {
            Ok(tasks) if tasks.is_empty() => {
                self.page.render_tasks(view::render_placeholder(self.locale.empty()));
                self.page.set_task_count("0");
                LoadState::Empty
            }
            Ok(mut tasks) => {
                sort_newest_first(&mut tasks);
                self.page
                    .render_tasks(view::render_task_grid(&tasks, self.locale));
                self.page.set_task_count(&tasks.len().to_string());
                debug!(count = tasks.len(), "rendered tasks");
                LoadState::Loaded(tasks.len())
            }
            Err(err) => {
                error!(error = %err, "error loading tasks");
                let reason = err.to_string();
                self.page
                    .render_tasks(view::render_load_error(self.locale.load_failed(&reason)));
                LoadState::Failed(reason)
            }
        };
        &self.state
    }

    /// Validate the form the way the page does before creating: a blank
    /// title is reported locally and nothing is sent.
    pub fn submit_form(&mut self) -> Result<Task, ApiError> {
        let form = self.page.read_form();
        let title = form.title.trim();
        if title.is_empty() {
            let message = self.locale.title_required();
            self.notify(MessageKind::Error, message);
            return Err(ApiError::Validation(message.to_string()));
        }
        let input = CreateTask {
            title: title.to_string(),
            description: form.description.trim().to_string(),
            status: form.status,
        };
        self.create_task(input)
    }

    /// Create a task. Any error has already been shown on the page when this
    /// returns `Err`.
    pub fn create_task(&mut self, input: CreateTask) -> Result<Task, ApiError> {
        let result = self
            .api
            .build_create_task(&input)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.api.parse_create_task(resp));

        match result {
            Ok(task) => {
                let message = self.locale.created(&task.title);
                self.notify(MessageKind::Success, &message);
                self.page.reset_form();
                self.load_tasks();
                Ok(task)
            }
            Err(err) => {
                error!(error = %err, "error creating task");
                let message = self.locale.create_failed(&err.user_message());
                self.notify(MessageKind::Error, &message);
                Err(err)
            }
        }
    }

    pub fn update_task_status(&mut self, id: i64, status: TaskStatus) -> Result<(), ApiError> {
        let result = self
            .api
            .build_update_status(id, &status)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.api.parse_update_status(resp));

        match result {
            Ok(()) => {
                self.notify(MessageKind::Success, self.locale.status_updated());
                self.load_tasks();
                Ok(())
            }
            Err(err) => {
                error!(error = %err, task_id = id, "error updating task");
                let message = self.locale.update_failed(&err.to_string());
                self.notify(MessageKind::Error, &message);
                Err(err)
            }
        }
    }

    /// Delete after confirmation. `Ok(false)` means the user declined and no
    /// request was sent.
    pub fn delete_task(&mut self, id: i64) -> Result<bool, ApiError> {
        if !self.page.confirm(self.locale.confirm_delete()) {
            debug!(task_id = id, "delete declined");
            return Ok(false);
        }

        let req = self.api.build_delete_task(id);
        let result = self
            .transport
            .execute(req)
            .and_then(|resp| self.api.parse_delete_task(resp));

        match result {
            Ok(()) => {
                self.notify(MessageKind::Success, self.locale.deleted());
                self.load_tasks();
                Ok(true)
            }
            Err(err) => {
                error!(error = %err, task_id = id, "error deleting task");
                let message = self.locale.delete_failed(&err.to_string());
                self.notify(MessageKind::Error, &message);
                Err(err)
            }
        }
    }

    fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.api.build_list_tasks();
        let resp = self.transport.execute(req)?;
        self.api.parse_list_tasks(resp)
    }

    fn notify(&mut self, kind: MessageKind, text: &str) {
        self.page.show_message(kind, text);
        self.page.hide_message(kind.other());
        self.notifier.show(kind);
    }
}
