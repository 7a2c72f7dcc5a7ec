use thiserror::Error;

use crate::api::{TaskPatch, TaskService};
use crate::core::search;
use crate::core::task::{Task, TaskFilter, TaskId};
use crate::shell::NavIntent;

/// Caller mistakes, as opposed to backend failures. A backend failure is
/// reported through [`Notice`] and leaves the task set untouched; these
/// variants mean the caller referenced state that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskListError {
    #[error("No task with id {0}")]
    UnknownTask(TaskId),
    #[error("No delete pending confirmation")]
    NoPendingDelete,
}

/// One-shot messages for the surrounding shell to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadFailed(String),
    UpdateFailed(String),
    DeleteFailed(String),
}

/// State behind the task list screen: the loaded rows, the active filter,
/// the search text and its derived visible slice, plus the delete slot
/// waiting on user confirmation.
///
/// Every mutation round-trips through the backend and then reloads the
/// current filter, so the rows here never drift from the server's.
pub struct TaskListModel<S> {
    service: S,
    filter: TaskFilter,
    query: String,
    tasks: Vec<Task>,
    visible: Vec<Task>,
    loading: bool,
    pending_delete: Option<TaskId>,
    notices: Vec<Notice>,
}

impl<S: TaskService> TaskListModel<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            filter: TaskFilter::All,
            query: String::new(),
            tasks: Vec::new(),
            visible: Vec::new(),
            loading: false,
            pending_delete: None,
            notices: Vec::new(),
        }
    }

    /// Fetch the rows for `filter` and replace the local set. Skipped when
    /// a load is already in flight; on failure the previous rows stay.
    pub async fn load(&mut self, filter: TaskFilter) {
        if self.loading {
            log::debug!("Task load already in flight, skipping");
            return;
        }
        self.filter = filter;
        self.loading = true;

        match self.service.fetch_tasks(filter).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.refresh_visible();
            }
            Err(e) => {
                log::error!("Failed to load tasks: {}", e);
                self.notices.push(Notice::LoadFailed(e.to_string()));
            }
        }
        self.loading = false;
    }

    /// Reload the current filter.
    pub async fn refresh(&mut self) {
        self.load(self.filter).await;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh_visible();
    }

    /// Flip a task's completion on the server, then reload so the local
    /// rows reflect whatever the server actually stored.
    pub async fn toggle_completion(&mut self, id: TaskId) -> Result<(), TaskListError> {
        let task = self
            .tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or(TaskListError::UnknownTask(id))?;

        let patch = TaskPatch::completion(!task.is_completed);
        match self.service.update_task(id, patch).await {
            Ok(_) => self.refresh().await,
            Err(e) => {
                log::error!("Failed to update task {}: {}", id, e);
                self.notices.push(Notice::UpdateFailed(e.to_string()));
            }
        }
        Ok(())
    }

    /// Stage a delete; nothing reaches the server until [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: TaskId) -> Result<(), TaskListError> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Err(TaskListError::UnknownTask(id));
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Result<(), TaskListError> {
        let id = self
            .pending_delete
            .take()
            .ok_or(TaskListError::NoPendingDelete)?;

        match self.service.delete_task(id).await {
            Ok(()) => self.refresh().await,
            Err(e) => {
                log::error!("Failed to delete task {}: {}", id, e);
                self.notices.push(Notice::DeleteFailed(e.to_string()));
            }
        }
        Ok(())
    }

    pub fn edit_task(&self, id: TaskId) -> Result<NavIntent, TaskListError> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Err(TaskListError::UnknownTask(id));
        }
        Ok(NavIntent::EditTask(id))
    }

    pub fn create_task(&self) -> NavIntent {
        NavIntent::NewTask
    }

    /// Rows matching the current search text, in server order.
    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pending_delete(&self) -> Option<TaskId> {
        self.pending_delete
    }

    /// Drain queued user-facing messages.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn refresh_visible(&mut self) {
        self.visible = search::filter_tasks(&self.tasks, &self.query);
    }
}
