//! Per-view task state: a cache mirroring the gateway plus the four mutation operations.
//!
//! Every operation calls the gateway first and touches the cache only after the call
//! succeeds. Failures leave the cache exactly as it was, are logged, and are surfaced as an
//! error notification. Operations take `&mut self`, so calls through one store never overlap.

pub mod cache;
pub mod notify;
pub mod view;

pub use cache::{Partition, TaskCache};
pub use notify::{Level, Notification};
pub use view::View;

use crate::error::{ErrorCode, TudooError};
use crate::gateway::TaskGateway;
use crate::models::{normalize_description, NewTask, Session, Task, TaskPatch, TaskStatus};

pub struct TaskStore<G> {
    gateway: G,
    session: Session,
    view: View,
    cache: TaskCache,
    notifications: Vec<Notification>,
}

impl<G: TaskGateway> TaskStore<G> {
    pub fn new(gateway: G, session: Session, view: View) -> Self {
        Self {
            gateway,
            session,
            view,
            cache: TaskCache::new(),
            notifications: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn cache(&self) -> &TaskCache {
        &self.cache
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[Task]) + 'static) {
        self.cache.subscribe(listener);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Replace the cache with the gateway's rows for this view.
    pub fn load(&mut self) -> Result<usize, TudooError> {
        let result = self
            .owner_id()
            .and_then(|owner| self.gateway.query(&self.view.filter(&owner)));
        match result {
            Ok(tasks) => {
                let count = tasks.len();
                self.cache.replace_all(tasks);
                tracing::debug!(view = self.view.as_str(), count, "loaded tasks");
                Ok(count)
            }
            Err(e) => {
                let message = self.view.load_failed_message();
                tracing::warn!(view = self.view.as_str(), error = %e, "{message}");
                self.notifications.push(Notification::error(message));
                if e.code == ErrorCode::AuthenticationRequired {
                    return Err(e);
                }
                Err(TudooError::load_failed(format!("{message}: {e}")))
            }
        }
    }

    pub fn create(&mut self, title: &str, description: Option<&str>) -> Result<Task, TudooError> {
        let result = self.try_create(title, description);
        match result {
            Ok(task) => {
                self.cache.upsert_local(task.clone());
                self.succeeded("create", "Task created successfully!");
                Ok(task)
            }
            Err(e) => {
                let message = e.message.clone();
                Err(self.failed("create", &message, e))
            }
        }
    }

    fn try_create(&self, title: &str, description: Option<&str>) -> Result<Task, TudooError> {
        let owner_id = self.owner_id()?;
        if !self.view.accepts_new_tasks() {
            return Err(TudooError::validation("Tasks are created from the dashboard"));
        }
        require_title(title)?;
        self.gateway.insert(&NewTask {
            owner_id,
            title: title.to_string(),
            description: normalize_description(description),
            status: TaskStatus::Todo,
        })
    }

    /// Change title and description. Blank descriptions are cleared.
    pub fn edit(&mut self, id: &str, title: &str, description: Option<&str>) -> Result<Task, TudooError> {
        let description = normalize_description(description);
        let result = self.try_patch(
            id,
            TaskPatch::Details {
                title: title.to_string(),
                description: description.clone(),
            },
        );
        match result {
            Ok(mut task) => {
                task.title = title.to_string();
                task.description = description;
                self.cache.upsert_local(task.clone());
                self.succeeded("edit", "Task updated successfully!");
                Ok(task)
            }
            Err(e) => Err(self.failed("edit", "Failed to update task", e)),
        }
    }

    /// Set any status. The entry stays in place if the view still admits it, otherwise it
    /// leaves the cache.
    pub fn change_status(&mut self, id: &str, status: TaskStatus) -> Result<Task, TudooError> {
        match self.try_patch(id, TaskPatch::Status(status)) {
            Ok(mut task) => {
                task.status = status;
                if self.view.admits(&task) {
                    self.cache.upsert_local(task.clone());
                } else {
                    self.cache.remove_local(&task.id);
                }
                let message = self.view.status_changed_message(status);
                self.succeeded("status", &message);
                Ok(task)
            }
            Err(e) => Err(self.failed("status", "Failed to update task status", e)),
        }
    }

    /// Advance one step along todo → in-progress → done → todo.
    pub fn toggle_status(&mut self, id: &str) -> Result<Task, TudooError> {
        let next = match self.cache.get(id) {
            Some(task) => task.status.next(),
            None => {
                let err = TudooError::task_not_found(id);
                return Err(self.failed("status", "Failed to update task status", err));
            }
        };
        self.change_status(id, next)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, TudooError> {
        let result = self.owner_id().and_then(|owner| {
            let task = self.cached(id)?;
            self.gateway.delete(&owner, id)?;
            Ok(task)
        });
        match result {
            Ok(task) => {
                self.cache.remove_local(&task.id);
                self.succeeded("delete", "Task deleted successfully!");
                Ok(task)
            }
            Err(e) => Err(self.failed("delete", "Failed to delete task", e)),
        }
    }

    /// Validate, then send `patch` for a cached task. Returns the cached copy.
    fn try_patch(&self, id: &str, patch: TaskPatch) -> Result<Task, TudooError> {
        let owner_id = self.owner_id()?;
        let task = self.cached(id)?;
        if let TaskPatch::Details { title, .. } = &patch {
            require_title(title)?;
        }
        self.gateway.update(&owner_id, id, &patch)?;
        Ok(task)
    }

    fn cached(&self, id: &str) -> Result<Task, TudooError> {
        self.cache
            .get(id)
            .cloned()
            .ok_or_else(|| TudooError::task_not_found(id))
    }

    fn owner_id(&self) -> Result<String, TudooError> {
        self.session
            .user()
            .map(|u| u.id.clone())
            .ok_or_else(TudooError::not_authenticated)
    }

    fn succeeded(&mut self, op: &str, message: &str) {
        tracing::info!(op, view = self.view.as_str(), "{message}");
        self.notifications.push(Notification::success(message));
    }

    fn failed(&mut self, op: &str, message: &str, err: TudooError) -> TudooError {
        tracing::warn!(op, view = self.view.as_str(), code = err.code.as_str(), error = %err, "{message}");
        self.notifications.push(Notification::error(message));
        err
    }
}

fn require_title(title: &str) -> Result<(), TudooError> {
    if title.trim().is_empty() {
        return Err(TudooError::validation("Title is required"));
    }
    Ok(())
}
