//! Contract consumed from the backend that owns durable storage and authentication.
//!
//! The store only talks to these traits; `db::SqliteGateway` is the shipped implementation
//! and tests substitute in-memory fakes.

use crate::error::TudooError;
use crate::models::{NewTask, Session, Task, TaskPatch, TaskStatus, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrder {
    CreatedDesc,
    UpdatedDesc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub owner_id: String,
    pub status: Option<TaskStatus>,
    pub order: TaskOrder,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        task.owner_id == self.owner_id && self.status.map_or(true, |s| task.status == s)
    }
}

pub trait TaskGateway {
    fn query(&self, filter: &TaskFilter) -> Result<Vec<Task>, TudooError>;

    /// Insert a row and return it with its assigned id and timestamps.
    fn insert(&self, row: &NewTask) -> Result<Task, TudooError>;

    /// Apply `patch` to the owner's row and refresh `updated_at`.
    fn update(&self, owner_id: &str, id: &str, patch: &TaskPatch) -> Result<(), TudooError>;

    fn delete(&self, owner_id: &str, id: &str) -> Result<(), TudooError>;
}

pub trait AuthGateway {
    fn sign_up(&self, email: &str, password: &str) -> Result<User, TudooError>;

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, TudooError>;

    /// Re-validate a persisted session. Returns `None` if its user no longer exists.
    fn current_user(&self, session: &Session) -> Result<Option<User>, TudooError>;

    fn sign_out(&self, session: &Session) -> Result<(), TudooError>;
}

impl<G: TaskGateway + ?Sized> TaskGateway for &G {
    fn query(&self, filter: &TaskFilter) -> Result<Vec<Task>, TudooError> {
        (**self).query(filter)
    }

    fn insert(&self, row: &NewTask) -> Result<Task, TudooError> {
        (**self).insert(row)
    }

    fn update(&self, owner_id: &str, id: &str, patch: &TaskPatch) -> Result<(), TudooError> {
        (**self).update(owner_id, id, patch)
    }

    fn delete(&self, owner_id: &str, id: &str) -> Result<(), TudooError> {
        (**self).delete(owner_id, id)
    }
}
