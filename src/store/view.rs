use crate::gateway::{TaskFilter, TaskOrder};
use crate::models::{Task, TaskStatus};

/// Which page a store backs. Decides the load filter and per-page message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Completed,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Completed => "completed",
        }
    }

    pub fn filter(&self, owner_id: &str) -> TaskFilter {
        match self {
            Self::Dashboard => TaskFilter {
                owner_id: owner_id.to_string(),
                status: None,
                order: TaskOrder::CreatedDesc,
            },
            Self::Completed => TaskFilter {
                owner_id: owner_id.to_string(),
                status: Some(TaskStatus::Done),
                order: TaskOrder::UpdatedDesc,
            },
        }
    }

    /// Whether a task belongs in this view's cache.
    pub fn admits(&self, task: &Task) -> bool {
        match self {
            Self::Dashboard => true,
            Self::Completed => task.status == TaskStatus::Done,
        }
    }

    /// New tasks start as `todo`, so only pages that show `todo` take creates.
    pub fn accepts_new_tasks(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    pub fn load_failed_message(&self) -> &'static str {
        match self {
            Self::Dashboard => "Failed to load tasks",
            Self::Completed => "Failed to load completed tasks",
        }
    }

    pub fn status_changed_message(&self, status: TaskStatus) -> String {
        match self {
            Self::Dashboard => format!("Task marked as {}!", status.as_str()),
            Self::Completed => format!("Task moved to {}!", status.as_str()),
        }
    }
}
