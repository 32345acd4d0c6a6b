//! Short-lived dialog state for create, edit and delete.
//!
//! `submitting` is set for the duration of a submit and cleared on every exit path.

use crate::error::TudooError;
use crate::models::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub submitting: bool,
}

impl TaskForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            submitting: false,
        }
    }

    pub fn seeded_from(task: &Task) -> Self {
        Self::new(task.title.clone(), task.description.clone().unwrap_or_default())
    }

    /// The submit control is enabled only for a non-blank title and no submit in flight.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.title.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }

    /// Run `op` against the form while `submitting` is set. Fields are cleared on success and
    /// kept on failure.
    pub fn submit<T>(
        &mut self,
        op: impl FnOnce(&Self) -> Result<T, TudooError>,
    ) -> Result<T, TudooError> {
        if !self.can_submit() {
            return Err(TudooError::validation("Title is required"));
        }
        self.submitting = true;
        let result = op(self);
        self.submitting = false;
        if result.is_ok() {
            self.clear();
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirm {
    pub task_id: String,
    pub task_title: String,
    pub submitting: bool,
}

impl DeleteConfirm {
    pub fn for_task(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            submitting: false,
        }
    }

    pub fn confirm<T>(
        &mut self,
        op: impl FnOnce(&Self) -> Result<T, TudooError>,
    ) -> Result<T, TudooError> {
        self.submitting = true;
        let result = op(self);
        self.submitting = false;
        result
    }
}

/// A modal: closes after a successful submit, stays open so the user can retry otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialog<F> {
    pub open: bool,
    pub form: F,
}

impl<F> Dialog<F> {
    pub fn open_with(form: F) -> Self {
        Self { open: true, form }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn run<T>(
        &mut self,
        submit: impl FnOnce(&mut F) -> Result<T, TudooError>,
    ) -> Result<T, TudooError> {
        let result = submit(&mut self.form);
        if result.is_ok() {
            self.close();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::models::TaskStatus;

    fn task() -> Task {
        Task {
            id: "t1".into(),
            owner_id: "u1".into(),
            title: "Buy milk".into(),
            description: Some("2 litres".into()),
            status: TaskStatus::Todo,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn blank_title_never_reaches_the_operation() {
        let mut form = TaskForm::new("   ", "desc");
        assert!(!form.can_submit());
        let mut called = false;
        let err = form
            .submit(|_| {
                called = true;
                Ok(())
            })
            .unwrap_err();
        assert!(!called);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!form.submitting);
    }

    #[test]
    fn failure_keeps_fields_and_dialog_open() {
        let mut dialog = Dialog::open_with(TaskForm::seeded_from(&task()));
        let result: Result<(), _> = dialog.run(|form| {
            form.submit(|f| {
                assert_eq!(f.title, "Buy milk");
                assert_eq!(f.description, "2 litres");
                Err(TudooError::gateway("offline"))
            })
        });
        assert!(result.is_err());
        assert!(dialog.open);
        assert!(!dialog.form.submitting);
        assert_eq!(dialog.form.title, "Buy milk");
    }

    #[test]
    fn submitting_is_set_only_while_the_operation_runs() {
        let mut form = TaskForm::new("Buy milk", "");
        let during = form.submit(|f| Ok(f.submitting)).unwrap();
        assert!(during);
        assert!(!form.submitting);

        let mut confirm = DeleteConfirm::for_task(&task());
        let during = confirm.confirm(|c| Ok(c.submitting)).unwrap();
        assert!(during);
        assert!(!confirm.submitting);
    }

    #[test]
    fn success_clears_fields_and_closes() {
        let mut dialog = Dialog::open_with(TaskForm::new("Buy milk", ""));
        dialog.run(|form| form.submit(|_| Ok(()))).unwrap();
        assert!(!dialog.open);
        assert_eq!(dialog.form, TaskForm::default());
    }

    #[test]
    fn delete_confirm_resets_submitting_on_failure() {
        let mut confirm = DeleteConfirm::for_task(&task());
        let result: Result<(), _> = confirm.confirm(|c| {
            assert_eq!(c.task_id, "t1");
            Err(TudooError::gateway("offline"))
        });
        assert!(result.is_err());
        assert!(!confirm.submitting);
    }
}
