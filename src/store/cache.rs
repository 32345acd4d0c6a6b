use std::fmt;

use crate::error::TudooError;
use crate::models::{Task, TaskStatus};

pub type Listener = Box<dyn FnMut(&[Task])>;

/// Ordered per-view mirror of the gateway's rows.
///
/// Order is whatever the load query returned, with created rows prepended. It is never
/// re-sorted locally. Listeners run after every change.
#[derive(Default)]
pub struct TaskCache {
    tasks: Vec<Task>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for TaskCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCache")
            .field("tasks", &self.tasks)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[Task]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.changed();
    }

    /// Replace the entry with the same id in place, or insert at the head.
    pub fn upsert_local(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.insert(0, task),
        }
        self.changed();
    }

    /// Remove the entry with `id`. Absent ids leave the cache untouched.
    pub fn remove_local(&mut self, id: &str) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(pos);
        self.changed();
        Some(removed)
    }

    /// Resolve an exact id or a unique id prefix.
    pub fn resolve(&self, reference: &str) -> Result<&Task, TudooError> {
        if let Some(task) = self.get(reference) {
            return Ok(task);
        }
        let matches: Vec<&Task> = if reference.is_empty() {
            Vec::new()
        } else {
            self.tasks
                .iter()
                .filter(|t| t.id.starts_with(reference))
                .collect()
        };
        match matches.as_slice() {
            [] => Err(TudooError::task_not_found(reference)),
            [task] => Ok(task),
            _ => {
                let candidates: Vec<String> =
                    matches.iter().map(|t| format!("{} ({})", t.title, t.id)).collect();
                Err(TudooError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    /// Group by status. Recomputed on every call.
    pub fn partition(&self) -> Partition<'_> {
        Partition::of(&self.tasks)
    }

    fn changed(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.tasks);
        }
    }
}

#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Partition<'a> {
    pub fn of(tasks: &'a [Task]) -> Self {
        let mut partition = Partition::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => partition.todo.push(task),
                TaskStatus::InProgress => partition.in_progress.push(task),
                TaskStatus::Done => partition.done.push(task),
            }
        }
        partition
    }

    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.column(status).len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ErrorCode;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.into(),
            owner_id: "u1".into(),
            title: format!("task {id}"),
            description: None,
            status,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn upsert_prepends_new_and_replaces_existing_in_place() {
        let mut cache = TaskCache::new();
        cache.replace_all(vec![task("a", TaskStatus::Todo), task("b", TaskStatus::Todo)]);
        cache.upsert_local(task("c", TaskStatus::Todo));
        cache.upsert_local(task("b", TaskStatus::Done));

        let ids: Vec<_> = cache.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(cache.get("b").unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn removing_an_absent_id_is_a_no_op() {
        let mut cache = TaskCache::new();
        cache.replace_all(vec![task("a", TaskStatus::Todo)]);
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        cache.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(cache.remove_local("zzz").is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(notified.get(), 0);

        assert!(cache.remove_local("a").is_some());
        assert!(cache.remove_local("a").is_none());
        assert!(cache.is_empty());
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn partition_follows_cache_changes() {
        let mut cache = TaskCache::new();
        cache.replace_all(vec![task("1", TaskStatus::Todo)]);
        assert_eq!(cache.partition().count(TaskStatus::Todo), 1);

        cache.upsert_local(task("1", TaskStatus::InProgress));
        let p = cache.partition();
        assert_eq!(p.count(TaskStatus::Todo), 0);
        assert_eq!(p.count(TaskStatus::InProgress), 1);
        assert_eq!(p.count(TaskStatus::Done), 0);
    }

    #[test]
    fn resolve_by_prefix() {
        let mut cache = TaskCache::new();
        cache.replace_all(vec![
            task("01ABC", TaskStatus::Todo),
            task("01ABD", TaskStatus::Todo),
            task("02XYZ", TaskStatus::Todo),
        ]);
        assert_eq!(cache.resolve("02").unwrap().id, "02XYZ");
        assert_eq!(cache.resolve("01ABD").unwrap().id, "01ABD");
        assert_eq!(cache.resolve("01AB").unwrap_err().code, ErrorCode::AmbiguousRef);
        assert_eq!(cache.resolve("9").unwrap_err().code, ErrorCode::TaskNotFound);
        assert_eq!(cache.resolve("").unwrap_err().code, ErrorCode::TaskNotFound);
    }

    #[test]
    fn listeners_see_the_new_contents() {
        let mut cache = TaskCache::new();
        let seen = Rc::new(Cell::new(usize::MAX));
        let sink = Rc::clone(&seen);
        cache.subscribe(move |tasks| sink.set(tasks.len()));
        cache.replace_all(vec![task("a", TaskStatus::Todo), task("b", TaskStatus::Done)]);
        assert_eq!(seen.get(), 2);
        cache.upsert_local(task("c", TaskStatus::Todo));
        assert_eq!(seen.get(), 3);
    }
}
