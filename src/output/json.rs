use serde_json::{json, Value};

use crate::error::TudooError;
use crate::models::{Task, TaskStatus, User};
use crate::store::{Notification, Partition};

pub fn success(data: Value, notifications: &[Notification]) -> Value {
    json!({
        "success": true,
        "data": data,
        "notifications": notifications
    })
}

pub fn error(err: &TudooError, notifications: &[Notification]) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        },
        "notifications": notifications
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.as_str(),
        "created_at": t.created_at,
        "updated_at": t.updated_at
    })
}

pub fn tasks_json(tasks: &[Task]) -> Value {
    Value::Array(tasks.iter().map(task_json).collect())
}

pub fn dashboard_json(tasks: &[Task]) -> Value {
    let partition = Partition::of(tasks);
    let column = |status: TaskStatus| -> Value {
        Value::Array(partition.column(status).iter().map(|t| task_json(t)).collect())
    };
    json!({
        "tasks": tasks_json(tasks),
        "columns": {
            "todo": column(TaskStatus::Todo),
            "in-progress": column(TaskStatus::InProgress),
            "done": column(TaskStatus::Done)
        },
        "counts": {
            "todo": partition.count(TaskStatus::Todo),
            "in-progress": partition.count(TaskStatus::InProgress),
            "done": partition.count(TaskStatus::Done),
            "total": tasks.len()
        }
    })
}

pub fn completed_json(tasks: &[Task]) -> Value {
    json!({
        "tasks": tasks_json(tasks),
        "count": tasks.len()
    })
}

pub fn user_json(u: &User) -> Value {
    json!({
        "id": u.id,
        "email": u.email
    })
}
