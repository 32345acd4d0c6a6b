use rusqlite::{params, Connection};

use crate::error::TudooError;
use crate::gateway::{TaskFilter, TaskOrder};
use crate::models::{NewTask, Task, TaskStatus};

const TASK_COLUMNS: &str = "id, user_id, title, description, status, created_at, updated_at";

pub fn create_task(conn: &Connection, id: &str, row: &NewTask, now: &str) -> Result<Task, TudooError> {
    conn.execute(
        "INSERT INTO tasks (id, user_id, title, description, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![id, row.owner_id, row.title, row.description, row.status.as_str(), now],
    )?;
    get_task(conn, &row.owner_id, id)
}

pub fn get_task(conn: &Connection, owner_id: &str, id: &str) -> Result<Task, TudooError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
        params![id, owner_id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TudooError::task_not_found(id),
        _ => TudooError::from(e),
    })
}

/// Owner-scoped listing. Ties on the ordering column fall back to insertion order, newest first.
pub fn list_tasks(conn: &Connection, filter: &TaskFilter) -> Result<Vec<Task>, TudooError> {
    let order = match filter.order {
        TaskOrder::CreatedDesc => "created_at DESC, rowid DESC",
        TaskOrder::UpdatedDesc => "updated_at DESC, rowid DESC",
    };
    let status = filter.status.as_ref().map(TaskStatus::as_str);
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2)
         ORDER BY {order}"
    ))?;
    let tasks = stmt
        .query_map(params![filter.owner_id, status], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn update_task_details(
    conn: &Connection,
    owner_id: &str,
    id: &str,
    title: &str,
    description: Option<&str>,
    now: &str,
) -> Result<(), TudooError> {
    let changed = conn.execute(
        "UPDATE tasks SET title = ?1, description = ?2, updated_at = ?3
         WHERE id = ?4 AND user_id = ?5",
        params![title, description, now, id, owner_id],
    )?;
    if changed == 0 {
        return Err(TudooError::task_not_found(id));
    }
    Ok(())
}

pub fn update_task_status(
    conn: &Connection,
    owner_id: &str,
    id: &str,
    status: &TaskStatus,
    now: &str,
) -> Result<(), TudooError> {
    let changed = conn.execute(
        "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
        params![status.as_str(), now, id, owner_id],
    )?;
    if changed == 0 {
        return Err(TudooError::task_not_found(id));
    }
    Ok(())
}

pub fn delete_task(conn: &Connection, owner_id: &str, id: &str) -> Result<(), TudooError> {
    let changed = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
        params![id, owner_id],
    )?;
    if changed == 0 {
        return Err(TudooError::task_not_found(id));
    }
    Ok(())
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: TaskStatus::from_str(&row.get::<_, String>(4)?).unwrap_or(TaskStatus::Todo),
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
