use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;

use crate::db::{password, task_repo, user_repo};
use crate::error::TudooError;
use crate::gateway::{AuthGateway, TaskFilter, TaskGateway};
use crate::models::{NewTask, Session, Task, TaskPatch, User};

pub const MIN_PASSWORD_LEN: usize = 6;

/// SQLite-backed gateway. Every row access is scoped to the owning user.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl TaskGateway for SqliteGateway {
    fn query(&self, filter: &TaskFilter) -> Result<Vec<Task>, TudooError> {
        let tasks = task_repo::list_tasks(&self.conn, filter)?;
        tracing::debug!(owner = %filter.owner_id, status = ?filter.status, count = tasks.len(), "queried tasks");
        Ok(tasks)
    }

    fn insert(&self, row: &NewTask) -> Result<Task, TudooError> {
        let id = ulid::Ulid::new().to_string();
        let task = task_repo::create_task(&self.conn, &id, row, &now())?;
        tracing::debug!(id = %task.id, "inserted task");
        Ok(task)
    }

    fn update(&self, owner_id: &str, id: &str, patch: &TaskPatch) -> Result<(), TudooError> {
        match patch {
            TaskPatch::Details { title, description } => task_repo::update_task_details(
                &self.conn,
                owner_id,
                id,
                title,
                description.as_deref(),
                &now(),
            ),
            TaskPatch::Status(status) => {
                task_repo::update_task_status(&self.conn, owner_id, id, status, &now())
            }
        }
    }

    fn delete(&self, owner_id: &str, id: &str) -> Result<(), TudooError> {
        task_repo::delete_task(&self.conn, owner_id, id)
    }
}

impl AuthGateway for SqliteGateway {
    fn sign_up(&self, email: &str, password: &str) -> Result<User, TudooError> {
        let email = normalize_email(email);
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(TudooError::validation(format!("Invalid email address: {email}")));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TudooError::validation(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let hash = password::hash_password(password)?;
        let id = ulid::Ulid::new().to_string();
        let user = user_repo::create_user(&self.conn, &id, &email, &hash, &now())?;
        tracing::info!(user = %user.id, "registered user");
        Ok(user)
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, TudooError> {
        let found = user_repo::find_by_email(&self.conn, &normalize_email(email))?;
        let stored = found.as_ref().map(|(_, hash)| hash.as_str());
        if !password::verify_password(password, stored)? {
            return Err(TudooError::invalid_credentials());
        }
        match found {
            Some((user, _)) => Ok(user),
            None => Err(TudooError::invalid_credentials()),
        }
    }

    fn current_user(&self, session: &Session) -> Result<Option<User>, TudooError> {
        match session.user() {
            Some(u) => user_repo::get_user(&self.conn, &u.id),
            None => Ok(None),
        }
    }

    fn sign_out(&self, session: &Session) -> Result<(), TudooError> {
        if let Some(u) = session.user() {
            tracing::info!(user = %u.id, "signed out");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection;
    use crate::error::ErrorCode;
    use crate::gateway::TaskOrder;
    use crate::models::TaskStatus;

    fn gateway() -> SqliteGateway {
        SqliteGateway::new(connection::open_in_memory().unwrap())
    }

    fn new_task(owner: &User, title: &str) -> NewTask {
        NewTask {
            owner_id: owner.id.clone(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
        }
    }

    fn dashboard(owner: &User) -> TaskFilter {
        TaskFilter {
            owner_id: owner.id.clone(),
            status: None,
            order: TaskOrder::CreatedDesc,
        }
    }

    #[test]
    fn sign_up_then_sign_in() {
        let gw = gateway();
        let user = gw.sign_up(" Ann@Example.com ", "secret1").unwrap();
        assert_eq!(user.email, "ann@example.com");
        let again = gw.sign_in_with_password("ann@example.com", "secret1").unwrap();
        assert_eq!(again, user);
    }

    #[test]
    fn wrong_password_and_unknown_email_look_the_same() {
        let gw = gateway();
        gw.sign_up("ann@example.com", "secret1").unwrap();
        let a = gw.sign_in_with_password("ann@example.com", "nope-nope").unwrap_err();
        let b = gw.sign_in_with_password("bob@example.com", "secret1").unwrap_err();
        assert_eq!(a.code, ErrorCode::InvalidCredentials);
        assert_eq!(a.message, b.message);
    }

    #[test]
    fn sign_up_rejects_duplicates_and_short_passwords() {
        let gw = gateway();
        gw.sign_up("ann@example.com", "secret1").unwrap();
        assert_eq!(gw.sign_up("ann@example.com", "secret2").unwrap_err().code, ErrorCode::UserExists);
        assert_eq!(gw.sign_up("bob@example.com", "123").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(gw.sign_up("bob", "secret1").unwrap_err().code, ErrorCode::ValidationError);
    }

    #[test]
    fn query_is_owner_scoped_and_newest_first() {
        let gw = gateway();
        let ann = gw.sign_up("ann@example.com", "secret1").unwrap();
        let bob = gw.sign_up("bob@example.com", "secret1").unwrap();
        let first = gw.insert(&new_task(&ann, "first")).unwrap();
        let second = gw.insert(&new_task(&ann, "second")).unwrap();
        gw.insert(&new_task(&bob, "bob's")).unwrap();

        let tasks = gw.query(&dashboard(&ann)).unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn completed_filter_orders_by_update() {
        let gw = gateway();
        let ann = gw.sign_up("ann@example.com", "secret1").unwrap();
        let a = gw.insert(&new_task(&ann, "a")).unwrap();
        let b = gw.insert(&new_task(&ann, "b")).unwrap();
        gw.insert(&new_task(&ann, "c")).unwrap();
        gw.update(&ann.id, &b.id, &TaskPatch::Status(TaskStatus::Done)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        gw.update(&ann.id, &a.id, &TaskPatch::Status(TaskStatus::Done)).unwrap();

        let done = gw
            .query(&TaskFilter {
                owner_id: ann.id.clone(),
                status: Some(TaskStatus::Done),
                order: TaskOrder::UpdatedDesc,
            })
            .unwrap();
        let titles: Vec<_> = done.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn other_owners_rows_are_not_found() {
        let gw = gateway();
        let ann = gw.sign_up("ann@example.com", "secret1").unwrap();
        let bob = gw.sign_up("bob@example.com", "secret1").unwrap();
        let task = gw.insert(&new_task(&ann, "mine")).unwrap();

        let err = gw.delete(&bob.id, &task.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
        let err = gw
            .update(&bob.id, &task.id, &TaskPatch::Status(TaskStatus::Done))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
        assert_eq!(gw.query(&dashboard(&ann)).unwrap().len(), 1);
    }

    #[test]
    fn current_user_revalidates_session() {
        let gw = gateway();
        let ann = gw.sign_up("ann@example.com", "secret1").unwrap();
        assert_eq!(gw.current_user(&Session::for_user(ann.clone())).unwrap(), Some(ann));
        let ghost = User {
            id: "ghost".into(),
            email: "ghost@example.com".into(),
        };
        assert_eq!(gw.current_user(&Session::for_user(ghost)).unwrap(), None);
        assert_eq!(gw.current_user(&Session::anonymous()).unwrap(), None);
    }
}
