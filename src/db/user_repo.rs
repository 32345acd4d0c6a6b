use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TudooError;
use crate::models::User;

pub fn create_user(
    conn: &Connection,
    id: &str,
    email: &str,
    password_hash: &str,
    now: &str,
) -> Result<User, TudooError> {
    if find_by_email(conn, email)?.is_some() {
        return Err(TudooError::user_exists(email));
    }
    conn.execute(
        "INSERT INTO users (id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, email, password_hash, now],
    )?;
    Ok(User {
        id: id.to_string(),
        email: email.to_string(),
    })
}

/// Look up a user and their stored password hash.
pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<(User, String)>, TudooError> {
    let found = conn
        .query_row(
            "SELECT id, email, password_hash FROM users WHERE email = ?1",
            params![email],
            |row| {
                Ok((
                    User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    },
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;
    Ok(found)
}

pub fn get_user(conn: &Connection, id: &str) -> Result<Option<User>, TudooError> {
    let user = conn
        .query_row(
            "SELECT id, email FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}
