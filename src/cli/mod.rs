pub mod auth;
pub mod commands;
pub mod init;
pub mod pages;
pub mod shell;
pub mod task;

pub use commands::*;

use serde_json::Value;

use crate::config;
use crate::db::{connection, SqliteGateway};
use crate::error::TudooError;
use crate::gateway::AuthGateway;
use crate::models::Session;
use crate::output;
use crate::store::{Level, Notification, TaskStore, View};

pub type Store = TaskStore<SqliteGateway>;

pub fn open_gateway() -> Result<SqliteGateway, TudooError> {
    Ok(SqliteGateway::new(connection::open_db()?))
}

/// Session persisted by `login`, re-validated against storage. Stale sessions become anonymous.
pub fn current_session(gateway: &SqliteGateway) -> Result<Session, TudooError> {
    let session = config::load().session();
    if !session.is_authenticated() {
        return Ok(session);
    }
    match gateway.current_user(&session)? {
        Some(user) => Ok(Session::for_user(user)),
        None => {
            tracing::warn!("stored session refers to a missing user; treating as signed out");
            Ok(Session::anonymous())
        }
    }
}

pub fn open_store(view: View) -> Result<Store, TudooError> {
    let gateway = open_gateway()?;
    let session = current_session(&gateway)?;
    Ok(TaskStore::new(gateway, session, view))
}

/// Print a successful result: JSON envelope, or notifications followed by `text`.
pub fn emit_success(json_output: bool, data: Value, notes: &[Notification], text: impl FnOnce()) {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(data, notes)).unwrap_or_default()
        );
    } else {
        output::text::print_notifications(notes);
        text();
    }
}

/// Map a command result to an exit code, reporting the error if there is one.
pub fn finish(result: Result<i32, TudooError>, notes: &[Notification], json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::json::error(&e, notes)).unwrap_or_default()
                );
            } else {
                output::text::print_notifications(notes);
                let reported = notes
                    .iter()
                    .any(|n| n.level == Level::Error && n.message == e.message);
                if !reported {
                    eprintln!("Error: {}", e.message);
                }
            }
            1
        }
    }
}
