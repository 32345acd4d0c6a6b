use serde_json::json;

use crate::cli::commands::VERSION;
use crate::error::TudooError;
use crate::output;
use crate::store::{Notification, View};

pub fn run_view(view: View, json_output: bool) -> i32 {
    let mut notes = Vec::new();
    let result = show_view(view, json_output, &mut notes);
    super::finish(result, &notes, json_output)
}

fn show_view(view: View, json_output: bool, notes: &mut Vec<Notification>) -> Result<i32, TudooError> {
    let mut store = super::open_store(view)?;
    let loaded = store.load();
    notes.extend(store.take_notifications());
    loaded?;

    let tasks = store.cache().tasks();
    let data = match view {
        View::Dashboard => output::json::dashboard_json(tasks),
        View::Completed => output::json::completed_json(tasks),
    };
    super::emit_success(json_output, data, notes, || match view {
        View::Dashboard => output::text::print_dashboard(tasks),
        View::Completed => output::text::print_completed(tasks),
    });
    Ok(0)
}

pub fn run_settings(json_output: bool) -> i32 {
    let result = show_settings(json_output);
    super::finish(result, &[], json_output)
}

fn show_settings(json_output: bool) -> Result<i32, TudooError> {
    let gateway = super::open_gateway()?;
    let session = super::current_session(&gateway)?;
    let user = session.user().ok_or_else(TudooError::not_authenticated)?;
    super::emit_success(
        json_output,
        json!({
            "account": output::json::user_json(user),
            "about": { "name": "tudoo", "version": VERSION, "storage": "sqlite" }
        }),
        &[],
        || output::text::print_settings(user, VERSION),
    );
    Ok(0)
}
