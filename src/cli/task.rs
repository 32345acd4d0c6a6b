use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::error::TudooError;
use crate::forms::{DeleteConfirm, Dialog, TaskForm};
use crate::output;
use crate::store::{Notification, View};

pub fn run(cmd: TaskCommands, json_output: bool) -> i32 {
    let mut notes = Vec::new();
    let result = match cmd {
        TaskCommands::Add { title, description } => {
            run_add(&title, description.as_deref(), json_output, &mut notes)
        }
        TaskCommands::Edit { id, title, description, view } => run_edit(
            &id,
            title.as_deref(),
            description.as_deref(),
            view.into(),
            json_output,
            &mut notes,
        ),
        TaskCommands::Toggle { id, view } => run_toggle(&id, view.into(), json_output, &mut notes),
        TaskCommands::Delete { id, view } => run_delete(&id, view.into(), json_output, &mut notes),
    };
    super::finish(result, &notes, json_output)
}

fn run_add(
    title: &str,
    description: Option<&str>,
    json_output: bool,
    notes: &mut Vec<Notification>,
) -> Result<i32, TudooError> {
    let mut store = super::open_store(View::Dashboard)?;
    let mut dialog = Dialog::open_with(TaskForm::new(title, description.unwrap_or_default()));
    let result = dialog.run(|form| form.submit(|f| store.create(&f.title, Some(&f.description))));
    notes.extend(store.take_notifications());
    let task = result?;

    super::emit_success(
        json_output,
        json!({ "task": output::json::task_json(&task) }),
        notes,
        || output::text::print_task(&task),
    );
    Ok(0)
}

fn run_edit(
    reference: &str,
    title: Option<&str>,
    description: Option<&str>,
    view: View,
    json_output: bool,
    notes: &mut Vec<Notification>,
) -> Result<i32, TudooError> {
    let mut store = super::open_store(view)?;
    let loaded = store.load();
    notes.extend(store.take_notifications());
    loaded?;

    let task = store.cache().resolve(reference)?.clone();
    let mut form = TaskForm::seeded_from(&task);
    if let Some(title) = title {
        form.title = title.to_string();
    }
    if let Some(description) = description {
        form.description = description.to_string();
    }
    let mut dialog = Dialog::open_with(form);
    let result = dialog.run(|form| {
        form.submit(|f| store.edit(&task.id, &f.title, Some(&f.description)))
    });
    notes.extend(store.take_notifications());
    let updated = result?;

    super::emit_success(
        json_output,
        json!({ "task": output::json::task_json(&updated) }),
        notes,
        || output::text::print_task(&updated),
    );
    Ok(0)
}

fn run_toggle(
    reference: &str,
    view: View,
    json_output: bool,
    notes: &mut Vec<Notification>,
) -> Result<i32, TudooError> {
    let mut store = super::open_store(view)?;
    let loaded = store.load();
    notes.extend(store.take_notifications());
    loaded?;

    let id = store.cache().resolve(reference)?.id.clone();
    let result = store.toggle_status(&id);
    notes.extend(store.take_notifications());
    let task = result?;

    super::emit_success(
        json_output,
        json!({
            "task": output::json::task_json(&task),
            "remaining": store.cache().len()
        }),
        notes,
        || println!("Task {} → {}", task.id, task.status.as_str()),
    );
    Ok(0)
}

fn run_delete(
    reference: &str,
    view: View,
    json_output: bool,
    notes: &mut Vec<Notification>,
) -> Result<i32, TudooError> {
    let mut store = super::open_store(view)?;
    let loaded = store.load();
    notes.extend(store.take_notifications());
    loaded?;

    let mut confirm = DeleteConfirm::for_task(store.cache().resolve(reference)?);
    let result = confirm.confirm(|c| store.delete(&c.task_id));
    notes.extend(store.take_notifications());
    let task = result?;

    super::emit_success(
        json_output,
        json!({ "deleted": { "id": task.id, "title": task.title } }),
        notes,
        || println!("Deleted: {} ({})", task.title, task.id),
    );
    Ok(0)
}
