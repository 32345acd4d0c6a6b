use std::io::{self, BufRead, Write};

use anyhow::Context;
use serde_json::Value;

use crate::error::TudooError;
use crate::forms::{DeleteConfirm, Dialog, TaskForm};
use crate::models::Task;
use crate::output;
use crate::store::{Notification, View};

use super::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Add {
        title: String,
        description: String,
    },
    Edit {
        id: String,
        title: String,
        description: Option<String>,
    },
    Toggle(String),
    Delete(String),
    Reload,
    Help,
    Quit,
}

const HELP: &str = "\
list | add <title> [| <description>] | edit <id> <title> [| <description>]
toggle <id> | delete <id> | reload | help | quit";

/// Split `title | description`. The description is `None` when no `|` is present.
fn split_details(rest: &str) -> (String, Option<String>) {
    match rest.split_once('|') {
        Some((title, description)) => (title.trim().to_string(), Some(description.trim().to_string())),
        None => (rest.trim().to_string(), None),
    }
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let require_id = |usage: &str| -> Result<String, String> {
        match rest.split_whitespace().next() {
            Some(id) => Ok(id.to_string()),
            None => Err(format!("usage: {usage}")),
        }
    };
    match verb {
        "list" | "ls" => Ok(ShellCommand::List),
        "add" => {
            let (title, description) = split_details(rest);
            Ok(ShellCommand::Add {
                title,
                description: description.unwrap_or_default(),
            })
        }
        "edit" => {
            let (id, details) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            if id.is_empty() {
                return Err("usage: edit <id> <title> [| <description>]".into());
            }
            let (title, description) = split_details(details);
            Ok(ShellCommand::Edit {
                id: id.to_string(),
                title,
                description,
            })
        }
        "toggle" => require_id("toggle <id>").map(ShellCommand::Toggle),
        "delete" | "rm" => require_id("delete <id>").map(ShellCommand::Delete),
        "reload" => Ok(ShellCommand::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}' (try `help`)")),
    }
}

pub fn run(view: View, json_output: bool) -> i32 {
    let store = match super::open_store(view) {
        Ok(store) => store,
        Err(e) => return super::finish(Err(e), &[], json_output),
    };
    let stdin = io::stdin();
    match drive(store, stdin.lock(), json_output) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    }
}

fn render(view: View, tasks: &[Task]) {
    match view {
        View::Dashboard => output::text::print_dashboard(tasks),
        View::Completed => output::text::print_completed(tasks),
    }
}

fn view_json(view: View, tasks: &[Task]) -> Value {
    match view {
        View::Dashboard => output::json::dashboard_json(tasks),
        View::Completed => output::json::completed_json(tasks),
    }
}

/// Run one page session over `input`. The cache lives for the whole session.
pub fn drive<R: BufRead>(mut store: Store, input: R, json_output: bool) -> anyhow::Result<i32> {
    let view = store.view();
    if !json_output {
        store.subscribe(move |tasks| {
            println!();
            render(view, tasks);
        });
    }

    let loaded = store.load().map(|_| ());
    report(&mut store, loaded, json_output)?;

    for line in input.lines() {
        let line = line.context("reading shell command")?;
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(usage) => {
                report(&mut store, Err(TudooError::validation(usage)), json_output)?;
                continue;
            }
        };
        let result = match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                if json_output {
                    println!("{}", serde_json::json!({ "success": true, "data": { "help": HELP } }));
                } else {
                    println!("{HELP}");
                }
                continue;
            }
            ShellCommand::List => {
                if !json_output {
                    render(view, store.cache().tasks());
                }
                Ok(())
            }
            ShellCommand::Reload => store.load().map(|_| ()),
            ShellCommand::Add { title, description } => {
                let mut dialog = Dialog::open_with(TaskForm::new(title, description));
                dialog
                    .run(|form| form.submit(|f| store.create(&f.title, Some(&f.description))))
                    .map(|_| ())
            }
            ShellCommand::Edit { id, title, description } => edit(&mut store, &id, title, description),
            ShellCommand::Toggle(reference) => store
                .cache()
                .resolve(&reference)
                .map(|t| t.id.clone())
                .and_then(|id| store.toggle_status(&id))
                .map(|_| ()),
            ShellCommand::Delete(reference) => match store.cache().resolve(&reference) {
                Ok(task) => {
                    let mut confirm = DeleteConfirm::for_task(task);
                    confirm.confirm(|c| store.delete(&c.task_id)).map(|_| ())
                }
                Err(e) => Err(e),
            },
        };
        report(&mut store, result, json_output)?;
    }
    Ok(0)
}

fn edit(
    store: &mut Store,
    reference: &str,
    title: String,
    description: Option<String>,
) -> Result<(), TudooError> {
    let task = store.cache().resolve(reference)?.clone();
    let mut form = TaskForm::seeded_from(&task);
    form.title = title;
    if let Some(description) = description {
        form.description = description;
    }
    let mut dialog = Dialog::open_with(form);
    dialog
        .run(|form| form.submit(|f| store.edit(&task.id, &f.title, Some(&f.description))))
        .map(|_| ())
}

fn report(store: &mut Store, result: Result<(), TudooError>, json_output: bool) -> anyhow::Result<()> {
    let notes: Vec<Notification> = store.take_notifications();
    if json_output {
        let envelope = match &result {
            Ok(()) => output::json::success(view_json(store.view(), store.cache().tasks()), &notes),
            Err(e) => output::json::error(e, &notes),
        };
        let mut out = io::stdout().lock();
        writeln!(out, "{}", serde_json::to_string(&envelope)?).context("writing shell output")?;
    } else {
        output::text::print_notifications(&notes);
        if let Err(e) = &result {
            let reported = notes.iter().any(|n| n.is_error() && n.message == e.message);
            if !reported {
                eprintln!("Error: {}", e.message);
            }
        }
    }
    io::stdout().flush().context("flushing shell output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_and_without_description() {
        assert_eq!(
            parse_line("add Buy milk | 2 litres").unwrap(),
            ShellCommand::Add {
                title: "Buy milk".into(),
                description: "2 litres".into()
            }
        );
        assert_eq!(
            parse_line("add Buy milk").unwrap(),
            ShellCommand::Add {
                title: "Buy milk".into(),
                description: String::new()
            }
        );
    }

    #[test]
    fn edit_keeps_description_unless_piped() {
        assert_eq!(
            parse_line("edit 01AB New title").unwrap(),
            ShellCommand::Edit {
                id: "01AB".into(),
                title: "New title".into(),
                description: None
            }
        );
        assert_eq!(
            parse_line("edit 01AB New title |").unwrap(),
            ShellCommand::Edit {
                id: "01AB".into(),
                title: "New title".into(),
                description: Some(String::new())
            }
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        assert!(parse_line("frobnicate").is_err());
        assert!(parse_line("toggle").is_err());
        assert!(parse_line("edit").is_err());
        assert_eq!(parse_line("   ").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("toggle 01AB extra").unwrap(), ShellCommand::Toggle("01AB".into()));
    }
}
