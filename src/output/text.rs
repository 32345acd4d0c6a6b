use crate::models::{Task, TaskStatus, User};
use crate::store::{Level, Notification, Partition};

pub fn print_notifications(notes: &[Notification]) {
    for n in notes {
        match n.level {
            Level::Success => println!("{}", n.message),
            Level::Error => eprintln!("Error: {}", n.message),
        }
    }
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Done => "[x]",
    }
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", t.status.as_str());
    println!("  Created: {}", t.created_at);
    println!("  Updated: {}", t.updated_at);
}

fn print_task_line(t: &Task) {
    println!("  {} {} ({})", status_marker(t.status), t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("      {desc}");
    }
}

pub fn print_dashboard(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks yet");
        println!("  Start your productivity journey: tudoo task add <title>");
        return;
    }
    let partition = Partition::of(tasks);
    for (i, status) in TaskStatus::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({})", status.label(), partition.count(status));
        for t in partition.column(status) {
            print_task_line(t);
        }
    }
}

pub fn print_completed(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No completed tasks yet");
        println!("  Complete tasks to see them here");
        return;
    }
    let noun = if tasks.len() == 1 { "task" } else { "tasks" };
    println!("Completed Tasks");
    println!("You've completed {} {noun}", tasks.len());
    for t in tasks {
        print_task_line(t);
    }
}

pub fn print_settings(user: &User, version: &str) {
    println!("Account");
    println!("  Email: {}", user.email);
    println!();
    println!("About Tudoo");
    println!("  Version: {version}");
    println!("  Storage: SQLite");
}
