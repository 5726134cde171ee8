use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::deps::DependencyIndex;
use crate::error::Result;
use crate::eval::{Evaluation, Executability};
use crate::model::Task;
use crate::registry::{Added, Completion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn status_line(status: &Executability) -> String {
    if status.executable {
        "executable".green().to_string()
    } else {
        format!(
            "{} (waiting on: {})",
            "blocked".red(),
            status.pending_dependencies.join(", ")
        )
    }
}

fn print_task_pretty(task: &Task, status: Option<&Executability>) {
    println!("{} (priority {})", task.name.bold(), task.priority);
    if !task.dependencies.is_empty() {
        println!("  depends on: {}", task.dependencies.join(", "));
    }
    if let Some(deadline) = task.deadline {
        println!("  deadline: {}", deadline);
    }
    if let Some(status) = status {
        println!("  {}", status_line(status));
    }
}

fn minimal_header() {
    println!("{:>4} {:16} {:>8} {:10} DEPS", "SEQ", "NAME", "PRIORITY", "DEADLINE");
    println!("{}", "-".repeat(50));
}

fn minimal_row(task: &Task) {
    let deadline = task
        .deadline
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".into());
    println!(
        "{:>4} {:16} {:>8} {:10} {}",
        task.sequence,
        truncate_name(&task.name, 16),
        task.priority,
        deadline,
        task.dependencies.len()
    );
}

pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() > max_len {
        let truncated: String = name.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        name.to_string()
    }
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(task)?,
        Format::Pretty => print_task_pretty(task, None),
        Format::Minimal => minimal_row(task),
    }
    Ok(())
}

pub fn print_tasks(tasks: &[&Task], format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(tasks)?,
        Format::Pretty => {
            if tasks.is_empty() {
                println!("No pending tasks");
            }
            for task in tasks {
                print_task_pretty(task, None);
                println!();
            }
        }
        Format::Minimal => {
            minimal_header();
            for task in tasks {
                minimal_row(task);
            }
        }
    }
    Ok(())
}

pub fn print_added(added: &Added, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(added)?,
        Format::Pretty => {
            println!("added {}", added.task.name.bold());
            print_task_pretty(&added.task, Some(&added.status));
        }
        Format::Minimal => println!("{}", added.task.name),
    }
    Ok(())
}

#[derive(Serialize)]
struct TaskStatus<'a> {
    #[serde(flatten)]
    task: &'a Task,
    status: &'static str,
    #[serde(flatten)]
    executability: &'a Executability,
    dependents: &'a [String],
}

#[derive(Serialize)]
struct CompletedStatus<'a> {
    name: &'a str,
    status: &'static str,
    dependents: &'a [String],
}

pub fn print_pending_status(
    task: &Task,
    executability: &Executability,
    dependents: &[String],
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => print_json(&TaskStatus {
            task,
            status: "pending",
            executability,
            dependents,
        })?,
        Format::Pretty => {
            print_task_pretty(task, Some(executability));
            if !dependents.is_empty() {
                println!("  required by: {}", dependents.join(", "));
            }
        }
        Format::Minimal => {
            let state = if executability.executable {
                "executable"
            } else {
                "blocked"
            };
            println!("{} pending {}", task.name, state);
        }
    }
    Ok(())
}

pub fn print_completed_status(name: &str, dependents: &[String], format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(&CompletedStatus {
            name,
            status: "completed",
            dependents,
        })?,
        Format::Pretty => {
            println!("{} ({})", name.bold(), "completed".green());
            if !dependents.is_empty() {
                println!("  required by: {}", dependents.join(", "));
            }
        }
        Format::Minimal => println!("{} completed", name),
    }
    Ok(())
}

fn print_evaluation_pretty(evaluation: &Evaluation) {
    if evaluation.executable.is_empty() && evaluation.blocked.is_empty() {
        println!("No pending tasks");
        return;
    }
    if !evaluation.executable.is_empty() {
        println!("{}", "executable:".green());
        for name in &evaluation.executable {
            println!("  - {}", name);
        }
    }
    if !evaluation.blocked.is_empty() {
        println!("{}", "blocked:".red());
        for blocked in &evaluation.blocked {
            println!(
                "  - {} (waiting on: {})",
                blocked.name,
                blocked.pending_dependencies.join(", ")
            );
        }
    }
}

pub fn print_evaluation(evaluation: &Evaluation, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(evaluation)?,
        Format::Pretty => print_evaluation_pretty(evaluation),
        Format::Minimal => {
            for name in &evaluation.executable {
                println!("{} executable", name);
            }
            for blocked in &evaluation.blocked {
                println!("{} blocked", blocked.name);
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CompletionReport<'a> {
    #[serde(flatten)]
    completion: &'a Completion,
    saved: bool,
}

pub fn print_completion(completion: &Completion, saved: bool, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(&CompletionReport { completion, saved })?,
        Format::Pretty => {
            println!("completed {}", completion.completed.bold());
            if !saved {
                println!("{}", "warning: state could not be saved".yellow());
            }
            print_evaluation_pretty(&completion.remaining);
        }
        Format::Minimal => println!("{}", completion.completed),
    }
    Ok(())
}

pub fn print_dependencies(index: &DependencyIndex, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(index)?,
        Format::Pretty => {
            if index.is_empty() {
                println!("No dependencies recorded");
            }
            for (dependency, dependents) in index.iter() {
                let names: Vec<&str> = dependents.iter().map(String::as_str).collect();
                println!("{} is required by: {}", dependency.bold(), names.join(", "));
            }
        }
        Format::Minimal => {
            for (dependency, dependents) in index.iter() {
                for dependent in dependents {
                    println!("{} -> {}", dependency, dependent);
                }
            }
        }
    }
    Ok(())
}
