//! Task management commands for CLI.

use clap::{Subcommand, ValueEnum};
use juggler_core::insights::{tasks_by_deadline_day, tasks_by_priority};
use juggler_core::links::{google_calendar_link, google_docs_link};
use juggler_core::{NewTask, Store, Task, TaskPatch};
use serde_json::json;

use super::{
    parse_deadline, print_json, resolve_project, resolve_task, short_id, CliResult, Session,
};

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum TaskOrder {
    /// Highest flow rating first
    #[default]
    Priority,
    /// Grouped by deadline day
    Deadline,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Project id, id prefix or name
        project: String,
        /// What needs doing
        description: String,
        /// Deadline (YYYY-MM-DD, RFC 3339 or +Nd / +Nh)
        #[arg(long, default_value = "+7d")]
        deadline: String,
        /// Effort score (1-10)
        #[arg(long, default_value_t = 5)]
        effort: u32,
        /// Mark as on the critical path
        #[arg(long)]
        critical: bool,
    },
    /// List tasks with their flow ratings
    List {
        /// Only tasks of this project
        #[arg(long)]
        project: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        order: TaskOrder,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a task
    Edit {
        /// Task id or id prefix
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        effort: Option<u32>,
        /// Move to another project
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        critical: Option<bool>,
    },
    /// Delete a task
    Remove {
        /// Task id or id prefix
        id: String,
    },
    /// Task details with calendar and docs links
    Show {
        /// Task id or id prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut session = Session::open()?;
    let store = &mut session.store;

    match action {
        TaskAction::Add {
            project,
            description,
            deadline,
            effort,
            critical,
        } => {
            let project_id = resolve_project(store, &project)?;
            let deadline = parse_deadline(&deadline, store.now())?;
            let mut new = NewTask::new(project_id, description, deadline, effort);
            if critical {
                new = new.critical();
            }
            let id = store.add_task(new)?;
            let rating = store.task(&id).map_or(0.0, Task::flow_rating);
            println!("Task created: {id} (flow rating {rating:.2})");
        }
        TaskAction::List {
            project,
            order,
            json,
        } => {
            let project_id = project
                .map(|p| resolve_project(store, &p))
                .transpose()?;
            let tasks: Vec<Task> = store
                .tasks()
                .iter()
                .filter(|t| project_id.as_ref().map_or(true, |p| &t.project_id == p))
                .cloned()
                .collect();
            match (order, json) {
                (TaskOrder::Priority, true) => print_json(&tasks_by_priority(&tasks))?,
                (TaskOrder::Deadline, true) => print_json(&tasks_by_deadline_day(&tasks))?,
                (TaskOrder::Priority, false) => {
                    if tasks.is_empty() {
                        println!("No tasks.");
                    }
                    for t in tasks_by_priority(&tasks) {
                        print_line(store, t);
                    }
                }
                (TaskOrder::Deadline, false) => {
                    for (day, day_tasks) in tasks_by_deadline_day(&tasks) {
                        println!("{day}");
                        for t in day_tasks {
                            print!("  ");
                            print_line(store, t);
                        }
                    }
                }
            }
        }
        TaskAction::Edit {
            id,
            description,
            deadline,
            effort,
            project,
            critical,
        } => {
            let id = resolve_task(store, &id)?;
            let patch = TaskPatch {
                project_id: project.map(|p| resolve_project(store, &p)).transpose()?,
                description,
                deadline: deadline
                    .map(|d| parse_deadline(&d, store.now()))
                    .transpose()?,
                effort_score: effort,
                is_critical_path: critical,
            };
            if patch.is_empty() {
                return Err("nothing to change".into());
            }
            store.update_task(&id, patch)?;
            let rating = store.task(&id).map_or(0.0, Task::flow_rating);
            println!("Task updated: {id} (flow rating {rating:.2})");
        }
        TaskAction::Remove { id } => {
            let id = resolve_task(store, &id)?;
            let removed = store.remove_task(&id)?;
            println!("Task removed: {}", removed.description);
        }
        TaskAction::Show { id, json } => {
            let id = resolve_task(store, &id)?;
            let task = store.task(&id).ok_or("task vanished")?;
            let project = store.project(&task.project_id);
            let calendar = google_calendar_link(task, project);
            let docs = google_docs_link(task, project);
            if json {
                print_json(&json!({
                    "task": task,
                    "project": project,
                    "calendar_link": calendar,
                    "docs_link": docs,
                }))?;
            } else {
                println!("{}", task.description);
                println!("  id:          {}", task.id);
                println!(
                    "  project:     {}",
                    project.map_or("(none)", |p| p.name.as_str())
                );
                println!("  deadline:    {}", task.deadline.format("%Y-%m-%d %H:%M UTC"));
                println!("  effort:      {}", task.effort_score);
                println!("  flow rating: {:.2}", task.flow_rating());
                println!("  critical:    {}", task.is_critical_path);
                println!("  calendar:    {calendar}");
                println!("  docs:        {docs}");
            }
        }
    }

    session.save()
}

fn print_line(store: &Store, t: &Task) {
    let project = store
        .project(&t.project_id)
        .map_or("(no project)", |p| p.name.as_str());
    println!(
        "{}  {:>6.2}  e{:<2} {} {}  [{}] due {}",
        short_id(t.id.as_str()),
        t.flow_rating(),
        t.effort_score,
        if t.is_critical_path { "*" } else { " " },
        t.description,
        project,
        t.deadline.format("%Y-%m-%d")
    );
}
