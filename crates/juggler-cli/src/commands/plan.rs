//! Planning assistant commands for CLI.
//!
//! The assistant runs first; its result is shown for review and only
//! written to the store when `--apply` is given.

use clap::Subcommand;
use juggler_core::insights::plan_items;
use juggler_core::{ConfiguredAssistant, PlanningAssistant, Task};
use std::future::Future;
use std::path::PathBuf;
use tracing::debug;

use super::{
    parse_deadline, print_json, resolve_project, resolve_task, CliResult, Session,
};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Break a goal into sub-tasks with effort estimates
    Decompose {
        /// The goal, in plain words
        goal: Option<String>,
        /// Read extra context (or the whole goal) from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// Project to add the sub-tasks to
        #[arg(long)]
        project: Option<String>,
        /// Deadline for the new tasks (YYYY-MM-DD, RFC 3339 or +Nd)
        #[arg(long, default_value = "+7d")]
        deadline: String,
        /// Add the sub-tasks to the project instead of only listing them
        #[arg(long, requires = "project")]
        apply: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Schedule today's tasks
    Day {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Starter draft for a task
    Draft {
        /// Task id or id prefix
        task: String,
    },
}

fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

fn goal_text(goal: Option<String>, file: Option<PathBuf>) -> CliResult<String> {
    let attachment = file.map(std::fs::read_to_string).transpose()?;
    match (goal, attachment) {
        (Some(goal), Some(doc)) => Ok(format!("{goal}\n\nContext document:\n{doc}")),
        (Some(goal), None) => Ok(goal),
        (None, Some(doc)) => Ok(doc),
        (None, None) => Err("give a goal or --file".into()),
    }
}

pub fn run(action: PlanAction) -> CliResult {
    let mut session = Session::open()?;
    let assistant = ConfiguredAssistant::from_config(&session.config.assistant)?;
    debug!(assistant = assistant.name(), "planning assistant ready");
    let store = &mut session.store;

    match action {
        PlanAction::Decompose {
            goal,
            file,
            project,
            deadline,
            apply,
            json,
        } => {
            let goal = goal_text(goal, file)?;
            let subtasks = block_on(assistant.decompose_goal(&goal))??;

            if json {
                print_json(&subtasks)?;
            } else {
                for (i, s) in subtasks.iter().enumerate() {
                    println!("{:>2}. [effort {:>2}] {}", i + 1, s.effort_score, s.subtask);
                }
            }

            if apply {
                let project = project.ok_or("--apply needs --project")?;
                let project_id = resolve_project(store, &project)?;
                let deadline = parse_deadline(&deadline, store.now())?;
                let new = subtasks
                    .into_iter()
                    .map(|s| s.into_new_task(project_id.clone(), deadline))
                    .collect();
                let ids = store.add_tasks(new)?;
                if !json {
                    println!("Added {} task(s).", ids.len());
                }
            }
        }
        PlanAction::Day { json } => {
            let schedulable: Vec<Task> = store
                .tasks()
                .iter()
                .filter(|t| store.project(&t.project_id).map_or(true, |p| p.is_active()))
                .cloned()
                .collect();
            let items = plan_items(&schedulable, store.projects());
            let plan = block_on(assistant.plan_day(&items))??;

            if json {
                print_json(&plan)?;
            } else if plan.is_empty() {
                println!("Nothing to schedule.");
            } else {
                for slot in &plan {
                    let description = store
                        .task(&slot.task_id)
                        .map_or(slot.task_id.as_str(), |t| t.description.as_str());
                    println!(
                        "{:>8}  {:>3}m  {}",
                        slot.start_time, slot.duration_minutes, description
                    );
                }
            }
        }
        PlanAction::Draft { task } => {
            let id = resolve_task(store, &task)?;
            let description = store
                .task(&id)
                .map(|t| t.description.clone())
                .ok_or("task vanished")?;
            let draft = block_on(assistant.draft_for(&description))??;
            println!("{draft}");
        }
    }

    session.save()
}
