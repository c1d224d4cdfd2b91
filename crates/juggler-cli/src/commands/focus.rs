//! Focus timer commands for CLI.

use clap::Subcommand;

use super::{print_json, resolve_task, CliResult, Session};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Start timing a task
    Start {
        /// Task id or id prefix
        task: String,
    },
    /// Stop the running session
    Stop {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the running session
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: FocusAction) -> CliResult {
    let mut session = Session::open()?;
    let store = &mut session.store;

    match action {
        FocusAction::Start { task } => {
            let id = resolve_task(store, &task)?;
            store.start_focus(&id)?;
            let description = store.task(&id).map_or("", |t| t.description.as_str());
            println!("Focus started: {description}");
        }
        FocusAction::Stop { json } => {
            let finished = store.stop_focus()?;
            if json {
                print_json(&finished)?;
            } else {
                println!("Focus session ended after {}", finished.format_duration());
            }
        }
        FocusAction::Status { json } => {
            let active = store.focus().active();
            if json {
                print_json(&active)?;
            } else if let Some(active) = active {
                let minutes = (store.now() - active.started_at).num_minutes().max(0);
                let description = store
                    .task(&active.task_id)
                    .map_or("(removed task)", |t| t.description.as_str());
                println!("Focusing on '{description}' for {minutes}m");
            } else {
                println!("No focus session running.");
            }
        }
    }

    session.save()
}
