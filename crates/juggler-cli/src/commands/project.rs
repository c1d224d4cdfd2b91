//! Project management commands for CLI.

use clap::Subcommand;
use juggler_core::{
    builtin_templates, find_template, NewProject, ProjectDna, ProjectPatch, ProjectStatus,
    Store,
};

use super::{dna_badge, parse_deadline, print_json, resolve_project, short_id, CliResult, Session};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project
    Add {
        /// Project name
        name: String,
        /// Working style: deep-work, burst-creativity, research-analysis,
        /// client-communication or routine-maintenance
        #[arg(long, default_value = "deep-work")]
        dna: ProjectDna,
        /// Impact score (1-5)
        #[arg(long, default_value_t = 3)]
        impact: u8,
        /// Burnout budget already used, in percent (0-100)
        #[arg(long, default_value_t = 0.0)]
        burnout: f64,
        /// Initial status: active, paused or archived
        #[arg(long, default_value = "active")]
        status: ProjectStatus,
    },
    /// List all projects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change name, DNA, impact or burnout usage
    Edit {
        /// Project id, id prefix or name
        project: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        dna: Option<ProjectDna>,
        #[arg(long)]
        impact: Option<u8>,
        #[arg(long)]
        burnout: Option<f64>,
    },
    /// Set a project's status
    Status {
        /// Project id, id prefix or name
        project: String,
        /// active, paused or archived
        status: ProjectStatus,
    },
    /// Delete a project (its tasks are kept)
    Remove {
        /// Project id, id prefix or name
        project: String,
    },
    /// List built-in project templates
    Templates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a project and its tasks from a template
    FromTemplate {
        /// Template name
        template: String,
        /// Deadline for every task (YYYY-MM-DD, RFC 3339 or +Nd)
        #[arg(long, default_value = "+14d")]
        deadline: String,
    },
}

pub fn run(action: ProjectAction) -> CliResult {
    match action {
        ProjectAction::Templates { json } => list_templates(json),
        action => {
            let mut session = Session::open()?;
            apply(&mut session.store, action)?;
            session.save()
        }
    }
}

fn apply(store: &mut Store, action: ProjectAction) -> CliResult {
    match action {
        ProjectAction::Add {
            name,
            dna,
            impact,
            burnout,
            status,
        } => {
            let id = store.add_project(
                NewProject::new(name, dna, impact)
                    .with_burnout(burnout)
                    .with_status(status),
            )?;
            println!("Project created: {id}");
        }
        ProjectAction::List { json } => {
            if json {
                return print_json(&store.projects());
            }
            if store.projects().is_empty() {
                println!("No projects.");
            }
            for p in store.projects() {
                let effort: u32 = store.tasks_for(&p.id).map(|t| t.effort_score).sum();
                println!(
                    "{}  {:<28} {:<22} impact {}  burnout {:>5.1}%  {:<8} effort {}",
                    short_id(p.id.as_str()),
                    p.name,
                    dna_badge(p.dna),
                    p.impact_score,
                    p.burnout_budget_usage,
                    p.status,
                    effort
                );
            }
        }
        ProjectAction::Edit {
            project,
            name,
            dna,
            impact,
            burnout,
        } => {
            let id = resolve_project(store, &project)?;
            store.update_project(
                &id,
                ProjectPatch {
                    name,
                    dna,
                    impact_score: impact,
                    burnout_budget_usage: burnout,
                },
            )?;
            println!("Project updated: {id}");
        }
        ProjectAction::Status { project, status } => {
            let id = resolve_project(store, &project)?;
            store.set_project_status(&id, status)?;
            println!("Project {id} is now {status}");
        }
        ProjectAction::Remove { project } => {
            let id = resolve_project(store, &project)?;
            let removed = store.remove_project(&id)?;
            let orphans = store.tasks_for(&id).count();
            println!("Project removed: {}", removed.name);
            if orphans > 0 {
                println!("{orphans} task(s) kept without a project");
            }
        }
        ProjectAction::FromTemplate { template, deadline } => {
            let template = find_template(&template)
                .ok_or_else(|| format!("unknown template '{template}'"))?;
            let deadline = parse_deadline(&deadline, store.now())?;
            let (id, tasks) = store.add_project_from_template(template, deadline)?;
            println!("Project created: {id} ({} tasks)", tasks.len());
        }
        ProjectAction::Templates { json } => list_templates(json)?,
    }
    Ok(())
}

fn list_templates(json: bool) -> CliResult {
    let templates = builtin_templates();
    if json {
        return print_json(&templates);
    }
    for t in templates {
        println!(
            "{} ({}, impact {}, total effort {})",
            t.name,
            t.dna,
            t.impact_score,
            t.total_effort()
        );
        for task in t.tasks {
            println!("  - [{:>2}] {}", task.effort_score, task.subtask);
        }
    }
    Ok(())
}
