//! Subcommand implementations and the helpers they share.

pub mod config;
pub mod dashboard;
pub mod focus;
pub mod plan;
pub mod project;
pub mod suggestion;
pub mod task;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use juggler_core::{
    demo, Config, LoadTier, Project, ProjectDna, ProjectId, SessionSnapshot, Store, SystemClock,
    Task, TaskId,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// The dashboard store backed by the session snapshot on disk.
pub struct Session {
    pub store: Store,
    pub config: Config,
    path: PathBuf,
}

impl Session {
    /// Load the saved session, or seed and save the demo session if none
    /// exists yet.
    pub fn open() -> CliResult<Self> {
        let config = Config::load_or_default();
        let path = SessionSnapshot::path()?;
        let energy = config.energy.available;

        let session = match SessionSnapshot::load_from(&path)? {
            Some(snapshot) => Self {
                store: Store::from_snapshot(snapshot, energy, Arc::new(SystemClock))?,
                config,
                path,
            },
            None => {
                let mut store = Store::with_system_clock(energy)?;
                demo::populate(&mut store)?;
                info!(path = %path.display(), "seeded demo session");
                let session = Self {
                    store,
                    config,
                    path,
                };
                session.save()?;
                session
            }
        };
        Ok(session)
    }

    pub fn save(&self) -> CliResult {
        self.store.snapshot().save_to(&self.path)?;
        Ok(())
    }
}

/// Match a project by id, unique id prefix or case-insensitive name.
pub fn resolve_project(store: &Store, query: &str) -> CliResult<ProjectId> {
    let projects = store.projects();
    if let Some(p) = projects.iter().find(|p| p.id.as_str() == query) {
        return Ok(p.id.clone());
    }
    if let Some(p) = projects.iter().find(|p| p.name.eq_ignore_ascii_case(query)) {
        return Ok(p.id.clone());
    }
    let matches: Vec<&Project> = projects
        .iter()
        .filter(|p| p.id.as_str().starts_with(query))
        .collect();
    match matches.as_slice() {
        [p] => Ok(p.id.clone()),
        [] => Err(format!("no project matches '{query}'").into()),
        _ => Err(format!("'{query}' matches {} projects", matches.len()).into()),
    }
}

/// Match a task by id or unique id prefix.
pub fn resolve_task(store: &Store, query: &str) -> CliResult<TaskId> {
    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| t.id.as_str() == query || t.id.as_str().starts_with(query))
        .collect();
    if let Some(exact) = matches.iter().find(|t| t.id.as_str() == query) {
        return Ok(exact.id.clone());
    }
    match matches.as_slice() {
        [t] => Ok(t.id.clone()),
        [] => Err(format!("no task matches '{query}'").into()),
        _ => Err(format!("'{query}' matches {} tasks", matches.len()).into()),
    }
}

/// Parse a deadline: RFC 3339, `YYYY-MM-DD` (midnight UTC) or a relative
/// offset such as `+3d` / `+12h`.
pub fn parse_deadline(input: &str, now: DateTime<Utc>) -> CliResult<DateTime<Utc>> {
    let input = input.trim();
    if let Some(rel) = input.strip_prefix('+') {
        let unit_at = rel.char_indices().last().map_or(0, |(i, _)| i);
        let (amount, unit) = rel.split_at(unit_at);
        let amount: i64 = amount
            .parse()
            .map_err(|_| format!("invalid relative deadline '{input}'"))?;
        let offset = match unit {
            "d" => Duration::try_days(amount),
            "h" => Duration::try_hours(amount),
            _ => return Err(format!("unknown unit in '{input}', use d or h").into()),
        };
        return offset
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or_else(|| "relative deadline out of range".into());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| format!("invalid deadline '{input}', expected YYYY-MM-DD, RFC 3339 or +Nd"))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// First eight characters of an id, enough to type back in.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn paint(text: &str, ansi: &str) -> String {
    if std::io::stdout().is_terminal() {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn tier_badge(tier: LoadTier) -> String {
    let code = match tier {
        LoadTier::Green => "32",
        LoadTier::Yellow => "33",
        LoadTier::Red => "31",
    };
    paint(&tier.to_string(), code)
}

pub fn dna_badge(dna: ProjectDna) -> String {
    let code = match dna {
        ProjectDna::DeepWork => "34",
        ProjectDna::BurstCreativity => "35",
        ProjectDna::ResearchAnalysis => "36",
        ProjectDna::ClientCommunication => "33",
        ProjectDna::RoutineMaintenance => "90",
    };
    paint(dna.label(), code)
}
