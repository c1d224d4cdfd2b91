//! Dashboard store.
//!
//! Owns the project and task collections and is the only way to mutate
//! them. Every mutating method validates its input, applies the change and
//! then runs the engine in sequence:
//!
//! ```text
//! mutate -> flow ratings -> load report -> pause advisor -> load history
//! ```
//!
//! Readers only get `&self` access, so they never observe a collection
//! whose derived values are out of date.
//!
//! ## Input ranges
//!
//! | field                  | accepted          |
//! |------------------------|-------------------|
//! | `impact_score`         | 1..=5             |
//! | `effort_score`         | 1..=10            |
//! | `burnout_budget_usage` | 0.0..=100.0       |
//! | `available_energy`     | 0.0..=10.0        |
//!
//! Out-of-range input is rejected, never clamped.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::engine::{
    aggregate_load, calculate_flow_rating, suggest_pause, LoadHistory, LoadReport,
    PauseSuggestion, SuggestionState,
};
use crate::error::{CoreError, Result, ValidationError};
use crate::focus::{FocusSession, FocusTimer};
use crate::model::{
    NewProject, NewTask, Project, ProjectId, ProjectPatch, ProjectStatus, Task, TaskId, TaskPatch,
};
use crate::storage::SessionSnapshot;
use crate::templates::ProjectTemplate;

pub const IMPACT_RANGE: (u32, u32) = (1, 5);
pub const EFFORT_RANGE: (u32, u32) = (1, 10);
pub const BURNOUT_RANGE: (f64, f64) = (0.0, 100.0);
pub const ENERGY_RANGE: (f64, f64) = (0.0, 10.0);

fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn check_score(field: &'static str, value: u32, (min, max): (u32, u32)) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::ScoreOutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn check_value(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::ValueOutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Check an available-energy value.
pub fn validate_energy(value: f64) -> Result<(), ValidationError> {
    check_value("available_energy", value, ENERGY_RANGE)
}

fn validate_project_fields(
    name: &str,
    impact_score: u8,
    burnout_budget_usage: f64,
) -> Result<(), ValidationError> {
    check_text("name", name)?;
    check_score("impact_score", u32::from(impact_score), IMPACT_RANGE)?;
    check_value("burnout_budget_usage", burnout_budget_usage, BURNOUT_RANGE)
}

fn validate_task_fields(description: &str, effort_score: u32) -> Result<(), ValidationError> {
    check_text("description", description)?;
    check_score("effort_score", effort_score, EFFORT_RANGE)
}

pub struct Store {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    available_energy: f64,
    clock: Arc<dyn Clock>,
    load: LoadReport,
    suggestion: SuggestionState,
    focus: FocusTimer,
    history: LoadHistory,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("projects", &self.projects.len())
            .field("tasks", &self.tasks.len())
            .field("available_energy", &self.available_energy)
            .field("load", &self.load)
            .field("suggestion", &self.suggestion)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Empty store.
    ///
    /// # Errors
    /// Returns a validation error if `available_energy` is out of range.
    pub fn new(available_energy: f64, clock: Arc<dyn Clock>) -> Result<Self> {
        validate_energy(available_energy)?;
        let mut store = Self {
            projects: Vec::new(),
            tasks: Vec::new(),
            available_energy,
            clock,
            load: LoadReport::default(),
            suggestion: SuggestionState::default(),
            focus: FocusTimer::default(),
            history: LoadHistory::default(),
        };
        store.recompute();
        Ok(store)
    }

    pub fn with_system_clock(available_energy: f64) -> Result<Self> {
        Self::new(available_energy, Arc::new(SystemClock))
    }

    /// Rebuild a store from a saved session. All records are re-validated
    /// and every flow rating is recomputed before the store is returned.
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        available_energy: f64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        validate_energy(available_energy)?;
        for p in &snapshot.projects {
            validate_project_fields(&p.name, p.impact_score, p.burnout_budget_usage)?;
        }
        for t in &snapshot.tasks {
            validate_task_fields(&t.description, t.effort_score)?;
        }

        let mut store = Self {
            projects: snapshot.projects,
            tasks: snapshot.tasks,
            available_energy,
            clock,
            load: LoadReport::default(),
            suggestion: snapshot.suggestion,
            focus: snapshot.focus,
            history: snapshot.history,
        };
        store.recompute();
        Ok(store)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            projects: self.projects.clone(),
            tasks: self.tasks.clone(),
            suggestion: self.suggestion.clone(),
            focus: self.focus.clone(),
            history: self.history.clone(),
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn tasks_for(&self, project_id: &ProjectId) -> impl Iterator<Item = &Task> {
        let project_id = project_id.clone();
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn load(&self) -> LoadReport {
        self.load
    }

    pub fn suggestion(&self) -> &SuggestionState {
        &self.suggestion
    }

    pub fn pending_suggestion(&self) -> Option<&PauseSuggestion> {
        self.suggestion.pending()
    }

    pub fn history(&self) -> &LoadHistory {
        &self.history
    }

    pub fn focus(&self) -> &FocusTimer {
        &self.focus
    }

    pub fn available_energy(&self) -> f64 {
        self.available_energy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ── Project mutations ───────────────────────────────────────────────

    pub fn add_project(&mut self, new: NewProject) -> Result<ProjectId> {
        validate_project_fields(&new.name, new.impact_score, new.burnout_budget_usage)?;

        let id = ProjectId::generate();
        self.projects.push(Project {
            id: id.clone(),
            name: new.name.trim().to_string(),
            dna: new.dna,
            impact_score: new.impact_score,
            status: new.status,
            burnout_budget_usage: new.burnout_budget_usage,
        });
        debug!(project_id = %id, "project added");
        self.recompute();
        Ok(id)
    }

    /// Create a project and all of a template's tasks, due at `deadline`.
    pub fn add_project_from_template(
        &mut self,
        template: &ProjectTemplate,
        deadline: DateTime<Utc>,
    ) -> Result<(ProjectId, Vec<TaskId>)> {
        let project_id = self.add_project(template.new_project())?;
        let tasks = template
            .tasks
            .iter()
            .map(|t| NewTask::new(project_id.clone(), t.subtask, deadline, t.effort_score))
            .collect();
        let task_ids = self.add_tasks(tasks)?;
        Ok((project_id, task_ids))
    }

    pub fn update_project(&mut self, id: &ProjectId, patch: ProjectPatch) -> Result<()> {
        let project = self
            .project(id)
            .ok_or_else(|| CoreError::ProjectNotFound(id.clone()))?;

        let name = patch.name.as_deref().unwrap_or(&project.name);
        let impact = patch.impact_score.unwrap_or(project.impact_score);
        let burnout = patch
            .burnout_budget_usage
            .unwrap_or(project.burnout_budget_usage);
        validate_project_fields(name, impact, burnout)?;

        let name = name.trim().to_string();
        let project = self.project_mut(id)?;
        project.name = name;
        project.impact_score = impact;
        project.burnout_budget_usage = burnout;
        if let Some(dna) = patch.dna {
            project.dna = dna;
        }
        self.recompute();
        Ok(())
    }

    pub fn set_project_status(&mut self, id: &ProjectId, status: ProjectStatus) -> Result<()> {
        let project = self.project_mut(id)?;
        if project.status != status {
            info!(project = %project.name, from = %project.status, to = %status, "project status changed");
            project.status = status;
        }
        self.recompute();
        Ok(())
    }

    /// Remove a project. Its tasks stay behind as orphans that score 0 and
    /// do not count towards load. A pending suggestion to pause it is
    /// dropped.
    pub fn remove_project(&mut self, id: &ProjectId) -> Result<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CoreError::ProjectNotFound(id.clone()))?;
        let removed = self.projects.remove(index);
        debug!(project_id = %id, "project removed");
        self.recompute();
        Ok(removed)
    }

    // ── Task mutations ──────────────────────────────────────────────────

    pub fn add_task(&mut self, new: NewTask) -> Result<TaskId> {
        let mut ids = self.add_tasks(vec![new])?;
        Ok(ids.remove(0))
    }

    /// Add a batch of tasks. Either all of them are added or none.
    pub fn add_tasks(&mut self, new: Vec<NewTask>) -> Result<Vec<TaskId>> {
        for t in &new {
            validate_task_fields(&t.description, t.effort_score)?;
            if self.project(&t.project_id).is_none() {
                return Err(CoreError::ProjectNotFound(t.project_id.clone()));
            }
        }

        let ids: Vec<TaskId> = new
            .into_iter()
            .map(|t| {
                let id = TaskId::generate();
                let mut task = Task::new(
                    id.clone(),
                    t.project_id,
                    t.description.trim(),
                    t.deadline,
                    t.effort_score,
                );
                task.is_critical_path = t.is_critical_path;
                self.tasks.push(task);
                id
            })
            .collect();
        debug!(count = ids.len(), "tasks added");
        self.recompute();
        Ok(ids)
    }

    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> Result<()> {
        let task = self
            .task(id)
            .ok_or_else(|| CoreError::TaskNotFound(id.clone()))?;

        let description = patch.description.as_deref().unwrap_or(&task.description);
        let effort = patch.effort_score.unwrap_or(task.effort_score);
        validate_task_fields(description, effort)?;
        if let Some(project_id) = &patch.project_id {
            if self.project(project_id).is_none() {
                return Err(CoreError::ProjectNotFound(project_id.clone()));
            }
        }

        let description = description.trim().to_string();
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.clone()))?;
        task.description = description;
        task.effort_score = effort;
        if let Some(project_id) = patch.project_id {
            task.project_id = project_id;
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = deadline;
        }
        if let Some(critical) = patch.is_critical_path {
            task.is_critical_path = critical;
        }
        self.recompute();
        Ok(())
    }

    /// Remove a task, cancelling its focus session if one is running.
    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.clone()))?;
        let removed = self.tasks.remove(index);
        if self.focus.active().is_some_and(|a| &a.task_id == id) {
            self.focus.cancel();
        }
        debug!(task_id = %id, "task removed");
        self.recompute();
        Ok(removed)
    }

    // ── Engine inputs ───────────────────────────────────────────────────

    pub fn set_available_energy(&mut self, energy: f64) -> Result<()> {
        validate_energy(energy)?;
        self.available_energy = energy;
        self.recompute();
        Ok(())
    }

    /// Re-run the engine against the current time without changing data.
    pub fn refresh(&mut self) {
        self.recompute();
    }

    // ── Pause suggestion ────────────────────────────────────────────────

    /// Pause the suggested project and clear the suggestion.
    pub fn accept_pause_suggestion(&mut self) -> Result<PauseSuggestion> {
        let accepted = self
            .suggestion
            .accept()
            .ok_or(CoreError::NoPendingSuggestion)?;
        info!(
            project = %accepted.project.name,
            effort_reduction = accepted.effort_reduction,
            "pause suggestion accepted"
        );
        self.set_project_status(&accepted.project.id, ProjectStatus::Paused)?;
        Ok(accepted)
    }

    /// Dismiss the pending suggestion. With `for_today`, no further
    /// suggestions are raised until the clock reaches the next day or
    /// [`Store::reset_suggestion_suppression`] is called.
    pub fn dismiss_pause_suggestion(&mut self, for_today: bool) -> Result<()> {
        let today = for_today.then(|| self.clock.now().date_naive());
        if !self.suggestion.dismiss(today) {
            return Err(CoreError::NoPendingSuggestion);
        }
        info!(for_today, "pause suggestion dismissed");
        self.recompute();
        Ok(())
    }

    pub fn reset_suggestion_suppression(&mut self) -> bool {
        let reset = self.suggestion.reset();
        if reset {
            self.recompute();
        }
        reset
    }

    // ── Focus timer ─────────────────────────────────────────────────────

    pub fn start_focus(&mut self, task_id: &TaskId) -> Result<()> {
        if self.task(task_id).is_none() {
            return Err(CoreError::TaskNotFound(task_id.clone()));
        }
        let now = self.clock.now();
        self.focus.start(task_id.clone(), now)?;
        info!(task_id = %task_id, "focus session started");
        Ok(())
    }

    pub fn stop_focus(&mut self) -> Result<FocusSession> {
        let session = self.focus.stop(self.clock.now())?;
        info!(
            task_id = %session.task_id,
            duration = %session.format_duration(),
            "focus session ended"
        );
        Ok(session)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn project_mut(&mut self, id: &ProjectId) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CoreError::ProjectNotFound(id.clone()))
    }

    fn recompute(&mut self) {
        let now = self.clock.now();
        let today = now.date_naive();

        if self.suggestion.expire(today) {
            debug!("pause suggestion suppression expired");
        }
        let stale = self
            .suggestion
            .pending()
            .is_some_and(|s| !self.projects.iter().any(|p| p.id == s.project.id));
        if stale && self.suggestion.dismiss(None) {
            debug!("pause suggestion dropped, its project was removed");
        }

        let by_id: HashMap<&ProjectId, &Project> =
            self.projects.iter().map(|p| (&p.id, p)).collect();
        for task in self.tasks.iter_mut() {
            let project = by_id.get(&task.project_id).copied();
            let rating = calculate_flow_rating(task, project, self.available_energy, now);
            task.set_flow_rating(rating);
        }

        self.load = aggregate_load(&self.tasks, &self.projects);

        let candidate = suggest_pause(
            &self.projects,
            &self.tasks,
            self.load.tier,
            self.suggestion.is_suppressed(),
            self.suggestion.is_pending(),
        );
        if self.suggestion.offer(candidate) {
            if let Some(s) = self.suggestion.pending() {
                info!(
                    project = %s.project.name,
                    effort_reduction = s.effort_reduction,
                    "pause suggested"
                );
            }
        }

        self.history.record(today, self.load.total_effort);

        debug!(
            tasks = self.tasks.len(),
            total_effort = self.load.total_effort,
            tier = %self.load.tier,
            "recomputed"
        );
    }
}
