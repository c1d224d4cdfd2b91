//! Read-only views over rated tasks: priority order, the critical few,
//! the juggling meter detail list, DNA grouping and the calendar index.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::model::{Project, ProjectDna, ProjectId, Task, TaskId};

fn by_rating_desc(a: &&Task, b: &&Task) -> Ordering {
    b.flow_rating().total_cmp(&a.flow_rating())
}

/// Tasks ordered by flow rating, highest first. Equal ratings keep their
/// input order.
pub fn tasks_by_priority(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(by_rating_desc);
    sorted
}

/// The `n` highest-rated tasks.
pub fn critical_few(tasks: &[Task], n: usize) -> Vec<&Task> {
    let mut top = tasks_by_priority(tasks);
    top.truncate(n);
    top
}

/// Tasks at or above `threshold` effort, in input order.
pub fn high_effort_tasks(tasks: &[Task], threshold: u32) -> Vec<&Task> {
    tasks.iter().filter(|t| t.effort_score >= threshold).collect()
}

/// Priority-ordered tasks per DNA category, in [`ProjectDna::ALL`] order.
/// Empty categories and orphaned tasks are left out.
pub fn group_by_dna<'a>(
    tasks: &'a [Task],
    projects: &[Project],
) -> Vec<(ProjectDna, Vec<&'a Task>)> {
    let dna_of: HashMap<&ProjectId, ProjectDna> =
        projects.iter().map(|p| (&p.id, p.dna)).collect();

    let mut groups: BTreeMap<ProjectDna, Vec<&Task>> = BTreeMap::new();
    for task in tasks_by_priority(tasks) {
        if let Some(dna) = dna_of.get(&task.project_id) {
            groups.entry(*dna).or_default().push(task);
        }
    }
    groups.into_iter().collect()
}

/// Tasks keyed by the UTC calendar day of their deadline.
pub fn tasks_by_deadline_day(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        days.entry(task.deadline.date_naive()).or_default().push(task);
    }
    days
}

/// What the planning assistant gets to see about a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanItem {
    pub task_id: TaskId,
    pub description: String,
    pub effort_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_dna: Option<ProjectDna>,
}

/// Priority-ordered plan items for the day planner.
pub fn plan_items(tasks: &[Task], projects: &[Project]) -> Vec<PlanItem> {
    let dna_of: HashMap<&ProjectId, ProjectDna> =
        projects.iter().map(|p| (&p.id, p.dna)).collect();

    tasks_by_priority(tasks)
        .into_iter()
        .map(|t| PlanItem {
            task_id: t.id.clone(),
            description: t.description.clone(),
            effort_score: t.effort_score,
            project_dna: dna_of.get(&t.project_id).copied(),
        })
        .collect()
}
