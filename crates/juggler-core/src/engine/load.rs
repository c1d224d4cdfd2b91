//! Cognitive load aggregation.
//!
//! Load is the raw effort sum of tasks on active projects, mapped onto the
//! juggling meter tiers:
//!
//! | total effort | tier   |
//! |--------------|--------|
//! | >= 30        | RED    |
//! | >= 15        | YELLOW |
//! | otherwise    | GREEN  |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::model::{Project, ProjectId, Task};

/// Lower bound (inclusive) of the YELLOW tier.
pub const YELLOW_THRESHOLD: u32 = 15;
/// Lower bound (inclusive) of the RED tier.
pub const RED_THRESHOLD: u32 = 30;
/// Effort at which the juggling meter reads 100%.
pub const METER_CAPACITY: u32 = 40;
/// Number of daily samples kept by [`LoadHistory`].
pub const HISTORY_DAYS: usize = 7;

/// Discretized load level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadTier {
    Green,
    Yellow,
    Red,
}

impl LoadTier {
    pub fn from_effort(total_effort: u32) -> Self {
        if total_effort >= RED_THRESHOLD {
            LoadTier::Red
        } else if total_effort >= YELLOW_THRESHOLD {
            LoadTier::Yellow
        } else {
            LoadTier::Green
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadTier::Green => "In the Zone",
            LoadTier::Yellow => "Juggling Act",
            LoadTier::Red => "Burnout Risk",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            LoadTier::Green => {
                "Your workload is balanced. This is a great time for deep, focused work."
            }
            LoadTier::Yellow => {
                "Your cognitive load is increasing. Stick to your top priorities and avoid taking on new tasks."
            }
            LoadTier::Red => {
                "Cognitive load is critical. Prioritize rest, and consider pausing low-impact work to recover."
            }
        }
    }
}

impl fmt::Display for LoadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadTier::Green => "GREEN",
            LoadTier::Yellow => "YELLOW",
            LoadTier::Red => "RED",
        };
        f.write_str(s)
    }
}

/// Output of [`aggregate_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub total_effort: u32,
    pub tier: LoadTier,
}

impl LoadReport {
    pub fn new(total_effort: u32) -> Self {
        Self {
            total_effort,
            tier: LoadTier::from_effort(total_effort),
        }
    }

    /// Meter fill, capped at 100. The raw total may exceed capacity.
    pub fn meter_percentage(&self) -> f64 {
        (f64::from(self.total_effort) / f64::from(METER_CAPACITY) * 100.0).min(100.0)
    }
}

impl Default for LoadReport {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Sum effort over tasks whose project exists and is active.
///
/// Orphaned tasks and tasks on paused/archived projects contribute nothing.
pub fn aggregate_load(tasks: &[Task], projects: &[Project]) -> LoadReport {
    let active: HashSet<&ProjectId> = projects
        .iter()
        .filter(|p| p.is_active())
        .map(|p| &p.id)
        .collect();

    let total_effort = tasks
        .iter()
        .filter(|t| active.contains(&t.project_id))
        .map(|t| t.effort_score)
        .fold(0u32, u32::saturating_add);

    LoadReport::new(total_effort)
}

/// One day's load reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSample {
    pub date: NaiveDate,
    pub total_effort: u32,
}

impl LoadSample {
    pub fn tier(&self) -> LoadTier {
        LoadTier::from_effort(self.total_effort)
    }
}

/// Rolling window of the last [`HISTORY_DAYS`] daily load readings,
/// oldest first. The latest reading of a day replaces earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadHistory {
    samples: VecDeque<LoadSample>,
}

impl LoadHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, total_effort: u32) {
        if let Some(last) = self.samples.back_mut() {
            if last.date == date {
                last.total_effort = total_effort;
                return;
            }
            // Clock moved backwards; keep the window ordered.
            if last.date > date {
                return;
            }
        }
        self.samples.push_back(LoadSample { date, total_effort });
        while self.samples.len() > HISTORY_DAYS {
            self.samples.pop_front();
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &LoadSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Highest daily effort in the window.
    pub fn peak(&self) -> Option<&LoadSample> {
        self.samples.iter().max_by_key(|s| s.total_effort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectDna, ProjectStatus, TaskId};
    use chrono::{TimeZone, Utc};

    fn project(id: &str, status: ProjectStatus) -> Project {
        Project {
            id: ProjectId::from(id),
            name: id.to_uppercase(),
            dna: ProjectDna::DeepWork,
            impact_score: 3,
            status,
            burnout_budget_usage: 0.0,
        }
    }

    fn task(id: &str, project: &str, effort: u32) -> Task {
        Task::new(
            TaskId::from(id),
            ProjectId::from(project),
            "work",
            Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap(),
            effort,
        )
    }

    #[test]
    fn empty_is_green_zero() {
        assert_eq!(aggregate_load(&[], &[]), LoadReport::new(0));
        assert_eq!(LoadReport::default().tier, LoadTier::Green);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(LoadTier::from_effort(14), LoadTier::Green);
        assert_eq!(LoadTier::from_effort(15), LoadTier::Yellow);
        assert_eq!(LoadTier::from_effort(29), LoadTier::Yellow);
        assert_eq!(LoadTier::from_effort(30), LoadTier::Red);
    }

    #[test]
    fn only_active_projects_count() {
        let projects = vec![
            project("a", ProjectStatus::Active),
            project("p", ProjectStatus::Paused),
            project("x", ProjectStatus::Archived),
        ];
        let tasks = vec![
            task("t1", "a", 6),
            task("t2", "p", 10),
            task("t3", "x", 10),
            task("t4", "gone", 10),
            task("t5", "a", 9),
        ];
        let report = aggregate_load(&tasks, &projects);
        assert_eq!(report.total_effort, 15);
        assert_eq!(report.tier, LoadTier::Yellow);
    }

    #[test]
    fn inactive_only_is_zero() {
        let projects = vec![
            project("p", ProjectStatus::Paused),
            project("x", ProjectStatus::Archived),
        ];
        let tasks = vec![task("t1", "p", 10), task("t2", "x", 10), task("t3", "x", 10)];
        assert_eq!(aggregate_load(&tasks, &projects).total_effort, 0);
    }

    #[test]
    fn meter_caps_at_hundred() {
        assert_eq!(LoadReport::new(20).meter_percentage(), 50.0);
        assert_eq!(LoadReport::new(55).meter_percentage(), 100.0);
    }

    #[test]
    fn history_keeps_latest_per_day_and_seven_days() {
        let mut history = LoadHistory::new();
        let day = |d: u32| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();

        history.record(day(1), 10);
        history.record(day(1), 12);
        assert_eq!(history.len(), 1);
        assert_eq!(history.samples().next().unwrap().total_effort, 12);

        for d in 2..=9 {
            history.record(day(d), d * 4);
        }
        assert_eq!(history.len(), HISTORY_DAYS);
        assert_eq!(history.samples().next().unwrap().date, day(3));
        assert_eq!(history.peak().unwrap().date, day(9));
        assert_eq!(history.peak().unwrap().tier(), LoadTier::Red);

        history.record(day(2), 99);
        assert_eq!(history.samples().last().unwrap().date, day(9));
    }
}
