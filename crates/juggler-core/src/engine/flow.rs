//! Flow rating: the per-task priority score.
//!
//! ```text
//! days        = max(1, deadline - now in days)
//! burnout     = burnout_budget_usage / 10
//! flow_rating = round2(impact * effort / (days + available_energy + burnout))
//! ```
//!
//! A missing project scores 0. A zero denominator scores +inf. The 1-day
//! floor keeps overdue tasks bounded while still ranking them above anything
//! due later.

use chrono::{DateTime, Utc};

use crate::model::{Project, Task};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Deadline distance in fractional days, floored at one day.
pub fn days_to_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = deadline.signed_duration_since(now).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).max(1.0)
}

/// Compute a task's flow rating.
///
/// Reads only `task.deadline`, `task.effort_score`, `project.impact_score`
/// and `project.burnout_budget_usage`. Inputs are not range-checked here;
/// the store validates them before they get this far.
pub fn calculate_flow_rating(
    task: &Task,
    project: Option<&Project>,
    available_energy: f64,
    now: DateTime<Utc>,
) -> f64 {
    let Some(project) = project else {
        return 0.0;
    };

    let days = days_to_deadline(task.deadline, now);
    let burnout_factor = project.burnout_budget_usage / 10.0;
    let denominator = days + available_energy + burnout_factor;

    if denominator == 0.0 {
        return f64::INFINITY;
    }

    let raw = f64::from(project.impact_score) * f64::from(task.effort_score) / denominator;
    round_to_hundredths(raw)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
