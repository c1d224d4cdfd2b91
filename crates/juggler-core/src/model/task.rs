use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectId, TaskId};

/// A unit of work belonging to exactly one project.
///
/// `flow_rating` is derived. It can be read but only the engine writes it,
/// so it is never ahead of (or behind) the data it was computed from once
/// the store has finished a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub description: String,
    pub deadline: DateTime<Utc>,
    /// 1-10, estimated difficulty
    pub effort_score: u32,
    #[serde(default)]
    flow_rating: f64,
    #[serde(default)]
    pub is_critical_path: bool,
}

impl Task {
    /// Task with a zero flow rating. Call the engine (or go through the
    /// store) to get a meaningful one.
    pub fn new(
        id: TaskId,
        project_id: ProjectId,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        effort_score: u32,
    ) -> Self {
        Self {
            id,
            project_id,
            description: description.into(),
            deadline,
            effort_score,
            flow_rating: 0.0,
            is_critical_path: false,
        }
    }

    pub fn critical(mut self) -> Self {
        self.is_critical_path = true;
        self
    }

    pub fn flow_rating(&self) -> f64 {
        self.flow_rating
    }

    pub(crate) fn set_flow_rating(&mut self, rating: f64) {
        self.flow_rating = rating;
    }
}

/// Input for creating a task. The store assigns the id and rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub effort_score: u32,
    #[serde(default)]
    pub is_critical_path: bool,
}

impl NewTask {
    pub fn new(
        project_id: ProjectId,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        effort_score: u32,
    ) -> Self {
        Self {
            project_id,
            description: description.into(),
            deadline,
            effort_score,
            is_critical_path: false,
        }
    }

    pub fn critical(mut self) -> Self {
        self.is_critical_path = true;
        self
    }
}

/// Partial update of a task. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub project_id: Option<ProjectId>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub effort_score: Option<u32>,
    pub is_critical_path: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.effort_score.is_none()
            && self.is_critical_path.is_none()
    }
}
