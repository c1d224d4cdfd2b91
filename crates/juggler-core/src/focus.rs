//! Single-slot focus timer.
//!
//! At most one task is timed at a time. The timer never reads the clock
//! itself; callers pass `now` in.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FocusError;
use crate::model::TaskId;

/// The session currently being timed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFocus {
    pub task_id: TaskId,
    pub started_at: DateTime<Utc>,
}

/// A finished focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub task_id: TaskId,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl FocusSession {
    pub fn duration(&self) -> Duration {
        (self.ended_at - self.started_at).max(Duration::zero())
    }

    /// `"1h 5m 30s"`
    pub fn format_duration(&self) -> String {
        let secs = self.duration().num_seconds();
        format!("{}h {}m {}s", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTimer {
    active: Option<ActiveFocus>,
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveFocus> {
        self.active.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, task_id: TaskId, now: DateTime<Utc>) -> Result<(), FocusError> {
        if let Some(active) = &self.active {
            return Err(FocusError::AlreadyRunning {
                task_id: active.task_id.clone(),
            });
        }
        self.active = Some(ActiveFocus {
            task_id,
            started_at: now,
        });
        Ok(())
    }

    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<FocusSession, FocusError> {
        let active = self.active.take().ok_or(FocusError::NotRunning)?;
        Ok(FocusSession {
            task_id: active.task_id,
            started_at: active.started_at,
            ended_at: now,
        })
    }

    /// Drop a running session without recording it.
    pub fn cancel(&mut self) -> Option<ActiveFocus> {
        self.active.take()
    }
}
