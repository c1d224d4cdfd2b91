//! Pause advisor and the suggestion state machine around it.
//!
//! ```text
//!            advisor yields            accept / dismiss
//!   Idle ─────────────────> Pending ─────────────────────> Idle
//!    ^                         |
//!    |   new day / reset       | dismiss for today
//!    +───────── Suppressed <───+
//! ```
//!
//! [`suggest_pause`] is pure. The store owns a [`SuggestionState`] and only
//! asks the advisor while the state is `Idle`, so a suggestion is raised at
//! most once until the user acts on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::load::LoadTier;
use crate::model::{Project, Task};

/// Recommendation to pause one active project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauseSuggestion {
    pub project: Project,
    /// Effort that would leave the load if the project were paused
    pub effort_reduction: u32,
}

/// Decide whether to suggest pausing a project.
///
/// Returns `None` unless the tier is RED, nothing is pending or suppressed,
/// at least two projects are active and the chosen project has tasks with
/// non-zero effort. The chosen project is the active one with the lowest
/// impact score; on a tie the one listed first in `projects` wins.
pub fn suggest_pause(
    projects: &[Project],
    tasks: &[Task],
    tier: LoadTier,
    suppressed: bool,
    suggestion_already_active: bool,
) -> Option<PauseSuggestion> {
    if tier != LoadTier::Red || suggestion_already_active || suppressed {
        return None;
    }

    let mut active = projects.iter().filter(|p| p.is_active()).peekable();
    let first = active.next()?;
    active.peek()?;

    // min_by_key keeps the first of equal minima.
    let candidate = std::iter::once(first)
        .chain(active)
        .min_by_key(|p| p.impact_score)?;

    let effort_reduction = tasks
        .iter()
        .filter(|t| t.project_id == candidate.id)
        .map(|t| t.effort_score)
        .fold(0u32, u32::saturating_add);

    if effort_reduction == 0 {
        return None;
    }

    Some(PauseSuggestion {
        project: candidate.clone(),
        effort_reduction,
    })
}

/// Caller-owned gate around [`suggest_pause`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SuggestionState {
    /// No suggestion on screen
    #[default]
    Idle,
    /// A suggestion waits for accept or dismiss
    Pending { suggestion: PauseSuggestion },
    /// User asked not to be bothered again today
    Suppressed { on: NaiveDate },
}

impl SuggestionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SuggestionState::Pending { .. })
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, SuggestionState::Suppressed { .. })
    }

    pub fn pending(&self) -> Option<&PauseSuggestion> {
        match self {
            SuggestionState::Pending { suggestion } => Some(suggestion),
            _ => None,
        }
    }

    /// Idle -> Pending if the advisor produced something. Other states are
    /// left alone.
    pub fn offer(&mut self, suggestion: Option<PauseSuggestion>) -> bool {
        if *self != SuggestionState::Idle {
            return false;
        }
        match suggestion {
            Some(suggestion) => {
                *self = SuggestionState::Pending { suggestion };
                true
            }
            None => false,
        }
    }

    /// Pending -> Idle, handing back the accepted suggestion.
    pub fn accept(&mut self) -> Option<PauseSuggestion> {
        match std::mem::take(self) {
            SuggestionState::Pending { suggestion } => Some(suggestion),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Pending -> Idle, or Pending -> Suppressed when `suppress_on` is set.
    /// Returns false if nothing was pending.
    pub fn dismiss(&mut self, suppress_on: Option<NaiveDate>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = match suppress_on {
            Some(on) => SuggestionState::Suppressed { on },
            None => SuggestionState::Idle,
        };
        true
    }

    /// Suppressed -> Idle once `today` differs from the suppression day.
    pub fn expire(&mut self, today: NaiveDate) -> bool {
        match self {
            SuggestionState::Suppressed { on } if *on != today => {
                *self = SuggestionState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Suppressed -> Idle unconditionally.
    pub fn reset(&mut self) -> bool {
        if self.is_suppressed() {
            *self = SuggestionState::Idle;
            true
        } else {
            false
        }
    }
}
