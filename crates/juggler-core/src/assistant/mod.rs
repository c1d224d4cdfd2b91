//! Planning assistant port.
//!
//! Goal decomposition, day planning and draft generation are delegated to
//! a [`PlanningAssistant`]. The engine never waits on one: callers await the
//! assistant first and then apply the result through a synchronous
//! [`crate::store::Store`] mutation.
//!
//! Implementations:
//! - [`OfflineAssistant`]: deterministic heuristics, no network
//! - [`GeminiAssistant`]: Gemini `generateContent` over HTTP
//! - [`FallbackAssistant`]: wraps another assistant and substitutes the
//!   offline answer when it fails

mod gemini;
mod offline;

pub use gemini::GeminiAssistant;
pub use offline::{duration_for_effort, OfflineAssistant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AssistantError;
use crate::insights::PlanItem;
use crate::model::{NewTask, ProjectId, TaskId};
use crate::storage::{AssistantConfig, AssistantProvider};

/// One sub-task proposed for a goal, awaiting user review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecomposedTask {
    pub subtask: String,
    pub effort_score: u32,
}

impl DecomposedTask {
    pub fn new(subtask: impl Into<String>, effort_score: u32) -> Self {
        Self {
            subtask: subtask.into(),
            effort_score,
        }
    }

    /// Turn a reviewed sub-task into store input.
    pub fn into_new_task(self, project_id: ProjectId, deadline: DateTime<Utc>) -> NewTask {
        NewTask::new(project_id, self.subtask, deadline, self.effort_score)
    }
}

/// One slot of a generated day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task_id: TaskId,
    /// Wall-clock label such as `"9:00 AM"`
    pub start_time: String,
    pub duration_minutes: u32,
}

#[allow(async_fn_in_trait)]
pub trait PlanningAssistant {
    /// Break a free-text goal into sub-tasks with effort estimates.
    async fn decompose_goal(&self, goal: &str) -> Result<Vec<DecomposedTask>, AssistantError>;

    /// Lay out a day from priority-ordered tasks.
    async fn plan_day(&self, items: &[PlanItem]) -> Result<Vec<ScheduledTask>, AssistantError>;

    /// Markdown starter draft for a task.
    async fn draft_for(&self, task_description: &str) -> Result<String, AssistantError>;
}

/// Wraps an assistant and answers with [`OfflineAssistant`] whenever the
/// wrapped one fails.
#[derive(Debug, Clone)]
pub struct FallbackAssistant<A> {
    primary: A,
    offline: OfflineAssistant,
}

impl<A> FallbackAssistant<A> {
    pub fn new(primary: A) -> Self {
        Self {
            primary,
            offline: OfflineAssistant,
        }
    }
}

impl<A: PlanningAssistant> PlanningAssistant for FallbackAssistant<A> {
    async fn decompose_goal(&self, goal: &str) -> Result<Vec<DecomposedTask>, AssistantError> {
        match self.primary.decompose_goal(goal).await {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                warn!(error = %e, "goal decomposition failed, using offline result");
                self.offline.decompose_goal(goal).await
            }
        }
    }

    async fn plan_day(&self, items: &[PlanItem]) -> Result<Vec<ScheduledTask>, AssistantError> {
        match self.primary.plan_day(items).await {
            Ok(plan) => Ok(plan),
            Err(e) => {
                warn!(error = %e, "day planning failed, using offline result");
                self.offline.plan_day(items).await
            }
        }
    }

    async fn draft_for(&self, task_description: &str) -> Result<String, AssistantError> {
        match self.primary.draft_for(task_description).await {
            Ok(draft) => Ok(draft),
            Err(e) => {
                warn!(error = %e, "draft generation failed, using offline result");
                self.offline.draft_for(task_description).await
            }
        }
    }
}

/// Assistant selected by [`AssistantConfig`].
#[derive(Debug, Clone)]
pub enum ConfiguredAssistant {
    Offline(OfflineAssistant),
    Gemini(GeminiAssistant),
    GeminiWithFallback(FallbackAssistant<GeminiAssistant>),
}

impl ConfiguredAssistant {
    /// Build from configuration. A missing API key degrades to the offline
    /// assistant when `fallback_to_offline` is set.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        if config.provider == AssistantProvider::Offline {
            return Ok(Self::Offline(OfflineAssistant));
        }
        match GeminiAssistant::from_config(config) {
            Ok(gemini) if config.fallback_to_offline => {
                Ok(Self::GeminiWithFallback(FallbackAssistant::new(gemini)))
            }
            Ok(gemini) => Ok(Self::Gemini(gemini)),
            Err(AssistantError::MissingApiKey { env }) if config.fallback_to_offline => {
                warn!("${env} not set, using offline planning assistant");
                Ok(Self::Offline(OfflineAssistant))
            }
            Err(e) => Err(e),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Offline(_) => "offline",
            Self::Gemini(_) => "gemini",
            Self::GeminiWithFallback(_) => "gemini (offline fallback)",
        }
    }
}

impl PlanningAssistant for ConfiguredAssistant {
    async fn decompose_goal(&self, goal: &str) -> Result<Vec<DecomposedTask>, AssistantError> {
        match self {
            Self::Offline(a) => a.decompose_goal(goal).await,
            Self::Gemini(a) => a.decompose_goal(goal).await,
            Self::GeminiWithFallback(a) => a.decompose_goal(goal).await,
        }
    }

    async fn plan_day(&self, items: &[PlanItem]) -> Result<Vec<ScheduledTask>, AssistantError> {
        match self {
            Self::Offline(a) => a.plan_day(items).await,
            Self::Gemini(a) => a.plan_day(items).await,
            Self::GeminiWithFallback(a) => a.plan_day(items).await,
        }
    }

    async fn draft_for(&self, task_description: &str) -> Result<String, AssistantError> {
        match self {
            Self::Offline(a) => a.draft_for(task_description).await,
            Self::Gemini(a) => a.draft_for(task_description).await,
            Self::GeminiWithFallback(a) => a.draft_for(task_description).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl PlanningAssistant for Broken {
        async fn decompose_goal(&self, _: &str) -> Result<Vec<DecomposedTask>, AssistantError> {
            Err(AssistantError::MalformedResponse("boom".into()))
        }

        async fn plan_day(&self, _: &[PlanItem]) -> Result<Vec<ScheduledTask>, AssistantError> {
            Err(AssistantError::Status {
                status: 503,
                body: "overloaded".into(),
            })
        }

        async fn draft_for(&self, _: &str) -> Result<String, AssistantError> {
            Err(AssistantError::MalformedResponse("boom".into()))
        }
    }

    #[tokio::test]
    async fn fallback_substitutes_offline_answers() {
        let assistant = FallbackAssistant::new(Broken);
        let tasks = assistant.decompose_goal("Launch an online store").await.unwrap();
        assert_eq!(tasks, OfflineAssistant.decompose_goal("x").await.unwrap());

        let items = vec![PlanItem {
            task_id: TaskId::from("t1"),
            description: "Write".into(),
            effort_score: 9,
            project_dna: None,
        }];
        let plan = assistant.plan_day(&items).await.unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].duration_minutes, 90);

        let draft = assistant.draft_for("Write the intro").await.unwrap();
        assert!(draft.contains("Write the intro"));
    }

    #[test]
    fn offline_provider_needs_no_key() {
        let config = AssistantConfig {
            provider: AssistantProvider::Offline,
            ..Default::default()
        };
        let assistant = ConfiguredAssistant::from_config(&config).unwrap();
        assert_eq!(assistant.name(), "offline");
    }

    #[test]
    fn missing_key_respects_fallback_flag() {
        let mut config = AssistantConfig {
            api_key_env: "JUGGLER_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        let assistant = ConfiguredAssistant::from_config(&config).unwrap();
        assert_eq!(assistant.name(), "offline");

        config.fallback_to_offline = false;
        assert!(matches!(
            ConfiguredAssistant::from_config(&config),
            Err(AssistantError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn reviewed_subtask_becomes_new_task() {
        let deadline = chrono::Utc::now();
        let task = DecomposedTask::new("Design schema", 5)
            .into_new_task(ProjectId::from("p1"), deadline);
        assert_eq!(task.description, "Design schema");
        assert_eq!(task.effort_score, 5);
        assert!(!task.is_critical_path);
    }
}
