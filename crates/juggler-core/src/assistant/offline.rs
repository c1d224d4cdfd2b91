use chrono::{Duration, NaiveTime};
use indoc::formatdoc;

use super::{DecomposedTask, PlanningAssistant, ScheduledTask};
use crate::error::AssistantError;
use crate::insights::PlanItem;
use crate::model::ProjectDna;

const DAY_START: (u32, u32) = (9, 0);
const CONTEXT_SWITCH_BREAK_MINUTES: i64 = 15;

/// Block length for a task of the given effort.
pub fn duration_for_effort(effort_score: u32) -> u32 {
    match effort_score {
        8.. => 90,
        5..=7 => 60,
        _ => 30,
    }
}

/// Works without a network. Decomposition returns a fixed starter
/// breakdown; day plans batch tasks by project DNA to limit context
/// switching.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistant;

impl OfflineAssistant {
    fn starter_breakdown() -> Vec<DecomposedTask> {
        vec![
            DecomposedTask::new("Set up project structure and boilerplate", 3),
            DecomposedTask::new("Design database schema for users and products", 5),
            DecomposedTask::new("Implement user authentication endpoints", 7),
            DecomposedTask::new("Develop the product listing UI", 6),
            DecomposedTask::new("Integrate payment gateway", 8),
        ]
    }

    fn schedule(items: &[PlanItem]) -> Vec<ScheduledTask> {
        // Groups keep first-appearance order; orphaned tasks go last.
        let mut groups: Vec<(ProjectDna, Vec<&PlanItem>)> = Vec::new();
        let mut orphans: Vec<&PlanItem> = Vec::new();
        for item in items {
            match item.project_dna {
                Some(dna) => match groups.iter_mut().find(|(d, _)| *d == dna) {
                    Some((_, members)) => members.push(item),
                    None => groups.push((dna, vec![item])),
                },
                None => orphans.push(item),
            }
        }

        let mut batches: Vec<Vec<&PlanItem>> = groups.into_iter().map(|(_, g)| g).collect();
        if !orphans.is_empty() {
            batches.push(orphans);
        }

        let mut cursor = NaiveTime::from_hms_opt(DAY_START.0, DAY_START.1, 0).unwrap_or_default();
        let mut plan = Vec::with_capacity(items.len());
        for (i, batch) in batches.into_iter().enumerate() {
            if i > 0 {
                cursor += Duration::minutes(CONTEXT_SWITCH_BREAK_MINUTES);
            }
            for item in batch {
                let minutes = duration_for_effort(item.effort_score);
                plan.push(ScheduledTask {
                    task_id: item.task_id.clone(),
                    start_time: cursor.format("%-I:%M %p").to_string(),
                    duration_minutes: minutes,
                });
                cursor += Duration::minutes(i64::from(minutes));
            }
        }
        plan
    }
}

impl PlanningAssistant for OfflineAssistant {
    async fn decompose_goal(&self, _goal: &str) -> Result<Vec<DecomposedTask>, AssistantError> {
        Ok(Self::starter_breakdown())
    }

    async fn plan_day(&self, items: &[PlanItem]) -> Result<Vec<ScheduledTask>, AssistantError> {
        Ok(Self::schedule(items))
    }

    async fn draft_for(&self, task_description: &str) -> Result<String, AssistantError> {
        Ok(formatdoc! {"
            # {task_description}

            ## Goal
            What does done look like?

            ## Outline
            1. Context
            2. Main work
            3. Open questions

            ## Notes
            "})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;

    fn item(id: &str, effort: u32, dna: Option<ProjectDna>) -> PlanItem {
        PlanItem {
            task_id: TaskId::from(id),
            description: format!("task {id}"),
            effort_score: effort,
            project_dna: dna,
        }
    }

    #[test]
    fn effort_buckets() {
        assert_eq!(duration_for_effort(1), 30);
        assert_eq!(duration_for_effort(4), 30);
        assert_eq!(duration_for_effort(5), 60);
        assert_eq!(duration_for_effort(7), 60);
        assert_eq!(duration_for_effort(8), 90);
        assert_eq!(duration_for_effort(10), 90);
    }

    #[tokio::test]
    async fn starter_breakdown_has_five_steps() {
        let tasks = OfflineAssistant.decompose_goal("Launch a store").await.unwrap();
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[0].subtask, "Set up project structure and boilerplate");
        assert_eq!(tasks.iter().map(|t| t.effort_score).sum::<u32>(), 29);
    }

    #[tokio::test]
    async fn plan_batches_by_dna_with_breaks() {
        let items = vec![
            item("a", 8, Some(ProjectDna::DeepWork)),
            item("b", 7, Some(ProjectDna::ClientCommunication)),
            item("c", 6, Some(ProjectDna::DeepWork)),
            item("d", 2, None),
        ];
        let plan = OfflineAssistant.plan_day(&items).await.unwrap();
        let order: Vec<&str> = plan.iter().map(|s| s.task_id.as_str()).collect();
        assert_eq!(order, ["a", "c", "b", "d"]);

        let times: Vec<&str> = plan.iter().map(|s| s.start_time.as_str()).collect();
        // a 9:00 +90, c 10:30 +60, break 15, b 11:45 +60, break 15, d 1:00 PM
        assert_eq!(times, ["9:00 AM", "10:30 AM", "11:45 AM", "1:00 PM"]);
        assert_eq!(plan[3].duration_minutes, 30);
    }

    #[tokio::test]
    async fn empty_day_plan() {
        assert!(OfflineAssistant.plan_day(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn draft_is_titled_with_the_task() {
        let draft = OfflineAssistant.draft_for("Write chapter 2").await.unwrap();
        assert!(draft.starts_with("# Write chapter 2\n"));
        assert!(draft.contains("## Outline"));
    }
}
