//! Deep links that hand a task off to Google Calendar / Google Docs.

use crate::model::{Project, Task};

const CALENDAR_URL: &str = "https://calendar.google.com/render";
const DOCS_URL: &str = "https://docs.google.com/document/create";

/// Calendar "create event" link pinned at the task's deadline.
pub fn google_calendar_link(task: &Task, project: Option<&Project>) -> String {
    let title = urlencoding::encode(&task.description);
    let details = format!(
        "Project: {}\n\nThis task is managed in juggler.",
        project.map_or("N/A", |p| p.name.as_str())
    );
    let details = urlencoding::encode(&details);
    let date = task.deadline.format("%Y%m%dT%H%M%SZ");
    format!("{CALENDAR_URL}?action=TEMPLATE&text={title}&details={details}&dates={date}/{date}")
}

/// New Google Doc titled "<project>: <task>".
pub fn google_docs_link(task: &Task, project: Option<&Project>) -> String {
    let title = match project {
        Some(p) => format!("{}: {}", p.name, task.description),
        None => task.description.clone(),
    };
    format!("{DOCS_URL}?title={}", urlencoding::encode(&title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectDna, ProjectId, ProjectStatus, TaskId};
    use chrono::{TimeZone, Utc};

    fn task() -> Task {
        Task::new(
            TaskId::from("t1"),
            ProjectId::from("p1"),
            "Draft intro & outline",
            Utc.with_ymd_and_hms(2026, 5, 7, 14, 30, 0).unwrap(),
            4,
        )
    }

    fn project() -> Project {
        Project {
            id: ProjectId::from("p1"),
            name: "Capstone".into(),
            dna: ProjectDna::DeepWork,
            impact_score: 5,
            status: ProjectStatus::Active,
            burnout_budget_usage: 0.0,
        }
    }

    #[test]
    fn calendar_link_encodes_title_and_date() {
        let link = google_calendar_link(&task(), Some(&project()));
        assert!(link.starts_with("https://calendar.google.com/render?action=TEMPLATE"));
        assert!(link.contains("text=Draft%20intro%20%26%20outline"));
        assert!(link.contains("details=Project%3A%20Capstone"));
        assert!(link.ends_with("dates=20260507T143000Z/20260507T143000Z"));
    }

    #[test]
    fn calendar_link_without_project() {
        let link = google_calendar_link(&task(), None);
        assert!(link.contains("Project%3A%20N%2FA"));
    }

    #[test]
    fn docs_link_prefixes_project_name() {
        assert_eq!(
            google_docs_link(&task(), Some(&project())),
            "https://docs.google.com/document/create?title=Capstone%3A%20Draft%20intro%20%26%20outline"
        );
        assert!(google_docs_link(&task(), None).ends_with("title=Draft%20intro%20%26%20outline"));
    }
}
