//! Built-in project templates.

use serde::Serialize;

use crate::model::{NewProject, ProjectDna};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateTask {
    pub subtask: &'static str,
    pub effort_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectTemplate {
    pub name: &'static str,
    pub dna: ProjectDna,
    pub impact_score: u8,
    pub tasks: &'static [TemplateTask],
}

impl ProjectTemplate {
    pub fn new_project(&self) -> NewProject {
        NewProject::new(self.name, self.dna, self.impact_score)
    }

    pub fn total_effort(&self) -> u32 {
        self.tasks.iter().map(|t| t.effort_score).sum()
    }
}

const fn step(subtask: &'static str, effort_score: u32) -> TemplateTask {
    TemplateTask {
        subtask,
        effort_score,
    }
}

static TEMPLATES: [ProjectTemplate; 3] = [
    ProjectTemplate {
        name: "Capstone Project",
        dna: ProjectDna::DeepWork,
        impact_score: 5,
        tasks: &[
            step("Finalize research question and thesis statement", 5),
            step("Conduct literature review and create annotated bibliography", 8),
            step("Develop methodology and experimental design", 7),
            step("Collect and process primary data", 9),
            step("Analyze results and write discussion chapter", 8),
            step("Draft introduction and conclusion chapters", 6),
            step("Format citations and proofread entire document", 4),
        ],
    },
    ProjectTemplate {
        name: "Hackathon Prep",
        dna: ProjectDna::BurstCreativity,
        impact_score: 4,
        tasks: &[
            step("Brainstorm and validate core project idea", 6),
            step("Define MVP features and user flow", 5),
            step("Choose tech stack and set up development environment", 4),
            step("Create basic UI/UX wireframes", 5),
            step("Develop core backend logic/API endpoints", 8),
            step("Build frontend components for the MVP", 7),
            step("Prepare a 3-minute pitch deck and presentation", 4),
        ],
    },
    ProjectTemplate {
        name: "New Feature Launch",
        dna: ProjectDna::ResearchAnalysis,
        impact_score: 4,
        tasks: &[
            step("Conduct user research and gather requirements", 6),
            step("Perform competitor analysis", 5),
            step("Create technical specification document", 7),
            step("Design UI mockups and prototypes", 6),
            step("Develop and test the new feature", 9),
            step("Plan and execute marketing campaign", 7),
        ],
    },
];

pub fn builtin_templates() -> &'static [ProjectTemplate] {
    &TEMPLATES
}

/// Case-insensitive lookup by template name.
pub fn find_template(name: &str) -> Option<&'static ProjectTemplate> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_within_score_ranges() {
        for template in builtin_templates() {
            assert!((1..=5).contains(&template.impact_score), "{}", template.name);
            assert!(!template.tasks.is_empty());
            for task in template.tasks {
                assert!((1..=10).contains(&task.effort_score), "{}", task.subtask);
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let t = find_template("hackathon prep").unwrap();
        assert_eq!(t.dna, ProjectDna::BurstCreativity);
        assert_eq!(t.total_effort(), 39);
        assert!(find_template("Wedding Planning").is_none());
    }
}
