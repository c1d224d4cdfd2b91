use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProjectId;

/// Work-style category of a project.
///
/// Used for grouping and coloring only. The flow rating never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProjectDna {
    #[serde(rename = "Deep Work")]
    DeepWork,
    #[serde(rename = "Burst Creativity")]
    BurstCreativity,
    #[serde(rename = "Research & Analysis")]
    ResearchAnalysis,
    #[serde(rename = "Client Communication")]
    ClientCommunication,
    #[serde(rename = "Routine Maintenance")]
    RoutineMaintenance,
}

impl ProjectDna {
    /// All categories in display order.
    pub const ALL: [ProjectDna; 5] = [
        ProjectDna::DeepWork,
        ProjectDna::BurstCreativity,
        ProjectDna::ResearchAnalysis,
        ProjectDna::ClientCommunication,
        ProjectDna::RoutineMaintenance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectDna::DeepWork => "Deep Work",
            ProjectDna::BurstCreativity => "Burst Creativity",
            ProjectDna::ResearchAnalysis => "Research & Analysis",
            ProjectDna::ClientCommunication => "Client Communication",
            ProjectDna::RoutineMaintenance => "Routine Maintenance",
        }
    }
}

impl fmt::Display for ProjectDna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectDna {
    type Err = String;

    /// Accepts the display label or a kebab/snake-case slug
    /// (`"Deep Work"`, `"deep-work"`, `"deep_work"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "deepwork" => Ok(ProjectDna::DeepWork),
            "burstcreativity" => Ok(ProjectDna::BurstCreativity),
            "researchanalysis" => Ok(ProjectDna::ResearchAnalysis),
            "clientcommunication" => Ok(ProjectDna::ClientCommunication),
            "routinemaintenance" => Ok(ProjectDna::RoutineMaintenance),
            _ => Err(format!(
                "unknown project DNA '{s}' (expected one of: {})",
                ProjectDna::ALL.map(|d| d.label()).join(", ")
            )),
        }
    }
}

/// Lifecycle status of a project. Only `Active` projects count towards load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Active,
    Paused,
    Archived,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Archived => "Archived",
        };
        f.write_str(s)
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(ProjectStatus::Active),
            "paused" => Ok(ProjectStatus::Paused),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(format!(
                "unknown project status '{s}' (expected active, paused or archived)"
            )),
        }
    }
}

/// A project that owns tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub dna: ProjectDna,
    /// 1-5, higher is more valuable
    pub impact_score: u8,
    pub status: ProjectStatus,
    /// Weekly share of the energy allowance consumed, in percent (0-100)
    #[serde(default)]
    pub burnout_budget_usage: f64,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}

/// Input for creating a project. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub dna: ProjectDna,
    pub impact_score: u8,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub burnout_budget_usage: f64,
}

impl NewProject {
    /// Active project with an untouched burnout budget.
    pub fn new(name: impl Into<String>, dna: ProjectDna, impact_score: u8) -> Self {
        Self {
            name: name.into(),
            dna,
            impact_score,
            status: ProjectStatus::Active,
            burnout_budget_usage: 0.0,
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_burnout(mut self, usage: f64) -> Self {
        self.burnout_budget_usage = usage;
        self
    }
}

/// Partial update of a project's editable fields. Status changes go through
/// [`crate::store::Store::set_project_status`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub dna: Option<ProjectDna>,
    pub impact_score: Option<u8>,
    pub burnout_budget_usage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dna_serializes_with_display_label() {
        let json = serde_json::to_string(&ProjectDna::ResearchAnalysis).unwrap();
        assert_eq!(json, "\"Research & Analysis\"");
    }

    #[test]
    fn dna_parses_labels_and_slugs() {
        assert_eq!("Deep Work".parse::<ProjectDna>(), Ok(ProjectDna::DeepWork));
        assert_eq!(
            "client-communication".parse::<ProjectDna>(),
            Ok(ProjectDna::ClientCommunication)
        );
        assert_eq!(
            "research_analysis".parse::<ProjectDna>(),
            Ok(ProjectDna::ResearchAnalysis)
        );
        assert!("meetings".parse::<ProjectDna>().is_err());
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!("PAUSED".parse::<ProjectStatus>(), Ok(ProjectStatus::Paused));
        assert!("done".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn new_project_defaults_to_active_with_zero_burnout() {
        let p = NewProject::new("Capstone", ProjectDna::DeepWork, 5);
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.burnout_budget_usage, 0.0);
    }
}
