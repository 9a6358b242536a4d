use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{LocalizedText, placeholder_image};
use crate::store::{Draft, Entity, Facet, StoreError, require};

/// Categories offered by the project form
pub const PROJECT_CATEGORIES: &[&str] = &["Web", "Mobile", "E-commerce", "CRM", "AI/ML", "IoT"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    Completed,
    #[default]
    InProgress,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "completed",
            ProjectStatus::InProgress => "inProgress",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "completed" => Ok(ProjectStatus::Completed),
            "inProgress" => Ok(ProjectStatus::InProgress),
            other => Err(format!("unknown project status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub client: String,
    pub year: String,
    pub duration: String,
    pub team: String,
    pub status: ProjectStatus,
    pub technologies: Vec<String>,
    pub image: String,
    pub created_at: NaiveDate,
}

/// Editable project fields, as submitted by the admin form or `POST /api/projects`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub client: String,
    pub year: String,
    pub duration: String,
    pub team: String,
    pub status: ProjectStatus,
    pub technologies: Vec<String>,
    pub image: String,
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            category: project.category.clone(),
            client: project.client.clone(),
            year: project.year.clone(),
            duration: project.duration.clone(),
            team: project.team.clone(),
            status: project.status,
            technologies: project.technologies.clone(),
            image: project.image.clone(),
        }
    }
}

impl Draft for ProjectDraft {
    fn validate(&self) -> Result<(), StoreError> {
        require("title", &self.title.uz)?;
        require("client", &self.client)
    }
}

fn image_or_placeholder(image: String) -> String {
    if image.trim().is_empty() {
        placeholder_image(200, 300, "Project")
    } else {
        image
    }
}

const FACETS: &[Facet] = &[
    Facet {
        key: "category",
        label: "Category",
        options: PROJECT_CATEGORIES,
    },
    Facet {
        key: "status",
        label: "Status",
        options: &["completed", "inProgress"],
    },
];

impl Entity for Project {
    type Draft = ProjectDraft;

    const COLLECTION: &'static str = "projects";

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, now: NaiveDateTime, draft: ProjectDraft) -> Self {
        let mut project = Self {
            id,
            title: LocalizedText::default(),
            description: LocalizedText::default(),
            category: String::new(),
            client: String::new(),
            year: String::new(),
            duration: String::new(),
            team: String::new(),
            status: ProjectStatus::default(),
            technologies: Vec::new(),
            image: String::new(),
            created_at: now.date(),
        };
        project.apply(draft);
        project
    }

    fn apply(&mut self, draft: ProjectDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.category = draft.category;
        self.client = draft.client;
        self.year = draft.year;
        self.duration = draft.duration;
        self.team = draft.team;
        self.status = draft.status;
        self.technologies = draft.technologies;
        self.image = image_or_placeholder(draft.image);
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title.uz, &self.client]
    }

    fn facets() -> &'static [Facet] {
        FACETS
    }

    fn facet_value(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn status_uses_camel_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!("completed".parse::<ProjectStatus>(), Ok(ProjectStatus::Completed));
    }

    #[test]
    fn blank_image_gets_placeholder() {
        let project = Project::build(7, now(), ProjectDraft::default());
        assert_eq!(project.image, "/placeholder.svg?height=200&width=300&text=Project");
        assert_eq!(project.created_at, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn partial_json_body_is_a_valid_draft_shape() {
        let draft: ProjectDraft =
            serde_json::from_str(r#"{"title":{"uz":"CRM"},"client":"Acme","technologies":["Rust"]}"#)
                .unwrap();
        assert_eq!(draft.title.uz, "CRM");
        assert_eq!(draft.status, ProjectStatus::InProgress);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn serializes_created_at_in_camel_case() {
        let project = Project::build(1, now(), ProjectDraft::default());
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["createdAt"], "2024-03-01");
    }
}
