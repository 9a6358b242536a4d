use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{LocalizedText, initial, placeholder_image};
use crate::store::{Draft, Entity, StoreError, require};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub role: LocalizedText,
    pub description: LocalizedText,
    pub skills: Vec<String>,
    pub experience: String,
    pub projects: String,
    pub image: String,
    pub email: String,
    pub linkedin: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamMemberDraft {
    pub name: String,
    pub role: LocalizedText,
    pub description: LocalizedText,
    pub skills: Vec<String>,
    pub experience: String,
    pub projects: String,
    pub image: String,
    pub email: String,
    pub linkedin: String,
}

impl From<&TeamMember> for TeamMemberDraft {
    fn from(member: &TeamMember) -> Self {
        Self {
            name: member.name.clone(),
            role: member.role.clone(),
            description: member.description.clone(),
            skills: member.skills.clone(),
            experience: member.experience.clone(),
            projects: member.projects.clone(),
            image: member.image.clone(),
            email: member.email.clone(),
            linkedin: member.linkedin.clone(),
        }
    }
}

impl Draft for TeamMemberDraft {
    fn validate(&self) -> Result<(), StoreError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("role", &self.role.uz)
    }
}

impl Entity for TeamMember {
    type Draft = TeamMemberDraft;

    const COLLECTION: &'static str = "team";

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, now: NaiveDateTime, draft: TeamMemberDraft) -> Self {
        let mut member = Self {
            id,
            name: String::new(),
            role: LocalizedText::default(),
            description: LocalizedText::default(),
            skills: Vec::new(),
            experience: String::new(),
            projects: String::new(),
            image: String::new(),
            email: String::new(),
            linkedin: String::new(),
            created_at: now.date(),
        };
        member.apply(draft);
        member
    }

    fn apply(&mut self, draft: TeamMemberDraft) {
        self.image = if draft.image.trim().is_empty() {
            placeholder_image(300, 300, &initial(&draft.name))
        } else {
            draft.image
        };
        self.name = draft.name;
        self.role = draft.role;
        self.description = draft.description;
        self.skills = draft.skills;
        self.experience = draft.experience;
        self.projects = draft.projects;
        self.email = draft.email;
        self.linkedin = draft.linkedin;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.role.uz]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_placeholder_uses_initial() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let member = TeamMember::build(
            1,
            now,
            TeamMemberDraft {
                name: "Akmal Karimov".into(),
                ..Default::default()
            },
        );
        assert_eq!(member.image, "/placeholder.svg?height=300&width=300&text=A");
    }

    #[test]
    fn requires_name_email_and_role() {
        let draft = TeamMemberDraft {
            name: "Akmal".into(),
            email: "akmal@ardentsoft.uz".into(),
            ..Default::default()
        };
        assert!(matches!(draft.validate(), Err(StoreError::MissingField("role"))));
    }
}
