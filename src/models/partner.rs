use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::placeholder_image;
use crate::store::{Draft, Entity, StoreError, require};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub website: String,
    pub description: String,
    pub category: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartnerDraft {
    pub name: String,
    pub logo: String,
    pub website: String,
    pub description: String,
    pub category: String,
}

impl From<&Partner> for PartnerDraft {
    fn from(partner: &Partner) -> Self {
        Self {
            name: partner.name.clone(),
            logo: partner.logo.clone(),
            website: partner.website.clone(),
            description: partner.description.clone(),
            category: partner.category.clone(),
        }
    }
}

impl Draft for PartnerDraft {
    fn validate(&self) -> Result<(), StoreError> {
        require("name", &self.name)?;
        require("category", &self.category)?;
        require("website", &self.website)?;
        require("description", &self.description)
    }
}

impl Entity for Partner {
    type Draft = PartnerDraft;

    const COLLECTION: &'static str = "partners";

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, now: NaiveDateTime, draft: PartnerDraft) -> Self {
        let mut partner = Self {
            id,
            name: String::new(),
            logo: String::new(),
            website: String::new(),
            description: String::new(),
            category: String::new(),
            created_at: now.date(),
        };
        partner.apply(draft);
        partner
    }

    fn apply(&mut self, draft: PartnerDraft) {
        self.logo = if draft.logo.trim().is_empty() {
            placeholder_image(80, 120, &draft.name)
        } else {
            draft.logo
        };
        self.name = draft.name;
        self.website = draft.website;
        self.description = draft.description;
        self.category = draft.category;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.category]
    }
}
