use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{LocalizedText, initial, placeholder_image};
use crate::store::{Draft, Entity, Facet, StoreError, require};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    pub role: LocalizedText,
    pub company: String,
    pub text: LocalizedText,
    pub rating: u8,
    pub image: String,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialDraft {
    pub name: String,
    pub role: LocalizedText,
    pub company: String,
    pub text: LocalizedText,
    pub rating: u8,
    pub image: String,
}

impl Default for TestimonialDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: LocalizedText::default(),
            company: String::new(),
            text: LocalizedText::default(),
            rating: 5,
            image: String::new(),
        }
    }
}

impl From<&Testimonial> for TestimonialDraft {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            name: testimonial.name.clone(),
            role: testimonial.role.clone(),
            company: testimonial.company.clone(),
            text: testimonial.text.clone(),
            rating: testimonial.rating,
            image: testimonial.image.clone(),
        }
    }
}

impl Draft for TestimonialDraft {
    fn validate(&self) -> Result<(), StoreError> {
        require("name", &self.name)?;
        require("company", &self.company)?;
        require("text", &self.text.uz)
    }
}

const FACETS: &[Facet] = &[Facet {
    key: "rating",
    label: "Rating",
    options: &["5", "4", "3", "2", "1"],
}];

impl Entity for Testimonial {
    type Draft = TestimonialDraft;

    const COLLECTION: &'static str = "testimonials";

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, now: NaiveDateTime, draft: TestimonialDraft) -> Self {
        let mut testimonial = Self {
            id,
            name: String::new(),
            role: LocalizedText::default(),
            company: String::new(),
            text: LocalizedText::default(),
            rating: 0,
            image: String::new(),
            created_at: now.date(),
        };
        testimonial.apply(draft);
        testimonial
    }

    fn apply(&mut self, draft: TestimonialDraft) {
        self.image = if draft.image.trim().is_empty() {
            placeholder_image(80, 80, &initial(&draft.name))
        } else {
            draft.image
        };
        self.name = draft.name;
        self.role = draft.role;
        self.company = draft.company;
        self.text = draft.text;
        self.rating = draft.rating;
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.company]
    }

    fn facets() -> &'static [Facet] {
        FACETS
    }

    fn facet_value(&self, key: &str) -> Option<String> {
        match key {
            "rating" => Some(self.rating.to_string()),
            _ => None,
        }
    }
}
