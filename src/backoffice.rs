use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;
use crate::models::{Message, Partner, Project, ProjectStatus, TeamMember, Testimonial};
use crate::seed;
use crate::store::{Collection, StatusCounts};

/// Every collection the back-office edits
pub struct AdminStore {
    pub projects: Collection<Project>,
    pub team: Collection<TeamMember>,
    pub testimonials: Collection<Testimonial>,
    pub partners: Collection<Partner>,
    pub messages: Collection<Message>,
}

impl AdminStore {
    pub async fn open(db: Option<Database>) -> Result<Self> {
        Ok(Self {
            projects: Collection::open(db.clone(), seed::projects()).await?,
            team: Collection::open(db.clone(), seed::team()).await?,
            testimonials: Collection::open(db.clone(), seed::testimonials()).await?,
            partners: Collection::open(db.clone(), seed::partners()).await?,
            messages: Collection::open(db, seed::messages()).await?,
        })
    }

    pub fn stats(&self, range: Option<DateRange>) -> DashboardStats {
        DashboardStats::compute(self, range)
    }
}

/// Inclusive range of creation dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub completed_projects: usize,
    pub in_progress_projects: usize,
    pub projects_by_category: BTreeMap<String, usize>,
    pub total_team_members: usize,
    pub total_testimonials: usize,
    pub average_rating: f64,
    pub total_partners: usize,
    pub messages: StatusCounts,
}

impl DashboardStats {
    /// The date range narrows project figures only
    pub fn compute(store: &AdminStore, range: Option<DateRange>) -> Self {
        let projects = store
            .projects
            .manager()
            .filter(|p| range.is_none_or(|r| r.contains(p.created_at)));

        let completed_projects = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count();

        let mut projects_by_category = BTreeMap::new();
        for project in &projects {
            let category = if project.category.is_empty() {
                "Uncategorized".to_string()
            } else {
                project.category.clone()
            };
            *projects_by_category.entry(category).or_insert(0) += 1;
        }

        let testimonials = store.testimonials.manager().list();
        let average_rating = if testimonials.is_empty() {
            0.0
        } else {
            let total: u32 = testimonials.iter().map(|t| u32::from(t.rating)).sum();
            f64::from(total) / testimonials.len() as f64
        };

        Self {
            total_projects: projects.len(),
            completed_projects,
            in_progress_projects: projects.len() - completed_projects,
            projects_by_category,
            total_team_members: store.team.manager().len(),
            total_testimonials: testimonials.len(),
            average_rating,
            total_partners: store.partners.manager().len(),
            messages: store.messages.manager().status_counts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectDraft, TestimonialDraft};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn stats_over_seed_data() {
        let store = AdminStore::open(None).await.unwrap();
        let stats = store.stats(None);

        assert_eq!(stats.total_projects, 1);
        assert_eq!(stats.completed_projects, 1);
        assert_eq!(stats.in_progress_projects, 0);
        assert_eq!(stats.projects_by_category.get("E-commerce"), Some(&1));
        assert_eq!(stats.total_team_members, 1);
        assert_eq!(stats.total_partners, 2);
        assert_eq!(stats.average_rating, 5.0);
        assert_eq!(stats.messages, StatusCounts { new: 1, read: 1, replied: 0 });
    }

    #[tokio::test]
    async fn average_rating_and_date_range() {
        let mut store = AdminStore::open(None).await.unwrap();
        store
            .testimonials
            .create(TestimonialDraft {
                name: "Dilshod".into(),
                company: "Payme".into(),
                rating: 4,
                text: crate::models::LocalizedText::new("Zo'r", "", ""),
                ..Default::default()
            })
            .await
            .unwrap();
        let mut draft = ProjectDraft {
            client: "Uzum".into(),
            ..Default::default()
        };
        draft.title.uz = "Marketplace".into();
        store.projects.create(draft).await.unwrap();

        let all = store.stats(None);
        assert_eq!(all.average_rating, 4.5);
        assert_eq!(all.total_projects, 2);
        assert_eq!(all.projects_by_category.get("Uncategorized"), Some(&1));

        let only_2024 = store.stats(Some(DateRange {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }));
        assert_eq!(only_2024.total_projects, 1);
    }
}
