use chrono::{NaiveDateTime, Utc};

use super::{Draft, Entity, Query, StoreError};

/// Hands out ids derived from wall-clock milliseconds.
///
/// Ids never repeat within one generator: when the clock has not advanced past
/// the last issued (or observed) id, the next id is `last + 1`.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next_at(&mut self, now_millis: i64) -> i64 {
        let id = now_millis.max(self.last + 1);
        self.last = id;
        id
    }

    /// Record an id that was assigned elsewhere (seed data, database rows)
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}

/// The authoritative in-memory sequence for one entity type
#[derive(Debug, Clone)]
pub struct ListManager<T: Entity> {
    records: Vec<T>,
    ids: IdGenerator,
    clock: fn() -> NaiveDateTime,
}

fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl<T: Entity> Default for ListManager<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Entity> ListManager<T> {
    pub fn new(records: Vec<T>) -> Self {
        let mut manager = Self {
            records: Vec::with_capacity(records.len()),
            ids: IdGenerator::default(),
            clock: utc_now,
        };
        for record in records {
            manager.insert(record);
        }
        manager
    }

    /// Replace the time source used to stamp `createdAt`
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Append a record that already carries its id
    pub fn insert(&mut self, record: T) {
        self.ids.observe(record.id());
        self.records.push(record);
    }

    pub fn create(&mut self, draft: T::Draft) -> Result<T, StoreError> {
        draft.validate()?;
        Ok(self.append(draft))
    }

    /// Stamp an id and `createdAt` on a draft and store it as given, blank fields included
    pub fn append(&mut self, draft: T::Draft) -> T {
        let now = (self.clock)();
        let id = self.ids.next_at(now.and_utc().timestamp_millis());
        let record = T::build(id, now, draft);
        self.records.push(record.clone());
        record
    }

    pub fn update(&mut self, id: i64, draft: T::Draft) -> Result<T, StoreError> {
        draft.validate()?;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        record.apply(draft);
        Ok(record.clone())
    }

    /// Apply an in-place change to one record
    pub fn modify<F>(&mut self, id: i64, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        change(record);
        Ok(record.clone())
    }

    pub fn delete(&mut self, id: i64) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).collect()
    }

    pub fn query(&self, query: &Query) -> Vec<&T> {
        self.filter(|record| query.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Partner, PartnerDraft, Project, ProjectDraft, ProjectStatus};
    use crate::store::FilterValue;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 16)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn project_draft(title: &str, client: &str, status: ProjectStatus) -> ProjectDraft {
        let mut draft = ProjectDraft {
            client: client.to_string(),
            status,
            ..Default::default()
        };
        draft.title.uz = title.to_string();
        draft
    }

    fn projects() -> ListManager<Project> {
        let mut manager = ListManager::default().with_clock(fixed_clock);
        manager
            .create(project_draft("YOBIUM", "YOBIUM LLC", ProjectStatus::Completed))
            .unwrap();
        manager
            .create(project_draft("Bank CRM", "Hamkor", ProjectStatus::InProgress))
            .unwrap();
        manager
            .create(project_draft("Delivery App", "Express24", ProjectStatus::Completed))
            .unwrap();
        manager
    }

    fn ids(records: &[&Project]) -> Vec<i64> {
        records.iter().map(|p| p.id).collect()
    }

    #[test]
    fn id_generator_never_repeats_within_a_millisecond() {
        let mut ids = IdGenerator::default();
        let first = ids.next_at(1_000);
        let second = ids.next_at(1_000);
        let third = ids.next_at(999);
        assert_eq!((first, second, third), (1_000, 1_001, 1_002));
    }

    #[test]
    fn id_generator_respects_observed_ids() {
        let mut ids = IdGenerator::default();
        ids.observe(5_000);
        assert_eq!(ids.next_at(10), 5_001);
    }

    #[test]
    fn create_appends_one_record_with_fresh_id() {
        let mut manager = projects();
        let before = manager.len();
        let draft = project_draft("Portal", "Uzcard", ProjectStatus::InProgress);

        let stored = manager.create(draft.clone()).unwrap();

        assert_eq!(manager.len(), before + 1);
        let last = manager.list().last().unwrap();
        assert_eq!(last, &stored);
        assert_eq!(ProjectDraft::from(last).title, draft.title);
        assert_eq!(last.client, "Uzcard");
        assert!(manager.list()[..before].iter().all(|p| p.id != last.id));
        assert_eq!(last.created_at, fixed_clock().date());
    }

    #[test]
    fn create_rejects_missing_required_field() {
        let mut manager = projects();
        let result = manager.create(project_draft("", "Client", ProjectStatus::Completed));
        assert!(matches!(result, Err(StoreError::MissingField("title"))));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn append_stores_incomplete_draft() {
        let mut manager = projects();
        let stored = manager.append(project_draft("", "", ProjectStatus::InProgress));

        assert_eq!(manager.len(), 4);
        assert_eq!(manager.list().last(), Some(&stored));
        assert!(stored.title.uz.is_empty());
        assert!(manager.list()[..3].iter().all(|p| p.id < stored.id));
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let mut manager = projects();
        let original = manager.list()[1].clone();
        let updated = manager
            .update(original.id, project_draft("Bank CRM v2", "Hamkor", ProjectStatus::Completed))
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(manager.list()[1].title.uz, "Bank CRM v2");
    }

    #[test]
    fn update_missing_id_leaves_store_unchanged() {
        let mut manager = projects();
        let before = manager.list().to_vec();
        let result = manager.update(42, project_draft("Ghost", "Nobody", ProjectStatus::Completed));
        assert!(matches!(result, Err(StoreError::NotFound(42))));
        assert_eq!(manager.list(), before.as_slice());
    }

    #[test]
    fn delete_removes_only_the_match_and_keeps_order() {
        let mut manager = projects();
        let all: Vec<i64> = manager.list().iter().map(|p| p.id).collect();

        let removed = manager.delete(all[1]).unwrap();

        assert_eq!(removed.id, all[1]);
        let remaining: Vec<i64> = manager.list().iter().map(|p| p.id).collect();
        assert_eq!(remaining, vec![all[0], all[2]]);
        assert!(manager.delete(all[1]).is_none());
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn status_filter_returns_only_matching_records() {
        let manager = projects();
        let query = Query::default().with_filter("status", FilterValue::parse("completed"));
        let visible = manager.query(&query);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|p| p.status == ProjectStatus::Completed));
    }

    #[test]
    fn all_filter_returns_everything_in_order() {
        let manager = projects();
        let query = Query::default().with_filter("status", FilterValue::parse("all"));
        let everything: Vec<&Project> = manager.list().iter().collect();
        assert_eq!(ids(&manager.query(&query)), ids(&everything));
    }

    #[test]
    fn filter_does_not_mutate_store() {
        let manager = projects();
        let before = manager.list().to_vec();
        let _ = manager.filter(|p| p.client.starts_with('H'));
        assert_eq!(manager.list(), before.as_slice());
    }

    #[test]
    fn search_combines_with_facets() {
        let manager = projects();
        let query = Query::search("express").with_filter("status", FilterValue::parse("completed"));
        let visible = manager.query(&query);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].client, "Express24");
    }

    #[test]
    fn blank_partner_logo_becomes_placeholder_with_name() {
        let mut partners: ListManager<Partner> = ListManager::default();
        let stored = partners
            .create(PartnerDraft {
                name: "Acme".into(),
                logo: String::new(),
                website: "https://acme.test".into(),
                description: "Anvils".into(),
                category: "Manufacturing".into(),
            })
            .unwrap();
        assert!(stored.logo.contains("Acme"));
        assert_eq!(partners.list()[0].logo, "/placeholder.svg?height=80&width=120&text=Acme");
    }
}
