use tracing::{debug, info};

use super::{Entity, ListManager, StoreError};
use crate::db::Database;

/// A [`ListManager`] whose mutations are written through to Postgres when a
/// database is configured.
///
/// The in-memory list is the read path either way. A failed write rolls the
/// in-memory change back so both sides stay in step.
pub struct Collection<T: Entity> {
    manager: ListManager<T>,
    db: Option<Database>,
}

impl<T: Entity> Collection<T> {
    pub fn in_memory(records: Vec<T>) -> Self {
        Self {
            manager: ListManager::new(records),
            db: None,
        }
    }

    /// Load the collection from the database, seeding empty tables.
    /// Without a database the seed records become the in-memory list.
    pub async fn open(db: Option<Database>, seed: Vec<T>) -> Result<Self, StoreError> {
        let Some(db) = db else {
            debug!("{}: in-memory collection with {} seed records", T::COLLECTION, seed.len());
            return Ok(Self::in_memory(seed));
        };

        let mut records = db.load::<T>().await?;
        if records.is_empty() && !seed.is_empty() {
            info!("{}: seeding {} records", T::COLLECTION, seed.len());
            for record in &seed {
                db.upsert(record).await?;
            }
            records = seed;
        }

        Ok(Self {
            manager: ListManager::new(records),
            db: Some(db),
        })
    }

    pub fn manager(&self) -> &ListManager<T> {
        &self.manager
    }

    pub fn is_persistent(&self) -> bool {
        self.db.is_some()
    }

    pub async fn create(&mut self, draft: T::Draft) -> Result<T, StoreError> {
        let record = self.manager.create(draft)?;
        self.write_new(record).await
    }

    /// Like [`Collection::create`] but without required-field checks
    pub async fn append(&mut self, draft: T::Draft) -> Result<T, StoreError> {
        let record = self.manager.append(draft);
        self.write_new(record).await
    }

    async fn write_new(&mut self, record: T) -> Result<T, StoreError> {
        if let Some(db) = &self.db {
            if let Err(e) = db.upsert(&record).await {
                self.manager.delete(record.id());
                return Err(e);
            }
        }
        info!("{}: created {}", T::COLLECTION, record.id());
        Ok(record)
    }

    pub async fn update(&mut self, id: i64, draft: T::Draft) -> Result<T, StoreError> {
        let previous = self.manager.get(id).cloned();
        let record = self.manager.update(id, draft)?;
        self.write_or_restore(record, previous).await
    }

    pub async fn modify<F>(&mut self, id: i64, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let previous = self.manager.get(id).cloned();
        let record = self.manager.modify(id, change)?;
        self.write_or_restore(record, previous).await
    }

    /// Remove a record; deleting an unknown id is a no-op
    pub async fn delete(&mut self, id: i64) -> Result<Option<T>, StoreError> {
        if let Some(db) = &self.db {
            db.remove::<T>(id).await?;
        }
        let removed = self.manager.delete(id);
        if removed.is_some() {
            info!("{}: deleted {}", T::COLLECTION, id);
        }
        Ok(removed)
    }

    async fn write_or_restore(&mut self, record: T, previous: Option<T>) -> Result<T, StoreError> {
        if let Some(db) = &self.db {
            if let Err(e) = db.upsert(&record).await {
                if let Some(previous) = previous {
                    let _ = self.manager.modify(record.id(), |current| *current = previous);
                }
                return Err(e);
            }
        }
        info!("{}: updated {}", T::COLLECTION, record.id());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Partner, PartnerDraft};

    fn draft(name: &str) -> PartnerDraft {
        PartnerDraft {
            name: name.into(),
            logo: String::new(),
            website: "https://example.com".into(),
            description: "Partner".into(),
            category: "Technology".into(),
        }
    }

    #[tokio::test]
    async fn open_without_database_uses_seed() {
        let mut seed: Collection<Partner> = Collection::in_memory(Vec::new());
        let first = seed.create(draft("Microsoft")).await.unwrap();

        let collection = Collection::open(None, seed.manager().list().to_vec())
            .await
            .unwrap();
        assert!(!collection.is_persistent());
        assert_eq!(collection.manager().list(), &[first]);
    }

    #[tokio::test]
    async fn crud_round_trip_in_memory() {
        let mut partners: Collection<Partner> = Collection::in_memory(Vec::new());
        let created = partners.create(draft("Google")).await.unwrap();

        let updated = partners.update(created.id, draft("Alphabet")).await.unwrap();
        assert_eq!(updated.name, "Alphabet");
        assert_eq!(updated.created_at, created.created_at);

        let removed = partners.delete(created.id).await.unwrap();
        assert_eq!(removed.map(|p| p.id), Some(created.id));
        assert!(partners.delete(created.id).await.unwrap().is_none());
        assert!(partners.manager().list().is_empty());
    }

    #[tokio::test]
    async fn append_skips_required_fields() {
        let mut partners: Collection<Partner> = Collection::in_memory(Vec::new());
        assert!(matches!(
            partners.create(draft("")).await,
            Err(StoreError::MissingField("name"))
        ));

        let stored = partners.append(draft("")).await.unwrap();
        assert_eq!(stored.name, "");
        assert_eq!(partners.manager().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_reports_not_found() {
        let mut partners: Collection<Partner> = Collection::in_memory(Vec::new());
        let result = partners.update(9, draft("Nobody")).await;
        assert!(matches!(result, Err(StoreError::NotFound(9))));
    }
}
