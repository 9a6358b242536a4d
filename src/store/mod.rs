//! In-memory entity collections shared by the back-office screens and the API.
//!
//! Every entity type (projects, team members, testimonials, partners, messages)
//! goes through the same [`ListManager`]: an insertion-ordered sequence with
//! create/update/delete and a pure search/filter projection. [`Collection`]
//! adds optional write-through to Postgres.

mod collection;
mod manager;
mod messages;
mod query;

use chrono::NaiveDateTime;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub use collection::Collection;
pub use manager::ListManager;
pub use messages::StatusCounts;
pub use query::{Facet, FilterValue, Query};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(i64),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Unsaved form state for one entity
pub trait Draft {
    /// Reject drafts whose required fields are blank
    fn validate(&self) -> Result<(), StoreError>;
}

/// A record type managed by a [`ListManager`]
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Draft;

    /// Name the collection is persisted under
    const COLLECTION: &'static str;

    fn id(&self) -> i64;

    /// Build a new record from a validated draft
    fn build(id: i64, now: NaiveDateTime, draft: Self::Draft) -> Self;

    /// Overwrite the editable fields, keeping id and creation time
    fn apply(&mut self, draft: Self::Draft);

    /// Fields matched by free-text search
    fn search_fields(&self) -> Vec<&str>;

    /// Categorical filters offered for this entity
    fn facets() -> &'static [Facet] {
        &[]
    }

    fn facet_value(&self, _key: &str) -> Option<String> {
        None
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        Err(StoreError::MissingField(field))
    } else {
        Ok(())
    }
}
