use anyhow::Result;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::Config;
use crate::models::SiteSettings;
use crate::store::{Entity, StoreError};

const SETTINGS_COLLECTION: &str = "settings";

/// Database connection pool
///
/// Every entity collection is stored in one `records` table, one JSON document
/// per row keyed by `(collection, id)`. `position` preserves insertion order.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the records table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                position BIGSERIAL,
                collection TEXT NOT NULL,
                id BIGINT NOT NULL,
                body JSONB NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(self.get_pool())
        .await?;

        Ok(())
    }

    pub async fn load<T: Entity>(&self) -> Result<Vec<T>, StoreError> {
        let bodies = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT body FROM records WHERE collection = $1 ORDER BY position ASC",
        )
        .bind(T::COLLECTION)
        .fetch_all(self.get_pool())
        .await?;

        let records = bodies
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(records)
    }

    /// Insert a record, or replace its body in place if the id already exists
    pub async fn upsert<T: Entity>(&self, record: &T) -> Result<(), StoreError> {
        self.put(T::COLLECTION, record.id(), serde_json::to_value(record)?)
            .await
    }

    pub async fn remove<T: Entity>(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(T::COLLECTION)
            .bind(id)
            .execute(self.get_pool())
            .await?;

        Ok(())
    }

    pub async fn load_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        let body = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT body FROM records WHERE collection = $1 AND id = 0",
        )
        .bind(SETTINGS_COLLECTION)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(body.map(serde_json::from_value).transpose()?)
    }

    pub async fn save_settings(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        self.put(SETTINGS_COLLECTION, 0, serde_json::to_value(settings)?)
            .await
    }

    async fn put(&self, collection: &str, id: i64, body: serde_json::Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO records (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET body = EXCLUDED.body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(body)
        .execute(self.get_pool())
        .await?;

        Ok(())
    }
}

/// Connect to Postgres when `DATABASE_URL` is set and prepare the schema
pub async fn init(config: &Config) -> Result<Option<Database>> {
    let Some(url) = config.database_url() else {
        info!("DATABASE_URL not set, collections are kept in memory");
        return Ok(None);
    };

    let db = Database::new(url).await?;
    db.ensure_schema().await?;
    info!("Database connection established");

    Ok(Some(db))
}
