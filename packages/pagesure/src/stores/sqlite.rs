//! SQLite storage implementation.
//!
//! A file-based document store using SQLite. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with persistent data
//!
//! Documents are kept as JSON text in one table keyed by
//! `(collection, key)`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::DocumentStore;
use crate::types::page::PageRecord;

/// SQLite-based document store.
pub struct SqliteStore {
    pool: SqlitePool,
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(Box::new(e))
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite://./pagesure.db` - File-based database
    /// - `sqlite://./pagesure.db?mode=rwc` - Create if not exists
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(backend)?;

        Self::from_pool(pool).await
    }

    /// Create an in-memory SQLite store (for testing).
    ///
    /// Limited to one connection: every SQLite connection to `:memory:`
    /// opens its own private database.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(backend)?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and run migrations.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                body TEXT NOT NULL,
                stored_at TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    collection: String,
    key: String,
    body: String,
}

impl DocumentRow {
    fn into_record(self) -> StoreResult<PageRecord> {
        PageRecord::from_json(&self.body).map_err(|e| StoreError::Corrupt {
            collection: self.collection,
            key: self.key,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get_document(&self, collection: &str, key: &str) -> StoreResult<Option<PageRecord>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT collection, key, body FROM documents WHERE collection = ? AND key = ?",
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(DocumentRow::into_record).transpose()
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &PageRecord,
    ) -> StoreResult<()> {
        let body = document.to_json().map_err(|e| StoreError::Corrupt {
            collection: collection.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, body, stored_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(collection, key) DO UPDATE SET
                body = excluded.body,
                stored_at = excluded.stored_at
            "#,
        )
        .bind(collection)
        .bind(key)
        .bind(&body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn test_store() -> SqliteStore {
        SqliteStore::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_document_storage() {
        let store = test_store().await;
        let record = PageRecord::try_from(json!({
            "title": "Some Page",
            "reviews": [{"rating": 5, "text": "great"}]
        }))
        .unwrap();

        assert!(store.get_document("pages", "SomePage").await.unwrap().is_none());

        store.set_document("pages", "SomePage", &record).await.unwrap();

        let retrieved = store.get_document("pages", "SomePage").await.unwrap();
        assert_eq!(retrieved, Some(record));
    }

    #[tokio::test]
    async fn test_upsert_last_write_wins() {
        let store = test_store().await;
        let first = PageRecord::new().with_field("v", 1);
        let second = PageRecord::new().with_field("v", 2);

        store.set_document("pages", "p", &first).await.unwrap();
        store.set_document("pages", "p", &second).await.unwrap();

        let retrieved = store.get_document("pages", "p").await.unwrap();
        assert_eq!(retrieved, Some(second));

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 1);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = test_store().await;
        let record = PageRecord::new().with_field("name", "x");
        store.set_document("pages", "p", &record).await.unwrap();

        assert!(store.get_document("archive", "p").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_body_is_reported() {
        let store = test_store().await;
        sqlx::query(
            "INSERT INTO documents (collection, key, body, stored_at) VALUES ('pages', 'bad', '[1,2]', '')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        let err = store.get_document("pages", "bad").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "bad"));
    }
}
