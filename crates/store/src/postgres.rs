//! Postgres-backed document store.
//!
//! All documents live in a single `documents` table with a JSONB payload,
//! so any top-level field is queryable (via containment) without
//! per-collection schemas. Pool construction, health check, and embedded
//! migrations follow the usual sqlx setup.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use taskdeck_core::types::DocId;

use crate::document::{Document, DocumentStore, Filter, StoreError};

pub type DbPool = PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// [`DocumentStore`] implementation over a Postgres JSONB table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Collapse equality filters into a single JSON object for `@>` containment.
fn filters_to_object(filters: &[Filter]) -> Value {
    let mut obj = Map::new();
    for filter in filters {
        obj.insert(filter.field.clone(), filter.value.clone());
    }
    Value::Object(obj)
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find(&self, collection: &str, filters: &[Filter]) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 AND data @> $2")
            .bind(collection)
            .bind(filters_to_object(filters))
            .fetch_all(&self.pool)
            .await?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            docs.push(Document {
                id: row.try_get("id")?,
                data: row.try_get("data")?,
            });
        }
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match row {
            Some(row) => Some(Document {
                id: id.to_string(),
                data: row.try_get("data")?,
            }),
            None => None,
        })
    }

    async fn add(&self, collection: &str, data: Value) -> Result<DocId, StoreError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(data)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
        // `||` is a shallow top-level merge; null values in the patch are
        // written through, matching the memory backend.
        let result =
            sqlx::query("UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .bind(patch)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn batch_delete(&self, collection: &str, ids: &[DocId]) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }
        // A single statement: the batch commits or fails as one unit.
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = ANY($2)")
            .bind(collection)
            .bind(ids.to_vec())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
