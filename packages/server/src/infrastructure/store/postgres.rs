//! Postgres-backed message store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

use crate::domain::{Message, MessageStore, StoreError};

/// Upper bound on concurrent store connections; excess callers queue
/// on pool checkout rather than failing.
const MAX_POOL_CONNECTIONS: u32 = 16;

/// Message store backed by a Postgres `messages` table.
pub struct PostgresMessageStore {
    pool: PgPool,
}

impl PostgresMessageStore {
    /// Connect to the database and create the `messages` table if it
    /// does not exist yet. Schema creation is idempotent and completes
    /// before any append is accepted.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(backend)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS messages (
                id BIGSERIAL PRIMARY KEY,
                author TEXT NOT NULL,
                text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&pool)
        .await
        .map_err(backend)?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn row_to_message(row: &PgRow) -> Result<Message, StoreError> {
    Ok(Message {
        id: Some(row.try_get::<i64, _>("id").map_err(backend)?),
        author: row.try_get("author").map_err(backend)?,
        text: row.try_get("text").map_err(backend)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(backend)?,
    })
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn append(&self, author: &str, text: &str) -> Result<Message, StoreError> {
        let row = sqlx::query(
            "INSERT INTO messages (author, text) VALUES ($1, $2)
             RETURNING id, author, text, created_at",
        )
        .bind(author)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row_to_message(&row)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Message>, StoreError> {
        // The query fetches newest-first; reverse before returning so
        // callers always see chronological order.
        let rows = sqlx::query(
            "SELECT id, author, text, created_at FROM messages
             ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let mut messages = rows
            .iter()
            .map(row_to_message)
            .collect::<Result<Vec<_>, _>>()?;
        messages.reverse();
        Ok(messages)
    }
}
