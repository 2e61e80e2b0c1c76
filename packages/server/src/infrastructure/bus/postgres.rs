//! Bus transport over Postgres LISTEN/NOTIFY.

use async_trait::async_trait;
use futures_util::StreamExt;
use sqlx::postgres::{PgListener, PgPool, PgPoolOptions};

use crate::domain::{BusError, BusStream, BusTransport};

/// Publishing needs very few connections; subscriptions hold their own.
const MAX_POOL_CONNECTIONS: u32 = 4;

/// Publish/subscribe over `pg_notify`.
///
/// Postgres caps notification payloads at 8000 bytes, which
/// comfortably fits serialized chat messages.
pub struct PostgresBus {
    pool: PgPool,
}

impl PostgresBus {
    pub async fn connect(bus_url: &str) -> Result<Self, BusError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_POOL_CONNECTIONS)
            .connect(bus_url)
            .await
            .map_err(transport)?;
        Ok(Self { pool })
    }
}

fn transport(e: sqlx::Error) -> BusError {
    BusError::Transport(e.to_string())
}

#[async_trait]
impl BusTransport for PostgresBus {
    async fn publish(&self, channel: &str, payload: &str) -> Result<(), BusError> {
        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(channel)
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<BusStream, BusError> {
        let mut listener = PgListener::connect_with(&self.pool)
            .await
            .map_err(transport)?;
        listener.listen(channel).await.map_err(transport)?;

        // Notification errors are logged and skipped so a transient
        // failure never terminates the relay's subscription stream.
        let stream = listener.into_stream().filter_map(|notification| async move {
            match notification {
                Ok(n) => Some(n.payload().to_string()),
                Err(e) => {
                    tracing::warn!("postgres bus notification error: {}", e);
                    None
                }
            }
        });
        Ok(Box::pin(stream))
    }
}
