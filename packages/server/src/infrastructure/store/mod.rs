//! Message store implementations: Postgres-backed (persistent mode)
//! and in-memory ring (ephemeral mode).

mod ephemeral;
mod postgres;

pub use ephemeral::{EPHEMERAL_HISTORY_CAPACITY, EphemeralMessageStore};
pub use postgres::PostgresMessageStore;
