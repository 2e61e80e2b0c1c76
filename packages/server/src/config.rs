//! Environment-supplied endpoint configuration.

use std::env;

/// Well-known bus channel every instance publishes and subscribes on.
pub const BUS_CHANNEL: &str = "chat_messages";

/// Endpoint configuration, resolved once at startup.
///
/// An absent `DATABASE_URL` selects the ephemeral store; an absent
/// `BUS_URL` selects local-only mode. Mode selection happens at
/// construction of the adapters, not at call sites.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database_url: Option<String>,
    pub bus_url: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            database_url: non_empty(env::var("DATABASE_URL").ok()),
            bus_url: non_empty(env::var("BUS_URL").ok()),
        }
    }

    pub fn store_mode(&self) -> &'static str {
        if self.database_url.is_some() {
            "persistent"
        } else {
            "ephemeral"
        }
    }

    pub fn bus_mode(&self) -> &'static str {
        if self.bus_url.is_some() {
            "networked"
        } else {
            "local-only"
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
