//! Domain error types.

use thiserror::Error;

/// User input errors. These are the only errors surfaced to the
/// originating caller as structured responses; everything else is
/// degraded gracefully.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The submission could not be parsed at all.
    #[error("invalid json")]
    MalformedInput,
    /// `author` or `text` is missing or empty.
    #[error("author and text required")]
    MissingField,
}

/// Durable store failures. Backend errors are stringified at the
/// infrastructure boundary so the domain stays backend-agnostic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("message store backend error: {0}")]
    Backend(String),
}

/// Bus transport failures. Publishing and subscribing are best-effort;
/// callers log these and continue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("bus transport error: {0}")]
    Transport(String),
}
