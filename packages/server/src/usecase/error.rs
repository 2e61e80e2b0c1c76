//! UseCase error types.

use thiserror::Error;

use crate::domain::{StoreError, ValidationError};

/// Errors from the message ingress pipeline.
///
/// Validation errors are surfaced to the originating caller; store
/// errors surface as a failed ingress call. Bus and broadcast failures
/// never appear here: they are degraded inside the pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
