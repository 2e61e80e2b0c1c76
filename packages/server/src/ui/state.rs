//! Server state shared across handlers.

use std::sync::Arc;

use crate::infrastructure::ConnectionRegistry;
use crate::usecase::{GetHistoryUseCase, IngestMessageUseCase};

/// Shared application state
pub struct AppState {
    pub ingest_message_usecase: Arc<IngestMessageUseCase>,
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    pub registry: Arc<ConnectionRegistry>,
    /// Instance identity reported in the welcome frame and on `/info`.
    pub instance_id: u32,
}
