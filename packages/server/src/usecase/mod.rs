//! UseCase layer: the ingress pipeline, history queries, and the
//! background bus relay.

mod error;
mod get_history;
mod ingest_message;
mod relay;

pub use error::IngestError;
pub use get_history::GetHistoryUseCase;
pub use ingest_message::IngestMessageUseCase;
pub use relay::{BusRelay, RelayHandle};
