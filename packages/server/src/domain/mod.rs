//! Domain types and the interfaces the relay core requires from its
//! collaborators (durable store, pub/sub bus).

mod bus;
mod error;
mod message;
mod store;

pub use bus::{BusStream, BusTransport};
pub use error::{BusError, StoreError, ValidationError};
pub use message::{Message, Submission};
pub use store::MessageStore;
