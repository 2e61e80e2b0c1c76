//! Infrastructure layer: concrete adapters for connections, storage,
//! and the cross-instance bus.

pub mod bus;
pub mod registry;
pub mod store;

pub use registry::{ConnectionId, ConnectionRegistry, ConnectionSender};
