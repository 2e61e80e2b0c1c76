//! Multi-instance chat relay server library.
//!
//! Clients connect over WebSocket or submit one-shot HTTP messages;
//! every accepted message is persisted, published to a shared broadcast
//! bus, and delivered to every locally connected client, regardless of
//! which instance originated it.

// layers
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
