//! Shared utilities for the relaychat workspace.

pub mod logger;
pub mod time;
