mod http;
mod websocket;

pub use http::{get_messages, health_check, info, post_message};
pub use websocket::websocket_handler;
