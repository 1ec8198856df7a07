//! HTTP handler functions, one module per resource.

pub mod auth;
pub mod chat;
pub mod conversations;
pub mod users;
