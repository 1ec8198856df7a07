//! Route definitions for the `/chat` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`. All require authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/text", post(chat::text_chat))
        .route("/voice", post(chat::voice_chat))
}
