pub mod auth;
pub mod chat;
pub mod conversations;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                    register (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (public, idempotent)
///
/// /users/me                         get, patch (requires auth)
/// /users/me/password                change password (requires auth)
///
/// /conversations                    list, create (requires auth)
/// /conversations/{id}               get, patch, delete
/// /conversations/{id}/messages      list messages
///
/// /chat/text                        text exchange (POST)
/// /chat/voice                       voice exchange (POST, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/conversations", conversations::router())
        .nest("/chat", chat::router())
}
