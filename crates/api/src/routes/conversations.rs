//! Route definitions for the `/conversations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::conversations;
use crate::state::AppState;

/// Routes mounted at `/conversations`. All require authentication.
///
/// ```text
/// GET    /               -> list (paginated)
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update (title)
/// DELETE /{id}           -> delete (messages cascade)
/// GET    /{id}/messages  -> list_messages
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(conversations::list).post(conversations::create),
        )
        .route(
            "/{id}",
            get(conversations::get_by_id)
                .patch(conversations::update)
                .delete(conversations::delete),
        )
        .route("/{id}/messages", get(conversations::list_messages))
}
