//! Domain-level error type.
//!
//! Services return [`CoreError`]; the API crate translates each variant
//! into an HTTP status. User-input-driven failures carry a message safe
//! to show the caller. `Internal` messages are logged and replaced with a
//! generic message at the HTTP boundary.

/// Error type for domain and service-level failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested entity does not exist (or is not visible to the caller).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The request payload failed a validation rule.
    #[error("{0}")]
    Validation(String),

    /// The request conflicts with existing state (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),

    /// Authentication failed. The message is deliberately generic so the
    /// caller cannot distinguish which check rejected the credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure. Never shown to the caller verbatim.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with a displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
