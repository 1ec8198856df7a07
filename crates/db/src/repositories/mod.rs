//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Most
//! accept `&PgPool`; [`RefreshTokenRepo`] accepts any `PgExecutor` so its
//! operations can run inside a caller-scoped transaction.

pub mod conversation_repo;
pub mod message_repo;
pub mod refresh_token_repo;
pub mod user_repo;

pub use conversation_repo::ConversationRepo;
pub use message_repo::MessageRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use user_repo::UserRepo;
