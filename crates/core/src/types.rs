//! Type aliases shared across all crates.

/// All database primary keys are UUID v4.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
