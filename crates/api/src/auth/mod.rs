//! Authentication and session-lifecycle primitives.
//!
//! - [`password`] -- bcrypt password hashing over a SHA-256 pre-digest.
//! - [`jwt`] -- signed access/refresh token issuance and validation.
//! - [`service`] -- register/login/refresh/logout orchestration with
//!   refresh-token rotation.

pub mod jwt;
pub mod password;
pub mod service;
