//! HTTP-level integration tests for the auth endpoints.
//!
//! Covers registration, login, refresh-token rotation, logout idempotence,
//! and the full session lifecycle.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a user via the API. Returns the created user JSON.
async fn register_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "full_name": "Test User",
        "email": email,
        "password": password,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Log in via the API and return the token pair JSON.
async fn login_user(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with the user profile and no tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app, "new@test.com", "a-strong-password").await;

    assert_eq!(json["email"], "new@test.com");
    assert_eq!(json["full_name"], "Test User");
    assert!(json["id"].is_string());
    assert!(
        json.get("access_token").is_none() && json.get("refresh_token").is_none(),
        "registration must not issue tokens"
    );
    assert!(
        json.get("password_hash").is_none(),
        "the password hash must never leave the server"
    );
}

/// Registering the same email twice returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "dup@test.com", "pw-one").await;

    let body = serde_json::json!({
        "full_name": "Second User",
        "email": "dup@test.com",
        "password": "pw-two",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with an access/refresh pair.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "login@test.com", "secret-pw").await;

    let json = login_user(common::build_test_app(pool), "login@test.com", "secret-pw").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
}

/// Unknown email and wrong password produce the identical 401 response,
/// so the login endpoint cannot be used to enumerate accounts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_failures_are_indistinguishable(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "real@test.com", "right-pw").await;

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "right-pw" });
    let unknown_email = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_json = body_json(unknown_email).await;

    let body = serde_json::json!({ "email": "real@test.com", "password": "wrong-pw" });
    let wrong_password = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_json = body_json(wrong_password).await;

    assert_eq!(
        unknown_json["error"], wrong_json["error"],
        "both failure paths must return the same message"
    );
}

// ---------------------------------------------------------------------------
// Refresh rotation
// ---------------------------------------------------------------------------

/// A valid refresh token yields a new pair, and the new refresh token differs.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "rot@test.com", "pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "rot@test.com", "pw").await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_ne!(
        json["refresh_token"].as_str().unwrap(),
        refresh_token,
        "refresh token must rotate on use"
    );
}

/// After rotation the old token is dead and the new one works exactly once.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_old_refresh_token_dies_after_rotation(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "once@test.com", "pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "once@test.com", "pw").await;
    let old_token = login["refresh_token"].as_str().unwrap().to_string();

    // First rotation succeeds.
    let body = serde_json::json!({ "refresh_token": old_token });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_token = json["refresh_token"].as_str().unwrap().to_string();

    // The old token is now revoked.
    let body = serde_json::json!({ "refresh_token": old_token });
    let replay =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);

    // The replacement works exactly once.
    let body = serde_json::json!({ "refresh_token": new_token.clone() });
    let first_use =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(first_use.status(), StatusCode::OK);

    let body = serde_json::json!({ "refresh_token": new_token });
    let second_use = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(second_use.status(), StatusCode::UNAUTHORIZED);
}

/// Two rotations of the same token racing each other mint exactly one
/// replacement pair; the loser gets 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_refresh_spends_token_once(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "race@test.com", "pw").await;

    for round in 0..5 {
        let login = login_user(common::build_test_app(pool.clone()), "race@test.com", "pw").await;
        let token = login["refresh_token"].as_str().unwrap().to_string();

        let body = serde_json::json!({ "refresh_token": token.clone() });
        let left = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/refresh",
            body,
        );
        let body = serde_json::json!({ "refresh_token": token });
        let right = post_json(
            common::build_test_app(pool.clone()),
            "/api/v1/auth/refresh",
            body,
        );

        let (left, right) = tokio::join!(left, right);
        let successes = [left.status(), right.status()]
            .into_iter()
            .filter(|s| *s == StatusCode::OK)
            .count();
        assert_eq!(
            successes, 1,
            "round {round}: the same refresh token must be spendable exactly once"
        );
    }
}

/// Refreshing with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_invalid_token(pool: sqlx::PgPool) {
    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An access token presented at the refresh endpoint is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_access_token_cannot_refresh(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "kind@test.com", "pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "kind@test.com", "pw").await;
    let access_token = login["access_token"].as_str().unwrap();

    let body = serde_json::json!({ "refresh_token": access_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout revokes the session; the refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_session(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "out@test.com", "pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "out@test.com", "pw").await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": refresh_token.clone() });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/logout", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Successfully logged out");

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let refresh = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

/// Logging out twice with the same token succeeds both times.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_is_idempotent(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "twice@test.com", "pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "twice@test.com", "pw").await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let body = serde_json::json!({ "refresh_token": refresh_token.clone() });
        let response =
            post_json(common::build_test_app(pool.clone()), "/api/v1/auth/logout", body).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Garbage tokens are also a successful logout.
    let body = serde_json::json!({ "refresh_token": "garbage" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/logout", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Full lifecycle
// ---------------------------------------------------------------------------

/// register -> login -> authenticated request -> refresh -> logout ->
/// refresh fails.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_session_lifecycle(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "life@test.com", "cycle-pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "life@test.com", "cycle-pw").await;
    let access_token = login["access_token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();

    // The access token authenticates requests.
    let me = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/users/me",
        access_token,
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let me_json = body_json(me).await;
    assert_eq!(me_json["email"], "life@test.com");

    // Rotate.
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    let current_refresh = rotated["refresh_token"].as_str().unwrap().to_string();

    // Logout with the current token.
    let body = serde_json::json!({ "refresh_token": current_refresh.clone() });
    let logout =
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/logout", body).await;
    assert_eq!(logout.status(), StatusCode::OK);

    // The session is dead.
    let body = serde_json::json!({ "refresh_token": current_refresh });
    let refresh = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Protected endpoints
// ---------------------------------------------------------------------------

/// A protected endpoint without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_endpoint_requires_auth(pool: sqlx::PgPool) {
    let response = common::get(common::build_test_app(pool), "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A refresh token presented as a Bearer credential is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_token_is_not_a_bearer_credential(pool: sqlx::PgPool) {
    register_user(common::build_test_app(pool.clone()), "bearer@test.com", "pw").await;
    let login = login_user(common::build_test_app(pool.clone()), "bearer@test.com", "pw").await;
    let refresh_token = login["refresh_token"].as_str().unwrap();

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/users/me",
        refresh_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
