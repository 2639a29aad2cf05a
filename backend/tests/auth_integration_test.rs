//! Integration tests for authentication endpoints against PostgreSQL
//!
//! Run with `TEST_DATABASE_URL` pointing at a disposable database and
//! `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;
    let form = format!("username={}&password=pw1", unique("register"));

    let response = app.post_form("/auth/register", &form, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_username() {
    let app = common::TestApp::new().await;
    let form = format!("username={}&password=pw1", unique("duplicate"));

    let response = app.post_form("/auth/register", &form, None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let response = app.post_form("/auth/register", &form, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Username already taken");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_stored_hash_is_not_the_password() {
    let app = common::TestApp::new().await;
    let username = unique("hash");
    app.login_as(&username, "plaintext").await;

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
        .bind(&username)
        .fetch_one(app.pool.as_ref().unwrap())
        .await
        .unwrap();

    assert_ne!(hash, "plaintext");
    assert!(hash.starts_with("$2"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let username = unique("wrong_pw");
    app.login_as(&username, "right").await;

    let form = format!("username={}&password=wrong", username);
    let response = app.post_form("/auth/login", &form, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_relogin_leaves_one_session_row() {
    let app = common::TestApp::new().await;
    let username = unique("relogin");
    let first = app.login_as(&username, "pw").await;

    let form = format!("username={}&password=pw", username);
    let second = app
        .post_form("/auth/login", &form, None)
        .await
        .session_cookie()
        .unwrap();

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sessions s JOIN users u ON u.user_id = s.user_id WHERE u.username = $1",
    )
    .bind(&username)
    .fetch_one(app.pool.as_ref().unwrap())
    .await
    .unwrap();
    assert_eq!(rows, 1);

    assert_eq!(app.get("/auth/me", Some(&first)).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/auth/me", Some(&second)).await.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_expired_session_is_rejected() {
    let app = common::TestApp::new().await;
    let cookie = app.login_as(&unique("expired"), "pw").await;
    let token = cookie.trim_start_matches("session_token=");

    sqlx::query("UPDATE sessions SET expires_at = NOW() - INTERVAL '1 second' WHERE session_token = $1")
        .bind(token)
        .execute(app.pool.as_ref().unwrap())
        .await
        .unwrap();

    let response = app.get("/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_logout_deletes_session_row() {
    let app = common::TestApp::new().await;
    let cookie = app.login_as(&unique("logout"), "pw").await;
    let token = cookie.trim_start_matches("session_token=").to_string();

    let response = app.post_form("/auth/logout", "", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE session_token = $1")
        .bind(&token)
        .fetch_one(app.pool.as_ref().unwrap())
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_new_test_app_leaves_other_sessions_alone() {
    let first = common::TestApp::new().await;
    let cookie = first.login_as(&unique("parallel"), "pw").await;

    let _second = common::TestApp::new().await;

    assert_eq!(first.get("/auth/me", Some(&cookie)).await.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_overlong_password_rejected() {
    let app = common::TestApp::new().await;
    let form = format!("username={}&password={}", unique("long"), "a".repeat(73));

    let response = app.post_form("/auth/register", &form, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
