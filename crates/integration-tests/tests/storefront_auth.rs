//! Signup/login/session/logout flows over HTTP.

use chrono::{Duration, Utc};
use serde_json::{Value, json};

use velora_core::{SessionToken, UserId};
use velora_integration_tests::TestApp;
use velora_storefront::db::sessions::SessionRepository;
use velora_storefront::models::Session;

#[tokio::test]
async fn signup_creates_account_and_session_cookie() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/auth/signup"))
        .json(&json!({
            "email": "new@example.com",
            "name": "New Shopper",
            "password": "password123"
        }))
        .send()
        .await
        .expect("signup");

    assert_eq!(resp.status(), 200);
    let set_cookie = resp
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("session cookie issued")
        .to_str()
        .expect("ascii cookie");
    assert!(set_cookie.starts_with("session_token="));
    assert!(set_cookie.contains("HttpOnly"));

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["user"]["email"], "new@example.com");
    assert_eq!(body["user"]["name"], "New Shopper");

    // Exactly one account and one session row.
    assert_eq!(app.count("users").await, 1);
    assert_eq!(app.count("sessions").await, 1);

    // The cookie authenticates the follow-up request.
    let me: Value = app
        .client
        .get(app.url("/auth/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("json body");
    assert_eq!(me["user"]["email"], "new@example.com");
}

#[tokio::test]
async fn duplicate_email_signup_conflicts_without_new_row() {
    let app = TestApp::spawn().await;
    let payload = json!({"email": "dup@example.com", "password": "password123"});

    let first = app
        .client
        .post(app.url("/auth/signup"))
        .json(&payload)
        .send()
        .await
        .expect("first signup");
    assert_eq!(first.status(), 200);

    let second = app
        .fresh_client()
        .post(app.url("/auth/signup"))
        .json(&payload)
        .send()
        .await
        .expect("second signup");
    assert_eq!(second.status(), 409);
    let body: Value = second.json().await.expect("json body");
    assert_eq!(body["error"], "Email already in use");

    assert_eq!(app.count("users").await, 1);
}

#[tokio::test]
async fn signup_validates_payload_before_any_write() {
    let app = TestApp::spawn().await;

    let bad_email = app
        .client
        .post(app.url("/auth/signup"))
        .json(&json!({"email": "not-an-email", "password": "password123"}))
        .send()
        .await
        .expect("bad email signup");
    assert_eq!(bad_email.status(), 400);

    let short_password = app
        .client
        .post(app.url("/auth/signup"))
        .json(&json!({"email": "ok@example.com", "password": "short"}))
        .send()
        .await
        .expect("short password signup");
    assert_eq!(short_password.status(), 400);

    assert_eq!(app.count("users").await, 0);
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let app = TestApp::spawn().await;
    app.client
        .post(app.url("/auth/signup"))
        .json(&json!({"email": "known@example.com", "password": "password123"}))
        .send()
        .await
        .expect("signup");

    let wrong_password = app
        .fresh_client()
        .post(app.url("/auth/login"))
        .json(&json!({"email": "known@example.com", "password": "password124"}))
        .send()
        .await
        .expect("wrong password login");
    assert_eq!(wrong_password.status(), 401);
    let wrong_password: Value = wrong_password.json().await.expect("json body");

    let unknown_email = app
        .fresh_client()
        .post(app.url("/auth/login"))
        .json(&json!({"email": "unknown@example.com", "password": "password123"}))
        .send()
        .await
        .expect("unknown email login");
    assert_eq!(unknown_email.status(), 401);
    let unknown_email: Value = unknown_email.json().await.expect("json body");

    // Neither response reveals which field was wrong.
    assert_eq!(wrong_password["error"], unknown_email["error"]);
}

#[tokio::test]
async fn login_issues_a_working_session() {
    let app = TestApp::spawn().await;
    app.client
        .post(app.url("/auth/signup"))
        .json(&json!({"email": "back@example.com", "password": "password123"}))
        .send()
        .await
        .expect("signup");

    // A second browser logs in and is recognized.
    let browser = app.fresh_client();
    let login = browser
        .post(app.url("/auth/login"))
        .json(&json!({"email": "back@example.com", "password": "password123"}))
        .send()
        .await
        .expect("login");
    assert_eq!(login.status(), 200);

    let me: Value = browser
        .get(app.url("/auth/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("json body");
    assert_eq!(me["user"]["email"], "back@example.com");

    // Two concurrent sessions now exist for the account.
    assert_eq!(app.count("sessions").await, 2);
}

#[tokio::test]
async fn logout_revokes_the_session_and_clears_the_cookie() {
    let app = TestApp::spawn().await;
    app.client
        .post(app.url("/auth/signup"))
        .json(&json!({"email": "leaver@example.com", "password": "password123"}))
        .send()
        .await
        .expect("signup");

    let logout = app
        .client
        .post(app.url("/auth/logout"))
        .send()
        .await
        .expect("logout");
    assert_eq!(logout.status(), 200);
    let body: Value = logout.json().await.expect("json body");
    assert_eq!(body["ok"], true);

    assert_eq!(app.count("sessions").await, 0);

    let me: Value = app
        .client
        .get(app.url("/auth/me"))
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("json body");
    assert!(me["user"].is_null());

    // Logging out again is still a success.
    let again = app
        .client
        .post(app.url("/auth/logout"))
        .send()
        .await
        .expect("second logout");
    assert_eq!(again.status(), 200);
}

#[tokio::test]
async fn expired_session_is_unauthenticated_but_row_survives() {
    let app = TestApp::spawn().await;
    let signup: Value = app
        .client
        .post(app.url("/auth/signup"))
        .json(&json!({"email": "stale@example.com", "password": "password123"}))
        .send()
        .await
        .expect("signup")
        .json()
        .await
        .expect("json body");
    let user_id = UserId::new(signup["user"]["id"].as_str().expect("user id"));

    let expired = Session {
        token: SessionToken::new("expired-token"),
        user_id,
        expires_at: Utc::now() - Duration::hours(1),
    };
    SessionRepository::new(&app.pool)
        .create(&expired)
        .await
        .expect("insert expired session");

    let me: Value = app
        .fresh_client()
        .get(app.url("/auth/me"))
        .header("cookie", "session_token=expired-token")
        .send()
        .await
        .expect("me")
        .json()
        .await
        .expect("json body");
    assert!(me["user"].is_null());

    // Lazy expiry: the stale row is ignored, not deleted.
    assert_eq!(app.count("sessions").await, 2);
}
