//! End-to-end tests for the auth crate
//!
//! Drive the router with `oneshot` against the in-memory repository and a
//! recording mailer.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use platform::mail::{MailError, Mailer, OutgoingEmail};
use platform::token::SessionTokens;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::infra::memory::InMemoryUserRepository;
use crate::presentation::router::auth_router_generic;

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FailingMailer;

impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), MailError> {
        Err(MailError::Transport("connection refused".to_string()))
    }
}

struct Harness {
    app: Router,
    repo: InMemoryUserRepository,
    mailer: RecordingMailer,
    tokens: Arc<SessionTokens>,
}

fn harness() -> Harness {
    let repo = InMemoryUserRepository::new();
    let mailer = RecordingMailer::default();
    let tokens = Arc::new(SessionTokens::with_random_secret(Duration::days(7)));
    let app = auth_router_generic(
        repo.clone(),
        mailer.clone(),
        tokens.clone(),
        AuthConfig::development(),
    );
    Harness {
        app,
        repo,
        mailer,
        tokens,
    }
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value, Option<String>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json, cookie)
}

fn ada_signup() -> Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "Abc12345!",
        "role": "worker",
        "departments": ["Media"]
    })
}

async fn stored_otp(repo: &InMemoryUserRepository, email: &str) -> String {
    let user = repo
        .find_by_email(&Email::new(email).unwrap())
        .await
        .unwrap()
        .unwrap();
    user.pending_otp.unwrap().code.as_str().to_string()
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_signup_verify_signin_scenario() {
    let h = harness();

    let (status, body, _) = post_json(&h.app, "/signup", ada_signup()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["redirectTo"], "/otp-page");
    assert_eq!(body["email"], "ada@example.com");

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 1);
    let otp = stored_otp(&h.repo, "ada@example.com").await;
    assert!(sent[0].text.contains(&otp));
    assert_eq!(sent[0].to, "ada@example.com");

    let (status, body, _) = post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "ada@example.com", "otp": otp }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirectTo"], "/signin");
    assert_eq!(body["user"]["isVerified"], true);
    assert_eq!(body["user"]["role"], "worker");
    assert_eq!(body["user"]["departments"], json!(["Media Dept"]));

    let (status, body, cookie) = post_json(
        &h.app,
        "/signin",
        json!({ "email": "ada@example.com", "password": "Abc12345!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirectTo"], "/workers");
    assert_eq!(body["user"]["name"], "Ada");

    let cookie = cookie.expect("session cookie");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_signup_email_is_normalised() {
    let h = harness();
    let mut body = ada_signup();
    body["email"] = json!("  ADA@Example.COM ");

    let (status, body, _) = post_json(&h.app, "/signup", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn test_signup_duplicate_email_is_rejected() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;
    let first_otp = stored_otp(&h.repo, "ada@example.com").await;

    let mut second = ada_signup();
    second["name"] = json!("Someone Else");
    second["email"] = json!("Ada@Example.com");
    let (status, body, _) = post_json(&h.app, "/signup", second).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already exists");
    assert_eq!(h.repo.len().await, 1);
    assert_eq!(stored_otp(&h.repo, "ada@example.com").await, first_otp);
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let h = harness();
    let (status, body, _) = post_json(
        &h.app,
        "/signup",
        json!({ "name": "Ada", "email": "ada@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "All fields are required");
}

#[tokio::test]
async fn test_signup_leader_needs_exactly_one_department() {
    let h = harness();

    for departments in [json!([]), json!(["Media", "IT"])] {
        let (status, body, _) = post_json(
            &h.app,
            "/signup",
            json!({
                "name": "Lea",
                "email": "lea@example.com",
                "password": "Abc12345!",
                "role": "leader",
                "departments": departments
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Leaders must select exactly one department");
    }
    assert!(h.repo.is_empty().await);
}

#[tokio::test]
async fn test_signup_unknown_department() {
    let h = harness();
    let mut body = ada_signup();
    body["departments"] = json!(["Media", "Accounting"]);

    let (status, body, _) = post_json(&h.app, "/signup", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Unknown department: Accounting");
}

#[tokio::test]
async fn test_signup_weak_password() {
    let h = harness();
    let mut body = ada_signup();
    body["password"] = json!("password");

    let (status, _, _) = post_json(&h.app, "/signup", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(h.repo.is_empty().await);
}

#[tokio::test]
async fn test_signup_password_longer_than_twelve_characters() {
    let h = harness();
    let mut body = ada_signup();
    body["password"] = json!("Abcdefgh123!x");

    let (status, body, _) = post_json(&h.app, "/signup", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Password must be at most 12 characters");
    assert!(h.repo.is_empty().await);

    let mut body = ada_signup();
    body["password"] = json!("Abcdefgh123!");
    let (status, _, _) = post_json(&h.app, "/signup", body).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_signup_rolls_back_when_mail_fails() {
    let repo = InMemoryUserRepository::new();
    let tokens = Arc::new(SessionTokens::with_random_secret(Duration::days(7)));
    let app = auth_router_generic(repo.clone(), FailingMailer, tokens, AuthConfig::development());

    let (status, body, _) = post_json(&app, "/signup", ada_signup()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Failed to send OTP email. Please try again.");
    assert!(repo.is_empty().await);
}

// ============================================================================
// OTP
// ============================================================================

#[tokio::test]
async fn test_verify_otp_wrong_code_keeps_state() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;
    let otp = stored_otp(&h.repo, "ada@example.com").await;
    let wrong = if otp == "123456" { "654321" } else { "123456" };

    let (status, body, _) = post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "ada@example.com", "otp": wrong }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid OTP");
    assert_eq!(stored_otp(&h.repo, "ada@example.com").await, otp);
}

#[tokio::test]
async fn test_verify_otp_expired() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;

    let email = Email::new("ada@example.com").unwrap();
    let mut user = h.repo.find_by_email(&email).await.unwrap().unwrap();
    let otp = user.pending_otp.clone().unwrap();
    user.pending_otp = Some(crate::domain::PendingOtp {
        expires_at: Utc::now() - Duration::seconds(1),
        ..otp.clone()
    });
    h.repo.update(&user).await.unwrap();

    let (status, body, _) = post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "ada@example.com", "otp": otp.code.as_str() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "OTP has expired");
    let user = h.repo.find_by_email(&email).await.unwrap().unwrap();
    assert!(!user.is_verified);
}

#[tokio::test]
async fn test_verify_otp_unknown_email_and_missing_fields() {
    let h = harness();

    let (status, _, _) = post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "nobody@example.com", "otp": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = post_json(&h.app, "/verify-otp", json!({ "email": "a@b.co" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_email_is_rejected_before_lookup() {
    let h = harness();

    let (status, body, _) = post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "not-an-email", "otp": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid email format");

    let (status, body, _) =
        post_json(&h.app, "/resend-otp", json!({ "email": "not-an-email" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid email format");
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_resend_twice_within_cooldown_is_rate_limited() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;

    let email = Email::new("ada@example.com").unwrap();
    let mut user = h.repo.find_by_email(&email).await.unwrap().unwrap();
    user.last_otp_sent_at = Some(Utc::now() - Duration::seconds(61));
    h.repo.update(&user).await.unwrap();

    let (status, body, _) =
        post_json(&h.app, "/resend-otp", json!({ "email": "ada@example.com" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyVerified"], false);

    let request = Request::builder()
        .method("POST")
        .uri("/resend-otp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": "ada@example.com" }).to_string()))
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    let sent = h.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].subject, "Your new EMGS OTP");
}

#[tokio::test]
async fn test_resend_replaces_code() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;
    let email = Email::new("ada@example.com").unwrap();
    let mut user = h.repo.find_by_email(&email).await.unwrap().unwrap();
    user.last_otp_sent_at = Some(Utc::now() - Duration::seconds(60));
    h.repo.update(&user).await.unwrap();

    post_json(&h.app, "/resend-otp", json!({ "email": "ada@example.com" })).await;

    let new_otp = stored_otp(&h.repo, "ada@example.com").await;
    assert!(h.mailer.sent()[1].text.contains(&new_otp));
}

#[tokio::test]
async fn test_resend_for_verified_and_unknown_accounts() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;
    let otp = stored_otp(&h.repo, "ada@example.com").await;
    post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "ada@example.com", "otp": otp }),
    )
    .await;

    let (status, body, _) =
        post_json(&h.app, "/resend-otp", json!({ "email": "ada@example.com" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyVerified"], true);

    let (status, _, _) =
        post_json(&h.app, "/resend-otp", json!({ "email": "ghost@example.com" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = post_json(&h.app, "/resend-otp", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Sign in / session
// ============================================================================

#[tokio::test]
async fn test_signin_unverified_is_forbidden() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;

    let (status, body, cookie) = post_json(
        &h.app,
        "/signin",
        json!({ "email": "ada@example.com", "password": "Abc12345!" }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Please verify your email before signing in");
    assert!(cookie.is_none());
}

#[tokio::test]
async fn test_signin_bad_credentials_look_the_same() {
    let h = harness();
    post_json(&h.app, "/signup", ada_signup()).await;

    let (status_wrong, wrong, _) = post_json(
        &h.app,
        "/signin",
        json!({ "email": "ada@example.com", "password": "Wrong123!" }),
    )
    .await;
    let (status_unknown, unknown, _) = post_json(
        &h.app,
        "/signin",
        json!({ "email": "ghost@example.com", "password": "Abc12345!" }),
    )
    .await;

    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["detail"], unknown["detail"]);
}

#[tokio::test]
async fn test_signin_missing_fields() {
    let h = harness();
    let (status, _, _) = post_json(&h.app, "/signin", json!({ "email": "ada@example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_leader_lands_on_department_page() {
    let h = harness();
    post_json(
        &h.app,
        "/signup",
        json!({
            "name": "Lea",
            "email": "lea@example.com",
            "password": "Abc12345!",
            "role": "leader",
            "departments": ["IELTS Masterclass"]
        }),
    )
    .await;
    let otp = stored_otp(&h.repo, "lea@example.com").await;
    post_json(
        &h.app,
        "/verify-otp",
        json!({ "email": "lea@example.com", "otp": otp }),
    )
    .await;

    let (status, body, _) = post_json(
        &h.app,
        "/signin",
        json!({ "email": "lea@example.com", "password": "Abc12345!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirectTo"], "/leaders/ielts-masterclass");
}

#[tokio::test]
async fn test_status_and_logout() {
    let h = harness();
    let user_id = kernel::id::UserId::new();
    let (token, _) = h.tokens.issue(user_id, kernel::role::Role::Worker, Utc::now());

    let request = Request::builder()
        .uri("/status")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = send(&h.app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["role"], "worker");

    let request = Request::builder()
        .uri("/status")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (_, body, _) = send(&h.app, request).await;
    assert_eq!(body["authenticated"], true);

    let request = Request::builder().uri("/status").body(Body::empty()).unwrap();
    let (_, body, _) = send(&h.app, request).await;
    assert_eq!(body["authenticated"], false);
    assert!(body.get("userId").is_none());

    let (status, body, cookie) = post_json(&h.app, "/logout", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
    let cookie = cookie.unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

// ============================================================================
// Access gate
// ============================================================================

mod gate {
    use super::*;
    use crate::presentation::middleware::{GateState, access_gate};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use kernel::id::UserId;
    use kernel::role::Role;

    fn gated_app(tokens: Arc<SessionTokens>) -> Router {
        Router::new()
            .route("/workers", get(|| async { "workers" }))
            .route("/leaders/media", get(|| async { "media" }))
            .route("/signin", get(|| async { "signin" }))
            .layer(from_fn_with_state(GateState::new(tokens, "token"), access_gate))
    }

    async fn get_with_cookie(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Option<String>) {
        let mut builder = Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("token={token}"));
        }
        let response = app
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        (response.status(), location)
    }

    #[tokio::test]
    async fn test_anonymous_is_sent_to_signin_with_return_path() {
        let tokens = Arc::new(SessionTokens::with_random_secret(Duration::days(7)));
        let app = gated_app(tokens);

        let (status, location) = get_with_cookie(&app, "/leaders/media", None).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin?redirect=%2Fleaders%2Fmedia"));

        let (status, _) = get_with_cookie(&app, "/signin", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_roles_are_kept_in_their_area() {
        let tokens = Arc::new(SessionTokens::with_random_secret(Duration::days(7)));
        let app = gated_app(tokens.clone());
        let (worker, _) = tokens.issue(UserId::new(), Role::Worker, Utc::now());
        let (leader, _) = tokens.issue(UserId::new(), Role::Leader, Utc::now());

        let (status, location) = get_with_cookie(&app, "/leaders/media", Some(&worker)).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/workers"));

        let (status, location) = get_with_cookie(&app, "/workers", Some(&leader)).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/leaders"));

        let (status, _) = get_with_cookie(&app, "/workers", Some(&worker)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_with_cookie(&app, "/leaders/media", Some(&leader)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forged_token_goes_to_plain_signin() {
        let tokens = Arc::new(SessionTokens::with_random_secret(Duration::days(7)));
        let other = SessionTokens::with_random_secret(Duration::days(7));
        let app = gated_app(tokens);
        let (forged, _) = other.issue(UserId::new(), Role::Leader, Utc::now());

        let (status, location) = get_with_cookie(&app, "/leaders/media", Some(&forged)).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/signin"));
    }
}
