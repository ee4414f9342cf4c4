mod support;

use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use recipe_client::{
    contact::{ContactForm, MSG_SENT, MSG_UNREACHABLE},
    route::{Navigator, Route},
    signup::SignUpForm,
    status::StatusKind,
    types::{ContactReq, ResendReq, SignUpReq},
    verify::{VerificationState, VerifyEmailHandler, VerifyNotice},
    view,
};
use serde_json::{json, Value};

async fn contact(Json(req): Json<ContactReq>) -> (StatusCode, Json<Value>) {
    if req.message.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "Message is required" })));
    }
    (StatusCode::OK, Json(json!({ "message": "Thanks!" })))
}

async fn signup(Json(req): Json<SignUpReq>) -> (StatusCode, Json<Value>) {
    if req.email == "taken@example.com" {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "User already exists" })),
        );
    }
    (StatusCode::CREATED, Json(json!({ "success": true })))
}

async fn verify(Path(token): Path<String>) -> (StatusCode, Json<Value>) {
    if token == "valid-token" {
        (StatusCode::OK, Json(json!({ "message": "Email verified" })))
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({ "message": "Invalid or expired token" })))
    }
}

async fn resend(Json(req): Json<ResendReq>) -> (StatusCode, Json<Value>) {
    if req.email == "user@example.com" {
        (StatusCode::OK, Json(json!({ "message": "Verification email resent." })))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "User not found" })))
    }
}

async fn backend() -> String {
    let app = Router::new()
        .route("/contact", post(contact))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/verify-email/:token", get(verify))
        .route("/api/auth/resend-verification", post(resend));
    support::serve(app).await
}

fn contact_form(base: &str, message: &str) -> ContactForm {
    let mut form = ContactForm::new(support::api(base));
    form.set_field("name", "Ada").unwrap();
    form.set_field("email", "ada@example.com").unwrap();
    form.set_field("message", message).unwrap();
    form
}

#[tokio::test]
async fn contact_round_trip() {
    let base = backend().await;

    let mut form = contact_form(&base, "Great site");
    form.submit().await;
    assert_eq!(form.status().map(|s| s.text), Some(MSG_SENT.to_owned()));
    assert!(form.draft().is_empty());

    let mut form = contact_form(&base, "   ");
    form.submit().await;
    let status = form.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Error: Message is required");
    assert!(view::contact(&form).contains("[error] Error: Message is required"));
}

#[tokio::test]
async fn contact_backend_down() {
    let base = support::dead_base().await;
    let mut form = contact_form(&base, "Hello?");
    form.submit().await;
    assert_eq!(form.status().map(|s| s.text), Some(MSG_UNREACHABLE.to_owned()));
    assert_eq!(form.draft().get("message"), "Hello?");
}

#[tokio::test]
async fn signup_then_verify_notice() {
    let base = backend().await;
    let api = support::api(&base);
    let (nav, mut routes) = Navigator::channel();

    let mut form = SignUpForm::new(Arc::clone(&api), nav.clone());
    form.set_field("name", "Ada").unwrap();
    form.set_field("email", "user@example.com").unwrap();
    form.set_field("password", "abcd1234").unwrap();
    assert!(form.submit().await);

    let Some(Route::VerifyNotice { email }) = routes.recv().await else {
        panic!("expected verify notice navigation");
    };
    assert_eq!(email, "user@example.com");

    let notice = VerifyNotice::new(api, email);
    assert!(notice.resend().await);
    let text = view::verify_notice(&notice);
    assert!(text.contains("sent to user@example.com"));
    assert!(text.contains("[ok] Verification email resent."));
    assert!(text.contains("Resend Verification Link"));
}

#[tokio::test]
async fn signup_rejected_by_server() {
    let base = backend().await;
    let (nav, mut routes) = Navigator::channel();
    let mut form = SignUpForm::new(support::api(&base), nav);
    form.set_field("email", "taken@example.com").unwrap();
    form.set_field("password", "abcd1234").unwrap();

    assert!(!form.submit().await);
    assert_eq!(form.error(), Some("User already exists"));
    assert!(routes.try_recv().is_err());
}

#[tokio::test]
async fn resend_for_unknown_address() {
    let base = backend().await;
    let notice = VerifyNotice::new(support::api(&base), "nobody@example.com");
    notice.resend().await;
    let status = notice.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "User not found");
}

#[tokio::test]
async fn verification_link() {
    let base = backend().await;
    let (nav, mut routes) = Navigator::channel();

    let mut handler = VerifyEmailHandler::mount(support::api(&base), nav.clone(), "valid-token");
    assert_eq!(handler.settled().await, VerificationState::Verified);
    assert_eq!(routes.recv().await, Some(Route::Verified));

    let mut handler = VerifyEmailHandler::mount(support::api(&base), nav, "stale-token");
    assert_eq!(handler.settled().await, VerificationState::Error);
    assert_eq!(
        view::verification(handler.state()),
        "Invalid or expired verification link.\n"
    );
}
