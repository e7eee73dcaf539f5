use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use interview_backend::AppState;

async fn setup() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("FRONTEND_URL", "http://localhost:5173");
    env::set_var("JUDGE0_URL", "http://localhost:2358");
    env::set_var("PUBLIC_RPS", "1000");
    env::set_var("INTERVIEWER_RPS", "1000");

    interview_backend::config::init_config().ok();
    let pool = interview_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Some(pool)
}

fn auth_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/signup", post(interview_backend::routes::auth::signup))
        .route("/api/auth/signin", post(interview_backend::routes::auth::signin))
        .route("/api/auth/refresh", post(interview_backend::routes::auth::refresh))
        .route("/api/auth/logout", post(interview_backend::routes::auth::logout))
        .with_state(state)
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let parsed = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, parsed)
}

fn unique_email() -> String {
    format!("interviewer-{}@example.com", Uuid::new_v4().simple())
}

#[tokio::test]
async fn signup_then_signin() {
    let Some(pool) = setup().await else { return };
    let app = auth_router(AppState::new(pool));
    let email = unique_email();

    let (status, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": email, "password": "Sup3rSecret", "name": "Priya Patel"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["accessToken"].as_str().is_some());
    assert!(body["refreshToken"].as_str().is_some());
    assert_eq!(body["expiresIn"], 3600);
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["name"], "Priya Patel");

    // Same address again is a conflict.
    let (status, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": email, "password": "Sup3rSecret", "name": "Priya Patel"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, body) = post_json(
        &app,
        "/api/auth/signin",
        json!({"email": email, "password": "Sup3rSecret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accessToken"].as_str().is_some());
}

#[tokio::test]
async fn weak_passwords_are_rejected() {
    let Some(pool) = setup().await else { return };
    let app = auth_router(AppState::new(pool));

    // Too short fails the request validator.
    let (status, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": unique_email(), "password": "Ab1", "name": "Shorty"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    // Long enough but no uppercase or digit fails the policy.
    let (status, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": unique_email(), "password": "alllowercase", "name": "Weakling"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn signin_rejects_bad_credentials() {
    let Some(pool) = setup().await else { return };
    let app = auth_router(AppState::new(pool));
    let email = unique_email();

    let (status, _) = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": email, "password": "Sup3rSecret", "name": "Casey"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/api/auth/signin",
        json!({"email": email, "password": "WrongPassw0rd"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, body) = post_json(
        &app,
        "/api/auth/signin",
        json!({"email": "nobody@example.com", "password": "Sup3rSecret"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn refresh_rotates_and_burns_the_old_token() {
    let Some(pool) = setup().await else { return };
    let app = auth_router(AppState::new(pool));

    let (_, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({"email": unique_email(), "password": "Sup3rSecret", "name": "Rotator"}),
    )
    .await;
    let original = body["refreshToken"].as_str().expect("refresh token").to_string();

    let (status, body) =
        post_json(&app, "/api/auth/refresh", json!({"refreshToken": original})).await;
    assert_eq!(status, StatusCode::OK);
    let rotated = body["refreshToken"].as_str().expect("rotated token").to_string();
    assert_ne!(rotated, original);

    // Replaying the consumed token fails.
    let (status, body) =
        post_json(&app, "/api/auth/refresh", json!({"refreshToken": original})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, body) =
        post_json(&app, "/api/auth/logout", json!({"refreshToken": rotated})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) =
        post_json(&app, "/api/auth/refresh", json!({"refreshToken": rotated})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
