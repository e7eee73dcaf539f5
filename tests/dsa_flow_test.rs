use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;
use tower::ServiceExt;

use interview_backend::{
    error::Result,
    models::dsa_submission::Language,
    question_bank,
    services::judge_service::{CodeExecutor, ExecutionResult},
    AppState,
};

/// Answers question 1's cases correctly and echoes anything else, so the
/// grader sees one solved question without a judge on the network.
struct StubExecutor;

#[async_trait]
impl CodeExecutor for StubExecutor {
    async fn execute(
        &self,
        _language: Language,
        _code: &str,
        stdin: &str,
    ) -> Result<ExecutionResult> {
        let stdout = question_bank::dsa_question(1)
            .map(|q| q.test_cases)
            .unwrap_or(&[])
            .iter()
            .find(|case| case.input == stdin)
            .map(|case| case.expected_output.to_string())
            .unwrap_or_else(|| stdin.to_string());
        Ok(ExecutionResult {
            stdout,
            stderr: String::new(),
            compile_output: String::new(),
            status: "Accepted".to_string(),
            status_id: 3,
            time: Some("0.013".to_string()),
            memory: Some(2048),
        })
    }
}

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

fn dsa_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/session/:token/round2/start",
            post(interview_backend::routes::dsa::start_round2),
        )
        .route(
            "/api/session/:token/round2/questions",
            get(interview_backend::routes::dsa::get_questions),
        )
        .route(
            "/api/session/:token/round2/execute",
            post(interview_backend::routes::dsa::execute_code),
        )
        .route(
            "/api/session/:token/round2/submit-code",
            post(interview_backend::routes::dsa::submit_code),
        )
        .route(
            "/api/session/:token/round2/save-code",
            post(interview_backend::routes::dsa::save_code),
        )
        .route(
            "/api/session/:token/round2/complete",
            post(interview_backend::routes::dsa::complete_round2),
        )
        .with_state(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
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

/// Creates a session with Round 1 already closed, returning its token.
async fn session_past_round1(state: &AppState) -> String {
    let session = state
        .session_service
        .create_session("DSA Screen", None, None, None)
        .await
        .expect("create session");
    state
        .session_service
        .complete_round1(&session)
        .await
        .expect("complete round 1");
    session.token
}

#[tokio::test]
async fn round2_opens_only_after_round1() {
    let Some(pool) = setup().await else { return };
    let state = AppState::with_executor(pool, Arc::new(StubExecutor));
    let app = dsa_router(state.clone());

    let session = state
        .session_service
        .create_session("Gated Screen", None, None, None)
        .await
        .expect("create session");

    let (status, body) =
        post_json(&app, &format!("/api/session/{}/round2/start", session.token), json!({})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "round_not_started");

    state
        .session_service
        .complete_round1(&session)
        .await
        .expect("complete round 1");

    let (status, body) =
        post_json(&app, &format!("/api/session/{}/round2/start", session.token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyStarted"], false);
    assert_eq!(body["timeLimitMinutes"], 90);
    let first_stamp = body["startedAt"].clone();

    // Starting twice reuses the original clock.
    let (status, body) =
        post_json(&app, &format!("/api/session/{}/round2/start", session.token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyStarted"], true);
    assert_eq!(body["startedAt"], first_stamp);
}

#[tokio::test]
async fn round2_workspace_flow() {
    let Some(pool) = setup().await else { return };
    let state = AppState::with_executor(pool.clone(), Arc::new(StubExecutor));
    let app = dsa_router(state.clone());
    let token = session_past_round1(&state).await;

    let (status, _) =
        post_json(&app, &format!("/api/session/{}/round2/start", token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        get_json(&app, &format!("/api/session/{}/round2/questions", token)).await;
    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().expect("question array");
    assert_eq!(questions.len(), 4);
    for q in questions {
        assert!(q.get("testCases").is_none(), "cases must never be served");
        assert!(q["starterCode"]["python"].as_str().is_some());
    }
    assert!(body["timeRemaining"].as_i64().unwrap() > 0);

    // Draft saves: blank code stays untouched, real code marks progress.
    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/save-code", token),
        json!({"questionNumber": 2, "language": "python", "code": "   "}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_attempted");

    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/save-code", token),
        json!({"questionNumber": 2, "language": "python", "code": "print(1)"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "attempted");

    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/execute", token),
        json!({"questionNumber": 1, "language": "python", "code": "print(input())", "input": "custom-probe"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stdout"], "custom-probe");
    assert_eq!(body["status"], "Accepted");

    let total_cases = question_bank::dsa_question(1)
        .map(|q| q.test_cases.len())
        .unwrap_or(0) as i64;
    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/submit-code", token),
        json!({"questionNumber": 1, "language": "python", "code": "print(solve(input()))"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allPassed"], true);
    assert_eq!(body["testsPassed"].as_i64().unwrap(), total_cases);
    assert_eq!(body["totalTests"].as_i64().unwrap(), total_cases);

    // A later draft save must not demote a graded submission.
    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/save-code", token),
        json!({"questionNumber": 1, "language": "python", "code": "print('tweak')"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "submitted");

    let (_, body) = get_json(&app, &format!("/api/session/{}/round2/questions", token)).await;
    let submissions = body["submissions"].as_array().expect("submission array");
    let graded = submissions
        .iter()
        .find(|s| s["questionNumber"] == 1)
        .expect("question 1 submission");
    assert_eq!(graded["status"], "submitted");

    let (status, body) =
        post_json(&app, &format!("/api/session/{}/round2/complete", token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyCompleted"], false);
    let first_stamp = body["completedAt"].clone();

    let (status, body) =
        post_json(&app, &format!("/api/session/{}/round2/complete", token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alreadyCompleted"], true);
    assert_eq!(body["completedAt"], first_stamp);

    // Question 1 carries 33 of the 100 points.
    let score: Option<i32> = sqlx::query_scalar("SELECT round2_score FROM sessions WHERE token = $1")
        .bind(&token)
        .fetch_one(&pool)
        .await
        .expect("score");
    assert_eq!(score, Some(33));

    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/save-code", token),
        json!({"questionNumber": 1, "language": "python", "code": "late"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "round_already_completed");
}

#[tokio::test]
async fn question_number_out_of_range_is_rejected() {
    let Some(pool) = setup().await else { return };
    let state = AppState::with_executor(pool, Arc::new(StubExecutor));
    let app = dsa_router(state.clone());
    let token = session_past_round1(&state).await;

    let (status, _) =
        post_json(&app, &format!("/api/session/{}/round2/start", token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/execute", token),
        json!({"questionNumber": 5, "language": "python", "code": "print(1)", "input": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn deadline_blocks_runs_but_not_saves() {
    let Some(pool) = setup().await else { return };
    let state = AppState::with_executor(pool.clone(), Arc::new(StubExecutor));
    let app = dsa_router(state.clone());
    let token = session_past_round1(&state).await;

    let (status, _) =
        post_json(&app, &format!("/api/session/{}/round2/start", token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    sqlx::query(
        "UPDATE sessions SET round2_started_at = NOW() - INTERVAL '91 minutes' WHERE token = $1",
    )
    .bind(&token)
    .execute(&pool)
    .await
    .expect("age round 2");

    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/execute", token),
        json!({"questionNumber": 1, "language": "python", "code": "print(1)", "input": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "time_expired");

    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/submit-code", token),
        json!({"questionNumber": 1, "language": "python", "code": "print(1)"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "time_expired");

    // The editor may still flush its buffer past the deadline.
    let (status, body) = post_json(
        &app,
        &format!("/api/session/{}/round2/save-code", token),
        json!({"questionNumber": 1, "language": "python", "code": "print('final state')"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "attempted");

    let (_, body) = get_json(&app, &format!("/api/session/{}/round2/questions", token)).await;
    assert_eq!(body["timeRemaining"], 0);

    // Closing out after the deadline still works and scores what exists.
    let (status, body) =
        post_json(&app, &format!("/api/session/{}/round2/complete", token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}
