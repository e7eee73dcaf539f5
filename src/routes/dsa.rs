use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::dsa_dto::{
        CompleteRound2Response, ExecuteRequest, Round2QuestionsResponse, SaveCodeRequest,
        SaveCodeResponse, StartRound2Response, SubmitCodeRequest, SubmitCodeResponse,
    },
    error::Result,
    utils::time,
    AppState,
};

#[axum::debug_handler]
pub async fn start_round2(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    let start = state.dsa_service.start_round2(&session).await?;
    if !start.already_started {
        tracing::info!("Round 2 started for session {}", session.id);
    }
    Ok(Json(StartRound2Response {
        success: true,
        already_started: start.already_started,
        started_at: start.started_at,
        time_limit_minutes: time::ROUND2_BUDGET_MINUTES,
    }))
}

#[axum::debug_handler]
pub async fn get_questions(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    let view = state.dsa_service.round2_view(&session).await?;
    Ok(Json(Round2QuestionsResponse {
        questions: view.questions,
        time_remaining: view.time_remaining,
        submissions: view.submissions.into_iter().map(Into::into).collect(),
    }))
}

#[axum::debug_handler]
pub async fn execute_code(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<ExecuteRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = state.session_service.validate_session(&token).await?;
    let result = state
        .dsa_service
        .execute_custom(&session, req.question_number, req.language, &req.code, &req.input)
        .await?;
    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn submit_code(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<SubmitCodeRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = state.session_service.validate_session(&token).await?;
    let outcome = state
        .dsa_service
        .submit_for_grading(&session, req.question_number, req.language, &req.code)
        .await?;
    tracing::info!(
        "Session {} submitted question {}: {}/{} tests passed",
        session.id,
        req.question_number,
        outcome.tests_passed,
        outcome.total_tests
    );
    Ok(Json(SubmitCodeResponse::from(outcome)))
}

#[axum::debug_handler]
pub async fn save_code(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<SaveCodeRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = state.session_service.validate_session(&token).await?;
    let status = state
        .dsa_service
        .save_code(&session, req.question_number, req.language, &req.code)
        .await?;
    Ok(Json(SaveCodeResponse {
        success: true,
        status: status.as_str().to_string(),
    }))
}

#[axum::debug_handler]
pub async fn complete_round2(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    let outcome = state.dsa_service.complete_round2(&session).await?;
    if !outcome.already_completed {
        tracing::info!("Round 2 completed for session {}", session.id);
    }
    Ok(Json(CompleteRound2Response {
        success: true,
        already_completed: outcome.already_completed,
        completed_at: outcome.completed_at,
    }))
}
