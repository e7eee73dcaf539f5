use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::session_dto::{
        CompleteRound1Response, ConfirmDetailsRequest, ConfirmDetailsResponse,
        CurrentQuestionResponse, QuestionsResponse, RecordResponseRequest, RecordResponseResponse,
        ValidateSessionResponse,
    },
    error::Result,
    models::session::RoundOneState,
    question_bank, AppState,
};

#[axum::debug_handler]
pub async fn validate_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    Ok(Json(ValidateSessionResponse::from(session)))
}

#[axum::debug_handler]
pub async fn confirm_details(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<ConfirmDetailsRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = state.session_service.validate_session(&token).await?;
    let updated = state
        .session_service
        .confirm_details(&session, &req.name, &req.email, req.phone.as_deref())
        .await?;
    Ok(Json(ConfirmDetailsResponse {
        success: true,
        candidate_name: updated.candidate_name.unwrap_or_default(),
        candidate_email: updated.candidate_email.unwrap_or_default(),
    }))
}

#[axum::debug_handler]
pub async fn get_questions(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    let questions = state.session_service.questions_for(session.id).await?;
    Ok(Json(QuestionsResponse {
        questions,
        total_questions: question_bank::MCQ_QUESTION_COUNT,
        per_question_seconds: question_bank::MCQ_SECONDS_PER_QUESTION,
    }))
}

#[axum::debug_handler]
pub async fn get_current_question(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    let response = match session.round1_state() {
        RoundOneState::Completed { completed_at } => CurrentQuestionResponse {
            completed: true,
            completed_at: Some(completed_at),
            current_question_number: None,
            current_question: None,
            total_questions: None,
            responses_count: None,
        },
        RoundOneState::InProgress { current_question } => {
            let questions = state.session_service.questions_for(session.id).await?;
            let question = questions.get((current_question - 1) as usize).cloned();
            let responses_count = state.session_service.count_responses(session.id).await?;
            CurrentQuestionResponse {
                completed: false,
                completed_at: None,
                current_question_number: Some(current_question),
                current_question: question,
                total_questions: Some(question_bank::MCQ_QUESTION_COUNT),
                responses_count: Some(responses_count),
            }
        }
    };
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn record_response(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<RecordResponseRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = state.session_service.validate_session(&token).await?;
    let next_question_number = state
        .session_service
        .record_response(
            &session,
            req.question_number,
            &req.selected_indices,
            req.time_spent,
            req.skipped,
        )
        .await?;
    Ok(Json(RecordResponseResponse {
        success: true,
        next_question_number,
    }))
}

#[axum::debug_handler]
pub async fn complete_round1(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.validate_session(&token).await?;
    let outcome = state.session_service.complete_round1(&session).await?;
    if !outcome.already_completed {
        tracing::info!(
            "Round 1 completed for session {} with {} responses",
            session.id,
            outcome.total_responses
        );
    }
    Ok(Json(CompleteRound1Response {
        success: true,
        already_completed: outcome.already_completed,
        completed_at: outcome.completed_at,
        total_responses: outcome.total_responses,
    }))
}
