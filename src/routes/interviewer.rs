use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::interviewer_dto::{
        CreateSessionRequest, CreateSessionResponse, GenerateQuestionsRequest,
        GenerateQuestionsResponse, McqResponseView, Round1Results, Round2Results,
        SessionResultsResponse, SessionSummary,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/session/create",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = Json<CreateSessionResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
#[axum::debug_handler]
pub async fn create_session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let created_by = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| Error::Unauthorized("Invalid subject claim".to_string()))?;
    let session = state
        .session_service
        .create_session(
            &req.title,
            Some(created_by),
            req.candidate_name.as_deref(),
            req.candidate_email.as_deref(),
        )
        .await?;
    let config = crate::config::get_config();
    let link = format!(
        "{}/interview/{}",
        config.frontend_url.trim_end_matches('/'),
        session.token
    );
    tracing::info!("Session {} created by {}", session.id, created_by);
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id,
            token: session.token,
            link,
            expires_at: session.expires_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/sessions",
    responses(
        (status = 200, description = "All sessions, newest first", body = Json<Vec<SessionSummary>>),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
#[axum::debug_handler]
pub async fn list_sessions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let sessions = state.session_service.list_sessions().await?;
    let summaries: Vec<SessionSummary> = sessions.into_iter().map(Into::into).collect();
    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/results",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Full per-round results", body = Json<SessionResultsResponse>),
        (status = 404, description = "Session not found")
    )
)]
#[axum::debug_handler]
pub async fn session_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.find_by_id(id).await?;
    let answer_key = state.session_service.answer_key_for(session.id).await?;
    let responses = state.session_service.list_responses(session.id).await?;
    let submissions = state.dsa_service.list_submissions(session.id).await?;

    let mcq_views: Vec<McqResponseView> = responses
        .into_iter()
        .map(|response| {
            let correct = answer_key
                .get((response.question_number - 1) as usize)
                .cloned()
                .unwrap_or_default();
            McqResponseView::from_response(response, correct)
        })
        .collect();

    let round1 = Round1Results {
        completed: session.round1_completed,
        completed_at: session.round1_completed_at,
        score: session.round1_score,
        responses_count: mcq_views.len(),
        responses: mcq_views,
    };
    let round2 = Round2Results {
        started: session.round2_started,
        completed: session.round2_completed,
        started_at: session.round2_started_at,
        completed_at: session.round2_completed_at,
        score: session.round2_score,
        submissions: submissions.into_iter().map(Into::into).collect(),
    };

    Ok(Json(SessionResultsResponse {
        session: session.into(),
        round1,
        round2,
    }))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/generate-questions",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = GenerateQuestionsRequest,
    responses(
        (status = 200, description = "Tailored question set stored", body = Json<GenerateQuestionsResponse>),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Candidate has already begun Round 1")
    )
)]
#[axum::debug_handler]
pub async fn generate_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let session = state.session_service.find_by_id(id).await?;
    // Refuse before the expensive generation call, and again at the write.
    state.session_service.ensure_set_replaceable(&session).await?;

    let set = state.ai_service.generate_mcq_set(&req.context).await?;
    state
        .session_service
        .store_generated_set(&session, &set.questions, &set.answer_key)
        .await?;

    let question_count = set.questions.as_array().map(|a| a.len()).unwrap_or_default();
    tracing::info!("Generated question set stored for session {}", session.id);
    Ok(Json(GenerateQuestionsResponse {
        success: true,
        question_count,
    }))
}
