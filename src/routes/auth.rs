use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LogoutRequest, RefreshRequest, SigninRequest, SignupRequest},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = Json<AuthResponse>),
        (status = 400, description = "Invalid payload or weak password"),
        (status = 409, description = "Email already registered")
    )
)]
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let (user, tokens) = state
        .auth_service
        .signup(&req.email, &req.password, &req.name)
        .await?;
    tracing::info!("New interviewer account: {}", user.email);
    Ok((StatusCode::CREATED, Json(AuthResponse::new(tokens, user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = Json<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let (user, tokens) = state.auth_service.signin(&req.email, &req.password).await?;
    Ok(Json(AuthResponse::new(tokens, user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = Json<AuthResponse>),
        (status = 401, description = "Refresh token invalid, expired or already used")
    )
)]
#[axum::debug_handler]
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let (user, tokens) = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(AuthResponse::new(tokens, user)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Refresh token revoked")
    )
)]
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    state.auth_service.logout(&req.refresh_token).await?;
    Ok(Json(json!({ "success": true })))
}
