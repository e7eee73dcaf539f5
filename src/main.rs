use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use interview_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        let interval = Duration::from_secs(config.sweeper_interval_secs);
        tokio::spawn(async move {
            loop {
                match state.session_service.mark_lapsed_sessions().await {
                    Ok(0) => {}
                    Ok(count) => info!("Marked {} session(s) as lapsed", count),
                    Err(e) => tracing::error!("Session sweeper error: {:?}", e),
                }
                tokio::time::sleep(interval).await;
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let auth_api = Router::new()
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/signin", post(routes::auth::signin))
        .route("/api/auth/refresh", post(routes::auth::refresh))
        .route("/api/auth/logout", post(routes::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.interviewer_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let interviewer_api = Router::new()
        .route(
            "/api/session/create",
            post(routes::interviewer::create_session),
        )
        .route("/api/sessions", get(routes::interviewer::list_sessions))
        .route(
            "/api/sessions/:id/results",
            get(routes::interviewer::session_results),
        )
        .route(
            "/api/sessions/:id/generate-questions",
            post(routes::interviewer::generate_questions),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_interviewer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.interviewer_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let candidate_api = Router::new()
        .route(
            "/api/session/:token",
            get(routes::session::validate_session),
        )
        .route(
            "/api/session/:token/confirm-details",
            post(routes::session::confirm_details),
        )
        .route(
            "/api/session/:token/questions",
            get(routes::session::get_questions),
        )
        .route(
            "/api/session/:token/current-question",
            get(routes::session::get_current_question),
        )
        .route(
            "/api/session/:token/response",
            post(routes::session::record_response),
        )
        .route(
            "/api/session/:token/complete",
            post(routes::session::complete_round1),
        )
        .route(
            "/api/session/:token/round2/start",
            post(routes::dsa::start_round2),
        )
        .route(
            "/api/session/:token/round2/questions",
            get(routes::dsa::get_questions),
        )
        .route(
            "/api/session/:token/round2/execute",
            post(routes::dsa::execute_code),
        )
        .route(
            "/api/session/:token/round2/submit-code",
            post(routes::dsa::submit_code),
        )
        .route(
            "/api/session/:token/round2/save-code",
            post(routes::dsa::save_code),
        )
        .route(
            "/api/session/:token/round2/complete",
            post(routes::dsa::complete_round2),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(auth_api)
        .merge(interviewer_api)
        .merge(candidate_api)
        .with_state(app_state)
        .layer(middleware::cors::cors_layer(&config.frontend_url))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(512 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
