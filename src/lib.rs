pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod question_bank;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::services::{
    ai_service::AIService,
    auth_service::AuthService,
    dsa_service::DsaService,
    judge_service::{CodeExecutor, JudgeService},
    session_service::SessionService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub session_service: SessionService,
    pub dsa_service: DsaService,
    pub auth_service: AuthService,
    pub ai_service: AIService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let judge_service = JudgeService::new(
            config.judge0_url.clone(),
            config.judge0_api_key.clone(),
            config.judge0_api_host.clone(),
            http_client.clone(),
        );
        Self::assemble(pool, Arc::new(judge_service), http_client)
    }

    /// Wire an alternative code executor. Tests use this to keep the
    /// judge off the network.
    pub fn with_executor(pool: PgPool, executor: Arc<dyn CodeExecutor>) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();
        Self::assemble(pool, executor, http_client)
    }

    fn assemble(pool: PgPool, executor: Arc<dyn CodeExecutor>, http_client: Client) -> Self {
        let config = crate::config::get_config();
        let session_service = SessionService::new(pool.clone());
        let dsa_service = DsaService::new(pool.clone(), executor);
        let auth_service = AuthService::new(pool.clone());
        let ai_service = AIService::new(config.openai_api_key.clone(), http_client);

        Self {
            pool,
            session_service,
            dsa_service,
            auth_service,
            ai_service,
        }
    }
}
