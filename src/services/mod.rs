pub mod ai_service;
pub mod auth_service;
pub mod dsa_service;
pub mod judge_service;
pub mod scoring_service;
pub mod session_service;
