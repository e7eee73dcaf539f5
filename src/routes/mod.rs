pub mod auth;
pub mod dsa;
pub mod health;
pub mod interviewer;
pub mod session;
