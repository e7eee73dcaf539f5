pub mod dsa_submission;
pub mod generated_set;
pub mod mcq_response;
pub mod refresh_token;
pub mod session;
pub mod user;
