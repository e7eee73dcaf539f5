pub mod auth_dto;
pub mod dsa_dto;
pub mod interviewer_dto;
pub mod session_dto;
