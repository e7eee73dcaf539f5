use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::dsa_dto::SubmissionView;
use crate::models::mcq_response::McqResponse;
use crate::models::session::Session;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub candidate_name: Option<String>,
    #[validate(email)]
    pub candidate_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: uuid::Uuid,
    pub token: String,
    pub link: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: uuid::Uuid,
    pub token: String,
    pub title: String,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub details_confirmed: bool,
    pub round1_completed: bool,
    pub round1_score: Option<i32>,
    pub round2_started: bool,
    pub round2_completed: bool,
    pub round2_score: Option<i32>,
    pub expires_at: DateTime<Utc>,
    pub lapsed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResultsResponse {
    pub session: SessionSummary,
    pub round1: Round1Results,
    pub round2: Round2Results,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round1Results {
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub responses_count: usize,
    pub responses: Vec<McqResponseView>,
}

/// One answered question with its key, for the reviewer screen only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McqResponseView {
    pub question_number: i32,
    pub selected_indices: Vec<i32>,
    pub correct_indices: Vec<i32>,
    pub time_spent: i32,
    pub skipped: bool,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round2Results {
    pub started: bool,
    pub completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub score: Option<i32>,
    pub submissions: Vec<SubmissionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = 20000))]
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsResponse {
    pub success: bool,
    pub question_count: usize,
}

impl From<Session> for SessionSummary {
    fn from(value: Session) -> Self {
        Self {
            id: value.id,
            token: value.token,
            title: value.title,
            candidate_name: value.candidate_name,
            candidate_email: value.candidate_email,
            details_confirmed: value.details_confirmed_at.is_some(),
            round1_completed: value.round1_completed,
            round1_score: value.round1_score,
            round2_started: value.round2_started,
            round2_completed: value.round2_completed,
            round2_score: value.round2_score,
            expires_at: value.expires_at,
            lapsed: value.lapsed_at.is_some(),
            created_at: value.created_at,
        }
    }
}

impl McqResponseView {
    pub fn from_response(value: McqResponse, correct_indices: Vec<i32>) -> Self {
        Self {
            question_number: value.question_number,
            selected_indices: value.selected_indices,
            correct_indices,
            time_spent: value.time_spent,
            skipped: value.skipped,
            answered_at: value.answered_at,
        }
    }
}
