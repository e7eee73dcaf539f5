use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::session::{RoundOneState, Session};
use crate::question_bank;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateSessionResponse {
    pub session_id: uuid::Uuid,
    pub title: String,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub details_confirmed: bool,
    pub expires_at: DateTime<Utc>,
    pub round1_completed: bool,
    pub current_question_number: i32,
    pub round2_started: bool,
    pub round2_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDetailsRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDetailsResponse {
    pub success: bool,
    pub candidate_name: String,
    pub candidate_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub questions: serde_json::Value,
    pub total_questions: i32,
    pub per_question_seconds: i64,
}

/// Resume pointer for the quiz page. Two shapes share one struct: a
/// completed round serializes only `completed`/`completedAt`, an open
/// one only the cursor fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentQuestionResponse {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponseRequest {
    #[validate(range(min = 1, max = 30))]
    pub question_number: i32,
    #[serde(default)]
    #[validate(length(max = 4))]
    pub selected_indices: Vec<i32>,
    #[serde(default)]
    pub time_spent: i32,
    #[serde(default)]
    pub skipped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponseResponse {
    pub success: bool,
    pub next_question_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRound1Response {
    pub success: bool,
    pub already_completed: bool,
    pub completed_at: DateTime<Utc>,
    pub total_responses: i64,
}

impl From<Session> for ValidateSessionResponse {
    fn from(value: Session) -> Self {
        let current_question_number = match value.round1_state() {
            RoundOneState::InProgress { current_question } => current_question,
            RoundOneState::Completed { .. } => question_bank::MCQ_QUESTION_COUNT,
        };
        Self {
            session_id: value.id,
            title: value.title,
            candidate_name: value.candidate_name,
            candidate_email: value.candidate_email,
            details_confirmed: value.details_confirmed_at.is_some(),
            expires_at: value.expires_at,
            round1_completed: value.round1_completed,
            current_question_number,
            round2_started: value.round2_started,
            round2_completed: value.round2_completed,
        }
    }
}
