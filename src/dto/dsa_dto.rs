use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::dsa_submission::{DsaSubmission, Language};
use crate::question_bank::PublicDsaQuestion;
use crate::services::dsa_service::SubmitOutcome;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRound2Response {
    pub success: bool,
    pub already_started: bool,
    pub started_at: DateTime<Utc>,
    pub time_limit_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round2QuestionsResponse {
    pub questions: Vec<PublicDsaQuestion>,
    pub time_remaining: i64,
    pub submissions: Vec<SubmissionView>,
}

/// Per-question editor state echoed back to the candidate. Never carries
/// grading internals beyond the pass counts they already saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub question_number: i32,
    pub language: String,
    pub code: String,
    pub status: String,
    pub tests_passed: Option<i32>,
    pub total_tests: Option<i32>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[validate(range(min = 1, max = 4))]
    pub question_number: i32,
    pub language: Language,
    #[validate(length(max = 100000))]
    pub code: String,
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCodeRequest {
    #[validate(range(min = 1, max = 4))]
    pub question_number: i32,
    pub language: Language,
    #[validate(length(max = 100000))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCodeResponse {
    pub success: bool,
    pub tests_passed: i32,
    pub total_tests: i32,
    pub all_passed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveCodeRequest {
    #[validate(range(min = 1, max = 4))]
    pub question_number: i32,
    pub language: Language,
    #[validate(length(max = 100000))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCodeResponse {
    pub success: bool,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRound2Response {
    pub success: bool,
    pub already_completed: bool,
    pub completed_at: DateTime<Utc>,
}

impl From<DsaSubmission> for SubmissionView {
    fn from(value: DsaSubmission) -> Self {
        // Pass counts are meaningless until a graded submit stamps them.
        let graded = value.submitted_at.is_some();
        Self {
            question_number: value.question_number,
            language: value.language,
            code: value.code,
            status: value.status,
            tests_passed: graded.then_some(value.tests_passed),
            total_tests: graded.then_some(value.total_tests),
            submitted_at: value.submitted_at,
        }
    }
}

impl From<SubmitOutcome> for SubmitCodeResponse {
    fn from(value: SubmitOutcome) -> Self {
        Self {
            success: true,
            tests_passed: value.tests_passed,
            total_tests: value.total_tests,
            all_passed: value.all_passed,
        }
    }
}
