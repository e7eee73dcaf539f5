use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Languages the judge can run. The variants mirror the TEXT values in
/// `dsa_submissions.language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Java,
    Javascript,
    Go,
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Javascript => "javascript",
            Language::Go => "go",
            Language::Python => "python",
        }
    }

    /// Judge0 language identifiers.
    pub fn judge0_id(&self) -> u32 {
        match self {
            Language::Cpp => 54,
            Language::Java => 62,
            Language::Javascript => 63,
            Language::Go => 60,
            Language::Python => 71,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    NotAttempted,
    Attempted,
    Submitted,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::NotAttempted => "not_attempted",
            SubmissionStatus::Attempted => "attempted",
            SubmissionStatus::Submitted => "submitted",
        }
    }

    pub fn parse(value: &str) -> Option<SubmissionStatus> {
        match value {
            "not_attempted" => Some(SubmissionStatus::NotAttempted),
            "attempted" => Some(SubmissionStatus::Attempted),
            "submitted" => Some(SubmissionStatus::Submitted),
            _ => None,
        }
    }
}

/// Status after a draft save. `submitted` never demotes; the coding page
/// autosaves on question switches, so a blank flush over a graded slot
/// must not cost the candidate their result. Otherwise blank code clears
/// the slot and anything else marks it attempted.
pub fn status_after_save(current: SubmissionStatus, code: &str) -> SubmissionStatus {
    if current == SubmissionStatus::Submitted {
        SubmissionStatus::Submitted
    } else if code.trim().is_empty() {
        SubmissionStatus::NotAttempted
    } else {
        SubmissionStatus::Attempted
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DsaSubmission {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_number: i32,
    pub language: String,
    pub code: String,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub tests_passed: i32,
    pub total_tests: i32,
    pub updated_at: DateTime<Utc>,
}

impl DsaSubmission {
    /// Fully solved: submitted and every judge test passed.
    pub fn is_solved(&self) -> bool {
        self.status == SubmissionStatus::Submitted.as_str()
            && self.total_tests > 0
            && self.tests_passed == self.total_tests
    }
}
