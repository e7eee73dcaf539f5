use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// A per-session generated MCQ set. `questions` holds the candidate-facing
/// array, `answer_key` the correct indices per question. A session with a
/// row here is served and graded from it instead of the built-in bank.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedQuestionSet {
    pub session_id: Uuid,
    pub questions: JsonValue,
    pub answer_key: JsonValue,
    pub created_at: DateTime<Utc>,
}
