use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct McqResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_number: i32,
    pub selected_indices: Vec<i32>,
    pub time_spent: i32,
    pub skipped: bool,
    pub answered_at: DateTime<Utc>,
}
