use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::mcq_response::McqResponse;
use crate::models::session::{RoundOneState, Session};
use crate::question_bank;
use crate::services::scoring_service::ScoringService;
use crate::utils::{time, token};

#[derive(Clone)]
pub struct SessionService {
    pool: PgPool,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_session(
        &self,
        title: &str,
        created_by: Option<Uuid>,
        candidate_name: Option<&str>,
        candidate_email: Option<&str>,
    ) -> Result<Session> {
        let token = token::generate_token_hex(32);
        let expires_at = time::now() + time::session_ttl();
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, title, created_by, candidate_name, candidate_email, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&token)
        .bind(title.trim())
        .bind(created_by)
        .bind(candidate_name)
        .bind(candidate_email)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(session)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        session.ok_or(Error::SessionNotFound)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        session.ok_or_else(|| Error::NotFound("Session not found".to_string()))
    }

    /// Resolve a bearer token to a live session. Expiry is evaluated
    /// against the clock on every call, never cached.
    pub async fn validate_session(&self, token: &str) -> Result<Session> {
        let session = self.find_by_token(token).await?;
        session.ensure_not_expired(time::now())?;
        Ok(session)
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let sessions =
            sqlx::query_as::<_, Session>("SELECT * FROM sessions ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(sessions)
    }

    /// Candidate onboarding: record who is actually sitting the session.
    /// Repeat confirmations overwrite.
    pub async fn confirm_details(
        &self,
        session: &Session,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Session> {
        let updated = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions
            SET candidate_name = $2,
                candidate_email = $3,
                candidate_phone = $4,
                details_confirmed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(session.id)
        .bind(name.trim())
        .bind(email.trim())
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Record or overwrite one MCQ answer, then push the forward-only
    /// cursor. Returns the next question number, `None` at the ladder end.
    pub async fn record_response(
        &self,
        session: &Session,
        question_number: i32,
        selected_indices: &[i32],
        time_spent: i32,
        skipped: bool,
    ) -> Result<Option<i32>> {
        session.ensure_round1_open()?;
        if !(1..=question_bank::MCQ_QUESTION_COUNT).contains(&question_number) {
            return Err(Error::InvalidInput(format!(
                "questionNumber must be between 1 and {}",
                question_bank::MCQ_QUESTION_COUNT
            )));
        }

        let mut selected = selected_indices.to_vec();
        selected.sort_unstable();
        selected.dedup();

        sqlx::query(
            r#"
            INSERT INTO mcq_responses (session_id, question_number, selected_indices, time_spent, skipped, answered_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (session_id, question_number) DO UPDATE SET
                selected_indices = EXCLUDED.selected_indices,
                time_spent = EXCLUDED.time_spent,
                skipped = EXCLUDED.skipped,
                answered_at = EXCLUDED.answered_at
            "#,
        )
        .bind(session.id)
        .bind(question_number)
        .bind(&selected)
        .bind(time_spent)
        .bind(skipped)
        .execute(&self.pool)
        .await?;

        // GREATEST keeps the cursor forward-only under concurrent and
        // re-answered requests.
        sqlx::query(
            "UPDATE sessions SET current_question = GREATEST(current_question, $2), updated_at = NOW() WHERE id = $1",
        )
        .bind(session.id)
        .bind(cursor_floor(question_number))
        .execute(&self.pool)
        .await?;

        Ok(next_question_number(question_number))
    }

    pub async fn list_responses(&self, session_id: Uuid) -> Result<Vec<McqResponse>> {
        let responses = sqlx::query_as::<_, McqResponse>(
            "SELECT * FROM mcq_responses WHERE session_id = $1 ORDER BY question_number",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(responses)
    }

    pub async fn count_responses(&self, session_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM mcq_responses WHERE session_id = $1")
                .bind(session_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Close Round 1 and stamp the score. Completing an already-completed
    /// round returns the original stamp instead of failing, so client
    /// retries and auto-submit races converge on one answer.
    pub async fn complete_round1(&self, session: &Session) -> Result<Round1Completion> {
        if let RoundOneState::Completed { completed_at } = session.round1_state() {
            let total_responses = self.count_responses(session.id).await?;
            return Ok(Round1Completion {
                completed_at,
                total_responses,
                already_completed: true,
            });
        }

        let answer_key = self.answer_key_for(session.id).await?;
        let responses = self.list_responses(session.id).await?;
        let score = ScoringService::score_mcq(&answer_key, &responses);

        let stamped: Option<(DateTime<Utc>,)> = sqlx::query_as(
            r#"
            UPDATE sessions
            SET round1_completed = TRUE,
                round1_completed_at = NOW(),
                round1_score = $2,
                updated_at = NOW()
            WHERE id = $1 AND NOT round1_completed
            RETURNING round1_completed_at
            "#,
        )
        .bind(session.id)
        .bind(score)
        .fetch_optional(&self.pool)
        .await?;

        let (completed_at, already_completed) = match stamped {
            Some((at,)) => (at, false),
            None => {
                // Lost a race with a concurrent complete; read the winner's stamp.
                let refreshed = self.find_by_id(session.id).await?;
                match refreshed.round1_state() {
                    RoundOneState::Completed { completed_at } => (completed_at, true),
                    RoundOneState::InProgress { .. } => {
                        return Err(Error::Internal(
                            "Round 1 completion raced but left no stamp".to_string(),
                        ))
                    }
                }
            }
        };

        Ok(Round1Completion {
            completed_at,
            total_responses: self.count_responses(session.id).await?,
            already_completed,
        })
    }

    /// Attach a generated question set. Refused once the candidate has
    /// begun answering; serving and grading must read the same set.
    /// A tailored set may only replace the questions while the candidate
    /// has not answered anything yet.
    pub async fn ensure_set_replaceable(&self, session: &Session) -> Result<()> {
        if session.round1_completed {
            return Err(Error::Conflict(
                "Round 1 already completed for this session".to_string(),
            ));
        }
        if self.count_responses(session.id).await? > 0 {
            return Err(Error::Conflict(
                "Candidate has already begun Round 1".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn store_generated_set(
        &self,
        session: &Session,
        questions: &JsonValue,
        answer_key: &[Vec<i32>],
    ) -> Result<()> {
        self.ensure_set_replaceable(session).await?;

        sqlx::query(
            r#"
            INSERT INTO generated_question_sets (session_id, questions, answer_key)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id) DO UPDATE SET
                questions = EXCLUDED.questions,
                answer_key = EXCLUDED.answer_key,
                created_at = NOW()
            "#,
        )
        .bind(session.id)
        .bind(questions)
        .bind(serde_json::to_value(answer_key)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Candidate-facing question list: the generated set when one exists,
    /// otherwise the built-in bank. Same priority as `answer_key_for`.
    pub async fn questions_for(&self, session_id: Uuid) -> Result<JsonValue> {
        let generated: Option<(JsonValue,)> =
            sqlx::query_as("SELECT questions FROM generated_question_sets WHERE session_id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;
        match generated {
            Some((questions,)) => Ok(questions),
            None => Ok(serde_json::to_value(question_bank::mcq_public_questions())?),
        }
    }

    pub async fn answer_key_for(&self, session_id: Uuid) -> Result<Vec<Vec<i32>>> {
        let generated: Option<(JsonValue,)> =
            sqlx::query_as("SELECT answer_key FROM generated_question_sets WHERE session_id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?;
        match generated {
            Some((key,)) => Ok(serde_json::from_value(key)?),
            None => Ok(question_bank::mcq_answer_key()),
        }
    }

    /// One sweeper pass: stamp sessions whose window lapsed before both
    /// rounds finished. Returns how many rows were stamped.
    pub async fn mark_lapsed_sessions(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET lapsed_at = NOW(), updated_at = NOW()
            WHERE expires_at <= NOW()
              AND lapsed_at IS NULL
              AND NOT (round1_completed AND round2_completed)
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

/// Value GREATEST-ed into the cursor after answering `question_number`.
/// One keeps the cursor untouched; the final question never advances it.
pub(crate) fn cursor_floor(question_number: i32) -> i32 {
    if question_number < question_bank::MCQ_QUESTION_COUNT {
        question_number + 1
    } else {
        1
    }
}

pub(crate) fn next_question_number(question_number: i32) -> Option<i32> {
    if question_number < question_bank::MCQ_QUESTION_COUNT {
        Some(question_number + 1)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Round1Completion {
    pub completed_at: DateTime<Utc>,
    pub total_responses: i64,
    pub already_completed: bool,
}
