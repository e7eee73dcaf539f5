use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::time;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub token: String,
    pub title: String,
    pub created_by: Option<Uuid>,
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub candidate_phone: Option<String>,
    pub details_confirmed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub round1_completed: bool,
    pub round1_completed_at: Option<DateTime<Utc>>,
    pub current_question: i32,
    pub round1_score: Option<i32>,
    pub round2_started: bool,
    pub round2_started_at: Option<DateTime<Utc>>,
    pub round2_completed: bool,
    pub round2_completed_at: Option<DateTime<Utc>>,
    pub round2_score: Option<i32>,
    pub lapsed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Round 1 as seen from a session row. The cursor only exists while the
/// round is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOneState {
    InProgress { current_question: i32 },
    Completed { completed_at: DateTime<Utc> },
}

/// Round 2 lifecycle. `Completed` keeps the start stamp because the time
/// budget is always measured from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTwoState {
    NotStarted,
    Started {
        started_at: DateTime<Utc>,
    },
    Completed {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
}

impl Session {
    /// Timestamps are authoritative; the boolean flags mirror them under a
    /// database constraint.
    pub fn round1_state(&self) -> RoundOneState {
        match self.round1_completed_at {
            Some(completed_at) => RoundOneState::Completed { completed_at },
            None => RoundOneState::InProgress {
                current_question: self.current_question,
            },
        }
    }

    pub fn round2_state(&self) -> RoundTwoState {
        match (self.round2_started_at, self.round2_completed_at) {
            (Some(started_at), Some(completed_at)) => RoundTwoState::Completed {
                started_at,
                completed_at,
            },
            (Some(started_at), None) => RoundTwoState::Started { started_at },
            _ => RoundTwoState::NotStarted,
        }
    }

    pub fn ensure_not_expired(&self, now: DateTime<Utc>) -> Result<()> {
        if time::is_expired(self.expires_at, now) {
            return Err(Error::SessionExpired);
        }
        Ok(())
    }

    /// Round 1 must still be accepting answers.
    pub fn ensure_round1_open(&self) -> Result<()> {
        match self.round1_state() {
            RoundOneState::InProgress { .. } => Ok(()),
            RoundOneState::Completed { .. } => Err(Error::RoundAlreadyCompleted(
                "Round 1 already completed".to_string(),
            )),
        }
    }

    /// Round 2 must be started and not yet completed. Returns the start
    /// stamp so callers can evaluate the time budget.
    pub fn round2_open_since(&self) -> Result<DateTime<Utc>> {
        match self.round2_state() {
            RoundTwoState::Started { started_at } => Ok(started_at),
            RoundTwoState::NotStarted => Err(Error::RoundNotStarted(
                "Round 2 has not been started".to_string(),
            )),
            RoundTwoState::Completed { .. } => Err(Error::RoundAlreadyCompleted(
                "Round 2 already completed".to_string(),
            )),
        }
    }
}
