use chrono::{DateTime, Duration, Utc};

/// Validity window for a candidate session, measured from creation.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Wall-clock budget for the coding round, measured from round start.
pub const ROUND2_BUDGET_MINUTES: i64 = 90;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

pub fn round2_budget() -> Duration {
    Duration::minutes(ROUND2_BUDGET_MINUTES)
}

/// A session is expired strictly after its expiry instant, never at it.
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expires_at
}

/// Whether `now` has passed the budget window that opened at `started_at`.
pub fn budget_elapsed(started_at: DateTime<Utc>, budget: Duration, now: DateTime<Utc>) -> bool {
    now > started_at + budget
}

/// Seconds left of `budget` counting from `started_at`, clamped at zero.
pub fn remaining_seconds(started_at: DateTime<Utc>, budget: Duration, now: DateTime<Utc>) -> i64 {
    (started_at + budget - now).num_seconds().max(0)
}
