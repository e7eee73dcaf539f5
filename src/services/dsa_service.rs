use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::dsa_submission::{status_after_save, DsaSubmission, Language, SubmissionStatus};
use crate::models::session::{RoundTwoState, Session};
use crate::question_bank::{self, DsaTestCase, PublicDsaQuestion};
use crate::services::judge_service::{CodeExecutor, ExecutionResult};
use crate::services::scoring_service::ScoringService;
use crate::utils::time;

#[derive(Clone)]
pub struct DsaService {
    pool: PgPool,
    executor: Arc<dyn CodeExecutor>,
}

impl DsaService {
    pub fn new(pool: PgPool, executor: Arc<dyn CodeExecutor>) -> Self {
        Self { pool, executor }
    }

    /// Open Round 2. Requires Round 1 to be closed first; starting an
    /// already-started round returns the original stamp so a page reload
    /// never restarts the clock.
    pub async fn start_round2(&self, session: &Session) -> Result<Round2Start> {
        match session.round2_state() {
            RoundTwoState::Completed { .. } => Err(Error::RoundAlreadyCompleted(
                "Round 2 already completed".to_string(),
            )),
            RoundTwoState::Started { started_at } => Ok(Round2Start {
                started_at,
                already_started: true,
            }),
            RoundTwoState::NotStarted => {
                if !session.round1_completed {
                    return Err(Error::RoundNotStarted(
                        "Round 1 must be completed before starting Round 2".to_string(),
                    ));
                }

                let stamped: Option<(DateTime<Utc>,)> = sqlx::query_as(
                    r#"
                    UPDATE sessions
                    SET round2_started = TRUE, round2_started_at = NOW(), updated_at = NOW()
                    WHERE id = $1 AND NOT round2_started
                    RETURNING round2_started_at
                    "#,
                )
                .bind(session.id)
                .fetch_optional(&self.pool)
                .await?;

                match stamped {
                    Some((started_at,)) => Ok(Round2Start {
                        started_at,
                        already_started: false,
                    }),
                    None => {
                        let row: (Option<DateTime<Utc>>,) = sqlx::query_as(
                            "SELECT round2_started_at FROM sessions WHERE id = $1",
                        )
                        .bind(session.id)
                        .fetch_one(&self.pool)
                        .await?;
                        row.0
                            .map(|started_at| Round2Start {
                                started_at,
                                already_started: true,
                            })
                            .ok_or_else(|| {
                                Error::Internal("Round 2 start raced but left no stamp".to_string())
                            })
                    }
                }
            }
        }
    }

    /// Everything the coding page needs: questions, the remaining budget
    /// and whatever the candidate has saved so far.
    pub async fn round2_view(&self, session: &Session) -> Result<Round2View> {
        let started_at = session.round2_open_since()?;
        let time_remaining =
            time::remaining_seconds(started_at, time::round2_budget(), time::now());
        let submissions = self.list_submissions(session.id).await?;
        Ok(Round2View {
            questions: question_bank::dsa_public_questions(),
            time_remaining,
            submissions,
        })
    }

    /// Draft save. Deliberately not time-gated so the editor can flush
    /// right up to and past the deadline without losing work.
    pub async fn save_code(
        &self,
        session: &Session,
        question_number: i32,
        language: Language,
        code: &str,
    ) -> Result<SubmissionStatus> {
        session.round2_open_since()?;
        Self::ensure_question_number(question_number)?;

        // The conflict arm pins `submitted`; the bound status covers the
        // remaining transitions.
        let saved = status_after_save(SubmissionStatus::NotAttempted, code);
        let row: (String,) = sqlx::query_as(
            r#"
            INSERT INTO dsa_submissions (session_id, question_number, language, code, status, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (session_id, question_number) DO UPDATE SET
                language = EXCLUDED.language,
                code = EXCLUDED.code,
                status = CASE
                    WHEN dsa_submissions.status = 'submitted' THEN 'submitted'
                    ELSE EXCLUDED.status
                END,
                updated_at = NOW()
            RETURNING status
            "#,
        )
        .bind(session.id)
        .bind(question_number)
        .bind(language.as_str())
        .bind(code)
        .bind(saved.as_str())
        .fetch_one(&self.pool)
        .await?;

        SubmissionStatus::parse(&row.0)
            .ok_or_else(|| Error::Internal(format!("Unexpected submission status: {}", row.0)))
    }

    /// Run candidate code against their own stdin.
    pub async fn execute_custom(
        &self,
        session: &Session,
        question_number: i32,
        language: Language,
        code: &str,
        stdin: &str,
    ) -> Result<ExecutionResult> {
        let started_at = session.round2_open_since()?;
        Self::ensure_within_budget(started_at)?;
        Self::ensure_question_number(question_number)?;

        // Record before running so a judge failure cannot lose the code.
        self.record_attempt(session.id, question_number, language, code)
            .await?;
        self.executor.execute(language, code, stdin).await
    }

    /// Grade a question against its hidden test cases. The attempt is
    /// persisted first, so an aborted judge run leaves the slot at
    /// `attempted` with the code intact and the submit retryable.
    pub async fn submit_for_grading(
        &self,
        session: &Session,
        question_number: i32,
        language: Language,
        code: &str,
    ) -> Result<SubmitOutcome> {
        let started_at = session.round2_open_since()?;
        Self::ensure_within_budget(started_at)?;
        let question = question_bank::dsa_question(question_number).ok_or_else(|| {
            Error::InvalidInput(format!(
                "questionNumber must be between 1 and {}",
                question_bank::DSA_QUESTION_COUNT
            ))
        })?;

        self.record_attempt(session.id, question_number, language, code)
            .await?;

        let (tests_passed, total_tests) =
            run_test_cases(self.executor.as_ref(), language, code, question.test_cases).await?;

        sqlx::query(
            r#"
            UPDATE dsa_submissions
            SET status = 'submitted',
                submitted_at = NOW(),
                tests_passed = $3,
                total_tests = $4,
                language = $5,
                code = $6,
                updated_at = NOW()
            WHERE session_id = $1 AND question_number = $2
            "#,
        )
        .bind(session.id)
        .bind(question_number)
        .bind(tests_passed)
        .bind(total_tests)
        .bind(language.as_str())
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(SubmitOutcome {
            tests_passed,
            total_tests,
            all_passed: total_tests > 0 && tests_passed == total_tests,
        })
    }

    /// Close Round 2 and stamp the score. Allowed after the deadline; the
    /// client auto-completes when the timer hits zero. Idempotent like
    /// Round 1 completion.
    pub async fn complete_round2(&self, session: &Session) -> Result<Round2Completion> {
        match session.round2_state() {
            RoundTwoState::NotStarted => Err(Error::RoundNotStarted(
                "Round 2 has not been started".to_string(),
            )),
            RoundTwoState::Completed { completed_at, .. } => Ok(Round2Completion {
                completed_at,
                already_completed: true,
            }),
            RoundTwoState::Started { .. } => {
                let submissions = self.list_submissions(session.id).await?;
                let score = ScoringService::score_dsa(&submissions);

                let stamped: Option<(DateTime<Utc>,)> = sqlx::query_as(
                    r#"
                    UPDATE sessions
                    SET round2_completed = TRUE,
                        round2_completed_at = NOW(),
                        round2_score = $2,
                        updated_at = NOW()
                    WHERE id = $1 AND NOT round2_completed
                    RETURNING round2_completed_at
                    "#,
                )
                .bind(session.id)
                .bind(score)
                .fetch_optional(&self.pool)
                .await?;

                match stamped {
                    Some((completed_at,)) => Ok(Round2Completion {
                        completed_at,
                        already_completed: false,
                    }),
                    None => {
                        let row: (Option<DateTime<Utc>>,) = sqlx::query_as(
                            "SELECT round2_completed_at FROM sessions WHERE id = $1",
                        )
                        .bind(session.id)
                        .fetch_one(&self.pool)
                        .await?;
                        row.0
                            .map(|completed_at| Round2Completion {
                                completed_at,
                                already_completed: true,
                            })
                            .ok_or_else(|| {
                                Error::Internal(
                                    "Round 2 completion raced but left no stamp".to_string(),
                                )
                            })
                    }
                }
            }
        }
    }

    pub async fn list_submissions(&self, session_id: Uuid) -> Result<Vec<DsaSubmission>> {
        let submissions = sqlx::query_as::<_, DsaSubmission>(
            "SELECT * FROM dsa_submissions WHERE session_id = $1 ORDER BY question_number",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(submissions)
    }

    async fn record_attempt(
        &self,
        session_id: Uuid,
        question_number: i32,
        language: Language,
        code: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO dsa_submissions (session_id, question_number, language, code, status, updated_at)
            VALUES ($1, $2, $3, $4, 'attempted', NOW())
            ON CONFLICT (session_id, question_number) DO UPDATE SET
                language = EXCLUDED.language,
                code = EXCLUDED.code,
                status = CASE
                    WHEN dsa_submissions.status = 'submitted' THEN 'submitted'
                    ELSE 'attempted'
                END,
                updated_at = NOW()
            "#,
        )
        .bind(session_id)
        .bind(question_number)
        .bind(language.as_str())
        .bind(code)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn ensure_within_budget(started_at: DateTime<Utc>) -> Result<()> {
        if time::budget_elapsed(started_at, time::round2_budget(), time::now()) {
            return Err(Error::TimeExpired);
        }
        Ok(())
    }

    fn ensure_question_number(question_number: i32) -> Result<()> {
        if (1..=question_bank::DSA_QUESTION_COUNT).contains(&question_number) {
            Ok(())
        } else {
            Err(Error::InvalidInput(format!(
                "questionNumber must be between 1 and {}",
                question_bank::DSA_QUESTION_COUNT
            )))
        }
    }
}

/// Run `code` against each test case in order, comparing normalized
/// stdout. A judge transport error aborts the whole run; a wrong answer
/// just fails that case and moves on.
pub(crate) async fn run_test_cases(
    executor: &dyn CodeExecutor,
    language: Language,
    code: &str,
    cases: &[DsaTestCase],
) -> Result<(i32, i32)> {
    let total = cases.len() as i32;
    let mut passed = 0;
    for case in cases {
        let result = executor.execute(language, code, case.input).await?;
        if ScoringService::outputs_match(&result.stdout, case.expected_output) {
            passed += 1;
        }
    }
    Ok((passed, total))
}

#[derive(Debug, Clone)]
pub struct Round2Start {
    pub started_at: DateTime<Utc>,
    pub already_started: bool,
}

#[derive(Debug)]
pub struct Round2View {
    pub questions: Vec<PublicDsaQuestion>,
    pub time_remaining: i64,
    pub submissions: Vec<DsaSubmission>,
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub tests_passed: i32,
    pub total_tests: i32,
    pub all_passed: bool,
}

#[derive(Debug, Clone)]
pub struct Round2Completion {
    pub completed_at: DateTime<Utc>,
    pub already_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::judge_service::MockCodeExecutor;
    use mockall::Sequence;

    fn accepted(stdout: &str) -> ExecutionResult {
        ExecutionResult {
            stdout: stdout.to_string(),
            stderr: String::new(),
            compile_output: String::new(),
            status: "Accepted".to_string(),
            status_id: 3,
            time: Some("0.01".to_string()),
            memory: Some(3000),
        }
    }

    #[test]
    fn counts_passes_across_all_cases() {
        let question = question_bank::dsa_question(3).unwrap();
        let mut executor = MockCodeExecutor::new();
        executor
            .expect_execute()
            .times(question.test_cases.len())
            .returning(|_, _, stdin| {
                // Correct answers for the non-decreasing steps question.
                let out = match stdin {
                    "[5,3,4,4,7,3,6,11,8,5,11]" => "3\n",
                    _ => "0\n",
                };
                Ok(accepted(out))
            });

        let (passed, total) = tokio_test::block_on(run_test_cases(
            &executor,
            Language::Python,
            "print(solve())",
            question.test_cases,
        ))
        .unwrap();
        assert_eq!((passed, total), (3, 3));
    }

    #[test]
    fn wrong_output_fails_only_that_case() {
        let question = question_bank::dsa_question(1).unwrap();
        let mut executor = MockCodeExecutor::new();
        executor
            .expect_execute()
            .times(question.test_cases.len())
            .returning(|_, _, stdin| {
                let out = if stdin == "[[1]]" { "[1]\n" } else { "[9,9]\n" };
                Ok(accepted(out))
            });

        let (passed, total) = tokio_test::block_on(run_test_cases(
            &executor,
            Language::Cpp,
            "int main() {}",
            question.test_cases,
        ))
        .unwrap();
        assert_eq!((passed, total), (1, 3));
    }

    #[test]
    fn judge_failure_aborts_the_run() {
        let question = question_bank::dsa_question(2).unwrap();
        let mut seq = Sequence::new();
        let mut executor = MockCodeExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(accepted("\"56088\"\n")));
        executor
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(Error::Upstream("judge down".to_string())));

        let result = tokio_test::block_on(run_test_cases(
            &executor,
            Language::Go,
            "package main",
            question.test_cases,
        ));
        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[test]
    fn normalized_comparison_tolerates_formatting() {
        let question = question_bank::dsa_question(1).unwrap();
        let mut executor = MockCodeExecutor::new();
        executor.expect_execute().returning(|_, _, stdin| {
            // Same values as expected, different whitespace.
            let out = match stdin {
                "[[1,2,3],[4,5,6],[7,8,9]]" => "[1, 2, 3, 6, 9, 8, 7, 4, 5]\n",
                "[[1,2],[3,4]]" => " [1,2,4,3] ",
                _ => "[1]",
            };
            Ok(accepted(out))
        });

        let (passed, total) = tokio_test::block_on(run_test_cases(
            &executor,
            Language::Javascript,
            "spiral()",
            question.test_cases,
        ))
        .unwrap();
        assert_eq!((passed, total), (3, 3));
    }
}
