use crate::models::dsa_submission::DsaSubmission;
use crate::models::mcq_response::McqResponse;
use crate::question_bank;

pub struct ScoringService;

impl ScoringService {
    /// Round 1 score on a 0..=100 scale.
    ///
    /// Each question is worth `100/totalQuestions`. A question earns
    /// `right/correctCount - wrong/4` of that weight, floored at zero, so
    /// stray picks on multi-select questions cost a quarter weight each.
    /// Skipped and unanswered questions contribute nothing.
    pub fn score_mcq(answer_key: &[Vec<i32>], responses: &[McqResponse]) -> i32 {
        if answer_key.is_empty() {
            return 0;
        }
        let weight = 100.0 / answer_key.len() as f64;
        let mut total = 0.0;
        for (idx, correct) in answer_key.iter().enumerate() {
            let question_number = idx as i32 + 1;
            let selected: &[i32] = responses
                .iter()
                .find(|r| r.question_number == question_number)
                .map(|r| r.selected_indices.as_slice())
                .unwrap_or(&[]);
            total += Self::question_fraction(correct, selected) * weight;
        }
        total.round() as i32
    }

    fn question_fraction(correct: &[i32], selected: &[i32]) -> f64 {
        let right = selected.iter().filter(|s| correct.contains(s)).count() as f64;
        let wrong = selected.iter().filter(|s| !correct.contains(s)).count() as f64;
        let denom = correct.len().max(1) as f64;
        (right / denom - wrong / 4.0).max(0.0)
    }

    /// Round 2 score: each question pays out its full point value only when
    /// the submission passed every judge test, then the total is scaled
    /// to 100. No partial credit inside a question.
    pub fn score_dsa(submissions: &[DsaSubmission]) -> i32 {
        let available = question_bank::dsa_points_available();
        if available == 0 {
            return 0;
        }
        let earned: i32 = question_bank::dsa_questions()
            .iter()
            .filter(|q| {
                submissions
                    .iter()
                    .find(|s| s.question_number == q.question_number)
                    .map(DsaSubmission::is_solved)
                    .unwrap_or(false)
            })
            .map(|q| q.points)
            .sum();
        ((earned as f64 / available as f64) * 100.0).round() as i32
    }

    /// Canonical form for judge output comparison. Bracketed array output
    /// loses all whitespace; anything else loses newlines and outer space.
    pub fn normalize_output(output: &str) -> String {
        let trimmed = output.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            trimmed.chars().filter(|c| !c.is_whitespace()).collect()
        } else {
            trimmed
                .replace("\r\n", "")
                .replace('\n', "")
                .trim()
                .to_string()
        }
    }

    /// A judge test passes when normalized outputs agree. An empty
    /// expectation never passes; it marks a broken test case, not a free
    /// point.
    pub fn outputs_match(actual: &str, expected: &str) -> bool {
        let expected = Self::normalize_output(expected);
        !expected.is_empty() && Self::normalize_output(actual) == expected
    }
}
