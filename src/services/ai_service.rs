use reqwest::Client;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::question_bank;

/// A generated Round 1 set, normalized to the same wire shape as the
/// built-in bank. `questions` is the candidate-facing array and never
/// contains correct indices; those live only in `answer_key`.
#[derive(Debug, Clone)]
pub struct GeneratedMcqSet {
    pub questions: JsonValue,
    pub answer_key: Vec<Vec<i32>>,
}

#[derive(Clone)]
pub struct AIService {
    client: Client,
    api_key: Option<String>,
}

impl AIService {
    pub fn new(api_key: Option<String>, client: Client) -> Self {
        Self { client, api_key }
    }

    /// Generate a session-specific MCQ set from free-form context such as
    /// resume text. The model gets two attempts at producing a parseable
    /// set; there is no silent fallback, a failed generation is an error
    /// and the session keeps being served the built-in bank.
    pub async fn generate_mcq_set(&self, context: &str) -> Result<GeneratedMcqSet> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("OPENAI_API_KEY is not configured".to_string()))?;

        let payload = json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": generation_prompt(context)}],
            "temperature": 0.4,
            "max_tokens": 2500,
        });

        let mut last_err = Error::Internal("Question generation failed".to_string());
        for attempt in 1..=2 {
            match self.chat_openai(api_key, &payload).await {
                Ok(parsed) => match normalize_generated(&parsed) {
                    Ok(set) => return Ok(set),
                    Err(e) => {
                        tracing::warn!("Generation attempt {} produced a bad set: {}", attempt, e);
                        last_err = e;
                    }
                },
                Err(e) => {
                    tracing::warn!("Generation attempt {} failed: {}", attempt, e);
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    async fn chat_openai(&self, api_key: &str, payload: &JsonValue) -> Result<JsonValue> {
        let res = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .json(payload)
            .timeout(Duration::from_secs(120))
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Generator request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Internal(format!(
                "Generator error {}: {}",
                status, text
            )));
        }

        let body: JsonValue = res
            .json()
            .await
            .map_err(|e| Error::Internal(format!("Generator returned malformed body: {}", e)))?;

        let content = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| Error::Internal("Generator response had no content".to_string()))?;

        serde_json::from_str(strip_code_fences(content))
            .map_err(|e| Error::Internal(format!("Generator content was not JSON: {}", e)))
    }
}

fn generation_prompt(context: &str) -> String {
    format!(
        r#"You are a test-generator for SHORT multiple-choice questions.
Return EXACTLY a JSON array of length {total}. Each item must be an object:
{{ "question": "<text>", "options": ["optA","optB","optC","optD"], "correctIndices": [<0..3>, ...] }}

Rules:
- The first {single} items must each have exactly ONE correctIndices entry (single correct).
- The remaining {double} items must each have exactly TWO correctIndices entries (two correct answers).
- Questions should come from core Computer Science fundamentals (Data structures, Algorithms, Complexity, Big-O, Arrays, Strings, Trees, Graphs, Hashing, OS basics, Networking basics, Databases, SQL basics, System design basics, Testing).
- Use short, concrete MCQs (example: 'Which data structure gives O(1) average lookup?').
- Provide concise options (max 60 chars each).
- Do NOT include any explanatory text, markdown, backticks, or labels. Return ONLY the JSON array.
Context (for flavour; keep questions to general CS fundamentals):
{context}
"#,
        total = question_bank::MCQ_QUESTION_COUNT,
        single = question_bank::MCQ_SINGLE_ANSWER_COUNT,
        double = question_bank::MCQ_QUESTION_COUNT - question_bank::MCQ_SINGLE_ANSWER_COUNT,
        context = context,
    )
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Coerce a raw model response into a well-formed set: exactly the bank's
/// question count, four options per question, correct-index counts forced
/// to one (first 20) or two (last 10).
fn normalize_generated(parsed: &JsonValue) -> Result<GeneratedMcqSet> {
    let items = parsed
        .as_array()
        .ok_or_else(|| Error::Internal("Generator did not return an array".to_string()))?;
    let expected = question_bank::MCQ_QUESTION_COUNT as usize;
    if items.len() != expected {
        return Err(Error::Internal(format!(
            "Generator returned {} questions, expected {}",
            items.len(),
            expected
        )));
    }

    let mut questions = Vec::with_capacity(expected);
    let mut answer_key = Vec::with_capacity(expected);
    for (i, item) in items.iter().enumerate() {
        let text = item
            .get("question")
            .and_then(|q| q.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();
        if text.is_empty() {
            return Err(Error::Internal(format!(
                "Generated question {} has no text",
                i + 1
            )));
        }

        let mut options: Vec<String> = item
            .get("options")
            .and_then(|o| o.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        options.truncate(4);
        while options.len() < 4 {
            options.push("N/A".to_string());
        }

        let mut correct: Vec<i32> = item
            .get("correctIndices")
            .and_then(|c| c.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_i64())
                    .map(|n| n as i32)
                    .filter(|n| (0..4).contains(n))
                    .collect()
            })
            .unwrap_or_default();
        correct.sort_unstable();
        correct.dedup();

        let single = (i as i32) < question_bank::MCQ_SINGLE_ANSWER_COUNT;
        if single {
            correct.truncate(1);
            if correct.is_empty() {
                correct.push(0);
            }
        } else {
            correct.truncate(2);
            if correct.len() < 2 {
                let pick = correct.first().copied().unwrap_or(0);
                correct = vec![pick, (pick + 1) % 4];
            }
        }

        questions.push(json!({
            "questionNumber": i + 1,
            "questionText": text,
            "options": options,
            "type": if single { "single" } else { "double" },
        }));
        answer_key.push(correct);
    }

    Ok(GeneratedMcqSet {
        questions: JsonValue::Array(questions),
        answer_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_item(question: &str, correct: &[i32]) -> JsonValue {
        json!({
            "question": question,
            "options": ["a", "b", "c", "d"],
            "correctIndices": correct,
        })
    }

    fn well_formed_array() -> JsonValue {
        let items: Vec<JsonValue> = (0..30)
            .map(|i| {
                if i < 20 {
                    raw_item(&format!("q{}", i + 1), &[i % 4])
                } else {
                    raw_item(&format!("q{}", i + 1), &[0, 2])
                }
            })
            .collect();
        JsonValue::Array(items)
    }

    #[test]
    fn normalizes_a_well_formed_response() {
        let set = normalize_generated(&well_formed_array()).unwrap();
        let questions = set.questions.as_array().unwrap();
        assert_eq!(questions.len(), 30);
        assert_eq!(questions[0]["questionNumber"], 1);
        assert_eq!(questions[0]["type"], "single");
        assert_eq!(questions[29]["type"], "double");
        assert!(questions[0].get("correctIndices").is_none());
        assert_eq!(set.answer_key.len(), 30);
        assert_eq!(set.answer_key[29], vec![0, 2]);
    }

    #[test]
    fn rejects_wrong_question_counts() {
        assert!(normalize_generated(&json!([])).is_err());
        assert!(normalize_generated(&json!({"questions": []})).is_err());
    }

    #[test]
    fn pads_short_option_lists() {
        let mut items = well_formed_array();
        items[3] = json!({"question": "short", "options": ["only", "two"], "correctIndices": [1]});
        let set = normalize_generated(&items).unwrap();
        let options = set.questions[3]["options"].as_array().unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options[3], "N/A");
    }

    #[test]
    fn forces_answer_counts_per_position() {
        let mut items = well_formed_array();
        // Single-correct slot given three picks keeps the lowest one.
        items[0] = raw_item("q1", &[2, 1, 3]);
        // Double-correct slot given one pick gets a deterministic second.
        items[25] = raw_item("q26", &[3]);
        let set = normalize_generated(&items).unwrap();
        assert_eq!(set.answer_key[0], vec![1]);
        assert_eq!(set.answer_key[25], vec![3, 0]);
    }

    #[test]
    fn drops_out_of_range_indices() {
        let mut items = well_formed_array();
        items[5] = raw_item("q6", &[7, 2, -1]);
        let set = normalize_generated(&items).unwrap();
        assert_eq!(set.answer_key[5], vec![2]);
    }

    #[test]
    fn strips_markdown_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("  [2] "), "[2]");
    }
}
