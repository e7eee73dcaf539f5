use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::dsa_submission::Language;

/// Outcome of one run on the judge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub status: String,
    pub status_id: i64,
    pub time: Option<String>,
    pub memory: Option<i64>,
}

impl ExecutionResult {
    pub fn accepted(&self) -> bool {
        self.status == "Accepted"
    }
}

/// Seam for code execution. The production implementation talks to a
/// Judge0 deployment; tests substitute canned results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn execute(&self, language: Language, code: &str, stdin: &str)
        -> Result<ExecutionResult>;
}

#[derive(Clone)]
pub struct JudgeService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    api_host: Option<String>,
}

impl JudgeService {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        api_host: Option<String>,
        client: Client,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            api_host,
        }
    }

    /// Judge0 wraps base64 payloads across lines, so strip whitespace
    /// before decoding. Undecodable values are passed through verbatim.
    fn decode_field(body: &JsonValue, key: &str) -> String {
        body.get(key)
            .and_then(|v| v.as_str())
            .map(|s| {
                let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
                BASE64
                    .decode(compact.as_bytes())
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .unwrap_or_default()
    }

    fn parse_result(body: &JsonValue) -> ExecutionResult {
        let status = body
            .get("status")
            .and_then(|s| s.get("description"))
            .and_then(|d| d.as_str())
            .unwrap_or("Unknown")
            .to_string();
        let status_id = body
            .get("status")
            .and_then(|s| s.get("id"))
            .and_then(|i| i.as_i64())
            .unwrap_or(0);
        let time = body.get("time").and_then(|t| {
            t.as_str()
                .map(str::to_string)
                .or_else(|| t.as_f64().map(|f| f.to_string()))
        });

        ExecutionResult {
            stdout: Self::decode_field(body, "stdout"),
            stderr: Self::decode_field(body, "stderr"),
            compile_output: Self::decode_field(body, "compile_output"),
            status,
            status_id,
            time,
            memory: body.get("memory").and_then(|m| m.as_i64()),
        }
    }
}

#[async_trait]
impl CodeExecutor for JudgeService {
    async fn execute(
        &self,
        language: Language,
        code: &str,
        stdin: &str,
    ) -> Result<ExecutionResult> {
        let payload = json!({
            "language_id": language.judge0_id(),
            "source_code": BASE64.encode(code),
            "stdin": BASE64.encode(stdin),
        });

        let url = format!(
            "{}/submissions?base64_encoded=true&wait=true",
            self.base_url.trim_end_matches('/')
        );
        let mut req = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(Duration::from_secs(30));
        if let Some(key) = &self.api_key {
            req = req.header("X-RapidAPI-Key", key);
        }
        if let Some(host) = &self.api_host {
            req = req.header("X-RapidAPI-Host", host);
        }

        let res = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Upstream("Judge timed out after 30s".to_string())
            } else {
                Error::Upstream(format!("Judge request failed: {}", e))
            }
        })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!("Judge error {}: {}", status, text)));
        }

        let body: JsonValue = res
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Judge returned malformed body: {}", e)))?;

        Ok(Self::parse_result(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_base64_accepted_run() {
        let body = json!({
            "stdout": BASE64.encode("[1,2,3,6,9,8,7,4,5]\n"),
            "stderr": null,
            "compile_output": null,
            "status": {"id": 3, "description": "Accepted"},
            "time": "0.012",
            "memory": 3456
        });
        let result = JudgeService::parse_result(&body);
        assert_eq!(result.stdout, "[1,2,3,6,9,8,7,4,5]\n");
        assert_eq!(result.status, "Accepted");
        assert_eq!(result.status_id, 3);
        assert!(result.accepted());
        assert_eq!(result.time.as_deref(), Some("0.012"));
        assert_eq!(result.memory, Some(3456));
    }

    #[test]
    fn decodes_line_wrapped_base64() {
        let encoded = BASE64.encode("a long stdout payload that wraps");
        let wrapped = format!("{}\n{}", &encoded[..10], &encoded[10..]);
        let body = json!({ "stdout": wrapped });
        assert_eq!(
            JudgeService::decode_field(&body, "stdout"),
            "a long stdout payload that wraps"
        );
    }

    #[test]
    fn missing_fields_become_empty_and_unknown() {
        let body = json!({});
        let result = JudgeService::parse_result(&body);
        assert_eq!(result.stdout, "");
        assert_eq!(result.compile_output, "");
        assert_eq!(result.status, "Unknown");
        assert!(!result.accepted());
    }

    #[test]
    fn compile_errors_surface_through_compile_output() {
        let body = json!({
            "compile_output": BASE64.encode("main.cpp:3: error: expected ';'"),
            "status": {"id": 6, "description": "Compilation Error"}
        });
        let result = JudgeService::parse_result(&body);
        assert_eq!(result.status, "Compilation Error");
        assert!(result.compile_output.contains("expected ';'"));
    }
}
