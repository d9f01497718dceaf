//! External command LLM client.
//!
//! Runs a local model CLI (`ollama run llama3`, `llm -m gpt-4o`, ...) with
//! the prompt as its final argument and reads the response from stdout.
//! Each call, output reads included, is bounded by a timeout and retried
//! with exponential backoff.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::runtime::Builder;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use super::LlmClient;
use crate::constants::evaluation::{COMMAND_MAX_RETRIES, COMMAND_TIMEOUT_SECS, RETRY_BASE_DELAY_MS};
use crate::types::{PromptError, Result};

/// LLM client backed by an external command
#[derive(Debug, Clone)]
pub struct CommandClient {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    max_retries: u32,
}

impl CommandClient {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Duration::from_secs(COMMAND_TIMEOUT_SECS),
            max_retries: COMMAND_MAX_RETRIES,
        }
    }

    /// Split a whitespace-separated command line into program and arguments
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| PromptError::Llm("Empty LLM command".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts per call (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Execute a single command call
    async fn execute(&self, prompt: &str) -> Result<String> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                PromptError::Llm(format!(
                    "Failed to spawn {}: {}. Is it installed?",
                    self.program, e
                ))
            })?;

        // Dropping the future on timeout drops the child, which kills it
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                PromptError::Llm(format!(
                    "{} timed out after {}s",
                    self.program,
                    self.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| PromptError::Llm(format!("{} execution failed: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                "Process exited with non-zero status"
            } else {
                stderr.trim()
            };
            return Err(PromptError::Llm(format!(
                "{} failed: {}",
                self.program, message
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn generate_with_retry(&self, prompt: &str) -> Result<String> {
        let attempts = self.max_retries.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let start = Instant::now();
            match self.execute(prompt).await {
                Ok(response) => {
                    debug!(
                        program = %self.program,
                        attempt,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Command client responded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, attempts, e);
                    last_error = Some(e);
                    if attempt < attempts {
                        let delay = RETRY_BASE_DELAY_MS << (attempt - 1).min(6);
                        debug!(delay_ms = delay, "Retrying after backoff");
                        sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| PromptError::Llm("No attempts made".to_string())))
    }
}

impl LlmClient for CommandClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.generate_with_retry(prompt))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let client = CommandClient::parse("ollama run llama3").unwrap();
        assert_eq!(client.program(), "ollama");
        assert_eq!(client.args, vec!["run", "llama3"]);
        assert!(CommandClient::parse("   ").is_err());
    }

    #[test]
    fn test_echo_response() {
        let client = CommandClient::parse("echo").unwrap();
        assert_eq!(client.generate("hello world").unwrap().trim(), "hello world");
    }

    #[test]
    fn test_failure_reports_stderr() {
        let client = CommandClient::new(
            "sh",
            vec!["-c".into(), "echo broken >&2; exit 3".into()],
        )
        .with_max_retries(1);
        let err = client.generate("prompt").unwrap_err();
        assert_eq!(err.to_string(), "LLM client error: sh failed: broken");
    }

    #[test]
    fn test_timeout() {
        let client = CommandClient::new("sh", vec!["-c".into(), "sleep 5".into()])
            .with_timeout(Duration::from_millis(200))
            .with_max_retries(1);
        let start = Instant::now();
        let err = client.generate("prompt").unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_timeout_covers_inherited_output_pipes() {
        // The shell exits at once but the background sleep keeps stdout open
        let client = CommandClient::new("sh", vec!["-c".into(), "(sleep 5) & echo hi".into()])
            .with_timeout(Duration::from_millis(200))
            .with_max_retries(1);
        let start = Instant::now();
        let err = client.generate("prompt").unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_missing_program() {
        let client =
            CommandClient::new("promptforge-no-such-binary", Vec::new()).with_max_retries(1);
        let err = client.generate("prompt").unwrap_err();
        assert!(err.to_string().contains("Is it installed?"));
    }
}
