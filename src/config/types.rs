//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/promptforge/) and project (.promptforge/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{evaluation, generation, history};
use crate::history::HistoryConfig;
use crate::types::{PromptError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Prompt history settings
    pub cache: CacheConfig,

    /// Prompt generation settings
    pub generation: GenerationConfig,

    /// Prompt evaluation settings
    pub evaluation: EvaluationConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            cache: CacheConfig::default(),
            generation: GenerationConfig::default(),
            evaluation: EvaluationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `PromptError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_history_items == 0 {
            return Err(PromptError::Config(
                "cache.max_history_items must be greater than 0".to_string(),
            ));
        }

        if self.generation.max_techniques == 0 {
            return Err(PromptError::Config(
                "generation.max_techniques must be greater than 0".to_string(),
            ));
        }

        if self.evaluation.llm_samples == 0 {
            return Err(PromptError::Config(
                "evaluation.llm_samples must be greater than 0".to_string(),
            ));
        }

        if self.evaluation.api_timeout_secs == 0 {
            return Err(PromptError::Config(
                "evaluation.api_timeout_secs must be greater than 0".to_string(),
            ));
        }

        self.logging.level.parse::<LogLevel>()?;

        Ok(())
    }
}

// =============================================================================
// Cache Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding prompt_history.json
    pub dir: PathBuf,

    /// Entries kept in the history file
    pub max_history_items: usize,

    /// Persist history to disk
    pub cache_responses: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".cache"),
            max_history_items: history::DEFAULT_MAX_ITEMS,
            cache_responses: true,
        }
    }
}

impl CacheConfig {
    /// History store settings derived from this section
    pub fn history(&self) -> HistoryConfig {
        HistoryConfig {
            cache_dir: self.dir.clone(),
            max_items: self.max_history_items,
            persist: self.cache_responses,
        }
    }
}

// =============================================================================
// Generation Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Extra template definitions loaded after the built-ins
    pub templates_dir: Option<PathBuf>,

    /// Extra technique definitions loaded after the built-ins
    pub techniques_dir: Option<PathBuf>,

    /// Upper bound for automatically selected techniques
    pub max_techniques: usize,

    /// Select techniques automatically when none are requested
    pub auto_techniques: bool,

    /// Tags added to every template lookup
    pub default_tags: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            techniques_dir: None,
            max_techniques: generation::MAX_TECHNIQUES,
            auto_techniques: false,
            default_tags: Vec::new(),
        }
    }
}

// =============================================================================
// Evaluation Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// External model command used for response sampling
    /// (e.g. "ollama run llama3"); sampling is off when unset
    pub llm_command: Option<String>,

    /// Responses sampled per evaluation
    pub llm_samples: usize,

    /// Timeout for one model call
    pub api_timeout_secs: u64,

    /// Attempts per model call
    pub max_retries: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            llm_command: None,
            llm_samples: evaluation::LLM_SAMPLES,
            api_timeout_secs: evaluation::COMMAND_TIMEOUT_SECS,
            max_retries: evaluation::COMMAND_MAX_RETRIES,
        }
    }
}

impl EvaluationConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default().to_string(),
        }
    }
}

/// Accepted log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = PromptError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(PromptError::Config(format!(
                "Unknown log level: {}. Valid values: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.cache.dir, PathBuf::from(".cache"));
        assert_eq!(config.cache.max_history_items, 100);
        assert!(config.cache.cache_responses);
        assert_eq!(config.generation.max_techniques, 3);
        assert!(!config.generation.auto_techniques);
        assert_eq!(config.evaluation.llm_samples, 3);
        assert_eq!(config.evaluation.api_timeout_secs, 30);
        assert_eq!(config.evaluation.max_retries, 3);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = Config::default();
        config.cache.max_history_items = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generation.max_techniques = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.evaluation.llm_samples = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.evaluation.api_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::Debug.to_string(), "debug");

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Unknown log level: loud"));
    }

    #[test]
    fn test_history_config() {
        let mut cache = CacheConfig::default();
        cache.cache_responses = false;
        let history = cache.history();
        assert_eq!(history.max_items, 100);
        assert!(!history.persist);
    }
}
