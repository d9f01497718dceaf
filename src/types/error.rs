//! Unified Error Type System
//!
//! Centralized error types for the prompt pipeline.
//!
//! ## Design Principles
//!
//! - Single error type (PromptError) for the whole library
//! - Unclassifiable text, degenerate complexity input and missing placeholder
//!   keys degrade to fallback output instead of erroring
//! - "No template" is the one reportable pipeline failure and is always typed
//! - No panic/unwrap in library code

use thiserror::Error;

use super::domain::Domain;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum PromptError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Pipeline Errors
    // -------------------------------------------------------------------------
    /// No candidate template exists for the requested domain
    #[error("No templates available for domain '{domain}' with complexity {complexity}")]
    NoTemplate { domain: Domain, complexity: u8 },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown technique: {0}")]
    UnknownTechnique(String),

    // -------------------------------------------------------------------------
    // Definition Errors
    // -------------------------------------------------------------------------
    #[error("Failed to load {path}: {message}")]
    TemplateLoad { path: String, message: String },

    #[error("Invalid template '{name}': {message}")]
    InvalidTemplate { name: String, message: String },

    // -------------------------------------------------------------------------
    // Evaluation Errors
    // -------------------------------------------------------------------------
    #[error("No prompts provided for comparison")]
    EmptyComparison,

    #[error("LLM client error: {0}")]
    Llm(String),

    // -------------------------------------------------------------------------
    // Surrounding Layers
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(String),
}

pub type Result<T> = std::result::Result<T, PromptError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl PromptError {
    /// Create a load error for a definition file
    pub fn template_load(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid template error
    pub fn invalid_template(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from template or technique selection
    pub fn is_selection_failure(&self) -> bool {
        matches!(
            self,
            Self::NoTemplate { .. } | Self::UnknownTemplate(_) | Self::UnknownTechnique(_)
        )
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| PromptError::History(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| PromptError::History(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_template_message() {
        let err = PromptError::NoTemplate {
            domain: Domain::Software,
            complexity: 4,
        };
        assert_eq!(
            err.to_string(),
            "No templates available for domain 'software' with complexity 4"
        );
        assert!(err.is_selection_failure());
    }

    #[test]
    fn test_template_load_helper() {
        let err = PromptError::template_load("broken.yaml", "missing field `name`");
        assert_eq!(
            err.to_string(),
            "Failed to load broken.yaml: missing field `name`"
        );
        assert!(!err.is_selection_failure());
    }

    #[test]
    fn test_with_context() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = io.with_context("Reading history").unwrap_err();
        assert_eq!(err.to_string(), "History error: Reading history: gone");
    }

    #[test]
    fn test_from_json_error() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: PromptError = parse.unwrap_err().into();
        assert!(matches!(err, PromptError::Json(_)));
    }
}
