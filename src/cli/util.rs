//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Config, ConfigLoader};
use crate::evaluator::{CommandClient, DomainSpecificEvaluator};
use crate::generator::PromptGenerator;
use crate::history::HistoryStore;
use crate::techniques::TechniqueSelector;
use crate::types::{Domain, PromptError, Result};

/// Command execution context
///
/// Provides unified access to the loaded configuration and the components
/// built from it.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    /// Load the merged configuration
    pub fn load() -> Result<Self> {
        Ok(Self {
            config: ConfigLoader::load()?,
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Generator over built-in definitions plus configured and extra
    /// template directories
    pub fn generator(&self, extra_templates: Option<&Path>) -> Result<PromptGenerator> {
        let generation = &self.config.generation;
        let mut generator = PromptGenerator::with_builtin()?
            .with_auto_techniques(generation.auto_techniques)
            .with_selector(TechniqueSelector::with_max_techniques(
                generation.max_techniques,
            ));

        let template_dirs = generation
            .templates_dir
            .as_deref()
            .into_iter()
            .chain(extra_templates);
        for dir in template_dirs {
            load_optional_dir(dir, "templates", |d| {
                generator.factory_mut().library_mut().load_dir(d)
            })?;
        }

        if let Some(dir) = generation.techniques_dir.as_deref() {
            load_optional_dir(dir, "techniques", |d| generator.techniques_mut().load_dir(d))?;
        }

        Ok(generator)
    }

    /// Evaluator for a domain, sampling responses when a model command is
    /// given or configured
    pub fn evaluator(
        &self,
        domain: Option<Domain>,
        llm_command: Option<&str>,
    ) -> Result<DomainSpecificEvaluator> {
        let evaluation = &self.config.evaluation;
        let mut evaluator =
            DomainSpecificEvaluator::new(domain).with_samples(evaluation.llm_samples);

        if let Some(command) = llm_command.or(evaluation.llm_command.as_deref()) {
            let client = CommandClient::parse(command)?
                .with_timeout(evaluation.api_timeout())
                .with_max_retries(evaluation.max_retries);
            debug!("Sampling responses with '{}'", client.program());
            evaluator = evaluator.with_client(Box::new(client));
        }

        Ok(evaluator)
    }

    /// History store at the configured cache directory
    pub fn history(&self) -> HistoryStore {
        HistoryStore::open(self.config.cache.history())
    }
}

/// Load definitions from `dir`; a configured directory that does not exist
/// is skipped with a warning
fn load_optional_dir<F>(dir: &Path, kind: &str, load: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<usize>,
{
    if !dir.is_dir() {
        warn!("{} directory not found: {}", kind, dir.display());
        return Ok(());
    }
    load(dir)?;
    Ok(())
}

/// Parse a `--set key=value` argument
pub fn parse_key_value(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| PromptError::Config(format!("Expected key=value, got '{}'", raw)))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(PromptError::Config(format!("Empty key in '{}'", raw)));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("language = Rust").unwrap(),
            ("language".to_string(), "Rust".to_string())
        );
        assert_eq!(
            parse_key_value("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_generator_loads_extra_templates() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("custom.yaml"),
            "name: custom_task\ndomain: general\nsections:\n  - name: Task\n    position: 1\n    content_template: \"{objective}\"\n",
        )
        .unwrap();

        let ctx = CommandContext::with_config(Config::default());
        let generator = ctx.generator(Some(dir.path())).unwrap();
        assert!(generator.factory().library().get("custom_task").is_some());
    }

    #[test]
    fn test_missing_template_dir_is_skipped() {
        let mut config = Config::default();
        config.generation.templates_dir = Some("/nonexistent/promptforge".into());
        let ctx = CommandContext::with_config(config);
        assert!(ctx.generator(None).is_ok());
    }

    #[test]
    fn test_evaluator_domain() {
        let ctx = CommandContext::with_config(Config::default());
        let evaluator = ctx.evaluator(Some(Domain::Software), None).unwrap();
        assert_eq!(evaluator.domain(), Some(Domain::Software));
        assert!(ctx.evaluator(None, Some("  ")).is_err());
    }
}
