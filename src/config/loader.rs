//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/promptforge/config.toml)
//! 3. Project config (.promptforge/config.toml)
//! 4. Environment variables (PROMPTFORGE_* prefix, `__` between nesting levels)

use directories::BaseDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::types::Config;
use crate::types::{PromptError, Result};

const APP_NAME: &str = "promptforge";
const ENV_PREFIX: &str = "PROMPTFORGE_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // PROMPTFORGE_CACHE__MAX_HISTORY_ITEMS -> cache.max_history_items
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| PromptError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| PromptError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/promptforge/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .map(|p| p.join(APP_NAME))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".promptforge")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        // Global config
        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        // Project config
        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        // History directory
        if let Ok(config) = Self::load() {
            let cache = &config.cache.dir;
            let exists = if cache.exists() { "✓" } else { "✗" };
            println!("  History: {} {}", exists, cache.display());
        }
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| PromptError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    /// Edit config file with default editor
    pub fn edit_config(global: bool) -> Result<()> {
        let path = if global {
            Self::global_config_path().ok_or_else(|| {
                PromptError::Config("Cannot determine global config path".to_string())
            })?
        } else {
            Self::project_config_path()
        };

        if !path.exists() {
            println!("Config file does not exist: {}", path.display());
            println!(
                "Run: promptforge config init {}",
                if global { "--global" } else { "" }
            );
            return Ok(());
        }

        let editor = env::var("EDITOR").unwrap_or_else(|_| {
            if cfg!(target_os = "macos") {
                "open".to_string()
            } else if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        });

        let status = Command::new(&editor).arg(&path).status().map_err(|e| {
            PromptError::Config(format!("Failed to launch editor {}: {}", editor, e))
        })?;

        if !status.success() {
            return Err(PromptError::Config("Editor exited with error".to_string()));
        }

        println!("Config saved: {}", path.display());
        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            PromptError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_config(&global_dir, Self::default_global_config(), force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration under the current directory
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let project_dir = Self::project_dir();
        Self::write_config(&project_dir, Self::default_project_config(), force)?;
        fs::create_dir_all(project_dir.join("templates"))?;
        fs::create_dir_all(project_dir.join("techniques"))?;
        Ok(project_dir)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_config(dir: &Path, content: &str, force: bool) -> Result<()> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, content)?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }
        Ok(())
    }

    /// Default global config content (TOML)
    fn default_global_config() -> &'static str {
        r#"# PromptForge Global Configuration
# User-wide defaults. Project settings in .promptforge/config.toml override these.

version = "1.0"

# Prompt history
[cache]
dir = ".cache"
max_history_items = 100
cache_responses = true

# Prompt generation
[generation]
max_techniques = 3
auto_techniques = false

# Prompt evaluation
[evaluation]
# llm_command = "ollama run llama3"
llm_samples = 3
api_timeout_secs = 30
max_retries = 3

[logging]
level = "warn"
"#
    }

    /// Default project config content (TOML)
    fn default_project_config() -> &'static str {
        r#"# PromptForge Project Configuration
# Project-specific settings that override global defaults.

version = "1.0"

[generation]
templates_dir = ".promptforge/templates"
techniques_dir = ".promptforge/techniques"
default_tags = []
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[cache]\nmax_history_items = 25\n\n[generation]\nauto_techniques = true\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.cache.max_history_items, 25);
        assert!(config.generation.auto_techniques);
        assert_eq!(config.evaluation.llm_samples, 3);
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[evaluation]\nllm_samples = 0\n").unwrap();

        let err = ConfigLoader::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("llm_samples"));
    }

    #[test]
    fn test_default_templates_parse() {
        let dir = TempDir::new().unwrap();
        for (name, content) in [
            ("global.toml", ConfigLoader::default_global_config()),
            ("project.toml", ConfigLoader::default_project_config()),
        ] {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            assert!(ConfigLoader::load_from_file(&path).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_write_config_respects_force() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("conf");
        ConfigLoader::write_config(&target, "version = \"1.0\"\n", false).unwrap();
        ConfigLoader::write_config(&target, "version = \"2.0\"\n", false).unwrap();
        let content = fs::read_to_string(target.join("config.toml")).unwrap();
        assert!(content.contains("1.0"));

        ConfigLoader::write_config(&target, "version = \"2.0\"\n", true).unwrap();
        let content = fs::read_to_string(target.join("config.toml")).unwrap();
        assert!(content.contains("2.0"));
    }

    #[test]
    fn test_project_paths() {
        assert_eq!(
            ConfigLoader::project_config_path(),
            PathBuf::from(".promptforge/config.toml")
        );
    }

    #[test]
    fn test_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
            jail.set_env("PROMPTFORGE_CACHE__MAX_HISTORY_ITEMS", "7");
            jail.set_env("PROMPTFORGE_LOGGING__LEVEL", "debug");
            let config = ConfigLoader::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cache.max_history_items, 7);
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }
}
