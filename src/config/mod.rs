//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/promptforge/config.toml)
//! 3. Project config (.promptforge/config.toml)
//! 4. Environment variables (PROMPTFORGE_*)
//! 5. CLI arguments (highest priority)
//!
//! The pipeline components take no configuration; only the CLI and the
//! history store read it.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
