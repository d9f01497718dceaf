//! Generation Context
//!
//! The value threaded through classification, complexity analysis and
//! section population. Well-known fields are typed; strategy-specific keys
//! (language, tone, industry, ...) live in `extras`.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::domain::Domain;
use crate::complexity::ComplexityAnalysis;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationContext {
    /// Objective text, stripped of any leading role phrase
    pub objective: String,
    /// Objective as the caller wrote it, when role detection rewrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u8>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_analysis: Option<ComplexityAnalysis>,
    /// Free-form keys read by strategies and conditional sections
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
}

impl GenerationContext {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Complexity level, clamped to 1..=5
    pub fn with_complexity(mut self, complexity: u8) -> Self {
        self.complexity = Some(complexity.clamp(1, 5));
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_extra(key, value);
        self
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extras.insert(key.into(), value.into());
    }

    /// Extra value, treating blank entries as absent
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn extra_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.extra(key).unwrap_or(default)
    }

    /// Lowercased extra value with default
    pub fn extra_lower(&self, key: &str, default: &str) -> String {
        self.extra_or(key, default).to_lowercase()
    }

    pub fn complexity_or(&self, default: u8) -> u8 {
        self.complexity.unwrap_or(default).clamp(1, 5)
    }

    pub fn objective_lower(&self) -> String {
        self.objective.to_lowercase()
    }

    /// Resolve a placeholder name against typed fields first, then extras
    pub fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "objective" => Some(self.objective.clone()),
            "original_objective" => self.original_objective.clone(),
            "domain" => self.domain.map(|d| d.to_string()),
            "domain_confidence" => self.domain_confidence.map(|c| format!("{:.2}", c)),
            "complexity" => self.complexity.map(|c| c.to_string()),
            "components" if !self.components.is_empty() => Some(self.components.join(", ")),
            _ => self.extras.get(key).cloned(),
        }
    }

    /// Fill `{placeholder}` slots; unresolved keys become `[key]`
    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| match caps.get(1) {
                Some(name) => self
                    .lookup(name.as_str())
                    .unwrap_or_else(|| format!("[{}]", name.as_str())),
                None => caps[0][..1].to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_known_and_missing_keys() {
        let ctx = GenerationContext::new("Build a parser")
            .with_complexity(3)
            .with_extra("language", "Rust");
        let out = ctx.render("{objective} in {language} at {complexity}/5 for {audience}");
        assert_eq!(out, "Build a parser in Rust at 3/5 for [audience]");
    }

    #[test]
    fn test_render_escaped_braces() {
        let ctx = GenerationContext::new("x");
        assert_eq!(ctx.render("{{literal}} {objective}"), "{literal} x");
    }

    #[test]
    fn test_blank_extra_is_absent() {
        let ctx = GenerationContext::new("x").with_extra("tone", "  ");
        assert_eq!(ctx.extra("tone"), None);
        assert_eq!(ctx.extra_or("tone", "professional"), "professional");
    }

    #[test]
    fn test_complexity_is_clamped() {
        assert_eq!(GenerationContext::new("x").with_complexity(0).complexity, Some(1));
        assert_eq!(GenerationContext::new("x").with_complexity(9).complexity, Some(5));

        let mut ctx = GenerationContext::new("x");
        ctx.complexity = Some(7);
        assert_eq!(ctx.complexity_or(3), 5);
        assert_eq!(GenerationContext::new("x").complexity_or(3), 3);
    }

    #[test]
    fn test_lookup_typed_fields() {
        let mut ctx = GenerationContext::new("x").with_domain(Domain::DataAnalysis);
        ctx.domain_confidence = Some(0.456);
        ctx.components = vec!["api".into(), "database".into()];
        assert_eq!(ctx.lookup("domain").as_deref(), Some("data_analysis"));
        assert_eq!(ctx.lookup("domain_confidence").as_deref(), Some("0.46"));
        assert_eq!(ctx.lookup("components").as_deref(), Some("api, database"));
        assert_eq!(ctx.lookup("complexity"), None);
    }
}
