//! Prompt Templates
//!
//! Templates are immutable value objects: ordered sections with `{placeholder}`
//! slots, a complexity range, tags and optional conditional sections.
//! Applying conditional sections yields a new section list; the library's
//! canonical instance is never modified.

mod factory;
mod library;

pub use factory::{FactoryWeights, TemplateFactory};
pub use library::TemplateLibrary;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Domain, GenerationContext, Params, PromptError, Result};

/// Position given to conditional sections that do not declare one
const DEFAULT_POSITION: i32 = 999;

fn default_true() -> bool {
    true
}

fn default_position() -> i32 {
    DEFAULT_POSITION
}

fn default_range() -> (u8, u8) {
    (1, 5)
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub name: String,
    #[serde(default = "default_position")]
    pub position: i32,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub content_template: String,
    #[serde(default)]
    pub description: String,
}

impl TemplateSection {
    pub fn new(name: impl Into<String>, position: i32, content_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            required: true,
            content_template: content_template.into(),
            description: String::new(),
        }
    }
}

/// Context condition that splices extra sections into a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub key: String,
    pub value: Value,
}

impl Trigger {
    /// True when the context holds `key` with exactly `value`
    pub fn matches(&self, ctx: &GenerationContext) -> bool {
        let expected = match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => return false,
            other => other.to_string(),
        };
        ctx.lookup(&self.key).is_some_and(|actual| actual == expected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalSection {
    pub trigger: Trigger,
    #[serde(default)]
    pub add_sections: Vec<TemplateSection>,
}

/// Technique suggested by a template, by name or with parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TechniqueHint {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        parameters: Params,
    },
}

impl TechniqueHint {
    pub fn name(&self) -> &str {
        match self {
            TechniqueHint::Name(name) => name,
            TechniqueHint::Detailed { name, .. } => name,
        }
    }
}

// =============================================================================
// Template
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub description: String,
    /// Inclusive (min, max) complexity bounds
    #[serde(default = "default_range")]
    pub complexity_range: (u8, u8),
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sections: Vec<TemplateSection>,
    #[serde(default)]
    pub best_practices: Vec<String>,
    #[serde(default)]
    pub prompt_techniques: Vec<TechniqueHint>,
    #[serde(default)]
    pub conditional_sections: Vec<ConditionalSection>,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, domain: Domain, complexity_range: (u8, u8)) -> Self {
        Self {
            name: name.into(),
            domain,
            description: String::new(),
            complexity_range,
            tags: Vec::new(),
            sections: Vec::new(),
            best_practices: Vec::new(),
            prompt_techniques: Vec::new(),
            conditional_sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: TemplateSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Reject ranges that are not ascending within 1..=5
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.complexity_range;
        if min < 1 || max > 5 || min > max {
            return Err(PromptError::invalid_template(
                &self.name,
                format!("complexity_range must be ascending within 1..=5, got [{}, {}]", min, max),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(PromptError::invalid_template(&self.name, "name is empty"));
        }
        Ok(())
    }

    pub fn complexity_fits(&self, complexity: u8) -> bool {
        let (min, max) = self.complexity_range;
        (min..=max).contains(&complexity)
    }

    /// Exact domain match with complexity inside the range
    pub fn is_suitable(&self, domain: Domain, complexity: u8) -> bool {
        self.domain == domain && self.complexity_fits(complexity)
    }

    pub fn required_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.required)
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn optional_sections(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| !s.required)
            .map(|s| s.name.as_str())
            .collect()
    }

    pub fn section_by_name(&self, name: &str) -> Option<&TemplateSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Sections for this context, with triggered conditional sections added
    /// as optional sections, sorted by position
    pub fn with_conditional_sections(&self, ctx: &GenerationContext) -> Vec<TemplateSection> {
        let mut sections = self.sections.clone();
        for conditional in &self.conditional_sections {
            if conditional.trigger.matches(ctx) {
                sections.extend(conditional.add_sections.iter().map(|s| TemplateSection {
                    required: false,
                    ..s.clone()
                }));
            }
        }
        sections.sort_by_key(|s| s.position);
        sections
    }

    /// Join populated, non-empty sections as `# <name>` blocks in position order
    pub fn render(sections: &[(TemplateSection, String)]) -> String {
        let mut ordered: Vec<&(TemplateSection, String)> = sections.iter().collect();
        ordered.sort_by_key(|(s, _)| s.position);
        ordered
            .into_iter()
            .filter(|(_, content)| !content.is_empty())
            .map(|(s, content)| format!("# {}\n{}", s.name, content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Trailing best-practices block, empty when the template declares none
    pub fn best_practices_block(&self) -> String {
        if self.best_practices.is_empty() {
            return String::new();
        }
        let lines: Vec<String> = self
            .best_practices
            .iter()
            .map(|p| format!("- {}", p))
            .collect();
        format!("\n\n# Best Practices\n{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PromptTemplate {
        let mut template = PromptTemplate::new("sample", Domain::Software, (2, 4))
            .with_section(TemplateSection::new("Testing", 3, "Test {objective}"))
            .with_section(TemplateSection::new("Context", 1, "Do {objective}"));
        template.conditional_sections.push(ConditionalSection {
            trigger: Trigger {
                key: "language".into(),
                value: json!("python"),
            },
            add_sections: vec![TemplateSection::new("Typing", 2, "Use type hints")],
        });
        template
    }

    #[test]
    fn test_suitability() {
        let template = sample();
        assert!(template.is_suitable(Domain::Software, 2));
        assert!(template.is_suitable(Domain::Software, 4));
        assert!(!template.is_suitable(Domain::Software, 5));
        assert!(!template.is_suitable(Domain::Content, 3));
    }

    #[test]
    fn test_conditional_sections_do_not_mutate() {
        let template = sample();
        let ctx = GenerationContext::new("x").with_extra("language", "python");

        let first = template.with_conditional_sections(&ctx);
        let second = template.with_conditional_sections(&ctx);

        assert_eq!(first, second);
        assert_eq!(template.sections.len(), 2);
        let names: Vec<&str> = first.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Context", "Typing", "Testing"]);
        assert!(!first[1].required);
    }

    #[test]
    fn test_conditional_not_triggered() {
        let template = sample();
        let ctx = GenerationContext::new("x").with_extra("language", "rust");
        assert_eq!(template.with_conditional_sections(&ctx).len(), 2);
    }

    #[test]
    fn test_trigger_numeric_value() {
        let trigger = Trigger {
            key: "complexity".into(),
            value: json!(5),
        };
        assert!(trigger.matches(&GenerationContext::new("x").with_complexity(5)));
        assert!(!trigger.matches(&GenerationContext::new("x").with_complexity(4)));
    }

    #[test]
    fn test_render_skips_empty_sections() {
        let sections = vec![
            (TemplateSection::new("B", 2, ""), "second".to_string()),
            (TemplateSection::new("A", 1, ""), "first".to_string()),
            (TemplateSection::new("C", 3, ""), String::new()),
        ];
        assert_eq!(PromptTemplate::render(&sections), "# A\nfirst\n\n# B\nsecond");
    }

    #[test]
    fn test_best_practices_block() {
        let mut template = sample();
        assert_eq!(template.best_practices_block(), "");
        template.best_practices = vec!["Be precise".into(), "Cite sources".into()];
        assert_eq!(
            template.best_practices_block(),
            "\n\n# Best Practices\n- Be precise\n- Cite sources"
        );
    }

    #[test]
    fn test_validate_range() {
        let mut template = sample();
        assert!(template.validate().is_ok());
        template.complexity_range = (4, 2);
        assert!(template.validate().is_err());
        template.complexity_range = (0, 3);
        assert!(template.validate().is_err());
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
name: minimal
sections:
  - name: Context
    content_template: "{objective}"
prompt_techniques:
  - chain_of_thought
  - name: few_shot
    parameters:
      examples: []
"#;
        let template: PromptTemplate = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(template.domain, Domain::General);
        assert_eq!(template.complexity_range, (1, 5));
        assert!(template.sections[0].required);
        assert_eq!(template.sections[0].position, DEFAULT_POSITION);
        assert_eq!(template.prompt_techniques[0].name(), "chain_of_thought");
        assert_eq!(template.prompt_techniques[1].name(), "few_shot");
        assert_eq!(template.required_sections(), vec!["Context"]);
        assert!(template.optional_sections().is_empty());
    }
}
