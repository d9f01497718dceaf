//! Prompt Techniques
//!
//! Named transformations applied to a fully rendered prompt: framing it
//! with a role, wrapping it in reasoning scaffolds, adding examples.
//! Built-in techniques carry their own behaviour via [`TechniqueKind`];
//! techniques loaded from YAML are plain `{content}` templates.

mod advanced;
mod selector;

pub use selector::{SelectedTechnique, TechniqueSelector, technique_context};

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::types::{Domain, Params, PromptError, Result, json_string_array, json_string_or};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex")
});

/// Applicability tag that matches every domain and task
const UNIVERSAL: &str = "all";

// =============================================================================
// Technique Kind
// =============================================================================

/// Behaviour behind a technique's `apply`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechniqueKind {
    /// `{content}` substitution over the technique's template string
    #[default]
    Template,
    ChainOfThought,
    RolePrompting,
    FewShot,
    XmlTagging,
    TreeOfThoughts,
    React,
    SelfConsistency,
    Reflexion,
    GenerateKnowledge,
    PrefillResponse,
    DirectionalStimulus,
    PromptChaining,
    GraphPrompting,
    MetaPrompting,
    ActivePrompt,
}

// =============================================================================
// Technique
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTechnique {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub example: String,
    /// Domains or tasks the technique suits; empty means any
    #[serde(default)]
    pub applicability: Vec<String>,
    /// Techniques this one can be combined with
    #[serde(default)]
    pub compatibility: Vec<String>,
    /// Default parameters, overridden by caller parameters at apply time
    #[serde(default)]
    pub parameters: Params,
    #[serde(default, skip_serializing_if = "is_template_kind")]
    pub kind: TechniqueKind,
}

fn is_template_kind(kind: &TechniqueKind) -> bool {
    *kind == TechniqueKind::Template
}

impl PromptTechnique {
    pub(crate) fn builtin(
        name: &str,
        kind: TechniqueKind,
        description: &str,
        template: &str,
        applicability: &[&str],
        compatibility: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            template: template.to_string(),
            example: String::new(),
            applicability: applicability.iter().map(|s| s.to_string()).collect(),
            compatibility: compatibility.iter().map(|s| s.to_string()).collect(),
            parameters: Params::new(),
            kind,
        }
    }

    /// Apply the technique to `content`, with `params` layered over the defaults
    pub fn apply(&self, content: &str, params: &Params) -> String {
        let mut merged = self.parameters.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        match self.kind {
            TechniqueKind::Template => self.apply_template(content, &merged),
            TechniqueKind::ChainOfThought => chain_of_thought(content, &merged),
            TechniqueKind::RolePrompting => role_prompting(content, &merged),
            TechniqueKind::FewShot => few_shot(content, &merged),
            TechniqueKind::XmlTagging => xml_tagging(content, &merged),
            kind => advanced::apply(kind, content, &merged),
        }
    }

    fn apply_template(&self, content: &str, params: &Params) -> String {
        match fill_template(&self.template, content, params) {
            Ok(text) => text,
            Err(missing) => {
                warn!(
                    "Failed to apply technique {}. Missing parameter: {}",
                    self.name, missing
                );
                content.to_string()
            }
        }
    }

    /// True when the technique suits the domain, the task, or `<domain>_<task>`
    pub fn is_applicable(&self, domain: Domain, task: &str) -> bool {
        if self.applicability.is_empty() {
            return true;
        }
        let combined = format!("{}_{}", domain, task);
        self.applicability.iter().any(|a| {
            a == UNIVERSAL || a == domain.as_str() || a == task || *a == combined
        })
    }

    pub fn is_compatible_with(&self, other: &str) -> bool {
        self.compatibility.iter().any(|c| c == other)
    }
}

/// Substitute `{content}` and parameter placeholders; `Err` names the first missing key
fn fill_template(
    template: &str,
    content: &str,
    params: &Params,
) -> std::result::Result<String, String> {
    let mut missing = None;
    let text = PLACEHOLDER_RE.replace_all(template, |caps: &regex::Captures| {
        let whole = &caps[0];
        if whole == "{{" {
            return "{".to_string();
        }
        if whole == "}}" {
            return "}".to_string();
        }
        let key = &caps[1];
        if key == "content" {
            return content.to_string();
        }
        match params.get(key) {
            Some(value) => value_text(value),
            None => {
                missing.get_or_insert_with(|| key.to_string());
                String::new()
            }
        }
    });
    match missing {
        Some(key) => Err(key),
        None => Ok(text.into_owned()),
    }
}

/// Display form of a parameter value: strings bare, lists comma-joined
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// =============================================================================
// Core Techniques
// =============================================================================

fn chain_of_thought(content: &str, params: &Params) -> String {
    let steps = if json_string_or(params, "steps_format", "numbered") == "numbered" {
        "1. Understand the problem\n2. Break it down into components\n3. Address each component systematically\n"
    } else {
        "First, understand the problem. Then, break it down into components. Finally, address each component systematically.\n"
    };
    let suffix = if json_string_or(params, "reasoning_depth", "detailed") == "detailed" {
        "\nMake sure to explain your reasoning at each step before moving to the next one."
    } else {
        "\nBriefly note your reasoning at each step."
    };
    format!(
        "{}\n\nLet's think through this step-by-step:\n\n{}{}",
        content, steps, suffix
    )
}

fn role_prompting(content: &str, params: &Params) -> String {
    let role = json_string_or(params, "role", "expert");
    let expertise = json_string_or(params, "expertise", "");
    let mut prefix = format!("You are an {}", role);
    if !expertise.is_empty() {
        prefix.push_str(&format!(" with expertise in {}", expertise));
    }
    format!("{}.\n\n{}", prefix, content)
}

fn few_shot(content: &str, params: &Params) -> String {
    let examples = match params.get("examples") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return content.to_string(),
    };

    let mut text = String::from("Here are some examples of what I'm looking for:\n\n");
    for (i, example) in examples.iter().enumerate() {
        let field = |key: &str| example.get(key).map(value_text).unwrap_or_default();
        text.push_str(&format!(
            "Example {}:\nInput: {}\nOutput: {}\n\n",
            i + 1,
            field("input"),
            field("output")
        ));
    }
    format!(
        "{}Now, apply a similar approach to the following:\n\n{}",
        text, content
    )
}

fn xml_tagging(content: &str, params: &Params) -> String {
    let tags = if params.contains_key("tags") {
        json_string_array(params, "tags")
    } else {
        vec!["<input>".to_string(), "<output>".to_string()]
    };

    if tags.len() < 2 {
        return format!(
            "<input>\n{}\n</input>\n\nPlease provide your response in <output> tags.",
            content
        );
    }

    let mut result = content.to_string();
    for tag in &tags {
        let name = capitalize(tag.trim_matches(|c| c == '<' || c == '>'));
        result.push_str(&format!(
            "\n\nPlease include a {} section using {} tags in your response.",
            name, tag
        ));
    }
    result
}

/// First character upper-cased, the rest lower-cased
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn core_techniques() -> Vec<PromptTechnique> {
    vec![
        PromptTechnique::builtin(
            "chain_of_thought",
            TechniqueKind::ChainOfThought,
            "Guides the model to break down complex problems into logical steps",
            "{content}\n\nThink through this step-by-step.",
            &["complex_problems", "reasoning", "math", "coding"],
            &["role_prompting", "few_shot"],
        ),
        PromptTechnique::builtin(
            "role_prompting",
            TechniqueKind::RolePrompting,
            "Assigns a specific role to the model to guide its responses",
            "You are an {role} with expertise in {expertise}.\n\n{content}",
            &["all"],
            &["chain_of_thought", "few_shot", "xml_tagging"],
        ),
        PromptTechnique::builtin(
            "few_shot",
            TechniqueKind::FewShot,
            "Provides examples to demonstrate the expected input-output pattern",
            "Here are some examples:\n{examples}\n\nNow, apply this to: {content}",
            &["all"],
            &["role_prompting", "chain_of_thought"],
        ),
        PromptTechnique::builtin(
            "xml_tagging",
            TechniqueKind::XmlTagging,
            "Structures prompt and expected response using XML tags",
            "<instruction>\n{content}\n</instruction>\n\nProvide your response using appropriate XML tags.",
            &["structured_output", "parsing"],
            &["role_prompting", "few_shot"],
        ),
    ]
}

// =============================================================================
// Technique Library
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct TechniqueLibrary {
    techniques: BTreeMap<String, PromptTechnique>,
}

impl TechniqueLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with the core and advanced techniques registered
    pub fn with_builtin() -> Self {
        let mut library = Self::new();
        for technique in core_techniques().into_iter().chain(advanced::techniques()) {
            library.register(technique);
        }
        library
    }

    pub fn register(&mut self, technique: PromptTechnique) {
        self.techniques.insert(technique.name.clone(), technique);
    }

    pub fn get(&self, name: &str) -> Option<&PromptTechnique> {
        self.techniques.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&PromptTechnique> {
        self.get(name)
            .ok_or_else(|| PromptError::UnknownTechnique(name.to_string()))
    }

    pub fn list(&self) -> Vec<&str> {
        self.techniques.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptTechnique> {
        self.techniques.values()
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    /// Apply a technique by name
    pub fn apply_technique(&self, name: &str, content: &str, params: &Params) -> Result<String> {
        let technique = self.require(name)?;
        debug!("Applying technique '{}'", name);
        Ok(technique.apply(content, params))
    }

    /// Registered techniques that list `name` as compatible, or that `name` lists
    pub fn compatible_techniques(&self, name: &str) -> Vec<&str> {
        let Some(technique) = self.get(name) else {
            return Vec::new();
        };
        self.techniques
            .values()
            .filter(|t| t.name != name)
            .filter(|t| technique.is_compatible_with(&t.name) || t.is_compatible_with(name))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Two techniques may be combined when either lists the other
    pub fn are_compatible(&self, a: &str, b: &str) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(ta), Some(tb)) => ta.is_compatible_with(b) || tb.is_compatible_with(a),
            _ => false,
        }
    }

    pub fn find_techniques(&self, domain: Domain, task: &str) -> Vec<&PromptTechnique> {
        self.techniques
            .values()
            .filter(|t| t.is_applicable(domain, task))
            .collect()
    }

    /// Load template techniques from every `.yaml`/`.yml` file in `dir`.
    ///
    /// Files that fail to parse are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == "yaml" || e == "yml")
            })
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match load_file(&path) {
                Ok(techniques) => {
                    loaded += techniques.len();
                    for technique in techniques {
                        self.register(technique);
                    }
                }
                Err(e) => warn!("Skipping technique file: {}", e),
            }
        }
        info!("Loaded {} techniques from {}", loaded, dir.display());
        Ok(loaded)
    }
}

fn load_file(path: &Path) -> Result<Vec<PromptTechnique>> {
    let origin = path.display().to_string();
    let source = std::fs::read_to_string(path)
        .map_err(|e| PromptError::template_load(&origin, e.to_string()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&source)
        .map_err(|e| PromptError::template_load(&origin, e.to_string()))?;

    let entries = match value {
        serde_yaml::Value::Sequence(items) => items,
        serde_yaml::Value::Mapping(_) => vec![value],
        _ => {
            return Err(PromptError::template_load(
                &origin,
                "expected a technique mapping or a list of techniques",
            ));
        }
    };

    entries
        .into_iter()
        .map(|entry| {
            serde_yaml::from_value::<PromptTechnique>(entry)
                .map_err(|e| PromptError::template_load(&origin, e.to_string()))
        })
        .collect()
}
