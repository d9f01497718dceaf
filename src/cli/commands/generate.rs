//! Generate Command
//!
//! Turn an objective into a structured prompt.
//!
//! Usage:
//!   promptforge generate "<objective>" [--domain D] [--complexity N]
//!       [--component C]... [--tag T]... [--technique NAME]... [--template NAME]
//!       [--auto-techniques] [--extract] [--set key=value]...
//!       [--templates-dir DIR] [--format text|json] [--evaluate] [--no-history]

use std::path::PathBuf;

use console::style;
use serde::Serialize;
use tracing::warn;

use crate::cli::util::{CommandContext, parse_key_value, print_json};
use crate::evaluator::{Evaluation, PromptEvaluator};
use crate::generator::{GeneratedPrompt, GenerationRequest};
use crate::history::HistoryEntry;
use crate::types::{Domain, Result};

use super::evaluate::print_evaluation;

/// Generate command options
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub objective: String,
    pub domain: Option<Domain>,
    pub complexity: Option<u8>,
    pub components: Vec<String>,
    pub tags: Vec<String>,
    pub techniques: Vec<String>,
    pub template: Option<String>,
    pub auto_techniques: bool,
    pub extract: bool,
    /// Raw `key=value` context extras
    pub set: Vec<String>,
    pub templates_dir: Option<PathBuf>,
    pub format: String,
    pub evaluate: bool,
    pub no_history: bool,
    pub llm_command: Option<String>,
}

#[derive(Serialize)]
struct GenerateOutput<'a> {
    #[serde(flatten)]
    result: &'a GeneratedPrompt,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<&'a Evaluation>,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let ctx = CommandContext::load()?;
    let mut generator = ctx
        .generator(options.templates_dir.as_deref())?
        .with_extraction(options.extract);
    if options.auto_techniques {
        generator = generator.with_auto_techniques(true);
    }

    let mut request = GenerationRequest::new(options.objective.as_str());
    request.domain = options.domain;
    request.complexity = options.complexity;
    request.components = options.components;
    request.techniques = options.techniques;
    request.template = options.template;
    request.tags = ctx.config.generation.default_tags.clone();
    request.tags.extend(options.tags);
    for raw in &options.set {
        let (key, value) = parse_key_value(raw)?;
        request.extras.insert(key, value);
    }

    let result = generator.generate(request)?;

    let evaluation = if options.evaluate {
        let evaluator = ctx.evaluator(Some(result.domain), options.llm_command.as_deref())?;
        Some(evaluator.evaluate(&result.prompt))
    } else {
        None
    };

    if !options.no_history {
        let quality = evaluation.as_ref().map_or_else(
            || PromptEvaluator::new().evaluate(&result.prompt).quality_score,
            Evaluation::overall_score,
        );
        let entry = HistoryEntry::new(&options.objective, &result.prompt, result.domain)
            .with_techniques(result.techniques_applied.clone())
            .with_quality(quality)
            .with_metadata("template", result.template_name.as_str())
            .with_metadata("complexity", result.complexity);
        let mut history = ctx.history();
        if let Err(e) = history.record(entry) {
            warn!("Failed to record history: {}", e);
        }
    }

    if options.format == "json" {
        return print_json(&GenerateOutput {
            result: &result,
            evaluation: evaluation.as_ref(),
        });
    }

    print_summary(&result);
    println!("{}", result.prompt);

    if let Some(evaluation) = &evaluation {
        print_evaluation(evaluation);
    }
    Ok(())
}

/// Generation details go to stderr so stdout carries only the prompt
fn print_summary(result: &GeneratedPrompt) {
    let confidence = result
        .confidence
        .map(|c| format!(" (confidence {:.2})", c))
        .unwrap_or_default();
    eprintln!(
        "{} {}{}",
        style("Domain:").dim(),
        style(result.domain).cyan(),
        confidence
    );
    if let Some(role) = &result.role {
        eprintln!("{} {}", style("Role:").dim(), role);
    }
    eprintln!("{} {}", style("Complexity:").dim(), result.complexity);
    eprintln!("{} {}", style("Template:").dim(), result.template_name);
    if !result.techniques_applied.is_empty() {
        eprintln!(
            "{} {}",
            style("Techniques:").dim(),
            result.techniques_applied.join(", ")
        );
    }
    eprintln!("{}", style("─".repeat(40)).dim());
}
