//! Evaluate Command
//!
//! Score a prompt's quality and suggest improvements.
//!
//! Usage:
//!   promptforge evaluate "<prompt>" [--domain D] [-f json]
//!   promptforge evaluate --file prompt.md [--llm-command "ollama run llama3"]
//!   cat prompt.md | promptforge evaluate

use std::io::Read;
use std::path::Path;

use crate::classifier::DomainClassifier;
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, print_json};
use crate::evaluator::Evaluation;
use crate::types::{Domain, PromptError, Result};

pub fn run(
    text: Option<&str>,
    file: Option<&Path>,
    domain: Option<Domain>,
    llm_command: Option<&str>,
    format: &str,
) -> Result<()> {
    let prompt = read_prompt(text, file)?;
    let domain = domain.unwrap_or_else(|| DomainClassifier::new().classify(&prompt).domain);

    let ctx = CommandContext::load()?;
    let evaluation = ctx.evaluator(Some(domain), llm_command)?.evaluate(&prompt);

    if format == "json" {
        return print_json(&evaluation);
    }
    print_evaluation(&evaluation);
    Ok(())
}

/// Prompt from the argument, a file, or stdin when neither is given
pub fn read_prompt(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    let prompt = match (text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if prompt.trim().is_empty() {
        return Err(PromptError::Config("Prompt text is empty".to_string()));
    }
    Ok(prompt)
}

/// Human-readable evaluation report
pub fn print_evaluation(evaluation: &Evaluation) {
    let out = Output::new();

    out.section("Evaluation");
    out.field("Quality score", format!("{:.2}", evaluation.quality_score));
    out.field("Words", evaluation.word_count);
    println!();
    for (factor, score) in evaluation.factor_scores.named() {
        out.score(factor, score);
    }

    if let Some(domain) = &evaluation.domain {
        out.section(&format!("Domain: {}", domain.domain));
        out.field(
            "Domain score",
            format!("{:.2}", domain.domain_quality_score),
        );
        out.field(
            "Combined score",
            format!("{:.2}", domain.combined_quality_score),
        );
        println!();
        for factor in &domain.scores {
            out.score(factor.name, factor.score);
        }
    }

    if let Some(metrics) = &evaluation.response_metrics {
        out.section("Response Sampling");
        out.field("Samples", metrics.sample_responses.len());
        out.field("Consistency", format!("{:.2}", metrics.response_consistency));
        out.field("Average length", format!("{} words", metrics.response_length));
        out.field("Average time", format!("{:.2}s", metrics.response_time));
    }
    if let Some(error) = &evaluation.llm_error {
        out.warning(&format!("Response sampling failed: {}", error));
    }

    let domain_suggestions = evaluation
        .domain
        .as_ref()
        .map(|d| d.suggestions.as_slice())
        .unwrap_or_default();
    if !evaluation.suggestions.is_empty() || !domain_suggestions.is_empty() {
        out.section("Suggestions");
        for suggestion in evaluation.suggestions.iter().chain(domain_suggestions) {
            out.info(suggestion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_prompt_prefers_text() {
        assert_eq!(read_prompt(Some("inline"), None).unwrap(), "inline");
    }

    #[test]
    fn test_read_prompt_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompt.md");
        std::fs::write(&path, "# Task\nWrite tests").unwrap();
        assert_eq!(
            read_prompt(None, Some(&path)).unwrap(),
            "# Task\nWrite tests"
        );
    }

    #[test]
    fn test_read_prompt_rejects_blank() {
        assert!(read_prompt(Some("   "), None).is_err());
    }
}
