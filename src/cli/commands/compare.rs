//! Compare Command
//!
//! Rank several prompts by quality.
//!
//! Usage:
//!   promptforge compare "<prompt A>" "<prompt B>" [--domain D] [-f json]
//!   promptforge compare --file a.md --file b.md

use std::path::PathBuf;

use console::style;

use crate::cli::ui::Output;
use crate::cli::util::print_json;
use crate::evaluator::DomainSpecificEvaluator;
use crate::types::{Domain, PromptError, Result};

pub fn run(
    prompts: Vec<String>,
    files: &[PathBuf],
    domain: Option<Domain>,
    format: &str,
) -> Result<()> {
    let mut candidates = prompts;
    for path in files {
        candidates.push(std::fs::read_to_string(path)?);
    }
    if candidates.len() < 2 {
        return Err(PromptError::Config(
            "Provide at least two prompts to compare".to_string(),
        ));
    }

    // Structural scoring only; response sampling is per-prompt in `evaluate`
    let comparison = DomainSpecificEvaluator::new(domain).compare_prompts(&candidates)?;

    if format == "json" {
        return print_json(&comparison);
    }

    let out = Output::new();
    out.header("Prompt Ranking");
    for (rank, ranked) in comparison.evaluations.iter().enumerate() {
        let marker = if ranked.prompt_index == comparison.best_prompt_index {
            style("★").yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {}. prompt #{} ({} words)",
            marker,
            rank + 1,
            ranked.prompt_index + 1,
            ranked.evaluation.word_count
        );
        out.score("quality", ranked.evaluation.quality_score);
        if let Some(domain) = &ranked.evaluation.domain {
            out.score("combined", domain.combined_quality_score);
        }
    }

    if !comparison.comparison_notes.is_empty() {
        out.section("Notes");
        for note in &comparison.comparison_notes {
            out.info(note);
        }
    }
    Ok(())
}
