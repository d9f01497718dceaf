//! Refine Command
//!
//! Analyze an existing prompt and add the sections it is missing.
//!
//! Usage:
//!   promptforge refine "<prompt>" [--objective O] [--improve KIND]... [-f json]
//!   promptforge refine --file prompt.md --suggest-only

use std::path::Path;

use console::style;

use crate::cli::ui::Output;
use crate::cli::util::print_json;
use crate::refiner::{Improvement, PromptAnalysis, PromptRefiner};
use crate::types::{PromptError, Result};

use super::evaluate::read_prompt;

pub fn run(
    text: Option<&str>,
    file: Option<&Path>,
    objective: Option<&str>,
    improve: &[String],
    suggest_only: bool,
    format: &str,
) -> Result<()> {
    let prompt = read_prompt(text, file)?;
    let desired = improve
        .iter()
        .map(|raw| raw.parse::<Improvement>().map_err(PromptError::Config))
        .collect::<Result<Vec<_>>>()?;

    let refiner = PromptRefiner::new();

    if suggest_only {
        let suggestions = refiner.suggest_improvements(&prompt);
        if format == "json" {
            return print_json(&suggestions);
        }
        let out = Output::new();
        if suggestions.is_empty() {
            out.success("No improvements suggested");
        }
        for suggestion in &suggestions {
            out.info(suggestion);
        }
        return Ok(());
    }

    let refinement = refiner.refine(&prompt, objective, &desired);
    if format == "json" {
        return print_json(&refinement);
    }

    // Refined prompt on stdout, report on stderr
    println!("{}", refinement.refined_prompt);
    eprintln!();
    print_analysis("Before", &refinement.original_analysis);
    print_analysis("After", &refinement.refined_analysis);
    if refinement.improvements.is_empty() {
        eprintln!("{}", style("No changes needed").green());
    } else {
        for enhancement in &refinement.improvements {
            eprintln!("  {} {}", style("+").green(), enhancement.description);
        }
        eprintln!(
            "{} {:.0}%",
            style("Improvement:").bold(),
            refinement.improvement_score * 100.0
        );
    }
    Ok(())
}

fn print_analysis(label: &str, analysis: &PromptAnalysis) {
    eprintln!(
        "{} quality {:.2}, {} sections, {} issues, complexity {}/5",
        style(format!("{}:", label)).bold(),
        analysis.quality_score,
        analysis.sections.len(),
        analysis.issues.len(),
        analysis.complexity
    );
}
