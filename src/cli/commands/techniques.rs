//! Techniques Command
//!
//! Browse prompt techniques and get suggestions for an objective.
//!
//! Usage:
//!   promptforge techniques list [-f json]
//!   promptforge techniques show <name> [-f json]
//!   promptforge techniques suggest "<objective>" [--domain D] [--complexity N]

use serde::Serialize;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, print_json};
use crate::techniques::{PromptTechnique, TechniqueSelector};
use crate::types::{Domain, Result};

#[derive(Serialize)]
struct TechniqueSummary<'a> {
    name: &'a str,
    description: &'a str,
    applicability: &'a [String],
}

pub fn list(format: &str) -> Result<()> {
    let generator = CommandContext::load()?.generator(None)?;
    let mut techniques: Vec<&PromptTechnique> = generator.techniques().iter().collect();
    techniques.sort_by(|a, b| a.name.cmp(&b.name));

    if format == "json" {
        let summaries: Vec<TechniqueSummary> = techniques
            .iter()
            .map(|t| TechniqueSummary {
                name: &t.name,
                description: &t.description,
                applicability: &t.applicability,
            })
            .collect();
        return print_json(&summaries);
    }

    for technique in techniques {
        println!("{:<24} {}", technique.name, technique.description);
    }
    Ok(())
}

pub fn show(name: &str, format: &str) -> Result<()> {
    let generator = CommandContext::load()?.generator(None)?;
    let library = generator.techniques();
    let technique = library.require(name)?;

    if format == "json" {
        return print_json(technique);
    }

    let out = Output::new();
    out.header(&technique.name);
    println!("{}", technique.description);

    let applicability = if technique.applicability.is_empty() {
        "any".to_string()
    } else {
        technique.applicability.join(", ")
    };
    out.field("Applies to", applicability);

    let compatible = library.compatible_techniques(name);
    if !compatible.is_empty() {
        out.field("Combines with", compatible.join(", "));
    }
    if !technique.parameters.is_empty() {
        out.section("Parameters");
        for (key, value) in &technique.parameters {
            println!("  {} = {}", key, value);
        }
    }
    if !technique.example.is_empty() {
        out.section("Example");
        println!("{}", technique.example);
    }
    Ok(())
}

pub fn suggest(
    objective: &str,
    domain: Option<Domain>,
    complexity: Option<u8>,
    format: &str,
) -> Result<()> {
    let ctx = CommandContext::load()?;
    let generator = ctx.generator(None)?;
    let selector = TechniqueSelector::with_max_techniques(ctx.config.generation.max_techniques);
    let selected =
        selector.select_techniques(generator.techniques(), objective, domain, None, complexity);

    if format == "json" {
        return print_json(&selected);
    }

    if selected.is_empty() {
        println!("No techniques suggested.");
        return Ok(());
    }
    for (rank, technique) in selected.iter().enumerate() {
        let description = generator
            .techniques()
            .get(&technique.name)
            .map(|t| t.description.as_str())
            .unwrap_or_default();
        println!("{}. {:<24} {}", rank + 1, technique.name, description);
    }
    Ok(())
}
