//! Templates Command
//!
//! Browse the template library.
//!
//! Usage:
//!   promptforge templates list [--domain D] [-f json]
//!   promptforge templates show <name> [-f yaml|json]

use std::path::Path;

use serde::Serialize;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, print_json};
use crate::templates::PromptTemplate;
use crate::types::{Domain, Result};

#[derive(Serialize)]
struct TemplateSummary<'a> {
    name: &'a str,
    domain: Domain,
    complexity_range: (u8, u8),
    sections: usize,
    tags: &'a [String],
}

impl<'a> From<&'a PromptTemplate> for TemplateSummary<'a> {
    fn from(template: &'a PromptTemplate) -> Self {
        Self {
            name: &template.name,
            domain: template.domain,
            complexity_range: template.complexity_range,
            sections: template.sections.len(),
            tags: &template.tags,
        }
    }
}

pub fn list(domain: Option<Domain>, templates_dir: Option<&Path>, format: &str) -> Result<()> {
    let generator = CommandContext::load()?.generator(templates_dir)?;
    let mut templates: Vec<&PromptTemplate> = generator
        .factory()
        .library()
        .iter()
        .filter(|t| domain.is_none_or(|d| t.domain == d))
        .collect();
    templates.sort_by(|a, b| (a.domain, &a.name).cmp(&(b.domain, &b.name)));

    if format == "json" {
        let summaries: Vec<TemplateSummary> = templates.into_iter().map(Into::into).collect();
        return print_json(&summaries);
    }

    if templates.is_empty() {
        println!("No templates found.");
        return Ok(());
    }
    for template in templates {
        println!(
            "{:<32} {:<24} complexity {}-{}  {}",
            template.name,
            template.domain.as_str(),
            template.complexity_range.0,
            template.complexity_range.1,
            template.description
        );
    }
    Ok(())
}

pub fn show(name: &str, templates_dir: Option<&Path>, format: &str) -> Result<()> {
    let generator = CommandContext::load()?.generator(templates_dir)?;
    let template = generator.factory().library().require(name)?;

    match format {
        "json" => print_json(template),
        "yaml" => {
            print!("{}", serde_yaml::to_string(template)?);
            Ok(())
        }
        _ => {
            print_template(template);
            Ok(())
        }
    }
}

fn print_template(template: &PromptTemplate) {
    let out = Output::new();
    out.header(&template.name);
    out.field("Domain", template.domain);
    out.field(
        "Complexity",
        format!("{}-{}", template.complexity_range.0, template.complexity_range.1),
    );
    if !template.description.is_empty() {
        out.field("Description", &template.description);
    }
    if !template.tags.is_empty() {
        out.field("Tags", template.tags.join(", "));
    }

    out.section("Sections");
    let mut sections = template.sections.clone();
    sections.sort_by_key(|s| s.position);
    for section in &sections {
        let marker = if section.required { "required" } else { "optional" };
        println!("  {:>4}  {:<28} {}", section.position, section.name, marker);
    }

    if !template.conditional_sections.is_empty() {
        out.section("Conditional Sections");
        for conditional in &template.conditional_sections {
            let names: Vec<&str> = conditional
                .add_sections
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            println!(
                "  when {} = {}: {}",
                conditional.trigger.key,
                conditional.trigger.value,
                names.join(", ")
            );
        }
    }

    if !template.prompt_techniques.is_empty() {
        let names: Vec<&str> = template.prompt_techniques.iter().map(|t| t.name()).collect();
        out.field("Techniques", names.join(", "));
    }
}
