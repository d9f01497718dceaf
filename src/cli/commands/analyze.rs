//! Analyze Command
//!
//! Estimate the complexity of an objective.
//!
//! Usage:
//!   promptforge analyze "<objective>" [--domain D] [-f json]

use serde::Serialize;

use crate::classifier::DomainClassifier;
use crate::cli::ui::Output;
use crate::cli::util::print_json;
use crate::complexity::{ComplexityAnalysis, ComplexityAnalyzer};
use crate::types::{Domain, Result};

#[derive(Serialize)]
struct AnalyzeOutput {
    domain: Domain,
    #[serde(flatten)]
    analysis: ComplexityAnalysis,
}

pub fn run(objective: &str, domain: Option<Domain>, format: &str) -> Result<()> {
    let domain = domain.unwrap_or_else(|| DomainClassifier::new().classify(objective).domain);
    let analysis = ComplexityAnalyzer::new().analyze(objective, domain);

    if format == "json" {
        return print_json(&AnalyzeOutput { domain, analysis });
    }

    let out = Output::new();
    out.field("Domain", domain);
    out.field("Complexity", format!("{}/5", analysis.level));
    out.field("Explanation", &analysis.explanation);

    if !analysis.technical_terms.is_empty() {
        out.section("Technical Terms");
        for term in &analysis.technical_terms {
            println!("  • {}", term);
        }
    }
    if !analysis.components.is_empty() {
        out.section("Components");
        for component in &analysis.components {
            println!("  • {}", component);
        }
    }
    if !analysis.dependencies.is_empty() {
        out.section("Dependencies");
        for (from, to) in &analysis.dependencies {
            println!("  {} → {}", from, to);
        }
    }
    Ok(())
}
