//! Classify Command
//!
//! Detect the domain of a piece of text.
//!
//! Usage:
//!   promptforge classify "<text>" [-f json]

use serde::Serialize;

use crate::classifier::{ClassificationResult, DomainClassifier};
use crate::cli::util::print_json;
use crate::domains::{DomainService, RoleMatch};
use crate::types::Result;

#[derive(Serialize)]
struct ClassifyOutput {
    #[serde(flatten)]
    classification: ClassificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<RoleMatch>,
}

pub fn run(text: &str, format: &str) -> Result<()> {
    let role = DomainService::new().detect_role(text);
    let classified_text = role.as_ref().map_or(text, |r| r.objective.as_str());
    let classification = DomainClassifier::new().classify(classified_text);

    if format == "json" {
        return print_json(&ClassifyOutput {
            classification,
            role,
        });
    }

    println!("Domain:     {}", classification.domain);
    println!("Confidence: {:.2}", classification.confidence);
    if let Some(role) = role {
        println!();
        println!("Role:       {} ({})", role.role, role.domain);
        println!("Objective:  {}", role.objective);
    }
    Ok(())
}
