//! Domain Strategies
//!
//! Each strategy fills template sections for one domain from a static
//! knowledge base. Section names are matched against a synonym table;
//! unrecognised sections fall back to literal placeholder substitution.
//!
//! Strategies are pure: they never mutate the context or their tables.

mod business;
mod content;
mod data_analysis;
mod service;
mod software;

pub use business::BusinessStrategy;
pub use content::ContentStrategy;
pub use data_analysis::DataAnalysisStrategy;
pub use service::{DomainService, RoleMatch};
pub use software::SoftwareStrategy;

use tracing::debug;

use crate::templates::TemplateSection;
use crate::types::{Domain, GenerationContext};

/// Section population for one domain
pub trait DomainStrategy: Send + Sync {
    fn domain(&self) -> Domain;

    fn populate(&self, section: &TemplateSection, ctx: &GenerationContext) -> String;
}

pub(crate) type SectionFn = fn(&TemplateSection, &GenerationContext) -> String;

/// Synonyms (normalised) routed to one section generator
pub(crate) struct SectionHandler {
    pub synonyms: &'static [&'static str],
    pub generate: SectionFn,
}

/// Lowercase and drop whitespace, `_` and `-` so "Code Structure",
/// "code_structure" and "codestructure" compare equal
pub(crate) fn normalize_section_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Route a section to its handler, or substitute its template literally
pub(crate) fn dispatch(
    handlers: &[SectionHandler],
    section: &TemplateSection,
    ctx: &GenerationContext,
) -> String {
    let key = normalize_section_name(&section.name);
    match handlers.iter().find(|h| h.synonyms.contains(&key.as_str())) {
        Some(handler) => {
            debug!("Generating section '{}'", section.name);
            (handler.generate)(section, ctx).trim().to_string()
        }
        None => {
            debug!("No generator for section '{}', substituting template", section.name);
            ctx.render(&section.content_template)
        }
    }
}

/// Built-in strategies for software, content, business and data analysis
pub fn builtin_strategies() -> Vec<Box<dyn DomainStrategy>> {
    vec![
        Box::new(SoftwareStrategy),
        Box::new(ContentStrategy),
        Box::new(BusinessStrategy),
        Box::new(DataAnalysisStrategy),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(_: &TemplateSection, _: &GenerationContext) -> String {
        "  generated  ".to_string()
    }

    const HANDLERS: &[SectionHandler] = &[SectionHandler {
        synonyms: &["codestructure", "structure"],
        generate: echo,
    }];

    #[test]
    fn test_normalize_section_name() {
        assert_eq!(normalize_section_name("Code Structure"), "codestructure");
        assert_eq!(normalize_section_name(" code_structure "), "codestructure");
        assert_eq!(normalize_section_name("Tone-Guidelines"), "toneguidelines");
    }

    #[test]
    fn test_dispatch_matches_synonym_and_trims() {
        let section = TemplateSection::new("Code Structure", 1, "unused");
        let ctx = GenerationContext::new("x");
        assert_eq!(dispatch(HANDLERS, &section, &ctx), "generated");
    }

    #[test]
    fn test_dispatch_fallback_brackets_missing_keys() {
        let section = TemplateSection::new("Deployment", 1, "Ship {objective} to {target}");
        let ctx = GenerationContext::new("the app");
        assert_eq!(dispatch(HANDLERS, &section, &ctx), "Ship the app to [target]");
    }

    #[test]
    fn test_builtin_strategies_cover_core_domains() {
        let domains: Vec<Domain> = builtin_strategies().iter().map(|s| s.domain()).collect();
        assert_eq!(
            domains,
            vec![Domain::Software, Domain::Content, Domain::Business, Domain::DataAnalysis]
        );
    }
}
