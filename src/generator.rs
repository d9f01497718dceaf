//! Prompt Generator
//!
//! Linear pipeline from objective text to a structured prompt:
//!
//! 1. Role detection (may fix the domain and strip the objective)
//! 2. Domain classification when the domain is still unknown
//! 3. Optional context extraction from the objective text
//! 4. Complexity analysis when no level was requested
//! 5. Template selection through the factory
//! 6. Conditional sections, then per-section strategy population
//! 7. Rendering, technique application and the best-practices block
//!
//! Templates are cloned out of the library, so concurrent generations never
//! observe each other's conditional sections.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::classifier::DomainClassifier;
use crate::complexity::ComplexityAnalyzer;
use crate::domains::DomainService;
use crate::extract::ContextExtractor;
use crate::templates::{PromptTemplate, TemplateFactory, TemplateLibrary, TemplateSection};
use crate::techniques::{SelectedTechnique, TechniqueLibrary, TechniqueSelector, technique_context};
use crate::types::{Domain, GenerationContext, Result};

// =============================================================================
// Request / Result
// =============================================================================

/// Everything a caller can pin down; unset fields are inferred
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub objective: String,
    pub domain: Option<Domain>,
    pub complexity: Option<u8>,
    pub components: Vec<String>,
    pub tags: Vec<String>,
    /// Techniques applied in order after rendering
    pub techniques: Vec<String>,
    /// Use this template instead of factory selection
    pub template: Option<String>,
    pub extras: BTreeMap<String, String>,
}

impl GenerationRequest {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            ..Default::default()
        }
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn complexity(mut self, complexity: u8) -> Self {
        self.complexity = Some(complexity);
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn technique(mut self, name: impl Into<String>) -> Self {
        self.techniques.push(name.into());
        self
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPrompt {
    pub prompt: String,
    pub template_name: String,
    pub domain: Domain,
    pub complexity: u8,
    /// Classifier confidence; absent when the domain was given or came from a role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub techniques_applied: Vec<String>,
    pub context: GenerationContext,
}

// =============================================================================
// Generator
// =============================================================================

pub struct PromptGenerator {
    classifier: DomainClassifier,
    analyzer: ComplexityAnalyzer,
    service: DomainService,
    factory: TemplateFactory,
    techniques: TechniqueLibrary,
    selector: TechniqueSelector,
    auto_techniques: bool,
    extract_context: bool,
}

impl PromptGenerator {
    pub fn new(factory: TemplateFactory, techniques: TechniqueLibrary) -> Self {
        Self {
            classifier: DomainClassifier::new(),
            analyzer: ComplexityAnalyzer::new(),
            service: DomainService::new(),
            factory,
            techniques,
            selector: TechniqueSelector::new(),
            auto_techniques: false,
            extract_context: false,
        }
    }

    /// Generator over the embedded templates and built-in techniques
    pub fn with_builtin() -> Result<Self> {
        let library = TemplateLibrary::with_builtin()?;
        Ok(Self::new(
            TemplateFactory::new(library),
            TechniqueLibrary::with_builtin(),
        ))
    }

    /// Let the selector choose techniques when a request names none
    pub fn with_auto_techniques(mut self, enabled: bool) -> Self {
        self.auto_techniques = enabled;
        self
    }

    /// Fill unset context extras from patterns in the objective text
    pub fn with_extraction(mut self, enabled: bool) -> Self {
        self.extract_context = enabled;
        self
    }

    pub fn with_selector(mut self, selector: TechniqueSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_service(mut self, service: DomainService) -> Self {
        self.service = service;
        self
    }

    pub fn factory(&self) -> &TemplateFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut TemplateFactory {
        &mut self.factory
    }

    pub fn techniques(&self) -> &TechniqueLibrary {
        &self.techniques
    }

    pub fn techniques_mut(&mut self) -> &mut TechniqueLibrary {
        &mut self.techniques
    }

    pub fn service(&self) -> &DomainService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut DomainService {
        &mut self.service
    }

    pub fn generate(&self, request: GenerationRequest) -> Result<GeneratedPrompt> {
        let mut ctx = GenerationContext::new(request.objective.trim());
        ctx.extras = request.extras;

        // Role phrase first: it strips the objective even when the domain is pinned
        let role = self.service.apply_role(&mut ctx);
        if let Some(domain) = request.domain {
            ctx.domain = Some(domain);
        }

        let domain = match ctx.domain {
            Some(domain) => domain,
            None => {
                let result = self.classifier.classify(&ctx.objective);
                info!(
                    "Classified objective as '{}' (confidence {:.2})",
                    result.domain, result.confidence
                );
                ctx.domain = Some(result.domain);
                ctx.domain_confidence = Some(result.confidence);
                result.domain
            }
        };

        if self.extract_context {
            let added = ContextExtractor::new().apply(&mut ctx, domain);
            if !added.is_empty() {
                debug!("Extracted context: {}", added.join(", "));
            }
        }

        let mut components = request.components;
        let complexity = match request.complexity {
            Some(level) => clamp_complexity(level),
            None => {
                let analysis = self.analyzer.analyze(&ctx.objective, domain);
                debug!("Complexity analysis: {}", analysis.explanation);
                if components.is_empty() {
                    components = analysis.components.clone();
                }
                let level = analysis.level;
                ctx.complexity_analysis = Some(analysis);
                level
            }
        };
        ctx.complexity = Some(complexity);
        ctx.components = components.clone();

        let template = match &request.template {
            Some(name) => self.factory.library().require(name)?.clone(),
            None => self
                .factory
                .create_template(domain, complexity, &components, &request.tags)?,
        };

        let mut prompt = self.populate(&template, &ctx);

        let selected = self.resolve_techniques(&request.techniques, &ctx, domain, complexity);
        let mut applied = Vec::with_capacity(selected.len());
        for technique in selected {
            match self
                .techniques
                .apply_technique(&technique.name, &prompt, &technique.params)
            {
                Ok(next) => {
                    prompt = next;
                    applied.push(technique.name);
                }
                Err(e) => warn!("Skipping technique '{}': {}", technique.name, e),
            }
        }

        prompt.push_str(&template.best_practices_block());

        info!(
            "Generated prompt with template '{}' ({} chars)",
            template.name,
            prompt.len()
        );

        Ok(GeneratedPrompt {
            prompt,
            template_name: template.name,
            domain,
            complexity,
            confidence: ctx.domain_confidence,
            role: role.map(|r| r.role),
            techniques_applied: applied,
            context: ctx,
        })
    }

    /// Rendered section blocks for a template under this context
    pub fn populate(&self, template: &PromptTemplate, ctx: &GenerationContext) -> String {
        let populated: Vec<(TemplateSection, String)> = template
            .with_conditional_sections(ctx)
            .into_iter()
            .map(|section| {
                let content = self.service.populate(&section, ctx);
                (section, content)
            })
            .collect();
        PromptTemplate::render(&populated)
    }

    /// Requested techniques with per-domain parameters, or the selector's
    /// choice when auto mode is on and none were requested
    fn resolve_techniques(
        &self,
        requested: &[String],
        ctx: &GenerationContext,
        domain: Domain,
        complexity: u8,
    ) -> Vec<SelectedTechnique> {
        if !requested.is_empty() {
            return requested
                .iter()
                .map(|name| SelectedTechnique {
                    name: name.clone(),
                    params: technique_context(name, domain, &ctx.objective),
                })
                .collect();
        }
        if !self.auto_techniques {
            return Vec::new();
        }
        let selected = self.selector.select_techniques(
            &self.techniques,
            &ctx.objective,
            Some(domain),
            None,
            Some(complexity),
        );
        info!(
            "Auto-selected techniques: {:?}",
            selected.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );
        selected
    }
}

fn clamp_complexity(level: u8) -> u8 {
    if !(1..=5).contains(&level) {
        warn!("Complexity {} outside 1..=5, clamping", level);
    }
    level.clamp(1, 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PromptError;

    fn generator() -> PromptGenerator {
        PromptGenerator::with_builtin().unwrap()
    }

    #[test]
    fn test_equal_template_scores_keep_registration_order() {
        // Basic and advanced software templates both cover level 3
        let result = generator()
            .generate(
                GenerationRequest::new("Build a REST API for a todo app")
                    .domain(Domain::Software)
                    .complexity(3),
            )
            .unwrap();
        assert_eq!(result.template_name, "software_basic");
    }

    #[test]
    fn test_generate_with_pinned_domain_and_complexity() {
        let result = generator()
            .generate(
                GenerationRequest::new("Build a REST API for a todo app")
                    .domain(Domain::Software)
                    .complexity(2),
            )
            .unwrap();
        assert_eq!(result.template_name, "software_basic");
        assert_eq!(result.domain, Domain::Software);
        assert!(result.confidence.is_none());
        assert!(result.prompt.starts_with("# Context\n"));
        assert!(result.prompt.contains("# Best Practices\n- "));
    }

    #[test]
    fn test_role_phrase_sets_domain_and_strips_objective() {
        let result = generator()
            .generate(GenerationRequest::new("As a data analyst, find churn patterns"))
            .unwrap();
        assert_eq!(result.domain, Domain::DataAnalysis);
        assert_eq!(result.role.as_deref(), Some("data analyst"));
        assert_eq!(result.context.objective, "find churn patterns");
        assert!(result.prompt.contains("find churn patterns"));
        assert!(!result.prompt.contains("As a data analyst"));
    }

    #[test]
    fn test_pinned_domain_wins_over_role() {
        let result = generator()
            .generate(
                GenerationRequest::new("Copywriter: plan the quarterly budget")
                    .domain(Domain::Business)
                    .complexity(2),
            )
            .unwrap();
        assert_eq!(result.domain, Domain::Business);
        assert_eq!(result.context.objective, "plan the quarterly budget");
    }

    #[test]
    fn test_conditional_section_triggered_by_extra() {
        let result = generator()
            .generate(
                GenerationRequest::new("Edit a product launch video for youtube")
                    .domain(Domain::Content)
                    .complexity(2)
                    .extra("content_type", "video"),
            )
            .unwrap();
        assert!(result.prompt.contains("# Video Editing\nVideo Editing Guidelines:"));
        assert!(result.prompt.contains("- Video Type: YouTube/Tutorial"));
    }

    #[test]
    fn test_requested_techniques_apply_in_order() {
        let result = generator()
            .generate(
                GenerationRequest::new("Design a caching layer")
                    .domain(Domain::Software)
                    .complexity(3)
                    .technique("role_prompting")
                    .technique("no_such_technique")
                    .technique("chain_of_thought"),
            )
            .unwrap();
        assert_eq!(
            result.techniques_applied,
            vec!["role_prompting".to_string(), "chain_of_thought".to_string()]
        );
        assert!(
            result
                .prompt
                .starts_with("You are an experienced software developer")
        );
    }

    #[test]
    fn test_auto_techniques_only_when_none_requested() {
        let auto = generator().with_auto_techniques(true);
        let result = auto
            .generate(GenerationRequest::new("Explain how to refactor a legacy module").domain(Domain::Software))
            .unwrap();
        assert!(!result.techniques_applied.is_empty());

        let manual = generator()
            .generate(GenerationRequest::new("Explain how to refactor a legacy module").domain(Domain::Software))
            .unwrap();
        assert!(manual.techniques_applied.is_empty());
    }

    #[test]
    fn test_no_template_is_typed_error() {
        let generator = PromptGenerator::new(
            TemplateFactory::new(TemplateLibrary::new()),
            TechniqueLibrary::with_builtin(),
        );
        let err = generator
            .generate(GenerationRequest::new("anything at all here").domain(Domain::Software))
            .unwrap_err();
        assert!(matches!(err, PromptError::NoTemplate { domain: Domain::Software, .. }));
    }

    #[test]
    fn test_named_template_and_complexity_clamp() {
        let result = generator()
            .generate(
                GenerationRequest::new("Plan a migration")
                    .template("general_task")
                    .complexity(9),
            )
            .unwrap();
        assert_eq!(result.template_name, "general_task");
        assert_eq!(result.complexity, 5);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = generator();
        let request = GenerationRequest::new("Write a blog post about remote work for executives");
        let a = generator.generate(request.clone()).unwrap();
        let b = generator.generate(request).unwrap();
        assert_eq!(a.prompt, b.prompt);
        assert_eq!(a.template_name, b.template_name);
    }

    #[test]
    fn test_extraction_fills_unset_extras() {
        let request = GenerationRequest::new(
            "Write a blog post about remote work for executives",
        )
        .domain(Domain::Content)
        .extra("tone", "playful");

        let plain = generator().generate(request.clone()).unwrap();
        assert!(plain.context.extra("audience").is_none());

        let extracted = generator()
            .with_extraction(true)
            .generate(request)
            .unwrap();
        let audience = extracted.context.extra("audience").unwrap().to_lowercase();
        assert!(audience.contains("executives"));
        assert_eq!(extracted.context.extra("tone"), Some("playful"));
    }
}
