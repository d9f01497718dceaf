//! Template Factory
//!
//! Multi-criteria template selection: domain fit, complexity range,
//! component coverage and tag overlap. General-domain templates compete
//! at a discount so specialised templates win ties.

use tracing::{debug, info};

use super::{PromptTemplate, TemplateLibrary};
use crate::constants::factory as weights;
use crate::types::{Domain, PromptError, Result};

/// Scoring weights for template selection
#[derive(Debug, Clone)]
pub struct FactoryWeights {
    pub domain_match: f64,
    pub domain_fallback: f64,
    pub complexity_match: f64,
    pub component_match: f64,
    pub tag_match: f64,
    pub out_of_range_penalty: f64,
    pub general_discount: f64,
}

impl Default for FactoryWeights {
    fn default() -> Self {
        Self {
            domain_match: weights::DOMAIN_MATCH,
            domain_fallback: weights::DOMAIN_FALLBACK,
            complexity_match: weights::COMPLEXITY_MATCH,
            component_match: weights::COMPONENT_MATCH,
            tag_match: weights::TAG_MATCH,
            out_of_range_penalty: weights::OUT_OF_RANGE_PENALTY,
            general_discount: weights::GENERAL_DISCOUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateFactory {
    library: TemplateLibrary,
    weights: FactoryWeights,
}

impl TemplateFactory {
    pub fn new(library: TemplateLibrary) -> Self {
        Self::with_weights(library, FactoryWeights::default())
    }

    pub fn with_weights(library: TemplateLibrary, weights: FactoryWeights) -> Self {
        Self { library, weights }
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut TemplateLibrary {
        &mut self.library
    }

    /// Score how well a template fits the request, clamped to [0, 1]
    pub fn score_template(
        &self,
        template: &PromptTemplate,
        domain: Domain,
        complexity: u8,
        components: &[String],
        tags: &[String],
    ) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;

        if template.domain == domain {
            score += w.domain_match;
        } else if template.domain.is_general() {
            score += w.domain_fallback;
        }

        if template.complexity_fits(complexity) {
            score += w.complexity_match;
        } else {
            let (min, max) = template.complexity_range;
            let midpoint = (f64::from(min) + f64::from(max)) / 2.0;
            score -= (f64::from(complexity) - midpoint).abs() * w.out_of_range_penalty;
        }

        if !components.is_empty() {
            let matched = components
                .iter()
                .filter(|c| {
                    template
                        .sections
                        .iter()
                        .any(|s| s.name.eq_ignore_ascii_case(c.trim()))
                })
                .count();
            score += w.component_match * matched as f64 / components.len() as f64;
        }

        if !tags.is_empty() && !template.tags.is_empty() {
            let matched = tags.iter().filter(|t| template.tags.contains(t)).count();
            score += w.tag_match * matched as f64 / tags.len() as f64;
        }

        score.clamp(0.0, 1.0)
    }

    /// Every candidate with its score, best first
    pub fn rank_templates(
        &self,
        domain: Domain,
        complexity: u8,
        components: &[String],
        tags: &[String],
    ) -> Vec<(f64, &PromptTemplate)> {
        let mut scored: Vec<(f64, &PromptTemplate)> = self
            .library
            .find_templates(domain, complexity)
            .into_iter()
            .map(|t| (self.score_template(t, domain, complexity, components, tags), t))
            .collect();

        if !domain.is_general() {
            scored.extend(
                self.library
                    .find_templates(Domain::General, complexity)
                    .into_iter()
                    .map(|t| {
                        let raw = self.score_template(t, domain, complexity, components, tags);
                        (raw * self.weights.general_discount, t)
                    }),
            );
        }

        // Stable: equal scores keep domain templates ahead of general ones
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (score, template) in &scored {
            debug!("Template '{}' scored {:.2}", template.name, score);
        }
        scored
    }

    /// Best template for the request, cloned so callers own their snapshot
    pub fn create_template(
        &self,
        domain: Domain,
        complexity: u8,
        components: &[String],
        tags: &[String],
    ) -> Result<PromptTemplate> {
        let ranked = self.rank_templates(domain, complexity, components, tags);
        let (score, template) = ranked
            .first()
            .ok_or(PromptError::NoTemplate { domain, complexity })?;

        info!("Selected template '{}' with score {:.2}", template.name, score);
        Ok((*template).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateSection;

    fn template(
        name: &str,
        domain: Domain,
        range: (u8, u8),
        sections: &[(&str, bool)],
        tags: &[&str],
    ) -> PromptTemplate {
        let mut t = PromptTemplate::new(name, domain, range).with_tags(tags);
        for (i, (section, required)) in sections.iter().enumerate() {
            let mut s = TemplateSection::new(*section, i as i32 + 1, "");
            s.required = *required;
            t.sections.push(s);
        }
        t
    }

    fn factory() -> TemplateFactory {
        let mut library = TemplateLibrary::new();
        library.register(template(
            "software_basic",
            Domain::Software,
            (1, 3),
            &[("requirements", true), ("implementation", true), ("testing", false)],
            &["basic", "coding"],
        ));
        library.register(template(
            "software_advanced",
            Domain::Software,
            (3, 5),
            &[
                ("architecture", true),
                ("implementation", true),
                ("testing", true),
                ("deployment", true),
            ],
            &["advanced", "architecture"],
        ));
        library.register(template(
            "content_basic",
            Domain::Content,
            (1, 4),
            &[("outline", true), ("content", true), ("seo", false)],
            &["writing", "seo"],
        ));
        library.register(template(
            "general_template",
            Domain::General,
            (1, 5),
            &[("description", true), ("steps", true)],
            &["general"],
        ));
        TemplateFactory::new(library)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn pick(domain: Domain, complexity: u8, components: &[&str], tags: &[&str]) -> String {
        factory()
            .create_template(domain, complexity, &strings(components), &strings(tags))
            .unwrap()
            .name
    }

    #[test]
    fn test_basic_selection() {
        assert_eq!(pick(Domain::Software, 2, &[], &[]), "software_basic");
        assert_eq!(pick(Domain::Software, 4, &[], &[]), "software_advanced");
        assert_eq!(pick(Domain::Content, 3, &[], &[]), "content_basic");
        assert_eq!(pick(Domain::General, 3, &[], &[]), "general_template");
    }

    #[test]
    fn test_component_selection() {
        assert_eq!(
            pick(Domain::Software, 4, &["architecture", "implementation", "testing"], &[]),
            "software_advanced"
        );
        assert_eq!(
            pick(Domain::Software, 2, &["requirements", "testing"], &[]),
            "software_basic"
        );
    }

    #[test]
    fn test_tag_selection() {
        assert_eq!(pick(Domain::Software, 4, &[], &["architecture"]), "software_advanced");
        assert_eq!(pick(Domain::Content, 2, &[], &["seo"]), "content_basic");
    }

    #[test]
    fn test_fallback_to_general() {
        assert_eq!(pick(Domain::Education, 3, &[], &[]), "general_template");
        assert_eq!(pick(Domain::Content, 5, &[], &[]), "general_template");
    }

    #[test]
    fn test_specialist_wins_equal_raw_score() {
        let mut library = TemplateLibrary::new();
        library.register(PromptTemplate::new("gen", Domain::General, (1, 5)));
        library.register(PromptTemplate::new("sw", Domain::Software, (1, 5)));
        let factory = TemplateFactory::new(library.clone());

        let general = factory.library().get("gen").unwrap();
        let specialist = factory.library().get("sw").unwrap();
        assert_eq!(
            factory.score_template(general, Domain::Software, 3, &[], &[]),
            factory.score_template(specialist, Domain::Software, 3, &[], &[])
        );

        let ranked = factory.rank_templates(Domain::Software, 3, &[], &[]);
        assert_eq!(ranked[0].1.name, "sw");
        assert_eq!(ranked[0].0, 1.0);
        assert!((ranked[1].0 - 0.9).abs() < 1e-9);

        // Without the discount the stable sort still keeps the specialist first
        let undiscounted = TemplateFactory::with_weights(
            library,
            FactoryWeights {
                general_discount: 1.0,
                ..FactoryWeights::default()
            },
        );
        let ranked = undiscounted.rank_templates(Domain::Software, 3, &[], &[]);
        assert_eq!(ranked[0].0, ranked[1].0);
        assert_eq!(ranked[0].1.name, "sw");
    }

    #[test]
    fn test_component_match_ignores_case() {
        let mut library = TemplateLibrary::new();
        library.register(template(
            "api_design",
            Domain::Business,
            (1, 5),
            &[("API", true)],
            &[],
        ));
        let factory = TemplateFactory::with_weights(
            library,
            FactoryWeights {
                complexity_match: 0.0,
                ..FactoryWeights::default()
            },
        );
        let t = factory.library().get("api_design").unwrap();

        let matched = factory.score_template(t, Domain::Content, 3, &strings(&[" api "]), &[]);
        assert!((matched - 0.6).abs() < 1e-9);
        assert_eq!(
            factory.score_template(t, Domain::Content, 3, &strings(&["database"]), &[]),
            0.0
        );
    }

    #[test]
    fn test_general_beats_out_of_range_specialist() {
        let mut library = TemplateLibrary::new();
        library.register(PromptTemplate::new("sw", Domain::Software, (3, 5)));
        library.register(PromptTemplate::new("gen", Domain::General, (1, 5)));
        let factory = TemplateFactory::new(library);

        let chosen = factory.create_template(Domain::Software, 2, &[], &[]).unwrap();
        assert_eq!(chosen.name, "gen");
    }

    #[test]
    fn test_no_template_error() {
        let mut library = TemplateLibrary::new();
        library.register(PromptTemplate::new("sw", Domain::Software, (3, 5)));
        let factory = TemplateFactory::new(library);

        let err = factory
            .create_template(Domain::Software, 1, &[], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            PromptError::NoTemplate {
                domain: Domain::Software,
                complexity: 1
            }
        ));
    }

    #[test]
    fn test_score_penalty_clamps_at_zero() {
        let factory = factory();
        let t = PromptTemplate::new("far", Domain::Creative, (1, 1));
        assert_eq!(factory.score_template(&t, Domain::Software, 5, &[], &[]), 0.0);
    }

    #[test]
    fn test_score_within_unit_interval() {
        let factory = factory();
        for t in factory.library().iter() {
            for c in 1..=5 {
                let s = factory.score_template(
                    t,
                    Domain::Software,
                    c,
                    &strings(&["testing"]),
                    &strings(&["coding"]),
                );
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn test_selection_respects_range() {
        let factory = factory();
        for domain in Domain::ALL {
            for c in 1..=5 {
                let t = factory.create_template(domain, c, &[], &[]).unwrap();
                assert!(t.complexity_fits(c) || t.domain.is_general());
            }
        }
    }
}
