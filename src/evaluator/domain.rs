//! Domain-specific evaluation factors.
//!
//! Software, content, business, creative and education prompts get five
//! extra factors each. Other domains fall back to the general evaluation.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

use super::{Comparison, Evaluation, LlmClient, PromptEvaluator, count_matches, rank_prompts};
use crate::constants::evaluation::{DOMAIN_SHARE, GENERAL_SHARE};
use crate::types::{Domain, Result, round2};

// =============================================================================
// Factor Tables
// =============================================================================

struct DomainFactor {
    name: &'static str,
    weight: f64,
    patterns: &'static [&'static str],
    /// Expected to appear often, so normalized against a larger divisor
    prevalent: bool,
    threshold: f64,
    suggestion: &'static str,
}

struct DomainProfile {
    domain: Domain,
    factors: &'static [DomainFactor],
}

const PROFILES: &[DomainProfile] = &[
    DomainProfile {
        domain: Domain::Software,
        factors: &[
            DomainFactor {
                name: "technical_accuracy",
                weight: 0.15,
                patterns: &[
                    r"(?i)\b(algorithm|function|method|class|object|variable|parameter|api|interface|module|library|framework|database|query|server|client|endpoint|request|response|authentication|authorization|token|json|xml|http|rest|graphql|sdk|api|git|cloud|container|docker|kubernetes)\b",
                    r"(?i)\b(typescript|javascript|python|java|c\+\+|c#|ruby|go|rust|php|swift|kotlin|scala|sql|nosql|mongodb|mysql|postgresql|oracle|redis)\b",
                ],
                prevalent: true,
                threshold: 0.6,
                suggestion: "Include more specific technical terms relevant to the programming language or technology stack",
            },
            DomainFactor {
                name: "implementation_detail",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(implement|implementation|code|pseudocode|function|method|class|interface|module|import|export|require|dependency)\b",
                    r"(?i)\b(for\s+loop|while\s+loop|if\s+statement|switch\s+statement|try\s+catch|exception|error\s+handling)\b",
                ],
                prevalent: false,
                threshold: 0.6,
                suggestion: "Provide more specific implementation guidance or code structure details",
            },
            DomainFactor {
                name: "security_consideration",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(security|authentication|authorization|encryption|password|hash|salt|token|jwt|oauth|xss|csrf|sql\s+injection|input\s+validation|sanitize|vulnerability|exploit|attack|firewall|protection)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Add security considerations relevant to this development task",
            },
            DomainFactor {
                name: "maintainability",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(maintainable|readability|readable|clean\s+code|refactor|technical\s+debt|documentation|comment|test|coverage|modularity|reusable|extensible|flexible|scalable|solid\s+principles)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Include guidelines for code maintainability and readability",
            },
            DomainFactor {
                name: "testability",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(test|unit\s+test|integration\s+test|e2e\s+test|mock|stub|fixture|assert|expect|should|testing\s+framework|jest|mocha|pytest|junit|testable|coverage|tdd|bdd)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Add testing requirements or considerations",
            },
        ],
    },
    DomainProfile {
        domain: Domain::Content,
        factors: &[
            DomainFactor {
                name: "audience_focus",
                weight: 0.15,
                patterns: &[
                    r"(?i)\b(audience|reader|viewer|customer|user|demographic|target\s+market|segment|persona|profile)\b",
                    r"(?i)\b(age\s+group|gender|interest|background|knowledge\s+level|expertise|beginner|intermediate|advanced|professional)\b",
                    r"(?i)\btarget\s+audience\b",
                ],
                prevalent: true,
                threshold: 0.6,
                suggestion: "Clearly define the target audience or reader persona",
            },
            DomainFactor {
                name: "tone_consistency",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(tone|voice|style|formal|informal|friendly|professional|conversational|authoritative|humorous|serious|inspirational|persuasive)\b",
                    r"(?i)\b(educational|casual|encouraging|informative)\b",
                ],
                prevalent: false,
                threshold: 0.6,
                suggestion: "Specify the desired tone and voice for the content",
            },
            DomainFactor {
                name: "engagement_potential",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(engage|engagement|compelling|captivating|interesting|attention|hook|draw\s+in|appeal|attract|clickbait|headline|title|subtitle)\b",
                    r"(?i)\b(call-to-action|visual|bullet points|headings)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Add elements to increase reader engagement (hooks, questions, etc.)",
            },
            DomainFactor {
                name: "content_structure",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(introduction|body|conclusion|paragraph|section|headline|subheading|outline|format|structure|organization|flow|transition)\b",
                    r"(?i)\b(list|bullet point|numbered|steps)\b",
                ],
                prevalent: false,
                threshold: 0.6,
                suggestion: "Provide more guidance on content structure and organization",
            },
            DomainFactor {
                name: "seo_consideration",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(seo|search\s+engine|keyword|meta\s+description|alt\s+text|tag|ranking|serp|organic|traffic|backlink|indexing|crawl|google|algorithm)\b",
                    r"(?i)\b(seo\s+keywords|keywords)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Include SEO requirements or keyword guidance",
            },
        ],
    },
    DomainProfile {
        domain: Domain::Business,
        factors: &[
            DomainFactor {
                name: "metric_orientation",
                weight: 0.15,
                patterns: &[
                    r"(?i)\b(kpi|metric|measure|roi|return\s+on\s+investment|revenue|profit|margin|cost|expense|budget|conversion\s+rate|ctr|cac|ltv|arpu|growth|performance|benchmark)\b",
                    r"(?i)\b(\d+%|market\s+share|percent|percentage)\b",
                    r"(?i)\b(\d+\s+year|\d+\s+month|\d+\s+quarter)\b",
                ],
                prevalent: true,
                threshold: 0.6,
                suggestion: "Define specific KPIs or success metrics for this business objective",
            },
            DomainFactor {
                name: "stakeholder_consideration",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(stakeholder|shareholder|investor|board|executive|management|employee|customer|client|partner|supplier|vendor|regulator|government)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Identify key stakeholders and their interests or requirements",
            },
            DomainFactor {
                name: "strategic_alignment",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(strategy|strategic|mission|vision|goal|objective|initiative|priority|roadmap|plan|alignment|direction|positioning|competitive\s+advantage)\b",
                ],
                prevalent: false,
                threshold: 0.6,
                suggestion: "Clarify how this aligns with broader strategic objectives",
            },
            DomainFactor {
                name: "feasibility",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(feasible|feasibility|viable|viability|practical|practicality|implementable|achievable|realistic|attainable|executable|doable)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Address implementation feasibility and resource requirements",
            },
            DomainFactor {
                name: "risk_assessment",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(risk|threat|vulnerability|mitigation|contingency|fallback|scenario|assessment|evaluation|analysis|swot|pestle|uncertainty|probability|impact)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Include potential risks and mitigation strategies",
            },
        ],
    },
    DomainProfile {
        domain: Domain::Creative,
        factors: &[
            DomainFactor {
                name: "originality",
                weight: 0.15,
                patterns: &[
                    r"(?i)\b(original|unique|innovative|novel|creative|imagination|inventive|fresh|new|distinctive|unconventional|perspective|angle|approach)\b",
                ],
                prevalent: true,
                threshold: 0.6,
                suggestion: "Emphasize uniqueness and originality requirements",
            },
            DomainFactor {
                name: "emotional_impact",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(emotion|feeling|mood|atmosphere|tone|evoke|inspire|move|touch|resonate|connect|impact|powerful|dramatic|tension|release|catharsis)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Specify the desired emotional response or impact",
            },
            DomainFactor {
                name: "sensory_detail",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(visual|auditory|tactile|taste|smell|sense|sensory|image|imagery|description|vivid|texture|color|sound|scene|setting|picture|visualize)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Request inclusion of sensory details (visual, auditory, etc.)",
            },
            DomainFactor {
                name: "audience_connection",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(relatable|connection|identify|relate|empathy|understand|recognition|familiar|universal|shared\s+experience|human\s+condition|resonance)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Focus on creating connection or resonance with the audience",
            },
            DomainFactor {
                name: "thematic_depth",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(theme|meaning|symbolism|metaphor|allegory|subtext|depth|layer|nuance|complexity|interpretation|analysis|message|significance)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Request deeper thematic exploration or symbolism",
            },
        ],
    },
    DomainProfile {
        domain: Domain::Education,
        factors: &[
            DomainFactor {
                name: "learning_objectives",
                weight: 0.15,
                patterns: &[
                    r"(?i)\b(learning\s+objective|learning\s+outcome|goal|skill|knowledge|understanding|comprehension|mastery|proficiency|competency|ability)\b",
                ],
                prevalent: true,
                threshold: 0.7,
                suggestion: "Clearly define specific learning objectives or outcomes",
            },
            DomainFactor {
                name: "assessment_strategies",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(assessment|evaluation|quiz|test|exam|project|assignment|rubric|criteria|feedback|measure|gauge|check|verify|validate)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Include assessment methods to evaluate learning",
            },
            DomainFactor {
                name: "engagement_techniques",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(engage|participation|interactive|activity|exercise|discussion|collaboration|group\s+work|hands-on|practical|application|game|gamification)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Add engaging activities or interactive elements",
            },
            DomainFactor {
                name: "scaffolding",
                weight: 0.10,
                patterns: &[
                    r"(?i)\b(scaffold|build\s+upon|foundation|prerequisite|prior\s+knowledge|progression|sequence|step-by-step|incremental|gradual|stage|phase|level)\b",
                ],
                prevalent: false,
                threshold: 0.5,
                suggestion: "Structure content with progressive complexity or scaffolding",
            },
            DomainFactor {
                name: "accessibility",
                weight: 0.05,
                patterns: &[
                    r"(?i)\b(accessible|accessibility|inclusive|diversity|accommodation|adaptation|differentiation|learning\s+style|need|support|assistance)\b",
                ],
                prevalent: false,
                threshold: 0.4,
                suggestion: "Consider accessibility and inclusive learning approaches",
            },
        ],
    },
];

/// Compiled patterns per domain, indexed like the profile's factors
static COMPILED: LazyLock<BTreeMap<Domain, Vec<Vec<Regex>>>> = LazyLock::new(|| {
    PROFILES
        .iter()
        .map(|profile| {
            let factors = profile
                .factors
                .iter()
                .map(|factor| {
                    factor
                        .patterns
                        .iter()
                        .map(|p| Regex::new(p).expect("valid domain evaluation regex"))
                        .collect()
                })
                .collect();
            (profile.domain, factors)
        })
        .collect()
});

fn profile_for(domain: Domain) -> Option<&'static DomainProfile> {
    PROFILES.iter().find(|p| p.domain == domain)
}

// =============================================================================
// Results
// =============================================================================

/// Score of one domain factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainFactorScore {
    pub name: &'static str,
    pub score: f64,
}

/// Domain-specific part of an evaluation
#[derive(Debug, Clone, Serialize)]
pub struct DomainEvaluation {
    pub domain: Domain,
    pub scores: Vec<DomainFactorScore>,
    pub domain_quality_score: f64,
    /// General share of the general score plus domain share of the domain score
    pub combined_quality_score: f64,
    pub suggestions: Vec<String>,
}

impl DomainEvaluation {
    pub fn score(&self, factor: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.name == factor).map(|s| s.score)
    }
}

fn score_domain(profile: &DomainProfile, text: &str) -> Vec<DomainFactorScore> {
    let total = text.split_whitespace().count() as f64;
    let compiled = COMPILED.get(&profile.domain);

    profile
        .factors
        .iter()
        .enumerate()
        .map(|(i, factor)| {
            let score = match compiled.and_then(|c| c.get(i)) {
                Some(patterns) if total > 0.0 => {
                    let divisor = if factor.prevalent {
                        (total * 0.03).max(5.0)
                    } else {
                        (total * 0.02).max(3.0)
                    };
                    (count_matches(patterns, text) as f64 / divisor).min(1.0)
                }
                _ => 0.0,
            };
            DomainFactorScore {
                name: factor.name,
                score,
            }
        })
        .collect()
}

// =============================================================================
// Evaluator
// =============================================================================

/// Prompt evaluator extended with per-domain quality factors
#[derive(Default)]
pub struct DomainSpecificEvaluator {
    base: PromptEvaluator,
    domain: Option<Domain>,
}

impl DomainSpecificEvaluator {
    pub fn new(domain: Option<Domain>) -> Self {
        Self {
            base: PromptEvaluator::new(),
            domain,
        }
    }

    pub fn with_client(mut self, client: Box<dyn LlmClient>) -> Self {
        self.base = self.base.with_client(client);
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.base = self.base.with_samples(samples);
        self
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// Whether the domain has its own evaluation factors
    pub fn supports(domain: Domain) -> bool {
        profile_for(domain).is_some()
    }

    /// General evaluation plus domain factors when the domain has any
    pub fn evaluate(&self, prompt: &str) -> Evaluation {
        let mut evaluation = self.base.evaluate(prompt);
        let Some(profile) = self.domain.and_then(profile_for) else {
            return evaluation;
        };

        let scores = score_domain(profile, prompt.trim());
        let raw: f64 = profile
            .factors
            .iter()
            .zip(&scores)
            .map(|(factor, s)| s.score * factor.weight)
            .sum();
        let combined = evaluation.quality_score * GENERAL_SHARE + raw * DOMAIN_SHARE;

        let suggestions = profile
            .factors
            .iter()
            .zip(&scores)
            .filter(|(factor, s)| s.score < factor.threshold)
            .map(|(factor, _)| factor.suggestion.to_string())
            .collect();

        debug!(
            domain = %profile.domain,
            domain_quality = round2(raw),
            "Applied domain evaluation"
        );

        evaluation.domain = Some(DomainEvaluation {
            domain: profile.domain,
            scores,
            domain_quality_score: round2(raw),
            combined_quality_score: round2(combined),
            suggestions,
        });
        evaluation
    }

    /// Compare prompts using this evaluator
    pub fn compare_prompts<S: AsRef<str>>(&self, prompts: &[S]) -> Result<Comparison> {
        rank_prompts(prompts, |p| self.evaluate(p))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SOFTWARE_PROMPT: &str = "Implement a Python REST API endpoint with JWT authentication. \
        Write unit test coverage for every function and keep clean code documentation \
        so the module stays maintainable.";

    #[test]
    fn test_profiles_have_five_factors() {
        for profile in PROFILES {
            assert_eq!(profile.factors.len(), 5, "{}", profile.domain);
            assert_eq!(COMPILED[&profile.domain].len(), 5);
        }
    }

    #[test]
    fn test_supported_domains() {
        assert!(DomainSpecificEvaluator::supports(Domain::Software));
        assert!(DomainSpecificEvaluator::supports(Domain::Education));
        assert!(!DomainSpecificEvaluator::supports(Domain::DataAnalysis));
        assert!(!DomainSpecificEvaluator::supports(Domain::General));
    }

    #[test]
    fn test_software_factors() {
        let evaluation =
            DomainSpecificEvaluator::new(Some(Domain::Software)).evaluate(SOFTWARE_PROMPT);
        let domain = evaluation.domain.as_ref().unwrap();

        assert_eq!(domain.domain, Domain::Software);
        for factor in [
            "technical_accuracy",
            "implementation_detail",
            "security_consideration",
            "maintainability",
            "testability",
        ] {
            assert!(domain.score(factor).unwrap() > 0.0, "{factor}");
        }

        let expected =
            evaluation.quality_score * GENERAL_SHARE + domain.domain_quality_score * DOMAIN_SHARE;
        assert!((domain.combined_quality_score - expected).abs() < 0.011);
        assert_eq!(evaluation.overall_score(), domain.combined_quality_score);
    }

    #[test]
    fn test_unsupported_domain_is_general_only() {
        let evaluation =
            DomainSpecificEvaluator::new(Some(Domain::General)).evaluate(SOFTWARE_PROMPT);
        assert!(evaluation.domain.is_none());
        assert_eq!(evaluation.overall_score(), evaluation.quality_score);

        let none = DomainSpecificEvaluator::new(None).evaluate(SOFTWARE_PROMPT);
        assert!(none.domain.is_none());
    }

    #[test]
    fn test_domain_suggestions() {
        let evaluation =
            DomainSpecificEvaluator::new(Some(Domain::Education)).evaluate("Teach fractions");
        let domain = evaluation.domain.unwrap();
        assert!(domain.scores.iter().all(|s| s.score == 0.0));
        assert_eq!(domain.suggestions.len(), 5);
        assert_eq!(
            domain.suggestions[0],
            "Clearly define specific learning objectives or outcomes"
        );
        assert_eq!(domain.domain_quality_score, 0.0);
    }

    #[test]
    fn test_empty_prompt_domain_scores_zero() {
        let evaluation = DomainSpecificEvaluator::new(Some(Domain::Business)).evaluate("");
        let domain = evaluation.domain.unwrap();
        assert!(domain.scores.iter().all(|s| s.score == 0.0));
        assert_eq!(domain.combined_quality_score, 0.0);
    }

    #[test]
    fn test_metric_patterns() {
        let evaluation = DomainSpecificEvaluator::new(Some(Domain::Business))
            .evaluate("Grow revenue 20% within 6 month while the board tracks ROI and profit");
        let domain = evaluation.domain.unwrap();
        // revenue, ROI, profit, 6 month
        assert!(domain.score("metric_orientation").unwrap() >= 0.8);
        assert!(domain.score("stakeholder_consideration").unwrap() > 0.0);
    }

    #[test]
    fn test_compare_with_domain() {
        let evaluator = DomainSpecificEvaluator::new(Some(Domain::Software));
        let comparison = evaluator
            .compare_prompts(&["fix it", SOFTWARE_PROMPT])
            .unwrap();
        assert_eq!(comparison.best_prompt_index, 1);
        assert!(comparison.evaluations[0].evaluation.domain.is_some());
    }
}
