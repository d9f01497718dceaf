//! Domain Classification
//!
//! Maps free text to a `(domain, confidence)` pair using weighted keyword
//! counts and a fixed tie-break ladder.
//!
//! ## Pipeline
//! 1. Preprocess: lowercase, collapse whitespace, synonym normalization
//! 2. Extract features: weighted whole-word keyword counts per domain
//! 3. Score: blend of density and relative strength, clamped to [0, 1]
//! 4. Determine: near-tied candidates go through the priority ladder
//!
//! Feature extraction and scoring sit behind [`FeatureScorer`] so the
//! selection step can run over any scorer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::constants::classifier as tuning;
use crate::types::Domain;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Applied in order as plain substring replacement
const SYNONYMS: &[(&str, &str)] = &[
    ("metrics", "metric"),
    ("analyze", "analysis"),
    ("analyzing", "analysis"),
    ("visualize", "visualization"),
    ("visualizing", "visualization"),
    ("document", "documentation"),
    ("documenting", "documentation"),
];

// =============================================================================
// Keyword Registry
// =============================================================================

struct KeywordTable {
    domain: Domain,
    keywords: &'static [(&'static str, f64)],
}

const KEYWORD_REGISTRY: &[KeywordTable] = &[
    KeywordTable {
        domain: Domain::Software,
        keywords: &[
            ("code", 1.0),
            ("programming", 1.0),
            ("algorithm", 0.9),
            ("function", 0.8),
            ("class", 0.8),
            ("api", 0.9),
            ("database", 0.8),
            ("framework", 0.9),
            ("software", 1.0),
            ("development", 0.8),
            ("application", 0.8),
            ("unit test", 1.0),
            ("debugging", 1.0),
            ("implementation", 0.8),
            ("code review", 1.0),
            ("refactor", 1.0),
            ("optimization", 0.8),
            ("git", 0.9),
            ("repository", 0.8),
            ("backend", 0.9),
            ("frontend", 0.9),
            ("web", 0.8),
            ("python", 1.0),
            ("react", 1.0),
            ("flask", 1.0),
            ("component", 0.8),
            ("rest", 0.9),
            ("authentication", 0.8),
        ],
    },
    KeywordTable {
        domain: Domain::Content,
        keywords: &[
            ("article", 1.0),
            ("blog post", 1.0),
            ("content", 0.9),
            ("writing", 1.0),
            ("editorial", 1.0),
            ("story", 0.9),
            ("newsletter", 1.0),
            ("social media", 1.0),
            ("marketing copy", 1.0),
            ("creative", 0.8),
            ("engaging", 0.8),
            ("seo", 0.9),
            ("headline", 1.0),
            ("content strategy", 1.0),
            ("content calendar", 1.0),
            ("blog", 1.0),
            ("copywriting", 1.0),
            ("youtube", 0.9),
            ("video script", 1.0),
            ("email", 0.8),
            ("subscribers", 0.9),
            ("post", 0.8),
            ("write", 0.9),
            ("edit", 0.8),
        ],
    },
    KeywordTable {
        domain: Domain::Business,
        keywords: &[
            ("business plan", 1.2),
            ("market analysis", 1.2),
            ("strategy", 1.0),
            ("sales", 1.0),
            ("marketing strategy", 1.2),
            ("investor", 1.2),
            ("startup", 1.2),
            ("revenue", 1.2),
            ("business model", 1.2),
            ("competitive analysis", 1.2),
            ("market research", 1.2),
            ("pitch deck", 1.2),
            ("business development", 1.2),
            ("growth strategy", 1.2),
            ("business metrics", 1.2),
            ("stakeholder", 1.2),
            ("business case", 1.2),
            ("industry", 1.0),
            ("trends", 0.8),
            ("q4", 0.8),
            ("business", 1.2),
            ("market", 1.0),
            ("sales strategy", 1.2),
        ],
    },
    KeywordTable {
        domain: Domain::DataAnalysis,
        keywords: &[
            ("data analysis", 1.2),
            ("analytics", 1.2),
            ("dashboard", 1.0),
            ("metrics", 1.0),
            ("visualization", 1.0),
            ("dataset", 1.2),
            ("statistical", 1.2),
            ("predictive model", 1.2),
            ("machine learning", 1.2),
            ("data science", 1.2),
            ("data mining", 1.2),
            ("regression", 1.2),
            ("correlation", 1.2),
            ("data cleaning", 1.2),
            ("data pipeline", 1.2),
            ("data visualization", 1.2),
            ("data transformation", 1.2),
            ("data insights", 1.2),
            ("data trends", 1.2),
            ("patterns", 1.0),
            ("behavior", 0.9),
            ("traffic", 0.9),
            ("churn", 1.0),
            ("sales metrics", 1.2),
            ("analyze", 1.0),
            ("analysis", 1.0),
            ("customer", 0.9),
            ("customer behavior", 1.2),
            ("website traffic", 1.2),
        ],
    },
    KeywordTable {
        domain: Domain::TechnicalDocumentation,
        keywords: &[
            ("documentation", 1.2),
            ("technical spec", 1.2),
            ("api reference", 1.2),
            ("user guide", 1.2),
            ("technical manual", 1.2),
            ("system architecture", 1.2),
            ("technical requirements", 1.2),
            ("specification document", 1.2),
            ("technical design", 1.2),
            ("integration guide", 1.2),
            ("technical documentation", 1.2),
            ("implementation guide", 1.2),
            ("developer guide", 1.2),
            ("technical overview", 1.2),
            ("architecture document", 1.2),
            ("technical reference", 1.2),
            ("endpoints", 1.0),
            ("manual", 1.0),
            ("architecture", 1.0),
            ("specifications", 1.2),
            ("features", 0.9),
            ("document", 1.0),
            ("api", 1.0),
            ("guide", 1.0),
            ("docs", 1.2),
            ("spec", 1.2),
        ],
    },
];

// =============================================================================
// Tie-break Ladder
// =============================================================================

/// Checked first when business and data_analysis are near-tied
const BUSINESS_FIRST_MARKERS: &[&str] = &[
    "business plan",
    "market analysis",
    "investor",
    "pitch deck",
    "stakeholder",
];

const DATA_FIRST_MARKERS: &[&str] = &[
    "data analysis",
    "analytics",
    "dashboard",
    "visualization",
    "patterns",
];

/// Unordered domain pair, the domain chosen when a marker is present, and the
/// domain chosen otherwise
struct PriorityRule {
    pair: (Domain, Domain),
    markers: &'static [&'static str],
    if_present: Domain,
    otherwise: Domain,
}

const PRIORITY_LADDER: &[PriorityRule] = &[
    PriorityRule {
        pair: (Domain::TechnicalDocumentation, Domain::Software),
        markers: &[
            "documentation",
            "manual",
            "guide",
            "spec",
            "reference",
            "architecture",
            "document",
        ],
        if_present: Domain::TechnicalDocumentation,
        otherwise: Domain::Software,
    },
    PriorityRule {
        pair: (Domain::DataAnalysis, Domain::Business),
        markers: &[
            "analysis",
            "analytics",
            "metrics",
            "data",
            "dashboard",
            "visualization",
            "analyze",
            "patterns",
            "behavior",
            "churn",
            "customer behavior",
            "website traffic",
        ],
        if_present: Domain::DataAnalysis,
        otherwise: Domain::Business,
    },
    PriorityRule {
        pair: (Domain::Business, Domain::Content),
        markers: &[
            "business plan",
            "market",
            "sales",
            "strategy",
            "investor",
            "startup",
            "revenue",
            "business model",
            "pitch deck",
            "stakeholder",
        ],
        if_present: Domain::Business,
        otherwise: Domain::Content,
    },
];

impl PriorityRule {
    fn matches(&self, a: Domain, b: Domain) -> bool {
        self.pair == (a, b) || self.pair == (b, a)
    }

    fn resolve(&self, text: &str) -> Domain {
        if contains_any(text, self.markers) {
            self.if_present
        } else {
            self.otherwise
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

// =============================================================================
// Feature Scoring
// =============================================================================

/// Features extracted from preprocessed text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    /// Weighted keyword count per domain
    pub keyword_counts: BTreeMap<Domain, f64>,
    pub total_words: usize,
}

/// Pluggable feature extraction and scoring
pub trait FeatureScorer {
    fn extract_features(&self, text: &str) -> Features;

    /// Per-domain scores in [0, 1]
    fn score(&self, features: &Features) -> BTreeMap<Domain, f64>;
}

/// Weighted whole-word keyword scorer
pub struct KeywordScorer {
    tables: Vec<(Domain, Vec<(Regex, f64)>)>,
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordScorer {
    pub fn new() -> Self {
        let tables = KEYWORD_REGISTRY
            .iter()
            .map(|table| {
                let patterns = table
                    .keywords
                    .iter()
                    .filter_map(|(kw, weight)| {
                        Regex::new(&format!(r"\b{}\b", regex::escape(kw)))
                            .ok()
                            .map(|re| (re, *weight))
                    })
                    .collect();
                (table.domain, patterns)
            })
            .collect();
        Self { tables }
    }
}

impl FeatureScorer for KeywordScorer {
    fn extract_features(&self, text: &str) -> Features {
        let keyword_counts = self
            .tables
            .iter()
            .map(|(domain, patterns)| {
                let count = patterns
                    .iter()
                    .map(|(re, weight)| re.find_iter(text).count() as f64 * weight)
                    .sum();
                (*domain, count)
            })
            .collect();

        Features {
            keyword_counts,
            total_words: text.split_whitespace().count(),
        }
    }

    fn score(&self, features: &Features) -> BTreeMap<Domain, f64> {
        let max_count = features
            .keyword_counts
            .values()
            .copied()
            .fold(0.0_f64, f64::max);

        let scores: BTreeMap<Domain, f64> = features
            .keyword_counts
            .iter()
            .map(|(domain, &count)| {
                let base = if features.total_words > 0 {
                    count / features.total_words as f64
                } else {
                    0.0
                };
                let relative = if max_count > 0.0 { count / max_count } else { 0.0 };
                let blended = tuning::BASE_WEIGHT * base + tuning::RELATIVE_WEIGHT * relative;
                (*domain, (blended * tuning::SCORE_SCALE).min(1.0))
            })
            .collect();

        let best = scores.values().copied().fold(0.0_f64, f64::max);
        if best < tuning::MIN_CONFIDENCE {
            return BTreeMap::from([(Domain::General, tuning::GENERAL_FALLBACK_CONFIDENCE)]);
        }
        scores
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Domain and confidence for one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub domain: Domain,
    /// Always within [0, 1]
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(domain: Domain, confidence: f64) -> Self {
        Self { domain, confidence }
    }
}

/// Lowercase, collapse whitespace and normalize synonyms
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut processed = WHITESPACE_RE.replace_all(lowered.trim(), " ").into_owned();
    for (from, to) in SYNONYMS {
        processed = processed.replace(from, to);
    }
    processed
}

/// Classify text with any scorer
pub fn classify(scorer: &impl FeatureScorer, text: &str) -> ClassificationResult {
    if text.trim().is_empty() {
        return ClassificationResult::new(Domain::General, 0.0);
    }

    let processed = preprocess(text);
    let features = scorer.extract_features(&processed);
    let scores = scorer.score(&features);
    debug!("Domain scores: {:?}", scores);

    let result = determine_domain(&scores, &processed);
    info!(
        "Classified objective as domain '{}' with confidence {:.2}",
        result.domain, result.confidence
    );
    result
}

fn determine_domain(scores: &BTreeMap<Domain, f64>, text: &str) -> ClassificationResult {
    let max_score = scores.values().copied().fold(0.0_f64, f64::max);
    if max_score == 0.0 {
        return ClassificationResult::new(Domain::General, 0.0);
    }

    let threshold = max_score * tuning::CANDIDATE_THRESHOLD;
    let mut top: Vec<(Domain, f64)> = scores
        .iter()
        .filter(|(_, s)| **s >= threshold)
        .map(|(d, s)| (*d, *s))
        .collect();

    if top.len() == 1 {
        return ClassificationResult::new(top[0].0, top[0].1);
    }

    top.sort_by(|a, b| b.1.total_cmp(&a.1));
    let (first, first_score) = top[0];
    let score_of = |d: Domain| scores.get(&d).copied().unwrap_or(0.0);

    if let Some(&(second, second_score)) = top.get(1)
        && second_score >= first_score * tuning::TIE_RATIO
    {
        let pair_is = |a: Domain, b: Domain| (first, second) == (a, b) || (first, second) == (b, a);

        if pair_is(Domain::Business, Domain::DataAnalysis) {
            if contains_any(text, BUSINESS_FIRST_MARKERS) {
                return ClassificationResult::new(Domain::Business, score_of(Domain::Business));
            }
            if contains_any(text, DATA_FIRST_MARKERS) {
                return ClassificationResult::new(
                    Domain::DataAnalysis,
                    score_of(Domain::DataAnalysis),
                );
            }
        }

        if let Some(rule) = PRIORITY_LADDER.iter().find(|r| r.matches(first, second)) {
            let chosen = rule.resolve(text);
            debug!("Tie between {} and {} resolved to {}", first, second, chosen);
            return ClassificationResult::new(chosen, score_of(chosen));
        }
    }

    ClassificationResult::new(first, first_score)
}

/// Keyword classifier over a pluggable scorer
pub struct DomainClassifier<S: FeatureScorer = KeywordScorer> {
    scorer: S,
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainClassifier {
    pub fn new() -> Self {
        Self {
            scorer: KeywordScorer::new(),
        }
    }
}

impl<S: FeatureScorer> DomainClassifier<S> {
    pub fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        classify(&self.scorer, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify_text(text: &str) -> ClassificationResult {
        DomainClassifier::new().classify(text)
    }

    #[test]
    fn test_empty_input_is_general_zero() {
        assert_eq!(classify_text(""), ClassificationResult::new(Domain::General, 0.0));
        assert_eq!(
            classify_text("   \n\t "),
            ClassificationResult::new(Domain::General, 0.0)
        );
    }

    #[test]
    fn test_software_objective() {
        let result = classify_text("Create a Python REST API with JWT authentication");
        assert_eq!(result.domain, Domain::Software);
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_content_objective() {
        let result = classify_text("Write a blog post about remote work for our newsletter");
        assert_eq!(result.domain, Domain::Content);
    }

    #[test]
    fn test_business_objective() {
        let result = classify_text("Draft a business plan and pitch deck for investor meetings");
        assert_eq!(result.domain, Domain::Business);
    }

    #[test]
    fn test_data_analysis_objective() {
        let result = classify_text("Build a dashboard to analyze customer churn patterns");
        assert_eq!(result.domain, Domain::DataAnalysis);
    }

    #[test]
    fn test_low_signal_falls_back_to_general() {
        let result = classify_text("Plan a birthday party for my grandmother next weekend");
        assert_eq!(result, ClassificationResult::new(Domain::General, 0.1));
    }

    #[test]
    fn test_preprocess_normalizes() {
        assert_eq!(preprocess("  Analyze   the METRICS "), "analysis the metric");
        assert_eq!(preprocess("document it"), "documentation it");
    }

    #[test]
    fn test_tie_break_prefers_documentation() {
        // Software and documentation keywords near-tied; "guide" decides
        let scores = BTreeMap::from([
            (Domain::Software, 0.9),
            (Domain::TechnicalDocumentation, 0.85),
        ]);
        let result = determine_domain(&scores, "write a user guide for the api");
        assert_eq!(result.domain, Domain::TechnicalDocumentation);
        assert_eq!(result.confidence, 0.85);

        let result = determine_domain(&scores, "build the api");
        assert_eq!(result.domain, Domain::Software);
    }

    #[test]
    fn test_business_data_pre_ladder() {
        let scores = BTreeMap::from([(Domain::Business, 1.0), (Domain::DataAnalysis, 0.9)]);
        let result = determine_domain(&scores, "prepare investor analytics");
        assert_eq!(result.domain, Domain::Business);

        let result = determine_domain(&scores, "build analytics for sales");
        assert_eq!(result.domain, Domain::DataAnalysis);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_business_content_ladder() {
        let scores = BTreeMap::from([(Domain::Content, 1.0), (Domain::Business, 0.9)]);
        assert_eq!(
            determine_domain(&scores, "newsletter about revenue").domain,
            Domain::Business
        );
        assert_eq!(
            determine_domain(&scores, "newsletter about gardening").domain,
            Domain::Content
        );
    }

    #[test]
    fn test_untied_leader_wins() {
        let scores = BTreeMap::from([(Domain::Content, 1.0), (Domain::Business, 0.81)]);
        let result = determine_domain(&scores, "revenue");
        assert_eq!(result.domain, Domain::Content);
    }

    #[test]
    fn test_custom_scorer() {
        struct Fixed;
        impl FeatureScorer for Fixed {
            fn extract_features(&self, _text: &str) -> Features {
                Features::default()
            }
            fn score(&self, _features: &Features) -> BTreeMap<Domain, f64> {
                BTreeMap::from([(Domain::Education, 0.7)])
            }
        }
        let result = DomainClassifier::with_scorer(Fixed).classify("anything");
        assert_eq!(result, ClassificationResult::new(Domain::Education, 0.7));
    }

    proptest! {
        #[test]
        fn prop_confidence_bounded(text in ".{0,200}") {
            let result = classify_text(&text);
            prop_assert!((0.0..=1.0).contains(&result.confidence));
        }

        #[test]
        fn prop_deterministic(text in "[a-z ]{0,120}") {
            prop_assert_eq!(classify_text(&text), classify_text(&text));
        }
    }
}
