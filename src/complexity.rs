//! Complexity Analysis
//!
//! Estimates a 1–5 complexity level for an objective from technical terms,
//! components, dependencies and weighted complexity indicators.
//!
//! Level is the floor 1 for any degenerate input and never exceeds 5.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

use crate::constants::complexity as tuning;
use crate::types::Domain;

static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]").expect("valid sentence regex"));

// =============================================================================
// Term Tables
// =============================================================================

const SOFTWARE_TERMS: &[&str] = &[
    "api",
    "authentication",
    "database",
    "optimization",
    "endpoint",
    "middleware",
    "cache",
    "server",
    "client",
    "interface",
    "microservices",
    "scalability",
    "load balancing",
    "monitoring",
    "deployment",
    "testing",
    "integration",
];

const CONTENT_TERMS: &[&str] = &[
    "segmentation",
    "engagement",
    "analytics",
    "content",
    "audience",
    "strategy",
    "campaign",
    "metrics",
    "seo",
    "taxonomy",
    "editorial",
    "conversion",
    "retention",
];

const BUSINESS_TERMS: &[&str] = &[
    "revenue",
    "conversion",
    "acquisition",
    "retention",
    "optimization",
    "strategy",
    "analytics",
    "market analysis",
    "roi",
    "valuation",
    "liquidity",
    "regulatory",
];

const DATA_ANALYSIS_TERMS: &[&str] = &[
    "correlation",
    "regression",
    "visualization",
    "analytics",
    "preprocessing",
    "clustering",
    "classification",
    "prediction",
    "data pipeline",
    "raw data",
    "dashboard",
];

/// Terms counted in every domain
const COMMON_TERMS: &[&str] = &[
    "analysis",
    "optimization",
    "monitoring",
    "testing",
    "validation",
    "integration",
    "deployment",
    "metrics",
    "analytics",
];

const COMPONENT_INDICATORS: &[&str] = &[
    "system",
    "module",
    "service",
    "component",
    "interface",
    "database",
    "api",
    "dashboard",
    "pipeline",
    "server",
    "schema",
    "endpoint",
    "frontend",
    "backend",
    "test",
    "form",
    "report",
    "analysis",
    "visualization",
];

const ACTION_WORDS: &[&str] = &[
    "create",
    "implement",
    "design",
    "develop",
    "build",
    "write",
    "deploy",
    "analyze",
    "generate",
    "process",
];

const DEPENDENCY_INDICATORS: &[&str] = &[
    "requires",
    "depends on",
    "needed for",
    "before",
    "after",
    "input to",
    "output from",
    "uses",
    "based on",
    "following",
];

/// Weighted complexity indicators, matched as substrings
const COMPLEXITY_INDICATORS: &[(&str, f64)] = &[
    // High
    ("distributed", 0.8),
    ("scalable", 0.8),
    ("microservices", 0.8),
    ("cloud-native", 0.8),
    ("event-driven", 0.8),
    ("disaster recovery", 0.8),
    ("automated deployment", 0.8),
    // Medium
    ("real-time", 0.6),
    ("caching", 0.6),
    ("monitoring", 0.6),
    ("analytics", 0.6),
    ("integration", 0.6),
    ("authentication", 0.6),
    ("validation", 0.6),
    // Base
    ("api", 0.4),
    ("database", 0.4),
    ("form", 0.4),
    ("testing", 0.4),
];

const HIGH_COMPLEXITY_KEYWORDS: &[&str] = &["distributed", "scalable", "microservices"];

const SIMPLE_INDICATORS: &[&str] = &["hello world", "simple", "basic", "quick", "easy"];

fn domain_terms(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Software => SOFTWARE_TERMS,
        Domain::Content => CONTENT_TERMS,
        Domain::Business => BUSINESS_TERMS,
        Domain::DataAnalysis => DATA_ANALYSIS_TERMS,
        _ => &[],
    }
}

// =============================================================================
// Analysis Result
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    /// Complexity level in 1..=5
    pub level: u8,
    pub technical_terms: Vec<String>,
    pub components: Vec<String>,
    /// Directed (from, to) pairs in discovery order
    pub dependencies: Vec<(String, String)>,
    pub explanation: String,
}

impl ComplexityAnalysis {
    /// Result for empty or degenerate input
    pub fn empty() -> Self {
        Self {
            level: 1,
            technical_terms: Vec::new(),
            components: Vec::new(),
            dependencies: Vec::new(),
            explanation: "Invalid or empty objective.".to_string(),
        }
    }
}

// =============================================================================
// Analyzer
// =============================================================================

#[derive(Debug, Default, Clone)]
pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, objective: &str, domain: Domain) -> ComplexityAnalysis {
        let text = objective.trim().to_lowercase();
        let word_count = text.split_whitespace().count();

        if text.is_empty() || !text.chars().any(char::is_alphabetic) || word_count <= tuning::MIN_WORDS
        {
            return ComplexityAnalysis::empty();
        }

        let terms = identify_technical_terms(&text, domain);
        let components = identify_components(&text);
        let dependencies = identify_dependencies(&text, &components);

        let mut score = tuning::BASE_SCORE
            + terms.len() as f64 * tuning::TERM_WEIGHT
            + components.len() as f64 * tuning::COMPONENT_WEIGHT
            + dependencies.len() as f64 * tuning::DEPENDENCY_WEIGHT;

        score += indicator_score(&text);

        if dependencies.len() > 2 {
            score += tuning::MANY_DEPENDENCIES_BONUS;
        }

        let high_complexity = contains_any(&text, HIGH_COMPLEXITY_KEYWORDS);
        if word_count > tuning::LONG_OBJECTIVE_WORDS {
            score += if high_complexity {
                tuning::LONG_HIGH_COMPLEXITY_BONUS
            } else {
                tuning::LONG_OBJECTIVE_BONUS
            };
        }

        if contains_any(&text, SIMPLE_INDICATORS) {
            score = score.min(tuning::SIMPLE_CAP);
        }

        let mut level = level_for_score(score);

        if text.contains("microservices") && text.contains("distributed") {
            level = level.max(4);
        }
        if text.contains("cloud-native") && text.contains("scalable") {
            level = 5;
        }
        if terms.len() >= 4 && components.len() >= 3 {
            level = level.max(4);
        }
        // "create X with Y" stays moderate unless it names a high-complexity keyword
        if text.contains("create") && text.contains("with") && level > 3 && !high_complexity {
            level = 3;
        }

        debug!(
            "Complexity score {:.2} -> level {} ({} terms, {} components, {} dependencies)",
            score,
            level,
            terms.len(),
            components.len(),
            dependencies.len()
        );

        ComplexityAnalysis {
            level,
            explanation: explanation(level, terms.len(), components.len(), dependencies.len()),
            technical_terms: terms.into_iter().collect(),
            components: components.into_iter().collect(),
            dependencies,
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn level_for_score(score: f64) -> u8 {
    tuning::LEVEL_THRESHOLDS
        .iter()
        .position(|&bound| score <= bound)
        .map(|i| i as u8 + 1)
        .unwrap_or(5)
}

/// Highest indicator at full weight, each following one discounted by 0.8^rank
fn indicator_score(text: &str) -> f64 {
    let mut weights: Vec<f64> = COMPLEXITY_INDICATORS
        .iter()
        .filter(|(term, _)| text.contains(term))
        .map(|(_, w)| *w)
        .collect();
    weights.sort_by(|a, b| b.total_cmp(a));

    weights
        .iter()
        .enumerate()
        .map(|(rank, w)| w * tuning::INDICATOR_DECAY.powi(rank as i32))
        .sum()
}

fn identify_technical_terms(text: &str, domain: Domain) -> BTreeSet<String> {
    let mut candidates: Vec<&str> = domain_terms(domain)
        .iter()
        .chain(COMMON_TERMS.iter())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut found = BTreeSet::new();
    let mut masked = text.to_string();

    // Multi-word terms first, masked out so their parts are not counted again
    for term in candidates.iter().filter(|t| t.contains(' ')) {
        if masked.contains(term) {
            found.insert(term.to_string());
            masked = masked.replace(term, &" ".repeat(term.len()));
        }
    }

    let words: BTreeSet<&str> = masked.split_whitespace().collect();
    for term in candidates.iter().filter(|t| !t.contains(' ')) {
        if words.contains(term) {
            found.insert(term.to_string());
        }
    }

    if masked.contains("analytics") || masked.contains("analyze") {
        found.insert("analytics".to_string());
    }

    found
}

fn identify_components(text: &str) -> BTreeSet<String> {
    let mut components = BTreeSet::new();

    for raw_line in text.to_lowercase().split('\n') {
        let line = raw_line
            .trim_matches(|c: char| matches!(c, '-' | ' ' | '*' | '•'))
            .trim();

        if !line.is_empty() && ACTION_WORDS.iter().any(|a| line.starts_with(a)) {
            components.insert(line.to_string());
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        for (i, word) in words.iter().enumerate() {
            if COMPONENT_INDICATORS.contains(word) {
                if i > 0 {
                    components.insert(format!("{} {}", words[i - 1], word));
                }
                if i + 1 < words.len() {
                    components.insert(format!("{} {}", word, words[i + 1]));
                }
                components.insert(word.to_string());
            }
            if i > 0 && ACTION_WORDS.contains(&words[i - 1]) {
                components.insert(word.to_string());
            }
        }
    }

    components
}

fn identify_dependencies(text: &str, components: &BTreeSet<String>) -> Vec<(String, String)> {
    let mut dependencies = Vec::new();

    for sentence in SENTENCE_SPLIT_RE.split(&text.to_lowercase()) {
        for indicator in DEPENDENCY_INDICATORS {
            if !sentence.contains(indicator) {
                continue;
            }
            let parts: Vec<&str> = sentence.split(indicator).collect();
            if let [from, to] = parts.as_slice() {
                let (from, to) = (from.trim(), to.trim());
                if !from.is_empty() && !to.is_empty() {
                    dependencies.push((from.to_string(), to.to_string()));
                }
            }
        }
    }

    let any_component = |needle: &str| components.iter().any(|c| c.contains(needle));

    if any_component("data") {
        if any_component("analysis") {
            dependencies.push(("data".to_string(), "analysis".to_string()));
        }
        if any_component("visualization") {
            dependencies.push(("analysis".to_string(), "visualization".to_string()));
        }
    }
    if any_component("test") && any_component("deploy") {
        dependencies.push(("testing".to_string(), "deployment".to_string()));
    }

    dependencies
}

fn explanation(level: u8, terms: usize, components: usize, dependencies: usize) -> String {
    match level {
        1 => "Simple task with minimal technical requirements.".to_string(),
        2 => format!(
            "Basic task with {} technical terms and {} components.",
            terms, components
        ),
        3 => format!(
            "Moderate complexity with {} technical terms, {} components, and {} dependencies.",
            terms, components, dependencies
        ),
        4 => format!(
            "Complex task with multiple components ({}) and technical requirements ({}).",
            components, terms
        ),
        _ => format!(
            "Highly complex task with {} technical terms, {} components, and {} interdependencies.",
            terms, components, dependencies
        ),
    }
}
