//! Prompt Evaluation
//!
//! Structural quality assessment of arbitrary prompt text:
//! - clarity: penalizes second person, hedging and dangling referents
//! - specificity: penalizes vague adverbs and generic nouns, rewards length
//! - structure: headers, lists and fenced code, counted per line
//! - context: background, sequencing and example markers
//! - actionability: action verbs, requirement terms and output markers
//!
//! Also provides:
//! - Optional response sampling through an [`LlmClient`], such as a local
//!   model CLI wrapped in [`CommandClient`]
//! - Ranking of several prompts with comparison notes
//! - Per-domain factors via [`DomainSpecificEvaluator`]

mod command;
mod domain;

pub use command::CommandClient;
pub use domain::{DomainEvaluation, DomainFactorScore, DomainSpecificEvaluator};

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::{debug, error};

use crate::constants::evaluation::{
    LLM_SAMPLES, LONG_PROMPT_WORDS, MAJOR_DIFFERENCE, MAX_SAMPLE_CHARS, MIN_WORDS_FOR_LLM,
    SHORT_PROMPT_WORDS,
};
use crate::types::{PromptError, Result, round2};

// =============================================================================
// LLM Client
// =============================================================================

/// Text-in, text-out model client used for response sampling.
///
/// Any `Fn(&str) -> Result<String>` closure is a client.
pub trait LlmClient: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<F> LlmClient for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn generate(&self, prompt: &str) -> Result<String> {
        self(prompt)
    }
}

// =============================================================================
// Patterns
// =============================================================================

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid evaluation regex"))
        .collect()
}

pub(crate) fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

static CLARITY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(you|your|yours)\b",
        r"\b(maybe|perhaps|might|could|possibly)",
    ])
});

static REFERENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(this|that|these|those|it|they)\b").expect("valid evaluation regex")
});

static FOLLOWED_BY_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+\w").expect("valid evaluation regex"));

static SPECIFICITY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\b(\w+ly)\b",
        r"\b(good|great|nice|bad|terrible|awesome)\b",
        r"\b(thing|stuff|something|anything)\b",
    ])
});

/// Matched against each line from its start
static STRUCTURE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^\s*#.*$",
        r"^\s*\d+\.\s+.*$",
        r"^\s*\*\s+.*$",
        r"^\s*-\s+.*$",
        r"^```[\s\S]*?```",
    ])
});

static CONTEXT_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(context|background|introduction|given|assume)\b",
        r"(?i)\b(previous|before|after|following)\b",
        r"(?i)\b(example|instance|case|scenario)\b",
    ])
});

static ACTIONABILITY_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(create|make|develop|implement|design|build|write|code|analyze|evaluate|explain|describe|list|identify|outline|summarize)\b",
        r"\b(need|require|must|should|shall|will)\b",
        r"(?i)\b(output|result|deliverable|product|artifact)\b",
    ])
});

/// Referents ("this", "it", ...) not followed by a word they could qualify.
fn count_dangling_referents(text: &str) -> usize {
    REFERENT_RE
        .find_iter(text)
        .filter(|m| !FOLLOWED_BY_WORD_RE.is_match(&text[m.end()..]))
        .count()
}

// =============================================================================
// Scores
// =============================================================================

/// General quality factors, each in 0.0 - 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FactorScores {
    pub clarity: f64,
    pub specificity: f64,
    pub structure: f64,
    pub context: f64,
    pub actionability: f64,
}

impl FactorScores {
    /// Score the structural qualities of already-trimmed text
    pub fn measure(text: &str) -> Self {
        let total_words = text.split_whitespace().count();
        if total_words == 0 {
            return Self::default();
        }
        let total = total_words as f64;
        let lines: Vec<&str> = text.split('\n').collect();

        let clarity_matches = count_matches(&CLARITY_RES, text) + count_dangling_referents(text);
        let clarity = 1.0 - (clarity_matches as f64 / (total * 0.1)).min(1.0);

        let specificity_penalty =
            (count_matches(&SPECIFICITY_RES, text) as f64 / (total * 0.1)).min(1.0);
        let length_bonus = (total / 100.0).min(1.0) * 0.3;
        let specificity = (1.0 - specificity_penalty) * 0.7 + length_bonus;

        let structure_matches: usize = STRUCTURE_RES
            .iter()
            .map(|re| lines.iter().filter(|line| re.is_match(line)).count())
            .sum();
        let structure =
            (structure_matches as f64 / (lines.len() as f64 * 0.25).max(1.0)).min(1.0);

        let context =
            (count_matches(&CONTEXT_RES, text) as f64 / (total * 0.02).max(5.0)).min(1.0);

        let actionability =
            (count_matches(&ACTIONABILITY_RES, text) as f64 / (total * 0.05).max(3.0)).min(1.0);

        Self {
            clarity,
            specificity,
            structure,
            context,
            actionability,
        }
    }

    /// Calculate weighted overall score
    pub fn weighted_average(&self) -> f64 {
        // Weights: clarity (25%), specificity (20%), structure (15%), context (15%), actionability (25%)
        self.clarity * 0.25
            + self.specificity * 0.20
            + self.structure * 0.15
            + self.context * 0.15
            + self.actionability * 0.25
    }

    /// Named scores in reporting order
    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("clarity", self.clarity),
            ("specificity", self.specificity),
            ("structure", self.structure),
            ("context", self.context),
            ("actionability", self.actionability),
        ]
    }

    /// Threshold-triggered improvement suggestions
    pub fn suggestions(&self, word_count: usize) -> Vec<String> {
        let mut suggestions = Vec::new();
        let mut add = |items: [&str; 2]| suggestions.extend(items.map(String::from));

        if self.clarity < 0.7 {
            add([
                "Reduce ambiguous pronouns (this, that, it) and clarify what they refer to",
                "Replace uncertain language (maybe, perhaps, might) with definitive statements",
            ]);
        }
        if self.specificity < 0.6 {
            add([
                "Add more specific details about expected output or deliverables",
                "Replace generic terms with precise requirements or constraints",
            ]);
        }
        if self.structure < 0.5 {
            add([
                "Improve organization with headers, lists, or sections",
                "Break down complex instructions into clear steps or bullet points",
            ]);
        }
        if self.context < 0.6 {
            add([
                "Add more background information or context",
                "Clarify assumptions or pre-conditions for the task",
            ]);
        }
        if self.actionability < 0.7 {
            add([
                "Specify clear action items or deliverables",
                "Include explicit instructions about what needs to be done",
            ]);
        }

        if word_count < SHORT_PROMPT_WORDS {
            suggestions.push("Consider expanding the prompt with more details and context".into());
        } else if word_count > LONG_PROMPT_WORDS {
            suggestions.push(
                "The prompt is quite long - consider focusing on the most essential elements"
                    .into(),
            );
        }
        suggestions
    }
}

/// One sampled model response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleResponse {
    pub text: String,
    /// Words in the response
    pub length: usize,
    /// Seconds, rounded to two decimals
    pub time: f64,
}

/// Response-based metrics from repeated sampling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMetrics {
    /// Mean pairwise word-set similarity between responses
    pub response_consistency: f64,
    /// Average response length in words
    pub response_length: usize,
    /// Average response time in seconds
    pub response_time: f64,
    pub sample_responses: Vec<SampleResponse>,
}

/// Result of evaluating one prompt
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub quality_score: f64,
    pub word_count: usize,
    pub factor_scores: FactorScores,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainEvaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_metrics: Option<ResponseMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_error: Option<String>,
}

impl Evaluation {
    /// Combined score when domain factors were applied, else the general score
    pub fn overall_score(&self) -> f64 {
        self.domain
            .as_ref()
            .map_or(self.quality_score, |d| d.combined_quality_score)
    }
}

/// One entry of a ranked comparison
#[derive(Debug, Clone, Serialize)]
pub struct RankedPrompt {
    pub prompt_index: usize,
    pub prompt_text: String,
    pub evaluation: Evaluation,
}

/// Ranking of several prompts, best first
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub best_prompt_index: usize,
    pub evaluations: Vec<RankedPrompt>,
    pub comparison_notes: Vec<String>,
}

// =============================================================================
// Evaluator
// =============================================================================

/// General-purpose prompt evaluator
pub struct PromptEvaluator {
    client: Option<Box<dyn LlmClient>>,
    samples: usize,
}

impl Default for PromptEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptEvaluator {
    /// Structural evaluation only
    pub fn new() -> Self {
        Self {
            client: None,
            samples: LLM_SAMPLES,
        }
    }

    /// Enable response sampling with the given client
    pub fn with_client(mut self, client: Box<dyn LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Number of responses sampled per evaluation (at least one)
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Evaluate the quality of a prompt.
    ///
    /// Sampling failures are logged and reported in `llm_error`; they never
    /// fail the evaluation.
    pub fn evaluate(&self, prompt: &str) -> Evaluation {
        let text = prompt.trim();
        let word_count = text.split_whitespace().count();
        let factor_scores = FactorScores::measure(text);
        let quality_score = round2(factor_scores.weighted_average());

        let mut evaluation = Evaluation {
            quality_score,
            word_count,
            factor_scores,
            suggestions: factor_scores.suggestions(word_count),
            domain: None,
            response_metrics: None,
            llm_error: None,
        };

        if let Some(client) = &self.client
            && word_count > MIN_WORDS_FOR_LLM
        {
            match self.sample(client.as_ref(), text) {
                Ok(metrics) => evaluation.response_metrics = Some(metrics),
                Err(e) => {
                    error!("LLM evaluation failed: {}", e);
                    evaluation.llm_error = Some(e.to_string());
                }
            }
        }

        debug!(
            quality = evaluation.quality_score,
            words = word_count,
            "Evaluated prompt"
        );
        evaluation
    }

    /// Compare prompts and identify the best option
    pub fn compare_prompts<S: AsRef<str>>(&self, prompts: &[S]) -> Result<Comparison> {
        rank_prompts(prompts, |p| self.evaluate(p))
    }

    fn sample(&self, client: &dyn LlmClient, text: &str) -> Result<ResponseMetrics> {
        let runs = self.samples.max(1);
        let mut responses = Vec::with_capacity(runs);
        let mut sample_responses = Vec::with_capacity(runs);
        let mut total_time = 0.0;
        let mut total_length = 0;

        for _ in 0..runs {
            let start = Instant::now();
            let response = client.generate(text)?;
            let elapsed = start.elapsed().as_secs_f64();

            let cleaned = response.trim().to_string();
            let length = cleaned.split_whitespace().count();
            total_time += elapsed;
            total_length += length;

            sample_responses.push(SampleResponse {
                text: truncate_sample(&cleaned),
                length,
                time: round2(elapsed),
            });
            responses.push(cleaned);
        }

        let mut similarity_sum = 0.0;
        let mut comparisons = 0;
        for (i, first) in responses.iter().enumerate() {
            for second in &responses[i + 1..] {
                similarity_sum += similarity(first, second);
                comparisons += 1;
            }
        }
        let response_consistency = if comparisons > 0 {
            round2(similarity_sum / comparisons as f64)
        } else {
            0.0
        };

        Ok(ResponseMetrics {
            response_consistency,
            response_length: (total_length as f64 / runs as f64).round() as usize,
            response_time: round2(total_time / runs as f64),
            sample_responses,
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Word-set Jaccard similarity, 0.0 when either side is empty
pub fn similarity(first: &str, second: &str) -> f64 {
    let first_lower = first.to_lowercase();
    let second_lower = second.to_lowercase();
    let a: HashSet<&str> = first_lower.split_whitespace().collect();
    let b: HashSet<&str> = second_lower.split_whitespace().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

fn truncate_sample(text: &str) -> String {
    if text.chars().count() > MAX_SAMPLE_CHARS {
        let head: String = text.chars().take(MAX_SAMPLE_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Evaluate each prompt and rank by general quality score, best first.
/// Ties keep input order.
pub(crate) fn rank_prompts<S, F>(prompts: &[S], evaluate: F) -> Result<Comparison>
where
    S: AsRef<str>,
    F: Fn(&str) -> Evaluation,
{
    if prompts.is_empty() {
        return Err(PromptError::EmptyComparison);
    }

    let mut evaluations: Vec<RankedPrompt> = prompts
        .iter()
        .enumerate()
        .map(|(prompt_index, prompt)| RankedPrompt {
            prompt_index,
            prompt_text: prompt.as_ref().to_string(),
            evaluation: evaluate(prompt.as_ref()),
        })
        .collect();
    evaluations.sort_by(|a, b| {
        b.evaluation
            .quality_score
            .total_cmp(&a.evaluation.quality_score)
    });

    let comparison_notes = comparison_notes(&evaluations);
    Ok(Comparison {
        best_prompt_index: evaluations[0].prompt_index,
        evaluations,
        comparison_notes,
    })
}

fn comparison_notes(ranked: &[RankedPrompt]) -> Vec<String> {
    let (Some(best), Some(worst)) = (ranked.first(), ranked.last()) else {
        return Vec::new();
    };
    if ranked.len() <= 1 {
        return Vec::new();
    }
    let (best, worst) = (&best.evaluation, &worst.evaluation);

    let mut notes = vec![format!(
        "The best prompt scores {:.2} points higher than the worst prompt",
        best.quality_score - worst.quality_score
    )];

    for ((factor, high), (_, low)) in best
        .factor_scores
        .named()
        .into_iter()
        .zip(worst.factor_scores.named())
    {
        if high - low > MAJOR_DIFFERENCE {
            notes.push(format!(
                "Major difference in {}: {:.2} vs {:.2}",
                factor, high, low
            ));
        }
    }

    if best.word_count.abs_diff(worst.word_count) as f64 > best.word_count as f64 * 0.5 {
        notes.push(format!(
            "Significant length difference: {} words vs {} words",
            best.word_count, worst.word_count
        ));
    }
    notes
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const STRUCTURED: &str = "# Context\n\
        Given the previous release, the API must support pagination.\n\
        \n\
        # Task\n\
        1. Implement cursor based pagination for the orders endpoint\n\
        2. Write integration tests for the first and last page\n\
        - Output: a pull request with the code and a short summary\n\
        - Example: GET /orders?cursor=abc returns the following page";

    #[test]
    fn test_empty_prompt_scores_zero() {
        let evaluation = PromptEvaluator::new().evaluate("   ");
        assert_eq!(evaluation.quality_score, 0.0);
        assert_eq!(evaluation.word_count, 0);
        assert_eq!(evaluation.factor_scores, FactorScores::default());
        assert_eq!(evaluation.suggestions.len(), 11);
        assert!(
            evaluation
                .suggestions
                .last()
                .unwrap()
                .starts_with("Consider expanding")
        );
    }

    #[test]
    fn test_hedging_destroys_clarity() {
        let scores = FactorScores::measure("Maybe you could possibly fix it");
        assert_eq!(scores.clarity, 0.0);
    }

    #[test]
    fn test_dangling_referents() {
        assert_eq!(count_dangling_referents("Refactor this module and test it."), 1);
        assert_eq!(count_dangling_referents("Fix it. Then ship it"), 2);
        assert_eq!(count_dangling_referents("Keep those files"), 0);
    }

    #[test]
    fn test_structure_counts_lines() {
        let scores = FactorScores::measure("# Task\n- item one\n- item two\n1. step");
        assert_eq!(scores.structure, 1.0);

        let flat = FactorScores::measure("Write a function that sorts numbers");
        assert_eq!(flat.structure, 0.0);
    }

    #[test]
    fn test_structured_prompt_beats_vague_prompt() {
        let evaluator = PromptEvaluator::new();
        let good = evaluator.evaluate(STRUCTURED);
        let vague = evaluator.evaluate("maybe do something nice with it");
        assert!(good.quality_score > vague.quality_score);
        assert!(good.factor_scores.structure > 0.9);
        assert!(good.factor_scores.actionability > 0.9);
    }

    #[test]
    fn test_scores_bounded() {
        for text in [STRUCTURED, "it it it it", "good stuff", "x"] {
            let scores = FactorScores::measure(text);
            for (_, score) in scores.named() {
                assert!((0.0..=1.0).contains(&score), "{text}: {score}");
            }
        }
    }

    #[test]
    fn test_length_suggestions() {
        let long = "word ".repeat(LONG_PROMPT_WORDS + 1);
        let suggestions = FactorScores::default().suggestions(LONG_PROMPT_WORDS + 1);
        assert!(suggestions.last().unwrap().starts_with("The prompt is quite long"));
        let evaluation = PromptEvaluator::new().evaluate(&long);
        assert_eq!(evaluation.word_count, LONG_PROMPT_WORDS + 1);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("a b c", "A B C"), 1.0);
        assert_eq!(similarity("a b", "c d"), 0.0);
        assert_eq!(similarity("", "a"), 0.0);
        assert!((similarity("a b c", "a b d") - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_truncate_sample() {
        let long = "x".repeat(600);
        let sample = truncate_sample(&long);
        assert_eq!(sample.chars().count(), MAX_SAMPLE_CHARS);
        assert!(sample.ends_with("..."));
        assert_eq!(truncate_sample("short"), "short");
    }

    #[test]
    fn test_llm_sampling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let client = move |_: &str| -> Result<String> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("  the same answer every time  ".to_string())
        };

        let evaluator = PromptEvaluator::new().with_client(Box::new(client));
        let evaluation = evaluator.evaluate(STRUCTURED);

        let metrics = evaluation.response_metrics.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), LLM_SAMPLES);
        assert_eq!(metrics.sample_responses.len(), LLM_SAMPLES);
        assert_eq!(metrics.response_consistency, 1.0);
        assert_eq!(metrics.response_length, 5);
        assert_eq!(metrics.sample_responses[0].text, "the same answer every time");
        assert!(evaluation.llm_error.is_none());
    }

    #[test]
    fn test_llm_skipped_for_short_prompts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let client = move |_: &str| -> Result<String> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        };

        let evaluation = PromptEvaluator::new()
            .with_client(Box::new(client))
            .evaluate("Write a haiku");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(evaluation.response_metrics.is_none());
    }

    #[test]
    fn test_llm_failure_is_reported() {
        let client = |_: &str| -> Result<String> { Err(PromptError::Llm("offline".into())) };
        let evaluation = PromptEvaluator::new()
            .with_client(Box::new(client))
            .evaluate(STRUCTURED);
        assert!(evaluation.response_metrics.is_none());
        assert_eq!(
            evaluation.llm_error.as_deref(),
            Some("LLM client error: offline")
        );
        assert!(evaluation.quality_score > 0.0);
    }

    #[test]
    fn test_compare_empty() {
        let empty: [&str; 0] = [];
        let err = PromptEvaluator::new().compare_prompts(&empty).unwrap_err();
        assert!(matches!(err, PromptError::EmptyComparison));
    }

    #[test]
    fn test_compare_ranks_best_first() {
        let comparison = PromptEvaluator::new()
            .compare_prompts(&["do stuff", STRUCTURED])
            .unwrap();
        assert_eq!(comparison.best_prompt_index, 1);
        assert_eq!(comparison.evaluations[0].prompt_index, 1);
        assert!(comparison.comparison_notes[0].starts_with("The best prompt scores"));
        assert!(
            comparison
                .comparison_notes
                .iter()
                .any(|n| n.starts_with("Major difference in structure"))
        );
        assert!(
            comparison
                .comparison_notes
                .iter()
                .any(|n| n.starts_with("Significant length difference"))
        );
    }

    #[test]
    fn test_compare_single_prompt_has_no_notes() {
        let comparison = PromptEvaluator::new().compare_prompts(&["one"]).unwrap();
        assert_eq!(comparison.best_prompt_index, 0);
        assert!(comparison.comparison_notes.is_empty());
    }
}
