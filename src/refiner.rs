//! Prompt Refinement
//!
//! Analyzes an existing prompt for sections and common gaps, then appends
//! scaffold sections that close them:
//! - missing context, examples or output format
//! - instructions too short to act on
//! - no section structure at all (the prompt is wrapped into one)
//!
//! Refinement only adds text; the original wording is kept intact.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::classifier::DomainClassifier;
use crate::constants::refiner::{
    COMPLEXITY_STEPS, FEW_SECTIONS_PENALTY, ISSUE_PENALTY, LONG_PENALTY, LONG_WORDS,
    MIN_SECTIONS, MODERATE_PENALTY, MODERATE_WORDS, SHORT_PENALTY, SINGLE_SECTION_PENALTY,
    VAGUE_WORDS,
};
use crate::types::{Domain, round2};

// =============================================================================
// Patterns
// =============================================================================

static SECTION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"#+\s*(Context|Background|Introduction|Overview)",
        r"#+\s*(Instructions|Requirements|Specifications|Guidelines)",
        r"#+\s*(Format|Structure|Organization|Layout)",
        r"#+\s*(Constraints|Limitations|Restrictions)",
        r"#+\s*(Examples?|Samples?|Reference|Demo)",
        r"#+\s*(Output|Deliverables|Results|Expectations)",
        r"#+\s*(Code\s*Structure|Technical\s*Requirements|Architecture)",
        r"#+\s*(Testing|Validation|Quality\s*Assurance)",
        r"#+\s*(Best\s*Practices|Guidelines|Standards)",
        r"#+\s*(Tone|Voice|Style|Audience)",
        r"#+\s*(Key\s*Points|Messages|Talking\s*Points)",
        r"#+\s*[A-Z][A-Za-z\s]+:",
        r"^[A-Z][A-Za-z\s]+:",
    ]
    .iter()
    .map(|re| Regex::new(re).expect("valid section regex"))
    .collect()
});

static CONTEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)context|background|overview").expect("valid issue regex"));
static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)example|sample|for instance").expect("valid issue regex")
});
static FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)format|structure|organization|output").expect("valid issue regex")
});

const UNSTRUCTURED: &str = "Unstructured Content";

/// Headers an objective is placed under
const MAIN_SECTIONS: &[&str] = &["context", "introduction", "background"];

// =============================================================================
// Issues
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingContext,
    VagueInstructions,
    MissingExamples,
    MissingOutputFormat,
    NoSections,
}

impl IssueKind {
    /// Detection order
    pub const ALL: [IssueKind; 5] = [
        IssueKind::MissingContext,
        IssueKind::VagueInstructions,
        IssueKind::MissingExamples,
        IssueKind::MissingOutputFormat,
        IssueKind::NoSections,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingContext => "missing_context",
            IssueKind::VagueInstructions => "vague_instructions",
            IssueKind::MissingExamples => "missing_examples",
            IssueKind::MissingOutputFormat => "missing_output_format",
            IssueKind::NoSections => "no_sections",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IssueKind::MissingContext => "The prompt lacks context or background information",
            IssueKind::VagueInstructions => "Instructions may be too vague or brief",
            IssueKind::MissingExamples => "No examples are provided to guide the response",
            IssueKind::MissingOutputFormat => "Output format or structure is not specified",
            IssueKind::NoSections => "The prompt lacks clear section organization",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            IssueKind::MissingContext => "Add background information and context",
            IssueKind::VagueInstructions => "Provide more specific instructions",
            IssueKind::MissingExamples => "Include examples to guide the response",
            IssueKind::MissingOutputFormat => "Specify the desired output format",
            IssueKind::NoSections => "Organize the prompt into clear sections",
        }
    }

    fn detect(&self, prompt: &str, word_count: usize, section_count: usize) -> bool {
        match self {
            IssueKind::MissingContext => !CONTEXT_RE.is_match(prompt),
            IssueKind::VagueInstructions => word_count < VAGUE_WORDS,
            IssueKind::MissingExamples => !EXAMPLE_RE.is_match(prompt),
            IssueKind::MissingOutputFormat => !FORMAT_RE.is_match(prompt),
            IssueKind::NoSections => section_count <= 1,
        }
    }

    /// Header of the section that fixes the issue
    fn section(&self) -> &'static str {
        match self {
            IssueKind::MissingContext | IssueKind::NoSections => "Context",
            IssueKind::VagueInstructions => "Instructions",
            IssueKind::MissingExamples => "Examples",
            IssueKind::MissingOutputFormat => "Output Format",
        }
    }

    fn scaffold(&self, prompt: &str, domain: Domain) -> String {
        match (self, domain) {
            (IssueKind::MissingContext, _) => {
                "# Context\nThis task involves [describe task objective and context].".to_string()
            }
            (IssueKind::VagueInstructions, _) => "# Instructions\n1. [Specific instruction 1]\n\
                 2. [Specific instruction 2]\n3. [Specific instruction 3]"
                .to_string(),
            (IssueKind::MissingExamples, Domain::Software) => "# Examples\nExample input:\n\
                 ```\n[sample input]\n```\n\nExample output:\n```\n[expected output]\n```"
                .to_string(),
            (IssueKind::MissingExamples, _) => "# Examples\n\
                 Example 1: [detailed example with explanation]\n\
                 Example 2: [another example showing a different case]"
                .to_string(),
            (IssueKind::MissingOutputFormat, Domain::Software) => {
                "# Output Format\nProvide your solution as [output format details].".to_string()
            }
            (IssueKind::MissingOutputFormat, Domain::Content) => "# Output Format\n\
                 Your response should include:\n- [Section 1]\n- [Section 2]\n- [Section 3]"
                .to_string(),
            (IssueKind::MissingOutputFormat, _) => "# Output Format\n\
                 Please structure your response in the following format:\n\
                 1. [First component]\n2. [Second component]"
                .to_string(),
            (IssueKind::NoSections, _) => {
                let body = prompt.trim();
                let context = if body.is_empty() {
                    "[Context goes here]"
                } else {
                    body
                };
                format!(
                    "# Context\n{}\n\n# Instructions\n[Instructions go here]\n\n\
                     # Output Format\n[Output format goes here]",
                    context
                )
            }
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub description: &'static str,
}

/// An improvement a caller can ask for explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Improvement {
    Fix(IssueKind),
    AddExamples,
    AddConstraints,
}

impl std::str::FromStr for Improvement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "add_examples" => return Ok(Improvement::AddExamples),
            "add_constraints" => return Ok(Improvement::AddConstraints),
            _ => {}
        }
        IssueKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .map(Improvement::Fix)
            .ok_or_else(|| {
                format!(
                    "Unknown improvement: {}. Valid values: missing_context, vague_instructions, \
                     missing_examples, missing_output_format, no_sections, add_examples, \
                     add_constraints",
                    s
                )
            })
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// A headed block of prompt text; line numbers are zero-based and inclusive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptSection {
    pub name: String,
    pub content: String,
    pub line_start: usize,
    pub line_end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptAnalysis {
    pub sections: Vec<PromptSection>,
    pub issues: Vec<Issue>,
    pub quality_score: f64,
    /// Size-based level in 1..=5
    pub complexity: u8,
    pub word_count: usize,
    pub domain: Domain,
}

impl PromptAnalysis {
    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

/// Section name for a header line, or None for body text
fn header_name(line: &str) -> Option<String> {
    let caps = SECTION_RES.iter().find_map(|re| re.captures(line))?;
    let name = match caps.get(1) {
        Some(group) => group.as_str().to_string(),
        // Colon headers: the text before the colon
        None => line
            .split(':')
            .next()
            .unwrap_or(line)
            .trim_matches(|c: char| c == '#' || c.is_whitespace())
            .to_string(),
    };
    Some(name)
}

pub fn extract_sections(prompt: &str) -> Vec<PromptSection> {
    let lines: Vec<&str> = prompt.split('\n').collect();
    let mut sections = Vec::new();
    let mut current: Option<(String, usize)> = None;
    let mut body: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        match header_name(line) {
            Some(name) => {
                if let Some((prev, start)) = current.take() {
                    sections.push(PromptSection {
                        name: prev,
                        content: body.join("\n").trim().to_string(),
                        line_start: start,
                        line_end: i - 1,
                    });
                }
                current = Some((name, i));
                body.clear();
            }
            None if current.is_some() => body.push(*line),
            None => {}
        }
    }

    let last_line = lines.len().saturating_sub(1);
    if let Some((name, start)) = current {
        sections.push(PromptSection {
            name,
            content: body.join("\n").trim().to_string(),
            line_start: start,
            line_end: last_line,
        });
    } else {
        sections.push(PromptSection {
            name: UNSTRUCTURED.to_string(),
            content: prompt.trim().to_string(),
            line_start: 0,
            line_end: last_line,
        });
    }
    sections
}

fn quality_score(issue_count: usize, word_count: usize, section_count: usize) -> f64 {
    let mut score = 1.0 - issue_count as f64 * ISSUE_PENALTY;

    if word_count < VAGUE_WORDS {
        score -= SHORT_PENALTY;
    } else if word_count < MODERATE_WORDS {
        score -= MODERATE_PENALTY;
    } else if word_count > LONG_WORDS {
        score -= LONG_PENALTY;
    }

    if section_count == 1 {
        score -= SINGLE_SECTION_PENALTY;
    } else if section_count < MIN_SECTIONS {
        score -= FEW_SECTIONS_PENALTY;
    }

    round2(score.clamp(0.0, 1.0))
}

fn size_complexity(word_count: usize, section_count: usize) -> u8 {
    COMPLEXITY_STEPS
        .iter()
        .position(|&(max_words, max_sections)| {
            word_count < max_words && section_count <= max_sections
        })
        .map_or(5, |i| i as u8 + 1)
}

// =============================================================================
// Enhancements
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementKind {
    Fix(IssueKind),
    AddExamples,
    AddConstraints,
    UpdateObjective,
}

impl std::fmt::Display for EnhancementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnhancementKind::Fix(kind) => write!(f, "fix_{}", kind),
            EnhancementKind::AddExamples => write!(f, "add_examples"),
            EnhancementKind::AddConstraints => write!(f, "add_constraints"),
            EnhancementKind::UpdateObjective => write!(f, "update_objective"),
        }
    }
}

impl Serialize for EnhancementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enhancement {
    #[serde(rename = "type")]
    pub kind: EnhancementKind,
    pub description: String,
    pub section: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Refinement {
    pub original_prompt: String,
    pub refined_prompt: String,
    pub original_analysis: PromptAnalysis,
    pub refined_analysis: PromptAnalysis,
    pub improvements: Vec<Enhancement>,
    /// Share of the remaining quality gap closed, in [0, 1]
    pub improvement_score: f64,
}

fn is_header_for(line: &str, names: &[&str]) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('#')
        && names.iter().any(|name| {
            trimmed
                .trim_start_matches('#')
                .trim()
                .eq_ignore_ascii_case(name)
        })
}

fn has_header(text: &str, name: &str) -> bool {
    text.lines().any(|line| is_header_for(line, &[name]))
}

/// Put an objective line under the first main header, or open a Context
/// section for it
fn with_objective(text: &str, objective: &str) -> String {
    let line = format!("Objective: {}", objective.trim());
    let mut lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|l| is_header_for(l, MAIN_SECTIONS)) {
        Some(i) => {
            lines.insert(i + 1, line.as_str());
            lines.join("\n")
        }
        None if text.trim().is_empty() => format!("# Context\n{}", line),
        None => format!("# Context\n{}\n\n{}", line, text),
    }
}

// =============================================================================
// Refiner
// =============================================================================

#[derive(Default)]
pub struct PromptRefiner {
    classifier: DomainClassifier,
}

impl PromptRefiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&self, prompt: &str) -> PromptAnalysis {
        let sections = extract_sections(prompt);
        let word_count = prompt.split_whitespace().count();

        let issues: Vec<Issue> = IssueKind::ALL
            .into_iter()
            .filter(|kind| kind.detect(prompt, word_count, sections.len()))
            .map(|kind| Issue {
                kind,
                description: kind.description(),
            })
            .collect();

        let analysis = PromptAnalysis {
            quality_score: quality_score(issues.len(), word_count, sections.len()),
            complexity: size_complexity(word_count, sections.len()),
            domain: self.classifier.classify(prompt).domain,
            word_count,
            issues,
            sections,
        };
        debug!(
            "Prompt analysis: {} sections, {} issues, quality {:.2}",
            analysis.sections.len(),
            analysis.issues.len(),
            analysis.quality_score
        );
        analysis
    }

    /// Analyze `prompt` and append sections for its gaps.
    ///
    /// With `desired` non-empty only the listed fixes are made, plus any
    /// explicitly requested examples or constraints sections.
    pub fn refine(
        &self,
        prompt: &str,
        objective: Option<&str>,
        desired: &[Improvement],
    ) -> Refinement {
        let analysis = self.analyze(prompt);
        let enhancements = self.enhancements(prompt, &analysis, objective, desired);
        let refined_prompt = apply(prompt, &enhancements);
        let refined_analysis = self.analyze(&refined_prompt);

        let improvement_score = improvement(&analysis, &refined_analysis);
        info!(
            "Refined prompt with {} enhancements (quality {:.2} -> {:.2})",
            enhancements.len(),
            analysis.quality_score,
            refined_analysis.quality_score
        );

        Refinement {
            original_prompt: prompt.to_string(),
            refined_prompt,
            original_analysis: analysis,
            refined_analysis,
            improvements: enhancements,
            improvement_score,
        }
    }

    /// Human-readable suggestions without changing the prompt
    pub fn suggest_improvements(&self, prompt: &str) -> Vec<String> {
        let analysis = self.analyze(prompt);
        let mut suggestions: Vec<String> = analysis
            .issues
            .iter()
            .map(|issue| issue.kind.suggestion().to_string())
            .collect();

        if analysis.complexity < 3 {
            suggestions.push("Add more detail to increase prompt complexity".to_string());
        }
        if analysis.word_count < MODERATE_WORDS {
            suggestions.push("Expand the prompt with more information".to_string());
        }
        if analysis.sections.len() < MIN_SECTIONS {
            suggestions.push("Add more sections to better structure the prompt".to_string());
        }
        suggestions
    }

    fn enhancements(
        &self,
        prompt: &str,
        analysis: &PromptAnalysis,
        objective: Option<&str>,
        desired: &[Improvement],
    ) -> Vec<Enhancement> {
        let mut enhancements: Vec<Enhancement> = analysis
            .issues
            .iter()
            .filter(|issue| desired.is_empty() || desired.contains(&Improvement::Fix(issue.kind)))
            .map(|issue| Enhancement {
                kind: EnhancementKind::Fix(issue.kind),
                description: format!("Fix: {}", issue.description),
                section: Some(issue.kind.section().to_string()),
                content: issue.kind.scaffold(prompt, analysis.domain),
            })
            .collect();

        if let Some(objective) = objective.map(str::trim).filter(|o| !o.is_empty()) {
            let main = analysis.sections.iter().find(|s| {
                let name = s.name.to_lowercase();
                MAIN_SECTIONS.contains(&name.as_str()) || s.name == UNSTRUCTURED
            });
            let (description, section) = match main {
                Some(section) => ("Update the prompt objective", section.name.clone()),
                None => ("Add new objective", "Context".to_string()),
            };
            enhancements.push(Enhancement {
                kind: EnhancementKind::UpdateObjective,
                description: description.to_string(),
                section: Some(section),
                content: objective.to_string(),
            });
        }

        if desired.contains(&Improvement::AddExamples)
            && !analysis.has_issue(IssueKind::MissingExamples)
        {
            enhancements.push(Enhancement {
                kind: EnhancementKind::AddExamples,
                description: "Add examples to illustrate expected output".to_string(),
                section: Some("Examples".to_string()),
                content: "# Examples\nHere are some examples of the expected output:\n\n\
                          Example 1: [Example details]"
                    .to_string(),
            });
        }
        if desired.contains(&Improvement::AddConstraints)
            && !analysis
                .sections
                .iter()
                .any(|s| s.name.eq_ignore_ascii_case("constraints"))
        {
            enhancements.push(Enhancement {
                kind: EnhancementKind::AddConstraints,
                description: "Add constraints section to clarify limitations".to_string(),
                section: Some("Constraints".to_string()),
                content: "# Constraints\nPlease consider the following constraints:\n\n\
                          - [Constraint 1]\n- [Constraint 2]"
                    .to_string(),
            });
        }

        enhancements
    }
}

/// Restructure first, then append each section whose header is still absent
fn apply(prompt: &str, enhancements: &[Enhancement]) -> String {
    let restructure = enhancements
        .iter()
        .find(|e| e.kind == EnhancementKind::Fix(IssueKind::NoSections));
    let mut refined = match restructure {
        Some(e) => e.content.clone(),
        None => prompt.trim().to_string(),
    };

    for enhancement in enhancements {
        match enhancement.kind {
            EnhancementKind::Fix(IssueKind::NoSections) => {}
            EnhancementKind::UpdateObjective => {
                refined = with_objective(&refined, &enhancement.content);
            }
            _ => {
                let Some(section) = enhancement.section.as_deref() else {
                    continue;
                };
                if has_header(&refined, section) {
                    continue;
                }
                if !refined.is_empty() {
                    refined.push_str("\n\n");
                }
                refined.push_str(&enhancement.content);
            }
        }
    }
    refined
}

fn improvement(original: &PromptAnalysis, refined: &PromptAnalysis) -> f64 {
    if original.quality_score >= refined.quality_score {
        return 0.0;
    }
    round2((refined.quality_score - original.quality_score) / (1.0 - original.quality_score))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &str = "Write a poem about autumn.";

    fn structured() -> String {
        format!(
            "# Context\n{}\n\n# Examples\nFor example, a short sample reply.\n\n\
             # Output\nReturn the output as a bulleted list.",
            "We run a small online store selling handmade leather shoes. ".repeat(6)
        )
    }

    #[test]
    fn test_unstructured_prompt_has_every_issue() {
        let analysis = PromptRefiner::new().analyze(SHORT);

        assert_eq!(analysis.sections.len(), 1);
        assert_eq!(analysis.sections[0].name, "Unstructured Content");
        assert_eq!(analysis.issues.len(), 5);
        assert_eq!(analysis.quality_score, 0.1);
        assert_eq!(analysis.complexity, 1);
        assert_eq!(analysis.word_count, 5);
    }

    #[test]
    fn test_extract_sections_with_line_ranges() {
        let sections = extract_sections("# Context\nWe sell shoes.\n\n# Instructions\nWrite copy.");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "Context");
        assert_eq!(sections[0].content, "We sell shoes.");
        assert_eq!((sections[0].line_start, sections[0].line_end), (0, 2));
        assert_eq!(sections[1].name, "Instructions");
        assert_eq!((sections[1].line_start, sections[1].line_end), (3, 4));
    }

    #[test]
    fn test_colon_header_uses_text_before_colon() {
        let sections = extract_sections("Audience Notes: busy parents\nKeep it short");
        assert_eq!(sections[0].name, "Audience Notes");
        assert_eq!(sections[0].content, "Keep it short");
    }

    #[test]
    fn test_refine_wraps_unstructured_prompt() {
        let refinement = PromptRefiner::new().refine(SHORT, None, &[]);
        let refined = &refinement.refined_prompt;

        assert!(refined.starts_with("# Context\nWrite a poem about autumn."));
        assert_eq!(refined.matches("# Output Format").count(), 1);
        assert_eq!(refined.matches("# Context").count(), 1);
        assert!(refined.contains("# Examples"));
        assert!(!refinement.refined_analysis.has_issue(IssueKind::NoSections));
        assert!(refinement.improvement_score > 0.0);
    }

    #[test]
    fn test_well_formed_prompt_is_unchanged() {
        let prompt = structured();
        let refinement = PromptRefiner::new().refine(&prompt, None, &[]);

        assert!(refinement.original_analysis.issues.is_empty());
        assert!(refinement.improvements.is_empty());
        assert_eq!(refinement.refined_prompt, prompt.trim());
        assert_eq!(refinement.improvement_score, 0.0);
    }

    #[test]
    fn test_desired_improvements_filter_fixes() {
        let refinement =
            PromptRefiner::new().refine(&structured(), None, &[Improvement::AddConstraints]);

        assert_eq!(refinement.improvements.len(), 1);
        assert_eq!(refinement.improvements[0].kind, EnhancementKind::AddConstraints);
        assert!(refinement.refined_prompt.ends_with("- [Constraint 2]"));
    }

    #[test]
    fn test_objective_goes_under_context_header() {
        let refinement = PromptRefiner::new().refine(
            "# Context\nWe sell shoes.\n\n# Instructions\nWrite copy.",
            Some("Launch the spring line"),
            &[Improvement::Fix(IssueKind::MissingExamples)],
        );

        assert!(
            refinement
                .refined_prompt
                .starts_with("# Context\nObjective: Launch the spring line\nWe sell shoes.")
        );
        assert!(refinement.refined_prompt.contains("# Examples"));
    }

    #[test]
    fn test_suggestions_for_short_prompt() {
        let suggestions = PromptRefiner::new().suggest_improvements(SHORT);

        assert!(suggestions.contains(&"Organize the prompt into clear sections".to_string()));
        assert!(suggestions.contains(&"Expand the prompt with more information".to_string()));
        assert!(
            suggestions.contains(&"Add more sections to better structure the prompt".to_string())
        );
    }

    #[test]
    fn test_parse_improvement() {
        assert_eq!(
            "missing_examples".parse::<Improvement>().unwrap(),
            Improvement::Fix(IssueKind::MissingExamples)
        );
        assert_eq!(
            "add-constraints".parse::<Improvement>().unwrap(),
            Improvement::AddConstraints
        );
        assert!("bogus".parse::<Improvement>().is_err());
    }

    #[test]
    fn test_size_complexity_steps() {
        assert_eq!(size_complexity(10, 1), 1);
        assert_eq!(size_complexity(80, 2), 2);
        assert_eq!(size_complexity(150, 3), 3);
        assert_eq!(size_complexity(300, 4), 4);
        assert_eq!(size_complexity(30, 6), 5);
    }

    #[test]
    fn test_enhancement_kind_serializes_as_string() {
        let json = serde_json::to_string(&EnhancementKind::Fix(IssueKind::NoSections)).unwrap();
        assert_eq!(json, "\"fix_no_sections\"");
    }
}
