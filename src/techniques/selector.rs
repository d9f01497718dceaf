//! Technique Selector
//!
//! Heuristic selection of up to N mutually compatible techniques for an
//! objective. Candidates are scored by domain preference, the detected
//! task and the complexity level; each selected technique is paired with
//! domain-appropriate parameters.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::TechniqueLibrary;
use crate::classifier::DomainClassifier;
use crate::constants::generation::{COMPLEXITY_BONUS, MAX_TECHNIQUES, TASK_BONUS};
use crate::types::{Domain, Params};

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "is", "are", "was", "were", "be", "been", "being",
    "to", "from", "for", "with", "by", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "should",
    "now", "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
];

// =============================================================================
// Registries
// =============================================================================

struct DomainWeights {
    domain: Domain,
    weights: &'static [(&'static str, f64)],
}

const DOMAIN_WEIGHTS: &[DomainWeights] = &[
    DomainWeights {
        domain: Domain::Software,
        weights: &[
            ("chain_of_thought", 0.9),
            ("role_prompting", 0.8),
            ("few_shot", 0.7),
            ("xml_tagging", 0.7),
            ("tree_of_thoughts", 0.6),
            ("react", 0.6),
            ("prompt_chaining", 0.8),
            ("graph_prompting", 0.6),
        ],
    },
    DomainWeights {
        domain: Domain::Content,
        weights: &[
            ("role_prompting", 0.9),
            ("few_shot", 0.8),
            ("generate_knowledge", 0.7),
            ("directional_stimulus", 0.7),
            ("prefill_response", 0.6),
            ("reflexion", 0.5),
        ],
    },
    DomainWeights {
        domain: Domain::Business,
        weights: &[
            ("chain_of_thought", 0.8),
            ("role_prompting", 0.9),
            ("few_shot", 0.6),
            ("tree_of_thoughts", 0.7),
            ("self_consistency", 0.6),
            ("graph_prompting", 0.7),
        ],
    },
    DomainWeights {
        domain: Domain::Education,
        weights: &[
            ("chain_of_thought", 0.9),
            ("few_shot", 0.9),
            ("generate_knowledge", 0.8),
            ("prefill_response", 0.7),
        ],
    },
    DomainWeights {
        domain: Domain::Creative,
        weights: &[
            ("directional_stimulus", 0.9),
            ("tree_of_thoughts", 0.8),
            ("meta_prompting", 0.7),
            ("role_prompting", 0.7),
            ("active_prompt", 0.6),
        ],
    },
];

const TASK_TECHNIQUES: &[(&str, &[&str])] = &[
    ("coding", &["chain_of_thought", "few_shot", "xml_tagging"]),
    ("debugging", &["react", "chain_of_thought", "self_consistency"]),
    ("architecture", &["tree_of_thoughts", "graph_prompting", "prompt_chaining"]),
    ("content_writing", &["role_prompting", "generate_knowledge", "prefill_response"]),
    ("marketing", &["directional_stimulus", "few_shot", "role_prompting"]),
    ("analysis", &["chain_of_thought", "graph_prompting", "generate_knowledge"]),
    ("decision_making", &["tree_of_thoughts", "self_consistency", "reflexion"]),
    ("creative_writing", &["directional_stimulus", "meta_prompting", "active_prompt"]),
    ("research", &["generate_knowledge", "react", "prompt_chaining"]),
    ("explanation", &["chain_of_thought", "few_shot", "prefill_response"]),
];

/// Techniques suited to each complexity level, index 0 is level 1
const COMPLEXITY_TECHNIQUES: [&[&str]; 5] = [
    &["role_prompting", "few_shot"],
    &["role_prompting", "few_shot", "chain_of_thought"],
    &["chain_of_thought", "role_prompting", "few_shot", "xml_tagging"],
    &["tree_of_thoughts", "self_consistency", "prompt_chaining", "chain_of_thought"],
    &["tree_of_thoughts", "react", "prompt_chaining", "graph_prompting", "self_consistency"],
];

struct TaskKeywords {
    domain: Domain,
    default_task: &'static str,
    tasks: &'static [(&'static str, &'static [&'static str])],
}

const TASK_KEYWORDS: &[TaskKeywords] = &[
    TaskKeywords {
        domain: Domain::Software,
        default_task: "coding",
        tasks: &[
            ("coding", &["code", "program", "implement", "build", "develop", "create", "function"]),
            ("debugging", &["debug", "fix", "issue", "problem", "error", "bug", "exception"]),
            ("architecture", &["architecture", "design", "structure", "system", "component", "pattern"]),
        ],
    },
    TaskKeywords {
        domain: Domain::Content,
        default_task: "content_writing",
        tasks: &[
            ("content_writing", &["write", "article", "blog", "post", "content", "copy"]),
            ("marketing", &["marketing", "ad", "advertisement", "campaign", "promotion"]),
            ("research", &["research", "analyze", "find", "discover", "investigate"]),
        ],
    },
    TaskKeywords {
        domain: Domain::Business,
        default_task: "analysis",
        tasks: &[
            ("analysis", &["analyze", "analysis", "evaluate", "assess", "measure"]),
            ("decision_making", &["decide", "decision", "choice", "select", "determine", "strategy"]),
            ("planning", &["plan", "strategy", "roadmap", "forecast", "projection"]),
        ],
    },
    TaskKeywords {
        domain: Domain::Creative,
        default_task: "creative_writing",
        tasks: &[
            ("creative_writing", &["story", "novel", "poem", "fiction", "narrative", "character"]),
            ("design", &["design", "visual", "graphics", "layout", "style", "look"]),
            ("brainstorming", &["idea", "concept", "brainstorm", "innovate", "think", "creative"]),
        ],
    },
    TaskKeywords {
        domain: Domain::Education,
        default_task: "explanation",
        tasks: &[
            ("explanation", &["explain", "describe", "clarify", "teach", "instruct"]),
            ("curriculum", &["course", "curriculum", "lesson", "module", "program", "syllabus"]),
            ("assessment", &["test", "quiz", "exam", "assessment", "evaluate", "measure"]),
        ],
    },
];

/// Task used when the domain has no task table
const GENERAL_TASK: &str = "general";

const COMPLEXITY_ADJUSTMENTS: &[(&str, i32)] = &[
    ("simple", -1),
    ("easy", -1),
    ("basic", -1),
    ("straightforward", -1),
    ("complex", 1),
    ("advanced", 1),
    ("sophisticated", 1),
    ("comprehensive", 1),
    ("detailed", 1),
    ("intricate", 1),
    ("challenging", 1),
    ("difficult", 1),
];

// =============================================================================
// Selector
// =============================================================================

/// A chosen technique with the parameters it should be applied with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedTechnique {
    pub name: String,
    pub params: Params,
}

#[derive(Debug, Clone)]
pub struct TechniqueSelector {
    max_techniques: usize,
}

impl Default for TechniqueSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TechniqueSelector {
    pub fn new() -> Self {
        Self {
            max_techniques: MAX_TECHNIQUES,
        }
    }

    pub fn with_max_techniques(max_techniques: usize) -> Self {
        Self { max_techniques }
    }

    /// Lowercased words of the objective minus stop words
    pub fn extract_keywords(&self, objective: &str) -> Vec<String> {
        let lower = objective.to_lowercase();
        WORD_RE
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|w| !STOP_WORDS.contains(w))
            .map(String::from)
            .collect()
    }

    /// Task with the most keyword hits in the domain's table, else the domain default
    pub fn determine_task(&self, domain: Domain, keywords: &[String]) -> &'static str {
        let Some(table) = TASK_KEYWORDS.iter().find(|t| t.domain == domain) else {
            return GENERAL_TASK;
        };

        let mut best: Option<(&'static str, usize)> = None;
        for (task, words) in table.tasks {
            let hits = keywords
                .iter()
                .filter(|k| words.contains(&k.as_str()))
                .count();
            if best.is_none_or(|(_, top)| hits > top) {
                best = Some((*task, hits));
            }
        }

        match best {
            Some((task, hits)) if hits > 0 => task,
            _ => table.default_task,
        }
    }

    /// Rough 1..=5 estimate from length, qualifier words and task type
    pub fn estimate_complexity(&self, objective: &str, domain: Domain, task: &str) -> u8 {
        let mut complexity: i32 = 3;

        let words = objective.split_whitespace().count();
        if words < 10 {
            complexity -= 1;
        } else if words > 30 {
            complexity += 1;
        }

        let lower = objective.to_lowercase();
        for (word, adjustment) in COMPLEXITY_ADJUSTMENTS {
            if lower.contains(word) {
                complexity += adjustment;
            }
        }

        if (domain == Domain::Software && task == "architecture")
            || (domain == Domain::Business && task == "analysis")
        {
            complexity += 1;
        }

        complexity.clamp(1, 5) as u8
    }

    /// Select techniques for the objective.
    ///
    /// Missing domain, task or complexity are derived from the objective.
    /// Techniques not registered in `library` are skipped; a candidate is
    /// kept only if it is compatible with every technique already chosen.
    pub fn select_techniques(
        &self,
        library: &TechniqueLibrary,
        objective: &str,
        domain: Option<Domain>,
        task: Option<&str>,
        complexity: Option<u8>,
    ) -> Vec<SelectedTechnique> {
        let keywords = self.extract_keywords(objective);
        let domain = domain.unwrap_or_else(|| DomainClassifier::new().classify(objective).domain);
        let task = task.unwrap_or_else(|| self.determine_task(domain, &keywords));
        let complexity = complexity.unwrap_or_else(|| self.estimate_complexity(objective, domain, task));

        let ranked = rank_candidates(domain, task, complexity);
        debug!(
            "Technique candidates for {}/{} at complexity {}: {:?}",
            domain, task, complexity, ranked
        );

        let mut selected: Vec<SelectedTechnique> = Vec::new();
        for (name, _) in ranked {
            if selected.len() >= self.max_techniques {
                break;
            }
            if library.get(name).is_none() {
                continue;
            }
            if selected.iter().all(|s| library.are_compatible(name, &s.name)) {
                selected.push(SelectedTechnique {
                    name: name.to_string(),
                    params: technique_context(name, domain, objective),
                });
            }
        }
        selected
    }
}

/// Candidate techniques with accumulated scores, highest first, ties in insertion order
fn rank_candidates(domain: Domain, task: &str, complexity: u8) -> Vec<(&'static str, f64)> {
    let mut candidates: Vec<(&'static str, f64)> = Vec::new();
    let mut add = |name: &'static str, amount: f64| {
        match candidates.iter_mut().find(|(n, _)| *n == name) {
            Some((_, score)) => *score += amount,
            None => candidates.push((name, amount)),
        }
    };

    if let Some(entry) = DOMAIN_WEIGHTS.iter().find(|d| d.domain == domain) {
        for (name, weight) in entry.weights {
            add(name, *weight);
        }
    }
    if let Some((_, names)) = TASK_TECHNIQUES.iter().find(|(t, _)| *t == task) {
        for name in *names {
            add(name, TASK_BONUS);
        }
    }
    if let Some(names) = COMPLEXITY_TECHNIQUES.get(usize::from(complexity).wrapping_sub(1)) {
        for name in *names {
            add(name, COMPLEXITY_BONUS);
        }
    }

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
}

/// Parameters a technique should be applied with for this domain
pub fn technique_context(name: &str, domain: Domain, objective: &str) -> Params {
    let mut params = Params::new();
    match name {
        "role_prompting" => {
            let role = match domain {
                Domain::Software => Some((
                    "experienced software developer",
                    "writing clean, efficient, and maintainable code",
                )),
                Domain::Content => Some((
                    "professional content strategist",
                    "creating engaging and effective content",
                )),
                Domain::Business => Some((
                    "seasoned business consultant",
                    "developing effective business strategies and solutions",
                )),
                Domain::Creative => Some((
                    "creative professional",
                    "generating innovative and impactful creative work",
                )),
                Domain::Education => Some((
                    "experienced educator",
                    "explaining complex concepts clearly and effectively",
                )),
                _ => None,
            };
            if let Some((role, expertise)) = role {
                params.insert("role".into(), json!(role));
                params.insert("expertise".into(), json!(expertise));
            }
        }
        "few_shot" => {
            params.insert("examples".into(), Value::Array(Vec::new()));
        }
        "chain_of_thought" => {
            let depth = if objective.to_lowercase().contains("explain") {
                "detailed"
            } else {
                "standard"
            };
            params.insert("steps_format".into(), json!("numbered"));
            params.insert("reasoning_depth".into(), json!(depth));
        }
        "tree_of_thoughts" => {
            let criteria = match domain {
                Domain::Business => "feasibility, impact, and cost-effectiveness",
                Domain::Software => "efficiency, maintainability, and scalability",
                _ => "correctness, efficiency, and simplicity",
            };
            params.insert("num_paths".into(), json!(3));
            params.insert("evaluation_criteria".into(), json!(criteria));
        }
        "react" => {
            let actions: Option<&[&str]> = match domain {
                Domain::Software => Some(&["Think", "Research", "Code", "Test", "Debug", "Refactor"]),
                Domain::Content => Some(&["Think", "Research", "Outline", "Draft", "Edit", "Finalize"]),
                Domain::Business => Some(&[
                    "Think", "Analyze", "Research", "Calculate", "Recommend", "Evaluate",
                ]),
                _ => None,
            };
            if let Some(actions) = actions {
                params.insert("available_actions".into(), json!(actions));
            }
        }
        _ => {}
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(selection: &[SelectedTechnique]) -> Vec<&str> {
        selection.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_extract_keywords_drops_stop_words() {
        let selector = TechniqueSelector::new();
        assert_eq!(
            selector.extract_keywords("Write a blog post about the Rust compiler"),
            vec!["write", "blog", "post", "rust", "compiler"]
        );
    }

    #[test]
    fn test_determine_task() {
        let selector = TechniqueSelector::new();
        let kw = selector.extract_keywords("Fix the login bug that throws an error");
        assert_eq!(selector.determine_task(Domain::Software, &kw), "debugging");

        let kw = selector.extract_keywords("Something unrelated entirely");
        assert_eq!(selector.determine_task(Domain::Software, &kw), "coding");
        assert_eq!(selector.determine_task(Domain::DataAnalysis, &kw), "general");
    }

    #[test]
    fn test_estimate_complexity() {
        let selector = TechniqueSelector::new();
        assert_eq!(selector.estimate_complexity("Simple script", Domain::Software, "coding"), 1);
        assert_eq!(
            selector.estimate_complexity(
                "Design a comprehensive and sophisticated system",
                Domain::Software,
                "architecture"
            ),
            5
        );
    }

    #[test]
    fn test_select_software_coding() {
        let library = TechniqueLibrary::with_builtin();
        let selector = TechniqueSelector::new();
        let selection = selector.select_techniques(
            &library,
            "Implement a function to parse dates",
            Some(Domain::Software),
            None,
            Some(3),
        );
        // chain_of_thought 0.9+0.5+0.3, few_shot 0.7+0.5+0.3, role_prompting 0.8+0.3
        assert_eq!(names(&selection), vec!["chain_of_thought", "few_shot", "role_prompting"]);
        assert_eq!(selection[0].params["steps_format"], json!("numbered"));
        assert_eq!(selection[0].params["reasoning_depth"], json!("standard"));
        assert_eq!(
            selection[2].params["role"],
            json!("experienced software developer")
        );
    }

    #[test]
    fn test_selection_is_pairwise_compatible() {
        let library = TechniqueLibrary::with_builtin();
        let selector = TechniqueSelector::with_max_techniques(5);
        for domain in Domain::ALL {
            for complexity in 1..=5 {
                let selection = selector.select_techniques(
                    &library,
                    "Design and build a scalable analytics platform",
                    Some(domain),
                    None,
                    Some(complexity),
                );
                assert!(selection.len() <= 5);
                for (i, a) in selection.iter().enumerate() {
                    for b in &selection[i + 1..] {
                        assert!(library.are_compatible(&a.name, &b.name));
                    }
                }
            }
        }
    }

    #[test]
    fn test_respects_max() {
        let library = TechniqueLibrary::with_builtin();
        let selector = TechniqueSelector::with_max_techniques(1);
        let selection =
            selector.select_techniques(&library, "Write a blog post", Some(Domain::Content), None, None);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_technique_context_tree_of_thoughts() {
        let params = technique_context("tree_of_thoughts", Domain::Business, "x");
        assert_eq!(
            params["evaluation_criteria"],
            json!("feasibility, impact, and cost-effectiveness")
        );
        assert!(technique_context("react", Domain::General, "x").is_empty());
    }
}
