//! Context Extraction
//!
//! Pulls strategy inputs (tech stack, audience, tone, stakeholders, ...) out
//! of a free-text description with domain-specific patterns. Only values
//! that were actually found are returned, so strategy defaults still apply
//! to everything else.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{Domain, GenerationContext, title_case};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("valid extraction regex"));
    };
}

// Software
pattern!(
    TECH_STACK_RE,
    r"(?i)(?:using|with|in)\s+([A-Za-z0-9\s,\.+#]+?)\s+(?:for|to|as|framework|language)\b"
);
pattern!(
    QUALITY_RE,
    r"(?i)(?:should be|must be|needs to be)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);
pattern!(
    ENTITY_RE,
    r"(?i)(?:entity|model|table|object|class|data for|store|database for)\s+([A-Za-z0-9\s]+?)s?(?:\.|\band\b|$)"
);
pattern!(WORD_RE, r"\b([A-Za-z]+)\b");

// Content
pattern!(
    AUDIENCE_RE,
    r"(?i)(?:\bfor|targeting|aimed at)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);
pattern!(
    CONTENT_TYPE_RE,
    r"(?i)(?:create|write|develop)\s+(?:a|an)\s+([A-Za-z0-9\s,]+?)(?:\s+(?:for|to|that|which|about)\b|\.|$)"
);
pattern!(
    TONE_RE,
    r"(?i)(?:tone|style|voice|language)\s+(?:should be|must be|needs to be|is|of)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);

// Business
pattern!(
    STAKEHOLDER_RE,
    r"(?i)(?:\bfor|targeting|aimed at|involving)\s+([A-Za-z0-9\s,]*?(?:stakeholders|customers|clients|users|employees|management|executives|departments|teams))(?:\.|\band\b|$|\s)"
);
pattern!(
    METRICS_RE,
    r"(?i)(?:measure|metric|kpi|goal|target|objective)\s+(?:of|for|to|is|are)\s+([A-Za-z0-9\s,\.%$]+?)(?:\.|\band\b|$)"
);
pattern!(
    TIMELINE_RE,
    r"(?i)\b(?:within|in|over|for|during)\s+((?:[A-Za-z0-9]+\s+){0,2}?(?:days|weeks|months|years|quarters))\b"
);

// Creative
pattern!(
    STYLE_RE,
    r"(?i)(?:style|aesthetic|feel|look|appearance|design)\s+(?:of|should be|like|similar to|inspired by)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);
pattern!(
    EMOTION_RE,
    r"(?i)(?:feel|feeling|emotion|mood|atmosphere|tone|evoke|inspire|convey)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);
pattern!(
    INSPIRATION_RE,
    r"(?i)(?:inspired by|\blike|similar to|in the style of|referencing)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);

// Education
pattern!(
    LEARNING_RE,
    r"(?i)(?:learn|teach|understand|comprehend|master|grasp)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);
pattern!(
    LEVEL_RE,
    r"(?i)(?:\bfor|targeting|aimed at)\s+([A-Za-z0-9\s,]*?(?:beginners|intermediates|advanced|experts|students|learners|professionals|novices))\b"
);
pattern!(
    DELIVERY_RE,
    r"(?i)(?:through|via|using|\bby|with)\s+([A-Za-z0-9\s,]*?(?:course|lesson|module|tutorial|workshop|webinar|class|lecture|presentation))\b"
);
pattern!(
    ASSESSMENT_RE,
    r"(?i)(?:assess|evaluate|measure|test|quiz|exam)\s+([A-Za-z0-9\s,\.]+?)(?:\.|\band\b|$)"
);

static REQUIREMENT_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)(?:must|should|need to|has to|will|shall)\s+([^\.;,]+?)(?:\.|\band\b|$)",
        r"(?i)(?:requirement is|requirements are|required to)\s+([^\.;,]+?)(?:\.|\band\b|$)",
        r"(?i)(?:implement|create|build|develop|include|support)\s+([^\.;,]+?)(?:\.|\band\b|$)",
    ]
    .map(|re| Regex::new(re).expect("valid requirement regex"))
});

static KEY_POINT_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)(?:key points?|main points?|important points?|highlights?|key messages?|key aspects?)\s+(?:include|are|is)?\s*[:\-–]?\s*([^\.;]+?)(?:\.|\band\b|$)",
        r"(?i)(?:focus on|emphasize|highlight|stress|underscore)\s+([^\.;,]+?)(?:\.|\band\b|$)",
        r"(?i)(?:covering|discussing|explaining|about)\s+([^\.;,]+?)(?:\.|\band\b|$)",
    ]
    .map(|re| Regex::new(re).expect("valid key point regex"))
});

const COMMON_ENTITIES: &[&str] = &[
    "user",
    "product",
    "order",
    "customer",
    "account",
    "profile",
    "transaction",
    "item",
    "category",
    "comment",
    "review",
    "post",
    "message",
    "notification",
    "event",
    "task",
    "project",
];

const MIN_REQUIREMENT_CHARS: usize = 6;
const MIN_ENTITY_CHARS: usize = 3;
const MIN_SENTENCE_CHARS: usize = 16;
const MAX_KEY_POINTS: usize = 3;

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().trim_end_matches(',').trim().to_string())
        .filter(|s| !s.is_empty())
}

fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Requirement phrases introduced by modal or build verbs
pub fn extract_requirements(description: &str) -> Vec<String> {
    let mut requirements = Vec::new();
    for re in REQUIREMENT_RES.iter() {
        for caps in re.captures_iter(description) {
            if let Some(m) = caps.get(1) {
                let req = m.as_str().trim();
                if req.len() >= MIN_REQUIREMENT_CHARS {
                    push_unique(&mut requirements, req.to_string());
                }
            }
        }
    }
    requirements
}

/// Named entities plus common domain nouns ("user", "order", ...)
pub fn extract_data_entities(description: &str) -> Vec<String> {
    let mut entities = Vec::new();
    for caps in ENTITY_RE.captures_iter(description) {
        if let Some(m) = caps.get(1) {
            let entity = m.as_str().trim();
            if entity.len() >= MIN_ENTITY_CHARS {
                push_unique(&mut entities, entity.to_lowercase());
            }
        }
    }
    for word in WORD_RE.find_iter(description) {
        let lower = word.as_str().to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        if COMMON_ENTITIES.contains(&lower.as_str()) {
            push_unique(&mut entities, lower.clone());
        } else if COMMON_ENTITIES.contains(&singular) {
            push_unique(&mut entities, singular.to_string());
        }
    }
    entities
}

/// Up to three key messages; falls back to the first substantial sentences
pub fn extract_key_points(description: &str) -> Vec<String> {
    let mut points = Vec::new();
    for re in KEY_POINT_RES.iter() {
        for caps in re.captures_iter(description) {
            if let Some(m) = caps.get(1) {
                let point = m.as_str().trim();
                if point.len() >= MIN_REQUIREMENT_CHARS {
                    push_unique(&mut points, point.to_string());
                }
            }
        }
    }

    if points.is_empty() {
        points = description
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| s.len() >= MIN_SENTENCE_CHARS)
            .map(String::from)
            .collect();
    }
    points.truncate(MAX_KEY_POINTS);
    points
}

fn as_bullets(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextExtractor;

impl ContextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Values found in `description` for the given domain's keys
    pub fn extract(&self, description: &str, domain: Domain) -> BTreeMap<String, String> {
        let mut found = BTreeMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                found.insert(key.to_string(), value);
            }
        };

        match domain {
            Domain::Software => {
                put("language_stack", capture(&TECH_STACK_RE, description));
                put("requirements", as_bullets(&extract_requirements(description)));
                put("quality_attributes", capture(&QUALITY_RE, description));
                let entities: Vec<String> = extract_data_entities(description)
                    .iter()
                    .map(|e| format!("{} entity with appropriate attributes", title_case(e)))
                    .collect();
                put("data_entities", as_bullets(&entities));
            }
            Domain::Content => {
                put("audience", capture(&AUDIENCE_RE, description));
                put("content_type", capture(&CONTENT_TYPE_RE, description));
                put("tone", capture(&TONE_RE, description));
                put("key_messages", as_bullets(&extract_key_points(description)));
            }
            Domain::Business => {
                put("stakeholders", capture(&STAKEHOLDER_RE, description));
                put("metrics", capture(&METRICS_RE, description));
                put("timeline", capture(&TIMELINE_RE, description));
            }
            Domain::Creative => {
                put("style", capture(&STYLE_RE, description));
                put("emotional_response", capture(&EMOTION_RE, description));
                put("inspirations", capture(&INSPIRATION_RE, description));
            }
            Domain::Education => {
                put("learning_objectives", capture(&LEARNING_RE, description));
                put("audience_level", capture(&LEVEL_RE, description));
                put("delivery_method", capture(&DELIVERY_RE, description));
                put("assessment", capture(&ASSESSMENT_RE, description));
            }
            _ => {}
        }

        debug!("Extracted {} context values for {}", found.len(), domain);
        found
    }

    /// Fill extras the caller has not set; returns the keys added
    pub fn apply(&self, ctx: &mut GenerationContext, domain: Domain) -> Vec<String> {
        let mut added = Vec::new();
        for (key, value) in self.extract(&ctx.objective, domain) {
            if ctx.extra(&key).is_none() {
                ctx.set_extra(key.clone(), value);
                added.push(key);
            }
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_software_extraction() {
        let text = "Build an inventory service using Rust and Axum for warehouse staff. \
                    It must track stock per location. The API should be fast and reliable.";
        let found = ContextExtractor::new().extract(text, Domain::Software);
        assert_eq!(found["language_stack"], "Rust and Axum");
        assert!(found["requirements"].contains("- track stock per location"));
        assert_eq!(found["quality_attributes"], "fast");
    }

    #[test]
    fn test_data_entities() {
        let entities = extract_data_entities("Store orders for each customer and send notifications");
        assert!(entities.contains(&"customer".to_string()));
        assert!(entities.contains(&"order".to_string()));
        assert!(entities.contains(&"notification".to_string()));
    }

    #[test]
    fn test_content_extraction() {
        let text = "Write a blog post about remote work for busy parents. The tone should be friendly.";
        let found = ContextExtractor::new().extract(text, Domain::Content);
        assert_eq!(found["content_type"], "blog post");
        assert_eq!(found["audience"], "busy parents");
        assert_eq!(found["tone"], "friendly");
        assert!(found["key_messages"].contains("remote work for busy parents"));
    }

    #[test]
    fn test_content_type_needs_whole_word_terminator() {
        let found = ContextExtractor::new().extract("Write a story.", Domain::Content);
        assert_eq!(found["content_type"], "story");
    }

    #[test]
    fn test_business_extraction() {
        let text = "Plan a rollout for regional teams within 6 months. The goal is 20% lower churn.";
        let found = ContextExtractor::new().extract(text, Domain::Business);
        assert_eq!(found["stakeholders"], "regional teams");
        assert_eq!(found["timeline"], "6 months");
        assert_eq!(found["metrics"], "20% lower churn");
    }

    #[test]
    fn test_key_points_fall_back_to_sentences() {
        let points = extract_key_points("Our bakery opened last spring! Sales doubled since then. Ok.");
        assert_eq!(points, vec!["Our bakery opened last spring", "Sales doubled since then"]);
    }

    #[test]
    fn test_apply_keeps_caller_values() {
        let mut ctx = GenerationContext::new("Write an email for new subscribers.")
            .with_extra("audience", "executive");
        let added = ContextExtractor::new().apply(&mut ctx, Domain::Content);
        assert_eq!(ctx.extra("audience"), Some("executive"));
        assert!(added.contains(&"content_type".to_string()));
        assert_eq!(ctx.extra("content_type"), Some("email"));
    }

    #[test]
    fn test_general_domain_extracts_nothing() {
        assert!(ContextExtractor::new().extract("anything", Domain::General).is_empty());
    }
}
