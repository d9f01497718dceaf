//! Shared utility functions for parameter extraction and text formatting.
//!
//! ## JSON Extraction Helpers
//!
//! Technique parameters arrive as `serde_json::Value` maps:
//! - `json_string`, `json_string_or` - Extract strings
//! - `json_string_array` - Extract string arrays (or a comma list string)
//! - `json_i64` - Extract integers

use serde_json::Value;
use std::collections::BTreeMap;

/// Parameter map handed to technique application
pub type Params = BTreeMap<String, Value>;

// =============================================================================
// JSON Value Extraction Helpers
// =============================================================================

/// Extract non-empty string parameter by key.
#[inline]
pub fn json_string(params: &Params, key: &str) -> Option<String> {
    params
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Extract string with default value.
#[inline]
pub fn json_string_or(params: &Params, key: &str, default: &str) -> String {
    json_string(params, key).unwrap_or_else(|| default.to_string())
}

/// Extract string array by key. A plain string is split on commas.
pub fn json_string_array(params: &Params, key: &str) -> Vec<String> {
    match params.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|s| s.as_str().map(String::from))
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract i64 with default. Numeric strings are accepted.
#[inline]
pub fn json_i64(params: &Params, key: &str, default: i64) -> i64 {
    match params.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

// =============================================================================
// Number Formatting
// =============================================================================

/// Round to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// String Utilities
// =============================================================================

/// Title-case every word: first letter after a non-letter is uppercased,
/// the rest lowercased ("blog post" -> "Blog Post", "c#" -> "C#").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Format items as an indented bullet list
pub fn bullet_list(items: &[impl AsRef<str>], indent: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}- {}", indent, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format items as a numbered list starting at 1
pub fn numbered_list(items: &[impl AsRef<str>], indent: &str) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}{}. {}", indent, i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("blog post"), "Blog Post");
        assert_eq!(title_case("social media post"), "Social Media Post");
        assert_eq!(title_case("c#"), "C#");
        assert_eq!(title_case("GENERAL business"), "General Business");
        assert_eq!(title_case("time-series"), "Time-Series");
    }

    #[test]
    fn test_json_string_array_forms() {
        let mut params = Params::new();
        params.insert("a".into(), json!(["x", "y"]));
        params.insert("b".into(), json!("x, y ,"));
        assert_eq!(json_string_array(&params, "a"), vec!["x", "y"]);
        assert_eq!(json_string_array(&params, "b"), vec!["x", "y"]);
        assert!(json_string_array(&params, "c").is_empty());
    }

    #[test]
    fn test_json_i64_from_string() {
        let mut params = Params::new();
        params.insert("n".into(), json!("5"));
        params.insert("m".into(), json!(4));
        assert_eq!(json_i64(&params, "n", 3), 5);
        assert_eq!(json_i64(&params, "m", 3), 4);
        assert_eq!(json_i64(&params, "missing", 3), 3);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(1.0), 1.0);
    }

    #[test]
    fn test_lists() {
        assert_eq!(bullet_list(&["a", "b"], "   "), "   - a\n   - b");
        assert_eq!(numbered_list(&["a", "b"], ""), "1. a\n2. b");
    }
}
