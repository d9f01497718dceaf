//! Prompt History
//!
//! JSON-file history of generated prompts, kept newest-last and trimmed to
//! a maximum length.
//!
//! ## Storage
//!
//! - `{cache_dir}/prompt_history.json`, pretty-printed
//! - Nothing touches disk when persistence is disabled
//! - A missing or unreadable file yields an empty history

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::history::{DEFAULT_MAX_ITEMS, FILE_NAME};
use crate::types::{Domain, Result, ResultExt};

/// History configuration
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Directory holding the history file
    pub cache_dir: PathBuf,
    /// Entries retained after each record
    pub max_items: usize,
    /// Read and write the history file
    pub persist: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".cache"),
            max_items: DEFAULT_MAX_ITEMS,
            persist: true,
        }
    }
}

/// A single prompt generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub objective: String,
    pub generated_prompt: String,
    pub domain: Domain,
    #[serde(default)]
    pub techniques_used: Vec<String>,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl HistoryEntry {
    pub fn new(
        objective: impl Into<String>,
        generated_prompt: impl Into<String>,
        domain: Domain,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            objective: objective.into(),
            generated_prompt: generated_prompt.into(),
            domain,
            techniques_used: Vec::new(),
            quality_score: 0.0,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_techniques(mut self, techniques: Vec<String>) -> Self {
        self.techniques_used = techniques;
        self
    }

    pub fn with_quality(mut self, quality_score: f64) -> Self {
        self.quality_score = quality_score;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Aggregates for one domain
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainStats {
    pub count: usize,
    pub avg_quality: f64,
    pub techniques_used: BTreeMap<String, usize>,
}

/// Prompt history backed by a JSON file
pub struct HistoryStore {
    config: HistoryConfig,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Open the store, loading existing history when persistence is enabled
    pub fn open(config: HistoryConfig) -> Self {
        let entries = if config.persist {
            load_entries(&config.cache_dir.join(FILE_NAME))
        } else {
            Vec::new()
        };
        debug!("Opened history with {} entries", entries.len());
        Self { config, entries }
    }

    /// In-memory store that never touches disk
    pub fn in_memory(max_items: usize) -> Self {
        Self {
            config: HistoryConfig {
                max_items,
                persist: false,
                ..HistoryConfig::default()
            },
            entries: Vec::new(),
        }
    }

    /// History file location
    pub fn path(&self) -> PathBuf {
        self.config.cache_dir.join(FILE_NAME)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, trim to the maximum length and save
    pub fn record(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.push(entry);

        let max = self.config.max_items.max(1);
        if self.entries.len() > max {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
        }

        self.save()
    }

    /// Entries filtered by domain and minimum quality, newest last.
    /// `limit` keeps only the most recent matches.
    pub fn entries(
        &self,
        limit: Option<usize>,
        domain: Option<Domain>,
        min_quality: Option<f64>,
    ) -> Vec<&HistoryEntry> {
        let filtered: Vec<&HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| domain.is_none_or(|d| e.domain == d))
            .filter(|e| min_quality.is_none_or(|q| e.quality_score >= q))
            .collect();

        match limit {
            Some(n) if n > 0 && filtered.len() > n => filtered[filtered.len() - n..].to_vec(),
            _ => filtered,
        }
    }

    /// Highest quality entries, best first
    pub fn best(&self, limit: usize) -> Vec<&HistoryEntry> {
        let mut sorted: Vec<&HistoryEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.quality_score.total_cmp(&a.quality_score));
        sorted.truncate(limit);
        sorted
    }

    /// Count, average quality and technique usage per domain
    pub fn domain_statistics(&self) -> BTreeMap<Domain, DomainStats> {
        let mut stats: BTreeMap<Domain, DomainStats> = BTreeMap::new();
        for entry in &self.entries {
            let domain_stats = stats.entry(entry.domain).or_default();
            domain_stats.count += 1;
            domain_stats.avg_quality += (entry.quality_score - domain_stats.avg_quality)
                / domain_stats.count as f64;
            for technique in &entry.techniques_used {
                *domain_stats
                    .techniques_used
                    .entry(technique.clone())
                    .or_default() += 1;
            }
        }
        stats
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        if !self.config.persist {
            return Ok(());
        }

        std::fs::create_dir_all(&self.config.cache_dir)
            .with_context_fn(|| format!("Creating {}", self.config.cache_dir.display()))?;
        let path = self.path();
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&path, &content)
            .with_context_fn(|| format!("Writing {}", path.display()))?;

        info!(
            "Saved {} history entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}

fn load_entries(path: &Path) -> Vec<HistoryEntry> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!("Error loading history from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("Error parsing history {}: {}", path.display(), e);
        Vec::new()
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir, max_items: usize) -> HistoryStore {
        HistoryStore::open(HistoryConfig {
            cache_dir: dir.path().join("cache"),
            max_items,
            persist: true,
        })
    }

    fn entry(objective: &str, domain: Domain, quality: f64) -> HistoryEntry {
        HistoryEntry::new(objective, format!("# Task\n{}", objective), domain)
            .with_quality(quality)
    }

    #[test]
    fn test_record_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir, 10);
        store
            .record(
                entry("Build an API", Domain::Software, 0.7)
                    .with_techniques(vec!["chain_of_thought".into()])
                    .with_metadata("template", "software_basic"),
            )
            .unwrap();
        assert!(store.path().exists());

        let reopened = store_in(&dir, 10);
        assert_eq!(reopened.len(), 1);
        let loaded = reopened.entries(None, None, None)[0];
        assert_eq!(loaded.objective, "Build an API");
        assert_eq!(loaded.techniques_used, vec!["chain_of_thought"]);
        assert_eq!(loaded.metadata["template"], "software_basic");
    }

    #[test]
    fn test_trims_oldest() {
        let mut store = HistoryStore::in_memory(3);
        for i in 0..5 {
            store
                .record(entry(&format!("task {i}"), Domain::General, 0.5))
                .unwrap();
        }
        let objectives: Vec<_> = store
            .entries(None, None, None)
            .iter()
            .map(|e| e.objective.as_str())
            .collect();
        assert_eq!(objectives, vec!["task 2", "task 3", "task 4"]);
    }

    #[test]
    fn test_filters() {
        let mut store = HistoryStore::in_memory(10);
        store.record(entry("a", Domain::Software, 0.4)).unwrap();
        store.record(entry("b", Domain::Content, 0.9)).unwrap();
        store.record(entry("c", Domain::Software, 0.8)).unwrap();
        store.record(entry("d", Domain::Software, 0.6)).unwrap();

        assert_eq!(store.entries(None, Some(Domain::Software), None).len(), 3);
        assert_eq!(store.entries(None, None, Some(0.7)).len(), 2);

        let recent = store.entries(Some(2), Some(Domain::Software), None);
        assert_eq!(recent[0].objective, "c");
        assert_eq!(recent[1].objective, "d");

        assert_eq!(store.entries(Some(0), None, None).len(), 4);
    }

    #[test]
    fn test_best() {
        let mut store = HistoryStore::in_memory(10);
        store.record(entry("low", Domain::General, 0.2)).unwrap();
        store.record(entry("high", Domain::General, 0.9)).unwrap();
        store.record(entry("mid", Domain::General, 0.5)).unwrap();

        let best: Vec<_> = store.best(2).iter().map(|e| e.objective.as_str()).collect();
        assert_eq!(best, vec!["high", "mid"]);
    }

    #[test]
    fn test_domain_statistics() {
        let mut store = HistoryStore::in_memory(10);
        store
            .record(
                entry("a", Domain::Software, 0.4).with_techniques(vec!["few_shot".into()]),
            )
            .unwrap();
        store
            .record(
                entry("b", Domain::Software, 0.8)
                    .with_techniques(vec!["few_shot".into(), "role_prompting".into()]),
            )
            .unwrap();
        store.record(entry("c", Domain::Content, 1.0)).unwrap();

        let stats = store.domain_statistics();
        let software = &stats[&Domain::Software];
        assert_eq!(software.count, 2);
        assert!((software.avg_quality - 0.6).abs() < 1e-9);
        assert_eq!(software.techniques_used["few_shot"], 2);
        assert_eq!(software.techniques_used["role_prompting"], 1);
        assert_eq!(stats[&Domain::Content].count, 1);
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir, 10);
        store.record(entry("a", Domain::General, 0.5)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(store_in(&dir, 10).is_empty());
    }

    #[test]
    fn test_corrupt_file_yields_empty_history() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(cache.join(FILE_NAME), "{ not json").unwrap();

        assert!(store_in(&dir, 10).is_empty());
    }

    #[test]
    fn test_persistence_disabled_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = HistoryStore::open(HistoryConfig {
            cache_dir: dir.path().join("cache"),
            max_items: 10,
            persist: false,
        });
        store.record(entry("a", Domain::General, 0.5)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.path().exists());
    }
}
