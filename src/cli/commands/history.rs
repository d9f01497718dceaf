//! History Command
//!
//! Inspect previously generated prompts.
//!
//! Usage:
//!   promptforge history list [--limit N] [--domain D] [--min-quality Q] [-f json]
//!   promptforge history best [--limit N] [-f json]
//!   promptforge history stats [-f json]
//!   promptforge history clear

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, print_json};
use crate::history::HistoryEntry;
use crate::types::{Domain, Result};

pub fn list(
    limit: Option<usize>,
    domain: Option<Domain>,
    min_quality: Option<f64>,
    format: &str,
) -> Result<()> {
    let history = CommandContext::load()?.history();
    let entries = history.entries(limit, domain, min_quality);

    if format == "json" {
        return print_json(&entries);
    }
    print_entries(&entries);
    Ok(())
}

pub fn best(limit: usize, format: &str) -> Result<()> {
    let history = CommandContext::load()?.history();
    let entries = history.best(limit);

    if format == "json" {
        return print_json(&entries);
    }
    print_entries(&entries);
    Ok(())
}

pub fn stats(format: &str) -> Result<()> {
    let history = CommandContext::load()?.history();
    let stats = history.domain_statistics();

    if format == "json" {
        return print_json(&stats);
    }

    if stats.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    let out = Output::new();
    out.header(&format!("History ({} entries)", history.len()));
    for (domain, stat) in &stats {
        out.section(domain.as_str());
        out.field("Prompts", stat.count);
        out.score("avg quality", stat.avg_quality);
        if !stat.techniques_used.is_empty() {
            let mut techniques: Vec<(&String, &usize)> = stat.techniques_used.iter().collect();
            techniques.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            let listed: Vec<String> = techniques
                .iter()
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect();
            out.field("Techniques", listed.join(", "));
        }
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let mut history = CommandContext::load()?.history();
    let removed = history.len();
    history.clear()?;
    Output::new().success(&format!("Cleared {} history entries", removed));
    Ok(())
}

fn print_entries(entries: &[&HistoryEntry]) {
    if entries.is_empty() {
        println!("No history recorded.");
        return;
    }
    for entry in entries {
        println!(
            "{}  {:<24} {:.2}  {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.domain.as_str(),
            entry.quality_score,
            entry.objective
        );
    }
}
