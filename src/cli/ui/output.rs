use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// `  label      0.75 ███████░░░` with the bar colored by score
    pub fn score(&self, label: &str, score: f64) {
        let bar = score_bar(score, 10);
        let bar = if score >= 0.7 {
            style(bar).green()
        } else if score >= 0.4 {
            style(bar).yellow()
        } else {
            style(bar).red()
        };
        println!("  {:<26} {:.2} {}", label, score, bar);
    }

    /// Dimmed key/value line
    pub fn field(&self, key: &str, value: impl std::fmt::Display) {
        println!("  {} {}", style(format!("{}:", key)).dim(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-width bar for a score in 0.0 - 1.0
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
