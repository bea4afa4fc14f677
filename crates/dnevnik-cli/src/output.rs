//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::Local;

use dnevnik_core::query;
use dnevnik_core::Entry;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single entry in full
    pub fn print_entry(&self, entry: &Entry) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:           {}", entry.id);
                println!("Title:        {} {}", entry.emoji, entry.title);
                if !entry.tags.is_empty() {
                    println!("Tags:         {}", entry.tags.join(", "));
                }
                println!(
                    "Created:      {}",
                    entry
                        .created_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                );
                if entry.updated_at != entry.created_at {
                    println!(
                        "Updated:      {}",
                        entry
                            .updated_at
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M")
                    );
                }
                println!();
                print_section("Situation", &entry.situation);
                print_section("Thoughts", &entry.thoughts);
                print_section("Body feelings", &entry.body_feelings);
                if !entry.body_zones.is_empty() {
                    let zones: Vec<&str> =
                        entry.body_zones.iter().map(|zone| zone.label()).collect();
                    print_section("Body zones", &zones.join(", "));
                }
                print_section("Consequences", &entry.consequences);
                print_section("Without the problem", &entry.without_problem);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entry).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", entry.id);
            }
        }
    }

    /// Print a list of entries grouped by day
    pub fn print_grouped(&self, entries: &[&Entry]) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No entries found.");
                    return;
                }

                let today = Local::now().date_naive();
                let groups = query::group_by_day(entries, &Local, today);

                for group in &groups {
                    println!("── {} ──", group.label);
                    for entry in &group.entries {
                        let time = entry.created_at.with_timezone(&Local).format("%H:%M");
                        let tags = if entry.tags.is_empty() {
                            String::new()
                        } else {
                            format!("  [{}]", entry.tags.join(", "))
                        };
                        println!(
                            "{} | {} {} {}{}",
                            entry.id,
                            time,
                            entry.emoji,
                            truncate(&entry.title, 40),
                            tags
                        );
                    }
                    println!();
                }
                println!("{} entry(ies)", entries.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entries).unwrap());
            }
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.id);
                }
            }
        }
    }

    /// Print a list of tags with usage counts
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json_tags).unwrap());
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Print a labeled block, skipping empty values
fn print_section(label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    println!("{}:", label);
    for line in value.lines() {
        println!("  {}", line);
    }
    println!();
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
