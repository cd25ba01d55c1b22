//! Output formatting for phpaccess
//!
//! Supports text (colored terminal), unified diff and JSON output formats.

use colored::*;
use serde::Serialize;
use std::path::Path;

use phpaccess_gen::{GenerateError, PlannedEditSummary, Severity};

use crate::process::ProcessResult;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Diff,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "diff" => Some(OutputFormat::Diff),
            _ => None,
        }
    }
}

/// How the run ended, as reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Edited,
    Cancelled,
    Info,
    Error,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub path: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<PlannedEditSummary>,
    pub edits: usize,
    pub written: bool,
}

impl JsonOutput {
    fn new(path: &Path, outcome: Outcome) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.display().to_string(),
            outcome,
            message: None,
            classes: Vec::new(),
            edits: 0,
            written: false,
        }
    }
}

/// Reporter for a single action run
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Report generated edits; `written` tells whether the file was updated
    pub fn report_edits(&self, path: &Path, result: &ProcessResult, written: bool) {
        match self.format {
            OutputFormat::Text => {
                println!("{}", path.display().to_string().bold());
                if !written || self.verbose {
                    print_diff(&result.old_source, &result.new_source);
                    println!();
                }
                for edit in &result.planned {
                    println!(
                        "  {} {}: {}",
                        "->".green(),
                        edit.class_name,
                        edit.methods.join(", ")
                    );
                }
                println!();
                if written {
                    println!(
                        "  {} Generated {} method(s)",
                        "OK".green(),
                        method_count(result)
                    );
                } else {
                    println!("{}", "Run with --fix to apply changes".yellow());
                }
            }
            OutputFormat::Diff => {
                print_unified_diff(path, &result.old_source, &result.new_source);
            }
            OutputFormat::Json => {
                let mut output = JsonOutput::new(path, Outcome::Edited);
                output.classes = result.planned.iter().map(|edit| edit.summary()).collect();
                output.edits = result.planned.len();
                output.written = written;
                print_json(&output);
            }
        }
    }

    /// Report a dismissed selection (silent in text mode)
    pub fn report_cancelled(&self, path: &Path) {
        match self.format {
            OutputFormat::Json => print_json(&JsonOutput::new(path, Outcome::Cancelled)),
            OutputFormat::Text if self.verbose => println!("{}: Cancelled", path.display()),
            _ => {}
        }
    }

    /// Report a run that stopped before producing edits
    pub fn report_stopped(&self, path: &Path, error: &GenerateError) {
        let outcome = match error.severity() {
            Severity::Error => Outcome::Error,
            Severity::Info => Outcome::Info,
            Severity::Silent => Outcome::Cancelled,
        };

        match self.format {
            OutputFormat::Json => {
                let mut output = JsonOutput::new(path, outcome);
                output.message = Some(error.to_string());
                print_json(&output);
            }
            _ => print_status(error),
        }
    }
}

fn method_count(result: &ProcessResult) -> usize {
    result.planned.iter().map(|edit| edit.methods.len()).sum()
}

/// Print a user-facing status line for a terminal outcome
pub fn print_status(error: &GenerateError) {
    match error.severity() {
        Severity::Error => eprintln!("{}: {}", "Error".red(), error),
        Severity::Info => println!("{}: {}", "Info".blue(), error),
        Severity::Silent => {}
    }
}

fn print_json(output: &JsonOutput) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{}: {}", "Error".red(), e),
    }
}

/// Print a colored diff between old and new content
fn print_diff(old: &str, new: &str) {
    for diff_result in diff::lines(old, new) {
        match diff_result {
            diff::Result::Left(l) => {
                println!("  {}", format!("- {}", l).red());
            }
            diff::Result::Right(r) => {
                println!("  {}", format!("+ {}", r).green());
            }
            diff::Result::Both(_, _) => {
                // Skip unchanged lines for cleaner output
            }
        }
    }
}

/// Print unified diff format (standard diff -u compatible)
fn print_unified_diff(path: &Path, old: &str, new: &str) {
    print!("{}", unified_diff(path, old, new));
}

fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    use similar::{ChangeTag, TextDiff};

    let diff = TextDiff::from_lines(old, new);
    let path_str = path.display().to_string();

    let mut out = String::new();
    out.push_str(&format!("--- a/{}\n", path_str));
    out.push_str(&format!("+++ b/{}\n", path_str));

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        out.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            out.push_str(&format!("{}{}", sign, change));
            if change.missing_newline() {
                out.push('\n');
            }
        }
    }
    out
}
