//! Human and JSON output for CLI commands
//!
//! Human output goes to the terminal with status glyphs; JSON output is one
//! document per command on stdout so scripts (cron wrappers, monitoring) can
//! parse it. Diagnostics and logs always go to stderr.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &Value);
}

/// Checkmarks and indentation for a terminal
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &Value) {}
}

/// Machine-readable output; only [`OutputFormatter::print_json`] writes to stdout
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, _message: &str) {}
    fn error(&self, message: &str) {
        eprintln!("{}", serde_json::json!({"success": false, "error": message}));
    }
    fn warn(&self, message: &str) {
        eprintln!("{}", serde_json::json!({"level": "warning", "message": message}));
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}

/// Serializes a command result for [`OutputFormatter::print_json`]
pub fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("Failed to serialize command output")
}
