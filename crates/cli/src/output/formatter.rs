//! Human and JSON output
//!
//! In JSON mode stdout carries exactly one JSON document per command and
//! errors go to stderr as `{"error": ...}`. Status messages are suppressed.

use comfy_table::{presets, Table};
use console::{style, StyledObject};
use serde::Serialize;

use super::OutputConfig;

#[derive(Debug, Clone, Copy)]
enum Level {
    Success,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Warning => "⚠",
            Level::Error => "✗",
        }
    }

    fn paint(self) -> StyledObject<&'static str> {
        let marker = style(self.marker());
        match self {
            Level::Success => marker.green(),
            Level::Warning => marker.yellow(),
            Level::Error => marker.red().bold(),
        }
    }
}

/// Writes command results according to the output flags
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    fn colors_enabled(&self) -> bool {
        !(self.config.no_color || self.config.json)
    }

    fn line(&self, level: Level, message: &str) -> String {
        if self.colors_enabled() {
            format!("{} {message}", level.paint())
        } else {
            format!("{} {message}", level.marker())
        }
    }

    /// Confirmation on stdout; silent in quiet and JSON modes
    pub fn success(&self, message: &str) {
        if !(self.config.quiet || self.config.json) {
            println!("{}", self.line(Level::Success, message));
        }
    }

    /// Advisory on stderr; silent in quiet and JSON modes
    pub fn warning(&self, message: &str) {
        if !(self.config.quiet || self.config.json) {
            eprintln!("{}", self.line(Level::Warning, message));
        }
    }

    /// Errors are printed in every mode, quiet included
    pub fn error(&self, message: &str) {
        if self.config.json {
            eprintln!("{}", serde_json::json!({ "error": message }));
        } else {
            eprintln!("{}", self.line(Level::Error, message));
        }
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => self.error(&format!("Failed to serialize output: {e}")),
        }
    }

    pub fn println(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }

    /// Borderless, column-aligned table
    pub fn table(&self, header: &[&str], rows: Vec<Vec<String>>) {
        if !self.config.quiet {
            println!("{}", render_table(header, rows));
        }
    }
}

fn render_table(header: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING).set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markers_without_color() {
        let formatter = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        assert_eq!(formatter.line(Level::Success, "done"), "✓ done");
        assert_eq!(formatter.line(Level::Error, "failed"), "✗ failed");
    }

    #[test]
    fn test_json_mode_disables_color() {
        let formatter = Formatter::new(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
        assert_eq!(formatter.line(Level::Warning, "careful"), "⚠ careful");
    }

    #[test]
    fn test_render_table_contains_cells() {
        let rendered = render_table(
            &["Name", "Size"],
            vec![vec!["a.txt".into(), "1 B".into()]],
        )
        .to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("a.txt"));
        assert!(rendered.contains("1 B"));
    }
}
