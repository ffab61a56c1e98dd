//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI and plain summary
//! output of scan results, single-file analyses and breadcrumbs.

pub mod ansi;
mod json;
mod yaml;

pub use ansi::{format_ansi, format_breadcrumb_ansi, format_file_ansi, format_folds_ansi};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::breadcrumbs::Breadcrumb;
use crate::folding::FoldRegion;
use crate::models::{AnalysisMap, FileAnalysis};
use std::str::FromStr;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text summary
    Summary,
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "ansi" => Ok(OutputFormat::Ansi),
            "summary" | "text" => Ok(OutputFormat::Summary),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Format scan results in the specified format
pub fn format_output(data: &AnalysisMap, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
        OutputFormat::Ansi => Ok(format_ansi(data)),
        OutputFormat::Summary => Ok(format_summary(data)),
    }
}

/// Format a single file analysis
pub fn format_file(file: &FileAnalysis, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(file),
        OutputFormat::Yaml => format_yaml(file),
        OutputFormat::Ansi => Ok(format_file_ansi(file)),
        OutputFormat::Summary => Ok(format_file_summary(file)),
    }
}

/// Format the fold regions of a file
pub fn format_folds(file: &FileAnalysis, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(&file.folds),
        OutputFormat::Yaml => format_yaml(&file.folds),
        OutputFormat::Ansi => Ok(format_folds_ansi(file)),
        OutputFormat::Summary => Ok(format_folds_summary(&file.folds)),
    }
}

/// Format a breadcrumb trail
pub fn format_breadcrumb(crumb: &Breadcrumb, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(crumb),
        OutputFormat::Yaml => format_yaml(crumb),
        OutputFormat::Ansi => Ok(format_breadcrumb_ansi(crumb)),
        OutputFormat::Summary => Ok(crumb.path()),
    }
}

/// Format as plain text summary
pub fn format_summary(data: &AnalysisMap) -> String {
    let mut output = String::new();

    output.push_str("Elvish Scan Results\n");
    output.push_str("===================\n\n");
    output.push_str(&format!("Root: {}\n", data.root.display()));
    output.push_str(&format!("Total Files: {}\n", data.stats.total_files));
    output.push_str(&format!("Total Lines: {}\n", data.stats.total_lines));
    output.push_str(&format!("Total Statements: {}\n", data.stats.total_statements));
    output.push_str(&format!(
        "Outline Entries: {}\n",
        data.stats.total_outline_entries
    ));
    output.push_str(&format!(
        "Fold Regions: {} (braces: {}, brackets: {})\n",
        data.stats.total_folds, data.stats.brace_folds, data.stats.bracket_folds
    ));

    if data.stats.skipped_files > 0 {
        output.push_str(&format!(
            "\nSkipped files: {}\n",
            data.stats.skipped_files
        ));
    }

    let mut files_by_folds: Vec<&FileAnalysis> =
        data.files.iter().filter(|f| !f.folds.is_empty()).collect();
    files_by_folds.sort_by(|a, b| b.folds.len().cmp(&a.folds.len()));

    if !files_by_folds.is_empty() {
        output.push_str("\nTop files by folds:\n");
        for file in files_by_folds.iter().take(5) {
            output.push_str(&format!(
                "  {} ({} folds, {} lines)\n",
                file.path.display(),
                file.folds.len(),
                file.total_lines
            ));
        }
    }

    output.push_str(&format!("\nScan Duration: {}ms\n", data.metadata.scan_duration_ms));
    output.push_str(&format!(
        "Processing Speed: {:.2} files/sec\n",
        data.metadata.files_per_second
    ));

    output
}

/// Format a single file as plain text
pub fn format_file_summary(file: &FileAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", file.path.display()));
    output.push_str(&format!("Lines: {}\n", file.total_lines));
    output.push_str(&format!("Tokens: {}\n", file.token_count));
    output.push_str(&format!(
        "Statements: {} ({} classified)\n",
        file.statements.total, file.statements.classified
    ));
    output.push_str(&format!(
        "Folds: {} ({} lines hidden when collapsed)\n",
        file.fold_count(),
        file.lines_hidden()
    ));

    output.push_str("\nOutline:\n");
    for entry in &file.outline {
        output.push_str(&format!(
            "  {} ({}:{})\n",
            entry.component.label, entry.start_line, entry.end_line
        ));
    }

    output
}

fn format_folds_summary(folds: &[FoldRegion]) -> String {
    folds
        .iter()
        .map(|f| {
            format!(
                "{}-{} {} {}\n",
                f.start_line + 1,
                f.end_line + 1,
                f.placeholder,
                f.group_id
            )
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Summary);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_format_summary() {
        let output = format_summary(&fixtures::map());
        assert!(output.contains("Total Files: 1"));
        assert!(output.contains("Fold Regions: 2 (braces: 1, brackets: 1)"));
        assert!(output.contains("hello.elv (2 folds, 6 lines)"));
    }

    #[test]
    fn test_format_file_summary() {
        let output = format_file_summary(&fixtures::file());
        assert!(output.contains("Statements: 2 (1 classified)"));
        assert!(output.contains("  fn hello (1:3)"));
    }

    #[test]
    fn test_format_folds_summary() {
        let output = format_folds(&fixtures::file(), OutputFormat::Summary).unwrap();
        assert_eq!(output, "1-3 {...} elvish-brace-9\n4-6 [&...] elvish-bracket-31\n");
    }

    #[test]
    fn test_format_breadcrumb_summary() {
        let source = "fn hello {\n  echo hi\n}\n";
        let crumb = crate::engine::breadcrumb_in_source(source, 2, 2);
        assert_eq!(
            format_breadcrumb(&crumb, OutputFormat::Summary).unwrap(),
            "fn hello"
        );
    }
}
