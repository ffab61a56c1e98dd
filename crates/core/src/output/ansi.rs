//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for outlines, fold regions
//! and breadcrumbs.

use crate::breadcrumbs::Breadcrumb;
use crate::folding::Delimiter;
use crate::models::{AnalysisMap, FileAnalysis};
use crate::structure::StructuralKind;

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BRIGHT_CYAN: &str = "\x1b[96m";
const BRIGHT_MAGENTA: &str = "\x1b[95m";
const BRIGHT_GREEN: &str = "\x1b[92m";

const BG_BLUE: &str = "\x1b[44m";

fn kind_color(kind: StructuralKind) -> &'static str {
    match kind {
        StructuralKind::Function => BRIGHT_CYAN,
        StructuralKind::Lambda => BRIGHT_MAGENTA,
        StructuralKind::Try | StructuralKind::Catch | StructuralKind::Finally => YELLOW,
        _ => DIM,
    }
}

/// Format scan results as ANSI colored text
pub fn format_ansi(data: &AnalysisMap) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}{}  Elvish Scan Results  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    output.push_str(&format!(
        "{}Root:{} {}\n\n",
        BOLD,
        RESET,
        data.root.display()
    ));

    output.push_str(&format!(
        "{}Files:{} {}  {}Lines:{} {}  {}Outline:{} {}  {}Folds:{} {}\n\n",
        BOLD,
        RESET,
        data.stats.total_files,
        BOLD,
        RESET,
        data.stats.total_lines,
        BOLD,
        RESET,
        data.stats.total_outline_entries,
        BOLD,
        RESET,
        data.stats.total_folds
    ));

    for file in &data.files {
        output.push_str(&format_file_ansi(file));
    }

    if data.stats.skipped_files > 0 {
        output.push_str(&format!(
            "{}{} file(s) skipped{}\n",
            RED, data.stats.skipped_files, RESET
        ));
    }

    output.push_str(&format!(
        "\n{}Scan completed in {}ms ({:.2} files/sec){}\n",
        DIM, data.metadata.scan_duration_ms, data.metadata.files_per_second, RESET
    ));

    output
}

/// Format a single file's outline
pub fn format_file_ansi(file: &FileAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}{}{}{} {}({} lines, {} folds){}\n",
        BOLD,
        BRIGHT_GREEN,
        file.path.display(),
        RESET,
        DIM,
        file.total_lines,
        file.fold_count(),
        RESET
    ));

    for entry in &file.outline {
        let kind = entry.component.kind;
        output.push_str(&format!(
            "   {}{}{} {}:{}-{}{}\n",
            kind_color(kind),
            entry.component.label,
            RESET,
            DIM,
            entry.start_line,
            entry.end_line,
            RESET
        ));
    }

    output.push('\n');
    output
}

/// Format the fold regions of a file
pub fn format_folds_ansi(file: &FileAnalysis) -> String {
    let mut output = format!("{}{}{}\n", BOLD, file.path.display(), RESET);

    for fold in &file.folds {
        let color = match fold.delimiter {
            Delimiter::Brace => BRIGHT_CYAN,
            Delimiter::Bracket => CYAN,
        };
        output.push_str(&format!(
            "   {}{}-{}{} {}{}{}\n",
            DIM,
            fold.start_line + 1,
            fold.end_line + 1,
            RESET,
            color,
            fold.placeholder,
            RESET
        ));
    }

    output
}

/// Format breadcrumb trail as ANSI
pub fn format_breadcrumb_ansi(crumb: &Breadcrumb) -> String {
    if crumb.is_empty() {
        return format!("{}(top level){}", DIM, RESET);
    }

    crumb
        .components
        .iter()
        .map(|c| format!("{}{}{}", kind_color(c.kind), c.label, RESET))
        .collect::<Vec<_>>()
        .join(&format!(" {}>{} ", DIM, RESET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_format_ansi_basic() {
        let output = format_ansi(&fixtures::map());
        assert!(output.contains("Elvish Scan Results"));
        assert!(output.contains("hello.elv"));
        assert!(output.contains("fn hello"));
    }

    #[test]
    fn test_format_folds_ansi() {
        let output = format_folds_ansi(&fixtures::file());
        assert!(output.contains("{...}"));
        assert!(output.contains("[&...]"));
    }

    #[test]
    fn test_format_breadcrumb_ansi() {
        let empty = Breadcrumb::empty(0);
        assert!(format_breadcrumb_ansi(&empty).contains("(top level)"));

        let crumb = crate::engine::breadcrumb_in_source("{|x|\n  put $x\n}", 2, 0);
        let output = format_breadcrumb_ansi(&crumb);
        assert!(output.contains("λ"));
        assert!(output.starts_with(BRIGHT_MAGENTA));
    }
}
