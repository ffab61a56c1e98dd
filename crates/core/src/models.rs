//! Data models for scan and analysis results
//!
//! Everything here is serde-serializable so the output module can render it
//! as JSON or YAML without extra mapping.

use crate::breadcrumbs::BreadcrumbComponent;
use crate::folding::{Delimiter, FoldRegion};
use crate::structure::Statement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Counts describing how a file splits into statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// All statements, trivia-only ones included
    pub total: usize,

    /// Statements that received a structural kind
    pub classified: usize,

    /// Trailing whitespace that forms a statement of its own
    pub trivia_only: usize,

    /// Classified statements per breadcrumb keyword
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_kind: BTreeMap<String, usize>,
}

impl StatementSummary {
    pub fn new(statements: &[Statement], outline: &[BreadcrumbComponent]) -> Self {
        let mut by_kind = BTreeMap::new();
        for component in outline {
            *by_kind
                .entry(component.kind.keyword().to_string())
                .or_insert(0) += 1;
        }

        Self {
            total: statements.len(),
            classified: outline.len(),
            trivia_only: statements.iter().filter(|s| s.is_trivia_only()).count(),
            by_kind,
        }
    }
}

/// An outline entry with its line range resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    #[serde(flatten)]
    pub component: BreadcrumbComponent,

    /// Starting line number (1-indexed)
    pub start_line: usize,

    /// Ending line number (1-indexed)
    pub end_line: usize,
}

/// Complete analysis of one Elvish source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Path to the source file, relative to the scan root when scanned
    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_path: Option<PathBuf>,

    pub total_lines: usize,

    pub token_count: usize,

    pub statements: StatementSummary,

    /// Classified statements in source order
    pub outline: Vec<OutlineEntry>,

    /// Fold regions ordered by start offset
    pub folds: Vec<FoldRegion>,
}

impl FileAnalysis {
    /// Set the file paths (builder pattern)
    pub fn with_path(mut self, path: PathBuf, absolute_path: Option<PathBuf>) -> Self {
        self.path = path;
        self.absolute_path = absolute_path;
        self
    }

    pub fn fold_count(&self) -> usize {
        self.folds.len()
    }

    pub fn count_folds(&self, delimiter: Delimiter) -> usize {
        self.folds.iter().filter(|f| f.delimiter == delimiter).count()
    }

    /// Lines hidden when every outermost region is collapsed
    pub fn lines_hidden(&self) -> usize {
        let mut hidden = 0;
        let mut outer: Option<&FoldRegion> = None;
        for fold in &self.folds {
            if outer.is_some_and(|o| o.contains(fold)) {
                continue;
            }
            hidden += fold.hidden_lines();
            outer = Some(fold);
        }
        hidden
    }
}

/// Result of a directory scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMap {
    /// Project root directory
    pub root: PathBuf,

    pub files: Vec<FileAnalysis>,

    pub stats: ScanStats,

    pub metadata: ScanMetadata,
}

/// Summary statistics for a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_tokens: usize,
    pub total_statements: usize,
    pub total_outline_entries: usize,
    pub total_folds: usize,
    pub brace_folds: usize,
    pub bracket_folds: usize,

    /// Files found but not analyzed (unreadable or not UTF-8)
    pub skipped_files: usize,
}

impl ScanStats {
    pub fn from_files(files: &[FileAnalysis], skipped_files: usize) -> Self {
        Self {
            total_files: files.len(),
            total_lines: files.iter().map(|f| f.total_lines).sum(),
            total_tokens: files.iter().map(|f| f.token_count).sum(),
            total_statements: files.iter().map(|f| f.statements.total).sum(),
            total_outline_entries: files.iter().map(|f| f.outline.len()).sum(),
            total_folds: files.iter().map(|f| f.fold_count()).sum(),
            brace_folds: files.iter().map(|f| f.count_folds(Delimiter::Brace)).sum(),
            bracket_folds: files
                .iter()
                .map(|f| f.count_folds(Delimiter::Bracket))
                .sum(),
            skipped_files,
        }
    }
}

/// Metadata about the scan operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Duration of scan in milliseconds
    pub scan_duration_ms: u64,

    /// Files processed per second
    pub files_per_second: f64,

    /// ISO timestamp of scan
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// A file rendered with its outermost regions collapsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
    pub fold_count: usize,
    pub lines_hidden: usize,
}
