//! elvscope-core - Structural analysis for Elvish scripts
//!
//! This crate turns Elvish source into a flat list of statements and derives
//! two editor features from it: breadcrumbs naming the block under the
//! cursor, and collapsible fold regions for braces and brackets.
//!
//! The analysis never rejects a script. Unbalanced delimiters, stray closers
//! and unterminated strings all produce a best-effort result.
//!
//! # Features
//!
//! - **Lossless tokenizer** for Elvish with byte offsets.
//! - **Statement segmentation** tracking brace, bracket and paren depth.
//! - **Breadcrumbs**: function, conditional, loop, exception and lambda blocks.
//! - **Fold regions** with brace context inference and map/list placeholders.
//! - **Directory scans** in parallel with gitignore-aware filtering.
//! - **Multiple Output Formats**: JSON, YAML, ANSI-colored terminal output
//!   and plain summaries.
//!
//! # Example
//!
//! ```rust,no_run
//! use elvscope_core::{format_output, ElvishScanner, OutputFormat, ScanConfig};
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(PathBuf::from("."));
//! let scanner = ElvishScanner::new(config).unwrap();
//! let result = scanner.scan().unwrap();
//!
//! let json = format_output(&result, OutputFormat::Json).unwrap();
//! println!("{}", json);
//! ```
//!
//! Analyzing a snippet directly:
//!
//! ```rust
//! use elvscope_core::{analyze_source, AnalysisOptions};
//!
//! let analysis = analyze_source("fn greet {\n  echo hi\n}\n", AnalysisOptions::default()).unwrap();
//! assert_eq!(analysis.outline[0].component.label, "fn greet");
//! assert_eq!(analysis.folds[0].placeholder, "{...}");
//! ```

pub mod breadcrumbs;
pub mod config;
pub mod engine;
pub mod folding;
pub mod line_index;
pub mod models;
pub mod output;
pub mod structure;
pub mod syntax;

// Re-exports for convenience
pub use breadcrumbs::{breadcrumb_at, outline, Breadcrumb, BreadcrumbComponent};
pub use config::{ConfigError, IgnoreFilter, ScanConfig};
pub use engine::{
    analyze_source, analyze_tokens, breadcrumb_in_source, get_breadcrumb, render_file, scan_file,
    AnalysisError, ElvishScanner, Renderer, ScanError,
};
pub use folding::{
    fold_regions, AnalysisOptions, BraceContext, Delimiter, FoldRegion, PlaceholderStyle,
};
pub use line_index::{LineIndex, LineLookup};
pub use models::{
    AnalysisMap, FileAnalysis, OutlineEntry, RenderedFile, ScanMetadata, ScanStats,
    StatementSummary,
};
pub use output::{
    format_breadcrumb, format_file, format_folds, format_output, FormatError, OutputFormat,
};
pub use structure::{classify, segment, Statement, StructuralKind};
pub use syntax::{tokenize, validate_tokens, ContractError, Token, TokenKind};
