//! Analysis engine
//!
//! Ties the passes together: tokenize, check the token contract, segment,
//! classify and fold. [`analyze_source`] is pure; the file helpers add
//! reading, size limits and path bookkeeping on top.

mod renderer;
mod scanner;

pub use renderer::{render_file, Renderer};
pub use scanner::{ElvishScanner, ScanError};

use crate::breadcrumbs::{breadcrumb_at, outline, Breadcrumb};
use crate::config::{is_elvish_file, ScanConfig};
use crate::folding::{fold_regions, AnalysisOptions};
use crate::line_index::{LineIndex, LineLookup};
use crate::models::{FileAnalysis, OutlineEntry, StatementSummary};
use crate::structure::segment;
use crate::syntax::{tokenize, validate_tokens, ContractError, Token};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while analyzing a single source
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Token contract violated: {0}")]
    Contract(#[from] ContractError),
}

/// Analyze Elvish source text
pub fn analyze_source(source: &str, options: AnalysisOptions) -> Result<FileAnalysis, AnalysisError> {
    let tokens = tokenize(source);
    analyze_tokens(source, &tokens, options)
}

/// Analyze a token stream produced by any tokenizer honouring the token
/// contract: tokens sorted, non-overlapping and inside `source`.
pub fn analyze_tokens(
    source: &str,
    tokens: &[Token],
    options: AnalysisOptions,
) -> Result<FileAnalysis, AnalysisError> {
    validate_tokens(tokens, source.len())?;

    let lines = LineIndex::new(source);
    let statements = segment(tokens);
    let components = outline(tokens, &statements);
    let summary = StatementSummary::new(&statements, &components);

    let mut entries = Vec::with_capacity(components.len());
    for component in components {
        // The end offset sits past the terminator, which may be a newline
        let last_byte = component
            .end_offset
            .saturating_sub(1)
            .max(component.start_offset);
        entries.push(OutlineEntry {
            start_line: lines.line_of(component.start_offset)? + 1,
            end_line: lines.line_of(last_byte)? + 1,
            component,
        });
    }

    let folds = fold_regions(tokens, &lines, options)?;

    Ok(FileAnalysis {
        total_lines: source.lines().count(),
        token_count: tokens.len(),
        statements: summary,
        outline: entries,
        folds,
        ..Default::default()
    })
}

/// Breadcrumb for a cursor position in source text.
///
/// `line` is 1-indexed and `column` counts characters from 0; both clamp to
/// the source.
pub fn breadcrumb_in_source(source: &str, line: usize, column: usize) -> Breadcrumb {
    let offset = LineIndex::new(source).offset_of(line, column);
    let tokens = tokenize(source);
    let statements = segment(&tokens);
    breadcrumb_at(&tokens, &statements, offset).with_position(line, column)
}

/// Read an Elvish file, enforcing the extension and size limit
fn read_source(path: &Path, config: &ScanConfig) -> Result<String, ScanError> {
    if !is_elvish_file(path) {
        return Err(ScanError::UnsupportedFile(path.to_path_buf()));
    }

    let size = fs::metadata(path)?.len() as usize;
    if size > config.max_file_size {
        return Err(ScanError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_size,
        });
    }

    Ok(fs::read_to_string(path)?)
}

/// Scan a single file and return its analysis
pub fn scan_file(path: &Path, config: &ScanConfig) -> Result<FileAnalysis, ScanError> {
    let source = read_source(path, config)?;
    let analysis = analyze_source(&source, config.analysis)?;
    let absolute_path = path.canonicalize().ok();
    Ok(analysis.with_path(path.to_path_buf(), absolute_path))
}

/// Get breadcrumb at a specific position in a file
pub fn get_breadcrumb(
    path: &Path,
    line: usize,
    column: usize,
    config: &ScanConfig,
) -> Result<Breadcrumb, ScanError> {
    let source = read_source(path, config)?;
    Ok(breadcrumb_in_source(&source, line, column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folding::{BraceContext, PlaceholderStyle};
    use crate::structure::StructuralKind;
    use crate::syntax::TokenKind;
    use tempfile::TempDir;

    const SCRIPT: &str = "\
use str

fn greet {|name|
  echo (str:join ' ' [hello $name])
}

var config = [
  &name=elvish
  &tags=[a b]
]

for x $numbers {
  if $verbose {
    greet $x
  }
}
";

    #[test]
    fn test_analyze_source() {
        let analysis = analyze_source(SCRIPT, AnalysisOptions::default()).unwrap();

        assert_eq!(analysis.total_lines, 16);
        assert!(analysis.token_count > 0);

        let labels: Vec<&str> = analysis
            .outline
            .iter()
            .map(|e| e.component.label.as_str())
            .collect();
        assert_eq!(labels, vec!["fn greet", "for"]);

        let greet = &analysis.outline[0];
        assert_eq!((greet.start_line, greet.end_line), (3, 5));

        let for_loop = &analysis.outline[1];
        assert_eq!(for_loop.component.kind, StructuralKind::For);
        assert_eq!((for_loop.start_line, for_loop.end_line), (12, 16));

        assert_eq!(analysis.statements.classified, 2);
        assert_eq!(analysis.statements.by_kind.get("fn"), Some(&1));

        let contexts: Vec<Option<BraceContext>> =
            analysis.folds.iter().map(|f| f.context).collect();
        assert_eq!(
            contexts,
            vec![
                Some(BraceContext::Function),
                None,
                Some(BraceContext::ForBlock),
                Some(BraceContext::IfBlock),
            ]
        );
        assert_eq!(analysis.folds[1].placeholder, "[&...]");
    }

    #[test]
    fn test_analyze_source_contextual() {
        let options = AnalysisOptions {
            fast: false,
            placeholder_style: PlaceholderStyle::Contextual,
        };
        let analysis = analyze_source(SCRIPT, options).unwrap();
        assert_eq!(analysis.folds[0].placeholder, "{fn ...}");
        assert_eq!(analysis.folds[2].placeholder, "{for ...}");
    }

    #[test]
    fn test_analyze_empty_source() {
        let analysis = analyze_source("", AnalysisOptions::default()).unwrap();
        assert_eq!(analysis.token_count, 0);
        assert_eq!(analysis.statements.total, 0);
        assert!(analysis.outline.is_empty());
        assert!(analysis.folds.is_empty());
    }

    #[test]
    fn test_analyze_tokens_rejects_broken_contract() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "echo", 0),
            Token::new(TokenKind::Identifier, "hi", 2),
        ];
        let result = analyze_tokens("echo hi", &tokens, AnalysisOptions::default());
        assert!(matches!(
            result,
            Err(AnalysisError::Contract(ContractError::Overlap { index: 1, .. }))
        ));
    }

    #[test]
    fn test_breadcrumb_in_source() {
        let crumb = breadcrumb_in_source(SCRIPT, 4, 4);
        assert_eq!(crumb.path(), "fn greet");
        assert_eq!(crumb.line, Some(4));

        assert!(breadcrumb_in_source(SCRIPT, 1, 0).is_empty());
        assert_eq!(breadcrumb_in_source(SCRIPT, 14, 4).path(), "for");
    }

    #[test]
    fn test_scan_file_and_breadcrumb() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("greet.elv");
        fs::write(&path, SCRIPT).unwrap();

        let config = ScanConfig::default();
        let analysis = scan_file(&path, &config).unwrap();
        assert_eq!(analysis.path, path);
        assert!(analysis.absolute_path.is_some());
        assert_eq!(analysis.outline.len(), 2);

        let crumb = get_breadcrumb(&path, 3, 0, &config).unwrap();
        assert_eq!(crumb.pairs(), vec![("fn greet", "Function: greet")]);
    }

    #[test]
    fn test_scan_file_rejects_other_extensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, "echo hi").unwrap();

        let result = scan_file(&path, &ScanConfig::default());
        assert!(matches!(result, Err(ScanError::UnsupportedFile(_))));
    }

    #[test]
    fn test_scan_file_respects_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.elv");
        fs::write(&path, SCRIPT).unwrap();

        let config = ScanConfig::default().with_max_file_size(8);
        let result = scan_file(&path, &config);
        assert!(matches!(result, Err(ScanError::FileTooLarge { limit: 8, .. })));
    }
}
