use super::{analyze_source, read_source, ScanError};
use crate::config::ScanConfig;
use crate::folding::{BraceContext, Delimiter, FoldRegion};
use crate::models::RenderedFile;
use crate::syntax::LINE_COMMENT_PREFIX;
use ropey::Rope;
use std::path::Path;
use termcolor::Color;

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Renderer for producing folded output
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    ansi: bool,
}

impl Renderer {
    /// Plain text output
    pub fn new() -> Self {
        Self { ansi: false }
    }

    /// Coloured placeholders for terminals
    pub fn ansi() -> Self {
        Self { ansi: true }
    }

    /// Render `source` with every outermost region collapsed.
    ///
    /// `folds` must be ordered by start offset, as produced by the fold pass.
    /// A region nested in one already collapsed is skipped.
    pub fn render(&self, source: &str, folds: &[FoldRegion]) -> String {
        if folds.is_empty() {
            return source.to_string();
        }

        let rope = Rope::from_str(source);
        let mut result = String::with_capacity(source.len());
        let mut current_byte = 0;

        for fold in folds {
            if fold.start_offset < current_byte || fold.end_offset > source.len() {
                continue;
            }

            if fold.start_offset > current_byte {
                let start_char = rope.byte_to_char(current_byte);
                let end_char = rope.byte_to_char(fold.start_offset);
                result.push_str(&rope.slice(start_char..end_char).to_string());
            }

            let ends_line = source[fold.end_offset..]
                .chars()
                .next()
                .map_or(true, |c| c == '\n' || c == '\r');
            result.push_str(&self.format_placeholder(fold, ends_line));

            current_byte = fold.end_offset;
        }

        if current_byte < source.len() {
            let start_char = rope.byte_to_char(current_byte);
            result.push_str(&rope.slice(start_char..).to_string());
        }

        result
    }

    /// Placeholder text, followed by a hidden-line note when nothing else
    /// follows on the closing line
    fn format_placeholder(&self, fold: &FoldRegion, ends_line: bool) -> String {
        let hidden = fold.hidden_lines();
        let note = if ends_line {
            format!(" {}{} lines folded", LINE_COMMENT_PREFIX, hidden)
        } else {
            String::new()
        };

        if !self.ansi {
            return format!("{}{}", fold.placeholder, note);
        }

        let fg_color = match fold_color(fold) {
            Color::Blue => "\x1b[34m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::Red => "\x1b[31m",
            _ => "\x1b[90m", // Gray
        };

        format!(
            "{}{}{}{}{}{}",
            fg_color, fold.placeholder, RESET, DIM, note, RESET
        )
    }
}

/// Get color for a fold region
fn fold_color(fold: &FoldRegion) -> Color {
    match (fold.delimiter, fold.context) {
        (Delimiter::Bracket, _) => Color::Cyan,
        (_, Some(BraceContext::Function)) => Color::Blue,
        (_, Some(BraceContext::Lambda)) => Color::Magenta,
        (
            _,
            Some(
                BraceContext::IfBlock
                | BraceContext::ElifBlock
                | BraceContext::ElseBlock
                | BraceContext::ForBlock
                | BraceContext::WhileBlock,
            ),
        ) => Color::Yellow,
        (
            _,
            Some(BraceContext::TryBlock | BraceContext::CatchBlock | BraceContext::FinallyBlock),
        ) => Color::Red,
        _ => Color::White,
    }
}

/// Render a file with folds applied (convenience function)
pub fn render_file(path: &Path, config: &ScanConfig, ansi: bool) -> Result<RenderedFile, ScanError> {
    let content = read_source(path, config)?;
    let analysis = analyze_source(&content, config.analysis)?;

    let renderer = if ansi {
        Renderer::ansi()
    } else {
        Renderer::new()
    };

    Ok(RenderedFile {
        path: path.to_path_buf(),
        content: renderer.render(&content, &analysis.folds),
        fold_count: analysis.fold_count(),
        lines_hidden: analysis.lines_hidden(),
    })
}
