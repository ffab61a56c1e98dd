//! Breadcrumb trails and file outlines
//!
//! Statements form a flat list, so the trail at a position holds at most one
//! component: the classified statement under the cursor.

use crate::structure::{classify, function_name, label, tooltip, Statement, StructuralKind};
use crate::syntax::Token;
use serde::{Deserialize, Serialize};

/// A single component in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbComponent {
    pub kind: StructuralKind,

    /// Function name, when the statement declares a named function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub label: String,
    pub tooltip: String,

    /// Byte offset of the statement's first significant token
    pub start_offset: usize,

    /// Byte offset one past the statement's last token
    pub end_offset: usize,
}

impl BreadcrumbComponent {
    /// Build the component for a statement, if it classifies
    pub fn from_statement(tokens: &[Token], statement: &Statement) -> Option<Self> {
        let span = statement.span(tokens)?;
        let body = statement.body(tokens);
        let kind = classify(body)?;

        let name = match kind {
            StructuralKind::Function => function_name(body).map(str::to_string),
            _ => None,
        };

        Some(Self {
            kind,
            name,
            label: label(kind, body),
            tooltip: tooltip(kind, body),
            start_offset: span.start,
            end_offset: span.end,
        })
    }
}

/// The structural context at a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Byte offset the trail was computed for
    pub byte_offset: usize,

    /// 1-indexed line, when the position came from a line/column cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// 0-indexed column in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// From outermost to innermost
    pub components: Vec<BreadcrumbComponent>,
}

impl Breadcrumb {
    pub fn empty(byte_offset: usize) -> Self {
        Self {
            byte_offset,
            line: None,
            column: None,
            components: Vec::new(),
        }
    }

    /// Attach the cursor position the offset was derived from
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Labels joined into a display path
    pub fn path(&self) -> String {
        self.components
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// `(label, tooltip)` pairs for a breadcrumb bar
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.components
            .iter()
            .map(|c| (c.label.as_str(), c.tooltip.as_str()))
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Innermost component
    pub fn current(&self) -> Option<&BreadcrumbComponent> {
        self.components.last()
    }
}

/// Breadcrumb trail at a byte offset.
///
/// A statement whose significant span starts at or covers `offset` wins.
/// Only when none does is a span's end offset accepted, so a cursor parked
/// right after the last token still counts. Unclassified statements give an
/// empty trail.
pub fn breadcrumb_at(tokens: &[Token], statements: &[Statement], offset: usize) -> Breadcrumb {
    let spans: Vec<_> = statements
        .iter()
        .filter_map(|statement| Some((statement, statement.span(tokens)?)))
        .collect();

    let containing = spans
        .iter()
        .find(|(_, span)| span.contains(&offset))
        .or_else(|| spans.iter().find(|(_, span)| span.end == offset))
        .map(|(statement, _)| *statement);

    let components = containing
        .and_then(|statement| BreadcrumbComponent::from_statement(tokens, statement))
        .into_iter()
        .collect();

    Breadcrumb {
        components,
        ..Breadcrumb::empty(offset)
    }
}

/// Every classified statement, in source order
pub fn outline(tokens: &[Token], statements: &[Statement]) -> Vec<BreadcrumbComponent> {
    statements
        .iter()
        .filter_map(|statement| BreadcrumbComponent::from_statement(tokens, statement))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::segment;
    use crate::syntax::tokenize;

    fn trail(source: &str, offset: usize) -> Breadcrumb {
        let tokens = tokenize(source);
        let statements = segment(&tokens);
        breadcrumb_at(&tokens, &statements, offset)
    }

    #[test]
    fn test_breadcrumb_inside_function() {
        let source = "fn greet {|name|\n  echo hi $name\n}\n";
        let crumb = trail(source, source.find("echo").unwrap());

        assert_eq!(crumb.depth(), 1);
        assert_eq!(crumb.path(), "fn greet");
        assert_eq!(crumb.pairs(), vec![("fn greet", "Function: greet")]);

        let current = crumb.current().unwrap();
        assert_eq!(current.kind, StructuralKind::Function);
        assert_eq!(current.name.as_deref(), Some("greet"));
        assert_eq!(current.start_offset, 0);
        assert_eq!(current.end_offset, source.len());
    }

    #[test]
    fn test_breadcrumb_end_offset_is_inclusive() {
        let source = "while $true { }";
        assert_eq!(trail(source, source.len()).path(), "while");
    }

    #[test]
    fn test_breadcrumb_at_statement_boundary_prefers_next() {
        let source = "fn a { }\nif $x {\n  echo\n}\n";
        assert_eq!(trail(source, source.find("if").unwrap()).path(), "if");

        let source = "echo a\nfn f {\n  echo\n}\n";
        assert_eq!(trail(source, source.find("fn").unwrap()).path(), "fn f");

        let source = "echo a;if $x { }";
        assert_eq!(trail(source, 7).path(), "if");
        // The end of the last statement still resolves to it
        assert_eq!(trail(source, source.len()).path(), "if");
    }

    #[test]
    fn test_breadcrumb_skips_leading_trivia() {
        let source = "echo a\n\n    if $x { }";
        // Offset inside the blank lines before `if`
        assert!(trail(source, 8).is_empty());
        assert_eq!(trail(source, source.find("if").unwrap()).path(), "if");
    }

    #[test]
    fn test_unclassified_statement_gives_empty_trail() {
        let crumb = trail("echo hello", 2);
        assert!(crumb.is_empty());
        assert_eq!(crumb.path(), "");
        assert_eq!(crumb.byte_offset, 2);
    }

    #[test]
    fn test_offset_past_everything() {
        assert!(trail("fn f { }", 100).is_empty());
        assert!(trail("", 0).is_empty());
    }

    #[test]
    fn test_with_position() {
        let crumb = trail("fn f { }", 3).with_position(1, 3);
        assert_eq!(crumb.line, Some(1));
        assert_eq!(crumb.column, Some(3));
    }

    #[test]
    fn test_outline_lists_classified_statements() {
        let source = "# setup\nvar x = 1\nfn build { }\n{|a| put $a }\ntry { } catch e { }\n";
        let tokens = tokenize(source);
        let statements = segment(&tokens);
        let entries = outline(&tokens, &statements);

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["fn build", "λ", "try"]);
        assert_eq!(entries[1].tooltip, "Lambda expression");
        assert!(entries.windows(2).all(|w| w[0].end_offset <= w[1].start_offset));
    }
}
