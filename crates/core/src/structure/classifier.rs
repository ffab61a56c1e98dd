//! Structural classification of statements for breadcrumbs

use crate::syntax::{BlockKeyword, Token, TokenKind};
use serde::{Deserialize, Serialize};

/// The breadcrumb-relevant category of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralKind {
    Function,
    If,
    Elif,
    Else,
    For,
    While,
    Try,
    Catch,
    Finally,
    Lambda,
}

impl StructuralKind {
    fn from_keyword(keyword: BlockKeyword) -> Self {
        match keyword {
            BlockKeyword::Fn => StructuralKind::Function,
            BlockKeyword::If => StructuralKind::If,
            BlockKeyword::Elif => StructuralKind::Elif,
            BlockKeyword::Else => StructuralKind::Else,
            BlockKeyword::For => StructuralKind::For,
            BlockKeyword::While => StructuralKind::While,
            BlockKeyword::Try => StructuralKind::Try,
            BlockKeyword::Catch => StructuralKind::Catch,
            BlockKeyword::Finally => StructuralKind::Finally,
        }
    }

    /// Short label without a function name
    pub fn keyword(&self) -> &'static str {
        match self {
            StructuralKind::Function => "fn",
            StructuralKind::If => "if",
            StructuralKind::Elif => "elif",
            StructuralKind::Else => "else",
            StructuralKind::For => "for",
            StructuralKind::While => "while",
            StructuralKind::Try => "try",
            StructuralKind::Catch => "catch",
            StructuralKind::Finally => "finally",
            StructuralKind::Lambda => "λ",
        }
    }
}

fn significant(tokens: &[Token]) -> impl Iterator<Item = &Token> {
    tokens.iter().filter(|t| !t.kind.is_trivia())
}

/// Determine the structural kind of a statement's tokens
pub fn classify(tokens: &[Token]) -> Option<StructuralKind> {
    let mut rest = significant(tokens);
    let first = rest.next()?;

    if let Some(keyword) = first.kind.block_keyword() {
        return Some(StructuralKind::from_keyword(keyword));
    }

    // Only `{|params| ...}` counts as a lambda; a bare `{ ... }` does not
    if first.kind == TokenKind::LBrace {
        return match rest.next() {
            Some(second) if second.kind == TokenKind::Pipe => Some(StructuralKind::Lambda),
            _ => None,
        };
    }

    None
}

/// Name of the first `fn <identifier>` pair in the statement
pub fn function_name(tokens: &[Token]) -> Option<&str> {
    let mut previous: Option<&Token> = None;

    for token in significant(tokens) {
        if let Some(prev) = previous {
            if prev.kind == TokenKind::Fn && token.kind == TokenKind::Identifier {
                return Some(token.text.as_str());
            }
        }
        previous = Some(token);
    }

    None
}

/// Breadcrumb label: `fn name`, `fn` for anonymous functions, else the keyword
pub fn label(kind: StructuralKind, tokens: &[Token]) -> String {
    match kind {
        StructuralKind::Function => match function_name(tokens) {
            Some(name) => format!("fn {}", name),
            None => "fn".to_string(),
        },
        _ => kind.keyword().to_string(),
    }
}

/// Breadcrumb tooltip
pub fn tooltip(kind: StructuralKind, tokens: &[Token]) -> String {
    match kind {
        StructuralKind::Function => match function_name(tokens) {
            Some(name) => format!("Function: {}", name),
            None => "Anonymous function".to_string(),
        },
        StructuralKind::If => "If block".to_string(),
        StructuralKind::Elif => "Elif block".to_string(),
        StructuralKind::Else => "Else block".to_string(),
        StructuralKind::For => "For loop".to_string(),
        StructuralKind::While => "While loop".to_string(),
        StructuralKind::Try => "Try block".to_string(),
        StructuralKind::Catch => "Catch block".to_string(),
        StructuralKind::Finally => "Finally block".to_string(),
        StructuralKind::Lambda => "Lambda expression".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokenize;

    #[test]
    fn test_named_function() {
        let tokens = tokenize("fn greet {|name|\n echo hi $name\n}");
        assert_eq!(classify(&tokens), Some(StructuralKind::Function));
        assert_eq!(function_name(&tokens), Some("greet"));
        assert_eq!(label(StructuralKind::Function, &tokens), "fn greet");
        assert_eq!(tooltip(StructuralKind::Function, &tokens), "Function: greet");
    }

    #[test]
    fn test_anonymous_function() {
        let tokens = tokenize("fn {|x| put $x }");
        assert_eq!(classify(&tokens), Some(StructuralKind::Function));
        assert_eq!(function_name(&tokens), None);
        assert_eq!(label(StructuralKind::Function, &tokens), "fn");
        assert_eq!(tooltip(StructuralKind::Function, &tokens), "Anonymous function");
    }

    #[test]
    fn test_lambda_requires_parameter_list() {
        let tokens = tokenize("{|x| echo $x}");
        assert_eq!(classify(&tokens), Some(StructuralKind::Lambda));
        assert_eq!(label(StructuralKind::Lambda, &tokens), "λ");
        assert_eq!(tooltip(StructuralKind::Lambda, &tokens), "Lambda expression");

        assert_eq!(classify(&tokenize("{ echo x }")), None);
        // Whitespace between the brace and the pipe is skipped
        assert_eq!(classify(&tokenize("{ |x| echo x }")), Some(StructuralKind::Lambda));
    }

    #[test]
    fn test_control_flow_keywords() {
        let cases = [
            ("if $ok { }", StructuralKind::If, "If block"),
            ("elif $ok { }", StructuralKind::Elif, "Elif block"),
            ("else { }", StructuralKind::Else, "Else block"),
            ("for x $xs { }", StructuralKind::For, "For loop"),
            ("while $true { }", StructuralKind::While, "While loop"),
            ("try { }", StructuralKind::Try, "Try block"),
            ("catch e { }", StructuralKind::Catch, "Catch block"),
            ("finally { }", StructuralKind::Finally, "Finally block"),
        ];

        for (source, kind, expected_tooltip) in cases {
            let tokens = tokenize(source);
            assert_eq!(classify(&tokens), Some(kind), "source: {}", source);
            assert_eq!(label(kind, &tokens), kind.keyword());
            assert_eq!(tooltip(kind, &tokens), expected_tooltip);
        }
    }

    #[test]
    fn test_leading_trivia_is_ignored() {
        let tokens = tokenize("\n   while $true { }");
        assert_eq!(classify(&tokens), Some(StructuralKind::While));
    }

    #[test]
    fn test_unclassified_statements() {
        assert_eq!(classify(&[]), None);
        assert_eq!(classify(&tokenize("  \n")), None);
        assert_eq!(classify(&tokenize("echo fn greet")), None);
        assert_eq!(classify(&tokenize("# fn greet")), None);
        assert_eq!(classify(&tokenize("var x = { }")), None);
    }

    #[test]
    fn test_function_name_needs_adjacent_identifier() {
        // A variable is not a function name
        assert_eq!(function_name(&tokenize("fn $f { }")), None);
        // Whitespace between `fn` and the name does not break adjacency
        assert_eq!(function_name(&tokenize("fn   spaced { }")), Some("spaced"));
    }
}
