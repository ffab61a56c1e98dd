//! Statement segmentation
//!
//! Splits a token stream into a flat list of statements. A statement ends at
//! a newline or semicolon seen while no brace, bracket or paren is open. The
//! terminator belongs to the statement it ends.
//!
//! Trivia before a statement's first significant token is kept as that
//! statement's leading trivia, so the statements always partition the whole
//! token range.

use crate::syntax::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous run of tokens treated as one structural unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Token indices covered, leading trivia included
    pub range: Range<usize>,
    /// Index of the first significant token; equals `range.end` when the
    /// statement is trivia only
    pub body_start: usize,
}

impl Statement {
    /// Every token of the statement, leading trivia included
    pub fn tokens<'t>(&self, tokens: &'t [Token]) -> &'t [Token] {
        &tokens[self.range.clone()]
    }

    /// Tokens from the first significant one onwards
    pub fn body<'t>(&self, tokens: &'t [Token]) -> &'t [Token] {
        &tokens[self.body_start..self.range.end]
    }

    pub fn is_trivia_only(&self) -> bool {
        self.body_start == self.range.end
    }

    /// Byte span from the first significant token to the end of the last token
    pub fn span(&self, tokens: &[Token]) -> Option<Range<usize>> {
        let body = self.body(tokens);
        let first = body.first()?;
        let last = body.last()?;
        Some(first.start..last.end())
    }
}

/// Independent open-delimiter counters, clamped at zero
#[derive(Debug, Default, Clone, Copy)]
struct Depth {
    brace: usize,
    bracket: usize,
    paren: usize,
}

impl Depth {
    fn track(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::LBrace => self.brace += 1,
            TokenKind::RBrace => self.brace = self.brace.saturating_sub(1),
            TokenKind::LBracket => self.bracket += 1,
            TokenKind::RBracket => self.bracket = self.bracket.saturating_sub(1),
            TokenKind::LParen => self.paren += 1,
            TokenKind::RParen => self.paren = self.paren.saturating_sub(1),
            _ => {}
        }
    }

    fn is_balanced(&self) -> bool {
        self.brace == 0 && self.bracket == 0 && self.paren == 0
    }
}

/// Partition a token stream into statements
pub fn segment(tokens: &[Token]) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        let start = pos;
        while pos < tokens.len() && tokens[pos].kind.is_trivia() {
            pos += 1;
        }

        let body_start = pos;
        let mut depth = Depth::default();

        while pos < tokens.len() {
            let kind = tokens[pos].kind;
            depth.track(kind);
            pos += 1;

            if kind.is_terminator() && depth.is_balanced() {
                break;
            }
        }

        statements.push(Statement {
            range: start..pos,
            body_start,
        });
    }

    statements
}
