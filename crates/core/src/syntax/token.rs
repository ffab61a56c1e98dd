//! Token model shared by the tokenizer and every structural pass.
//!
//! Offsets are byte offsets into the source buffer. Downstream structures
//! never own tokens; they hold indices into the slice produced here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lexical category of an Elvish token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Trivia
    WhiteSpace,
    Newline,

    Comment,

    // Literals
    SingleQuotedString,
    DoubleQuotedString,
    Integer,
    Float,
    HexNumber,
    OctalNumber,
    BinaryNumber,

    // Keywords
    If,
    Elif,
    Else,
    While,
    For,
    Try,
    Catch,
    Finally,
    Break,
    Continue,
    Return,
    Fn,
    Var,
    Set,
    Tmp,
    Del,
    Use,
    Pragma,
    And,
    Or,
    Coalesce,

    // Constants
    True,
    False,
    Nil,

    Variable,
    Identifier,

    // Operators
    Pipe,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    Range,
    RangeInclusive,
    Ampersand,

    // Delimiters
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Comma,

    BadCharacter,
}

/// Keywords that introduce a block and drive breadcrumbs and fold context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKeyword {
    Fn,
    If,
    Elif,
    Else,
    For,
    While,
    Try,
    Catch,
    Finally,
}

impl TokenKind {
    /// Map a bareword to its keyword or constant kind
    pub fn from_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "finally" => TokenKind::Finally,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "return" => TokenKind::Return,
            "fn" => TokenKind::Fn,
            "var" => TokenKind::Var,
            "set" => TokenKind::Set,
            "tmp" => TokenKind::Tmp,
            "del" => TokenKind::Del,
            "use" => TokenKind::Use,
            "pragma" => TokenKind::Pragma,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "coalesce" => TokenKind::Coalesce,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            _ => return None,
        };
        Some(kind)
    }

    /// Whitespace and newlines. Comments are not trivia.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::WhiteSpace | TokenKind::Newline)
    }

    /// Tokens that end a statement when no delimiter is open
    pub fn is_terminator(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Semicolon)
    }

    /// The block-introducing keyword this token stands for, if any
    pub fn block_keyword(self) -> Option<BlockKeyword> {
        match self {
            TokenKind::Fn => Some(BlockKeyword::Fn),
            TokenKind::If => Some(BlockKeyword::If),
            TokenKind::Elif => Some(BlockKeyword::Elif),
            TokenKind::Else => Some(BlockKeyword::Else),
            TokenKind::For => Some(BlockKeyword::For),
            TokenKind::While => Some(BlockKeyword::While),
            TokenKind::Try => Some(BlockKeyword::Try),
            TokenKind::Catch => Some(BlockKeyword::Catch),
            TokenKind::Finally => Some(BlockKeyword::Finally),
            _ => None,
        }
    }
}

/// A single lexical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let len = text.len();
        Self {
            kind,
            text,
            start,
            len,
        }
    }

    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Violations of the token source contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("token {index} spans {start}..{end}, outside source of {source_len} bytes")]
    OutOfBounds {
        index: usize,
        start: usize,
        end: usize,
        source_len: usize,
    },

    #[error("token {index} starts at {start}, before the previous token ends at {previous_end}")]
    Overlap {
        index: usize,
        start: usize,
        previous_end: usize,
    },

    #[error("offset {offset} is outside source of {source_len} bytes")]
    OffsetOutOfRange { offset: usize, source_len: usize },
}

/// Check that tokens are ordered, non-overlapping and inside the buffer
pub fn validate_tokens(tokens: &[Token], source_len: usize) -> Result<(), ContractError> {
    let mut previous_end = 0;

    for (index, token) in tokens.iter().enumerate() {
        let end = token.start.checked_add(token.len).unwrap_or(usize::MAX);
        if end > source_len {
            return Err(ContractError::OutOfBounds {
                index,
                start: token.start,
                end,
                source_len,
            });
        }
        if token.start < previous_end {
            return Err(ContractError::Overlap {
                index,
                start: token.start,
                previous_end,
            });
        }
        previous_end = end;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::from_keyword("fn"), Some(TokenKind::Fn));
        assert_eq!(TokenKind::from_keyword("coalesce"), Some(TokenKind::Coalesce));
        assert_eq!(TokenKind::from_keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(TokenKind::from_keyword("function"), None);
    }

    #[test]
    fn test_block_keywords() {
        assert_eq!(TokenKind::Catch.block_keyword(), Some(BlockKeyword::Catch));
        assert_eq!(TokenKind::Return.block_keyword(), None);
    }

    #[test]
    fn test_comments_are_not_trivia() {
        assert!(TokenKind::WhiteSpace.is_trivia());
        assert!(TokenKind::Newline.is_trivia());
        assert!(!TokenKind::Comment.is_trivia());
    }

    #[test]
    fn test_validate_accepts_ordered_tokens() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "echo", 0),
            Token::new(TokenKind::WhiteSpace, " ", 4),
            Token::new(TokenKind::Identifier, "hi", 5),
        ];
        assert!(validate_tokens(&tokens, 7).is_ok());
        assert!(validate_tokens(&[], 0).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let tokens = vec![Token::new(TokenKind::Identifier, "echo", 4)];
        let err = validate_tokens(&tokens, 6).unwrap_err();
        assert_eq!(
            err,
            ContractError::OutOfBounds {
                index: 0,
                start: 4,
                end: 8,
                source_len: 6
            }
        );
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "echo", 0),
            Token::new(TokenKind::Identifier, "hi", 2),
        ];
        assert!(matches!(
            validate_tokens(&tokens, 10),
            Err(ContractError::Overlap { index: 1, .. })
        ));
    }
}
