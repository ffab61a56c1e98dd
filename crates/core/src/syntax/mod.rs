//! Token source for Elvish scripts
//!
//! The structural passes only depend on [`Token`] and [`TokenKind`]; the
//! tokenizer is one possible producer of that stream.

mod cursor;
mod lexer;
mod token;

pub use lexer::{tokenize, Tokenizer};
pub use token::{validate_tokens, BlockKeyword, ContractError, Token, TokenKind};

/// Elvish only has line comments
pub const LINE_COMMENT_PREFIX: &str = "# ";
