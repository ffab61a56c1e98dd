//! Elvish tokenizer
//!
//! Produces a lossless token stream: concatenating the text of every token
//! reproduces the source. The tokenizer never fails. Characters it does not
//! recognise become `BadCharacter` and unterminated strings run to the end
//! of input.

use super::cursor::Cursor;
use super::token::{Token, TokenKind};

/// Tokenize a whole source buffer
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).collect()
}

/// Streaming tokenizer over a source buffer
pub struct Tokenizer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
        }
    }

    fn text(&self) -> &'src str {
        &self.source[self.cursor.token_start()..self.cursor.offset()]
    }

    fn token_kind(&mut self, first: char) -> TokenKind {
        use TokenKind::*;

        match first {
            '\n' => Newline,
            c if is_inline_space(c) => {
                self.cursor.advance_while(is_inline_space);
                WhiteSpace
            }
            // `^` followed by a newline continues the line
            '^' if self.cursor.matches('\n') => {
                self.cursor.advance();
                WhiteSpace
            }
            '#' => {
                self.cursor.advance_while(|c| c != '\n');
                Comment
            }
            '\'' => self.single_quoted(),
            '"' => self.double_quoted(),
            '$' => {
                self.cursor.advance_while(is_variable_char);
                Variable
            }
            '0'..='9' => self.number(first),
            c if is_word_start(c) => self.word(),
            '{' => LBrace,
            '}' => RBrace,
            '[' => LBracket,
            ']' => RBracket,
            '(' => LParen,
            ')' => RParen,
            ';' => Semicolon,
            ',' => Comma,
            '|' => Pipe,
            '&' => Ampersand,
            '+' => Plus,
            '-' => Minus,
            '*' => Star,
            '/' => Slash,
            '%' => Percent,
            '=' => self.with_eq(Eq, Assign),
            '<' => self.with_eq(Le, Lt),
            '>' => self.with_eq(Ge, Gt),
            '!' => self.with_eq(Ne, BadCharacter),
            '.' if self.cursor.matches('.') => {
                self.cursor.advance();
                self.with_eq(RangeInclusive, Range)
            }
            '.' => self.word(),
            _ => BadCharacter,
        }
    }

    fn word(&mut self) -> TokenKind {
        self.word_rest();
        TokenKind::from_keyword(self.text()).unwrap_or(TokenKind::Identifier)
    }

    /// Bareword characters; a single `.` joins parts, `..` starts a range
    fn word_rest(&mut self) {
        loop {
            self.cursor.advance_while(is_word_char);
            if self.cursor.matches('.') && self.cursor.second() != '.' {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    /// Consume a trailing `=` if present and pick the matching kind
    fn with_eq(&mut self, with: TokenKind, without: TokenKind) -> TokenKind {
        if self.cursor.matches('=') {
            self.cursor.advance();
            with
        } else {
            without
        }
    }

    /// `'...'` where `''` is an escaped quote
    fn single_quoted(&mut self) -> TokenKind {
        while let Some(c) = self.cursor.advance() {
            if c == '\'' {
                if self.cursor.matches('\'') {
                    self.cursor.advance();
                } else {
                    break;
                }
            }
        }
        TokenKind::SingleQuotedString
    }

    /// `"..."` with backslash escapes
    fn double_quoted(&mut self) -> TokenKind {
        while let Some(c) = self.cursor.advance() {
            match c {
                '\\' => {
                    self.cursor.advance();
                }
                '"' => break,
                _ => {}
            }
        }
        TokenKind::DoubleQuotedString
    }

    fn number(&mut self, first: char) -> TokenKind {
        if first == '0' {
            let radix = match self.cursor.peek() {
                'x' | 'X' => Some((16, TokenKind::HexNumber)),
                'o' | 'O' => Some((8, TokenKind::OctalNumber)),
                'b' | 'B' => Some((2, TokenKind::BinaryNumber)),
                _ => None,
            };
            if let Some((radix, kind)) = radix {
                if self.cursor.second().is_digit(radix) {
                    self.cursor.advance();
                    self.cursor.advance_while(|c| c.is_digit(radix) || c == '_');
                    return kind;
                }
            }
        }

        self.digits();

        let mut kind = TokenKind::Integer;
        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits();
            kind = TokenKind::Float;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            let second = self.cursor.second();
            if second.is_ascii_digit() || second == '+' || second == '-' {
                self.cursor.advance();
                if self.cursor.matches('+') || self.cursor.matches('-') {
                    self.cursor.advance();
                }
                self.digits();
                kind = TokenKind::Float;
            }
        }

        // `1.2.3` is a bareword, not a number
        if self.cursor.matches('.') && is_word_char(self.cursor.second()) {
            self.word_rest();
            return TokenKind::Identifier;
        }

        kind
    }

    fn digits(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit() || c == '_');
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.cursor.start_token();
        let first = self.cursor.advance()?;
        let kind = self.token_kind(first);
        let start = self.cursor.token_start();
        Some(Token::new(kind, self.text(), start))
    }
}

fn is_inline_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '~')
}

fn is_variable_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '~' | '@')
}
