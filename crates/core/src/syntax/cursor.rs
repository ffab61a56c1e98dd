use std::str::Chars;

pub(crate) const EOF_CHAR: char = '\0';

/// Char-level cursor that tracks the byte offset of the current token start
pub(crate) struct Cursor<'src> {
    chars: Chars<'src>,
    source_len: usize,
    token_start: usize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars(),
            source_len: source.len(),
            token_start: 0,
        }
    }

    /// Byte offset of the next unread character
    pub(crate) fn offset(&self) -> usize {
        self.source_len - self.chars.as_str().len()
    }

    pub(crate) fn token_start(&self) -> usize {
        self.token_start
    }

    pub(crate) fn start_token(&mut self) {
        self.token_start = self.offset();
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        !self.is_eof() && self.peek() == c
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
