//! Byte cursor over type text.
//!
//! The cursor is handed in by the caller, who may be in the middle of a
//! larger IR text stream. Parsing a type advances it past the type and
//! leaves the rest of the stream alone. The cursor is [`Copy`], so a
//! snapshot is just a copy.

use crate::error::SyntaxError;

/// Check if `b` may start an identifier.
#[inline]
pub const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b'.' | b'$')
}

/// Check if `b` may continue an identifier.
#[inline]
pub const fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'$')
}

/// Check if `s` is a complete identifier (record or component name).
pub fn is_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.first().is_some_and(|&b| is_ident_start(b))
        && bytes[1..].iter().all(|&b| is_ident_continue(b))
}

/// Cursor over a `&str`, tracking a byte position.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Create a cursor at byte offset `pos` of `src`.
    ///
    /// `pos` must lie on a character boundary.
    pub fn at(src: &'a str, pos: usize) -> Self {
        debug_assert!(src.is_char_boundary(pos), "cursor position splits a character");
        Self { src, pos }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Byte at the current position, `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// Byte one past the current position, `0x00` past EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.src.as_bytes().get(self.pos + 1).copied().unwrap_or(0)
    }

    /// Advance by one byte. Only call on ASCII input.
    #[inline]
    pub fn advance(&mut self) {
        debug_assert!(self.current().is_ascii());
        self.pos += 1;
    }

    /// Skip spaces, tabs, and newlines.
    pub fn skip_whitespace(&mut self) {
        let skipped = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_whitespace)
            .count();
        self.pos += skipped;
    }

    /// Consume `b` after optional whitespace.
    pub fn eat(&mut self, b: u8) -> bool {
        self.skip_whitespace();
        if self.current() == b && !self.is_eof() {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `s` after optional whitespace.
    pub fn eat_str(&mut self, s: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume `b` after optional whitespace, or fail with a syntax error.
    pub fn expect(&mut self, b: u8) -> Result<(), SyntaxError> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(self.error(format!("`{}`", char::from(b))))
        }
    }

    /// Consume a run of bytes matching `pred`.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let len = self.rest().bytes().take_while(|&b| pred(b)).count();
        self.pos += len;
        &self.src[start..self.pos]
    }

    /// Consume an identifier after optional whitespace.
    pub fn identifier(&mut self) -> Result<&'a str, SyntaxError> {
        self.skip_whitespace();
        if !is_ident_start(self.current()) {
            return Err(self.error("an identifier"));
        }
        Ok(self.eat_while(is_ident_continue))
    }

    /// Consume a decimal integer after optional whitespace.
    pub fn decimal<T: std::str::FromStr>(&mut self) -> Result<T, SyntaxError> {
        self.skip_whitespace();
        let start = *self;
        let digits = self.eat_while(|b| b.is_ascii_digit());
        digits.parse().map_err(|_| {
            *self = start;
            self.error("a decimal integer")
        })
    }

    /// Consume raw text up to, not including, the `>` that closes the
    /// enclosing angle bracket.
    ///
    /// Nested `<>`, `()`, `[]` and `{}` pairs are skipped, and the `>` of an
    /// `->` arrow never closes. Consumes everything when no closer exists.
    pub fn eat_until_closing_angle(&mut self) -> &'a str {
        let bytes = self.rest().as_bytes();
        let mut depth = 0u32;
        let mut prev = 0u8;
        let mut end = bytes.len();
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'<' | b'(' | b'[' | b'{' => depth += 1,
                b'>' if prev == b'-' => {}
                b'>' if depth == 0 => {
                    end = i;
                    break;
                }
                b'>' | b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            prev = b;
        }
        let start = self.pos;
        self.pos += end;
        &self.src[start..self.pos]
    }

    /// Syntax error at the current position.
    pub fn error(&self, expected: impl Into<std::borrow::Cow<'static, str>>) -> SyntaxError {
        SyntaxError {
            pos: self.pos,
            expected: expected.into(),
            found: self.describe_current(),
        }
    }

    fn describe_current(&self) -> String {
        match self.rest().chars().next() {
            None => "end of input".to_owned(),
            Some(c) => format!("`{c}`"),
        }
    }
}
