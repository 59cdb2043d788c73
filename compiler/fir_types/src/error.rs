//! Construction and parse errors.
//!
//! Both are local to a single constructor call or parse attempt. A failed
//! construction never leaves anything behind in the pool.

use std::borrow::Cow;

use thiserror::Error;

use crate::Tag;

/// A construction invariant was violated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot build `{tag}` type: {reason}")]
pub struct InvariantViolation {
    /// Family whose constructor rejected the input.
    pub tag: Tag,
    /// Human-readable reason.
    pub reason: Cow<'static, str>,
}

impl InvariantViolation {
    pub fn new(tag: Tag, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tag,
            reason: reason.into(),
        }
    }
}

/// Layout text that would not survive being printed inside `box<..>` or
/// `array<..>` and read back.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid layout attribute `{text}`: {reason}")]
pub struct LayoutError {
    pub text: String,
    pub reason: &'static str,
}

/// Malformed type text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("at byte {pos}: expected {expected}, found {found}")]
pub struct SyntaxError {
    /// Byte offset into the cursor's input.
    pub pos: usize,
    /// What the parser was looking for.
    pub expected: Cow<'static, str>,
    /// What it saw instead.
    pub found: String,
}

/// Failure of [`Pool::parse_type`](crate::Pool::parse_type).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error {0}")]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
