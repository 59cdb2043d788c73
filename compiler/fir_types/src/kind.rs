//! Kind selectors and the intrinsic type table.
//!
//! The five intrinsic families differ only in their tag and keyword, so
//! they share one constructor and one accessor through [`Intrinsic`].

use std::fmt;

use crate::Tag;

/// A Fortran `KIND` selector.
///
/// Opaque: only compared and hashed, never interpreted as a size.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Kind(u32);

impl Kind {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for Kind {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the five intrinsic type families.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Intrinsic {
    Character,
    Complex,
    Integer,
    Logical,
    Real,
}

impl Intrinsic {
    pub const ALL: [Intrinsic; 5] = [
        Intrinsic::Character,
        Intrinsic::Complex,
        Intrinsic::Integer,
        Intrinsic::Logical,
        Intrinsic::Real,
    ];

    #[inline]
    pub const fn tag(self) -> Tag {
        match self {
            Self::Character => Tag::Character,
            Self::Complex => Tag::Complex,
            Self::Integer => Tag::Integer,
            Self::Logical => Tag::Logical,
            Self::Real => Tag::Real,
        }
    }

    /// Inverse of [`Intrinsic::tag`].
    #[inline]
    pub const fn from_tag(tag: Tag) -> Option<Self> {
        match tag {
            Tag::Character => Some(Self::Character),
            Tag::Complex => Some(Self::Complex),
            Tag::Integer => Some(Self::Integer),
            Tag::Logical => Some(Self::Logical),
            Tag::Real => Some(Self::Real),
            _ => None,
        }
    }

    /// Look up the family spelled by `keyword` (`"int"`, `"real"`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|intrinsic| intrinsic.tag().keyword() == keyword)
    }
}
